pub mod calculate;
pub mod export;
pub mod init;
pub mod settings;
pub mod show;
pub mod subject;
pub mod validate;
