//! gradekit CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "gradekit", version, about = "Grade statistics against KKM thresholds")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a gradebook and compute its statistics
    Calculate {
        /// Path to the gradebook .toml
        #[arg(long, default_value = "grades.toml", conflicts_with = "restore")]
        gradebook: PathBuf,

        /// Recalculate the last saved snapshot instead of a gradebook file
        #[arg(long)]
        restore: bool,

        /// Output format(s): json, csv, html, all (comma-separated)
        #[arg(long)]
        format: Option<String>,

        /// Output directory
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Do not write the snapshot
        #[arg(long)]
        no_save: bool,
    },

    /// Export the results of the last calculation
    Export {
        /// Output format: json, csv, html
        #[arg(long, default_value = "json")]
        format: String,

        /// Output file (default: <output_dir>/results-<timestamp>.<ext>)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the last saved results
    Show {
        /// Print the results as JSON
        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a gradebook for input errors
    Validate {
        /// Path to the gradebook .toml
        #[arg(long, default_value = "grades.toml")]
        gradebook: PathBuf,
    },

    /// Add, remove or edit subjects
    Subject {
        #[command(subcommand)]
        action: SubjectAction,
    },

    /// Show or change the global settings of a gradebook
    Settings {
        /// Path to the gradebook .toml
        #[arg(long, default_value = "grades.toml")]
        gradebook: PathBuf,

        /// Target average (empty string clears it)
        #[arg(long)]
        target: Option<String>,

        /// Global KKM
        #[arg(long)]
        global_kkm: Option<i64>,

        /// Apply the global KKM to every subject
        #[arg(long)]
        use_global_kkm: Option<bool>,
    },

    /// Create starter config and example gradebook
    Init,
}

#[derive(Subcommand)]
pub enum SubjectAction {
    /// Append a new subject
    Add {
        #[arg(long, default_value = "grades.toml")]
        gradebook: PathBuf,

        /// Subject name (default: "Subject <id>")
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        score: Option<String>,

        #[arg(long)]
        kkm: Option<String>,
    },

    /// Remove a subject
    Remove {
        #[arg(long, default_value = "grades.toml")]
        gradebook: PathBuf,

        #[arg(long)]
        id: u32,
    },

    /// Change a subject's name, score or KKM
    Set {
        #[arg(long, default_value = "grades.toml")]
        gradebook: PathBuf,

        #[arg(long)]
        id: u32,

        #[arg(long)]
        name: Option<String>,

        /// New score (empty string clears it)
        #[arg(long)]
        score: Option<String>,

        #[arg(long)]
        kkm: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradekit=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Calculate {
            gradebook,
            restore,
            format,
            output,
            config,
            no_save,
        } => commands::calculate::execute(commands::calculate::CalculateArgs {
            gradebook,
            restore,
            format,
            output,
            config,
            no_save,
        }),
        Commands::Export {
            format,
            output,
            config,
        } => commands::export::execute(format, output, config),
        Commands::Show { json, config } => commands::show::execute(json, config),
        Commands::Validate { gradebook } => commands::validate::execute(gradebook),
        Commands::Subject { action } => commands::subject::execute(action),
        Commands::Settings {
            gradebook,
            target,
            global_kkm,
            use_global_kkm,
        } => commands::settings::execute(gradebook, target, global_kkm, use_global_kkm),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
