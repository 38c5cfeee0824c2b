//! gradekit-report — Result exporters.
//!
//! Turns a `ResultsSummary` into a JSON export, a CSV table or a printable
//! self-contained HTML page with SVG charts.

pub mod csv;
pub mod html;
pub mod json;

pub use self::csv::{generate_csv, write_csv};
pub use self::html::{generate_html, write_html_report};
pub use self::json::{generate_json, write_json_export, ExportDocument};
