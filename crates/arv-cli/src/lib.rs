//! # arv-cli — Command-Line Front End
//!
//! Provides the `arv` binary:
//!
//! ```bash
//! arv api/shop.raml path/to/apigility-project
//! arv api/shop.raml . --module Store --format json
//! arv --config arv.yaml -vv
//! ```
//!
//! The report goes to stdout, logs to stderr.
//!
//! ## Exit Codes
//!
//! - `0`: the project matches the specification.
//! - `1`: at least one diagnostic was recorded.
//! - `2`: fatal error: bad arguments, unreadable specification, or
//!   missing or malformed project config.

pub mod render;
pub mod settings;
pub mod validate;

pub use render::{render_json, render_text, ReportFormat, FAILURE_MESSAGE, SUCCESS_MESSAGE};
pub use settings::Settings;
pub use validate::{run_validate, RunOptions, ValidateArgs};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_MISMATCH: u8 = 1;
pub const EXIT_FATAL: u8 = 2;

/// Whether the `NO_COLOR` convention asks for plain output.
pub fn no_color_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}
