//! # arv-raml — RAML Document Parser
//!
//! Reads a RAML 0.8 or 1.0 document and reduces it to the
//! [`Specification`](arv_core::Specification) model: title, version, and
//! the resource tree with each method's description.
//!
//! Only the parts of RAML the validator compares are interpreted.
//! `resourceTypes`, `traits`, schemas and `!include` are not expanded;
//! anything the parser skips is reported as a [`ParseWarning`] so the CLI
//! can surface it in debug mode.
//!
//! ```ignore
//! let parsed = arv_raml::parse_file(Path::new("api.raml"))?;
//! for warning in &parsed.warnings {
//!     tracing::warn!("{warning}");
//! }
//! let spec = parsed.specification;
//! ```

pub mod error;
pub mod parser;

pub use error::{ParseWarning, RamlError};
pub use parser::{parse_file, parse_str, ParsedSpecification};
