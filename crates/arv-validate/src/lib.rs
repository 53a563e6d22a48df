//! # arv-validate — Specification vs. Implementation Checks
//!
//! Runs a fixed sequence of checks comparing a parsed RAML
//! [`Specification`](arv_core::Specification) with an Apigility project:
//!
//! 1. the module directory exists,
//! 2. the version namespace folder exists,
//! 3. every top-level resource has a route, and for each matching route
//!    - the implemented HTTP methods match the declared ones,
//!    - the documented descriptions match the declared ones.
//!
//! Mismatches are recorded as [`Diagnostic`](arv_core::Diagnostic)s and
//! never stop the run. Only unreadable or malformed config is an error.

pub mod error;
pub mod report;
pub mod validator;

pub use error::ValidateError;
pub use report::Report;
pub use validator::Validator;
