//! # arv-core — Foundational Types for the Apigility RAML Validator
//!
//! Defines the model shared by every other crate in the workspace: the
//! parsed API specification, the HTTP verb enum, and the diagnostics the
//! validator records. It depends on nothing internal.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `arv-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All model types are read-only after construction and implement `Serialize`.

pub mod diagnostic;
pub mod http;
pub mod model;
pub mod naming;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use http::{HttpMethod, UnknownHttpMethod};
pub use model::{Method, Resource, Specification};
pub use naming::{json_list, ucfirst};
