//! Provider plugin SDK
//!
//! In-process model of the host runtime a provider plugs into:
//! attribute schemas, per-read resource data and diagnostics.
//!
//! A data source is a [`Resource`] whose reader fills computed attributes
//! of a [`ResourceData`] and reports problems as [`Diagnostics`].

pub mod diag;
pub mod error;
pub mod provider;
pub mod resource_data;
pub mod schema;

pub use diag::{diag_from_err, Diagnostic, Diagnostics, Severity};
pub use error::SdkError;
pub use provider::Provider;
pub use resource_data::ResourceData;
pub use schema::{ReadContext, Resource, Schema, SchemaMap, ValueType};
