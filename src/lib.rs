//! Validation core for OGC API Features conformance testing.
//!
//! Two halves, both fed by the external test runner:
//!
//! - [`openapi`] derives the concrete set of [`openapi::TestPoint`]s implied
//!   by a server's OpenAPI description (templated paths expanded against
//!   declared parameter enumerations).
//! - [`links`], [`extent`], [`temporal`] and [`pagination`] validate the
//!   structure of JSON response payloads: link completeness, spatial and
//!   temporal extents, and paginated feature counts.
//!
//! Pass/fail reporting, payload schema validation and transport configuration
//! are the caller's concern; this crate only parses, derives and walks.

pub mod conformance;
pub mod error;
pub mod extent;
pub mod links;
pub mod openapi;
pub mod pagination;
pub mod temporal;

pub use conformance::RequirementClass;
pub use error::{Error, Result};
pub use extent::BBox;
pub use openapi::TestPoint;
pub use pagination::PaginationWalker;
pub use temporal::TemporalExtent;
