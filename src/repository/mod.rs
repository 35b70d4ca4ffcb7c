//! Direct data access for the catalog tables.
//!
//! Stores never raise domain errors: a missing row comes back as `None` or `false`
//! and the caller decides whether that matters.

pub mod category;
pub mod product;
