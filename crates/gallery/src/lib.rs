//! Service layer over the artwork store and usage index.
//!
//! Validated store operations with driver errors mapped into the domain
//! taxonomy, the promotion flow that normalizes character-embedded URLs,
//! and async assembly of the read-side reports.

pub mod error;
pub mod promotion;
pub mod report;
pub mod store;
