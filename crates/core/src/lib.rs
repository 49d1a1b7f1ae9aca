//! Pure domain logic for the artwork gallery.
//!
//! Shared id/timestamp types, the error taxonomy, the character-kind and
//! image-slot enumerations, and the read-side projections. No database
//! access — everything here runs in memory and is unit-testable.

pub mod character;
pub mod error;
pub mod report;
pub mod types;
