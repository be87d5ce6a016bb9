//! Property model: a named value, where it came from, and how that resolves.

pub mod property;
pub mod tables;

pub use property::{Lineage, Property, Source};
