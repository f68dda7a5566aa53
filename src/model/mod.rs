//! Hierarchical in-memory data model.
//!
//! Ownership is a strict tree: [`AreaStore`] → [`Area`] → [`Measure`] → readings. Every level
//! merges the same way: when an entity is inserted under a key that already exists, the incoming
//! entity's entries win per key and the stored entity's other entries are kept.

pub mod area;
pub mod measure;
pub mod store;

pub use area::Area;
pub use measure::Measure;
pub use store::AreaStore;
