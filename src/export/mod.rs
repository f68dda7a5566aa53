//! Output forms of the model.
//!
//! - [`json`]: `serde::Serialize` for [`crate::model::Measure`], [`crate::model::Area`] and
//!   [`crate::model::AreaStore`], plus `to_json` helpers and [`crate::model::AreaStore::from_json`].
//! - [`text`]: `Display` tables for the same three types.

pub mod json;
pub mod text;
