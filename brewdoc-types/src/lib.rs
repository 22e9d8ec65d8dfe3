//! Shared DTOs (schemas-as-code) for the brewdoc workspace.
//!
//! These mirror the JSON that Brewfather exports and serves from its v2 API. Decoding happens once,
//! at the input boundary, through [`RecipeRecord::from_json`] and friends. A required field that is
//! absent fails with [`RecordError::MissingField`] naming its full path, e.g.
//! `mash.steps[0].stepTemp`.
//!
//! # Design constraints
//! - Unknown fields are ignored; Brewfather records carry far more than brewdoc renders.
//! - Optional fields are `Option`/`Vec` with `#[serde(default)]`; everything else is required.
//! - Records are read-only once decoded.

mod batch;
mod decode;
mod error;
mod recipe;

pub use batch::{BatchRecipeRef, BatchRecord, BatchSummary, Note};
pub use decode::{decode_batch_list, decode_json, decode_value};
pub use error::RecordError;
pub use recipe::{
    CategoryNumber, Equipment, Fermentable, Hop, Mash, MashStep, MashWater, Misc, RecipeRecord,
    Style, Yeast,
};
