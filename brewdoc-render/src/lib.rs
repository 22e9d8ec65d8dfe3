//! Rendering helpers (markdown) for recipe posts.
//!
//! Everything here is pure: records in, text out. The document is assembled by
//! [`RecipeDocumentBuilder`] from independently testable sections, always in the same order.

mod document;
mod ingredients;
mod mash;
mod notes;
pub mod units;

pub use document::{DEFAULT_SHARE_BASE_URL, RecipeDocument, RecipeDocumentBuilder, Section, SectionKind};
pub use ingredients::{IngredientCategory, IngredientRow, ingredient_rows};
pub use mash::{MashRow, SPARGE_TEMP_C, SPARGE_TEMP_F, mash_rows};
pub use notes::{note_lines, note_lines_local};
