//! Port traits abstracting all I/O away from rendering.

use crate::{SourceError, find_batch_id};
use brewdoc_types::{BatchRecord, BatchSummary, RecipeRecord};

/// Source of a validated recipe.
pub trait RecipeSource {
    fn load_recipe(&self) -> Result<RecipeRecord, SourceError>;
}

/// Batches and their brew-day notes.
pub trait BatchSource {
    fn list_batches(&self) -> Result<Vec<BatchSummary>, SourceError>;

    fn fetch_batch(&self, batch_id: &str) -> Result<BatchRecord, SourceError>;

    /// Resolves `recipe_name` to a batch id, then fetches that batch.
    fn batch_for_recipe(&self, recipe_name: &str) -> Result<BatchRecord, SourceError> {
        let batches = self.list_batches()?;
        let batch_id = find_batch_id(&batches, recipe_name)?;
        self.fetch_batch(&batch_id)
    }
}

impl<T: BatchSource + ?Sized> BatchSource for &T {
    fn list_batches(&self) -> Result<Vec<BatchSummary>, SourceError> {
        (**self).list_batches()
    }

    fn fetch_batch(&self, batch_id: &str) -> Result<BatchRecord, SourceError> {
        (**self).fetch_batch(batch_id)
    }
}

/// Destination for the rendered document.
pub trait DocumentSink {
    fn write_document(&self, document: &str) -> Result<(), SourceError>;
}
