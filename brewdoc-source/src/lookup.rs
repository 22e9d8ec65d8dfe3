use crate::SourceError;
use brewdoc_types::BatchSummary;
use tracing::debug;

/// Id of the first batch brewed from `recipe_name`.
///
/// Matching is exact and case-sensitive.
pub fn find_batch_id(batches: &[BatchSummary], recipe_name: &str) -> Result<String, SourceError> {
    match batches.iter().find(|b| b.recipe.name == recipe_name) {
        Some(batch) => {
            debug!(
                recipe = recipe_name,
                batch_id = %batch.id,
                batch_no = ?batch.batch_no,
                "matched batch"
            );
            Ok(batch.id.clone())
        }
        None => Err(SourceError::LookupFailed {
            name: recipe_name.to_string(),
        }),
    }
}
