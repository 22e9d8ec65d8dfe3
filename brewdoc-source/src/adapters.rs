//! Default filesystem-backed and in-memory port implementations.

use crate::SourceError;
use crate::ports::{BatchSource, DocumentSink, RecipeSource};
use brewdoc_types::{BatchRecord, BatchSummary, RecipeRecord};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::io::Write;
use tracing::debug;

/// Reads an exported recipe JSON file.
#[derive(Debug, Clone)]
pub struct FsRecipeSource {
    pub path: Utf8PathBuf,
}

impl FsRecipeSource {
    pub fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }
}

impl RecipeSource for FsRecipeSource {
    fn load_recipe(&self) -> Result<RecipeRecord, SourceError> {
        debug!(path = %self.path, "reading recipe export");
        let json = fs::read_to_string(&self.path).map_err(|e| SourceError::io(&self.path, e))?;
        RecipeRecord::from_json(&json)
            .map_err(|e| SourceError::record(format!("decode recipe {}", self.path), e))
    }
}

/// Reads a batch JSON file saved from the API, for rendering notes offline.
pub fn load_batch_file(path: &Utf8Path) -> Result<BatchRecord, SourceError> {
    debug!(path = %path, "reading batch export");
    let json = fs::read_to_string(path).map_err(|e| SourceError::io(path, e))?;
    BatchRecord::from_json(&json).map_err(|e| SourceError::record(format!("decode batch {path}"), e))
}

/// In-memory recipe source for embedding and testing.
#[derive(Debug, Clone)]
pub struct InMemoryRecipeSource {
    recipe: RecipeRecord,
}

impl InMemoryRecipeSource {
    pub fn new(recipe: RecipeRecord) -> Self {
        Self { recipe }
    }
}

impl RecipeSource for InMemoryRecipeSource {
    fn load_recipe(&self) -> Result<RecipeRecord, SourceError> {
        self.recipe
            .validate()
            .map_err(|e| SourceError::record("validate in-memory recipe", e))?;
        Ok(self.recipe.clone())
    }
}

/// In-memory batch source for embedding and testing.
///
/// Listing order is insertion order, like the API's.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBatchSource {
    entries: Vec<(BatchSummary, BatchRecord)>,
}

impl InMemoryBatchSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch(mut self, summary: BatchSummary, batch: BatchRecord) -> Self {
        self.entries.push((summary, batch));
        self
    }
}

impl BatchSource for InMemoryBatchSource {
    fn list_batches(&self) -> Result<Vec<BatchSummary>, SourceError> {
        Ok(self.entries.iter().map(|(s, _)| s.clone()).collect())
    }

    fn fetch_batch(&self, batch_id: &str) -> Result<BatchRecord, SourceError> {
        self.entries
            .iter()
            .find(|(s, _)| s.id == batch_id)
            .map(|(_, b)| b.clone())
            .ok_or_else(|| SourceError::UnknownBatch {
                id: batch_id.to_string(),
            })
    }
}

/// Recipe resolved through its batch: name -> batch id -> batch -> embedded recipe.
#[derive(Debug, Clone)]
pub struct BatchRecipeSource<B> {
    batches: B,
    recipe_name: String,
}

impl<B: BatchSource> BatchRecipeSource<B> {
    pub fn new(batches: B, recipe_name: impl Into<String>) -> Self {
        Self {
            batches,
            recipe_name: recipe_name.into(),
        }
    }

    /// The recipe together with the batch it came from, so notes need no second request.
    pub fn fetch(&self) -> Result<(RecipeRecord, BatchRecord), SourceError> {
        let batch = self.batches.batch_for_recipe(&self.recipe_name)?;
        let recipe = batch.recipe().map_err(|e| {
            SourceError::record(
                format!("decode recipe in batch for {:?}", self.recipe_name),
                e,
            )
        })?;
        Ok((recipe, batch))
    }
}

impl<B: BatchSource> RecipeSource for BatchRecipeSource<B> {
    fn load_recipe(&self) -> Result<RecipeRecord, SourceError> {
        self.fetch().map(|(recipe, _)| recipe)
    }
}

/// Writes the document to standard output.
#[derive(Debug, Clone, Default)]
pub struct StdoutSink;

impl DocumentSink for StdoutSink {
    fn write_document(&self, document: &str) -> Result<(), SourceError> {
        let mut out = std::io::stdout().lock();
        out.write_all(document.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| SourceError::io("<stdout>", e))
    }
}

/// Writes the document to a file, creating parent directories.
#[derive(Debug, Clone)]
pub struct FileSink {
    pub path: Utf8PathBuf,
}

impl FileSink {
    pub fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }
}

impl DocumentSink for FileSink {
    fn write_document(&self, document: &str) -> Result<(), SourceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SourceError::io(parent, e))?;
        }
        fs::write(&self.path, document).map_err(|e| SourceError::io(&self.path, e))?;
        debug!(path = %self.path, bytes = document.len(), "wrote document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewdoc_types::{BatchRecipeRef, RecordError};
    use tempfile::TempDir;

    fn summary(id: &str, recipe: &str) -> BatchSummary {
        BatchSummary {
            id: id.to_string(),
            name: None,
            batch_no: None,
            recipe: BatchRecipeRef {
                name: recipe.to_string(),
            },
        }
    }

    #[test]
    fn in_memory_recipe_source_validates_on_load() {
        let recipe =
            RecipeRecord::from_json(include_str!("../../tests/fixtures/pale_ale/recipe.json"))
                .expect("fixture");
        let loaded = InMemoryRecipeSource::new(recipe.clone())
            .load_recipe()
            .expect("valid recipe");
        assert_eq!(loaded, recipe);

        let mut stepless = recipe;
        stepless.mash.steps.clear();
        let err = InMemoryRecipeSource::new(stepless)
            .load_recipe()
            .unwrap_err();
        assert_eq!(err.field_path(), Some("mash.steps[0]"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn in_memory_batch_source_fetches_by_id() {
        let batch = BatchRecord {
            id: Some("b1".to_string()),
            ..Default::default()
        };
        let source = InMemoryBatchSource::new().with_batch(summary("b1", "Stout"), batch.clone());
        assert_eq!(source.list_batches().unwrap().len(), 1);
        assert_eq!(source.fetch_batch("b1").unwrap(), batch);
        assert!(matches!(
            source.fetch_batch("nope"),
            Err(SourceError::UnknownBatch { .. })
        ));
    }

    #[test]
    fn batch_recipe_source_reports_missing_embedded_recipe() {
        let source = InMemoryBatchSource::new()
            .with_batch(summary("b1", "Stout"), BatchRecord::default());
        let err = BatchRecipeSource::new(&source, "Stout")
            .load_recipe()
            .unwrap_err();
        match err {
            SourceError::Record { source, .. } => assert_eq!(
                source,
                RecordError::MissingField {
                    path: "recipe".to_string()
                }
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn file_sink_creates_parent_dirs() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let path = root.join("posts").join("2023").join("pale-ale.md");

        FileSink::new(path.clone())
            .write_document("# hello\n")
            .expect("write");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# hello\n");
    }

    #[test]
    fn missing_recipe_file_is_an_io_error() {
        let err = FsRecipeSource::new(Utf8PathBuf::from("/definitely/not/here.json"))
            .load_recipe()
            .unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
