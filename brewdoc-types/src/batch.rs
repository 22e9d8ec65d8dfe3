use crate::decode::{decode_json, decode_value};
use crate::error::RecordError;
use crate::recipe::RecipeRecord;
use serde::{Deserialize, Serialize};

/// A brew batch as served by `GET /v2/batches/{id}`.
///
/// The embedded recipe is kept as raw JSON so that a batch can be used for its notes even when the
/// recipe snapshot inside it would not validate. [`BatchRecord::recipe`] decodes it on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Stored newest-first.
    #[serde(default)]
    pub notes: Vec<Note>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<serde_json::Value>,
}

impl BatchRecord {
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        decode_json(json)
    }

    /// Decodes the recipe snapshot embedded in the batch.
    pub fn recipe(&self) -> Result<RecipeRecord, RecordError> {
        let raw = self.recipe.clone().ok_or_else(|| RecordError::MissingField {
            path: "recipe".to_string(),
        })?;
        let record: RecipeRecord = decode_value(raw).map_err(|e| e.within("recipe"))?;
        record.validate().map_err(|e| e.within("recipe"))?;
        Ok(record)
    }
}

/// A brew-day note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Free text; status-change notes are often empty.
    #[serde(default)]
    pub note: Option<String>,

    /// Unix time in milliseconds.
    #[serde(default)]
    pub timestamp: Option<i64>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Note {
    /// Note text as written, `None` when absent or whitespace only.
    pub fn text(&self) -> Option<&str> {
        self.note.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// One entry of `GET /v2/batches/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_no: Option<u32>,

    pub recipe: BatchRecipeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecipeRef {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_text_is_verbatim_unless_blank() {
        let note = Note {
            note: Some("  \n".to_string()),
            timestamp: Some(1),
            ..Default::default()
        };
        assert_eq!(note.text(), None);

        let note = Note {
            note: Some(" Pitched yeast ".to_string()),
            ..Default::default()
        };
        assert_eq!(note.text(), Some(" Pitched yeast "));
    }

    #[test]
    fn batch_without_recipe_reports_missing_field() {
        let batch = BatchRecord::default();
        assert_eq!(
            batch.recipe().unwrap_err(),
            RecordError::MissingField {
                path: "recipe".to_string()
            }
        );
    }

    #[test]
    fn null_note_text_is_accepted() {
        let batch =
            BatchRecord::from_json(r#"{"notes":[{"note":null,"timestamp":5,"type":"statusChanged"}]}"#)
                .unwrap();
        assert_eq!(batch.notes.len(), 1);
        assert_eq!(batch.notes[0].text(), None);
        assert_eq!(batch.notes[0].kind.as_deref(), Some("statusChanged"));
    }
}
