use crate::decode::{decode_json, decode_value};
use crate::error::RecordError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A recipe as exported by Brewfather.
///
/// Volumes are liters, masses are kilograms (fermentables) or grams (hops), temperatures are
/// degrees Celsius and times are minutes unless a field says otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRecord {
    pub name: String,

    /// Brewing method, e.g. "All Grain".
    #[serde(rename = "type")]
    pub recipe_type: String,

    pub style: Style,

    pub equipment: Equipment,

    pub post_boil_gravity: f64,

    /// SRM.
    pub color: f64,

    pub ibu: f64,

    pub ibu_formula: String,

    /// Percent alcohol by volume.
    pub abv: f64,

    /// Brewhouse efficiency, percent.
    pub efficiency: f64,

    pub fermentables: Vec<Fermentable>,

    pub hops: Vec<Hop>,

    pub yeasts: Vec<Yeast>,

    pub miscs: Vec<Misc>,

    pub mash: Mash,

    /// Derived water figures Brewfather stores under `data`.
    pub data: MashWater,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teaser: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_tags: Vec<String>,

    /// Public share id, set once the recipe has been shared.
    #[serde(rename = "_share", default, skip_serializing_if = "Option::is_none")]
    pub share: Option<String>,
}

impl RecipeRecord {
    /// Decodes and validates an exported recipe document.
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        let record: Self = decode_json(json)?;
        record.validate()?;
        Ok(record)
    }

    /// Decodes and validates a recipe that has already been parsed as JSON.
    pub fn from_value(value: serde_json::Value) -> Result<Self, RecordError> {
        let record: Self = decode_value(value)?;
        record.validate()?;
        Ok(record)
    }

    /// Checks the constraints serde cannot express.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.mash.steps.is_empty() {
            return Err(RecordError::MissingField {
                path: "mash.steps[0]".to_string(),
            });
        }
        Ok(())
    }

    /// Share id, ignoring blank values.
    pub fn share_id(&self) -> Option<&str> {
        self.share.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Total number of ingredient entries across all four categories.
    pub fn ingredient_count(&self) -> usize {
        self.fermentables.len() + self.hops.len() + self.yeasts.len() + self.miscs.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub name: String,
    pub category_number: CategoryNumber,
    pub style_letter: String,
}

impl Style {
    /// BJCP style code such as `21A`.
    pub fn code(&self) -> String {
        format!("{}{}", self.category_number.as_int(), self.style_letter)
    }
}

/// BJCP category number. Brewfather serializes it as a string, older exports as a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryNumber(pub f64);

impl CategoryNumber {
    /// Integer category, truncating any fractional part.
    pub fn as_int(self) -> i64 {
        self.0.trunc() as i64
    }
}

impl<'de> Deserialize<'de> for CategoryNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(CategoryNumber(n)),
            Raw::Text(s) => s
                .trim()
                .parse::<f64>()
                .map(CategoryNumber)
                .map_err(|_| D::Error::custom(format!("invalid category number {s:?}"))),
        }
    }
}

impl Serialize for CategoryNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub boil_size: f64,
    pub batch_size: f64,
    pub boil_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fermentable {
    pub name: String,

    /// Grain, Sugar, Extract, ...
    #[serde(rename = "type")]
    pub kind: String,

    /// Kilograms.
    pub amount: f64,

    /// Share of the grist, percent.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hop {
    pub name: String,

    /// Grams.
    pub amount: f64,

    /// Alpha acid, percent.
    pub alpha: f64,

    /// Boil, Dry Hop, Whirlpool, ...
    #[serde(rename = "use")]
    pub usage: String,

    /// Minutes for boil additions, days otherwise.
    pub time: f64,
}

impl Hop {
    pub fn is_boil(&self) -> bool {
        self.usage == "Boil"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Yeast {
    pub name: String,
    pub amount: f64,
    pub unit: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laboratory: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Misc {
    pub name: String,
    pub amount: f64,
    pub unit: String,

    /// Water Agent, Fining, Spice, ...
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(rename = "use")]
    pub usage: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
}

impl Misc {
    /// Addition time; zero means "not set" in Brewfather exports.
    pub fn display_time(&self) -> Option<f64> {
        self.time.filter(|t| *t != 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mash {
    pub name: String,
    pub steps: Vec<MashStep>,
}

impl Mash {
    pub fn first_step(&self) -> Option<&MashStep> {
        self.steps.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MashStep {
    /// Celsius.
    pub step_temp: f64,

    /// Minutes.
    pub step_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MashWater {
    /// Liters.
    pub mash_water_amount: f64,

    /// Liters.
    pub sparge_water_amount: f64,

    /// Celsius.
    pub strike_temp: f64,
}
