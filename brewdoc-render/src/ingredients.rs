use crate::units::{grams_to_ounces, kilograms_to_pounds, one_decimal, plain, round_to, round_whole};
use brewdoc_types::{Fermentable, Hop, Misc, RecipeRecord, Yeast};
use std::fmt;

/// Placeholder for columns that do not apply to an ingredient.
const NOT_APPLICABLE: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngredientCategory {
    Fermentable,
    Hop,
    Yeast,
    Misc,
}

/// One line of the ingredients table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientRow {
    pub category: IngredientCategory,
    pub amount: String,
    pub name: String,
    pub kind: String,
    pub percentage: String,
}

impl fmt::Display for IngredientRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "|{}|{}|{}|{}|",
            self.amount, self.name, self.kind, self.percentage
        )
    }
}

/// Table rows for every ingredient: fermentables, hops, yeasts, then miscs, each in source order.
pub fn ingredient_rows(recipe: &RecipeRecord) -> Vec<IngredientRow> {
    let mut rows = Vec::with_capacity(recipe.ingredient_count());
    rows.extend(recipe.fermentables.iter().map(fermentable_row));
    rows.extend(recipe.hops.iter().map(hop_row));
    rows.extend(recipe.yeasts.iter().map(yeast_row));
    rows.extend(recipe.miscs.iter().map(misc_row));
    rows
}

fn fermentable_row(f: &Fermentable) -> IngredientRow {
    IngredientRow {
        category: IngredientCategory::Fermentable,
        amount: format!(
            "{} lbs ({} kgs)",
            one_decimal(kilograms_to_pounds(f.amount)),
            round_whole(f.amount)
        ),
        name: f.name.clone(),
        kind: f.kind.clone(),
        percentage: format!("{}%", plain(f.percentage)),
    }
}

fn hop_row(h: &Hop) -> IngredientRow {
    let unit = if h.is_boil() { "min" } else { "days" };
    IngredientRow {
        category: IngredientCategory::Hop,
        amount: format!(
            "{} oz ({} grams)",
            one_decimal(grams_to_ounces(h.amount)),
            round_whole(h.amount)
        ),
        name: format!(
            "{} [{}%] - {} {} {}",
            h.name,
            one_decimal(round_to(h.alpha, 1)),
            h.usage,
            plain(h.time),
            unit
        ),
        kind: "Hop".to_string(),
        percentage: NOT_APPLICABLE.to_string(),
    }
}

fn yeast_row(y: &Yeast) -> IngredientRow {
    let source = match (y.laboratory.as_deref(), y.product_id.as_deref()) {
        (Some(lab), Some(id)) => format!(" ({lab} #{id})"),
        (Some(lab), None) => format!(" ({lab})"),
        (None, Some(id)) => format!(" (#{id})"),
        (None, None) => String::new(),
    };
    IngredientRow {
        category: IngredientCategory::Yeast,
        amount: format!("{} {}", plain(y.amount), y.unit),
        name: format!("{}{}", y.name, source),
        kind: "Yeast".to_string(),
        percentage: NOT_APPLICABLE.to_string(),
    }
}

fn misc_row(m: &Misc) -> IngredientRow {
    let usage = match m.display_time() {
        Some(time) => format!("{} {}", m.usage, plain(time)),
        None => m.usage.clone(),
    };
    IngredientRow {
        category: IngredientCategory::Misc,
        amount: format!("{} {}", plain(m.amount), m.unit),
        name: format!("{} ({})", m.name, usage),
        kind: m.kind.clone(),
        percentage: NOT_APPLICABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hop(usage: &str, time: f64) -> Hop {
        Hop {
            name: "Cascade".to_string(),
            amount: 28.35,
            alpha: 5.5,
            usage: usage.to_string(),
            time,
        }
    }

    #[test]
    fn fermentable_shows_pounds_and_whole_kilograms() {
        let row = fermentable_row(&Fermentable {
            name: "Pale Malt (2 Row) US".to_string(),
            kind: "Grain".to_string(),
            amount: 4.5,
            percentage: 88.2,
        });
        assert_eq!(
            row.to_string(),
            "|9.9 lbs (4 kgs)|Pale Malt (2 Row) US|Grain|88.2%|"
        );
    }

    #[test]
    fn boil_hops_use_minutes() {
        let row = hop_row(&hop("Boil", 60.0));
        assert_eq!(
            row.to_string(),
            "|1.0 oz (28 grams)|Cascade [5.5%] - Boil 60 min|Hop|-|"
        );
    }

    #[test]
    fn non_boil_hops_use_days() {
        let row = hop_row(&hop("Dry Hop", 3.0));
        assert_eq!(row.name, "Cascade [5.5%] - Dry Hop 3 days");
        assert_eq!(row.percentage, "-");
    }

    #[test]
    fn hop_alpha_is_rounded_to_one_decimal() {
        let row = hop_row(&Hop {
            alpha: 12.04,
            ..hop("Boil", 60.0)
        });
        assert!(row.name.contains("[12.0%]"), "{}", row.name);
    }

    #[test]
    fn yeast_includes_lab_and_product() {
        let yeast = Yeast {
            name: "Safale American".to_string(),
            amount: 1.0,
            unit: "pkg".to_string(),
            laboratory: Some("Fermentis".to_string()),
            product_id: Some("US-05".to_string()),
        };
        assert_eq!(
            yeast_row(&yeast).to_string(),
            "|1 pkg|Safale American (Fermentis #US-05)|Yeast|-|"
        );

        let bare = Yeast {
            laboratory: None,
            product_id: None,
            ..yeast
        };
        assert_eq!(yeast_row(&bare).name, "Safale American");
    }

    #[test]
    fn misc_omits_missing_time() {
        let misc = Misc {
            name: "Gypsum".to_string(),
            amount: 4.2,
            unit: "g".to_string(),
            kind: "Water Agent".to_string(),
            usage: "Mash".to_string(),
            time: None,
        };
        assert_eq!(misc_row(&misc).to_string(), "|4.2 g|Gypsum (Mash)|Water Agent|-|");

        let timed = Misc {
            time: Some(15.0),
            ..misc
        };
        assert_eq!(misc_row(&timed).name, "Gypsum (Mash 15)");
    }
}
