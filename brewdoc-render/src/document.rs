use crate::ingredients::ingredient_rows;
use crate::mash::mash_rows;
use crate::notes::{note_lines, note_lines_local};
use crate::units::{liters_to_gallons, one_decimal, plain, round_gravity_points, round_to};
use brewdoc_types::{BatchRecord, RecipeRecord};
use chrono::TimeZone;
use std::fmt::{self, Display};
use tracing::debug;

/// Where Brewfather serves shared recipes.
pub const DEFAULT_SHARE_BASE_URL: &str = "https://web.brewfather.app/share";

/// Sections in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SectionKind {
    FrontMatter,
    Teaser,
    Summary,
    Specifications,
    Ingredients,
    Mash,
    Notes,
    ShareLink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    /// Newline-terminated markdown; empty for an optional section with nothing to show.
    pub body: String,
}

/// A rendered recipe post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDocument {
    sections: Vec<Section>,
}

impl RecipeDocument {
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

impl Display for RecipeDocument {
    /// Non-empty sections separated by one blank line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for section in self.sections.iter().filter(|s| !s.body.is_empty()) {
            if !first {
                f.write_str("\n")?;
            }
            f.write_str(&section.body)?;
            first = false;
        }
        Ok(())
    }
}

/// Builds a [`RecipeDocument`] from a recipe and, optionally, the batch holding its brew-day notes.
#[derive(Debug, Clone)]
pub struct RecipeDocumentBuilder<'a> {
    recipe: &'a RecipeRecord,
    batch: Option<&'a BatchRecord>,
    share_base_url: String,
}

impl<'a> RecipeDocumentBuilder<'a> {
    pub fn new(recipe: &'a RecipeRecord) -> Self {
        Self {
            recipe,
            batch: None,
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
        }
    }

    pub fn batch(mut self, batch: Option<&'a BatchRecord>) -> Self {
        self.batch = batch;
        self
    }

    pub fn share_base_url(mut self, url: impl Into<String>) -> Self {
        self.share_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Renders with note dates in the local time zone.
    pub fn build(&self) -> RecipeDocument {
        let lines = self
            .batch
            .map(|b| note_lines_local(&b.notes))
            .unwrap_or_default();
        self.assemble(lines)
    }

    /// Renders with note dates in `tz`.
    pub fn build_in<Tz>(&self, tz: &Tz) -> RecipeDocument
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.assemble(self.note_lines_in(tz))
    }

    fn assemble(&self, lines: Vec<String>) -> RecipeDocument {
        debug!(
            recipe = %self.recipe.name,
            ingredients = self.recipe.ingredient_count(),
            notes = lines.len(),
            has_batch = self.batch.is_some(),
            "building recipe document"
        );

        let sections = vec![
            self.front_matter(),
            self.teaser(),
            self.summary(),
            self.specifications(),
            self.ingredients(),
            self.mash(),
            notes_section(lines),
            self.share_link(),
        ];
        RecipeDocument { sections }
    }

    fn note_lines_in<Tz>(&self, tz: &Tz) -> Vec<String>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.batch
            .map(|b| note_lines(&b.notes, tz))
            .unwrap_or_default()
    }

    pub fn front_matter(&self) -> Section {
        let r = self.recipe;
        let mut out = String::new();
        out.push_str("---\n");
        out.push_str(&format!(
            "title: \"{}\"\n",
            yaml_escape(&format!("{} ({} | {})", r.name, r.style.name, r.style.code()))
        ));
        out.push_str("collection: recipes\n");
        out.push_str("categories:\n  - Recipes\n");
        out.push_str("tags:\n");
        out.push_str(&format!("  - \"{}\"\n", yaml_escape(&r.style.name)));
        for tag in r.search_tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
            out.push_str(&format!("  - \"{}\"\n", yaml_escape(tag)));
        }
        out.push_str("---\n");
        section(SectionKind::FrontMatter, out)
    }

    pub fn teaser(&self) -> Section {
        let body = match self.recipe.teaser.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => format!("{t}\n"),
            _ => String::new(),
        };
        section(SectionKind::Teaser, body)
    }

    pub fn summary(&self) -> Section {
        let r = self.recipe;
        let mut out = String::new();
        out.push_str(&format!("**Name**: {}<br />\n", r.name));
        out.push_str(&format!(
            "**Style**: {} ({})<br />\n",
            r.style.name,
            r.style.code()
        ));
        out.push_str(&format!("**Type**: {}\n", r.recipe_type));
        section(SectionKind::Summary, out)
    }

    pub fn specifications(&self) -> Section {
        let r = self.recipe;
        let eq = &r.equipment;
        let mut out = String::new();
        out.push_str("## Recipe Specifications\n\n");
        out.push_str(&format!(
            "**Boil Size**: {} gal ({}L)<br />\n",
            one_decimal(liters_to_gallons(eq.boil_size)),
            one_decimal(round_to(eq.boil_size, 1))
        ));
        out.push_str(&format!(
            "**Batch Size (fermenter)**: {} gal ({}L)<br />\n",
            one_decimal(liters_to_gallons(eq.batch_size)),
            one_decimal(round_to(eq.batch_size, 1))
        ));
        out.push_str(&format!(
            "**Estimated OG**: {}<br />\n",
            plain(round_gravity_points(r.post_boil_gravity))
        ));
        out.push_str(&format!("**Estimated Color**: {} SRM<br />\n", plain(r.color)));
        out.push_str(&format!(
            "**Estimated IBU**: {} ({})<br />\n",
            plain(r.ibu),
            r.ibu_formula
        ));
        out.push_str(&format!(
            "**Estimated ABV**: {}%<br />\n",
            one_decimal(round_to(r.abv, 1))
        ));
        out.push_str(&format!(
            "**Brewhouse Efficiency**: {}%<br />\n",
            plain(r.efficiency)
        ));
        out.push_str(&format!(
            "**Boil Time**: {} minutes<br />\n",
            plain(eq.boil_time)
        ));
        section(SectionKind::Specifications, out)
    }

    pub fn ingredients(&self) -> Section {
        let mut out = String::new();
        out.push_str("## Ingredients\n\n");
        out.push_str("|Amount|Name|Type|%|\n");
        out.push_str("|-|-|-|-|\n");
        for row in ingredient_rows(self.recipe) {
            out.push_str(&format!("{row}\n"));
        }
        section(SectionKind::Ingredients, out)
    }

    pub fn mash(&self) -> Section {
        let r = self.recipe;
        let mut out = String::new();
        out.push_str("## Mash\n\n");
        out.push_str(&format!("**Mash Schedule**: {}\n\n", r.mash.name));
        out.push_str("|Name|Description|Step Temperature|Step Time|\n");
        out.push_str("|-|-|-|-|\n");
        for row in mash_rows(&r.data, r.mash.first_step()) {
            out.push_str(&format!("{row}\n"));
        }
        section(SectionKind::Mash, out)
    }

    pub fn notes<Tz>(&self, tz: &Tz) -> Section
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        notes_section(self.note_lines_in(tz))
    }

    pub fn share_link(&self) -> Section {
        let body = match self.recipe.share_id() {
            Some(id) => {
                let url = format!("{}/{}", self.share_base_url, id);
                format!("Brewfather: [{url}]({url})\n")
            }
            None => String::new(),
        };
        section(SectionKind::ShareLink, body)
    }
}

fn section(kind: SectionKind, body: String) -> Section {
    Section { kind, body }
}

/// The header stays even when there is nothing under it.
fn notes_section(lines: Vec<String>) -> Section {
    let mut out = String::from("## Notes\n");
    if !lines.is_empty() {
        out.push('\n');
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
    }
    section(SectionKind::Notes, out)
}

/// Escapes a value for a double-quoted YAML scalar.
fn yaml_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
