use crate::units::{celsius_to_fahrenheit, liters_to_gallons, one_decimal, plain, round_to, round_whole};
use brewdoc_types::{MashStep, MashWater};
use std::fmt;

/// Sparge water temperature shown for every recipe.
pub const SPARGE_TEMP_F: u32 = 169;
pub const SPARGE_TEMP_C: u32 = 75;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MashRow {
    pub name: String,
    pub description: String,
    pub temperature: String,
    pub time: String,
}

impl fmt::Display for MashRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "|{}|{}|{}|{}|",
            self.name, self.description, self.temperature, self.time
        )
    }
}

/// The "Mash In" and "Sparge" rows.
///
/// Only the first mash step is rendered. Multi-step schedules show their first rest.
pub fn mash_rows(water: &MashWater, first_step: Option<&MashStep>) -> [MashRow; 2] {
    let mash_in = MashRow {
        name: "Mash In".to_string(),
        description: format!(
            "Add {} gal ({} L) of water at {} ({})",
            one_decimal(liters_to_gallons(water.mash_water_amount)),
            round_whole(water.mash_water_amount),
            fahrenheit(celsius_to_fahrenheit(water.strike_temp)),
            celsius(water.strike_temp),
        ),
        temperature: first_step
            .map(|s| {
                format!(
                    "{} ({})",
                    fahrenheit(celsius_to_fahrenheit(s.step_temp)),
                    celsius(s.step_temp)
                )
            })
            .unwrap_or_else(|| "-".to_string()),
        time: first_step
            .map(|s| format!("{} mins", plain(s.step_time)))
            .unwrap_or_else(|| "-".to_string()),
    };

    let sparge = MashRow {
        name: "Sparge".to_string(),
        description: format!(
            "Add {} gal ({}L) water at {SPARGE_TEMP_F}&deg;F ({SPARGE_TEMP_C}&deg;C)",
            one_decimal(liters_to_gallons(water.sparge_water_amount)),
            one_decimal(round_to(water.sparge_water_amount, 1)),
        ),
        temperature: "-".to_string(),
        time: "-".to_string(),
    };

    [mash_in, sparge]
}

fn fahrenheit(converted: f64) -> String {
    format!("{}&deg;F", one_decimal(converted))
}

fn celsius(raw: f64) -> String {
    format!("{}&deg;C", plain(raw))
}
