//! Unit conversions used by every section of the document.
//!
//! Rounding works on the exact decimal value of the double, ties to even: `6.35` is stored as
//! `6.3499999…` and rounds to `6.3`, while `round(4.5) == 4`.

const GALLONS_PER_LITER: f64 = 0.264172;
const POUNDS_PER_KILOGRAM: f64 = 2.204623;
const OUNCES_PER_GRAM: f64 = 0.03527396;

pub fn liters_to_gallons(liters: f64) -> f64 {
    round_to(liters * GALLONS_PER_LITER, 1)
}

pub fn kilograms_to_pounds(kilograms: f64) -> f64 {
    round_to(kilograms * POUNDS_PER_KILOGRAM, 1)
}

pub fn grams_to_ounces(grams: f64) -> f64 {
    round_to(grams * OUNCES_PER_GRAM, 1)
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    round_to(celsius * 1.8 + 32.0, 1)
}

/// Rounds a specific gravity to three decimals.
///
/// The intermediate four-decimal step absorbs float noise from upstream calculations
/// (`1.0519999999` should read `1.052`, not be rounded on its noisy tail).
pub fn round_gravity_points(gravity: f64) -> f64 {
    round_to(round_to(gravity, 4), 3)
}

/// Rounds to `digits` decimal places.
///
/// Goes through the decimal expansion rather than scaling by `10^digits`, which would turn
/// values just below a tie (`0.05`, `6.35`) into exact binary ties.
pub fn round_to(value: f64, digits: usize) -> f64 {
    format!("{value:.digits$}").parse().unwrap_or(value)
}

/// Rounds to the nearest whole number, ties to even.
pub fn round_whole(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Formats a value that has already been rounded to one decimal (`11.0`, `5.3`).
pub fn one_decimal(value: f64) -> String {
    format!("{value:.1}")
}

/// Formats a raw measurement in its shortest exact form (`6.8`, `60`).
pub fn plain(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_match_reference_values() {
        assert_eq!(liters_to_gallons(20.0), 5.3);
        assert_eq!(kilograms_to_pounds(5.0), 11.0);
        assert_eq!(celsius_to_fahrenheit(67.0), 152.6);
        assert_eq!(grams_to_ounces(28.35), 1.0);
        assert_eq!(liters_to_gallons(0.0), 0.0);
    }

    #[test]
    fn rounding_follows_the_stored_decimal_value() {
        let cases: &[(f64, usize, f64)] = &[
            (6.35, 1, 6.3),
            (0.05, 1, 0.1),
            (2.675, 2, 2.67),
            (1.45, 1, 1.4),
            (5.249999, 1, 5.2),
            (5.86, 1, 5.9),
            (12.04, 1, 12.0),
            (-0.05, 1, -0.1),
        ];
        for &(value, digits, expected) in cases {
            assert_eq!(round_to(value, digits), expected, "round_to({value}, {digits})");
        }
    }

    #[test]
    fn conversions_round_the_converted_value() {
        let cases: &[(fn(f64) -> f64, f64, f64)] = &[
            (celsius_to_fahrenheit, 40.25, 104.5),
            (celsius_to_fahrenheit, 73.4, 164.1),
            (celsius_to_fahrenheit, 71.2, 160.2),
            (celsius_to_fahrenheit, 68.5, 155.3),
            (liters_to_gallons, 28.5, 7.5),
            (liters_to_gallons, 19.4, 5.1),
            (liters_to_gallons, 14.6, 3.9),
            (kilograms_to_pounds, 0.35, 0.8),
            (kilograms_to_pounds, 0.28, 0.6),
            (grams_to_ounces, 30.0, 1.1),
        ];
        for &(convert, input, expected) in cases {
            assert_eq!(convert(input), expected, "input {input}");
        }
    }

    #[test]
    fn gravity_rounding_pinned_values() {
        assert_eq!(round_gravity_points(1.05745), 1.058);
        assert_eq!(round_gravity_points(1.0581234), 1.058);
        assert_eq!(round_gravity_points(1.04449), 1.044);
    }

    #[test]
    fn gravity_rounds_through_four_decimals() {
        assert_eq!(round_gravity_points(1.04567891), 1.046);
        assert_eq!(round_gravity_points(1.0520000000000003), 1.052);
        assert_eq!(round_gravity_points(1.0), 1.0);
    }

    #[test]
    fn whole_rounding_is_half_to_even() {
        assert_eq!(round_whole(4.5), 4);
        assert_eq!(round_whole(5.5), 6);
        assert_eq!(round_whole(0.6), 1);
    }

    #[test]
    fn formatting_helpers() {
        assert_eq!(one_decimal(11.0), "11.0");
        assert_eq!(one_decimal(5.3), "5.3");
        assert_eq!(plain(60.0), "60");
        assert_eq!(plain(6.8), "6.8");
    }
}
