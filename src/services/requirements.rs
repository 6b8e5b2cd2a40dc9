use crate::{
    error::AppResult,
    models::{RequiredAttributes, WeatherReading},
};

/// Rain volume at or above which waterproof garments are required, in mm/h
const HEAVY_RAIN_MM: f64 = 2.5;
/// Rain volume above which water-resistant garments are required, in mm/h
const LIGHT_RAIN_MM: f64 = 0.5;
/// Wind speed above which maximal layering is required, in km/h
const HIGH_WIND_KMH: f64 = 25.0;

/// Translates a weather reading into required garment attributes.
///
/// Deterministic pure function; the same reading always yields the same
/// requirements. Malformed readings fail with `InvalidInput` rather than
/// silently defaulting.
pub fn required_attributes(reading: &WeatherReading) -> AppResult<RequiredAttributes> {
    reading.validate()?;

    let warmth = warmth_requirement(reading.temperature_c);

    let impermeability = if reading.precipitation_mm >= HEAVY_RAIN_MM {
        3
    } else if reading.precipitation_mm > LIGHT_RAIN_MM {
        2
    } else {
        1
    };

    // Strong or volatile conditions call for maximal layering; otherwise the
    // temperature band decides between a mid value of 3 or 4.
    let layering = if reading.wind_speed_kmh > HIGH_WIND_KMH || reading.temp_swing {
        5
    } else if warmth >= 3 {
        4
    } else {
        3
    };

    Ok(RequiredAttributes {
        warmth,
        impermeability,
        layering,
    })
}

/// Temperature bands are boundary-inclusive on the lower side.
fn warmth_requirement(temperature_c: f64) -> u8 {
    if temperature_c < 0.0 {
        5
    } else if temperature_c < 10.0 {
        4
    } else if temperature_c < 18.0 {
        3
    } else if temperature_c <= 25.0 {
        2
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn reading(temp: f64, rain: f64, wind: f64) -> WeatherReading {
        WeatherReading {
            temperature_c: temp,
            precipitation_mm: rain,
            wind_speed_kmh: wind,
            temp_swing: false,
        }
    }

    #[test]
    fn test_sub_zero_temperatures_require_max_warmth() {
        for temp in [-0.1, -5.0, -30.0, -89.9] {
            let required = required_attributes(&reading(temp, 0.0, 5.0)).unwrap();
            assert_eq!(required.warmth, 5, "temp {}", temp);
        }
    }

    #[test]
    fn test_warmth_band_boundaries() {
        // lower boundary of each band belongs to that band
        assert_eq!(required_attributes(&reading(0.0, 0.0, 5.0)).unwrap().warmth, 4);
        assert_eq!(required_attributes(&reading(9.9, 0.0, 5.0)).unwrap().warmth, 4);
        assert_eq!(required_attributes(&reading(10.0, 0.0, 5.0)).unwrap().warmth, 3);
        assert_eq!(required_attributes(&reading(17.9, 0.0, 5.0)).unwrap().warmth, 3);
        assert_eq!(required_attributes(&reading(18.0, 0.0, 5.0)).unwrap().warmth, 2);
        assert_eq!(required_attributes(&reading(25.0, 0.0, 5.0)).unwrap().warmth, 2);
        assert_eq!(required_attributes(&reading(25.1, 0.0, 5.0)).unwrap().warmth, 1);
    }

    #[test]
    fn test_impermeability_bands() {
        assert_eq!(
            required_attributes(&reading(15.0, 0.0, 5.0)).unwrap().impermeability,
            1
        );
        assert_eq!(
            required_attributes(&reading(15.0, 0.5, 5.0)).unwrap().impermeability,
            1
        );
        assert_eq!(
            required_attributes(&reading(15.0, 1.0, 5.0)).unwrap().impermeability,
            2
        );
        assert_eq!(
            required_attributes(&reading(15.0, 2.5, 5.0)).unwrap().impermeability,
            3
        );
        assert_eq!(
            required_attributes(&reading(15.0, 12.0, 5.0)).unwrap().impermeability,
            3
        );
    }

    #[test]
    fn test_layering_follows_warmth_band() {
        // warm band -> 3, cold band -> 4
        assert_eq!(required_attributes(&reading(22.0, 0.0, 5.0)).unwrap().layering, 3);
        assert_eq!(required_attributes(&reading(12.0, 0.0, 5.0)).unwrap().layering, 4);
    }

    #[test]
    fn test_high_wind_forces_max_layering() {
        let required = required_attributes(&reading(22.0, 0.0, 30.0)).unwrap();
        assert_eq!(required.layering, 5);
    }

    #[test]
    fn test_temp_swing_forces_max_layering() {
        let mut r = reading(22.0, 0.0, 5.0);
        r.temp_swing = true;
        assert_eq!(required_attributes(&r).unwrap().layering, 5);
    }

    #[test]
    fn test_translator_is_idempotent() {
        let r = reading(-5.0, 1.2, 14.0);
        let first = required_attributes(&r).unwrap();
        let second = required_attributes(&r).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_freezing_dry_breezy_scenario() {
        // -5 °C, no precipitation, wind 10 km/h
        let required = required_attributes(&reading(-5.0, 0.0, 10.0)).unwrap();
        assert_eq!(required.warmth, 5);
        assert_eq!(required.impermeability, 1);
        assert_eq!(required.layering, 4);
    }

    #[test]
    fn test_nan_temperature_is_rejected() {
        let result = required_attributes(&reading(f64::NAN, 0.0, 5.0));
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_bounds_invariant_over_sampled_inputs() {
        for temp in (-80..=50).step_by(5) {
            for rain in [0.0, 0.4, 0.9, 3.0] {
                for wind in [0.0, 12.0, 40.0] {
                    let required =
                        required_attributes(&reading(temp as f64, rain, wind)).unwrap();
                    assert!((1..=5).contains(&required.warmth));
                    assert!((1..=3).contains(&required.impermeability));
                    assert!((3..=5).contains(&required.layering));
                }
            }
        }
    }
}
