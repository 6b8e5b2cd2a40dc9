use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// A single pre-parsed weather observation consumed by the recommendation
/// engine. Constructed by a weather provider or supplied inline by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Air temperature in °C
    pub temperature_c: f64,
    /// Rain volume over the last hour in millimetres
    #[serde(default)]
    pub precipitation_mm: f64,
    /// Wind speed in km/h
    #[serde(default)]
    pub wind_speed_kmh: f64,
    /// Set when the short-term forecast shows a large temperature spread
    #[serde(default)]
    pub temp_swing: bool,
}

impl WeatherReading {
    /// Rejects non-finite or physically impossible readings.
    ///
    /// Surface temperatures outside [-90, 60] °C have never been recorded,
    /// and negative precipitation or wind cannot occur.
    pub fn validate(&self) -> AppResult<()> {
        if !self.temperature_c.is_finite() {
            return Err(AppError::InvalidInput(
                "temperature must be a finite number".to_string(),
            ));
        }
        if !(-90.0..=60.0).contains(&self.temperature_c) {
            return Err(AppError::InvalidInput(format!(
                "temperature {} °C is outside the physical range",
                self.temperature_c
            )));
        }
        if !self.precipitation_mm.is_finite() || self.precipitation_mm < 0.0 {
            return Err(AppError::InvalidInput(format!(
                "precipitation {} mm is not a valid rain volume",
                self.precipitation_mm
            )));
        }
        if !self.wind_speed_kmh.is_finite()
            || self.wind_speed_kmh < 0.0
            || self.wind_speed_kmh > 500.0
        {
            return Err(AppError::InvalidInput(format!(
                "wind speed {} km/h is not a valid wind speed",
                self.wind_speed_kmh
            )));
        }
        Ok(())
    }
}

/// Garment attribute targets derived from a weather reading.
///
/// Values always stay within their declared bounds: warmth 1-5,
/// impermeability 1-3, layering 3-5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredAttributes {
    pub warmth: u8,
    pub impermeability: u8,
    pub layering: u8,
}

/// Where a weather snapshot came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeatherSource {
    /// Fetched from the live weather API
    Live,
    /// Canned fallback used when no API key is configured
    Mock,
}

/// Current conditions for a city as returned by a weather provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub description: String,
    pub source: WeatherSource,
    pub reading: WeatherReading,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(temp: f64) -> WeatherReading {
        WeatherReading {
            temperature_c: temp,
            precipitation_mm: 0.0,
            wind_speed_kmh: 10.0,
            temp_swing: false,
        }
    }

    #[test]
    fn test_validate_accepts_ordinary_reading() {
        assert!(reading(18.5).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_nan_temperature() {
        let result = reading(f64::NAN).validate();
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_rejects_out_of_range_temperature() {
        assert!(reading(-120.0).validate().is_err());
        assert!(reading(75.0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_precipitation() {
        let mut r = reading(10.0);
        r.precipitation_mm = -1.0;
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_infinite_wind() {
        let mut r = reading(10.0);
        r.wind_speed_kmh = f64::INFINITY;
        assert!(r.validate().is_err());
    }
}
