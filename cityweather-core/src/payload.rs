//! WeatherAPI.com response bodies.
//!
//! Top-level blocks are optional on purpose: a payload that parses but lacks
//! the data the page needs is reported as unavailable data, not as a parse
//! failure.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::model::{Condition, CurrentConditions, ForecastDay};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentPayload {
    pub location: Option<WaLocation>,
    pub current: Option<WaCurrent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastPayload {
    pub forecast: Option<WaForecast>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaLocation {
    pub name: String,
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaCondition {
    pub text: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaCurrent {
    pub temp_c: f64,
    pub humidity: u8,
    pub uv: f64,
    pub condition: WaCondition,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaForecast {
    pub forecastday: Option<Vec<WaForecastDay>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaForecastDay {
    pub date: NaiveDate,
    pub day: WaDay,
    pub astro: WaAstro,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaDay {
    pub maxtemp_c: f64,
    pub mintemp_c: f64,
    pub totalprecip_mm: f64,
    pub condition: WaCondition,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaAstro {
    pub sunrise: String,
    pub sunset: String,
}

impl From<WaCondition> for Condition {
    fn from(value: WaCondition) -> Self {
        Condition { text: value.text, icon: value.icon }
    }
}

impl CurrentPayload {
    /// `None` unless both the location and the current block are present.
    pub fn into_conditions(self) -> Option<CurrentConditions> {
        let location = self.location?;
        let current = self.current?;

        Some(CurrentConditions {
            location_name: location.name,
            country: location.country,
            condition: current.condition.into(),
            temperature_c: current.temp_c,
            humidity_pct: current.humidity,
            uv_index: current.uv,
        })
    }
}

impl ForecastPayload {
    /// `None` when `forecast.forecastday` is missing.
    pub fn into_days(self) -> Option<Vec<ForecastDay>> {
        let days = self.forecast?.forecastday?;

        Some(
            days.into_iter()
                .map(|d| ForecastDay {
                    date: d.date,
                    min_temp_c: d.day.mintemp_c,
                    max_temp_c: d.day.maxtemp_c,
                    condition: d.day.condition.into(),
                    total_precip_mm: d.day.totalprecip_mm,
                    sunrise: d.astro.sunrise,
                    sunset: d.astro.sunset,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn current_payload_maps_to_conditions() {
        let payload: CurrentPayload = serde_json::from_value(json!({
            "location": {"name": "Paris", "country": "France", "localtime_epoch": 1717400000},
            "current": {
                "temp_c": 18.0,
                "humidity": 60,
                "uv": 3.0,
                "wind_kph": 11.2,
                "condition": {"text": "Clear", "icon": "//cdn.weatherapi.com/113.png", "code": 1000}
            }
        }))
        .expect("valid payload");

        let current = payload.into_conditions().expect("populated");
        assert_eq!(current.location_name, "Paris");
        assert_eq!(current.country, "France");
        assert_eq!(current.condition.text, "Clear");
        assert_eq!(current.condition.icon, "//cdn.weatherapi.com/113.png");
        assert_eq!(current.humidity_pct, 60);
        assert_eq!(current.uv_index, 3.0);
    }

    #[test]
    fn current_payload_without_current_block_is_unpopulated() {
        let payload: CurrentPayload =
            serde_json::from_value(json!({"location": {"name": "Paris", "country": "France"}}))
                .expect("valid payload");

        assert!(payload.into_conditions().is_none());
    }

    #[test]
    fn forecast_payload_maps_days_in_order() {
        let payload: ForecastPayload = serde_json::from_value(json!({
            "forecast": {"forecastday": [
                {
                    "date": "2024-06-03",
                    "day": {"maxtemp_c": 22.1, "mintemp_c": 12.4, "totalprecip_mm": 1.2,
                            "condition": {"text": "Patchy rain", "icon": "//cdn/176.png"}},
                    "astro": {"sunrise": "05:47 AM", "sunset": "09:50 PM"}
                },
                {
                    "date": "2024-06-04",
                    "day": {"maxtemp_c": 24.0, "mintemp_c": 13.0, "totalprecip_mm": 0.0,
                            "condition": {"text": "Sunny", "icon": "//cdn/113.png"}},
                    "astro": {"sunrise": "05:46 AM", "sunset": "09:51 PM"}
                }
            ]}
        }))
        .expect("valid payload");

        let days = payload.into_days().expect("day list present");
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date.to_string(), "2024-06-03");
        assert_eq!(days[0].sunrise, "05:47 AM");
        assert_eq!(days[1].condition.text, "Sunny");
        assert_eq!(days[0].total_precip_mm, 1.2);
    }

    #[test]
    fn forecast_payload_without_day_list_is_unavailable() {
        let missing_forecast: ForecastPayload =
            serde_json::from_value(json!({"location": {"name": "X", "country": "Y"}}))
                .expect("valid payload");
        let missing_days: ForecastPayload =
            serde_json::from_value(json!({"forecast": {}})).expect("valid payload");

        assert!(missing_forecast.into_days().is_none());
        assert!(missing_days.into_days().is_none());
    }
}
