use chrono::NaiveDate;
use std::fmt;

/// Free-text place name driving a fetch cycle.
///
/// Kept exactly as entered: no trimming, no case folding, no URL-encoding.
/// An empty query means "no location yet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LocationQuery(String);

impl LocationQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self(query.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for LocationQuery {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LocationQuery {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub text: String,
    /// Icon reference as returned by the provider (usually a protocol-relative URL).
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub location_name: String,
    pub country: String,
    pub condition: Condition,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub uv_index: f64,
}

impl CurrentConditions {
    pub fn title(&self) -> String {
        format!("Weather in {}, {}", self.location_name, self.country)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub condition: Condition,
    pub total_precip_mm: f64,
    pub sunrise: String,
    pub sunset: String,
}

impl ForecastDay {
    /// English weekday name of the forecast date, e.g. "Monday".
    pub fn weekday_name(&self) -> String {
        self.date.format("%A").to_string()
    }
}

/// Forecast days in the order the provider returned them. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSet {
    days: Vec<ForecastDay>,
}

impl ForecastSet {
    /// Returns `None` for an empty day list.
    pub fn new(days: Vec<ForecastDay>) -> Option<Self> {
        if days.is_empty() { None } else { Some(Self { days }) }
    }

    pub fn days(&self) -> &[ForecastDay] {
        &self.days
    }

    pub fn first(&self) -> &ForecastDay {
        // Non-empty by construction.
        &self.days[0]
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Sum of the daily precipitation totals, starting from 0.
    pub fn rainfall_total_mm(&self) -> f64 {
        self.days.iter().fold(0.0, |total, day| total + day.total_precip_mm)
    }
}

/// Everything a loaded page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    current: CurrentConditions,
    forecast: ForecastSet,
    rainfall_total_mm: f64,
}

impl WeatherReport {
    pub fn new(current: CurrentConditions, forecast: ForecastSet) -> Self {
        let rainfall_total_mm = forecast.rainfall_total_mm();
        Self { current, forecast, rainfall_total_mm }
    }

    pub fn current(&self) -> &CurrentConditions {
        &self.current
    }

    pub fn forecast(&self) -> &ForecastSet {
        &self.forecast
    }

    /// Rainfall summed over the forecast window when the report was built.
    pub fn rainfall_total_mm(&self) -> f64 {
        self.rainfall_total_mm
    }
}
