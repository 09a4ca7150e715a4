use cityweather_core::{ViewState, WeatherReport};

/// Text rendering of the weather page.
pub fn render(state: &ViewState) -> String {
    match state {
        ViewState::NoLocation => "Enter a location to see the weather".to_string(),
        ViewState::Loading => "Loading...".to_string(),
        ViewState::Error(message) => format!("Error: {message}"),
        ViewState::Loaded(report) => render_report(report),
    }
}

fn render_report(report: &WeatherReport) -> String {
    let current = report.current();
    let first = report.forecast().first();

    let mut lines = vec![
        current.title(),
        String::new(),
        current.condition.text.clone(),
        format!("Temperature: {}°C", number(current.temperature_c)),
        format!("Icon: {}", icon_url(&current.condition.icon)),
        String::new(),
        "Daily Weather Parameters".to_string(),
        format!("  Humidity: {}%", current.humidity_pct),
        format!("  UV Index: {}", number(current.uv_index)),
        format!("  Sunrise: {}", first.sunrise),
        format!("  Sunset: {}", first.sunset),
        String::new(),
        format!("Monthly Rainfall: {} mm", number(report.rainfall_total_mm())),
        String::new(),
        "Weekly Forecast".to_string(),
    ];

    for day in report.forecast().days() {
        lines.push(format!(
            "  {:<10} {}  {:<24} Max: {}°C  Min: {}°C  {}",
            day.weekday_name(),
            day.date,
            day.condition.text,
            number(day.max_temp_c),
            number(day.min_temp_c),
            icon_url(&day.condition.icon),
        ));
    }

    lines.join("\n")
}

/// At most two decimals, trailing zeros dropped.
fn number(value: f64) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn icon_url(icon: &str) -> String {
    if icon.starts_with("//") { format!("https:{icon}") } else { icon.to_string() }
}
