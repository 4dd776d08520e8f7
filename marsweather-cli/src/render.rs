use marsweather_core::{ArchivePage, LatestReport, Report};

fn measurement(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v}{unit}"),
        None => "n/a".to_string(),
    }
}

fn text(value: &str) -> &str {
    if value.is_empty() { "n/a" } else { value }
}

pub fn report(r: &Report) -> String {
    let lines = [
        format!("Terrestrial date:    {}", text(&r.terrestrial_date)),
        format!("Sol:                 {}", measurement(r.sol, "")),
        format!("Seasonal date (Ls):  {}", measurement(r.ls, "")),
        format!("Season:              {}", text(&r.season)),
        format!(
            "Min temp:            {} / {}",
            measurement(r.min_temp, " °C"),
            measurement(r.min_temp_fahrenheit, " °F")
        ),
        format!(
            "Max temp:            {} / {}",
            measurement(r.max_temp, " °C"),
            measurement(r.max_temp_fahrenheit, " °F")
        ),
        format!(
            "Pressure:            {} ({})",
            measurement(r.pressure, " Pa"),
            text(&r.pressure_string)
        ),
        format!("Absolute humidity:   {}", measurement(r.abs_humidity, "")),
        format!(
            "Wind:                {} from {}",
            measurement(r.wind_speed, " m/s"),
            r.wind_direction_known().unwrap_or("unknown")
        ),
        format!("Atmospheric opacity: {}", text(&r.atmospheric_opacity)),
        format!("Sunrise / sunset:    {} / {}", text(&r.sunrise), text(&r.sunset)),
    ];

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn latest(latest: &LatestReport) -> String {
    format!("Latest:\n{}", report(&latest.report))
}

pub fn archive(title: &str, page: &ArchivePage) -> String {
    let mut out = format!(
        "{title}\nCount:    {}\nNext:     {}\nPrevious: {}\nResults:  {}\n",
        page.count,
        page.next.as_deref().unwrap_or("none"),
        page.previous.as_deref().unwrap_or("none"),
        page.results.len(),
    );

    for r in &page.results {
        out.push('\n');
        out.push_str(&report(r));
    }

    out
}
