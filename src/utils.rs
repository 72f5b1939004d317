/// Formats a number with dot thousands separators, es-CL style.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Renders the API's RFC 3339 update timestamp as a short local-style date.
/// Anything unparseable is shown as received.
pub fn format_update_timestamp(raw: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%d-%m-%Y %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Percentage change between two periods, with an explicit sign for growth.
pub fn variation(actual: f64, anterior: f64) -> String {
    if anterior == 0.0 {
        return "0.0%".to_string();
    }
    let pct = (actual - anterior) / anterior * 100.0;
    if pct > 0.0 {
        format!("+{:.1}%", pct)
    } else {
        format!("{:.1}%", pct)
    }
}
