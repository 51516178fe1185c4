//! Number formatting for display.
//!
//! All monetary output is USD-styled (`$` prefix, `,` thousands separator)
//! the way the dashboard has always rendered it.

/// Insert `,` every three digits in the integer part of an already formatted number.
fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Price in dollars: 6 decimals below $1, otherwise 2.
pub fn format_currency(value: f64) -> String {
    let decimals = if value.abs() < 1.0 { 6 } else { 2 };
    let formatted = group_thousands(&format!("{:.*}", decimals, value.abs()));
    if value < 0.0 {
        format!("-${formatted}")
    } else {
        format!("${formatted}")
    }
}

fn with_suffix(value: f64) -> Option<String> {
    const SCALES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];
    SCALES
        .iter()
        .find(|(scale, _)| value >= *scale)
        .map(|(scale, suffix)| format!("{:.2}{suffix}", value / scale))
}

/// Market cap / volume: `$1.23T`, `$4.56B`, `$7.89M`, `$1.23K`, `$12.34`.
pub fn format_large_number(value: f64) -> String {
    match with_suffix(value) {
        Some(s) => format!("${s}"),
        None => format!("${value:.2}"),
    }
}

/// Supply figures: same suffixes without `$`; small values grouped, no forced decimals.
pub fn format_supply(value: f64) -> String {
    match with_suffix(value) {
        Some(s) => s,
        None => {
            let rounded = format!("{value:.3}");
            let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
            group_thousands(trimmed)
        }
    }
}

/// Optional supply: `None` renders as `placeholder` (e.g. "∞" for max supply).
pub fn format_optional_supply(value: Option<f64>, placeholder: &str) -> String {
    match value {
        Some(v) => format_supply(v),
        None => placeholder.to_string(),
    }
}

/// 24h change with an explicit sign: `+2.50%`, `-1.25%`, `0.00%`.
pub fn format_percent(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.2}%")
    } else {
        format!("{value:.2}%")
    }
}

/// First three sentences of a description, HTML tags removed.
pub fn summarize_description(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => plain.push(ch),
            _ => {}
        }
    }

    let plain = plain.trim();
    if plain.is_empty() {
        return String::new();
    }

    let sentences: Vec<&str> = plain.split('.').take(3).collect();
    let joined = sentences.join(".");
    let joined = joined.trim_end();
    if joined.ends_with('.') {
        joined.to_string()
    } else {
        format!("{joined}.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_thousands_handles_sign_and_fraction() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567.89"), "1,234,567.89");
        assert_eq!(group_thousands("-1234.5"), "-1,234.5");
    }
}
