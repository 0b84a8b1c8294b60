use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9.]+").expect("valid regex"));

static FLOAT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(Infinity|([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?)")
        .expect("valid regex")
});

/// Parse the longest leading decimal number of `text`, ignoring leading
/// whitespace and anything after the number. Returns NaN if `text` does
/// not start with a number.
pub fn parse_float(text: &str) -> f64 {
    let Some(prefix) = FLOAT_PREFIX.find(text.trim_start()) else {
        return f64::NAN;
    };
    match prefix.as_str() {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        number => number.parse().unwrap_or(f64::NAN),
    }
}

/// Extract the number from a raw instrument reading such as
/// `"0.75 g/cm³"` or `"60.0%"`: the first run of digits and dots is parsed
/// leniently. NaN if there is no such run.
pub fn parse_measurement(raw: &str) -> f64 {
    NUMBER_RUN
        .find(raw)
        .map(|run| parse_float(run.as_str()))
        .unwrap_or(f64::NAN)
}

/// Two decimals, the format of every number shown in the calculation table.
/// Exact ties round away from zero, so 0.125 shows as "0.13".
pub fn format_value(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0.00".to_string();
    }
    // At two decimals only multiples of 1/8 with an odd numerator are exact
    // ties; every other value rounds the same either way.
    let eighths = value.abs() * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        let hundredths = (eighths * 12.5).ceil() as u128;
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{sign}{}.{:02}", hundredths / 100, hundredths % 100);
    }
    format!("{value:.2}")
}
