//! KPI values shown inside a demo step.

use serde::{Deserialize, Serialize};

/// A metric value as authored in the catalog: either a plain number or a
/// formatted string with a number embedded somewhere inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    /// Numeric base the jitter is centered on.
    pub fn base(&self) -> f64 {
        match self {
            MetricValue::Number(n) => *n,
            MetricValue::Text(s) => parse_numeric_base(s),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, MetricValue::Number(_))
    }
}

impl From<f64> for MetricValue {
    fn from(n: f64) -> Self {
        MetricValue::Number(n)
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        MetricValue::Text(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: MetricValue,
    /// Display-only direction hint such as "+12%" or "-5 days".
    pub trend: String,
}

impl Metric {
    pub fn new(label: &str, value: impl Into<MetricValue>, trend: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
            trend: trend.to_string(),
        }
    }

    /// Text shown for this metric. Numeric metrics show the jittered value
    /// (or their base before the first tick) rounded to an integer; text
    /// metrics always show the authored string.
    pub fn display(&self, jittered: Option<f64>) -> String {
        match &self.value {
            MetricValue::Number(n) => format!("{}", jittered.unwrap_or(*n).round() as i64),
            MetricValue::Text(s) => s.clone(),
        }
    }

    pub fn tone(&self) -> TrendTone {
        TrendTone::classify(&self.trend)
    }
}

/// Extracts the number embedded in a formatted value.
///
/// Takes the first contiguous run of ASCII digits and `.` and parses its
/// longest valid decimal prefix, so `"₹2.4Cr"` is 2.4 and `"1.2.3"` is 1.2.
/// Returns 0.0 when there is no digit to parse.
pub fn parse_numeric_base(value: &str) -> f64 {
    let bytes = value.as_bytes();
    let Some(start) = bytes
        .iter()
        .position(|b| b.is_ascii_digit() || *b == b'.')
    else {
        return 0.0;
    };

    let mut end = start;
    let mut seen_dot = false;
    let mut seen_digit = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return 0.0;
    }
    // The slice is ASCII digits with at most one dot, which always parses
    // once a trailing dot is dropped.
    value[start..end]
        .trim_end_matches('.')
        .parse()
        .unwrap_or(0.0)
}

/// `base + (u - 0.5) * base * ratio` for `u` in `[0, 1)`.
///
/// Always computed from the base, so repeated ticks never drift.
pub fn jitter(base: f64, u: f64, ratio: f64) -> f64 {
    base + (u - 0.5) * base * ratio
}

/// Color class for a trend string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendTone {
    Positive,
    Negative,
    Neutral,
}

impl TrendTone {
    /// `+` is positive. `-` is negative, except when the trend is measured in
    /// days (DSO, cycle time), which counts as an improvement.
    pub fn classify(trend: &str) -> Self {
        if trend.contains('+') || (trend.contains('-') && trend.contains("days")) {
            TrendTone::Positive
        } else if trend.contains('-') {
            TrendTone::Negative
        } else {
            TrendTone::Neutral
        }
    }
}
