//! Records produced by metric extraction and consumed by the reporters.

use std::cmp::Ordering;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

// ---------------------------------------------------------------------------
// Experiment key
// ---------------------------------------------------------------------------

/// Identifies one row of a comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExperimentKey {
    /// A named experiment directory (comparison mode).
    Name(String),
    /// An inference-step count (ablation mode).
    Steps(u32),
}

impl ExperimentKey {
    /// Header of the identifying column in the comparison table.
    pub fn column_name(&self) -> &'static str {
        match self {
            ExperimentKey::Name(_) => "experiment",
            ExperimentKey::Steps(_) => "inference_steps",
        }
    }

    pub fn as_value(&self) -> MetricValue {
        match self {
            ExperimentKey::Name(name) => MetricValue::Text(name.clone()),
            ExperimentKey::Steps(steps) => MetricValue::Int(i64::from(*steps)),
        }
    }
}

impl fmt::Display for ExperimentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperimentKey::Name(name) => f.write_str(name),
            ExperimentKey::Steps(steps) => write!(f, "{steps}"),
        }
    }
}

impl PartialOrd for ExperimentKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExperimentKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ExperimentKey::Steps(a), ExperimentKey::Steps(b)) => a.cmp(b),
            (ExperimentKey::Name(a), ExperimentKey::Name(b)) => a.cmp(b),
            (ExperimentKey::Steps(_), ExperimentKey::Name(_)) => Ordering::Less,
            (ExperimentKey::Name(_), ExperimentKey::Steps(_)) => Ordering::Greater,
        }
    }
}

// ---------------------------------------------------------------------------
// Metric values
// ---------------------------------------------------------------------------

/// A single cell of a metric record.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl MetricValue {
    /// Numeric view of the value, used by the plotter.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Int(v) => Some(*v as f64),
            MetricValue::Float(v) => Some(*v),
            MetricValue::Text(_) => None,
        }
    }

    /// Deterministic CSV rendering: shortest round-trip floats, integral
    /// floats keep a trailing `.0`.
    pub fn to_csv_field(&self) -> String {
        match self {
            MetricValue::Int(v) => v.to_string(),
            MetricValue::Float(v) => format_float(*v),
            MetricValue::Text(s) => s.clone(),
        }
    }

    /// Fixed-precision rendering for console tables.
    pub fn to_display(&self) -> String {
        match self {
            MetricValue::Int(v) => v.to_string(),
            MetricValue::Float(v) if v.is_finite() => format!("{v:.6}"),
            MetricValue::Float(v) => v.to_string(),
            MetricValue::Text(s) => s.clone(),
        }
    }
}

fn format_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        v.to_string()
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            MetricValue::Int(v) => serializer.serialize_i64(*v),
            MetricValue::Float(v) => serializer.serialize_f64(*v),
            MetricValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Float(v)
    }
}

impl From<usize> for MetricValue {
    fn from(v: usize) -> Self {
        MetricValue::Int(v as i64)
    }
}

impl From<String> for MetricValue {
    fn from(v: String) -> Self {
        MetricValue::Text(v)
    }
}

// ---------------------------------------------------------------------------
// Metric record
// ---------------------------------------------------------------------------

/// Metrics for one experiment, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub key: ExperimentKey,
    metrics: Vec<(String, MetricValue)>,
}

impl MetricRecord {
    pub fn new(key: ExperimentKey) -> Self {
        Self { key, metrics: Vec::new() }
    }

    /// Insert a metric. Re-inserting a name overwrites the value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<MetricValue>) {
        let name = name.into();
        let value = value.into();
        match self.metrics.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.metrics.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.metrics.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.metrics.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.metrics.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

/// Serialises as a flat object: the key column first, then every metric.
impl Serialize for MetricRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.metrics.len() + 1))?;
        map.serialize_entry(self.key.column_name(), &self.key.as_value())?;
        for (name, value) in &self.metrics {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
