//! Stat values.

/// A numeric stat as supplied by content.
///
/// Character sheets store some stats as a plain number and others as a
/// base/current pair (e.g. a drained STA). The engine only ever reads the
/// effective value through [`StatValue::value`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatValue {
    Scalar(f64),
    BaseCurrent { base: f64, current: f64 },
}

impl StatValue {
    /// Effective value used in formulas.
    pub fn value(&self) -> f64 {
        match self {
            Self::Scalar(value) => *value,
            Self::BaseCurrent { current, .. } => *current,
        }
    }

    /// Unmodified value.
    pub fn base(&self) -> f64 {
        match self {
            Self::Scalar(value) => *value,
            Self::BaseCurrent { base, .. } => *base,
        }
    }
}

impl Default for StatValue {
    fn default() -> Self {
        Self::Scalar(0.0)
    }
}

impl From<f64> for StatValue {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}
