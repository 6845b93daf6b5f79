//! Parameter schema and assignment model
//!
//! A [`Parameter`] is a single bounded decision variable. A [`ParamSet`] is an
//! ordered, fully owned assignment of every registered parameter; cloning a
//! set yields independent mutable state, so no two bees ever alias the same
//! parameter instance.

use std::collections::BTreeMap;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A parameter value, either integer or real kind
///
/// Both bounds of a parameter share one kind, and the kind is preserved
/// through mutation: integer parameters are rounded to the nearest integer
/// after arithmetic, never truncated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    /// Integer-kind value
    Int(i64),
    /// Real-kind value
    Float(f64),
}

impl ParamValue {
    /// View the value as f64 for arithmetic
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Int(v) => *v as f64,
            Self::Float(v) => *v,
        }
    }

    /// Whether this is an integer-kind value
    pub fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    /// Whether two values share the same kind
    pub fn same_kind(&self, other: &Self) -> bool {
        self.is_int() == other.is_int()
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
        }
    }
}

/// A single bounded, typed decision variable
///
/// Plain value type with no shared ownership. The colony keeps one prototype
/// per registered parameter and clones it into every bee.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    name: String,
    min: ParamValue,
    max: ParamValue,
    value: ParamValue,
    restrict: bool,
}

impl Parameter {
    /// Create a new parameter prototype
    ///
    /// Bounds must share a kind and satisfy `min <= max`; a degenerate
    /// `min == max` range is legal and always yields that single value.
    /// The initial value is the lower bound until
    /// [`generate_random_value`](Self::generate_random_value) is called.
    pub fn new(
        name: impl Into<String>,
        min: ParamValue,
        max: ParamValue,
        restrict: bool,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if !min.same_kind(&max) {
            return Err(ConfigError::BoundsKindMismatch(name));
        }
        if min.as_f64() > max.as_f64() {
            return Err(ConfigError::InvalidBounds {
                name,
                min: min.as_f64(),
                max: max.as_f64(),
            });
        }
        Ok(Self {
            name,
            min,
            max,
            value: min,
            restrict,
        })
    }

    /// Name of this parameter
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lower bound (inclusive)
    pub fn min(&self) -> ParamValue {
        self.min
    }

    /// Upper bound (inclusive)
    pub fn max(&self) -> ParamValue {
        self.max
    }

    /// Current value
    pub fn value(&self) -> ParamValue {
        self.value
    }

    /// Whether mutated or generated values are clamped into bounds
    pub fn restrict(&self) -> bool {
        self.restrict
    }

    /// Set the current value
    pub fn set_value(&mut self, value: ParamValue) {
        self.value = value;
    }

    /// Draw a value uniformly from `[min, max]` and assign it
    ///
    /// Integer-kind bounds draw a uniformly random integer in the inclusive
    /// range; real-kind bounds draw a uniformly random real.
    pub fn generate_random_value<R: Rng>(&mut self, rng: &mut R) {
        self.value = match (self.min, self.max) {
            (ParamValue::Int(lo), ParamValue::Int(hi)) => ParamValue::Int(rng.gen_range(lo..=hi)),
            (ParamValue::Float(lo), ParamValue::Float(hi)) => {
                ParamValue::Float(rng.gen_range(lo..=hi))
            }
            // Mixed kinds are rejected at construction.
            _ => self.min,
        };
    }

    /// Compute `value + phi * (value - other)` without mutating `self`
    ///
    /// When `restrict` is enabled the result is clamped into `[min, max]`.
    /// Integer-kind parameters round the result to the nearest integer after
    /// the arithmetic.
    pub fn mutate_toward(&self, other: f64, phi: f64) -> ParamValue {
        let current = self.value.as_f64();
        let mut next = current + phi * (current - other);
        if self.restrict {
            next = next.clamp(self.min.as_f64(), self.max.as_f64());
        }
        if self.value.is_int() {
            ParamValue::Int(next.round() as i64)
        } else {
            ParamValue::Float(next)
        }
    }
}

/// An ordered mapping of parameter name to owned [`Parameter`]
///
/// Iteration order is the lexicographic order of parameter names, so repeated
/// traversals are deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamSet {
    params: BTreeMap<String, Parameter>,
}

impl ParamSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, keyed by its name
    pub fn insert(&mut self, parameter: Parameter) {
        self.params.insert(parameter.name().to_owned(), parameter);
    }

    /// Get a parameter by name
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.params.get(name)
    }

    /// Get a mutable reference to a parameter by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.params.get_mut(name)
    }

    /// Number of parameters in the set
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate over the parameters in name order
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.values()
    }

    /// Iterate over the parameter names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    /// Extract the raw values, name to value
    pub fn values(&self) -> BTreeMap<String, ParamValue> {
        self.params
            .iter()
            .map(|(name, param)| (name.clone(), param.value()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parameter_new() {
        let p = Parameter::new("x", ParamValue::Int(0), ParamValue::Int(10), true).unwrap();
        assert_eq!(p.name(), "x");
        assert_eq!(p.min(), ParamValue::Int(0));
        assert_eq!(p.max(), ParamValue::Int(10));
        assert_eq!(p.value(), ParamValue::Int(0));
        assert!(p.restrict());
    }

    #[test]
    fn test_parameter_degenerate_bounds_allowed() {
        let p = Parameter::new("x", ParamValue::Int(5), ParamValue::Int(5), true);
        assert!(p.is_ok());
    }

    #[test]
    fn test_parameter_inverted_bounds_rejected() {
        let err = Parameter::new("x", ParamValue::Float(1.0), ParamValue::Float(-1.0), true)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBounds { .. }));
    }

    #[test]
    fn test_parameter_mixed_kind_rejected() {
        let err =
            Parameter::new("x", ParamValue::Int(0), ParamValue::Float(1.0), true).unwrap_err();
        assert!(matches!(err, ConfigError::BoundsKindMismatch(_)));
    }

    #[test]
    fn test_generate_random_value_int_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut p = Parameter::new("x", ParamValue::Int(-3), ParamValue::Int(3), true).unwrap();
        for _ in 0..1000 {
            p.generate_random_value(&mut rng);
            match p.value() {
                ParamValue::Int(v) => assert!((-3..=3).contains(&v)),
                ParamValue::Float(_) => panic!("integer bounds must draw integers"),
            }
        }
    }

    #[test]
    fn test_generate_random_value_float_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut p =
            Parameter::new("x", ParamValue::Float(-1.5), ParamValue::Float(2.5), true).unwrap();
        for _ in 0..1000 {
            p.generate_random_value(&mut rng);
            let v = p.value().as_f64();
            assert!((-1.5..=2.5).contains(&v));
        }
    }

    #[test]
    fn test_generate_random_value_covers_endpoints() {
        // Across many draws, values near both endpoints must appear; a
        // midpoint-biased generator would fail this.
        let mut rng = StdRng::seed_from_u64(11);
        let mut p = Parameter::new("x", ParamValue::Int(0), ParamValue::Int(10), true).unwrap();
        let mut low_hits = 0usize;
        let mut high_hits = 0usize;
        for _ in 0..10_000 {
            p.generate_random_value(&mut rng);
            match p.value() {
                ParamValue::Int(0) => low_hits += 1,
                ParamValue::Int(10) => high_hits += 1,
                _ => {}
            }
        }
        assert!(low_hits > 0, "lower endpoint never drawn");
        assert!(high_hits > 0, "upper endpoint never drawn");
    }

    #[test]
    fn test_generate_random_value_degenerate() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = Parameter::new("x", ParamValue::Int(5), ParamValue::Int(5), true).unwrap();
        for _ in 0..100 {
            p.generate_random_value(&mut rng);
            assert_eq!(p.value(), ParamValue::Int(5));
        }
    }

    #[test]
    fn test_mutate_toward_clamps_when_restricted() {
        let mut p = Parameter::new("x", ParamValue::Float(0.0), ParamValue::Float(1.0), true)
            .unwrap();
        p.set_value(ParamValue::Float(1.0));
        // value + phi * (value - other) = 1.0 + 1.0 * (1.0 - (-10.0)) = 12.0, clamped
        assert_eq!(p.mutate_toward(-10.0, 1.0), ParamValue::Float(1.0));
    }

    #[test]
    fn test_mutate_toward_unrestricted_exceeds_bounds() {
        let mut p = Parameter::new("x", ParamValue::Float(0.0), ParamValue::Float(1.0), false)
            .unwrap();
        p.set_value(ParamValue::Float(1.0));
        assert_eq!(p.mutate_toward(-10.0, 1.0), ParamValue::Float(12.0));
    }

    #[test]
    fn test_mutate_toward_rounds_integer_kind() {
        let mut p = Parameter::new("x", ParamValue::Int(0), ParamValue::Int(10), true).unwrap();
        p.set_value(ParamValue::Int(4));
        // 4 + 0.6 * (4 - 3) = 4.6 -> rounds to 5, not truncates to 4
        assert_eq!(p.mutate_toward(3.0, 0.6), ParamValue::Int(5));
    }

    #[test]
    fn test_mutate_toward_does_not_touch_self() {
        let mut p = Parameter::new("x", ParamValue::Float(0.0), ParamValue::Float(10.0), true)
            .unwrap();
        p.set_value(ParamValue::Float(5.0));
        let _ = p.mutate_toward(2.0, 0.5);
        assert_eq!(p.value(), ParamValue::Float(5.0));
    }

    #[test]
    fn test_param_set_ordering_deterministic() {
        let mut set = ParamSet::new();
        set.insert(Parameter::new("zeta", ParamValue::Int(0), ParamValue::Int(1), true).unwrap());
        set.insert(Parameter::new("alpha", ParamValue::Int(0), ParamValue::Int(1), true).unwrap());
        let names: Vec<&str> = set.names().collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_param_set_clone_is_independent() {
        let mut set = ParamSet::new();
        set.insert(Parameter::new("x", ParamValue::Int(0), ParamValue::Int(10), true).unwrap());
        let mut cloned = set.clone();
        cloned
            .get_mut("x")
            .unwrap()
            .set_value(ParamValue::Int(7));
        assert_eq!(set.get("x").unwrap().value(), ParamValue::Int(0));
        assert_eq!(cloned.get("x").unwrap().value(), ParamValue::Int(7));
    }

    #[test]
    fn test_param_set_values() {
        let mut set = ParamSet::new();
        let mut p = Parameter::new("x", ParamValue::Int(0), ParamValue::Int(10), true).unwrap();
        p.set_value(ParamValue::Int(4));
        set.insert(p);
        let values = set.values();
        assert_eq!(values.get("x"), Some(&ParamValue::Int(4)));
    }
}
