//! Value predicates and their translation into GLSL boundary checks.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

/// A legend entry's numeric test against a sampled classification value.
///
/// Any combination of bounds may be configured; [`ValuePredicate::bound`]
/// resolves them into the single check that is emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuePredicate {
    /// Matches exactly this value. Takes precedence over min/max.
    pub exact_value: Option<f32>,
    /// Inclusive lower bound.
    pub min_value: Option<f32>,
    /// Inclusive upper bound.
    pub max_value: Option<f32>,
}

impl ValuePredicate {
    /// Predicate matching exactly `value`.
    pub fn exact(value: f32) -> Self {
        Self {
            exact_value: Some(value),
            ..Self::default()
        }
    }

    /// Predicate matching the closed interval `[min, max]`.
    pub fn range(min: f32, max: f32) -> Self {
        Self {
            min_value: Some(min),
            max_value: Some(max),
            ..Self::default()
        }
    }

    /// Predicate matching values `>= min`.
    pub fn at_least(min: f32) -> Self {
        Self {
            min_value: Some(min),
            ..Self::default()
        }
    }

    /// Predicate matching values `<= max`.
    pub fn at_most(max: f32) -> Self {
        Self {
            max_value: Some(max),
            ..Self::default()
        }
    }

    /// Resolves the configured values into a single bound.
    ///
    /// Non-finite values count as unset. Returns `None` when no usable bound
    /// remains; such a predicate must not be emitted.
    pub fn bound(&self) -> Option<Bound> {
        let finite = |v: Option<f32>| v.filter(|v| v.is_finite());
        let exact = finite(self.exact_value);
        let min = finite(self.min_value);
        let max = finite(self.max_value);

        match (exact, min, max) {
            (Some(v), _, _) => Some(Bound::Exact(v)),
            (None, Some(min), Some(max)) => Some(Bound::Range { min, max }),
            (None, Some(min), None) => Some(Bound::Min(min)),
            (None, None, Some(max)) => Some(Bound::Max(max)),
            (None, None, None) => None,
        }
    }
}

/// A resolved boundary check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bound {
    /// `sample == v`
    Exact(f32),
    /// `sample >= min && sample <= max`
    Range {
        /// Inclusive lower bound.
        min: f32,
        /// Inclusive upper bound.
        max: f32,
    },
    /// `sample >= min`
    Min(f32),
    /// `sample <= max`
    Max(f32),
}

impl Bound {
    /// Evaluates the check on the CPU, mirroring the generated GLSL.
    pub fn matches(&self, sample: f32) -> bool {
        match *self {
            Self::Exact(v) => sample == v,
            Self::Range { min, max } => sample >= min && sample <= max,
            Self::Min(min) => sample >= min,
            Self::Max(max) => sample <= max,
        }
    }

    /// Writes the boolean condition (without `if`) for `sample`.
    pub fn write_condition(&self, out: &mut String, sample: &str) {
        // Writing into a String cannot fail.
        let _ = match *self {
            Self::Exact(v) => write!(out, "{sample} == {}", glsl_float(v)),
            Self::Range { min, max } => write!(
                out,
                "{sample} >= {} && {sample} <= {}",
                glsl_float(min),
                glsl_float(max)
            ),
            Self::Min(min) => write!(out, "{sample} >= {}", glsl_float(min)),
            Self::Max(max) => write!(out, "{sample} <= {}", glsl_float(max)),
        };
    }
}

/// Translates a bound into `if (<condition>) <then>`.
pub fn translate(bound: &Bound, sample: &str, then: &str) -> String {
    let mut out = String::from("if (");
    bound.write_condition(&mut out, sample);
    out.push_str(") ");
    out.push_str(then);
    out
}

/// Translates a raw predicate, or returns `None` if it has no usable bound.
pub fn translate_predicate(predicate: &ValuePredicate, sample: &str, then: &str) -> Option<String> {
    predicate.bound().map(|b| translate(&b, sample, then))
}

/// Formats `v` as a GLSL float literal.
///
/// Uses the shortest decimal that round-trips and always includes a decimal
/// point, so integral values print as `5.0` rather than `5`.
pub fn glsl_float(v: f32) -> String {
    let mut s = v.to_string();
    if !s.contains('.') {
        s.push_str(".0");
    }
    s
}
