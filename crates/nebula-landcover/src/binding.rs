//! Coverage binding resolution.
//!
//! Full classification functions can only be generated when a coverage source
//! exposes both a legend and a lockable classification texture. Otherwise the
//! generator falls back to default functions with identical signatures.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::legend::Legend;

/// Uniform names used to sample the classification texture in GLSL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageBinding {
    /// `sampler2D` uniform holding classification values in its red channel.
    pub sampler: String,
    /// `mat4` uniform transforming vertex coordinates to texture coordinates.
    pub matrix: String,
}

impl CoverageBinding {
    /// Creates a binding from the sampler and matrix uniform names.
    pub fn new(sampler: impl Into<String>, matrix: impl Into<String>) -> Self {
        Self {
            sampler: sampler.into(),
            matrix: matrix.into(),
        }
    }
}

/// A source of land-cover classification data.
pub trait Coverage {
    /// The legend describing classification values, if any.
    fn legend(&self) -> Option<&Legend>;

    /// Locks the classification layer and returns its uniform binding, or
    /// `None` if no layer is available.
    fn lock_layer(&self) -> Option<CoverageBinding>;
}

/// A coverage source backed by fixed configuration.
#[derive(Clone, Debug, Default)]
pub struct StaticCoverage {
    /// Shared legend.
    pub legend: Option<Arc<Legend>>,
    /// Classification texture binding.
    pub binding: Option<CoverageBinding>,
}

impl StaticCoverage {
    /// Creates a coverage source with both a legend and a binding.
    pub fn new(legend: Arc<Legend>, binding: CoverageBinding) -> Self {
        Self {
            legend: Some(legend),
            binding: Some(binding),
        }
    }
}

impl Coverage for StaticCoverage {
    fn legend(&self) -> Option<&Legend> {
        self.legend.as_deref()
    }

    fn lock_layer(&self) -> Option<CoverageBinding> {
        self.binding.clone()
    }
}

/// Why a default coverage function was generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackReason {
    /// No coverage source was supplied.
    NoCoverage,
    /// The coverage source has no legend.
    NoLegend,
    /// The classification layer could not be locked.
    NoClassificationLayer,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoCoverage => "no coverage",
            Self::NoLegend => "no legend",
            Self::NoClassificationLayer => "no classification layer",
        })
    }
}

/// A coverage source whose legend and binding are both available.
#[derive(Clone, Debug)]
pub struct ResolvedCoverage<'a> {
    /// Legend used to look up class predicates.
    pub legend: &'a Legend,
    /// Locked classification binding.
    pub binding: CoverageBinding,
}

/// Checks coverage, legend and layer in that order.
pub fn resolve(coverage: Option<&dyn Coverage>) -> Result<ResolvedCoverage<'_>, FallbackReason> {
    let coverage = coverage.ok_or(FallbackReason::NoCoverage)?;
    let legend = coverage.legend().ok_or(FallbackReason::NoLegend)?;
    let binding = coverage
        .lock_layer()
        .ok_or(FallbackReason::NoClassificationLayer)?;
    Ok(ResolvedCoverage { legend, binding })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding() -> CoverageBinding {
        CoverageBinding::new("lc_tex", "lc_tex_matrix")
    }

    #[test]
    fn test_missing_coverage() {
        assert_eq!(resolve(None).unwrap_err(), FallbackReason::NoCoverage);
    }

    #[test]
    fn test_missing_legend_checked_before_layer() {
        let coverage = StaticCoverage::default();
        assert_eq!(
            resolve(Some(&coverage)).unwrap_err(),
            FallbackReason::NoLegend
        );
    }

    #[test]
    fn test_missing_layer() {
        let coverage = StaticCoverage {
            legend: Some(Arc::new(Legend::new())),
            binding: None,
        };
        assert_eq!(
            resolve(Some(&coverage)).unwrap_err(),
            FallbackReason::NoClassificationLayer
        );
    }

    #[test]
    fn test_resolves_full_binding() {
        let coverage = StaticCoverage::new(Arc::new(Legend::new()), binding());
        let resolved = resolve(Some(&coverage)).unwrap();
        assert_eq!(resolved.binding, binding());
        assert!(resolved.legend.is_empty());
    }
}
