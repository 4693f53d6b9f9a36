//! Classification predicate compiler.
//!
//! Walks biomes, their classes and the legend's predicates to build the
//! intermediate programs behind `getBiomeIndexOf` (one per layer) and
//! `passesCoverage` (one per biome). Text is produced later by the emitter.

use crate::binding::{self, Coverage, CoverageBinding, FallbackReason};
use crate::diagnostic::{Diagnostic, Diagnostics};
use crate::legend::Legend;
use crate::model::{LandCoverBiome, LandCoverLayer};
use crate::predicate::Bound;

/// One `if (<bound>) return <result>;` statement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arm<T> {
    /// Check applied to the sampled value.
    pub bound: Bound,
    /// Value returned when the check passes.
    pub result: T,
}

/// Program for the per-layer biome index lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum BiomeIndexProgram {
    /// Always returns -1.
    Fallback(FallbackReason),
    /// Samples the classification texture and tests each arm in order,
    /// returning -1 once every biome has been tried.
    Lookup {
        /// Classification texture binding.
        binding: CoverageBinding,
        /// Arms in biome, class, predicate order.
        arms: Vec<Arm<usize>>,
    },
}

impl BiomeIndexProgram {
    /// Evaluates the program for `sample` the way the generated GLSL would.
    pub fn evaluate(&self, sample: f32) -> i32 {
        match self {
            Self::Fallback(_) => -1,
            Self::Lookup { arms, .. } => arms
                .iter()
                .find(|arm| arm.bound.matches(sample))
                .map_or(-1, |arm| arm.result as i32),
        }
    }
}

/// Program for one biome's coverage test.
#[derive(Clone, Debug, PartialEq)]
pub enum CoverageProgram {
    /// Always returns true.
    Fallback(FallbackReason),
    /// The biome has no classes and accepts every sample.
    AcceptAll {
        /// Classification texture binding.
        binding: CoverageBinding,
    },
    /// Returns true if any bound matches, false otherwise.
    Test {
        /// Classification texture binding.
        binding: CoverageBinding,
        /// Bounds in class, predicate order.
        bounds: Vec<Bound>,
    },
}

impl CoverageProgram {
    /// Evaluates the program for `sample` the way the generated GLSL would.
    pub fn evaluate(&self, sample: f32) -> bool {
        match self {
            Self::Fallback(_) | Self::AcceptAll { .. } => true,
            Self::Test { bounds, .. } => bounds.iter().any(|b| b.matches(sample)),
        }
    }
}

/// Collects the valid bounds of `classes`, in class then legend order.
///
/// Unknown classes and predicates without a bound are reported and skipped.
fn class_bounds(legend: &Legend, classes: &[String], diagnostics: &mut Diagnostics) -> Vec<Bound> {
    let mut bounds = Vec::new();
    for class in classes {
        let Some(entry) = legend.class(class) else {
            diagnostics.push(Diagnostic::UnknownClass {
                class: class.clone(),
            });
            continue;
        };
        for predicate in &entry.predicates {
            match predicate.bound() {
                Some(bound) => bounds.push(bound),
                None => diagnostics.push(Diagnostic::UnboundedPredicate {
                    class: class.clone(),
                }),
            }
        }
    }
    bounds
}

/// Builds the biome index program for `layer`.
///
/// A biome without classes contributes no arms, so it can never be returned
/// by this lookup.
pub fn compile_biome_index(
    layer: &LandCoverLayer,
    coverage: Option<&dyn Coverage>,
    diagnostics: &mut Diagnostics,
) -> BiomeIndexProgram {
    let resolved = match binding::resolve(coverage) {
        Ok(resolved) => resolved,
        Err(reason) => {
            diagnostics.push(Diagnostic::Fallback(reason));
            return BiomeIndexProgram::Fallback(reason);
        }
    };

    let mut arms = Vec::new();
    for (index, biome) in layer.biomes.iter().enumerate() {
        arms.extend(
            class_bounds(resolved.legend, &biome.classes, diagnostics)
                .into_iter()
                .map(|bound| Arm {
                    bound,
                    result: index,
                }),
        );
    }

    BiomeIndexProgram::Lookup {
        binding: resolved.binding,
        arms,
    }
}

/// Builds the coverage program for a single biome.
pub fn compile_coverage(
    biome: &LandCoverBiome,
    coverage: Option<&dyn Coverage>,
    diagnostics: &mut Diagnostics,
) -> CoverageProgram {
    let resolved = match binding::resolve(coverage) {
        Ok(resolved) => resolved,
        Err(reason) => {
            diagnostics.push(Diagnostic::Fallback(reason));
            return CoverageProgram::Fallback(reason);
        }
    };

    if biome.classes.is_empty() {
        return CoverageProgram::AcceptAll {
            binding: resolved.binding,
        };
    }

    CoverageProgram::Test {
        bounds: class_bounds(resolved.legend, &biome.classes, diagnostics),
        binding: resolved.binding,
    }
}
