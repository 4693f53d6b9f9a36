//! Non-fatal diagnostics raised while configuring land cover or generating shaders.
//!
//! Every diagnostic is logged the moment it is recorded and is also kept in a
//! [`Diagnostics`] list so callers (and tests) can inspect what was skipped.

use std::fmt;

use crate::binding::FallbackReason;

/// A configuration-shape warning or degraded-mode notice.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// A biome references a class name the legend does not define.
    UnknownClass {
        /// The class name as written in the biome.
        class: String,
    },
    /// A legend predicate for `class` has no exact, min or max value.
    UnboundedPredicate {
        /// Class the predicate belongs to.
        class: String,
    },
    /// A biome symbol is not a billboard.
    UnrecognizedSymbol {
        /// Kind of the symbol (e.g. `"model"`).
        kind: &'static str,
    },
    /// A billboard symbol names neither a URL nor a known library resource.
    UnresolvedBillboard {
        /// The resource name, if one was given.
        resource: Option<String>,
    },
    /// The billboard image could not be loaded.
    BillboardLoadFailed {
        /// Location the image was loaded from.
        url: String,
        /// Loader error message.
        reason: String,
    },
    /// The billboard has a non-positive or non-finite width or height.
    InvalidBillboardSize {
        /// Location of the billboard image.
        url: String,
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },
    /// A layer's density or fill is out of range and was reset to its default.
    InvalidLayerParam {
        /// Layer the parameter belongs to.
        layer: String,
        /// Parameter name as written in the manifest.
        param: &'static str,
        /// Rejected value.
        value: f32,
        /// Value used instead.
        default: f32,
    },
    /// No usable coverage binding; a default function was generated.
    Fallback(FallbackReason),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownClass { class } => {
                write!(f, "class \"{class}\" not found in the legend")
            }
            Self::UnboundedPredicate { class } => write!(
                f,
                "class \"{class}\" found, but no exact/min/max value was set in the legend"
            ),
            Self::UnrecognizedSymbol { kind } => {
                write!(f, "unrecognized {kind} symbol in land cover biome")
            }
            Self::UnresolvedBillboard { resource: Some(name) } => {
                write!(f, "billboard resource \"{name}\" not found in the library")
            }
            Self::UnresolvedBillboard { resource: None } => {
                write!(f, "billboard symbol has neither a url nor a resource")
            }
            Self::BillboardLoadFailed { url, reason } => {
                write!(f, "failed to load billboard image from \"{url}\": {reason}")
            }
            Self::InvalidBillboardSize { url, width, height } => write!(
                f,
                "billboard \"{url}\" has invalid size {width} x {height}"
            ),
            Self::InvalidLayerParam {
                layer,
                param,
                value,
                default,
            } => write!(
                f,
                "layer \"{layer}\" has invalid {param} {value}; using {default}"
            ),
            Self::Fallback(reason) => {
                write!(f, "{reason}; generating default coverage predicate")
            }
        }
    }
}

impl Diagnostic {
    /// Whether this diagnostic describes bad configuration (as opposed to a
    /// missing binding, which is an expected runtime state).
    pub fn is_warning(&self) -> bool {
        !matches!(self, Self::Fallback(_))
    }
}

/// Ordered collection of diagnostics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs `diagnostic` and appends it.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_warning() {
            log::warn!("{diagnostic}");
        } else {
            log::info!("{diagnostic}");
        }
        self.entries.push(diagnostic);
    }

    /// Appends all entries of `other` without logging them again.
    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    /// Recorded diagnostics, in the order they were raised.
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over recorded diagnostics.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut diags = Diagnostics::new();
        diags.push(Diagnostic::UnknownClass {
            class: "water".into(),
        });
        diags.push(Diagnostic::UnrecognizedSymbol { kind: "model" });
        assert_eq!(diags.len(), 2);
        assert!(matches!(
            diags.as_slice()[0],
            Diagnostic::UnknownClass { .. }
        ));
        assert!(matches!(
            diags.as_slice()[1],
            Diagnostic::UnrecognizedSymbol { kind: "model" }
        ));
    }

    #[test]
    fn test_fallback_is_not_a_warning() {
        assert!(!Diagnostic::Fallback(FallbackReason::NoCoverage).is_warning());
        assert!(
            Diagnostic::UnboundedPredicate {
                class: "forest".into()
            }
            .is_warning()
        );
    }

    #[test]
    fn test_display_names_the_class() {
        let msg = Diagnostic::UnknownClass {
            class: "water".into(),
        }
        .to_string();
        assert!(msg.contains("\"water\""));
        assert!(msg.contains("legend"));
    }
}
