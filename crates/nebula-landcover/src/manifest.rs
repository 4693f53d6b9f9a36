//! RON manifest describing a land cover: library, legend, coverage binding and layers.
//!
//! ```ron
//! LandCoverManifest(
//!     library: Some((
//!         name: "default",
//!         resources: [(name: "pine", url: "trees/pine.png", width: 3.0, height: 9.0)],
//!     )),
//!     legend: Some([
//!         (class: "forest", min_value: Some(41.0), max_value: Some(43.0)),
//!     ]),
//!     coverage: Some((sampler: "lc_tex", matrix: "lc_tex_matrix")),
//!     layers: [(
//!         name: "trees",
//!         params: (density: 0.8, fill: 0.5),
//!         biomes: [(
//!             classes: "forest",
//!             symbols: [Billboard((resource: Some("pine")))],
//!         )],
//!     )],
//! )
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::binding::{CoverageBinding, StaticCoverage};
use crate::error::LandCoverError;
use crate::legend::{Legend, LegendEntry};
use crate::library::LibraryConfig;
use crate::model::LayerParams;
use crate::symbol::Symbol;

/// Top-level RON manifest.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandCoverManifest {
    /// Shared billboard resources.
    pub library: Option<LibraryConfig>,
    /// Classification legend rows. `None` means the coverage has no legend.
    pub legend: Option<Vec<LegendEntry>>,
    /// Classification texture uniforms.
    pub coverage: Option<CoverageBinding>,
    /// Land cover layers in order.
    pub layers: Vec<LayerEntry>,
}

/// A layer as written in the manifest.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerEntry {
    /// Layer name.
    pub name: String,
    /// Layer-wide parameters.
    pub params: LayerParams,
    /// Biomes in index order.
    pub biomes: Vec<BiomeEntry>,
}

/// A biome as written in the manifest.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeEntry {
    /// Space-separated class names; double quotes group names with spaces.
    pub classes: String,
    /// Symbols; only billboards are used.
    pub symbols: Vec<Symbol>,
}

impl LandCoverManifest {
    /// Reads a manifest from a RON file.
    ///
    /// # Errors
    ///
    /// Returns [`LandCoverError`] on I/O or parse failures.
    pub fn from_ron(path: &Path) -> Result<Self, LandCoverError> {
        let contents = std::fs::read_to_string(path)?;
        let manifest = Self::from_ron_str(&contents)?;
        log::info!("Loaded land cover manifest from {}", path.display());
        Ok(manifest)
    }

    /// Parses a manifest from a RON string.
    ///
    /// # Errors
    ///
    /// Returns [`LandCoverError::Parse`] on malformed input.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, LandCoverError> {
        Ok(ron::from_str(ron_str)?)
    }

    /// Builds the legend, if the manifest defines one.
    pub fn build_legend(&self) -> Option<Legend> {
        self.legend.as_ref().map(Legend::from_entries)
    }

    /// Coverage source made from the manifest's legend and binding.
    pub fn coverage(&self) -> StaticCoverage {
        StaticCoverage {
            legend: self.build_legend().map(Arc::new),
            binding: self.coverage.clone(),
        }
    }
}
