//! In-memory land-cover model: layers, biomes and billboards.
//!
//! These types are built once from configuration and are immutable while
//! shaders are generated from them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::library::ResourceLibrary;

/// A textured vegetation quad.
#[derive(Clone, Debug)]
pub struct Billboard {
    /// Where the image was loaded from.
    pub url: String,
    /// Decoded RGBA image.
    pub image: Arc<image::RgbaImage>,
    /// World-space width.
    pub width: f32,
    /// World-space height.
    pub height: f32,
}

impl Billboard {
    /// Creates a billboard descriptor.
    pub fn new(
        url: impl Into<String>,
        image: Arc<image::RgbaImage>,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            url: url.into(),
            image,
            width,
            height,
        }
    }
}

/// A group of classification classes sharing a set of billboards.
#[derive(Clone, Debug, Default)]
pub struct LandCoverBiome {
    /// Membership classes. Empty means "matches anything" for the per-biome
    /// coverage predicate.
    pub classes: Vec<String>,
    /// Billboards in placement order.
    pub billboards: Vec<Billboard>,
}

impl LandCoverBiome {
    /// Creates a biome from class names and billboards.
    pub fn new(
        classes: impl IntoIterator<Item = impl Into<String>>,
        billboards: Vec<Billboard>,
    ) -> Self {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
            billboards,
        }
    }

    /// Creates a biome whose classes are given as one space-separated string.
    ///
    /// See [`tokenize_classes`].
    pub fn from_class_string(classes: &str, billboards: Vec<Billboard>) -> Self {
        Self {
            classes: tokenize_classes(classes),
            billboards,
        }
    }
}

/// Rendering parameters shared by every biome in a layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerParams {
    /// Terrain level of detail at which vegetation is generated.
    pub lod: u32,
    /// Distance beyond which vegetation is not drawn.
    pub max_distance: f32,
    /// Billboard instances per unit area.
    pub density: f32,
    /// Fraction of candidate instances that are kept, in `[0.0, 1.0]`.
    pub fill: f32,
    /// Wind strength.
    pub wind: f32,
    /// Brightness multiplier.
    pub brightness: f32,
    /// Contrast adjustment.
    pub contrast: f32,
}

impl Default for LayerParams {
    fn default() -> Self {
        Self {
            lod: 14,
            max_distance: 1000.0,
            density: 1.0,
            fill: 1.0,
            wind: 0.0,
            brightness: 1.0,
            contrast: 0.0,
        }
    }
}

impl LayerParams {
    /// Resets a non-finite or negative `density` and a `fill` outside
    /// `[0.0, 1.0]` to their defaults.
    ///
    /// Returns the name, rejected value and replacement of each reset field.
    pub fn sanitize(&mut self) -> Vec<(&'static str, f32, f32)> {
        let defaults = Self::default();
        let mut reset = Vec::new();
        if !(self.density.is_finite() && self.density >= 0.0) {
            reset.push(("density", self.density, defaults.density));
            self.density = defaults.density;
        }
        if !(self.fill.is_finite() && (0.0..=1.0).contains(&self.fill)) {
            reset.push(("fill", self.fill, defaults.fill));
            self.fill = defaults.fill;
        }
        reset
    }
}

/// An ordered set of biomes plus their shared rendering parameters.
///
/// Biome and billboard indices in generated tables are positional, so the
/// order of `biomes` (and of each biome's billboards) is significant.
#[derive(Clone, Debug, Default)]
pub struct LandCoverLayer {
    /// Layer name, used to name generated shaders.
    pub name: String,
    /// Layer-wide parameters.
    pub params: LayerParams,
    /// Biomes in index order.
    pub biomes: Vec<LandCoverBiome>,
    /// Resource library the billboards were resolved against, shared with
    /// the other layers of the same land cover.
    pub library: Option<Arc<ResourceLibrary>>,
}

impl LandCoverLayer {
    /// Creates a layer with default parameters.
    pub fn new(name: impl Into<String>, biomes: Vec<LandCoverBiome>) -> Self {
        Self {
            name: name.into(),
            params: LayerParams::default(),
            biomes,
            library: None,
        }
    }

    /// Total number of billboards across all biomes.
    pub fn total_billboards(&self) -> usize {
        self.biomes.iter().map(|b| b.billboards.len()).sum()
    }
}

/// Splits a class list on spaces. Double quotes group a name containing
/// spaces and are not part of the name; empty names are dropped.
///
/// `forest "mixed wood" grass` yields `["forest", "mixed wood", "grass"]`.
pub fn tokenize_classes(classes: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in classes.chars() {
        match c {
            '"' => quoted = !quoted,
            ' ' if !quoted => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}
