//! Land cover configuration and shader generation entry points.

use std::sync::Arc;

use crate::binding::Coverage;
use crate::classify::{compile_biome_index, compile_coverage};
use crate::diagnostic::{Diagnostic, Diagnostics};
use crate::emit::{GeneratedShader, ShaderOptions, emit_biome_index, emit_coverage, emit_tables};
use crate::error::LandCoverError;
use crate::library::ResourceLibrary;
use crate::loader::ImageLoader;
use crate::manifest::{BiomeEntry, LandCoverManifest, LayerEntry};
use crate::model::{Billboard, LandCoverBiome, LandCoverLayer};
use crate::tables::compile_tables;

/// A configured set of land cover layers.
#[derive(Clone, Debug, Default)]
pub struct LandCover {
    /// Resource library shared by all layers.
    pub library: Option<Arc<ResourceLibrary>>,
    /// Layers in manifest order.
    pub layers: Vec<LandCoverLayer>,
}

/// Every shader generated for one layer.
#[derive(Clone, Debug)]
pub struct LayerShaders {
    /// Name of the layer.
    pub layer: String,
    /// Biome and billboard tables.
    pub tables: GeneratedShader,
    /// `getBiomeIndexOf` for the layer.
    pub biome_index: GeneratedShader,
    /// `passesCoverage`, one per biome in biome order.
    pub coverage: Vec<GeneratedShader>,
}

impl LayerShaders {
    /// All shaders of the layer, tables first.
    pub fn iter(&self) -> impl Iterator<Item = &GeneratedShader> {
        [&self.tables, &self.biome_index]
            .into_iter()
            .chain(self.coverage.iter())
    }
}

impl LandCover {
    /// Builds the land cover described by `manifest`, loading billboard
    /// images through `loader`.
    ///
    /// Configuration problems that only affect single symbols are recorded in
    /// `diagnostics` and the offending billboard is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`LandCoverError::DuplicateResource`] if the library is invalid.
    pub fn from_manifest(
        manifest: &LandCoverManifest,
        loader: &dyn ImageLoader,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self, LandCoverError> {
        let library = manifest
            .library
            .as_ref()
            .map(ResourceLibrary::initialize)
            .transpose()?
            .map(Arc::new);

        if manifest.layers.is_empty() {
            log::warn!("No land cover layers defined; no land cover to render");
        }

        let layers = manifest
            .layers
            .iter()
            .map(|entry| {
                let layer = configure_layer(entry, library.clone(), loader, diagnostics);
                log::info!("Configured land cover layer \"{}\"", layer.name);
                layer
            })
            .collect();

        Ok(Self { library, layers })
    }

    /// Generates every shader for every layer.
    pub fn generate(
        &self,
        coverage: Option<&dyn Coverage>,
        options: &ShaderOptions,
    ) -> Vec<LayerShaders> {
        self.layers
            .iter()
            .map(|layer| LayerShaders {
                layer: layer.name.clone(),
                tables: layer.create_shader(options),
                biome_index: layer.create_predicate_shader(coverage, options),
                coverage: layer
                    .biomes
                    .iter()
                    .enumerate()
                    .map(|(index, biome)| {
                        let name = format!("{} land cover biome {index} coverage", layer.name);
                        biome.create_named_predicate_shader(&name, coverage, options)
                    })
                    .collect(),
            })
            .collect()
    }
}

fn configure_layer(
    entry: &LayerEntry,
    library: Option<Arc<ResourceLibrary>>,
    loader: &dyn ImageLoader,
    diagnostics: &mut Diagnostics,
) -> LandCoverLayer {
    let biomes = entry
        .biomes
        .iter()
        .map(|biome| configure_biome(biome, library.as_deref(), loader, diagnostics))
        .collect();

    let mut params = entry.params.clone();
    for (param, value, default) in params.sanitize() {
        diagnostics.push(Diagnostic::InvalidLayerParam {
            layer: entry.name.clone(),
            param,
            value,
            default,
        });
    }

    LandCoverLayer {
        name: entry.name.clone(),
        params,
        biomes,
        library,
    }
}

fn configure_biome(
    entry: &BiomeEntry,
    library: Option<&ResourceLibrary>,
    loader: &dyn ImageLoader,
    diagnostics: &mut Diagnostics,
) -> LandCoverBiome {
    let mut billboards = Vec::new();
    for symbol in &entry.symbols {
        let Some(billboard) = symbol.as_billboard() else {
            diagnostics.push(Diagnostic::UnrecognizedSymbol {
                kind: symbol.kind(),
            });
            continue;
        };
        let resolved = match billboard.resolve(library) {
            Ok(resolved) => resolved,
            Err(diagnostic) => {
                diagnostics.push(diagnostic);
                continue;
            }
        };
        match loader.load(&resolved.url) {
            Ok(image) => billboards.push(Billboard::new(
                resolved.url,
                image,
                resolved.width,
                resolved.height,
            )),
            Err(e) => diagnostics.push(Diagnostic::BillboardLoadFailed {
                url: resolved.url,
                reason: e.to_string(),
            }),
        }
    }

    LandCoverBiome::from_class_string(&entry.classes, billboards)
}

impl LandCoverLayer {
    /// Generates the biome and billboard table shader.
    pub fn create_shader(&self, options: &ShaderOptions) -> GeneratedShader {
        GeneratedShader {
            name: format!("{} land cover tables", self.name),
            source: emit_tables(&compile_tables(self), options),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Generates `getBiomeIndexOf`, or its fallback when `coverage` is unusable.
    pub fn create_predicate_shader(
        &self,
        coverage: Option<&dyn Coverage>,
        options: &ShaderOptions,
    ) -> GeneratedShader {
        let mut diagnostics = Diagnostics::new();
        let program = compile_biome_index(self, coverage, &mut diagnostics);
        GeneratedShader {
            name: format!("{} land cover biome index", self.name),
            source: emit_biome_index(&program, options),
            diagnostics,
        }
    }
}

impl LandCoverBiome {
    /// Generates this biome's `passesCoverage`, or its fallback when
    /// `coverage` is unusable.
    pub fn create_predicate_shader(
        &self,
        coverage: Option<&dyn Coverage>,
        options: &ShaderOptions,
    ) -> GeneratedShader {
        self.create_named_predicate_shader("land cover coverage predicate", coverage, options)
    }

    fn create_named_predicate_shader(
        &self,
        name: &str,
        coverage: Option<&dyn Coverage>,
        options: &ShaderOptions,
    ) -> GeneratedShader {
        let mut diagnostics = Diagnostics::new();
        let program = compile_coverage(self, coverage, &mut diagnostics);
        GeneratedShader {
            name: name.to_string(),
            source: emit_coverage(&program, options),
            diagnostics,
        }
    }
}
