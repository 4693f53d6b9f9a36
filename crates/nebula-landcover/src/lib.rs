//! Land cover shader generation: compiles biomes, billboards and a classification
//! legend into GLSL lookup tables and classification functions.
//!
//! Generation is a pure function of the layer, the legend and the coverage
//! binding. Identical inputs always produce byte-identical source text, so the
//! text can double as a cache key for compiled programs.

mod binding;
mod classify;
mod diagnostic;
mod emit;
mod error;
mod landcover;
mod legend;
mod library;
mod loader;
mod manifest;
mod model;
mod predicate;
mod symbol;
mod tables;

pub use binding::{
    Coverage, CoverageBinding, FallbackReason, ResolvedCoverage, StaticCoverage, resolve,
};
pub use classify::{Arm, BiomeIndexProgram, CoverageProgram, compile_biome_index, compile_coverage};
pub use diagnostic::{Diagnostic, Diagnostics};
pub use emit::{
    BILLBOARD_STRUCT, BILLBOARD_TABLE, BIOME_INDEX_FN, BIOME_STRUCT, BIOME_TABLE, COVERAGE_FN,
    GET_BILLBOARD, GET_BIOME, GeneratedShader, ShaderOptions, emit_biome_index, emit_coverage,
    emit_tables, fallback_biome_index, fallback_coverage,
};
pub use error::LandCoverError;
pub use landcover::{LandCover, LayerShaders};
pub use legend::{ClassificationClass, Legend, LegendEntry};
pub use library::{BillboardResource, LibraryConfig, ResourceLibrary};
pub use loader::{FileImageLoader, ImageLoader};
pub use manifest::{BiomeEntry, LandCoverManifest, LayerEntry};
pub use model::{Billboard, LandCoverBiome, LandCoverLayer, LayerParams, tokenize_classes};
pub use predicate::{Bound, ValuePredicate, glsl_float, translate, translate_predicate};
pub use symbol::{
    BillboardSymbol, DEFAULT_BILLBOARD_HEIGHT, DEFAULT_BILLBOARD_WIDTH, IconSymbol, ModelSymbol,
    ResolvedBillboard, Symbol,
};
pub use tables::{BillboardRecord, BiomeRecord, LandCoverTables, compile_tables};
