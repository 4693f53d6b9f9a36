//! Loads a manifest, generates every land cover shader and writes them to disk.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use nebula_config::GeneratorConfig;
use nebula_landcover::{
    Coverage, Diagnostics, FileImageLoader, GeneratedShader, LandCover, LandCoverError,
    LandCoverManifest, ShaderOptions,
};
use tracing::{debug, info};

/// Errors that abort a generator run.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// No manifest was configured.
    #[error("no land cover manifest given; pass --manifest or set generator.manifest")]
    NoManifest,

    /// The manifest could not be loaded.
    #[error(transparent)]
    LandCover(#[from] LandCoverError),

    /// A generated file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Destination file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Warnings were raised while `deny_warnings` is set.
    #[error("{0} configuration warning(s) raised with deny_warnings enabled")]
    WarningsDenied(usize),
}

/// Outcome of a successful run.
#[derive(Debug, Default)]
pub struct Report {
    /// Files written, in generation order.
    pub written: Vec<PathBuf>,
    /// Every diagnostic raised while loading and generating.
    pub diagnostics: Diagnostics,
}

impl Report {
    /// Number of configuration warnings (fallback notices excluded).
    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_warning()).count()
    }
}

/// Runs the generator described by `config`.
pub fn run(config: &GeneratorConfig) -> Result<Report, GenerateError> {
    let manifest_path = config.manifest.as_deref().ok_or(GenerateError::NoManifest)?;
    let manifest = LandCoverManifest::from_ron(manifest_path)?;

    let base_dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));
    let loader = FileImageLoader::new(base_dir);

    let mut report = Report::default();
    let land_cover = LandCover::from_manifest(&manifest, &loader, &mut report.diagnostics)?;
    let coverage = manifest.coverage();

    let options = ShaderOptions {
        glsl_version: config.glsl_version,
        symbol_prefix: config.symbol_prefix.clone(),
    };
    write_all(
        &land_cover,
        Some(&coverage),
        &options,
        &config.output_dir,
        &mut report,
    )?;

    let warnings = report.warning_count();
    if config.deny_warnings && warnings > 0 {
        return Err(GenerateError::WarningsDenied(warnings));
    }
    Ok(report)
}

/// Generates and writes every shader of `land_cover` into `out_dir`.
pub fn write_all(
    land_cover: &LandCover,
    coverage: Option<&dyn Coverage>,
    options: &ShaderOptions,
    out_dir: &Path,
    report: &mut Report,
) -> Result<(), GenerateError> {
    std::fs::create_dir_all(out_dir).map_err(|source| GenerateError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut used = HashSet::new();
    for (index, shaders) in land_cover.generate(coverage, options).into_iter().enumerate() {
        let stem = unique_stem(file_stem(&shaders.layer, index), &mut used);
        write_shader(out_dir.join(format!("{stem}.tables.glsl")), shaders.tables, report)?;
        write_shader(
            out_dir.join(format!("{stem}.biome_index.glsl")),
            shaders.biome_index,
            report,
        )?;
        for (biome, shader) in shaders.coverage.into_iter().enumerate() {
            write_shader(
                out_dir.join(format!("{stem}.biome{biome}.coverage.glsl")),
                shader,
                report,
            )?;
        }
    }
    Ok(())
}

fn write_shader(
    path: PathBuf,
    shader: GeneratedShader,
    report: &mut Report,
) -> Result<(), GenerateError> {
    std::fs::write(&path, &shader.source).map_err(|source| GenerateError::Write {
        path: path.clone(),
        source,
    })?;
    info!(
        "Wrote {} ({}, fingerprint {:016x})",
        path.display(),
        shader.name,
        shader.fingerprint()
    );
    debug!("{} diagnostic(s) for {}", shader.diagnostics.len(), shader.name);
    report.diagnostics.extend(shader.diagnostics);
    report.written.push(path);
    Ok(())
}

/// File-name-safe stem for a layer; unnamed layers use their position.
pub fn file_stem(layer: &str, index: usize) -> String {
    let stem: String = layer
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        format!("layer{index}")
    } else {
        stem
    }
}

/// Returns `stem`, or `stem-2`, `stem-3`, ... if it is already in `used`.
fn unique_stem(stem: String, used: &mut HashSet<String>) -> String {
    let mut candidate = stem.clone();
    let mut n = 2;
    while used.contains(&candidate) {
        candidate = format!("{stem}-{n}");
        n += 1;
    }
    used.insert(candidate.clone());
    candidate
}
