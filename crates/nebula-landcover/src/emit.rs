//! GLSL emission for compiled land-cover tables and classification programs.
//!
//! Identifiers are fixed because other shader stages call them by name; an
//! optional prefix can namespace all of them at once. Output is a pure
//! function of the program and options, so it can be used as a cache key.

use std::fmt::{self, Write};
use std::hash::Hasher;

use crate::binding::CoverageBinding;
use crate::classify::{Arm, BiomeIndexProgram, CoverageProgram};
use crate::diagnostic::Diagnostics;
use crate::predicate::{Bound, glsl_float, translate};
use crate::tables::LandCoverTables;

/// Struct holding a biome descriptor.
pub const BIOME_STRUCT: &str = "Biome";
/// Constant array of biome descriptors.
pub const BIOME_TABLE: &str = "biomes";
/// Biome descriptor accessor.
pub const GET_BIOME: &str = "getBiome";
/// Struct holding a billboard descriptor.
pub const BILLBOARD_STRUCT: &str = "Billboard";
/// Constant array of billboard descriptors.
pub const BILLBOARD_TABLE: &str = "billboards";
/// Billboard descriptor accessor.
pub const GET_BILLBOARD: &str = "getBillboard";
/// Per-layer biome index lookup.
pub const BIOME_INDEX_FN: &str = "getBiomeIndexOf";
/// Per-biome coverage test.
pub const COVERAGE_FN: &str = "passesCoverage";

/// Local variable holding the sampled classification value.
const SAMPLE: &str = "value";

/// Options controlling the emitted text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShaderOptions {
    /// Value of the `#version` directive.
    pub glsl_version: u32,
    /// Prepended to every emitted identifier.
    pub symbol_prefix: String,
}

impl Default for ShaderOptions {
    fn default() -> Self {
        Self {
            glsl_version: 330,
            symbol_prefix: String::new(),
        }
    }
}

impl ShaderOptions {
    /// Returns the prefixed form of `name`.
    pub fn ident(&self, name: &str) -> String {
        format!("{}{name}", self.symbol_prefix)
    }
}

/// A generated shader source plus the diagnostics raised while building it.
#[derive(Clone, Debug)]
pub struct GeneratedShader {
    /// Human-readable shader name.
    pub name: String,
    /// Complete GLSL source.
    pub source: String,
    /// Warnings and fallback notices.
    pub diagnostics: Diagnostics,
}

impl GeneratedShader {
    /// Stable hash of the source text, suitable as a program cache key.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = rustc_hash::FxHasher::default();
        hasher.write(self.source.as_bytes());
        hasher.finish()
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Emits both descriptor structs, their constant arrays and accessors.
///
/// GLSL has no zero-length arrays, so an empty table is emitted with a single
/// zeroed sentinel entry. Accessors are always present.
pub fn emit_tables(tables: &LandCoverTables, options: &ShaderOptions) -> String {
    let mut out = String::new();
    // Formatting into a String cannot fail.
    let _ = write_tables(&mut out, tables, options);
    out
}

fn write_tables(
    out: &mut String,
    tables: &LandCoverTables,
    options: &ShaderOptions,
) -> fmt::Result {
    let biome = options.ident(BIOME_STRUCT);
    let billboard = options.ident(BILLBOARD_STRUCT);

    writeln!(out, "#version {}", options.glsl_version)?;

    writeln!(out, "struct {biome} {{")?;
    writeln!(out, "    int firstBillboardIndex;")?;
    writeln!(out, "    int numBillboards;")?;
    writeln!(out, "    float density;")?;
    writeln!(out, "    float fill;")?;
    writeln!(out, "}};")?;
    let rows = tables.biomes.iter().map(|b| {
        format!(
            "{biome}({}, {}, {}, {})",
            b.first_billboard_index,
            b.num_billboards,
            glsl_float(b.density),
            glsl_float(b.fill)
        )
    });
    let sentinel = format!("{biome}(0, 0, 0.0, 0.0)");
    write_const_array(out, &biome, &options.ident(BIOME_TABLE), rows, &sentinel)?;
    write_accessor(
        out,
        &options.ident(GET_BIOME),
        &biome,
        "biome",
        &options.ident(BIOME_TABLE),
    )?;

    writeln!(out)?;

    writeln!(out, "struct {billboard} {{")?;
    writeln!(out, "    int arrayIndex;")?;
    writeln!(out, "    float width;")?;
    writeln!(out, "    float height;")?;
    writeln!(out, "}};")?;
    let rows = tables.billboards.iter().map(|b| {
        format!(
            "{billboard}({}, {}, {})",
            b.array_index,
            glsl_float(b.width),
            glsl_float(b.height)
        )
    });
    let sentinel = format!("{billboard}(0, 0.0, 0.0)");
    write_const_array(
        out,
        &billboard,
        &options.ident(BILLBOARD_TABLE),
        rows,
        &sentinel,
    )?;
    write_accessor(
        out,
        &options.ident(GET_BILLBOARD),
        &billboard,
        "billboard",
        &options.ident(BILLBOARD_TABLE),
    )
}

fn write_const_array(
    out: &mut String,
    ty: &str,
    name: &str,
    rows: impl Iterator<Item = String>,
    sentinel: &str,
) -> fmt::Result {
    let mut rows: Vec<String> = rows.collect();
    if rows.is_empty() {
        rows.push(sentinel.to_string());
    }
    let len = rows.len();
    writeln!(out, "const {ty} {name}[{len}] = {ty}[{len}](")?;
    writeln!(out, "    {}", rows.join(",\n    "))?;
    writeln!(out, ");")
}

fn write_accessor(out: &mut String, func: &str, ty: &str, param: &str, table: &str) -> fmt::Result {
    writeln!(out, "void {func}(in int index, out {ty} {param}) {{")?;
    writeln!(out, "    {param} = {table}[index];")?;
    writeln!(out, "}}")
}

// ---------------------------------------------------------------------------
// Classification functions
// ---------------------------------------------------------------------------

/// Default `getBiomeIndexOf` used when no coverage binding is available.
pub fn fallback_biome_index(options: &ShaderOptions) -> String {
    format!(
        "#version {}\nint {}(in vec4 coords) {{ return -1; }}\n",
        options.glsl_version,
        options.ident(BIOME_INDEX_FN)
    )
}

/// Default `passesCoverage` used when no coverage binding is available.
pub fn fallback_coverage(options: &ShaderOptions) -> String {
    format!(
        "#version {}\nbool {}(in vec4 coords) {{ return true; }}\n",
        options.glsl_version,
        options.ident(COVERAGE_FN)
    )
}

/// Emits `int getBiomeIndexOf(in vec4 coords)`.
pub fn emit_biome_index(program: &BiomeIndexProgram, options: &ShaderOptions) -> String {
    let BiomeIndexProgram::Lookup { binding, arms } = program else {
        return fallback_biome_index(options);
    };
    let mut out = String::new();
    let _ = write_biome_index(&mut out, binding, arms, options);
    out
}

fn write_biome_index(
    out: &mut String,
    binding: &CoverageBinding,
    arms: &[Arm<usize>],
    options: &ShaderOptions,
) -> fmt::Result {
    write_header(out, options, binding)?;
    writeln!(out, "int {}(in vec4 coords) {{", options.ident(BIOME_INDEX_FN))?;
    write_sample(out, binding)?;
    for arm in arms {
        write_arm(out, &arm.bound, &format!("return {};", arm.result))?;
    }
    // Only after every biome has been tried.
    writeln!(out, "    return -1;")?;
    writeln!(out, "}}")
}

/// Emits `bool passesCoverage(in vec4 coords)` for one biome.
pub fn emit_coverage(program: &CoverageProgram, options: &ShaderOptions) -> String {
    let (binding, bounds) = match program {
        CoverageProgram::Fallback(_) => return fallback_coverage(options),
        CoverageProgram::AcceptAll { binding } => (binding, None),
        CoverageProgram::Test { binding, bounds } => (binding, Some(bounds.as_slice())),
    };
    let mut out = String::new();
    let _ = write_coverage(&mut out, binding, bounds, options);
    out
}

fn write_coverage(
    out: &mut String,
    binding: &CoverageBinding,
    bounds: Option<&[Bound]>,
    options: &ShaderOptions,
) -> fmt::Result {
    write_header(out, options, binding)?;
    writeln!(out, "bool {}(in vec4 coords) {{", options.ident(COVERAGE_FN))?;
    match bounds {
        None => writeln!(out, "    return true;")?,
        Some(bounds) => {
            write_sample(out, binding)?;
            for bound in bounds {
                write_arm(out, bound, "return true;")?;
            }
            writeln!(out, "    return false;")?;
        }
    }
    writeln!(out, "}}")
}

fn write_header(
    out: &mut String,
    options: &ShaderOptions,
    binding: &CoverageBinding,
) -> fmt::Result {
    writeln!(out, "#version {}", options.glsl_version)?;
    writeln!(out, "uniform sampler2D {};", binding.sampler)?;
    writeln!(out, "uniform mat4 {};", binding.matrix)
}

fn write_sample(out: &mut String, binding: &CoverageBinding) -> fmt::Result {
    writeln!(
        out,
        "    float {SAMPLE} = textureLod({}, ({} * coords).st, 0.0).r;",
        binding.sampler, binding.matrix
    )
}

fn write_arm(out: &mut String, bound: &Bound, then: &str) -> fmt::Result {
    writeln!(out, "    {}", translate(bound, SAMPLE, then))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::FallbackReason;
    use crate::tables::{BillboardRecord, BiomeRecord};

    fn binding() -> CoverageBinding {
        CoverageBinding::new("lc_tex", "lc_tex_matrix")
    }

    #[test]
    fn test_tables_text() {
        let tables = LandCoverTables {
            biomes: vec![
                BiomeRecord {
                    first_billboard_index: 0,
                    num_billboards: 1,
                    density: 1.0,
                    fill: 0.5,
                },
                BiomeRecord {
                    first_billboard_index: 1,
                    num_billboards: 0,
                    density: 1.0,
                    fill: 0.5,
                },
            ],
            billboards: vec![BillboardRecord {
                array_index: 0,
                width: 2.0,
                height: 6.5,
            }],
        };
        let expected = "\
#version 330
struct Biome {
    int firstBillboardIndex;
    int numBillboards;
    float density;
    float fill;
};
const Biome biomes[2] = Biome[2](
    Biome(0, 1, 1.0, 0.5),
    Biome(1, 0, 1.0, 0.5)
);
void getBiome(in int index, out Biome biome) {
    biome = biomes[index];
}

struct Billboard {
    int arrayIndex;
    float width;
    float height;
};
const Billboard billboards[1] = Billboard[1](
    Billboard(0, 2.0, 6.5)
);
void getBillboard(in int index, out Billboard billboard) {
    billboard = billboards[index];
}
";
        assert_eq!(emit_tables(&tables, &ShaderOptions::default()), expected);
    }

    #[test]
    fn test_empty_tables_still_emit_accessors() {
        let text = emit_tables(&LandCoverTables::default(), &ShaderOptions::default());
        assert!(text.contains("const Biome biomes[1] = Biome[1](\n    Biome(0, 0, 0.0, 0.0)\n);"));
        assert!(text.contains("const Billboard billboards[1]"));
        assert!(text.contains("void getBiome(in int index, out Biome biome)"));
        assert!(text.contains("void getBillboard(in int index, out Billboard billboard)"));
    }

    #[test]
    fn test_biome_index_text() {
        let program = BiomeIndexProgram::Lookup {
            binding: binding(),
            arms: vec![
                Arm {
                    bound: Bound::Range { min: 5.0, max: 10.0 },
                    result: 0,
                },
                Arm {
                    bound: Bound::Exact(20.0),
                    result: 1,
                },
            ],
        };
        let expected = "\
#version 330
uniform sampler2D lc_tex;
uniform mat4 lc_tex_matrix;
int getBiomeIndexOf(in vec4 coords) {
    float value = textureLod(lc_tex, (lc_tex_matrix * coords).st, 0.0).r;
    if (value >= 5.0 && value <= 10.0) return 0;
    if (value == 20.0) return 1;
    return -1;
}
";
        assert_eq!(
            emit_biome_index(&program, &ShaderOptions::default()),
            expected
        );
    }

    #[test]
    fn test_single_fallthrough_after_all_biomes() {
        let program = BiomeIndexProgram::Lookup {
            binding: binding(),
            arms: (0..3)
                .map(|i| Arm {
                    bound: Bound::Exact(i as f32),
                    result: i,
                })
                .collect(),
        };
        let text = emit_biome_index(&program, &ShaderOptions::default());
        assert_eq!(text.matches("return -1;").count(), 1);
        let last_arm = text.find("return 2;").unwrap();
        assert!(text.find("return -1;").unwrap() > last_arm);
    }

    #[test]
    fn test_coverage_text() {
        let program = CoverageProgram::Test {
            binding: binding(),
            bounds: vec![Bound::Range { min: 5.0, max: 10.0 }],
        };
        let expected = "\
#version 330
uniform sampler2D lc_tex;
uniform mat4 lc_tex_matrix;
bool passesCoverage(in vec4 coords) {
    float value = textureLod(lc_tex, (lc_tex_matrix * coords).st, 0.0).r;
    if (value >= 5.0 && value <= 10.0) return true;
    return false;
}
";
        assert_eq!(emit_coverage(&program, &ShaderOptions::default()), expected);
    }

    #[test]
    fn test_wildcard_coverage_returns_true_without_sampling() {
        let text = emit_coverage(
            &CoverageProgram::AcceptAll { binding: binding() },
            &ShaderOptions::default(),
        );
        assert!(text.contains("bool passesCoverage(in vec4 coords) {\n    return true;\n}"));
        assert!(!text.contains("textureLod"));
        assert!(!text.contains("return false"));
    }

    #[test]
    fn test_fallback_text_is_exact() {
        let options = ShaderOptions::default();
        assert_eq!(
            emit_biome_index(
                &BiomeIndexProgram::Fallback(FallbackReason::NoLegend),
                &options
            ),
            "#version 330\nint getBiomeIndexOf(in vec4 coords) { return -1; }\n"
        );
        assert_eq!(
            emit_coverage(
                &CoverageProgram::Fallback(FallbackReason::NoLegend),
                &options
            ),
            "#version 330\nbool passesCoverage(in vec4 coords) { return true; }\n"
        );
    }

    #[test]
    fn test_prefix_applies_to_every_identifier() {
        let options = ShaderOptions {
            glsl_version: 400,
            symbol_prefix: "lc_".into(),
        };
        let tables = emit_tables(&LandCoverTables::default(), &options);
        assert!(tables.starts_with("#version 400\n"));
        for name in [
            "struct lc_Biome",
            "lc_biomes[1]",
            "void lc_getBiome(",
            "struct lc_Billboard",
            "lc_billboards[1]",
            "void lc_getBillboard(",
        ] {
            assert!(tables.contains(name), "missing {name}");
        }
        assert!(fallback_biome_index(&options).contains("int lc_getBiomeIndexOf("));
        assert!(fallback_coverage(&options).contains("bool lc_passesCoverage("));
    }

    #[test]
    fn test_fingerprint_tracks_source() {
        let shader = |source: &str| GeneratedShader {
            name: "x".into(),
            source: source.into(),
            diagnostics: Diagnostics::new(),
        };
        assert_eq!(shader("a").fingerprint(), shader("a").fingerprint());
        assert_ne!(shader("a").fingerprint(), shader("b").fingerprint());
    }
}
