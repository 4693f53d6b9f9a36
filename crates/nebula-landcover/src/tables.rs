//! Biome and billboard descriptor tables.
//!
//! Every billboard in a layer gets a global running index (biome order, then
//! order within the biome). Each biome records where its billboards start in
//! that numbering and how many it has.

use crate::model::LandCoverLayer;

/// Descriptor for one biome slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeRecord {
    /// Global index of this biome's first billboard.
    pub first_billboard_index: usize,
    /// Number of billboards belonging to this biome.
    pub num_billboards: usize,
    /// Layer density (identical for every biome in a layer).
    pub density: f32,
    /// Layer fill (identical for every biome in a layer).
    pub fill: f32,
}

/// Descriptor for one billboard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BillboardRecord {
    /// Global index of this billboard, i.e. its texture array layer.
    pub array_index: usize,
    /// World-space width.
    pub width: f32,
    /// World-space height.
    pub height: f32,
}

/// Compiled lookup tables for one layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandCoverTables {
    /// One record per biome, in biome order.
    pub biomes: Vec<BiomeRecord>,
    /// One record per billboard, in global index order.
    pub billboards: Vec<BillboardRecord>,
}

/// Assigns billboard indices and builds the biome and billboard tables.
pub fn compile_tables(layer: &LandCoverLayer) -> LandCoverTables {
    let mut tables = LandCoverTables {
        biomes: Vec::with_capacity(layer.biomes.len()),
        billboards: Vec::with_capacity(layer.total_billboards()),
    };

    let mut index = 0;
    for biome in &layer.biomes {
        tables.biomes.push(BiomeRecord {
            first_billboard_index: index,
            num_billboards: biome.billboards.len(),
            density: layer.params.density,
            fill: layer.params.fill,
        });

        for billboard in &biome.billboards {
            tables.billboards.push(BillboardRecord {
                array_index: index,
                width: billboard.width,
                height: billboard.height,
            });
            index += 1;
        }
    }

    log::debug!(
        "compiled land cover tables for \"{}\": {} biomes, {} billboards",
        layer.name,
        tables.biomes.len(),
        tables.billboards.len()
    );
    tables
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::{Billboard, LandCoverBiome};

    fn billboards(sizes: &[(f32, f32)]) -> Vec<Billboard> {
        let image = Arc::new(image::RgbaImage::new(1, 1));
        sizes
            .iter()
            .map(|&(w, h)| Billboard::new("bb.png", image.clone(), w, h))
            .collect()
    }

    fn layer(counts: &[usize]) -> LandCoverLayer {
        let biomes = counts
            .iter()
            .map(|&n| {
                let sizes: Vec<_> = (0..n).map(|i| (i as f32 + 1.0, 2.0)).collect();
                LandCoverBiome::new(["forest"], billboards(&sizes))
            })
            .collect();
        let mut layer = LandCoverLayer::new("trees", biomes);
        layer.params.density = 0.75;
        layer.params.fill = 0.4;
        layer
    }

    #[test]
    fn test_two_biomes_three_and_two_billboards() {
        let tables = compile_tables(&layer(&[3, 2]));

        assert_eq!(tables.biomes.len(), 2);
        assert_eq!(tables.biomes[0].first_billboard_index, 0);
        assert_eq!(tables.biomes[0].num_billboards, 3);
        assert_eq!(tables.biomes[1].first_billboard_index, 3);
        assert_eq!(tables.biomes[1].num_billboards, 2);

        let indices: Vec<_> = tables.billboards.iter().map(|b| b.array_index).collect();
        assert_eq!(indices, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_first_index_is_prefix_sum() {
        let counts = [2, 0, 5, 1, 0, 3];
        let tables = compile_tables(&layer(&counts));
        let mut sum = 0;
        for (i, record) in tables.biomes.iter().enumerate() {
            assert_eq!(record.first_billboard_index, sum, "biome {i}");
            assert_eq!(record.num_billboards, counts[i]);
            sum += counts[i];
        }
        for (k, bb) in tables.billboards.iter().enumerate() {
            assert_eq!(bb.array_index, k);
        }
    }

    #[test]
    fn test_layer_scalars_repeat_in_every_biome() {
        let tables = compile_tables(&layer(&[1, 4, 0]));
        for record in &tables.biomes {
            assert_eq!(record.density, 0.75);
            assert_eq!(record.fill, 0.4);
        }
    }

    #[test]
    fn test_billboard_sizes_copied() {
        let tables = compile_tables(&layer(&[2]));
        assert_eq!(tables.billboards[1].width, 2.0);
        assert_eq!(tables.billboards[1].height, 2.0);
    }

    #[test]
    fn test_empty_layer_has_empty_tables() {
        let tables = compile_tables(&LandCoverLayer::new("empty", vec![]));
        assert!(tables.biomes.is_empty());
        assert!(tables.billboards.is_empty());
    }
}
