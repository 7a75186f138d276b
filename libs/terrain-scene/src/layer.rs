//! Semantic layer buckets.

use serde::{Deserialize, Serialize};

/// Kind of geometry a vector-tile layer contributes.
///
/// Meshes are bucketed per kind, and seams are only welded between meshes
/// of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// Ground surface
    Terrain,
    /// Lakes, rivers, sea
    Water,
    /// Parks, forests, farmland and similar areas
    Landuse,
}

impl LayerKind {
    /// Number of kinds.
    pub const COUNT: usize = 3;

    /// All kinds in bucket order.
    pub const ALL: [LayerKind; Self::COUNT] = [LayerKind::Terrain, LayerKind::Water, LayerKind::Landuse];

    /// Bucket index of the kind.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name, as used in configuration.
    pub fn name(self) -> &'static str {
        match self {
            LayerKind::Terrain => "terrain",
            LayerKind::Water => "water",
            LayerKind::Landuse => "landuse",
        }
    }
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
