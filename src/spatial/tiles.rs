//! Tile variants and their edge codes
//!
//! A tile variant is described only by the codes on its four edges. Two tiles
//! may sit next to each other when the codes on their facing edges are equal.
//! Code `0` is the neutral background edge. The tile set is built once, and
//! from then on a variant is known only by its index in the set.

use crate::io::error::{MosaicError, Result, out_of_range};

/// Integer identifying the connecting pattern on one side of a tile
pub type EdgeCode = u32;

/// One of the four sides of a tile or cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Upper edge
    Top,
    /// Right edge
    Right,
    /// Lower edge
    Bottom,
    /// Left edge
    Left,
}

impl Side {
    /// All sides in propagation order
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Position of this side in a `(top, right, bottom, left)` tuple
    pub const fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Right => 1,
            Self::Bottom => 2,
            Self::Left => 3,
        }
    }

    /// The side facing this one across a shared edge
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Row and column step towards the neighbor on this side
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Top => (-1, 0),
            Self::Right => (0, 1),
            Self::Bottom => (1, 0),
            Self::Left => (0, -1),
        }
    }
}

/// A tile variant defined by its `(top, right, bottom, left)` edge codes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileVariant {
    edges: [EdgeCode; 4],
}

impl TileVariant {
    /// Create a variant from its four edge codes
    pub const fn new(top: EdgeCode, right: EdgeCode, bottom: EdgeCode, left: EdgeCode) -> Self {
        Self {
            edges: [top, right, bottom, left],
        }
    }

    /// Edge code on the given side
    pub const fn edge(&self, side: Side) -> EdgeCode {
        match side {
            Side::Top => self.edges[0],
            Side::Right => self.edges[1],
            Side::Bottom => self.edges[2],
            Side::Left => self.edges[3],
        }
    }

    /// All four codes as a `(top, right, bottom, left)` array
    pub const fn edges(&self) -> [EdgeCode; 4] {
        self.edges
    }

    /// Whether `other` may sit on `side` of this tile
    pub const fn connects(&self, side: Side, other: &Self) -> bool {
        self.edge(side) == other.edge(side.opposite())
    }
}

impl From<(EdgeCode, EdgeCode, EdgeCode, EdgeCode)> for TileVariant {
    fn from((top, right, bottom, left): (EdgeCode, EdgeCode, EdgeCode, EdgeCode)) -> Self {
        Self::new(top, right, bottom, left)
    }
}

/// Immutable ordered collection of tile variants
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileSet {
    variants: Vec<TileVariant>,
}

impl TileSet {
    /// Build a tile set from its variants
    ///
    /// # Errors
    ///
    /// Returns `EmptyTileSet` if no variants are given
    pub fn new(variants: Vec<TileVariant>) -> Result<Self> {
        if variants.is_empty() {
            return Err(MosaicError::EmptyTileSet);
        }
        Ok(Self { variants })
    }

    /// Build a tile set from `(top, right, bottom, left)` tuples
    ///
    /// # Errors
    ///
    /// Returns `EmptyTileSet` if the iterator yields nothing
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (EdgeCode, EdgeCode, EdgeCode, EdgeCode)>,
    {
        Self::new(edges.into_iter().map(TileVariant::from).collect())
    }

    /// Number of variants in the set
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Look up a variant by index
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `tile` is not a valid index
    pub fn variant(&self, tile: usize) -> Result<&TileVariant> {
        self.variants
            .get(tile)
            .ok_or_else(|| out_of_range("tile", tile, self.variants.len()))
    }

    /// Edge code of a tile on the given side
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `tile` is not a valid index
    pub fn edge(&self, tile: usize, side: Side) -> Result<EdgeCode> {
        self.variant(tile).map(|variant| variant.edge(side))
    }

    /// Edge code lookup for indices already known to be in range
    pub(crate) fn edge_of(&self, tile: usize, side: Side) -> Option<EdgeCode> {
        self.variants.get(tile).map(|variant| variant.edge(side))
    }

    /// Iterate variants in index order
    pub fn iter(&self) -> std::slice::Iter<'_, TileVariant> {
        self.variants.iter()
    }

    /// Largest edge code used by any variant
    pub fn max_edge_code(&self) -> EdgeCode {
        self.variants
            .iter()
            .flat_map(|variant| variant.edges())
            .max()
            .unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a TileSet {
    type Item = &'a TileVariant;
    type IntoIter = std::slice::Iter<'a, TileVariant>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
