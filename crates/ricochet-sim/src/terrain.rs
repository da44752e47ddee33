//! Static level geometry and the "embedded in solid" query.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use ricochet_core::components::Collider;
use ricochet_core::constants::DEFAULT_TILE_SIZE;
use ricochet_core::types::StageBounds;
use ricochet_core::{fx, Fixed, FixedVec2};

use crate::error::SimError;

/// Static overlap query against solid level geometry.
pub trait SolidQuery {
    /// Whether `collider`, placed at `position`, overlaps any solid geometry.
    fn is_box_in_solid(&self, position: FixedVec2, collider: &Collider) -> bool;
}

/// One solid tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tile {
    /// Surface angle in degrees (positive = rising to the right).
    pub floor_angle: Fixed,
}

/// Grid of solid square tiles. Tile `(x, y)` covers
/// `[x * size, (x + 1) * size) x [y * size, (y + 1) * size)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    tile_size: Fixed,
    tiles: BTreeMap<(i32, i32), Tile>,
}

impl Default for TileMap {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            tiles: BTreeMap::new(),
        }
    }
}

impl TileMap {
    pub fn new(tile_size: Fixed) -> Result<Self, SimError> {
        if tile_size <= Fixed::ZERO {
            return Err(SimError::InvalidTileSize(tile_size));
        }
        Ok(Self {
            tile_size,
            tiles: BTreeMap::new(),
        })
    }

    /// Build a map from ASCII rows. The last row is `y = 0`.
    ///
    /// `#` is a flat solid tile, `/` a slope rising to the right (45 degrees),
    /// `\` a slope falling to the right (-45 degrees). Anything else is empty.
    pub fn from_rows<S: AsRef<str>>(tile_size: Fixed, rows: &[S]) -> Result<Self, SimError> {
        let mut map = Self::new(tile_size)?;
        let height = rows.len() as i32;
        for (row_index, row) in rows.iter().enumerate() {
            let y = height - 1 - row_index as i32;
            for (x, ch) in row.as_ref().chars().enumerate() {
                let floor_angle = match ch {
                    '#' => Fixed::ZERO,
                    '/' => fx(45),
                    '\\' => fx(-45),
                    _ => continue,
                };
                map.set_tile(x as i32, y, Tile { floor_angle });
            }
        }
        Ok(map)
    }

    pub fn tile_size(&self) -> Fixed {
        self.tile_size
    }

    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
        self.tiles.insert((x, y), tile);
    }

    pub fn set_solid(&mut self, x: i32, y: i32) {
        self.set_tile(x, y, Tile::default());
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.tiles.get(&(x, y))
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// First solid tile overlapped by the placed box, scanning rows bottom-up
    /// and columns left to right.
    pub fn first_overlapping_tile(&self, position: FixedVec2, collider: &Collider) -> Option<&Tile> {
        if self.tiles.is_empty() {
            return None;
        }
        let min = collider.min(position);
        let max = collider.max(position);
        let (x0, x1) = self.cell_span(min.x, max.x);
        let (y0, y1) = self.cell_span(min.y, max.y);
        for y in y0..=y1 {
            for x in x0..=x1 {
                if let Some(tile) = self.tiles.get(&(x, y)) {
                    return Some(tile);
                }
            }
        }
        None
    }

    /// Inclusive range of cells overlapped by the open interval (lo, hi).
    fn cell_span(&self, lo: Fixed, hi: Fixed) -> (i32, i32) {
        let first = (lo / self.tile_size).floor().saturating_to_num::<i32>();
        let last = (hi / self.tile_size).ceil().saturating_to_num::<i32>() - 1;
        (first, last)
    }
}

impl SolidQuery for TileMap {
    fn is_box_in_solid(&self, position: FixedVec2, collider: &Collider) -> bool {
        self.first_overlapping_tile(position, collider).is_some()
    }
}

/// Level geometry as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelDef {
    pub tile_size: Fixed,
    /// ASCII rows, top row first. See [`TileMap::from_rows`].
    pub rows: Vec<String>,
    pub stage: StageBounds,
}

impl Default for LevelDef {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            rows: Vec::new(),
            stage: StageBounds::default(),
        }
    }
}

impl LevelDef {
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn tile_map(&self) -> Result<TileMap, SimError> {
        TileMap::from_rows(self.tile_size, self.rows.as_slice())
    }
}
