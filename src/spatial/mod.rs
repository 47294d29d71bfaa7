use glam::Vec2;

use crate::ecs::components::Species;
use crate::geometry::Bounds;

/// Snapshot of an agent taken when the grid is rebuilt.
/// Stored alongside the grid so queries don't need ECS lookups.
#[derive(Debug, Clone, Copy)]
pub struct AgentSnapshot {
    pub entity: hecs::Entity,
    pub pos: Vec2,
    pub species: Species,
}

/// Uniform tile grid over the world for radius-bounded neighbor queries.
///
/// Tile id is `col + row * cols`. Queries cover every tile overlapping the
/// square around the query point, so they can return agents slightly beyond
/// the radius; callers filter by exact distance where it matters.
pub struct SpatialGrid {
    tile_width: f32,
    tile_height: f32,
    cols: usize,
    rows: usize,
    /// Each tile holds snapshot indices. Cleared, not freed, on rebuild.
    tiles: Vec<Vec<u32>>,
}

impl SpatialGrid {
    pub fn new(bounds: &Bounds, tile_width: f32, tile_height: f32) -> Self {
        let cols = ((bounds.width / tile_width).ceil() as usize).max(1);
        let rows = ((bounds.height / tile_height).ceil() as usize).max(1);
        let mut tiles = Vec::with_capacity(cols * rows);
        for _ in 0..cols * rows {
            tiles.push(Vec::with_capacity(4));
        }
        Self {
            tile_width,
            tile_height,
            cols,
            rows,
            tiles,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Clear all tiles. Call at start of each rebuild.
    pub fn clear(&mut self) {
        for tile in &mut self.tiles {
            tile.clear();
        }
    }

    /// Tile containing `pos`, or `None` outside the grid.
    pub fn tile_id(&self, pos: Vec2) -> Option<usize> {
        let col = (pos.x / self.tile_width).floor();
        let row = (pos.y / self.tile_height).floor();
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(col + row * self.cols)
    }

    /// Insert a snapshot index at the given position. Positions outside the
    /// grid are dropped.
    pub fn insert(&mut self, pos: Vec2, index: u32) {
        if let Some(id) = self.tile_id(pos) {
            self.tiles[id].push(index);
        }
    }

    /// Visit every index stored in tiles overlapping the square of half-size
    /// `radius` centered on `pos`. Does not wrap around world edges.
    pub fn query_radius(&self, pos: Vec2, radius: f32, mut callback: impl FnMut(u32)) {
        let Some((cols, rows)) = self.tile_span(pos, radius) else {
            return;
        };
        for row in rows {
            for col in cols.clone() {
                for &index in &self.tiles[col + row * self.cols] {
                    callback(index);
                }
            }
        }
    }

    fn tile_span(
        &self,
        pos: Vec2,
        radius: f32,
    ) -> Option<(std::ops::RangeInclusive<usize>, std::ops::RangeInclusive<usize>)> {
        let cols = axis_span(pos.x, radius, self.tile_width, self.cols)?;
        let rows = axis_span(pos.y, radius, self.tile_height, self.rows)?;
        Some((cols, rows))
    }
}

fn axis_span(
    center: f32,
    radius: f32,
    tile: f32,
    count: usize,
) -> Option<std::ops::RangeInclusive<usize>> {
    let lo = ((center - radius) / tile).floor();
    let hi = ((center + radius) / tile).floor();
    if hi < 0.0 || lo >= count as f32 || lo.is_nan() || hi.is_nan() {
        return None;
    }
    let lo = lo.max(0.0) as usize;
    let hi = (hi as usize).min(count - 1);
    Some(lo..=hi)
}
