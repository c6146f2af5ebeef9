//! Fixed-size row-major tile grid with bounds-checked access and culling.

use std::ops::Range;

use glam::Vec2;
use tidal_math::Rect;

use crate::error::WorldError;
use crate::tile::{Tile, TileState};

/// Exclusive owner of every [`Tile`] in a world.
///
/// Exactly one tile exists for each `(x, y)` with `x < width`, `y < height`,
/// stored in row-major order. Also carries the round-robin cursor used by
/// [`DiffusionSimulator::step`](crate::DiffusionSimulator::step).
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width: u32,
    height: u32,
    tile_size: f32,
    tiles: Vec<Tile>,
    next_update_index: usize,
}

impl Grid {
    /// Build a grid by calling `init(x, y)` for each cell in row-major order.
    ///
    /// # Errors
    ///
    /// [`WorldError::InvalidDimensions`] if either dimension is zero or the
    /// cell count overflows, [`WorldError::InvalidTileSize`] if `tile_size`
    /// is not positive and finite. Both are checked before allocating.
    pub fn from_fn(
        width: u32,
        height: u32,
        tile_size: f32,
        mut init: impl FnMut(u32, u32) -> TileState,
    ) -> Result<Self, WorldError> {
        let len = Self::checked_len(width, height)?;
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(WorldError::InvalidTileSize(tile_size));
        }

        let mut tiles = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                tiles.push(Tile::new(x, y, init(x, y)));
            }
        }

        Ok(Self {
            width,
            height,
            tile_size,
            tiles,
            next_update_index: 0,
        })
    }

    /// Build a grid where every cell starts from the same state.
    pub fn filled(
        width: u32,
        height: u32,
        tile_size: f32,
        state: TileState,
    ) -> Result<Self, WorldError> {
        Self::from_fn(width, height, tile_size, |_, _| state)
    }

    /// Validate dimensions and return the cell count.
    pub fn checked_len(width: u32, height: u32) -> Result<usize, WorldError> {
        if width == 0 || height == 0 {
            return Err(WorldError::InvalidDimensions { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .ok_or(WorldError::InvalidDimensions { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Edge length of one tile in world units.
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Number of cells (`width * height`).
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false; a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Row-major index of the next cell the simulator will update.
    pub fn next_update_index(&self) -> usize {
        self.next_update_index
    }

    pub(crate) fn set_next_update_index(&mut self, index: usize) {
        self.next_update_index = index % self.tiles.len();
    }

    /// World-space extent of the whole grid.
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * self.tile_size,
            self.height as f32 * self.tile_size,
        )
    }

    /// Returns true if `(x, y)` addresses a cell.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Read access to one cell.
    ///
    /// # Errors
    ///
    /// [`WorldError::OutOfBounds`] outside the grid. Coordinates are never clamped.
    pub fn tile_at(&self, x: i32, y: i32) -> Result<&Tile, WorldError> {
        let index = self.index_of(x, y)?;
        Ok(&self.tiles[index])
    }

    pub(crate) fn tile_at_mut(&mut self, x: i32, y: i32) -> Result<&mut Tile, WorldError> {
        let index = self.index_of(x, y)?;
        Ok(&mut self.tiles[index])
    }

    pub(crate) fn tile_by_index(&self, index: usize) -> &Tile {
        &self.tiles[index]
    }

    pub(crate) fn tile_by_index_mut(&mut self, index: usize) -> &mut Tile {
        &mut self.tiles[index]
    }

    fn index_of(&self, x: i32, y: i32) -> Result<usize, WorldError> {
        if !self.in_bounds(x, y) {
            return Err(WorldError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Count tiles matching `pred`.
    pub fn count_where(&self, pred: impl Fn(&Tile) -> bool) -> usize {
        self.tiles.iter().filter(|t| pred(t)).count()
    }

    /// World-space rectangle covered by cell `(x, y)`.
    pub fn tile_rect(&self, x: u32, y: u32) -> Rect {
        Rect::new(
            Vec2::new(x as f32 * self.tile_size, y as f32 * self.tile_size),
            Vec2::splat(self.tile_size),
        )
    }

    /// Column and row ranges of cells that overlap `world_rect`, clipped to the grid.
    pub fn visible_range(&self, world_rect: Rect) -> (Range<u32>, Range<u32>) {
        let ts = self.tile_size;
        let clip = |v: f32, limit: u32| -> u32 { (v.max(0.0) as u64).min(limit as u64) as u32 };

        let x0 = clip((world_rect.left() / ts).floor(), self.width);
        let x1 = clip((world_rect.right() / ts).ceil(), self.width);
        let y0 = clip((world_rect.top() / ts).floor(), self.height);
        let y1 = clip((world_rect.bottom() / ts).ceil(), self.height);

        (x0..x1.max(x0), y0..y1.max(y0))
    }

    /// Tiles that overlap `world_rect`, row by row. Only the intersecting
    /// sub-rectangle of the grid is visited.
    pub fn visible_tiles(&self, world_rect: Rect) -> impl Iterator<Item = ((u32, u32), &Tile)> {
        let (xs, ys) = self.visible_range(world_rect);
        let width = self.width as usize;
        ys.flat_map(move |y| {
            xs.clone()
                .map(move |x| ((x, y), &self.tiles[y as usize * width + x as usize]))
        })
    }
}
