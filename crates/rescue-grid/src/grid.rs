//! GridWorld: occupancy grid with walkability and coordinate queries.

use glam::{IVec2, Vec2};

use rescue_core::enums::CellState;
use rescue_core::types::Cell;

/// Row-major occupancy grid. Every cell holds exactly one [`CellState`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridWorld {
    width: i32,
    height: i32,
    tile_size: i32,
    cells: Vec<CellState>,
}

impl GridWorld {
    /// Create an all-free grid. Dimensions below one are raised to one.
    pub fn new(width: i32, height: i32, tile_size: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            tile_size: tile_size.max(1),
            cells: vec![CellState::Free; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| (cell.y * self.width + cell.x) as usize)
    }

    /// State of `cell`, or `None` outside the map.
    pub fn state(&self, cell: Cell) -> Option<CellState> {
        self.index(cell).map(|i| self.cells[i])
    }

    /// Overwrite the state of `cell`. Returns false (and does nothing) when
    /// the cell lies outside the map.
    pub fn set_state(&mut self, cell: Cell, state: CellState) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.cells[i] = state;
                true
            }
            None => false,
        }
    }

    /// Whether a route may pass through `cell`. Only obstacles block; hazard
    /// cells stay walkable here and the planner's caller decides whether to
    /// exclude them.
    pub fn is_walkable(&self, cell: Cell) -> bool {
        matches!(
            self.state(cell),
            Some(CellState::Free | CellState::Person | CellState::Goods | CellState::Hazard)
        )
    }

    /// Whether `cell` is in bounds and holds nothing at all.
    pub fn is_free(&self, cell: Cell) -> bool {
        self.state(cell) == Some(CellState::Free)
    }

    /// In-bounds, walkable 4-connected neighbours of `cell`.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        cell.neighbors4()
            .into_iter()
            .filter(move |n| self.is_walkable(*n))
    }

    /// Top-left pixel of `cell`.
    pub fn cell_to_pixel(&self, cell: Cell) -> IVec2 {
        IVec2::new(cell.x * self.tile_size, cell.y * self.tile_size)
    }

    /// Pixel center of `cell`.
    pub fn cell_center(&self, cell: Cell) -> Vec2 {
        let half = self.tile_size as f32 / 2.0;
        self.cell_to_pixel(cell).as_vec2() + Vec2::splat(half)
    }

    /// Cell containing the integer pixel `pixel`.
    pub fn pixel_to_cell(&self, pixel: IVec2) -> Cell {
        Cell::new(
            pixel.x.div_euclid(self.tile_size),
            pixel.y.div_euclid(self.tile_size),
        )
    }

    /// Cell containing a fractional pixel position.
    pub fn point_to_cell(&self, point: Vec2) -> Cell {
        self.pixel_to_cell(point.floor().as_ivec2())
    }

    /// Nearest in-bounds cell.
    pub fn clamp_cell(&self, cell: Cell) -> Cell {
        Cell::new(
            cell.x.clamp(0, self.width - 1),
            cell.y.clamp(0, self.height - 1),
        )
    }

    pub fn center_cell(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    /// Map size in pixels.
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(
            (self.width * self.tile_size) as f32,
            (self.height * self.tile_size) as f32,
        )
    }

    /// Every cell currently in `state`, row-major.
    pub fn cells_in_state(&self, state: CellState) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == state)
            .map(|(i, _)| Cell::new(i as i32 % self.width, i as i32 / self.width))
            .collect()
    }
}
