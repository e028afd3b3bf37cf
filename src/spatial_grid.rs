use crate::bounds::Bounds;
use crate::vec2::Vec2;

/// Fixed-size 2D array mapping world coordinates to (row, column) cells.
/// Backs both the world collision grid and each agent's private known map.
#[derive(Clone)]
pub struct SpatialIndexGrid<T> {
    rows: usize,
    cols: usize,
    cell_width: f32,
    cell_height: f32,
    cells: Vec<T>,
}

impl<T: Clone + Default> SpatialIndexGrid<T> {
    pub fn new(rows: usize, cols: usize, cell_width: f32, cell_height: f32) -> Self {
        SpatialIndexGrid {
            rows,
            cols,
            cell_width,
            cell_height,
            cells: vec![T::default(); rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_width(&self) -> f32 {
        self.cell_width
    }

    pub fn cell_height(&self) -> f32 {
        self.cell_height
    }

    /// Map a world-space point to (row, column) by truncation.
    /// The result may be out of range; callers needing safety use
    /// `validate` or `index_validated`.
    pub fn index(&self, point: Vec2) -> (i32, i32) {
        let row = (point.y / self.cell_height) as i32;
        let col = (point.x / self.cell_width) as i32;
        (row, col)
    }

    /// Clamp an out-of-range (row, column) to the nearest legal cell
    pub fn validate(&self, row: i32, col: i32) -> (usize, usize) {
        let row = row.clamp(0, self.rows as i32 - 1) as usize;
        let col = col.clamp(0, self.cols as i32 - 1) as usize;
        (row, col)
    }

    pub fn index_validated(&self, point: Vec2) -> (usize, usize) {
        let (row, col) = self.index(point);
        self.validate(row, col)
    }

    pub fn is_valid(&self, row: i32, col: i32) -> bool {
        row >= 0 && (row as usize) < self.rows && col >= 0 && (col as usize) < self.cols
    }

    /// Direct cell access. Caller must guard row/column with `is_valid`
    /// or route through the validated accessors.
    pub fn cell(&self, row: usize, col: usize) -> &T {
        &self.cells[row * self.cols + col]
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.cells[row * self.cols + col]
    }

    /// Reset every cell to its default value in one pass
    pub fn clear_all_cells(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = T::default();
        }
    }

    /// World-space bounds of one cell
    pub fn cell_bounds(&self, row: usize, col: usize) -> Bounds {
        let min_x = col as f32 * self.cell_width;
        let min_y = row as f32 * self.cell_height;
        Bounds::from_coords(min_x, min_y, min_x + self.cell_width, min_y + self.cell_height)
    }

    /// World-space center of one cell
    pub fn cell_center(&self, row: usize, col: usize) -> Vec2 {
        Vec2::new(
            col as f32 * self.cell_width + self.cell_width * 0.5,
            row as f32 * self.cell_height + self.cell_height * 0.5,
        )
    }

    /// Clamped inclusive (row, column) ranges of cells overlapping an area.
    /// Shared by the collision broad phase and the known-map region reset.
    pub fn range_for_bounds(&self, bounds: &Bounds) -> ((usize, usize), (usize, usize)) {
        let (min_row, min_col) = self.index(bounds.mins);
        let (max_row, max_col) = self.index(bounds.maxs);
        let (min_row, min_col) = self.validate(min_row, min_col);
        let (max_row, max_col) = self.validate(max_row, max_col);
        ((min_row, max_row), (min_col, max_col))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }
}
