use crate::bounds::Bounds;
use crate::grid_cell::GridCell;
use crate::spatial_grid::SpatialIndexGrid;
use crate::vec2::Vec2;

/// The world collaborator: tile map with per-cell collision grid.
/// Cell values are free or solid; the movement layer only consumes the
/// traversability predicate and the cell dimensions.
#[derive(Clone)]
pub struct GameMap {
    grid: SpatialIndexGrid<GridCell>,
}

impl GameMap {
    /// Create a map with all cells free
    pub fn new(rows: usize, cols: usize, cell_width: f32, cell_height: f32) -> Self {
        let mut grid: SpatialIndexGrid<GridCell> =
            SpatialIndexGrid::new(rows, cols, cell_width, cell_height);
        for row in 0..rows {
            for col in 0..cols {
                let bounds = grid.cell_bounds(row, col);
                grid.cell_mut(row, col).bounds = bounds;
            }
        }
        GameMap { grid }
    }

    /// Create a map with specific solid cells, given as cell ids
    /// (id = col + row * cols)
    pub fn with_blocked(
        rows: usize,
        cols: usize,
        cell_width: f32,
        cell_height: f32,
        blocked: &[usize],
    ) -> Self {
        let mut map = Self::new(rows, cols, cell_width, cell_height);
        for &cell_id in blocked {
            if cell_id < rows * cols {
                let row = cell_id / cols;
                let col = cell_id % cols;
                map.grid.cell_mut(row, col).solid = true;
            }
        }
        map
    }

    pub fn grid(&self) -> &SpatialIndexGrid<GridCell> {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut SpatialIndexGrid<GridCell> {
        &mut self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn cell_width(&self) -> f32 {
        self.grid.cell_width()
    }

    pub fn cell_height(&self) -> f32 {
        self.grid.cell_height()
    }

    /// World-space extent of the whole map
    pub fn world_bounds(&self) -> Bounds {
        Bounds::from_coords(
            0.0,
            0.0,
            self.cols() as f32 * self.cell_width(),
            self.rows() as f32 * self.cell_height(),
        )
    }

    pub fn is_solid(&self, row: usize, col: usize) -> bool {
        self.grid.cell(row, col).solid
    }

    /// World-validity predicate: in bounds and free of permanent collision
    pub fn is_point_traversable(&self, point: Vec2) -> bool {
        if !self.world_bounds().contains_point(point) {
            return false;
        }
        let (row, col) = self.grid.index_validated(point);
        !self.grid.cell(row, col).solid
    }

    /// Cell ids of all solid cells, in row-major order
    pub fn blocked_cell_ids(&self) -> Vec<usize> {
        let mut blocked = Vec::new();
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                if self.grid.cell(row, col).solid {
                    blocked.push(col + row * self.cols());
                }
            }
        }
        blocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_map_traversable() {
        let map = GameMap::new(10, 10, 20.0, 15.0);
        assert!(map.is_point_traversable(Vec2::new(100.0, 75.0)));
        assert!(map.is_point_traversable(Vec2::new(0.5, 0.5)));
    }

    #[test]
    fn test_out_of_bounds_not_traversable() {
        let map = GameMap::new(10, 10, 20.0, 15.0);
        assert!(!map.is_point_traversable(Vec2::new(-1.0, 5.0)));
        assert!(!map.is_point_traversable(Vec2::new(5.0, 151.0)));
    }

    #[test]
    fn test_blocked_cells_round_trip() {
        let map = GameMap::with_blocked(10, 10, 20.0, 15.0, &[0, 55, 99]);
        assert_eq!(map.blocked_cell_ids(), vec![0, 55, 99]);
        // cell 55 is row 5, col 5
        assert!(map.is_solid(5, 5));
        assert!(!map.is_point_traversable(Vec2::new(5.0 * 20.0 + 1.0, 5.0 * 15.0 + 1.0)));
    }

    #[test]
    fn test_cell_bounds_set_at_load() {
        let map = GameMap::new(4, 4, 10.0, 10.0);
        let cell = map.grid().cell(1, 2);
        assert_eq!(cell.bounds, Bounds::from_coords(20.0, 10.0, 30.0, 20.0));
    }
}
