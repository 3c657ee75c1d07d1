//! Grid world and obstacle generation
//!
//! The grid tracks static cell contents only; snake segments live on the
//! snake itself. Obstacles are generated once per episode from a small set
//! of pattern templates, never inside the safe zone around the starting
//! body.

use std::collections::HashSet;

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::Point;

/// Static contents of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Obstacle,
}

/// The play field: a wrapped 2D array of cells
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Wrap arbitrary coordinates onto the grid
    pub fn wrap(&self, x: i32, y: i32) -> Point {
        Point::new(x.rem_euclid(self.width), y.rem_euclid(self.height))
    }

    pub fn cell(&self, p: Point) -> Cell {
        self.cells[(p.y * self.width + p.x) as usize]
    }

    pub fn is_obstacle(&self, p: Point) -> bool {
        self.cell(p) == Cell::Obstacle
    }

    pub(crate) fn set_obstacle(&mut self, p: Point) {
        self.cells[(p.y * self.width + p.x) as usize] = Cell::Obstacle;
    }

    /// All obstacle cells (render snapshot)
    pub fn obstacle_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, c)| {
            (*c == Cell::Obstacle)
                .then(|| Point::new(i as i32 % self.width, i as i32 / self.width))
        })
    }
}

/// Attempts before giving up on placing a pattern anchor
const ANCHOR_RETRIES: u32 = 100;

/// Obstacle templates anchored at their top-left corner
const POLYOMINOES: [&[(i32, i32)]; 4] = [
    // C
    &[(0, 0), (1, 0), (2, 0), (0, 1), (0, 2), (1, 2), (2, 2)],
    // L
    &[(0, 0), (1, 0), (2, 0), (0, 1), (0, 2)],
    // T
    &[(0, 0), (1, 0), (2, 0), (1, 1), (1, 2)],
    // Z
    &[(0, 0), (1, 0), (1, 1), (1, 2), (2, 2)],
];

/// Generate `clusters` obstacle patterns, never touching the safe zone:
/// the starting body cells plus their wrapped 8-neighborhoods.
pub fn generate_obstacles(grid: &mut Grid, start_cells: &[Point], clusters: u32, rng: &mut Pcg32) {
    let mut safe = HashSet::new();
    for cell in start_cells {
        for dx in -1..=1 {
            for dy in -1..=1 {
                safe.insert(grid.wrap(cell.x + dx, cell.y + dy));
            }
        }
    }

    for _ in 0..clusters {
        generate_pattern(grid, &safe, rng);
    }
}

fn generate_pattern(grid: &mut Grid, safe: &HashSet<Point>, rng: &mut Pcg32) {
    match rng.random_range(0..3u32) {
        0 => {
            // Axis-aligned line of 3-8 cells; safe-zone cells are skipped,
            // not rejected wholesale
            let length = rng.random_range(3..=8);
            let (dx, dy) = if rng.random_bool(0.5) { (1, 0) } else { (0, 1) };
            let Some(anchor) = anchor_outside_safe_zone(grid, safe, rng) else {
                return;
            };
            for i in 0..length {
                let p = grid.wrap(anchor.x + dx * i, anchor.y + dy * i);
                if !safe.contains(&p) {
                    grid.set_obstacle(p);
                }
            }
        }
        1 => {
            // 3-5 cells scattered around a center
            let Some(center) = anchor_outside_safe_zone(grid, safe, rng) else {
                return;
            };
            let size = rng.random_range(3..=5);
            for _ in 0..size {
                let dx = rng.random_range(-1..=1);
                let dy = rng.random_range(-1..=1);
                let p = grid.wrap(center.x + dx, center.y + dy);
                if !safe.contains(&p) {
                    grid.set_obstacle(p);
                }
            }
        }
        _ => {
            // Fixed polyomino; the whole 3x3 footprint must clear the safe
            // zone before the shape is stamped
            let shape = POLYOMINOES[rng.random_range(0..POLYOMINOES.len())];
            for _ in 0..ANCHOR_RETRIES {
                let anchor = random_cell(grid, rng);
                let footprint_clear = (0..3).all(|dx| {
                    (0..3).all(|dy| !safe.contains(&grid.wrap(anchor.x + dx, anchor.y + dy)))
                });
                if footprint_clear {
                    for &(dx, dy) in shape {
                        let p = grid.wrap(anchor.x + dx, anchor.y + dy);
                        grid.set_obstacle(p);
                    }
                    return;
                }
            }
        }
    }
}

fn random_cell(grid: &Grid, rng: &mut Pcg32) -> Point {
    Point::new(
        rng.random_range(0..grid.width()),
        rng.random_range(0..grid.height()),
    )
}

fn anchor_outside_safe_zone(
    grid: &Grid,
    safe: &HashSet<Point>,
    rng: &mut Pcg32,
) -> Option<Point> {
    for _ in 0..ANCHOR_RETRIES {
        let p = random_cell(grid, rng);
        if !safe.contains(&p) {
            return Some(p);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_wrap_is_modular() {
        let grid = Grid::new(40, 30);
        assert_eq!(grid.wrap(-1, 0), Point::new(39, 0));
        assert_eq!(grid.wrap(40, 30), Point::new(0, 0));
        assert_eq!(grid.wrap(5, -2), Point::new(5, 28));
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(10, 10);
        assert_eq!(grid.obstacle_cells().count(), 0);
    }

    #[test]
    fn test_obstacles_avoid_safe_zone() {
        let start = [Point::new(20, 15), Point::new(19, 15), Point::new(18, 15)];
        for seed in 0..20 {
            let mut grid = Grid::new(40, 30);
            let mut rng = Pcg32::seed_from_u64(seed);
            generate_obstacles(&mut grid, &start, 8, &mut rng);

            for cell in &start {
                for dx in -1..=1 {
                    for dy in -1..=1 {
                        let p = grid.wrap(cell.x + dx, cell.y + dy);
                        assert!(!grid.is_obstacle(p), "obstacle in safe zone at {:?}", p);
                    }
                }
            }
        }
    }

    #[test]
    fn test_generation_produces_obstacles() {
        let start = [Point::new(20, 15)];
        let mut grid = Grid::new(40, 30);
        let mut rng = Pcg32::seed_from_u64(7);
        generate_obstacles(&mut grid, &start, 5, &mut rng);
        assert!(grid.obstacle_cells().count() >= 3);
    }

    #[test]
    fn test_polyomino_templates_fit_footprint() {
        for shape in POLYOMINOES {
            for &(dx, dy) in shape {
                assert!((0..3).contains(&dx) && (0..3).contains(&dy));
            }
        }
    }
}
