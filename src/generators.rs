use log::{debug, trace, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cells::Coordinate;
use crate::grid::MazeGrid;
use crate::grid_dimensions::{GridShape, InvalidShapeError};
use crate::utils::{self, FnvHashMap};

/// Generate a perfect maze on a grid of the given shape with randomized Prim's algorithm.
///
/// The shape is normalized first, every extent ends up odd.
pub fn generate<R>(extents: &[usize], rng: &mut R) -> Result<MazeGrid, InvalidShapeError>
    where R: Rng + ?Sized
{
    generate_observed(extents, rng, |_, _| {})
}

/// As `generate`, calling `on_step` with the grid and the frontier cell just processed after
/// every growth step. Watching does not change the maze: `on_step` cannot touch the grid or
/// the random source.
pub fn generate_observed<R, F>(extents: &[usize],
                               rng: &mut R,
                               on_step: F)
                               -> Result<MazeGrid, InvalidShapeError>
    where R: Rng + ?Sized,
          F: FnMut(&MazeGrid, &Coordinate)
{
    let shape = GridShape::normalized(extents)?;
    let mut grid = MazeGrid::new(shape);
    prims(&mut grid, rng, on_step);
    Ok(grid)
}

/// Randomized Prim's algorithm generalised to any number of dimensions.
///
/// Passages live on the cells with odd components (bar degenerate axes), walls in between.
/// Starting from the seed cell, repeatedly pull a random wall off the frontier, join it to a
/// random passage two steps away by carving the cell between them, then queue up the walls two
/// steps away from it. Each step attaches exactly one new cell to the tree so no loops appear.
fn prims<R, F>(grid: &mut MazeGrid, rng: &mut R, mut on_step: F)
    where R: Rng + ?Sized,
          F: FnMut(&MazeGrid, &Coordinate)
{
    let seed = grid.shape().seed();
    debug!("Growing maze with extents {:?} from seed {}", grid.shape().extents(), seed);
    grid.carve(&seed);

    let mut frontier = FrontierSet::with_capacity(grid.size() / 2);
    for cell in grid.frontier(&seed) {
        frontier.insert(cell);
    }

    let mut carve_count = 0;
    while let Some(frontier_cell) = frontier.remove_random(rng) {

        let neighbours = grid.neighbours(&frontier_cell);

        // A frontier cell was found from a passage and passages stay passages, so there is
        // always a neighbour. If not, the cell just stays a wall.
        let carved = match neighbours.choose(rng) {
            Some(neighbour) => {
                match grid.connect(&frontier_cell, neighbour) {
                    Ok(()) => true,
                    Err(e) => {
                        warn!("Could not connect {} to {}: {}", frontier_cell, neighbour, e);
                        false
                    }
                }
            }
            None => false,
        };

        if carved {
            carve_count += 1;
            trace!("Carved {}", frontier_cell);
            for cell in grid.frontier(&frontier_cell) {
                frontier.insert(cell);
            }
        }

        on_step(grid, &frontier_cell);
    }

    debug!("Maze finished with {} passages after {} carves", grid.passage_count(), carve_count);
}

/// Frontier cells waiting to be joined to the maze.
///
/// Inserting a cell that is already waiting is a no-op, and any waiting cell can be pulled out
/// uniformly at random in constant time.
#[derive(Debug)]
struct FrontierSet {
    cells: Vec<Coordinate>,
    positions: FnvHashMap<Coordinate, usize>,
}

impl FrontierSet {
    fn with_capacity(capacity: usize) -> FrontierSet {
        FrontierSet {
            cells: Vec::with_capacity(capacity),
            positions: utils::fnv_hashmap(capacity),
        }
    }

    /// Returns true if the cell was not already waiting.
    fn insert(&mut self, cell: Coordinate) -> bool {
        if self.positions.contains_key(&cell) {
            return false;
        }
        self.positions.insert(cell.clone(), self.cells.len());
        self.cells.push(cell);
        true
    }

    fn remove_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Coordinate> {
        if self.cells.is_empty() {
            return None;
        }

        let index = rng.gen_range(0..self.cells.len());
        let cell = self.cells.swap_remove(index);
        self.positions.remove(&cell);

        // The last cell moved into the hole.
        if let Some(moved) = self.cells.get(index) {
            self.positions.insert(moved.clone(), index);
        }
        Some(cell)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{quickcheck, TestResult};
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn seeded(seed: u64) -> XorShiftRng {
        XorShiftRng::seed_from_u64(seed)
    }

    fn maze(extents: &[usize], seed: u64) -> MazeGrid {
        generate(extents, &mut seeded(seed)).expect("valid shape")
    }

    #[test]
    fn create_2d_maze() {
        assert_eq!(maze(&[60, 40], 1).shape().extents(), &[59, 39]);
    }

    #[test]
    fn create_3d_maze() {
        assert_eq!(maze(&[10, 10, 10], 1).shape().extents(), &[9, 9, 9]);
    }

    #[test]
    fn create_4d_maze() {
        assert_eq!(maze(&[10, 10, 10, 20], 1).shape().extents(), &[9, 9, 9, 19]);
    }

    #[test]
    fn odd_shape_kept() {
        assert_eq!(maze(&[11, 11], 1).shape().extents(), &[11, 11]);
    }

    #[test]
    fn invalid_shapes_are_rejected() {
        let mut rng = seeded(1);
        assert_eq!(generate(&[], &mut rng), Err(InvalidShapeError::Empty));
        assert_eq!(generate(&[9, 0], &mut rng),
                   Err(InvalidShapeError::NonPositiveExtent { axis: crate::units::Axis(1) }));
    }

    #[test]
    fn mazes_are_perfect() {
        let shapes: [&[usize]; 5] = [&[11, 11], &[9, 9, 9], &[7, 5, 7, 5], &[21, 3], &[3]];
        for (seed, extents) in shapes.iter().enumerate() {
            let g = maze(extents, seed as u64);
            assert!(g.is_perfect(), "imperfect maze for {:?}", extents);
        }
    }

    #[test]
    fn every_odd_cell_is_carved() {
        let g = maze(&[9, 7, 5], 3);
        for coord in g.iter() {
            let all_odd = coord.iter().all(|c| c % 2 == 1);
            if all_odd {
                assert!(g.is_passage(&coord), "{} left as wall", coord);
            }
            // cells with two or more even components are never carved
            if coord.iter().filter(|&&c| c % 2 == 0).count() >= 2 {
                assert!(g.is_wall(&coord), "{} carved", coord);
            }
        }
        // rooms: 4 * 3 * 2, corridors between them: one fewer
        assert_eq!(g.passage_count(), 2 * 4 * 3 * 2 - 1);
    }

    #[test]
    fn far_boundary_stays_wall() {
        let g = maze(&[9, 9], 5);
        for i in 0..9 {
            for edge in &[0, 8] {
                assert!(g.is_wall(&Coordinate::new(&[i, *edge])));
                assert!(g.is_wall(&Coordinate::new(&[*edge, i])));
            }
        }
    }

    #[test]
    fn degenerate_shapes() {
        let single = maze(&[1], 1);
        assert_eq!(single.passage_count(), 1);
        assert!(single.is_perfect());

        let flat = maze(&[1, 1, 1], 1);
        assert_eq!(flat.passage_count(), 1);

        // a straight corridor along the second axis
        let corridor = maze(&[2, 9], 1);
        assert_eq!(corridor.shape().extents(), &[1, 9]);
        assert_eq!(corridor.passage_count(), 7);
        assert!(corridor.is_perfect());

        let tiny = maze(&[3, 3], 1);
        assert_eq!(tiny.passage_count(), 1);
        assert!(tiny.is_passage(&Coordinate::new(&[1, 1])));
    }

    #[test]
    fn same_seed_same_maze() {
        assert_eq!(maze(&[15, 15, 5], 42), maze(&[15, 15, 5], 42));
    }

    #[test]
    fn different_seeds_different_mazes() {
        let a = maze(&[31, 31], 1);
        let b = maze(&[31, 31], 2);
        assert_eq!(a.shape(), b.shape());
        assert_eq!(a.passage_count(), b.passage_count());
        assert!(a.is_perfect() && b.is_perfect());
        assert!(a != b);
    }

    #[test]
    fn observing_does_not_change_the_maze() {
        let unobserved = maze(&[13, 9, 5], 7);

        let mut steps = 0;
        let mut all_carved = true;
        let observed = generate_observed(&[13, 9, 5], &mut seeded(7), |grid, cell| {
                steps += 1;
                all_carved &= grid.is_passage(cell);
            })
            .expect("valid shape");

        assert_eq!(observed, unobserved);
        assert!(all_carved);
        // one step per cell joined onto the seed
        assert_eq!(steps, (observed.passage_count() - 1) / 2);
    }

    #[test]
    fn observer_sees_growing_maze() {
        let mut counts = vec![];
        let _ = generate_observed(&[9, 9], &mut seeded(11), |grid, _| {
            counts.push(grid.passage_count());
        });
        assert_eq!(counts.len(), 15);
        assert_eq!(counts[0], 3);
        assert!(counts.windows(2).all(|w| w[1] == w[0] + 2));
    }

    #[test]
    fn quickcheck_mazes_are_perfect() {
        fn p(extents: Vec<u8>, seed: u64) -> TestResult {
            if extents.is_empty() || extents.len() > 4 {
                return TestResult::discard();
            }
            let extents: Vec<usize> = extents.into_iter().map(|e| 1 + (e % 12) as usize).collect();
            let g = generate(&extents, &mut seeded(seed)).expect("positive extents");
            TestResult::from_bool(g.shape().extents().iter().all(|e| e % 2 == 1) && g.is_perfect())
        }
        quickcheck(p as fn(Vec<u8>, u64) -> TestResult);
    }

    #[test]
    fn frontier_set_ignores_duplicates() {
        let mut set = FrontierSet::with_capacity(4);
        assert!(set.insert(Coordinate::new(&[1, 3])));
        assert!(set.insert(Coordinate::new(&[3, 1])));
        assert!(!set.insert(Coordinate::new(&[1, 3])));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn frontier_set_drains_each_cell_once() {
        let mut set = FrontierSet::with_capacity(16);
        for x in 0..16 {
            set.insert(Coordinate::new(&[x]));
        }
        let mut rng = seeded(3);
        let mut drained = vec![];
        while let Some(cell) = set.remove_random(&mut rng) {
            // removed cells can be found again, remaining ones keep their slots
            for remaining in &set.cells {
                assert_eq!(set.cells[set.positions[remaining]], *remaining);
            }
            drained.push(cell[0]);
        }
        drained.sort();
        assert_eq!(drained, (0..16).collect::<Vec<usize>>());
        assert!(set.remove_random(&mut rng).is_none());
    }
}
