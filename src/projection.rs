//! Reduce an N-dimensional maze to 2D planes for display.
//!
//! A plane keeps two axes free and fixes every other axis to the matching component of a
//! reference cell, usually the cell most recently carved.

use bit_set::BitSet;

use crate::cells::Coordinate;
use crate::grid::MazeGrid;
use crate::units::{Axis, Height, Width};

/// The two free axes of a plane. `first` runs across the plane, `second` down it.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct AxisPair {
    pub first: Axis,
    pub second: Axis,
}

impl AxisPair {
    pub fn new(first: usize, second: usize) -> AxisPair {
        AxisPair {
            first: Axis(first),
            second: Axis(second),
        }
    }
}

/// Pairs of adjacent axes covering a grid of the given rank: `(0, 1), (1, 2), ... (rank-2, rank-1)`.
///
/// The pair back from the last axis to axis 0 is left out, and a one dimensional grid has no planes.
pub fn plane_indices(rank: usize) -> Vec<AxisPair> {
    (0..rank.saturating_sub(1))
        .map(|axis| AxisPair::new(axis, (axis + 1) % rank))
        .collect()
}

/// A 2D cross-section of a maze grid. `true` is wall, as in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    axes: AxisPair,
    width: usize,
    height: usize,
    walls: BitSet,
}

impl Plane {
    #[inline]
    pub fn axes(&self) -> AxisPair {
        self.axes
    }

    /// Cells along the first axis.
    #[inline]
    pub fn width(&self) -> Width {
        Width(self.width)
    }

    /// Cells along the second axis.
    #[inline]
    pub fn height(&self) -> Height {
        Height(self.height)
    }

    /// Is the cell `x` along the first axis and `y` along the second a wall?
    /// Anything outside the plane counts as wall.
    #[inline]
    pub fn is_wall(&self, x: usize, y: usize) -> bool {
        if x < self.width && y < self.height {
            self.walls.contains(y * self.width + x)
        } else {
            true
        }
    }

    /// Wall flags row by row, one row per step along the second axis.
    pub fn rows(&self) -> Vec<Vec<bool>> {
        (0..self.height)
            .map(|y| (0..self.width).map(|x| self.is_wall(x, y)).collect())
            .collect()
    }
}

/// Cut the plane through `reference` spanned by `axes`.
///
/// Returns None if `reference` is not a cell of the grid or the axes are not two distinct axes
/// of the grid.
pub fn slice(grid: &MazeGrid, axes: AxisPair, reference: &Coordinate) -> Option<Plane> {
    let shape = grid.shape();
    if !shape.in_bounds(reference) || axes.first == axes.second {
        return None;
    }
    let width = shape.extent(axes.first)?;
    let height = shape.extent(axes.second)?;
    let x_stride = shape.stride(axes.first)?;
    let y_stride = shape.stride(axes.second)?;

    // Fix the other axes from the highest down. Working on flat offsets means the free axes keep
    // their own indices whichever axes are removed first.
    let mut base = 0;
    for axis in (0..shape.rank()).rev() {
        let axis = Axis(axis);
        if axis != axes.first && axis != axes.second {
            base += reference.component(axis)? * shape.stride(axis)?;
        }
    }

    let mut walls = BitSet::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            if grid.is_wall_at_index(base + x * x_stride + y * y_stride) {
                walls.insert(y * width + x);
            }
        }
    }

    Some(Plane {
        axes: axes,
        width: width,
        height: height,
        walls: walls,
    })
}

/// One plane per entry of `plane_indices`, all passing through `reference`.
pub fn slice_planes(grid: &MazeGrid, reference: &Coordinate) -> Option<Vec<Plane>> {
    plane_indices(grid.rank())
        .into_iter()
        .map(|axes| slice(grid, axes, reference))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators;
    use crate::grid_dimensions::GridShape;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn maze(extents: &[usize]) -> MazeGrid {
        generators::generate(extents, &mut XorShiftRng::seed_from_u64(9)).expect("valid shape")
    }

    fn gc(components: &[usize]) -> Coordinate {
        Coordinate::new(components)
    }

    #[test]
    fn plane_indices_by_rank() {
        assert!(plane_indices(1).is_empty());
        assert_eq!(plane_indices(2), vec![AxisPair::new(0, 1)]);
        assert_eq!(plane_indices(3), vec![AxisPair::new(0, 1), AxisPair::new(1, 2)]);
        assert_eq!(plane_indices(4).len(), 3);
        assert_eq!(plane_indices(4)[2], AxisPair::new(2, 3));
    }

    #[test]
    fn slicing_2d_grid_is_identity() {
        let g = maze(&[11, 7]);
        let plane = slice(&g, AxisPair::new(0, 1), &g.shape().seed()).expect("valid slice");
        assert_eq!(plane.width(), Width(11));
        assert_eq!(plane.height(), Height(7));
        for coord in g.iter() {
            assert_eq!(plane.is_wall(coord[0], coord[1]), g.is_wall(&coord));
        }
    }

    #[test]
    fn slice_fixes_the_other_axes() {
        let g = maze(&[7, 5, 9]);
        let reference = gc(&[3, 1, 5]);

        let front = slice(&g, AxisPair::new(0, 1), &reference).expect("valid slice");
        assert_eq!((front.width(), front.height()), (Width(7), Height(5)));
        for x in 0..7 {
            for y in 0..5 {
                assert_eq!(front.is_wall(x, y), g.is_wall(&gc(&[x, y, 5])));
            }
        }

        let side = slice(&g, AxisPair::new(1, 2), &reference).expect("valid slice");
        assert_eq!((side.width(), side.height()), (Width(5), Height(9)));
        for x in 0..5 {
            for y in 0..9 {
                assert_eq!(side.is_wall(x, y), g.is_wall(&gc(&[3, x, y])));
            }
        }
    }

    #[test]
    fn wrapped_pair_swaps_orientation() {
        let g = maze(&[7, 5, 9]);
        let reference = gc(&[1, 3, 1]);
        let plane = slice(&g, AxisPair::new(2, 0), &reference).expect("valid slice");
        assert_eq!((plane.width(), plane.height()), (Width(9), Height(7)));
        for x in 0..9 {
            for y in 0..7 {
                assert_eq!(plane.is_wall(x, y), g.is_wall(&gc(&[y, 3, x])));
            }
        }

        let forward = slice(&g, AxisPair::new(0, 2), &reference).expect("valid slice");
        assert_eq!(forward.rows().len(), 9);
        assert_eq!(forward.is_wall(4, 6), plane.is_wall(6, 4));
    }

    #[test]
    fn slicing_a_4d_maze() {
        let g = maze(&[5, 7, 5, 3]);
        let reference = gc(&[1, 5, 3, 1]);
        let planes = slice_planes(&g, &reference).expect("valid reference");
        assert_eq!(planes.len(), 3);
        assert_eq!(planes[2].axes(), AxisPair::new(2, 3));
        for x in 0..5 {
            for y in 0..3 {
                assert_eq!(planes[2].is_wall(x, y), g.is_wall(&gc(&[1, 5, x, y])));
            }
        }
        // the reference cell is carved so it shows up as passage on every plane
        assert!(!planes[0].is_wall(1, 5));
        assert!(!planes[1].is_wall(5, 3));
        assert!(!planes[2].is_wall(3, 1));
    }

    #[test]
    fn slicing_does_not_touch_the_grid() {
        let g = maze(&[9, 9, 9]);
        let before = g.clone();
        let _ = slice_planes(&g, &gc(&[1, 1, 1]));
        assert_eq!(g, before);
    }

    #[test]
    fn slicing_part_carved_grid() {
        let mut g = MazeGrid::new(GridShape::normalized(&[5, 5]).unwrap());
        g.carve(&gc(&[1, 1]));
        let plane = slice(&g, AxisPair::new(0, 1), &gc(&[0, 0])).expect("valid slice");
        assert_eq!(plane.rows()[1], vec![true, false, true, true, true]);
    }

    #[test]
    fn invalid_slices() {
        let g = maze(&[5, 5, 5]);
        assert_eq!(slice(&g, AxisPair::new(0, 1), &gc(&[1, 1, 5])), None);
        assert_eq!(slice(&g, AxisPair::new(0, 1), &gc(&[1, 1])), None);
        assert_eq!(slice(&g, AxisPair::new(1, 1), &gc(&[1, 1, 1])), None);
        assert_eq!(slice(&g, AxisPair::new(0, 3), &gc(&[1, 1, 1])), None);
        assert_eq!(slice_planes(&g, &gc(&[9, 9, 9])), None);
    }

    #[test]
    fn out_of_plane_is_wall() {
        let g = maze(&[5, 5]);
        let plane = slice(&g, AxisPair::new(0, 1), &gc(&[1, 1])).expect("valid slice");
        assert!(plane.is_wall(5, 0));
        assert!(plane.is_wall(0, 5));
    }
}
