use smallvec::SmallVec;
use std::fmt;
use std::iter::FromIterator;
use std::ops::Deref;

use crate::units::Axis;

/// Most mazes people want to look at have at most four dimensions, so the components stay inline.
pub type ComponentsSmallVec = SmallVec<[usize; 4]>;

/// Coordinates reachable from a single cell: two per axis at most.
pub type CoordinateSmallVec = SmallVec<[Coordinate; 8]>;

/// A position in an N-dimensional grid, one component per axis.
///
/// A coordinate knows nothing about the extents of the grid it is used with, see
/// `GridShape::in_bounds` for that.
#[derive(Hash, Eq, PartialEq, Clone, Debug, Ord, PartialOrd)]
pub struct Coordinate(ComponentsSmallVec);

impl Coordinate {
    pub fn new(components: &[usize]) -> Coordinate {
        Coordinate(components.iter().cloned().collect())
    }

    /// The coordinate with every component zero.
    pub fn origin(rank: usize) -> Coordinate {
        Coordinate(SmallVec::from_elem(0, rank))
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn component(&self, axis: Axis) -> Option<usize> {
        self.0.get(axis.0).cloned()
    }

    /// Creates a new `Coordinate` moved `delta` cells along `axis`.
    /// Returns None if the axis does not exist or the move would go below zero.
    pub fn offset(&self, axis: Axis, delta: isize) -> Option<Coordinate> {
        let current = self.component(axis)?;
        let moved = if delta < 0 {
            current.checked_sub(delta.unsigned_abs())?
        } else {
            current.checked_add(delta as usize)?
        };

        let mut components = self.0.clone();
        components[axis.0] = moved;
        Some(Coordinate(components))
    }

    /// The cell halfway between two coordinates that are exactly two steps apart along a
    /// single axis and identical on every other axis.
    pub fn midpoint(&self, other: &Coordinate) -> Option<Coordinate> {
        if self.rank() != other.rank() {
            return None;
        }

        let mut differing = self.0
            .iter()
            .zip(other.0.iter())
            .enumerate()
            .filter(|&(_, (a, b))| a != b);

        match (differing.next(), differing.next()) {
            (Some((axis, (&a, &b))), None) if a.max(b) - a.min(b) == 2 => {
                let mut components = self.0.clone();
                components[axis] = (a + b) / 2;
                Some(Coordinate(components))
            }
            _ => None,
        }
    }
}

impl Deref for Coordinate {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl FromIterator<usize> for Coordinate {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Coordinate {
        Coordinate(iter.into_iter().collect())
    }
}

impl From<Vec<usize>> for Coordinate {
    fn from(components: Vec<usize>) -> Coordinate {
        Coordinate(components.into_iter().collect())
    }
}

impl<'a> From<&'a [usize]> for Coordinate {
    fn from(components: &'a [usize]) -> Coordinate {
        Coordinate::new(components)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        for (i, component) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", component)?;
        }
        write!(f, ")")
    }
}
