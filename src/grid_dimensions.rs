use num::Integer;
use smallvec::SmallVec;
use std::error::Error;
use std::fmt;

use crate::cells::{ComponentsSmallVec, Coordinate, CoordinateSmallVec};
use crate::units::{Axis, NodesCount};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum InvalidShapeError {
    /// A maze needs at least one dimension.
    Empty,
    NonPositiveExtent { axis: Axis },
    /// The number of cells does not fit in a `usize`.
    TooLarge,
}

impl fmt::Display for InvalidShapeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            InvalidShapeError::Empty => write!(f, "maze shape has no dimensions"),
            InvalidShapeError::NonPositiveExtent { axis } => {
                write!(f, "maze shape has a non-positive extent on axis {}", axis.0)
            }
            InvalidShapeError::TooLarge => write!(f, "maze shape has too many cells"),
        }
    }
}

impl Error for InvalidShapeError {}

/// Force every extent to be odd so that a one cell thick wall fits on the far boundary of each
/// axis. Even extents lose one cell.
pub fn normalize_shape(extents: &[usize]) -> Result<Vec<usize>, InvalidShapeError> {
    if extents.is_empty() {
        return Err(InvalidShapeError::Empty);
    }

    extents.iter()
        .enumerate()
        .map(|(axis, &extent)| {
            if extent == 0 {
                Err(InvalidShapeError::NonPositiveExtent { axis: Axis(axis) })
            } else if extent.is_even() {
                Ok(extent - 1)
            } else {
                Ok(extent)
            }
        })
        .collect()
}

/// The extents of an N-dimensional grid along with its row-major strides.
///
/// The last axis varies fastest when cells are laid out in memory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridShape {
    extents: ComponentsSmallVec,
    strides: ComponentsSmallVec,
    size: usize,
}

impl GridShape {
    /// Normalize `extents` (see `normalize_shape`) and build a shape from the result.
    pub fn normalized(extents: &[usize]) -> Result<GridShape, InvalidShapeError> {
        let odd_extents = normalize_shape(extents)?;
        GridShape::from_extents(&odd_extents)
    }

    /// Build a shape without normalizing. Used where even extents are wanted on purpose,
    /// e.g. a grid that has been given an extra border layer.
    pub(crate) fn from_extents(extents: &[usize]) -> Result<GridShape, InvalidShapeError> {
        if extents.is_empty() {
            return Err(InvalidShapeError::Empty);
        }
        if let Some(axis) = extents.iter().position(|&extent| extent == 0) {
            return Err(InvalidShapeError::NonPositiveExtent { axis: Axis(axis) });
        }

        let mut strides: ComponentsSmallVec = SmallVec::from_elem(0, extents.len());
        let mut size: usize = 1;
        for (axis, &extent) in extents.iter().enumerate().rev() {
            strides[axis] = size;
            size = size.checked_mul(extent).ok_or(InvalidShapeError::TooLarge)?;
        }

        Ok(GridShape {
            extents: extents.iter().cloned().collect(),
            strides: strides,
            size: size,
        })
    }

    #[inline]
    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    #[inline]
    pub fn extent(&self, axis: Axis) -> Option<usize> {
        self.extents.get(axis.0).cloned()
    }

    #[inline]
    pub(crate) fn stride(&self, axis: Axis) -> Option<usize> {
        self.strides.get(axis.0).cloned()
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.extents.len()
    }

    #[inline]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.size)
    }

    /// Is every component of the coordinate within its axis' extent?
    /// A coordinate of a different rank is never in bounds.
    pub fn in_bounds(&self, coord: &Coordinate) -> bool {
        coord.rank() == self.rank() &&
        coord.iter()
            .zip(self.extents.iter())
            .all(|(component, extent)| component < extent)
    }

    /// Convert a coordinate to its row-major index in the range 0..size.
    /// Returns None if the coordinate is not in bounds.
    pub fn coordinate_to_index(&self, coord: &Coordinate) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(coord.iter()
                .zip(self.strides.iter())
                .map(|(component, stride)| component * stride)
                .sum())
        } else {
            None
        }
    }

    pub fn index_to_coordinate(&self, index: usize) -> Option<Coordinate> {
        if index < self.size {
            Some(self.extents
                .iter()
                .zip(self.strides.iter())
                .map(|(extent, stride)| (index / stride) % extent)
                .collect())
        } else {
            None
        }
    }

    /// The fixed interior cell generation grows from.
    ///
    /// Flat index `1 + sum(product(extents[i..]) for i in 1..rank)` unravels to 1 on every axis,
    /// so it never sits on the zero row/column. An axis of extent 1 has no interior and gets 0.
    pub fn seed(&self) -> Coordinate {
        self.extents
            .iter()
            .map(|&extent| if extent > 1 { 1 } else { 0 })
            .collect()
    }

    /// In bounds coordinates exactly two cells away from `coord` along a single axis, ordered by
    /// axis then lower before upper.
    pub fn two_step_coordinates(&self, coord: &Coordinate) -> CoordinateSmallVec {
        let mut coords = CoordinateSmallVec::new();
        if !self.in_bounds(coord) {
            return coords;
        }

        for (axis, (&component, &extent)) in coord.iter().zip(self.extents.iter()).enumerate() {
            if component > 1 {
                coords.extend(coord.offset(Axis(axis), -2));
            }
            if component + 2 < extent {
                coords.extend(coord.offset(Axis(axis), 2));
            }
        }
        coords
    }
}
