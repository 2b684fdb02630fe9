use std::fmt;

use crate::cells::Coordinate;
use crate::grid_dimensions::GridShape;

/// Visits every coordinate of a shape in row-major order, last axis fastest.
#[derive(Clone)]
pub struct CellIter<'a> {
    shape: &'a GridShape,
    current_cell_number: usize,
    cells_count: usize,
}

impl<'a> CellIter<'a> {
    pub fn new(shape: &'a GridShape) -> CellIter<'a> {
        CellIter {
            shape: shape,
            current_cell_number: 0,
            cells_count: shape.size().0,
        }
    }
}

impl<'a> fmt::Debug for CellIter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl<'a> ExactSizeIterator for CellIter<'a> {} // default impl using size_hint()
impl<'a> Iterator for CellIter<'a> {
    type Item = Coordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = self.shape.index_to_coordinate(self.current_cell_number);
            self.current_cell_number += 1;
            coord
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}
