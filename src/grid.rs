use bit_set::BitSet;
use petgraph::algo::{connected_components, is_cyclic_undirected};
use petgraph::graph::{NodeIndex, UnGraph};
use std::error::Error;
use std::fmt;

use crate::cells::{Coordinate, CoordinateSmallVec};
use crate::grid_dimensions::{GridShape, InvalidShapeError};
use crate::grid_iterators::CellIter;
use crate::units::{Axis, EdgesCount, NodesCount};
use crate::utils;

/// An N-dimensional boolean grid of walls and passages.
///
/// Every cell starts out as a wall. Only the generators in this crate carve passages, everyone
/// else gets read access.
#[derive(Clone, PartialEq, Eq)]
pub struct MazeGrid {
    shape: GridShape,
    walls: BitSet,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum ConnectError {
    InvalidGridCoordinate,
    NotTwoStepNeighbours,
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConnectError::InvalidGridCoordinate => write!(f, "coordinate is outside the grid"),
            ConnectError::NotTwoStepNeighbours => {
                write!(f, "cells are not two steps apart along a single axis")
            }
        }
    }
}

impl Error for ConnectError {}

impl fmt::Debug for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MazeGrid :: extents: {:?}, passages: {:?}",
               self.shape.extents(), self.passage_count())
    }
}

impl MazeGrid {
    /// Allocate a grid of the given shape with every cell a wall.
    pub fn new(shape: GridShape) -> MazeGrid {
        let size = shape.size().0;
        let mut walls = BitSet::with_capacity(size);
        for index in 0..size {
            walls.insert(index);
        }

        MazeGrid {
            shape: shape,
            walls: walls,
        }
    }

    #[inline]
    pub fn shape(&self) -> &GridShape {
        &self.shape
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.shape.size().0
    }

    /// Is the cell a wall? Anything outside the grid counts as wall.
    #[inline]
    pub fn is_wall(&self, coord: &Coordinate) -> bool {
        self.shape
            .coordinate_to_index(coord)
            .map_or(true, |index| self.walls.contains(index))
    }

    #[inline]
    pub fn is_passage(&self, coord: &Coordinate) -> bool {
        !self.is_wall(coord)
    }

    #[inline]
    pub(crate) fn is_wall_at_index(&self, index: usize) -> bool {
        self.walls.contains(index)
    }

    pub fn passage_count(&self) -> usize {
        self.size() - self.walls.len()
    }

    /// Walls exactly two cells away from `coord` along a single axis.
    pub fn frontier(&self, coord: &Coordinate) -> CoordinateSmallVec {
        self.shape
            .two_step_coordinates(coord)
            .into_iter()
            .filter(|c| self.is_wall(c))
            .collect()
    }

    /// Passages exactly two cells away from `coord` along a single axis.
    pub fn neighbours(&self, coord: &Coordinate) -> CoordinateSmallVec {
        self.shape
            .two_step_coordinates(coord)
            .into_iter()
            .filter(|c| self.is_passage(c))
            .collect()
    }

    /// Turn a cell into a passage. Returns false if the coordinate is outside the grid.
    pub(crate) fn carve(&mut self, coord: &Coordinate) -> bool {
        match self.shape.coordinate_to_index(coord) {
            Some(index) => {
                self.walls.remove(index);
                true
            }
            None => false,
        }
    }

    /// Join `frontier_cell` onto the maze through `neighbour`: the cell between them and the
    /// frontier cell itself both become passages.
    pub(crate) fn connect(&mut self,
                          frontier_cell: &Coordinate,
                          neighbour: &Coordinate)
                          -> Result<(), ConnectError> {
        if !self.shape.in_bounds(frontier_cell) || !self.shape.in_bounds(neighbour) {
            return Err(ConnectError::InvalidGridCoordinate);
        }
        let between = frontier_cell.midpoint(neighbour)
            .ok_or(ConnectError::NotTwoStepNeighbours)?;

        self.carve(&between);
        self.carve(frontier_cell);
        Ok(())
    }

    /// A copy of the grid padded with one more layer of wall on the far side of every axis, so
    /// the maze is enclosed even where an extent was not odd. Existing cells keep their
    /// coordinates.
    pub fn with_border(&self) -> Result<MazeGrid, InvalidShapeError> {
        let padded_extents: Vec<usize> = self.shape.extents().iter().map(|e| e + 1).collect();
        let mut bordered = MazeGrid::new(GridShape::from_extents(&padded_extents)?);
        for coord in self.iter_passages() {
            bordered.carve(&coord);
        }
        Ok(bordered)
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(&self.shape)
    }

    pub fn iter_passages<'a>(&'a self) -> impl Iterator<Item = Coordinate> + 'a {
        (0..self.size())
            .filter(move |&index| !self.walls.contains(index))
            .filter_map(move |index| self.shape.index_to_coordinate(index))
    }

    /// Passage cells as graph nodes, with an edge between every pair of passages one step
    /// apart along an axis.
    pub fn passage_graph(&self) -> UnGraph<Coordinate, ()> {
        let passages = self.passage_count();
        let mut graph = UnGraph::with_capacity(passages, passages);
        let mut node_indices = utils::fnv_hashmap::<Coordinate, NodeIndex>(passages);

        for coord in self.iter_passages() {
            let node = graph.add_node(coord.clone());
            node_indices.insert(coord, node);
        }

        for (coord, &node) in &node_indices {
            for axis in 0..self.rank() {
                let next = match coord.offset(Axis(axis), 1) {
                    Some(next) => next,
                    None => continue,
                };
                if let Some(&next_node) = node_indices.get(&next) {
                    graph.add_edge(node, next_node, ());
                }
            }
        }
        graph
    }

    pub fn passage_graph_size(&self) -> (NodesCount, EdgesCount) {
        let graph = self.passage_graph();
        (NodesCount(graph.node_count()), EdgesCount(graph.edge_count()))
    }

    /// A perfect maze is a spanning tree: one connected piece with no loops.
    pub fn is_perfect(&self) -> bool {
        let graph = self.passage_graph();
        graph.node_count() > 0 &&
        graph.edge_count() == graph.node_count() - 1 &&
        connected_components(&graph) == 1 &&
        !is_cyclic_undirected(&graph)
    }
}
