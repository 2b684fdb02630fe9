use std::fmt;

use crate::cells::Coordinate;
use crate::projection::Plane;

const WALL: &str = "██";
const PASSAGE: &str = "  ";
const HIGHLIGHT: &str = "<>";
const SEPARATOR: &str = "│";
const PADDING: &str = "░░";

/// Text rendering of a row of planes, side by side with a separator column between them.
///
/// Each plane is drawn with its first axis running left to right and its second axis top to
/// bottom. Shorter planes are padded at the bottom. The highlighted cell, if any, is the
/// coordinate projected onto each plane's two axes.
#[derive(Debug)]
pub struct PlanesDisplay<'a> {
    planes: &'a [Plane],
    highlight: Option<&'a Coordinate>,
}

impl<'a> PlanesDisplay<'a> {
    pub fn new(planes: &'a [Plane], highlight: Option<&'a Coordinate>) -> PlanesDisplay<'a> {
        PlanesDisplay {
            planes: planes,
            highlight: highlight,
        }
    }

    fn is_highlighted(&self, plane: &Plane, x: usize, y: usize) -> bool {
        let axes = plane.axes();
        self.highlight.map_or(false, |coord| {
            coord.component(axes.first) == Some(x) && coord.component(axes.second) == Some(y)
        })
    }

    fn cell_glyph(&self, plane: &Plane, x: usize, y: usize) -> &'static str {
        if y >= plane.height().0 {
            PADDING
        } else if self.is_highlighted(plane, x, y) {
            HIGHLIGHT
        } else if plane.is_wall(x, y) {
            WALL
        } else {
            PASSAGE
        }
    }
}

impl<'a> fmt::Display for PlanesDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rows = self.planes.iter().map(|p| p.height().0).max().unwrap_or(0);

        for y in 0..rows {
            write!(f, "{}", SEPARATOR)?;
            for plane in self.planes {
                for x in 0..plane.width().0 {
                    write!(f, "{}", self.cell_glyph(plane, x, y))?;
                }
                write!(f, "{}", SEPARATOR)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
