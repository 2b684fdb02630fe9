use image::imageops::{self, FilterType};
use image::{ImageFormat, ImageResult, Rgb, RgbImage};
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::cells::Coordinate;
use crate::projection::Plane;

const PADDING_COLOUR: Rgb<u8> = Rgb([128, 128, 128]);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Theme {
    Default,
    Christmas,
    Beachy,
    Woodsy,
    Kaboom,
}

/// Colours for each kind of pixel in a rendered maze. Several highlight colours are cycled
/// through from one animation frame to the next.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct Palette {
    pub wall: Rgb<u8>,
    pub passage: Rgb<u8>,
    pub highlights: &'static [Rgb<u8>],
    pub border: Rgb<u8>,
}

impl Palette {
    pub fn highlight(&self, step: usize) -> Rgb<u8> {
        self.highlights[step % self.highlights.len()]
    }
}

impl Theme {
    pub fn palette(self) -> Palette {
        match self {
            Theme::Default => Palette {
                wall: Rgb([40, 40, 40]),
                passage: Rgb([128, 128, 128]),
                highlights: &[Rgb([200, 50, 50])],
                border: Rgb([0, 0, 0]),
            },
            Theme::Christmas => Palette {
                wall: Rgb([19, 59, 26]),
                passage: Rgb([80, 145, 82]),
                highlights: &[Rgb([24, 24, 184]), Rgb([36, 211, 255]), Rgb([255, 61, 18]),
                              Rgb([48, 235, 19])],
                border: Rgb([8, 8, 102]),
            },
            Theme::Beachy => Palette {
                wall: Rgb([179, 149, 20]),
                passage: Rgb([252, 243, 220]),
                highlights: &[Rgb([166, 130, 245])],
                border: Rgb([215, 244, 250]),
            },
            Theme::Woodsy => Palette {
                wall: Rgb([55, 82, 66]),
                passage: Rgb([116, 184, 146]),
                highlights: &[Rgb([9, 99, 148])],
                border: Rgb([43, 52, 69]),
            },
            Theme::Kaboom => Palette {
                wall: Rgb([40, 40, 40]),
                passage: Rgb([128, 128, 128]),
                highlights: &[Rgb([43, 234, 255]), Rgb([2, 131, 230]), Rgb([2, 2, 230])],
                border: Rgb([0, 0, 0]),
            },
        }
    }
}

#[derive(Eq, PartialEq, Clone, Debug)]
pub struct UnknownThemeError(pub String);

impl fmt::Display for UnknownThemeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown theme '{}', expected one of default, christmas, beachy, woodsy, kaboom",
               self.0)
    }
}

impl Error for UnknownThemeError {}

impl FromStr for Theme {
    type Err = UnknownThemeError;

    fn from_str(name: &str) -> Result<Theme, UnknownThemeError> {
        match name.to_lowercase().as_str() {
            "" | "default" => Ok(Theme::Default),
            "christmas" => Ok(Theme::Christmas),
            "beachy" => Ok(Theme::Beachy),
            "woodsy" => Ok(Theme::Woodsy),
            "kaboom" => Ok(Theme::Kaboom),
            _ => Err(UnknownThemeError(name.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RenderOptions<'a> {
    theme: Theme,
    cell_pixels: u32,
    highlight: Option<&'a Coordinate>,
    expand_highlight: bool,
    step: usize,
}

#[derive(Clone, Debug)]
pub struct RenderOptionsBuilder<'a> {
    options: RenderOptions<'a>,
}

impl<'a> RenderOptionsBuilder<'a> {
    pub fn new() -> RenderOptionsBuilder<'a> {
        RenderOptionsBuilder {
            options: RenderOptions {
                theme: Theme::Default,
                cell_pixels: 16,
                highlight: None,
                expand_highlight: false,
                step: 0,
            },
        }
    }
    pub fn theme(mut self, theme: Theme) -> Self {
        self.options.theme = theme;
        self
    }
    /// Side length in pixels of one maze cell in the output image.
    pub fn cell_pixels(mut self, pixels: u32) -> Self {
        self.options.cell_pixels = pixels.max(1);
        self
    }
    pub fn highlight(mut self, coord: Option<&'a Coordinate>) -> Self {
        self.options.highlight = coord;
        self
    }
    /// Draw the highlight as a 3x3 block so it stands out while animating.
    pub fn expand_highlight(mut self, expand: bool) -> Self {
        self.options.expand_highlight = expand;
        self
    }
    /// Animation frame number, picks the highlight colour for multi-colour themes.
    pub fn step(mut self, step: usize) -> Self {
        self.options.step = step;
        self
    }
    pub fn build(self) -> RenderOptions<'a> {
        self.options
    }
}

impl<'a> Default for RenderOptionsBuilder<'a> {
    fn default() -> Self {
        RenderOptionsBuilder::new()
    }
}

/// Lay the planes out left to right, one border coloured column either side of each, planes
/// shorter than the tallest padded with grey underneath. Every cell becomes a square of
/// `cell_pixels` pixels.
pub fn render_planes(planes: &[Plane], options: &RenderOptions) -> RgbImage {
    let palette = options.theme.palette();

    let height = planes.iter().map(|p| p.height().0).max().unwrap_or(0);
    let width = 1 + planes.iter().map(|p| p.width().0 + 1).sum::<usize>();
    if height == 0 {
        return RgbImage::new(0, 0);
    }
    let mut montage = RgbImage::from_pixel(width as u32, height as u32, palette.border);

    let mut left = 1;
    for plane in planes {
        let (plane_width, plane_height) = (plane.width().0, plane.height().0);
        for x in 0..plane_width {
            for y in 0..height {
                let colour = if y >= plane_height {
                    PADDING_COLOUR
                } else if plane.is_wall(x, y) {
                    palette.wall
                } else {
                    palette.passage
                };
                montage.put_pixel((left + x) as u32, y as u32, colour);
            }
        }

        if let Some((hx, hy)) = highlight_on_plane(plane, options.highlight) {
            let colour = palette.highlight(options.step);
            let reach = if options.expand_highlight { 1 } else { 0 };
            for x in hx.saturating_sub(reach)..(hx + reach + 1).min(plane_width) {
                for y in hy.saturating_sub(reach)..(hy + reach + 1).min(plane_height) {
                    montage.put_pixel((left + x) as u32, y as u32, colour);
                }
            }
        }

        left += plane_width + 1;
    }

    let scale = options.cell_pixels;
    imageops::resize(&montage,
                     montage.width() * scale,
                     montage.height() * scale,
                     FilterType::Nearest)
}

fn highlight_on_plane(plane: &Plane, highlight: Option<&Coordinate>) -> Option<(usize, usize)> {
    let axes = plane.axes();
    let coord = highlight?;
    let x = coord.component(axes.first)?;
    let y = coord.component(axes.second)?;
    if x < plane.width().0 && y < plane.height().0 {
        Some((x, y))
    } else {
        None
    }
}

pub fn save_png(image: &RgbImage, path: &Path) -> ImageResult<()> {
    image.save_with_format(path, ImageFormat::Png)
}
