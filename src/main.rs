use docopt::Docopt;
use log::{info, warn};
use nd_mazes::{
    cells::Coordinate,
    generators,
    grid::MazeGrid,
    grid_displays::PlanesDisplay,
    projection,
    renderers::{self, RenderOptionsBuilder, Theme},
};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
    path::Path,
    thread,
    time::Duration,
};

const USAGE: &str = "N-dimensional mazes

Usage:
    nd_mazes_driver -h | --help
    nd_mazes_driver <extent>... [--seed=<n>] [--border] [--animate --frame-ms=<n>] [--text --text-out=<path>] [--image-out=<path> --cell-pixels=<n> --theme=<name> --expand-highlight]

Options:
    -h --help              Show this screen.
    --seed=<n>             Seed for the random number generator. A fresh seed is drawn and logged if not given.
    --border               Pad the far side of every axis with one more layer of wall.
    --animate              Print every growth step of the maze as text while it is generated.
    --frame-ms=<n>         Pause between animation frames in milliseconds [default: 40].
    --text                 Render the finished maze as text. The default when no image is requested.
    --text-out=<path>      Output file path for a textual rendering of a maze.
    --image-out=<path>     Output file path for an image rendering of a maze. Always PNG format.
    --cell-pixels=<n>      Pixel count to render one maze cell [default: 16].
    --theme=<name>         Colour theme: default, christmas, beachy, woodsy or kaboom [default: default].
    --expand-highlight     Draw the highlighted cell as a 3x3 block.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    arg_extent: Vec<usize>,
    flag_seed: Option<u64>,
    flag_border: bool,
    flag_animate: bool,
    flag_frame_ms: u64,
    flag_text: bool,
    flag_text_out: String,
    flag_image_out: String,
    flag_cell_pixels: u32,
    flag_theme: String,
    flag_expand_highlight: bool,
}

mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            ImageSaveError(::image::ImageError);
            Io(::std::io::Error);
            InvalidShape(::nd_mazes::grid_dimensions::InvalidShapeError);
            UnknownTheme(::nd_mazes::renderers::UnknownThemeError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;
    let theme: Theme = args.flag_theme.parse()?;

    let seed = args.flag_seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("Generating maze with extents {:?} and seed {}", args.arg_extent, seed);
    let mut rng = XorShiftRng::seed_from_u64(seed);

    let mut last_cell: Option<Coordinate> = None;
    let maze = if args.flag_animate {
        let frame_pause = Duration::from_millis(args.flag_frame_ms);
        generators::generate_observed(&args.arg_extent, &mut rng, |grid, cell| {
            print_frame(grid, cell);
            last_cell = Some(cell.clone());
            thread::sleep(frame_pause);
        })?
    } else {
        generators::generate_observed(&args.arg_extent, &mut rng, |_, cell| {
            last_cell = Some(cell.clone());
        })?
    };
    info!("Maze {:?} generated", maze);

    let maze = if args.flag_border {
        maze.with_border()?
    } else {
        maze
    };

    let highlight = last_cell.unwrap_or_else(|| maze.shape().seed());
    let planes = projection::slice_planes(&maze, &highlight)
        .ok_or("Highlighted cell is not a cell of the maze.")?;
    if planes.is_empty() {
        warn!("A one dimensional maze has no planes to render");
    }

    let do_image_render = !args.flag_image_out.is_empty();
    let do_text_render = args.flag_text || !args.flag_text_out.is_empty() || !do_image_render;

    if do_text_render {
        let text = PlanesDisplay::new(&planes, Some(&highlight)).to_string();
        if args.flag_text_out.is_empty() {
            println!("{}", text);
        } else {
            write_text_to_file(&text, &args.flag_text_out)
                .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
            info!("Wrote text rendering to {}", args.flag_text_out);
        }
    }

    if do_image_render {
        let render_options = RenderOptionsBuilder::new()
            .theme(theme)
            .cell_pixels(args.flag_cell_pixels)
            .highlight(Some(&highlight))
            .expand_highlight(args.flag_expand_highlight)
            .build();
        let image = renderers::render_planes(&planes, &render_options);
        renderers::save_png(&image, Path::new(&args.flag_image_out))?;
        info!("Wrote image rendering to {}", args.flag_image_out);
    }

    Ok(())
}

fn print_frame(grid: &MazeGrid, cell: &Coordinate) {
    if let Some(planes) = projection::slice_planes(grid, cell) {
        // clear the terminal and home the cursor
        print!("\x1B[2J\x1B[H{}", PlanesDisplay::new(&planes, Some(cell)));
        let _ = io::stdout().flush();
    }
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
