//! Command-line interface for grid extraction and grid queries

use crate::algorithm::bfs::shortest_path;
use crate::algorithm::routes::ZoneGraph;
use crate::analysis::color::{ColorFloors, HueRange};
use crate::analysis::masks::{CategoryMasks, ClassifierConfig, MaskSource};
use crate::io::configuration::{
    DEFAULT_GRID_CSV, DEFAULT_OVERLAY, DEFAULT_PASSABLE_VALUE, DEFAULT_TILE_SIZE,
};
use crate::io::error::{GridError, Result};
use crate::io::export::save_labels_csv;
use crate::io::matrix::{load_matrix, save_matrix};
use crate::io::visualization::save_overlay;
use crate::spatial::grid::{Cell, Edge, parse_cell};
use crate::spatial::tiles::LabelGrid;
use clap::{Args, Parser, Subcommand};
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tilegrid")]
#[command(
    author,
    version,
    about = "Turn painted map masks into tile grids and find paths across them"
)]
/// Command-line arguments for the grid tool
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Report grid dimensions and written files
    #[arg(short, long, global = true)]
    pub debug: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a tile grid from mask images
    Extract(ExtractArgs),
    /// List passable cells on one boundary of an integer grid
    Exits(ExitsArgs),
    /// Shortest path between cells of an integer grid
    Path(PathArgs),
    /// Cheapest route between zones of a zone link table
    Route(RouteArgs),
}

/// Arguments of the `extract` subcommand
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Single mask image: green paint is passable, red paint is blocked
    #[arg(long, value_name = "IMAGE", conflicts_with_all = ["passable", "blocked"])]
    pub mask: Option<PathBuf>,

    /// Image painted where the map is passable (use with --blocked)
    #[arg(long, value_name = "IMAGE")]
    pub passable: Option<PathBuf>,

    /// Image painted where the map is blocked (use with --passable)
    #[arg(long, value_name = "IMAGE")]
    pub blocked: Option<PathBuf>,

    /// Optional image marking encounter zones
    #[arg(long, value_name = "IMAGE")]
    pub encounter: Option<PathBuf>,

    /// Tile size in pixels
    #[arg(short, long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile: usize,

    /// Output path of the tabular grid CSV
    #[arg(long, default_value = DEFAULT_GRID_CSV)]
    pub out_csv: PathBuf,

    /// Output path of the validation overlay
    #[arg(long, default_value = DEFAULT_OVERLAY)]
    pub out_overlay: PathBuf,

    /// Also write the plain integer matrix used by `exits` and `path`
    #[arg(long, value_name = "FILE")]
    pub out_matrix: Option<PathBuf>,

    /// Write passable encounter tiles as 2 in the integer matrix
    #[arg(long, requires = "out_matrix")]
    pub mark_encounters: bool,

    /// Hue band for passable paint as lo-hi on 0..=179 (repeatable)
    #[arg(long, value_name = "LO-HI")]
    pub green_hue: Vec<HueRange>,

    /// Hue band for blocked paint as lo-hi on 0..=179 (repeatable)
    #[arg(long, value_name = "LO-HI")]
    pub red_hue: Vec<HueRange>,

    /// Hue band for encounter paint as lo-hi on 0..=179 (repeatable)
    #[arg(long, value_name = "LO-HI")]
    pub encounter_hue: Vec<HueRange>,

    /// Saturation floor for passable/blocked paint
    #[arg(long)]
    pub saturation_min: Option<u8>,

    /// Value floor for passable/blocked paint
    #[arg(long)]
    pub value_min: Option<u8>,

    /// Saturation floor for encounter paint
    #[arg(long)]
    pub encounter_saturation_min: Option<u8>,

    /// Value floor for encounter paint
    #[arg(long)]
    pub encounter_value_min: Option<u8>,

    /// Gray level below which a pixel counts as painted in paired mode
    #[arg(long)]
    pub gray_cutoff: Option<u8>,
}

impl ExtractArgs {
    /// Resolve the input mode
    ///
    /// # Errors
    ///
    /// Returns `GridError::Usage` unless either `--mask` or both
    /// `--passable` and `--blocked` were given
    pub fn mask_source(&self) -> Result<MaskSource> {
        match (&self.mask, &self.passable, &self.blocked) {
            (Some(mask), None, None) => Ok(MaskSource::Combined(mask.clone())),
            (None, Some(passable), Some(blocked)) => Ok(MaskSource::Paired {
                passable: passable.clone(),
                blocked: blocked.clone(),
            }),
            _ => Err(GridError::Usage {
                reason: "pass --mask, or both --passable and --blocked".to_string(),
            }),
        }
    }

    /// Classifier thresholds with command-line overrides applied
    pub fn classifier_config(&self) -> ClassifierConfig {
        let defaults = ClassifierConfig::default();
        let or_default = |given: &[HueRange], fallback: Vec<HueRange>| {
            if given.is_empty() {
                fallback
            } else {
                given.to_vec()
            }
        };

        ClassifierConfig {
            passable_hues: or_default(&self.green_hue, defaults.passable_hues),
            blocked_hues: or_default(&self.red_hue, defaults.blocked_hues),
            encounter_hues: or_default(&self.encounter_hue, defaults.encounter_hues),
            mask_floors: ColorFloors {
                saturation: self
                    .saturation_min
                    .unwrap_or(defaults.mask_floors.saturation),
                value: self.value_min.unwrap_or(defaults.mask_floors.value),
            },
            encounter_floors: ColorFloors {
                saturation: self
                    .encounter_saturation_min
                    .unwrap_or(defaults.encounter_floors.saturation),
                value: self
                    .encounter_value_min
                    .unwrap_or(defaults.encounter_floors.value),
            },
            near_white_cutoff: self.gray_cutoff.unwrap_or(defaults.near_white_cutoff),
        }
    }

    /// Classify, aggregate, and write every requested artifact
    ///
    /// The input mode is checked before any image is read.
    ///
    /// # Errors
    ///
    /// Returns an error if the input mode is incomplete, an image cannot
    /// be read, images disagree in size, or an output cannot be written
    pub fn run(&self) -> Result<LabelGrid> {
        let source = self.mask_source()?;
        let config = self.classifier_config();

        let masks = CategoryMasks::load(&source, self.encounter.as_deref(), &config)?;
        let grid = LabelGrid::aggregate(&masks, self.tile)?;

        save_labels_csv(&grid, &self.out_csv)?;
        save_overlay(&grid, &self.out_overlay)?;
        if let Some(path) = &self.out_matrix {
            save_matrix(&grid.to_cell_grid(self.mark_encounters), path)?;
        }

        log::info!("Grid dimensions: {}x{} cells", grid.rows(), grid.cols());
        Ok(grid)
    }
}

/// Arguments of the `exits` subcommand
#[derive(Args, Debug)]
pub struct ExitsArgs {
    /// Integer-matrix grid file
    #[arg(value_name = "GRID")]
    pub grid: PathBuf,

    /// Boundary to scan: top, bottom, left or right
    #[arg(short, long)]
    pub edge: Edge,

    /// Cell value that counts as passable
    #[arg(long, default_value_t = DEFAULT_PASSABLE_VALUE)]
    pub passable_value: i32,

    /// Overwrite the detected exits with this value
    #[arg(long, requires = "output")]
    pub relabel: Option<i32>,

    /// Where to write the relabeled grid
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ExitsArgs {
    /// Detect exits, relabeling and saving the grid if requested
    ///
    /// # Errors
    ///
    /// Returns an error if the grid cannot be loaded or saved
    pub fn run(&self) -> Result<Vec<Cell>> {
        let mut grid = load_matrix(&self.grid)?;
        let exits = grid.edge_exits(self.edge, self.passable_value);
        log::info!("{} exits on the {} edge", exits.len(), self.edge);

        if let (Some(value), Some(output)) = (self.relabel, &self.output) {
            grid.relabel(exits.iter().copied(), value);
            save_matrix(&grid, output)?;
        }

        Ok(exits)
    }
}

/// Arguments of the `path` subcommand
#[derive(Args, Debug)]
pub struct PathArgs {
    /// Integer-matrix grid file
    #[arg(value_name = "GRID")]
    pub grid: PathBuf,

    /// Source cell as row,col (repeatable)
    #[arg(long, value_name = "ROW,COL", value_parser = parse_cell)]
    pub from: Vec<Cell>,

    /// Use every exit on this boundary as a source
    #[arg(long)]
    pub exit_edge: Option<Edge>,

    /// Target cell as row,col (repeatable)
    #[arg(long, value_name = "ROW,COL", value_parser = parse_cell, required = true)]
    pub to: Vec<Cell>,

    /// Cell value that counts as passable
    #[arg(long, default_value_t = DEFAULT_PASSABLE_VALUE)]
    pub passable_value: i32,
}

impl PathArgs {
    /// Search for a shortest path; `Ok(None)` means no target is reachable
    ///
    /// # Errors
    ///
    /// Returns `GridError::Usage` if no source was named, or an error if the
    /// grid cannot be loaded
    pub fn run(&self) -> Result<Option<Vec<Cell>>> {
        if self.from.is_empty() && self.exit_edge.is_none() {
            return Err(GridError::Usage {
                reason: "pass at least one --from cell or an --exit-edge".to_string(),
            });
        }

        let grid = load_matrix(&self.grid)?;
        let mut sources = self.from.clone();
        if let Some(edge) = self.exit_edge {
            sources.extend(grid.edge_exits(edge, self.passable_value));
        }
        let targets: HashSet<Cell> = self.to.iter().copied().collect();

        let path = shortest_path(&grid, sources, &targets, self.passable_value);
        match &path {
            Some(found) => log::info!("Path of {} steps", found.steps()),
            None => log::info!("No target reachable"),
        }
        Ok(path.map(|found| found.into_cells()))
    }
}

/// Arguments of the `route` subcommand
#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Zone link table with a `from,to,weight` header
    #[arg(long, value_name = "FILE")]
    pub links: PathBuf,

    /// Starting zone code
    #[arg(long)]
    pub from: String,

    /// Destination zone code
    #[arg(long)]
    pub to: String,
}

impl Cli {
    /// Run the selected subcommand and print its result
    ///
    /// # Errors
    ///
    /// Returns any error raised by the subcommand
    // Results are the command's output
    #[allow(clippy::print_stdout)]
    pub fn execute(&self) -> Result<()> {
        match &self.command {
            Command::Extract(args) => {
                args.run()?;
            }
            Command::Exits(args) => {
                for (row, col) in args.run()? {
                    println!("{row},{col}");
                }
            }
            Command::Path(args) => match args.run()? {
                Some(cells) => {
                    for (row, col) in cells {
                        println!("{row},{col}");
                    }
                }
                None => println!("no path"),
            },
            Command::Route(args) => {
                let graph = ZoneGraph::load_links(&args.links)?;
                match graph.shortest_route(&args.from, &args.to) {
                    Some(route) => {
                        println!("cost: {}", route.cost);
                        println!("{}", route.zones.join(" -> "));
                    }
                    None => println!("no route"),
                }
            }
        }
        Ok(())
    }
}

/// Install the logger; `--debug` raises the default level to `info`
///
/// `RUST_LOG` still takes precedence when set.
pub fn init_logging(debug: bool) {
    let default_level = if debug { "info" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_level);
    let _ = env_logger::Builder::from_env(env).format_target(false).try_init();
}
