//! Extraction thresholds, output defaults, and overlay palette

// Tile partitioning
/// Default tile edge length in pixels
pub const DEFAULT_TILE_SIZE: usize = 16;

// Output settings
/// Default path of the tabular grid CSV
pub const DEFAULT_GRID_CSV: &str = "grid_labels.csv";
/// Default path of the validation overlay
pub const DEFAULT_OVERLAY: &str = "grid_overlay.png";
/// Header row of the tabular grid CSV
pub const GRID_CSV_HEADER: &str = "row,col,passable,encounter";
/// Separator written between values of the plain integer matrix
pub const MATRIX_SEPARATOR: &str = ", ";

// Hue bands are expressed on the 0..=179 half-degree scale
/// Largest representable hue value
pub const HUE_MAX: u8 = 179;
/// Hue bands treated as green paint (passable)
pub const GREEN_HUE_RANGES: [(u8, u8); 1] = [(40, 90)];
/// Hue bands treated as red paint (blocked); red straddles both ends of the circle
pub const RED_HUE_RANGES: [(u8, u8); 2] = [(0, 10), (170, 179)];
/// Minimum saturation for passable/blocked paint
pub const MASK_SATURATION_FLOOR: u8 = 60;
/// Minimum value (brightness) for passable/blocked paint
pub const MASK_VALUE_FLOOR: u8 = 60;
/// Minimum saturation for encounter paint
pub const ENCOUNTER_SATURATION_FLOOR: u8 = 40;
/// Minimum value (brightness) for encounter paint
pub const ENCOUNTER_VALUE_FLOOR: u8 = 40;
/// Gray intensities below this count as painted in paired-image mode
pub const NEAR_WHITE_CUTOFF: u8 = 240;

// Overlay palette (RGB)
/// Fill for passable tiles
pub const PASSABLE_FILL: [u8; 3] = [0, 200, 255];
/// Fill for blocked tiles
pub const BLOCKED_FILL: [u8; 3] = [255, 0, 0];
/// Accent blended 50/50 over encounter tiles
pub const ENCOUNTER_ACCENT: [u8; 3] = [0, 255, 0];
/// Color of the tile boundary lines
pub const GRID_LINE_COLOR: [u8; 3] = [0, 0, 0];
/// Background behind the overlay and behind transparent source pixels
pub const BACKGROUND: [u8; 3] = [255, 255, 255];

// Grid utilities
/// Cell value treated as traversable unless told otherwise
pub const DEFAULT_PASSABLE_VALUE: i32 = 1;
