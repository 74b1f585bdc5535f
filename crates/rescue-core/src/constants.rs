//! Simulation constants and tuning parameters.

// --- Map ---

/// Edge length of one grid cell in pixels.
pub const TILE_SIZE: i32 = 30;

/// Default map width in cells (900 px).
pub const GRID_WIDTH: i32 = 30;

/// Default map height in cells (520 px of playfield).
pub const GRID_HEIGHT: i32 = 17;

/// Chebyshev radius of each team's base, in cells.
pub const BASE_RADIUS: u32 = 1;

// --- Population ---

pub const NUM_OBSTACLES: u32 = 10;
pub const NUM_PERSONS: u32 = 10;
pub const NUM_CLOTHING: u32 = 15;
pub const NUM_FOOD: u32 = 15;
pub const NUM_MEDICINE: u32 = 10;
pub const NUM_WEAPONS: u32 = 10;

/// Hazards of each kind placed by the default setup.
pub const HAZARDS_PER_KIND: u32 = 3;

/// Random placement attempts per object before giving up on it.
pub const PLACEMENT_ATTEMPTS: u32 = 200;

// --- Points ---

pub const POINTS_PERSON: u32 = 50;
pub const POINTS_CLOTHING: u32 = 5;
pub const POINTS_FOOD: u32 = 10;
pub const POINTS_MEDICINE: u32 = 20;
pub const POINTS_WEAPON: u32 = 50;

// --- Hazards (pixels) ---

pub const LARGE_CIRCLE_RADIUS: f32 = 10.0;
pub const SMALL_CIRCLE_RADIUS: f32 = 5.0;
pub const HORIZONTAL_STRIP_LENGTH: f32 = 10.0;
pub const VERTICAL_STRIP_LENGTH: f32 = 5.0;
pub const MOBILE_CIRCLE_RADIUS: f32 = 7.0;

/// Half of the strip hazards' thickness.
pub const STRIP_HALF_WIDTH: f32 = 2.0;

/// Logical ticks between mobile hazard toggles.
pub const HAZARD_TOGGLE_INTERVAL_TICKS: u32 = 30;

// --- Decisions ---

/// Margin added to a hazard's radius to form the evasion threshold (pixels).
pub const HAZARD_DANGER_MARGIN: f32 = 25.0;

/// How far an evasion move tries to get from the vehicle (pixels).
pub const ESCAPE_DISTANCE: f32 = 40.0;

/// Random exploration retries before falling back to the map center.
pub const EXPLORATION_ATTEMPTS: u32 = 32;

/// Minimum value for the default high-value seek rule.
pub const HIGH_VALUE_THRESHOLD: u32 = 10;

// --- Match ---

/// Tick limit after which a match is declared finished.
pub const DEFAULT_MAX_TICKS: u64 = 5_000;
