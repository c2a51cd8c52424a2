//! Traffic Drift - a lane traffic micro-simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, evasion, collisions)
//! - `settings`: Variant configuration (lanes, exit policy, interaction pairs)
//! - `error`: Error type shared by the library and the headless driver

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::{ExitMode, InteractionPair, LedgerScope, SimSettings, SpawnMode};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Screen dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Frame rate the speed conversion assumes
    pub const FPS: f32 = 30.0;
    /// Pixels travelled per km of notional distance (1 km = 1000 m)
    pub const PIXELS_PER_KM: f32 = 1000.0 / (FPS * 60.0);

    /// Centre distance below which neighbours are evaluated for evasion
    pub const SAFE_DISTANCE_THRESHOLD: f32 = 100.0;
    /// Margin kept from either screen edge when choosing a drift direction
    pub const EDGE_MARGIN: f32 = 10.0;

    /// Lateral drift speeds (pixels/frame)
    pub const OPEN_ROAD_DRIFT_SPEED: f32 = 1.5;
    pub const LANE_DRIFT_SPEED: f32 = 2.0;
    /// Vertical gap under which the lane variant forces a drift direction
    pub const LANE_VERTICAL_OVERRIDE: f32 = 50.0;

    /// Spawn lanes (x-coordinates) for the lane variant
    pub const MOTORCYCLE_LANES: [f32; 2] = [300.0, 450.0];
    pub const CAR_LANES: [f32; 2] = [250.0, 550.0];

    /// Share of motorcycles among spawned vehicles
    pub const MOTORCYCLE_SHARE: f64 = 0.6;
    /// Placement attempts before giving up on a crowded screen
    pub const MAX_SPAWN_ATTEMPTS: u32 = 10_000;
}

/// Convert an average speed (notional km/h) into pixels per frame
#[inline]
pub fn speed_to_pixels_per_frame(avg_speed: f32) -> f32 {
    avg_speed * consts::PIXELS_PER_KM / 60.0
}

/// Point inside an axis-aligned box (given by centre and full size) closest to `p`
#[inline]
pub fn closest_point_in_box(p: Vec2, center: Vec2, size: Vec2) -> Vec2 {
    let half = size * 0.5;
    p.clamp(center - half, center + half)
}
