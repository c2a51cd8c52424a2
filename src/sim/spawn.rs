//! Spawn placement above the visible screen
//!
//! Rejection sampling: draw candidates until one clears every existing
//! vehicle, giving up after `max_spawn_attempts` draws.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{Vehicle, VehicleKind};
use crate::error::SimError;
use crate::settings::{SimSettings, SpawnMode};

/// Draw a fresh x for a vehicle by the configured spawn mode
fn spawn_x(kind: VehicleKind, size: f32, settings: &SimSettings, rng: &mut impl Rng) -> f32 {
    match settings.spawn_mode {
        SpawnMode::Lanes => settings
            .lanes_for(kind)
            .choose(rng)
            .copied()
            // validate() guarantees a lane for each kind
            .unwrap_or(settings.screen_width / 2.0),
        SpawnMode::Continuous => {
            let half = (size / 2.0).floor() as i32;
            let max = (settings.screen_width as i32 - half).max(half);
            rng.random_range(half..=max) as f32
        }
    }
}

/// Draw a fresh y within one screen height above the visible area
fn spawn_y(settings: &SimSettings, rng: &mut impl Rng) -> f32 {
    rng.random_range(-(settings.screen_height as i32)..=0) as f32
}

/// Find a position for a new vehicle that overlaps none of `existing`
///
/// Uses circular clearance for every pair: the candidate is rejected when
/// any centre distance is below the mean of the two sizes.
pub fn place_vehicle(
    kind: VehicleKind,
    size: f32,
    existing: &[Vehicle],
    settings: &SimSettings,
    rng: &mut impl Rng,
) -> Result<Vec2, SimError> {
    for _ in 0..settings.max_spawn_attempts {
        let candidate = Vec2::new(spawn_x(kind, size, settings, rng), spawn_y(settings, rng));
        let clear = existing
            .iter()
            .all(|v| candidate.distance(v.pos) >= (size + v.size()) / 2.0);
        if clear {
            return Ok(candidate);
        }
    }

    log::warn!(
        "No room for another {} after {} attempts ({} vehicles placed)",
        kind.as_str(),
        settings.max_spawn_attempts,
        existing.len()
    );
    Err(SimError::SpawnSaturated {
        kind,
        attempts: settings.max_spawn_attempts,
    })
}

/// Position for a vehicle re-entering from the top (no clearance check)
pub fn respawn_position(
    kind: VehicleKind,
    size: f32,
    settings: &SimSettings,
    rng: &mut impl Rng,
) -> Vec2 {
    Vec2::new(spawn_x(kind, size, settings, rng), spawn_y(settings, rng))
}
