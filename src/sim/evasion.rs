//! Evasion policy
//!
//! Turns a detected near-collision into a sideways drift for the evaluating
//! vehicle. The decision depends only on relative x (and, when configured,
//! the vertical gap); it never touches the other vehicle.

use super::state::Vehicle;
use crate::settings::SimSettings;

/// Drift `vehicle` should take to get away from `other`, if any
///
/// Drift left when `other` is to the right and there is room on the left,
/// drift right in the mirrored case. With a vertical override configured,
/// a vertically close pair always picks a side, even against the edge margin.
pub fn evade(vehicle: &Vehicle, other: &Vehicle, settings: &SimSettings) -> Option<f32> {
    let speed = settings.base_drift_speed;
    let x = vehicle.pos.x;
    let size = vehicle.size();

    let mut drift = if x < other.pos.x && x + size < settings.screen_width - settings.edge_margin {
        Some(-speed)
    } else if x > other.pos.x && x - size > settings.edge_margin {
        Some(speed)
    } else {
        None
    };

    if let Some(limit) = settings.vertical_override_distance {
        if (vehicle.pos.y - other.pos.y).abs() < limit {
            drift = Some(if x < other.pos.x { -speed } else { speed });
        }
    }

    drift
}
