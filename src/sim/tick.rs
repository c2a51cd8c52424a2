//! Per-frame simulation step
//!
//! Vehicles are updated one at a time in list order. Each update mutates only
//! the vehicle being updated and reads everyone else as they currently are,
//! so later vehicles see the new positions of earlier ones.

use rand_pcg::Pcg32;

use super::collision::{center_distance, vehicles_overlap};
use super::evasion::evade;
use super::ledger::CollisionLedger;
use super::spawn::respawn_position;
use super::state::{Vehicle, World};
use crate::settings::{ExitMode, LedgerScope, SimSettings};

/// World state a single vehicle update may touch besides the vehicle itself
pub struct FrameContext<'a> {
    pub settings: &'a SimSettings,
    pub rng: &'a mut Pcg32,
    pub ledger: &'a mut CollisionLedger,
    pub collision_count: &'a mut u64,
    pub exited: &'a mut u64,
}

/// Advance one vehicle by a frame
///
/// `others` is the live vehicle list; the entry with the same id as
/// `vehicle` is skipped. Returns false if the vehicle left the screen and
/// should be removed.
pub fn update_vehicle(vehicle: &mut Vehicle, others: &[Vehicle], ctx: &mut FrameContext) -> bool {
    let settings = ctx.settings;

    // Integrate
    vehicle.pos.y += vehicle.forward_speed();
    vehicle.pos.x += vehicle.lateral_drift;
    let half = vehicle.size() / 2.0;
    vehicle.pos.x = vehicle.pos.x.clamp(half, (settings.screen_width - half).max(half));

    // Drift is a fresh decision every frame
    vehicle.lateral_drift = 0.0;
    for other in others {
        if other.id == vehicle.id
            || !settings.interacts(vehicle.kind(), other.kind())
            || center_distance(vehicle, other) >= settings.safe_distance_threshold
            || !vehicles_overlap(vehicle, other)
        {
            continue;
        }
        if let Some(drift) = evade(vehicle, other, settings) {
            log::trace!(
                "Vehicle {} evading {} with drift {}",
                vehicle.id,
                other.id,
                drift
            );
            vehicle.lateral_drift = drift;
        }
    }

    if vehicle.pos.y > settings.screen_height {
        *ctx.exited += 1;
        match settings.exit_mode {
            ExitMode::Recycle => {
                vehicle.pos = respawn_position(vehicle.kind(), vehicle.size(), settings, &mut *ctx.rng);
            }
            ExitMode::Remove => {
                log::debug!("Vehicle {} left the screen", vehicle.id);
                return false;
            }
        }
    }

    if vehicle.is_on_screen(settings) {
        for other in others {
            if other.id == vehicle.id
                || !settings.interacts(vehicle.kind(), other.kind())
                || !vehicles_overlap(vehicle, other)
            {
                continue;
            }
            if ctx.ledger.record_if_new(vehicle.id, other.id) {
                *ctx.collision_count += 1;
                log::debug!(
                    "Collision #{}: {} {} x {} {} at ({:.1}, {:.1})",
                    ctx.collision_count,
                    vehicle.kind().as_str(),
                    vehicle.id,
                    other.kind().as_str(),
                    other.id,
                    vehicle.pos.x,
                    vehicle.pos.y
                );
            }
        }
    }

    true
}

/// Advance the world by one frame
pub fn tick(world: &mut World) {
    let World {
        settings,
        rng,
        vehicles,
        ledger,
        collision_count,
        exited,
        frame,
        ..
    } = world;

    let mut keep = Vec::with_capacity(vehicles.len());
    for i in 0..vehicles.len() {
        let mut vehicle = vehicles[i].clone();
        let mut ctx = FrameContext {
            settings: &*settings,
            rng: &mut *rng,
            ledger: &mut *ledger,
            collision_count: &mut *collision_count,
            exited: &mut *exited,
        };
        keep.push(update_vehicle(&mut vehicle, vehicles, &mut ctx));
        vehicles[i] = vehicle;
    }

    // Removal happens after every vehicle has seen the full list
    if keep.contains(&false) {
        let mut flags = keep.iter();
        vehicles.retain(|_| flags.next().copied().unwrap_or(true));
    }

    if settings.ledger_scope == LedgerScope::Contact {
        release_separated(ledger, vehicles, settings.safe_distance_threshold);
    }

    *frame += 1;
}

/// Forget counted pairs that are no longer in contact
///
/// A pair stays recorded while its shapes still overlap, even past the
/// safe distance, so one continuous overlap is never counted twice.
fn release_separated(ledger: &mut CollisionLedger, vehicles: &[Vehicle], threshold: f32) {
    let released = ledger.release_where(|a, b| {
        let find = |id| vehicles.iter().find(|v| v.id == id);
        match (find(a), find(b)) {
            (Some(va), Some(vb)) => {
                center_distance(va, vb) >= threshold && !vehicles_overlap(va, vb)
            }
            _ => true,
        }
    });
    if released > 0 {
        log::trace!("Released {} separated pairs", released);
    }
}
