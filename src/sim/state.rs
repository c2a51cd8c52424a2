//! Vehicle and world state
//!
//! Everything the simulation mutates lives here; the per-frame logic is in `tick`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ledger::CollisionLedger;
use super::spawn::place_vehicle;
use crate::error::SimError;
use crate::settings::SimSettings;
use crate::speed_to_pixels_per_frame;

/// Vehicle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleKind {
    /// Circle collider, diameter = size
    Motorcycle,
    /// Axis-aligned rectangle collider, size x height
    Car,
}

impl VehicleKind {
    /// Pick a kind: motorcycle with probability `motorcycle_share`
    pub fn pick(rng: &mut impl Rng, motorcycle_share: f64) -> Self {
        if rng.random_bool(motorcycle_share) {
            VehicleKind::Motorcycle
        } else {
            VehicleKind::Car
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleKind::Motorcycle => "motorcycle",
            VehicleKind::Car => "car",
        }
    }
}

/// A simulated traffic participant
///
/// `pos` is the centre of the shape for both kinds. Shape and speed are
/// fixed at construction; only `pos` and `lateral_drift` change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u32,
    kind: VehicleKind,
    size: f32,
    height: f32,
    forward_speed: f32,
    pub pos: Vec2,
    /// Sideways speed decided this frame (pixels/frame)
    pub lateral_drift: f32,
}

impl Vehicle {
    pub fn new(
        id: u32,
        kind: VehicleKind,
        size: f32,
        height: f32,
        forward_speed: f32,
        pos: Vec2,
    ) -> Self {
        Self {
            id,
            kind,
            size,
            height,
            forward_speed,
            pos,
            lateral_drift: 0.0,
        }
    }

    /// Roll random body dimensions and speed for a kind (position left at origin)
    pub fn roll(id: u32, kind: VehicleKind, rng: &mut impl Rng) -> Self {
        let (size, height, avg_speed) = match kind {
            VehicleKind::Motorcycle => (
                rng.random_range(10..=15u32),
                rng.random_range(20..=25u32),
                rng.random_range(45..=50u32),
            ),
            VehicleKind::Car => {
                let size = rng.random_range(20..=30u32);
                (size, size / 2, rng.random_range(35..=40u32))
            }
        };
        Self::new(
            id,
            kind,
            size as f32,
            height as f32,
            speed_to_pixels_per_frame(avg_speed as f32),
            Vec2::ZERO,
        )
    }

    #[inline]
    pub fn kind(&self) -> VehicleKind {
        self.kind
    }

    /// Diameter for motorcycles, width for cars
    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Downward speed (pixels/frame)
    #[inline]
    pub fn forward_speed(&self) -> f32 {
        self.forward_speed
    }

    /// Whether the centre is within the visible rows `[0, screen_height]`
    pub fn is_on_screen(&self, settings: &SimSettings) -> bool {
        (0.0..=settings.screen_height).contains(&self.pos.y)
    }

    /// Read-only drawing view
    pub fn view(&self) -> VehicleView {
        VehicleView {
            id: self.id,
            kind: self.kind,
            x: self.pos.x,
            y: self.pos.y,
            width: self.size,
            height: self.height,
        }
    }
}

/// What the renderer needs to draw a vehicle (centre + extent)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleView {
    pub id: u32,
    pub kind: VehicleKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Per-frame state handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub frame: u64,
    pub collision_count: u64,
    pub exited: u64,
    pub vehicles: Vec<VehicleView>,
}

/// The simulation world: vehicles, collision bookkeeping and the seeded RNG
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) settings: SimSettings,
    pub(crate) rng: Pcg32,
    /// Live vehicles, in update order
    pub(crate) vehicles: Vec<Vehicle>,
    pub(crate) ledger: CollisionLedger,
    pub(crate) collision_count: u64,
    /// Vehicles that passed the bottom edge (recycled or removed)
    pub(crate) exited: u64,
    pub(crate) frame: u64,
    next_id: u32,
}

impl World {
    /// Create an empty world
    pub fn new(settings: SimSettings, seed: u64) -> Result<Self, SimError> {
        settings.validate()?;
        Ok(Self {
            seed,
            settings,
            rng: Pcg32::seed_from_u64(seed),
            vehicles: Vec::new(),
            ledger: CollisionLedger::new(),
            collision_count: 0,
            exited: 0,
            frame: 0,
            next_id: 1,
        })
    }

    /// Create a world and fill it with `count` randomly chosen vehicles
    pub fn with_vehicles(settings: SimSettings, seed: u64, count: usize) -> Result<Self, SimError> {
        let mut world = Self::new(settings, seed)?;
        world.populate(count)?;
        Ok(world)
    }

    /// Spawn `count` vehicles, each kind drawn by the configured motorcycle share
    pub fn populate(&mut self, count: usize) -> Result<(), SimError> {
        for _ in 0..count {
            let kind = VehicleKind::pick(&mut self.rng, self.settings.motorcycle_share);
            self.spawn(kind)?;
        }
        log::info!(
            "Populated world: {} vehicles ({} motorcycles), seed {}",
            self.vehicles.len(),
            self.vehicles
                .iter()
                .filter(|v| v.kind() == VehicleKind::Motorcycle)
                .count(),
            self.seed
        );
        Ok(())
    }

    /// Spawn one vehicle of `kind` at a position clear of every other vehicle
    pub fn spawn(&mut self, kind: VehicleKind) -> Result<u32, SimError> {
        let mut vehicle = Vehicle::roll(self.next_id, kind, &mut self.rng);
        vehicle.pos = place_vehicle(
            kind,
            vehicle.size(),
            &self.vehicles,
            &self.settings,
            &mut self.rng,
        )?;
        let id = self.next_vehicle_id();
        self.vehicles.push(vehicle);
        Ok(id)
    }

    /// Allocate a new vehicle ID
    pub fn next_vehicle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a prebuilt vehicle at the end of the update order (no placement check)
    pub fn push_vehicle(&mut self, vehicle: Vehicle) {
        self.next_id = self.next_id.max(vehicle.id.saturating_add(1));
        self.vehicles.push(vehicle);
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, id: u32) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn collision_count(&self) -> u64 {
        self.collision_count
    }

    pub fn exited(&self) -> u64 {
        self.exited
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn settings(&self) -> &SimSettings {
        &self.settings
    }

    pub fn ledger(&self) -> &CollisionLedger {
        &self.ledger
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            frame: self.frame,
            collision_count: self.collision_count,
            exited: self.exited,
            vehicles: self.vehicles.iter().map(Vehicle::view).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_roll_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        for id in 0..200 {
            let bike = Vehicle::roll(id, VehicleKind::Motorcycle, &mut rng);
            assert!((10.0..=15.0).contains(&bike.size()));
            assert!((20.0..=25.0).contains(&bike.height()));
            assert!(bike.forward_speed() >= speed_to_pixels_per_frame(45.0));
            assert!(bike.forward_speed() <= speed_to_pixels_per_frame(50.0));

            let car = Vehicle::roll(id, VehicleKind::Car, &mut rng);
            assert!((20.0..=30.0).contains(&car.size()));
            assert_eq!(car.height(), (car.size() / 2.0).floor());
            assert!(car.forward_speed() >= speed_to_pixels_per_frame(35.0));
            assert!(car.forward_speed() <= speed_to_pixels_per_frame(40.0));
        }
    }

    #[test]
    fn test_populate_assigns_unique_ids() {
        let world = World::with_vehicles(SimSettings::open_road(), 42, 30).unwrap();
        assert_eq!(world.vehicles().len(), 30);
        let ids: BTreeSet<u32> = world.vehicles().iter().map(|v| v.id).collect();
        assert_eq!(ids.len(), 30);
        assert!(world.vehicles().iter().all(|v| v.pos.y <= 0.0));
    }

    #[test]
    fn test_kind_share_extremes() {
        let mut settings = SimSettings::open_road();
        settings.motorcycle_share = 1.0;
        let world = World::with_vehicles(settings.clone(), 3, 10).unwrap();
        assert!(
            world
                .vehicles()
                .iter()
                .all(|v| v.kind() == VehicleKind::Motorcycle)
        );

        settings.motorcycle_share = 0.0;
        let world = World::with_vehicles(settings, 3, 10).unwrap();
        assert!(world.vehicles().iter().all(|v| v.kind() == VehicleKind::Car));
    }

    #[test]
    fn test_empty_world_snapshot() {
        let world = World::new(SimSettings::default(), 1).unwrap();
        let snapshot = world.snapshot();
        assert_eq!(snapshot.frame, 0);
        assert_eq!(snapshot.collision_count, 0);
        assert!(snapshot.vehicles.is_empty());
    }

    #[test]
    fn test_push_vehicle_advances_ids() {
        let mut world = World::new(SimSettings::default(), 1).unwrap();
        world.push_vehicle(Vehicle::new(
            10,
            VehicleKind::Car,
            20.0,
            10.0,
            1.0,
            Vec2::new(100.0, 100.0),
        ));
        assert_eq!(world.next_vehicle_id(), 11);
        assert_eq!(world.vehicle(10).map(|v| v.kind()), Some(VehicleKind::Car));
    }

    #[test]
    fn test_push_vehicle_with_max_id() {
        let mut world = World::new(SimSettings::default(), 1).unwrap();
        world.push_vehicle(Vehicle::new(
            u32::MAX,
            VehicleKind::Motorcycle,
            12.0,
            22.0,
            0.4,
            Vec2::new(100.0, 100.0),
        ));
        assert_eq!(world.vehicles().len(), 1);
        assert!(world.vehicle(u32::MAX).is_some());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = SimSettings::default();
        settings.safe_distance_threshold = -1.0;
        assert!(World::new(settings, 1).is_err());
    }
}
