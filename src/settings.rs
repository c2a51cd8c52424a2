//! Simulation settings
//!
//! The two road variants differ only in configuration: how vehicles are
//! placed, what happens at the bottom edge, which kind pairs interact and
//! how hard vehicles drift. Settings can be loaded from and saved to JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;
use crate::sim::VehicleKind;

/// Road variant presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Vehicles anywhere across the width, removed when they leave
    #[default]
    OpenRoad,
    /// Vehicles in fixed lanes, recycled to the top when they leave
    DedicatedLanes,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::OpenRoad => "open",
            Preset::DedicatedLanes => "lanes",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" | "open-road" => Some(Preset::OpenRoad),
            "lanes" | "dedicated-lanes" => Some(Preset::DedicatedLanes),
            _ => None,
        }
    }
}

/// Where new vehicles may appear horizontally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnMode {
    /// One of the per-kind lane x-coordinates
    Lanes,
    /// Anywhere across the screen width
    Continuous,
}

/// What happens to a vehicle that passes the bottom edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitMode {
    /// Teleport back above the screen and keep going
    Recycle,
    /// Drop it from the world
    Remove,
}

/// How long a counted pair stays in the collision ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LedgerScope {
    /// Until the pair separates beyond the safe distance (or one leaves)
    #[default]
    Contact,
    /// For the whole run
    Run,
}

/// An ordered (subject, other) kind pair the subject reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionPair {
    pub subject: VehicleKind,
    pub other: VehicleKind,
}

impl InteractionPair {
    pub const fn new(subject: VehicleKind, other: VehicleKind) -> Self {
        Self { subject, other }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimSettings {
    pub screen_width: f32,
    pub screen_height: f32,

    // === Variant policies ===
    pub spawn_mode: SpawnMode,
    pub exit_mode: ExitMode,
    #[serde(default)]
    pub ledger_scope: LedgerScope,
    /// Kind pairs that evade and count collisions (subject-side)
    pub interactions: Vec<InteractionPair>,

    // === Evasion ===
    /// Drift applied when evading (pixels/frame)
    pub base_drift_speed: f32,
    /// Neighbours closer than this (centre distance) are considered
    pub safe_distance_threshold: f32,
    /// Vertical gap that forces a drift direction regardless of edge margin
    pub vertical_override_distance: Option<f32>,
    /// Minimum clearance from the screen edges for a drift decision
    pub edge_margin: f32,

    // === Spawning ===
    pub motorcycle_lanes: Vec<f32>,
    pub car_lanes: Vec<f32>,
    /// Probability that a new vehicle is a motorcycle
    pub motorcycle_share: f64,
    /// Placement attempts before reporting a saturated screen
    pub max_spawn_attempts: u32,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self::open_road()
    }
}

impl SimSettings {
    /// Continuous placement, removal on exit, motorcycles react to everything
    pub fn open_road() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            spawn_mode: SpawnMode::Continuous,
            exit_mode: ExitMode::Remove,
            ledger_scope: LedgerScope::Contact,
            interactions: vec![
                InteractionPair::new(VehicleKind::Motorcycle, VehicleKind::Motorcycle),
                InteractionPair::new(VehicleKind::Motorcycle, VehicleKind::Car),
            ],

            base_drift_speed: OPEN_ROAD_DRIFT_SPEED,
            safe_distance_threshold: SAFE_DISTANCE_THRESHOLD,
            vertical_override_distance: None,
            edge_margin: EDGE_MARGIN,

            motorcycle_lanes: MOTORCYCLE_LANES.to_vec(),
            car_lanes: CAR_LANES.to_vec(),
            motorcycle_share: MOTORCYCLE_SHARE,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,
        }
    }

    /// Lane placement, recycling on exit, same-kind interactions only
    pub fn dedicated_lanes() -> Self {
        Self {
            spawn_mode: SpawnMode::Lanes,
            exit_mode: ExitMode::Recycle,
            interactions: vec![
                InteractionPair::new(VehicleKind::Motorcycle, VehicleKind::Motorcycle),
                InteractionPair::new(VehicleKind::Car, VehicleKind::Car),
            ],
            base_drift_speed: LANE_DRIFT_SPEED,
            vertical_override_distance: Some(LANE_VERTICAL_OVERRIDE),
            ..Self::open_road()
        }
    }

    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::OpenRoad => Self::open_road(),
            Preset::DedicatedLanes => Self::dedicated_lanes(),
        }
    }

    /// Whether `subject` reacts to (and counts collisions with) `other`
    pub fn interacts(&self, subject: VehicleKind, other: VehicleKind) -> bool {
        self.interactions
            .iter()
            .any(|p| p.subject == subject && p.other == other)
    }

    /// Spawn lanes for a vehicle kind
    pub fn lanes_for(&self, kind: VehicleKind) -> &[f32] {
        match kind {
            VehicleKind::Motorcycle => &self.motorcycle_lanes,
            VehicleKind::Car => &self.car_lanes,
        }
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(SimError::InvalidSettings(format!(
                "screen must be positive, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if !(self.safe_distance_threshold > 0.0) {
            return Err(SimError::InvalidSettings(
                "safe_distance_threshold must be positive".into(),
            ));
        }
        if !(self.base_drift_speed >= 0.0 && self.edge_margin >= 0.0) {
            return Err(SimError::InvalidSettings(
                "drift speed and edge margin must not be negative".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.motorcycle_share) {
            return Err(SimError::InvalidSettings(format!(
                "motorcycle_share must be within [0, 1], got {}",
                self.motorcycle_share
            )));
        }
        if self.max_spawn_attempts == 0 {
            return Err(SimError::InvalidSettings(
                "max_spawn_attempts must be at least 1".into(),
            ));
        }
        if self.spawn_mode == SpawnMode::Lanes {
            for kind in [VehicleKind::Motorcycle, VehicleKind::Car] {
                if self.lanes_for(kind).is_empty() {
                    return Err(SimError::InvalidSettings(format!(
                        "lane spawning needs at least one {kind:?} lane"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SimError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(SimSettings::open_road().validate().is_ok());
        assert!(SimSettings::dedicated_lanes().validate().is_ok());
    }

    #[test]
    fn test_preset_interactions() {
        let open = SimSettings::open_road();
        assert!(open.interacts(VehicleKind::Motorcycle, VehicleKind::Car));
        assert!(!open.interacts(VehicleKind::Car, VehicleKind::Car));
        assert!(!open.interacts(VehicleKind::Car, VehicleKind::Motorcycle));

        let lanes = SimSettings::dedicated_lanes();
        assert!(lanes.interacts(VehicleKind::Car, VehicleKind::Car));
        assert!(!lanes.interacts(VehicleKind::Motorcycle, VehicleKind::Car));
        assert_eq!(lanes.vertical_override_distance, Some(50.0));
        assert_eq!(lanes.base_drift_speed, 2.0);
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!(Preset::from_str("LANES"), Some(Preset::DedicatedLanes));
        assert_eq!(Preset::from_str("open"), Some(Preset::OpenRoad));
        assert_eq!(Preset::from_str("highway"), None);
        assert_eq!(
            Preset::from_str(Preset::DedicatedLanes.as_str()),
            Some(Preset::DedicatedLanes)
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = SimSettings::dedicated_lanes();
        settings.car_lanes.clear();
        assert!(matches!(
            settings.validate(),
            Err(SimError::InvalidSettings(_))
        ));

        let mut settings = SimSettings::open_road();
        settings.motorcycle_share = 1.5;
        assert!(settings.validate().is_err());

        let mut settings = SimSettings::open_road();
        settings.max_spawn_attempts = 0;
        assert!(settings.validate().is_err());

        let mut settings = SimSettings::open_road();
        settings.screen_height = 0.0;
        assert!(settings.validate().is_err());

        let mut settings = SimSettings::open_road();
        settings.safe_distance_threshold = f32::NAN;
        assert!(settings.validate().is_err());

        let mut settings = SimSettings::open_road();
        settings.base_drift_speed = f32::NAN;
        assert!(settings.validate().is_err());

        let mut settings = SimSettings::open_road();
        settings.edge_margin = f32::NAN;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "traffic_drift_settings_{}.json",
            std::process::id()
        ));
        let mut settings = SimSettings::dedicated_lanes();
        settings.ledger_scope = LedgerScope::Run;
        settings.save(&path).unwrap();

        let loaded = SimSettings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_file() {
        let result = SimSettings::load("/nonexistent/traffic_drift.json");
        assert!(matches!(result, Err(SimError::Io(_))));
    }
}
