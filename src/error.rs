//! Error types
//!
//! The simulation step itself cannot fail; errors come from world setup
//! (placement, settings validation) and settings file access.

use thiserror::Error;

use crate::sim::VehicleKind;

#[derive(Debug, Error)]
pub enum SimError {
    /// No clear spawn position was found within the attempt cap
    #[error("no free spawn position for {kind:?} after {attempts} attempts (too many vehicles for the screen?)")]
    SpawnSaturated { kind: VehicleKind, attempts: u32 },
    /// Settings failed validation
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings format: {0}")]
    Json(#[from] serde_json::Error),
}
