//! Deterministic simulation module
//!
//! All traffic logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only
//! - Stable iteration order (vehicle list order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod evasion;
pub mod ledger;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{
    center_distance, circle_overlap, circle_rect_overlap, rect_overlap, vehicles_overlap,
};
pub use evasion::evade;
pub use ledger::CollisionLedger;
pub use spawn::{place_vehicle, respawn_position};
pub use state::{Vehicle, VehicleKind, VehicleView, World, WorldSnapshot};
pub use tick::{FrameContext, tick, update_vehicle};
