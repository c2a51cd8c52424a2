//! Overlap tests between vehicle shapes
//!
//! Motorcycles are circles (diameter = size), cars are axis-aligned
//! rectangles (size x height). All positions are shape centres.

use glam::Vec2;

use super::state::{Vehicle, VehicleKind};
use crate::closest_point_in_box;

/// Circle vs circle
#[inline]
pub fn circle_overlap(a_pos: Vec2, a_diameter: f32, b_pos: Vec2, b_diameter: f32) -> bool {
    a_pos.distance(b_pos) < (a_diameter + b_diameter) / 2.0
}

/// Axis-aligned rectangle vs rectangle (sizes are full width/height)
#[inline]
pub fn rect_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    let delta = (a_pos - b_pos).abs();
    let reach = (a_size + b_size) * 0.5;
    delta.x < reach.x && delta.y < reach.y
}

/// Circle vs axis-aligned rectangle
///
/// Clamps the circle centre into the rectangle to find the nearest point on
/// it, then compares that distance to the circle radius.
#[inline]
pub fn circle_rect_overlap(circle_pos: Vec2, diameter: f32, rect_pos: Vec2, rect_size: Vec2) -> bool {
    let nearest = closest_point_in_box(circle_pos, rect_pos, rect_size);
    circle_pos.distance(nearest) < diameter / 2.0
}

/// Centre-to-centre distance, regardless of shape
#[inline]
pub fn center_distance(a: &Vehicle, b: &Vehicle) -> f32 {
    a.pos.distance(b.pos)
}

/// Shape-aware overlap between two vehicles (argument order does not matter)
pub fn vehicles_overlap(a: &Vehicle, b: &Vehicle) -> bool {
    let rect = |v: &Vehicle| Vec2::new(v.size(), v.height());
    match (a.kind(), b.kind()) {
        (VehicleKind::Motorcycle, VehicleKind::Motorcycle) => {
            circle_overlap(a.pos, a.size(), b.pos, b.size())
        }
        (VehicleKind::Car, VehicleKind::Car) => rect_overlap(a.pos, rect(a), b.pos, rect(b)),
        (VehicleKind::Motorcycle, VehicleKind::Car) => {
            circle_rect_overlap(a.pos, a.size(), b.pos, rect(b))
        }
        (VehicleKind::Car, VehicleKind::Motorcycle) => {
            circle_rect_overlap(b.pos, b.size(), a.pos, rect(a))
        }
    }
}
