//! Idle/demo mode - AI flies the aircraft
//!
//! Produces one movement intent per frame from the current world snapshot.
//! Birds in the flight path take priority; otherwise it chases the closest
//! pickup, preferring parachutes when the tank is low.

use glam::Vec2;

use crate::sim::{Bounds, Direction, Entity, World};

/// How far ahead (pixels) a bird counts as a threat
const LOOKAHEAD: f32 = 140.0;
/// Extra vertical clearance kept around birds
const CLEARANCE: f32 = 12.0;
/// Fuel level at which parachutes beat stars
const LOW_FUEL: u32 = 5;
/// Within this distance the aircraft stops adjusting toward a target
const DEADZONE: f32 = 4.0;

/// Heuristic pilot
#[derive(Debug, Clone, Default)]
pub struct Autopilot;

impl Autopilot {
    pub fn new() -> Self {
        Self
    }

    /// Pick a direction for this frame (None = hold position)
    pub fn decide(&self, world: &World) -> Option<Direction> {
        if world.terminated {
            return None;
        }
        if let Some(dir) = self.evade(world) {
            return Some(dir);
        }
        self.target(world).and_then(|goal| steer_toward(world, goal))
    }

    /// Dodge the nearest bird heading into the aircraft's corridor
    fn evade(&self, world: &World) -> Option<Direction> {
        let plane = world.aircraft.bounds();
        let danger = Bounds::new(
            plane.pos - Vec2::new(0.0, CLEARANCE),
            plane.size + Vec2::new(LOOKAHEAD, 2.0 * CLEARANCE),
        );

        let threat = world
            .obstacles
            .iter()
            .filter(|bird| bird.bounds().overlaps(&danger))
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))?;

        let plane_center = plane.center().y;
        let bird_center = threat.bounds().center().y;
        let room_above = plane.top();
        let room_below = world.height as f32 - plane.bottom();

        let go_up = if (plane_center - bird_center).abs() < f32::EPSILON {
            room_above > room_below
        } else {
            plane_center < bird_center
        };

        // Cornered against an edge: break the other way
        match (go_up, room_above < world.aircraft.speed, room_below < world.aircraft.speed) {
            (true, true, _) => Some(Direction::Down),
            (false, _, true) => Some(Direction::Up),
            (true, false, _) => Some(Direction::Up),
            (false, _, false) => Some(Direction::Down),
        }
    }

    /// Center of the pickup worth chasing
    fn target(&self, world: &World) -> Option<Vec2> {
        let plane = world.aircraft.bounds().center();
        let nearest = |pickups: &[Entity]| {
            pickups
                .iter()
                .map(|p| p.bounds().center())
                .min_by(|a, b| a.distance_squared(plane).total_cmp(&b.distance_squared(plane)))
        };

        let fuel = nearest(&world.pickups_fuel);
        let star = nearest(&world.pickups_score);
        if world.fuel <= LOW_FUEL {
            fuel.or(star)
        } else {
            match (fuel, star) {
                (Some(f), Some(s)) => {
                    Some(if f.distance_squared(plane) < s.distance_squared(plane) {
                        f
                    } else {
                        s
                    })
                }
                (f, s) => s.or(f),
            }
        }
    }
}

/// Step along whichever axis is further from the goal
fn steer_toward(world: &World, goal: Vec2) -> Option<Direction> {
    let delta = goal - world.aircraft.bounds().center();
    if delta.x.abs() <= DEADZONE && delta.y.abs() <= DEADZONE {
        return None;
    }
    let dir = if delta.x.abs() >= delta.y.abs() {
        if delta.x < 0.0 {
            Direction::Left
        } else {
            Direction::Right
        }
    } else if delta.y < 0.0 {
        Direction::Up
    } else {
        Direction::Down
    };
    Some(dir)
}
