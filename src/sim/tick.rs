//! Per-frame simulation tick and per-second fuel decay
//!
//! The two entry points run on independent clocks: [`tick`] once per
//! presentation frame, [`decay_fuel_and_time`] once per decay interval.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{AssetHandle, EndCause, Entity, GameEvent, Signal, World};
use crate::tuning::SpeedRange;

/// Movement intents from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Unit step in screen coordinates (y grows downward)
    pub fn unit(&self) -> Vec2 {
        match self {
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
            Direction::Up => Vec2::NEG_Y,
            Direction::Down => Vec2::Y,
        }
    }
}

/// Step the aircraft one speed unit in `direction`.
///
/// A step that would leave the field is dropped rather than clamped, so the
/// aircraft parks wherever its last legal step left it.
pub fn move_aircraft(world: &mut World, direction: Direction) {
    if world.terminated {
        return;
    }

    let aircraft = &world.aircraft;
    let next = aircraft.pos + direction.unit() * aircraft.speed;
    let max = world.field() - aircraft.size;

    if next.x >= 0.0 && next.y >= 0.0 && next.x <= max.x && next.y <= max.y {
        world.aircraft.pos = next;
    }
}

/// Advance one frame in place. See [`advance`].
pub fn tick<R: Rng + ?Sized>(world: &mut World, rng: &mut R) -> Signal {
    let (next, signal) = advance(world, rng);
    *world = next;
    signal
}

/// Compute the next frame from `world` without touching it.
///
/// Order within a frame:
/// 1. birds drift left and are dropped once fully off the left edge
/// 2. parachutes fall; caught ones add fuel, the rest are dropped below the field
/// 3. stars fall; caught ones add score, same removal rule
/// 4. independent spawn rolls for bird, parachute and star
/// 5. any bird overlapping the aircraft ends the run
pub fn advance<R: Rng + ?Sized>(world: &World, rng: &mut R) -> (World, Signal) {
    if world.terminated {
        let mut next = world.clone();
        next.events.clear();
        let signal = next.signal();
        return (next, signal);
    }

    let tuning = &world.tuning;
    let aircraft = world.aircraft.bounds();
    let height = world.height as f32;
    let mut events = Vec::new();

    let mut obstacles: Vec<Entity> = world
        .obstacles
        .iter()
        .map(|bird| drift(bird, Vec2::NEG_X))
        .filter(|bird| bird.bounds().right() > 0.0)
        .collect();

    // Caught pickups are consumed even if they also crossed the bottom edge
    let (caught_fuel, mut pickups_fuel): (Vec<Entity>, Vec<Entity>) = world
        .pickups_fuel
        .iter()
        .map(|p| drift(p, Vec2::Y))
        .partition(|p| p.bounds().overlaps(&aircraft));
    pickups_fuel.retain(|p| p.pos.y < height);

    let (caught_stars, mut pickups_score): (Vec<Entity>, Vec<Entity>) = world
        .pickups_score
        .iter()
        .map(|p| drift(p, Vec2::Y))
        .partition(|p| p.bounds().overlaps(&aircraft));
    pickups_score.retain(|p| p.pos.y < height);

    let mut fuel = world.fuel;
    for _ in &caught_fuel {
        fuel = fuel.saturating_add(tuning.fuel_bonus);
        events.push(GameEvent::FuelCollected { fuel });
    }

    let mut score = world.score;
    for _ in &caught_stars {
        score = score.saturating_add(tuning.score_bonus);
        events.push(GameEvent::StarCollected { score });
    }

    if rng.random_bool(tuning.obstacle_spawn_chance) {
        let bird = spawn_obstacle(world, rng);
        events.push(GameEvent::ObstacleSpawned { pos: bird.pos });
        obstacles.push(bird);
    }
    if rng.random_bool(tuning.fuel_spawn_chance) {
        let parachute = spawn_fuel_pickup(world, rng);
        events.push(GameEvent::FuelSpawned { pos: parachute.pos });
        pickups_fuel.push(parachute);
    }
    if rng.random_bool(tuning.score_spawn_chance) {
        let star = spawn_score_pickup(world, rng);
        events.push(GameEvent::StarSpawned { pos: star.pos });
        pickups_score.push(star);
    }

    let crashed = obstacles.iter().any(|bird| bird.bounds().overlaps(&aircraft));

    let mut next = World {
        obstacles,
        pickups_fuel,
        pickups_score,
        fuel,
        score,
        events,
        ..world.clone()
    };

    let signal = if crashed {
        next.events.push(GameEvent::Crashed);
        next.terminate(EndCause::Collision)
    } else {
        Signal::Continue
    };

    (next, signal)
}

/// Burn one unit of fuel and add one second to the clock.
///
/// The run ends on the call that leaves the tank at zero.
pub fn decay_fuel_and_time(world: &mut World) -> Signal {
    world.events.clear();
    if world.terminated {
        return world.signal();
    }

    world.fuel = world.fuel.saturating_sub(1);
    world.elapsed_time = world.elapsed_time.saturating_add(1);

    if world.fuel == 0 {
        world.events.push(GameEvent::FuelExhausted);
        return world.terminate(EndCause::FuelExhausted);
    }

    Signal::Continue
}

fn drift(entity: &Entity, direction: Vec2) -> Entity {
    Entity {
        pos: entity.pos + direction * entity.speed,
        ..entity.clone()
    }
}

fn roll_speed<R: Rng + ?Sized>(rng: &mut R, range: SpeedRange) -> f32 {
    rng.random_range(range.as_range())
}

/// New bird at the right edge, somewhere along its height
pub fn spawn_obstacle<R: Rng + ?Sized>(world: &World, rng: &mut R) -> Entity {
    let size = world.tuning.obstacle_size;
    let max_y = (world.height as f32 - size.y).max(0.0);
    Entity::new(
        Vec2::new(world.width as f32, rng.random_range(0.0..=max_y)),
        size,
        roll_speed(rng, world.tuning.obstacle_speed),
        world.sprites.bird,
    )
}

/// New parachute at the top edge
pub fn spawn_fuel_pickup<R: Rng + ?Sized>(world: &World, rng: &mut R) -> Entity {
    spawn_falling(
        world,
        rng,
        world.tuning.fuel_pickup_size,
        world.tuning.fuel_pickup_speed,
        world.sprites.parachute,
    )
}

/// New star at the top edge
pub fn spawn_score_pickup<R: Rng + ?Sized>(world: &World, rng: &mut R) -> Entity {
    spawn_falling(
        world,
        rng,
        world.tuning.score_pickup_size,
        world.tuning.score_pickup_speed,
        world.sprites.star,
    )
}

fn spawn_falling<R: Rng + ?Sized>(
    world: &World,
    rng: &mut R,
    size: Vec2,
    speed: SpeedRange,
    sprite: AssetHandle,
) -> Entity {
    let max_x = (world.width as f32 - size.x).max(0.0);
    Entity::new(
        Vec2::new(rng.random_range(0.0..=max_x), 0.0),
        size,
        roll_speed(rng, speed),
        sprite,
    )
}
