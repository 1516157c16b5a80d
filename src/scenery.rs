//! Decorative cloud layer
//!
//! Clouds scroll behind the aircraft for a sense of speed. They never
//! collide with anything, so they live outside the simulation and the
//! host updates them once per frame alongside `sim::tick`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sim::AssetHandle;

pub const CLOUD_SIZE: Vec2 = Vec2::new(100.0, 60.0);
pub const CLOUD_MIN_SPEED: f32 = 0.5;
pub const CLOUD_MAX_SPEED: f32 = 1.5;

/// A single background cloud
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

/// All clouds for one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CloudLayer {
    pub clouds: Vec<Cloud>,
    pub sprite: Option<AssetHandle>,
    field: Vec2,
}

impl CloudLayer {
    /// Scatter `count` clouds across the upper half of the field
    pub fn new<R: Rng + ?Sized>(
        count: usize,
        field: Vec2,
        sprite: Option<AssetHandle>,
        rng: &mut R,
    ) -> Self {
        let clouds = (0..count)
            .map(|_| Cloud {
                pos: Vec2::new(rng.random_range(0.0..field.x), random_sky_y(field, rng)),
                size: CLOUD_SIZE,
                speed: rng.random_range(CLOUD_MIN_SPEED..CLOUD_MAX_SPEED),
            })
            .collect();
        Self {
            clouds,
            sprite,
            field,
        }
    }

    /// Empty layer (reduced motion)
    pub fn disabled(field: Vec2) -> Self {
        Self {
            clouds: Vec::new(),
            sprite: None,
            field,
        }
    }

    /// Drift left; clouds that leave re-enter at the right edge at a new height
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let field = self.field;
        for cloud in &mut self.clouds {
            cloud.pos.x -= cloud.speed;
            if cloud.pos.x + cloud.size.x < 0.0 {
                cloud.pos.x = field.x;
                cloud.pos.y = random_sky_y(field, rng);
            }
        }
    }
}

fn random_sky_y<R: Rng + ?Sized>(field: Vec2, rng: &mut R) -> f32 {
    let top_half = field.y / 2.0;
    if top_half > 0.0 {
        rng.random_range(0.0..top_half)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_clouds_start_in_upper_half() {
        let mut rng = Pcg32::seed_from_u64(1);
        let field = Vec2::new(1024.0, 768.0);
        let layer = CloudLayer::new(5, field, Some(AssetHandle(4)), &mut rng);
        assert_eq!(layer.clouds.len(), 5);
        for cloud in &layer.clouds {
            assert!(cloud.pos.x >= 0.0 && cloud.pos.x < 1024.0);
            assert!(cloud.pos.y >= 0.0 && cloud.pos.y < 384.0);
            assert!((CLOUD_MIN_SPEED..CLOUD_MAX_SPEED).contains(&cloud.speed));
        }
    }

    #[test]
    fn test_cloud_wraps_to_right_edge() {
        let mut rng = Pcg32::seed_from_u64(2);
        let field = Vec2::new(1024.0, 768.0);
        let mut layer = CloudLayer::new(1, field, None, &mut rng);
        layer.clouds[0].pos.x = -99.5;
        layer.clouds[0].speed = 1.0;

        layer.update(&mut rng);
        assert_eq!(layer.clouds[0].pos.x, 1024.0);
        assert!(layer.clouds[0].pos.y < 384.0);
    }

    #[test]
    fn test_disabled_layer_is_empty() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut layer = CloudLayer::disabled(Vec2::new(100.0, 100.0));
        layer.update(&mut rng);
        assert!(layer.clouds.is_empty());
    }
}
