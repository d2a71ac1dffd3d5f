//! Ballistics simulation for arrows in the world plane.
//!
//! Provides the projectile body that flies after release. Gravity can be
//! switched off for the first moments of flight (the bow keeps the launch
//! visually flat) and is switched back on by the owning system.
//!
//! # Example
//!
//! ```ignore
//! use bowshot_engine::physics::ballistics::{Projectile, BallisticsConfig};
//! use glam::Vec2;
//!
//! let config = BallisticsConfig::default();
//! let mut arrow = Projectile::with_velocity(Vec2::ZERO, Vec2::new(30.0, 6.0), 0.8);
//! arrow.integrate(&config, 1.0 / 60.0);
//! ```

use glam::Vec2;

use super::types::WORLD_GRAVITY;

/// An arrow in flight.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    /// Current position in world space
    pub position: Vec2,
    /// Current velocity (units/second)
    pub velocity: Vec2,
    /// Multiplier on world gravity once gravity is active
    pub gravity_scale: f32,
    /// Whether gravity currently acts on the projectile
    pub gravity_active: bool,
    /// Seconds since spawn
    pub age: f32,
    /// Whether the projectile is still being simulated
    pub active: bool,
    /// Total distance traveled since spawn
    pub distance_traveled: f32,
}

impl Default for Projectile {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            gravity_scale: 1.0,
            gravity_active: true,
            age: 0.0,
            active: true,
            distance_traveled: 0.0,
        }
    }
}

impl Projectile {
    /// Spawn a projectile with gravity active and an initial velocity.
    pub fn with_velocity(position: Vec2, velocity: Vec2, gravity_scale: f32) -> Self {
        Self {
            position,
            velocity,
            gravity_scale,
            ..Default::default()
        }
    }

    /// Acceleration currently acting on the projectile.
    pub fn acceleration(&self, config: &BallisticsConfig) -> Vec2 {
        if self.gravity_active {
            config.gravity * self.gravity_scale
        } else {
            Vec2::ZERO
        }
    }

    /// Integrate the projectile over a time step.
    ///
    /// Acceleration is constant within a step, so the step is integrated
    /// exactly (`p += v*dt + ½a*dt²`, then `v += a*dt`). This keeps the live
    /// path on top of the closed-form preview instead of drifting the way
    /// Euler stepping would.
    pub fn integrate(&mut self, config: &BallisticsConfig, dt: f32) -> ProjectileState {
        if !self.active {
            return ProjectileState::Expired;
        }

        let acceleration = self.acceleration(config);
        let displacement = self.velocity * dt + 0.5 * acceleration * dt * dt;
        self.velocity += acceleration * dt;
        self.position += displacement;
        self.distance_traveled += displacement.length();
        self.age += dt;

        if let Some(lifetime) = config.max_lifetime {
            if self.age >= lifetime {
                self.active = false;
                return ProjectileState::Expired;
            }
        }

        if let Some(ground_y) = config.ground_y {
            if self.position.y < ground_y {
                self.active = false;
                self.position.y = ground_y;
                return ProjectileState::Hit {
                    position: self.position,
                    normal: Vec2::Y,
                };
            }
        }

        ProjectileState::Flying
    }

    /// Facing of the projectile sprite in degrees, derived from its velocity.
    pub fn heading_degrees(&self) -> f32 {
        self.velocity.y.atan2(self.velocity.x).to_degrees()
    }
}

/// Global parameters for the projectile world.
#[derive(Debug, Clone, Copy)]
pub struct BallisticsConfig {
    /// Unscaled gravity acceleration
    pub gravity: Vec2,
    /// Flat ground plane; crossing it counts as a hit
    pub ground_y: Option<f32>,
    /// Seconds after which a projectile that never touched anything expires
    pub max_lifetime: Option<f32>,
}

impl Default for BallisticsConfig {
    fn default() -> Self {
        Self {
            gravity: WORLD_GRAVITY,
            ground_y: None,
            max_lifetime: Some(10.0),
        }
    }
}

impl BallisticsConfig {
    /// Config with custom gravity, no ground and no lifetime cap.
    pub fn with_gravity(gravity: Vec2) -> Self {
        Self {
            gravity,
            ground_y: None,
            max_lifetime: None,
        }
    }
}

/// The current state of a projectile in the simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ProjectileState {
    /// Still flying
    #[default]
    Flying,
    /// Touched the ground plane
    Hit {
        /// Position where the hit occurred
        position: Vec2,
        /// Surface normal at the hit point
        normal: Vec2,
    },
    /// Exceeded its lifetime
    Expired,
}
