//! Projectile lifecycle management system.
//!
//! Owns the live arrows and their physics config, providing spawn / update /
//! contact / iterate operations with zero renderer coupling. Delayed gravity
//! is a one-shot event per arrow that fires once the arrow's own age passes
//! its delay, so it never depends on how long the world has been running.

use glam::Vec2;
use tracing::debug;

use crate::game::config::AimConfig;
use crate::game::error::SpawnError;
use crate::physics::ballistics::{BallisticsConfig, Projectile, ProjectileState};

/// Everything needed to put an arrow in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub origin: Vec2,
    pub velocity: Vec2,
    /// Sprite orientation in degrees
    pub rotation_degrees: f32,
    /// Multiplier on world gravity once gravity is enabled
    pub gravity_scale: f32,
    /// Seconds of straight flight before gravity engages
    pub gravity_delay: f32,
}

/// Stable identifier of a spawned projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileHandle(pub u64);

/// Anything that can take a launch and put a projectile in the world.
pub trait ProjectileSpawner {
    fn spawn(&mut self, launch: &Launch) -> Result<ProjectileHandle, SpawnError>;
}

impl<S: ProjectileSpawner + ?Sized> ProjectileSpawner for &mut S {
    fn spawn(&mut self, launch: &Launch) -> Result<ProjectileHandle, SpawnError> {
        (**self).spawn(launch)
    }
}

/// Why a projectile left the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyReason {
    /// Caller reported a collision
    Contact,
    /// Fell through the ground plane
    Ground,
    /// Outlived `max_lifetime`
    Expired,
}

/// A live arrow.
#[derive(Debug, Clone, Copy)]
pub struct Arrow {
    pub handle: ProjectileHandle,
    pub projectile: Projectile,
    /// Sprite orientation set at spawn
    pub rotation_degrees: f32,
    /// Clock time the arrow was spawned
    pub spawned_at: f32,
    /// Age at which gravity switches on, while still pending
    gravity_after: Option<f32>,
}

impl Arrow {
    /// Whether the delayed gravity event has not fired yet.
    pub fn gravity_pending(&self) -> bool {
        self.gravity_after.is_some()
    }
}

/// Per-projectile data returned by [`ProjectileSystem::update`] so the caller
/// can run collision checks against the world without reaching into the system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileUpdate {
    pub handle: ProjectileHandle,
    /// Position before this frame's integration step.
    pub prev_pos: Vec2,
    /// Position after this frame's integration step.
    pub new_pos: Vec2,
    /// Physics state after integration.
    pub state: ProjectileState,
    /// Delayed gravity switched on during this step.
    pub gravity_enabled: bool,
    /// Set when the projectile was removed at the end of this step.
    pub destroyed: Option<DestroyReason>,
}

/// Manages the full lifecycle of arrows.
///
/// Ground hits and expiry are removed inside [`update`](Self::update);
/// collisions found by the caller are reported back via
/// [`notify_contact`](Self::notify_contact).
pub struct ProjectileSystem {
    arrows: Vec<Arrow>,
    config: BallisticsConfig,
    clock: f32,
    next_handle: u64,
    /// Maximum number of simultaneously active projectiles.
    pub max_projectiles: usize,
}

impl ProjectileSystem {
    /// Create a new system with the given ballistics configuration.
    pub fn new(config: BallisticsConfig) -> Self {
        Self {
            arrows: Vec::new(),
            config,
            clock: 0.0,
            next_handle: 0,
            max_projectiles: 32,
        }
    }

    /// World gravity, ground, lifetime and cap taken from an aim config.
    pub fn from_config(config: &AimConfig) -> Self {
        let projectile = &config.projectile;
        let mut system = Self::new(BallisticsConfig {
            gravity: projectile.gravity,
            ground_y: projectile.ground_y,
            max_lifetime: projectile.max_lifetime,
        });
        system.max_projectiles = projectile.max_projectiles;
        system
    }

    /// Seconds of simulated time since creation.
    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Integrate physics for every active projectile.
    ///
    /// Pending gravity events due before the end of the step are applied
    /// first, splitting the step at the exact enable time. Projectiles that
    /// hit the ground or expire are removed after integration.
    pub fn update(&mut self, delta: f32) -> Vec<ProjectileUpdate> {
        let mut updates = Vec::with_capacity(self.arrows.len());

        for arrow in &mut self.arrows {
            let prev_pos = arrow.projectile.position;
            let mut remaining = delta;
            let mut gravity_enabled = false;
            let mut state = ProjectileState::Flying;

            if let Some(delay) = arrow.gravity_after {
                let age = arrow.projectile.age;
                if delay < age + delta {
                    let straight = (delay - age).clamp(0.0, delta);
                    if straight > 0.0 {
                        state = arrow.projectile.integrate(&self.config, straight);
                    }
                    remaining = delta - straight;
                    arrow.projectile.gravity_active = true;
                    arrow.gravity_after = None;
                    gravity_enabled = true;
                    debug!(handle = arrow.handle.0, delay, "Arrow gravity enabled");
                }
            }

            if arrow.projectile.active {
                state = arrow.projectile.integrate(&self.config, remaining);
            }

            let destroyed = match state {
                ProjectileState::Flying => None,
                ProjectileState::Hit { .. } => Some(DestroyReason::Ground),
                ProjectileState::Expired => Some(DestroyReason::Expired),
            };
            if let Some(reason) = destroyed {
                debug!(
                    handle = arrow.handle.0,
                    ?reason,
                    x = arrow.projectile.position.x,
                    y = arrow.projectile.position.y,
                    distance = arrow.projectile.distance_traveled,
                    "Arrow destroyed"
                );
            }

            updates.push(ProjectileUpdate {
                handle: arrow.handle,
                prev_pos,
                new_pos: arrow.projectile.position,
                state,
                gravity_enabled,
                destroyed,
            });
        }

        self.arrows.retain(|arrow| arrow.projectile.active);
        self.clock += delta;
        updates
    }

    /// Destroy a projectile on its first contact.
    ///
    /// Returns the projectile as it was at impact, or `None` if the handle
    /// is no longer live. Its pending gravity event is dropped with it.
    pub fn notify_contact(&mut self, handle: ProjectileHandle) -> Option<Projectile> {
        let index = self.arrows.iter().position(|a| a.handle == handle)?;
        let arrow = self.arrows.swap_remove(index);
        debug!(handle = handle.0, reason = ?DestroyReason::Contact, "Arrow destroyed");
        Some(arrow.projectile)
    }

    /// Look up a live arrow.
    pub fn get(&self, handle: ProjectileHandle) -> Option<&Arrow> {
        self.arrows.iter().find(|a| a.handle == handle)
    }

    /// Remove all projectiles.
    pub fn clear(&mut self) {
        self.arrows.clear();
    }

    /// Number of currently active projectiles.
    pub fn active_count(&self) -> usize {
        self.arrows.len()
    }

    /// Iterate over live arrows (e.g. for sprite placement).
    pub fn iter(&self) -> impl Iterator<Item = &Arrow> {
        self.arrows.iter()
    }

    /// Access the ballistics configuration.
    pub fn config(&self) -> &BallisticsConfig {
        &self.config
    }

    /// Mutably access the ballistics configuration.
    pub fn config_mut(&mut self) -> &mut BallisticsConfig {
        &mut self.config
    }
}

impl ProjectileSpawner for ProjectileSystem {
    fn spawn(&mut self, launch: &Launch) -> Result<ProjectileHandle, SpawnError> {
        if !launch.origin.is_finite() {
            return Err(SpawnError::InvalidLaunch("origin is not finite"));
        }
        if !launch.velocity.is_finite() {
            return Err(SpawnError::InvalidLaunch("velocity is not finite"));
        }
        if self.arrows.len() >= self.max_projectiles {
            return Err(SpawnError::CapacityExhausted {
                limit: self.max_projectiles,
            });
        }

        let handle = ProjectileHandle(self.next_handle);
        self.next_handle += 1;

        let mut projectile =
            Projectile::with_velocity(launch.origin, launch.velocity, launch.gravity_scale);
        let gravity_after = if launch.gravity_delay > 0.0 {
            projectile.gravity_active = false;
            Some(launch.gravity_delay)
        } else {
            None
        };

        self.arrows.push(Arrow {
            handle,
            projectile,
            rotation_degrees: launch.rotation_degrees,
            spawned_at: self.clock,
            gravity_after,
        });
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::types::WORLD_GRAVITY;

    fn launch(velocity: Vec2, delay: f32) -> Launch {
        Launch {
            origin: Vec2::ZERO,
            velocity,
            rotation_degrees: 0.0,
            gravity_scale: 0.8,
            gravity_delay: delay,
        }
    }

    fn system() -> ProjectileSystem {
        ProjectileSystem::new(BallisticsConfig::with_gravity(WORLD_GRAVITY))
    }

    #[test]
    fn test_gravity_waits_for_delay() {
        let mut world = system();
        let handle = world.spawn(&launch(Vec2::new(10.0, 5.0), 0.2)).unwrap();

        // 0.1 + 0.1 lands exactly on the delay mark
        world.update(0.1);
        world.update(0.1);
        let arrow = world.get(handle).unwrap();
        assert_eq!(arrow.projectile.velocity, Vec2::new(10.0, 5.0));
        assert!(arrow.gravity_pending());

        let updates = world.update(0.1);
        assert!(updates[0].gravity_enabled);
        let arrow = world.get(handle).unwrap();
        assert!(arrow.projectile.velocity.y < 5.0);
        let expected = 5.0 + WORLD_GRAVITY.y * 0.8 * 0.1;
        assert!((arrow.projectile.velocity.y - expected).abs() < 1e-4);
        assert_eq!(arrow.projectile.velocity.x, 10.0);
    }

    #[test]
    fn test_gravity_split_mid_step() {
        let mut world = system();
        let handle = world.spawn(&launch(Vec2::new(10.0, 5.0), 0.05)).unwrap();
        world.update(0.2);
        let p = world.get(handle).unwrap().projectile;
        let g = WORLD_GRAVITY.y * 0.8;
        assert!((p.velocity.y - (5.0 + g * 0.15)).abs() < 1e-4);
        assert!((p.position.y - (5.0 * 0.2 + 0.5 * g * 0.15 * 0.15)).abs() < 1e-4);
    }

    #[test]
    fn test_zero_delay_falls_immediately() {
        let mut world = system();
        let handle = world.spawn(&launch(Vec2::new(10.0, 0.0), 0.0)).unwrap();
        assert!(!world.get(handle).unwrap().gravity_pending());
        world.update(0.1);
        assert!(world.get(handle).unwrap().projectile.velocity.y < 0.0);
    }

    #[test]
    fn test_capacity_exhausted() {
        let mut world = system();
        world.max_projectiles = 2;
        world.spawn(&launch(Vec2::X, 0.0)).unwrap();
        world.spawn(&launch(Vec2::X, 0.0)).unwrap();
        assert_eq!(
            world.spawn(&launch(Vec2::X, 0.0)),
            Err(SpawnError::CapacityExhausted { limit: 2 })
        );
        assert_eq!(world.active_count(), 2);
    }

    #[test]
    fn test_rejects_non_finite_launch() {
        let mut world = system();
        let err = world.spawn(&launch(Vec2::new(f32::NAN, 0.0), 0.0)).unwrap_err();
        assert!(matches!(err, SpawnError::InvalidLaunch(_)));
        assert_eq!(world.active_count(), 0);
    }

    #[test]
    fn test_contact_destroys_once() {
        let mut world = system();
        let a = world.spawn(&launch(Vec2::X, 0.2)).unwrap();
        let b = world.spawn(&launch(Vec2::X, 0.2)).unwrap();
        assert_ne!(a, b);

        assert!(world.notify_contact(a).is_some());
        assert!(world.notify_contact(a).is_none());
        assert_eq!(world.active_count(), 1);

        // Dropped gravity event must not touch the survivor
        let updates = world.update(0.5);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].handle, b);
    }

    #[test]
    fn test_ground_and_lifetime_removal() {
        let mut world = ProjectileSystem::new(BallisticsConfig {
            gravity: WORLD_GRAVITY,
            ground_y: Some(-1.0),
            max_lifetime: Some(100.0),
        });
        world.spawn(&launch(Vec2::new(1.0, 0.0), 0.0)).unwrap();
        let mut reason = None;
        for _ in 0..120 {
            for update in world.update(1.0 / 60.0) {
                reason = reason.or(update.destroyed);
            }
        }
        assert_eq!(reason, Some(DestroyReason::Ground));
        assert_eq!(world.active_count(), 0);

        let mut world = ProjectileSystem::new(BallisticsConfig {
            gravity: Vec2::ZERO,
            ground_y: None,
            max_lifetime: Some(0.5),
        });
        world.spawn(&launch(Vec2::X, 0.0)).unwrap();
        world.update(0.3);
        let updates = world.update(0.3);
        assert_eq!(updates[0].destroyed, Some(DestroyReason::Expired));
        assert_eq!(world.active_count(), 0);
    }

    #[test]
    fn test_clock_advances_and_stamps_spawn_time() {
        let mut world = system();
        world.update(1.0);
        let handle = world.spawn(&launch(Vec2::X, 0.2)).unwrap();
        assert_eq!(world.get(handle).unwrap().spawned_at, 1.0);
        world.update(0.1);
        assert!(world.get(handle).unwrap().gravity_pending());
        world.update(0.2);
        assert!(!world.get(handle).unwrap().gravity_pending());
        assert!((world.clock() - 1.3).abs() < 1e-5);
    }

    #[test]
    fn test_gravity_delay_counts_arrow_age_on_old_world() {
        let mut world = system();
        // At this clock a 1/60 s step no longer moves an f32 clock
        world.update(1.0e7);
        let handle = world.spawn(&launch(Vec2::new(10.0, 5.0), 0.2)).unwrap();

        for _ in 0..6 {
            world.update(0.03);
        }
        let arrow = world.get(handle).unwrap();
        assert!(arrow.gravity_pending());
        assert_eq!(arrow.projectile.velocity.y, 5.0);

        let updates = world.update(0.03);
        assert!(updates[0].gravity_enabled);
        let vy = world.get(handle).unwrap().projectile.velocity.y;
        let expected = 5.0 + WORLD_GRAVITY.y * 0.8 * 0.01;
        assert!((vy - expected).abs() < 1e-3, "vy {vy} expected {expected}");
    }

    #[test]
    fn test_from_config() {
        let config = AimConfig::default();
        let world = ProjectileSystem::from_config(&config);
        assert_eq!(world.max_projectiles, 32);
        assert_eq!(world.config().max_lifetime, Some(10.0));
        assert_eq!(world.config().gravity, WORLD_GRAVITY);
    }
}
