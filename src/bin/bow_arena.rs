//! Bow Arena - Drag-to-Aim Prototype
//!
//! Run with: `cargo run --bin bow_arena [config.json | --slingshot]`
//!
//! Controls:
//! - Left-drag: Pull the bow, release to shoot
//! - ESC: Cancel the current pull
//! - C: Clear all arrows
//!
//! Drawing is left to the host engine; the arena window shows aim and
//! arrow state in its title, and `RUST_LOG=debug` traces every arrow.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::Instant;

use anyhow::Context;
use bowshot_engine::camera::OrthoCamera2D;
use bowshot_engine::game::config::{AimConfig, PoseKind};
use bowshot_engine::game::pose::TransformPose;
use bowshot_engine::game::{AimSystem, ProjectileSystem};
use bowshot_engine::input::{MouseButton, MouseState};
use bowshot_engine::render::DotPool;
use bowshot_engine::rig::MemoryRig;
use glam::Vec2;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

/// Ground plane used when the config has none.
const ARENA_GROUND_Y: f32 = -6.0;
/// Target wall: arrows crossing this X inside the band stick.
const TARGET_X: f32 = 40.0;
const TARGET_BAND: (f32, f32) = (-6.0, 4.0);
/// Longest frame step fed to the simulation.
const MAX_FRAME_DT: f32 = 0.1;

/// Character pose shared with the aim system so the title can show it.
enum Character {
    Rig {
        rig: Rc<RefCell<MemoryRig>>,
        head: String,
        body: String,
    },
    Turned(Rc<RefCell<TransformPose>>),
    Fixed,
}

impl Character {
    fn describe(&self) -> String {
        match self {
            Character::Rig { rig, head, body } => {
                let rig = rig.borrow();
                format!(
                    "head {:.0}° body {:.0}°",
                    rig.angle_of(head).unwrap_or(0.0),
                    rig.angle_of(body).unwrap_or(0.0)
                )
            }
            Character::Turned(pose) => format!("facing {:.0}°", pose.borrow().rotation_degrees),
            Character::Fixed => "static".to_string(),
        }
    }
}

struct Arena {
    camera: OrthoCamera2D,
    mouse: MouseState,
    aim: AimSystem,
    arrows: ProjectileSystem,
    dots: Rc<RefCell<DotPool>>,
    character: Character,
    last_frame: Instant,
    hits: u32,
}

impl Arena {
    fn new(mut config: AimConfig) -> anyhow::Result<Self> {
        if config.projectile.ground_y.is_none() {
            config.projectile.ground_y = Some(ARENA_GROUND_Y);
        }

        let dots = Rc::new(RefCell::new(DotPool::new(
            config.trajectory.sample_count,
            config.fire_point,
        )));
        let arrows = ProjectileSystem::from_config(&config);

        let mut builder = AimSystem::builder(config.clone()).trajectory_renderer(dots.clone());
        if config.aim_line.is_some() {
            builder = builder.aim_line_renderer(DotPool::new(
                config.aim_line.as_ref().map_or(0, |line| line.points),
                config.fire_point,
            ));
        }
        let character = match config.pose {
            PoseKind::Rig => {
                let rig = Rc::new(RefCell::new(
                    MemoryRig::new()
                        .with_bone(&config.rig.body.name)
                        .with_bone(&config.rig.head.name),
                ));
                builder = builder.rig(rig.clone());
                Character::Rig {
                    rig,
                    head: config.rig.head.name.clone(),
                    body: config.rig.body.name.clone(),
                }
            }
            PoseKind::Transform => {
                let pose = Rc::new(RefCell::new(TransformPose::new()));
                builder = builder.pose(pose.clone());
                Character::Turned(pose)
            }
            PoseKind::None => Character::Fixed,
        };
        let aim = builder.build().context("building aim system")?;

        Ok(Self {
            camera: OrthoCamera2D::new(Vec2::new(15.0, 2.0), 24.0, Vec2::new(1280.0, 720.0)),
            mouse: MouseState::new(),
            aim,
            arrows,
            dots,
            character,
            last_frame: Instant::now(),
            hits: 0,
        })
    }

    fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(MAX_FRAME_DT);
        self.last_frame = now;

        // Spawn errors are already logged; the next pull starts fresh
        if let Ok(report) = self.aim.tick(&self.mouse, &mut self.arrows, dt) {
            if let Some(fired) = report.fired {
                debug!(
                    handle = fired.handle.0,
                    rotation = fired.shot.rotation_degrees,
                    "Arrow sprite placed"
                );
            }
        }

        let mut contacts = Vec::new();
        for update in self.arrows.update(dt) {
            let crossed = update.prev_pos.x < TARGET_X && update.new_pos.x >= TARGET_X;
            let in_band = (TARGET_BAND.0..=TARGET_BAND.1).contains(&update.new_pos.y);
            if update.destroyed.is_none() && crossed && in_band {
                contacts.push(update.handle);
            }
        }
        for handle in contacts {
            if let Some(arrow) = self.arrows.notify_contact(handle) {
                self.hits += 1;
                info!(hits = self.hits, y = arrow.position.y, "Target hit");
            }
        }

        self.mouse.end_frame();
    }

    fn title(&self) -> String {
        let aim = match self.aim.phase().aim() {
            Some(state) => format!(
                "pull {:.0}% power {:.1}",
                state.pull_normalized * 100.0,
                state.power
            ),
            None => "idle".to_string(),
        };
        format!(
            "Bow Arena - {aim} | {} | dots {} | arrows {} | hits {}",
            self.character.describe(),
            self.dots.borrow().visible_count(),
            self.arrows.active_count(),
            self.hits
        )
    }

    fn handle_cursor(&mut self, x: f64, y: f64) {
        let world = self.camera.screen_to_world(Vec2::new(x as f32, y as f32));
        self.mouse.set_world_position(world);
    }
}

fn map_button(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Left,
        winit::event::MouseButton::Right => MouseButton::Right,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        winit::event::MouseButton::Back => MouseButton::Other(3),
        winit::event::MouseButton::Forward => MouseButton::Other(4),
        winit::event::MouseButton::Other(id) => MouseButton::Other(id),
    }
}

struct App {
    arena: Arena,
    window: Option<Window>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title("Bow Arena")
            .with_inner_size(PhysicalSize::new(1280, 720));
        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                self.arena.camera.set_viewport(size.width, size.height);
                info!(width = size.width, height = size.height, "Arena window ready");
                self.window = Some(window);
            }
            Err(e) => {
                warn!(error = %e, "Failed to create window");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let arena = &mut self.arena;

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => arena.camera.set_viewport(size.width, size.height),
            WindowEvent::CursorMoved { position, .. } => {
                arena.handle_cursor(position.x, position.y);
            }
            WindowEvent::MouseInput { button, state, .. } => {
                arena
                    .mouse
                    .set_button(map_button(button), state == ElementState::Pressed);
            }
            WindowEvent::Focused(false) => {
                arena.aim.cancel();
                arena.mouse.reset();
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Escape) => {
                        arena.aim.cancel();
                    }
                    PhysicalKey::Code(KeyCode::KeyC) => {
                        arena.arrows.clear();
                        info!("Arrows cleared");
                    }
                    _ => {}
                }
            }
            WindowEvent::RedrawRequested => {
                arena.frame();
                if let Some(window) = &self.window {
                    window.set_title(&arena.title());
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn load_config() -> anyhow::Result<AimConfig> {
    match std::env::args().nth(1).as_deref() {
        None => Ok(AimConfig::default()),
        Some("--slingshot") => Ok(AimConfig::slingshot()),
        Some(path) => AimConfig::load(Path::new(path))
            .with_context(|| format!("loading aim config from {path}")),
    }
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config()?;
    info!(mode = ?config.mode, pose = ?config.pose, "Starting bow arena");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App {
        arena: Arena::new(config)?,
        window: None,
    };
    event_loop.run_app(&mut app)?;
    Ok(())
}
