//! Demo application: a square steered by input actions
//!
//! The "Demo" profile holds three maps:
//! - `Player`: Jump (Space), Move (WASD or arrows), Sprint (left shift)
//! - `System`: ToggleDebug (F1), Quit (Escape)
//! - `Debug`: DumpState (F2), disabled until F1 is pressed

use std::cell::RefCell;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use softbuffer::{Context, Surface};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Window, WindowId};

use keyflow::winit_adapter::raw_event_from_window_event;
use keyflow::{Input, InputError, KeyCode, Vec2, Vec2Keys};

const PROFILE: &str = "Demo";
const DEBUG_MAP: &str = "Debug";

const BACKGROUND: u32 = 0x001E_1E2E;
const SQUARE: u32 = 0x0089_B4FA;
const SQUARE_SPRINT: u32 = 0x00F3_8BA8;
const SQUARE_JUMP: u32 = 0x00F9_E2AF;
const DEBUG_BORDER: u32 = 0x00A6_E3A1;

/// Square edge, as a fraction of the shorter window side
const SQUARE_SIZE: f32 = 0.08;
/// Screen fractions per second
const WALK_SPEED: f32 = 0.35;
const SPRINT_MULTIPLIER: f32 = 2.0;
/// Frames the square stays highlighted after a jump
const JUMP_FRAMES: u32 = 12;

/// State written by action callbacks and read by the simulation
#[derive(Debug, Default)]
pub struct DemoState {
    /// Normalized position, origin at the bottom-left
    pub position: Vec2,
    pub direction: Vec2,
    pub sprinting: bool,
    pub jumps: u32,
    pub jump_frames: u32,
    pub toggle_debug: bool,
    pub quit: bool,
}

impl DemoState {
    fn new() -> Self {
        Self {
            position: Vec2::new(0.5, 0.5),
            ..Self::default()
        }
    }

    fn step(&mut self, dt: f32) {
        let speed = if self.sprinting {
            WALK_SPEED * SPRINT_MULTIPLIER
        } else {
            WALK_SPEED
        };
        let next = self.position + self.direction.normalized_or_zero() * (speed * dt);
        self.position = Vec2::new(next.x.clamp(0.0, 1.0), next.y.clamp(0.0, 1.0));
        self.jump_frames = self.jump_frames.saturating_sub(1);
    }
}

/// Register the demo profile, wiring every action to `state`
pub fn build_profile(input: &mut Input, state: &Rc<RefCell<DemoState>>) -> Result<(), InputError> {
    input.create_profile(PROFILE, |profile| {
        profile.add_map("Player", |map| {
            let s = Rc::clone(state);
            map.add_action("Jump", move |action| {
                action.add_button("Keyboard", KeyCode::Space)?;
                action.started.add(move |_| {
                    let mut state = s.borrow_mut();
                    state.jumps += 1;
                    state.jump_frames = JUMP_FRAMES;
                    tracing::info!(jumps = state.jumps, "jump");
                });
                Ok(())
            })?;

            let performed = Rc::clone(state);
            let cancelled = Rc::clone(state);
            map.add_action("Move", move |action| {
                action.add_vec2_default("WASD", Vec2Keys::wasd())?;
                action.add_vec2_default("Arrows", Vec2Keys::arrows())?;
                action.started.add(|ctx| tracing::info!(keys = ?ctx.keys, "move started"));
                action.performed.add(move |ctx| {
                    if let Some(direction) = ctx.as_vec2() {
                        performed.borrow_mut().direction = direction;
                    }
                });
                action.cancelled.add(move |_| {
                    cancelled.borrow_mut().direction = Vec2::ZERO;
                    tracing::info!("move cancelled");
                });
                Ok(())
            })?;

            let started = Rc::clone(state);
            let cancelled = Rc::clone(state);
            map.add_action("Sprint", move |action| {
                action.add_button("Keyboard", KeyCode::LeftShift)?;
                action.started.add(move |_| started.borrow_mut().sprinting = true);
                action.cancelled.add(move |_| cancelled.borrow_mut().sprinting = false);
                Ok(())
            })?;
            Ok(())
        })?;

        profile.add_map("System", |map| {
            let s = Rc::clone(state);
            map.add_action("ToggleDebug", move |action| {
                action.add_button("Keyboard", KeyCode::F(1))?;
                action.started.add(move |_| s.borrow_mut().toggle_debug = true);
                Ok(())
            })?;

            let s = Rc::clone(state);
            map.add_action("Quit", move |action| {
                action.add_button("Keyboard", KeyCode::Escape)?;
                action.started.add(move |_| s.borrow_mut().quit = true);
                Ok(())
            })?;
            Ok(())
        })?;

        profile.add_map(DEBUG_MAP, |map| {
            let s = Rc::clone(state);
            map.add_action("DumpState", move |action| {
                action.add_button("Keyboard", KeyCode::F(2))?;
                action.started.add(move |ctx| {
                    tracing::info!(state = ?s.borrow(), modifiers = %ctx.modifiers, "state dump");
                });
                Ok(())
            })?;
            map.disable();
            Ok(())
        })?;
        Ok(())
    })?;
    Ok(())
}

pub struct App {
    input: Input,
    state: Rc<RefCell<DemoState>>,
    window: Option<Rc<Window>>,
    surface: Option<Surface<Rc<Window>, Rc<Window>>>,
    frame_interval: Duration,
    next_frame: Instant,
}

impl App {
    pub fn new(mut input: Input, frames_per_second: u32) -> Result<Self> {
        let state = Rc::new(RefCell::new(DemoState::new()));
        build_profile(&mut input, &state)?;

        Ok(Self {
            input,
            state,
            window: None,
            surface: None,
            frame_interval: Duration::from_secs(1) / frames_per_second.max(1),
            next_frame: Instant::now(),
        })
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("keyflow")
            .with_inner_size(LogicalSize::new(640, 480));

        let window = Rc::new(event_loop.create_window(window_attributes)?);
        let context = Context::new(Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create softbuffer context: {}", e))?;
        let surface = Surface::new(&context, Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create surface: {}", e))?;

        self.window = Some(window);
        self.surface = Some(surface);
        Ok(())
    }

    /// Run one input frame and the simulation step that follows it
    fn tick(&mut self, event_loop: &ActiveEventLoop) {
        self.input.update();

        let (toggle_debug, quit) = {
            let mut state = self.state.borrow_mut();
            state.step(self.frame_interval.as_secs_f32());
            (
                std::mem::take(&mut state.toggle_debug),
                std::mem::take(&mut state.quit),
            )
        };

        // Callbacks can't reach the input while it is updating, so map
        // toggles are applied between frames.
        if toggle_debug {
            if let Some(map) = self
                .input
                .profile_mut(PROFILE)
                .and_then(|profile| profile.map_mut(DEBUG_MAP))
            {
                if map.is_enabled() {
                    map.disable();
                } else {
                    map.enable();
                }
                tracing::info!(enabled = map.is_enabled(), "debug map toggled");
            }
        }

        if quit {
            tracing::info!(frames = self.input.frame(), "quit requested");
            event_loop.exit();
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn debug_enabled(&self) -> bool {
        self.input
            .profile(PROFILE)
            .and_then(|profile| profile.map(DEBUG_MAP))
            .is_some_and(|map| map.is_enabled())
    }

    fn render(&mut self) -> Result<()> {
        let debug = self.debug_enabled();
        let (Some(window), Some(surface)) = (&self.window, &mut self.surface) else {
            return Ok(());
        };

        let size = window.inner_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(());
        };
        surface
            .resize(width, height)
            .map_err(|e| anyhow::anyhow!("Failed to resize surface: {}", e))?;

        let (w, h) = (size.width as usize, size.height as usize);
        let mut buffer = surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("Failed to get buffer: {}", e))?;
        buffer.fill(BACKGROUND);

        let state = self.state.borrow();
        let color = if state.jump_frames > 0 {
            SQUARE_JUMP
        } else if state.sprinting {
            SQUARE_SPRINT
        } else {
            SQUARE
        };

        let side = ((w.min(h) as f32) * SQUARE_SIZE) as usize;
        let cx = (state.position.x * (w.saturating_sub(side)) as f32) as usize;
        let cy = ((1.0 - state.position.y) * (h.saturating_sub(side)) as f32) as usize;
        for y in cy..(cy + side).min(h) {
            let row = y * w;
            buffer[row + cx..row + (cx + side).min(w)].fill(color);
        }

        if debug {
            for x in 0..w {
                buffer[x] = DEBUG_BORDER;
                buffer[(h - 1) * w + x] = DEBUG_BORDER;
            }
            for y in 0..h {
                buffer[y * w] = DEBUG_BORDER;
                buffer[y * w + w - 1] = DEBUG_BORDER;
            }
        }

        buffer
            .present()
            .map_err(|e| anyhow::anyhow!("Failed to present buffer: {}", e))?;
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                tracing::error!("Failed to open window: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.window.as_ref().map(|w| w.id()) != Some(window_id) {
            return;
        }

        if let Some(raw) = raw_event_from_window_event(&event) {
            self.input.ingest(raw);
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    tracing::warn!("Render failed: {:#}", e);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_frame {
            self.tick(event_loop);
            self.next_frame += self.frame_interval;
            // Don't try to catch up after a stall
            if self.next_frame < now {
                self.next_frame = now + self.frame_interval;
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}
