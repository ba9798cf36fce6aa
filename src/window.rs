//! Windowed host for the fountain demo.
//!
//! Owns the window, the GPU state, and the emitter. Each redraw advances the
//! frame clock, steps the simulation, and hands the emitter to the renderer.

use std::sync::Arc;

use glam::Vec3;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::emitter::EmitterConfig;
use crate::error::DemoError;
use crate::gpu::GpuState;
use crate::system::ParticleEmitterSystem;
use crate::texture::SpriteImage;
use crate::time::FrameClock;

/// Radius of the circle the fountain anchor travels around the origin.
const ANCHOR_ORBIT_RADIUS: f32 = 0.6;
/// Height of the fountain anchor above the origin.
const ANCHOR_HEIGHT: f32 = 0.25;
/// How many frames between window-title refreshes.
const TITLE_REFRESH_FRAMES: u64 = 30;

/// Anchor position at `secs` seconds into the run. The emitter trails this
/// point, so moving it makes the fountain paint an arc of particles.
fn anchor_at(secs: f32) -> Vec3 {
    let angle = secs * 0.5;
    Vec3::new(
        ANCHOR_ORBIT_RADIUS * angle.cos(),
        ANCHOR_HEIGHT,
        ANCHOR_ORBIT_RADIUS * angle.sin(),
    )
}

/// Create the event loop and run the demo until the window closes.
pub fn run() -> Result<(), DemoError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    match app.init_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

pub struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    system: ParticleEmitterSystem,
    clock: FrameClock,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    /// Set when window or GPU setup fails; reported by [`run`] after the
    /// event loop exits, since `resumed` cannot return an error itself.
    init_error: Option<DemoError>,
}

impl App {
    pub fn new() -> Self {
        let config = EmitterConfig::default();
        Self {
            window: None,
            gpu_state: None,
            system: ParticleEmitterSystem::with_config(anchor_at(0.0), config),
            clock: FrameClock::new(),
            mouse_pressed: false,
            last_mouse_pos: None,
            init_error: None,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window_attrs = Window::default_attributes()
                .with_title("whoosh")
                .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

            let window = match event_loop.create_window(window_attrs) {
                Ok(window) => Arc::new(window),
                Err(e) => {
                    self.init_error = Some(e.into());
                    event_loop.exit();
                    return;
                }
            };
            self.window = Some(window.clone());

            let sprite = SpriteImage::load_or_radial("assets/whoosh.png", 64);
            let capacity = self.system.config().draw_capacity;
            match pollster::block_on(GpuState::new(window, &sprite, capacity)) {
                Ok(gpu_state) => self.gpu_state = Some(gpu_state),
                Err(e) => {
                    self.init_error = Some(e.into());
                    event_loop.exit();
                    return;
                }
            }
            self.clock.reset();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.system.cleanup();
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        let dx = (position.x - last_x) as f32;
                        let dy = (position.y - last_y) as f32;
                        if let Some(gpu_state) = &mut self.gpu_state {
                            gpu_state.camera.orbit(dx, dy);
                        }
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.camera.dolly(scroll);
                }
            }
            WindowEvent::RedrawRequested => {
                // A redraw can still arrive after CloseRequested tore the
                // emitter down; skip the frame instead of driving it inert.
                if !self.system.is_active() {
                    return;
                }
                if let Some(gpu_state) = &mut self.gpu_state {
                    let frame = self.clock.tick();
                    self.system.update(
                        frame.elapsed_ms,
                        frame.ms_into_second,
                        anchor_at(self.clock.elapsed_secs()),
                    );
                    self.system
                        .set_camera(gpu_state.camera.look_at(), gpu_state.camera.eye());

                    match gpu_state.render(&mut self.system) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => {
                            gpu_state.resize(winit::dpi::PhysicalSize {
                                width: gpu_state.config.width,
                                height: gpu_state.config.height,
                            })
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => eprintln!("Render error: {:?}", e),
                    }

                    if self.clock.frame() % TITLE_REFRESH_FRAMES == 0 {
                        if let Some(window) = &self.window {
                            window.set_title(&format!(
                                "whoosh - {} particles - {:.0} fps",
                                self.system.particle_count(),
                                self.clock.fps()
                            ));
                        }
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
