//! Windowed animation loop.
//!
//! [`run`] opens a window and drives a [`ParticleVoid`] at the display's
//! frame rate. Configuration changes from the keyboard go through a
//! [`SceneStore`] and are applied between frames.
//!
//! | Key | Action |
//! |-----|--------|
//! | `1`-`7` | Switch formation |
//! | `C` | Next color temperature |
//! | `P` | Next scene preset |
//! | `R` | Reset configuration |
//! | `Space` | Pause / resume |
//! | `Esc` | Quit |

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::camera::Viewport;
use crate::config::{SceneConfig, SceneOverrides, SceneStore, PRESETS};
use crate::error::{GpuError, RunError};
use crate::gpu::Renderer;
use crate::input::{Input, KeyCode};
use crate::scene::ParticleVoid;

/// Open a window and animate `particle_count` particles until it closes.
pub fn run(particle_count: usize, config: SceneConfig) -> Result<(), RunError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(particle_count, config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// What the loop does after a failed frame.
#[derive(Debug)]
enum SurfaceRecovery {
    Reconfigure,
    SkipFrame,
    Fatal(RunError),
}

fn surface_recovery(err: &wgpu::SurfaceError) -> SurfaceRecovery {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceRecovery::Reconfigure,
        wgpu::SurfaceError::OutOfMemory => SurfaceRecovery::Fatal(GpuError::OutOfMemory.into()),
        _ => SurfaceRecovery::SkipFrame,
    }
}

struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    void: ParticleVoid,
    store: SceneStore,
    applied_revision: u64,
    input: Input,
    preset_index: Option<usize>,
    error: Option<RunError>,
}

impl App {
    fn new(particle_count: usize, config: SceneConfig) -> Self {
        Self {
            window: None,
            renderer: None,
            void: ParticleVoid::new(particle_count, config),
            store: SceneStore::new(config),
            applied_revision: 0,
            input: Input::new(),
            preset_index: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: RunError) {
        tracing::error!(%err, "shutting down");
        self.error = Some(err);
        event_loop.exit();
    }

    fn handle_keys(&mut self, event_loop: &ActiveEventLoop) {
        if self.input.key_pressed(KeyCode::Escape) {
            event_loop.exit();
            return;
        }

        if let Some(formation) = self.input.pressed_formation() {
            self.store.set(&SceneOverrides {
                formation: Some(formation),
                ..Default::default()
            });
        }

        if self.input.key_pressed(KeyCode::C) {
            self.store.set(&SceneOverrides {
                color_temp: Some(self.store.config().color_temp.next()),
                ..Default::default()
            });
        }

        if self.input.key_pressed(KeyCode::P) {
            let next = self.preset_index.map_or(0, |i| (i + 1) % PRESETS.len());
            self.preset_index = Some(next);
            if let Err(err) = self.store.apply_preset(PRESETS[next].name) {
                tracing::warn!(%err, "preset not applied");
            }
        }

        if self.input.key_pressed(KeyCode::R) {
            self.preset_index = None;
            self.store.reset();
        }

        if self.input.key_pressed(KeyCode::Space) {
            self.void.clock_mut().toggle_pause();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.handle_keys(event_loop);
        self.input.begin_frame();

        if self.store.revision() != self.applied_revision {
            self.applied_revision = self.store.revision();
            self.void.apply_config(self.store.config());
        }

        let view_proj = self.void.camera().view_proj();
        let particles = self.void.tick_realtime(self.input.cursor());

        let mut fatal = None;
        if let Some(renderer) = &mut self.renderer {
            if let Err(e) = renderer.render(particles, view_proj) {
                match surface_recovery(&e) {
                    SurfaceRecovery::Reconfigure => {
                        tracing::warn!("surface lost, reconfiguring");
                        renderer.reconfigure();
                    }
                    SurfaceRecovery::SkipFrame => tracing::warn!(error = ?e, "render error"),
                    SurfaceRecovery::Fatal(err) => fatal = Some(err),
                }
            }
        }
        if let Some(err) = fatal {
            return self.fail(event_loop, err);
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("voidfield")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => return self.fail(event_loop, err.into()),
        };

        let size = window.inner_size();
        self.input.set_window_size(size.width, size.height);
        self.void.resize(Viewport::new(size.width as f32, size.height as f32));

        match pollster::block_on(Renderer::new(window.clone(), self.void.len())) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(err) => return self.fail(event_loop, RunError::Gpu(err)),
        }

        self.window = Some(window);
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
                if physical_size.width > 0 && physical_size.height > 0 {
                    self.void.resize(Viewport::new(
                        physical_size.width as f32,
                        physical_size.height as f32,
                    ));
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_memory_is_fatal() {
        let recovery = surface_recovery(&wgpu::SurfaceError::OutOfMemory);
        assert!(matches!(recovery, SurfaceRecovery::Fatal(RunError::Gpu(GpuError::OutOfMemory))));
    }

    #[test]
    fn test_lost_surface_is_reconfigured() {
        assert!(matches!(surface_recovery(&wgpu::SurfaceError::Lost), SurfaceRecovery::Reconfigure));
        assert!(matches!(surface_recovery(&wgpu::SurfaceError::Outdated), SurfaceRecovery::Reconfigure));
        assert!(matches!(surface_recovery(&wgpu::SurfaceError::Timeout), SurfaceRecovery::SkipFrame));
    }
}
