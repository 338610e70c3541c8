//! Wavefield - sum-of-sines water under a procedural sky
//!
//! Drag with the left mouse button to orbit, scroll to zoom,
//! press R for a new wave field and ESC to quit.

mod cli;

use std::process;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use wavefield::camera::{apply_drag, apply_scroll, CameraState, DragState};
use wavefield::ocean::{PlaneMesh, WaveFieldGenerator, WaveFieldParams};
use wavefield::params::*;
use wavefield::rendering::RenderSystem;
use wavefield::uniforms::{bind, bind_lighting, bind_time, bind_view, lighting_params};
use wavefield::{logging, Error, Result};

/// Pixels of trackpad scrolling that count as one wheel notch
const PIXELS_PER_NOTCH: f32 = 40.0;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Wave field
    generator: WaveFieldGenerator,
    physics: OceanPhysics,
    calm_preset: bool,
    waves: WaveFieldParams,
    waves_bound: bool,

    // Camera
    camera: CameraState,
    controls: OrbitControls,
    drag: DragState,

    // Configuration
    render_config: RenderConfig,
    lighting: LightingConfig,

    // Time tracking
    start_time: Instant,
}

impl App {
    fn new(args: &cli::Args) -> Result<Self> {
        let physics = args.ocean_physics();
        physics.validate()?;
        let render_config = args.render_config();
        let controls = OrbitControls::default();

        let mut generator = match physics.seed {
            Some(seed) => WaveFieldGenerator::from_seed(seed),
            None => WaveFieldGenerator::from_entropy(),
        };

        let calm_preset = args.use_calm_preset();
        let waves = if calm_preset {
            WaveFieldParams::preset_calm()
        } else {
            generator.generate(physics.wind_angle_rad, physics.num_waves, &physics.sampling)?
        };

        log::info!(
            "Wave field: {} waves, wind {:.0}°, policy {}",
            waves.len(),
            physics.wind_angle_rad.to_degrees(),
            if calm_preset {
                "calm"
            } else {
                physics.sampling.policy.name()
            }
        );

        Ok(Self {
            window: None,
            render_system: None,
            generator,
            physics,
            calm_preset,
            waves,
            waves_bound: false,
            camera: CameraState::from_controls(&controls),
            controls,
            drag: DragState::default(),
            render_config,
            lighting: LightingConfig::default(),
            start_time: Instant::now(),
        })
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("Wavefield")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .map_err(|e| Error::Window(e.to_string()))?,
        );

        let mesh = PlaneMesh::new(
            self.render_config.mesh_quads,
            self.render_config.mesh_half_extent,
        );
        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            mesh,
            self.physics.spatial_scale,
        ))?;

        let (width, height) = render_system.size();
        self.render_config.window_width = width;
        self.render_config.window_height = height;

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.waves_bound = false;
        Ok(())
    }

    /// Draw a fresh wave field with the configured sampling
    fn regenerate(&mut self) {
        if self.calm_preset {
            log::info!("Calm preset is fixed, nothing to regenerate");
            return;
        }
        match self.generator.generate(
            self.physics.wind_angle_rad,
            self.physics.num_waves,
            &self.physics.sampling,
        ) {
            Ok(waves) => {
                log::info!("Regenerated wave field ({} waves)", waves.len());
                self.waves = waves;
                self.waves_bound = false;
            }
            Err(e) => log::error!("Wave generation failed: {}", e),
        }
    }

    /// Push this frame's uniforms to both programs
    fn bind_frame(&mut self, time_s: f32) -> Result<()> {
        let Some(render_system) = self.render_system.as_mut() else {
            return Ok(());
        };

        let view = self.camera.view_params(&self.render_config);
        let lighting = lighting_params(self.camera.position(), &self.lighting);

        if let Some(surface) = render_system.wave_surface_mut() {
            if !self.waves_bound {
                bind(surface, &self.waves)?;
                self.waves_bound = true;
            }
            bind_view(surface, &view)?;
            bind_lighting(surface, &lighting)?;
            bind_time(surface, time_s)?;
        }

        if let Some(skybox) = render_system.skybox_mut() {
            bind_view(skybox, &view)?;
        }

        Ok(())
    }

    /// Render a single frame
    fn render_frame(&mut self) {
        let time_s = self.start_time.elapsed().as_secs_f32();

        if let Err(e) = self.bind_frame(time_s) {
            log::error!("Uniform bind failed, skipping frame: {}", e);
            return;
        }

        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };

        match render_system.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                render_system.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.init_graphics(event_loop) {
            log::error!("Failed to initialize graphics: {}", e);
            event_loop.exit();
            return;
        }

        log::info!("Wavefield is running: drag to orbit, scroll to zoom, R to regenerate, ESC to quit");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::KeyR => self.regenerate(),
                _ => {}
            },
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => self.drag.press(),
                ElementState::Released => self.drag.release(),
            },
            WindowEvent::CursorMoved { position, .. } => {
                if let Some((dx, dy)) = self.drag.cursor_moved(position.x as f32, position.y as f32)
                {
                    self.camera = apply_drag(self.camera, dx, dy, &self.controls);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_NOTCH,
                };
                self.camera = apply_scroll(self.camera, notches, &self.controls);
            }
            WindowEvent::Resized(size) => {
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                }
                if size.width > 0 && size.height > 0 {
                    self.render_config.window_width = size.width;
                    self.render_config.window_height = size.height;
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }
}

fn run(args: &cli::Args) -> Result<()> {
    let mut app = App::new(args)?;
    let event_loop = EventLoop::new().map_err(|e| Error::Window(e.to_string()))?;
    event_loop
        .run_app(&mut app)
        .map_err(|e| Error::Window(e.to_string()))
}

fn main() {
    logging::init();

    let args = cli::Args::parse();
    log::info!("Wavefield - sum-of-sines water surface");

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        process::exit(1);
    }
}
