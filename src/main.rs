//! Wavelab - Double-slit interference in real time
//!
//! Two coherent sources, one steady-state superposition per pixel per
//! frame, projected onto a screen strip and an intensity trace.

mod cli;

use std::sync::Arc;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, ModifiersState, PhysicalKey},
    window::{Window, WindowId},
};

use cli::Args;
use wavelab::compositor::Layout;
use wavelab::controls::{ControlAction, Controls};
use wavelab::error::DisplayError;
use wavelab::params::{FieldTuning, RenderConfig, WaveParams};
use wavelab::pipeline::FramePipeline;
use wavelab::recording;
use wavelab::rendering::{LayerKind, RenderSystem};

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation
    pipeline: FramePipeline,
    controls: Controls,
    modifiers: ModifiersState,

    // Configuration
    render_config: RenderConfig,

    // Set when window/GPU setup fails
    setup_error: Option<DisplayError>,
}

impl App {
    fn new(render_config: RenderConfig, initial: WaveParams) -> Self {
        Self {
            window: None,
            render_system: None,
            pipeline: FramePipeline::new(render_config.clone(), FieldTuning::default()),
            controls: Controls::new(initial),
            modifiers: ModifiersState::empty(),
            render_config,
            setup_error: None,
        }
    }

    fn init_display(&self, event_loop: &ActiveEventLoop) -> Result<(Arc<Window>, RenderSystem), DisplayError> {
        let window_attributes = Window::default_attributes()
            .with_title(self.title())
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(event_loop.create_window(window_attributes)?);
        let render_system = pollster::block_on(RenderSystem::new(Arc::clone(&window)))?;
        Ok((window, render_system))
    }

    fn title(&self) -> String {
        format!("Wave Lab - {}", self.controls.snapshot().summary())
    }

    fn handle_key(&mut self, code: KeyCode, event_loop: &ActiveEventLoop) {
        if code == KeyCode::Escape {
            event_loop.exit();
            return;
        }
        let Some(action) = ControlAction::from_key(code, self.modifiers.shift_key()) else {
            return;
        };
        if self.controls.apply(action) {
            let params = self.controls.snapshot();
            log::info!("{}", params.summary());
            if let Some(window) = &self.window {
                window.set_title(&self.title());
            }
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

        match self.init_display(event_loop) {
            Ok((window, render_system)) => {
                println!("\nWave Lab is running!");
                println!("  Up/Down: separation   Left/Right: frequency   [ ]: phase");
                println!("  B: double slit   Space: laser   T/Shift+T: theme   Esc: quit\n");
                self.window = Some(window);
                self.render_system = Some(render_system);
            }
            Err(e) => {
                log::error!("{}", e);
                self.setup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => self.modifiers = modifiers.state(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        ..
                    },
                ..
            } => self.handle_key(code, event_loop),
            WindowEvent::RedrawRequested => self.render_frame(),
            _ => {}
        }
    }
}

impl App {
    /// Render a single frame
    fn render_frame(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let Some(render_system) = &mut self.render_system else {
            return;
        };

        // One consistent snapshot and viewport per frame
        let params = self.controls.snapshot();
        let size = window.inner_size();
        let viewport = (size.width, size.height);
        if viewport.0 == 0 || viewport.1 == 0 {
            return; // Minimized
        }

        self.pipeline.render_frame(&params, viewport);

        render_system.upload(LayerKind::Field, self.pipeline.field());
        render_system.upload(LayerKind::Graph, self.pipeline.graph());
        render_system.upload(LayerKind::Screen, self.pipeline.screen());

        let layout = Layout::for_viewport(viewport, &self.render_config);
        match render_system.render(&layout) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                render_system.reconfigure();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let render_config = args.render_config();
    let initial = args.initial_params();

    if let Some(recording_config) = args.recording_config() {
        println!("Wave Lab - recording {}s to {}", recording_config.duration_secs, args.output);
        let frames = recording::record(&recording_config, render_config, FieldTuning::default(), &initial)?;
        println!("Wrote {} frames", frames);
        return Ok(());
    }

    println!("Wave Lab - double-slit interference");
    println!("Initializing display...");

    let mut app = App::new(render_config, initial);
    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;

    match app.setup_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
