use anyhow::{Context as _, Result};
use arbor_input::{Action, Binding, InputState};
use arbor_render_wgpu::{SceneAssets, WgpuRenderer};
use arbor_scene::{FrameClock, FrameView, Walkthrough, room};
use clap::Parser;
use egui::Context as EguiContext;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

#[derive(Parser)]
#[command(name = "arbor-desktop", about = "Walk through the arbor room")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Asset root containing textures/ and objects/
    #[arg(long, default_value = "resources")]
    assets: PathBuf,

    /// Initial window width
    #[arg(long, default_value = "800")]
    width: u32,

    /// Initial window height
    #[arg(long, default_value = "600")]
    height: u32,
}

fn binding_for(key: KeyCode) -> Option<Binding> {
    match key {
        KeyCode::KeyW => Some(Binding::MoveForward),
        KeyCode::KeyS => Some(Binding::MoveBackward),
        KeyCode::KeyA => Some(Binding::StrafeLeft),
        KeyCode::KeyD => Some(Binding::StrafeRight),
        KeyCode::ShiftLeft => Some(Binding::Run),
        KeyCode::KeyF => Some(Binding::Flashlight),
        KeyCode::F1 => Some(Binding::Hud),
        KeyCode::Escape => Some(Binding::Quit),
        _ => None,
    }
}

/// Application state.
struct AppState {
    walk: Walkthrough,
    input: InputState,
    clock: FrameClock,
    show_hud: bool,
    /// Pointer motion only steers the camera while the window holds the cursor.
    cursor_captured: bool,
}

impl AppState {
    fn new() -> Self {
        Self {
            walk: Walkthrough::new(),
            input: InputState::new(),
            clock: FrameClock::new(),
            show_hud: true,
            cursor_captured: false,
        }
    }

    fn pointer_motion(&mut self, dx: f64, dy: f64) {
        if self.cursor_captured {
            self.input.pointer_motion(dx, dy);
        }
    }

    fn focus_changed(&mut self, focused: bool) {
        self.cursor_captured = focused;
        if !focused {
            self.input.release_all();
        }
    }

    /// Advance one frame and return what should be drawn.
    fn update(&mut self) -> FrameView {
        let time = self.clock.tick();
        let actions = self.input.drain_frame();
        for action in &actions {
            if *action == Action::ToggleHud {
                self.show_hud = !self.show_hud;
            }
        }
        self.walk.apply(time, &actions);
        self.walk.frame(time)
    }

    fn draw_hud(&self, ctx: &EguiContext, frame: &FrameView) {
        if !self.show_hud {
            return;
        }

        let camera = self.walk.camera();
        egui::Window::new("arbor")
            .anchor(egui::Align2::LEFT_TOP, [8.0, 8.0])
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                let p = camera.position();
                ui.label(format!("Position: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z));
                ui.label(format!(
                    "Yaw: {:.1}  Pitch: {:.1}",
                    camera.yaw(),
                    camera.pitch()
                ));
                ui.label(format!("Gait: {:?}", camera.gait()));
                ui.label(format!(
                    "Flashlight: {}",
                    if frame.flashlight_on { "on" } else { "off" }
                ));
                ui.label(format!(
                    "Sun: {}  t={:.1}s",
                    if frame.dir_light.is_day() { "day" } else { "night" },
                    frame.time.elapsed
                ));
                ui.separator();
                ui.small("WASD: Move | Shift: Run | F: Flashlight | F1: HUD | Esc: Quit");
            });
    }
}

/// Everything that exists only once a window is up.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct GpuApp {
    state: AppState,
    assets_root: PathBuf,
    initial_size: PhysicalSize<u32>,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    fatal: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(assets_root: PathBuf, width: u32, height: u32) -> Self {
        Self {
            state: AppState::new(),
            assets_root,
            initial_size: PhysicalSize::new(width, height),
            gpu: None,
            egui_ctx: EguiContext::default(),
            fatal: None,
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<Gpu> {
        let attrs = Window::default_attributes()
            .with_title("Arbor")
            .with_inner_size(self.initial_size);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no suitable GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("arbor_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("failed to create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or(surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.state.walk.set_viewport(size.width, size.height);

        let assets = SceneAssets::load(&self.assets_root).context("failed to load scene assets")?;
        let renderer = WgpuRenderer::new(
            &device,
            &queue,
            surface_format,
            size.width,
            size.height,
            &assets,
            &room(),
        );

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        capture_cursor(&window);
        self.state.cursor_captured = true;

        tracing::info!(
            draws = renderer.draw_count(),
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Gpu {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let frame = self.state.update();
        if self.state.walk.quit_requested() {
            event_loop.exit();
            return;
        }

        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.renderer.render(&gpu.device, &gpu.queue, &view, &frame);

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let state = &self.state;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            state.draw_hud(ctx, &frame);
        });
        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        gpu.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
        gpu.window.request_redraw();
    }
}

fn capture_cursor(window: &Window) {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    if let Err(e) = grabbed {
        tracing::warn!("could not capture cursor: {e}");
    }
    window.set_cursor_visible(false);
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match self.init_gpu(event_loop) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                tracing::error!("{e:#}");
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gpu) = &mut self.gpu {
            let _ = gpu.egui_winit.on_window_event(&gpu.window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.config.width = new_size.width.max(1);
                    gpu.config.height = new_size.height.max(1);
                    gpu.surface.configure(&gpu.device, &gpu.config);
                    gpu.renderer
                        .resize(&gpu.device, gpu.config.width, gpu.config.height);
                }
                self.state.walk.set_viewport(new_size.width, new_size.height);
            }
            WindowEvent::Focused(focused) => {
                if focused {
                    if let Some(gpu) = &self.gpu {
                        capture_cursor(&gpu.window);
                    }
                }
                self.state.focus_changed(focused);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                if let Some(binding) = binding_for(key) {
                    match key_state {
                        ElementState::Pressed => self.state.input.press(binding),
                        ElementState::Released => self.state.input.release(binding),
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.state.pointer_motion(delta.0, delta.1);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("arbor-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(cli.assets, cli.width, cli.height);
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.fatal.take() {
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_maps_to_movement() {
        assert_eq!(binding_for(KeyCode::KeyW), Some(Binding::MoveForward));
        assert_eq!(binding_for(KeyCode::KeyS), Some(Binding::MoveBackward));
        assert_eq!(binding_for(KeyCode::KeyA), Some(Binding::StrafeLeft));
        assert_eq!(binding_for(KeyCode::KeyD), Some(Binding::StrafeRight));
        assert_eq!(binding_for(KeyCode::KeyQ), None);
    }

    #[test]
    fn hud_toggle_is_handled_by_app_state() {
        let mut state = AppState::new();
        state.input.press(Binding::Hud);
        state.update();
        assert!(!state.show_hud);
        state.input.release(Binding::Hud);
        state.input.press(Binding::Hud);
        state.update();
        assert!(state.show_hud);
    }

    #[test]
    fn escape_requests_quit() {
        let mut state = AppState::new();
        state.input.press(binding_for(KeyCode::Escape).unwrap());
        state.update();
        assert!(state.walk.quit_requested());
    }

    #[test]
    fn pointer_motion_is_dropped_without_focus() {
        let mut state = AppState::new();
        state.focus_changed(true);
        state.pointer_motion(1000.0, 0.0);
        state.update();
        let yaw = state.walk.camera().yaw();
        assert!((yaw - (arbor_camera::YAW + 1.0)).abs() < 1e-4);

        state.focus_changed(false);
        state.pointer_motion(500.0, 0.0);
        state.update();
        assert_eq!(state.walk.camera().yaw(), yaw);
    }

    #[test]
    fn losing_focus_discards_pending_motion() {
        let mut state = AppState::new();
        state.focus_changed(true);
        state.pointer_motion(500.0, 0.0);
        state.focus_changed(false);
        state.update();
        assert_eq!(state.walk.camera().yaw(), arbor_camera::YAW);
    }

    #[test]
    fn cli_defaults_open_800x600_window() {
        let cli = Cli::parse_from(["arbor-desktop"]);
        assert_eq!((cli.width, cli.height), (800, 600));
        assert_eq!(cli.assets, PathBuf::from("resources"));
        assert!(!cli.verbose);
    }
}
