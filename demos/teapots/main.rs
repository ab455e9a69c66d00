//! Three teapots racing between two points along different
//! interpolation curves: linear, trigonometric and cubic.
//!
//! Controls: Space pauses, arrow keys scrub, W/S toggle wireframe,
//! F/N toggle fullscreen, Esc quits. Mouse orbits the camera.

mod config;
mod overlay;

use config::DemoConfig;
use overlay::Overlay;

use std::sync::Arc;

use teatime::{
    winit::{
        dpi::LogicalSize,
        event::WindowEvent,
        window::{Fullscreen, Window, WindowBuilder},
    },
    Animator, Camera, Game, GameState, Key, Material, MaterialParams, Mesh, MeshData,
    MeshInstance, MeshParams, MeshRenderer, OrbitCameraController, PlaybackCommand, PolygonMode,
    Renderer, Vec3,
};

const CLEAR_COLOR: teatime::wgpu::Color = teatime::wgpu::Color {
    r: 0.4,
    g: 0.4,
    b: 0.4,
    a: 1.0,
};

fn main() {
    env_logger::init();

    let config = DemoConfig::load_or_default("demos/teapots/config.ron");

    let game = Game::init(
        config.tick_rate,
        WindowBuilder::new()
            .with_title("teatime: interpolation demo")
            .with_inner_size(LogicalSize::new(
                config.window_size[0],
                config.window_size[1],
            )),
    );
    let state = State::init(&game, config);
    game.run(state, Some(State::handle_window_event));
}

struct State {
    config: DemoConfig,
    animator: Animator,
    camera: Camera,
    camera_controller: OrbitCameraController,
    teapot: Mesh,
    gold: Material,
    pewter: Material,
    brass: Material,
    mesh_renderer: MeshRenderer,
    overlay: Overlay,
    window: Arc<Window>,
}

impl State {
    fn init(game: &Game, config: DemoConfig) -> Self {
        let vec3 = |v: [f32; 3]| Vec3::new(v[0], v[1], v[2]);
        let animator = Animator::new(vec3(config.start), vec3(config.end), config.playback_delta);

        let camera = Camera::new(Vec3::new(0.0, 0.0, 20.0), Vec3::zero());
        let camera_controller = OrbitCameraController::new(&camera);

        let teapot = MeshParams {
            label: Some("teapot"),
            data: MeshData::teapot(48),
        }
        .upload();

        Self {
            config,
            animator,
            camera,
            camera_controller,
            teapot,
            gold: Material::new(MaterialParams::GOLD),
            pewter: Material::new(MaterialParams::PEWTER),
            brass: Material::new(MaterialParams::BRASS),
            mesh_renderer: MeshRenderer::new(&game.renderer),
            overlay: Overlay::new(game),
            window: game.window.clone(),
        }
    }

    fn handle_window_event(&mut self, window: &Window, event: &WindowEvent) {
        self.overlay.handle_event(window, event);
    }
}

impl GameState for State {
    fn tick(&mut self, _dt: f64, game: &Game) -> Option<()> {
        let input = &game.input;

        if input.is_key_pressed(Key::Escape, Some(0)) {
            return None;
        }
        if input.is_key_pressed(Key::Space, Some(0)) {
            self.animator.handle(PlaybackCommand::TogglePlay);
        }
        // holding an arrow key keeps scrubbing, one step per tick
        if input.is_key_pressed(Key::ArrowLeft, None) {
            self.animator.handle(PlaybackCommand::StepBack);
        }
        if input.is_key_pressed(Key::ArrowRight, None) {
            self.animator.handle(PlaybackCommand::StepForward);
        }
        if input.is_key_pressed(Key::KeyW, Some(0)) {
            self.mesh_renderer.polygon_mode = PolygonMode::Wireframe;
        }
        if input.is_key_pressed(Key::KeyS, Some(0)) {
            self.mesh_renderer.polygon_mode = PolygonMode::Filled;
        }
        if input.is_key_pressed(Key::KeyF, Some(0)) {
            game.window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        if input.is_key_pressed(Key::KeyN, Some(0)) {
            game.window.set_fullscreen(None);
        }

        self.animator.handle(PlaybackCommand::Tick);
        self.camera_controller.update(&mut self.camera, input);

        Some(())
    }

    fn draw(&mut self, renderer: &mut Renderer) {
        self.camera.upload(renderer.window_size().into());

        let sample = self.animator.sample();
        let offset = Vec3::new(0.0, self.config.vertical_offset, 0.0);
        let instances = [
            MeshInstance::at(sample.linear, &self.gold),
            MeshInstance::at(sample.trig + offset, &self.pewter),
            MeshInstance::at(sample.cubic - offset, &self.brass),
        ];

        let fmt = |label: &str, p: Vec3| {
            format!("{label} [{:.4}, {:.4}, {:.4}]", p.x, p.y, p.z)
        };
        let lines = [
            format!("T={:.4}", self.animator.time()),
            fmt("Linear interpolation", sample.linear),
            fmt("Trigonometric interpolation", sample.trig),
            fmt("Cubic interpolation", sample.cubic),
        ];

        let mut ctx = renderer.begin_frame();
        let overlay_frame = self.overlay.prepare(&self.window, &mut ctx, |egui_ctx| {
            egui::Area::new(egui::Id::new("readout"))
                .fixed_pos(egui::pos2(10.0, 10.0))
                .show(egui_ctx, |ui| {
                    for line in &lines {
                        ui.label(
                            egui::RichText::new(line.as_str())
                                .monospace()
                                .color(egui::Color32::WHITE),
                        );
                    }
                });
        });
        {
            let mut pass = ctx.pass(Some(CLEAR_COLOR));
            self.mesh_renderer
                .draw(&mut pass, &self.camera, &mut self.teapot, &instances);
            self.overlay.render(&mut pass, &overlay_frame);
        }
        self.overlay.cleanup(overlay_frame);
        ctx.submit();
    }
}
