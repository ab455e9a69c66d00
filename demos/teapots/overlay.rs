//! Text overlay drawn with egui on top of the 3D scene.

use teatime::{
    graphics::RenderContext,
    wgpu,
    winit::{event::WindowEvent, window::Window},
    Game, Renderer,
};

pub struct Overlay {
    ctx: egui::Context,
    winit_state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

/// Tessellated output of one frame's UI,
/// kept alive until its textures can be freed after the render pass.
pub struct OverlayFrame {
    primitives: Vec<egui::ClippedPrimitive>,
    screen_desc: egui_wgpu::ScreenDescriptor,
    textures_delta: egui::TexturesDelta,
}

impl Overlay {
    pub fn new(game: &Game) -> Self {
        let ctx = egui::Context::default();
        let winit_state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            game.window.as_ref(),
            Some(game.window.scale_factor() as f32),
            None,
        );
        // the egui pipeline must match the render pass it draws in,
        // which has both MSAA and a depth attachment
        let renderer = egui_wgpu::Renderer::new(
            Renderer::device(),
            game.renderer.swapchain_format(),
            Some(game.renderer.depth_format()),
            game.renderer.msaa_samples(),
        );
        Self {
            ctx,
            winit_state,
            renderer,
        }
    }

    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) {
        let _ = self.winit_state.on_window_event(window, event);
    }

    /// Run the UI closure and upload the resulting geometry and textures.
    /// Must be called before the frame's render pass begins.
    pub fn prepare(
        &mut self,
        window: &Window,
        frame_ctx: &mut RenderContext,
        run_ui: impl FnOnce(&egui::Context),
    ) -> OverlayFrame {
        let input = self.winit_state.take_egui_input(window);
        let output = self.ctx.run(input, run_ui);
        self.winit_state
            .handle_platform_output(window, output.platform_output);

        let primitives = self.ctx.tessellate(output.shapes, output.pixels_per_point);
        let screen_desc = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [frame_ctx.target_size.0, frame_ctx.target_size.1],
            pixels_per_point: output.pixels_per_point,
        };

        let device = Renderer::device();
        let queue = Renderer::queue();
        for (id, delta) in &output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
        self.renderer.update_buffers(
            device,
            queue,
            &mut frame_ctx.encoder,
            &primitives,
            &screen_desc,
        );

        OverlayFrame {
            primitives,
            screen_desc,
            textures_delta: output.textures_delta,
        }
    }

    pub fn render<'pass>(
        &'pass self,
        pass: &mut wgpu::RenderPass<'pass>,
        frame: &'pass OverlayFrame,
    ) {
        self.renderer
            .render(pass, &frame.primitives, &frame.screen_desc);
    }

    /// Free textures egui no longer needs. Call after the render pass ends.
    pub fn cleanup(&mut self, frame: OverlayFrame) {
        for id in &frame.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}
