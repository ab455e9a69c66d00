use std::sync::{Arc, OnceLock};

use super::depth_buffer::DepthBuffer;

// there is only ever one wgpu context,
// and since the device and queue are frequently needed to create resources,
// we store those globally here
// so that the user doesn't have to ferry them around constantly

static DEVICE: OnceLock<wgpu::Device> = OnceLock::new();
static QUEUE: OnceLock<wgpu::Queue> = OnceLock::new();

pub const SWAPCHAIN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8UnormSrgb;
const MSAA_SAMPLES: u32 = 4;

/// A Renderer manages resources needed to draw graphics to the screen.
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    window_scale_factor: f64,

    // MSAA color target resolved into the swapchain each frame
    msaa_view: wgpu::TextureView,
    depth_buffer: DepthBuffer,
}

/// An error that occurred during renderer initialization.
#[derive(thiserror::Error, Debug)]
pub enum RendererInitError {
    #[error("Failed to create surface")]
    CreateSurfaceError(#[from] wgpu::CreateSurfaceError),
    #[error("Adapter request failed")]
    RequestAdapterError,
    #[error("Device request failed")]
    RequestDeviceError(#[from] wgpu::RequestDeviceError),
    #[error("Another Renderer already existed")]
    AlreadyInitialized,
}

impl Renderer {
    /// Create a Renderer.
    /// The [`Game`][crate::game::Game] API does this automatically.
    pub(crate) async fn init(
        window: Arc<winit::window::Window>,
    ) -> Result<Self, RendererInitError> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or(RendererInitError::RequestAdapterError)?;

        let info = adapter.get_info();
        log::info!("Rendering with {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    // line polygon mode for the wireframe toggle
                    required_features: wgpu::Features::POLYGON_MODE_LINE,
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let window_size = window.inner_size();

        let swapchain_capabilities = surface.get_capabilities(&adapter);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: SWAPCHAIN_FORMAT,
            width: window_size.width,
            height: window_size.height,
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode: swapchain_capabilities.alpha_modes[0],
            view_formats: vec![],
        };
        surface.configure(&device, &surface_config);

        let window_scale_factor = window.scale_factor();

        DEVICE
            .set(device)
            .map_err(|_| RendererInitError::AlreadyInitialized)?;
        QUEUE
            .set(queue)
            .map_err(|_| RendererInitError::AlreadyInitialized)?;

        let msaa_view = Self::create_msaa_texture((surface_config.width, surface_config.height));
        let depth_buffer = DepthBuffer::new(
            Self::device(),
            (surface_config.width, surface_config.height),
            MSAA_SAMPLES,
            Some("window depth"),
        );

        Ok(Renderer {
            surface,
            surface_config,
            window_scale_factor,
            msaa_view,
            depth_buffer,
        })
    }

    /// Get a reference to the the global device instance.
    /// # Panics
    /// This function panics if the renderer hasn't been initialized yet,
    /// i.e. if [`Game::run`][crate::Game::run] hasn't been called yet.
    #[inline]
    pub fn device<'a>() -> &'a wgpu::Device {
        DEVICE.get().expect("Renderer has not been initialized yet")
    }

    /// Get a reference to the the global queue instance.
    /// # Panics
    /// This function panics if the renderer hasn't been initialized yet,
    /// i.e. if [`Game::run`][crate::Game::run] hasn't been called yet.
    #[inline]
    pub fn queue<'a>() -> &'a wgpu::Queue {
        QUEUE.get().expect("Renderer has not been initialized yet")
    }

    fn create_msaa_texture(dimensions: (u32, u32)) -> wgpu::TextureView {
        let tex = Self::device().create_texture(&wgpu::TextureDescriptor {
            label: Some("window msaa"),
            size: wgpu::Extent3d {
                width: dimensions.0,
                height: dimensions.1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: MSAA_SAMPLES,
            dimension: wgpu::TextureDimension::D2,
            format: SWAPCHAIN_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        tex.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Change the size of the frame `begin_frame` draws into.
    /// This is called automatically by the gameloop when the window size changes.
    pub(crate) fn resize_swap_chain(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size == self.window_size() || new_size.width == 0 || new_size.height == 0 {
            return;
        }
        log::debug!("Resizing swap chain to {}x{}", new_size.width, new_size.height);
        let device = Self::device();
        self.surface_config.width = new_size.width;
        self.surface_config.height = new_size.height;
        self.surface.configure(device, &self.surface_config);
        self.msaa_view = Self::create_msaa_texture(new_size.into());
        self.depth_buffer = DepthBuffer::new(
            device,
            new_size.into(),
            MSAA_SAMPLES,
            Some("window depth"),
        );
    }

    #[inline]
    pub fn swapchain_format(&self) -> wgpu::TextureFormat {
        SWAPCHAIN_FORMAT
    }

    /// Format of the depth buffer attached to every window render pass.
    #[inline]
    pub fn depth_format(&self) -> wgpu::TextureFormat {
        super::depth_buffer::DEPTH_FORMAT
    }

    /// Get the size of the window this Renderer draws to in pixels.
    #[inline]
    pub fn window_size(&self) -> winit::dpi::PhysicalSize<u32> {
        winit::dpi::PhysicalSize::new(self.surface_config.width, self.surface_config.height)
    }

    /// Get the scale factor of the window this Renderer draws to.
    #[inline]
    pub fn window_scale_factor(&self) -> f64 {
        self.window_scale_factor
    }

    #[inline]
    pub fn msaa_samples(&self) -> u32 {
        MSAA_SAMPLES
    }

    #[inline]
    pub fn multisample_state(&self) -> wgpu::MultisampleState {
        wgpu::MultisampleState {
            count: MSAA_SAMPLES,
            mask: !0,
            alpha_to_coverage_enabled: false,
        }
    }

    /// Depth-stencil state that uses the same depth format as the window depth buffer
    /// and writes depths to the buffer.
    #[inline]
    pub fn default_depth_stencil_state(&self) -> wgpu::DepthStencilState {
        DepthBuffer::default_depth_stencil_state()
    }

    /// Start drawing a frame.
    ///
    /// Returns a [`RenderContext`] holding the frame's command encoder and
    /// render targets. Record one or more passes with
    /// [`RenderContext::pass`], then call [`RenderContext::submit`]
    /// to present the frame.
    pub fn begin_frame(&mut self) -> RenderContext<'_> {
        let surface = self
            .surface
            .get_current_texture()
            .expect("Failed to get next swap chain texture");
        let surface_view = surface
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder =
            Self::device().create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame"),
            });

        RenderContext {
            target_size: (self.surface_config.width, self.surface_config.height),
            encoder,
            surface,
            surface_view,
            msaa_view: &self.msaa_view,
            depth_view: &self.depth_buffer.view,
        }
    }
}

/// An in-progress frame: command encoder plus the window render targets.
pub struct RenderContext<'a> {
    pub encoder: wgpu::CommandEncoder,
    pub target_size: (u32, u32),
    surface: wgpu::SurfaceTexture,
    surface_view: wgpu::TextureView,
    msaa_view: &'a wgpu::TextureView,
    depth_view: &'a wgpu::TextureView,
}

impl<'a> RenderContext<'a> {
    /// Begin a render pass drawing to the window.
    ///
    /// If `clear_color` is Some, the framebuffer and depth buffer are cleared
    /// first; otherwise results of previous passes are kept.
    pub fn pass(&mut self, clear_color: Option<wgpu::Color>) -> wgpu::RenderPass<'_> {
        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("window"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.msaa_view,
                resolve_target: Some(&self.surface_view),
                ops: wgpu::Operations {
                    load: match clear_color {
                        Some(c) => wgpu::LoadOp::Clear(c),
                        None => wgpu::LoadOp::Load,
                    },
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: match clear_color {
                        Some(_) => wgpu::LoadOp::Clear(1.0),
                        None => wgpu::LoadOp::Load,
                    },
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        })
    }

    /// Submit everything drawn so far and present the frame.
    pub fn submit(self) {
        Renderer::queue().submit(Some(self.encoder.finish()));
        self.surface.present();
    }
}
