pub mod renderer;
pub use renderer::{RenderContext, Renderer, RendererInitError};

mod depth_buffer;
pub use depth_buffer::DepthBuffer;

pub mod camera;
pub use camera::{Camera, OrbitCameraController};

pub mod mesh;
pub use mesh::{Mesh, MeshData, MeshParams, Vertex};

pub mod material;
pub use material::{Material, MaterialParams};

mod mesh_renderer;
pub use mesh_renderer::{MeshInstance, MeshRenderer, PointLight, PolygonMode};

pub(crate) mod util;
