pub mod animation;
pub use animation::{interpolation, Animator, PlaybackCommand, Sample};

pub mod game;
pub use game::{Game, GameState};

pub mod input;
pub use input::{InputCache, Key, MouseButton};

pub mod math;
pub use math::{uv, Angle, Vec3};

pub mod graphics;
pub use graphics::{
    Camera, Material, MaterialParams, Mesh, MeshData, MeshInstance, MeshParams, MeshRenderer,
    OrbitCameraController, PointLight, PolygonMode, RenderContext, Renderer,
};

// Re-exported wgpu and winit to guarantee versions match
pub use wgpu;
pub use winit;
