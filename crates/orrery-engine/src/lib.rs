pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::Entity;
pub use components::mesh::{MeshComponent, Shape, Color};
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use core::spherical::{Spherical, wrap_angle};
pub use core::ray::Ray;
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use renderer::camera::{Camera3D, CameraPose};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::{AssetManifest, TextureDescriptor};
pub use assets::registry::{TextureRegistry, TextureId};
pub use bridge::protocol::{ProtocolLayout, FrameData};
pub use systems::render::build_render_buffer;

// Optional camera systems
pub use extensions::{OrbitControls, OrbitControlsConfig};
