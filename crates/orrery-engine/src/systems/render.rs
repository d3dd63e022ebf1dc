use crate::assets::registry::TextureRegistry;
use crate::components::entity::Entity;
use crate::components::mesh::Shape;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer from a set of entities, in scene order.
/// Entities without a mesh or marked inactive are skipped.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    textures: &TextureRegistry,
    buffer: &mut RenderBuffer,
) {
    buffer.clear();

    for entity in entities {
        if !entity.active {
            continue;
        }
        let Some(mesh) = &entity.mesh else { continue };

        let (radius, inner_radius) = match mesh.shape {
            Shape::Sphere { radius } => (radius, 0.0),
            Shape::Ring { inner_radius, outer_radius } => (outer_radius, inner_radius),
            Shape::OrbitPath { radius } => (radius, 0.0),
        };
        let texture = mesh
            .texture
            .as_deref()
            .and_then(|name| textures.resolve(name))
            .map_or(RenderInstance::NO_TEXTURE, |id| id.0 as f32);

        let pushed = buffer.push(RenderInstance {
            x: entity.pos.x,
            y: entity.pos.y,
            z: entity.pos.z,
            radius,
            inner_radius,
            spin: entity.spin,
            tilt: entity.tilt,
            shape: mesh.shape.code(),
            texture,
            r: mesh.color.r,
            g: mesh.color.g,
            b: mesh.color.b,
            emissive: mesh.emissive,
            opacity: mesh.opacity,
            _pad: [0.0; 2],
        });
        if !pushed {
            log::warn!("render buffer full, dropping `{}`", entity.tag);
            break;
        }
    }
}
