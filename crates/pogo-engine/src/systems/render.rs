use crate::components::entity::Entity;
use crate::components::shape::Shape;
use crate::renderer::camera::Camera2D;
use crate::renderer::shape_instance::{ShapeBuffer, ShapeInstance, SHAPE_CIRCLE, SHAPE_RECT};

/// Build the shape buffer from a set of entities.
/// Skips inactive, shapeless and off-camera entities, then orders the rest
/// back-to-front by render layer (spawn order within a layer).
pub fn build_shape_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    camera: &Camera2D,
    buffer: &mut ShapeBuffer,
) {
    buffer.clear();

    let mut visible: Vec<ShapeInstance> = Vec::new();

    for entity in entities {
        if !entity.active {
            continue;
        }
        let component = match &entity.shape {
            Some(c) => c,
            None => continue,
        };
        if !camera.is_rect_visible(entity.pos, component.shape.bounding_half_extents()) {
            continue;
        }

        let (kind, half_width, half_height) = match component.shape {
            Shape::Circle { radius } => (SHAPE_CIRCLE, radius, radius),
            Shape::Rect { half_width, half_height } => (SHAPE_RECT, half_width, half_height),
        };

        visible.push(ShapeInstance {
            x: entity.pos.x,
            y: entity.pos.y,
            rotation: entity.rotation,
            kind,
            half_width,
            half_height,
            r: component.color.r,
            g: component.color.g,
            b: component.color.b,
            layer: component.layer.as_u8() as f32,
            _pad0: 0.0,
            _pad1: 0.0,
        });
    }

    // Stable sort keeps spawn order inside a layer.
    visible.sort_by_key(|inst| inst.layer as u8);

    for inst in visible {
        if !buffer.push(inst) {
            log::warn!("shape buffer full, dropping remaining instances");
            break;
        }
    }
}
