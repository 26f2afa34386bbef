use glam::Vec2;

use crate::components::layer::RenderLayer;

/// RGB fill color, components in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as f32 / 255.0,
            g: ((rgb >> 8) & 0xff) as f32 / 255.0,
            b: (rgb & 0xff) as f32 / 255.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(0.6, 0.6, 0.8)
    }
}

/// Drawable primitive, sized in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    Rect { half_width: f32, half_height: f32 },
}

impl Shape {
    /// Half-extents of a box that contains the shape at any rotation.
    pub fn bounding_half_extents(&self) -> Vec2 {
        match *self {
            Shape::Circle { radius } => Vec2::splat(radius),
            Shape::Rect { half_width, half_height } => {
                Vec2::splat(Vec2::new(half_width, half_height).length())
            }
        }
    }
}

/// Component for flat-filled shapes drawn by the host canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeComponent {
    pub shape: Shape,
    pub color: Color,
    pub layer: RenderLayer,
}

impl ShapeComponent {
    pub fn circle(radius: f32, color: Color) -> Self {
        Self {
            shape: Shape::Circle { radius },
            color,
            layer: RenderLayer::default(),
        }
    }

    /// Rectangle of the given full width and height.
    pub fn rect(width: f32, height: f32, color: Color) -> Self {
        Self {
            shape: Shape::Rect {
                half_width: width / 2.0,
                half_height: height / 2.0,
            },
            color,
            layer: RenderLayer::default(),
        }
    }

    pub fn on_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }
}
