/// Frame buffer layout shared with the host page.
/// Must stay in sync with the page's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Shapes: max_shapes × 12 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame, so the host can
/// compute section offsets without a separate handshake.

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::renderer::camera::ViewBounds;
use crate::renderer::shape_instance::ShapeInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_SHAPES: usize = 2;
pub const HEADER_SHAPE_COUNT: usize = 3;
pub const HEADER_MAX_EVENTS: usize = 4;
pub const HEADER_EVENT_COUNT: usize = 5;
pub const HEADER_WORLD_WIDTH: usize = 6;
pub const HEADER_WORLD_HEIGHT: usize = 7;
pub const HEADER_CAMERA_MIN_X: usize = 8;
pub const HEADER_CAMERA_MIN_Y: usize = 9;
pub const HEADER_CAMERA_MAX_X: usize = 10;
pub const HEADER_CAMERA_MAX_Y: usize = 11;
pub const HEADER_STATUS: usize = 12;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per shape instance (wire format).
pub const SHAPE_FLOATS: usize = ShapeInstance::FLOATS;

/// Floats per game event: kind, a, b, c (wire format).
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum shape instances.
    pub max_shapes: usize,
    /// Maximum game events per frame.
    pub max_events: usize,

    /// Offset (in floats) where shape data begins.
    pub shape_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

/// Everything one frame publishes to the host.
pub struct FrameSnapshot<'a> {
    pub frame: u32,
    pub world_width: f32,
    pub world_height: f32,
    pub view: ViewBounds,
    pub status: u32,
    pub shapes: &'a [ShapeInstance],
    pub events: &'a [GameEvent],
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_shapes: usize, max_events: usize) -> Self {
        let shape_data_offset = HEADER_FLOATS;
        let event_data_offset = shape_data_offset + max_shapes * SHAPE_FLOATS;
        let buffer_total_floats = event_data_offset + max_events * EVENT_FLOATS;

        Self {
            max_shapes,
            max_events,
            shape_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_shapes, config.max_events)
    }

    /// Serialize a frame into `out`, resizing it to `buffer_total_floats`.
    /// Shapes and events beyond capacity are truncated; the header counts
    /// report what was actually written.
    pub fn write_frame(&self, snapshot: &FrameSnapshot, out: &mut Vec<f32>) {
        out.clear();
        out.resize(self.buffer_total_floats, 0.0);

        let shapes = &snapshot.shapes[..snapshot.shapes.len().min(self.max_shapes)];
        let events = &snapshot.events[..snapshot.events.len().min(self.max_events)];

        out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        out[HEADER_FRAME_COUNTER] = snapshot.frame as f32;
        out[HEADER_MAX_SHAPES] = self.max_shapes as f32;
        out[HEADER_SHAPE_COUNT] = shapes.len() as f32;
        out[HEADER_MAX_EVENTS] = self.max_events as f32;
        out[HEADER_EVENT_COUNT] = events.len() as f32;
        out[HEADER_WORLD_WIDTH] = snapshot.world_width;
        out[HEADER_WORLD_HEIGHT] = snapshot.world_height;
        out[HEADER_CAMERA_MIN_X] = snapshot.view.min.x;
        out[HEADER_CAMERA_MIN_Y] = snapshot.view.min.y;
        out[HEADER_CAMERA_MAX_X] = snapshot.view.max.x;
        out[HEADER_CAMERA_MAX_Y] = snapshot.view.max.y;
        out[HEADER_STATUS] = snapshot.status as f32;

        let shape_floats: &[f32] = bytemuck::cast_slice(shapes);
        out[self.shape_data_offset..self.shape_data_offset + shape_floats.len()]
            .copy_from_slice(shape_floats);

        let event_floats: &[f32] = bytemuck::cast_slice(events);
        out[self.event_data_offset..self.event_data_offset + event_floats.len()]
            .copy_from_slice(event_floats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn view() -> ViewBounds {
        ViewBounds {
            min: Vec2::new(-490.0, 0.0),
            max: Vec2::new(790.0, 720.0),
        }
    }

    #[test]
    fn from_default_config() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());
        assert_eq!(layout.max_shapes, 256);
        assert_eq!(layout.max_events, 32);
        assert_eq!(layout.shape_data_offset, HEADER_FLOATS);
        assert_eq!(layout.event_data_offset, HEADER_FLOATS + 256 * 12);
        assert_eq!(layout.buffer_total_floats, HEADER_FLOATS + 256 * 12 + 32 * 4);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn write_frame_fills_header_and_sections() {
        let layout = ProtocolLayout::new(4, 2);
        let shapes = [ShapeInstance { x: 150.0, y: 440.0, ..Default::default() }];
        let events = [GameEvent::new(1.0, 2.0)];
        let snapshot = FrameSnapshot {
            frame: 7,
            world_width: 1280.0,
            world_height: 720.0,
            view: view(),
            status: 3,
            shapes: &shapes,
            events: &events,
        };

        let mut out = Vec::new();
        layout.write_frame(&snapshot, &mut out);

        assert_eq!(out.len(), layout.buffer_total_floats);
        assert_eq!(out[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(out[HEADER_FRAME_COUNTER], 7.0);
        assert_eq!(out[HEADER_SHAPE_COUNT], 1.0);
        assert_eq!(out[HEADER_EVENT_COUNT], 1.0);
        assert_eq!(out[HEADER_CAMERA_MIN_X], -490.0);
        assert_eq!(out[HEADER_CAMERA_MAX_Y], 720.0);
        assert_eq!(out[HEADER_STATUS], 3.0);
        assert_eq!(out[layout.shape_data_offset], 150.0);
        assert_eq!(out[layout.shape_data_offset + 1], 440.0);
        assert_eq!(out[layout.event_data_offset], 1.0);
        assert_eq!(out[layout.event_data_offset + 1], 2.0);
    }

    #[test]
    fn write_frame_truncates_to_capacity() {
        let layout = ProtocolLayout::new(1, 1);
        let shapes = [ShapeInstance::default(); 3];
        let events = [GameEvent::default(); 5];
        let snapshot = FrameSnapshot {
            frame: 0,
            world_width: 800.0,
            world_height: 600.0,
            view: view(),
            status: 0,
            shapes: &shapes,
            events: &events,
        };

        let mut out = Vec::new();
        layout.write_frame(&snapshot, &mut out);
        assert_eq!(out.len(), layout.buffer_total_floats);
        assert_eq!(out[HEADER_SHAPE_COUNT], 1.0);
        assert_eq!(out[HEADER_EVENT_COUNT], 1.0);
    }
}
