use bytemuck::{Pod, Zeroable};

/// Shape kind codes written into `ShapeInstance::kind`.
pub const SHAPE_CIRCLE: f32 = 0.0;
pub const SHAPE_RECT: f32 = 1.0;

/// Per-instance shape data read by the host canvas renderer.
/// 12 floats = 48 bytes per instance.
///
/// Circles use `half_width` as the radius and leave `half_height` equal to it.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ShapeInstance {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub kind: f32,
    pub half_width: f32,
    pub half_height: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub layer: f32,
    pub _pad0: f32,
    pub _pad1: f32,
}

impl ShapeInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Buffer of shape instances, ordered back-to-front.
pub struct ShapeBuffer {
    instances: Vec<ShapeInstance>,
    capacity: usize,
}

impl ShapeBuffer {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
            capacity: max,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Append an instance. Returns `false` (and drops it) once the buffer is full.
    pub fn push(&mut self, instance: ShapeInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instances(&self) -> &[ShapeInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Raw pointer to instance data for reads from JS memory.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for ShapeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_instance_is_48_bytes() {
        assert_eq!(std::mem::size_of::<ShapeInstance>(), ShapeInstance::STRIDE_BYTES);
        assert_eq!(ShapeInstance::FLOATS, 12);
    }

    #[test]
    fn push_respects_capacity() {
        let mut buf = ShapeBuffer::with_capacity(2);
        assert!(buf.push(ShapeInstance::default()));
        assert!(buf.push(ShapeInstance::default()));
        assert!(!buf.push(ShapeInstance::default()));
        assert_eq!(buf.instance_count(), 2);
    }
}
