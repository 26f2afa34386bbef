/// Render layer: controls draw order for shapes.
///
/// Layers are drawn back-to-front: Terrain first, Character last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum RenderLayer {
    Terrain = 0,
    #[default]
    Props = 1,
    Hazards = 2,
    Character = 3,
}

impl RenderLayer {
    /// Convert to u8 for protocol serialization.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_back_to_front() {
        assert!(RenderLayer::Terrain < RenderLayer::Props);
        assert!(RenderLayer::Props < RenderLayer::Hazards);
        assert!(RenderLayer::Hazards < RenderLayer::Character);
        assert_eq!(RenderLayer::Character.as_u8(), 3);
    }
}
