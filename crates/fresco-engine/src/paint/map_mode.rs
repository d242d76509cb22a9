/// Texture-mapping mode: how a fragment's local-space position is turned
/// into a texture coordinate relative to the shape's bounding box.
///
/// The wire representation (uniform buffer) is a `u32`; the set is closed,
/// so keep this a plain enum rather than anything open-ended. Values outside
/// the set are handled by the fragment stage with a visible sentinel colour,
/// not by this type.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MapMode {
    /// Texture at native resolution, anchored to the box's min corner.
    ///
    /// Coordinates land in [0, 1] only when the box size equals the texture's
    /// native size; the host is responsible for that alignment.
    Exact,
    /// Texture at native resolution, placed relative to the box center.
    ExactCentered,
    /// Texture stretched across the full box regardless of native size.
    Stretch,
}

impl MapMode {
    #[inline]
    pub const fn as_u32(self) -> u32 {
        match self {
            MapMode::Exact => 0,
            MapMode::ExactCentered => 1,
            MapMode::Stretch => 2,
        }
    }

    #[inline]
    pub const fn from_u32(v: u32) -> Option<MapMode> {
        match v {
            0 => Some(MapMode::Exact),
            1 => Some(MapMode::ExactCentered),
            2 => Some(MapMode::Stretch),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_are_stable() {
        assert_eq!(MapMode::Exact.as_u32(), 0);
        assert_eq!(MapMode::ExactCentered.as_u32(), 1);
        assert_eq!(MapMode::Stretch.as_u32(), 2);
    }

    #[test]
    fn from_u32_rejects_unknown_values() {
        assert_eq!(MapMode::from_u32(1), Some(MapMode::ExactCentered));
        assert_eq!(MapMode::from_u32(3), None);
        assert_eq!(MapMode::from_u32(u32::MAX), None);
    }
}
