/// Texture filtering policy.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum FilterMode {
    /// Nearest-texel lookup.
    Nearest,
    /// Bilinear interpolation between the four nearest texels.
    #[default]
    Linear,
}

/// Out-of-range texture-coordinate handling, per axis.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum WrapMode {
    /// Clamp to the edge texel.
    #[default]
    Clamp,
    /// Tile the texture.
    Repeat,
    /// Tile with every other repetition mirrored.
    Mirror,
}

/// Sampling policy for a bound texture.
///
/// This is the external collaborator that resolves out-of-[0,1] coordinates;
/// the texture-coordinate mappings themselves never clamp or wrap.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct SamplerOptions {
    pub filter: FilterMode,
    pub wrap_x: WrapMode,
    pub wrap_y: WrapMode,
}

impl SamplerOptions {
    #[inline]
    pub fn nearest() -> Self {
        Self { filter: FilterMode::Nearest, ..Default::default() }
    }

    #[inline]
    pub fn repeat() -> Self {
        Self {
            wrap_x: WrapMode::Repeat,
            wrap_y: WrapMode::Repeat,
            ..Default::default()
        }
    }
}
