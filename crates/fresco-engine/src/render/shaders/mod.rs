//! WGSL shader sources, included at compile time.
//!
//! Keeping the shaders as standalone `.wgsl` files gives IDE support while
//! the binary stays self-contained. The fragment math must match the CPU
//! reference in [`super::fragment`].

/// Colour-fill material (solid paints).
pub const COLOUR: &str = include_str!("colour.wgsl");

/// Texture-sample material (textured paints).
pub const TEXTURE: &str = include_str!("texture.wgsl");

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(source: &str) -> naga::valid::ModuleInfo {
        let module = naga::front::wgsl::parse_str(source).expect("shader fails to parse");
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::default(),
        )
        .validate(&module)
        .expect("shader fails validation")
    }

    #[test]
    fn colour_shader_is_valid_wgsl() {
        validate(COLOUR);
    }

    #[test]
    fn texture_shader_is_valid_wgsl() {
        validate(TEXTURE);
    }

    #[test]
    fn texture_shader_queries_dimensions_dynamically() {
        // The mapping math depends on the texture's reported native size at
        // evaluation time; it must never arrive via a uniform.
        assert!(TEXTURE.contains("textureDimensions"));
    }
}
