//! Opaque references to externally managed device resources. This crate never
//! creates, resizes or destroys any of them; it only binds them.

/// A buffer object created and owned elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Buffer {
    id: u32,
}

impl Buffer {
    /// Wraps a raw buffer object name. The caller keeps ownership and must
    /// keep the object alive for as long as it stays bound.
    #[inline]
    pub fn from_raw(id: u32) -> Self {
        Buffer { id }
    }

    #[inline]
    pub fn handle(self) -> u32 {
        self.id
    }
}

/// A sampler object created and owned elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sampler {
    id: u32,
}

impl Sampler {
    #[inline]
    pub fn from_raw(id: u32) -> Self {
        Sampler { id }
    }

    #[inline]
    pub fn handle(self) -> u32 {
        self.id
    }
}

/// A view over a texture created and owned elsewhere, carrying just enough
/// metadata to attach, clear and bind it correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureView {
    id: u32,
    format: TextureFormat,
    levels: u32,
}

impl TextureView {
    #[inline]
    pub fn from_raw(id: u32, format: TextureFormat, levels: u32) -> Self {
        TextureView { id, format, levels }
    }

    #[inline]
    pub fn handle(self) -> u32 {
        self.id
    }

    #[inline]
    pub fn format(self) -> TextureFormat {
        self.format
    }

    /// The number of mip levels of the underlying image.
    #[inline]
    pub fn levels(self) -> u32 {
        self.levels
    }
}

/// List of all the possible formats of a texture that can be attached to a
/// render target or bound as an image.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TextureFormat {
    R8,
    RG8,
    RGBA8,
    R16F,
    RG16F,
    RGBA16F,
    R32F,
    RG32F,
    RGBA32F,
    R8I,
    RG8I,
    RGBA8I,
    R32I,
    RGBA32I,
    R8UI,
    RG8UI,
    RGBA8UI,
    R32UI,
    RGBA32UI,
    Depth16,
    Depth24,
    Depth32F,
    Depth24Stencil8,
    Stencil8,
}

/// The numeric class a format resolves to when read or cleared. Clear values
/// for an attachment must carry the matching class.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BaseFormatClass {
    Float,
    SignedInt,
    UnsignedInt,
}

impl TextureFormat {
    pub fn base_class(self) -> BaseFormatClass {
        match self {
            TextureFormat::R8
            | TextureFormat::RG8
            | TextureFormat::RGBA8
            | TextureFormat::R16F
            | TextureFormat::RG16F
            | TextureFormat::RGBA16F
            | TextureFormat::R32F
            | TextureFormat::RG32F
            | TextureFormat::RGBA32F
            | TextureFormat::Depth16
            | TextureFormat::Depth24
            | TextureFormat::Depth32F
            | TextureFormat::Depth24Stencil8 => BaseFormatClass::Float,
            TextureFormat::R8I
            | TextureFormat::RG8I
            | TextureFormat::RGBA8I
            | TextureFormat::R32I
            | TextureFormat::RGBA32I => BaseFormatClass::SignedInt,
            TextureFormat::R8UI
            | TextureFormat::RG8UI
            | TextureFormat::RGBA8UI
            | TextureFormat::R32UI
            | TextureFormat::RGBA32UI
            | TextureFormat::Stencil8 => BaseFormatClass::UnsignedInt,
        }
    }

    pub fn is_color(self) -> bool {
        !self.has_depth() && !self.has_stencil()
    }

    pub fn has_depth(self) -> bool {
        match self {
            TextureFormat::Depth16
            | TextureFormat::Depth24
            | TextureFormat::Depth32F
            | TextureFormat::Depth24Stencil8 => true,
            _ => false,
        }
    }

    pub fn has_stencil(self) -> bool {
        match self {
            TextureFormat::Depth24Stencil8 | TextureFormat::Stencil8 => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn format_classes() {
        assert_eq!(TextureFormat::RGBA8.base_class(), BaseFormatClass::Float);
        assert_eq!(TextureFormat::RGBA8I.base_class(), BaseFormatClass::SignedInt);
        assert_eq!(TextureFormat::R32UI.base_class(), BaseFormatClass::UnsignedInt);

        assert!(TextureFormat::RGBA8.is_color());
        assert!(!TextureFormat::Depth24Stencil8.is_color());
        assert!(TextureFormat::Depth24Stencil8.has_depth());
        assert!(TextureFormat::Depth24Stencil8.has_stencil());
        assert!(!TextureFormat::Depth32F.has_stencil());
    }
}
