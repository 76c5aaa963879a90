//! Render target descriptions: the set of attachments, clears and viewport
//! that stays fixed for the duration of one render pass.

use cgmath::Vector2;
use smallvec::SmallVec;

use crate::resource::{BaseFormatClass, TextureView};
use crate::MAX_COLOR_ATTACHMENTS;

/// A color clear value, tagged by the numeric class of the attachment it
/// applies to. Using a tag that doesn't match the attachment format is a
/// caller error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClearColor {
    Float([f32; 4]),
    Sint([i32; 4]),
    Uint([u32; 4]),
}

impl ClearColor {
    pub fn class(self) -> BaseFormatClass {
        match self {
            ClearColor::Float(_) => BaseFormatClass::Float,
            ClearColor::Sint(_) => BaseFormatClass::SignedInt,
            ClearColor::Uint(_) => BaseFormatClass::UnsignedInt,
        }
    }
}

/// One color attachment of a render target. `clear` requests a clear at the
/// beginning of the pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorAttachment {
    pub view: TextureView,
    pub clear: Option<ClearColor>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthAttachment {
    pub view: TextureView,
    pub clear: Option<f32>,
}

/// The stencil attachment may alias the same underlying image as the depth
/// attachment, in which case both are attached through a single combined
/// attachment point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StencilAttachment {
    pub view: TextureView,
    pub clear: Option<i32>,
}

/// The viewport rectangle and depth range applied with a render target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub position: Vector2<i32>,
    pub size: Vector2<u32>,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Viewport {
            position: Vector2::new(0, 0),
            size: Vector2::new(width, height),
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

/// An ordered set of render targets for one pass. Beginning two consecutive
/// passes with the very same `RenderTarget` value (by identity, not by
/// content) skips the framebuffer reconfiguration entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTarget {
    pub colors: SmallVec<[ColorAttachment; MAX_COLOR_ATTACHMENTS]>,
    pub depth: Option<DepthAttachment>,
    pub stencil: Option<StencilAttachment>,
    pub viewport: Viewport,
}

impl RenderTarget {
    pub fn new(viewport: Viewport) -> Self {
        RenderTarget {
            colors: SmallVec::new(),
            depth: None,
            stencil: None,
            viewport,
        }
    }
}

/// The implicit swapchain/default target. There is nothing to attach; the
/// only choice is what to clear on load.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DefaultTarget {
    pub clear_color: Option<[f32; 4]>,
    pub clear_depth: Option<f32>,
    pub clear_stencil: Option<i32>,
}
