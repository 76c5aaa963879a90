//! The backend of the renderer, which should be responsible for only one
//! thing: applying state transitions and submitting draw-calls through the
//! low-level video APIs.
//!
//! Everything above this seam is backend-agnostic; all enum and format
//! translation is confined to the individual backends. The operations are
//! deliberately raw: redundancy elimination happens in the render context,
//! a backend applies exactly what it is told.

use crate::errors::Result;
use crate::pipeline::{
    BlendAttachment, CullFace, FrontFaceOrder, IndexFormat, LogicOp, PolygonMode,
    PrimitiveTopology, VertexInput,
};
use crate::resource::{Buffer, Sampler, TextureView};
use crate::target::{ClearColor, Viewport};

/// The non-color attachment points of a framebuffer. Depth and stencil views
/// aliasing one image are attached through the combined point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentPoint {
    Depth,
    Stencil,
    DepthStencil,
}

pub trait Device {
    // Pipeline state.
    fn bind_program(&mut self, program: u32) -> Result<()>;

    fn set_primitive_restart(&mut self, enabled: bool) -> Result<()>;

    fn set_depth_clamp(&mut self, enabled: bool) -> Result<()>;

    fn set_polygon_mode(&mut self, mode: PolygonMode) -> Result<()>;

    fn set_cull_face(&mut self, face: CullFace) -> Result<()>;

    fn set_front_face_order(&mut self, order: FrontFaceOrder) -> Result<()>;

    fn set_depth_bias(&mut self, bias: Option<(f32, f32)>) -> Result<()>;

    fn set_line_width(&mut self, width: f32) -> Result<()>;

    fn set_point_size(&mut self, size: f32) -> Result<()>;

    fn set_depth_test(&mut self, test: bool, write: bool) -> Result<()>;

    fn set_logic_op(&mut self, op: Option<LogicOp>) -> Result<()>;

    fn set_blend_constants(&mut self, constants: [f32; 4]) -> Result<()>;

    /// Applies the blend function, equation and write mask of one indexed
    /// color output.
    fn set_blend_slot(&mut self, slot: u32, attachment: &BlendAttachment) -> Result<()>;

    // Vertex array objects.
    fn create_vertex_array(&mut self) -> Result<u32>;

    fn delete_vertex_array(&mut self, vao: u32) -> Result<()>;

    fn set_vertex_attribute(&mut self, vao: u32, input: &VertexInput) -> Result<()>;

    fn bind_vertex_array(&mut self, vao: u32) -> Result<()>;

    fn bind_vertex_buffer(
        &mut self,
        vao: u32,
        slot: u32,
        buffer: Buffer,
        offset: u64,
        stride: u64,
    ) -> Result<()>;

    fn bind_index_buffer(&mut self, vao: u32, buffer: Buffer) -> Result<()>;

    // Framebuffer objects.
    fn create_framebuffer(&mut self) -> Result<u32>;

    fn delete_framebuffer(&mut self, fbo: u32) -> Result<()>;

    /// Binds `fbo` as the active render target, or the default framebuffer
    /// when `None`.
    fn bind_framebuffer(&mut self, fbo: Option<u32>) -> Result<()>;

    fn attach_color(&mut self, fbo: u32, slot: u32, view: TextureView) -> Result<()>;

    fn attach_depth_stencil(
        &mut self,
        fbo: u32,
        point: AttachmentPoint,
        view: TextureView,
    ) -> Result<()>;

    /// Enables the first `len` sequential color outputs of `fbo`.
    fn set_draw_buffers(&mut self, fbo: u32, len: u32) -> Result<()>;

    fn clear_color_slot(&mut self, fbo: u32, slot: u32, value: ClearColor) -> Result<()>;

    fn clear_depth(&mut self, fbo: u32, depth: f32) -> Result<()>;

    fn clear_stencil(&mut self, fbo: u32, stencil: i32) -> Result<()>;

    fn clear_depth_stencil(&mut self, fbo: u32, depth: f32, stencil: i32) -> Result<()>;

    /// Clears the currently bound default framebuffer. Does nothing when no
    /// clear is requested.
    fn clear(
        &mut self,
        color: Option<[f32; 4]>,
        depth: Option<f32>,
        stencil: Option<i32>,
    ) -> Result<()>;

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    // Resource bindings.
    fn bind_uniform_buffer(
        &mut self,
        slot: u32,
        buffer: Buffer,
        offset: u64,
        size: u64,
    ) -> Result<()>;

    fn bind_storage_buffer(
        &mut self,
        slot: u32,
        buffer: Buffer,
        offset: u64,
        size: u64,
    ) -> Result<()>;

    fn bind_sampled_texture(&mut self, slot: u32, view: TextureView, sampler: Sampler)
        -> Result<()>;

    fn bind_image(&mut self, slot: u32, view: TextureView, level: u32) -> Result<()>;

    // Draws.
    fn draw(
        &mut self,
        topology: PrimitiveTopology,
        vertices: u32,
        instances: u32,
        first_vertex: u32,
        first_instance: u32,
    ) -> Result<()>;

    fn draw_indexed(
        &mut self,
        topology: PrimitiveTopology,
        format: IndexFormat,
        indices: u32,
        instances: u32,
        first_index: u32,
        base_vertex: i32,
        first_instance: u32,
    ) -> Result<()>;
}

pub mod gl;
pub mod headless;

/// Creates the OpenGL device. The calling thread must own a current OpenGL
/// 4.5+ context for the whole lifetime of the device.
pub unsafe fn new() -> Result<Box<dyn Device>> {
    let device = self::gl::device::GLDevice::new()?;
    Ok(Box::new(device))
}

/// Creates a device that accepts everything and touches nothing. Useful for
/// tests and for running on machines without a video driver.
pub fn new_headless() -> Box<dyn Device> {
    Box::new(self::headless::HeadlessDevice::new())
}
