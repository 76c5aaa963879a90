use super::{AttachmentPoint, Device};
use crate::errors::Result;
use crate::pipeline::{
    BlendAttachment, CullFace, FrontFaceOrder, IndexFormat, LogicOp, PolygonMode,
    PrimitiveTopology, VertexInput,
};
use crate::resource::{Buffer, Sampler, TextureView};
use crate::target::{ClearColor, Viewport};

pub struct HeadlessDevice {
    next_object: u32,
}

impl HeadlessDevice {
    pub fn new() -> Self {
        HeadlessDevice { next_object: 1 }
    }

    fn allocate(&mut self) -> u32 {
        let id = self.next_object;
        self.next_object += 1;
        id
    }
}

impl Device for HeadlessDevice {
    fn bind_program(&mut self, _: u32) -> Result<()> {
        Ok(())
    }

    fn set_primitive_restart(&mut self, _: bool) -> Result<()> {
        Ok(())
    }

    fn set_depth_clamp(&mut self, _: bool) -> Result<()> {
        Ok(())
    }

    fn set_polygon_mode(&mut self, _: PolygonMode) -> Result<()> {
        Ok(())
    }

    fn set_cull_face(&mut self, _: CullFace) -> Result<()> {
        Ok(())
    }

    fn set_front_face_order(&mut self, _: FrontFaceOrder) -> Result<()> {
        Ok(())
    }

    fn set_depth_bias(&mut self, _: Option<(f32, f32)>) -> Result<()> {
        Ok(())
    }

    fn set_line_width(&mut self, _: f32) -> Result<()> {
        Ok(())
    }

    fn set_point_size(&mut self, _: f32) -> Result<()> {
        Ok(())
    }

    fn set_depth_test(&mut self, _: bool, _: bool) -> Result<()> {
        Ok(())
    }

    fn set_logic_op(&mut self, _: Option<LogicOp>) -> Result<()> {
        Ok(())
    }

    fn set_blend_constants(&mut self, _: [f32; 4]) -> Result<()> {
        Ok(())
    }

    fn set_blend_slot(&mut self, _: u32, _: &BlendAttachment) -> Result<()> {
        Ok(())
    }

    fn create_vertex_array(&mut self) -> Result<u32> {
        Ok(self.allocate())
    }

    fn delete_vertex_array(&mut self, _: u32) -> Result<()> {
        Ok(())
    }

    fn set_vertex_attribute(&mut self, _: u32, _: &VertexInput) -> Result<()> {
        Ok(())
    }

    fn bind_vertex_array(&mut self, _: u32) -> Result<()> {
        Ok(())
    }

    fn bind_vertex_buffer(&mut self, _: u32, _: u32, _: Buffer, _: u64, _: u64) -> Result<()> {
        Ok(())
    }

    fn bind_index_buffer(&mut self, _: u32, _: Buffer) -> Result<()> {
        Ok(())
    }

    fn create_framebuffer(&mut self) -> Result<u32> {
        Ok(self.allocate())
    }

    fn delete_framebuffer(&mut self, _: u32) -> Result<()> {
        Ok(())
    }

    fn bind_framebuffer(&mut self, _: Option<u32>) -> Result<()> {
        Ok(())
    }

    fn attach_color(&mut self, _: u32, _: u32, _: TextureView) -> Result<()> {
        Ok(())
    }

    fn attach_depth_stencil(&mut self, _: u32, _: AttachmentPoint, _: TextureView) -> Result<()> {
        Ok(())
    }

    fn set_draw_buffers(&mut self, _: u32, _: u32) -> Result<()> {
        Ok(())
    }

    fn clear_color_slot(&mut self, _: u32, _: u32, _: ClearColor) -> Result<()> {
        Ok(())
    }

    fn clear_depth(&mut self, _: u32, _: f32) -> Result<()> {
        Ok(())
    }

    fn clear_stencil(&mut self, _: u32, _: i32) -> Result<()> {
        Ok(())
    }

    fn clear_depth_stencil(&mut self, _: u32, _: f32, _: i32) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self, _: Option<[f32; 4]>, _: Option<f32>, _: Option<i32>) -> Result<()> {
        Ok(())
    }

    fn set_viewport(&mut self, _: Viewport) -> Result<()> {
        Ok(())
    }

    fn bind_uniform_buffer(&mut self, _: u32, _: Buffer, _: u64, _: u64) -> Result<()> {
        Ok(())
    }

    fn bind_storage_buffer(&mut self, _: u32, _: Buffer, _: u64, _: u64) -> Result<()> {
        Ok(())
    }

    fn bind_sampled_texture(&mut self, _: u32, _: TextureView, _: Sampler) -> Result<()> {
        Ok(())
    }

    fn bind_image(&mut self, _: u32, _: TextureView, _: u32) -> Result<()> {
        Ok(())
    }

    fn draw(&mut self, _: PrimitiveTopology, _: u32, _: u32, _: u32, _: u32) -> Result<()> {
        Ok(())
    }

    fn draw_indexed(
        &mut self,
        _: PrimitiveTopology,
        _: IndexFormat,
        _: u32,
        _: u32,
        _: u32,
        _: i32,
        _: u32,
    ) -> Result<()> {
        Ok(())
    }
}
