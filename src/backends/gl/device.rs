use gl;
use gl::types::*;
use smallvec::SmallVec;

use super::super::{AttachmentPoint, Device};
use super::capabilities::{Capabilities, Version};
use super::types;
use crate::errors::{Error, Result};
use crate::pipeline::{
    BlendAttachment, CullFace, FrontFaceOrder, IndexFormat, LogicOp, PolygonMode,
    PrimitiveTopology, VertexFormatClass, VertexInput,
};
use crate::resource::{Buffer, Sampler, TextureView};
use crate::target::{ClearColor, Viewport};
use crate::MAX_COLOR_ATTACHMENTS;

/// The OpenGL implementation of [`Device`], built on the 4.5 direct state
/// access entry points so that framebuffer and vertex-array manipulation does
/// not disturb the binding points the context tracks.
///
/// [`Device`]: ../trait.Device.html
pub struct GLDevice {
    capabilities: Capabilities,
}

impl GLDevice {
    /// The calling thread must own a current OpenGL context, with the
    /// function pointers of the `gl` crate already loaded against it.
    pub unsafe fn new() -> Result<Self> {
        let capabilities = Capabilities::parse()?;
        info!("GLDevice {:#?}", capabilities);
        check_capabilities(&capabilities)?;

        Ok(GLDevice { capabilities })
    }

    /// What the underlying context reported at construction.
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }
}

fn check_capabilities(caps: &Capabilities) -> Result<()> {
    if caps.version < Version::new(4, 5) {
        return Err(Error::Requirement("direct state access (4.5)".into()));
    }

    Ok(())
}

fn enable_or_disable(cap: GLenum, enabled: bool) {
    unsafe {
        if enabled {
            gl::Enable(cap);
        } else {
            gl::Disable(cap);
        }
    }
}

fn check() -> Result<()> {
    let err = unsafe { gl::GetError() };
    match err {
        gl::NO_ERROR => Ok(()),

        gl::INVALID_ENUM => Err(Error::Device(
            "An unacceptable value is specified for an enumerated argument.".into(),
        )),

        gl::INVALID_VALUE => Err(Error::Device("A numeric argument is out of range.".into())),

        gl::INVALID_OPERATION => Err(Error::Device(
            "The specified operation is not allowed in the current state.".into(),
        )),

        gl::INVALID_FRAMEBUFFER_OPERATION => Err(Error::Device(
            "The command is trying to render to or read from the framebuffer while the \
             currently bound framebuffer is not framebuffer complete."
                .into(),
        )),

        gl::OUT_OF_MEMORY => Err(Error::Device(
            "There is not enough memory left to execute the command.".into(),
        )),

        _ => Err(Error::Device("Oops, unknown OpenGL error.".into())),
    }
}

impl Device for GLDevice {
    fn bind_program(&mut self, program: u32) -> Result<()> {
        unsafe {
            gl::UseProgram(program);
        }
        check()
    }

    fn set_primitive_restart(&mut self, enabled: bool) -> Result<()> {
        enable_or_disable(gl::PRIMITIVE_RESTART_FIXED_INDEX, enabled);
        check()
    }

    fn set_depth_clamp(&mut self, enabled: bool) -> Result<()> {
        enable_or_disable(gl::DEPTH_CLAMP, enabled);
        check()
    }

    fn set_polygon_mode(&mut self, mode: PolygonMode) -> Result<()> {
        unsafe {
            gl::PolygonMode(gl::FRONT_AND_BACK, mode.into());
        }
        check()
    }

    fn set_cull_face(&mut self, face: CullFace) -> Result<()> {
        if face != CullFace::Nothing {
            enable_or_disable(gl::CULL_FACE, true);
            unsafe {
                gl::CullFace(match face {
                    CullFace::Front => gl::FRONT,
                    CullFace::Back => gl::BACK,
                    CullFace::Nothing => unreachable!(""),
                });
            }
        } else {
            enable_or_disable(gl::CULL_FACE, false);
        }

        check()
    }

    fn set_front_face_order(&mut self, order: FrontFaceOrder) -> Result<()> {
        unsafe {
            gl::FrontFace(order.into());
        }
        check()
    }

    fn set_depth_bias(&mut self, bias: Option<(f32, f32)>) -> Result<()> {
        let enabled = bias.is_some();
        enable_or_disable(gl::POLYGON_OFFSET_FILL, enabled);
        enable_or_disable(gl::POLYGON_OFFSET_LINE, enabled);
        enable_or_disable(gl::POLYGON_OFFSET_POINT, enabled);

        if let Some((constant, slope)) = bias {
            unsafe {
                gl::PolygonOffset(slope, constant);
            }
        }

        check()
    }

    fn set_line_width(&mut self, width: f32) -> Result<()> {
        unsafe {
            gl::LineWidth(width);
        }
        check()
    }

    fn set_point_size(&mut self, size: f32) -> Result<()> {
        unsafe {
            gl::PointSize(size);
        }
        check()
    }

    fn set_depth_test(&mut self, test: bool, write: bool) -> Result<()> {
        enable_or_disable(gl::DEPTH_TEST, test);
        unsafe {
            gl::DepthMask(if write { gl::TRUE } else { gl::FALSE });
        }
        check()
    }

    fn set_logic_op(&mut self, op: Option<LogicOp>) -> Result<()> {
        enable_or_disable(gl::COLOR_LOGIC_OP, op.is_some());
        if let Some(op) = op {
            unsafe {
                gl::LogicOp(op.into());
            }
        }

        check()
    }

    fn set_blend_constants(&mut self, constants: [f32; 4]) -> Result<()> {
        unsafe {
            gl::BlendColor(constants[0], constants[1], constants[2], constants[3]);
        }
        check()
    }

    fn set_blend_slot(&mut self, slot: u32, attachment: &BlendAttachment) -> Result<()> {
        unsafe {
            if attachment.enabled {
                gl::Enablei(gl::BLEND, slot);
                gl::BlendFuncSeparatei(
                    slot,
                    attachment.src_color.into(),
                    attachment.dst_color.into(),
                    attachment.src_alpha.into(),
                    attachment.dst_alpha.into(),
                );
                gl::BlendEquationSeparatei(
                    slot,
                    attachment.color_equation.into(),
                    attachment.alpha_equation.into(),
                );
            } else {
                gl::Disablei(gl::BLEND, slot);
            }

            let (r, g, b, a) = attachment.color_write;
            gl::ColorMaski(slot, r as u8, g as u8, b as u8, a as u8);
        }

        check()
    }

    fn create_vertex_array(&mut self) -> Result<u32> {
        let mut vao = 0;
        unsafe {
            gl::CreateVertexArrays(1, &mut vao);
        }
        check()?;
        assert!(vao != 0);
        Ok(vao)
    }

    fn delete_vertex_array(&mut self, vao: u32) -> Result<()> {
        unsafe {
            gl::DeleteVertexArrays(1, &vao);
        }
        check()
    }

    fn set_vertex_attribute(&mut self, vao: u32, input: &VertexInput) -> Result<()> {
        let size = GLint::from(input.format.components());
        let tp = types::vertex_format_type(input.format);

        unsafe {
            gl::EnableVertexArrayAttrib(vao, input.location);
            gl::VertexArrayAttribBinding(vao, input.location, input.binding);

            match input.format.class() {
                VertexFormatClass::Float => gl::VertexArrayAttribFormat(
                    vao,
                    input.location,
                    size,
                    tp,
                    input.format.normalized() as u8,
                    input.offset,
                ),
                VertexFormatClass::Integer => {
                    gl::VertexArrayAttribIFormat(vao, input.location, size, tp, input.offset)
                }
                VertexFormatClass::Double => {
                    gl::VertexArrayAttribLFormat(vao, input.location, size, tp, input.offset)
                }
            }
        }

        check()
    }

    fn bind_vertex_array(&mut self, vao: u32) -> Result<()> {
        unsafe {
            gl::BindVertexArray(vao);
        }
        check()
    }

    fn bind_vertex_buffer(
        &mut self,
        vao: u32,
        slot: u32,
        buffer: Buffer,
        offset: u64,
        stride: u64,
    ) -> Result<()> {
        unsafe {
            gl::VertexArrayVertexBuffer(
                vao,
                slot,
                buffer.handle(),
                offset as GLintptr,
                stride as GLsizei,
            );
        }
        check()
    }

    fn bind_index_buffer(&mut self, vao: u32, buffer: Buffer) -> Result<()> {
        unsafe {
            gl::VertexArrayElementBuffer(vao, buffer.handle());
        }
        check()
    }

    fn create_framebuffer(&mut self) -> Result<u32> {
        let mut fbo = 0;
        unsafe {
            gl::CreateFramebuffers(1, &mut fbo);
        }
        check()?;
        assert!(fbo != 0);
        Ok(fbo)
    }

    fn delete_framebuffer(&mut self, fbo: u32) -> Result<()> {
        unsafe {
            gl::DeleteFramebuffers(1, &fbo);
        }
        check()
    }

    fn bind_framebuffer(&mut self, fbo: Option<u32>) -> Result<()> {
        unsafe {
            gl::BindFramebuffer(gl::FRAMEBUFFER, fbo.unwrap_or(0));
        }
        check()
    }

    fn attach_color(&mut self, fbo: u32, slot: u32, view: TextureView) -> Result<()> {
        unsafe {
            gl::NamedFramebufferTexture(fbo, gl::COLOR_ATTACHMENT0 + slot, view.handle(), 0);
        }
        check()
    }

    fn attach_depth_stencil(
        &mut self,
        fbo: u32,
        point: AttachmentPoint,
        view: TextureView,
    ) -> Result<()> {
        unsafe {
            gl::NamedFramebufferTexture(fbo, point.into(), view.handle(), 0);
        }
        check()
    }

    fn set_draw_buffers(&mut self, fbo: u32, len: u32) -> Result<()> {
        let mut buffers = SmallVec::<[GLenum; MAX_COLOR_ATTACHMENTS]>::new();
        for i in 0..len {
            buffers.push(gl::COLOR_ATTACHMENT0 + i);
        }

        unsafe {
            gl::NamedFramebufferDrawBuffers(fbo, len as GLsizei, buffers.as_ptr());
        }
        check()
    }

    fn clear_color_slot(&mut self, fbo: u32, slot: u32, value: ClearColor) -> Result<()> {
        unsafe {
            match value {
                ClearColor::Float(v) => {
                    gl::ClearNamedFramebufferfv(fbo, gl::COLOR, slot as GLint, v.as_ptr())
                }
                ClearColor::Sint(v) => {
                    gl::ClearNamedFramebufferiv(fbo, gl::COLOR, slot as GLint, v.as_ptr())
                }
                ClearColor::Uint(v) => {
                    gl::ClearNamedFramebufferuiv(fbo, gl::COLOR, slot as GLint, v.as_ptr())
                }
            }
        }

        check()
    }

    fn clear_depth(&mut self, fbo: u32, depth: f32) -> Result<()> {
        unsafe {
            gl::ClearNamedFramebufferfv(fbo, gl::DEPTH, 0, &depth);
        }
        check()
    }

    fn clear_stencil(&mut self, fbo: u32, stencil: i32) -> Result<()> {
        unsafe {
            gl::ClearNamedFramebufferiv(fbo, gl::STENCIL, 0, &stencil);
        }
        check()
    }

    fn clear_depth_stencil(&mut self, fbo: u32, depth: f32, stencil: i32) -> Result<()> {
        unsafe {
            gl::ClearNamedFramebufferfi(fbo, gl::DEPTH_STENCIL, 0, depth, stencil);
        }
        check()
    }

    fn clear(
        &mut self,
        color: Option<[f32; 4]>,
        depth: Option<f32>,
        stencil: Option<i32>,
    ) -> Result<()> {
        let mut bits = 0;
        unsafe {
            if let Some(v) = color {
                bits |= gl::COLOR_BUFFER_BIT;
                gl::ClearColor(v[0], v[1], v[2], v[3]);
            }

            if let Some(v) = depth {
                bits |= gl::DEPTH_BUFFER_BIT;
                gl::ClearDepthf(v);
            }

            if let Some(v) = stencil {
                bits |= gl::STENCIL_BUFFER_BIT;
                gl::ClearStencil(v);
            }

            if bits != 0 {
                gl::Clear(bits);
            }
        }

        if bits != 0 {
            check()
        } else {
            Ok(())
        }
    }

    fn set_viewport(&mut self, vp: Viewport) -> Result<()> {
        unsafe {
            gl::Viewport(
                vp.position.x,
                vp.position.y,
                vp.size.x as GLsizei,
                vp.size.y as GLsizei,
            );
            gl::DepthRangef(vp.min_depth, vp.max_depth);
        }

        check()
    }

    fn bind_uniform_buffer(
        &mut self,
        slot: u32,
        buffer: Buffer,
        offset: u64,
        size: u64,
    ) -> Result<()> {
        unsafe {
            gl::BindBufferRange(
                gl::UNIFORM_BUFFER,
                slot,
                buffer.handle(),
                offset as GLintptr,
                size as GLsizeiptr,
            );
        }
        check()
    }

    fn bind_storage_buffer(
        &mut self,
        slot: u32,
        buffer: Buffer,
        offset: u64,
        size: u64,
    ) -> Result<()> {
        unsafe {
            gl::BindBufferRange(
                gl::SHADER_STORAGE_BUFFER,
                slot,
                buffer.handle(),
                offset as GLintptr,
                size as GLsizeiptr,
            );
        }
        check()
    }

    fn bind_sampled_texture(
        &mut self,
        slot: u32,
        view: TextureView,
        sampler: Sampler,
    ) -> Result<()> {
        unsafe {
            gl::BindTextureUnit(slot, view.handle());
            gl::BindSampler(slot, sampler.handle());
        }
        check()
    }

    fn bind_image(&mut self, slot: u32, view: TextureView, level: u32) -> Result<()> {
        unsafe {
            gl::BindImageTexture(
                slot,
                view.handle(),
                level as GLint,
                gl::TRUE,
                0,
                gl::READ_WRITE,
                types::texture_format(view.format()),
            );
        }
        check()
    }

    fn draw(
        &mut self,
        topology: PrimitiveTopology,
        vertices: u32,
        instances: u32,
        first_vertex: u32,
        first_instance: u32,
    ) -> Result<()> {
        unsafe {
            gl::DrawArraysInstancedBaseInstance(
                topology.into(),
                first_vertex as GLint,
                vertices as GLsizei,
                instances as GLsizei,
                first_instance,
            );
        }
        check()
    }

    fn draw_indexed(
        &mut self,
        topology: PrimitiveTopology,
        format: IndexFormat,
        indices: u32,
        instances: u32,
        first_index: u32,
        base_vertex: i32,
        first_instance: u32,
    ) -> Result<()> {
        let offset = first_index as usize * format.stride();
        unsafe {
            gl::DrawElementsInstancedBaseVertexBaseInstance(
                topology.into(),
                indices as GLsizei,
                format.into(),
                offset as *const ::std::os::raw::c_void,
                instances as GLsizei,
                base_vertex,
                first_instance,
            );
        }
        check()
    }
}
