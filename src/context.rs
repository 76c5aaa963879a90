//! The explicit rendering context: one pipeline registry plus the state of at
//! most one active render pass.
//!
//! Rendering cannot be suspended or resumed, and it cannot be shared across
//! threads; a context owns the whole session and applies commands to the
//! device immediately. The context remembers what was applied last and skips
//! redundant work: rebinding the pipeline that is already bound applies
//! nothing, and beginning a pass over the identical render target value
//! reuses the framebuffer that was built for it.

use crate::backends::{self, AttachmentPoint, Device};
use crate::errors::{Error, Result};
use crate::pipeline::{IndexFormat, PipelineParams, PrimitiveTopology};
use crate::registry::{CachedPipeline, PipelineHandle, PipelineRegistry};
use crate::resource::{Buffer, Sampler, TextureView};
use crate::target::{DefaultTarget, RenderTarget};

/// Book-keeping of the active session. The `last_*` fields survive the end of
/// a pass on purpose; device state does not expire with a pass, so the
/// redundancy elimination may span passes.
struct SessionState {
    pass_active: bool,
    pipeline_bound: bool,
    index_bound: bool,
    last_pipeline: Option<PipelineHandle>,
    // Identity of the last custom render target. Compared by address only and
    // never dereferenced.
    last_target: Option<*const RenderTarget>,
    topology: PrimitiveTopology,
    index_format: IndexFormat,
    vao: Option<u32>,
    fbo: Option<u32>,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState {
            pass_active: false,
            pipeline_bound: false,
            index_bound: false,
            last_pipeline: None,
            last_target: None,
            topology: PrimitiveTopology::Triangles,
            index_format: IndexFormat::U16,
            vao: None,
            fbo: None,
        }
    }
}

/// The single entry point for compiling pipelines and recording one render
/// pass at a time. Create one per rendering thread and keep it there.
pub struct RenderContext {
    device: Box<dyn Device>,
    registry: PipelineRegistry,
    state: SessionState,
}

impl RenderContext {
    pub fn new(device: Box<dyn Device>) -> Self {
        RenderContext {
            device,
            registry: PipelineRegistry::new(),
            state: SessionState::default(),
        }
    }

    /// Creates a context over the no-op device.
    pub fn headless() -> Self {
        Self::new(backends::new_headless())
    }

    /// Compiles `params` into a stable pipeline handle. See
    /// [`PipelineRegistry::compile`].
    ///
    /// [`PipelineRegistry::compile`]: ../registry/struct.PipelineRegistry.html#method.compile
    pub fn create_pipeline(&mut self, params: &PipelineParams) -> PipelineHandle {
        self.registry.compile(params)
    }

    /// Looks up the durable copy behind `handle`.
    pub fn pipeline(&self, handle: PipelineHandle) -> Option<&CachedPipeline> {
        self.registry.get(handle)
    }

    /// Destroys a compiled pipeline and returns whether it existed. The
    /// pipeline must not be bound in an active pass.
    pub fn delete_pipeline(&mut self, handle: PipelineHandle) -> bool {
        if self.state.last_pipeline == Some(handle) {
            self.state.last_pipeline = None;
        }

        self.registry.destroy(handle)
    }

    pub fn registry(&self) -> &PipelineRegistry {
        &self.registry
    }

    /// Begins a pass over the default framebuffer, clearing whatever the
    /// target requests in a single operation.
    pub fn begin_default_pass(&mut self, target: &DefaultTarget) -> Result<()> {
        if self.state.pass_active {
            return Err(Error::PassAlreadyActive);
        }

        self.state.pass_active = true;
        self.state.pipeline_bound = false;
        self.state.index_bound = false;
        self.state.last_target = None;

        self.device.bind_framebuffer(None)?;
        self.device
            .clear(target.clear_color, target.clear_depth, target.clear_stencil)
    }

    /// Begins a pass over an explicit render target. Passing the identical
    /// `target` value as the previous pass skips the whole framebuffer
    /// reconfiguration, clears included.
    pub fn begin_pass(&mut self, target: &RenderTarget) -> Result<()> {
        if self.state.pass_active {
            return Err(Error::PassAlreadyActive);
        }

        self.state.pass_active = true;
        self.state.pipeline_bound = false;
        self.state.index_bound = false;

        if self.state.last_target == Some(target as *const RenderTarget) {
            return Ok(());
        }

        self.state.last_target = Some(target as *const RenderTarget);

        if let Some(fbo) = self.state.fbo.take() {
            self.device.delete_framebuffer(fbo)?;
        }

        let fbo = self.device.create_framebuffer()?;
        self.state.fbo = Some(fbo);

        for (i, attachment) in target.colors.iter().enumerate() {
            self.device.attach_color(fbo, i as u32, attachment.view)?;
        }

        self.device.set_draw_buffers(fbo, target.colors.len() as u32)?;

        for (i, attachment) in target.colors.iter().enumerate() {
            if let Some(value) = attachment.clear {
                debug_assert_eq!(value.class(), attachment.view.format().base_class());
                self.device.clear_color_slot(fbo, i as u32, value)?;
            }
        }

        match (&target.depth, &target.stencil) {
            (Some(depth), Some(stencil)) if depth.view == stencil.view => {
                self.device
                    .attach_depth_stencil(fbo, AttachmentPoint::DepthStencil, depth.view)?;
            }
            (Some(depth), Some(stencil)) => {
                self.device
                    .attach_depth_stencil(fbo, AttachmentPoint::Depth, depth.view)?;
                self.device
                    .attach_depth_stencil(fbo, AttachmentPoint::Stencil, stencil.view)?;
            }
            (Some(depth), None) => {
                self.device
                    .attach_depth_stencil(fbo, AttachmentPoint::Depth, depth.view)?;
            }
            (None, Some(stencil)) => {
                self.device
                    .attach_depth_stencil(fbo, AttachmentPoint::Stencil, stencil.view)?;
            }
            (None, None) => {}
        }

        let depth_clear = target.depth.as_ref().and_then(|v| v.clear);
        let stencil_clear = target.stencil.as_ref().and_then(|v| v.clear);
        match (depth_clear, stencil_clear) {
            // Clear depth and stencil simultaneously.
            (Some(depth), Some(stencil)) => self.device.clear_depth_stencil(fbo, depth, stencil)?,
            (Some(depth), None) => self.device.clear_depth(fbo, depth)?,
            (None, Some(stencil)) => self.device.clear_stencil(fbo, stencil)?,
            (None, None) => {}
        }

        self.device.set_viewport(target.viewport)?;
        self.device.bind_framebuffer(Some(fbo))
    }

    /// Ends the active pass. The pipeline and index-buffer bindings expire
    /// with the pass and must be re-established in the next one.
    pub fn end_pass(&mut self) -> Result<()> {
        if !self.state.pass_active {
            return Err(Error::PassNotActive);
        }

        self.state.pass_active = false;
        self.state.pipeline_bound = false;
        self.state.index_bound = false;
        Ok(())
    }

    /// Binds a compiled pipeline. Rebinding the handle that is already bound
    /// applies nothing; everything else applies the full pipeline state in a
    /// fixed order.
    pub fn bind_pipeline(&mut self, handle: PipelineHandle) -> Result<()> {
        if !self.state.pass_active {
            return Err(Error::PassNotActive);
        }

        self.state.pipeline_bound = true;

        if self.state.last_pipeline == Some(handle) {
            return Ok(());
        }

        let pipeline = match self.registry.get(handle) {
            Some(pipeline) => pipeline,
            None => return Err(Error::PipelineHandleInvalid(handle)),
        };

        self.state.last_pipeline = Some(handle);

        // Shader program.
        self.device.bind_program(pipeline.program)?;

        // Input assembly.
        let ia = pipeline.input_assembly;
        self.device.set_primitive_restart(ia.primitive_restart)?;
        self.state.topology = ia.topology;

        // Vertex input. The attribute layout is rebuilt from scratch; vertex
        // and index buffers have to be re-attached afterwards.
        if let Some(vao) = self.state.vao.take() {
            self.device.delete_vertex_array(vao)?;
        }

        let vao = self.device.create_vertex_array()?;
        for input in pipeline.vertex_inputs.iter() {
            self.device.set_vertex_attribute(vao, input)?;
        }

        self.device.bind_vertex_array(vao)?;
        self.state.vao = Some(vao);

        // Rasterization.
        let rs = pipeline.rasterization;
        self.device.set_depth_clamp(rs.depth_clamp)?;
        self.device.set_polygon_mode(rs.polygon_mode)?;
        self.device.set_cull_face(rs.cull_face)?;
        self.device.set_front_face_order(rs.front_face_order)?;
        self.device.set_depth_bias(rs.depth_bias)?;
        self.device.set_line_width(rs.line_width)?;
        self.device.set_point_size(rs.point_size)?;

        // Depth + stencil.
        let ds = pipeline.depth_stencil;
        self.device.set_depth_test(ds.depth_test, ds.depth_write)?;
        // TODO: apply the stencil fields once the device grows stencil entry
        // points.

        // Color blending.
        self.device.set_logic_op(pipeline.logic_op)?;
        self.device.set_blend_constants(pipeline.blend_constants)?;
        for (i, attachment) in pipeline.blend_attachments.iter().enumerate() {
            self.device.set_blend_slot(i as u32, attachment)?;
        }

        Ok(())
    }

    /// Attaches a vertex buffer to the given binding slot of the layout that
    /// the bound pipeline established.
    pub fn bind_vertex_buffer(
        &mut self,
        slot: u32,
        buffer: Buffer,
        offset: u64,
        stride: u64,
    ) -> Result<()> {
        if !self.state.pass_active {
            return Err(Error::PassNotActive);
        }

        let vao = self.state.vao.ok_or(Error::PipelineNotBound)?;
        self.device.bind_vertex_buffer(vao, slot, buffer, offset, stride)
    }

    /// Attaches an index buffer and records the element type used by the
    /// following indexed draws.
    pub fn bind_index_buffer(&mut self, buffer: Buffer, format: IndexFormat) -> Result<()> {
        if !self.state.pass_active {
            return Err(Error::PassNotActive);
        }

        let vao = self.state.vao.ok_or(Error::PipelineNotBound)?;
        self.state.index_bound = true;
        self.state.index_format = format;
        self.device.bind_index_buffer(vao, buffer)
    }

    pub fn bind_uniform_buffer(
        &mut self,
        slot: u32,
        buffer: Buffer,
        offset: u64,
        size: u64,
    ) -> Result<()> {
        if !self.state.pass_active {
            return Err(Error::PassNotActive);
        }

        self.device.bind_uniform_buffer(slot, buffer, offset, size)
    }

    pub fn bind_storage_buffer(
        &mut self,
        slot: u32,
        buffer: Buffer,
        offset: u64,
        size: u64,
    ) -> Result<()> {
        if !self.state.pass_active {
            return Err(Error::PassNotActive);
        }

        self.device.bind_storage_buffer(slot, buffer, offset, size)
    }

    /// Binds a texture together with the sampler that reads it.
    pub fn bind_sampled_texture(
        &mut self,
        slot: u32,
        view: TextureView,
        sampler: Sampler,
    ) -> Result<()> {
        if !self.state.pass_active {
            return Err(Error::PassNotActive);
        }

        self.device.bind_sampled_texture(slot, view, sampler)
    }

    /// Binds one mip level of a texture as a read-write image.
    pub fn bind_image(&mut self, slot: u32, view: TextureView, level: u32) -> Result<()> {
        if !self.state.pass_active {
            return Err(Error::PassNotActive);
        }

        if level >= view.levels() {
            return Err(Error::MipLevelOutOfBounds(level, view.levels()));
        }

        self.device.bind_image(slot, view, level)
    }

    pub fn draw(
        &mut self,
        vertices: u32,
        instances: u32,
        first_vertex: u32,
        first_instance: u32,
    ) -> Result<()> {
        if !self.state.pass_active {
            return Err(Error::PassNotActive);
        }

        if !self.state.pipeline_bound {
            return Err(Error::PipelineNotBound);
        }

        self.device.draw(
            self.state.topology,
            vertices,
            instances,
            first_vertex,
            first_instance,
        )
    }

    pub fn draw_indexed(
        &mut self,
        indices: u32,
        instances: u32,
        first_index: u32,
        base_vertex: i32,
        first_instance: u32,
    ) -> Result<()> {
        if !self.state.pass_active {
            return Err(Error::PassNotActive);
        }

        if !self.state.pipeline_bound {
            return Err(Error::PipelineNotBound);
        }

        if !self.state.index_bound {
            return Err(Error::IndexBufferNotBound);
        }

        self.device.draw_indexed(
            self.state.topology,
            self.state.index_format,
            indices,
            instances,
            first_index,
            base_vertex,
            first_instance,
        )
    }
}

impl Drop for RenderContext {
    fn drop(&mut self) {
        if let Some(vao) = self.state.vao.take() {
            if let Err(err) = self.device.delete_vertex_array(vao) {
                warn!("[RenderContext] fails to delete the vertex array: {}.", err);
            }
        }

        if let Some(fbo) = self.state.fbo.take() {
            if let Err(err) = self.device.delete_framebuffer(fbo) {
                warn!("[RenderContext] fails to delete the framebuffer: {}.", err);
            }
        }
    }
}
