use std::cell::RefCell;
use std::rc::Rc;

use gouache::backends::{AttachmentPoint, Device};
use gouache::prelude::*;

type CallLog = Rc<RefCell<Vec<String>>>;

/// A device that applies nothing and remembers everything, so the tests can
/// observe exactly which operations the context decided to issue.
struct Recorder {
    calls: CallLog,
    next_object: u32,
}

impl Recorder {
    fn new(calls: CallLog) -> Self {
        Recorder {
            calls,
            next_object: 1,
        }
    }

    fn record(&self, name: &str) {
        self.calls.borrow_mut().push(name.to_string());
    }

    fn allocate(&mut self) -> u32 {
        let id = self.next_object;
        self.next_object += 1;
        id
    }
}

impl Device for Recorder {
    fn bind_program(&mut self, _: u32) -> Result<()> {
        self.record("bind_program");
        Ok(())
    }

    fn set_primitive_restart(&mut self, _: bool) -> Result<()> {
        self.record("set_primitive_restart");
        Ok(())
    }

    fn set_depth_clamp(&mut self, _: bool) -> Result<()> {
        self.record("set_depth_clamp");
        Ok(())
    }

    fn set_polygon_mode(&mut self, _: PolygonMode) -> Result<()> {
        self.record("set_polygon_mode");
        Ok(())
    }

    fn set_cull_face(&mut self, _: CullFace) -> Result<()> {
        self.record("set_cull_face");
        Ok(())
    }

    fn set_front_face_order(&mut self, _: FrontFaceOrder) -> Result<()> {
        self.record("set_front_face_order");
        Ok(())
    }

    fn set_depth_bias(&mut self, _: Option<(f32, f32)>) -> Result<()> {
        self.record("set_depth_bias");
        Ok(())
    }

    fn set_line_width(&mut self, _: f32) -> Result<()> {
        self.record("set_line_width");
        Ok(())
    }

    fn set_point_size(&mut self, _: f32) -> Result<()> {
        self.record("set_point_size");
        Ok(())
    }

    fn set_depth_test(&mut self, _: bool, _: bool) -> Result<()> {
        self.record("set_depth_test");
        Ok(())
    }

    fn set_logic_op(&mut self, _: Option<LogicOp>) -> Result<()> {
        self.record("set_logic_op");
        Ok(())
    }

    fn set_blend_constants(&mut self, _: [f32; 4]) -> Result<()> {
        self.record("set_blend_constants");
        Ok(())
    }

    fn set_blend_slot(&mut self, _: u32, _: &BlendAttachment) -> Result<()> {
        self.record("set_blend_slot");
        Ok(())
    }

    fn create_vertex_array(&mut self) -> Result<u32> {
        self.record("create_vertex_array");
        Ok(self.allocate())
    }

    fn delete_vertex_array(&mut self, _: u32) -> Result<()> {
        self.record("delete_vertex_array");
        Ok(())
    }

    fn set_vertex_attribute(&mut self, _: u32, _: &VertexInput) -> Result<()> {
        self.record("set_vertex_attribute");
        Ok(())
    }

    fn bind_vertex_array(&mut self, _: u32) -> Result<()> {
        self.record("bind_vertex_array");
        Ok(())
    }

    fn bind_vertex_buffer(&mut self, _: u32, _: u32, _: Buffer, _: u64, _: u64) -> Result<()> {
        self.record("bind_vertex_buffer");
        Ok(())
    }

    fn bind_index_buffer(&mut self, _: u32, _: Buffer) -> Result<()> {
        self.record("bind_index_buffer");
        Ok(())
    }

    fn create_framebuffer(&mut self) -> Result<u32> {
        self.record("create_framebuffer");
        Ok(self.allocate())
    }

    fn delete_framebuffer(&mut self, _: u32) -> Result<()> {
        self.record("delete_framebuffer");
        Ok(())
    }

    fn bind_framebuffer(&mut self, _: Option<u32>) -> Result<()> {
        self.record("bind_framebuffer");
        Ok(())
    }

    fn attach_color(&mut self, _: u32, _: u32, _: TextureView) -> Result<()> {
        self.record("attach_color");
        Ok(())
    }

    fn attach_depth_stencil(&mut self, _: u32, point: AttachmentPoint, _: TextureView) -> Result<()> {
        match point {
            AttachmentPoint::Depth => self.record("attach_depth"),
            AttachmentPoint::Stencil => self.record("attach_stencil"),
            AttachmentPoint::DepthStencil => self.record("attach_depth_stencil"),
        }
        Ok(())
    }

    fn set_draw_buffers(&mut self, _: u32, _: u32) -> Result<()> {
        self.record("set_draw_buffers");
        Ok(())
    }

    fn clear_color_slot(&mut self, _: u32, _: u32, _: ClearColor) -> Result<()> {
        self.record("clear_color_slot");
        Ok(())
    }

    fn clear_depth(&mut self, _: u32, _: f32) -> Result<()> {
        self.record("clear_depth");
        Ok(())
    }

    fn clear_stencil(&mut self, _: u32, _: i32) -> Result<()> {
        self.record("clear_stencil");
        Ok(())
    }

    fn clear_depth_stencil(&mut self, _: u32, _: f32, _: i32) -> Result<()> {
        self.record("clear_depth_stencil");
        Ok(())
    }

    fn clear(&mut self, color: Option<[f32; 4]>, depth: Option<f32>, stencil: Option<i32>) -> Result<()> {
        self.record(&format!(
            "clear color={} depth={} stencil={}",
            color.is_some(),
            depth.is_some(),
            stencil.is_some()
        ));
        Ok(())
    }

    fn set_viewport(&mut self, _: Viewport) -> Result<()> {
        self.record("set_viewport");
        Ok(())
    }

    fn bind_uniform_buffer(&mut self, _: u32, _: Buffer, _: u64, _: u64) -> Result<()> {
        self.record("bind_uniform_buffer");
        Ok(())
    }

    fn bind_storage_buffer(&mut self, _: u32, _: Buffer, _: u64, _: u64) -> Result<()> {
        self.record("bind_storage_buffer");
        Ok(())
    }

    fn bind_sampled_texture(&mut self, _: u32, _: TextureView, _: Sampler) -> Result<()> {
        self.record("bind_sampled_texture");
        Ok(())
    }

    fn bind_image(&mut self, _: u32, _: TextureView, _: u32) -> Result<()> {
        self.record("bind_image");
        Ok(())
    }

    fn draw(&mut self, _: PrimitiveTopology, _: u32, _: u32, _: u32, _: u32) -> Result<()> {
        self.record("draw");
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
        self.record("draw_indexed");
        Ok(())
    }
}

fn context() -> (RenderContext, CallLog) {
    let calls = CallLog::default();
    let ctx = RenderContext::new(Box::new(Recorder::new(calls.clone())));
    (ctx, calls)
}

fn count(calls: &CallLog, name: &str) -> usize {
    calls.borrow().iter().filter(|v| v.as_str() == name).count()
}

fn simple_pipeline(ctx: &mut RenderContext) -> PipelineHandle {
    let inputs = [VertexInput {
        binding: 0,
        format: VertexFormat::Float3,
        location: 0,
        offset: 0,
    }];

    ctx.create_pipeline(&PipelineParams {
        program: 1,
        vertex_inputs: &inputs,
        ..Default::default()
    })
}

fn color_target() -> RenderTarget {
    let mut target = RenderTarget::new(Viewport::new(128, 128));
    target.colors.push(ColorAttachment {
        view: TextureView::from_raw(3, TextureFormat::RGBA8, 1),
        clear: Some(ClearColor::Float([0.0, 0.0, 0.0, 1.0])),
    });
    target
}

#[test]
fn session_state_machine() {
    let (mut ctx, _) = context();

    assert!(ctx.begin_default_pass(&DefaultTarget::default()).is_ok());
    assert!(match ctx.begin_default_pass(&DefaultTarget::default()) {
        Err(Error::PassAlreadyActive) => true,
        _ => false,
    });

    assert!(ctx.end_pass().is_ok());
    assert!(match ctx.end_pass() {
        Err(Error::PassNotActive) => true,
        _ => false,
    });
}

#[test]
fn commands_require_active_pass() {
    let (mut ctx, _) = context();
    let pipeline = simple_pipeline(&mut ctx);

    assert!(match ctx.bind_pipeline(pipeline) {
        Err(Error::PassNotActive) => true,
        _ => false,
    });

    assert!(match ctx.draw(3, 1, 0, 0) {
        Err(Error::PassNotActive) => true,
        _ => false,
    });

    assert!(match ctx.bind_vertex_buffer(0, Buffer::from_raw(9), 0, 12) {
        Err(Error::PassNotActive) => true,
        _ => false,
    });
}

#[test]
fn rebind_is_idempotent() {
    let (mut ctx, calls) = context();
    let pipeline = simple_pipeline(&mut ctx);

    ctx.begin_default_pass(&DefaultTarget::default()).unwrap();
    ctx.bind_pipeline(pipeline).unwrap();
    ctx.bind_pipeline(pipeline).unwrap();
    ctx.bind_pipeline(pipeline).unwrap();

    assert_eq!(count(&calls, "bind_program"), 1);
    assert_eq!(count(&calls, "create_vertex_array"), 1);

    // Device state survives pass boundaries, so the next pass doesn't
    // re-apply the pipeline either.
    ctx.end_pass().unwrap();
    ctx.begin_default_pass(&DefaultTarget::default()).unwrap();
    ctx.bind_pipeline(pipeline).unwrap();
    assert_eq!(count(&calls, "bind_program"), 1);
}

#[test]
fn rebinding_after_delete_fails() {
    let (mut ctx, _) = context();
    let pipeline = simple_pipeline(&mut ctx);

    ctx.begin_default_pass(&DefaultTarget::default()).unwrap();
    ctx.bind_pipeline(pipeline).unwrap();
    ctx.end_pass().unwrap();

    assert!(ctx.delete_pipeline(pipeline));

    ctx.begin_default_pass(&DefaultTarget::default()).unwrap();
    assert!(match ctx.bind_pipeline(pipeline) {
        Err(Error::PipelineHandleInvalid(handle)) => handle == pipeline,
        _ => false,
    });
}

#[test]
fn target_reuse_skips_reconfiguration() {
    let (mut ctx, calls) = context();

    let target = color_target();
    ctx.begin_pass(&target).unwrap();
    ctx.end_pass().unwrap();
    ctx.begin_pass(&target).unwrap();
    ctx.end_pass().unwrap();

    assert_eq!(count(&calls, "create_framebuffer"), 1);
    assert_eq!(count(&calls, "attach_color"), 1);
    assert_eq!(count(&calls, "clear_color_slot"), 1);
    assert_eq!(count(&calls, "set_viewport"), 1);

    // A different target value rebuilds the framebuffer and releases the
    // previous one.
    let other = color_target();
    ctx.begin_pass(&other).unwrap();
    ctx.end_pass().unwrap();

    assert_eq!(count(&calls, "create_framebuffer"), 2);
    assert_eq!(count(&calls, "delete_framebuffer"), 1);
}

#[test]
fn default_target_clears_color_only() {
    let (mut ctx, calls) = context();

    let target = DefaultTarget {
        clear_color: Some([0.2, 0.2, 0.2, 1.0]),
        ..Default::default()
    };

    ctx.begin_default_pass(&target).unwrap();
    ctx.end_pass().unwrap();

    let calls = calls.borrow();
    let clears = calls
        .iter()
        .filter(|v| v.starts_with("clear"))
        .map(|v| v.as_str())
        .collect::<Vec<_>>();
    assert_eq!(clears, ["clear color=true depth=false stencil=false"]);
}

#[test]
fn depth_stencil_clears() {
    // Depth and stencil sharing one image clear in a single operation.
    let (mut ctx, calls) = context();
    let view = TextureView::from_raw(4, TextureFormat::Depth24Stencil8, 1);

    let mut target = RenderTarget::new(Viewport::new(64, 64));
    target.depth = Some(DepthAttachment {
        view,
        clear: Some(1.0),
    });
    target.stencil = Some(StencilAttachment {
        view,
        clear: Some(0),
    });

    ctx.begin_pass(&target).unwrap();
    ctx.end_pass().unwrap();

    assert_eq!(count(&calls, "attach_depth_stencil"), 1);
    assert_eq!(count(&calls, "clear_depth_stencil"), 1);
    assert_eq!(count(&calls, "clear_depth"), 0);
    assert_eq!(count(&calls, "clear_stencil"), 0);

    // A lone depth attachment clears on its own.
    let (mut ctx, calls) = context();
    let mut target = RenderTarget::new(Viewport::new(64, 64));
    target.depth = Some(DepthAttachment {
        view: TextureView::from_raw(5, TextureFormat::Depth32F, 1),
        clear: Some(1.0),
    });

    ctx.begin_pass(&target).unwrap();
    ctx.end_pass().unwrap();

    assert_eq!(count(&calls, "attach_depth"), 1);
    assert_eq!(count(&calls, "clear_depth"), 1);
    assert_eq!(count(&calls, "clear_depth_stencil"), 0);
}

#[test]
fn draw_requires_bound_pipeline() {
    let (mut ctx, _) = context();

    ctx.begin_default_pass(&DefaultTarget::default()).unwrap();
    assert!(match ctx.draw(3, 1, 0, 0) {
        Err(Error::PipelineNotBound) => true,
        _ => false,
    });
}

#[test]
fn indexed_draw_requires_index_buffer() {
    let (mut ctx, calls) = context();
    let pipeline = simple_pipeline(&mut ctx);

    ctx.begin_default_pass(&DefaultTarget::default()).unwrap();
    ctx.bind_pipeline(pipeline).unwrap();

    assert!(match ctx.draw_indexed(3, 1, 0, 0, 0) {
        Err(Error::IndexBufferNotBound) => true,
        _ => false,
    });

    ctx.bind_index_buffer(Buffer::from_raw(9), IndexFormat::U16).unwrap();
    assert!(ctx.draw_indexed(3, 1, 0, 0, 0).is_ok());
    assert_eq!(count(&calls, "draw_indexed"), 1);
}

#[test]
fn pass_boundaries_reset_bindings() {
    let (mut ctx, _) = context();
    let pipeline = simple_pipeline(&mut ctx);

    ctx.begin_default_pass(&DefaultTarget::default()).unwrap();
    ctx.bind_pipeline(pipeline).unwrap();
    ctx.bind_index_buffer(Buffer::from_raw(9), IndexFormat::U16).unwrap();
    ctx.draw_indexed(3, 1, 0, 0, 0).unwrap();
    ctx.end_pass().unwrap();

    // The index binding expired with the pass, even though the pipeline is
    // still resident on the device.
    ctx.begin_default_pass(&DefaultTarget::default()).unwrap();
    ctx.bind_pipeline(pipeline).unwrap();
    assert!(match ctx.draw_indexed(3, 1, 0, 0, 0) {
        Err(Error::IndexBufferNotBound) => true,
        _ => false,
    });
}

#[test]
fn vertex_binds_require_a_layout() {
    let (mut ctx, _) = context();

    ctx.begin_default_pass(&DefaultTarget::default()).unwrap();
    assert!(match ctx.bind_vertex_buffer(0, Buffer::from_raw(9), 0, 12) {
        Err(Error::PipelineNotBound) => true,
        _ => false,
    });

    assert!(match ctx.bind_index_buffer(Buffer::from_raw(9), IndexFormat::U32) {
        Err(Error::PipelineNotBound) => true,
        _ => false,
    });
}

#[test]
fn buffer_classes_stay_distinct() {
    let (mut ctx, calls) = context();

    ctx.begin_default_pass(&DefaultTarget::default()).unwrap();
    ctx.bind_uniform_buffer(0, Buffer::from_raw(11), 0, 256).unwrap();
    ctx.bind_storage_buffer(1, Buffer::from_raw(12), 0, 1024).unwrap();

    assert_eq!(count(&calls, "bind_uniform_buffer"), 1);
    assert_eq!(count(&calls, "bind_storage_buffer"), 1);
}

#[test]
fn image_binds_check_mip_levels() {
    let (mut ctx, calls) = context();
    let view = TextureView::from_raw(6, TextureFormat::RGBA32F, 2);

    ctx.begin_default_pass(&DefaultTarget::default()).unwrap();
    assert!(ctx.bind_image(0, view, 1).is_ok());
    assert!(match ctx.bind_image(0, view, 2) {
        Err(Error::MipLevelOutOfBounds(2, 2)) => true,
        _ => false,
    });

    assert_eq!(count(&calls, "bind_image"), 1);
}
