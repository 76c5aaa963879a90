pub use crate::context::RenderContext;

pub use crate::pipeline::{
    BlendAttachment, BlendFactor, BlendValue, ColorBlendState, Comparison, CullFace,
    DepthStencilState, Equation, FrontFaceOrder, IndexFormat, InputAssemblyState, LogicOp,
    PipelineParams, PolygonMode, PrimitiveTopology, RasterizationState, StencilFaceState,
    StencilOp, VertexFormat, VertexInput,
};

pub use crate::registry::{CachedPipeline, PipelineHandle, PipelineRegistry};

pub use crate::resource::{BaseFormatClass, Buffer, Sampler, TextureFormat, TextureView};

pub use crate::target::{
    ClearColor, ColorAttachment, DefaultTarget, DepthAttachment, RenderTarget, StencilAttachment,
    Viewport,
};

pub use crate::errors::{Error, Result};
