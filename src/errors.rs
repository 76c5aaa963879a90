use crate::registry::PipelineHandle;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "A render pass is already active.")]
    PassAlreadyActive,
    #[fail(display = "No render pass is active.")]
    PassNotActive,
    #[fail(display = "{} is invalid.", _0)]
    PipelineHandleInvalid(PipelineHandle),
    #[fail(display = "No pipeline has been bound in this pass.")]
    PipelineNotBound,
    #[fail(display = "No index buffer has been bound in this pass.")]
    IndexBufferNotBound,
    #[fail(display = "Mip level {} is out of bounds of a texture with {} levels.", _0, _1)]
    MipLevelOutOfBounds(u32, u32),
    #[fail(display = "Backend: {}", _0)]
    Device(String),
    #[fail(display = "OpenGL implementation doesn't support {}.", _0)]
    Requirement(String),
}

pub type Result<T> = ::std::result::Result<T, Error>;
