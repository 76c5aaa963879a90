//! # What is This?
//!
//! Gouache is a thin state-tracking layer over OpenGL 4.5+ that presents a
//! modern, explicit programming model: immutable pipeline state objects,
//! bounded render passes and plain draw calls, instead of the sprawling
//! implicit state machine underneath.
//!
//! The two pieces that do the actual work are:
//!
//! - [`PipelineRegistry`]: a content-addressed cache which maps a structured
//!   pipeline description to a stable, opaque handle. Structurally equal
//!   descriptions always resolve to the same handle, no matter how often they
//!   are compiled.
//! - [`RenderContext`]: the owner of one rendering session at a time. It
//!   remembers what was applied last and skips redundant transitions, so
//!   rebinding the same pipeline or reusing the same render target between
//!   passes costs nothing.
//!
//! Shader compilation, resource creation and window management are explicitly
//! out of scope; buffers, texture views and samplers enter the crate as
//! opaque handles created elsewhere.
//!
//! [`PipelineRegistry`]: registry/struct.PipelineRegistry.html
//! [`RenderContext`]: context/struct.RenderContext.html

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

pub mod backends;
pub mod context;
pub mod errors;
pub mod pipeline;
pub mod prelude;
pub mod registry;
pub mod resource;
pub mod target;
pub mod utils;

pub use crate::context::RenderContext;
pub use crate::registry::{PipelineHandle, PipelineRegistry};

/// Maximum number of color attachments of a render target.
pub const MAX_COLOR_ATTACHMENTS: usize = 8;

/// Maximum number of vertex input bindings of a pipeline.
pub const MAX_VERTEX_INPUTS: usize = 16;
