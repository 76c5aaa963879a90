//! Content-addressed cache of compiled pipeline state objects.
//!
//! Compiling a [`PipelineParams`] canonicalizes it into a stable identifier:
//! the registry hashes every fixed-size field in a deterministic order, folds
//! in each variable-length entry with an order-sensitive combine, and keeps a
//! durable copy of the description under the resulting handle. Structurally
//! equal descriptions always resolve to the same handle; the first-seen copy
//! wins and is never re-stored.
//!
//! [`PipelineParams`]: ../pipeline/struct.PipelineParams.html

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

use crate::pipeline::{
    BlendAttachment, DepthStencilState, InputAssemblyState, LogicOp, PipelineParams,
    RasterizationState, VertexInput,
};
use crate::utils::hash;
use crate::{MAX_COLOR_ATTACHMENTS, MAX_VERTEX_INPUTS};

/// An opaque, stable identifier of a compiled pipeline. Handles derived from
/// structurally equal descriptions compare equal; beyond that they carry no
/// meaning and no ordering semantics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PipelineHandle(u64);

impl fmt::Display for PipelineHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PipelineHandle (0x{:016x})", self.0)
    }
}

/// The registry-owned copy of a pipeline description. All variable-length
/// parts are deep-copied at creation; the value is never mutated afterwards.
#[derive(Debug, Clone)]
pub struct CachedPipeline {
    pub program: u32,
    pub input_assembly: InputAssemblyState,
    pub vertex_inputs: SmallVec<[VertexInput; MAX_VERTEX_INPUTS]>,
    pub rasterization: RasterizationState,
    pub depth_stencil: DepthStencilState,
    pub logic_op: Option<LogicOp>,
    pub blend_attachments: SmallVec<[BlendAttachment; MAX_COLOR_ATTACHMENTS]>,
    pub blend_constants: [f32; 4],
}

impl CachedPipeline {
    fn from_params(params: &PipelineParams) -> Self {
        CachedPipeline {
            program: params.program,
            input_assembly: params.input_assembly,
            vertex_inputs: params.vertex_inputs.iter().cloned().collect(),
            rasterization: params.rasterization,
            depth_stencil: params.depth_stencil,
            logic_op: params.color_blend.logic_op,
            blend_attachments: params.color_blend.attachments.iter().cloned().collect(),
            blend_constants: params.color_blend.blend_constants,
        }
    }

    /// Structural equality against a borrowed description. Floats compare by
    /// bit pattern so that equality stays consistent with the content hash.
    fn matches(&self, params: &PipelineParams) -> bool {
        let rs = &self.rasterization;
        let prs = &params.rasterization;

        self.program == params.program
            && self.input_assembly == params.input_assembly
            && self.vertex_inputs.as_slice() == params.vertex_inputs
            && rs.depth_clamp == prs.depth_clamp
            && rs.polygon_mode == prs.polygon_mode
            && rs.cull_face == prs.cull_face
            && rs.front_face_order == prs.front_face_order
            && bias_bits(rs.depth_bias) == bias_bits(prs.depth_bias)
            && rs.line_width.to_bits() == prs.line_width.to_bits()
            && rs.point_size.to_bits() == prs.point_size.to_bits()
            && self.depth_stencil == params.depth_stencil
            && self.logic_op == params.color_blend.logic_op
            && self.blend_attachments.as_slice() == params.color_blend.attachments
            && constants_bits(self.blend_constants)
                == constants_bits(params.color_blend.blend_constants)
    }
}

#[inline]
fn bias_bits(bias: Option<(f32, f32)>) -> Option<(u32, u32)> {
    bias.map(|(constant, slope)| (constant.to_bits(), slope.to_bits()))
}

#[inline]
fn constants_bits(constants: [f32; 4]) -> [u32; 4] {
    [
        constants[0].to_bits(),
        constants[1].to_bits(),
        constants[2].to_bits(),
        constants[3].to_bits(),
    ]
}

/// Canonical content hash of a description: every fixed-size field in a
/// fixed order first, then each vertex input and each blend attachment folded
/// in sequence order.
fn hash_params(params: &PipelineParams) -> u64 {
    let mut s = DefaultHasher::new();

    params.program.hash(&mut s);
    params.input_assembly.hash(&mut s);

    let rs = &params.rasterization;
    rs.depth_clamp.hash(&mut s);
    rs.polygon_mode.hash(&mut s);
    rs.cull_face.hash(&mut s);
    rs.front_face_order.hash(&mut s);
    bias_bits(rs.depth_bias).hash(&mut s);
    rs.line_width.to_bits().hash(&mut s);
    rs.point_size.to_bits().hash(&mut s);

    params.depth_stencil.hash(&mut s);

    let cb = &params.color_blend;
    cb.logic_op.hash(&mut s);
    constants_bits(cb.blend_constants).hash(&mut s);

    let mut seed = s.finish();
    for input in params.vertex_inputs {
        hash::combine(&mut seed, hash::hash(input));
    }

    for attachment in cb.attachments {
        hash::combine(&mut seed, hash::hash(attachment));
    }

    seed
}

/// A content-addressed store of pipeline descriptions. Entries live until
/// they are explicitly destroyed; there is no eviction policy and no
/// reference counting.
#[derive(Debug, Default)]
pub struct PipelineRegistry {
    pipelines: HashMap<PipelineHandle, CachedPipeline>,
}

impl PipelineRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    /// Compiles `params` into a stable handle. Always succeeds; compiling a
    /// description that is field-wise and sequence-wise equal to an earlier
    /// one returns the existing handle without touching the store.
    ///
    /// A genuine hash collision between different descriptions is resolved by
    /// probing forward to the next free identifier, so distinct descriptions
    /// never alias each other.
    pub fn compile(&mut self, params: &PipelineParams) -> PipelineHandle {
        let mut id = hash_params(params);
        loop {
            let handle = PipelineHandle(id);
            match self.pipelines.get(&handle) {
                Some(cached) if cached.matches(params) => return handle,
                Some(_) => {
                    warn!("[PipelineRegistry] {} collides, probing the next slot.", handle);
                    id = id.wrapping_add(1);
                }
                None => {
                    debug!("[PipelineRegistry] creates {}.", handle);
                    self.pipelines
                        .insert(handle, CachedPipeline::from_params(params));
                    return handle;
                }
            }
        }
    }

    /// Looks up the durable copy behind `handle`.
    #[inline]
    pub fn get(&self, handle: PipelineHandle) -> Option<&CachedPipeline> {
        self.pipelines.get(&handle)
    }

    /// Removes the entry behind `handle` and returns whether it existed. The
    /// caller must guarantee that no active session still references it.
    pub fn destroy(&mut self, handle: PipelineHandle) -> bool {
        if self.pipelines.remove(&handle).is_some() {
            debug!("[PipelineRegistry] deletes {}.", handle);
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }
}
