use gl;
use gl::types::*;

use super::super::AttachmentPoint;
use crate::pipeline::{
    BlendFactor, BlendValue, Equation, FrontFaceOrder, IndexFormat, LogicOp, PolygonMode,
    PrimitiveTopology, VertexFormat,
};
use crate::resource::TextureFormat;

impl From<PrimitiveTopology> for GLenum {
    fn from(topology: PrimitiveTopology) -> Self {
        match topology {
            PrimitiveTopology::Points => gl::POINTS,
            PrimitiveTopology::Lines => gl::LINES,
            PrimitiveTopology::LineStrip => gl::LINE_STRIP,
            PrimitiveTopology::Triangles => gl::TRIANGLES,
            PrimitiveTopology::TriangleStrip => gl::TRIANGLE_STRIP,
        }
    }
}

impl From<PolygonMode> for GLenum {
    fn from(mode: PolygonMode) -> Self {
        match mode {
            PolygonMode::Fill => gl::FILL,
            PolygonMode::Line => gl::LINE,
            PolygonMode::Point => gl::POINT,
        }
    }
}

impl From<FrontFaceOrder> for GLenum {
    fn from(order: FrontFaceOrder) -> Self {
        match order {
            FrontFaceOrder::Clockwise => gl::CW,
            FrontFaceOrder::CounterClockwise => gl::CCW,
        }
    }
}

impl From<Equation> for GLenum {
    fn from(eq: Equation) -> Self {
        match eq {
            Equation::Add => gl::FUNC_ADD,
            Equation::Subtract => gl::FUNC_SUBTRACT,
            Equation::ReverseSubtract => gl::FUNC_REVERSE_SUBTRACT,
            Equation::Min => gl::MIN,
            Equation::Max => gl::MAX,
        }
    }
}

impl From<BlendFactor> for GLenum {
    fn from(factor: BlendFactor) -> Self {
        match factor {
            BlendFactor::Zero => gl::ZERO,
            BlendFactor::One => gl::ONE,
            BlendFactor::Value(BlendValue::SourceColor) => gl::SRC_COLOR,
            BlendFactor::Value(BlendValue::SourceAlpha) => gl::SRC_ALPHA,
            BlendFactor::Value(BlendValue::DestinationColor) => gl::DST_COLOR,
            BlendFactor::Value(BlendValue::DestinationAlpha) => gl::DST_ALPHA,
            BlendFactor::OneMinusValue(BlendValue::SourceColor) => gl::ONE_MINUS_SRC_COLOR,
            BlendFactor::OneMinusValue(BlendValue::SourceAlpha) => gl::ONE_MINUS_SRC_ALPHA,
            BlendFactor::OneMinusValue(BlendValue::DestinationColor) => gl::ONE_MINUS_DST_COLOR,
            BlendFactor::OneMinusValue(BlendValue::DestinationAlpha) => gl::ONE_MINUS_DST_ALPHA,
            BlendFactor::ConstantColor => gl::CONSTANT_COLOR,
            BlendFactor::OneMinusConstantColor => gl::ONE_MINUS_CONSTANT_COLOR,
            BlendFactor::ConstantAlpha => gl::CONSTANT_ALPHA,
            BlendFactor::OneMinusConstantAlpha => gl::ONE_MINUS_CONSTANT_ALPHA,
            BlendFactor::SourceAlphaSaturate => gl::SRC_ALPHA_SATURATE,
        }
    }
}

impl From<LogicOp> for GLenum {
    fn from(op: LogicOp) -> Self {
        match op {
            LogicOp::Clear => gl::CLEAR,
            LogicOp::And => gl::AND,
            LogicOp::AndReverse => gl::AND_REVERSE,
            LogicOp::Copy => gl::COPY,
            LogicOp::AndInverted => gl::AND_INVERTED,
            LogicOp::NoOp => gl::NOOP,
            LogicOp::Xor => gl::XOR,
            LogicOp::Or => gl::OR,
            LogicOp::Nor => gl::NOR,
            LogicOp::Equivalent => gl::EQUIV,
            LogicOp::Invert => gl::INVERT,
            LogicOp::OrReverse => gl::OR_REVERSE,
            LogicOp::CopyInverted => gl::COPY_INVERTED,
            LogicOp::OrInverted => gl::OR_INVERTED,
            LogicOp::Nand => gl::NAND,
            LogicOp::Set => gl::SET,
        }
    }
}

impl From<IndexFormat> for GLenum {
    fn from(format: IndexFormat) -> Self {
        match format {
            IndexFormat::U16 => gl::UNSIGNED_SHORT,
            IndexFormat::U32 => gl::UNSIGNED_INT,
        }
    }
}

impl From<AttachmentPoint> for GLenum {
    fn from(point: AttachmentPoint) -> Self {
        match point {
            AttachmentPoint::Depth => gl::DEPTH_ATTACHMENT,
            AttachmentPoint::Stencil => gl::STENCIL_ATTACHMENT,
            AttachmentPoint::DepthStencil => gl::DEPTH_STENCIL_ATTACHMENT,
        }
    }
}

/// The component type a vertex format is stored as.
pub fn vertex_format_type(format: VertexFormat) -> GLenum {
    match format {
        VertexFormat::Byte4 | VertexFormat::Byte4Normalized => gl::BYTE,
        VertexFormat::UByte4 | VertexFormat::UByte4Normalized => gl::UNSIGNED_BYTE,
        VertexFormat::Short2
        | VertexFormat::Short2Normalized
        | VertexFormat::Short4
        | VertexFormat::Short4Normalized => gl::SHORT,
        VertexFormat::UShort2
        | VertexFormat::UShort2Normalized
        | VertexFormat::UShort4
        | VertexFormat::UShort4Normalized => gl::UNSIGNED_SHORT,
        VertexFormat::Int | VertexFormat::Int2 | VertexFormat::Int3 | VertexFormat::Int4 => {
            gl::INT
        }
        VertexFormat::UInt | VertexFormat::UInt2 | VertexFormat::UInt3 | VertexFormat::UInt4 => {
            gl::UNSIGNED_INT
        }
        VertexFormat::Float
        | VertexFormat::Float2
        | VertexFormat::Float3
        | VertexFormat::Float4 => gl::FLOAT,
        VertexFormat::Double
        | VertexFormat::Double2
        | VertexFormat::Double3
        | VertexFormat::Double4 => gl::DOUBLE,
    }
}

/// The sized internal format of a texture, as required for image binding.
pub fn texture_format(format: TextureFormat) -> GLenum {
    match format {
        TextureFormat::R8 => gl::R8,
        TextureFormat::RG8 => gl::RG8,
        TextureFormat::RGBA8 => gl::RGBA8,
        TextureFormat::R16F => gl::R16F,
        TextureFormat::RG16F => gl::RG16F,
        TextureFormat::RGBA16F => gl::RGBA16F,
        TextureFormat::R32F => gl::R32F,
        TextureFormat::RG32F => gl::RG32F,
        TextureFormat::RGBA32F => gl::RGBA32F,
        TextureFormat::R8I => gl::R8I,
        TextureFormat::RG8I => gl::RG8I,
        TextureFormat::RGBA8I => gl::RGBA8I,
        TextureFormat::R32I => gl::R32I,
        TextureFormat::RGBA32I => gl::RGBA32I,
        TextureFormat::R8UI => gl::R8UI,
        TextureFormat::RG8UI => gl::RG8UI,
        TextureFormat::RGBA8UI => gl::RGBA8UI,
        TextureFormat::R32UI => gl::R32UI,
        TextureFormat::RGBA32UI => gl::RGBA32UI,
        TextureFormat::Depth16 => gl::DEPTH_COMPONENT16,
        TextureFormat::Depth24 => gl::DEPTH_COMPONENT24,
        TextureFormat::Depth32F => gl::DEPTH_COMPONENT32F,
        TextureFormat::Depth24Stencil8 => gl::DEPTH24_STENCIL8,
        TextureFormat::Stencil8 => gl::STENCIL_INDEX8,
    }
}
