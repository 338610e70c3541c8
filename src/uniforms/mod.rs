//! Named uniform values and the render-surface contract the binder writes to.

mod binder;
mod table;

use std::fmt;

use glam::{Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};

use crate::error::Result;

pub use binder::{
    bind, bind_lighting, bind_time, bind_view, flatten, lighting_params, view_params,
    LightingParams, ViewParams, WaveUniformArrays,
};
pub use table::{UniformDecl, UniformTable};

/// Uniform names shared by the binder and the surface shader
pub mod names {
    pub const AMPLITUDES: &str = "u_amplitudes";
    pub const FREQUENCIES: &str = "u_frequencies";
    pub const PHASES: &str = "u_phases";
    pub const WAVE_DIRS: &str = "u_wavedirs";
    pub const TIME: &str = "u_time";
    pub const MODEL: &str = "u_model";
    pub const VIEW: &str = "u_view";
    pub const PROJECTION: &str = "u_projection";
    pub const LIGHT_POS: &str = "u_lightpos";
    pub const CAMERA_POS: &str = "u_camerapos";
}

/// Shape of a uniform slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformKind {
    Float,
    Int,
    Bool,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
    FloatArray,
    Vec2Array,
}

impl UniformKind {
    pub fn is_array(self) -> bool {
        matches!(self, Self::FloatArray | Self::Vec2Array)
    }
}

impl fmt::Display for UniformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Float => "float",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
            Self::Vec4 => "vec4",
            Self::Mat2 => "mat2",
            Self::Mat3 => "mat3",
            Self::Mat4 => "mat4",
            Self::FloatArray => "float[]",
            Self::Vec2Array => "vec2[]",
        };
        f.write_str(name)
    }
}

/// Every value kind a surface accepts
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Bool(bool),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat2(Mat2),
    Mat3(Mat3),
    Mat4(Mat4),
    FloatArray(Vec<f32>),
    Vec2Array(Vec<Vec2>),
}

impl UniformValue {
    pub fn kind(&self) -> UniformKind {
        match self {
            Self::Float(_) => UniformKind::Float,
            Self::Int(_) => UniformKind::Int,
            Self::Bool(_) => UniformKind::Bool,
            Self::Vec2(_) => UniformKind::Vec2,
            Self::Vec3(_) => UniformKind::Vec3,
            Self::Vec4(_) => UniformKind::Vec4,
            Self::Mat2(_) => UniformKind::Mat2,
            Self::Mat3(_) => UniformKind::Mat3,
            Self::Mat4(_) => UniformKind::Mat4,
            Self::FloatArray(_) => UniformKind::FloatArray,
            Self::Vec2Array(_) => UniformKind::Vec2Array,
        }
    }

    /// Element count: array length, 1 for everything else
    pub fn len(&self) -> usize {
        match self {
            Self::FloatArray(values) => values.len(),
            Self::Vec2Array(values) => values.len(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Anything that accepts named uniform writes before a draw.
pub trait RenderSurface {
    /// Apply every value in `batch`, or none of them.
    ///
    /// Implementations validate the whole batch first; an `Err` means the
    /// surface state is unchanged and the caller must not draw.
    fn apply_uniforms(&mut self, batch: &[(&str, UniformValue)]) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kind_and_len() {
        assert_eq!(UniformValue::Float(1.0).kind(), UniformKind::Float);
        assert_eq!(UniformValue::Mat4(Mat4::IDENTITY).len(), 1);

        let dirs = UniformValue::Vec2Array(vec![Vec2::X, Vec2::Y, Vec2::X]);
        assert_eq!(dirs.kind(), UniformKind::Vec2Array);
        assert_eq!(dirs.len(), 3);
        assert!(dirs.kind().is_array());
        assert!(UniformValue::FloatArray(Vec::new()).is_empty());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(UniformKind::Mat4.to_string(), "mat4");
        assert_eq!(UniformKind::Vec2Array.to_string(), "vec2[]");
    }
}
