//! In-memory uniform surface with a declared layout.

use std::collections::HashMap;

use glam::{Mat4, Vec2, Vec3};

use super::{names, RenderSurface, UniformKind, UniformValue};
use crate::error::{Error, Result};

/// One declared uniform slot: name, kind and element capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformDecl {
    pub name: &'static str,
    pub kind: UniformKind,
    /// Array length fixed at shader compile time, 1 for non-arrays
    pub capacity: usize,
}

impl UniformDecl {
    pub const fn scalar(name: &'static str, kind: UniformKind) -> Self {
        Self {
            name,
            kind,
            capacity: 1,
        }
    }

    pub const fn array(name: &'static str, kind: UniformKind, capacity: usize) -> Self {
        Self {
            name,
            kind,
            capacity,
        }
    }

    fn check(&self, value: &UniformValue) -> Result<()> {
        if value.kind() != self.kind {
            return Err(Error::UniformKindMismatch {
                name: self.name.to_string(),
                expected: self.kind,
                found: value.kind(),
            });
        }
        if value.len() > self.capacity {
            return Err(Error::UniformContractMismatch {
                name: self.name.to_string(),
                requested: value.len(),
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}

/// Uniform values keyed by name, checked against a fixed layout.
///
/// Serves as the CPU shadow of a GPU program and as a headless surface.
#[derive(Debug, Clone, Default)]
pub struct UniformTable {
    decls: HashMap<&'static str, UniformDecl>,
    values: HashMap<&'static str, UniformValue>,
}

impl UniformTable {
    pub fn new(decls: impl IntoIterator<Item = UniformDecl>) -> Self {
        Self {
            decls: decls.into_iter().map(|d| (d.name, d)).collect(),
            values: HashMap::new(),
        }
    }

    /// Full contract of the wave surface program with `capacity` wave slots
    pub fn wave_surface(capacity: usize) -> Self {
        Self::new([
            UniformDecl::array(names::AMPLITUDES, UniformKind::FloatArray, capacity),
            UniformDecl::array(names::FREQUENCIES, UniformKind::FloatArray, capacity),
            UniformDecl::array(names::PHASES, UniformKind::FloatArray, capacity),
            UniformDecl::array(names::WAVE_DIRS, UniformKind::Vec2Array, capacity),
            UniformDecl::scalar(names::TIME, UniformKind::Float),
            UniformDecl::scalar(names::MODEL, UniformKind::Mat4),
            UniformDecl::scalar(names::VIEW, UniformKind::Mat4),
            UniformDecl::scalar(names::PROJECTION, UniformKind::Mat4),
            UniformDecl::scalar(names::LIGHT_POS, UniformKind::Vec3),
            UniformDecl::scalar(names::CAMERA_POS, UniformKind::Vec3),
        ])
    }

    /// Transform-only contract used by the sky backdrop
    pub fn view_only() -> Self {
        Self::new([
            UniformDecl::scalar(names::MODEL, UniformKind::Mat4),
            UniformDecl::scalar(names::VIEW, UniformKind::Mat4),
            UniformDecl::scalar(names::PROJECTION, UniformKind::Mat4),
        ])
    }

    pub fn decl(&self, name: &str) -> Option<&UniformDecl> {
        self.decls.get(name)
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.values.get(name)
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.get(name)? {
            UniformValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn float_array(&self, name: &str) -> Option<&[f32]> {
        match self.get(name)? {
            UniformValue::FloatArray(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn vec2_array(&self, name: &str) -> Option<&[Vec2]> {
        match self.get(name)? {
            UniformValue::Vec2Array(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn vec3(&self, name: &str) -> Option<Vec3> {
        match self.get(name)? {
            UniformValue::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    pub fn mat4(&self, name: &str) -> Option<Mat4> {
        match self.get(name)? {
            UniformValue::Mat4(m) => Some(*m),
            _ => None,
        }
    }

    /// Every declared uniform has been written at least once
    pub fn is_complete(&self) -> bool {
        self.decls.keys().all(|name| self.values.contains_key(name))
    }

    /// Number of uniforms currently holding a value
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &UniformValue)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }
}

impl RenderSurface for UniformTable {
    fn apply_uniforms(&mut self, batch: &[(&str, UniformValue)]) -> Result<()> {
        // Validate everything before the first write
        let mut checked = Vec::with_capacity(batch.len());
        for (name, value) in batch {
            let decl = self
                .decls
                .get(*name)
                .ok_or_else(|| Error::UnknownUniform(name.to_string()))?;
            decl.check(value)?;
            checked.push((decl.name, value));
        }

        for (name, value) in checked {
            self.values.insert(name, value.clone());
        }
        Ok(())
    }
}
