// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use hecs::Entity;

use crate::settings::{BlendSettings, DepthSettings, MaterialFlags};

/// The pipeline-state record of a ready material.
///
/// `version` is the renderer's dirty signal: every setter that changes a value
/// increments it, and a pipeline built for an older version must be rebuilt.
/// Shader references are plain entity handles; the shaders are owned elsewhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsMaterial {
    version: u32,
    render_order: i8,
    vertex_shader: Entity,
    fragment_shader: Entity,
    blend: BlendSettings,
    depth: DepthSettings,
    flags: MaterialFlags,
}

impl IsMaterial {
    /// Creates an opaque, depth-tested record at version 0.
    pub fn new(vertex_shader: Entity, fragment_shader: Entity) -> Self {
        Self::with_settings(
            vertex_shader,
            fragment_shader,
            BlendSettings::OPAQUE,
            DepthSettings::DEFAULT,
            MaterialFlags::empty(),
        )
    }

    /// Creates a record with explicit pipeline settings.
    pub fn with_settings(
        vertex_shader: Entity,
        fragment_shader: Entity,
        blend: BlendSettings,
        depth: DepthSettings,
        flags: MaterialFlags,
    ) -> Self {
        Self {
            version: 0,
            render_order: 0,
            vertex_shader,
            fragment_shader,
            blend,
            depth,
            flags,
        }
    }

    /// Sets the initial render order. Does not count as a change.
    pub fn with_render_order(mut self, render_order: i8) -> Self {
        self.render_order = render_order;
        self
    }

    /// Number of changes applied since creation.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Draw ordering hint. Lower values draw first.
    pub fn render_order(&self) -> i8 {
        self.render_order
    }

    /// The vertex shader entity.
    pub fn vertex_shader(&self) -> Entity {
        self.vertex_shader
    }

    /// The fragment shader entity.
    pub fn fragment_shader(&self) -> Entity {
        self.fragment_shader
    }

    /// Color and alpha blending.
    pub fn blend_settings(&self) -> BlendSettings {
        self.blend
    }

    /// Depth and stencil testing.
    pub fn depth_settings(&self) -> DepthSettings {
        self.depth
    }

    /// Material-level switches.
    pub fn flags(&self) -> MaterialFlags {
        self.flags
    }

    /// Sets the draw ordering hint. Returns `true` if it changed.
    pub fn set_render_order(&mut self, render_order: i8) -> bool {
        Self::replace(&mut self.render_order, render_order, &mut self.version)
    }

    /// Replaces both shader references. Returns `true` if either changed.
    pub fn set_shaders(&mut self, vertex_shader: Entity, fragment_shader: Entity) -> bool {
        if self.vertex_shader == vertex_shader && self.fragment_shader == fragment_shader {
            return false;
        }
        self.vertex_shader = vertex_shader;
        self.fragment_shader = fragment_shader;
        self.bump_version();
        true
    }

    /// Replaces the blend settings. Returns `true` if they changed.
    pub fn set_blend_settings(&mut self, blend: BlendSettings) -> bool {
        Self::replace(&mut self.blend, blend, &mut self.version)
    }

    /// Replaces the depth/stencil settings. Returns `true` if they changed.
    pub fn set_depth_settings(&mut self, depth: DepthSettings) -> bool {
        Self::replace(&mut self.depth, depth, &mut self.version)
    }

    /// Replaces the material flags. Returns `true` if they changed.
    pub fn set_flags(&mut self, flags: MaterialFlags) -> bool {
        Self::replace(&mut self.flags, flags, &mut self.version)
    }

    /// Marks the record dirty without changing any value.
    pub fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
        log::trace!("Material version bumped to {}", self.version);
    }

    fn replace<T: PartialEq>(slot: &mut T, value: T, version: &mut u32) -> bool {
        if *slot == value {
            return false;
        }
        *slot = value;
        *version = version.wrapping_add(1);
        log::trace!("Material version bumped to {}", version);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hecs::World;

    struct Shader;

    fn shaders() -> (World, Entity, Entity) {
        let mut world = World::new();
        let vertex = world.spawn((Shader,));
        let fragment = world.spawn((Shader,));
        (world, vertex, fragment)
    }

    #[test]
    fn test_new_record_defaults() {
        let (_world, vertex, fragment) = shaders();
        let record = IsMaterial::new(vertex, fragment);

        assert_eq!(record.version(), 0);
        assert_eq!(record.render_order(), 0);
        assert_eq!(record.vertex_shader(), vertex);
        assert_eq!(record.fragment_shader(), fragment);
        assert_eq!(record.blend_settings(), BlendSettings::OPAQUE);
        assert_eq!(record.depth_settings(), DepthSettings::DEFAULT);
        assert!(record.flags().is_empty());
    }

    #[test]
    fn test_setters_bump_only_on_change() {
        let (_world, vertex, fragment) = shaders();
        let mut record = IsMaterial::new(vertex, fragment);

        assert!(!record.set_blend_settings(BlendSettings::OPAQUE));
        assert!(!record.set_render_order(0));
        assert_eq!(record.version(), 0);

        assert!(record.set_blend_settings(BlendSettings::ALPHA_BLEND));
        assert!(record.set_depth_settings(DepthSettings::READ));
        assert!(record.set_render_order(-3));
        assert!(record.set_flags(MaterialFlags::DEPTH_TEST));
        assert_eq!(record.version(), 4);
        assert_eq!(record.render_order(), -3);
    }

    #[test]
    fn test_set_shaders() {
        let (mut world, vertex, fragment) = shaders();
        let other = world.spawn((Shader,));
        let mut record = IsMaterial::new(vertex, fragment);

        assert!(!record.set_shaders(vertex, fragment));
        assert!(record.set_shaders(vertex, other));
        assert_eq!(record.fragment_shader(), other);
        assert_eq!(record.version(), 1);
    }
}
