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
use serde::{Deserialize, Serialize};

use crate::{
    components::IsMaterial,
    error::MaterialError,
    settings::{BlendSettings, DepthSettings, MaterialFlags},
};

/// The authorable part of a material: everything except its shaders.
///
/// Every field is optional in JSON and falls back to the defaults of a
/// material built with [`Material::new`](crate::Material::new).
///
/// ```json
/// {
///     "blend": { "enabled": true },
///     "depth": { "flags": "DEPTH_TEST", "compare_operation": "GreaterEqual" },
///     "render_order": 2
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialSettings {
    /// Color and alpha blending.
    pub blend: BlendSettings,
    /// Depth and stencil testing.
    pub depth: DepthSettings,
    /// Material-level switches.
    pub flags: MaterialFlags,
    /// Draw ordering hint.
    pub render_order: i8,
}

impl MaterialSettings {
    /// Parses settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, MaterialError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the settings to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, MaterialError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// What a [`MaterialSource`](super::MaterialSource) resolves an address to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialDescription {
    /// The vertex shader entity.
    pub vertex_shader: Entity,
    /// The fragment shader entity.
    pub fragment_shader: Entity,
    /// Pipeline settings.
    pub settings: MaterialSettings,
}

impl MaterialDescription {
    /// Describes a material with default settings.
    pub fn new(vertex_shader: Entity, fragment_shader: Entity) -> Self {
        Self {
            vertex_shader,
            fragment_shader,
            settings: MaterialSettings::default(),
        }
    }

    /// Replaces the settings.
    pub fn with_settings(mut self, settings: MaterialSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builds the record attached to the entity once the load completes.
    pub fn to_record(&self) -> IsMaterial {
        IsMaterial::with_settings(
            self.vertex_shader,
            self.fragment_shader,
            self.settings.blend,
            self.settings.depth,
            self.settings.flags,
        )
        .with_render_order(self.settings.render_order)
    }
}
