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

use super::DescriptorResourceKey;
use crate::settings::TextureFiltering;

/// A sub-rectangle of a texture in normalized UV space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextureRegion {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width, `1.0` being the full texture.
    pub width: f32,
    /// Height, `1.0` being the full texture.
    pub height: f32,
}

impl TextureRegion {
    /// The whole texture, `(0, 0, 1, 1)`.
    pub const FULL: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Creates a region.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl Default for TextureRegion {
    fn default() -> Self {
        Self::FULL
    }
}

/// A texture bound to a descriptor slot of a material.
///
/// The texture, region and filtering are only changed through the setters,
/// which bump [`version`](Self::version) when the value actually differs. The
/// renderer compares versions to decide whether a descriptor set needs
/// rewriting.
#[derive(Debug, Clone, Copy)]
pub struct TextureBinding {
    /// The resource slot. Unique within a material.
    pub key: DescriptorResourceKey,
    version: u32,
    texture: Entity,
    region: TextureRegion,
    filtering: TextureFiltering,
}

impl TextureBinding {
    /// Creates a binding at version 0.
    pub fn new(
        key: DescriptorResourceKey,
        texture: Entity,
        region: TextureRegion,
        filtering: TextureFiltering,
    ) -> Self {
        Self {
            key,
            version: 0,
            texture,
            region,
            filtering,
        }
    }

    /// Number of changes applied since creation.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// The bound texture entity.
    pub fn texture(&self) -> Entity {
        self.texture
    }

    /// The sampled region.
    pub fn region(&self) -> TextureRegion {
        self.region
    }

    /// The sampling filter.
    pub fn filtering(&self) -> TextureFiltering {
        self.filtering
    }

    /// Rebinds to another texture. Returns `true` if anything changed.
    pub fn set_texture(&mut self, texture: Entity) -> bool {
        if self.texture == texture {
            return false;
        }
        self.texture = texture;
        self.bump();
        true
    }

    /// Changes the sampled region. Returns `true` if anything changed.
    pub fn set_region(&mut self, region: TextureRegion) -> bool {
        if self.region == region {
            return false;
        }
        self.region = region;
        self.bump();
        true
    }

    /// Changes the sampling filter. Returns `true` if anything changed.
    pub fn set_filtering(&mut self, filtering: TextureFiltering) -> bool {
        if self.filtering == filtering {
            return false;
        }
        self.filtering = filtering;
        self.bump();
        true
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

// The version is bookkeeping, not content.
impl PartialEq for TextureBinding {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.texture == other.texture
            && self.region == other.region
            && self.filtering == other.filtering
    }
}
