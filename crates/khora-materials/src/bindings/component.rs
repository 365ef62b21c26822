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

use super::DescriptorResourceKey;
use crate::{ecs::DataType, settings::ShaderStage};

/// Tells the renderer where to find the data for the shader resource at `key`:
/// the component of type `data_type` on `entity`.
///
/// A material holds at most one component binding per `(key, stage)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentBinding {
    /// The resource slot.
    pub key: DescriptorResourceKey,
    /// The entity holding the data. Not owned.
    pub entity: Entity,
    /// The component type read from `entity`.
    pub data_type: DataType,
    /// The stage the resource is visible to.
    pub stage: ShaderStage,
}

impl ComponentBinding {
    /// Creates a binding.
    pub const fn new(
        key: DescriptorResourceKey,
        entity: Entity,
        data_type: DataType,
        stage: ShaderStage,
    ) -> Self {
        Self {
            key,
            entity,
            data_type,
            stage,
        }
    }

    /// Returns `true` if this binding occupies `key` for `stage`.
    pub fn occupies(&self, key: DescriptorResourceKey, stage: ShaderStage) -> bool {
        self.key == key && self.stage == stage
    }
}
