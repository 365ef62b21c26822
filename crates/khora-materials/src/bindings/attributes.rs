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

use super::DescriptorResourceKey;
use crate::{ecs::DataType, settings::ShaderStage};

/// A per-instance vertex attribute sourced from component data of each drawn entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceAttributeBinding {
    /// The attribute slot.
    pub key: DescriptorResourceKey,
    /// The component type streamed per instance.
    pub data_type: DataType,
}

impl InstanceAttributeBinding {
    /// Creates a binding.
    pub const fn new(key: DescriptorResourceKey, data_type: DataType) -> Self {
        Self { key, data_type }
    }
}

/// A storage buffer slot declared by the material's shaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StorageBufferBinding {
    /// The resource slot.
    pub key: DescriptorResourceKey,
    /// The stage the buffer is visible to.
    pub stage: ShaderStage,
}

impl StorageBufferBinding {
    /// Creates a binding.
    pub const fn new(key: DescriptorResourceKey, stage: ShaderStage) -> Self {
        Self { key, stage }
    }
}
