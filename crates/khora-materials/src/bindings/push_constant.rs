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

use crate::{ecs::DataType, settings::ShaderStage};

/// A range of the push-constant block filled from one component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PushConstantBinding {
    /// Byte offset of the range within the block.
    pub offset: u32,
    /// The component type copied into the range.
    pub data_type: DataType,
    /// The stage the range is visible to.
    pub stage: ShaderStage,
}

impl PushConstantBinding {
    /// Creates a binding.
    pub const fn new(offset: u32, data_type: DataType, stage: ShaderStage) -> Self {
        Self {
            offset,
            data_type,
            stage,
        }
    }

    /// Size of the range in bytes.
    pub const fn size(&self) -> u32 {
        self.data_type.size
    }
}
