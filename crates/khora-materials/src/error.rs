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

//! Error type shared by every fallible material operation.
//!
//! All variants describe contract violations (bad arguments or bad call order).
//! They are returned instead of panicking so the host can surface them, but the
//! expected fix is on the caller's side.

use hecs::Entity;
use thiserror::Error;

use crate::bindings::DescriptorResourceKey;
use crate::components::RequestStatus;
use crate::ecs::DataType;
use crate::settings::ShaderStage;

/// Errors produced by material records, binding tables and the loader.
#[derive(Debug, Error)]
pub enum MaterialError {
    /// A descriptor key was built with a set or binding outside `0..15`.
    #[error(
        "Descriptor key {binding}:{set} is out of range, set and binding must be below {max}",
        max = DescriptorResourceKey::MAX_SET_OR_BINDING
    )]
    InvalidDescriptorKey {
        /// The requested binding slot.
        binding: u8,
        /// The requested descriptor set.
        set: u8,
    },
    /// A descriptor key string was not in the `binding:set` form.
    #[error("Malformed descriptor key '{0}', expected `binding:set`")]
    MalformedDescriptorKey(String),

    /// A push constant reading the same data type is already bound.
    #[error("Push constant for {data_type:?} already exists")]
    DuplicatePushConstant {
        /// The data type of the rejected binding.
        data_type: DataType,
    },
    /// No push constant reads the given data type.
    #[error("Push constant for {data_type:?} is missing")]
    MissingPushConstant {
        /// The data type that was looked up.
        data_type: DataType,
    },
    /// A component binding already occupies this key for this stage.
    #[error("Component binding `{key}` already exists for the {stage:?} stage")]
    DuplicateComponentBinding {
        /// The occupied key.
        key: DescriptorResourceKey,
        /// The stage the key is bound for.
        stage: ShaderStage,
    },
    /// No component binding exists for this key and stage.
    #[error("Component binding `{key}` is missing for the {stage:?} stage")]
    MissingComponentBinding {
        /// The key that was looked up.
        key: DescriptorResourceKey,
        /// The stage that was looked up.
        stage: ShaderStage,
    },
    /// A texture is already bound to this key.
    #[error("Texture binding `{key}` already exists")]
    DuplicateTextureBinding {
        /// The occupied key.
        key: DescriptorResourceKey,
    },
    /// No texture is bound to this key.
    #[error("Texture binding `{key}` is missing")]
    MissingTextureBinding {
        /// The key that was looked up.
        key: DescriptorResourceKey,
    },
    /// A storage buffer already occupies this key for this stage.
    #[error("Storage buffer `{key}` already exists for the {stage:?} stage")]
    DuplicateStorageBuffer {
        /// The occupied key.
        key: DescriptorResourceKey,
        /// The stage the key is bound for.
        stage: ShaderStage,
    },

    /// A loaded-state property was read before the material finished loading.
    #[error("Material {entity:?} is not loaded")]
    NotLoaded {
        /// The material entity.
        entity: Entity,
    },
    /// The entity exists but carries no binding table.
    #[error("Entity {entity:?} is not a material")]
    NotAMaterial {
        /// The offending entity.
        entity: Entity,
    },
    /// The entity does not exist in the world.
    #[error("Entity {entity:?} does not exist")]
    NoSuchEntity {
        /// The missing entity.
        entity: Entity,
    },
    /// A shader reference points at an entity that has been despawned.
    #[error("Material {material:?} references {reference:?}, which no longer exists")]
    DanglingReference {
        /// The material holding the reference.
        material: Entity,
        /// The dead entity.
        reference: Entity,
    },

    /// A native type was used before being registered with the schema.
    #[error("Type `{type_name}` is not registered in the schema")]
    UnregisteredType {
        /// The Rust type name.
        type_name: &'static str,
    },
    /// A data type index does not belong to this schema.
    #[error("Data type {data_type:?} is unknown to the schema")]
    UnknownDataType {
        /// The unknown data type.
        data_type: DataType,
    },
    /// The source entity does not carry the component a binding reads from.
    #[error("Entity {entity:?} has no component of type {data_type:?}")]
    MissingSourceComponent {
        /// The source entity.
        entity: Entity,
        /// The component data type that was expected.
        data_type: DataType,
    },

    /// A material request was moved along an edge its state machine does not have.
    #[error("Material request cannot go from {from:?} to {to:?}")]
    InvalidTransition {
        /// The current status.
        from: RequestStatus,
        /// The rejected target status.
        to: RequestStatus,
    },
    /// Material settings could not be parsed.
    #[error("Invalid material description: {0}")]
    InvalidDescription(#[from] serde_json::Error),
}
