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

//! Registry of component types that bindings may reference.

use std::{
    any::{type_name, TypeId},
    collections::HashMap,
    fmt,
    mem::size_of,
};

use bytemuck::Pod;
use hecs::{Component, Entity, World};
use serde::{Deserialize, Serialize};

use crate::error::MaterialError;

/// A stable identifier for a registered component type, plus its byte size.
///
/// Indices are assigned in registration order, so two schemas built with the
/// same registration sequence agree on every `DataType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DataType {
    /// Position of the type in the schema.
    pub index: u32,
    /// Size of one value in bytes.
    pub size: u32,
}

/// Copies the bytes of an entity's component into `out`. Returns `false` if the
/// entity lacks the component.
type ReadFn = fn(&World, Entity, &mut Vec<u8>) -> bool;

struct Registration {
    data_type: DataType,
    name: &'static str,
    read: ReadFn,
}

/// Maps native component types to [`DataType`]s.
///
/// Only plain-old-data components can be registered, because bound data is
/// eventually copied byte for byte into GPU memory.
#[derive(Default)]
pub struct Schema {
    /// The core map from a component's `TypeId` to its slot in `registrations`.
    types: HashMap<TypeId, usize>,
    registrations: Vec<Registration>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` and returns its data type.
    ///
    /// Registering the same type again returns the existing data type.
    pub fn register<T: Component + Pod>(&mut self) -> DataType {
        let type_id = TypeId::of::<T>();
        if let Some(&slot) = self.types.get(&type_id) {
            return self.registrations[slot].data_type;
        }

        let data_type = DataType {
            index: self.registrations.len() as u32,
            size: size_of::<T>() as u32,
        };
        log::debug!(
            "Registered component type `{}` as {:?}",
            type_name::<T>(),
            data_type
        );

        self.types.insert(type_id, self.registrations.len());
        self.registrations.push(Registration {
            data_type,
            name: type_name::<T>(),
            read: read_component::<T>,
        });
        data_type
    }

    /// Looks up the data type of `T`.
    pub fn data_type<T: 'static>(&self) -> Result<DataType, MaterialError> {
        self.types
            .get(&TypeId::of::<T>())
            .map(|&slot| self.registrations[slot].data_type)
            .ok_or(MaterialError::UnregisteredType {
                type_name: type_name::<T>(),
            })
    }

    /// Returns `true` if `T` has been registered.
    pub fn contains<T: 'static>(&self) -> bool {
        self.types.contains_key(&TypeId::of::<T>())
    }

    /// Returns the Rust type name behind a data type, if it belongs to this schema.
    pub fn name_of(&self, data_type: DataType) -> Option<&'static str> {
        self.registration(data_type).map(|r| r.name)
    }

    /// The number of registered types.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Appends the raw bytes of `entity`'s component of type `data_type` to `out`.
    pub fn read_bytes(
        &self,
        world: &World,
        entity: Entity,
        data_type: DataType,
        out: &mut Vec<u8>,
    ) -> Result<(), MaterialError> {
        let registration = self
            .registration(data_type)
            .ok_or(MaterialError::UnknownDataType { data_type })?;
        if !world.contains(entity) {
            return Err(MaterialError::NoSuchEntity { entity });
        }
        if (registration.read)(world, entity, out) {
            Ok(())
        } else {
            Err(MaterialError::MissingSourceComponent { entity, data_type })
        }
    }

    fn registration(&self, data_type: DataType) -> Option<&Registration> {
        self.registrations
            .get(data_type.index as usize)
            .filter(|r| r.data_type == data_type)
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.registrations.iter().map(|r| (r.name, r.data_type)))
            .finish()
    }
}

fn read_component<T: Component + Pod>(world: &World, entity: Entity, out: &mut Vec<u8>) -> bool {
    match world.get::<&T>(entity) {
        Ok(component) => {
            out.extend_from_slice(bytemuck::bytes_of(&*component));
            true
        }
        Err(_) => false,
    }
}
