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

//! # Khora Materials
//!
//! Material records for ECS entities: pipeline settings (blend, depth, stencil),
//! shader resource bindings, and the request → load → ready lifecycle of a
//! material entity.
//!
//! A material is a `hecs` entity. A ready material carries an [`IsMaterial`]
//! record and a [`BindingTable`]; a requested one carries a [`MaterialRequest`]
//! until a [`MaterialLoader`] resolves it. The [`Material`] view is the entry
//! point for both.

#![warn(missing_docs)]

pub mod bindings;
pub mod components;
pub mod ecs;
pub mod error;
pub mod loader;
pub mod material;
pub mod settings;


pub use bindings::*;
pub use components::*;
pub use ecs::{DataType, Schema};
pub use error::MaterialError;
pub use loader::{
    Fetch, LoadReport, LoaderConfig, MaterialDescription, MaterialLoader, MaterialSettings,
    MaterialSource, MemorySource,
};
pub use material::Material;
pub use settings::*;
