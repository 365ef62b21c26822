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

//! The ECS seam.
//!
//! Entity storage is provided by `hecs`; an [`Entity`] is a generational index
//! and never owns what it points to. The [`Schema`] gives native component
//! types the stable identifiers that bindings store.

mod schema;

pub use hecs::{Entity, World};
pub use schema::*;
