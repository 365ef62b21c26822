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

//! Pipeline state carried by a material: blending, depth/stencil tests and flags.
//!
//! Every type here is a plain value compared structurally. The renderer turns
//! them into backend pipeline state; this crate only stores and versions them.

mod blend;
mod depth;
mod enums;
mod flags;

pub use blend::*;
pub use depth::*;
pub use enums::*;
pub use flags::*;
