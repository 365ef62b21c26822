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

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::MaterialError;

/// The address of a shader resource slot: a descriptor set and a binding
/// inside it, packed into one byte.
///
/// The high nibble holds the set, the low nibble the binding. Both must be
/// below [`MAX_SET_OR_BINDING`](Self::MAX_SET_OR_BINDING). The textual form
/// is `binding:set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DescriptorResourceKey(u8);

impl DescriptorResourceKey {
    /// Exclusive upper bound for both the set and the binding.
    pub const MAX_SET_OR_BINDING: u8 = 15;

    /// Packs `binding` and `set` into a key.
    pub fn new(binding: u8, set: u8) -> Result<Self, MaterialError> {
        if set >= Self::MAX_SET_OR_BINDING || binding >= Self::MAX_SET_OR_BINDING {
            return Err(MaterialError::InvalidDescriptorKey { binding, set });
        }
        Ok(Self((set << 4) | binding))
    }

    /// The descriptor set.
    pub const fn set(&self) -> u8 {
        self.0 >> 4
    }

    /// The binding within the set.
    pub const fn binding(&self) -> u8 {
        self.0 & 0x0F
    }

    /// The packed byte.
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Returns `true` if this key addresses `binding` in `set`.
    pub const fn is(&self, binding: u8, set: u8) -> bool {
        self.binding() == binding && self.set() == set
    }
}

impl fmt::Display for DescriptorResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.binding(), self.set())
    }
}

impl FromStr for DescriptorResourceKey {
    type Err = MaterialError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = || MaterialError::MalformedDescriptorKey(text.to_owned());
        let (binding, set) = text.split_once(':').ok_or_else(malformed)?;
        let binding = binding.trim().parse::<u8>().map_err(|_| malformed())?;
        let set = set.trim().parse::<u8>().map_err(|_| malformed())?;
        Self::new(binding, set)
    }
}

impl TryFrom<String> for DescriptorResourceKey {
    type Error = MaterialError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl From<DescriptorResourceKey> for String {
    fn from(key: DescriptorResourceKey) -> Self {
        key.to_string()
    }
}
