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

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Per-material switches kept on the material record itself.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct MaterialFlags: u8 {
        /// The material is drawn with depth testing.
        const DEPTH_TEST = 1 << 0;
        /// The material writes depth.
        const DEPTH_WRITE = 1 << 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(MaterialFlags::default().is_empty());
    }

    #[test]
    fn test_combine_and_query() {
        let mut flags = MaterialFlags::DEPTH_TEST;
        assert!(flags.contains(MaterialFlags::DEPTH_TEST));
        assert!(!flags.contains(MaterialFlags::DEPTH_WRITE));

        flags |= MaterialFlags::DEPTH_WRITE;
        assert_eq!(flags, MaterialFlags::all());

        flags.remove(MaterialFlags::DEPTH_TEST);
        assert_eq!(flags.bits(), 0b10);
    }
}
