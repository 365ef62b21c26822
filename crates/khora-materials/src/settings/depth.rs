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

//! Depth and stencil test configuration.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::enums::{CompareOperation, StencilOperation};

bitflags! {
    /// Which depth/stencil tests are active.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct DepthFlags: u8 {
        /// Fragments are compared against the depth buffer.
        const DEPTH_TEST = 1 << 0;
        /// Passing fragments write their depth.
        const DEPTH_WRITE = 1 << 1;
        /// Fragments outside `min_depth..=max_depth` are discarded.
        const DEPTH_BOUNDS_TEST = 1 << 2;
        /// The stencil test runs with the front/back face settings.
        const STENCIL_TEST = 1 << 3;
    }
}

/// Stencil state for one triangle face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct StencilSettings {
    /// Applied when the stencil test fails.
    pub fail_operation: StencilOperation,
    /// Applied when both stencil and depth tests pass.
    pub pass_operation: StencilOperation,
    /// Applied when the stencil test passes but the depth test fails.
    pub depth_fail_operation: StencilOperation,
    /// The stencil comparison.
    pub compare_operation: CompareOperation,
    /// Bits of the stored value read by the comparison.
    pub compare_mask: u32,
    /// Bits of the stored value that may be written.
    pub write_mask: u32,
    /// The reference value used by the comparison and by `Replace`.
    pub reference: u32,
}

impl StencilSettings {
    /// Keeps every value and always passes.
    pub const DEFAULT: Self = Self::new(
        StencilOperation::Keep,
        StencilOperation::Keep,
        StencilOperation::Keep,
        CompareOperation::Always,
    );

    /// Builds stencil settings with full masks and a zero reference.
    pub const fn new(
        fail_operation: StencilOperation,
        pass_operation: StencilOperation,
        depth_fail_operation: StencilOperation,
        compare_operation: CompareOperation,
    ) -> Self {
        Self {
            fail_operation,
            pass_operation,
            depth_fail_operation,
            compare_operation,
            compare_mask: u32::MAX,
            write_mask: u32::MAX,
            reference: 0,
        }
    }
}

impl Default for StencilSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Depth/stencil configuration of a material.
///
/// Contains `f32` bounds, so it is only `PartialEq`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthSettings {
    /// Active tests.
    pub flags: DepthFlags,
    /// The depth comparison.
    pub compare_operation: CompareOperation,
    /// Lower bound for the depth-bounds test.
    pub min_depth: f32,
    /// Upper bound for the depth-bounds test.
    pub max_depth: f32,
    /// Stencil state for front faces.
    pub front: StencilSettings,
    /// Stencil state for back faces.
    pub back: StencilSettings,
}

impl DepthSettings {
    /// No depth test, no depth write.
    pub const NONE: Self = Self::new(DepthFlags::empty(), CompareOperation::LessEqual);
    /// Standard depth test and write.
    pub const DEFAULT: Self = Self::new(
        DepthFlags::DEPTH_TEST.union(DepthFlags::DEPTH_WRITE),
        CompareOperation::LessEqual,
    );
    /// Depth test without writing, for transparent passes.
    pub const READ: Self = Self::new(DepthFlags::DEPTH_TEST, CompareOperation::LessEqual);
    /// Test and write with a reversed depth range (near = 1, far = 0).
    pub const REVERSE_Z: Self = Self::new(
        DepthFlags::DEPTH_TEST.union(DepthFlags::DEPTH_WRITE),
        CompareOperation::GreaterEqual,
    );
    /// Read-only test with a reversed depth range.
    pub const READ_REVERSE_Z: Self =
        Self::new(DepthFlags::DEPTH_TEST, CompareOperation::GreaterEqual);

    /// Builds settings with zeroed bounds and default stencil faces.
    pub const fn new(flags: DepthFlags, compare_operation: CompareOperation) -> Self {
        Self {
            flags,
            compare_operation,
            min_depth: 0.0,
            max_depth: 0.0,
            front: StencilSettings::DEFAULT,
            back: StencilSettings::DEFAULT,
        }
    }

    /// Whether the depth test is enabled.
    pub fn depth_test(&self) -> bool {
        self.flags.contains(DepthFlags::DEPTH_TEST)
    }

    /// Enables or disables the depth test.
    pub fn set_depth_test(&mut self, enabled: bool) {
        self.flags.set(DepthFlags::DEPTH_TEST, enabled);
    }

    /// Whether depth writes are enabled.
    pub fn depth_write(&self) -> bool {
        self.flags.contains(DepthFlags::DEPTH_WRITE)
    }

    /// Enables or disables depth writes.
    pub fn set_depth_write(&mut self, enabled: bool) {
        self.flags.set(DepthFlags::DEPTH_WRITE, enabled);
    }

    /// Whether the depth-bounds test is enabled.
    pub fn depth_bounds_test(&self) -> bool {
        self.flags.contains(DepthFlags::DEPTH_BOUNDS_TEST)
    }

    /// Enables or disables the depth-bounds test.
    pub fn set_depth_bounds_test(&mut self, enabled: bool) {
        self.flags.set(DepthFlags::DEPTH_BOUNDS_TEST, enabled);
    }

    /// Whether the stencil test is enabled.
    pub fn stencil_test(&self) -> bool {
        self.flags.contains(DepthFlags::STENCIL_TEST)
    }

    /// Enables or disables the stencil test.
    pub fn set_stencil_test(&mut self, enabled: bool) {
        self.flags.set(DepthFlags::STENCIL_TEST, enabled);
    }
}

impl Default for DepthSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}
