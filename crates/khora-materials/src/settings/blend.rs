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

//! Color blending state of a material.

use serde::{Deserialize, Serialize};

use super::enums::{BlendFactor, BlendOperation};

/// One blend equation: `operation(src * src_factor, dst * dst_factor)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlendComponent {
    /// Weight of the incoming fragment value.
    pub src_factor: BlendFactor,
    /// Weight of the value already in the target.
    pub dst_factor: BlendFactor,
    /// How the two weighted terms are combined.
    pub operation: BlendOperation,
}

impl BlendComponent {
    /// Builds a blend equation.
    pub const fn new(
        src_factor: BlendFactor,
        dst_factor: BlendFactor,
        operation: BlendOperation,
    ) -> Self {
        Self {
            src_factor,
            dst_factor,
            operation,
        }
    }

    /// `src * 1 + dst * 0`, i.e. the fragment replaces the target.
    pub const REPLACE: Self = Self::new(BlendFactor::One, BlendFactor::Zero, BlendOperation::Add);
}

/// Blend configuration of a material's color target.
///
/// Compared structurally. The four presets cover the common cases; anything
/// else is built field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendSettings {
    /// If `false`, the fragment is written as-is and both equations are ignored.
    pub enabled: bool,
    /// The equation for the RGB channels.
    pub color: BlendComponent,
    /// The equation for the alpha channel.
    pub alpha: BlendComponent,
}

impl BlendSettings {
    /// No blending.
    pub const OPAQUE: Self = Self {
        enabled: false,
        color: BlendComponent::REPLACE,
        alpha: BlendComponent::REPLACE,
    };

    /// Blending for premultiplied alpha.
    pub const ALPHA_BLEND: Self = Self::symmetric(BlendComponent::new(
        BlendFactor::One,
        BlendFactor::OneMinusSrcAlpha,
        BlendOperation::Add,
    ));

    /// Adds the alpha-weighted fragment onto the target.
    pub const ADDITIVE: Self = Self::symmetric(BlendComponent::new(
        BlendFactor::SrcAlpha,
        BlendFactor::One,
        BlendOperation::Add,
    ));

    /// Classic "over" blending for straight (non-premultiplied) alpha.
    pub const NON_PREMULTIPLIED: Self = Self::symmetric(BlendComponent::new(
        BlendFactor::SrcAlpha,
        BlendFactor::OneMinusSrcAlpha,
        BlendOperation::Add,
    ));

    /// Enabled blending with the same equation on color and alpha.
    pub const fn symmetric(component: BlendComponent) -> Self {
        Self {
            enabled: true,
            color: component,
            alpha: component,
        }
    }

    /// Returns `true` if either equation needs dual-source blending.
    pub const fn uses_dual_source(&self) -> bool {
        self.enabled
            && (self.color.src_factor.uses_dual_source()
                || self.color.dst_factor.uses_dual_source()
                || self.alpha.src_factor.uses_dual_source()
                || self.alpha.dst_factor.uses_dual_source())
    }
}

impl Default for BlendSettings {
    fn default() -> Self {
        Self::OPAQUE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_is_opaque() {
        assert_eq!(BlendSettings::default(), BlendSettings::OPAQUE);
        assert!(!BlendSettings::OPAQUE.enabled);
    }

    #[test]
    fn test_presets_are_distinct() {
        let presets: HashSet<BlendSettings> = [
            BlendSettings::OPAQUE,
            BlendSettings::ALPHA_BLEND,
            BlendSettings::ADDITIVE,
            BlendSettings::NON_PREMULTIPLIED,
        ]
        .into_iter()
        .collect();
        assert_eq!(presets.len(), 4);
    }

    #[test]
    fn test_additive_factors() {
        let additive = BlendSettings::ADDITIVE;
        assert!(additive.enabled);
        assert_eq!(additive.color.src_factor, BlendFactor::SrcAlpha);
        assert_eq!(additive.color.dst_factor, BlendFactor::One);
        assert_eq!(additive.alpha, additive.color);
    }

    #[test]
    fn test_structural_equality() {
        let mut custom = BlendSettings::ALPHA_BLEND;
        assert_eq!(custom, BlendSettings::ALPHA_BLEND);

        custom.alpha.operation = BlendOperation::Max;
        assert_ne!(custom, BlendSettings::ALPHA_BLEND);
    }

    #[test]
    fn test_dual_source_ignored_when_disabled() {
        let mut settings = BlendSettings::OPAQUE;
        settings.color.dst_factor = BlendFactor::OneMinusSrc1Color;
        assert!(!settings.uses_dual_source());

        settings.enabled = true;
        assert!(settings.uses_dual_source());
    }
}
