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

//! Enums shared by the blend, depth and binding descriptions.

use serde::{Deserialize, Serialize};

/// A programmable stage of the graphics or compute pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShaderStage {
    /// The vertex shader stage.
    #[default]
    Vertex,
    /// The fragment (or pixel) shader stage.
    Fragment,
    /// The compute shader stage.
    Compute,
}

/// The comparison used by depth and stencil tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompareOperation {
    /// The test never passes.
    Never,
    /// Passes if the incoming value is less than the stored one.
    Less,
    /// Passes if both values are equal.
    Equal,
    /// Passes if the incoming value is less than or equal to the stored one.
    LessEqual,
    /// Passes if the incoming value is greater than the stored one.
    Greater,
    /// Passes if the values differ.
    NotEqual,
    /// Passes if the incoming value is greater than or equal to the stored one.
    GreaterEqual,
    /// The test always passes.
    #[default]
    Always,
}

/// What happens to a stencil buffer value after a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StencilOperation {
    /// Leave the stored value untouched.
    #[default]
    Keep,
    /// Write 0.
    Zero,
    /// Write the reference value.
    Replace,
    /// Increment, saturating at the maximum.
    IncrementClamp,
    /// Decrement, saturating at 0.
    DecrementClamp,
    /// Bitwise invert.
    Invert,
    /// Increment, wrapping to 0.
    IncrementWrap,
    /// Decrement, wrapping to the maximum.
    DecrementWrap,
}

/// A factor applied to the source or destination term of a blend equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlendFactor {
    /// `0.0`
    Zero,
    /// `1.0`
    One,
    /// `src.rgb`
    SrcColor,
    /// `1.0 - src.rgb`
    OneMinusSrcColor,
    /// `dst.rgb`
    DstColor,
    /// `1.0 - dst.rgb`
    OneMinusDstColor,
    /// `src.a`
    SrcAlpha,
    /// `1.0 - src.a`
    OneMinusSrcAlpha,
    /// `dst.a`
    DstAlpha,
    /// `1.0 - dst.a`
    OneMinusDstAlpha,
    /// The blend constant's color.
    ConstantColor,
    /// `1.0 - constant.rgb`
    OneMinusConstantColor,
    /// The blend constant's alpha.
    ConstantAlpha,
    /// `1.0 - constant.a`
    OneMinusConstantAlpha,
    /// `min(src.a, 1.0 - dst.a)`
    SrcAlphaSaturate,
    /// The second fragment output's color (dual-source blending).
    Src1Color,
    /// `1.0 - src1.rgb`
    OneMinusSrc1Color,
    /// The second fragment output's alpha (dual-source blending).
    Src1Alpha,
    /// `1.0 - src1.a`
    OneMinusSrc1Alpha,
}

impl BlendFactor {
    /// Returns `true` if the factor reads the second fragment output,
    /// which requires dual-source blending support on the device.
    pub const fn uses_dual_source(&self) -> bool {
        matches!(
            self,
            BlendFactor::Src1Color
                | BlendFactor::OneMinusSrc1Color
                | BlendFactor::Src1Alpha
                | BlendFactor::OneMinusSrc1Alpha
        )
    }
}

/// Combines the weighted source and destination terms of a blend equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlendOperation {
    /// `source + destination`
    #[default]
    Add,
    /// `source - destination`
    Subtract,
    /// `destination - source`
    ReverseSubtract,
    /// `min(source, destination)`
    Min,
    /// `max(source, destination)`
    Max,
}

/// How a bound texture is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextureFiltering {
    /// Nearest texel, no interpolation.
    Nearest,
    /// Bilinear interpolation between texels.
    #[default]
    Linear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(ShaderStage::default(), ShaderStage::Vertex);
        assert_eq!(CompareOperation::default(), CompareOperation::Always);
        assert_eq!(StencilOperation::default(), StencilOperation::Keep);
        assert_eq!(TextureFiltering::default(), TextureFiltering::Linear);
    }

    #[test]
    fn test_dual_source_factors() {
        assert!(BlendFactor::Src1Alpha.uses_dual_source());
        assert!(BlendFactor::OneMinusSrc1Color.uses_dual_source());
        assert!(!BlendFactor::SrcAlpha.uses_dual_source());
        assert!(!BlendFactor::One.uses_dual_source());
    }
}
