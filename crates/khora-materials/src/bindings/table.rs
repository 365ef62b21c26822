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

//! The per-material table of shader resource bindings.

use hecs::Entity;

use super::{
    ComponentBinding, DescriptorResourceKey, InstanceAttributeBinding, PushConstantBinding,
    StorageBufferBinding, TextureBinding, TextureRegion,
};
use crate::{
    ecs::DataType,
    error::MaterialError,
    settings::{ShaderStage, TextureFiltering},
};

/// Every resource binding attached to one material, in insertion order.
///
/// The table is a component on the material entity and dies with it. Lookups
/// are linear scans: bindings are written once at setup and a material rarely
/// holds more than a few dozen, so no index is maintained.
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    push_constants: Vec<PushConstantBinding>,
    component_bindings: Vec<ComponentBinding>,
    texture_bindings: Vec<TextureBinding>,
    instance_attributes: Vec<InstanceAttributeBinding>,
    storage_buffers: Vec<StorageBufferBinding>,
}

impl BindingTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push-constant ranges, in block order.
    pub fn push_constants(&self) -> &[PushConstantBinding] {
        &self.push_constants
    }

    /// Component bindings, in insertion order.
    pub fn component_bindings(&self) -> &[ComponentBinding] {
        &self.component_bindings
    }

    /// Texture bindings, in insertion order.
    pub fn texture_bindings(&self) -> &[TextureBinding] {
        &self.texture_bindings
    }

    /// Per-instance attributes, in insertion order.
    pub fn instance_attributes(&self) -> &[InstanceAttributeBinding] {
        &self.instance_attributes
    }

    /// Storage buffer slots, in insertion order.
    pub fn storage_buffers(&self) -> &[StorageBufferBinding] {
        &self.storage_buffers
    }

    /// Returns `true` if no binding of any kind is present.
    pub fn is_empty(&self) -> bool {
        self.push_constants.is_empty()
            && self.component_bindings.is_empty()
            && self.texture_bindings.is_empty()
            && self.instance_attributes.is_empty()
            && self.storage_buffers.is_empty()
    }

    // --- Push constants ---

    /// Returns `true` if a push constant reads `data_type`.
    pub fn contains_push_constant(&self, data_type: DataType) -> bool {
        self.push_constants
            .iter()
            .any(|binding| binding.data_type.index == data_type.index)
    }

    /// Appends a push-constant range for `data_type`.
    ///
    /// The range starts where the previous one ended; ranges are packed without
    /// alignment padding and never reordered.
    pub fn add_push_constant(
        &mut self,
        data_type: DataType,
        stage: ShaderStage,
    ) -> Result<PushConstantBinding, MaterialError> {
        if self.contains_push_constant(data_type) {
            return Err(MaterialError::DuplicatePushConstant { data_type });
        }

        let binding = PushConstantBinding::new(self.push_constant_size(), data_type, stage);
        self.push_constants.push(binding);
        log::debug!(
            "Added push constant {:?} at offset {} for the {:?} stage",
            data_type,
            binding.offset,
            stage
        );
        Ok(binding)
    }

    /// Looks up the push constant reading `data_type`.
    pub fn push_constant(&self, data_type: DataType) -> Result<PushConstantBinding, MaterialError> {
        self.push_constants
            .iter()
            .find(|binding| binding.data_type.index == data_type.index)
            .copied()
            .ok_or(MaterialError::MissingPushConstant { data_type })
    }

    /// Total size in bytes of the push-constant block.
    pub fn push_constant_size(&self) -> u32 {
        self.push_constants.iter().map(PushConstantBinding::size).sum()
    }

    // --- Component bindings ---

    /// Returns `true` if `key` is bound to component data for `stage`.
    pub fn contains_component_binding(&self, key: DescriptorResourceKey, stage: ShaderStage) -> bool {
        self.component_bindings
            .iter()
            .any(|binding| binding.occupies(key, stage))
    }

    /// Binds `key` to the `data_type` component of `entity`.
    pub fn add_component_binding(
        &mut self,
        key: DescriptorResourceKey,
        entity: Entity,
        data_type: DataType,
        stage: ShaderStage,
    ) -> Result<ComponentBinding, MaterialError> {
        if self.contains_component_binding(key, stage) {
            return Err(MaterialError::DuplicateComponentBinding { key, stage });
        }

        let binding = ComponentBinding::new(key, entity, data_type, stage);
        self.component_bindings.push(binding);
        log::debug!("Bound `{key}` ({stage:?}) to {data_type:?} on {entity:?}");
        Ok(binding)
    }

    /// Looks up the component binding for `key` and `stage`.
    pub fn component_binding(
        &self,
        key: DescriptorResourceKey,
        stage: ShaderStage,
    ) -> Result<ComponentBinding, MaterialError> {
        self.component_bindings
            .iter()
            .find(|binding| binding.occupies(key, stage))
            .copied()
            .ok_or(MaterialError::MissingComponentBinding { key, stage })
    }

    /// Points an existing component binding at another source entity.
    pub fn set_component_binding(
        &mut self,
        key: DescriptorResourceKey,
        stage: ShaderStage,
        entity: Entity,
    ) -> Result<(), MaterialError> {
        let binding = self
            .component_bindings
            .iter_mut()
            .find(|binding| binding.occupies(key, stage))
            .ok_or(MaterialError::MissingComponentBinding { key, stage })?;
        binding.entity = entity;
        Ok(())
    }

    // --- Texture bindings ---

    /// Returns `true` if a texture is bound to `key`.
    pub fn contains_texture_binding(&self, key: DescriptorResourceKey) -> bool {
        self.index_of_texture_binding(key).is_some()
    }

    /// Returns the position of the texture binding for `key`.
    pub fn index_of_texture_binding(&self, key: DescriptorResourceKey) -> Option<usize> {
        self.texture_bindings
            .iter()
            .position(|binding| binding.key == key)
    }

    /// Binds the whole of `texture` to `key` with linear filtering.
    pub fn add_texture_binding(
        &mut self,
        key: DescriptorResourceKey,
        texture: Entity,
    ) -> Result<TextureBinding, MaterialError> {
        self.add_texture_binding_with(key, texture, TextureRegion::FULL, TextureFiltering::Linear)
    }

    /// Binds `region` of `texture` to `key`.
    pub fn add_texture_binding_with(
        &mut self,
        key: DescriptorResourceKey,
        texture: Entity,
        region: TextureRegion,
        filtering: TextureFiltering,
    ) -> Result<TextureBinding, MaterialError> {
        if self.contains_texture_binding(key) {
            return Err(MaterialError::DuplicateTextureBinding { key });
        }

        let binding = TextureBinding::new(key, texture, region, filtering);
        self.texture_bindings.push(binding);
        log::debug!("Bound texture {texture:?} to `{key}`");
        Ok(binding)
    }

    /// Looks up the texture binding for `key`.
    pub fn texture_binding(&self, key: DescriptorResourceKey) -> Result<TextureBinding, MaterialError> {
        self.index_of_texture_binding(key)
            .map(|index| self.texture_bindings[index])
            .ok_or(MaterialError::MissingTextureBinding { key })
    }

    /// Mutable access to the texture binding for `key`.
    pub fn texture_binding_mut(
        &mut self,
        key: DescriptorResourceKey,
    ) -> Result<&mut TextureBinding, MaterialError> {
        self.texture_bindings
            .iter_mut()
            .find(|binding| binding.key == key)
            .ok_or(MaterialError::MissingTextureBinding { key })
    }

    /// Updates every property of the texture binding for `key`.
    ///
    /// Each property bumps the binding's version only if it changed. Returns
    /// the binding as it is afterwards.
    pub fn set_texture_binding(
        &mut self,
        key: DescriptorResourceKey,
        texture: Entity,
        region: TextureRegion,
        filtering: TextureFiltering,
    ) -> Result<TextureBinding, MaterialError> {
        let binding = self.texture_binding_mut(key)?;
        binding.set_texture(texture);
        binding.set_region(region);
        binding.set_filtering(filtering);
        Ok(*binding)
    }

    /// The first binding that samples `texture`, if any.
    pub fn first_texture_binding_for(&self, texture: Entity) -> Option<TextureBinding> {
        self.texture_bindings
            .iter()
            .find(|binding| binding.texture() == texture)
            .copied()
    }

    // --- Instance attributes and storage buffers ---

    /// Appends a per-instance attribute read from `data_type` components.
    pub fn add_instance_attribute(
        &mut self,
        key: DescriptorResourceKey,
        data_type: DataType,
    ) -> InstanceAttributeBinding {
        let binding = InstanceAttributeBinding::new(key, data_type);
        self.instance_attributes.push(binding);
        log::debug!("Added instance attribute {data_type:?} at `{key}`");
        binding
    }

    /// Returns `true` if a storage buffer occupies `key` for `stage`.
    pub fn contains_storage_buffer(&self, key: DescriptorResourceKey, stage: ShaderStage) -> bool {
        self.storage_buffers
            .iter()
            .any(|binding| binding.key == key && binding.stage == stage)
    }

    /// Declares a storage buffer slot.
    pub fn add_storage_buffer(
        &mut self,
        key: DescriptorResourceKey,
        stage: ShaderStage,
    ) -> Result<StorageBufferBinding, MaterialError> {
        if self.contains_storage_buffer(key, stage) {
            return Err(MaterialError::DuplicateStorageBuffer { key, stage });
        }

        let binding = StorageBufferBinding::new(key, stage);
        self.storage_buffers.push(binding);
        Ok(binding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hecs::World;

    struct Source;

    fn key(binding: u8, set: u8) -> DescriptorResourceKey {
        DescriptorResourceKey::new(binding, set).unwrap()
    }

    fn data_type(index: u32, size: u32) -> DataType {
        DataType { index, size }
    }

    #[test]
    fn test_push_constant_offsets_accumulate() {
        let mut table = BindingTable::new();

        let first = table
            .add_push_constant(data_type(0, 16), ShaderStage::Vertex)
            .unwrap();
        let second = table
            .add_push_constant(data_type(1, 4), ShaderStage::Fragment)
            .unwrap();
        let third = table
            .add_push_constant(data_type(2, 12), ShaderStage::Vertex)
            .unwrap();

        assert_eq!(first.offset, 0);
        assert_eq!(second.offset, 16);
        assert_eq!(third.offset, 20);
        assert_eq!(table.push_constant_size(), 32);
        assert_eq!(table.push_constants().len(), 3);
    }

    #[test]
    fn test_duplicate_push_constant_is_rejected() {
        let mut table = BindingTable::new();
        table
            .add_push_constant(data_type(3, 8), ShaderStage::Vertex)
            .unwrap();

        let err = table
            .add_push_constant(data_type(3, 8), ShaderStage::Fragment)
            .unwrap_err();
        assert!(matches!(err, MaterialError::DuplicatePushConstant { .. }));
        assert_eq!(table.push_constants().len(), 1);
    }

    #[test]
    fn test_push_constant_lookup() {
        let mut table = BindingTable::new();
        table
            .add_push_constant(data_type(0, 8), ShaderStage::Vertex)
            .unwrap();

        assert_eq!(table.push_constant(data_type(0, 8)).unwrap().offset, 0);
        assert!(matches!(
            table.push_constant(data_type(9, 8)),
            Err(MaterialError::MissingPushConstant { .. })
        ));
    }

    #[test]
    fn test_component_binding_identity_is_key_and_stage() {
        let mut world = World::new();
        let source = world.spawn((Source,));
        let mut table = BindingTable::new();

        table
            .add_component_binding(key(0, 0), source, data_type(0, 64), ShaderStage::Vertex)
            .unwrap();
        // Same key, other stage: allowed.
        table
            .add_component_binding(key(0, 0), source, data_type(0, 64), ShaderStage::Fragment)
            .unwrap();

        let err = table
            .add_component_binding(key(0, 0), source, data_type(1, 4), ShaderStage::Vertex)
            .unwrap_err();
        assert!(matches!(
            err,
            MaterialError::DuplicateComponentBinding {
                stage: ShaderStage::Vertex,
                ..
            }
        ));
        assert_eq!(table.component_bindings().len(), 2);
    }

    #[test]
    fn test_set_component_binding_retargets_source() {
        let mut world = World::new();
        let first = world.spawn((Source,));
        let second = world.spawn((Source,));
        let mut table = BindingTable::new();
        table
            .add_component_binding(key(1, 0), first, data_type(0, 4), ShaderStage::Fragment)
            .unwrap();

        table
            .set_component_binding(key(1, 0), ShaderStage::Fragment, second)
            .unwrap();
        let binding = table
            .component_binding(key(1, 0), ShaderStage::Fragment)
            .unwrap();
        assert_eq!(binding.entity, second);

        assert!(matches!(
            table.set_component_binding(key(1, 0), ShaderStage::Vertex, second),
            Err(MaterialError::MissingComponentBinding { .. })
        ));
    }

    #[test]
    fn test_texture_binding_defaults() {
        let mut world = World::new();
        let texture = world.spawn((Source,));
        let mut table = BindingTable::new();

        let binding = table.add_texture_binding(key(0, 1), texture).unwrap();
        assert_eq!(binding.region(), TextureRegion::FULL);
        assert_eq!(binding.filtering(), TextureFiltering::Linear);
        assert_eq!(binding.version(), 0);
        assert!(table.contains_texture_binding(key(0, 1)));
        assert_eq!(table.index_of_texture_binding(key(0, 1)), Some(0));
    }

    #[test]
    fn test_duplicate_texture_key_is_rejected() {
        let mut world = World::new();
        let texture = world.spawn((Source,));
        let other = world.spawn((Source,));
        let mut table = BindingTable::new();
        table.add_texture_binding(key(0, 1), texture).unwrap();

        let err = table.add_texture_binding(key(0, 1), other).unwrap_err();
        assert!(matches!(err, MaterialError::DuplicateTextureBinding { .. }));
    }

    #[test]
    fn test_set_texture_binding_versions() {
        let mut world = World::new();
        let texture = world.spawn((Source,));
        let other = world.spawn((Source,));
        let mut table = BindingTable::new();
        table.add_texture_binding(key(2, 0), texture).unwrap();

        let unchanged = table
            .set_texture_binding(key(2, 0), texture, TextureRegion::FULL, TextureFiltering::Linear)
            .unwrap();
        assert_eq!(unchanged.version(), 0);

        let changed = table
            .set_texture_binding(
                key(2, 0),
                other,
                TextureRegion::new(0.5, 0.5, 0.5, 0.5),
                TextureFiltering::Nearest,
            )
            .unwrap();
        assert_eq!(changed.version(), 3);
        assert_eq!(table.texture_binding(key(2, 0)).unwrap().texture(), other);

        assert!(matches!(
            table.set_texture_binding(key(3, 0), other, TextureRegion::FULL, TextureFiltering::Linear),
            Err(MaterialError::MissingTextureBinding { .. })
        ));
    }

    #[test]
    fn test_first_texture_binding_for() {
        let mut world = World::new();
        let shared = world.spawn((Source,));
        let unused = world.spawn((Source,));
        let mut table = BindingTable::new();
        table.add_texture_binding(key(0, 0), shared).unwrap();
        table.add_texture_binding(key(1, 0), shared).unwrap();

        let found = table.first_texture_binding_for(shared).unwrap();
        assert_eq!(found.key, key(0, 0));
        assert!(table.first_texture_binding_for(unused).is_none());
    }

    #[test]
    fn test_instance_attributes_and_storage_buffers() {
        let mut table = BindingTable::new();
        assert!(table.is_empty());

        table.add_instance_attribute(key(4, 0), data_type(0, 64));
        table.add_instance_attribute(key(5, 0), data_type(1, 16));
        assert_eq!(table.instance_attributes()[1].key, key(5, 0));

        table.add_storage_buffer(key(0, 2), ShaderStage::Compute).unwrap();
        assert!(table.contains_storage_buffer(key(0, 2), ShaderStage::Compute));
        assert!(matches!(
            table.add_storage_buffer(key(0, 2), ShaderStage::Compute),
            Err(MaterialError::DuplicateStorageBuffer { .. })
        ));
        assert!(!table.is_empty());
    }
}
