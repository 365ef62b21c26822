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

//! A borrowed view over a material entity.

use std::time::Duration;

use hecs::{Component, ComponentError, Entity, Ref, RefMut, World};

use crate::{
    bindings::{
        BindingTable, ComponentBinding, DescriptorResourceKey, InstanceAttributeBinding,
        PushConstantBinding, StorageBufferBinding, TextureBinding, TextureRegion,
    },
    components::{IsMaterial, MaterialRequest, RequestStatus},
    ecs::{DataType, Schema},
    error::MaterialError,
    settings::{BlendSettings, DepthSettings, MaterialFlags, ShaderStage, TextureFiltering},
};

/// A material entity together with the world it lives in.
///
/// The view is `Copy` and only holds a shared borrow of the world. Every call
/// borrows the material's components for its own duration only, so reads and
/// writes through the same view can be interleaved freely.
#[derive(Clone, Copy)]
pub struct Material<'w> {
    world: &'w World,
    entity: Entity,
}

impl<'w> Material<'w> {
    /// Spawns a ready material with opaque blending and default depth testing.
    pub fn new(world: &'w mut World, vertex_shader: Entity, fragment_shader: Entity) -> Self {
        Self::spawn(world, IsMaterial::new(vertex_shader, fragment_shader))
    }

    /// Spawns a ready material with explicit pipeline settings.
    pub fn with_settings(
        world: &'w mut World,
        vertex_shader: Entity,
        fragment_shader: Entity,
        blend: BlendSettings,
        depth: DepthSettings,
        flags: MaterialFlags,
    ) -> Self {
        Self::spawn(
            world,
            IsMaterial::with_settings(vertex_shader, fragment_shader, blend, depth, flags),
        )
    }

    /// Spawns a material that still has to be loaded from `address`.
    ///
    /// The entity starts with an empty binding table and a submitted request.
    /// It reports as not loaded until a [`MaterialLoader`](crate::MaterialLoader)
    /// completes the request.
    pub fn request(world: &'w mut World, address: impl Into<String>, timeout: Duration) -> Self {
        let request = MaterialRequest::new(address, timeout);
        log::debug!("Requested material '{}'", request.address());
        let entity = world.spawn((request, BindingTable::new()));
        Self {
            world: &*world,
            entity,
        }
    }

    /// Wraps an existing material entity.
    pub fn from_entity(world: &'w World, entity: Entity) -> Result<Self, MaterialError> {
        match world.satisfies::<&BindingTable>(entity) {
            Ok(true) => Ok(Self { world, entity }),
            Ok(false) => Err(MaterialError::NotAMaterial { entity }),
            Err(_) => Err(MaterialError::NoSuchEntity { entity }),
        }
    }

    fn spawn(world: &'w mut World, record: IsMaterial) -> Self {
        let entity = world.spawn((record, BindingTable::new()));
        log::debug!("Spawned material {entity:?}");
        Self {
            world: &*world,
            entity,
        }
    }

    /// The material entity.
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// The world the material lives in.
    pub fn world(&self) -> &'w World {
        self.world
    }

    // --- Load state ---

    /// Returns `true` once the material can be rendered.
    ///
    /// A requested material is loaded when its request reached
    /// [`RequestStatus::Loaded`]; any other material is loaded as soon as it
    /// carries an [`IsMaterial`] record.
    pub fn is_loaded(&self) -> bool {
        match self.request_status() {
            Some(status) => status == RequestStatus::Loaded,
            None => self.world.satisfies::<&IsMaterial>(self.entity).unwrap_or(false),
        }
    }

    /// The status of the material's request, or `None` for materials created
    /// directly from shaders.
    pub fn request_status(&self) -> Option<RequestStatus> {
        self.world
            .get::<&MaterialRequest>(self.entity)
            .ok()
            .map(|request| request.status())
    }

    /// The address a requested material is loaded from.
    pub fn address(&self) -> Option<String> {
        self.world
            .get::<&MaterialRequest>(self.entity)
            .ok()
            .map(|request| request.address().to_owned())
    }

    // --- Record ---

    /// The version counter of the record.
    pub fn version(&self) -> Result<u32, MaterialError> {
        Ok(self.record()?.version())
    }

    /// The draw ordering hint.
    pub fn render_order(&self) -> Result<i8, MaterialError> {
        Ok(self.record()?.render_order())
    }

    /// The blend settings.
    pub fn blend_settings(&self) -> Result<BlendSettings, MaterialError> {
        Ok(self.record()?.blend_settings())
    }

    /// The depth/stencil settings.
    pub fn depth_settings(&self) -> Result<DepthSettings, MaterialError> {
        Ok(self.record()?.depth_settings())
    }

    /// The material flags.
    pub fn flags(&self) -> Result<MaterialFlags, MaterialError> {
        Ok(self.record()?.flags())
    }

    /// The vertex shader entity. Fails if it has been despawned.
    pub fn vertex_shader(&self) -> Result<Entity, MaterialError> {
        let shader = self.record()?.vertex_shader();
        self.resolve(shader)
    }

    /// The fragment shader entity. Fails if it has been despawned.
    pub fn fragment_shader(&self) -> Result<Entity, MaterialError> {
        let shader = self.record()?.fragment_shader();
        self.resolve(shader)
    }

    /// Sets the draw ordering hint. Returns `true` if the version was bumped.
    pub fn set_render_order(&self, render_order: i8) -> Result<bool, MaterialError> {
        Ok(self.record_mut()?.set_render_order(render_order))
    }

    /// Replaces the blend settings. Returns `true` if the version was bumped.
    pub fn set_blend_settings(&self, blend: BlendSettings) -> Result<bool, MaterialError> {
        Ok(self.record_mut()?.set_blend_settings(blend))
    }

    /// Replaces the depth/stencil settings. Returns `true` if the version was bumped.
    pub fn set_depth_settings(&self, depth: DepthSettings) -> Result<bool, MaterialError> {
        Ok(self.record_mut()?.set_depth_settings(depth))
    }

    /// Replaces the material flags. Returns `true` if the version was bumped.
    pub fn set_flags(&self, flags: MaterialFlags) -> Result<bool, MaterialError> {
        Ok(self.record_mut()?.set_flags(flags))
    }

    /// Replaces both shader references. Returns `true` if the version was bumped.
    pub fn set_shaders(
        &self,
        vertex_shader: Entity,
        fragment_shader: Entity,
    ) -> Result<bool, MaterialError> {
        Ok(self.record_mut()?.set_shaders(vertex_shader, fragment_shader))
    }

    // --- Bindings ---

    /// A snapshot of the binding table of a loaded material.
    pub fn bindings(&self) -> Result<BindingTable, MaterialError> {
        Ok((*self.loaded_table()?).clone())
    }

    /// Appends a push constant and bumps the material version.
    ///
    /// The version lives on the [`IsMaterial`] record, so a material that is
    /// still being requested gets no bump: push constants added before the
    /// load completes are part of its initial state, and the loaded record
    /// starts at version 0.
    pub fn add_push_constant(
        &self,
        data_type: DataType,
        stage: ShaderStage,
    ) -> Result<PushConstantBinding, MaterialError> {
        let binding = self.table_mut()?.add_push_constant(data_type, stage)?;
        if let Ok(mut record) = self.world.get::<&mut IsMaterial>(self.entity) {
            record.bump_version();
        }
        Ok(binding)
    }

    /// [`add_push_constant`](Self::add_push_constant) for the registered type `T`.
    pub fn add_push_constant_of<T: Component>(
        &self,
        schema: &Schema,
        stage: ShaderStage,
    ) -> Result<PushConstantBinding, MaterialError> {
        self.add_push_constant(schema.data_type::<T>()?, stage)
    }

    /// Looks up the push constant reading `data_type`.
    pub fn push_constant(&self, data_type: DataType) -> Result<PushConstantBinding, MaterialError> {
        self.table()?.push_constant(data_type)
    }

    /// [`push_constant`](Self::push_constant) for the registered type `T`.
    pub fn push_constant_of<T: Component>(
        &self,
        schema: &Schema,
    ) -> Result<PushConstantBinding, MaterialError> {
        self.push_constant(schema.data_type::<T>()?)
    }

    /// Returns `true` if a push constant reads `data_type`.
    pub fn contains_push_constant(&self, data_type: DataType) -> Result<bool, MaterialError> {
        Ok(self.table()?.contains_push_constant(data_type))
    }

    /// Binds `key` to the `data_type` component of `source`.
    pub fn add_component_binding(
        &self,
        key: DescriptorResourceKey,
        source: Entity,
        data_type: DataType,
        stage: ShaderStage,
    ) -> Result<ComponentBinding, MaterialError> {
        self.table_mut()?
            .add_component_binding(key, source, data_type, stage)
    }

    /// [`add_component_binding`](Self::add_component_binding) for the registered type `T`.
    pub fn add_component_binding_of<T: Component>(
        &self,
        schema: &Schema,
        key: DescriptorResourceKey,
        source: Entity,
        stage: ShaderStage,
    ) -> Result<ComponentBinding, MaterialError> {
        self.add_component_binding(key, source, schema.data_type::<T>()?, stage)
    }

    /// Looks up the component binding for `key` and `stage`.
    pub fn component_binding(
        &self,
        key: DescriptorResourceKey,
        stage: ShaderStage,
    ) -> Result<ComponentBinding, MaterialError> {
        self.table()?.component_binding(key, stage)
    }

    /// Returns `true` if `key` is bound to component data for `stage`.
    pub fn contains_component_binding(
        &self,
        key: DescriptorResourceKey,
        stage: ShaderStage,
    ) -> Result<bool, MaterialError> {
        Ok(self.table()?.contains_component_binding(key, stage))
    }

    /// Points an existing component binding at another source entity.
    pub fn set_component_binding(
        &self,
        key: DescriptorResourceKey,
        stage: ShaderStage,
        source: Entity,
    ) -> Result<(), MaterialError> {
        self.table_mut()?.set_component_binding(key, stage, source)
    }

    /// Binds the whole of `texture` to `key` with linear filtering.
    pub fn add_texture_binding(
        &self,
        key: DescriptorResourceKey,
        texture: Entity,
    ) -> Result<TextureBinding, MaterialError> {
        self.table_mut()?.add_texture_binding(key, texture)
    }

    /// Binds `region` of `texture` to `key`.
    pub fn add_texture_binding_with(
        &self,
        key: DescriptorResourceKey,
        texture: Entity,
        region: TextureRegion,
        filtering: TextureFiltering,
    ) -> Result<TextureBinding, MaterialError> {
        self.table_mut()?
            .add_texture_binding_with(key, texture, region, filtering)
    }

    /// Looks up the texture binding for `key`.
    pub fn texture_binding(&self, key: DescriptorResourceKey) -> Result<TextureBinding, MaterialError> {
        self.table()?.texture_binding(key)
    }

    /// Returns `true` if a texture is bound to `key`.
    pub fn contains_texture_binding(&self, key: DescriptorResourceKey) -> Result<bool, MaterialError> {
        Ok(self.table()?.contains_texture_binding(key))
    }

    /// Updates the texture binding for `key`, bumping its version per changed property.
    pub fn set_texture_binding(
        &self,
        key: DescriptorResourceKey,
        texture: Entity,
        region: TextureRegion,
        filtering: TextureFiltering,
    ) -> Result<TextureBinding, MaterialError> {
        self.table_mut()?
            .set_texture_binding(key, texture, region, filtering)
    }

    /// The first binding that samples `texture`, if any.
    pub fn first_texture_binding_for(
        &self,
        texture: Entity,
    ) -> Result<Option<TextureBinding>, MaterialError> {
        Ok(self.table()?.first_texture_binding_for(texture))
    }

    /// Appends a per-instance attribute.
    pub fn add_instance_attribute(
        &self,
        key: DescriptorResourceKey,
        data_type: DataType,
    ) -> Result<InstanceAttributeBinding, MaterialError> {
        Ok(self.table_mut()?.add_instance_attribute(key, data_type))
    }

    /// [`add_instance_attribute`](Self::add_instance_attribute) for the registered type `T`.
    pub fn add_instance_attribute_of<T: Component>(
        &self,
        schema: &Schema,
        key: DescriptorResourceKey,
    ) -> Result<InstanceAttributeBinding, MaterialError> {
        self.add_instance_attribute(key, schema.data_type::<T>()?)
    }

    /// Declares a storage buffer slot.
    pub fn add_storage_buffer(
        &self,
        key: DescriptorResourceKey,
        stage: ShaderStage,
    ) -> Result<StorageBufferBinding, MaterialError> {
        self.table_mut()?.add_storage_buffer(key, stage)
    }

    /// Returns `true` if a storage buffer occupies `key` for `stage`.
    pub fn contains_storage_buffer(
        &self,
        key: DescriptorResourceKey,
        stage: ShaderStage,
    ) -> Result<bool, MaterialError> {
        Ok(self.table()?.contains_storage_buffer(key, stage))
    }

    /// Appends the push-constant block for `source` to `out`.
    ///
    /// Each push constant's component is read from `source` in binding order,
    /// so the bytes land at the offsets recorded in the table.
    pub fn write_push_constants(
        &self,
        schema: &Schema,
        source: Entity,
        out: &mut Vec<u8>,
    ) -> Result<(), MaterialError> {
        let table = self.loaded_table()?;
        out.reserve(table.push_constant_size() as usize);
        for binding in table.push_constants() {
            schema.read_bytes(self.world, source, binding.data_type, out)?;
        }
        Ok(())
    }

    fn loaded_table(&self) -> Result<Ref<'w, BindingTable>, MaterialError> {
        if !self.is_loaded() {
            return Err(MaterialError::NotLoaded {
                entity: self.entity,
            });
        }
        self.table()
    }

    fn record(&self) -> Result<Ref<'w, IsMaterial>, MaterialError> {
        let not_loaded = MaterialError::NotLoaded {
            entity: self.entity,
        };
        if self.request_status().is_some_and(|s| s != RequestStatus::Loaded) {
            return Err(not_loaded);
        }
        self.world
            .get::<&IsMaterial>(self.entity)
            .map_err(|_| not_loaded)
    }

    fn record_mut(&self) -> Result<RefMut<'w, IsMaterial>, MaterialError> {
        let not_loaded = MaterialError::NotLoaded {
            entity: self.entity,
        };
        if self.request_status().is_some_and(|s| s != RequestStatus::Loaded) {
            return Err(not_loaded);
        }
        self.world
            .get::<&mut IsMaterial>(self.entity)
            .map_err(|_| not_loaded)
    }

    fn table(&self) -> Result<Ref<'w, BindingTable>, MaterialError> {
        self.world
            .get::<&BindingTable>(self.entity)
            .map_err(|err| self.missing(err))
    }

    fn table_mut(&self) -> Result<RefMut<'w, BindingTable>, MaterialError> {
        self.world
            .get::<&mut BindingTable>(self.entity)
            .map_err(|err| self.missing(err))
    }

    fn missing(&self, err: ComponentError) -> MaterialError {
        match err {
            ComponentError::NoSuchEntity => MaterialError::NoSuchEntity {
                entity: self.entity,
            },
            ComponentError::MissingComponent(_) => MaterialError::NotAMaterial {
                entity: self.entity,
            },
        }
    }

    fn resolve(&self, shader: Entity) -> Result<Entity, MaterialError> {
        if self.world.contains(shader) {
            Ok(shader)
        } else {
            Err(MaterialError::DanglingReference {
                material: self.entity,
                reference: shader,
            })
        }
    }
}

impl std::fmt::Debug for Material<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Material")
            .field("entity", &self.entity)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytemuck::{Pod, Zeroable};

    struct Shader;

    #[repr(C)]
    #[derive(Debug, Clone, Copy, Pod, Zeroable)]
    struct Transform([f32; 16]);

    fn key(binding: u8, set: u8) -> DescriptorResourceKey {
        DescriptorResourceKey::new(binding, set).unwrap()
    }

    fn shaders(world: &mut World) -> (Entity, Entity) {
        (world.spawn((Shader,)), world.spawn((Shader,)))
    }

    #[test]
    fn test_from_entity_rejects_non_materials() {
        let mut world = World::new();
        let plain = world.spawn((Shader,));

        assert!(matches!(
            Material::from_entity(&world, plain),
            Err(MaterialError::NotAMaterial { .. })
        ));

        world.despawn(plain).unwrap();
        assert!(matches!(
            Material::from_entity(&world, plain),
            Err(MaterialError::NoSuchEntity { .. })
        ));
    }

    #[test]
    fn test_requested_material_guards_record() {
        let mut world = World::new();
        let material = Material::request(&mut world, "missing", Duration::ZERO);

        assert!(!material.is_loaded());
        assert_eq!(material.request_status(), Some(RequestStatus::Submitted));
        assert!(matches!(
            material.blend_settings(),
            Err(MaterialError::NotLoaded { .. })
        ));
        assert!(matches!(
            material.bindings(),
            Err(MaterialError::NotLoaded { .. })
        ));
        assert!(matches!(
            material.set_render_order(1),
            Err(MaterialError::NotLoaded { .. })
        ));
    }

    #[test]
    fn test_add_push_constant_bumps_version() {
        let mut world = World::new();
        let (vertex, fragment) = shaders(&mut world);
        let mut schema = Schema::new();
        schema.register::<Transform>();

        let material = Material::new(&mut world, vertex, fragment);
        let binding = material
            .add_push_constant_of::<Transform>(&schema, ShaderStage::Vertex)
            .unwrap();

        assert_eq!(binding.offset, 0);
        assert_eq!(binding.size(), 64);
        assert_eq!(material.version().unwrap(), 1);
        assert!(material
            .add_push_constant_of::<Transform>(&schema, ShaderStage::Vertex)
            .is_err());
        assert_eq!(material.version().unwrap(), 1);
    }

    #[test]
    fn test_other_bindings_leave_version_alone() {
        let mut world = World::new();
        let (vertex, fragment) = shaders(&mut world);
        let texture = world.spawn((Shader,));
        let material = Material::new(&mut world, vertex, fragment);

        material.add_texture_binding(key(0, 1), texture).unwrap();
        material.add_storage_buffer(key(1, 1), ShaderStage::Fragment).unwrap();
        assert_eq!(material.version().unwrap(), 0);
        assert_eq!(material.bindings().unwrap().texture_bindings().len(), 1);
    }

    #[test]
    fn test_bindings_snapshot_allows_later_mutation() {
        let mut world = World::new();
        let (vertex, fragment) = shaders(&mut world);
        let albedo = world.spawn((Shader,));
        let normal = world.spawn((Shader,));
        let material = Material::new(&mut world, vertex, fragment);
        material.add_texture_binding(key(0, 1), albedo).unwrap();

        let before = material.bindings().unwrap();
        material.add_texture_binding(key(1, 1), normal).unwrap();
        material
            .set_texture_binding(key(0, 1), normal, TextureRegion::FULL, TextureFiltering::Nearest)
            .unwrap();

        assert_eq!(before.texture_bindings().len(), 1);
        assert_eq!(before.texture_bindings()[0].texture(), albedo);

        let after = material.bindings().unwrap();
        assert_eq!(after.texture_bindings().len(), 2);
        assert_eq!(after.texture_bindings()[0].texture(), normal);
    }

    #[test]
    fn test_unregistered_type_is_reported() {
        let mut world = World::new();
        let (vertex, fragment) = shaders(&mut world);
        let schema = Schema::new();
        let material = Material::new(&mut world, vertex, fragment);

        assert!(matches!(
            material.add_push_constant_of::<Transform>(&schema, ShaderStage::Vertex),
            Err(MaterialError::UnregisteredType { .. })
        ));
    }

    #[test]
    fn test_dangling_shader_reference() {
        let mut world = World::new();
        let (vertex, fragment) = shaders(&mut world);
        let entity = Material::new(&mut world, vertex, fragment).entity();
        world.despawn(fragment).unwrap();

        let material = Material::from_entity(&world, entity).unwrap();
        assert_eq!(material.vertex_shader().unwrap(), vertex);
        assert!(matches!(
            material.fragment_shader(),
            Err(MaterialError::DanglingReference { reference, .. }) if reference == fragment
        ));
    }

    #[test]
    fn test_setters_through_view() {
        let mut world = World::new();
        let (vertex, fragment) = shaders(&mut world);
        let material = Material::new(&mut world, vertex, fragment);

        assert!(!material.set_depth_settings(DepthSettings::DEFAULT).unwrap());
        assert!(material.set_depth_settings(DepthSettings::REVERSE_Z).unwrap());
        assert!(material.set_flags(MaterialFlags::DEPTH_WRITE).unwrap());
        assert!(material.set_shaders(fragment, vertex).unwrap());

        assert_eq!(material.version().unwrap(), 3);
        assert_eq!(material.vertex_shader().unwrap(), fragment);
        assert_eq!(material.flags().unwrap(), MaterialFlags::DEPTH_WRITE);
    }
}
