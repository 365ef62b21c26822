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

//! Resolution of requested materials.
//!
//! A [`MaterialLoader`] walks the world's pending [`MaterialRequest`]s once per
//! update and asks a [`MaterialSource`] what each address refers to. Where the
//! description comes from (a file, an asset pack, the network) is the source's
//! business; the loader only drives the request state machine and attaches the
//! resulting [`IsMaterial`] record.

mod description;
mod source;

pub use description::*;
pub use source::*;

use std::time::Duration;

use hecs::{Entity, World};

use crate::{
    components::{IsMaterial, MaterialRequest, RequestStatus},
    error::MaterialError,
};

/// Tuning for [`MaterialLoader`].
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// The maximum number of requests polled in one update. `0` means no limit.
    pub max_requests_per_update: usize,
    /// If `true`, the request component is removed once it reaches a terminal
    /// status. Loaded materials keep reporting as loaded through their record.
    pub remove_finished_requests: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_requests_per_update: 0,
            remove_finished_requests: false,
        }
    }
}

/// What a single [`MaterialLoader::update`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Materials that finished loading.
    pub loaded: Vec<Entity>,
    /// Materials whose address was missing or whose timeout expired.
    pub not_found: Vec<Entity>,
    /// Requests still waiting on their source.
    pub pending: usize,
}

impl LoadReport {
    /// Returns `true` if the update changed nothing.
    pub fn is_idle(&self) -> bool {
        self.loaded.is_empty() && self.not_found.is_empty()
    }
}

/// Drives material requests to completion.
///
/// When [`LoaderConfig::max_requests_per_update`] caps the work per update,
/// the loader resumes after the last request it polled, so requests that stay
/// pending cannot starve the ones behind them.
#[derive(Debug, Default)]
pub struct MaterialLoader {
    config: LoaderConfig,
    cursor: usize,
}

enum Outcome {
    Loaded(IsMaterial),
    NotFound,
    Pending,
}

impl MaterialLoader {
    /// Creates a loader with the given configuration.
    pub fn new(config: LoaderConfig) -> Self {
        Self { config, cursor: 0 }
    }

    /// The active configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Polls unfinished requests, at most `max_requests_per_update` of them.
    ///
    /// `delta` is the time since the previous update and counts toward the
    /// timeout of each polled request. A request is moved to `Loading` the
    /// first time it is polled, then resolved according to what `source`
    /// returns for its address.
    pub fn update<S>(
        &mut self,
        world: &mut World,
        source: &mut S,
        delta: Duration,
    ) -> Result<LoadReport, MaterialError>
    where
        S: MaterialSource + ?Sized,
    {
        let mut report = LoadReport::default();

        let unfinished: Vec<Entity> = world
            .query_mut::<&MaterialRequest>()
            .into_iter()
            .filter(|(_, request)| !request.is_finished())
            .map(|(entity, _)| entity)
            .collect();
        if unfinished.is_empty() {
            return Ok(report);
        }

        let count = match self.config.max_requests_per_update {
            0 => unfinished.len(),
            n => n.min(unfinished.len()),
        };
        let start = self.cursor % unfinished.len();
        self.cursor = start + count;

        for &entity in unfinished.iter().cycle().skip(start).take(count) {
            let outcome = {
                let mut request = world
                    .get::<&mut MaterialRequest>(entity)
                    .map_err(|_| MaterialError::NoSuchEntity { entity })?;
                Self::poll(&mut request, source, delta)?
            };

            match outcome {
                Outcome::Loaded(record) => {
                    world
                        .insert_one(entity, record)
                        .map_err(|_| MaterialError::NoSuchEntity { entity })?;
                    let mut request = world
                        .get::<&mut MaterialRequest>(entity)
                        .map_err(|_| MaterialError::NoSuchEntity { entity })?;
                    request.complete()?;
                    log::info!("Material '{}' loaded as {:?}", request.address(), entity);
                    report.loaded.push(entity);
                }
                Outcome::NotFound => report.not_found.push(entity),
                Outcome::Pending => report.pending += 1,
            }
        }

        if self.config.remove_finished_requests {
            for &entity in report.loaded.iter().chain(&report.not_found) {
                if let Err(err) = world.remove_one::<MaterialRequest>(entity) {
                    log::debug!("Could not remove finished request on {entity:?}: {err}");
                }
            }
        }

        Ok(report)
    }

    fn poll<S>(
        request: &mut MaterialRequest,
        source: &mut S,
        delta: Duration,
    ) -> Result<Outcome, MaterialError>
    where
        S: MaterialSource + ?Sized,
    {
        if request.status() == RequestStatus::Submitted {
            request.begin_loading()?;
        }
        let expired = request.advance(delta);

        match source.fetch(request.address()) {
            Fetch::Ready(description) => Ok(Outcome::Loaded(description.to_record())),
            Fetch::Missing => {
                log::warn!("Material '{}' not found", request.address());
                request.fail()?;
                Ok(Outcome::NotFound)
            }
            Fetch::Pending if expired => {
                log::warn!(
                    "Material '{}' timed out after {:?}",
                    request.address(),
                    request.elapsed()
                );
                request.fail()?;
                Ok(Outcome::NotFound)
            }
            Fetch::Pending => Ok(Outcome::Pending),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Material;

    struct Shader;

    fn shaders(world: &mut World) -> (Entity, Entity) {
        (world.spawn((Shader,)), world.spawn((Shader,)))
    }

    #[test]
    fn test_missing_address_fails_on_first_update() {
        let mut world = World::new();
        let entity = Material::request(&mut world, "nowhere", Duration::ZERO).entity();
        let mut source = MemorySource::new();

        let report = MaterialLoader::default()
            .update(&mut world, &mut source, Duration::from_millis(16))
            .unwrap();

        assert_eq!(report.not_found, vec![entity]);
        let material = Material::from_entity(&world, entity).unwrap();
        assert_eq!(material.request_status(), Some(RequestStatus::NotFound));
        assert!(!material.is_loaded());
    }

    #[test]
    fn test_ready_address_loads() {
        let mut world = World::new();
        let (vertex, fragment) = shaders(&mut world);
        let entity = Material::request(&mut world, "brick", Duration::ZERO).entity();
        let mut source = MemorySource::new();
        source.insert("brick", MaterialDescription::new(vertex, fragment));

        let report = MaterialLoader::default()
            .update(&mut world, &mut source, Duration::ZERO)
            .unwrap();

        assert_eq!(report.loaded, vec![entity]);
        let material = Material::from_entity(&world, entity).unwrap();
        assert!(material.is_loaded());
        assert_eq!(material.vertex_shader().unwrap(), vertex);
        assert_eq!(material.version().unwrap(), 0);
    }

    #[test]
    fn test_pending_request_times_out() {
        let mut world = World::new();
        let entity = Material::request(&mut world, "slow", Duration::from_millis(50)).entity();
        let mut source = MemorySource::new();
        source.mark_pending("slow");
        let mut loader = MaterialLoader::default();

        let report = loader
            .update(&mut world, &mut source, Duration::from_millis(30))
            .unwrap();
        assert_eq!(report.pending, 1);
        assert!(report.is_idle());
        assert_eq!(
            Material::from_entity(&world, entity).unwrap().request_status(),
            Some(RequestStatus::Loading)
        );

        let report = loader
            .update(&mut world, &mut source, Duration::from_millis(30))
            .unwrap();
        assert_eq!(report.not_found, vec![entity]);
    }

    #[test]
    fn test_finished_requests_are_skipped() {
        let mut world = World::new();
        Material::request(&mut world, "nowhere", Duration::ZERO);
        let mut source = MemorySource::new();
        let mut loader = MaterialLoader::default();

        loader
            .update(&mut world, &mut source, Duration::ZERO)
            .unwrap();
        let report = loader
            .update(&mut world, &mut source, Duration::ZERO)
            .unwrap();
        assert_eq!(report, LoadReport::default());
    }

    #[test]
    fn test_max_requests_per_update() {
        let mut world = World::new();
        for _ in 0..3 {
            Material::request(&mut world, "nowhere", Duration::ZERO);
        }
        let mut source = MemorySource::new();
        let mut loader = MaterialLoader::new(LoaderConfig {
            max_requests_per_update: 2,
            ..Default::default()
        });

        let first = loader
            .update(&mut world, &mut source, Duration::ZERO)
            .unwrap();
        let second = loader
            .update(&mut world, &mut source, Duration::ZERO)
            .unwrap();
        assert_eq!(first.not_found.len(), 2);
        assert_eq!(second.not_found.len(), 1);
    }

    #[test]
    fn test_capped_updates_reach_requests_behind_pending_ones() {
        let mut world = World::new();
        let (vertex, fragment) = shaders(&mut world);
        for address in ["streaming/a", "streaming/b"] {
            Material::request(&mut world, address, Duration::ZERO);
        }
        let late = Material::request(&mut world, "brick", Duration::ZERO).entity();

        let mut source = MemorySource::new();
        source.mark_pending("streaming/a");
        source.mark_pending("streaming/b");
        source.insert("brick", MaterialDescription::new(vertex, fragment));

        let mut loader = MaterialLoader::new(LoaderConfig {
            max_requests_per_update: 2,
            ..Default::default()
        });
        let mut loaded = Vec::new();
        for _ in 0..4 {
            let report = loader
                .update(&mut world, &mut source, Duration::from_millis(16))
                .unwrap();
            assert!(report.loaded.len() + report.not_found.len() + report.pending <= 2);
            loaded.extend(report.loaded);
        }

        assert_eq!(loaded, vec![late]);
        let material = Material::from_entity(&world, late).unwrap();
        assert_eq!(material.request_status(), Some(RequestStatus::Loaded));
    }

    #[test]
    fn test_remove_finished_requests_keeps_loaded_state() {
        let mut world = World::new();
        let (vertex, fragment) = shaders(&mut world);
        let loaded = Material::request(&mut world, "brick", Duration::ZERO).entity();
        let missing = Material::request(&mut world, "nowhere", Duration::ZERO).entity();
        let mut source = MemorySource::new();
        source.insert("brick", MaterialDescription::new(vertex, fragment));

        MaterialLoader::new(LoaderConfig {
            remove_finished_requests: true,
            ..Default::default()
        })
        .update(&mut world, &mut source, Duration::ZERO)
        .unwrap();

        let loaded = Material::from_entity(&world, loaded).unwrap();
        assert_eq!(loaded.request_status(), None);
        assert!(loaded.is_loaded());

        let missing = Material::from_entity(&world, missing).unwrap();
        assert_eq!(missing.request_status(), None);
        assert!(!missing.is_loaded());
    }
}
