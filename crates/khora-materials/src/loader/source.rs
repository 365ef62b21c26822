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

use std::collections::{HashMap, HashSet};

use super::MaterialDescription;

/// The answer of a [`MaterialSource`] for one address.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch {
    /// The material is available.
    Ready(MaterialDescription),
    /// The material exists but is not available yet. Ask again next update.
    Pending,
    /// Nothing is known under this address.
    Missing,
}

/// A provider of material descriptions, keyed by address.
///
/// This is the boundary between the loader and whatever storage backs material
/// addresses. Implementations are polled once per update for every pending
/// request and must not block: work in progress is reported as
/// [`Fetch::Pending`].
pub trait MaterialSource {
    /// Resolves `address`.
    fn fetch(&mut self, address: &str) -> Fetch;
}

/// An in-memory [`MaterialSource`].
#[derive(Debug, Default)]
pub struct MemorySource {
    materials: HashMap<String, MaterialDescription>,
    pending: HashSet<String>,
}

impl MemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `address` resolve to `description`.
    pub fn insert(&mut self, address: impl Into<String>, description: MaterialDescription) {
        let address = address.into();
        self.pending.remove(&address);
        self.materials.insert(address, description);
    }

    /// Makes `address` report as pending until it is inserted or removed.
    pub fn mark_pending(&mut self, address: impl Into<String>) {
        self.pending.insert(address.into());
    }

    /// Forgets `address`.
    pub fn remove(&mut self, address: &str) -> Option<MaterialDescription> {
        self.pending.remove(address);
        self.materials.remove(address)
    }

    /// The number of ready materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Returns `true` if no material is ready.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl MaterialSource for MemorySource {
    fn fetch(&mut self, address: &str) -> Fetch {
        if let Some(description) = self.materials.get(address) {
            Fetch::Ready(*description)
        } else if self.pending.contains(address) {
            Fetch::Pending
        } else {
            Fetch::Missing
        }
    }
}

impl<S: MaterialSource + ?Sized> MaterialSource for &mut S {
    fn fetch(&mut self, address: &str) -> Fetch {
        (**self).fetch(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hecs::World;

    #[test]
    fn test_memory_source_states() {
        let mut world = World::new();
        let shader = world.spawn(());
        let mut source = MemorySource::new();

        assert_eq!(source.fetch("brick"), Fetch::Missing);

        source.mark_pending("brick");
        assert_eq!(source.fetch("brick"), Fetch::Pending);

        let description = MaterialDescription::new(shader, shader);
        source.insert("brick", description);
        assert_eq!(source.fetch("brick"), Fetch::Ready(description));
        assert_eq!(source.len(), 1);

        assert!(source.remove("brick").is_some());
        assert_eq!(source.fetch("brick"), Fetch::Missing);
        assert!(source.is_empty());
    }
}
