// Copyright 2025 John Brosnihan
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
//! Entity handles and tree nodes
//!
//! An [`Entity`] is a generational handle into the world's entity tree. The
//! node behind it owns an ordered component list and an ordered set of child
//! entities; the world owns every node.

use crate::ecs::classifier::Classifier;
use crate::ecs::component::ComponentId;
use crate::ecs::kind::COMPONENT;
use indexmap::IndexSet;
use std::fmt;

/// Generational handle to a node of the entity tree
///
/// Handles of removed entities never compare equal to handles issued later,
/// even when the slot index is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    index: u64,
    generation: u32,
}

impl Entity {
    /// Create a handle from a raw index and generation
    pub fn new(index: u64, generation: u32) -> Self {
        Entity { index, generation }
    }

    /// Slot index of this entity
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Generation of the slot when this handle was issued
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.index, self.generation)
    }
}

/// Tree node owned by the world for each live entity
pub(crate) struct EntityNode {
    pub(crate) parent: Option<Entity>,
    /// Components in registration order
    pub(crate) components: Vec<ComponentId>,
    /// Per-entity index used for unique lookups by kind
    pub(crate) classifier: Classifier<ComponentId>,
    pub(crate) children: IndexSet<Entity>,
    pub(crate) initialized: bool,
}

impl EntityNode {
    pub(crate) fn new(parent: Option<Entity>) -> Self {
        EntityNode {
            parent,
            components: Vec::new(),
            classifier: Classifier::new(&COMPONENT),
            children: IndexSet::new(),
            initialized: false,
        }
    }
}
