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
//! Entity-component core
//!
//! This module provides the foundational architecture including:
//! - A tree of entities, each owning an ordered list of components
//! - Statically declared component kinds and a kind-indexed registry
//! - The component lifecycle (attach, initialize, per-phase update, terminate)
//! - Cross-entity phase handlers for global components

mod classifier;
mod component;
mod entity;
mod kind;
mod scheduler;
mod world;

pub use classifier::Classifier;
pub use component::{Component, ComponentId, ComponentType, Cx, Phase};
pub use entity::Entity;
pub use kind::{Kind, KindId, Scope, COMPONENT, GLOBAL_COMPONENT};
pub use scheduler::{GlobalHandler, Scheduler};
pub use world::World;
