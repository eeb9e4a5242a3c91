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
//! Engine error types
//!
//! Every error here is a configuration or numeric failure: it means the scene
//! was set up wrongly, not that some runtime data was unlucky. The simulation
//! stops on the first one it sees and hands it back to the host.

use crate::ecs::{ComponentId, Entity};
use thiserror::Error;

/// Errors raised by the entity tree, the classifier and the physics layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// An entity already owns a component of this exact kind
    #[error("{entity} already has a component of kind {kind}")]
    DuplicateComponent {
        /// Owning entity
        entity: Entity,
        /// Offending kind
        kind: &'static str,
    },

    /// A required unique component is absent from an entity
    #[error("{entity} has no component of kind {kind}")]
    MissingComponent {
        /// Queried entity
        entity: Entity,
        /// Requested kind
        kind: &'static str,
    },

    /// A unique component lookup matched several instances on one entity
    #[error("{entity} has {count} components matching kind {kind}, expected exactly one")]
    AmbiguousComponent {
        /// Queried entity
        entity: Entity,
        /// Requested kind
        kind: &'static str,
        /// Number of matches
        count: usize,
    },

    /// A classifier holds no instance of the requested kind
    #[error("no instance registered for kind {kind}")]
    NoInstance {
        /// Requested kind
        kind: &'static str,
    },

    /// A classifier holds several instances where one was expected
    #[error("{count} instances registered for kind {kind}, expected exactly one")]
    AmbiguousInstance {
        /// Requested kind
        kind: &'static str,
        /// Number of matches
        count: usize,
    },

    /// A kind does not descend from the root a classifier was built for
    #[error("kind {kind} does not descend from {root}")]
    NotADescendant {
        /// Offending kind
        kind: &'static str,
        /// Root kind of the classifier
        root: &'static str,
    },

    /// The simulation root entity can never be removed
    #[error("the root entity cannot be removed")]
    RootRemoval,

    /// The entity handle is stale or was never created by this world
    #[error("{0} is not alive")]
    UnknownEntity(Entity),

    /// The component id is stale or was never issued by this world
    #[error("component {0:?} does not exist")]
    UnknownComponent(ComponentId),

    /// The component is executing a callback and cannot be borrowed again
    #[error("component of kind {kind} on {entity} is busy running a callback")]
    ComponentBusy {
        /// Owning entity
        entity: Entity,
        /// Kind of the busy component
        kind: &'static str,
    },

    /// A kind resolved to a component of another concrete type
    #[error("component of kind {kind} is not a {expected}")]
    KindMismatch {
        /// Kind stored in the slot
        kind: &'static str,
        /// Rust type the caller asked for
        expected: &'static str,
    },

    /// A global handler was registered twice for the same kind and phase
    #[error("a {phase} handler is already registered for kind {kind}")]
    DuplicateHandler {
        /// Kind the handler targets
        kind: &'static str,
        /// Phase name
        phase: &'static str,
    },

    /// A constructor parameter is out of its valid range
    #[error("invalid {name}: {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// A computation produced NaN or an infinity
    #[error("non-finite result in {0}")]
    NonFinite(&'static str),

    /// The simulation was ticked before `start`
    #[error("simulation is not running")]
    NotStarted,
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let entity = Entity::new(3, 1);
        let err = EngineError::DuplicateComponent { entity, kind: "Motion" };
        let text = err.to_string();
        assert!(text.contains("Motion"));
        assert!(text.contains("Entity(3"));

        let err = EngineError::NonFinite("normalize");
        assert_eq!(err.to_string(), "non-finite result in normalize");
    }
}
