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
//! Component kinds
//!
//! Every component reports a [`Kind`]: a statically declared descriptor with a
//! name and an optional parent kind. Kinds form the hierarchy the
//! [`Classifier`](crate::ecs::Classifier) indexes instances by, so a query for
//! a kind also yields instances of every kind declared beneath it.
//!
//! Kinds are compared by address. Declare each one as a `static`, never as a
//! `const`, so that it has exactly one address.
//!
//! # Example
//!
//! ```
//! use altng::ecs::{Kind, COMPONENT};
//!
//! static SENSOR: Kind = Kind::derived("Sensor", &COMPONENT);
//! static SONAR: Kind = Kind::derived("Sonar", &SENSOR);
//!
//! assert!(SONAR.is_a(&COMPONENT));
//! assert!(!SENSOR.is_a(&SONAR));
//! ```

use std::fmt;

/// Root of every component kind
pub static COMPONENT: Kind = Kind::root("Component");

/// Marker for components tracked by the simulation-wide registry
///
/// Kinds declared beneath this one are enumerated by cross-entity phase
/// handlers (see [`Scheduler`](crate::ecs::Scheduler)).
pub static GLOBAL_COMPONENT: Kind = Kind::derived("GlobalComponent", &COMPONENT);

/// Whether a component is reachable only through its entity or also globally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Accessed through the owning entity only
    Local,
    /// Also registered with the simulation-wide classifier
    Global,
}

/// Statically declared component kind
pub struct Kind {
    name: &'static str,
    parent: Option<&'static Kind>,
}

impl Kind {
    /// Declare a kind without a parent
    pub const fn root(name: &'static str) -> Self {
        Kind { name, parent: None }
    }

    /// Declare a kind beneath `parent`
    pub const fn derived(name: &'static str, parent: &'static Kind) -> Self {
        Kind {
            name,
            parent: Some(parent),
        }
    }

    /// Human readable name, used in diagnostics
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Immediate parent kind
    pub fn parent(&self) -> Option<&'static Kind> {
        self.parent
    }

    /// Identity of this kind
    pub fn id(&'static self) -> KindId {
        KindId(self as *const Kind as usize)
    }

    /// This kind followed by its ancestors, child to parent
    pub fn ancestors(&'static self) -> impl Iterator<Item = &'static Kind> {
        std::iter::successors(Some(self), |kind| kind.parent)
    }

    /// Check whether this kind is `other` or declared beneath it
    pub fn is_a(&'static self, other: &'static Kind) -> bool {
        self.ancestors().any(|kind| std::ptr::eq(kind, other))
    }

    /// Global scope for kinds beneath [`GLOBAL_COMPONENT`], local otherwise
    pub fn scope(&'static self) -> Scope {
        if self.is_a(&GLOBAL_COMPONENT) {
            Scope::Global
        } else {
            Scope::Local
        }
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kind({})", self.name)
    }
}

/// Hashable identity of a [`Kind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindId(usize);
