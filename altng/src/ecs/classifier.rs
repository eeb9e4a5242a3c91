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
//! Kind-indexed instance registry
//!
//! A [`Classifier`] stores instances under the exact [`Kind`] they were
//! registered with and answers queries over whole subtrees of the kind
//! hierarchy. Nodes are created lazily: registering an instance of a deep kind
//! creates one node for every kind between it and the classifier's root.
//!
//! Individual instances are never removed. The owning world drops every
//! instance of a torn-down entity in one [`Classifier::purge`] pass.

use crate::ecs::kind::{Kind, KindId};
use crate::error::{EngineError, Result};
use indexmap::IndexSet;
use std::collections::HashMap;

/// One node per kind seen so far
struct KindNode<T> {
    kind: &'static Kind,
    /// Immediate subkinds, in first-seen order
    children: IndexSet<KindId>,
    /// Instances registered with exactly this kind
    instances: Vec<T>,
}

impl<T> KindNode<T> {
    fn new(kind: &'static Kind) -> Self {
        KindNode {
            kind,
            children: IndexSet::new(),
            instances: Vec::new(),
        }
    }
}

/// Registry of instances indexed by kind, queried by kind subtree
///
/// # Examples
///
/// ```
/// use altng::ecs::{Classifier, Kind, COMPONENT};
///
/// static SHAPE: Kind = Kind::derived("Shape", &COMPONENT);
/// static DISC: Kind = Kind::derived("Disc", &SHAPE);
///
/// let mut classifier = Classifier::new(&COMPONENT);
/// classifier.register(&SHAPE, 1).unwrap();
/// classifier.register(&DISC, 2).unwrap();
///
/// assert_eq!(classifier.query_all(&SHAPE), vec![1, 2]);
/// assert_eq!(classifier.query_unique(&DISC), Ok(2));
/// assert!(classifier.query_unique(&SHAPE).is_err());
/// ```
pub struct Classifier<T> {
    root: &'static Kind,
    nodes: HashMap<KindId, KindNode<T>>,
}

impl<T: Copy + PartialEq> Classifier<T> {
    /// Create an empty classifier accepting kinds beneath `root`
    pub fn new(root: &'static Kind) -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(root.id(), KindNode::new(root));
        Classifier { root, nodes }
    }

    /// Root kind of this classifier
    pub fn root(&self) -> &'static Kind {
        self.root
    }

    /// Store `instance` under `kind`
    ///
    /// Fails with [`EngineError::NotADescendant`] when `kind` is not the root
    /// or one of its descendants.
    pub fn register(&mut self, kind: &'static Kind, instance: T) -> Result<()> {
        if !kind.is_a(self.root) {
            return Err(EngineError::NotADescendant {
                kind: kind.name(),
                root: self.root.name(),
            });
        }

        let mut child: Option<KindId> = None;
        for ancestor in kind.ancestors() {
            let node = self
                .nodes
                .entry(ancestor.id())
                .or_insert_with(|| KindNode::new(ancestor));
            if let Some(child) = child {
                if !node.children.insert(child) {
                    // the rest of the chain is already linked
                    break;
                }
            }
            if std::ptr::eq(ancestor, self.root) {
                break;
            }
            child = Some(ancestor.id());
        }

        if let Some(node) = self.nodes.get_mut(&kind.id()) {
            node.instances.push(instance);
        }
        Ok(())
    }

    /// Every instance of `kind` or any kind beneath it
    ///
    /// Instances of `kind` itself come first, then each subkind in the order
    /// it was first registered. An unknown kind yields an empty list.
    pub fn query_all(&self, kind: &'static Kind) -> Vec<T> {
        let mut out = Vec::new();
        self.collect(kind.id(), &mut out);
        out
    }

    fn collect(&self, id: KindId, out: &mut Vec<T>) {
        if let Some(node) = self.nodes.get(&id) {
            out.extend_from_slice(&node.instances);
            for child in &node.children {
                self.collect(*child, out);
            }
        }
    }

    /// Instances registered with exactly `kind`
    pub fn query_exact(&self, kind: &'static Kind) -> &[T] {
        self.nodes
            .get(&kind.id())
            .map(|node| node.instances.as_slice())
            .unwrap_or(&[])
    }

    /// The single instance of `kind` or a kind beneath it
    pub fn query_unique(&self, kind: &'static Kind) -> Result<T> {
        let all = self.query_all(kind);
        match all.as_slice() {
            [one] => Ok(*one),
            [] => Err(EngineError::NoInstance { kind: kind.name() }),
            many => Err(EngineError::AmbiguousInstance {
                kind: kind.name(),
                count: many.len(),
            }),
        }
    }

    /// Number of instances of `kind` or a kind beneath it
    pub fn count(&self, kind: &'static Kind) -> usize {
        let mut count = 0;
        let mut stack = vec![kind.id()];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(&id) {
                count += node.instances.len();
                stack.extend(node.children.iter().copied());
            }
        }
        count
    }

    /// Immediate subkinds of `kind` seen so far
    pub fn child_kinds(&self, kind: &'static Kind) -> Vec<&'static Kind> {
        self.nodes
            .get(&kind.id())
            .map(|node| {
                node.children
                    .iter()
                    .filter_map(|id| self.nodes.get(id).map(|child| child.kind))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `kind` and every kind beneath it seen so far, parents before children
    pub fn descendant_kinds(&self, kind: &'static Kind) -> Vec<&'static Kind> {
        let mut out = Vec::new();
        self.collect_kinds(kind.id(), &mut out);
        out
    }

    fn collect_kinds(&self, id: KindId, out: &mut Vec<&'static Kind>) {
        if let Some(node) = self.nodes.get(&id) {
            out.push(node.kind);
            for child in &node.children {
                self.collect_kinds(*child, out);
            }
        }
    }

    /// Drop every instance for which `dead` returns true
    ///
    /// Kind nodes are kept so that first-seen order stays stable.
    pub fn purge(&mut self, mut dead: impl FnMut(&T) -> bool) {
        for node in self.nodes.values_mut() {
            node.instances.retain(|instance| !dead(instance));
        }
    }

    /// Total number of stored instances
    pub fn len(&self) -> usize {
        self.nodes.values().map(|node| node.instances.len()).sum()
    }

    /// Check whether no instance is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::kind::{COMPONENT, GLOBAL_COMPONENT};

    static BODY: Kind = Kind::derived("Body", &GLOBAL_COMPONENT);
    static BALL: Kind = Kind::derived("Ball", &BODY);
    static WALL: Kind = Kind::derived("Wall", &BODY);
    static LOCAL: Kind = Kind::derived("Local", &COMPONENT);

    #[test]
    fn test_register_outside_root_fails() {
        let mut classifier = Classifier::new(&GLOBAL_COMPONENT);
        let err = classifier.register(&LOCAL, 1u32).unwrap_err();
        assert_eq!(
            err,
            EngineError::NotADescendant {
                kind: "Local",
                root: "GlobalComponent"
            }
        );
    }

    #[test]
    fn test_unknown_kind_is_empty_not_error() {
        let classifier: Classifier<u32> = Classifier::new(&COMPONENT);
        assert!(classifier.query_all(&BALL).is_empty());
        assert!(classifier.query_exact(&BALL).is_empty());
        assert_eq!(classifier.count(&BALL), 0);
    }

    #[test]
    fn test_query_unique_reports_count() {
        let mut classifier = Classifier::new(&COMPONENT);
        classifier.register(&BALL, 1u32).unwrap();
        classifier.register(&WALL, 2u32).unwrap();

        assert_eq!(classifier.query_unique(&BALL), Ok(1));
        assert_eq!(
            classifier.query_unique(&BODY),
            Err(EngineError::AmbiguousInstance { kind: "Body", count: 2 })
        );
        assert_eq!(
            classifier.query_unique(&LOCAL),
            Err(EngineError::NoInstance { kind: "Local" })
        );
    }

    #[test]
    fn test_child_kinds_in_first_seen_order() {
        let mut classifier = Classifier::new(&COMPONENT);
        classifier.register(&WALL, 1u32).unwrap();
        classifier.register(&BALL, 2u32).unwrap();
        classifier.register(&WALL, 3u32).unwrap();

        let names: Vec<_> = classifier.child_kinds(&BODY).iter().map(|k| k.name()).collect();
        assert_eq!(names, ["Wall", "Ball"]);
        assert_eq!(classifier.query_all(&BODY), vec![1, 3, 2]);

        let names: Vec<_> = classifier
            .descendant_kinds(&COMPONENT)
            .iter()
            .map(|k| k.name())
            .collect();
        assert_eq!(names, ["Component", "GlobalComponent", "Body", "Wall", "Ball"]);
    }

    #[test]
    fn test_purge_keeps_structure() {
        let mut classifier = Classifier::new(&GLOBAL_COMPONENT);
        classifier.register(&BALL, 1u32).unwrap();
        classifier.register(&BALL, 2u32).unwrap();
        classifier.purge(|i| *i == 1);

        assert_eq!(classifier.query_all(&BODY), vec![2]);
        assert_eq!(classifier.child_kinds(&BODY).len(), 1);
        assert_eq!(classifier.len(), 1);
        classifier.purge(|_| true);
        assert!(classifier.is_empty());
    }
}
