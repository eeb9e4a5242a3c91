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
//! World management
//!
//! The World owns the entity tree, every component and the simulation-wide
//! registry of global components. It drives the component lifecycle:
//! registration, initialization when the tree goes live, per-phase sweeps and
//! teardown on removal.
//!
//! # Removal during callbacks
//!
//! Removing an entity from inside a component callback (or a global handler
//! run through [`World::deferred`]) does not tear it down on the spot. The
//! request is queued and applied once the outermost callback returns, so a
//! sweep never observes half-removed entities. Removals requested from
//! outside any callback are applied immediately.

use crate::ecs::classifier::Classifier;
use crate::ecs::component::{Component, ComponentId, ComponentType, Cx, Phase};
use crate::ecs::entity::{Entity, EntityNode};
use crate::ecs::kind::{Kind, Scope, COMPONENT, GLOBAL_COMPONENT};
use crate::error::{EngineError, Result};
use crate::frame::FrameContext;
use crate::render::{NullRenderer, Renderer};
use log::debug;
use slotmap::SlotMap;
use std::collections::{HashMap, HashSet};

/// Storage slot for one component
struct ComponentSlot {
    owner: Entity,
    kind: &'static Kind,
    serial: u64,
    initialized: bool,
    /// Empty while the component runs one of its callbacks
    body: Option<Box<dyn Component>>,
}

/// The entity tree and its components
///
/// # Examples
///
/// ```
/// use altng::ecs::World;
///
/// let mut world = World::new();
/// let parent = world.spawn();
/// let child = world.create_entity(parent).unwrap();
/// assert_eq!(world.entity_count(), 3); // root included
///
/// world.remove_entity(parent).unwrap();
/// assert!(!world.is_alive(child));
/// assert!(world.remove_entity(world.root()).is_err());
/// ```
pub struct World {
    next_entity_id: u64,
    entity_generations: Vec<u32>,
    free_indices: Vec<u64>,
    nodes: HashMap<Entity, EntityNode>,
    root: Entity,
    slots: SlotMap<ComponentId, ComponentSlot>,
    globals: Classifier<ComponentId>,
    live: bool,
    dispatch_depth: usize,
    pending_removals: Vec<Entity>,
    next_serial: u64,
    renderer: Box<dyn Renderer>,
}

impl World {
    /// Create a world holding only the root entity
    pub fn new() -> Self {
        Self::with_renderer(Box::new(NullRenderer::new()))
    }

    /// Create a world drawing through `renderer`
    pub fn with_renderer(renderer: Box<dyn Renderer>) -> Self {
        let mut world = World {
            next_entity_id: 0,
            entity_generations: Vec::new(),
            free_indices: Vec::new(),
            nodes: HashMap::new(),
            root: Entity::new(0, 0),
            slots: SlotMap::with_key(),
            globals: Classifier::new(&GLOBAL_COMPONENT),
            live: false,
            dispatch_depth: 0,
            pending_removals: Vec::new(),
            next_serial: 0,
            renderer,
        };
        world.root = world.alloc_entity(None);
        world
    }

    fn alloc_entity(&mut self, parent: Option<Entity>) -> Entity {
        let id = match self.free_indices.pop() {
            Some(id) => id,
            None => {
                let id = self.next_entity_id;
                self.next_entity_id += 1;
                id
            }
        };

        if id as usize >= self.entity_generations.len() {
            self.entity_generations.resize(id as usize + 1, 0);
        }

        let generation = self.entity_generations[id as usize];
        let entity = Entity::new(id, generation);

        let mut node = EntityNode::new(parent);
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.insert(entity);
            // entities born under a live parent are live at once
            node.initialized = parent.initialized;
        }
        self.nodes.insert(entity, node);
        entity
    }

    /// The simulation root, parent of top-level entities
    pub fn root(&self) -> Entity {
        self.root
    }

    /// Check whether `start` has run
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Create an entity under `parent`
    ///
    /// Components registered on an entity created under a live parent are
    /// initialized as soon as they are registered.
    pub fn create_entity(&mut self, parent: Entity) -> Result<Entity> {
        if !self.is_alive(parent) {
            return Err(EngineError::UnknownEntity(parent));
        }
        let entity = self.alloc_entity(Some(parent));
        debug!("created {} under {}", entity, parent);
        Ok(entity)
    }

    /// Create an entity directly under the root
    pub fn spawn(&mut self) -> Entity {
        let entity = self.alloc_entity(Some(self.root));
        debug!("created {}", entity);
        entity
    }

    /// Register a component on `entity`
    pub fn add<C: Component>(&mut self, entity: Entity, component: C) -> Result<ComponentId> {
        self.register_component(entity, Box::new(component))
    }

    /// Register a boxed component on `entity`
    ///
    /// Fails if the entity already owns a component of the same exact kind,
    /// or of the same [`Component::family`].
    /// Runs [`Component::attach`], then [`Component::initialize`] when the
    /// entity is already live. Global components also join the world-wide
    /// registry.
    pub fn register_component(
        &mut self,
        entity: Entity,
        mut body: Box<dyn Component>,
    ) -> Result<ComponentId> {
        let kind = body.kind();
        if !kind.is_a(&COMPONENT) {
            return Err(EngineError::NotADescendant {
                kind: kind.name(),
                root: COMPONENT.name(),
            });
        }
        let family = body.family();
        self.ensure_vacant(entity, kind, family)?;

        let serial = self.next_serial;
        self.next_serial += 1;
        let id = self.slots.insert(ComponentSlot {
            owner: entity,
            kind,
            serial,
            initialized: false,
            body: None,
        });

        self.dispatch_depth += 1;
        let mut attached = body.attach(&mut Cx::new(self, entity, id));
        self.dispatch_depth -= 1;
        if attached.is_ok() {
            // attach may have registered siblings of its own
            attached = self.ensure_vacant(entity, kind, family);
        }
        if let Err(err) = attached {
            self.slots.remove(id);
            self.flush_removals();
            return Err(err);
        }

        let node = self
            .nodes
            .get_mut(&entity)
            .ok_or(EngineError::UnknownEntity(entity))?;
        node.components.push(id);
        node.classifier.register(kind, id)?;
        let live = node.initialized;
        if kind.scope() == Scope::Global {
            self.globals.register(kind, id)?;
        }
        if let Some(slot) = self.slots.get_mut(id) {
            slot.body = Some(body);
        }
        debug!("registered {} #{} on {}", kind.name(), serial, entity);

        if live {
            self.initialize_component(id)?;
        }
        self.flush_removals();
        Ok(id)
    }

    fn ensure_vacant(
        &self,
        entity: Entity,
        kind: &'static Kind,
        family: Option<&'static Kind>,
    ) -> Result<()> {
        let node = self
            .nodes
            .get(&entity)
            .ok_or(EngineError::UnknownEntity(entity))?;
        if !node.classifier.query_exact(kind).is_empty() {
            return Err(EngineError::DuplicateComponent {
                entity,
                kind: kind.name(),
            });
        }
        match family {
            Some(family) if node.classifier.count(family) > 0 => {
                Err(EngineError::DuplicateComponent {
                    entity,
                    kind: family.name(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Take the body of `id` out of its slot, run `f` on it and put it back
    fn with_body<R>(
        &mut self,
        id: ComponentId,
        f: impl FnOnce(&mut dyn Component, &mut Cx<'_>) -> R,
    ) -> Result<R> {
        let slot = self
            .slots
            .get_mut(id)
            .ok_or(EngineError::UnknownComponent(id))?;
        let owner = slot.owner;
        let mut body = slot.body.take().ok_or(EngineError::ComponentBusy {
            entity: owner,
            kind: slot.kind.name(),
        })?;

        self.dispatch_depth += 1;
        let out = f(body.as_mut(), &mut Cx::new(self, owner, id));
        self.dispatch_depth -= 1;

        if let Some(slot) = self.slots.get_mut(id) {
            slot.body = Some(body);
        }
        Ok(out)
    }

    fn initialize_component(&mut self, id: ComponentId) -> Result<()> {
        self.with_body(id, |body, cx| body.initialize(cx))??;
        if let Some(slot) = self.slots.get_mut(id) {
            slot.initialized = true;
        }
        Ok(())
    }

    /// Make the tree live, initializing every entity depth-first
    ///
    /// Calling it again has no effect.
    pub fn start(&mut self) -> Result<()> {
        if self.live {
            return Ok(());
        }
        self.live = true;
        self.dispatch_depth += 1;
        let result = self.initialize_tree(self.root);
        self.dispatch_depth -= 1;
        self.flush_removals();
        result
    }

    fn initialize_tree(&mut self, entity: Entity) -> Result<()> {
        let (components, children) = match self.nodes.get_mut(&entity) {
            Some(node) => {
                node.initialized = true;
                (node.components.clone(), node.children.iter().copied().collect::<Vec<_>>())
            }
            None => return Ok(()),
        };
        for id in components {
            let pending = self.slots.get(id).map_or(false, |slot| !slot.initialized);
            if pending {
                self.initialize_component(id)?;
            }
        }
        for child in children {
            self.initialize_tree(child)?;
        }
        Ok(())
    }

    /// Remove `entity` and its whole subtree
    ///
    /// Every initialized component in the subtree is terminated exactly once,
    /// components before children, before the entity is detached. The root
    /// can never be removed.
    pub fn remove_entity(&mut self, entity: Entity) -> Result<()> {
        if entity == self.root {
            return Err(EngineError::RootRemoval);
        }
        if !self.is_alive(entity) {
            return Err(EngineError::UnknownEntity(entity));
        }
        if self.dispatch_depth > 0 {
            if !self.pending_removals.contains(&entity) {
                debug!("deferring removal of {}", entity);
                self.pending_removals.push(entity);
            }
            return Ok(());
        }
        self.destroy(entity);
        self.flush_removals();
        Ok(())
    }

    /// Check whether `entity` is queued for removal
    pub fn is_removal_pending(&self, entity: Entity) -> bool {
        self.pending_removals.contains(&entity)
    }

    fn destroy(&mut self, entity: Entity) {
        self.dispatch_depth += 1;
        self.terminate_tree(entity);
        self.dispatch_depth -= 1;

        let parent = self.nodes.get(&entity).and_then(|node| node.parent);
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.shift_remove(&entity);
        }

        let mut doomed = vec![entity];
        let mut dead_components = HashSet::new();
        while let Some(current) = doomed.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                for id in node.components {
                    self.slots.remove(id);
                    dead_components.insert(id);
                }
                doomed.extend(node.children);
            }
            let index = current.index() as usize;
            if index < self.entity_generations.len() {
                self.entity_generations[index] = self.entity_generations[index].wrapping_add(1);
                self.free_indices.push(current.index());
            }
        }
        self.globals.purge(|id| dead_components.contains(id));
        debug!("removed {} ({} components)", entity, dead_components.len());
    }

    fn terminate_tree(&mut self, entity: Entity) {
        let (components, children) = match self.nodes.get(&entity) {
            Some(node) => (
                node.components.clone(),
                node.children.iter().copied().collect::<Vec<_>>(),
            ),
            None => return,
        };
        for id in components {
            let initialized = self.slots.get(id).map_or(false, |slot| slot.initialized);
            if initialized {
                // a busy body cannot be terminated; it is dropped with its slot
                let _ = self.with_body(id, |body, cx| body.terminate(cx));
            }
        }
        for child in children {
            self.terminate_tree(child);
        }
    }

    fn flush_removals(&mut self) {
        if self.dispatch_depth > 0 {
            return;
        }
        while !self.pending_removals.is_empty() {
            let pending = std::mem::take(&mut self.pending_removals);
            for entity in pending {
                if self.is_alive(entity) {
                    self.destroy(entity);
                }
            }
        }
    }

    /// Run `f` with entity removals deferred until it returns
    pub fn deferred<R>(&mut self, f: impl FnOnce(&mut World) -> R) -> R {
        self.dispatch_depth += 1;
        let out = f(self);
        self.dispatch_depth -= 1;
        self.flush_removals();
        out
    }

    /// Call `phase` on every live component, depth-first
    ///
    /// Within an entity, components run in registration order and before the
    /// entity's children. Entities and components added during the sweep are
    /// first visited by the next phase.
    pub fn run_phase(&mut self, phase: Phase, frame: &FrameContext) -> Result<()> {
        if !self.live {
            return Err(EngineError::NotStarted);
        }
        self.dispatch_depth += 1;
        let result = self.sweep(self.root, phase, frame);
        self.dispatch_depth -= 1;
        self.flush_removals();
        result
    }

    fn sweep(&mut self, entity: Entity, phase: Phase, frame: &FrameContext) -> Result<()> {
        let (components, children) = match self.nodes.get(&entity) {
            Some(node) => (
                node.components.clone(),
                node.children.iter().copied().collect::<Vec<_>>(),
            ),
            None => return Ok(()),
        };
        for id in components {
            let initialized = self.slots.get(id).map_or(false, |slot| slot.initialized);
            if initialized {
                self.with_body(id, |body, cx| body.update(phase, frame, cx))??;
            }
        }
        for child in children {
            self.sweep(child, phase, frame)?;
        }
        Ok(())
    }

    /// Check if an entity is alive
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.nodes.contains_key(&entity)
    }

    /// Get the number of alive entities, root included
    pub fn entity_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of stored components
    pub fn component_count(&self) -> usize {
        self.slots.len()
    }

    /// Parent of `entity`, `None` for the root or a dead entity
    pub fn parent(&self, entity: Entity) -> Option<Entity> {
        self.nodes.get(&entity).and_then(|node| node.parent)
    }

    /// Children of `entity` in creation order
    pub fn children(&self, entity: Entity) -> impl Iterator<Item = Entity> + '_ {
        self.nodes
            .get(&entity)
            .into_iter()
            .flat_map(|node| node.children.iter().copied())
    }

    /// Components of `entity` in registration order
    pub fn components_of(&self, entity: Entity) -> Result<&[ComponentId]> {
        self.nodes
            .get(&entity)
            .map(|node| node.components.as_slice())
            .ok_or(EngineError::UnknownEntity(entity))
    }

    /// Id of the unique component of `kind` (or a subkind) on `entity`
    pub fn component_id(&self, entity: Entity, kind: &'static Kind) -> Result<ComponentId> {
        let node = self
            .nodes
            .get(&entity)
            .ok_or(EngineError::UnknownEntity(entity))?;
        node.classifier.query_unique(kind).map_err(|err| match err {
            EngineError::NoInstance { kind } => EngineError::MissingComponent { entity, kind },
            EngineError::AmbiguousInstance { kind, count } => {
                EngineError::AmbiguousComponent { entity, kind, count }
            }
            other => other,
        })
    }

    /// Id of the component of `kind` on `entity`, if exactly one exists
    pub fn find_component(&self, entity: Entity, kind: &'static Kind) -> Option<ComponentId> {
        self.component_id(entity, kind).ok()
    }

    /// Entity owning `id`
    pub fn owner(&self, id: ComponentId) -> Result<Entity> {
        self.slots
            .get(id)
            .map(|slot| slot.owner)
            .ok_or(EngineError::UnknownComponent(id))
    }

    /// Exact kind of `id`
    pub fn kind_of(&self, id: ComponentId) -> Result<&'static Kind> {
        self.slots
            .get(id)
            .map(|slot| slot.kind)
            .ok_or(EngineError::UnknownComponent(id))
    }

    /// Registration serial of `id`, increasing across the world's lifetime
    pub fn serial(&self, id: ComponentId) -> Result<u64> {
        self.slots
            .get(id)
            .map(|slot| slot.serial)
            .ok_or(EngineError::UnknownComponent(id))
    }

    /// Borrow the component `id` as a `T`
    pub fn component<T: ComponentType>(&self, id: ComponentId) -> Result<&T> {
        let slot = self.slots.get(id).ok_or(EngineError::UnknownComponent(id))?;
        let body = slot.body.as_deref().ok_or(EngineError::ComponentBusy {
            entity: slot.owner,
            kind: slot.kind.name(),
        })?;
        body.as_any()
            .downcast_ref::<T>()
            .ok_or(EngineError::KindMismatch {
                kind: slot.kind.name(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Mutably borrow the component `id` as a `T`
    pub fn component_mut<T: ComponentType>(&mut self, id: ComponentId) -> Result<&mut T> {
        let slot = self
            .slots
            .get_mut(id)
            .ok_or(EngineError::UnknownComponent(id))?;
        let (owner, kind) = (slot.owner, slot.kind);
        let body = slot
            .body
            .as_deref_mut()
            .ok_or(EngineError::ComponentBusy {
                entity: owner,
                kind: kind.name(),
            })?;
        body.as_any_mut()
            .downcast_mut::<T>()
            .ok_or(EngineError::KindMismatch {
                kind: kind.name(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Borrow the unique `T` on `entity`
    pub fn get<T: ComponentType>(&self, entity: Entity) -> Result<&T> {
        let id = self.component_id(entity, T::base_kind())?;
        self.component(id)
    }

    /// Mutably borrow the unique `T` on `entity`
    pub fn get_mut<T: ComponentType>(&mut self, entity: Entity) -> Result<&mut T> {
        let id = self.component_id(entity, T::base_kind())?;
        self.component_mut(id)
    }

    /// Every live global component of `kind` or a subkind
    pub fn global_instances(&self, kind: &'static Kind) -> Vec<ComponentId> {
        self.globals.query_all(kind)
    }

    /// Immediate subkinds of `kind` that have been registered globally
    pub fn global_child_kinds(&self, kind: &'static Kind) -> Vec<&'static Kind> {
        self.globals.child_kinds(kind)
    }

    /// Global kinds that currently have at least one instance of their own
    pub fn live_global_kinds(&self) -> Vec<&'static Kind> {
        self.globals
            .descendant_kinds(&GLOBAL_COMPONENT)
            .into_iter()
            .filter(|kind| !self.globals.query_exact(kind).is_empty())
            .collect()
    }

    /// Swap the renderer before any component has drawn
    pub(crate) fn set_renderer(&mut self, renderer: Box<dyn Renderer>) {
        self.renderer = renderer;
    }

    /// The renderer components draw through
    pub fn renderer_mut(&mut self) -> &mut dyn Renderer {
        self.renderer.as_mut()
    }

    /// The renderer as its concrete type, if it is an `R`
    pub fn renderer_as<R: Renderer>(&self) -> Option<&R> {
        self.renderer.as_any().downcast_ref::<R>()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::kind::Kind;
    use std::any::Any;
    use std::cell::RefCell;
    use std::rc::Rc;

    static PROBE: Kind = Kind::derived("Probe", &COMPONENT);
    static GLOBAL_PROBE: Kind = Kind::derived("GlobalProbe", &GLOBAL_COMPONENT);
    static STRAY: Kind = Kind::root("Stray");

    type Log = Rc<RefCell<Vec<String>>>;

    struct Probe {
        kind: &'static Kind,
        tag: &'static str,
        log: Log,
        remove_on_update: Option<Entity>,
    }

    impl Probe {
        fn new(tag: &'static str, log: &Log) -> Self {
            Probe {
                kind: &PROBE,
                tag,
                log: log.clone(),
                remove_on_update: None,
            }
        }
    }

    impl Component for Probe {
        fn kind(&self) -> &'static Kind {
            self.kind
        }

        fn initialize(&mut self, _cx: &mut Cx<'_>) -> Result<()> {
            self.log.borrow_mut().push(format!("init {}", self.tag));
            Ok(())
        }

        fn update(&mut self, phase: Phase, _frame: &FrameContext, cx: &mut Cx<'_>) -> Result<()> {
            self.log.borrow_mut().push(format!("{} {}", phase, self.tag));
            if let Some(target) = self.remove_on_update.take() {
                cx.world_mut().remove_entity(target)?;
            }
            Ok(())
        }

        fn terminate(&mut self, _cx: &mut Cx<'_>) {
            self.log.borrow_mut().push(format!("term {}", self.tag));
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    impl ComponentType for Probe {
        fn base_kind() -> &'static Kind {
            &PROBE
        }
    }

    #[test]
    fn test_duplicate_component_rejected() {
        let log = Log::default();
        let mut world = World::new();
        let e = world.spawn();
        world.add(e, Probe::new("a", &log)).unwrap();
        let err = world.add(e, Probe::new("b", &log)).unwrap_err();
        assert_eq!(err, EngineError::DuplicateComponent { entity: e, kind: "Probe" });
        assert_eq!(world.component_count(), 1);
    }

    #[test]
    fn test_kind_outside_hierarchy_rejected() {
        let log = Log::default();
        let mut world = World::new();
        let e = world.spawn();
        let mut probe = Probe::new("a", &log);
        probe.kind = &STRAY;
        assert!(matches!(
            world.add(e, probe),
            Err(EngineError::NotADescendant { kind: "Stray", .. })
        ));
    }

    #[test]
    fn test_late_registration_initializes_immediately() {
        let log = Log::default();
        let mut world = World::new();
        let early = world.spawn();
        world.add(early, Probe::new("early", &log)).unwrap();
        assert!(log.borrow().is_empty());

        world.start().unwrap();
        let late = world.spawn();
        world.add(late, Probe::new("late", &log)).unwrap();
        assert_eq!(*log.borrow(), ["init early", "init late"]);
    }

    #[test]
    fn test_sweep_order_components_before_children() {
        let log = Log::default();
        let mut world = World::new();
        let parent = world.spawn();
        let child = world.create_entity(parent).unwrap();
        let sibling = world.spawn();
        world.add(child, Probe::new("child", &log)).unwrap();
        world.add(parent, Probe::new("parent", &log)).unwrap();
        world.add(sibling, Probe::new("sibling", &log)).unwrap();
        world.start().unwrap();
        log.borrow_mut().clear();

        world.run_phase(Phase::Move, &FrameContext::default()).unwrap();
        assert_eq!(*log.borrow(), ["move parent", "move child", "move sibling"]);
    }

    #[test]
    fn test_removal_during_sweep_is_deferred() {
        let log = Log::default();
        let mut world = World::new();
        let first = world.spawn();
        let second = world.spawn();
        let mut remover = Probe::new("first", &log);
        remover.remove_on_update = Some(second);
        world.add(first, remover).unwrap();
        world.add(second, Probe::new("second", &log)).unwrap();
        world.start().unwrap();
        log.borrow_mut().clear();

        world.run_phase(Phase::Update, &FrameContext::default()).unwrap();
        assert_eq!(*log.borrow(), ["update first", "update second", "term second"]);
        assert!(!world.is_alive(second));
        assert!(!world.is_removal_pending(second));
    }

    #[test]
    fn test_never_initialized_components_are_not_terminated() {
        let log = Log::default();
        let mut world = World::new();
        let e = world.spawn();
        world.add(e, Probe::new("a", &log)).unwrap();
        world.remove_entity(e).unwrap();
        assert!(log.borrow().is_empty());
        assert_eq!(world.component_count(), 0);
    }

    #[test]
    fn test_lookup_errors() {
        let log = Log::default();
        let mut world = World::new();
        let e = world.spawn();
        assert_eq!(
            world.get::<Probe>(e).err(),
            Some(EngineError::MissingComponent { entity: e, kind: "Probe" })
        );
        let id = world.add(e, Probe::new("a", &log)).unwrap();
        assert_eq!(world.get::<Probe>(e).unwrap().tag, "a");
        assert_eq!(world.owner(id), Ok(e));

        world.remove_entity(e).unwrap();
        assert_eq!(world.owner(id), Err(EngineError::UnknownComponent(id)));
        assert_eq!(world.remove_entity(e), Err(EngineError::UnknownEntity(e)));
    }

    #[test]
    fn test_globals_purged_on_removal() {
        let log = Log::default();
        let mut world = World::new();
        let e = world.spawn();
        let mut probe = Probe::new("g", &log);
        probe.kind = &GLOBAL_PROBE;
        let id = world.add(e, probe).unwrap();
        assert_eq!(world.global_instances(&GLOBAL_COMPONENT), vec![id]);
        assert_eq!(world.live_global_kinds().len(), 1);

        world.remove_entity(e).unwrap();
        assert!(world.global_instances(&GLOBAL_COMPONENT).is_empty());
        assert!(world.live_global_kinds().is_empty());
    }

    #[test]
    fn test_generation_bumped_on_removal() {
        let mut world = World::new();
        let e = world.spawn();
        world.remove_entity(e).unwrap();
        let again = Entity::new(e.index(), e.generation());
        assert!(!world.is_alive(again));

        let reused = world.spawn();
        assert_eq!(reused.index(), e.index());
        assert_eq!(reused.generation(), e.generation() + 1);
        assert!(world.is_alive(reused));
        assert!(!world.is_alive(e));
    }

    #[test]
    fn test_run_phase_requires_start() {
        let mut world = World::new();
        assert_eq!(
            world.run_phase(Phase::Draw, &FrameContext::default()),
            Err(EngineError::NotStarted)
        );
    }
}
