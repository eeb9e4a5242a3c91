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
//! Pointer input
//!
//! The host converts its native pointer events to world space and pushes them
//! into an [`InputQueue`]. The queue keeps at most one event per
//! [`PointerKind`]: a second event of the same kind before the next frame
//! replaces the first. Each frame takes the whole snapshot as a
//! [`FrameInput`] and leaves the queue empty.

use crate::math::Vec2;
use log::trace;

/// Kind of pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Button pressed
    Down,
    /// Pointer moved
    Move,
    /// Button released
    Up,
    /// Press and release at the same place
    Click,
}

/// Modifier keys held during the event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Control key
    pub ctrl: bool,
    /// Shift key
    pub shift: bool,
    /// Alt key
    pub alt: bool,
}

/// Host event data passed through untouched
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawPointer {
    /// Button index, 0 being the primary button
    pub button: u8,
    /// Held modifier keys
    pub modifiers: Modifiers,
    /// Position in screen pixels
    pub screen: Vec2,
}

/// The pointer-down an event belongs to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerDown {
    /// World position of the press
    pub world_pos: Vec2,
    /// Host data of the press
    pub raw: RawPointer,
}

/// Pointer event in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Event kind
    pub kind: PointerKind,
    /// Pointer position in world units
    pub world_pos: Vec2,
    /// Host event data
    pub raw: RawPointer,
    /// Most recent pointer-down, for move, up and click events
    pub related_down: Option<PointerDown>,
}

impl PointerEvent {
    /// Create an event with default host data
    pub fn new(kind: PointerKind, world_pos: Vec2) -> Self {
        PointerEvent {
            kind,
            world_pos,
            raw: RawPointer::default(),
            related_down: None,
        }
    }

    /// Replace the host data
    pub fn with_raw(mut self, raw: RawPointer) -> Self {
        self.raw = raw;
        self
    }

    /// Distance travelled since the related pointer-down, if any
    pub fn drag_distance(&self) -> Option<f64> {
        self.related_down.map(|down| down.world_pos.dist(self.world_pos))
    }
}

/// One frame's worth of pointer input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Latest pointer-down
    pub down: Option<PointerEvent>,
    /// Latest pointer-move
    pub moved: Option<PointerEvent>,
    /// Latest pointer-up
    pub up: Option<PointerEvent>,
    /// Latest click
    pub click: Option<PointerEvent>,
}

impl FrameInput {
    /// Check whether no event arrived
    pub fn is_empty(&self) -> bool {
        self.down.is_none() && self.moved.is_none() && self.up.is_none() && self.click.is_none()
    }

    /// Event of the given kind
    pub fn get(&self, kind: PointerKind) -> Option<&PointerEvent> {
        match kind {
            PointerKind::Down => self.down.as_ref(),
            PointerKind::Move => self.moved.as_ref(),
            PointerKind::Up => self.up.as_ref(),
            PointerKind::Click => self.click.as_ref(),
        }
    }

    fn slot_mut(&mut self, kind: PointerKind) -> &mut Option<PointerEvent> {
        match kind {
            PointerKind::Down => &mut self.down,
            PointerKind::Move => &mut self.moved,
            PointerKind::Up => &mut self.up,
            PointerKind::Click => &mut self.click,
        }
    }
}

/// Buffer between the host's event stream and the frame loop
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: FrameInput,
    last_down: Option<PointerDown>,
}

impl InputQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event, replacing any pending event of the same kind
    ///
    /// Move, up and click events without a related pointer-down are linked
    /// to the latest pointer-down seen by this queue.
    pub fn push(&mut self, mut event: PointerEvent) {
        if event.kind == PointerKind::Down {
            self.last_down = Some(PointerDown {
                world_pos: event.world_pos,
                raw: event.raw,
            });
        } else if event.related_down.is_none() {
            event.related_down = self.last_down;
        }

        let slot = self.pending.slot_mut(event.kind);
        if slot.is_some() {
            trace!("dropping superseded {:?} event", event.kind);
        }
        *slot = Some(event);
    }

    /// Take the pending snapshot, leaving the queue empty
    pub fn take(&mut self) -> FrameInput {
        std::mem::take(&mut self.pending)
    }

    /// Check whether any event is pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
