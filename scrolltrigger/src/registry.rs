use alloc::vec::Vec;

use crate::state::FrameState;
use crate::types::{StateChange, ZoneId, ZoneState};
use crate::zone::{TriggerZone, ZoneOptions};

/// Holds registered trigger zones and recomputes their states on demand.
///
/// Zones are evaluated in registration order, which is also the order their
/// effects are emitted in: when two zones drive the same target, the
/// last-registered one wins.
#[derive(Clone, Debug, Default)]
pub struct TriggerRegistry {
    zones: Vec<TriggerZone>,
    next_id: u64,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn contains(&self, id: ZoneId) -> bool {
        self.zone(id).is_some()
    }

    pub fn register(&mut self, options: ZoneOptions) -> ZoneId {
        let id = ZoneId(self.next_id);
        self.next_id += 1;
        sdebug!(
            id = id.0,
            element_top = options.element_top,
            duration = options.duration,
            "TriggerRegistry::register"
        );
        self.zones.push(TriggerZone::from_options(id, options));
        id
    }

    /// Removes a zone. Returns `false` for unknown ids.
    ///
    /// Note: [`crate::Engine::unregister_zone`] additionally emits the leave
    /// effects of a still-active zone; prefer it when driving a document.
    pub fn unregister(&mut self, id: ZoneId) -> bool {
        self.take(id).is_some()
    }

    pub(crate) fn take(&mut self, id: ZoneId) -> Option<TriggerZone> {
        let index = self.zones.iter().position(|z| z.id == id)?;
        Some(self.zones.remove(index))
    }

    pub(crate) fn zone(&self, id: ZoneId) -> Option<&TriggerZone> {
        self.zones.iter().find(|z| z.id == id)
    }

    fn zone_mut(&mut self, id: ZoneId) -> Option<&mut TriggerZone> {
        self.zones.iter_mut().find(|z| z.id == id)
    }

    /// Updates the document position of a zone's trigger element (after the
    /// host relaid out the page). Returns `false` for unknown ids.
    pub fn set_element_top(&mut self, id: ZoneId, element_top: i64) -> bool {
        match self.zone_mut(id) {
            Some(zone) => {
                zone.element_top = element_top;
                true
            }
            None => false,
        }
    }

    /// Marks a zone's trigger element as removed from (or restored to) the
    /// document. Detached zones are silently skipped during evaluation.
    pub fn set_detached(&mut self, id: ZoneId, detached: bool) -> bool {
        match self.zone_mut(id) {
            Some(zone) => {
                zone.detached = detached;
                true
            }
            None => false,
        }
    }

    pub fn is_detached(&self, id: ZoneId) -> bool {
        self.zone(id).is_some_and(|z| z.detached)
    }

    /// Committed state of a zone, as of the last evaluation.
    pub fn zone_state(&self, id: ZoneId) -> Option<ZoneState> {
        self.zone(id).map(|z| z.state)
    }

    /// Scroll offset at which a zone activates, for the given viewport height.
    pub fn zone_start(&self, id: ZoneId, viewport_height: u32) -> Option<i64> {
        self.zone(id).map(|z| z.start(viewport_height))
    }

    /// Recomputes every zone's state from the absolute scroll offset and emits
    /// a [`StateChange`] per zone whose state differs from the committed one.
    ///
    /// Idempotent: evaluating the same frame twice emits nothing the second
    /// time.
    pub fn evaluate(&mut self, frame: FrameState, mut emit: impl FnMut(StateChange)) {
        for zone in &mut self.zones {
            if zone.detached {
                continue;
            }
            let next = zone.state_at(frame.scroll.offset, frame.viewport.height);
            if next == zone.state {
                continue;
            }
            strace!(
                id = zone.id.0,
                from = ?zone.state,
                to = ?next,
                "zone state change"
            );
            let change = StateChange {
                zone: zone.id,
                from: zone.state,
                to: next,
            };
            zone.state = next;
            emit(change);
        }
    }
}
