use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;
use core::cmp;

use crate::curtain::Curtain;
use crate::effects::{bind_change, bind_leave, Effect};
use crate::options::EngineOptions;
use crate::registry::TriggerRegistry;
use crate::state::{FrameState, ScrollState, ViewportState};
use crate::types::{ScrollDirection, StateChange, ZoneId, ZoneState};
use crate::zone::ZoneOptions;

/// A headless scroll-effects engine.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects; elements are opaque [`crate::NodeId`]s.
/// - Your adapter drives it by feeding viewport heights and scroll offsets.
/// - Side effects come out as an ordered stream of [`Effect`] commands via
///   `flush_effects`.
///
/// Control flow per frame: update viewport/scroll state (coalesced with
/// `batch_update` or the `apply_*_event` helpers), then call `flush_effects`
/// once to drain install-time effects and zone transitions.
#[derive(Clone, Debug)]
pub struct Engine {
    options: EngineOptions,
    viewport_height: u32,
    scroll_offset: u64,
    is_scrolling: bool,
    scroll_direction: Option<ScrollDirection>,
    last_scroll_event_ms: Option<u64>,

    registry: TriggerRegistry,
    pub(crate) curtains: Vec<Curtain>,
    /// Install-time and cleanup effects waiting for the next flush.
    pub(crate) pending: Vec<Effect>,
    /// Scratch buffer reused across flushes.
    changes: Vec<StateChange>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl Engine {
    /// Creates a new engine from options.
    ///
    /// If `options.initial_viewport` and/or `options.initial_offset` are set,
    /// those values are applied immediately.
    pub fn new(options: EngineOptions) -> Self {
        let viewport = options.initial_viewport.unwrap_or_default();
        let scroll_offset = options.initial_offset.resolve();
        sdebug!(
            enabled = options.enabled,
            viewport_height = viewport.height,
            scroll_offset,
            "Engine::new"
        );
        Self {
            viewport_height: viewport.height,
            scroll_offset,
            is_scrolling: false,
            scroll_direction: None,
            last_scroll_event_ms: None,
            registry: TriggerRegistry::new(),
            curtains: Vec::new(),
            pending: Vec::new(),
            changes: Vec::new(),
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&Engine, bool) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    pub fn set_use_scrollend_event(&mut self, use_scrollend_event: bool) {
        self.options.use_scrollend_event = use_scrollend_event;
        self.notify();
    }

    pub fn set_is_scrolling_reset_delay_ms(&mut self, delay_ms: u64) {
        self.options.is_scrolling_reset_delay_ms = delay_ms;
        self.notify();
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self, self.is_scrolling);
        }
    }

    pub(crate) fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// This is recommended for UI adapters: on a typical frame, you might
    /// update the viewport height, scroll offset, and scrolling state
    /// together. Without batching, each setter may trigger `on_change`, which
    /// can be expensive if the callback drives rendering.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn enabled(&self) -> bool {
        self.options.enabled
    }

    /// Enables/disables the engine.
    ///
    /// A disabled engine accepts registrations and state updates but emits no
    /// effects; pending effects are held until it is re-enabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.options.enabled == enabled {
            return;
        }
        self.options.enabled = enabled;
        if !enabled {
            self.is_scrolling = false;
            self.scroll_direction = None;
            self.last_scroll_event_ms = None;
        }
        self.notify();
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    pub fn set_is_scrolling(&mut self, is_scrolling: bool) {
        if self.is_scrolling == is_scrolling {
            return;
        }
        self.is_scrolling = is_scrolling;
        if !is_scrolling {
            self.scroll_direction = None;
            self.last_scroll_event_ms = None;
        }
        self.notify();
    }

    pub fn notify_scroll_event(&mut self, now_ms: u64) {
        if !self.options.enabled {
            return;
        }
        self.last_scroll_event_ms = Some(now_ms);
        self.set_is_scrolling(true);
    }

    /// Runs the `is_scrolling` debounce. Call once per frame/timer tick.
    pub fn update_scrolling(&mut self, now_ms: u64) {
        if !self.options.enabled {
            return;
        }
        if self.options.use_scrollend_event {
            return;
        }
        if !self.is_scrolling {
            return;
        }
        let Some(last) = self.last_scroll_event_ms else {
            return;
        };
        if now_ms.saturating_sub(last) >= self.options.is_scrolling_reset_delay_ms {
            self.set_is_scrolling(false);
        }
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    /// Returns a lightweight snapshot of the current viewport state.
    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            height: self.viewport_height,
        }
    }

    /// Returns a lightweight snapshot of the current scroll state.
    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            offset: self.scroll_offset,
            is_scrolling: self.is_scrolling,
        }
    }

    /// Returns a combined snapshot of viewport + scroll state.
    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport: self.viewport_state(),
            scroll: self.scroll_state(),
        }
    }

    /// Updates the cached viewport height.
    ///
    /// Curtain containers get a fresh min-height effect, matching the resize
    /// handler of a curtain page; zone states are reconciled on the next
    /// flush (hooks other than `OnLeave` depend on the viewport height).
    pub fn set_viewport_height(&mut self, height: u32) {
        if self.viewport_height == height {
            return;
        }
        self.viewport_height = height;
        for curtain in &self.curtains {
            self.pending.push(Effect::SetMinHeight {
                target: curtain.container,
                height,
            });
        }
        self.notify();
    }

    /// Applies a resize event from your UI layer.
    pub fn apply_resize_event(&mut self, height: u32) {
        strace!(height, "apply_resize_event");
        self.batch_update(|e| {
            e.set_viewport_height(height);
        });
    }

    pub fn set_scroll_offset(&mut self, offset: u64) {
        if self.scroll_offset == offset {
            return;
        }
        let prev = self.scroll_offset;
        self.scroll_offset = offset;
        self.scroll_direction = match offset.cmp(&prev) {
            cmp::Ordering::Greater => Some(ScrollDirection::Forward),
            cmp::Ordering::Less => Some(ScrollDirection::Backward),
            cmp::Ordering::Equal => self.scroll_direction,
        };
        self.notify();
    }

    /// Applies a scroll offset update from your UI layer (e.g. wheel/drag),
    /// and marks the engine as scrolling.
    pub fn apply_scroll_event(&mut self, offset: u64, now_ms: u64) {
        strace!(offset, now_ms, "apply_scroll_event");
        self.batch_update(|e| {
            e.set_scroll_offset(offset);
            e.notify_scroll_event(now_ms);
        });
    }

    /// Applies both viewport height and scroll offset in a single coalesced
    /// update. This is the recommended entry point for UI adapters that
    /// receive scroll events along with fresh viewport measurements.
    pub fn apply_scroll_frame(&mut self, height: u32, offset: u64, now_ms: u64) {
        strace!(height, offset, now_ms, "apply_scroll_frame");
        self.batch_update(|e| {
            e.set_viewport_height(height);
            e.set_scroll_offset(offset);
            e.notify_scroll_event(now_ms);
        });
    }

    pub fn zone_count(&self) -> usize {
        self.registry.len()
    }

    pub fn registry(&self) -> &TriggerRegistry {
        &self.registry
    }

    /// Registers a trigger zone. See [`ZoneOptions`].
    pub fn register_zone(&mut self, options: ZoneOptions) -> ZoneId {
        let id = self.registry.register(options);
        self.notify();
        id
    }

    /// Unregisters a zone.
    ///
    /// If the zone is still active, its leave effects are queued first so the
    /// host document returns to normal flow. Returns `false` for unknown ids.
    pub fn unregister_zone(&mut self, id: ZoneId) -> bool {
        let Some(zone) = self.registry.take(id) else {
            return false;
        };
        if zone.state.is_active() {
            bind_leave(&zone, &mut |effect| self.pending.push(effect));
        }
        self.notify();
        true
    }

    /// Updates the document position of a zone's trigger element.
    pub fn set_zone_element_top(&mut self, id: ZoneId, element_top: i64) -> bool {
        let updated = self.registry.set_element_top(id, element_top);
        if updated {
            self.notify();
        }
        updated
    }

    /// Marks a zone's trigger element as removed from (or restored to) the
    /// document. Detached zones are silently skipped during evaluation.
    pub fn set_zone_detached(&mut self, id: ZoneId, detached: bool) -> bool {
        let updated = self.registry.set_detached(id, detached);
        if updated {
            self.notify();
        }
        updated
    }

    /// Committed state of a zone, as of the last flush.
    pub fn zone_state(&self, id: ZoneId) -> Option<ZoneState> {
        self.registry.zone_state(id)
    }

    /// Scroll offset at which a zone activates, under the current viewport.
    pub fn zone_start(&self, id: ZoneId) -> Option<i64> {
        self.registry.zone_start(id, self.viewport_height)
    }

    /// Drains pending effects, then evaluates all zones against the current
    /// frame state and emits the effects of every state transition.
    ///
    /// Effects arrive in a defined order: pending (install/cleanup) effects
    /// first, then zone effects in registration order. Flushing twice at the
    /// same offset emits nothing the second time.
    pub fn flush_effects(&mut self, mut f: impl FnMut(Effect)) {
        if !self.options.enabled {
            return;
        }

        for effect in self.pending.drain(..) {
            f(effect);
        }

        let frame = self.frame_state();
        let Self {
            registry, changes, ..
        } = self;
        changes.clear();
        registry.evaluate(frame, |change| changes.push(change));

        for change in &self.changes {
            if let Some(zone) = self.registry.zone(change.zone) {
                bind_change(
                    zone,
                    change.from.is_active(),
                    change.to.is_active(),
                    &mut f,
                );
            }
        }
    }

    /// Collects flushed effects into `out` (clears `out` first).
    ///
    /// This is a convenience wrapper around [`Self::flush_effects`]. For
    /// maximum performance, prefer `flush_effects` and reuse a scratch buffer
    /// in your adapter.
    pub fn collect_effects(&mut self, out: &mut Vec<Effect>) {
        out.clear();
        self.flush_effects(|effect| out.push(effect));
    }
}
