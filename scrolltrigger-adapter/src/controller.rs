use scrolltrigger::{Effect, ZoneId};

use crate::{Easing, Tween};

/// A framework-neutral controller that wraps a `scrolltrigger::Engine` and
/// provides common adapter workflows (tween-driven scrolling, effect
/// flushing).
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_resize` / `on_scroll` when UI events occur
/// - `tick(now_ms)` each frame/timer tick (for tween scrolling and
///   `is_scrolling` debouncing)
/// - `flush_into` once per frame to apply the emitted effects
///
/// For UI scroll containers (e.g. DOM), you can use the returned offset from
/// `tick()` to set the real scroll position, while keeping the engine state
/// in sync.
#[derive(Clone, Debug)]
pub struct Controller {
    engine: scrolltrigger::Engine,
    tween: Option<Tween>,
}

impl Controller {
    pub fn new(options: scrolltrigger::EngineOptions) -> Self {
        Self {
            engine: scrolltrigger::Engine::new(options),
            tween: None,
        }
    }

    pub fn from_engine(engine: scrolltrigger::Engine) -> Self {
        Self {
            engine,
            tween: None,
        }
    }

    pub fn engine(&self) -> &scrolltrigger::Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut scrolltrigger::Engine {
        &mut self.engine
    }

    pub fn into_engine(self) -> scrolltrigger::Engine {
        self.engine
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    pub fn on_resize(&mut self, viewport_height: u32) {
        self.engine.apply_resize_event(viewport_height);
    }

    /// Call this when the UI reports a scroll offset change (e.g. user
    /// wheel/drag).
    ///
    /// This cancels any active tween.
    pub fn on_scroll(&mut self, scroll_offset: u64, now_ms: u64) {
        self.cancel_animation();
        self.engine.apply_scroll_event(scroll_offset, now_ms);
    }

    /// Advances the controller.
    ///
    /// - If a tween is active, updates the scroll offset and returns the new
    ///   offset.
    /// - Otherwise, runs `is_scrolling` debouncing and returns `None`.
    pub fn tick(&mut self, now_ms: u64) -> Option<u64> {
        let Some(tween) = self.tween else {
            self.engine.update_scrolling(now_ms);
            return None;
        };

        let off = tween.sample(now_ms);
        self.engine.apply_scroll_event(off, now_ms);

        if tween.is_done(now_ms) {
            self.tween = None;
            self.engine.set_is_scrolling(false);
        }

        Some(self.engine.scroll_offset())
    }

    /// Scroll offset at which a zone activates, clamped to the document top.
    pub fn zone_offset(&self, id: ZoneId) -> Option<u64> {
        self.engine.zone_start(id).map(|start| start.max(0) as u64)
    }

    /// Jumps to a zone's start immediately (no animation).
    ///
    /// Returns the applied offset, or `None` for an unknown zone.
    pub fn scroll_to_zone(&mut self, id: ZoneId, now_ms: u64) -> Option<u64> {
        let off = self.zone_offset(id)?;
        self.on_scroll(off, now_ms);
        Some(off)
    }

    /// Starts a tween to a zone's start (adapter-driven).
    ///
    /// Returns the target offset, or `None` for an unknown zone.
    pub fn start_tween_to_zone(
        &mut self,
        id: ZoneId,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> Option<u64> {
        let to = self.zone_offset(id)?;
        Some(self.start_tween_to_offset(to, now_ms, duration_ms, easing))
    }

    /// Starts a tween to an offset (adapter-driven).
    ///
    /// An in-flight tween is retargeted from its current sample, so chained
    /// calls stay continuous.
    pub fn start_tween_to_offset(
        &mut self,
        offset: u64,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> u64 {
        match &mut self.tween {
            Some(tween) => tween.retarget(now_ms, offset, duration_ms),
            None => {
                let from = self.engine.scroll_offset();
                self.tween = Some(Tween::new(from, offset, now_ms, duration_ms, easing));
            }
        }
        offset
    }

    /// Flushes the engine's effects into `apply`.
    pub fn flush_into(&mut self, apply: impl FnMut(Effect)) {
        self.engine.flush_effects(apply);
    }
}
