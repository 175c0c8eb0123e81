use alloc::string::String;

use crate::effects::{ClassEffect, ClassMode};
use crate::types::{NodeId, TriggerHook, ZoneId, ZoneState};

/// Configuration for a trigger zone.
///
/// A zone activates when the trigger element's document position crosses the
/// hook line, and deactivates `duration` pixels of scrolling later. With
/// `duration = 0` the zone is open-ended: once entered it stays active until
/// scrolled back above the trigger.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneOptions {
    /// Document position of the trigger element's top edge.
    pub element_top: i64,
    /// Shifts the activation point; negative values trigger early.
    pub offset: i64,
    /// Length of the active scroll range, in pixels (0 = open-ended).
    pub duration: u64,
    pub hook: TriggerHook,
    /// Optional class binding applied while the zone is active.
    pub class: Option<ClassEffect>,
    /// Optional element pinned while the zone is active.
    pub pin: Option<NodeId>,
}

impl ZoneOptions {
    pub fn new(element_top: i64) -> Self {
        Self {
            element_top,
            offset: 0,
            duration: 0,
            hook: TriggerHook::OnLeave,
            class: None,
            pin: None,
        }
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_duration(mut self, duration: u64) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_hook(mut self, hook: TriggerHook) -> Self {
        self.hook = hook;
        self
    }

    pub fn with_class(mut self, target: NodeId, class: impl Into<String>, mode: ClassMode) -> Self {
        self.class = Some(ClassEffect {
            target,
            class: class.into(),
            mode,
        });
        self
    }

    pub fn with_pin(mut self, target: NodeId) -> Self {
        self.pin = Some(target);
        self
    }
}

/// A registered zone plus its committed state.
#[derive(Clone, Debug)]
pub(crate) struct TriggerZone {
    pub(crate) id: ZoneId,
    pub(crate) element_top: i64,
    pub(crate) offset: i64,
    pub(crate) duration: u64,
    pub(crate) hook: TriggerHook,
    pub(crate) class: Option<ClassEffect>,
    pub(crate) pin: Option<NodeId>,
    /// Set when the trigger element has been removed from the document; the
    /// zone is silently skipped during evaluation until re-attached.
    pub(crate) detached: bool,
    /// State as of the last evaluation that observed this zone.
    pub(crate) state: ZoneState,
}

impl TriggerZone {
    pub(crate) fn from_options(id: ZoneId, options: ZoneOptions) -> Self {
        Self {
            id,
            element_top: options.element_top,
            offset: options.offset,
            duration: options.duration,
            hook: options.hook,
            class: options.class,
            pin: options.pin,
            detached: false,
            state: ZoneState::Before,
        }
    }

    /// Scroll offset at which this zone activates.
    pub(crate) fn start(&self, viewport_height: u32) -> i64 {
        self.element_top
            .saturating_add(self.offset)
            .saturating_sub(self.hook.distance(viewport_height))
    }

    pub(crate) fn state_at(&self, scroll_offset: u64, viewport_height: u32) -> ZoneState {
        let pos = scroll_offset.min(i64::MAX as u64) as i64;
        let start = self.start(viewport_height);
        if pos < start {
            ZoneState::Before
        } else if self.duration == 0 || pos < start.saturating_add_unsigned(self.duration) {
            ZoneState::Active
        } else {
            ZoneState::After
        }
    }
}
