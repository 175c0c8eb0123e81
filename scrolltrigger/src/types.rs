/// Opaque handle for a host document element.
///
/// The engine never touches a real DOM: the host assigns an id to every element
/// it cares about and maps emitted effects back onto real nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

/// Handle for a registered trigger zone.
///
/// This is the explicit subscription object: keep it around to update the
/// zone's element position, detach it, or unregister it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneId(pub u64);

/// Where a zone sits relative to the current scroll offset.
///
/// States are recomputed from the absolute offset on every evaluation, so the
/// before → active → after ordering falls out of the math and reverses cleanly
/// when scrolling backwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoneState {
    Before,
    Active,
    After,
}

impl ZoneState {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// The viewport line a zone triggers against.
///
/// Expressed as the classic scroll-scene hooks: `OnEnter` fires when the
/// element's top reaches the viewport bottom, `OnCenter` the middle, `OnLeave`
/// the top (i.e. when the element begins to leave the screen).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerHook {
    OnEnter,
    OnCenter,
    OnLeave,
}

impl TriggerHook {
    /// Distance of the trigger line from the viewport top, in pixels.
    pub(crate) fn distance(self, viewport_height: u32) -> i64 {
        match self {
            Self::OnEnter => viewport_height as i64,
            Self::OnCenter => (viewport_height / 2) as i64,
            Self::OnLeave => 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// A zone whose state changed during an evaluation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateChange {
    pub zone: ZoneId,
    pub from: ZoneState,
    pub to: ZoneState,
}

impl StateChange {
    pub fn entered_active(&self) -> bool {
        !self.from.is_active() && self.to.is_active()
    }

    pub fn left_active(&self) -> bool {
        self.from.is_active() && !self.to.is_active()
    }
}
