use alloc::string::String;

use crate::types::NodeId;
use crate::zone::TriggerZone;

/// Whether a zone's class is present or absent while the zone is active.
///
/// `RemoveWhileActive` is the curtain case: the container carries a `fixed`
/// class that is taken away for the duration of the zone (the background
/// scrolls with the page) and restored on either side of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassMode {
    AddWhileActive,
    RemoveWhileActive,
}

/// A class binding carried by a trigger zone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassEffect {
    pub target: NodeId,
    pub class: String,
    pub mode: ClassMode,
}

/// A side effect the host should apply to its document.
///
/// Effects are emitted in a defined order (install effects first, then zone
/// effects in registration order) and are idempotent: applying one that is
/// already in force must be a no-op for the host.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    /// Add (`on = true`) or remove (`on = false`) a CSS class.
    SetClass {
        target: NodeId,
        class: String,
        on: bool,
    },
    /// Hold the element at its current visual position.
    Pin { target: NodeId },
    /// Release a pinned element back into normal document flow.
    Unpin { target: NodeId },
    /// Set the element's `min-height`, in pixels.
    SetMinHeight { target: NodeId, height: u32 },
    /// Set the element's background image.
    SetBackgroundImage { target: NodeId, url: String },
    /// Remove the element from the document.
    RemoveElement { target: NodeId },
}

/// Maps a zone state change onto effects.
///
/// Only the active flag matters: a `Before` → `After` jump (or the reverse)
/// nets zero operations because the enter and leave effects would cancel.
pub(crate) fn bind_change(
    zone: &TriggerZone,
    was_active: bool,
    now_active: bool,
    emit: &mut dyn FnMut(Effect),
) {
    if was_active == now_active {
        return;
    }
    if now_active {
        bind_enter(zone, emit);
    } else {
        bind_leave(zone, emit);
    }
}

fn bind_enter(zone: &TriggerZone, emit: &mut dyn FnMut(Effect)) {
    if let Some(class) = &zone.class {
        emit(Effect::SetClass {
            target: class.target,
            class: class.class.clone(),
            on: matches!(class.mode, ClassMode::AddWhileActive),
        });
    }
    if let Some(target) = zone.pin {
        emit(Effect::Pin { target });
    }
}

/// Emits the effects that return a zone's targets to their inactive state.
///
/// Also used when an active zone is unregistered, so the host document does
/// not stay pinned or mis-classed after the subscription is gone.
pub(crate) fn bind_leave(zone: &TriggerZone, emit: &mut dyn FnMut(Effect)) {
    if let Some(class) = &zone.class {
        emit(Effect::SetClass {
            target: class.target,
            class: class.class.clone(),
            on: matches!(class.mode, ClassMode::RemoveWhileActive),
        });
    }
    if let Some(target) = zone.pin {
        emit(Effect::Unpin { target });
    }
}
