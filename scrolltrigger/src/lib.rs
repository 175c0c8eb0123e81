//! A headless scroll-triggered-effects engine.
//!
//! For adapter-level utilities (event coalescing, tween scrolling, an in-memory
//! document for tests), see the `scrolltrigger-adapter` crate.
//!
//! This crate models the classic "curtain page" pattern: full-viewport sections
//! whose backgrounds unfix as they leave the screen, with optional titles pinned
//! while a scroll range is active. The engine itself is pure bookkeeping: trigger
//! zones over absolute document positions, evaluated against the current scroll
//! offset, producing an ordered stream of [`Effect`] commands.
//!
//! It is UI-agnostic. A DOM/TUI layer is expected to provide:
//! - viewport height and scroll offset (and re-measure them on resize/scroll)
//! - document positions for trigger elements
//! - application of the emitted effect commands (class toggles, pins, styles)
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod curtain;
mod effects;
mod engine;
mod options;
mod registry;
mod state;
mod types;
mod zone;

#[cfg(test)]
mod tests;

pub use curtain::{CurtainImage, CurtainSpec, CurtainZones};
pub use effects::{ClassEffect, ClassMode, Effect};
pub use engine::Engine;
pub use options::{CurtainDefaults, EngineOptions, InitialOffset, OnChangeCallback};
pub use registry::TriggerRegistry;
pub use state::{FrameState, ScrollState, ViewportState};
pub use types::{NodeId, ScrollDirection, StateChange, TriggerHook, ZoneId, ZoneState};
pub use zone::ZoneOptions;
