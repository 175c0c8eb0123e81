//! Adapter utilities for the `scrolltrigger` crate.
//!
//! The `scrolltrigger` crate is UI-agnostic and focuses on the core math and
//! state. This crate provides small, framework-neutral helpers commonly
//! needed by adapters:
//!
//! - A [`Controller`] that couples the engine with per-frame ticking
//! - Tween-based smooth scrolling helpers (optional; adapter-driven)
//! - A [`MemoryDom`] effect target for headless hosts and tests
//!
//! This crate is intentionally framework-agnostic (no web-sys/ratatui
//! bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod controller;
mod dom;
mod tween;


pub use controller::Controller;
pub use dom::{ElementState, MemoryDom};
pub use tween::{Easing, Tween};
