use alloc::string::String;
use alloc::sync::Arc;

use crate::engine::Engine;
use crate::state::ViewportState;
use crate::types::TriggerHook;

/// A callback fired when an engine state update occurs.
///
/// The second argument is `is_scrolling`.
pub type OnChangeCallback = Arc<dyn Fn(&Engine, bool) + Send + Sync>;

/// Initial scroll offset configuration.
#[derive(Clone)]
pub enum InitialOffset {
    /// A fixed initial offset.
    Value(u64),
    /// A lazily evaluated initial offset provider (called by `Engine::new`),
    /// e.g. a persisted scroll position read back on page load.
    Provider(Arc<dyn Fn() -> u64 + Send + Sync>),
}

impl InitialOffset {
    pub(crate) fn resolve(&self) -> u64 {
        match self {
            Self::Value(v) => *v,
            Self::Provider(f) => f(),
        }
    }
}

impl Default for InitialOffset {
    fn default() -> Self {
        Self::Value(0)
    }
}

impl core::fmt::Debug for InitialOffset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// Defaults applied to the zones a curtain install registers.
///
/// The stock values reproduce the classic curtain page: a 500px transition
/// starting when the container begins to leave the screen, a `fixed` class
/// on the background, and titles pinned 200px early.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurtainDefaults {
    /// Class held on the container while its zone is inactive.
    pub class: String,
    /// Length of the transition scroll range, in pixels.
    pub duration: u64,
    /// Activation offset for the title pin zone.
    pub title_offset: i64,
    pub hook: TriggerHook,
}

impl Default for CurtainDefaults {
    fn default() -> Self {
        Self {
            class: String::from("fixed"),
            duration: 500,
            title_offset: -200,
            hook: TriggerHook::OnLeave,
        }
    }
}

/// Configuration for [`crate::Engine`].
///
/// This type is designed to be cheap to clone: callbacks are stored in `Arc`s
/// so adapters can tweak a few fields and rebuild without reallocating
/// closures.
#[derive(Clone)]
pub struct EngineOptions {
    /// Enables/disables the engine. When disabled, no effects are emitted.
    pub enabled: bool,

    /// The initial viewport geometry, if known before the first resize event.
    pub initial_viewport: Option<ViewportState>,

    /// Initial scroll offset.
    pub initial_offset: InitialOffset,

    pub curtain_defaults: CurtainDefaults,

    /// Optional callback fired when the engine's internal state changes.
    ///
    /// The `sync` argument indicates whether a scroll is in progress.
    pub on_change: Option<OnChangeCallback>,

    /// Determines whether the host delivers a native scrollend event to
    /// detect when scrolling has stopped. When `false`, scrolling state is
    /// reset by `update_scrolling` after a debounce delay.
    pub use_scrollend_event: bool,

    /// Debounced fallback duration for resetting `is_scrolling` when
    /// `use_scrollend_event` is false.
    pub is_scrolling_reset_delay_ms: u64,
}

impl EngineOptions {
    pub fn new() -> Self {
        Self {
            enabled: true,
            initial_viewport: None,
            initial_offset: InitialOffset::default(),
            curtain_defaults: CurtainDefaults::default(),
            on_change: None,
            use_scrollend_event: false,
            is_scrolling_reset_delay_ms: 150,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_initial_viewport(mut self, viewport: Option<ViewportState>) -> Self {
        self.initial_viewport = viewport;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: InitialOffset) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_initial_offset_value(mut self, initial_offset: u64) -> Self {
        self.initial_offset = InitialOffset::Value(initial_offset);
        self
    }

    pub fn with_initial_offset_provider(
        mut self,
        initial_offset: impl Fn() -> u64 + Send + Sync + 'static,
    ) -> Self {
        self.initial_offset = InitialOffset::Provider(Arc::new(initial_offset));
        self
    }

    pub fn with_curtain_defaults(mut self, curtain_defaults: CurtainDefaults) -> Self {
        self.curtain_defaults = curtain_defaults;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Engine, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_use_scrollend_event(mut self, use_scrollend_event: bool) -> Self {
        self.use_scrollend_event = use_scrollend_event;
        self
    }

    pub fn with_is_scrolling_reset_delay_ms(mut self, delay_ms: u64) -> Self {
        self.is_scrolling_reset_delay_ms = delay_ms;
        self
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for EngineOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EngineOptions")
            .field("enabled", &self.enabled)
            .field("initial_viewport", &self.initial_viewport)
            .field("initial_offset", &self.initial_offset)
            .field("curtain_defaults", &self.curtain_defaults)
            .field("use_scrollend_event", &self.use_scrollend_event)
            .field(
                "is_scrolling_reset_delay_ms",
                &self.is_scrolling_reset_delay_ms,
            )
            .finish_non_exhaustive()
    }
}
