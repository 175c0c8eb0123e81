use alloc::string::String;

use crate::effects::{ClassMode, Effect};
use crate::engine::Engine;
use crate::types::{NodeId, ZoneId};
use crate::zone::ZoneOptions;

/// An embedded image to be lifted into the container's background.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurtainImage {
    pub element: NodeId,
    pub url: String,
}

/// Explicit description of one curtain section.
///
/// Hosts build these from whatever structure they have (a DOM scan, a layout
/// tree, a test fixture) instead of the engine discovering elements by class
/// name. Optional parts are absence-of-feature: a curtain without an image
/// gets no background effects, one without a title gets no pin zone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurtainSpec {
    pub container: NodeId,
    /// Document position of the container's top edge.
    pub top: i64,
    pub image: Option<CurtainImage>,
    pub title: Option<NodeId>,
}

impl CurtainSpec {
    pub fn new(container: NodeId, top: i64) -> Self {
        Self {
            container,
            top,
            image: None,
            title: None,
        }
    }

    pub fn with_image(mut self, element: NodeId, url: impl Into<String>) -> Self {
        self.image = Some(CurtainImage {
            element,
            url: url.into(),
        });
        self
    }

    pub fn with_title(mut self, title: NodeId) -> Self {
        self.title = Some(title);
        self
    }
}

/// The zones an installed curtain registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurtainZones {
    /// Unfixes the background while the container leaves the screen.
    pub background: ZoneId,
    /// Pins the title during the transition, when a title is present.
    pub title: Option<ZoneId>,
}

#[derive(Clone, Debug)]
pub(crate) struct Curtain {
    pub(crate) container: NodeId,
    pub(crate) zones: CurtainZones,
}

impl Engine {
    pub fn curtain_count(&self) -> usize {
        self.curtains.len()
    }

    pub fn is_curtain_installed(&self, container: NodeId) -> bool {
        self.curtains.iter().any(|c| c.container == container)
    }

    /// Installs a curtain section.
    ///
    /// Queues the one-time setup effects (fixed class, min-height, background
    /// lifted from the embedded image) and registers the transition zones
    /// using the engine's [`crate::CurtainDefaults`].
    ///
    /// Idempotent: installing the same container twice is a no-op returning
    /// `None`, so re-running page initialization cannot duplicate bindings or
    /// double-remove an already-removed image.
    pub fn install_curtain(&mut self, spec: CurtainSpec) -> Option<CurtainZones> {
        if self.is_curtain_installed(spec.container) {
            swarn!(container = spec.container.0, "curtain already installed");
            return None;
        }
        sdebug!(
            container = spec.container.0,
            top = spec.top,
            has_image = spec.image.is_some(),
            has_title = spec.title.is_some(),
            "install_curtain"
        );

        let defaults = self.options().curtain_defaults.clone();

        self.pending.push(Effect::SetClass {
            target: spec.container,
            class: defaults.class.clone(),
            on: true,
        });
        self.pending.push(Effect::SetMinHeight {
            target: spec.container,
            height: self.viewport_height(),
        });
        if let Some(image) = spec.image {
            self.pending.push(Effect::SetBackgroundImage {
                target: spec.container,
                url: image.url,
            });
            self.pending.push(Effect::RemoveElement {
                target: image.element,
            });
        }

        let background = self.register_zone(
            ZoneOptions::new(spec.top)
                .with_duration(defaults.duration)
                .with_hook(defaults.hook)
                .with_class(spec.container, defaults.class, ClassMode::RemoveWhileActive),
        );
        let title = spec.title.map(|title| {
            self.register_zone(
                ZoneOptions::new(spec.top)
                    .with_offset(defaults.title_offset)
                    .with_duration(defaults.duration)
                    .with_hook(defaults.hook)
                    .with_pin(title),
            )
        });

        let zones = CurtainZones { background, title };
        self.curtains.push(Curtain {
            container: spec.container,
            zones,
        });
        self.notify();
        Some(zones)
    }

    /// Uninstalls a curtain, unregistering its zones (with leave effects for
    /// any still-active zone). Returns `false` for unknown containers.
    pub fn uninstall_curtain(&mut self, container: NodeId) -> bool {
        let Some(index) = self.curtains.iter().position(|c| c.container == container) else {
            return false;
        };
        let curtain = self.curtains.remove(index);
        self.unregister_zone(curtain.zones.background);
        if let Some(title) = curtain.zones.title {
            self.unregister_zone(title);
        }
        self.notify();
        true
    }

    /// Zones of an installed curtain.
    pub fn curtain_zones(&self, container: NodeId) -> Option<CurtainZones> {
        self.curtains
            .iter()
            .find(|c| c.container == container)
            .map(|c| c.zones)
    }
}
