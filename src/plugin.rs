// ABOUTME: Plugin interface and the manual bullet reveal plugin
// ABOUTME: Bridges deck navigation events to the reveal machine and projector

use log::debug;

use crate::config::DeckConfig;
use crate::dom::{Document, NodeId};
use crate::errors::Result;
use crate::projector;
use crate::registry::BulletRegistry;
use crate::reveal::{Navigation, RevealMachine};
use crate::selector::Selector;

/// Typed rendition of the host's `deck.on(event, handler)` registration:
/// one method per event, dispatched synchronously and in registration
/// order by the deck context.
pub trait DeckPlugin {
    fn name(&self) -> &'static str;

    /// Invoked once, when the plugin is installed into a deck.
    fn attach(&mut self, doc: &mut Document, slides: &[NodeId]) -> Result<()>;

    fn on_next(&mut self, _doc: &mut Document, _slides: &[NodeId]) -> Navigation {
        Navigation::NotConsumed
    }

    fn on_prev(&mut self, _doc: &mut Document, _slides: &[NodeId]) -> Navigation {
        Navigation::NotConsumed
    }

    fn on_slide(&mut self, _doc: &mut Document, _slides: &[NodeId], _index: usize) {}
}

/// bespoke-style hosts let a `next`/`prev` listener veto the default
/// slide advance by returning `false`; any other return lets it proceed.
/// The translation lives here, at the shim, so the core never sees the
/// falsy-return idiom.
pub fn to_host_return(nav: Navigation) -> bool {
    !nav.is_consumed()
}

/// Inverse translation, for feeding a host listener's return value back
/// into the typed interface.
pub fn from_host_return(allow_default: bool) -> Navigation {
    if allow_default {
        Navigation::NotConsumed
    } else {
        Navigation::Consumed
    }
}

/// Click-by-click reveal of build items. Holds the bullet registry and
/// the reveal machine; every transition re-renders the class state.
pub struct ManualBullets {
    selector: Selector,
    focus_marker: String,
    focus_class: String,
    registry: BulletRegistry,
    machine: Option<RevealMachine>,
}

impl ManualBullets {
    pub fn new(config: &DeckConfig) -> Result<ManualBullets> {
        Self::with_selector(&config.bullet_selector, config)
    }

    pub fn with_selector(selector: &str, config: &DeckConfig) -> Result<ManualBullets> {
        Ok(ManualBullets {
            selector: Selector::parse(selector)?,
            focus_marker: config.focus_marker.clone(),
            focus_class: config.focus_class(),
            registry: BulletRegistry::default(),
            machine: None,
        })
    }

    fn render(&self, doc: &mut Document, slides: &[NodeId]) {
        if let Some(machine) = &self.machine {
            projector::render(
                doc,
                machine.state(),
                &self.registry,
                slides,
                &self.focus_marker,
                &self.focus_class,
            );
        }
    }
}

impl DeckPlugin for ManualBullets {
    fn name(&self) -> &'static str {
        "manual-bullets"
    }

    fn attach(&mut self, doc: &mut Document, slides: &[NodeId]) -> Result<()> {
        self.registry = BulletRegistry::build(doc, slides, &self.selector);
        debug!(
            "manual-bullets: registered {} bullets across {} slides",
            self.registry.counts().iter().sum::<usize>(),
            slides.len()
        );
        self.machine = Some(RevealMachine::new(self.registry.counts()));
        self.render(doc, slides);
        Ok(())
    }

    fn on_next(&mut self, doc: &mut Document, slides: &[NodeId]) -> Navigation {
        let nav = match self.machine.as_mut() {
            Some(machine) => machine.next(),
            None => return Navigation::NotConsumed,
        };
        self.render(doc, slides);
        nav
    }

    fn on_prev(&mut self, doc: &mut Document, slides: &[NodeId]) -> Navigation {
        let nav = match self.machine.as_mut() {
            Some(machine) => machine.prev(),
            None => return Navigation::NotConsumed,
        };
        self.render(doc, slides);
        nav
    }

    fn on_slide(&mut self, doc: &mut Document, slides: &[NodeId], index: usize) {
        if let Some(machine) = self.machine.as_mut() {
            machine.on_slide_changed(index);
        }
        self.render(doc, slides);
    }
}
