// ABOUTME: Deck context for the bespoke-deck application
// ABOUTME: Owns the slide markup, the active slide index, and the installed plugins

use log::{debug, info};

use crate::dom::{Document, NodeId};
use crate::errors::{DeckError, Result};
use crate::plugin::DeckPlugin;
use crate::reveal::Navigation;

const SLIDE_TAG: &str = "section";

/// An explicit deck instance: slides come from a parsed fragment, plugins
/// are installed once at construction, and navigation dispatches to them
/// synchronously. Events are handled one at a time on the caller's
/// thread; handlers are never re-entered.
pub struct Deck {
    doc: Document,
    slides: Vec<NodeId>,
    current: usize,
    plugins: Vec<Box<dyn DeckPlugin>>,
}

impl Deck {
    /// Build a deck from a slide fragment. Slides are the top-level
    /// `<section>` elements, in document order.
    pub fn from_fragment(fragment: &str, plugins: Vec<Box<dyn DeckPlugin>>) -> Result<Deck> {
        let doc = Document::parse_fragment(fragment)?;
        Deck::from_document(doc, plugins)
    }

    pub fn from_document(doc: Document, plugins: Vec<Box<dyn DeckPlugin>>) -> Result<Deck> {
        let slides = doc.top_level(SLIDE_TAG);
        if slides.is_empty() {
            return Err(DeckError::NoSlidesError(SLIDE_TAG.to_string()));
        }
        info!("Deck constructed with {} slides", slides.len());

        let mut deck = Deck {
            doc,
            slides,
            current: 0,
            plugins,
        };
        let mut plugins = std::mem::take(&mut deck.plugins);
        for plugin in &mut plugins {
            debug!("Installing plugin: {}", plugin.name());
            plugin.attach(&mut deck.doc, &deck.slides)?;
        }
        deck.plugins = plugins;
        Ok(deck)
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn current_slide(&self) -> usize {
        self.current
    }

    pub fn slides(&self) -> &[NodeId] {
        &self.slides
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Advance: every plugin sees the event; the default slide change
    /// happens only when none of them consumed it.
    pub fn next(&mut self) -> Navigation {
        let nav = self.dispatch(|plugin, doc, slides| plugin.on_next(doc, slides));
        if !nav.is_consumed() && self.current + 1 < self.slides.len() {
            self.current += 1;
            self.emit_slide();
        }
        nav
    }

    pub fn prev(&mut self) -> Navigation {
        let nav = self.dispatch(|plugin, doc, slides| plugin.on_prev(doc, slides));
        if !nav.is_consumed() && self.current > 0 {
            self.current -= 1;
            self.emit_slide();
        }
        nav
    }

    /// Out-of-band slide change (overview jump, hash navigation, direct
    /// click). Plugins hear about it through the slide event.
    pub fn jump(&mut self, index: usize) -> Result<()> {
        if index >= self.slides.len() {
            return Err(DeckError::ValidationError(format!(
                "Slide index {} out of range (deck has {} slides)",
                index,
                self.slides.len()
            )));
        }
        self.current = index;
        self.emit_slide();
        Ok(())
    }

    fn dispatch<F>(&mut self, mut event: F) -> Navigation
    where
        F: FnMut(&mut Box<dyn DeckPlugin>, &mut Document, &[NodeId]) -> Navigation,
    {
        let mut consumed = false;
        for plugin in &mut self.plugins {
            let nav = event(plugin, &mut self.doc, &self.slides);
            consumed |= nav.is_consumed();
        }
        if consumed {
            Navigation::Consumed
        } else {
            Navigation::NotConsumed
        }
    }

    fn emit_slide(&mut self) {
        debug!("Slide changed to {}", self.current);
        for plugin in &mut self.plugins {
            plugin.on_slide(&mut self.doc, &self.slides, self.current);
        }
    }
}
