// ABOUTME: Bullet registry for the bespoke-deck application
// ABOUTME: Groups selector-matched build items per slide, in document order

use crate::dom::{Document, NodeId};
use crate::selector::Selector;

/// Per-slide sequences of bullet elements, indexed by slide index.
/// Built once at deck construction; slides are not added or removed at
/// runtime, so entries stay stable for the deck lifetime.
#[derive(Debug, Clone, Default)]
pub struct BulletRegistry {
    slides: Vec<Vec<NodeId>>,
}

impl BulletRegistry {
    /// Scan every slide for descendants matching the bullet selector.
    /// A slide with no matches gets an empty sequence, which navigation
    /// treats as "nothing to step through".
    pub fn build(doc: &Document, slides: &[NodeId], selector: &Selector) -> BulletRegistry {
        let slides = slides
            .iter()
            .map(|&slide| {
                doc.descendants(slide)
                    .into_iter()
                    .filter(|&id| selector.matches(doc, id))
                    .collect()
            })
            .collect();
        BulletRegistry { slides }
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn bullet_count(&self, slide: usize) -> usize {
        self.slides.get(slide).map(Vec::len).unwrap_or(0)
    }

    pub fn bullets(&self, slide: usize) -> &[NodeId] {
        self.slides.get(slide).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn bullet(&self, slide: usize, index: usize) -> Option<NodeId> {
        self.slides.get(slide).and_then(|b| b.get(index)).copied()
    }

    /// Bullet counts per slide, the shape the reveal machine runs on.
    pub fn counts(&self) -> Vec<usize> {
        self.slides.iter().map(Vec::len).collect()
    }
}
