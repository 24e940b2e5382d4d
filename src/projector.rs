// ABOUTME: Visual projector for reveal state
// ABOUTME: Computes desired class assignments and applies them to the markup

use crate::dom::{Document, NodeId};
use crate::registry::BulletRegistry;
use crate::reveal::RevealState;

/// Marker class every managed bullet carries, so stylesheets can tell
/// managed bullets apart from unmanaged content.
pub const BULLET_CLASS: &str = "bespoke-bullet";
pub const BULLET_ACTIVE_CLASS: &str = "bespoke-bullet-active";
pub const BULLET_INACTIVE_CLASS: &str = "bespoke-bullet-inactive";
pub const BULLET_CURRENT_CLASS: &str = "bespoke-bullet-current";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulletClasses {
    pub active: bool,
    pub current: bool,
}

/// The desired class state for one reveal position, computed without
/// touching the markup. `apply` performs the actual mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub bullets: Vec<Vec<BulletClasses>>,
    pub focused_slide: Option<usize>,
}

/// Every bullet on an earlier slide is active, as is every bullet up to
/// and including the active index on the current slide; already-visited
/// slides keep their fully-revealed look. Exactly the active pair is
/// current. The active slide is focus-flagged iff its current bullet
/// carries the focus marker.
pub fn project(
    state: RevealState,
    registry: &BulletRegistry,
    doc: &Document,
    focus_marker: &str,
) -> Projection {
    let bullets = (0..registry.slide_count())
        .map(|s| {
            (0..registry.bullet_count(s))
                .map(|b| BulletClasses {
                    active: s < state.slide
                        || (s == state.slide && state.bullet.map_or(false, |active| b <= active)),
                    current: s == state.slide && state.bullet == Some(b),
                })
                .collect()
        })
        .collect();

    let focused_slide = state
        .bullet
        .and_then(|b| registry.bullet(state.slide, b))
        .and_then(|id| doc.data(id, "focus"))
        .filter(|&marker| marker == focus_marker)
        .map(|_| state.slide);

    Projection {
        bullets,
        focused_slide,
    }
}

/// Idempotent class mutation: re-applying the same projection leaves the
/// markup unchanged. The base marker class is (re)applied here rather
/// than at registry construction so every managed bullet is tagged no
/// matter which slide is active.
pub fn apply(
    doc: &mut Document,
    projection: &Projection,
    registry: &BulletRegistry,
    slides: &[NodeId],
    focus_class: &str,
) {
    for (s, slide_bullets) in projection.bullets.iter().enumerate() {
        for (b, classes) in slide_bullets.iter().enumerate() {
            let id = match registry.bullet(s, b) {
                Some(id) => id,
                None => continue,
            };
            doc.add_class(id, BULLET_CLASS);
            if classes.active {
                doc.add_class(id, BULLET_ACTIVE_CLASS);
                doc.remove_class(id, BULLET_INACTIVE_CLASS);
            } else {
                doc.add_class(id, BULLET_INACTIVE_CLASS);
                doc.remove_class(id, BULLET_ACTIVE_CLASS);
            }
            if classes.current {
                doc.add_class(id, BULLET_CURRENT_CLASS);
            } else {
                doc.remove_class(id, BULLET_CURRENT_CLASS);
            }
        }
    }

    for (s, &slide) in slides.iter().enumerate() {
        if projection.focused_slide == Some(s) {
            doc.add_class(slide, focus_class);
        } else {
            doc.remove_class(slide, focus_class);
        }
    }
}

/// Project and apply in one pass.
pub fn render(
    doc: &mut Document,
    state: RevealState,
    registry: &BulletRegistry,
    slides: &[NodeId],
    focus_marker: &str,
    focus_class: &str,
) {
    let projection = project(state, registry, doc, focus_marker);
    apply(doc, &projection, registry, slides, focus_class);
}
