use super::*;
use crate::projector::{
    BULLET_ACTIVE_CLASS, BULLET_CLASS, BULLET_CURRENT_CLASS, BULLET_INACTIVE_CLASS,
};
use crate::reveal::Navigation::{Consumed, NotConsumed};

// Three slides: two bullets (the second focus-marked), no bullets, one bullet.
const FIXTURE: &str = r#"<section>
  <h1>Intro</h1>
  <ul class="build-items">
    <li>alpha</li>
    <li data-focus="kube">beta</li>
  </ul>
</section>
<section>
  <h1>No builds</h1>
</section>
<section>
  <p class="build">gamma</p>
</section>"#;

fn parse_fixture() -> (Document, Vec<dom::NodeId>) {
    let doc = Document::parse_fragment(FIXTURE).expect("fixture should parse");
    let slides = doc.top_level("section");
    (doc, slides)
}

fn fixture_registry(doc: &Document, slides: &[dom::NodeId]) -> BulletRegistry {
    let selector = Selector::parse(DEFAULT_BULLET_SELECTOR).expect("default selector");
    BulletRegistry::build(doc, slides, &selector)
}

fn fixture_deck() -> Deck {
    let config = DeckConfig::default();
    let bullets = ManualBullets::new(&config).expect("plugin should build");
    Deck::from_fragment(FIXTURE, vec![Box::new(bullets) as Box<dyn DeckPlugin>])
        .expect("deck should build")
}

#[test]
fn test_parse_fragment_structure() {
    let (doc, slides) = parse_fixture();
    assert_eq!(slides.len(), 3);
    assert_eq!(doc.element(slides[0]).unwrap().tag, "section");

    let descendants = doc.descendants(slides[0]);
    let tags: Vec<&str> = descendants
        .iter()
        .map(|&id| doc.element(id).unwrap().tag.as_str())
        .collect();
    assert_eq!(tags, vec!["h1", "ul", "li", "li"]);
}

#[test]
fn test_parse_fragment_rejects_mismatched_tags() {
    let result = Document::parse_fragment("<section><p>oops</section>");
    assert!(matches!(result, Err(DeckError::MarkupError(_))));
}

#[test]
fn test_serialized_fragment_preserves_attributes() {
    let (doc, _) = parse_fixture();
    let html = doc.to_html();
    assert!(html.contains(r#"<ul class="build-items">"#));
    assert!(html.contains(r#"data-focus="kube""#));
}

#[test]
fn test_default_selector_matches_build_items() {
    let (doc, slides) = parse_fixture();
    let registry = fixture_registry(&doc, &slides);

    assert_eq!(registry.counts(), vec![2, 0, 1]);

    // Document order within the slide.
    let first = registry.bullet(0, 0).unwrap();
    let second = registry.bullet(0, 1).unwrap();
    assert!(first < second);
}

#[test]
fn test_selector_not_excludes_nested_containers() {
    let fragment = r#"<section>
      <div class="build-items">
        <div class="build-items"><p>nested</p></div>
        <p>direct</p>
      </div>
    </section>"#;
    let doc = Document::parse_fragment(fragment).unwrap();
    let slides = doc.top_level("section");
    let registry = fixture_registry(&doc, &slides);

    // Containers are never bullets themselves; their item children are.
    assert_eq!(registry.bullet_count(0), 2);
    for b in 0..2 {
        let matched = registry.bullet(0, b).unwrap();
        assert_eq!(doc.element(matched).unwrap().tag, "p");
    }
}

#[test]
fn test_selector_rejects_garbage() {
    assert!(Selector::parse("").is_err());
    assert!(Selector::parse(".build,, .x").is_err());
    assert!(Selector::parse("> .build").is_err());
    assert!(Selector::parse(".build > ").is_err());
    assert!(Selector::parse(":hover").is_err());
}

#[test]
fn test_machine_walkthrough() {
    let mut machine = RevealMachine::new(vec![2, 0, 1]);
    assert_eq!(machine.state(), RevealState { slide: 0, bullet: None });

    assert_eq!(machine.next(), Consumed);
    assert_eq!(machine.state(), RevealState { slide: 0, bullet: Some(0) });

    assert_eq!(machine.next(), Consumed);
    assert_eq!(machine.state(), RevealState { slide: 0, bullet: Some(1) });

    // Out of bullets: pre-position on the next slide, let the host advance.
    assert_eq!(machine.next(), NotConsumed);
    assert_eq!(machine.state(), RevealState { slide: 1, bullet: None });

    // Slide with no bullets never consumes.
    assert_eq!(machine.next(), NotConsumed);
    assert_eq!(machine.state(), RevealState { slide: 2, bullet: None });

    assert_eq!(machine.next(), Consumed);
    assert_eq!(machine.state(), RevealState { slide: 2, bullet: Some(0) });

    // Last slide, last bullet: no-op.
    assert_eq!(machine.next(), NotConsumed);
    assert_eq!(machine.state(), RevealState { slide: 2, bullet: Some(0) });
}

#[test]
fn test_machine_consumed_next_then_prev_restores_state() {
    let mut machine = RevealMachine::new(vec![2, 0, 1]);

    let before = machine.state();
    assert_eq!(machine.next(), Consumed);
    assert_eq!(machine.prev(), Consumed);
    assert_eq!(machine.state(), before);

    machine.activate(0, Some(0));
    let before = machine.state();
    assert_eq!(machine.next(), Consumed);
    assert_eq!(machine.prev(), Consumed);
    assert_eq!(machine.state(), before);
}

#[test]
fn test_machine_prev_falls_through_to_previous_slide() {
    let mut machine = RevealMachine::new(vec![2, 0, 1]);
    machine.on_slide_changed(2);

    // Nothing revealed: fall through, landing on the previous slide with
    // all of its bullets shown (none here, the slide is empty).
    assert_eq!(machine.prev(), NotConsumed);
    assert_eq!(machine.state(), RevealState { slide: 1, bullet: None });

    assert_eq!(machine.prev(), NotConsumed);
    assert_eq!(machine.state(), RevealState { slide: 0, bullet: Some(1) });

    assert_eq!(machine.prev(), Consumed);
    assert_eq!(machine.prev(), Consumed);
    assert_eq!(machine.state(), RevealState { slide: 0, bullet: None });

    // First slide, nothing revealed: no-op.
    assert_eq!(machine.prev(), NotConsumed);
    assert_eq!(machine.state(), RevealState { slide: 0, bullet: None });
}

#[test]
fn test_machine_slide_changed_always_resets() {
    let mut machine = RevealMachine::new(vec![2, 0, 1]);
    machine.activate(0, Some(1));

    machine.on_slide_changed(2);
    assert_eq!(machine.state(), RevealState { slide: 2, bullet: None });

    machine.on_slide_changed(0);
    assert_eq!(machine.state(), RevealState { slide: 0, bullet: None });
}

#[test]
fn test_projection_marks_earlier_slides_fully_active() {
    let (doc, slides) = parse_fixture();
    let registry = fixture_registry(&doc, &slides);

    let state = RevealState { slide: 2, bullet: Some(0) };
    let projection = projector::project(state, &registry, &doc, "kube");

    assert!(projection.bullets[0].iter().all(|b| b.active));
    assert!(projection.bullets[2][0].active);
    assert!(projection.bullets[2][0].current);
    assert_eq!(projection.focused_slide, None);

    let current_count: usize = projection
        .bullets
        .iter()
        .flatten()
        .filter(|b| b.current)
        .count();
    assert_eq!(current_count, 1);
}

#[test]
fn test_projection_nothing_revealed_has_no_current() {
    let (doc, slides) = parse_fixture();
    let registry = fixture_registry(&doc, &slides);

    let state = RevealState { slide: 0, bullet: None };
    let projection = projector::project(state, &registry, &doc, "kube");

    assert!(projection.bullets.iter().flatten().all(|b| !b.active));
    assert!(projection.bullets.iter().flatten().all(|b| !b.current));
    assert_eq!(projection.focused_slide, None);
}

#[test]
fn test_render_is_idempotent() {
    let (mut doc, slides) = parse_fixture();
    let registry = fixture_registry(&doc, &slides);
    let state = RevealState { slide: 0, bullet: Some(1) };

    projector::render(&mut doc, state, &registry, &slides, "kube", "focus-kube");
    let once = doc.to_html();
    projector::render(&mut doc, state, &registry, &slides, "kube", "focus-kube");
    assert_eq!(doc.to_html(), once);
}

#[test]
fn test_render_applies_state_classes() {
    let (mut doc, slides) = parse_fixture();
    let registry = fixture_registry(&doc, &slides);
    let state = RevealState { slide: 0, bullet: Some(0) };

    projector::render(&mut doc, state, &registry, &slides, "kube", "focus-kube");

    let first = registry.bullet(0, 0).unwrap();
    let second = registry.bullet(0, 1).unwrap();
    assert!(doc.has_class(first, BULLET_CLASS));
    assert!(doc.has_class(first, BULLET_ACTIVE_CLASS));
    assert!(doc.has_class(first, BULLET_CURRENT_CLASS));
    assert!(doc.has_class(second, BULLET_INACTIVE_CLASS));
    assert!(!doc.has_class(second, BULLET_CURRENT_CLASS));

    // Stepping forward moves both classes.
    let state = RevealState { slide: 0, bullet: Some(1) };
    projector::render(&mut doc, state, &registry, &slides, "kube", "focus-kube");
    assert!(doc.has_class(first, BULLET_ACTIVE_CLASS));
    assert!(!doc.has_class(first, BULLET_CURRENT_CLASS));
    assert!(doc.has_class(second, BULLET_ACTIVE_CLASS));
    assert!(doc.has_class(second, BULLET_CURRENT_CLASS));
}

#[test]
fn test_focus_marker_drives_slide_class() {
    let (mut doc, slides) = parse_fixture();
    let registry = fixture_registry(&doc, &slides);

    // The second bullet on slide 0 carries data-focus="kube".
    let state = RevealState { slide: 0, bullet: Some(1) };
    projector::render(&mut doc, state, &registry, &slides, "kube", "focus-kube");
    assert!(doc.has_class(slides[0], "focus-kube"));
    assert!(!doc.has_class(slides[1], "focus-kube"));
    assert!(!doc.has_class(slides[2], "focus-kube"));

    // Any other active bullet clears it everywhere.
    let state = RevealState { slide: 0, bullet: Some(0) };
    projector::render(&mut doc, state, &registry, &slides, "kube", "focus-kube");
    assert!(slides.iter().all(|&s| !doc.has_class(s, "focus-kube")));
}

#[test]
fn test_deck_consumed_press_stays_on_slide() {
    let mut deck = fixture_deck();
    assert_eq!(deck.current_slide(), 0);

    assert_eq!(deck.next(), Consumed);
    assert_eq!(deck.current_slide(), 0);
    assert_eq!(deck.next(), Consumed);
    assert_eq!(deck.current_slide(), 0);

    // Out of bullets: the deck's own advance runs and the slide event
    // resets the reveal, so the new slide starts with nothing current.
    assert_eq!(deck.next(), NotConsumed);
    assert_eq!(deck.current_slide(), 1);

    let registry = fixture_registry(deck.document(), deck.slides());
    let any_current = registry
        .bullets(1)
        .iter()
        .any(|&id| deck.document().has_class(id, BULLET_CURRENT_CLASS));
    assert!(!any_current);
}

#[test]
fn test_deck_next_at_end_is_noop() {
    let mut deck = fixture_deck();
    deck.jump(2).unwrap();
    assert_eq!(deck.next(), Consumed); // reveals gamma
    assert_eq!(deck.next(), NotConsumed);
    assert_eq!(deck.current_slide(), 2);
}

#[test]
fn test_deck_prev_at_start_is_noop() {
    let mut deck = fixture_deck();
    assert_eq!(deck.prev(), NotConsumed);
    assert_eq!(deck.current_slide(), 0);
}

#[test]
fn test_deck_jump_resets_reveal() {
    let mut deck = fixture_deck();
    deck.next();
    deck.next();

    deck.jump(2).unwrap();
    assert_eq!(deck.current_slide(), 2);

    let selector = Selector::parse(DEFAULT_BULLET_SELECTOR).unwrap();
    let registry = BulletRegistry::build(deck.document(), deck.slides(), &selector);
    let any_current = (0..registry.slide_count()).any(|s| {
        registry
            .bullets(s)
            .iter()
            .any(|&id| deck.document().has_class(id, BULLET_CURRENT_CLASS))
    });
    assert!(!any_current);

    assert!(deck.jump(3).is_err());
}

#[test]
fn test_deck_requires_slides() {
    let config = DeckConfig::default();
    let bullets = ManualBullets::new(&config).unwrap();
    let result = Deck::from_fragment("<p>not a slide</p>", vec![Box::new(bullets) as Box<dyn DeckPlugin>]);
    assert!(matches!(result, Err(DeckError::NoSlidesError(_))));
}

#[test]
fn test_host_return_polarity() {
    // Returning false suppresses the host's default advance.
    assert!(!plugin::to_host_return(Consumed));
    assert!(plugin::to_host_return(NotConsumed));
    assert_eq!(plugin::from_host_return(false), Consumed);
    assert_eq!(plugin::from_host_return(true), NotConsumed);
}

#[test]
fn test_scale_method_parsing() {
    assert_eq!("zoom".parse::<ScaleMethod>().unwrap(), ScaleMethod::Zoom);
    assert_eq!(
        "Transform".parse::<ScaleMethod>().unwrap(),
        ScaleMethod::Transform
    );
    assert!("magnify".parse::<ScaleMethod>().is_err());
    assert_eq!(ScaleMethod::Zoom.to_string(), "zoom");
}

#[test]
fn test_asset_remote_detection() {
    assert!(Asset::new("https://example.com/deck.css").is_remote());
    assert!(!Asset::new("theme/deck.css").is_remote());

    let tag = Asset::new("https://example.com/deck.css")
        .tag(AssetKind::Stylesheet, true)
        .unwrap();
    assert_eq!(
        tag,
        r#"<link rel="stylesheet" href="https://example.com/deck.css">"#
    );

    let tag = Asset::new("https://example.com/deck.js")
        .tag(AssetKind::Script, false)
        .unwrap();
    assert_eq!(tag, r#"<script src="https://example.com/deck.js"></script>"#);
}
