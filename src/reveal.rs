// ABOUTME: Reveal state machine for manual bullet stepping
// ABOUTME: Tracks the active (slide, bullet) pair across navigation events

/// Whether a navigation event was fully handled by the bullet machine.
/// `Consumed` means the deck's default slide advance must be suppressed;
/// `NotConsumed` lets it proceed. The host's falsy-return convention is
/// translated only at the plugin shim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Consumed,
    NotConsumed,
}

impl Navigation {
    pub fn is_consumed(self) -> bool {
        self == Navigation::Consumed
    }
}

/// The active position within the deck. `bullet` is `None` while nothing
/// on the slide has been revealed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealState {
    pub slide: usize,
    pub bullet: Option<usize>,
}

/// Steps the active bullet across `next`/`prev` events, given only the
/// per-slide bullet counts. Rendering is layered on top; the machine
/// itself never touches markup.
#[derive(Debug, Clone)]
pub struct RevealMachine {
    counts: Vec<usize>,
    state: RevealState,
}

impl RevealMachine {
    /// A machine over `counts.len()` slides, starting at slide 0 with
    /// nothing revealed. Decks have at least one slide.
    pub fn new(counts: Vec<usize>) -> RevealMachine {
        debug_assert!(!counts.is_empty());
        RevealMachine {
            counts,
            state: RevealState {
                slide: 0,
                bullet: None,
            },
        }
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Set the position directly. Out-of-range indices are a caller bug,
    /// not a recoverable condition.
    pub fn activate(&mut self, slide: usize, bullet: Option<usize>) {
        debug_assert!(slide < self.counts.len());
        debug_assert!(bullet.map_or(true, |b| b < self.counts[slide]));
        self.state = RevealState { slide, bullet };
    }

    /// Reveal the next bullet on the active slide, or fall through to the
    /// next slide. Falling through pre-positions the state; the slide
    /// change the host performs afterwards fires a slide event that
    /// resets it anyway.
    pub fn next(&mut self) -> Navigation {
        let slide = self.state.slide;
        let following = self.state.bullet.map_or(0, |b| b + 1);
        if following < self.counts[slide] {
            self.activate(slide, Some(following));
            Navigation::Consumed
        } else if slide + 1 < self.counts.len() {
            self.activate(slide + 1, None);
            Navigation::NotConsumed
        } else {
            Navigation::NotConsumed
        }
    }

    /// Step back one bullet (possibly to "nothing revealed"), or fall
    /// through to the previous slide with all of its bullets shown.
    pub fn prev(&mut self) -> Navigation {
        let slide = self.state.slide;
        match self.state.bullet {
            Some(bullet) => {
                self.activate(slide, bullet.checked_sub(1));
                Navigation::Consumed
            }
            None if slide > 0 => {
                let last = self.counts[slide - 1].checked_sub(1);
                self.activate(slide - 1, last);
                Navigation::NotConsumed
            }
            None => Navigation::NotConsumed,
        }
    }

    /// Unconditional reset for out-of-band slide changes (overview jump,
    /// hash navigation, direct click). This is the authority that keeps
    /// bullet state consistent with the deck's own idea of the active
    /// slide.
    pub fn on_slide_changed(&mut self, slide: usize) {
        self.activate(slide, None);
    }
}
