// ABOUTME: Library module for the bespoke-deck program.
// ABOUTME: Contains the deck context, bullet reveal core, and page composition.

// Reexport modules
pub mod assets;
pub mod config;
pub mod deck;
pub mod dom;
pub mod errors;
pub mod html;
pub mod plugin;
pub mod projector;
pub mod registry;
pub mod reveal;
pub mod selector;

// Reexport common types and functions
pub use assets::{Asset, AssetKind};
pub use config::{DeckConfig, ScaleMethod, DEFAULT_BULLET_SELECTOR};
pub use deck::Deck;
pub use dom::Document;
pub use errors::{DeckError, Result};
pub use html::{compose_deck, write_deck_to_file, ComposeOptions};
pub use plugin::{DeckPlugin, ManualBullets};
pub use registry::BulletRegistry;
pub use reveal::{Navigation, RevealMachine, RevealState};
pub use selector::Selector;

#[cfg(test)]
mod tests;
