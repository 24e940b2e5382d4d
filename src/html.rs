// ABOUTME: Deck page composition for the bespoke-deck application
// ABOUTME: Wraps slide sections into a full HTML document with assets and plugin wiring

use crate::assets::{Asset, AssetKind};
use crate::config::DeckConfig;
use crate::deck::Deck;
use crate::errors::{DeckError, Result};
use crate::plugin::{DeckPlugin, ManualBullets};
use log::info;
use std::fs;
use std::path::Path;

/// Options for one compose run.
pub struct ComposeOptions {
    pub title: String,
    pub embed_assets: bool,
    pub css: Vec<Asset>,
    pub js: Vec<Asset>,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            title: "Presentation".to_string(),
            embed_assets: true,
            css: Vec::new(),
            js: Vec::new(),
        }
    }
}

/// Compose the finished deck page from a slide fragment file. The slide
/// markup is run through the manual-bullets plugin first, so the page
/// loads with the initial reveal state (slide 0, nothing revealed)
/// already applied.
pub fn compose_deck(
    slides_path: &Path,
    options: &ComposeOptions,
    config: &DeckConfig,
) -> Result<String> {
    info!("Composing deck from slides: {:?}", slides_path);

    if !slides_path.exists() {
        return Err(DeckError::PathNotFoundError(slides_path.to_path_buf()));
    }
    let fragment = fs::read_to_string(slides_path).map_err(DeckError::FileReadError)?;

    let bullets = ManualBullets::new(config)?;
    let deck = Deck::from_fragment(&fragment, vec![Box::new(bullets) as Box<dyn DeckPlugin>])?;

    Ok(render_page(&deck, options, config))
}

fn render_page(deck: &Deck, options: &ComposeOptions, config: &DeckConfig) -> String {
    let mut page = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    page.push_str("<meta charset=\"UTF-8\">\n");
    page.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=0\">\n",
    );
    page.push_str(&format!("<title>{}</title>\n", options.title));

    for css in &options.css {
        match css.tag(AssetKind::Stylesheet, options.embed_assets) {
            Ok(tag) => {
                page.push_str(&tag);
                page.push('\n');
            }
            Err(e) => {
                // Keep composing with the remaining assets.
                info!("Warning: Failed to include CSS asset {}: {}", css.location(), e);
            }
        }
    }

    page.push_str("</head>\n<body>\n");

    // The deck root carries the knobs the client-side stock plugins read.
    page.push_str(&format!(
        "<article class=\"deck\" data-scale-method=\"{}\" data-overview-columns=\"{}\">\n",
        config.scale_method, config.overview_columns
    ));
    page.push_str(&deck.document().to_html());
    page.push_str("</article>\n");

    for js in &options.js {
        match js.tag(AssetKind::Script, options.embed_assets) {
            Ok(tag) => {
                page.push_str(&tag);
                page.push('\n');
            }
            Err(e) => {
                info!("Warning: Failed to include JS asset {}: {}", js.location(), e);
            }
        }
    }

    page.push_str("</body>\n</html>");
    page
}

/// Utility function to write a composed page to a file.
pub fn write_deck_to_file(page: &str, output_path: &Path) -> Result<()> {
    info!("Writing deck to file: {:?}", output_path);

    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(DeckError::FileReadError)?;
        }
    }

    fs::write(output_path, page).map_err(DeckError::FileReadError)?;
    Ok(())
}
