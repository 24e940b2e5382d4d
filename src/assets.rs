// ABOUTME: Stylesheet and script asset handling for deck composition
// ABOUTME: Loads local files or remote URLs and renders them as link/style/script tags

use crate::errors::{DeckError, Result};
use log::info;
use reqwest::blocking::Client;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Stylesheet,
    Script,
}

/// A CSS or JS asset referenced by the deck page.
#[derive(Debug, Clone)]
pub enum Asset {
    Local(PathBuf),
    Remote(Url),
}

impl Asset {
    /// Treat anything that parses as an http(s) URL as remote; everything
    /// else is a local path.
    pub fn new(spec: &str) -> Asset {
        match Url::parse(spec) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Asset::Remote(url),
            _ => Asset::Local(PathBuf::from(spec)),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Asset::Remote(_))
    }

    pub fn location(&self) -> String {
        match self {
            Asset::Local(path) => path.display().to_string(),
            Asset::Remote(url) => url.to_string(),
        }
    }

    /// Fetch or read the asset body.
    pub fn content(&self) -> Result<String> {
        match self {
            Asset::Local(path) => read_local(path),
            Asset::Remote(url) => fetch_remote(url),
        }
    }

    /// Render the asset as an HTML tag. Local assets embed their content
    /// when `embed` is set; remote assets always link.
    pub fn tag(&self, kind: AssetKind, embed: bool) -> Result<String> {
        if self.is_remote() || !embed {
            return Ok(match kind {
                AssetKind::Stylesheet => {
                    format!(r#"<link rel="stylesheet" href="{}">"#, self.location())
                }
                AssetKind::Script => format!(r#"<script src="{}"></script>"#, self.location()),
            });
        }
        let content = self.content()?;
        Ok(match kind {
            AssetKind::Stylesheet => format!("<style>{}</style>", content),
            AssetKind::Script => format!("<script>{}</script>", content),
        })
    }
}

fn read_local(path: &Path) -> Result<String> {
    info!("Reading local asset: {:?}", path);
    if !path.exists() {
        return Err(DeckError::PathNotFoundError(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(DeckError::FileReadError)
}

fn fetch_remote(url: &Url) -> Result<String> {
    info!("Fetching remote asset: {}", url);

    let client = Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .map_err(DeckError::FetchError)?;

    // Up to 3 attempts with exponential backoff.
    let mut retry_delay = 1000;
    let mut last_error = None;

    for attempt in 1..=3 {
        match client.get(url.as_str()).send() {
            Ok(response) => {
                if response.status().is_success() {
                    return response.text().map_err(DeckError::FetchError);
                }
                last_error = Some(DeckError::InvalidAssetPath(format!(
                    "{} returned HTTP {}",
                    url,
                    response.status()
                )));
            }
            Err(e) => {
                last_error = Some(DeckError::FetchError(e));
            }
        }

        info!(
            "Fetch attempt {} failed, retrying in {} ms",
            attempt, retry_delay
        );
        std::thread::sleep(Duration::from_millis(retry_delay));
        retry_delay *= 2;
    }

    Err(last_error
        .unwrap_or_else(|| DeckError::InvalidAssetPath(format!("Unable to fetch {}", url))))
}
