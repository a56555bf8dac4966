//! Card gallery catalog.
//!
//! Cards are grouped by category in a static JSON document:
//!
//! ```json
//! {
//!   "projects": [
//!     {
//!       "title": "Clock",
//!       "icon": "clock.svg",
//!       "short_description": "In-game clock",
//!       "description": ["Two zones", "Live countdown"],
//!       "link": "/tarkov"
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PortfolioError, PortfolioResult};

/// One gallery card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub icon: String,
    pub short_description: String,
    /// Paragraphs of the long description
    #[serde(default)]
    pub description: Vec<String>,
    pub link: String,
}

/// Cards keyed by category name, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardCatalog {
    categories: IndexMap<String, Vec<Card>>,
}

impl CardCatalog {
    pub fn from_json_str(json: &str) -> PortfolioResult<Self> {
        serde_json::from_str(json).map_err(|e| PortfolioError::CardsLoad(e.to_string()))
    }

    /// Read and parse a catalog file
    pub fn load(path: impl AsRef<Path>) -> PortfolioResult<Self> {
        let path = path.as_ref();
        debug!(?path, "Loading card catalog");

        let json = std::fs::read_to_string(path).map_err(|e| {
            warn!(?path, error = %e, "Failed to read card catalog");
            PortfolioError::CardsLoad(format!("{}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json_str(&json)?;

        debug!(
            categories = catalog.categories.len(),
            cards = catalog.len(),
            "Card catalog loaded"
        );
        Ok(catalog)
    }

    /// Category names in the order the document lists them
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn cards(&self, category: &str) -> &[Card] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// `(category, card)` pairs across the whole catalog
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Card)> {
        self.categories
            .iter()
            .flat_map(|(category, cards)| cards.iter().map(move |card| (category.as_str(), card)))
    }

    /// Total number of cards
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First card whose title matches, ignoring case
    pub fn find(&self, title: &str) -> Option<&Card> {
        let needle = title.trim().to_lowercase();
        self.iter()
            .map(|(_, card)| card)
            .find(|card| card.title.to_lowercase() == needle)
    }
}
