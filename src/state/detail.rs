/// Detail view state and the recommendation request lifecycle
///
/// Every time the detail view opens (for any watch) it receives a fresh
/// generation number. A recommendation request carries a ticket stamped with
/// that generation; its completion is only applied while the same view is
/// still open and still waiting for it.

use std::collections::HashMap;

use super::data::{Watch, WatchId};

/// Message shown for every recommendation failure
pub const RECOMMENDATION_ERROR_MESSAGE: &str =
    "Sorry, we couldn't find similar watches at this time.";

/// Source of detail view generations
#[derive(Debug, Default)]
pub struct Generations {
    next: u64,
}

impl Generations {
    pub fn next_generation(&mut self) -> u64 {
        self.next = self.next.wrapping_add(1);
        self.next
    }
}

/// Identifies the detail view a recommendation request was issued from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
}

/// Recommendation section of the detail view
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Recommendations {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A request is in flight; the trigger is disabled
    Pending,
    /// Resolved watches, possibly fewer than three or none at all
    Found(Vec<Watch>),
    /// User-facing failure message
    Failed(String),
}

/// State of an open detail view
#[derive(Debug, Clone)]
pub struct DetailState {
    watch: Watch,
    main_image: String,
    generation: u64,
    recommendations: Recommendations,
    /// Image shown on each recommended card, by watch
    card_images: HashMap<WatchId, usize>,
}

impl DetailState {
    /// Open the detail view for a watch with an empty recommendation section
    pub fn open(watch: Watch, generation: u64) -> Self {
        let main_image = watch.cover_image().unwrap_or_default().to_string();
        Self {
            watch,
            main_image,
            generation,
            recommendations: Recommendations::Idle,
            card_images: HashMap::new(),
        }
    }

    pub fn watch(&self) -> &Watch {
        &self.watch
    }

    pub fn main_image(&self) -> &str {
        &self.main_image
    }

    pub fn recommendations(&self) -> &Recommendations {
        &self.recommendations
    }

    pub fn is_pending(&self) -> bool {
        self.recommendations == Recommendations::Pending
    }

    /// Swap the main image, ignoring URLs that do not belong to this watch
    pub fn show_image(&mut self, url: &str) {
        if self.watch.image_urls.iter().any(|u| u == url) {
            self.main_image = url.to_string();
        }
    }

    /// Image index of a recommended card
    pub fn card_image(&self, id: WatchId) -> usize {
        self.card_images.get(&id).copied().unwrap_or(0)
    }

    /// Show image `index` on a recommended card.
    ///
    /// Returns the image URL, or None when the watch is not among the
    /// current recommendations or has no such image.
    pub fn show_card_image(&mut self, id: WatchId, index: usize) -> Option<&str> {
        let Recommendations::Found(watches) = &self.recommendations else {
            return None;
        };
        let url = watches
            .iter()
            .find(|w| w.id == id)
            .and_then(|w| w.image_urls.get(index))?;
        self.card_images.insert(id, index);
        Some(url.as_str())
    }

    /// Start a recommendation request.
    ///
    /// Clears any previous result or error. Returns None while another
    /// request is still pending.
    pub fn begin_request(&mut self) -> Option<RequestTicket> {
        if self.is_pending() {
            return None;
        }
        self.recommendations = Recommendations::Pending;
        self.card_images.clear();
        Some(RequestTicket {
            generation: self.generation,
        })
    }

    /// Apply a finished request.
    ///
    /// Returns false (and changes nothing) when the ticket belongs to another
    /// view generation or no request is pending.
    pub fn complete(&mut self, ticket: RequestTicket, outcome: Result<Vec<Watch>, String>) -> bool {
        if ticket.generation != self.generation || !self.is_pending() {
            return false;
        }
        self.recommendations = match outcome {
            Ok(watches) => Recommendations::Found(watches),
            Err(message) => Recommendations::Failed(message),
        };
        true
    }
}
