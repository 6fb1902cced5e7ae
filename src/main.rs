use chrono::Datelike;
use iced::widget::{column, container, horizontal_space, image, row, scrollable};
use iced::{keyboard, Element, Length, Subscription, Task, Theme};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

mod ai;
mod config;
mod logging;
mod state;
mod ui;

use ai::{GeminiClient, GenerationError, Recommender};
use config::{AiConfig, ConfigError};
use state::catalog::{Catalog, CatalogError};
use state::data::{Watch, WatchId};
use state::detail::{DetailState, Generations, Recommendations, RequestTicket};
use state::filter::{filter_watches, BrandFilter, FilterState};
use ui::images::ImageCache;

/// Which page is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Landing,
    Collection,
}

/// Main application state
struct Showcase {
    /// The immutable watch catalog
    catalog: Catalog,
    /// Client used for "find similar" requests
    recommender: Recommender,
    page: Page,
    dark_mode: bool,
    filters: FilterState,
    /// "All" plus every catalog brand
    brand_options: Vec<BrandFilter>,
    filter_panel_open: bool,
    /// Image shown on each grid card, by watch
    card_images: HashMap<WatchId, usize>,
    /// Open detail view, if any
    detail: Option<DetailState>,
    generations: Generations,
    images: ImageCache,
    year: i32,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User left the landing page
    EnterCollection,
    ToggleTheme,
    SearchChanged(String),
    ToggleFilterPanel,
    BrandSelected(BrandFilter),
    MinPriceChanged(u32),
    MaxPriceChanged(u32),
    ResetFilters,
    /// Show image `index` on a grid card
    CardImage(WatchId, usize),
    /// Show image `index` on a recommended card in the detail view
    RecommendationImage(WatchId, usize),
    /// Open the detail view for a watch
    SelectWatch(WatchId),
    CloseDetail,
    /// Swap the detail view's main image
    ShowImage(String),
    /// User asked for similar watches
    FindSimilar,
    /// Recommendation request finished (user-facing error on failure)
    SimilarFound(RequestTicket, Result<Vec<Watch>, String>),
    /// Background image download finished
    ImageLoaded(String, Result<image::Handle, String>),
}

impl Showcase {
    /// Create a new instance of the application
    fn new(catalog: Catalog, recommender: Recommender, http: reqwest::Client) -> Self {
        let filters = FilterState::new(catalog.price_bounds());
        let brand_options = BrandFilter::options(&catalog);

        if catalog.is_empty() {
            tracing::warn!("catalog is empty; the collection page will show no watches");
        }
        tracing::info!(watches = catalog.len(), "Clé du Temps initialized");

        Showcase {
            catalog,
            recommender,
            page: Page::Landing,
            dark_mode: true,
            filters,
            brand_options,
            filter_panel_open: false,
            card_images: HashMap::new(),
            detail: None,
            generations: Generations::default(),
            images: ImageCache::new(http),
            year: chrono::Local::now().year(),
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::EnterCollection => {
                self.page = Page::Collection;
                let covers: Vec<&str> = self
                    .catalog
                    .watches()
                    .iter()
                    .filter_map(Watch::cover_image)
                    .collect();
                self.images.request(covers)
            }
            Message::ToggleTheme => {
                self.dark_mode = !self.dark_mode;
                Task::none()
            }
            Message::SearchChanged(query) => {
                self.filters.query = query;
                Task::none()
            }
            Message::ToggleFilterPanel => {
                self.filter_panel_open = !self.filter_panel_open;
                Task::none()
            }
            Message::BrandSelected(brand) => {
                self.filters.brand = brand;
                Task::none()
            }
            Message::MinPriceChanged(value) => {
                self.filters.price.set_min(value);
                Task::none()
            }
            Message::MaxPriceChanged(value) => {
                self.filters.price.set_max(value);
                Task::none()
            }
            Message::ResetFilters => {
                self.filters.reset();
                self.filter_panel_open = false;
                Task::none()
            }
            Message::CardImage(id, index) => {
                let Some(url) = self.catalog.get(id).and_then(|w| w.image_urls.get(index)) else {
                    return Task::none();
                };
                self.card_images.insert(id, index);
                self.images.request([url.as_str()])
            }
            Message::RecommendationImage(id, index) => {
                let Some(url) = self
                    .detail
                    .as_mut()
                    .and_then(|detail| detail.show_card_image(id, index))
                else {
                    return Task::none();
                };
                self.images.request([url])
            }
            Message::SelectWatch(id) => {
                let Some(watch) = self.catalog.get(id).cloned() else {
                    tracing::warn!(watch_id = id, "selected watch is not in the catalog");
                    return Task::none();
                };
                tracing::debug!(watch_id = id, model = %watch.model, "opening detail view");

                let task = self
                    .images
                    .request(watch.image_urls.iter().map(String::as_str));
                self.detail = Some(DetailState::open(watch, self.generations.next_generation()));
                task
            }
            Message::CloseDetail => {
                self.detail = None;
                Task::none()
            }
            Message::ShowImage(url) => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.show_image(&url);
                }
                Task::none()
            }
            Message::FindSimilar => self.find_similar(),
            Message::SimilarFound(ticket, outcome) => {
                let Some(detail) = self.detail.as_mut() else {
                    tracing::debug!("detail view closed; discarding recommendations");
                    return Task::none();
                };
                if !detail.complete(ticket, outcome) {
                    tracing::debug!("detail view changed; discarding recommendations");
                    return Task::none();
                }
                match detail.recommendations() {
                    Recommendations::Found(watches) => {
                        let covers: Vec<String> = watches
                            .iter()
                            .filter_map(|w| w.cover_image().map(str::to_string))
                            .collect();
                        self.images.request(covers.iter().map(String::as_str))
                    }
                    _ => Task::none(),
                }
            }
            Message::ImageLoaded(url, result) => {
                self.images.finish(url, result);
                Task::none()
            }
        }
    }

    /// Start a recommendation request for the open detail view
    fn find_similar(&mut self) -> Task<Message> {
        let Some(detail) = self.detail.as_mut() else {
            return Task::none();
        };
        let Some(ticket) = detail.begin_request() else {
            // Already waiting for an answer
            return Task::none();
        };

        let watch = detail.watch().clone();
        let catalog = self.catalog.clone();
        let recommender = self.recommender.clone();

        tracing::info!(watch_id = watch.id, "requesting similar watches");

        Task::perform(
            async move {
                recommender
                    .find_similar(&watch, &catalog)
                    .await
                    .map_err(|error| {
                        tracing::error!(%error, watch_id = watch.id, "finding similar watches failed");
                        error.user_message().to_string()
                    })
            },
            move |outcome| Message::SimilarFound(ticket, outcome),
        )
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        match self.page {
            Page::Landing => ui::landing::view(self.catalog.len()),
            Page::Collection => self.collection(),
        }
    }

    fn collection(&self) -> Element<Message> {
        let visible = filter_watches(self.catalog.watches(), &self.filters);

        let mut body = column![ui::filters::toolbar(&self.filters, self.filter_panel_open)].spacing(24);
        if self.filter_panel_open {
            body = body.push(row![
                horizontal_space(),
                ui::filters::panel(&self.filters, &self.brand_options)
            ]);
        }
        body = body
            .push(ui::grid::grid(&visible, &self.card_images, &self.images))
            .push(ui::footer(self.year));

        let page = column![
            ui::header(self.dark_mode),
            scrollable(container(body).padding(32).width(Length::Fill)).height(Length::Fill),
        ];

        match &self.detail {
            Some(detail) => ui::modal(page, ui::detail::view(detail, &self.images), Message::CloseDetail),
            None => page.into(),
        }
    }

    /// Escape closes the detail view
    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|key, _modifiers| match key {
            keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::CloseDetail),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        if self.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

/// Reasons the application cannot start
#[derive(Debug, Error)]
enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("cannot create HTTP client: {0}")]
    Http(#[from] GenerationError),

    #[error("user interface failed: {0}")]
    Ui(#[from] iced::Error),
}

fn main() -> Result<(), StartupError> {
    logging::init();

    let result = run();
    if let Err(error) = &result {
        tracing::error!(%error, "Clé du Temps stopped");
    }
    result
}

fn run() -> Result<(), StartupError> {
    let config = AiConfig::from_env()?;
    let catalog = Catalog::bundled()?;

    let timeout = config.timeout;
    let gemini = GeminiClient::new(config)?;
    let recommender = Recommender::new(Arc::new(gemini), timeout);
    let http = reqwest::Client::builder()
        .build()
        .map_err(GenerationError::from)?;

    iced::application("Clé du Temps", Showcase::update, Showcase::view)
        .theme(Showcase::theme)
        .subscription(Showcase::subscription)
        .window_size((1280.0, 860.0))
        .centered()
        .run_with(move || (Showcase::new(catalog, recommender, http), Task::none()))?;

    Ok(())
}
