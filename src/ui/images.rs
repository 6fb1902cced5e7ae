/// In-memory cache of catalog images fetched over HTTP
///
/// Each URL is fetched at most once per process. Failures are logged and
/// rendered as a placeholder; they are never retried automatically.

use iced::widget::{container, image, text};
use iced::{ContentFit, Element, Length, Task};
use std::collections::HashMap;

use crate::Message;

#[derive(Debug, Clone)]
pub enum ImageSlot {
    Loading,
    Ready(image::Handle),
    Failed,
}

#[derive(Debug)]
pub struct ImageCache {
    http: reqwest::Client,
    slots: HashMap<String, ImageSlot>,
}

impl ImageCache {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            slots: HashMap::new(),
        }
    }

    pub fn get(&self, url: &str) -> Option<&ImageSlot> {
        self.slots.get(url)
    }

    /// Mark unseen URLs as loading and return them
    fn claim<'a, I>(&mut self, urls: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut claimed = Vec::new();
        for url in urls {
            if !self.slots.contains_key(url) {
                self.slots.insert(url.to_string(), ImageSlot::Loading);
                claimed.push(url.to_string());
            }
        }
        claimed
    }

    /// Start background fetches for every URL not requested before
    pub fn request<'a, I>(&mut self, urls: I) -> Task<Message>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let tasks: Vec<Task<Message>> = self
            .claim(urls)
            .into_iter()
            .map(|url| {
                let http = self.http.clone();
                Task::perform(fetch_image(http, url.clone()), move |result| {
                    Message::ImageLoaded(url.clone(), result)
                })
            })
            .collect();
        Task::batch(tasks)
    }

    /// Store the outcome of a fetch
    pub fn finish(&mut self, url: String, result: Result<image::Handle, String>) {
        let slot = match result {
            Ok(handle) => ImageSlot::Ready(handle),
            Err(error) => {
                tracing::warn!(%url, %error, "failed to load image");
                ImageSlot::Failed
            }
        };
        self.slots.insert(url, slot);
    }

    /// Render an image, or a placeholder while it loads or after it failed
    pub fn view<'a>(&self, url: &str, height: f32) -> Element<'a, Message> {
        match self.get(url) {
            Some(ImageSlot::Ready(handle)) => image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fixed(height))
                .content_fit(ContentFit::Cover)
                .into(),
            Some(ImageSlot::Failed) => placeholder("Image unavailable", height),
            _ => placeholder("Loading...", height),
        }
    }
}

fn placeholder<'a>(label: &'a str, height: f32) -> Element<'a, Message> {
    container(text(label).size(14))
        .width(Length::Fill)
        .height(Length::Fixed(height))
        .center_x(Length::Fill)
        .center_y(Length::Fixed(height))
        .style(container::rounded_box)
        .into()
}

/// Download one image
async fn fetch_image(http: reqwest::Client, url: String) -> Result<image::Handle, String> {
    let response = http
        .get(&url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| e.to_string())?;
    let bytes = response.bytes().await.map_err(|e| e.to_string())?;
    tracing::debug!(%url, size = bytes.len(), "image downloaded");
    Ok(image::Handle::from_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_skips_known_urls() {
        let mut cache = ImageCache::new(reqwest::Client::new());

        let first = cache.claim(["a.jpg", "b.jpg", "a.jpg"]);
        assert_eq!(first, vec!["a.jpg".to_string(), "b.jpg".to_string()]);

        let second = cache.claim(["b.jpg", "c.jpg"]);
        assert_eq!(second, vec!["c.jpg".to_string()]);
        assert!(matches!(cache.get("c.jpg"), Some(ImageSlot::Loading)));
    }

    #[test]
    fn test_failed_fetch_is_not_reclaimed() {
        let mut cache = ImageCache::new(reqwest::Client::new());
        cache.claim(["broken.jpg"]);
        cache.finish("broken.jpg".to_string(), Err("404".to_string()));

        assert!(matches!(cache.get("broken.jpg"), Some(ImageSlot::Failed)));
        assert!(cache.claim(["broken.jpg"]).is_empty());
    }

    #[test]
    fn test_finish_stores_handle() {
        let mut cache = ImageCache::new(reqwest::Client::new());
        cache.claim(["ok.jpg"]);
        cache.finish("ok.jpg".to_string(), Ok(image::Handle::from_bytes(vec![0u8; 4])));
        assert!(matches!(cache.get("ok.jpg"), Some(ImageSlot::Ready(_))));
    }
}
