/// Watch cards and the responsive collection grid
use iced::widget::{button, column, container, horizontal_space, row, text};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;
use std::collections::HashMap;

use super::images::ImageCache;
use crate::state::data::{Watch, WatchId};
use crate::Message;

const CARD_WIDTH: f32 = 300.0;
const CARD_IMAGE_HEIGHT: f32 = 260.0;

pub const EMPTY_TITLE: &str = "No Watches Found";
pub const EMPTY_HINT: &str = "Try adjusting your filters or search to find what you're looking for.";

/// Index of the previous image, wrapping to the last one
pub fn prev_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current == 0 || current >= len {
        len - 1
    } else {
        current - 1
    }
}

/// Index of the next image, wrapping to the first one
pub fn next_index(current: usize, len: usize) -> usize {
    if len == 0 || current + 1 >= len {
        0
    } else {
        current + 1
    }
}

/// A single watch card; selecting it opens the detail view.
///
/// Cards with several images get previous/next controls that cycle
/// through them without opening the detail view; `on_cycle` builds the
/// message carrying the newly chosen index.
pub fn card<'a>(
    watch: &'a Watch,
    image_index: usize,
    images: &ImageCache,
    on_cycle: fn(WatchId, usize) -> Message,
) -> Element<'a, Message> {
    let count = watch.image_urls.len();
    let index = if image_index < count { image_index } else { 0 };
    let url = watch.image_urls.get(index).map(String::as_str).unwrap_or_default();

    let mut content = column![images.view(url, CARD_IMAGE_HEIGHT)];

    if count > 1 {
        content = content.push(
            row![
                button(text("<"))
                    .on_press(on_cycle(watch.id, prev_index(index, count)))
                    .style(button::text),
                horizontal_space(),
                text(format!("{} / {}", index + 1, count)).size(12),
                horizontal_space(),
                button(text(">"))
                    .on_press(on_cycle(watch.id, next_index(index, count)))
                    .style(button::text),
            ]
            .align_y(Alignment::Center)
            .padding([0, 8]),
        );
    }

    let info = column![
        text(watch.brand.to_uppercase()).size(12),
        text(&watch.model).size(20),
        text(&watch.price).size(16),
    ]
    .spacing(4)
    .padding(16);

    button(content.push(info))
        .on_press(Message::SelectWatch(watch.id))
        .padding(0)
        .width(Length::Fixed(CARD_WIDTH))
        .style(button::secondary)
        .into()
}

/// What the collection area shows for a set of visible watches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridContent {
    /// The "No Watches Found" panel
    Empty,
    /// This many cards
    Cards(usize),
}

pub fn content(watches: &[&Watch]) -> GridContent {
    match watches.len() {
        0 => GridContent::Empty,
        count => GridContent::Cards(count),
    }
}

/// Grid of the visible watches, or an explicit empty state
pub fn grid<'a>(
    watches: &[&'a Watch],
    card_images: &HashMap<WatchId, usize>,
    images: &ImageCache,
) -> Element<'a, Message> {
    if content(watches) == GridContent::Empty {
        return empty_state();
    }

    let cards: Vec<Element<'a, Message>> = watches
        .iter()
        .map(|watch| {
            let index = card_images.get(&watch.id).copied().unwrap_or(0);
            card(*watch, index, images, Message::CardImage)
        })
        .collect();

    Wrap::with_elements(cards)
        .spacing(24.0)
        .line_spacing(24.0)
        .into()
}

fn empty_state<'a>() -> Element<'a, Message> {
    container(
        column![
            text(EMPTY_TITLE).size(24),
            text(EMPTY_HINT).size(16),
        ]
        .spacing(8)
        .align_x(Alignment::Center),
    )
    .padding(48)
    .width(Length::Fill)
    .center_x(Length::Fill)
    .style(container::rounded_box)
    .into()
}
