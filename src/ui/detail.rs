/// Detail view of a single watch
///
/// Shows the image gallery, the full description and the similar-watch
/// section. The "Find Similar Watches" button is disabled while a request
/// is pending.
use iced::widget::{button, column, container, horizontal_rule, horizontal_space, row, scrollable, text};
use iced::{Alignment, Element, Length, Theme};
use iced_aw::Wrap;

use super::grid;
use super::images::ImageCache;
use crate::state::detail::{DetailState, Recommendations};
use crate::Message;

const MAIN_IMAGE_HEIGHT: f32 = 420.0;
const THUMBNAIL_SIZE: f32 = 64.0;

pub fn view<'a>(detail: &'a DetailState, images: &ImageCache) -> Element<'a, Message> {
    let watch = detail.watch();

    let thumbnails = iced::widget::row(watch.image_urls.iter().map(|url| -> Element<'a, Message> {
        let style: fn(&Theme, button::Status) -> button::Style = if url == detail.main_image() {
            button::primary
        } else {
            button::text
        };
        button(images.view(url, THUMBNAIL_SIZE))
            .on_press(Message::ShowImage(url.clone()))
            .width(Length::Fixed(THUMBNAIL_SIZE + 4.0))
            .padding(2)
            .style(style)
            .into()
    }))
    .spacing(8);

    let gallery = column![images.view(detail.main_image(), MAIN_IMAGE_HEIGHT), thumbnails]
        .spacing(12)
        .align_x(Alignment::Center)
        .width(Length::FillPortion(1));

    let find_label = if detail.is_pending() {
        "Searching..."
    } else {
        "Find Similar Watches"
    };
    let find = button(text(find_label).size(16).width(Length::Fill).align_x(Alignment::Center))
        .on_press_maybe((!detail.is_pending()).then_some(Message::FindSimilar))
        .padding(12)
        .width(Length::Fill);

    let info = column![
        text(watch.brand.to_uppercase()).size(14),
        text(&watch.model).size(30),
        horizontal_rule(1),
        row![text("Price").size(18), horizontal_space(), text(&watch.price).size(18)],
        horizontal_rule(1),
        text(&watch.description).size(15),
        horizontal_rule(1),
        spec("Case", &watch.case_material),
        spec("Strap", &watch.strap_material),
        spec("Dial", &watch.dial_color),
        horizontal_rule(1),
        find,
    ]
    .spacing(12)
    .width(Length::FillPortion(1));

    let close = button(text("Close").size(14))
        .on_press(Message::CloseDetail)
        .style(button::secondary);

    let mut body = column![
        row![horizontal_space(), close],
        row![gallery, info].spacing(32),
    ]
    .spacing(16);

    if let Some(section) = recommendations(detail, images) {
        body = body.push(section);
    }

    container(scrollable(body.padding(24)))
        .max_width(960.0)
        .max_height(760.0)
        .style(container::bordered_box)
        .into()
}

fn spec<'a>(label: &'a str, value: &'a str) -> Element<'a, Message> {
    row![text(label).size(14), horizontal_space(), text(value).size(14)].into()
}

/// Similar-watch section; hidden until a request has finished
fn recommendations<'a>(detail: &'a DetailState, images: &ImageCache) -> Option<Element<'a, Message>> {
    let content: Element<'a, Message> = match detail.recommendations() {
        Recommendations::Idle | Recommendations::Pending => return None,
        Recommendations::Failed(message) => text(message).style(text::danger).into(),
        Recommendations::Found(watches) if watches.is_empty() => {
            text("None of the suggested watches are in the collection.").into()
        }
        Recommendations::Found(watches) => {
            let cards: Vec<Element<'a, Message>> = watches
                .iter()
                .map(|watch| {
                    grid::card(watch, detail.card_image(watch.id), images, Message::RecommendationImage)
                })
                .collect();
            Wrap::with_elements(cards).spacing(16.0).line_spacing(16.0).into()
        }
    };

    Some(
        column![
            horizontal_rule(2),
            text("Similar Recommendations").size(22),
            content,
        ]
        .spacing(16)
        .into(),
    )
}
