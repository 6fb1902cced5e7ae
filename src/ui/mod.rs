/// User interface building blocks
///
/// - `landing.rs` - entry page
/// - `filters.rs` - search bar and filter panel
/// - `grid.rs` - watch cards and the collection grid
/// - `detail.rs` - detail view with recommendations
/// - `images.rs` - fetched image cache

pub mod detail;
pub mod filters;
pub mod grid;
pub mod images;
pub mod landing;

use iced::widget::{button, center, column, container, horizontal_space, mouse_area, opaque, row, stack, text};
use iced::{Alignment, Color, Element, Length};

use crate::Message;

/// Collection page header with the theme toggle
pub fn header<'a>(dark_mode: bool) -> Element<'a, Message> {
    let toggle = button(text(if dark_mode { "Light mode" } else { "Dark mode" }).size(14))
        .on_press(Message::ToggleTheme)
        .style(button::secondary);

    container(
        row![text("Clé du Temps").size(32), horizontal_space(), toggle]
            .align_y(Alignment::Center),
    )
    .padding([16, 32])
    .width(Length::Fill)
    .style(container::bordered_box)
    .into()
}

pub fn footer<'a>(year: i32) -> Element<'a, Message> {
    container(
        column![
            text(format!("© {} Clé du Temps. All rights reserved.", year)).size(14),
            text("A demonstration of fine watchmaking and elegant design.").size(14),
        ]
        .spacing(4)
        .align_x(Alignment::Center),
    )
    .padding(32)
    .width(Length::Fill)
    .center_x(Length::Fill)
    .into()
}

/// Overlay `content` on top of `base`; pressing the backdrop emits `on_blur`
pub fn modal<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| {
                container::Style {
                    background: Some(
                        Color {
                            a: 0.6,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                }
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}
