use iced::widget::{button, column, container, text};
use iced::{Alignment, Element, Length};

use crate::Message;

/// Entry page leading into the collection
pub fn view<'a>(watch_count: usize) -> Element<'a, Message> {
    let content = column![
        text("Clé du Temps").size(72),
        text(
            "Discover a curated collection of the world's finest timepieces. \
             A symphony of craftsmanship and timeless elegance awaits."
        )
        .size(18)
        .width(Length::Fixed(560.0))
        .align_x(Alignment::Center),
        text(format!("{} timepieces on display", watch_count)).size(14),
        button(text("See The Collection").size(18))
            .on_press(Message::EnterCollection)
            .padding([12, 32]),
    ]
    .spacing(24)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
