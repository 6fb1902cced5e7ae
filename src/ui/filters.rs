/// Search bar and filter panel
use iced::widget::{button, column, container, pick_list, row, slider, text, text_input};
use iced::{Alignment, Element, Length, Theme};

use crate::state::filter::{format_price, BrandFilter, FilterState};
use crate::Message;

/// Search box plus the button toggling the filter panel
pub fn toolbar<'a>(filters: &'a FilterState, panel_open: bool) -> Element<'a, Message> {
    let search = text_input("Search by brand or model...", &filters.query)
        .on_input(Message::SearchChanged)
        .padding(10)
        .width(Length::Fill);

    let style: fn(&Theme, button::Status) -> button::Style = if panel_open {
        button::primary
    } else {
        button::secondary
    };
    let toggle = button(text(if panel_open { "Hide Filters" } else { "Filter" }))
        .on_press(Message::ToggleFilterPanel)
        .padding(10)
        .style(style);

    row![search, toggle]
        .spacing(16)
        .align_y(Alignment::Center)
        .into()
}

/// Price range sliders, brand chooser and reset action
pub fn panel<'a>(filters: &'a FilterState, brands: &'a [BrandFilter]) -> Element<'a, Message> {
    let range = filters.price;
    let bounds = range.bounds();

    let price = column![
        row![
            text("Price Range").size(16),
            iced::widget::horizontal_space(),
            text(format!("{} - {}", format_price(range.min()), format_price(range.max()))).size(14),
        ]
        .align_y(Alignment::Center),
        text("Minimum").size(12),
        slider(bounds.min..=bounds.max, range.min(), Message::MinPriceChanged),
        text("Maximum").size(12),
        slider(bounds.min..=bounds.max, range.max(), Message::MaxPriceChanged),
    ]
    .spacing(8);

    let brand = column![
        text("Brand").size(16),
        pick_list(brands, Some(filters.brand.clone()), Message::BrandSelected).width(Length::Fill),
    ]
    .spacing(8);

    let reset = button(text("Reset Filters").size(14))
        .on_press(Message::ResetFilters)
        .style(button::secondary)
        .width(Length::Fill);

    container(column![price, brand, reset].spacing(20))
        .padding(16)
        .width(Length::Fixed(320.0))
        .style(container::rounded_box)
        .into()
}
