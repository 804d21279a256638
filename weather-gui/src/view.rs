use iced::{
    Alignment, Color, Element, Length,
    widget::{
        Row, Space, button, center, column, container, image, opaque, radio, row, stack, text,
        text_input,
    },
};
use weather_core::{Units, icon::ICON_SIZE};

use crate::{
    app::Message,
    window::{Dialog, DialogKind, DisplayedReading, WeatherWindow},
};

const ERROR_COLOR: Color = Color::from_rgb(0.75, 0.1, 0.1);
const WARNING_COLOR: Color = Color::from_rgb(0.8, 0.5, 0.0);
const BACKDROP_COLOR: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.6);

pub fn window(window: &WeatherWindow) -> Element<'_, Message> {
    let search_pressed = (!window.is_fetching()).then_some(Message::Search);
    let search = row![
        text("Location:"),
        text_input("City name or lat,lon", window.location_input())
            .on_input(Message::LocationChanged)
            .on_submit(Message::Search)
            .width(Length::Fill),
        button("Search").on_press_maybe(search_pressed),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let options = Units::all().iter().map(|&option| {
        let label = option.scale_name();
        let picked = Some(window.units());
        radio(label, option, picked, Message::UnitsSelected).into()
    });
    let units = Row::with_children(options).spacing(16);

    let body: Element<'_, Message> = match window.display() {
        Some(shown) => reading(shown),
        None => Space::with_height(Length::Fill).into(),
    };

    let status = container(text(window.status()).size(13))
        .padding([4, 8])
        .width(Length::Fill)
        .style(container::bordered_box);

    let base = container(column![search, units, body, status].spacing(10))
        .padding(10)
        .width(Length::Fill)
        .height(Length::Fill);

    match window.dialog() {
        Some(message) => modal(base, dialog(message)),
        None => base.into(),
    }
}

fn reading(shown: &DisplayedReading) -> Element<'_, Message> {
    let mut header = column![text(shown.reading.location.as_str()).size(20)]
        .spacing(8)
        .align_x(Alignment::Center)
        .width(Length::Fill);

    if let Some(handle) = &shown.icon {
        header = header.push(
            image(handle.clone())
                .width(Length::Fixed(ICON_SIZE as f32))
                .height(Length::Fixed(ICON_SIZE as f32)),
        );
    }

    header = header.push(text(shown.temperature_text()).size(32));

    let details = column![
        text(shown.conditions_text()),
        text(shown.feels_like_text()),
        text(shown.humidity_text()),
        text(shown.wind_text()),
    ]
    .spacing(4)
    .width(Length::Fill);

    container(column![header, details].spacing(12))
        .padding(10)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(container::bordered_box)
        .into()
}

fn dialog(dialog: &Dialog) -> Element<'_, Message> {
    let color = match dialog.kind {
        DialogKind::Warning => WARNING_COLOR,
        DialogKind::Error => ERROR_COLOR,
    };

    container(
        column![
            text(dialog.title).size(18).color(color),
            text(dialog.message.as_str()),
            button("OK").on_press(Message::DismissDialog),
        ]
        .spacing(12),
    )
    .width(Length::Fixed(320.0))
    .padding(16)
    .style(container::rounded_box)
    .into()
}

/// Lay `content` over a dimmed `base` that swallows input.
fn modal<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    let backdrop = center(opaque(content)).style(|_theme| container::Style {
        background: Some(BACKDROP_COLOR.into()),
        ..container::Style::default()
    });

    stack![base.into(), opaque(backdrop)].into()
}
