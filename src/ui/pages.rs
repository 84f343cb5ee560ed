//! Documents shaped like the pages the web UI serves, for driving the
//! workflows without a browser.

use crate::dom::{Display, Document, Element};
use crate::models::{DeviceId, LoggingLevel};
use crate::ui::config_form::{LOGGING_LEVEL_INPUT_ID, UNSAVED_CHANGES_ID};
use crate::ui::device_delete::ROW_ATTRIBUTE;
use crate::ui::notifications::CONTAINER_CLASS;

pub fn config_page() -> Document {
    let mut doc = Document::new();
    let body = doc.body();
    doc.append_child(body, notifications_container());

    let select = LoggingLevel::ALL.into_iter().fold(
        Element::new("select")
            .with_id(LOGGING_LEVEL_INPUT_ID)
            .with_class("form-select")
            .with_attribute("name", "logging_level"),
        |select, level| {
            select.with_child(
                Element::new("option")
                    .with_attribute("value", level.name())
                    .with_text(level.name()),
            )
        },
    );

    doc.append_child(
        body,
        Element::new("form")
            .with_attribute("method", "post")
            .with_child(select)
            .with_child(
                Element::new("div")
                    .with_id(UNSAVED_CHANGES_ID)
                    .with_class("alert alert-warning")
                    .with_display(Display::None)
                    .with_text("You have unsaved changes"),
            ),
    );

    doc
}

/// The unknown devices table with one row per device.
pub fn unknown_devices_page(devices: &[DeviceId]) -> Document {
    let mut doc = Document::new();
    let body = doc.body();
    doc.append_child(body, notifications_container());

    let tbody = devices.iter().fold(Element::new("tbody"), |tbody, device| {
        tbody.with_child(
            Element::new("tr")
                .with_attribute(ROW_ATTRIBUTE, device.as_str())
                .with_child(Element::new("td").with_text(device.as_str()))
                .with_child(
                    Element::new("td").with_child(
                        Element::new("button")
                            .with_class("btn btn-sm btn-danger")
                            .with_text("Delete"),
                    ),
                ),
        )
    });

    doc.append_child(
        body,
        Element::new("table")
            .with_class("table")
            .with_child(tbody),
    );

    doc
}

fn notifications_container() -> Element {
    Element::new("div").with_class(CONTAINER_CLASS)
}
