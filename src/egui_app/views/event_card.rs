//! Event card shared by the home and account views.

use eframe::egui;

use crate::egui_app::theme::{colors, styles};
use crate::shared::event::Event;

/// What the user asked for from a card's buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    Edit(String),
    Delete(String),
}

fn schedule(event: &Event) -> String {
    let d = &event.details;
    if d.start == d.end {
        format!(
            "{}  {} – {}",
            d.start.format("%a %d %b %Y"),
            d.start_time.format("%H:%M"),
            d.end_time.format("%H:%M")
        )
    } else {
        format!(
            "{} {} – {} {}",
            d.start.format("%a %d %b %Y"),
            d.start_time.format("%H:%M"),
            d.end.format("%a %d %b %Y"),
            d.end_time.format("%H:%M")
        )
    }
}

/// Draw one card; `editable` adds edit/delete buttons
pub fn show(ui: &mut egui::Ui, event: &Event, editable: bool) -> Option<CardAction> {
    let accent = styles::event_color(&event.details.color);
    let mut action = None;

    styles::card_frame(accent).show(ui, |ui| {
        ui.set_width(ui.available_width());
        let details = &event.details;

        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size([10.0, 10.0].into(), egui::Sense::hover());
            ui.painter().circle_filled(rect.center(), 5.0, accent);
            ui.label(
                egui::RichText::new(&details.name)
                    .size(18.0)
                    .strong()
                    .color(colors::TEXT_DARK),
            );

            if editable {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add(styles::danger_button("Delete")).clicked() {
                        action = Some(CardAction::Delete(event.id.clone()));
                    }
                    if ui.add(styles::primary_button("Edit")).clicked() {
                        action = Some(CardAction::Edit(event.id.clone()));
                    }
                });
            }
        });

        ui.label(egui::RichText::new(schedule(event)).color(colors::TEXT_SECONDARY));
        if !details.location.is_empty() {
            ui.label(egui::RichText::new(format!("📍 {}", details.location)).color(colors::TEXT_DARK));
        }
        if !details.meeting_link.is_empty() {
            ui.hyperlink_to(format!("🔗 {}", details.meeting_link), &details.meeting_link);
        }
        if !details.contact_email.is_empty() {
            ui.label(
                egui::RichText::new(format!("✉ {}", details.contact_email)).color(colors::TEXT_SECONDARY),
            );
        }
        if !details.description.is_empty() {
            ui.add_space(4.0);
            ui.label(egui::RichText::new(&details.description).color(colors::TEXT_DARK));
        }
        if !details.tags.is_empty() {
            ui.add_space(4.0);
            ui.horizontal_wrapped(|ui| {
                for tag in &details.tags {
                    egui::Frame::new()
                        .fill(colors::TAG_BG)
                        .corner_radius(egui::CornerRadius::same(10))
                        .inner_margin(egui::Margin::symmetric(8, 2))
                        .show(ui, |ui| {
                            ui.label(egui::RichText::new(tag).small().color(colors::TEXT_DARK));
                        });
                }
            });
        }
    });

    action
}
