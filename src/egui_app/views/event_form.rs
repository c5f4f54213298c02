use eframe::egui;

use crate::client::{Backend, Route};
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::form_row;

pub fn render<B: Backend>(ui: &mut egui::Ui, state: &mut AppState<B>, route: &Route) {
    if let Route::EditEvent(id) = route {
        if state.event_form.editing.as_deref() != Some(id.as_str()) {
            ui.label(egui::RichText::new("This event is not in the current list.").color(colors::ERROR));
            if ui.button("Back to events").clicked() {
                state.navigate(Route::Home);
            }
            return;
        }
    }

    ui.heading(egui::RichText::new(route.title()).color(colors::TEXT_DARK));
    ui.add_space(12.0);

    egui::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
        let form = &mut state.event_form;
        form_row(ui, "Name", |ui| {
            ui.add(egui::TextEdit::singleline(&mut form.name).desired_width(360.0));
        });
        form_row(ui, "Starts", |ui| {
            ui.add(egui::TextEdit::singleline(&mut form.start).hint_text("YYYY-MM-DD").desired_width(110.0));
            ui.add(egui::TextEdit::singleline(&mut form.start_time).hint_text("HH:MM").desired_width(60.0));
        });
        form_row(ui, "Ends", |ui| {
            ui.add(egui::TextEdit::singleline(&mut form.end).hint_text("YYYY-MM-DD").desired_width(110.0));
            ui.add(egui::TextEdit::singleline(&mut form.end_time).hint_text("HH:MM").desired_width(60.0));
        });
        form_row(ui, "Location", |ui| {
            ui.add(egui::TextEdit::singleline(&mut form.location).desired_width(360.0));
        });
        form_row(ui, "Meeting link", |ui| {
            ui.add(egui::TextEdit::singleline(&mut form.meeting_link).desired_width(360.0));
        });
        form_row(ui, "Contact email", |ui| {
            ui.add(egui::TextEdit::singleline(&mut form.contact_email).desired_width(360.0));
        });
        form_row(ui, "Colour", |ui| {
            ui.color_edit_button_srgb(&mut form.color);
        });
        form_row(ui, "Tags", |ui| {
            ui.add(
                egui::TextEdit::singleline(&mut form.tags)
                    .hint_text("comma, separated")
                    .desired_width(360.0),
            );
        });
        form_row(ui, "Description", |ui| {
            ui.add(
                egui::TextEdit::multiline(&mut form.description)
                    .desired_rows(5)
                    .desired_width(360.0),
            );
        });

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            ui.add_space(134.0);
            let label = if state.event_form.is_editing() { "Save changes" } else { "Add event" };
            if ui.add_enabled(!state.is_busy(), styles::primary_button(label)).clicked() {
                state.submit_event_form();
            }
            if ui.button("Cancel").clicked() {
                let back = if state.event_form.is_editing() { Route::Account } else { Route::Home };
                state.navigate(back);
            }
        });
    });
}
