use eframe::egui;

use crate::client::{Backend, Route};
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::event_card::{self, CardAction};

pub fn render<B: Backend>(ui: &mut egui::Ui, state: &mut AppState<B>) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("🔍").size(18.0));
        let search = ui.add(
            egui::TextEdit::singleline(&mut state.search_input)
                .hint_text("Search by name, description, location or tag")
                .desired_width(420.0),
        );
        if search.changed() {
            state.search();
        }
        if ui.button("Refresh").clicked() {
            state.refresh_events();
        }
        if state.store().is_authenticated() && ui.add(styles::primary_button("New event")).clicked() {
            state.navigate(Route::NewEvent);
        }
    });
    ui.add_space(10.0);

    let events = state.visible_events();
    let searching = !state.search_input.trim().is_empty();
    let user_id = state.store().user_id();

    if events.is_empty() {
        ui.add_space(40.0);
        ui.vertical_centered(|ui| {
            let text = if searching {
                "No events match your search."
            } else {
                "No events yet."
            };
            ui.label(egui::RichText::new(text).color(colors::TEXT_SECONDARY));
        });
        return;
    }

    let mut action = None;
    egui::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
        for event in &events {
            let editable = user_id.as_deref().is_some_and(|uid| event.is_organised_by(uid));
            if let Some(clicked) = event_card::show(ui, event, editable) {
                action = Some(clicked);
            }
        }
    });

    match action {
        Some(CardAction::Edit(id)) => state.navigate(Route::EditEvent(id)),
        Some(CardAction::Delete(id)) => state.confirm_delete_event = Some(id),
        None => {}
    }
    confirm_delete_event(ui.ctx(), state);
}

/// Confirmation window for a pending event delete
pub(crate) fn confirm_delete_event<B: Backend>(ctx: &egui::Context, state: &mut AppState<B>) {
    let Some(id) = state.confirm_delete_event.clone() else {
        return;
    };
    let name = state
        .store()
        .event(&id)
        .map(|event| event.details.name)
        .unwrap_or_else(|| "this event".to_string());

    let mut open = true;
    let mut confirmed = false;
    egui::Window::new("Delete event?")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut open)
        .show(ctx, |ui| {
            ui.label(format!("Delete \"{}\"? This cannot be undone.", name));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.add(styles::danger_button("Delete")).clicked() {
                    confirmed = true;
                }
                if ui.button("Cancel").clicked() {
                    state.confirm_delete_event = None;
                }
            });
        });

    if confirmed {
        state.delete_event(id);
    } else if !open {
        state.confirm_delete_event = None;
    }
}
