use eframe::egui;

use crate::client::{Backend, Route};
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::event_card::{self, CardAction};
use crate::egui_app::views::events_view::confirm_delete_event;
use crate::egui_app::views::form_row;
use crate::shared::profile::ProfileUpdate;

pub fn render<B: Backend>(ui: &mut egui::Ui, state: &mut AppState<B>) {
    let Some(profile) = state.store().user_profile() else {
        ui.vertical_centered(|ui| {
            ui.spinner();
            ui.label(egui::RichText::new("Loading profile...").color(colors::TEXT_SECONDARY));
        });
        return;
    };
    if state.profile_form.is_none() {
        state.profile_form = Some(ProfileUpdate {
            name: profile.name.clone(),
            description: profile.description.clone(),
        });
    }

    egui::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
        ui.heading(egui::RichText::new(format!("Hello, {}", profile.name)).color(colors::TEXT_DARK));
        ui.label(egui::RichText::new(&profile.email).color(colors::TEXT_SECONDARY));
        ui.add_space(12.0);

        profile_section(ui, state);
        ui.add_space(12.0);
        account_section(ui, state);
        ui.add_space(12.0);
        own_events_section(ui, state);
        ui.add_space(12.0);
        danger_section(ui, state);
    });

    confirm_delete_event(ui.ctx(), state);
    confirm_delete_account(ui.ctx(), state);
}

fn profile_section<B: Backend>(ui: &mut egui::Ui, state: &mut AppState<B>) {
    styles::section_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new("Profile").strong().color(colors::TEXT_DARK));
        ui.add_space(6.0);

        if let Some(form) = state.profile_form.as_mut() {
            form_row(ui, "Name", |ui| {
                ui.add(egui::TextEdit::singleline(&mut form.name).desired_width(320.0));
            });
            form_row(ui, "About you", |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut form.description)
                        .desired_rows(3)
                        .desired_width(320.0),
                );
            });
        }
        if ui.add_enabled(!state.is_busy(), styles::primary_button("Save profile")).clicked() {
            state.save_profile();
        }
    });
}

fn account_section<B: Backend>(ui: &mut egui::Ui, state: &mut AppState<B>) {
    styles::section_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new("Account details").strong().color(colors::TEXT_DARK));
        ui.label(
            egui::RichText::new("Leave a field blank to keep it unchanged.")
                .small()
                .color(colors::TEXT_SECONDARY),
        );
        ui.add_space(6.0);

        let form = &mut state.account_form;
        form_row(ui, "New email", |ui| {
            ui.add(egui::TextEdit::singleline(&mut form.email).desired_width(320.0));
        });
        form_row(ui, "New password", |ui| {
            ui.add(egui::TextEdit::singleline(&mut form.password).password(true).desired_width(320.0));
        });
        form_row(ui, "Confirm", |ui| {
            ui.add(
                egui::TextEdit::singleline(&mut form.confirm_password)
                    .password(true)
                    .desired_width(320.0),
            );
        });
        if ui.add_enabled(!state.is_busy(), styles::primary_button("Update account")).clicked() {
            state.save_account_details();
        }
    });
}

fn own_events_section<B: Backend>(ui: &mut egui::Ui, state: &mut AppState<B>) {
    ui.label(egui::RichText::new("Your events").strong().color(colors::TEXT_DARK));
    let events = state.store().own_events();
    if events.is_empty() {
        ui.label(egui::RichText::new("You have not listed any events.").color(colors::TEXT_SECONDARY));
        return;
    }

    let mut action = None;
    for event in &events {
        if let Some(clicked) = event_card::show(ui, event, true) {
            action = Some(clicked);
        }
    }
    match action {
        Some(CardAction::Edit(id)) => state.navigate(Route::EditEvent(id)),
        Some(CardAction::Delete(id)) => state.confirm_delete_event = Some(id),
        None => {}
    }
}

fn danger_section<B: Backend>(ui: &mut egui::Ui, state: &mut AppState<B>) {
    styles::section_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new("Delete account").strong().color(colors::DANGER));
        ui.label(
            egui::RichText::new("Removes your profile and sign-in. Events you organised stay listed.")
                .color(colors::TEXT_SECONDARY),
        );
        if ui.add(styles::danger_button("Delete my account")).clicked() {
            state.confirm_delete_account = true;
        }
    });
}

fn confirm_delete_account<B: Backend>(ctx: &egui::Context, state: &mut AppState<B>) {
    if !state.confirm_delete_account {
        return;
    }

    let mut open = true;
    let mut confirmed = false;
    egui::Window::new("Delete account?")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut open)
        .show(ctx, |ui| {
            ui.label("Your profile and login will be deleted. This cannot be undone.");
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.add(styles::danger_button("Delete account")).clicked() {
                    confirmed = true;
                }
                if ui.button("Cancel").clicked() {
                    state.confirm_delete_account = false;
                }
            });
        });

    if confirmed {
        state.delete_account();
    } else if !open {
        state.confirm_delete_account = false;
    }
}
