use eframe::egui;

use crate::client::{AuthPhase, Backend, NoticeLevel, Route};
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};

pub mod account_view;
pub mod event_card;
pub mod event_form;
pub mod events_view;
pub mod login_view;

pub fn render_top_bar<B: Backend>(ctx: &egui::Context, state: &mut AppState<B>) {
    egui::TopBottomPanel::top("top_panel")
        .frame(styles::top_bar_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(
                    colors::TEXT_LIGHT,
                    egui::RichText::new("📅 EventBoard").size(18.0).strong(),
                );
                ui.add_space(16.0);

                let current = state.store().current_route();
                for route in [Route::Home, Route::NewEvent, Route::Account] {
                    let selected = current == route;
                    let label = egui::RichText::new(route.title()).color(colors::TEXT_LIGHT);
                    if ui.selectable_label(selected, label).clicked() {
                        state.navigate(route);
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if state.store().is_authenticated() {
                        if ui.button("Logout").clicked() {
                            state.logout();
                        }
                        if let Some(profile) = state.store().user_profile() {
                            ui.colored_label(colors::TEXT_LIGHT, profile.name);
                        }
                    } else if current != Route::Login && ui.button("Login").clicked() {
                        state.navigate(Route::Login);
                    }

                    if state.is_busy() {
                        ui.spinner();
                    }
                });
            });
        });
}

pub fn render_main_panel<B: Backend>(ctx: &egui::Context, state: &mut AppState<B>) {
    if state.phase() == AuthPhase::Uninitialized {
        egui::CentralPanel::default()
            .frame(styles::dark_frame())
            .show(ctx, render_loading);
        return;
    }

    let route = state.sync_route();
    let frame = match route {
        Route::Login => styles::dark_frame(),
        _ => styles::content_frame(),
    };

    egui::CentralPanel::default().frame(frame).show(ctx, |ui| match &route {
        Route::Login => login_view::render(ui, state),
        Route::Home => events_view::render(ui, state),
        Route::NewEvent | Route::EditEvent(_) => event_form::render(ui, state, &route),
        Route::Account => account_view::render(ui, state),
    });
}

fn render_loading(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.spinner();
            ui.label(egui::RichText::new("Loading...").color(colors::TEXT_LIGHT));
        });
    });
}

/// Stack of notices in the bottom-right corner; click one to dismiss it
pub fn render_toasts<B: Backend>(ctx: &egui::Context, state: &mut AppState<B>) {
    let mut dismissed = None;

    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for (index, toast) in state.toasts().iter().enumerate() {
                let icon = match toast.notice.level {
                    NoticeLevel::Success => "✔",
                    NoticeLevel::Error => "⚠",
                };
                let response = styles::toast_frame(toast.notice.level)
                    .show(ui, |ui| {
                        ui.set_max_width(320.0);
                        ui.colored_label(
                            colors::TEXT_LIGHT,
                            format!("{} {}", icon, toast.notice.message),
                        );
                    })
                    .response
                    .interact(egui::Sense::click());
                if response.clicked() {
                    dismissed = Some(index);
                }
                ui.add_space(6.0);
            }
        });

    if let Some(index) = dismissed {
        state.dismiss_toast(index);
    }
}

/// Label/input row used by the forms
pub(crate) fn form_row(ui: &mut egui::Ui, label: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [130.0, 24.0],
            egui::Label::new(egui::RichText::new(label).color(colors::TEXT_SECONDARY)),
        );
        add_contents(ui);
    });
    ui.add_space(4.0);
}
