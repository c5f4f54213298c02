use eframe::egui;

use crate::client::Backend;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};

const INPUT_WIDTH: f32 = 280.0;
const LABEL_WIDTH: f32 = 90.0;

fn field(ui: &mut egui::Ui, offset: f32, label: &str, value: &mut String, password: bool) -> egui::Response {
    ui.horizontal(|ui| {
        ui.add_space(offset);
        ui.add_sized(
            [LABEL_WIDTH, 24.0],
            egui::Label::new(egui::RichText::new(label).color(colors::TEXT_SECONDARY)),
        );
        ui.add_sized(
            [INPUT_WIDTH, 28.0],
            egui::TextEdit::singleline(value).password(password),
        )
    })
    .inner
}

pub fn render<B: Backend>(ui: &mut egui::Ui, state: &mut AppState<B>) {
    let available_rect = ui.available_rect_before_wrap();
    let offset = ((available_rect.width() - INPUT_WIDTH - LABEL_WIDTH - 20.0) / 2.0).max(0.0);

    ui.vertical_centered(|ui| {
        let total_height = if state.is_signup_mode { 420.0 } else { 260.0 };
        ui.add_space(((available_rect.height() - total_height) / 2.0).max(0.0));

        ui.label(
            egui::RichText::new(if state.is_signup_mode { "Create Account" } else { "Welcome Back" })
                .size(24.0)
                .color(colors::TEXT_LIGHT),
        );
        ui.add_space(20.0);
    });

    let last = if state.is_signup_mode {
        let form = &mut state.signup_form;
        field(ui, offset, "Name:", &mut form.name, false);
        field(ui, offset, "About you:", &mut form.description, false);
        field(ui, offset, "Email:", &mut form.email, false);
        field(ui, offset, "Password:", &mut form.password, true);
        field(ui, offset, "Confirm:", &mut state.confirm_password, true)
    } else {
        let form = &mut state.login_form;
        field(ui, offset, "Email:", &mut form.email, false);
        field(ui, offset, "Password:", &mut form.password, true)
    };
    // enter in the last field submits
    let mut submitted = last.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

    ui.add_space(20.0);
    ui.horizontal(|ui| {
        let button_width = 130.0;
        ui.add_space(((available_rect.width() - button_width * 2.0 - 10.0) / 2.0).max(0.0));

        let primary = if state.is_signup_mode { "Sign Up" } else { "Login" };
        if ui
            .add_enabled(!state.is_busy(), styles::primary_button(primary).min_size([button_width, 32.0].into()))
            .clicked()
        {
            submitted = true;
        }

        ui.add_space(10.0);

        let secondary = if state.is_signup_mode { "Back to Login" } else { "Create Account" };
        if ui
            .add_sized(
                [button_width, 32.0],
                egui::Button::new(egui::RichText::new(secondary).color(colors::TEXT_SECONDARY)),
            )
            .clicked()
        {
            state.toggle_auth_mode();
        }
    });

    if submitted && !state.is_busy() {
        if state.is_signup_mode {
            state.submit_signup();
        } else {
            state.submit_login();
        }
    }

    if state.is_busy() {
        ui.add_space(15.0);
        ui.vertical_centered(|ui| {
            ui.spinner();
        });
    }
}
