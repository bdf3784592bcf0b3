//! Minimal sign-in view: stores the user id as the session key.

use eframe::egui::{self, Key, RichText, Ui};

use super::app::App;
use super::components::{back_button, panel_header};
use crate::router::Route;

pub fn show(app: &mut App, ui: &mut Ui) -> Option<Route> {
    if back_button(ui) {
        return Some(Route::Home);
    }

    panel_header(ui, "Iniciar sesión", None);

    ui.vertical_centered(|ui| {
        ui.add_space(20.0);
        ui.label("ID de usuario");
        let response = ui.add(
            egui::TextEdit::singleline(&mut app.login_input)
                .desired_width(220.0)
                .hint_text("p. ej. 101"),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

        ui.add_space(10.0);
        if ui.button("Ingresar").clicked() || submitted {
            app.sign_in();
        }

        ui.add_space(20.0);
        ui.label(
            RichText::new("La autorización real la aplica el servidor; este acceso solo recuerda quién eres.")
                .small()
                .weak(),
        );
    });

    None
}
