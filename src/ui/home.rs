//! Landing view with navigation cards for each role.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::{BELL, CLIPBOARD_TEXT, SHIELD_CHECK, USER};

use super::app::App;
use super::components::nav_card;
use crate::router::Route;

/// Show the home view.
///
/// Returns `Some(route)` if navigation is requested.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Route> {
    let mut next = None;

    ui.vertical_centered(|ui| {
        ui.add_space(30.0);

        ui.label(RichText::new("ChronoGuard").size(32.0).strong());
        ui.add_space(5.0);
        ui.label(RichText::new("Control de asistencia y personal").size(14.0).weak());
        ui.add_space(8.0);
        match app.session.user_id() {
            Some(id) => ui.label(format!("Sesión activa: usuario {id}")),
            None => ui.label(RichText::new("Sin sesión iniciada").weak()),
        };

        ui.add_space(30.0);

        // Navigation cards row
        let available = ui.available_width();
        let num_cards = 4.0;
        let spacing = 30.0;
        let total_spacing = spacing * (num_cards - 1.0);
        let card_width = ((available - total_spacing) / num_cards).clamp(150.0, 240.0);
        let card_size = egui::vec2(card_width, card_width * 0.75);
        let total_width = card_width * num_cards + total_spacing;
        let start_offset = ((available - total_width) / 2.0).max(0.0);

        ui.horizontal(|ui| {
            ui.add_space(start_offset);

            if nav_card(ui, "Administración", "Usuarios del sistema", SHIELD_CHECK, card_size).clicked() {
                next = Some(Route::Admin);
            }

            ui.add_space(spacing);

            if nav_card(ui, "Secretaría", "Empleados y asistencia", CLIPBOARD_TEXT, card_size).clicked() {
                next = Some(Route::Secretaria);
            }

            ui.add_space(spacing);

            if nav_card(ui, "Empleado", "Solicitudes y horarios", USER, card_size).clicked() {
                next = Some(Route::Employee);
            }

            ui.add_space(spacing);

            if nav_card(ui, "Notificaciones", "Aprobar o rechazar", BELL, card_size).clicked() {
                next = Some(Route::EmployeeNotifications);
            }
        });

        if !app.session.is_signed_in() {
            ui.add_space(30.0);
            if ui.button("Iniciar sesión").clicked() {
                next = Some(Route::Login);
            }
        }
    });

    next
}
