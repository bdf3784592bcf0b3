//! Employee dashboard and its sub-pages.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::{BELL, CALENDAR, CLOCK, FILE_TEXT, HOURGLASS};

use super::components::{back_button, nav_card, panel_header};
use crate::router::Route;

const CARDS: [(Route, &str, &str); 4] = [
    (Route::EmployeeRequests, "Permisos y ausencias", FILE_TEXT),
    (Route::EmployeeSchedules, "Horario semanal", CALENDAR),
    (Route::EmployeeShifts, "Turnos asignados", CLOCK),
    (Route::EmployeeNotifications, "Aprobar o rechazar", BELL),
];

/// Show the employee dashboard or one of its sub-pages.
pub fn show(route: Route, ui: &mut Ui) -> Option<Route> {
    match route {
        Route::Employee => show_dashboard(ui),
        other => show_placeholder(other, ui),
    }
}

fn show_dashboard(ui: &mut Ui) -> Option<Route> {
    let mut next = None;

    if back_button(ui) {
        return Some(Route::Home);
    }
    panel_header(ui, "Panel del Empleado", Some("Consulta tus solicitudes, horarios y turnos"));

    let available = ui.available_width();
    let spacing = 20.0;
    let per_row = if available > 4.0 * 200.0 + 3.0 * spacing { 4 } else { 2 };
    let card_width = ((available - spacing * (per_row as f32 - 1.0)) / per_row as f32).clamp(150.0, 220.0);
    let card_size = egui::vec2(card_width, card_width * 0.7);

    for chunk in CARDS.chunks(per_row) {
        ui.horizontal(|ui| {
            for &(route, description, icon) in chunk {
                if nav_card(ui, route.title(), description, icon, card_size).clicked() {
                    next = Some(route);
                }
                ui.add_space(spacing);
            }
        });
        ui.add_space(spacing);
    }

    next
}

fn show_placeholder(route: Route, ui: &mut Ui) -> Option<Route> {
    let mut next = None;

    ui.horizontal(|ui| {
        if ui.button("< Volver al panel").clicked() {
            next = Some(Route::Employee);
        }
    });
    panel_header(ui, route.title(), None);

    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.label(RichText::new(HOURGLASS).size(48.0).weak());
        ui.add_space(10.0);
        ui.label(RichText::new("Próximamente").size(18.0));
        ui.label(RichText::new("Esta sección aún no está disponible.").weak());
    });

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_link_to_employee_sub_pages() {
        for (route, _, _) in CARDS {
            assert!(route.path().starts_with("/empleado/"));
            assert!(!route.requires_session());
        }
    }
}
