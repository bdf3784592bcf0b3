//! Administrator view: searchable user directory.

use eframe::egui::{self, Align, Layout, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, MAGNIFYING_GLASS, SHIELD_CHECK, USERS, X};

use super::app::{App, UsersFor};
use super::components::{back_button, empty_state, icon_button, panel_header};
use crate::models::UserRecord;
use crate::router::Route;

/// Show the admin panel.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Route> {
    if back_button(ui) {
        return Some(Route::Home);
    }

    panel_header(
        ui,
        &format!("{SHIELD_CHECK} Panel de Administración"),
        Some("Usuarios registrados en el sistema"),
    );

    show_toolbar(app, ui);
    ui.add_space(10.0);

    if app.admin.is_loading() {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.spinner();
            ui.label("Cargando usuarios...");
        });
        return None;
    }

    let filtered = app.admin.filtered();
    ui.label(
        RichText::new(format!("Mostrando {} de {} usuarios", filtered.len(), app.admin.users().len())).weak(),
    );
    ui.add_space(8.0);

    if filtered.is_empty() {
        let text = if app.admin.users().is_empty() {
            "No hay usuarios registrados"
        } else {
            "Ningún usuario coincide con los filtros"
        };
        empty_state(ui, USERS, text);
    } else {
        show_table(&filtered, ui);
    }

    None
}

fn show_toolbar(app: &mut App, ui: &mut Ui) {
    ui.horizontal(|ui| {
        ui.label(MAGNIFYING_GLASS);
        ui.add(
            egui::TextEdit::singleline(&mut app.admin.search)
                .desired_width(240.0)
                .hint_text("Nombre, correo o documento"),
        );

        ui.add_space(10.0);
        ui.label("Rol:");
        let roles = app.admin.roles();
        let selected = app.admin.role_filter.map(|r| r.label()).unwrap_or_else(|| "Todos".to_string());
        egui::ComboBox::from_id_salt("admin_role_filter")
            .width(140.0)
            .selected_text(selected)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut app.admin.role_filter, None, "Todos");
                for role in roles {
                    ui.selectable_value(&mut app.admin.role_filter, Some(role), role.label());
                }
            });

        if ui.add_enabled(app.admin.has_filters(), egui::Button::new(format!("{X} Limpiar"))).clicked() {
            app.admin.clear_filters();
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if icon_button(ui, ARROWS_CLOCKWISE, "Actualizar").clicked() {
                app.load_users(UsersFor::Admin);
            }
        });
    });
}

fn show_table(users: &[&UserRecord], ui: &mut Ui) {
    ScrollArea::both().id_salt("admin_users_scroll").show(ui, |ui| {
        egui::Grid::new("admin_users_grid")
            .num_columns(6)
            .striped(true)
            .min_col_width(60.0)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                for title in ["ID", "Documento", "Nombre", "Correo", "Departamento", "Rol"] {
                    ui.strong(title);
                }
                ui.end_row();

                for user in users {
                    ui.label(user.id.to_string());
                    ui.label(&user.document_number);
                    ui.label(&user.name);
                    ui.label(&user.email);
                    ui.label(user.department.as_deref().unwrap_or("N/A"));
                    ui.label(user.role.label());
                    ui.end_row();
                }
            });
    });
}
