//! Secretary panel: employees, manual attendance, and report generation.

use chrono::Local;
use eframe::egui::{self, Align, Layout, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;
use egui_phosphor::regular::{ARROWS_CLOCKWISE, BELL, CLIPBOARD_TEXT, FILE_XLS, PLUS, SIGN_OUT, USERS};

use super::app::{App, UsersFor};
use super::components::{attendance_status_label, back_button, empty_state, icon_button, panel_header};
use crate::models::report::parse_flexible_date;
use crate::models::{AttendanceField, AttendanceStatus, ReportField};
use crate::router::Route;

/// Show the secretary panel.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Route> {
    let mut next = None;

    ui.horizontal(|ui| {
        if back_button(ui) {
            next = Some(Route::Home);
        }
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if icon_button(ui, SIGN_OUT, "Cerrar sesión").clicked() {
                app.sign_out();
            }
            if icon_button(ui, BELL, "Notificaciones").clicked() {
                next = Some(Route::EmployeeNotifications);
            }
        });
    });

    panel_header(ui, "Panel de Secretaria", None);

    ScrollArea::vertical().id_salt("secretaria_scroll").show(ui, |ui| {
        show_employees(app, ui);
        ui.add_space(25.0);
        show_attendance(app, ui);
        ui.add_space(25.0);
        show_reports(app, ui);
    });

    if app.secretaria.is_attendance_form_open() {
        show_attendance_dialog(app, ui.ctx());
    }
    if app.secretaria.is_report_form_open() {
        show_report_dialog(app, ui.ctx());
    }

    next
}

fn show_employees(app: &mut App, ui: &mut Ui) {
    ui.horizontal(|ui| {
        ui.heading(format!("{USERS} Empleados Registrados"));
        ui.add_space(10.0);
        if icon_button(ui, ARROWS_CLOCKWISE, "Actualizar").clicked() {
            app.load_users(UsersFor::Secretaria);
        }
        if app.secretaria.is_loading() {
            ui.spinner();
        }
    });
    ui.add_space(8.0);

    if app.secretaria.employees().is_empty() {
        empty_state(ui, USERS, "No hay empleados registrados");
        return;
    }

    egui::Grid::new("secretaria_employees_grid")
        .num_columns(5)
        .striped(true)
        .min_col_width(60.0)
        .spacing([16.0, 6.0])
        .show(ui, |ui| {
            ui.strong("ID");
            ui.strong("Documento");
            ui.strong("Nombre");
            ui.strong("Departamento");
            ui.strong("Correo");
            ui.end_row();

            for emp in app.secretaria.employees() {
                ui.label(emp.id.to_string());
                ui.label(&emp.document_number);
                ui.label(&emp.name);
                ui.label(emp.department.as_deref().unwrap_or("N/A"));
                ui.label(&emp.email);
                ui.end_row();
            }
        });
}

fn show_attendance(app: &mut App, ui: &mut Ui) {
    ui.heading(format!("{CLIPBOARD_TEXT} Control de Asistencia"));
    ui.add_space(8.0);

    if icon_button(ui, PLUS, "Registrar Asistencia").clicked() {
        app.secretaria.open_attendance_form();
    }
    ui.add_space(8.0);

    if app.secretaria.attendance().is_empty() {
        ui.label(RichText::new("Sin registros en esta sesión").weak());
        return;
    }

    egui::Grid::new("secretaria_attendance_grid")
        .num_columns(5)
        .striped(true)
        .min_col_width(60.0)
        .spacing([16.0, 6.0])
        .show(ui, |ui| {
            ui.strong("ID");
            ui.strong("Nombre");
            ui.strong("Entrada");
            ui.strong("Salida");
            ui.strong("Estado");
            ui.end_row();

            for entry in app.secretaria.attendance() {
                ui.label(&entry.id);
                ui.label(&entry.name);
                ui.label(entry.check_in.format("%H:%M").to_string());
                ui.label(entry.check_out.format("%H:%M").to_string());
                attendance_status_label(ui, entry.status);
                ui.end_row();
            }
        });
}

fn show_reports(app: &mut App, ui: &mut Ui) {
    ui.heading(format!("{FILE_XLS} Generación de Reportes"));
    ui.label("Genera reportes sobre asistencia del personal.");
    ui.add_space(8.0);
    if icon_button(ui, FILE_XLS, "Generar Reporte").clicked() {
        app.secretaria.open_report_form();
    }
}

fn status_combo(ui: &mut Ui, id: &str, value: &mut Option<AttendanceStatus>, none_label: &str) {
    egui::ComboBox::from_id_salt(id)
        .width(180.0)
        .selected_text(value.map(|s| s.label()).unwrap_or(none_label))
        .show_ui(ui, |ui| {
            ui.selectable_value(value, None, none_label);
            for status in AttendanceStatus::ALL {
                ui.selectable_value(value, Some(status), status.label());
            }
        });
}

fn show_attendance_dialog(app: &mut App, ctx: &egui::Context) {
    let mut open = true;
    let mut submit = false;

    egui::Window::new("Registrar Asistencia")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut open)
        .show(ctx, |ui| {
            let form = &mut app.secretaria.attendance_form;

            egui::Grid::new("attendance_form_grid")
                .num_columns(2)
                .spacing([20.0, 8.0])
                .show(ui, |ui| {
                    for (field, label, hint) in [
                        (AttendanceField::Id, "ID", ""),
                        (AttendanceField::Name, "Nombre", ""),
                        (AttendanceField::CheckIn, "Entrada", "HH:MM"),
                        (AttendanceField::CheckOut, "Salida", "HH:MM"),
                    ] {
                        ui.label(label);
                        ui.add(egui::TextEdit::singleline(form.field_mut(field)).hint_text(hint));
                        ui.end_row();
                    }

                    ui.label("Estado");
                    status_combo(ui, "attendance_status", &mut form.status, "Seleccione estado");
                    ui.end_row();
                });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("Registrar").clicked() {
                    submit = true;
                }
            });
        });

    if submit {
        app.submit_attendance();
    }
    if !open {
        app.secretaria.close_attendance_form();
    }
}

fn show_report_dialog(app: &mut App, ctx: &egui::Context) {
    let mut open = true;
    let mut submit = false;

    egui::Window::new("Generar Reporte")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut open)
        .show(ctx, |ui| {
            let form = &mut app.secretaria.report_form;
            let today = Local::now().date_naive();

            egui::Grid::new("report_form_grid")
                .num_columns(2)
                .spacing([20.0, 8.0])
                .show(ui, |ui| {
                    for (field, label) in [
                        (ReportField::StartDate, "Fecha Inicio"),
                        (ReportField::EndDate, "Fecha Fin"),
                    ] {
                        ui.label(label);
                        ui.horizontal(|ui| {
                            let text = form.field_mut(field);
                            ui.add(egui::TextEdit::singleline(text).desired_width(110.0).hint_text("AAAA-MM-DD"));

                            let mut picked = parse_flexible_date(text).unwrap_or(today);
                            let salt = format!("report_picker_{label}");
                            if ui.add(DatePickerButton::new(&mut picked).id_salt(&salt)).changed() {
                                *text = picked.format("%Y-%m-%d").to_string();
                            }
                        });
                        ui.end_row();
                    }

                    ui.label("Empleado (Opcional)");
                    ui.add(
                        egui::TextEdit::singleline(form.field_mut(ReportField::Employee)).hint_text("ID o nombre"),
                    );
                    ui.end_row();

                    ui.label("Estado (Opcional)");
                    status_combo(ui, "report_status", &mut form.status, "Todos");
                    ui.end_row();
                });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("Generar").clicked() {
                    submit = true;
                }
            });
        });

    if submit {
        app.generate_report();
    }
    if !open {
        app.secretaria.close_report_form();
    }
}
