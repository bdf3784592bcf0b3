//! Pending notifications table and the response dialog.

use eframe::egui::{self, Align, Layout, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, BELL, CALENDAR, CHAT_CIRCLE, CHECK, HASH, USER, X};

use super::app::App;
use super::components::{
    back_button, colors, empty_state, filled_button, icon_button, notification_type_badge, panel_header,
};
use crate::models::{DecisionAction, Notification};
use crate::router::Route;

/// Show the notifications panel.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Route> {
    if back_button(ui) {
        return Some(Route::Home);
    }

    panel_header(
        ui,
        &format!("{BELL} Panel de Notificaciones"),
        Some("Gestiona y responde a las notificaciones del sistema"),
    );

    if app.notifications.is_loading() {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.spinner();
            ui.label("Cargando notificaciones...");
        });
        return None;
    }

    ui.horizontal(|ui| {
        if icon_button(ui, ARROWS_CLOCKWISE, "Actualizar").clicked() {
            app.load_notifications();
        }
        ui.add_space(10.0);
        ui.label(format!("{} pendientes", app.notifications.notifications().len()));
    });

    ui.add_space(15.0);

    if app.notifications.notifications().is_empty() {
        empty_state(ui, BELL, "No hay notificaciones pendientes");
    } else if let Some((notification, action)) = show_table(app.notifications.notifications(), ui) {
        app.notifications.open_decision(&notification, action);
    }

    if app.notifications.is_modal_open() {
        show_response_dialog(app, ui.ctx());
    }

    None
}

/// Returns the row and action whose button was clicked.
fn show_table(notifications: &[Notification], ui: &mut Ui) -> Option<(Notification, DecisionAction)> {
    let mut clicked = None;

    ScrollArea::both().id_salt("notifications_scroll").show(ui, |ui| {
        egui::Grid::new("notifications_grid")
            .num_columns(6)
            .striped(true)
            .min_col_width(80.0)
            .spacing([14.0, 8.0])
            .show(ui, |ui| {
                ui.strong(format!("{HASH} ID Notificación"));
                ui.strong(format!("{USER} ID Usuario"));
                ui.strong("Tipo");
                ui.strong("Mensaje");
                ui.strong(format!("{CALENDAR} Fecha de Envío"));
                ui.strong("Acciones");
                ui.end_row();

                for n in notifications {
                    ui.label(format!("#{}", n.id));
                    ui.label(n.user_id.to_string());
                    notification_type_badge(ui, &n.kind);
                    ui.add_sized(
                        [280.0, 20.0],
                        egui::Label::new(n.message.as_str()).truncate(),
                    )
                    .on_hover_text(n.message.as_str());
                    ui.label(n.sent_at_display());
                    ui.horizontal(|ui| {
                        if filled_button(ui, true, CHECK, "Aprobar", colors::APPROVE).clicked() {
                            clicked = Some((n.clone(), DecisionAction::Approve));
                        }
                        if filled_button(ui, true, X, "Rechazar", colors::REJECT).clicked() {
                            clicked = Some((n.clone(), DecisionAction::Reject));
                        }
                    });
                    ui.end_row();
                }
            });
    });

    clicked
}

fn show_response_dialog(app: &mut App, ctx: &egui::Context) {
    let Some(draft) = app.notifications.draft().cloned() else {
        return;
    };
    let submitting = app.notifications.is_submitting();
    let action = draft.action;

    let mut open = true;
    egui::Window::new(format!("{CHAT_CIRCLE} {} Notificación", action.verb()))
        .collapsible(false)
        .resizable(false)
        .default_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut open)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(ui.style().visuals.extreme_bg_color)
                .inner_margin(egui::Margin::same(10))
                .corner_radius(egui::CornerRadius::same(6))
                .show(ui, |ui| {
                    ui.label(format!("ID: #{}", draft.notification.id));
                    ui.label(format!("Usuario: {}", draft.notification.user_id));
                    ui.label(format!("Mensaje: {}", draft.notification.message));
                });

            ui.add_space(10.0);
            ui.label(RichText::new("Mensaje de Respuesta *").strong());
            let verb = action.verb().to_lowercase();
            ui.add_enabled(
                !submitting,
                egui::TextEdit::multiline(app.notifications.response_message_mut())
                    .desired_rows(4)
                    .desired_width(f32::INFINITY)
                    .hint_text(format!("Escribe tu respuesta para {verb} esta notificación...")),
            );

            ui.add_space(12.0);

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let fill = match action {
                    DecisionAction::Approve => colors::APPROVE,
                    DecisionAction::Reject => colors::REJECT,
                };
                let label = if submitting { "Enviando..." } else { action.verb() };
                let icon = match action {
                    DecisionAction::Approve => CHECK,
                    DecisionAction::Reject => X,
                };
                if filled_button(ui, app.notifications.can_submit(), icon, label, fill).clicked() {
                    app.submit_decision();
                }

                if ui.add_enabled(!submitting, egui::Button::new("Cancelar")).clicked() {
                    app.notifications.close_modal();
                }

                if submitting {
                    ui.spinner();
                }
            });
        });

    if !open {
        app.notifications.close_modal();
    }
}
