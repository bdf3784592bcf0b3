//! Shared UI components.

use eframe::egui::{self, Color32, Response, RichText, Sense, StrokeKind, Ui};

use crate::models::{AttendanceStatus, NotificationType};

/// Render a clickable navigation card with dynamic size.
///
/// Returns the response which can be checked for `.clicked()`.
pub fn nav_card(ui: &mut Ui, title: &str, description: &str, icon: &str, size: egui::Vec2) -> Response {
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());

    if ui.is_rect_visible(rect) {
        let visuals = ui.style().interact(&response);

        // Scale factor based on width (200 is the reference size)
        let scale = size.x / 200.0;

        ui.painter().rect_filled(rect, 8.0, visuals.bg_fill);
        ui.painter()
            .rect_stroke(rect, 8.0, visuals.bg_stroke, StrokeKind::Outside);

        let icon_pos = egui::pos2(rect.center().x, rect.top() + size.y * 0.25);
        ui.painter().text(
            icon_pos,
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(34.0 * scale),
            visuals.text_color(),
        );

        let title_pos = egui::pos2(rect.center().x, rect.center().y + size.y * 0.07);
        ui.painter().text(
            title_pos,
            egui::Align2::CENTER_CENTER,
            title,
            egui::FontId::proportional(17.0 * scale),
            visuals.text_color(),
        );

        let desc_pos = egui::pos2(rect.center().x, rect.bottom() - size.y * 0.17);
        ui.painter().text(
            desc_pos,
            egui::Align2::CENTER_CENTER,
            description,
            egui::FontId::proportional(12.0 * scale),
            ui.visuals().weak_text_color(),
        );
    }

    response
}

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
    pub const INFO: Color32 = Color32::from_rgb(110, 160, 255);

    pub const APPROVE: Color32 = Color32::from_rgb(22, 163, 74);
    pub const REJECT: Color32 = Color32::from_rgb(220, 38, 38);
}

/// Render a back button that returns true when clicked.
pub fn back_button(ui: &mut Ui) -> bool {
    ui.button(RichText::new("< Volver al inicio").size(14.0)).clicked()
}

/// Render a panel header with title and optional subtitle.
pub fn panel_header(ui: &mut Ui, title: &str, subtitle: Option<&str>) {
    ui.heading(RichText::new(title).size(24.0));
    if let Some(subtitle) = subtitle {
        ui.label(RichText::new(subtitle).weak());
    }
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(20.0);
}

/// Button with a leading phosphor icon.
pub fn icon_button(ui: &mut Ui, icon: &str, label: &str) -> Response {
    ui.button(format!("{icon} {label}"))
}

/// Filled button in `fill` color, disabled unless `enabled`.
pub fn filled_button(ui: &mut Ui, enabled: bool, icon: &str, label: &str, fill: Color32) -> Response {
    ui.add_enabled(
        enabled,
        egui::Button::new(RichText::new(format!("{icon} {label}")).color(Color32::WHITE)).fill(fill),
    )
}

/// Colored pill for a notification type.
pub fn notification_type_badge(ui: &mut Ui, kind: &NotificationType) {
    let color = match kind {
        NotificationType::Request => colors::INFO,
        NotificationType::Approval => colors::WARNING,
        NotificationType::Alert => colors::ERROR,
        NotificationType::Other(_) => colors::NEUTRAL,
    };
    ui.label(RichText::new(kind.label()).color(color).strong());
}

pub fn attendance_status_label(ui: &mut Ui, status: AttendanceStatus) {
    let color = match status {
        AttendanceStatus::OnTime => colors::SUCCESS,
        AttendanceStatus::Late => colors::WARNING,
        AttendanceStatus::Absent => colors::ERROR,
    };
    ui.colored_label(color, status.label());
}

/// Centered weak text for empty tables.
pub fn empty_state(ui: &mut Ui, icon: &str, text: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(30.0);
        ui.label(RichText::new(icon).size(40.0).weak());
        ui.add_space(8.0);
        ui.label(RichText::new(text).size(16.0).weak());
        ui.add_space(30.0);
    });
}
