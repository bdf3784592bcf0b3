//! Main application UI.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local};
use eframe::egui::{self, Align, Layout, RichText, ScrollArea};
use egui_phosphor::regular::{GEAR, SIGN_IN, SIGN_OUT};
use tokio::sync::mpsc;

use crate::api::{self, Backend, FixtureBackend};
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::export;
use crate::models::{Decision, Notification, UserRecord};
use crate::panels::{AdminPanel, NotificationsPanel, Outcome, SecretariaPanel};
use crate::router::{self, Route};
use crate::session::SessionStore;

use super::components::colors;
use super::{admin_panel, employee_panel, home, login, notifications_panel, secretaria_panel};

/// Maximum number of activity log entries kept in memory.
const LOG_CAPACITY: usize = 100;

/// Which panel asked for the user list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsersFor {
    Secretaria,
    Admin,
}

/// Messages from async tasks to UI.
pub enum UiMessage {
    NotificationsLoaded(Result<Vec<Notification>>),
    DecisionSubmitted(Decision, Result<()>),
    UsersLoaded(UsersFor, Result<Vec<UserRecord>>),
    ApiTestResult(std::result::Result<(), String>),
}

/// Log level for UI messages.
#[derive(Clone, Copy, Debug)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Log entry for display in the UI.
#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

/// Startup inputs resolved by `main`.
pub struct AppInit {
    pub config: AppConfig,
    pub config_path: PathBuf,
    pub session: SessionStore,
    pub start_route: Route,
    pub startup_error: Option<String>,
}

/// Main application state.
pub struct App {
    pub rt: tokio::runtime::Runtime,
    backend: Arc<dyn Backend>,

    // Message channel for async communication
    tx: mpsc::UnboundedSender<UiMessage>,
    rx: mpsc::UnboundedReceiver<UiMessage>,

    // Navigation and session
    pub route: Route,
    pub session: SessionStore,
    pub login_input: String,
    titled_route: Option<Route>,

    // Panels
    pub notifications: NotificationsPanel,
    pub secretaria: SecretariaPanel,
    pub admin: AdminPanel,

    // Configuration
    pub config: AppConfig,
    config_path: PathBuf,

    // Log messages
    pub log_messages: Vec<LogEntry>,
    pub show_log: bool,

    // Dialogs
    pub error_message: Option<String>,
    pub success_message: Option<String>,

    // API server dialog
    api_dialog_open: bool,
    api_url_input: String,
    api_testing: bool,
    api_test_status: Option<std::result::Result<(), String>>,
}

impl App {
    pub fn new(init: AppInit, rt: tokio::runtime::Runtime) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let AppInit {
            config,
            config_path,
            session,
            start_route,
            startup_error,
        } = init;

        let mut error_message = startup_error;
        let backend = match api::backend_from_config(&config.api) {
            Ok(backend) => backend,
            Err(e) => {
                tracing::error!("Failed to build API client: {}", e);
                error_message = Some(format!("No se pudo crear el cliente HTTP ({e}). Usando datos de demostración."));
                Arc::new(FixtureBackend::new())
            }
        };
        let api_url_input = config.api.base_url.clone();

        let mut app = Self {
            rt,
            backend,
            tx,
            rx,
            route: Route::Home,
            session,
            login_input: String::new(),
            titled_route: None,
            notifications: NotificationsPanel::new(),
            secretaria: SecretariaPanel::new(),
            admin: AdminPanel::new(),
            config,
            config_path,
            log_messages: Vec::new(),
            show_log: false,
            error_message,
            success_message: None,
            api_dialog_open: false,
            api_url_input,
            api_testing: false,
            api_test_status: None,
        };

        if app.config.api.use_fixtures {
            app.log_warning("Modo demostración: usando datos de ejemplo");
        }
        app.navigate(start_route);
        app
    }

    /// Log a message to the UI log.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log_messages.push(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });

        if self.log_messages.len() > LOG_CAPACITY {
            self.log_messages.remove(0);
        }
    }

    pub fn log_info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn log_success(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Success, message);
    }

    pub fn log_warning(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    pub fn log_error(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Show an action result in the matching dialog.
    pub fn present(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Success(msg) => {
                self.log_success(msg.clone());
                self.success_message = Some(msg);
            }
            Outcome::Invalid(msg) => {
                self.log_warning(msg.clone());
                self.error_message = Some(msg);
            }
            Outcome::Failed(msg) => {
                self.log_error(msg.clone());
                self.error_message = Some(msg);
            }
        }
    }

    /// Switch views, applying the session guard and loading the view's data.
    pub fn navigate(&mut self, route: Route) {
        let target = router::guard(route, &self.session);
        if target != route {
            self.log_warning(format!("Sesión requerida para {}", route.path()));
        }

        tracing::debug!("Route {} -> {}", self.route.path(), target.path());
        self.route = target;

        match target {
            Route::EmployeeNotifications => self.load_notifications(),
            Route::Secretaria => self.load_users(UsersFor::Secretaria),
            Route::Admin => self.load_users(UsersFor::Admin),
            _ => {}
        }
    }

    /// Store the id typed in the login view and go to the start page.
    pub fn sign_in(&mut self) {
        let id = self.login_input.clone();
        match self.session.sign_in(&id) {
            Ok(()) => {
                self.log_success(format!("Sesión iniciada: usuario {}", id.trim()));
                self.login_input.clear();
                self.navigate(Route::Home);
            }
            Err(AppError::Validation(msg)) => self.present(Outcome::invalid(msg)),
            Err(e) => {
                tracing::error!("Failed to store session: {}", e);
                self.present(Outcome::failed(format!("No se pudo guardar la sesión: {e}")));
            }
        }
    }

    /// Clear the session and go back to the root view.
    pub fn sign_out(&mut self) {
        if let Err(e) = self.session.sign_out() {
            tracing::error!("Failed to clear session: {}", e);
            self.log_error(format!("No se pudo cerrar la sesión: {e}"));
        } else {
            self.log_info("Sesión cerrada");
        }
        self.navigate(Route::Home);
    }

    /// Fetch pending notifications.
    pub fn load_notifications(&mut self) {
        if self.notifications.is_loading() {
            return;
        }
        self.notifications.begin_load();

        let backend = self.backend.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = backend.list_notifications().await;
            let _ = tx.send(UiMessage::NotificationsLoaded(result));
        });
    }

    /// Send the decision in the response dialog.
    pub fn submit_decision(&mut self) {
        let decision = match self.notifications.begin_submit() {
            Ok(decision) => decision,
            Err(outcome) => {
                self.present(outcome);
                return;
            }
        };

        self.log_info(format!(
            "Enviando respuesta a la notificación #{}",
            decision.notification_id
        ));

        let backend = self.backend.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = backend.submit_decision(&decision).await;
            let _ = tx.send(UiMessage::DecisionSubmitted(decision, result));
        });
    }

    /// Fetch the user list for one of the panels.
    pub fn load_users(&mut self, target: UsersFor) {
        let started = match target {
            UsersFor::Secretaria => self.secretaria.begin_load_employees(),
            UsersFor::Admin => self.admin.begin_load(),
        };
        if !started {
            tracing::debug!("User load for {:?} already in flight", target);
            return;
        }

        let backend = self.backend.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = backend.list_users().await;
            let _ = tx.send(UiMessage::UsersLoaded(target, result));
        });
    }

    /// Record the attendance form contents.
    pub fn submit_attendance(&mut self) {
        let outcome = self.secretaria.submit_attendance_form();
        self.present(outcome);
    }

    /// Build the report and write it to disk.
    pub fn generate_report(&mut self) {
        let report = match self.secretaria.generate_report() {
            Ok(report) => report,
            Err(outcome) => {
                self.present(outcome);
                return;
            }
        };

        let filename = export::generate_export_filename("reporte_asistencia");
        let path = if self.config.reports.ask_for_path {
            match export::show_save_dialog(&filename) {
                Some(path) => path,
                None => {
                    self.log_info("Exportación cancelada");
                    return;
                }
            }
        } else {
            self.config.reports_dir(&self.config_path).join(&filename)
        };

        match export::export_attendance_report(&report, &path) {
            Ok(()) => self.present(Outcome::success(format!("Reporte generado: {}", path.display()))),
            Err(e) => {
                tracing::error!("Report export failed: {}", e);
                self.present(Outcome::failed(format!("Error al generar el reporte: {e}")));
            }
        }
    }

    /// Start API server test with the URL typed in the dialog.
    fn test_api_connection(&mut self) {
        let mut api_config = self.config.api.clone();
        api_config.base_url = self.api_url_input.trim().to_string();

        let backend = match api::backend_from_config(&api_config) {
            Ok(backend) => backend,
            Err(e) => {
                self.api_test_status = Some(Err(e.to_string()));
                return;
            }
        };

        self.api_testing = true;
        self.api_test_status = None;
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = backend.ping().await.map_err(|e| e.to_string());
            let _ = tx.send(UiMessage::ApiTestResult(result));
        });
    }

    /// Save API server configuration and switch to the new backend.
    fn save_api_config(&mut self) {
        let previous = self.config.api.base_url.clone();
        self.config.api.base_url = self.api_url_input.trim().to_string();

        if let Err(e) = self.config.validate() {
            self.config.api.base_url = previous;
            self.present(Outcome::invalid(e.to_string()));
            return;
        }

        match api::backend_from_config(&self.config.api) {
            Ok(backend) => self.backend = backend,
            Err(e) => {
                self.config.api.base_url = previous;
                self.present(Outcome::failed(e.to_string()));
                return;
            }
        }

        if let Err(e) = self.config.save(&self.config_path) {
            tracing::error!("Failed to save config: {}", e);
            self.log_error(format!("No se pudo guardar la configuración: {e}"));
        } else {
            self.log_success(format!("Servidor API: {}", self.config.api.base_url));
        }
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::NotificationsLoaded(result) => {
                    if let Err(e) = &result {
                        self.log_error(format!("Error al cargar notificaciones: {e}"));
                    }
                    self.notifications.finish_load(result);
                }
                UiMessage::DecisionSubmitted(decision, result) => {
                    let outcome = self.notifications.finish_submit(&decision, result);
                    self.present(outcome);
                }
                UiMessage::UsersLoaded(target, result) => {
                    let outcome = match target {
                        UsersFor::Secretaria => self.secretaria.finish_load_employees(result),
                        UsersFor::Admin => self.admin.finish_load(result),
                    };
                    if let Some(outcome) = outcome {
                        self.present(outcome);
                    }
                }
                UiMessage::ApiTestResult(result) => {
                    self.api_testing = false;
                    self.api_test_status = Some(result);
                }
            }
        }
    }

    fn is_busy(&self) -> bool {
        self.notifications.is_loading()
            || self.notifications.is_submitting()
            || self.secretaria.is_loading()
            || self.admin.is_loading()
            || self.api_testing
    }

    /// Render menu bar.
    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("Ir a", |ui| {
                    for route in Route::ALL {
                        if ui.button(route.title()).clicked() {
                            self.navigate(route);
                            ui.close();
                        }
                    }
                });
                ui.menu_button("Herramientas", |ui| {
                    if ui.button(format!("{GEAR} Servidor API")).clicked() {
                        self.api_dialog_open = true;
                        self.api_url_input = self.config.api.base_url.clone();
                        self.api_test_status = None;
                        ui.close();
                    }
                    if ui.checkbox(&mut self.show_log, "Registro de actividad").clicked() {
                        ui.close();
                    }
                });

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    match self.session.user_id().map(str::to_string) {
                        Some(id) => {
                            if ui.button(format!("{SIGN_OUT} Salir")).clicked() {
                                self.sign_out();
                            }
                            ui.label(format!("Usuario {id}"));
                        }
                        None => {
                            if ui.button(format!("{SIGN_IN} Ingresar")).clicked() {
                                self.navigate(Route::Login);
                            }
                        }
                    }
                });
            });
        });
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.disable();
                ui.horizontal(|ui| {
                    let (color, text) = if self.config.api.use_fixtures {
                        (colors::WARNING, "Datos de demostración".to_string())
                    } else {
                        (colors::NEUTRAL, format!("API: {}", self.config.api.base_url))
                    };
                    ui.colored_label(color, text);

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.route.path());
                        if self.is_busy() {
                            ui.spinner();
                        }
                    });
                });
            });
    }

    /// Render the activity log panel.
    fn show_log_panel(&mut self, ctx: &egui::Context) {
        if !self.show_log {
            return;
        }

        egui::TopBottomPanel::bottom("activity_log")
            .resizable(true)
            .default_height(140.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.strong("Registro de actividad");
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.small_button("Limpiar").clicked() {
                            self.log_messages.clear();
                        }
                    });
                });
                ui.separator();

                ScrollArea::vertical()
                    .id_salt("activity_log_scroll")
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for entry in &self.log_messages {
                            let color = match entry.level {
                                LogLevel::Info => ui.visuals().text_color(),
                                LogLevel::Success => colors::SUCCESS,
                                LogLevel::Warning => colors::WARNING,
                                LogLevel::Error => colors::ERROR,
                            };
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(entry.timestamp.format("%H:%M:%S").to_string()).weak());
                                ui.colored_label(color, &entry.message);
                            });
                        }
                    });
            });
    }

    /// Render API server configuration dialog.
    fn show_api_dialog(&mut self, ctx: &egui::Context) {
        if !self.api_dialog_open {
            return;
        }

        let mut open = true;
        egui::Window::new("Servidor API")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.add_space(10.0);

                egui::Grid::new("api_grid")
                    .num_columns(2)
                    .spacing([20.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("URL base:");
                        if ui.text_edit_singleline(&mut self.api_url_input).changed() {
                            self.api_test_status = None;
                        }
                        ui.end_row();
                    });

                ui.add_space(15.0);

                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(!self.api_testing, egui::Button::new("Probar conexión"))
                        .clicked()
                    {
                        self.test_api_connection();
                    }

                    ui.add_space(10.0);

                    if self.api_testing {
                        ui.spinner();
                        ui.label("Probando...");
                    } else if let Some(result) = &self.api_test_status {
                        match result {
                            Ok(()) => {
                                ui.colored_label(colors::SUCCESS, "Conexión exitosa");
                            }
                            Err(e) => {
                                ui.colored_label(colors::ERROR, format!("Falló: {e}"));
                            }
                        }
                    }
                });

                ui.add_space(15.0);
                ui.separator();
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui.button("Cancelar").clicked() {
                        self.api_dialog_open = false;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("Guardar").clicked() {
                            self.save_api_config();
                            self.api_dialog_open = false;
                        }
                    });
                });
            });

        if !open {
            self.api_dialog_open = false;
        }
    }

    /// Render modal dialogs (error, success).
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(error) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, error);
                    ui.add_space(10.0);
                    if ui.button("Aceptar").clicked() {
                        self.error_message = None;
                    }
                });
        }

        if let Some(msg) = self.success_message.clone() {
            egui::Window::new("Éxito")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    ui.colored_label(colors::SUCCESS, msg);
                    ui.add_space(10.0);
                    if ui.button("Aceptar").clicked() {
                        self.success_message = None;
                    }
                });
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_async_results();

        // Request repaint during async operations
        if self.is_busy() {
            ctx.request_repaint();
        }

        if self.titled_route != Some(self.route) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
                "ChronoGuard - {}",
                self.route.title()
            )));
            self.titled_route = Some(self.route);
        }

        self.show_menu_bar(ctx);
        self.show_status_bar(ctx);
        self.show_log_panel(ctx);
        self.show_api_dialog(ctx);
        self.show_dialogs(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let next = match self.route {
                Route::Home => home::show(self, ui),
                Route::Login => login::show(self, ui),
                Route::Admin => admin_panel::show(self, ui),
                Route::Secretaria => secretaria_panel::show(self, ui),
                Route::Employee
                | Route::EmployeeRequests
                | Route::EmployeeSchedules
                | Route::EmployeeShifts => employee_panel::show(self.route, ui),
                Route::EmployeeNotifications => notifications_panel::show(self, ui),
            };
            if let Some(route) = next {
                self.navigate(route);
            }
        });
    }
}
