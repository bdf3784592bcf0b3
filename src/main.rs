//! ChronoGuard - Desktop front-end for attendance and staff administration.

use std::path::PathBuf;

use chronoguard as app;
use clap::Parser;
use eframe::egui;

use app::config::{AppConfig, ConfigLoadResult};
use app::router::Route;
use app::session::SessionStore;
use app::ui::{App, AppInit};

/// Desktop front-end for attendance and staff administration.
#[derive(Parser)]
#[command(name = "chronoguard")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Serve built-in sample data instead of calling the API
    #[arg(long)]
    demo: bool,

    /// Initial view, e.g. /secretaria or /empleado/notificaciones
    #[arg(long)]
    route: Option<String>,
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    tracing::info!("ChronoGuard starting...");

    // Determine config path based on mode
    let config_path = if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };
    tracing::info!("Config path: {:?}", config_path);

    let mut errors = Vec::new();
    let mut config = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            config
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, writing defaults");
            let config = AppConfig::default();
            if let Err(e) = config.save(&config_path) {
                tracing::warn!("Failed to write default config: {}", e);
            }
            config
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid: {}", e);
            errors.push(format!("Configuración inválida, usando valores por defecto: {e}"));
            AppConfig::default()
        }
    };

    if cli.demo {
        config.api.use_fixtures = true;
    }

    let requested = cli.route.as_deref().unwrap_or(&config.ui.start_route);
    let start_route = Route::from_path(requested).unwrap_or_else(|| {
        tracing::warn!("Unknown start route: {}", requested);
        errors.push(format!("Ruta desconocida: {requested}"));
        Route::Home
    });

    let session_path = config.session_path(&config_path);
    let session = SessionStore::load(&session_path).unwrap_or_else(|e| {
        tracing::warn!("Ignoring session file: {}", e);
        SessionStore::empty(&session_path)
    });

    let init = AppInit {
        config,
        config_path,
        session,
        start_route,
        startup_error: (!errors.is_empty()).then(|| errors.join("\n")),
    };

    run_app(init)
}

/// Run the main application.
fn run_app(init: AppInit) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("ChronoGuard")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    eframe::run_native(
        "ChronoGuard",
        options,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(App::new(init, rt)))
        }),
    )
}
