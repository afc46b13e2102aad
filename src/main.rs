mod cli;
mod config;
mod datasources;
mod db;
mod error;
mod logic;
mod models;
mod report;
mod server;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, SettingsAction};
use config::Config;
use datasources::openweathermap::{parse_current, parse_forecast};
use db::Database;
use logic::rules::InsightEngine;
use logic::{InsightReport, InsightService};
use models::{Role, Settings, Theme};
use std::io::IsTerminal;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // RUST_LOG wins over -v flags
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Init => {
            Config::setup_interactive()?;
        }
        Commands::Check => run_check(&cli).await?,
        Commands::Settings { ref action } => run_settings(&cli, action)?,
        Commands::Rules => {
            for (id, name) in InsightEngine::new().list_rules() {
                println!("{:<18} {}", id, name);
            }
        }
        Commands::Analyze {
            ref forecast,
            ref current,
            json,
        } => {
            let body = std::fs::read_to_string(forecast)
                .with_context(|| format!("reading {}", forecast.display()))?;
            let raw = parse_forecast(&body).context("parsing forecast")?;

            let snapshot = match current {
                Some(path) => {
                    let body = std::fs::read_to_string(path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    parse_current(&body).context("parsing current weather")?
                }
                None => raw
                    .first_sample_snapshot()
                    .context("forecast contains no samples")?,
            };

            let service = InsightService::new(&Config::default());
            let report = service.analyze_recorded(snapshot, &raw);
            print_report(&cli, &report, json)?;
        }
        Commands::Insights { lat, lon, json } => {
            let config = Config::load(cli.config.as_deref())?;
            let service = InsightService::new(&config);

            let (lat, lon) = match (lat, lon) {
                (Some(lat), Some(lon)) => (lat, lon),
                _ => service
                    .default_location()
                    .context("OpenWeatherMap is not configured. Run `agrocast init`.")?,
            };

            let report = service.report(lat, lon).await?;
            print_report(&cli, &report, json)?;
        }
        Commands::Serve { port } => {
            let config = Config::load(cli.config.as_deref())?;
            let service = InsightService::new(&config);
            if !service.is_configured() {
                tracing::warn!("Serving without OpenWeatherMap - weather endpoints return 503");
            }

            let host: std::net::IpAddr = config
                .server
                .host
                .parse()
                .with_context(|| format!("invalid server host '{}'", config.server.host))?;
            let addr = SocketAddr::new(host, port.unwrap_or(config.server.port));

            let app = server::router(server::AppState { service });
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("binding {}", addr))?;
            tracing::info!("Weather proxy listening on {}", addr);
            println!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

fn open_settings_db(cli: &Cli) -> error::Result<Database> {
    let path = Config::db_path(cli.data_dir.as_deref())?;
    Database::open(&path)
}

fn load_settings(cli: &Cli) -> Settings {
    match open_settings_db(cli).and_then(|db| Settings::load(&db)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            Settings::default()
        }
    }
}

fn print_report(cli: &Cli, report: &InsightReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        let settings = load_settings(cli);
        let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        print!("{}", report::render(report, &settings, color));
    }
    Ok(())
}

fn run_settings(cli: &Cli, action: &SettingsAction) -> anyhow::Result<()> {
    let db = open_settings_db(cli)?;
    let mut settings = Settings::load(&db)?;

    match action {
        SettingsAction::Show => {}
        SettingsAction::Theme { value } => {
            settings.theme = Theme::from_str(value)
                .with_context(|| format!("unknown theme '{}' (expected light or dark)", value))?;
            settings.save(&db)?;
        }
        SettingsAction::Role { value } => {
            settings.role = Role::from_str(value).with_context(|| {
                let known: Vec<_> = Role::ALL.iter().map(Role::as_str).collect();
                format!("unknown role '{}' (expected one of {})", value, known.join(", "))
            })?;
            settings.save(&db)?;
        }
    }

    println!("Theme: {}", settings.theme);
    println!("Role:  {} ({})", settings.role, settings.role.dashboard_path());
    println!("Menu:  {}", settings.role.menu_items().join(" | "));
    println!("Store: {}", db.path().display());
    Ok(())
}

async fn run_check(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    println!("Config: OK");

    match open_settings_db(cli) {
        Ok(db) => println!("Settings store: OK ({})", db.path().display()),
        Err(e) => println!("Settings store: FAILED ({})", e),
    }

    let service = InsightService::new(&config);
    if !service.is_configured() {
        println!("OpenWeatherMap: NOT CONFIGURED");
        return Ok(());
    }

    if service.check_connection().await {
        println!("OpenWeatherMap: OK");
    } else {
        println!("OpenWeatherMap: OFFLINE");
    }
    Ok(())
}
