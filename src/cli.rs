use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "agrocast", version, about = "Forecast-driven agricultural advisories")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the forecast and print advisories
    Insights {
        /// Latitude (defaults to the configured location)
        #[arg(long, allow_hyphen_values = true, requires = "lon")]
        lat: Option<f64>,
        /// Longitude (defaults to the configured location)
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lon: Option<f64>,
        /// Print JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },
    /// Derive advisories from a recorded OpenWeatherMap forecast response
    Analyze {
        /// Forecast response body (JSON)
        forecast: PathBuf,
        /// Current-weather response body (JSON); defaults to the first forecast sample
        #[arg(long)]
        current: Option<PathBuf>,
        /// Print JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },
    /// List the advisory rules in evaluation order
    Rules,
    /// Run the weather proxy HTTP server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show or change display preferences
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Run interactive setup
    Init,
    /// Validate config and test connections
    Check,
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print current settings
    Show,
    /// Set colour theme (light or dark)
    Theme { value: String },
    /// Set marketplace role (investor, landowner, farmer, buyer)
    Role { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_insights_with_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "agrocast", "insights", "--lat", "-1.29", "--lon", "36.82", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Insights { lat, lon, json } => {
                assert_eq!(lat, Some(-1.29));
                assert_eq!(lon, Some(36.82));
                assert!(json);
            }
            _ => panic!("expected insights"),
        }
    }

    #[test]
    fn lat_requires_lon() {
        assert!(Cli::try_parse_from(["agrocast", "insights", "--lat", "1.0"]).is_err());
    }

    #[test]
    fn parse_rules() {
        let cli = Cli::try_parse_from(["agrocast", "rules"]).unwrap();
        assert!(matches!(cli.command, Commands::Rules));
    }

    #[test]
    fn parse_settings_and_global_flags() {
        let cli =
            Cli::try_parse_from(["agrocast", "settings", "theme", "dark", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Settings {
                action: SettingsAction::Theme { ref value }
            } if value == "dark"
        ));
    }
}
