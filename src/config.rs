use anyhow::{Context, Result};
use clap::Parser;
use std::env;

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments, built once at startup
/// and injected into the services; nothing reads the environment ad hoc.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Mail settings, present only when fully configured.
    pub mail: Option<MailSettings>,
}

/// SMTP settings for the admin notification email.
///
/// Only constructed when host, user, password and admin recipient are all
/// present; a partially configured mail block counts as not configured and
/// notifications are skipped.
#[derive(Debug, Clone)]
pub struct MailSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub admin_email: String,
}

impl MailSettings {
    /// Read `SMTP_HOST`, `SMTP_PORT`, `SMTP_USER`, `SMTP_PASSWORD` and
    /// `ADMIN_EMAIL`. Returns `None` unless all of host, user, password and
    /// admin recipient are set. `SMTP_PORT` defaults to 587.
    pub fn from_env() -> Option<Self> {
        let host = env::var("SMTP_HOST").ok()?;
        let user = env::var("SMTP_USER").ok()?;
        let password = env::var("SMTP_PASSWORD").ok()?;
        let admin_email = env::var("ADMIN_EMAIL").ok()?;
        let port = env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_SMTP_PORT);

        Some(Self {
            host,
            port,
            user,
            password,
            admin_email,
        })
    }
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Lodging booking backend API")]
pub struct Args {
    /// Host to bind to (overrides BOOKING_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides BOOKING_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Run migrations and exit
    #[arg(long)]
    pub migrate: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        // Parse CLI once
        let args = Args::parse();

        // --- Environment fallback ---
        let env_host = env::var("BOOKING_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = match env::var("BOOKING_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing BOOKING_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => 3000,
            Err(err) => return Err(err).context("reading BOOKING_PORT"),
        };
        let env_db =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://./data/bookings.db".into());

        // --- Merge ---
        let cfg = Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            database_url: args.database_url.unwrap_or(env_db),
            mail: MailSettings::from_env(),
        };

        Ok((cfg, args.migrate))
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
