use std::env;

use crate::error::LabelerError;

#[derive(Debug)]
pub struct Settings {
    /// SQLite connection URL, e.g. `sqlite://headlines.db`.
    pub database_url: String,
    /// HTTP server port (review UI + CSV endpoints + health).
    pub http_port: u16,
}

impl Settings {
    /// Validates the settings and returns an error if invalid.
    pub fn validate(&self) -> Result<(), LabelerError> {
        validate_database_url(&self.database_url)?;
        validate_port(self.http_port)?;
        Ok(())
    }
}

/// Validates that the database URL is non-empty and uses the sqlite scheme.
fn validate_database_url(url: &str) -> Result<(), LabelerError> {
    if url.trim().is_empty() {
        return Err(LabelerError::Config("Database URL cannot be empty".into()));
    }
    if !url.starts_with("sqlite:") {
        return Err(LabelerError::Config(format!(
            "Database URL must use the sqlite scheme, got: {url}"
        )));
    }
    Ok(())
}

/// Validates that the port is in valid range (1-65535).
fn validate_port(port: u16) -> Result<(), LabelerError> {
    if port == 0 {
        return Err(LabelerError::Config("Port cannot be 0".into()));
    }
    Ok(())
}

pub fn get_configuration() -> Result<Settings, Box<dyn std::error::Error>> {
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://headlines.db".to_string());

    let http_port = env::var("HTTP_PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse::<u16>()?;

    let settings = Settings {
        database_url,
        http_port,
    };

    // Validate settings before returning
    settings.validate()?;

    Ok(settings)
}
