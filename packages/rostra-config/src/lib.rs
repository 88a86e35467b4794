mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Collaborators, Config, EndpointConfig, Search, Service};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.search.quiet_period_ms == 0 {
		return Err(Error::Validation {
			message: "search.quiet_period_ms must be greater than zero.".to_string(),
		});
	}

	validate_endpoint("collaborators.roster", &cfg.collaborators.roster)?;
	validate_endpoint("collaborators.matcher", &cfg.collaborators.matcher)?;

	Ok(())
}

fn validate_endpoint(table: &str, endpoint: &EndpointConfig) -> Result<()> {
	if endpoint.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: format!("{table}.api_base must be non-empty."),
		});
	}
	if !endpoint.path.starts_with('/') {
		return Err(Error::Validation {
			message: format!("{table}.path must start with '/'."),
		});
	}
	if endpoint.timeout_ms == 0 {
		return Err(Error::Validation {
			message: format!("{table}.timeout_ms must be greater than zero."),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	for endpoint in [&mut cfg.collaborators.roster, &mut cfg.collaborators.matcher] {
		endpoint.api_base = endpoint.api_base.trim().trim_end_matches('/').to_string();
		endpoint.path = endpoint.path.trim().to_string();
	}
}
