use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub search: Search,
	pub collaborators: Collaborators,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	/// Minimum input stability, in milliseconds, before a debounced filter
	/// evaluation fires.
	#[serde(default = "default_quiet_period_ms")]
	pub quiet_period_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Collaborators {
	pub roster: EndpointConfig,
	pub matcher: EndpointConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EndpointConfig {
	pub api_base: String,
	pub path: String,
	pub timeout_ms: u64,
}
impl EndpointConfig {
	pub fn url(&self) -> String {
		format!("{}{}", self.api_base, self.path)
	}
}

fn default_quiet_period_ms() -> u64 {
	300
}
