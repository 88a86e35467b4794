mod error;
pub mod matcher;
pub mod roster;

pub use error::{Error, Result};
pub use matcher::MatchReply;

use std::time::Duration as StdDuration;

use reqwest::Client;

use rostra_config::EndpointConfig;

fn client(cfg: &EndpointConfig) -> Result<Client> {
	Ok(Client::builder().timeout(StdDuration::from_millis(cfg.timeout_ms)).build()?)
}
