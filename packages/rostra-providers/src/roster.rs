use serde::Deserialize;

use crate::Result;
use rostra_config::EndpointConfig;
use rostra_domain::Advocate;

#[derive(Debug, Deserialize)]
struct RosterResponse {
	data: Vec<Advocate>,
}

/// Fetches the full advocate roster from the listing collaborator.
///
/// The endpoint takes no parameters and returns `{ "data": [...] }` in the
/// backing store's insertion order. Any non-success status or undecodable
/// body is an error; the caller decides how to degrade.
pub async fn fetch_roster(cfg: &EndpointConfig) -> Result<Vec<Advocate>> {
	let res = crate::client(cfg)?.get(cfg.url()).send().await?;
	let body: RosterResponse = res.error_for_status()?.json().await?;

	Ok(body.data)
}
