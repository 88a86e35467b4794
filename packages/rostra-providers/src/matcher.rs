use serde_json::Value;

use crate::{Error, Result};
use rostra_config::EndpointConfig;
use rostra_domain::Advocate;

/// What the matching collaborator said about a query, transport concerns
/// aside. `NoMatch` is a legitimate terminal outcome, not an error.
#[derive(Clone, Debug, PartialEq)]
pub enum MatchReply {
	Matched { advocate: Advocate, explanation: String },
	NoMatch,
}

/// Asks the matching collaborator for the single best advocate for `query`.
///
/// The request always carries the full candidate list, never a filtered
/// view. A response without a truthy `recommendation` field means the
/// service found no match; a truthy `recommendation` without a decodable
/// `advocate` record is a malformed payload and surfaces as an error.
pub async fn recommend(
	cfg: &EndpointConfig,
	query: &str,
	advocates: &[Advocate],
) -> Result<MatchReply> {
	let body = serde_json::json!({ "query": query, "advocates": advocates });
	let res = crate::client(cfg)?.post(cfg.url()).json(&body).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_recommend_response(json)
}

fn parse_recommend_response(json: Value) -> Result<MatchReply> {
	let explanation = json
		.get("recommendation")
		.and_then(Value::as_str)
		.map(str::trim)
		.filter(|text| !text.is_empty());
	let Some(explanation) = explanation else {
		return Ok(MatchReply::NoMatch);
	};
	let advocate = json.get("advocate").cloned().ok_or_else(|| Error::InvalidResponse {
		message: "Recommendation response is missing the advocate record.".to_string(),
	})?;
	let advocate: Advocate = serde_json::from_value(advocate)?;

	Ok(MatchReply::Matched { advocate, explanation: explanation.to_string() })
}
