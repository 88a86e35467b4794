//! In-process doubles for the two external collaborators, used by
//! integration tests across the workspace.

mod error;

pub use error::{Error, Result};

pub mod fixtures;

use std::{
	collections::VecDeque,
	sync::{Arc, Mutex},
};

use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde_json::Value;
use tokio::{net::TcpListener, task::JoinHandle};

use rostra_config::EndpointConfig;
use rostra_domain::Advocate;

pub const ROSTER_PATH: &str = "/api/advocates";
pub const MATCHER_PATH: &str = "/api/recommend";

/// One scripted reply for the recommend endpoint; replies are consumed in
/// push order, and an exhausted script answers `NoMatch`.
#[derive(Clone, Debug)]
pub enum MatcherReply {
	Match { advocate: Advocate, explanation: String },
	NoMatch,
	Error { status: u16 },
	/// A 200 with a body that is not JSON, to exercise malformed-payload
	/// handling.
	Garbled,
}

struct MockState {
	roster: Mutex<std::result::Result<Vec<Advocate>, u16>>,
	replies: Mutex<VecDeque<MatcherReply>>,
	recommend_requests: Mutex<Vec<Value>>,
}
impl Default for MockState {
	fn default() -> Self {
		Self {
			roster: Mutex::new(Ok(Vec::new())),
			replies: Mutex::new(VecDeque::new()),
			recommend_requests: Mutex::new(Vec::new()),
		}
	}
}

/// A throwaway HTTP stand-in for both collaborators, bound to an ephemeral
/// local port. Scripted per test; the serve task is aborted on drop.
pub struct MockCollaborator {
	base_url: String,
	state: Arc<MockState>,
	handle: JoinHandle<()>,
}
impl MockCollaborator {
	pub async fn start() -> Result<Self> {
		let state = Arc::new(MockState::default());
		let router = Router::new()
			.route(ROSTER_PATH, get(list_advocates))
			.route(MATCHER_PATH, post(recommend))
			.with_state(state.clone());
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let handle = tokio::spawn(async move {
			let _ = axum::serve(listener, router).await;
		});

		Ok(Self { base_url: format!("http://{addr}"), state, handle })
	}

	pub fn roster_endpoint(&self) -> EndpointConfig {
		self.endpoint(ROSTER_PATH)
	}

	pub fn matcher_endpoint(&self) -> EndpointConfig {
		self.endpoint(MATCHER_PATH)
	}

	fn endpoint(&self, path: &str) -> EndpointConfig {
		EndpointConfig {
			api_base: self.base_url.clone(),
			path: path.to_string(),
			timeout_ms: 2_000,
		}
	}

	pub fn set_roster(&self, roster: Vec<Advocate>) {
		*self.state.roster.lock().unwrap_or_else(|err| err.into_inner()) = Ok(roster);
	}

	pub fn fail_roster(&self, status: u16) {
		*self.state.roster.lock().unwrap_or_else(|err| err.into_inner()) = Err(status);
	}

	pub fn push_reply(&self, reply: MatcherReply) {
		self.state.replies.lock().unwrap_or_else(|err| err.into_inner()).push_back(reply);
	}

	/// How many recommend requests the mock has served so far.
	pub fn recommend_calls(&self) -> usize {
		self.state.recommend_requests.lock().unwrap_or_else(|err| err.into_inner()).len()
	}

	/// The most recent recommend request body, if any.
	pub fn last_recommend_request(&self) -> Option<Value> {
		self.state
			.recommend_requests
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.last()
			.cloned()
	}
}
impl Drop for MockCollaborator {
	fn drop(&mut self) {
		self.handle.abort();
	}
}

async fn list_advocates(State(state): State<Arc<MockState>>) -> Response {
	let roster = state.roster.lock().unwrap_or_else(|err| err.into_inner());

	match &*roster {
		Ok(records) => Json(serde_json::json!({ "data": records })).into_response(),
		Err(status) => status_response(*status),
	}
}

async fn recommend(State(state): State<Arc<MockState>>, Json(payload): Json<Value>) -> Response {
	state.recommend_requests.lock().unwrap_or_else(|err| err.into_inner()).push(payload);

	let reply = state
		.replies
		.lock()
		.unwrap_or_else(|err| err.into_inner())
		.pop_front()
		.unwrap_or(MatcherReply::NoMatch);

	match reply {
		MatcherReply::Match { advocate, explanation } =>
			Json(serde_json::json!({ "recommendation": explanation, "advocate": advocate }))
				.into_response(),
		MatcherReply::NoMatch => Json(serde_json::json!({})).into_response(),
		MatcherReply::Error { status } => status_response(status),
		MatcherReply::Garbled => (StatusCode::OK, "not json").into_response(),
	}
}

fn status_response(status: u16) -> Response {
	StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR).into_response()
}
