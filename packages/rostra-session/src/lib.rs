//! Session orchestration for roster search and recommendation.
//!
//! The [`Session`] owns every piece of mutable state: the loaded roster,
//! both query strings, the filtered view, and the recommendation outcome.
//! Collaborator access goes through the [`RosterProvider`] and
//! [`MatcherProvider`] seams so tests can script both ends.

pub mod debounce;

pub use debounce::Debounce;

use std::{
	future::Future,
	pin::Pin,
	sync::{Arc, Mutex, MutexGuard},
	time::Duration,
};

use rostra_config::{Config, EndpointConfig};
use rostra_domain::{Advocate, filter};
use rostra_providers::{MatchReply, matcher, roster};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Fixed user-facing text when the matcher answered but found nobody.
pub const NO_MATCH_EXPLANATION: &str =
	"No advocate matched your request. Try rephrasing what you need help with.";
/// Fixed user-facing text when the matcher could not be reached at all.
/// Deliberately distinct from [`NO_MATCH_EXPLANATION`] so the two outcomes
/// stay tellable apart.
pub const MATCHER_UNAVAILABLE_EXPLANATION: &str =
	"The recommendation service is unavailable right now. Please try again later.";

pub trait RosterProvider
where
	Self: Send + Sync,
{
	fn fetch<'a>(&'a self) -> BoxFuture<'a, color_eyre::Result<Vec<Advocate>>>;
}

pub trait MatcherProvider
where
	Self: Send + Sync,
{
	fn recommend<'a>(
		&'a self,
		query: &'a str,
		advocates: &'a [Advocate],
	) -> BoxFuture<'a, color_eyre::Result<MatchReply>>;
}

pub struct HttpRoster {
	cfg: EndpointConfig,
}
impl HttpRoster {
	pub fn new(cfg: EndpointConfig) -> Self {
		Self { cfg }
	}
}
impl RosterProvider for HttpRoster {
	fn fetch<'a>(&'a self) -> BoxFuture<'a, color_eyre::Result<Vec<Advocate>>> {
		Box::pin(async move { Ok(roster::fetch_roster(&self.cfg).await?) })
	}
}

pub struct HttpMatcher {
	cfg: EndpointConfig,
}
impl HttpMatcher {
	pub fn new(cfg: EndpointConfig) -> Self {
		Self { cfg }
	}
}
impl MatcherProvider for HttpMatcher {
	fn recommend<'a>(
		&'a self,
		query: &'a str,
		advocates: &'a [Advocate],
	) -> BoxFuture<'a, color_eyre::Result<MatchReply>> {
		Box::pin(async move { Ok(matcher::recommend(&self.cfg, query, advocates).await?) })
	}
}

/// Roster loading lifecycle. `Failed` is distinct from a loaded-but-empty
/// roster so the consumer can say "no data" instead of showing a blank
/// table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RosterLoad {
	Idle,
	Loading,
	Loaded,
	Failed,
}

/// The latest settled recommendation outcome.
#[derive(Clone, Debug, PartialEq)]
pub enum Recommendation {
	/// No query submitted, or the query was cleared.
	NoQuery,
	Pending,
	Matched { advocate: Advocate, explanation: String },
	NoMatch { explanation: String },
	Failed { explanation: String },
}

/// A read-only snapshot of everything the presentation layer renders.
#[derive(Clone, Debug)]
pub struct SessionView {
	pub load: RosterLoad,
	pub roster: Vec<Advocate>,
	pub filter_input: String,
	pub settled_query: String,
	pub filter_pending: bool,
	pub filtered: Vec<Advocate>,
	pub recommendation_query: String,
	pub recommendation: Recommendation,
}

struct Inner {
	load: RosterLoad,
	roster: Vec<Advocate>,
	filter_input: String,
	settled_query: String,
	filter_pending: bool,
	filtered: Vec<Advocate>,
	// Bumped on every input change and reset; a settle whose generation is
	// stale is dropped instead of applied.
	filter_generation: u64,
	recommendation_query: String,
	recommendation: Recommendation,
	// Bumped on every accepted submission and every clear; a resolution
	// whose token is stale is discarded, so the visible outcome always
	// belongs to the most recent submission.
	recommendation_seq: u64,
}
impl Inner {
	fn new() -> Self {
		Self {
			load: RosterLoad::Idle,
			roster: Vec::new(),
			filter_input: String::new(),
			settled_query: String::new(),
			filter_pending: false,
			filtered: Vec::new(),
			filter_generation: 0,
			recommendation_query: String::new(),
			recommendation: Recommendation::NoQuery,
			recommendation_seq: 0,
		}
	}
}

pub struct Session {
	roster_provider: Arc<dyn RosterProvider>,
	matcher: Arc<dyn MatcherProvider>,
	inner: Arc<Mutex<Inner>>,
	debounce: Mutex<Debounce>,
}
impl Session {
	pub fn new(
		roster_provider: Arc<dyn RosterProvider>,
		matcher: Arc<dyn MatcherProvider>,
		quiet: Duration,
	) -> Self {
		Self {
			roster_provider,
			matcher,
			inner: Arc::new(Mutex::new(Inner::new())),
			debounce: Mutex::new(Debounce::new(quiet)),
		}
	}

	/// Wires the session to the real collaborators named in `cfg`.
	pub fn over_http(cfg: &Config) -> Self {
		Self::new(
			Arc::new(HttpRoster::new(cfg.collaborators.roster.clone())),
			Arc::new(HttpMatcher::new(cfg.collaborators.matcher.clone())),
			Duration::from_millis(cfg.search.quiet_period_ms),
		)
	}

	/// Fetches the roster once. On failure the roster and the filtered view
	/// stay empty and the load state records the failure; retry is a fresh
	/// call, never automatic.
	pub async fn load_roster(&self) {
		self.lock().load = RosterLoad::Loading;

		match self.roster_provider.fetch().await {
			Ok(records) => {
				let mut inner = self.lock();

				inner.load = RosterLoad::Loaded;
				inner.filtered = filter::filter(&records, &inner.settled_query);
				inner.roster = records;

				tracing::info!(count = inner.roster.len(), "Loaded advocate roster.");
			},
			Err(err) => {
				tracing::warn!(error = %err, "Failed to load advocate roster.");

				let mut inner = self.lock();

				inner.load = RosterLoad::Failed;
				inner.roster.clear();
				inner.filtered.clear();
			},
		}
	}

	/// Records a keystroke on the live filter and re-arms the quiet-period
	/// timer. The filter itself runs only once the input settles; typing is
	/// never blocked.
	pub fn set_filter_input(&self, text: &str) {
		let generation = {
			let mut inner = self.lock();

			inner.filter_input = text.to_string();
			inner.filter_pending = true;
			inner.filter_generation += 1;
			inner.filter_generation
		};
		let state = self.inner.clone();
		let query = text.to_string();

		self.debounce().rearm(move || {
			let mut inner = state.lock().unwrap_or_else(|err| err.into_inner());

			// A reset that happened after this timer was armed wins.
			if inner.filter_generation != generation {
				return;
			}

			inner.filtered = filter::filter(&inner.roster, &query);
			inner.settled_query = query;
			inner.filter_pending = false;
		});
	}

	/// Clears the live filter and restores the full roster immediately,
	/// regardless of any timer still pending.
	pub fn reset_filter(&self) {
		self.debounce().cancel();

		let mut inner = self.lock();

		inner.filter_generation += 1;
		inner.filter_input.clear();
		inner.settled_query.clear();
		inner.filter_pending = false;
		inner.filtered = inner.roster.clone();
	}

	/// Submits a free-text query to the matcher over the full loaded roster,
	/// never the filtered view.
	///
	/// A blank submission is rejected locally without a collaborator call.
	/// Each accepted submission takes a fresh sequence token; when the call
	/// resolves, its outcome is applied only if no newer submission or clear
	/// has taken a later token in the meantime.
	pub async fn submit_recommendation(&self, query: &str) {
		if query.trim().is_empty() {
			self.clear_recommendation();

			return;
		}

		let (token, candidates) = {
			let mut inner = self.lock();

			inner.recommendation_seq += 1;
			inner.recommendation_query = query.to_string();
			inner.recommendation = Recommendation::Pending;

			(inner.recommendation_seq, inner.roster.clone())
		};
		let outcome = match self.matcher.recommend(query, &candidates).await {
			Ok(MatchReply::Matched { advocate, explanation }) =>
				Recommendation::Matched { advocate, explanation },
			Ok(MatchReply::NoMatch) =>
				Recommendation::NoMatch { explanation: NO_MATCH_EXPLANATION.to_string() },
			Err(err) => {
				tracing::warn!(error = %err, "Recommendation call failed.");

				Recommendation::Failed {
					explanation: MATCHER_UNAVAILABLE_EXPLANATION.to_string(),
				}
			},
		};
		let mut inner = self.lock();

		if inner.recommendation_seq != token {
			tracing::debug!(
				token,
				current = inner.recommendation_seq,
				"Discarding superseded recommendation outcome."
			);

			return;
		}

		inner.recommendation = outcome;
	}

	/// Clears the recommendation query. Resets the outcome to `NoQuery` at
	/// once and supersedes any in-flight call; the call itself is not
	/// aborted, only its effect suppressed.
	pub fn clear_recommendation(&self) {
		let mut inner = self.lock();

		inner.recommendation_seq += 1;
		inner.recommendation_query.clear();
		inner.recommendation = Recommendation::NoQuery;
	}

	/// An owned snapshot of all derived state.
	pub fn view(&self) -> SessionView {
		let inner = self.lock();

		SessionView {
			load: inner.load,
			roster: inner.roster.clone(),
			filter_input: inner.filter_input.clone(),
			settled_query: inner.settled_query.clone(),
			filter_pending: inner.filter_pending,
			filtered: inner.filtered.clone(),
			recommendation_query: inner.recommendation_query.clone(),
			recommendation: inner.recommendation.clone(),
		}
	}

	fn lock(&self) -> MutexGuard<'_, Inner> {
		self.inner.lock().unwrap_or_else(|err| err.into_inner())
	}

	fn debounce(&self) -> MutexGuard<'_, Debounce> {
		self.debounce.lock().unwrap_or_else(|err| err.into_inner())
	}
}
