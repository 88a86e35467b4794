use std::{
	collections::HashMap,
	sync::{Arc, Mutex},
	time::Duration,
};

use color_eyre::eyre;
use tokio::{task, time};

use rostra_domain::Advocate;
use rostra_providers::MatchReply;
use rostra_session::{
	BoxFuture, HttpMatcher, HttpRoster, MATCHER_UNAVAILABLE_EXPLANATION, MatcherProvider,
	NO_MATCH_EXPLANATION, Recommendation, RosterLoad, RosterProvider, Session,
};
use rostra_testkit::{MatcherReply, MockCollaborator, fixtures};

const QUIET: Duration = Duration::from_millis(300);

struct ScriptedRoster {
	outcome: Mutex<Option<color_eyre::Result<Vec<Advocate>>>>,
}
impl ScriptedRoster {
	fn ok(records: Vec<Advocate>) -> Self {
		Self { outcome: Mutex::new(Some(Ok(records))) }
	}

	fn failing() -> Self {
		Self { outcome: Mutex::new(Some(Err(eyre::eyre!("roster unavailable")))) }
	}
}
impl RosterProvider for ScriptedRoster {
	fn fetch<'a>(&'a self) -> BoxFuture<'a, color_eyre::Result<Vec<Advocate>>> {
		let outcome = self.outcome.lock().unwrap().take().expect("Unscripted roster fetch.");

		Box::pin(async move { outcome })
	}
}

/// Replies per query after a scripted delay, and records what it was asked.
#[derive(Default)]
struct ScriptedMatcher {
	script: Mutex<HashMap<String, (Duration, color_eyre::Result<MatchReply>)>>,
	calls: Mutex<Vec<(String, usize)>>,
}
impl ScriptedMatcher {
	fn script(&self, query: &str, delay: Duration, reply: color_eyre::Result<MatchReply>) {
		self.script.lock().unwrap().insert(query.to_string(), (delay, reply));
	}

	fn calls(&self) -> Vec<(String, usize)> {
		self.calls.lock().unwrap().clone()
	}
}
impl MatcherProvider for ScriptedMatcher {
	fn recommend<'a>(
		&'a self,
		query: &'a str,
		advocates: &'a [Advocate],
	) -> BoxFuture<'a, color_eyre::Result<MatchReply>> {
		self.calls.lock().unwrap().push((query.to_string(), advocates.len()));

		let (delay, reply) =
			self.script.lock().unwrap().remove(query).expect("Unscripted matcher query.");

		Box::pin(async move {
			time::sleep(delay).await;

			reply
		})
	}
}

fn matched(advocate: Advocate, explanation: &str) -> color_eyre::Result<MatchReply> {
	Ok(MatchReply::Matched { advocate, explanation: explanation.to_string() })
}

fn session_with(
	roster: ScriptedRoster,
	matcher: Arc<ScriptedMatcher>,
) -> Session {
	Session::new(Arc::new(roster), matcher, QUIET)
}

#[tokio::test]
async fn load_success_populates_roster_and_filtered_view() {
	let records = fixtures::sample_roster();
	let session =
		session_with(ScriptedRoster::ok(records.clone()), Arc::new(ScriptedMatcher::default()));

	assert_eq!(session.view().load, RosterLoad::Idle);

	session.load_roster().await;

	let view = session.view();

	assert_eq!(view.load, RosterLoad::Loaded);
	assert_eq!(view.roster, records);
	assert_eq!(view.filtered, records);
}

#[tokio::test]
async fn load_failure_is_distinct_from_loaded_but_empty() {
	let session = session_with(ScriptedRoster::failing(), Arc::new(ScriptedMatcher::default()));

	session.load_roster().await;

	let view = session.view();

	assert_eq!(view.load, RosterLoad::Failed);
	assert!(view.roster.is_empty());
	assert!(view.filtered.is_empty());
}

#[tokio::test(start_paused = true)]
async fn typing_burst_filters_once_after_the_quiet_period() {
	let session = session_with(
		ScriptedRoster::ok(fixtures::sample_roster()),
		Arc::new(ScriptedMatcher::default()),
	);

	session.load_roster().await;

	for text in ["a", "an", "anx"] {
		session.set_filter_input(text);

		time::advance(Duration::from_millis(50)).await;
	}

	// Still inside the quiet period: nothing has settled yet and typing was
	// never blocked.
	let view = session.view();

	assert!(view.filter_pending);
	assert_eq!(view.settled_query, "");
	assert_eq!(view.filtered.len(), fixtures::sample_roster().len());

	time::advance(QUIET).await;
	task::yield_now().await;

	let view = session.view();

	assert!(!view.filter_pending);
	assert_eq!(view.settled_query, "anx");
	assert!(!view.filtered.is_empty());
	assert!(view.filtered.iter().all(|record| {
		record.specialties.iter().any(|specialty| specialty.contains("anx"))
	}));
}

#[tokio::test(start_paused = true)]
async fn reset_mid_burst_restores_the_full_view_immediately() {
	let records = fixtures::sample_roster();
	let session =
		session_with(ScriptedRoster::ok(records.clone()), Arc::new(ScriptedMatcher::default()));

	session.load_roster().await;
	session.set_filter_input("anx");

	time::advance(Duration::from_millis(100)).await;

	session.reset_filter();

	let view = session.view();

	assert!(!view.filter_pending);
	assert_eq!(view.filter_input, "");
	assert_eq!(view.filtered, records);

	// The armed timer must not fire late and narrow the view again.
	time::advance(QUIET + QUIET).await;
	task::yield_now().await;

	let view = session.view();

	assert_eq!(view.settled_query, "");
	assert_eq!(view.filtered, records);
}

#[tokio::test(start_paused = true)]
async fn newer_submission_wins_even_if_the_older_resolves_later() {
	let records = fixtures::sample_roster();
	let matcher = Arc::new(ScriptedMatcher::default());

	matcher.script("first", Duration::from_millis(500), matched(records[0].clone(), "first"));
	matcher.script("second", Duration::from_millis(100), matched(records[1].clone(), "second"));

	let session = Arc::new(session_with(ScriptedRoster::ok(records.clone()), matcher));

	session.load_roster().await;

	let a = {
		let session = session.clone();

		tokio::spawn(async move { session.submit_recommendation("first").await })
	};

	task::yield_now().await;

	let b = {
		let session = session.clone();

		tokio::spawn(async move { session.submit_recommendation("second").await })
	};

	task::yield_now().await;

	assert_eq!(session.view().recommendation, Recommendation::Pending);

	time::advance(Duration::from_millis(600)).await;

	a.await.unwrap();
	b.await.unwrap();

	assert_eq!(
		session.view().recommendation,
		Recommendation::Matched { advocate: records[1].clone(), explanation: "second".to_string() },
	);
}

#[tokio::test(start_paused = true)]
async fn stale_failure_cannot_overwrite_a_newer_match() {
	let records = fixtures::sample_roster();
	let matcher = Arc::new(ScriptedMatcher::default());

	matcher.script("first", Duration::from_millis(500), Err(eyre::eyre!("connection reset")));
	matcher.script("second", Duration::from_millis(100), matched(records[0].clone(), "second"));

	let session = Arc::new(session_with(ScriptedRoster::ok(records.clone()), matcher));

	session.load_roster().await;

	let a = {
		let session = session.clone();

		tokio::spawn(async move { session.submit_recommendation("first").await })
	};

	task::yield_now().await;

	let b = {
		let session = session.clone();

		tokio::spawn(async move { session.submit_recommendation("second").await })
	};

	task::yield_now().await;
	time::advance(Duration::from_millis(600)).await;

	a.await.unwrap();
	b.await.unwrap();

	assert_eq!(
		session.view().recommendation,
		Recommendation::Matched { advocate: records[0].clone(), explanation: "second".to_string() },
	);
}

#[tokio::test]
async fn blank_submission_never_reaches_the_matcher() {
	let matcher = Arc::new(ScriptedMatcher::default());
	let session =
		session_with(ScriptedRoster::ok(fixtures::sample_roster()), matcher.clone());

	session.load_roster().await;
	session.submit_recommendation("   ").await;

	assert_eq!(session.view().recommendation, Recommendation::NoQuery);
	assert!(matcher.calls().is_empty());
}

#[tokio::test]
async fn blank_submission_reverts_a_settled_outcome() {
	let records = fixtures::sample_roster();
	let matcher = Arc::new(ScriptedMatcher::default());

	matcher.script("anxiety help", Duration::ZERO, matched(records[0].clone(), "done"));

	let session = session_with(ScriptedRoster::ok(records), matcher.clone());

	session.load_roster().await;
	session.submit_recommendation("anxiety help").await;

	assert!(matches!(session.view().recommendation, Recommendation::Matched { .. }));

	session.submit_recommendation("").await;

	assert_eq!(session.view().recommendation, Recommendation::NoQuery);
	assert_eq!(matcher.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn clearing_while_pending_resets_to_no_query_and_suppresses_the_result() {
	let records = fixtures::sample_roster();
	let matcher = Arc::new(ScriptedMatcher::default());

	matcher.script("slow", Duration::from_millis(500), matched(records[0].clone(), "late"));

	let session = Arc::new(session_with(ScriptedRoster::ok(records), matcher));

	session.load_roster().await;

	let pending = {
		let session = session.clone();

		tokio::spawn(async move { session.submit_recommendation("slow").await })
	};

	task::yield_now().await;

	assert_eq!(session.view().recommendation, Recommendation::Pending);

	session.clear_recommendation();

	assert_eq!(session.view().recommendation, Recommendation::NoQuery);

	time::advance(Duration::from_millis(600)).await;

	pending.await.unwrap();

	// The in-flight call resolved, but its outcome stayed invisible.
	assert_eq!(session.view().recommendation, Recommendation::NoQuery);
}

#[tokio::test]
async fn no_match_and_failure_use_distinct_discriminants_and_fallbacks() {
	let matcher = Arc::new(ScriptedMatcher::default());

	matcher.script("unmatchable", Duration::ZERO, Ok(MatchReply::NoMatch));
	matcher.script("unreachable", Duration::ZERO, Err(eyre::eyre!("connect timeout")));

	let session = session_with(ScriptedRoster::ok(fixtures::sample_roster()), matcher);

	session.load_roster().await;
	session.submit_recommendation("unmatchable").await;

	let no_match = session.view().recommendation;

	assert_eq!(
		no_match,
		Recommendation::NoMatch { explanation: NO_MATCH_EXPLANATION.to_string() }
	);

	session.submit_recommendation("unreachable").await;

	let failed = session.view().recommendation;

	assert_eq!(
		failed,
		Recommendation::Failed { explanation: MATCHER_UNAVAILABLE_EXPLANATION.to_string() }
	);
	assert_ne!(NO_MATCH_EXPLANATION, MATCHER_UNAVAILABLE_EXPLANATION);
}

#[tokio::test(start_paused = true)]
async fn recommendation_always_carries_the_full_roster() {
	let records = fixtures::sample_roster();
	let matcher = Arc::new(ScriptedMatcher::default());

	matcher.script("anything", Duration::ZERO, Ok(MatchReply::NoMatch));

	let session = session_with(ScriptedRoster::ok(records.clone()), matcher.clone());

	session.load_roster().await;

	// Narrow the visible list first; the matcher must still see everyone.
	session.set_filter_input("jane");

	task::yield_now().await;
	time::advance(QUIET + Duration::from_millis(50)).await;
	task::yield_now().await;

	assert!(session.view().filtered.len() < records.len());

	session.submit_recommendation("anything").await;

	assert_eq!(matcher.calls(), vec![("anything".to_string(), records.len())]);
}

#[tokio::test]
async fn http_wiring_round_trips_against_the_mock_collaborator() {
	let mock = MockCollaborator::start().await.expect("Failed to start mock.");
	let records = fixtures::sample_roster();

	mock.set_roster(records.clone());
	mock.push_reply(MatcherReply::Match {
		advocate: records[0].clone(),
		explanation: "Jane covers anxiety.".to_string(),
	});

	let session = Session::new(
		Arc::new(HttpRoster::new(mock.roster_endpoint())),
		Arc::new(HttpMatcher::new(mock.matcher_endpoint())),
		QUIET,
	);

	session.load_roster().await;

	assert_eq!(session.view().load, RosterLoad::Loaded);

	session.submit_recommendation("I need help with anxiety").await;

	assert_eq!(
		session.view().recommendation,
		Recommendation::Matched {
			advocate: records[0].clone(),
			explanation: "Jane covers anxiety.".to_string(),
		},
	);

	let request = mock.last_recommend_request().expect("No request captured.");

	assert_eq!(request["advocates"].as_array().map(Vec::len), Some(records.len()));
}
