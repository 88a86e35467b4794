use std::time::Duration;

use tokio::{
	io::{AsyncBufReadExt, BufReader},
	time,
};

use rostra_config::Config;
use rostra_session::{Recommendation, RosterLoad, Session, SessionView};

pub async fn run_shell(config: &Config) -> color_eyre::Result<()> {
	let quiet = Duration::from_millis(config.search.quiet_period_ms);
	let session = Session::over_http(config);

	println!("Loading advocates...");

	session.load_roster().await;

	render(&session.view());

	let view = session.view();

	if view.load == RosterLoad::Failed {
		tracing::warn!(
			endpoint = %config.collaborators.roster.url(),
			"Roster load failed; starting with no data."
		);

		println!("No advocates available; fix the roster endpoint and restart.");
	} else {
		tracing::info!(count = view.roster.len(), "Shell ready.");
	}

	println!("Type to filter, ':rec <text>' to ask for a recommendation,");
	println!("':reset' to clear the filter, ':clear' to clear the recommendation, ':quit' to exit.");

	let mut lines = BufReader::new(tokio::io::stdin()).lines();

	while let Some(line) = lines.next_line().await? {
		match line.trim() {
			":quit" | ":q" => break,
			":reset" => session.reset_filter(),
			":clear" => session.clear_recommendation(),
			command if command.starts_with(":rec") => {
				let query = command.strip_prefix(":rec").unwrap_or("").trim_start();

				session.submit_recommendation(query).await;
			},
			_ => {
				session.set_filter_input(&line);

				// Give the quiet period a chance to elapse before rendering,
				// so the view reflects this line rather than the previous one.
				time::sleep(quiet + Duration::from_millis(50)).await;
			},
		}

		render(&session.view());
	}

	Ok(())
}

fn render(view: &SessionView) {
	match view.load {
		RosterLoad::Idle | RosterLoad::Loading => println!("(loading)"),
		RosterLoad::Failed => println!("(no data)"),
		RosterLoad::Loaded => {
			println!("{} of {} advocates:", view.filtered.len(), view.roster.len());

			for advocate in &view.filtered {
				println!(
					"  {} {} - {} - {} - {} yrs - {} - {}",
					advocate.first_name,
					advocate.last_name,
					advocate.city,
					advocate.degree,
					advocate.years_of_experience,
					advocate.specialties.join(", "),
					advocate.phone_number,
				);
			}
		},
	}

	match &view.recommendation {
		Recommendation::NoQuery => {},
		Recommendation::Pending => println!("Recommendation: pending..."),
		Recommendation::Matched { advocate, explanation } => {
			println!(
				"Recommendation: {} {} - {explanation}",
				advocate.first_name, advocate.last_name,
			);
		},
		Recommendation::NoMatch { explanation } | Recommendation::Failed { explanation } => {
			println!("Recommendation: {explanation}");
		},
	}
}
