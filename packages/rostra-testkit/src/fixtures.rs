//! A small roster in the shape the listing collaborator serves.

use rostra_domain::Advocate;

pub fn advocate(
	id: &str,
	first_name: &str,
	last_name: &str,
	city: &str,
	degree: &str,
	specialties: &[&str],
	years_of_experience: u32,
) -> Advocate {
	Advocate {
		id: id.to_string(),
		first_name: first_name.to_string(),
		last_name: last_name.to_string(),
		city: city.to_string(),
		degree: degree.to_string(),
		specialties: specialties.iter().map(|s| s.to_string()).collect(),
		years_of_experience,
		phone_number: format!("555-01{:02}", id.len()),
	}
}

pub fn sample_roster() -> Vec<Advocate> {
	vec![
		advocate("a-1", "Jane", "Doe", "New York", "MD", &["anxiety", "depression"], 7),
		advocate("a-2", "Tom", "Nguyen", "Chicago", "PhD", &["family therapy"], 12),
		advocate("a-3", "Anne", "Park", "Seattle", "MSW", &["trauma", "grief counseling"], 4),
		advocate("a-4", "Luis", "Rivera", "Austin", "MD", &["sleep disorders"], 9),
		advocate("a-5", "Mira", "Patel", "Boston", "PhD", &["anxiety", "adolescent care"], 15),
	]
}
