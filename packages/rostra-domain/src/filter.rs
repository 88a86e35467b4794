//! Live roster filtering.
//!
//! The engine re-scans the full record set on every settled query change.
//! That is O(records x fields) per evaluation, which is acceptable for a
//! client-session-sized roster; no incremental index is kept.

use crate::Advocate;

/// Returns the records whose fields contain `query`, preserving input order.
///
/// Matching is a case-insensitive, locale-naive substring test against first
/// name, last name, city, degree, each specialty tag, and the decimal form of
/// years of experience, combined with OR. An empty or whitespace-only query
/// matches every record.
pub fn filter(records: &[Advocate], query: &str) -> Vec<Advocate> {
	if query.trim().is_empty() {
		return records.to_vec();
	}

	let needle = query.to_lowercase();

	records.iter().filter(|record| matches_lowercase(record, &needle)).cloned().collect()
}

/// Whether a single record matches `query` under the same rule as [`filter`].
pub fn matches(record: &Advocate, query: &str) -> bool {
	if query.trim().is_empty() {
		return true;
	}

	matches_lowercase(record, &query.to_lowercase())
}

fn matches_lowercase(record: &Advocate, needle: &str) -> bool {
	let fields = [&record.first_name, &record.last_name, &record.city, &record.degree];

	if fields.iter().any(|field| field.to_lowercase().contains(needle)) {
		return true;
	}
	if record.specialties.iter().any(|specialty| specialty.to_lowercase().contains(needle)) {
		return true;
	}

	// Substring matching on the years figure is of debatable search value,
	// but it is observable behavior and is kept; see DESIGN.md.
	record.years_of_experience.to_string().contains(needle)
}
