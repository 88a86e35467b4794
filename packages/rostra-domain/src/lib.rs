pub mod filter;

use serde::{Deserialize, Serialize};

/// One professional profile in the loaded roster.
///
/// Field names serialize in camelCase to match the collaborator wire shape
/// (`firstName`, `yearsOfExperience`, ...). Records are immutable once
/// fetched; a reload replaces the whole set, nothing is patched in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advocate {
	/// Opaque identifier, unique within a loaded set.
	pub id: String,
	pub first_name: String,
	pub last_name: String,
	pub city: String,
	pub degree: String,
	/// Display order matters; matching treats each tag independently.
	pub specialties: Vec<String>,
	pub years_of_experience: u32,
	/// Free text, formatting not validated.
	pub phone_number: String,
}
