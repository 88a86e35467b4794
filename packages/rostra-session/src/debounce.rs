//! Quiet-period gating for rapidly changing input.

use std::time::Duration;

use tokio::{task::JoinHandle, time};

/// A re-armable quiet-period timer.
///
/// Each [`rearm`](Self::rearm) cancels the previous pending emission before
/// arming a new one, so during a burst of input only the last value ever
/// settles; earlier values are dropped, never queued.
pub struct Debounce {
	quiet: Duration,
	pending: Option<JoinHandle<()>>,
}
impl Debounce {
	pub fn new(quiet: Duration) -> Self {
		Self { quiet, pending: None }
	}

	/// Arms the timer; `emit` runs once the input has been quiet for the
	/// configured period.
	///
	/// Emissions are not deduplicated. Re-arming with a value equal to the
	/// previous settled one still emits, so consumers must be idempotent to
	/// redundant settles.
	pub fn rearm<F>(&mut self, emit: F)
	where
		F: FnOnce() + Send + 'static,
	{
		self.cancel();

		let quiet = self.quiet;

		self.pending = Some(tokio::spawn(async move {
			time::sleep(quiet).await;

			emit();
		}));
	}

	/// Drops any pending emission without arming a new one.
	pub fn cancel(&mut self) {
		if let Some(pending) = self.pending.take() {
			pending.abort();
		}
	}
}
impl Drop for Debounce {
	fn drop(&mut self) {
		self.cancel();
	}
}
