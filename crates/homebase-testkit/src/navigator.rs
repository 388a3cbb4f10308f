use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use homebase_types::error::{Error, HbResult};
use homebase_types::navigator::Navigator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationCall {
	Push(String),
	Replace(String),
}

/// Router that records navigation calls
#[derive(Debug, Default)]
pub struct RecordingNavigator {
	calls: Mutex<Vec<NavigationCall>>,
	fail: AtomicBool,
}

impl RecordingNavigator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn fail(&self, fail: bool) {
		self.fail.store(fail, Ordering::SeqCst);
	}

	pub fn calls(&self) -> Vec<NavigationCall> {
		self.calls.lock().clone()
	}

	/// Routes passed to `push`, in order
	pub fn pushed(&self) -> Vec<String> {
		self.calls
			.lock()
			.iter()
			.filter_map(|call| match call {
				NavigationCall::Push(route) => Some(route.clone()),
				NavigationCall::Replace(_) => None,
			})
			.collect()
	}

	fn record(&self, call: NavigationCall) -> HbResult<()> {
		if self.fail.load(Ordering::SeqCst) {
			return Err(Error::Internal("router not mounted".into()));
		}
		self.calls.lock().push(call);
		Ok(())
	}
}

impl Navigator for RecordingNavigator {
	fn push(&self, route: &str) -> HbResult<()> {
		self.record(NavigationCall::Push(route.to_string()))
	}

	fn replace(&self, route: &str) -> HbResult<()> {
		self.record(NavigationCall::Replace(route.to_string()))
	}
}

// vim: ts=4
