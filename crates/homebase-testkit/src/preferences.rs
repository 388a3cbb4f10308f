use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use homebase_types::error::{Error, HbResult};
use homebase_types::preference_adapter::PreferenceAdapter;

/// Preference store kept in a hash map
#[derive(Debug, Default)]
pub struct MemoryPreferenceAdapter {
	values: Mutex<HashMap<Box<str>, Box<str>>>,
	fail_reads: AtomicBool,
	fail_writes: AtomicBool,
	writes: AtomicUsize,
}

impl MemoryPreferenceAdapter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_values<'a>(values: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
		let adapter = Self::new();
		{
			let mut map = adapter.values.lock();
			for (key, value) in values {
				map.insert(key.into(), value.into());
			}
		}
		adapter
	}

	/// Stored string for a key, bypassing the trait
	pub fn raw(&self, key: &str) -> Option<String> {
		self.values.lock().get(key).map(ToString::to_string)
	}

	pub fn fail_reads(&self, fail: bool) {
		self.fail_reads.store(fail, Ordering::SeqCst);
	}

	pub fn fail_writes(&self, fail: bool) {
		self.fail_writes.store(fail, Ordering::SeqCst);
	}

	/// Number of successful writes
	pub fn writes(&self) -> usize {
		self.writes.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl PreferenceAdapter for MemoryPreferenceAdapter {
	async fn read_preference(&self, key: &str) -> HbResult<Option<Box<str>>> {
		if self.fail_reads.load(Ordering::SeqCst) {
			return Err(Error::DbError);
		}
		Ok(self.values.lock().get(key).cloned())
	}

	async fn write_preference(&self, key: &str, value: &str) -> HbResult<()> {
		if self.fail_writes.load(Ordering::SeqCst) {
			return Err(Error::DbError);
		}
		self.values.lock().insert(key.into(), value.into());
		self.writes.fetch_add(1, Ordering::SeqCst);
		Ok(())
	}
}

// vim: ts=4
