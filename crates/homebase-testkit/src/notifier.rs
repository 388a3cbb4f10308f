use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use homebase_types::error::{Error, HbResult};
use homebase_types::notify_adapter::{LocalNotificationContent, LocalNotifier, PresentationOptions};

/// Local notifier that records what it was asked to show
#[derive(Debug, Default)]
pub struct RecordingNotifier {
	presentation: Mutex<Option<PresentationOptions>>,
	scheduled: Mutex<Vec<(LocalNotificationContent, Option<Duration>)>>,
	fail: AtomicBool,
}

impl RecordingNotifier {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn fail(&self, fail: bool) {
		self.fail.store(fail, Ordering::SeqCst);
	}

	pub fn presentation(&self) -> Option<PresentationOptions> {
		*self.presentation.lock()
	}

	pub fn scheduled(&self) -> Vec<(LocalNotificationContent, Option<Duration>)> {
		self.scheduled.lock().clone()
	}

	fn check(&self) -> HbResult<()> {
		if self.fail.load(Ordering::SeqCst) {
			return Err(Error::Provider("notifier unavailable".into()));
		}
		Ok(())
	}
}

#[async_trait]
impl LocalNotifier for RecordingNotifier {
	async fn set_presentation(&self, options: PresentationOptions) -> HbResult<()> {
		self.check()?;
		*self.presentation.lock() = Some(options);
		Ok(())
	}

	async fn schedule_notification(
		&self,
		content: LocalNotificationContent,
		trigger: Option<Duration>,
	) -> HbResult<Box<str>> {
		self.check()?;
		let mut scheduled = self.scheduled.lock();
		scheduled.push((content, trigger));
		Ok(format!("local-{}", scheduled.len()).into())
	}
}

// vim: ts=4
