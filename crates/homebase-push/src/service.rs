//! Notification service initialization
//!
//! Composes the pipeline in order: presentation policy, push preference,
//! permission, delivery token, handler registration, cold-start check.
//! Initialization runs at most once until [`NotificationService::shutdown`]
//! re-arms it. A shutdown that lands while initialization is still waiting on
//! the provider cancels it before any handler is registered.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use homebase_core::preferences::PreferenceService;
use parking_lot::Mutex;
use homebase_types::notify_adapter::{LocalNotifier, PresentationOptions};

use crate::channel::MessageChannels;
use crate::permission::PermissionNegotiator;
use crate::prelude::*;
use crate::provider_call;
use crate::settings::PUSH_ENABLED_KEY;
use crate::token::TokenManager;

/// What a completed initialization found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
	pub push_enabled: bool,
	pub permission_granted: bool,
	pub token: Option<Box<str>>,
	/// Route opened from the cold-start notification
	pub initial_route: Option<Box<str>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
	Initialized(InitReport),
	AlreadyInitialized,
	/// `shutdown` ran before handlers were registered
	Cancelled,
}

#[derive(Debug)]
pub struct NotificationService {
	negotiator: PermissionNegotiator,
	tokens: TokenManager,
	channels: MessageChannels,
	notifier: Arc<dyn LocalNotifier>,
	preferences: Arc<PreferenceService>,
	timeout: Duration,
	initialized: AtomicBool,
	/// Shutdown count, checked before registering handlers
	epoch: Mutex<u64>,
}

impl NotificationService {
	pub fn new(
		negotiator: PermissionNegotiator,
		tokens: TokenManager,
		channels: MessageChannels,
		notifier: Arc<dyn LocalNotifier>,
		preferences: Arc<PreferenceService>,
		timeout: Duration,
	) -> Self {
		Self {
			negotiator,
			tokens,
			channels,
			notifier,
			preferences,
			timeout,
			initialized: AtomicBool::new(false),
			epoch: Mutex::new(0),
		}
	}

	pub fn from_app(app: &App) -> Self {
		Self::new(
			PermissionNegotiator::from_app(app),
			TokenManager::from_app(app),
			MessageChannels::from_app(app),
			app.local_notifier.clone(),
			app.preferences.clone(),
			app.opts.provider_timeout(),
		)
	}

	pub fn tokens(&self) -> &TokenManager {
		&self.tokens
	}

	pub fn is_initialized(&self) -> bool {
		self.initialized.load(Ordering::Acquire)
	}

	/// Sets up the notification pipeline.
	///
	/// Permission and token problems are logged and reported, not returned as
	/// errors. Only a failed handler registration fails, in which case the
	/// service can be initialized again.
	pub async fn initialize(&self) -> HbResult<InitOutcome> {
		let epoch = {
			let epoch = self.epoch.lock();
			if self
				.initialized
				.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
				.is_err()
			{
				debug!("Notification service already initialized");
				return Ok(InitOutcome::AlreadyInitialized);
			}
			*epoch
		};

		match self.run_initialize(epoch).await {
			Ok(Some(report)) => Ok(InitOutcome::Initialized(report)),
			Ok(None) => Ok(InitOutcome::Cancelled),
			Err(e) => {
				// A shutdown in between already re-armed the guard
				if *self.epoch.lock() == epoch {
					self.initialized.store(false, Ordering::Release);
				}
				Err(e)
			}
		}
	}

	/// Detaches all handlers and allows initializing again. An initialization
	/// still in progress is cancelled.
	pub fn shutdown(&self) {
		let mut epoch = self.epoch.lock();
		*epoch += 1;
		let removed = self.channels.unregister();
		self.initialized.store(false, Ordering::Release);
		info!(removed, "Notification service shut down");
	}

	async fn run_initialize(&self, epoch: u64) -> HbResult<Option<InitReport>> {
		if let Err(e) = provider_call(
			self.timeout,
			"set_presentation",
			self.notifier.set_presentation(PresentationOptions::default()),
		)
		.await
		{
			warn!(error = %e, "Failed to install notification presentation policy");
		}

		let push_enabled = match self.preferences.get_bool(PUSH_ENABLED_KEY).await {
			Ok(enabled) => enabled,
			Err(e) => {
				warn!(error = %e, "Failed to read push preference, assuming enabled");
				true
			}
		};

		let permission_granted = if push_enabled {
			match self.negotiator.request_enabled().await {
				Ok(granted) => granted,
				Err(e) => {
					warn!(error = %e, "Notification permission request failed");
					false
				}
			}
		} else {
			info!("Push notifications disabled by user, not requesting permission");
			false
		};

		let token = if permission_granted { self.tokens.get_token().await } else { None };

		{
			let current = self.epoch.lock();
			if *current != epoch {
				info!("Notification service shut down during initialization");
				return Ok(None);
			}
			self.channels.register()?;
		}
		let initial_route = self.channels.handle_initial_notification().await;

		info!(
			push_enabled,
			permission_granted,
			has_token = token.is_some(),
			"Notification service initialized"
		);
		Ok(Some(InitReport { push_enabled, permission_granted, token, initial_route }))
	}
}


// vim: ts=4
