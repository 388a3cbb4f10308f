//! Notification permission negotiation
//!
//! The provider reports a platform-specific authorization status. Which
//! statuses count as "enabled" depends on the platform's permission model:
//! iOS can grant provisional (quiet) delivery, Android cannot. The policy is
//! chosen once at startup from the configured platform.

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use homebase_types::push_adapter::{AuthorizationStatus, PushProvider};

use crate::prelude::*;
use crate::provider_call;

pub trait PermissionPolicy: Debug + Send + Sync {
	fn platform(&self) -> Platform;

	/// Whether the status lets the app deliver notifications
	fn is_enabled(&self, status: AuthorizationStatus) -> bool;
}

/// Authorized and provisional authorization both enable delivery
#[derive(Debug, Clone, Copy, Default)]
pub struct IosPermissionPolicy;

impl PermissionPolicy for IosPermissionPolicy {
	fn platform(&self) -> Platform {
		Platform::Ios
	}

	fn is_enabled(&self, status: AuthorizationStatus) -> bool {
		matches!(status, AuthorizationStatus::Authorized | AuthorizationStatus::Provisional)
	}
}

/// Only an explicit grant enables delivery
#[derive(Debug, Clone, Copy, Default)]
pub struct AndroidPermissionPolicy;

impl PermissionPolicy for AndroidPermissionPolicy {
	fn platform(&self) -> Platform {
		Platform::Android
	}

	fn is_enabled(&self, status: AuthorizationStatus) -> bool {
		status == AuthorizationStatus::Authorized
	}
}

pub fn policy_for(platform: Platform) -> Arc<dyn PermissionPolicy> {
	match platform {
		Platform::Ios => Arc::new(IosPermissionPolicy),
		Platform::Android => Arc::new(AndroidPermissionPolicy),
	}
}

#[derive(Debug, Clone)]
pub struct PermissionNegotiator {
	provider: Arc<dyn PushProvider>,
	policy: Arc<dyn PermissionPolicy>,
	timeout: Duration,
}

impl PermissionNegotiator {
	pub fn new(
		provider: Arc<dyn PushProvider>,
		policy: Arc<dyn PermissionPolicy>,
		timeout: Duration,
	) -> Self {
		Self { provider, policy, timeout }
	}

	pub fn from_app(app: &App) -> Self {
		Self::new(
			app.push_provider.clone(),
			policy_for(app.opts.platform),
			app.opts.provider_timeout(),
		)
	}

	pub fn policy(&self) -> &dyn PermissionPolicy {
		self.policy.as_ref()
	}

	/// Asks the user for notification authorization
	pub async fn request_permission(&self) -> HbResult<AuthorizationStatus> {
		provider_call(self.timeout, "request_permission", self.provider.request_permission()).await
	}

	/// Asks for authorization and collapses the result through the platform policy
	pub async fn request_enabled(&self) -> HbResult<bool> {
		let status = self.request_permission().await?;
		let enabled = self.policy.is_enabled(status);
		info!(
			platform = %self.policy.platform(),
			status = ?status,
			enabled,
			"Notification authorization"
		);
		Ok(enabled)
	}
}


// vim: ts=4
