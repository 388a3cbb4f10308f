use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use homebase_types::error::{Error, HbResult};
use homebase_types::push_adapter::{
	AuthorizationStatus, MessageHandler, PushProvider, RemoteMessage, Subscription,
};

pub const FOREGROUND: &str = "foreground";
pub const BACKGROUND: &str = "background";
pub const OPENED: &str = "opened";

struct ProviderState {
	permission: Result<AuthorizationStatus, String>,
	token: Result<Option<Box<str>>, String>,
	initial: Option<RemoteMessage>,
	handlers: HashMap<&'static str, (u64, MessageHandler)>,
	registrations: HashMap<&'static str, usize>,
	next_id: u64,
}

/// Push provider that delivers messages on demand
pub struct FakePushProvider {
	state: Arc<Mutex<ProviderState>>,
	hang: AtomicBool,
	permission_requests: AtomicUsize,
	token_requests: AtomicUsize,
	initial_checks: AtomicUsize,
}

impl FakePushProvider {
	/// Grants `Authorized` and hands out `fake-token`
	pub fn new() -> Self {
		Self {
			state: Arc::new(Mutex::new(ProviderState {
				permission: Ok(AuthorizationStatus::Authorized),
				token: Ok(Some("fake-token".into())),
				initial: None,
				handlers: HashMap::new(),
				registrations: HashMap::new(),
				next_id: 0,
			})),
			hang: AtomicBool::new(false),
			permission_requests: AtomicUsize::new(0),
			token_requests: AtomicUsize::new(0),
			initial_checks: AtomicUsize::new(0),
		}
	}

	pub fn with_permission(self, status: AuthorizationStatus) -> Self {
		self.set_permission(status);
		self
	}

	pub fn set_permission(&self, status: AuthorizationStatus) {
		self.state.lock().permission = Ok(status);
	}

	pub fn fail_permission(&self, msg: &str) {
		self.state.lock().permission = Err(msg.to_string());
	}

	pub fn set_token(&self, token: Option<&str>) {
		self.state.lock().token = Ok(token.map(Into::into));
	}

	pub fn fail_token(&self, msg: &str) {
		self.state.lock().token = Err(msg.to_string());
	}

	/// Message reported once by `get_initial_notification`
	pub fn set_initial_notification(&self, msg: RemoteMessage) {
		self.state.lock().initial = Some(msg);
	}

	/// Makes permission and token requests never complete
	pub fn hang(&self, hang: bool) {
		self.hang.store(hang, Ordering::SeqCst);
	}

	pub fn permission_requests(&self) -> usize {
		self.permission_requests.load(Ordering::SeqCst)
	}

	pub fn token_requests(&self) -> usize {
		self.token_requests.load(Ordering::SeqCst)
	}

	pub fn initial_checks(&self) -> usize {
		self.initial_checks.load(Ordering::SeqCst)
	}

	/// How many times a handler was registered on the channel
	pub fn registrations(&self, channel: &str) -> usize {
		self.state.lock().registrations.get(channel).copied().unwrap_or(0)
	}

	pub fn is_registered(&self, channel: &str) -> bool {
		self.state.lock().handlers.contains_key(channel)
	}

	/// Runs the handler registered on `channel`. Returns false if none is.
	pub async fn deliver(&self, channel: &str, msg: RemoteMessage) -> bool {
		let handler = self.state.lock().handlers.get(channel).map(|(_, h)| h.clone());
		match handler {
			Some(handler) => {
				handler(msg).await;
				true
			}
			None => false,
		}
	}

	pub async fn deliver_foreground(&self, msg: RemoteMessage) -> bool {
		self.deliver(FOREGROUND, msg).await
	}

	pub async fn deliver_background(&self, msg: RemoteMessage) -> bool {
		self.deliver(BACKGROUND, msg).await
	}

	pub async fn open_notification(&self, msg: RemoteMessage) -> bool {
		self.deliver(OPENED, msg).await
	}

	fn register(&self, channel: &'static str, handler: MessageHandler) -> Subscription {
		let id = {
			let mut state = self.state.lock();
			state.next_id += 1;
			let id = state.next_id;
			state.handlers.insert(channel, (id, handler));
			*state.registrations.entry(channel).or_insert(0) += 1;
			id
		};

		let state = Arc::clone(&self.state);
		Subscription::new(channel, move || {
			let mut state = state.lock();
			if state.handlers.get(channel).is_some_and(|(current, _)| *current == id) {
				state.handlers.remove(channel);
			}
		})
	}

	async fn maybe_hang(&self) {
		if self.hang.load(Ordering::SeqCst) {
			std::future::pending::<()>().await;
		}
	}
}

impl Default for FakePushProvider {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for FakePushProvider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.lock();
		let mut channels: Vec<&str> = state.handlers.keys().copied().collect();
		channels.sort_unstable();
		f.debug_struct("FakePushProvider")
			.field("permission", &state.permission)
			.field("token", &state.token)
			.field("registered", &channels)
			.finish()
	}
}

#[async_trait]
impl PushProvider for FakePushProvider {
	async fn request_permission(&self) -> HbResult<AuthorizationStatus> {
		self.permission_requests.fetch_add(1, Ordering::SeqCst);
		self.maybe_hang().await;
		self.state.lock().permission.clone().map_err(Error::Provider)
	}

	async fn get_token(&self) -> HbResult<Option<Box<str>>> {
		self.token_requests.fetch_add(1, Ordering::SeqCst);
		self.maybe_hang().await;
		self.state.lock().token.clone().map_err(Error::NetworkError)
	}

	fn on_message(&self, handler: MessageHandler) -> HbResult<Subscription> {
		Ok(self.register(FOREGROUND, handler))
	}

	fn set_background_message_handler(&self, handler: MessageHandler) -> HbResult<Subscription> {
		Ok(self.register(BACKGROUND, handler))
	}

	fn on_notification_opened_app(&self, handler: MessageHandler) -> HbResult<Subscription> {
		Ok(self.register(OPENED, handler))
	}

	async fn get_initial_notification(&self) -> HbResult<Option<RemoteMessage>> {
		self.initial_checks.fetch_add(1, Ordering::SeqCst);
		Ok(self.state.lock().initial.take())
	}
}

// vim: ts=4
