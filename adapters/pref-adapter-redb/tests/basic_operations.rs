//! Basic preference adapter operation tests

use homebase::preference_adapter::PreferenceAdapter;
use homebase_pref_adapter_redb::{DB_FILE, PreferenceAdapterRedb};
use tempfile::TempDir;

async fn create_test_adapter() -> (PreferenceAdapterRedb, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = PreferenceAdapterRedb::new(temp_dir.path()).await.expect("Failed to create adapter");
	(adapter, temp_dir)
}

#[tokio::test]
async fn test_missing_key_is_none() {
	let (adapter, _temp) = create_test_adapter().await;

	let value = adapter.read_preference("pushNotificationsEnabled").await.expect("Failed to read");

	assert_eq!(value, None);
}

#[tokio::test]
async fn test_write_and_overwrite() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter.write_preference("pushNotificationsEnabled", "true").await.expect("Failed to write");
	adapter.write_preference("pushNotificationsEnabled", "false").await.expect("Failed to write");
	adapter.write_preference("fcmToken", "tok-1").await.expect("Failed to write");

	let push = adapter.read_preference("pushNotificationsEnabled").await.expect("Failed to read");
	let token = adapter.read_preference("fcmToken").await.expect("Failed to read");
	assert_eq!(push.as_deref(), Some("false"));
	assert_eq!(token.as_deref(), Some("tok-1"));
}

#[tokio::test]
async fn test_values_survive_reopen() {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");

	{
		let adapter =
			PreferenceAdapterRedb::new(temp_dir.path()).await.expect("Failed to create adapter");
		adapter.write_preference("fcmToken", "persisted-token").await.expect("Failed to write");
		assert_eq!(adapter.path(), temp_dir.path().join(DB_FILE));
	}

	let adapter = PreferenceAdapterRedb::new(temp_dir.path()).await.expect("Failed to reopen adapter");
	let token = adapter.read_preference("fcmToken").await.expect("Failed to read");
	assert_eq!(token.as_deref(), Some("persisted-token"));
}

#[tokio::test]
async fn test_creates_missing_data_dir() {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let nested = temp_dir.path().join("app").join("data");

	let adapter = PreferenceAdapterRedb::new(&nested).await.expect("Failed to create adapter");
	adapter.write_preference("promotionalNotificationsEnabled", "false").await.expect("Failed to write");

	assert!(nested.join(DB_FILE).exists());
}

// vim: ts=4
