//! Redb-based preference adapter
//!
//! Implements the PreferenceAdapter trait on a single redb file,
//! `{data_dir}/preferences.db`, with one `&str -> &str` table. Every write is
//! its own transaction, so each key is updated atomically and independently.

use async_trait::async_trait;
use homebase::error::HbResult;
use homebase::preference_adapter::PreferenceAdapter;
use redb::{ReadableDatabase, ReadableTable, TableDefinition};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

mod error;
pub use error::Error;

/// Stores preference values: key -> value
const TABLE_PREFERENCES: TableDefinition<&str, &str> = TableDefinition::new("preferences");

pub const DB_FILE: &str = "preferences.db";

pub struct PreferenceAdapterRedb {
	path: PathBuf,
	db: redb::Database,
}

impl std::fmt::Debug for PreferenceAdapterRedb {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PreferenceAdapterRedb").field("path", &self.path).finish_non_exhaustive()
	}
}

impl PreferenceAdapterRedb {
	/// Opens (or creates) the preference database in `data_dir`
	pub async fn new(data_dir: impl AsRef<Path>) -> HbResult<Self> {
		let data_dir = data_dir.as_ref();

		tokio::fs::create_dir_all(data_dir).await.map_err(|e| {
			Error::IoError(format!("Failed to create data directory {}: {}", data_dir.display(), e))
		})?;

		let path = data_dir.join(DB_FILE);
		debug!("Opening preference database at {:?}", path);

		let db = redb::Database::create(&path)
			.map_err(|e| Error::DbError(format!("Failed to open database: {}", e)))?;

		// Create the table so read transactions always find it
		let tx = db
			.begin_write()
			.map_err(|e| Error::DbError(format!("Failed to begin write transaction: {}", e)))?;
		let _ = tx.open_table(TABLE_PREFERENCES);
		tx.commit()
			.map_err(|e| Error::DbError(format!("Failed to commit table creation: {}", e)))?;

		Ok(Self { path, db })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

#[async_trait]
impl PreferenceAdapter for PreferenceAdapterRedb {
	async fn read_preference(&self, key: &str) -> HbResult<Option<Box<str>>> {
		let tx = self
			.db
			.begin_read()
			.map_err(|e| Error::DbError(format!("Failed to begin read transaction: {}", e)))?;

		let table = tx
			.open_table(TABLE_PREFERENCES)
			.map_err(|e| Error::DbError(format!("Failed to open preferences table: {}", e)))?;

		let value = table
			.get(key)
			.map_err(|e| Error::DbError(format!("Failed to read preference: {}", e)))?
			.map(|value| Box::from(value.value()));

		trace!("Read preference {} (found={})", key, value.is_some());
		Ok(value)
	}

	async fn write_preference(&self, key: &str, value: &str) -> HbResult<()> {
		let tx = self
			.db
			.begin_write()
			.map_err(|e| Error::DbError(format!("Failed to begin write transaction: {}", e)))?;

		{
			let mut table = tx
				.open_table(TABLE_PREFERENCES)
				.map_err(|e| Error::DbError(format!("Failed to open preferences table: {}", e)))?;
			table
				.insert(key, value)
				.map_err(|e| Error::DbError(format!("Failed to insert preference: {}", e)))?;
		}

		tx.commit().map_err(|e| Error::DbError(format!("Failed to commit preference: {}", e)))?;

		trace!("Stored preference {}", key);
		Ok(())
	}
}

// vim: ts=4
