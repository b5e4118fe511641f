//! [`SqliteStore`] — the SQLite implementation of [`RosterStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use roster_core::{
  member::{self, Member},
  profile::Profile,
  store::RosterStore,
};

use crate::{Error, Result, schema::SCHEMA};

// ─── Storage keys ────────────────────────────────────────────────────────────

/// The shared member list: a JSON array of rows, newest first.
pub(crate) const MEMBERS_KEY: &str = "members_v1";
/// Change-notification token; observers only compare values for inequality.
pub(crate) const REFRESH_KEY: &str = "members_refresh";
/// Last form state, one JSON profile object.
pub(crate) const DRAFT_KEY: &str = "member_draft_v1";
/// Row id targeted by a pending edit.
pub(crate) const EDIT_ROW_KEY: &str = "member_edit_row";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A roster store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Read one slot. `None` when the key was never written.
  pub(crate) async fn get(&self, key: &'static str) -> Result<Option<String>> {
    let value: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT value FROM kv WHERE key = ?1",
              rusqlite::params![key],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(value)
  }

  /// Write one slot, replacing any previous value.
  pub(crate) async fn put(&self, key: &'static str, value: String) -> Result<()> {
    let updated_at = Utc::now().to_rfc3339();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
           ON CONFLICT(key) DO UPDATE
             SET value = excluded.value, updated_at = excluded.updated_at",
          rusqlite::params![key, value, updated_at],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub(crate) async fn delete(&self, key: &'static str) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM kv WHERE key = ?1", rusqlite::params![key])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── RosterStore impl ────────────────────────────────────────────────────────

impl RosterStore for SqliteStore {
  type Error = Error;

  async fn read_members(&self) -> Result<Vec<Member>> {
    let Some(raw) = self.get(MEMBERS_KEY).await? else {
      return Ok(Vec::new());
    };

    match member::list_from_json(&raw) {
      Ok(list) => Ok(list),
      Err(err) => {
        // Self-heal: a corrupt list reads as empty and is replaced
        // wholesale by the next write.
        tracing::warn!(%err, "stored member list is corrupt; treating as empty");
        Ok(Vec::new())
      }
    }
  }

  async fn write_members(&self, members: &[Member]) -> Result<()> {
    let raw = member::list_to_json(members)?;
    self.put(MEMBERS_KEY, raw).await
  }

  async fn read_refresh_token(&self) -> Result<Option<String>> {
    self.get(REFRESH_KEY).await
  }

  async fn write_refresh_token(&self, token: &str) -> Result<()> {
    self.put(REFRESH_KEY, token.to_owned()).await
  }

  async fn read_draft(&self) -> Result<Option<Profile>> {
    let Some(raw) = self.get(DRAFT_KEY).await? else {
      return Ok(None);
    };

    match Profile::from_json(&raw) {
      Ok(profile) => Ok(Some(profile)),
      Err(err) => {
        tracing::warn!(%err, "stored draft is corrupt; treating as absent");
        Ok(None)
      }
    }
  }

  async fn write_draft(&self, profile: &Profile) -> Result<()> {
    let raw = profile.to_json()?;
    self.put(DRAFT_KEY, raw).await
  }

  async fn read_edit_marker(&self) -> Result<Option<String>> {
    self.get(EDIT_ROW_KEY).await
  }

  async fn write_edit_marker(&self, row_id: &str) -> Result<()> {
    self.put(EDIT_ROW_KEY, row_id.to_owned()).await
  }

  async fn clear_edit_marker(&self) -> Result<()> {
    self.delete(EDIT_ROW_KEY).await
  }
}
