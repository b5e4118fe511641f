//! `Roster` — the driver that owns read → project → reconcile → persist →
//! notify against a [`RosterStore`] backend.
//!
//! Every mutation is one run-to-completion read-modify-write over the
//! current list snapshot. Two concurrent writers race and the last write
//! wins; the change token is how other contexts learn to re-read.

use chrono::Utc;

use crate::{
  member::Member,
  profile::Profile,
  project::project,
  reconcile::{Intent, Outcome, reconcile},
  store::RosterStore,
};

/// High-level membership operations over a storage backend. Holds no state
/// of its own; cloning is as cheap as cloning the backend.
#[derive(Clone)]
pub struct Roster<S> {
  store: S,
}

impl<S: RosterStore> Roster<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub fn store(&self) -> &S { &self.store }

  /// The stored list, newest first.
  pub async fn members(&self) -> Result<Vec<Member>, S::Error> {
    self.store.read_members().await
  }

  /// The last saved form state.
  pub async fn draft(&self) -> Result<Option<Profile>, S::Error> {
    self.store.read_draft().await
  }

  /// Run one reconciliation and persist the result.
  ///
  /// Returns `true` when the list was written and observers notified,
  /// `false` on the silent no-op paths (identity guard, no update target).
  pub async fn apply(
    &self,
    profile: &Profile,
    intent: &Intent,
  ) -> Result<bool, S::Error> {
    let incoming = project(profile);
    let list = self.store.read_members().await?;

    match reconcile(list, incoming, intent) {
      Outcome::Changed(next) => {
        self.commit(&next).await?;
        Ok(true)
      }
      Outcome::Unchanged => Ok(false),
    }
  }

  /// Save the form draft. When an edit is pending, the marker is consumed
  /// and the targeted row updated in place; otherwise this is draft-only
  /// and the list stays untouched.
  pub async fn save_profile(&self, profile: &Profile) -> Result<bool, S::Error> {
    self.store.write_draft(profile).await?;

    let Some(target) = self.store.read_edit_marker().await? else {
      return Ok(false);
    };
    self.store.clear_edit_marker().await?;

    self
      .apply(profile, &Intent::UpdateOnly { target_id: Some(target) })
      .await
  }

  /// Add a member from the form, superseding any stale rows for the same
  /// identity. The draft is kept as the last form state.
  pub async fn add_member(&self, profile: &Profile) -> Result<bool, S::Error> {
    self.store.write_draft(profile).await?;
    self.apply(profile, &Intent::ForceInsert).await
  }

  /// Route a row back into the form: write its profile as the draft and
  /// arm the edit marker so the next save updates it in place. Returns
  /// `false` when the row does not exist.
  pub async fn begin_edit(&self, row_id: &str) -> Result<bool, S::Error> {
    let list = self.store.read_members().await?;
    let Some(row) = list.iter().find(|m| m.id == row_id) else {
      return Ok(false);
    };

    self.store.write_draft(&Profile::from_member(row)).await?;
    self.store.write_edit_marker(row_id).await?;
    Ok(true)
  }

  /// Delete a row by id. Returns `false` when no such row exists.
  pub async fn remove(&self, row_id: &str) -> Result<bool, S::Error> {
    let mut list = self.store.read_members().await?;
    let before = list.len();
    list.retain(|m| m.id != row_id);

    if list.len() == before {
      return Ok(false);
    }
    self.commit(&list).await?;
    Ok(true)
  }

  /// Persist a list and publish a fresh change token.
  async fn commit(&self, list: &[Member]) -> Result<(), S::Error> {
    self.store.write_members(list).await?;
    let token = Utc::now().timestamp_millis().to_string();
    self.store.write_refresh_token(&token).await
  }
}
