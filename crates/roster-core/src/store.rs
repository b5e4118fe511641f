//! The `RosterStore` trait — the persisted key space behind the engine.
//!
//! The trait is implemented by storage backends (e.g.
//! `roster-store-sqlite`). The driver and view layers depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::{member::Member, profile::Profile};

/// Abstraction over the four persisted slots the engine operates on: the
/// shared member list, its change-notification token, the single profile
/// draft, and the edit-mode marker.
///
/// Reads are lenient by contract: a corrupted stored value reads as absent
/// (empty list / no draft), never as an error — the next successful write
/// replaces it wholesale. Only genuine I/O failures surface as errors.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes.
pub trait RosterStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Member list ───────────────────────────────────────────────────────

  /// The stored list, newest first. Absent or corrupt storage reads as an
  /// empty list.
  fn read_members(
    &self,
  ) -> impl Future<Output = Result<Vec<Member>, Self::Error>> + Send + '_;

  /// Replace the stored list.
  fn write_members<'a>(
    &'a self,
    members: &'a [Member],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Change notification ───────────────────────────────────────────────

  /// The current change token, if any mutation ever happened. Observers
  /// treat any change of value as "list may have changed", never as a
  /// semantic diff.
  fn read_refresh_token(
    &self,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + '_;

  /// Publish a new change token.
  fn write_refresh_token<'a>(
    &'a self,
    token: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Profile draft ─────────────────────────────────────────────────────

  /// The last saved form state, independent of the list.
  fn read_draft(
    &self,
  ) -> impl Future<Output = Result<Option<Profile>, Self::Error>> + Send + '_;

  fn write_draft<'a>(
    &'a self,
    profile: &'a Profile,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Edit-mode marker ──────────────────────────────────────────────────

  /// The row id a pending edit targets, when editing is in progress.
  fn read_edit_marker(
    &self,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + '_;

  /// Arm the marker: the next draft save routes through update-only
  /// against this row.
  fn write_edit_marker<'a>(
    &'a self,
    row_id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  fn clear_edit_marker(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
