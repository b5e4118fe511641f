//! The merge policy: how an incoming profile lands in the shared list.
//!
//! Pure over `(list, incoming, intent)`. Persistence and change
//! notification belong to the [`Roster`](crate::roster::Roster) driver.

use crate::{
  dedupe::dedupe,
  identity::{name_key, strong_key},
  member::Member,
};

// ─── Intent ──────────────────────────────────────────────────────────────────

/// The caller's declared merge policy for one reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
  /// Update an existing row; never insert. An explicit target row id takes
  /// precedence over key-based matching.
  UpdateOnly { target_id: Option<String> },
  /// Insert unconditionally, after purging rows the new one supersedes.
  ForceInsert,
  /// Update a matching row when one exists, insert otherwise.
  MergeOrInsert,
}

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// What a reconciliation decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  /// The list was rebuilt: persist it and notify observers.
  Changed(Vec<Member>),
  /// Nothing to do: do not write, do not notify.
  Unchanged,
}

impl Outcome {
  pub fn is_changed(&self) -> bool { matches!(self, Self::Changed(_)) }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Apply `incoming` to `list` under `intent`.
///
/// Every intent first re-runs the dedupe pass over the stored list, so any
/// earlier corruption heals as a side effect of the next write. An incoming
/// row that fails the identity guard is a silent no-op, as is an
/// update-only call that finds no target.
pub fn reconcile(list: Vec<Member>, incoming: Member, intent: &Intent) -> Outcome {
  if !incoming.has_identity() {
    return Outcome::Unchanged;
  }

  let list = dedupe(list);

  match intent {
    Intent::UpdateOnly { target_id } => {
      update_only(list, incoming, target_id.as_deref())
    }
    Intent::ForceInsert => force_insert(list, incoming),
    Intent::MergeOrInsert => merge_or_insert(list, incoming),
  }
}

/// Key-based lookup shared by update-only and merge-or-insert: strong key
/// when the incoming row has an id value, name match otherwise.
fn find_match(list: &[Member], incoming: &Member) -> Option<usize> {
  match strong_key(incoming) {
    Some(key) => list
      .iter()
      .position(|m| strong_key(m).as_deref() == Some(key.as_str())),
    None => {
      let key = name_key(incoming);
      list.iter().position(|m| name_key(m) == key)
    }
  }
}

fn update_only(
  mut list: Vec<Member>,
  incoming: Member,
  target_id: Option<&str>,
) -> Outcome {
  let idx = target_id
    .and_then(|id| list.iter().position(|m| m.id == id))
    .or_else(|| find_match(&list, &incoming));

  let Some(idx) = idx else {
    return Outcome::Unchanged;
  };

  let keep_id = std::mem::take(&mut list[idx].id);
  list[idx] = Member { id: keep_id, ..incoming };
  Outcome::Changed(dedupe(list))
}

fn force_insert(mut list: Vec<Member>, incoming: Member) -> Outcome {
  if let Some(key) = strong_key(&incoming) {
    let name = name_key(&incoming);
    list.retain(|m| {
      if strong_key(m).as_deref() == Some(key.as_str()) {
        return false;
      }
      // a draft row for the same person is superseded regardless of id type
      !(strong_key(m).is_none() && name_key(m) == name)
    });
  }

  list.insert(0, incoming);
  Outcome::Changed(dedupe(list))
}

fn merge_or_insert(mut list: Vec<Member>, incoming: Member) -> Outcome {
  match find_match(&list, &incoming) {
    Some(idx) => merge_into(&mut list[idx], incoming),
    None => list.insert(0, incoming),
  }
  Outcome::Changed(dedupe(list))
}

/// Overwrite `existing` with the non-empty fields of `incoming`, keeping
/// the existing row id. The id type always carries a value, so it is
/// always taken from the incoming row.
fn merge_into(existing: &mut Member, incoming: Member) {
  fn put(slot: &mut String, value: String) {
    if !value.is_empty() {
      *slot = value;
    }
  }

  existing.id_type = incoming.id_type;
  put(&mut existing.name, incoming.name);
  put(&mut existing.surname, incoming.surname);
  put(&mut existing.nationality, incoming.nationality);
  put(&mut existing.id_value, incoming.id_value);
  put(&mut existing.age, incoming.age);
  put(&mut existing.represents, incoming.represents);
  put(&mut existing.division, incoming.division);
  put(&mut existing.status, incoming.status);
  put(&mut existing.expires, incoming.expires);
}

// ─── Tests ───────────────────────────────────────────────────────────────────
