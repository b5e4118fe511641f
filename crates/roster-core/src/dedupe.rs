//! Deduplication pass over a member list.
//!
//! Iteration order is significant: callers keep the list newest-first, so
//! first-seen-wins here means newest-wins overall.

use std::collections::HashSet;

use crate::{
  identity::{strong_key, weak_key},
  member::Member,
};

/// Collapse a list to one row per identity. Idempotent, and
/// order-preserving for the rows it keeps.
///
/// A row with an id value claims both its strong key and its weak key, so
/// any later draft-only row for the same person is absorbed too. Draft-only
/// rows claim just their weak key. Rows with a strong key are never dropped
/// over a weak-key collision; distinct id values are distinct members.
pub fn dedupe(list: Vec<Member>) -> Vec<Member> {
  let mut seen_strong: HashSet<String> = HashSet::new();
  let mut seen_weak: HashSet<String> = HashSet::new();
  let mut out = Vec::with_capacity(list.len());

  for row in list {
    match strong_key(&row) {
      Some(key) => {
        if !seen_strong.insert(key) {
          continue;
        }
        seen_weak.insert(weak_key(&row));
        out.push(row);
      }
      None => {
        if !seen_weak.insert(weak_key(&row)) {
          continue;
        }
        out.push(row);
      }
    }
  }

  out
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use crate::member::IdType;

  fn strong(name: &str, surname: &str, id_value: &str) -> Member {
    Member {
      id: format!("row-{id_value}"),
      name: name.into(),
      surname: surname.into(),
      id_type: IdType::Min,
      id_value: id_value.into(),
      ..Member::default()
    }
  }

  fn draft(name: &str, surname: &str) -> Member {
    Member {
      id: format!("draft-{name}"),
      name: name.into(),
      surname: surname.into(),
      id_type: IdType::Min,
      ..Member::default()
    }
  }

  #[test]
  fn equal_strong_keys_keep_first_seen() {
    let newest = strong("Ana", "Dela Cruz", "MC-0001");
    let stale = Member { status: "Inactive".into(), ..newest.clone() };

    let out = dedupe(vec![newest.clone(), stale]);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0], newest);
  }

  #[test]
  fn strong_key_comparison_is_case_insensitive() {
    let a = strong("Ana", "Dela Cruz", "mc-0001");
    let b = strong("Ana", "Dela Cruz", "MC-0001");
    assert_eq!(dedupe(vec![a, b]).len(), 1);
  }

  #[test]
  fn weak_duplicates_collapse() {
    let out = dedupe(vec![draft("Ana", "Dela Cruz"), draft("ana", "dela cruz")]);
    assert_eq!(out.len(), 1);
  }

  #[test]
  fn strong_row_absorbs_later_weak_draft() {
    let out = dedupe(vec![strong("Ana", "Dela Cruz", "MC-0001"), draft("Ana", "Dela Cruz")]);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id_value, "MC-0001");
  }

  #[test]
  fn earlier_weak_draft_survives_next_to_a_strong_row() {
    // A draft seen before the strong row is kept: strong rows are exempt
    // from weak-key collisions, and the draft came first in iteration
    // order. The insert flows purge this pairing before it can persist.
    let out = dedupe(vec![draft("Ana", "Dela Cruz"), strong("Ana", "Dela Cruz", "MC-0001")]);
    assert_eq!(out.len(), 2);
  }

  #[test]
  fn distinct_id_values_for_the_same_person_both_survive() {
    let out = dedupe(vec![
      strong("Ana", "Dela Cruz", "MC-0001"),
      strong("Ana", "Dela Cruz", "MC-0002"),
    ]);
    assert_eq!(out.len(), 2);
  }

  #[test]
  fn idempotent() {
    let list = vec![
      strong("Ana", "Dela Cruz", "MC-0001"),
      draft("Ana", "Dela Cruz"),
      strong("Juan", "Santos", "MC-0002"),
      draft("Juan", "Santos"),
      draft("juan", "santos"),
    ];

    let once = dedupe(list);
    let twice = dedupe(once.clone());
    assert_eq!(once, twice);
  }
}
