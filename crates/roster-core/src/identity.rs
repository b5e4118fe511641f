//! Identity keys derived from a member row.
//!
//! A strong key is authoritative whenever an id value exists; the weak key
//! is the name-based fallback for drafts saved before an identifier is
//! known. Keys are derived on demand and never stored.

use crate::member::Member;

/// `IDTYPE|idvalue`, lowercased id value. `None` when the row has no id
/// value.
pub fn strong_key(m: &Member) -> Option<String> {
  let value = m.id_value.trim();
  if value.is_empty() {
    return None;
  }
  Some(format!("{}|{}", m.id_type.as_str(), value.to_lowercase()))
}

/// `name|surname|IDTYPE`, lowercased names. Always defined.
pub fn weak_key(m: &Member) -> String {
  format!(
    "{}|{}|{}",
    m.name.trim().to_lowercase(),
    m.surname.trim().to_lowercase(),
    m.id_type.as_str(),
  )
}

/// `name|surname` with the id type left out. Stale-draft purging and the
/// update-only name fallback match on this so a person is found across id
/// types.
pub fn name_key(m: &Member) -> String {
  format!(
    "{}|{}",
    m.name.trim().to_lowercase(),
    m.surname.trim().to_lowercase(),
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::member::IdType;

  fn row(name: &str, surname: &str, id_type: IdType, id_value: &str) -> Member {
    Member {
      name: name.into(),
      surname: surname.into(),
      id_type,
      id_value: id_value.into(),
      ..Member::default()
    }
  }

  #[test]
  fn strong_key_requires_id_value() {
    assert_eq!(strong_key(&row("Ana", "Dela Cruz", IdType::Min, "")), None);
    assert_eq!(strong_key(&row("Ana", "Dela Cruz", IdType::Min, "  ")), None);
    assert_eq!(
      strong_key(&row("Ana", "Dela Cruz", IdType::Min, " MC-0001 ")),
      Some("MIN|mc-0001".to_owned()),
    );
  }

  #[test]
  fn weak_key_folds_case_and_whitespace() {
    let a = row(" Ana ", "DELA CRUZ", IdType::Min, "");
    let b = row("ana", "dela cruz", IdType::Min, "whatever");
    assert_eq!(weak_key(&a), weak_key(&b));
    assert_eq!(weak_key(&a), "ana|dela cruz|MIN");
  }

  #[test]
  fn weak_key_distinguishes_id_type_but_name_key_does_not() {
    let min = row("Ana", "Dela Cruz", IdType::Min, "");
    let cin = row("Ana", "Dela Cruz", IdType::Cin, "");
    assert_ne!(weak_key(&min), weak_key(&cin));
    assert_eq!(name_key(&min), name_key(&cin));
  }
}
