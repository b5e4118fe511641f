//! Member — the canonical row shape persisted in the shared list.
//!
//! A member row is produced by the projector and only ever enters the list
//! through the reconciliation engine. The serialized form of this struct is
//! the exact object layout stored under the list key.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Result;

// ─── IdType ──────────────────────────────────────────────────────────────────

/// The kind of identifier a member is registered under.
///
/// `MIN` is the member id number, `CIN` the card id number. Deserialization
/// routes any unrecognized value to `MIN`, matching the projector's
/// default-safe fallback.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE", from = "String")]
pub enum IdType {
  #[default]
  Min,
  Cin,
}

impl IdType {
  /// Uppercase-trim the raw value; anything that is not exactly `CIN`
  /// resolves to `MIN`.
  pub fn parse(raw: &str) -> Self {
    if raw.trim().eq_ignore_ascii_case("CIN") {
      Self::Cin
    } else {
      Self::Min
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Min => "MIN",
      Self::Cin => "CIN",
    }
  }
}

impl From<String> for IdType {
  fn from(raw: String) -> Self { Self::parse(&raw) }
}

impl fmt::Display for IdType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Member ──────────────────────────────────────────────────────────────────

/// One persisted member record in canonical shape.
///
/// `id` is an opaque row identifier, stable once assigned; update-only
/// operations use it as the primary handle. `id_value` is the single
/// resolved identifier selected by `id_type`. Every field defaults so that
/// legacy rows missing keys still deserialize.
#[derive(
  Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase", default)]
pub struct Member {
  pub id:          String,
  pub name:        String,
  pub surname:     String,
  pub nationality: String,
  pub id_type:     IdType,
  pub id_value:    String,
  pub age:         String,
  pub represents:  String,
  pub division:    String,
  pub status:      String,
  pub expires:     String,
}

impl Member {
  /// A row with neither an id value nor both name and surname cannot be
  /// located by any identity key and must never enter the list.
  pub fn has_identity(&self) -> bool {
    !self.id_value.trim().is_empty()
      || (!self.name.trim().is_empty() && !self.surname.trim().is_empty())
  }

  /// Display name for profile views.
  pub fn full_name(&self) -> String {
    let joined = format!("{} {}", self.name.trim(), self.surname.trim());
    joined.trim().to_owned()
  }
}

// ─── List codec ──────────────────────────────────────────────────────────────

/// Serialize a list to the JSON array stored under the list key.
pub fn list_to_json(list: &[Member]) -> Result<String> {
  Ok(serde_json::to_string(list)?)
}

/// Parse the JSON array stored under the list key. Strict: the store
/// backend decides how to treat corruption (it self-heals to empty).
pub fn list_from_json(raw: &str) -> Result<Vec<Member>> {
  Ok(serde_json::from_str(raw)?)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn id_type_parse_defaults_to_min() {
    assert_eq!(IdType::parse("CIN"), IdType::Cin);
    assert_eq!(IdType::parse(" cin "), IdType::Cin);
    assert_eq!(IdType::parse("MIN"), IdType::Min);
    assert_eq!(IdType::parse("passport"), IdType::Min);
    assert_eq!(IdType::parse(""), IdType::Min);
  }

  #[test]
  fn member_roundtrips_camel_case_wire_shape() {
    let member = Member {
      id: "min-mc-0001-a1b2c3d4".into(),
      name: "Ana".into(),
      surname: "Dela Cruz".into(),
      id_type: IdType::Min,
      id_value: "MC-0001".into(),
      expires: "2030-12-31".into(),
      ..Member::default()
    };

    let json = serde_json::to_value(&member).unwrap();
    assert_eq!(json["idType"], "MIN");
    assert_eq!(json["idValue"], "MC-0001");

    let back: Member = serde_json::from_value(json).unwrap();
    assert_eq!(back, member);
  }

  #[test]
  fn legacy_rows_without_id_still_deserialize() {
    let raw = r#"[{"idType":"CIN","idValue":"MC-0002","name":"Juan","surname":"Santos"}]"#;
    let list = list_from_json(raw).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, "");
    assert_eq!(list[0].id_type, IdType::Cin);
  }

  #[test]
  fn unknown_id_type_on_the_wire_reads_as_min() {
    let raw = r#"[{"idType":"XYZ","idValue":"1","name":"A","surname":"B"}]"#;
    let list = list_from_json(raw).unwrap();
    assert_eq!(list[0].id_type, IdType::Min);
  }

  #[test]
  fn identity_guard() {
    let mut m = Member::default();
    assert!(!m.has_identity());

    m.name = "Ana".into();
    assert!(!m.has_identity());

    m.surname = "Dela Cruz".into();
    assert!(m.has_identity());

    let by_id = Member { id_value: "MC-0001".into(), ..Member::default() };
    assert!(by_id.has_identity());
  }
}
