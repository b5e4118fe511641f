//! Profile — raw, caller-supplied form state.
//!
//! Transient by contract: a profile is persisted only under the draft key
//! and always passes through the projector before touching the list.

use serde::{Deserialize, Serialize};

use crate::{
  Result,
  member::{IdType, Member},
};

/// The raw form payload. `id_type` is an unvalidated string here; the
/// projector normalizes it. `min` and `cin` hold the two identifier slots
/// the form maintains, with `id_value` as a legacy fallback for either.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
  pub name:        String,
  pub surname:     String,
  pub nationality: String,
  pub id_type:     String,
  pub min:         String,
  pub cin:         String,
  pub id_value:    String,
  pub age:         String,
  pub represents:  String,
  pub division:    String,
  pub status:      String,
  pub expires:     String,
}

impl Profile {
  /// Rebuild form state from a persisted row, splitting the resolved id
  /// value back into the min/cin slot selected by the row's id type.
  /// This is how a table edit routes a row back into the form.
  pub fn from_member(m: &Member) -> Self {
    Self {
      name: m.name.clone(),
      surname: m.surname.clone(),
      nationality: m.nationality.clone(),
      id_type: m.id_type.as_str().to_owned(),
      min: match m.id_type {
        IdType::Min => m.id_value.clone(),
        IdType::Cin => String::new(),
      },
      cin: match m.id_type {
        IdType::Cin => m.id_value.clone(),
        IdType::Min => String::new(),
      },
      id_value: String::new(),
      age: m.age.clone(),
      represents: m.represents.clone(),
      division: m.division.clone(),
      status: m.status.clone(),
      expires: m.expires.clone(),
    }
  }

  /// Serialize for the draft key.
  pub fn to_json(&self) -> Result<String> {
    Ok(serde_json::to_string(self)?)
  }

  /// Parse the draft key. Strict: the store backend maps corruption to
  /// "no draft".
  pub fn from_json(raw: &str) -> Result<Self> {
    Ok(serde_json::from_str(raw)?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn from_member_splits_id_value_by_type() {
    let m = Member {
      id: "row-1".into(),
      name: "Juan".into(),
      surname: "Santos".into(),
      id_type: IdType::Cin,
      id_value: "MC-0002".into(),
      ..Member::default()
    };

    let p = Profile::from_member(&m);
    assert_eq!(p.cin, "MC-0002");
    assert_eq!(p.min, "");
    assert_eq!(p.id_type, "CIN");
  }

  #[test]
  fn draft_json_roundtrip() {
    let p = Profile {
      name: "Ana".into(),
      surname: "Dela Cruz".into(),
      id_type: "MIN".into(),
      min: "MC-0001".into(),
      ..Profile::default()
    };

    let raw = p.to_json().unwrap();
    assert!(raw.contains("\"idType\":\"MIN\""));
    assert_eq!(Profile::from_json(&raw).unwrap(), p);
  }

  #[test]
  fn missing_fields_default_to_empty() {
    let p = Profile::from_json(r#"{"name":"Ana"}"#).unwrap();
    assert_eq!(p.name, "Ana");
    assert_eq!(p.surname, "");
    assert_eq!(p.id_type, "");
  }
}
