//! Profile projector: raw form input → canonical row.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  member::{IdType, Member},
  profile::Profile,
};

/// Longest seed slug kept in a generated row id.
const ID_SEED_CAP: usize = 24;

/// Date formats `expires` is normalized from; anything else passes through.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Project raw form state into a canonical row with a fresh row id.
///
/// The id value is resolved from the slot selected by the id type (`cin`
/// for CIN, `min` for MIN), falling back to the legacy `id_value` field.
/// All string fields are trimmed; `expires` is date-normalized.
pub fn project(p: &Profile) -> Member {
  let id_type = IdType::parse(&p.id_type);

  let id_value = match id_type {
    IdType::Cin => non_empty(&p.cin).unwrap_or(p.id_value.trim()),
    IdType::Min => non_empty(&p.min).unwrap_or(p.id_value.trim()),
  }
  .to_owned();

  let seed_tail = if id_value.is_empty() { p.name.trim() } else { id_value.as_str() };
  let seed = format!("{}-{}", id_type.as_str(), seed_tail);

  Member {
    id: make_row_id(&seed),
    name: p.name.trim().to_owned(),
    surname: p.surname.trim().to_owned(),
    nationality: p.nationality.trim().to_owned(),
    id_type,
    id_value,
    age: p.age.trim().to_owned(),
    represents: p.represents.trim().to_owned(),
    division: p.division.trim().to_owned(),
    status: p.status.trim().to_owned(),
    expires: normalize_date(&p.expires),
  }
}

/// Normalize to `YYYY-MM-DD` when the input parses as `YYYY-MM-DD` or
/// `M/D/YYYY`; any other shape passes through unchanged (lenient,
/// best-effort).
pub fn normalize_date(raw: &str) -> String {
  let value = raw.trim();
  if value.is_empty() {
    return String::new();
  }
  for fmt in DATE_FORMATS {
    if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
      return date.format("%Y-%m-%d").to_string();
    }
  }
  value.to_owned()
}

/// Generate a row id from a seed: lowercased, whitespace collapsed to
/// hyphens, capped at [`ID_SEED_CAP`] chars, plus a random discriminator.
/// Collisions only need to be improbable within one list, not impossible.
pub fn make_row_id(seed: &str) -> String {
  let slug = seed
    .to_lowercase()
    .split_whitespace()
    .collect::<Vec<_>>()
    .join("-");
  let slug: String = if slug.is_empty() { "x".to_owned() } else { slug }
    .chars()
    .take(ID_SEED_CAP)
    .collect();

  let discriminator = Uuid::new_v4().simple().to_string();
  format!("{slug}-{}", &discriminator[..8])
}

fn non_empty(s: &str) -> Option<&str> {
  let trimmed = s.trim();
  (!trimmed.is_empty()).then_some(trimmed)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn profile() -> Profile {
    Profile {
      name: " Ana ".into(),
      surname: "Dela Cruz".into(),
      nationality: "PH".into(),
      id_type: "min".into(),
      min: " MC-0001 ".into(),
      status: "Active".into(),
      expires: "5/3/2027".into(),
      ..Profile::default()
    }
  }

  #[test]
  fn projects_trimmed_canonical_row() {
    let row = project(&profile());
    assert_eq!(row.name, "Ana");
    assert_eq!(row.id_type, IdType::Min);
    assert_eq!(row.id_value, "MC-0001");
    assert_eq!(row.expires, "2027-05-03");
    assert!(row.has_identity());
  }

  #[test]
  fn cin_prefers_cin_slot_with_id_value_fallback() {
    let mut p = profile();
    p.id_type = "CIN".into();
    p.cin = "MC-9".into();
    assert_eq!(project(&p).id_value, "MC-9");

    p.cin = String::new();
    p.id_value = "MC-10".into();
    assert_eq!(project(&p).id_value, "MC-10");
  }

  #[test]
  fn unknown_id_type_falls_back_to_min_slot() {
    let mut p = profile();
    p.id_type = "passport".into();
    let row = project(&p);
    assert_eq!(row.id_type, IdType::Min);
    assert_eq!(row.id_value, "MC-0001");
  }

  #[test]
  fn projection_is_stable_except_for_the_row_id() {
    let p = profile();
    let a = project(&p);
    let b = project(&p);

    assert_ne!(a.id, b.id);

    let mut a_anon = a.clone();
    let mut b_anon = b.clone();
    a_anon.id = String::new();
    b_anon.id = String::new();
    assert_eq!(a_anon, b_anon);
  }

  #[test]
  fn row_id_shape() {
    let id = make_row_id("MIN-MC 0001 With A Very Long Seed");
    let (slug, _) = id.rsplit_once('-').unwrap();
    assert!(slug.len() <= ID_SEED_CAP);
    assert!(slug.starts_with("min-mc-0001"));
    assert!(!slug.contains(' '));

    // blank seeds still produce an id
    assert!(make_row_id("").starts_with("x-"));
  }

  #[test]
  fn date_normalization() {
    assert_eq!(normalize_date("5/3/2027"), "2027-05-03");
    assert_eq!(normalize_date("12/25/2024"), "2024-12-25");
    assert_eq!(normalize_date("2027-05-03"), "2027-05-03");
    assert_eq!(normalize_date(""), "");
    // not a recognized shape: untouched
    assert_eq!(normalize_date("next spring"), "next spring");
    // impossible calendar dates are left alone rather than reformatted
    assert_eq!(normalize_date("13/45/2027"), "13/45/2027");
  }
}
