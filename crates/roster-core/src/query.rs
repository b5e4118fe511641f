//! Read-side helpers for table and search views.
//!
//! These operate on list snapshots and never touch storage; table,
//! live-search and verify surfaces all consume the same persisted list.

use chrono::{Datelike, NaiveDate};

use crate::member::Member;

/// Fields a table view can sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
  Name,
  Surname,
  Nationality,
  IdType,
  IdValue,
  Age,
  Represents,
  Division,
  Status,
  Expires,
}

/// One page of a (filtered, sorted) list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
  pub rows:        Vec<Member>,
  /// 1-based page number actually served (clamped into range).
  pub page:        usize,
  pub total_pages: usize,
  /// Row count before paging.
  pub total_rows:  usize,
}

// ─── Filtering ───────────────────────────────────────────────────────────────

/// Case-insensitive substring filter across every displayed field. An
/// empty query keeps everything.
pub fn filter(list: &[Member], query: &str) -> Vec<Member> {
  let q = query.trim().to_lowercase();
  if q.is_empty() {
    return list.to_vec();
  }
  list
    .iter()
    .filter(|m| haystack(m).iter().any(|v| v.to_lowercase().contains(&q)))
    .cloned()
    .collect()
}

fn haystack(m: &Member) -> [&str; 10] {
  [
    m.name.as_str(),
    m.surname.as_str(),
    m.nationality.as_str(),
    m.id_type.as_str(),
    m.id_value.as_str(),
    m.age.as_str(),
    m.represents.as_str(),
    m.division.as_str(),
    m.status.as_str(),
    m.expires.as_str(),
  ]
}

/// Live-search hits: id value or full name containing the query, in list
/// order, capped.
pub fn live_search<'a>(
  list: &'a [Member],
  query: &str,
  cap: usize,
) -> Vec<&'a Member> {
  let q = query.trim().to_lowercase();
  if q.is_empty() {
    return Vec::new();
  }
  list
    .iter()
    .filter(|m| {
      m.id_value.to_lowercase().contains(&q)
        || m.full_name().to_lowercase().contains(&q)
    })
    .take(cap)
    .collect()
}

/// Exact id-value lookup, case-insensitive. Returns a member only when
/// exactly one row matches.
pub fn verify<'a>(list: &'a [Member], query: &str) -> Option<&'a Member> {
  let q = query.trim().to_lowercase();
  if q.is_empty() {
    return None;
  }
  let mut hits = list.iter().filter(|m| m.id_value.trim().to_lowercase() == q);
  match (hits.next(), hits.next()) {
    (Some(hit), None) => Some(hit),
    _ => None,
  }
}

// ─── Sorting ─────────────────────────────────────────────────────────────────

/// Sort a snapshot for display. Strings compare case-insensitively;
/// `Expires` compares as calendar dates with unparseable values first.
pub fn sort_by(list: &mut [Member], field: SortField, ascending: bool) {
  list.sort_by(|a, b| {
    let ord = match field {
      SortField::Expires => expires_days(a).cmp(&expires_days(b)),
      _ => sort_value(a, field)
        .to_lowercase()
        .cmp(&sort_value(b, field).to_lowercase()),
    };
    if ascending { ord } else { ord.reverse() }
  });
}

fn sort_value(m: &Member, field: SortField) -> &str {
  match field {
    SortField::Name => &m.name,
    SortField::Surname => &m.surname,
    SortField::Nationality => &m.nationality,
    SortField::IdType => m.id_type.as_str(),
    SortField::IdValue => &m.id_value,
    SortField::Age => &m.age,
    SortField::Represents => &m.represents,
    SortField::Division => &m.division,
    SortField::Status => &m.status,
    SortField::Expires => &m.expires,
  }
}

/// Day ordinal for an expires value; anything unparseable sorts first.
fn expires_days(m: &Member) -> i32 {
  let value = m.expires.trim();
  for fmt in ["%Y-%m-%d", "%m/%d/%Y"] {
    if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
      return date.num_days_from_ce();
    }
  }
  0
}

// ─── Paging ──────────────────────────────────────────────────────────────────

/// Slice one 1-based page out of a list. Page numbers out of range clamp
/// rather than fail; `per_page` of zero is treated as one.
pub fn page(list: &[Member], page: usize, per_page: usize) -> Page {
  let per_page = per_page.max(1);
  let total_rows = list.len();
  let total_pages = total_rows.div_ceil(per_page).max(1);
  let page = page.clamp(1, total_pages);

  let start = (page - 1) * per_page;
  let rows = list
    .iter()
    .skip(start)
    .take(per_page)
    .cloned()
    .collect();

  Page { rows, page, total_pages, total_rows }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
