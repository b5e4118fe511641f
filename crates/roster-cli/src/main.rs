//! `roster` — membership roster with an ID-card style record flow.
//!
//! # Usage
//!
//! ```
//! roster add --name Ana --surname "Dela Cruz" --id-type MIN --min MC-0001
//! roster list --search dela --sort expires --desc
//! roster edit <row-id>   # then: roster save --status Inactive
//! roster show MC-0001
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use roster_core::{
  member::Member,
  profile::Profile,
  query::{self, SortField},
  roster::Roster,
  store::RosterStore,
};
use roster_store_sqlite::SqliteStore;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_STORE_PATH: &str = "~/.local/share/roster/roster.db";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
  name = "roster",
  about = "Membership roster with an ID-card style record flow"
)]
struct Args {
  /// Path to a TOML config file (`store_path`).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// SQLite store path.
  #[arg(long, env = "ROSTER_STORE")]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Add a member from the form state; stale rows for the same identity
  /// are superseded.
  Add(FormArgs),
  /// Save the form as the draft. When an edit is pending, the targeted
  /// row is updated in place instead.
  Save(FormArgs),
  /// Load a row back into the form and arm the next save to update it.
  Edit {
    row_id: String,
  },
  /// Delete a row.
  Remove {
    row_id: String,
  },
  /// Print the members table.
  List {
    /// Substring filter across all columns.
    #[arg(long)]
    search: Option<String>,

    #[arg(long, value_enum, default_value_t = SortKey::Name)]
    sort: SortKey,

    /// Sort descending instead of ascending.
    #[arg(long)]
    desc: bool,

    #[arg(long, default_value_t = 1)]
    page: usize,

    #[arg(long, default_value_t = 25)]
    per_page: usize,
  },
  /// Look a member up by exact id value and print the card profile.
  Show {
    query: String,
  },
  /// Insert demo members into an empty roster.
  Seed,
}

/// The form fields. Flags left out keep whatever the stored draft has, so
/// repeated invocations behave like editing a pre-filled form.
#[derive(clap::Args, Debug, Default)]
struct FormArgs {
  #[arg(long)]
  name: Option<String>,
  #[arg(long)]
  surname: Option<String>,
  #[arg(long)]
  nationality: Option<String>,
  /// MIN or CIN; anything else falls back to MIN.
  #[arg(long)]
  id_type: Option<String>,
  /// Member id number (the MIN slot).
  #[arg(long)]
  min: Option<String>,
  /// Card id number (the CIN slot).
  #[arg(long)]
  cin: Option<String>,
  /// Identifier for whichever slot the id type selects.
  #[arg(long)]
  id_value: Option<String>,
  /// Age group (e.g. Junior, Adult, Senior).
  #[arg(long)]
  age: Option<String>,
  #[arg(long)]
  represents: Option<String>,
  #[arg(long)]
  division: Option<String>,
  #[arg(long)]
  status: Option<String>,
  /// Expiry date; `YYYY-MM-DD` and `M/D/YYYY` are normalized.
  #[arg(long)]
  expires: Option<String>,
}

impl FormArgs {
  /// Overlay the given flags onto the stored draft, like typing into a
  /// pre-filled form.
  fn onto(self, base: Profile) -> Profile {
    fn put(slot: &mut String, value: Option<String>) {
      if let Some(value) = value {
        *slot = value;
      }
    }

    let mut p = base;
    put(&mut p.name, self.name);
    put(&mut p.surname, self.surname);
    put(&mut p.nationality, self.nationality);
    put(&mut p.id_type, self.id_type);
    put(&mut p.min, self.min);
    put(&mut p.cin, self.cin);
    put(&mut p.id_value, self.id_value);
    put(&mut p.age, self.age);
    put(&mut p.represents, self.represents);
    put(&mut p.division, self.division);
    put(&mut p.status, self.status);
    put(&mut p.expires, self.expires);
    p
  }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum SortKey {
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

impl From<SortKey> for SortField {
  fn from(key: SortKey) -> Self {
    match key {
      SortKey::Name => Self::Name,
      SortKey::Surname => Self::Surname,
      SortKey::Nationality => Self::Nationality,
      SortKey::IdType => Self::IdType,
      SortKey::IdValue => Self::IdValue,
      SortKey::Age => Self::Age,
      SortKey::Represents => Self::Represents,
      SortKey::Division => Self::Division,
      SortKey::Status => Self::Status,
      SortKey::Expires => Self::Expires,
    }
  }
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  store_path: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // Flags override the config file, which overrides the default.
  let store_path = args
    .store
    .or_else(|| (!file_cfg.store_path.is_empty()).then(|| PathBuf::from(&file_cfg.store_path)))
    .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));
  let store_path = expand_tilde(&store_path);

  if let Some(parent) = store_path.parent() {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("creating {}", parent.display()))?;
  }

  tracing::debug!(path = %store_path.display(), "opening store");
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("opening store at {}", store_path.display()))?;
  let roster = Roster::new(store);

  match args.command {
    Command::Add(form) => add(&roster, form).await,
    Command::Save(form) => save(&roster, form).await,
    Command::Edit { row_id } => edit(&roster, &row_id).await,
    Command::Remove { row_id } => remove(&roster, &row_id).await,
    Command::List { search, sort, desc, page, per_page } => {
      list(&roster, search.as_deref(), sort, desc, page, per_page).await
    }
    Command::Show { query } => show(&roster, &query).await,
    Command::Seed => seed(&roster).await,
  }
}

// ─── Commands ─────────────────────────────────────────────────────────────────

async fn add(roster: &Roster<SqliteStore>, form: FormArgs) -> Result<()> {
  let base = roster.draft().await?.unwrap_or_default();
  let profile = form.onto(base);

  if roster.add_member(&profile).await? {
    println!("Added {}.", display_name(&profile));
  } else {
    println!("Nothing to add: a member needs an id value or both a name and a surname.");
  }
  Ok(())
}

async fn save(roster: &Roster<SqliteStore>, form: FormArgs) -> Result<()> {
  let editing = roster.store().read_edit_marker().await?;
  let base = roster.draft().await?.unwrap_or_default();
  let profile = form.onto(base);

  let wrote = roster.save_profile(&profile).await?;
  match (editing, wrote) {
    (Some(row_id), true) => println!("Updated {} ({row_id}).", display_name(&profile)),
    (Some(row_id), false) => {
      println!("Row {row_id} could not be updated; kept the draft only.");
    }
    (None, _) => println!("Draft saved."),
  }
  Ok(())
}

async fn edit(roster: &Roster<SqliteStore>, row_id: &str) -> Result<()> {
  if roster.begin_edit(row_id).await? {
    let draft = roster.draft().await?.unwrap_or_default();
    println!(
      "Editing {}; the next `roster save` updates this row.",
      display_name(&draft),
    );
  } else {
    println!("No row with id {row_id}.");
  }
  Ok(())
}

async fn remove(roster: &Roster<SqliteStore>, row_id: &str) -> Result<()> {
  if roster.remove(row_id).await? {
    println!("Removed {row_id}.");
  } else {
    println!("No row with id {row_id}.");
  }
  Ok(())
}

async fn list(
  roster: &Roster<SqliteStore>,
  search: Option<&str>,
  sort: SortKey,
  desc: bool,
  page: usize,
  per_page: usize,
) -> Result<()> {
  let members = roster.members().await?;
  let mut filtered = query::filter(&members, search.unwrap_or(""));
  query::sort_by(&mut filtered, sort.into(), !desc);
  let page = query::page(&filtered, page, per_page);

  if page.rows.is_empty() {
    println!("No members found.");
  } else {
    print_table(&page.rows);
  }
  println!(
    "{} record{}   page {} / {}",
    page.total_rows,
    if page.total_rows == 1 { "" } else { "s" },
    page.page,
    page.total_pages,
  );
  Ok(())
}

async fn show(roster: &Roster<SqliteStore>, q: &str) -> Result<()> {
  let members = roster.members().await?;

  if let Some(m) = query::verify(&members, q) {
    print_card(m);
    return Ok(());
  }

  let hits = query::live_search(&members, q, 20);
  if hits.is_empty() {
    println!("No matches found.");
  } else {
    println!("No exact id match. Close hits:");
    for m in hits {
      println!(
        "  {:<24} {:<10} {}",
        m.full_name(),
        status_label(&m.status),
        if m.id_value.is_empty() { "—" } else { m.id_value.as_str() },
      );
    }
  }
  Ok(())
}

async fn seed(roster: &Roster<SqliteStore>) -> Result<()> {
  let existing = roster.members().await?;
  if !existing.is_empty() {
    println!("Roster already has {} member(s); seed skipped.", existing.len());
    return Ok(());
  }

  for profile in demo_members() {
    roster.add_member(&profile).await?;
  }
  println!("Seeded {} demo members.", demo_members().len());
  Ok(())
}

fn demo_members() -> Vec<Profile> {
  vec![
    Profile {
      name: "Ana".into(),
      surname: "Dela Cruz".into(),
      nationality: "PH".into(),
      id_type: "CIN".into(),
      cin: "MC-0001".into(),
      age: "Senior".into(),
      represents: "Head Office".into(),
      division: "North".into(),
      status: "Active".into(),
      expires: "2030-12-31".into(),
      ..Profile::default()
    },
    Profile {
      name: "Juan".into(),
      surname: "Santos".into(),
      nationality: "PH".into(),
      id_type: "CIN".into(),
      cin: "MC-0002".into(),
      age: "Adult".into(),
      represents: "Metro Chapter".into(),
      division: "South".into(),
      status: "Pending".into(),
      expires: "2027-05-15".into(),
      ..Profile::default()
    },
  ]
}

// ─── Output helpers ───────────────────────────────────────────────────────────

const COLUMNS: [&str; 8] =
  ["Row id", "Name", "Surname", "ID", "Value", "Division", "Status", "Expires"];

fn print_table(rows: &[Member]) {
  let cells: Vec<[String; 8]> = rows
    .iter()
    .map(|m| {
      [
        m.id.clone(),
        m.name.clone(),
        m.surname.clone(),
        m.id_type.to_string(),
        dash_if_empty(&m.id_value),
        dash_if_empty(&m.division),
        status_label(&m.status).to_owned(),
        dash_if_empty(&m.expires),
      ]
    })
    .collect();

  let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.chars().count()).collect();
  for row in &cells {
    for (w, cell) in widths.iter_mut().zip(row) {
      *w = (*w).max(cell.chars().count());
    }
  }

  let header: Vec<String> = COLUMNS
    .iter()
    .zip(&widths)
    .map(|(c, &w)| format!("{c:<w$}"))
    .collect();
  println!("{}", header.join("  "));

  for row in &cells {
    let line: Vec<String> = row
      .iter()
      .zip(&widths)
      .map(|(cell, &w)| format!("{cell:<w$}"))
      .collect();
    println!("{}", line.join("  "));
  }
}

fn print_card(m: &Member) {
  println!("{}", m.full_name());
  println!("  Nationality  {}", dash_if_empty(&m.nationality));
  println!("  {} number   {}", m.id_type, dash_if_empty(&m.id_value));
  println!("  Age group    {}", dash_if_empty(&m.age));
  println!("  Represents   {}", dash_if_empty(&m.represents));
  println!("  Division     {}", dash_if_empty(&m.division));
  println!("  Status       {}", status_label(&m.status));
  println!("  Expires      {}", dash_if_empty(&m.expires));
  println!("  Row id       {}", m.id);
}

/// Bucket free-text status values the way the table's status dot does.
fn status_label(status: &str) -> &'static str {
  match status.trim().to_lowercase().as_str() {
    "inactive" | "disabled" | "blocked" => "Inactive",
    "pending" | "hold" | "on hold" => "Pending",
    _ => "Active",
  }
}

fn dash_if_empty(value: &str) -> String {
  if value.trim().is_empty() {
    "—".to_owned()
  } else {
    value.to_owned()
  }
}

fn display_name(p: &Profile) -> String {
  let joined = format!("{} {}", p.name.trim(), p.surname.trim());
  let joined = joined.trim();
  if joined.is_empty() { "(unnamed)".to_owned() } else { joined.to_owned() }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
