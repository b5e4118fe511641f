//! Core types and reconciliation engine for the roster membership list.
//!
//! Deliberately free of database and terminal dependencies: everything
//! else in the workspace depends on this crate, never the other way.

pub mod dedupe;
pub mod error;
pub mod identity;
pub mod member;
pub mod profile;
pub mod project;
pub mod query;
pub mod reconcile;
pub mod roster;
pub mod store;

pub use error::{Error, Result};
