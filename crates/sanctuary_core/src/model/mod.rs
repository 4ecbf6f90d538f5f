//! Domain model for sanctuary content.
//!
//! # Responsibility
//! - Define read models and immutable write inputs (drafts, patches).
//! - Own slug derivation and field validation rules.
//!
//! # Invariants
//! - Every record is identified by a stable UUID v4.
//! - Deletion is a hard delete; there are no tombstones.
//! - Drafts and patches are validated before any storage call.

pub mod animal;
pub mod article;
pub mod event;
pub mod herd;
pub mod page;
pub mod principal;
pub mod slug;
pub mod user;
pub mod validation;
