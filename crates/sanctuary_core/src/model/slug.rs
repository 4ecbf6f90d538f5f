//! Slug derivation shared by every sluggable entity.
//!
//! # Responsibility
//! - Map free-text display names to URL-safe identifiers.
//! - Decide when an update must re-derive and re-check a stored slug.
//!
//! # Invariants
//! - `slugify` is total and deterministic; its output only contains
//!   `[a-z0-9-]`, never starts/ends with `-`, and never repeats `-`.
//! - `slugify` is idempotent: `slugify(slugify(s)) == slugify(s)`.
//! - This module is the only slug implementation; preview paths call it too.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

static NON_SLUG_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").expect("valid non-slug regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static HYPHEN_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("valid hyphen regex"));

/// Entity collections that keep a unique slug index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlugKind {
    Animal,
    Article,
    Page,
}

impl SlugKind {
    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            Self::Animal => "animals",
            Self::Article => "articles",
            Self::Page => "pages",
        }
    }

    /// Lowercase singular label for messages and log fields.
    pub fn label(self) -> &'static str {
        match self {
            Self::Animal => "animal",
            Self::Article => "article",
            Self::Page => "page",
        }
    }

    /// Name of the display field the slug is derived from.
    pub fn source_field(self) -> &'static str {
        match self {
            Self::Animal => "name",
            Self::Article | Self::Page => "title",
        }
    }
}

impl Display for SlugKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Derives the canonical slug for a display name.
///
/// Rules, applied in order:
/// - lowercase the whole string;
/// - delete every character outside `[a-z0-9\s-]`;
/// - replace each whitespace run with one `-`;
/// - collapse repeated `-`;
/// - trim `-` from both ends.
///
/// Inputs without any permitted character produce an empty string.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped = NON_SLUG_CHARS_RE.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RE.replace_all(&stripped, "-");
    let collapsed = HYPHEN_RUN_RE.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

/// Returns whether `value` is already a fixed point of [`slugify`].
pub fn is_canonical_slug(value: &str) -> bool {
    slugify(value) == value
}

/// Returns the slug to stage when a record stored under `current_slug` is
/// renamed to `new_name`.
///
/// `None` means the stored slug stays as-is, so no uniqueness check is
/// needed.
pub fn reconcile_slug(current_slug: &str, new_name: &str) -> Option<String> {
    let candidate = slugify(new_name);
    (candidate != current_slug).then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::{is_canonical_slug, reconcile_slug, slugify, SlugKind};

    #[test]
    fn strips_punctuation() {
        assert_eq!(slugify("Midnight Storm!!"), "midnight-storm");
    }

    #[test]
    fn collapses_and_trims_whitespace() {
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
    }

    #[test]
    fn collapses_existing_hyphens() {
        assert_eq!(slugify("Rescue -- Day - 2024"), "rescue-day-2024");
        assert_eq!(slugify("--edge--"), "edge");
    }

    #[test]
    fn removes_non_ascii_letters_and_emoji() {
        assert_eq!(slugify("Café Olé 🐴"), "caf-ol");
        assert_eq!(slugify("Ünïcödé"), "ncd");
    }

    #[test]
    fn tabs_and_newlines_count_as_whitespace() {
        assert_eq!(slugify("Wild\tHorse\nAnnie"), "wild-horse-annie");
    }

    #[test]
    fn input_without_permitted_chars_yields_empty_slug() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!! ???"), "");
        assert_eq!(slugify("🐎🐎"), "");
    }

    #[test]
    fn slugify_is_idempotent() {
        let samples = [
            "Midnight Storm!!",
            "  Multiple   Spaces  ",
            "Burro #12 | Rescued 2019",
            "a-b--c",
            "",
            "ALL CAPS",
            "under_score",
        ];
        for sample in samples {
            let once = slugify(sample);
            assert_eq!(slugify(&once), once, "not idempotent for `{sample}`");
            assert!(is_canonical_slug(&once));
        }
    }

    #[test]
    fn canonical_check_rejects_raw_names() {
        assert!(!is_canonical_slug("Midnight Storm"));
        assert!(!is_canonical_slug("-lead"));
        assert!(is_canonical_slug("midnight-storm"));
    }

    #[test]
    fn reconcile_skips_names_that_keep_the_slug() {
        assert_eq!(reconcile_slug("midnight-storm", "MIDNIGHT storm!"), None);
        assert_eq!(
            reconcile_slug("midnight-storm", "Midnight Sun"),
            Some("midnight-sun".to_string())
        );
    }

    #[test]
    fn kind_labels_match_tables() {
        assert_eq!(SlugKind::Animal.table(), "animals");
        assert_eq!(SlugKind::Article.source_field(), "title");
        assert_eq!(SlugKind::Page.to_string(), "page");
    }
}
