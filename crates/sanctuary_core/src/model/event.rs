//! Calendar event model.
//!
//! # Invariants
//! - `ends_at`, when set, is not earlier than `starts_at`.
//! - An event without `ends_at` occupies the single instant `starts_at`.

use crate::model::validation::{require_ordered_range, require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type EventId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Epoch milliseconds.
    pub starts_at: i64,
    /// Epoch milliseconds.
    pub ends_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Event {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_ordered_range(self.starts_at, self.ends_at)
    }

    /// Last instant covered by this event.
    pub fn effective_end(&self) -> i64 {
        self.ends_at.unwrap_or(self.starts_at)
    }

    /// Returns whether this event shares at least one instant with `window`.
    pub fn overlaps(&self, window: &TimeWindow) -> bool {
        self.starts_at <= window.end && self.effective_end() >= window.start
    }
}

/// Inclusive calendar window, e.g. one displayed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    pub fn new(start: i64, end: i64) -> Result<Self, ValidationError> {
        require_ordered_range(start, Some(end))?;
        Ok(Self { start, end })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: i64,
    pub ends_at: Option<i64>,
}

impl NewEvent {
    /// Point event at `starts_at`.
    pub fn new(title: impl Into<String>, starts_at: i64) -> Self {
        Self {
            title: title.into(),
            description: None,
            location: None,
            starts_at,
            ends_at: None,
        }
    }

    pub fn ending_at(mut self, ends_at: i64) -> Self {
        self.ends_at = Some(ends_at);
        self
    }

    pub fn at_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_ordered_range(self.starts_at, self.ends_at)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub starts_at: Option<i64>,
    pub ends_at: Option<Option<i64>>,
}

impl EventPatch {
    pub fn apply_to(&self, event: &mut Event) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(description) = &self.description {
            event.description = description.clone();
        }
        if let Some(location) = &self.location {
            event.location = location.clone();
        }
        if let Some(starts_at) = self.starts_at {
            event.starts_at = starts_at;
        }
        if let Some(ends_at) = self.ends_at {
            event.ends_at = ends_at;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Event, TimeWindow};
    use uuid::Uuid;

    fn event(starts_at: i64, ends_at: Option<i64>) -> Event {
        Event {
            id: Uuid::new_v4(),
            title: "Open barn day".to_string(),
            description: None,
            location: None,
            starts_at,
            ends_at,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn overlap_covers_partial_and_enclosing_ranges() {
        let window = TimeWindow::new(100, 200).unwrap();
        assert!(event(50, Some(120)).overlaps(&window));
        assert!(event(150, Some(300)).overlaps(&window));
        assert!(event(50, Some(300)).overlaps(&window));
        assert!(event(120, Some(180)).overlaps(&window));
    }

    #[test]
    fn overlap_is_inclusive_at_edges() {
        let window = TimeWindow::new(100, 200).unwrap();
        assert!(event(200, None).overlaps(&window));
        assert!(event(20, Some(100)).overlaps(&window));
        assert!(!event(201, None).overlaps(&window));
        assert!(!event(20, Some(99)).overlaps(&window));
    }

    #[test]
    fn reversed_window_is_rejected() {
        assert!(TimeWindow::new(200, 100).is_err());
    }
}
