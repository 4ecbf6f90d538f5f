//! Calendar event use-case service.
//!
//! # Invariants
//! - Calendar windows are validated before querying; a window ending before
//!   it starts is a validation error, not an empty result.

use crate::model::event::{Event, EventId, EventPatch, NewEvent, TimeWindow};
use crate::model::principal::AuthContext;
use crate::repo::event_repo::EventRepository;
use crate::service::{log_mutation, require_authenticated, ServiceError, ServiceResult};

pub struct EventService<R: EventRepository> {
    repo: R,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_event(&self, ctx: &AuthContext, draft: &NewEvent) -> ServiceResult<EventId> {
        let outcome = require_authenticated(ctx)
            .and_then(|_| self.repo.create_event(draft).map_err(ServiceError::from));
        log_mutation("event_create", ctx, outcome, |id| {
            format!("event_id={id} starts_at={}", draft.starts_at)
        })
    }

    pub fn update_event(
        &self,
        ctx: &AuthContext,
        id: EventId,
        patch: &EventPatch,
    ) -> ServiceResult<()> {
        let outcome = require_authenticated(ctx)
            .and_then(|_| self.repo.update_event(id, patch).map_err(ServiceError::from));
        log_mutation("event_update", ctx, outcome, |_| format!("event_id={id}"))
    }

    pub fn delete_event(&self, ctx: &AuthContext, id: EventId) -> ServiceResult<()> {
        let outcome = require_authenticated(ctx)
            .and_then(|_| self.repo.delete_event(id).map_err(ServiceError::from));
        log_mutation("event_delete", ctx, outcome, |_| format!("event_id={id}"))
    }

    pub fn get_event(&self, id: EventId) -> ServiceResult<Option<Event>> {
        Ok(self.repo.get_event(id)?)
    }

    /// Lists events overlapping `[start, end]` (epoch ms, inclusive).
    pub fn list_events_in_range(&self, start: i64, end: i64) -> ServiceResult<Vec<Event>> {
        let window = TimeWindow::new(start, end)?;
        Ok(self.repo.list_events_in_range(&window)?)
    }
}
