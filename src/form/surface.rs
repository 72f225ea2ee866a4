use std::mem;

use super::draft::{Draft, FieldEdit};
use crate::{error::Error, notify::Notifier, submit::Submitter};

pub const SUCCESS_MESSAGE: &str = "Thanks for your feedback!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Closed,
    Open(Draft),
    Submitting(Draft),
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Sent,
    Failed(Error),
    /// Submit was requested while the panel was not open, nothing was sent.
    NotOpen,
}

/// The feedback panel of one page.
///
/// Every submit performs exactly one write: there is no retry, no timeout and no guard
/// against the same draft being sent again after a failure.
pub struct FormSurface<S, N> {
    state: State,
    page: String,
    submitter: S,
    notifier: N,
}

impl<S: Submitter, N: Notifier> FormSurface<S, N> {
    pub fn new(page: impl Into<String>, submitter: S, notifier: N) -> Self {
        FormSurface {
            state: State::Closed,
            page: page.into(),
            submitter,
            notifier,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open(_))
    }

    pub fn draft(&self) -> Option<&Draft> {
        match &self.state {
            State::Closed => None,
            State::Open(draft) | State::Submitting(draft) => Some(draft),
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Opens with a fresh draft or closes discarding it.
    pub fn toggle(&mut self) {
        self.state = match mem::replace(&mut self.state, State::Closed) {
            State::Closed => {
                log::debug!("feedback panel opened on {}", self.page);
                State::Open(Draft::new(self.page.clone()))
            }
            State::Open(_) => {
                log::debug!("feedback panel closed, draft discarded");
                State::Closed
            }
            submitting @ State::Submitting(_) => submitting,
        };
    }

    pub fn edit(&mut self, edit: FieldEdit) {
        match &mut self.state {
            State::Open(draft) => draft.apply(edit),
            _ => log::trace!("edit ignored, panel not open"),
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let draft = match mem::replace(&mut self.state, State::Closed) {
            State::Open(draft) => draft,
            other => {
                self.state = other;
                return SubmitOutcome::NotOpen;
            }
        };
        let body = draft.encode();
        self.state = State::Submitting(draft);

        let result = self.submitter.submit(body).await;

        let state = mem::replace(&mut self.state, State::Closed);
        match result {
            Ok(()) => {
                log::info!("feedback sent from {}", self.page);
                self.notifier.success(SUCCESS_MESSAGE);
                SubmitOutcome::Sent
            }
            Err(e) => {
                if let State::Submitting(draft) = state {
                    self.state = State::Open(draft);
                }
                self.notifier
                    .failure(&format!("Sending feedback failed: {e}"));
                SubmitOutcome::Failed(e)
            }
        }
    }
}
