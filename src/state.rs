use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::req::Submission;

/// A submission as the form backend would have stored it.
#[derive(Debug, Clone)]
pub struct Received {
    pub form_name: &'static str,
    pub fields: Vec<(String, String)>,
    pub received_at: DateTime<Utc>,
}

impl Received {
    pub fn date_time_utc(&self) -> String {
        self.received_at.format("%Y-%m-%d %H:%M:%S %Z").to_string() // 2022-11-18 07:53:03 UTC
    }
}

pub struct SharedState {
    /// Most recent first, in memory only.
    pub inbox: Mutex<VecDeque<Received>>,
    pub inbox_size: usize,
}

impl SharedState {
    pub fn new(inbox_size: usize) -> Self {
        Self {
            inbox: Mutex::new(VecDeque::with_capacity(inbox_size)),
            inbox_size,
        }
    }

    pub async fn receive(&self, submission: Submission) -> Received {
        if !submission.dropped.is_empty() {
            log::warn!(
                "{} submission had undeclared fields {:?}, dropped",
                submission.form.form_name,
                submission.dropped
            );
        }
        let received = Received {
            form_name: submission.form.form_name,
            fields: submission.fields,
            received_at: Utc::now(),
        };
        log::info!(
            "received {} with {} fields",
            received.form_name,
            received.fields.len()
        );

        let mut inbox = self.inbox.lock().await;
        inbox.push_front(received.clone());
        inbox.truncate(self.inbox_size);
        received
    }

    pub async fn recent(&self) -> Vec<Received> {
        self.inbox.lock().await.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FEEDBACK_FORM;

    fn submission(first_name: &str) -> Submission {
        Submission {
            form: &FEEDBACK_FORM,
            fields: vec![("firstName".to_string(), first_name.to_string())],
            dropped: vec![],
        }
    }

    #[tokio::test]
    async fn inbox_is_bounded_most_recent_first() {
        let state = SharedState::new(2);
        for name in ["a", "b", "c"] {
            state.receive(submission(name)).await;
        }
        let recent: Vec<_> = state
            .recent()
            .await
            .into_iter()
            .map(|r| r.fields[0].1.clone())
            .collect();
        assert_eq!(recent, vec!["c", "b"]);
    }

    #[tokio::test]
    async fn zero_sized_inbox_keeps_nothing() {
        let state = SharedState::new(0);
        let received = state.receive(submission("a")).await;
        assert_eq!(received.form_name, "FeedbackForm");
        assert!(state.recent().await.is_empty());
    }
}
