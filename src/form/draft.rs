use std::fmt::Display;

use super::{
    encode, ADDITIONAL_FEEDBACK, EMAIL, FEEDBACK_FORM_NAME, FIRST_NAME, FORM_NAME_KEY, HELPFUL,
    LAST_NAME, URL,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Helpful {
    Yes,
    No,
}

impl Helpful {
    pub fn as_str(&self) -> &'static str {
        match self {
            Helpful::Yes => "yes",
            Helpful::No => "no",
        }
    }
}

impl Display for Helpful {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single user edit, one variant per editable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Helpful(Helpful),
    FirstName(String),
    LastName(String),
    Email(String),
    AdditionalFeedback(String),
}

/// Unsaved values of an open feedback panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub helpful: Option<Helpful>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub additional_feedback: String,
    /// Address of the page the panel was opened on.
    pub url: String,
}

impl Draft {
    pub fn new(url: impl Into<String>) -> Self {
        Draft {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Replaces the edited slot, the last write wins.
    pub fn apply(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::Helpful(v) => self.helpful = Some(v),
            FieldEdit::FirstName(v) => self.first_name = v,
            FieldEdit::LastName(v) => self.last_name = v,
            FieldEdit::Email(v) => self.email = v,
            FieldEdit::AdditionalFeedback(v) => self.additional_feedback = v,
        }
    }

    /// Field values in declaration order. Empty values are kept.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        vec![
            (HELPFUL, self.helpful.map(|h| h.as_str()).unwrap_or("")),
            (FIRST_NAME, self.first_name.as_str()),
            (LAST_NAME, self.last_name.as_str()),
            (EMAIL, self.email.as_str()),
            (ADDITIONAL_FEEDBACK, self.additional_feedback.as_str()),
            (URL, self.url.as_str()),
        ]
    }

    /// The url-encoded body of a submission, prefixed by the form name.
    pub fn encode(&self) -> String {
        let form_name: [(&str, &str); 1] = [(FORM_NAME_KEY, FEEDBACK_FORM_NAME)];
        encode::encode(form_name.into_iter().chain(self.pairs()))
    }
}
