//! The declared forms of the site.
//!
//! Every consumer of field names (the rendered panel, the static manifest, the submission
//! encoder and the preview server) iterates [`FORMS`], so a field added here shows up
//! everywhere at once.

use serde::Serialize;

pub mod draft;
pub mod encode;
pub mod surface;

/// Key carrying the form name in every submission body.
pub const FORM_NAME_KEY: &str = "form-name";

pub const FEEDBACK_FORM_NAME: &str = "FeedbackForm";

pub const HELPFUL: &str = "helpful";
pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const EMAIL: &str = "email";
pub const ADDITIONAL_FEEDBACK: &str = "additionalFeedback";
pub const URL: &str = "url";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    LongText,
    /// One value out of the offered ones, nothing else is checked.
    Select(&'static [&'static str]),
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// `false` for values populated by the surface itself, like the page address.
    pub editable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSet {
    pub form_name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl FieldSet {
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    pub fn get(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Looks up a declared form, the comparison is byte-exact.
    pub fn find(form_name: &str) -> Option<&'static FieldSet> {
        FORMS.iter().find(|f| f.form_name == form_name)
    }
}

pub const FEEDBACK_FORM: FieldSet = FieldSet {
    form_name: FEEDBACK_FORM_NAME,
    fields: &[
        FieldSpec {
            name: HELPFUL,
            label: "Was this page helpful?",
            kind: FieldKind::Select(&["yes", "no"]),
            editable: true,
        },
        FieldSpec {
            name: FIRST_NAME,
            label: "First name",
            kind: FieldKind::Text,
            editable: true,
        },
        FieldSpec {
            name: LAST_NAME,
            label: "Last name",
            kind: FieldKind::Text,
            editable: true,
        },
        FieldSpec {
            name: EMAIL,
            label: "Email",
            kind: FieldKind::Email,
            editable: true,
        },
        FieldSpec {
            name: ADDITIONAL_FEEDBACK,
            label: "Anything else?",
            kind: FieldKind::LongText,
            editable: true,
        },
        FieldSpec {
            name: URL,
            label: "Page",
            kind: FieldKind::Hidden,
            editable: false,
        },
    ],
};

pub const FORMS: &[FieldSet] = &[FEEDBACK_FORM];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn field_names_are_unique() {
        for form in FORMS {
            let names: HashSet<_> = form.names().collect();
            assert_eq!(names.len(), form.fields.len(), "{}", form.form_name);
        }
    }

    #[test]
    fn find_is_case_sensitive() {
        assert!(FieldSet::find("FeedbackForm").is_some());
        assert!(FieldSet::find("feedbackform").is_none());
        assert!(FieldSet::find("FeedbackForm ").is_none());
    }

    #[test]
    fn only_the_page_address_is_system_populated() {
        let fixed: Vec<_> = FEEDBACK_FORM
            .fields
            .iter()
            .filter(|f| !f.editable)
            .map(|f| f.name)
            .collect();
        assert_eq!(fixed, vec![URL]);
        assert_eq!(FEEDBACK_FORM.get(URL).map(|f| f.kind), Some(FieldKind::Hidden));
    }

    #[test]
    fn serializes_for_external_generators() {
        let json = serde_json::to_value(FEEDBACK_FORM).unwrap();
        assert_eq!(json["form_name"], "FeedbackForm");
        assert_eq!(json["fields"][0]["kind"]["select"][1], "no");
        assert_eq!(json["fields"][5]["kind"], "hidden");
    }
}
