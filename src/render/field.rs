use maud::{html, Markup, Render};

use crate::form::{FieldKind, FieldSpec};

/// The control of one declared field.
pub struct FieldInput<'a> {
    field: &'a FieldSpec,
    value: Option<&'a str>,
    labelled: bool,
}

impl<'a> FieldInput<'a> {
    /// Just the named control, as the static manifest needs it.
    pub fn bare(field: &'a FieldSpec) -> Self {
        Self {
            field,
            value: None,
            labelled: false,
        }
    }

    pub fn labelled(field: &'a FieldSpec) -> Self {
        Self {
            labelled: true,
            ..Self::bare(field)
        }
    }

    pub fn with_value(mut self, value: &'a str) -> Self {
        self.value = Some(value);
        self
    }

    fn control(&self) -> Markup {
        let name = self.field.name;
        match self.field.kind {
            FieldKind::Text => html! { input type="text" name=(name) value=[self.value]; },
            FieldKind::Email => html! { input type="email" name=(name) value=[self.value]; },
            FieldKind::Hidden => html! { input type="hidden" name=(name) value=[self.value]; },
            FieldKind::LongText => html! {
                textarea name=(name) rows="4" { (self.value.unwrap_or_default()) }
            },
            FieldKind::Select(options) => html! {
                select name=(name) {
                    option value="" { "Choose" }
                    @for option in options {
                        option value=(option) selected[self.value == Some(*option)] { (option) }
                    }
                }
            },
        }
    }
}

impl<'a> Render for FieldInput<'a> {
    fn render(&self) -> Markup {
        if !self.labelled || self.field.kind == FieldKind::Hidden {
            return self.control();
        }
        html! {
            label {
                (self.field.label)
                (self.control())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{ADDITIONAL_FEEDBACK, FEEDBACK_FORM, HELPFUL, URL};

    fn field(name: &str) -> &'static FieldSpec {
        FEEDBACK_FORM.get(name).unwrap()
    }

    #[test]
    fn hidden_fields_are_never_labelled() {
        let html = FieldInput::labelled(field(URL))
            .with_value("/about")
            .render()
            .into_string();
        assert_eq!(html, r#"<input type="hidden" name="url" value="/about">"#);
    }

    #[test]
    fn select_offers_declared_values() {
        let html = FieldInput::bare(field(HELPFUL))
            .with_value("no")
            .render()
            .into_string();
        assert_eq!(
            html,
            r#"<select name="helpful"><option value="">Choose</option><option value="yes">yes</option><option value="no" selected>no</option></select>"#
        );
    }

    #[test]
    fn labelled_long_text() {
        let html = FieldInput::labelled(field(ADDITIONAL_FEEDBACK))
            .render()
            .into_string();
        assert_eq!(
            html,
            r#"<label>Anything else?<textarea name="additionalFeedback" rows="4"></textarea></label>"#
        );
    }
}
