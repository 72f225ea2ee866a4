use super::{html_page, PageContext};
use crate::form::FEEDBACK_FORM;
use maud::{html, Markup};

pub fn page(ctx: &PageContext) -> Markup {
    let content = html! {
        section {
            h1 { "About" }

            p { "The feedback form collects the following fields:" }
            ul {
                @for field in FEEDBACK_FORM.fields {
                    li { code { (field.name) } ": " (field.label)
                        @if !field.editable { " (filled in automatically)" }
                    }
                }
            }
            p { "Nothing is validated and nothing is stored by the page itself. A failed send can "
                "be retried, the values stay in the panel." }
        }
    };

    html_page("About", content, ctx)
}
