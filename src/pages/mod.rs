use crate::{
    form::{FieldSet, FEEDBACK_FORM, FORM_NAME_KEY},
    notify::Toasts,
    render::FieldInput,
};
use maud::{html, Markup, DOCTYPE};

pub mod about;
pub mod home;
pub mod submissions;
pub mod thanks;

/// What every page needs to know to mount the shared surfaces.
pub struct PageContext<'a> {
    pub path: &'a str,
    /// Path and query of the page being rendered, captured by the feedback panel.
    pub address: &'a str,
    pub toasts: &'a Toasts,
}

/// A basic header with a dynamic `page_title`.
pub fn header(title: &str) -> Markup {
    html! {
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            meta name="description" content="A small static site with a feedback form on every page.";
            link rel="stylesheet" href="/css/site.css";
            title { "Docs - "(title) }
        }
    }
}

fn nav_header(path: &str) -> Markup {
    html! {
        nav {
            ul {
                li { a href="/" aria-current=[(path == "/").then_some("page")] { "Docs" } }
                li { a href="/about" aria-current=[(path == "/about").then_some("page")] { "About" } }
                li { a href="/submissions" aria-current=[(path == "/submissions").then_some("page")] { "Submissions" } }
            }
        }
    }
}

/// The togglable feedback panel: a `details` element, so opening it needs no script.
pub fn feedback_panel(form: &FieldSet, address: &str) -> Markup {
    html! {
        aside class="feedback" {
            details {
                summary { "Feedback" }
                form name=(form.form_name) method="POST" action="/" {
                    input type="hidden" name=(FORM_NAME_KEY) value=(form.form_name);
                    @for field in form.fields {
                        @if field.editable {
                            (FieldInput::labelled(field))
                        } @else {
                            (FieldInput::labelled(field).with_value(address))
                        }
                    }
                    button type="submit" { "Send" }
                }
            }
        }
    }
}

/// Wraps `content` with the chrome shared by all pages, mounting the feedback panel and the
/// notification area exactly once.
pub fn html_page(title: &str, content: Markup, ctx: &PageContext) -> Markup {
    html! {
        (DOCTYPE)
        html lang = "en" {
            (header(title))
            body {
                div class="container" {
                    (nav_header(ctx.path))
                }
                (ctx.toasts)
                (feedback_panel(&FEEDBACK_FORM, ctx.address))
                main class="container" {
                    (content)
                }
                (footer())
            }
        }
    }
}

/// A static footer.
pub fn footer() -> Markup {
    html! {
        footer {
            div class="container" {
                a href="/" { "Home" }
                " | " a href="/about" { "About" }
            }
        }
    }
}
