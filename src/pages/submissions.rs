use super::{html_page, PageContext};
use crate::state::Received;
use maud::{html, Markup};

/// What the local stand-in for the form backend received, newest first.
pub fn page(received: &[Received], ctx: &PageContext) -> Markup {
    let content = html! {
        section {
            hgroup {
                h1 { "Submissions" }
                p { (received.len()) " kept in memory, lost on restart" }
            }

            @for r in received {
                article {
                    header { b { (r.form_name) } " " small { (r.date_time_utc()) } }
                    table {
                        tbody {
                            @for (name, value) in &r.fields {
                                tr {
                                    th { code { (name) } }
                                    td { (value) }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    html_page("Submissions", content, ctx)
}
