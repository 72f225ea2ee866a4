use super::{html_page, PageContext};
use maud::{html, Markup};

pub fn page(ctx: &PageContext) -> Markup {
    let content = html! {
        section {
            h1 { "Welcome" }
            p { "This site is plain html. Every page carries a feedback panel, open it from the "
                "top of the page, fill in what you like and send it." }
            p { "Submissions are posted to the site itself, where the hosting form service picks "
                "them up." }
        }
    };

    html_page("Home", content, ctx)
}
