use super::{html_page, PageContext};
use maud::{html, Markup};

/// Answer to an accepted submission, `back` is the page it was sent from.
pub fn page(back: Option<&str>, ctx: &PageContext) -> Markup {
    let content = html! {
        section {
            h1 { "Thank you" }
            p { "Your feedback was received." }
            @if let Some(back) = back.filter(|b| is_same_site(b)) {
                p { a href=(back) { "Back to the page" } }
            }
        }
    };

    html_page("Thanks", content, ctx)
}

/// Only root-relative addresses are linked, `//host` would leave the site.
fn is_same_site(address: &str) -> bool {
    address.starts_with('/') && !address.starts_with("//") && !address.starts_with("/\\")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Toasts;

    fn render(back: &str) -> String {
        let toasts = Toasts::new();
        let ctx = PageContext {
            path: "/",
            address: "/",
            toasts: &toasts,
        };
        page(Some(back), &ctx).into_string()
    }

    #[test]
    fn links_back_to_pages_of_this_site() {
        assert!(render("/about?lang=en").contains(r#"<a href="/about?lang=en">Back to the page</a>"#));
    }

    #[test]
    fn off_site_addresses_are_not_linked() {
        for back in ["//evil.example/x", "/\\evil.example", "https://evil.example/", "about"] {
            assert!(!render(back).contains("Back to the page"), "{back}");
        }
    }
}
