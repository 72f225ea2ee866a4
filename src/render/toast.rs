use maud::{html, Markup, Render};

use crate::notify::{Level, Toasts};

impl Render for Toasts {
    fn render(&self) -> Markup {
        html! {
            div class="toasts" role="status" aria-live="polite" {
                @for toast in self.iter() {
                    p class=(class(toast.level)) { (toast.message) }
                }
            }
        }
    }
}

fn class(level: Level) -> &'static str {
    match level {
        Level::Success => "toast success",
        Level::Failure => "toast failure",
    }
}

#[cfg(test)]
mod tests {
    use crate::notify::{Notifier, Toasts};
    use maud::Render;

    #[test]
    fn container_is_rendered_even_when_empty() {
        assert_eq!(
            Toasts::new().render().into_string(),
            r#"<div class="toasts" role="status" aria-live="polite"></div>"#
        );
    }

    #[test]
    fn messages_are_escaped() {
        let mut toasts = Toasts::new();
        toasts.success("<b>thanks</b>");
        let html = toasts.render().into_string();
        assert!(html.contains(r#"<p class="toast success">&lt;b&gt;thanks&lt;/b&gt;</p>"#));
    }
}
