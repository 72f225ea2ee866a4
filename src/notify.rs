//! Where the outcome of a submission is reported.

/// Receives the outcome signals of a form surface.
pub trait Notifier {
    fn success(&mut self, message: &str);
    fn failure(&mut self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn success(&mut self, message: &str) {
        (**self).success(message)
    }

    fn failure(&mut self, message: &str) {
        (**self).failure(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: Level,
    pub message: String,
}

/// Notices shown by the page layout, see `render::toast`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toasts(Vec<Toast>);

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, level: Level, message: &str) {
        self.0.push(Toast {
            level,
            message: message.to_string(),
        })
    }
}

impl Notifier for Toasts {
    fn success(&mut self, message: &str) {
        self.push(Level::Success, message)
    }

    fn failure(&mut self, message: &str) {
        self.push(Level::Failure, message)
    }
}

/// Terminal sink: a failure goes to stderr, where a browser would show a blocking alert.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn success(&mut self, message: &str) {
        println!("{message}");
    }

    fn failure(&mut self, message: &str) {
        eprintln!("{message}");
    }
}
