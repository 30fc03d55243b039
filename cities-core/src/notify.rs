/// Surfaces a user-facing error message.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Prints notifications to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

/// Keeps every notification in memory.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingNotifier {
    pub messages: Vec<String>,
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
