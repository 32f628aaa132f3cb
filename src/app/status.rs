#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
}

pub const READY_STATUS: &str = "Ready. Press Ctrl+S to save your ficha.";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ready(&mut self) {
        self.message = READY_STATUS.to_string();
    }

    pub fn editing(&mut self, label: &str) {
        self.message = format!("Editing {label}");
    }

    pub fn picking(&mut self) {
        self.message = "Use ↑/↓ and Enter to choose a character".to_string();
    }

    pub fn selected(&mut self, name: Option<&str>) {
        self.message = match name {
            Some(name) => format!("Loading {name}…"),
            None => "Selection cleared".to_string(),
        };
    }

    pub fn picker_unavailable(&mut self, loading: bool) {
        self.message = if loading {
            "The character list is still loading".to_string()
        } else {
            "The character list is unavailable".to_string()
        };
    }

    pub fn cannot_save(&mut self, reason: &str) {
        self.message = format!("Cannot save yet: {reason}");
    }

    pub fn saved(&mut self, name: &str) {
        self.message = format!("Ficha for {name} saved. Press Ctrl+Q to exit.");
    }

    pub fn pending_exit(&mut self) {
        self.message = "Unsaved changes. Press Ctrl+Q again to quit without saving.".to_string();
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_follow_the_form() {
        let mut status = StatusLine::new();
        assert_eq!(status.message(), READY_STATUS);
        status.selected(None);
        assert_eq!(status.message(), "Selection cleared");
        status.cannot_save("enter a nickname");
        assert_eq!(status.message(), "Cannot save yet: enter a nickname");
        status.ready();
        assert_eq!(status.message(), READY_STATUS);
    }
}
