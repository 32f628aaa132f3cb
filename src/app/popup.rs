use crate::{form::FormState, presentation::PopupRender};

/// Character picker: the empty option followed by every catalog entry.
pub(crate) struct PickerPopup {
    title: String,
    options: Vec<String>,
    selected: usize,
}

impl PickerPopup {
    /// `None` while the selection control is disabled.
    pub(crate) fn from_form(form: &FormState) -> Option<Self> {
        if !form.selection_enabled() {
            return None;
        }
        Some(Self {
            title: "Character".to_string(),
            options: form.picker_options(),
            selected: form.picker_index(),
        })
    }

    pub(crate) fn select_previous(&mut self) {
        if self.options.is_empty() {
            return;
        }
        if self.selected == 0 {
            self.selected = self.options.len().saturating_sub(1);
        } else {
            self.selected -= 1;
        }
    }

    pub(crate) fn select_next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.options.len();
    }

    pub(crate) fn step(&mut self, delta: i32) {
        if delta < 0 {
            self.select_previous();
        } else {
            self.select_next();
        }
    }

    pub(crate) fn selection(&self) -> usize {
        self.selected
    }

    /// Label of the highlighted entry; `None` on the clearing option.
    pub(crate) fn selected_label(&self) -> Option<&str> {
        if self.selected == 0 {
            return None;
        }
        self.options.get(self.selected).map(String::as_str)
    }

    pub(crate) fn as_render(&self) -> PopupRender<'_> {
        PopupRender {
            title: &self.title,
            options: &self.options,
            selected: self.selected,
        }
    }
}
