//! Form field value objects

/// Kind of input a field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    /// Calendar date typed as YYYY-MM-DD
    Date,
    /// Amounts and counts
    Number,
    /// One of a fixed list of `(value, label)` options
    Choice(&'static [(&'static str, &'static str)]),
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: String,
    pub kind: FieldKind,
    pub required: bool,
    pub is_multiline: bool,
}

impl FormField {
    /// Create a new required text field
    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text, true)
    }

    /// Create a new field of the given kind
    pub fn new(name: &str, label: &str, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: String::new(),
            kind,
            required,
            is_multiline: false,
        }
    }

    /// Create a multiline free-text field
    pub fn multiline(name: &str, label: &str) -> Self {
        Self {
            is_multiline: true,
            ..Self::text(name, label)
        }
    }

    /// Mark the field as optional
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    /// True when the value is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// A field satisfies the form when it is optional or non-blank
    pub fn is_satisfied(&self) -> bool {
        !self.required || !self.is_blank()
    }

    /// Set the value directly
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Push a character to the field value. Returns false when the
    /// character is not accepted by the field kind.
    pub fn push_char(&mut self, c: char) -> bool {
        let accepted = match self.kind {
            FieldKind::Text | FieldKind::Email => !c.is_control(),
            FieldKind::Date => c.is_ascii_digit() || c == '-',
            FieldKind::Number => c.is_ascii_digit() || c == '.',
            FieldKind::Choice(_) => false,
        };
        if accepted {
            self.value.push(c);
        }
        accepted
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) -> bool {
        match self.kind {
            FieldKind::Choice(_) => false,
            _ => self.value.pop().is_some(),
        }
    }

    /// Select the next (or previous) option of a choice field.
    /// An empty value moves to the first (or last) option.
    pub fn cycle_choice(&mut self, forward: bool) -> bool {
        let FieldKind::Choice(options) = self.kind else {
            return false;
        };
        if options.is_empty() {
            return false;
        }
        let current = options.iter().position(|(value, _)| *value == self.value);
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => options.len() - 1,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(0), false) => options.len() - 1,
            (Some(i), false) => i - 1,
        };
        self.value = options[next].0.to_string();
        true
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self.kind {
            FieldKind::Choice(options) => options
                .iter()
                .find(|(value, _)| *value == self.value)
                .map(|(_, label)| label.to_string())
                .unwrap_or_else(|| self.value.clone()),
            _ => self.value.clone(),
        }
    }

    /// Label with a required marker
    pub fn display_label(&self) -> String {
        if self.required {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        }
    }
}
