//! Contact form
//!
//! Validates the four fields and composes a `mailto:` URI. Nothing is sent
//! from here: the URI is handed to the system mail client.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Address used when neither config nor content provide one
pub const FALLBACK_ADDRESS: &str = "hello@example.com";

/// Shown after the mail client is launched
pub const SUCCESS_MESSAGE: &str = "Opening your email client...";

/// User input errors. Messages are shown verbatim in the error notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in all fields")]
    MissingFields(Vec<Field>),
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }

    fn index(&self) -> usize {
        match self {
            Field::Name => 0,
            Field::Email => 1,
            Field::Subject => 2,
            Field::Message => 3,
        }
    }

    pub fn next(self) -> Self {
        Field::ALL[(self.index() + 1) % Field::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Field::ALL[(self.index() + Field::ALL.len() - 1) % Field::ALL.len()]
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex")
    })
}

/// `local@domain.tld` shape check
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// A validated submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    /// Trim and validate raw field values
    pub fn new(name: &str, email: &str, subject: &str, message: &str) -> Result<Self, FormError> {
        let values = [name.trim(), email.trim(), subject.trim(), message.trim()];
        let missing: Vec<Field> = Field::ALL
            .iter()
            .zip(values.iter())
            .filter(|(_, v)| v.is_empty())
            .map(|(f, _)| *f)
            .collect();
        if !missing.is_empty() {
            return Err(FormError::MissingFields(missing));
        }
        if !is_valid_email(values[1]) {
            return Err(FormError::InvalidEmail);
        }
        Ok(Self {
            name: values[0].to_string(),
            email: values[1].to_string(),
            subject: values[2].to_string(),
            message: values[3].to_string(),
        })
    }

    /// Body template for the mail client
    pub fn body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            self.name, self.email, self.message
        )
    }

    /// `mailto:<to>?subject=..&body=..` with URI-component encoding
    pub fn mailto(&self, to: &str) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            to,
            urlencoding::encode(&self.subject),
            urlencoding::encode(&self.body())
        )
    }
}

// =============================================================================
// Form editing state
// =============================================================================

/// One editable text field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub value: String,
    /// Cursor position in chars
    pub cursor: usize,
}

impl TextInput {
    fn byte_index(&self, char_pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_pos)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Value split at the cursor, for rendering
    pub fn split(&self) -> (&str, &str) {
        self.value.split_at(self.byte_index(self.cursor))
    }
}

/// Contact form with a focused field
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: TextInput,
    pub email: TextInput,
    pub subject: TextInput,
    pub message: TextInput,
    focus: Option<Field>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, field: Field) -> &TextInput {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut TextInput {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }

    pub fn focus(&self) -> Option<Field> {
        self.focus
    }

    pub fn set_focus(&mut self, field: Option<Field>) {
        self.focus = field;
    }

    pub fn focus_next(&mut self) {
        self.focus = Some(self.focus.map_or(Field::Name, Field::next));
    }

    pub fn focus_prev(&mut self) {
        self.focus = Some(self.focus.map_or(Field::Message, Field::prev));
    }

    /// Focused input, if any
    pub fn focused_mut(&mut self) -> Option<&mut TextInput> {
        let field = self.focus?;
        Some(self.field_mut(field))
    }

    /// Validate current values. Fields are left untouched.
    pub fn validate(&self) -> Result<ContactMessage, FormError> {
        ContactMessage::new(
            &self.name.value,
            &self.email.value,
            &self.subject.value,
            &self.message.value,
        )
    }

    /// Validate and build the mailto URI; clears the form on success
    pub fn submit(&mut self, to: &str) -> Result<String, FormError> {
        let message = self.validate()?;
        let uri = message.mailto(to);
        self.reset();
        Ok(uri)
    }

    pub fn reset(&mut self) {
        for field in Field::ALL {
            self.field_mut(field).clear();
        }
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.field(*f).value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.name.set("Ada Lovelace");
        form.email.set("ada@example.org");
        form.subject.set("Hello & welcome?");
        form.message.set("Line one\nLine two");
        form
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@sub.domain.io"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("@c.d"));
    }

    #[test]
    fn test_missing_fields_reported() {
        let err = ContactMessage::new("  ", "a@b.co", "", "hi").unwrap_err();
        assert_eq!(
            err,
            FormError::MissingFields(vec![Field::Name, Field::Subject])
        );
        assert_eq!(err.to_string(), "Please fill in all fields");
    }

    #[test]
    fn test_missing_checked_before_email() {
        let err = ContactMessage::new("", "nope", "s", "m").unwrap_err();
        assert!(matches!(err, FormError::MissingFields(_)));
    }

    #[test]
    fn test_invalid_email_keeps_values() {
        let mut form = filled();
        form.email.set("not-an-email");
        let err = form.submit("me@site.dev").unwrap_err();
        assert_eq!(err, FormError::InvalidEmail);
        assert_eq!(form.name.value, "Ada Lovelace");
        assert_eq!(form.email.value, "not-an-email");
    }

    #[test]
    fn test_mailto_template_and_encoding() {
        let mut form = filled();
        let uri = form.submit("me@site.dev").unwrap();

        assert_eq!(
            uri,
            "mailto:me@site.dev?subject=Hello%20%26%20welcome%3F\
             &body=Name%3A%20Ada%20Lovelace%0AEmail%3A%20ada%40example.org%0A%0A\
             Message%3A%0ALine%20one%0ALine%20two"
        );
        assert!(form.is_empty());
    }

    #[test]
    fn test_body_is_trimmed() {
        let msg = ContactMessage::new(" Ada ", " ada@x.io ", " Hi ", "\n text \n").unwrap();
        assert_eq!(msg.body(), "Name: Ada\nEmail: ada@x.io\n\nMessage:\ntext");
        assert_eq!(msg.subject, "Hi");
    }

    #[test]
    fn test_focus_cycle() {
        let mut form = ContactForm::new();
        assert_eq!(form.focus(), None);
        form.focus_next();
        assert_eq!(form.focus(), Some(Field::Name));
        form.focus_prev();
        assert_eq!(form.focus(), Some(Field::Message));
        form.focus_next();
        assert_eq!(form.focus(), Some(Field::Name));
    }

    #[test]
    fn test_text_input_unicode_editing() {
        let mut input = TextInput::default();
        for c in "héllo".chars() {
            input.insert(c);
        }
        input.left();
        input.left();
        input.backspace();
        assert_eq!(input.value, "hélo");
        assert_eq!(input.split(), ("hé", "lo"));
        input.home();
        input.delete();
        assert_eq!(input.value, "élo");
        input.end();
        assert_eq!(input.cursor, 3);
    }
}
