//! The contact form. Submitting validates, logs the message and shows a
//! short confirmation; nothing leaves the machine.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use chrono::Local;
use folio_core::{Scheduler, TickControl, TimerGuard};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

/// Longest accepted value per field, in characters.
const MAX_FIELD_LEN: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, Field::Subject)
    }

    fn index(self) -> usize {
        self as usize
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{} is required", .0.label())]
    Missing(Field),
    #[error("email address looks invalid")]
    InvalidEmail,
}

/// A validated message, as written to the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub submitted_at: String,
}

/// `local@domain` with both halves present and no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[derive(Debug)]
pub struct ContactForm {
    values: [String; 4],
    focus: Field,
    editing: bool,
    error: Option<FormError>,
    notice: Rc<Cell<bool>>,
    notice_guard: Option<TimerGuard>,
    confirmation: Duration,
}

impl ContactForm {
    /// `confirmation` is how long the sent notice stays up.
    pub fn new(confirmation: Duration) -> Self {
        Self {
            values: Default::default(),
            focus: Field::Name,
            editing: false,
            error: None,
            notice: Rc::new(Cell::new(false)),
            notice_guard: None,
            confirmation,
        }
    }

    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn error(&self) -> Option<FormError> {
        self.error
    }

    pub fn notice_visible(&self) -> bool {
        self.notice.get()
    }

    pub fn begin_edit(&mut self) {
        self.editing = true;
    }

    pub fn end_edit(&mut self) {
        self.editing = false;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn insert(&mut self, c: char) {
        let value = &mut self.values[self.focus.index()];
        if value.chars().count() < MAX_FIELD_LEN && !c.is_control() {
            value.push(c);
            self.error = None;
        }
    }

    pub fn backspace(&mut self) {
        self.values[self.focus.index()].pop();
    }

    /// Check every field and build the submission.
    pub fn validate(&self) -> Result<Submission, FormError> {
        for field in Field::ALL {
            if field.is_required() && self.value(field).trim().is_empty() {
                return Err(FormError::Missing(field));
            }
        }
        let email = self.value(Field::Email).trim();
        if !is_valid_email(email) {
            return Err(FormError::InvalidEmail);
        }
        Ok(Submission {
            name: self.value(Field::Name).trim().to_string(),
            email: email.to_string(),
            subject: self.value(Field::Subject).trim().to_string(),
            message: self.value(Field::Message).trim().to_string(),
            submitted_at: Local::now().to_rfc3339(),
        })
    }

    /// Validate and "send": log the message, clear the fields and show the
    /// confirmation until its timer runs out.
    pub fn submit(&mut self, scheduler: &dyn Scheduler) -> Result<Submission, FormError> {
        let submission = match self.validate() {
            Ok(s) => s,
            Err(err) => {
                self.error = Some(err);
                return Err(err);
            }
        };

        match serde_json::to_string(&submission) {
            Ok(json) => info!(submission = %json, "contact form submitted"),
            Err(err) => warn!(%err, "could not encode contact submission"),
        }

        self.values = Default::default();
        self.focus = Field::Name;
        self.editing = false;
        self.error = None;
        self.notice.set(true);

        let notice = Rc::clone(&self.notice);
        let token = scheduler.schedule(
            self.confirmation,
            Box::new(move || {
                notice.set(false);
                TickControl::Stop
            }),
        );
        // Replacing the guard cancels an older notice timer.
        self.notice_guard = Some(token.into_guard());
        Ok(submission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::FrameScheduler;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new(Duration::from_millis(4000));
        for (field, text) in [
            (Field::Name, "Ada"),
            (Field::Email, "ada@example.com"),
            (Field::Subject, ""),
            (Field::Message, "Hello there"),
        ] {
            while form.focus() != field {
                form.focus_next();
            }
            text.chars().for_each(|c| form.insert(c));
        }
        form
    }

    #[test]
    fn test_email_rule() {
        assert!(is_valid_email("a@b"));
        assert!(is_valid_email("first.last@example.org"));
        assert!(!is_valid_email("ab"));
        assert!(!is_valid_email("@b"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("a@b@c"));
        assert!(!is_valid_email("a b@c"));
    }

    #[test]
    fn test_required_fields() {
        let form = ContactForm::new(Duration::from_secs(1));
        assert_eq!(form.validate(), Err(FormError::Missing(Field::Name)));
        assert_eq!(
            FormError::Missing(Field::Message).to_string(),
            "Message is required"
        );

        let mut form = filled();
        form.focus = Field::Email;
        form.insert('@');
        assert_eq!(form.validate(), Err(FormError::InvalidEmail));
    }

    #[test]
    fn test_subject_is_optional() {
        let submission = filled().validate().unwrap();
        assert_eq!(submission.name, "Ada");
        assert_eq!(submission.subject, "");
    }

    #[test]
    fn test_submit_resets_and_notice_expires() {
        let scheduler = FrameScheduler::new();
        let mut form = filled();
        form.begin_edit();

        let submission = form.submit(&scheduler).unwrap();
        assert_eq!(submission.message, "Hello there");
        assert!(Field::ALL.iter().all(|f| form.value(*f).is_empty()));
        assert!(!form.is_editing());
        assert!(form.notice_visible());

        scheduler.advance(Duration::from_millis(3999));
        assert!(form.notice_visible());
        scheduler.advance(Duration::from_millis(1));
        assert!(!form.notice_visible());
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_failed_submit_keeps_values() {
        let scheduler = FrameScheduler::new();
        let mut form = ContactForm::new(Duration::from_secs(1));
        form.insert('x');
        assert!(form.submit(&scheduler).is_err());
        assert_eq!(form.value(Field::Name), "x");
        assert_eq!(form.error(), Some(FormError::Missing(Field::Email)));
        assert!(!form.notice_visible());
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_dropping_form_cancels_notice() {
        let scheduler = FrameScheduler::new();
        let mut form = filled();
        form.submit(&scheduler).unwrap();
        assert_eq!(scheduler.active_count(), 1);
        drop(form);
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = ContactForm::new(Duration::from_secs(1));
        form.focus_prev();
        assert_eq!(form.focus(), Field::Message);
        form.focus_next();
        assert_eq!(form.focus(), Field::Name);
    }
}
