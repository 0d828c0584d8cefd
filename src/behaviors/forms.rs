//! Client-side form validation and the simulated submission.
//!
//! Every submit is intercepted. Fields are checked in document order and
//! each failure gets an inline message right after the field. A clean pass
//! shows a spinner on the submit button and, after a short delay, sends the
//! visitor to the confirmation page. Nothing is posted anywhere.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use regex::Regex;

use crate::behavior::{Attach, Behavior, Ctx};
use crate::config::{FormConfig, FormMessages, selector};
use crate::consts::MIN_MESSAGE_CHARS;
use crate::error::ConfigError;
use crate::event::{EventKind, PageEvent};
use crate::page::{NodeId, Page, Target};
use crate::selector::Selector;
use crate::timers::{Schedule, TimerId};

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const PHONE_PATTERN: &str = r"^[0-9\s+\-()]{10,20}$";
const NAME_PATTERN: &str = r"^[a-zA-ZА-Яа-яЁёÀ-ÿ\s\-']{2,50}$";

const ERROR_CLASS: &str = "is-invalid";
const FEEDBACK_CLASS: &str = "invalid-feedback";
const ERROR_COLOR: &str = "var(--color-error)";
const SPIN_MARKER: &str = "data-spin";
const SPIN_KEYFRAMES: &str = "@keyframes spin { to { transform: rotate(360deg); } }";

const SPINNER_STYLE: [(&str, &str); 8] = [
    ("display", "inline-block"),
    ("width", "16px"),
    ("height", "16px"),
    ("border", "2px solid currentColor"),
    ("border-top-color", "transparent"),
    ("border-radius", "50%"),
    ("animation", "spin 0.6s linear infinite"),
    ("margin-right", "8px"),
];

/// The rule a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Required,
    Email,
    Phone,
    Name,
    Message,
}

impl Failure {
    #[must_use]
    pub fn message(self, messages: &FormMessages) -> &str {
        match self {
            Self::Required => &messages.required,
            Self::Email => &messages.email,
            Self::Phone => &messages.phone,
            Self::Name => &messages.name,
            Self::Message => &messages.message,
        }
    }
}

/// The parts of a form control the rules look at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub tag: String,
    pub kind: String,
    pub name: String,
    pub value: String,
    pub required: bool,
}

impl FieldState {
    #[must_use]
    pub fn read(page: &dyn Page, field: NodeId) -> Self {
        Self {
            tag: page.tag(field),
            kind: page.input_type(field),
            name: page.attr(field, "name").unwrap_or_default(),
            value: page.value(field),
            required: page.has_attr(field, "required"),
        }
    }
}

/// Compiled field rules.
#[derive(Debug, Clone)]
pub struct Rules {
    email: Regex,
    phone: Regex,
    name: Regex,
}

impl Rules {
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] if a pattern fails to compile.
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self { email: Regex::new(EMAIL_PATTERN)?, phone: Regex::new(PHONE_PATTERN)?, name: Regex::new(NAME_PATTERN)? })
    }

    /// The first applicable rule decides: a required-but-blank field fails
    /// `Required`; otherwise the first of email, phone, name or message
    /// whose conditions hold is the only one checked.
    #[must_use]
    pub fn check(&self, field: &FieldState) -> Option<Failure> {
        let value = field.value.as_str();
        if field.required && value.trim().is_empty() {
            return Some(Failure::Required);
        }
        if value.is_empty() {
            return None;
        }
        let (pattern, failure) = if field.kind == "email" {
            (&self.email, Failure::Email)
        } else if field.kind == "tel" {
            (&self.phone, Failure::Phone)
        } else if field.name.to_lowercase().contains("name") {
            (&self.name, Failure::Name)
        } else if field.tag == "textarea" {
            return (value.chars().count() < MIN_MESSAGE_CHARS).then_some(Failure::Message);
        } else {
            return None;
        };
        (!pattern.is_match(value)).then_some(failure)
    }
}

/// A form waiting for its redirect.
#[derive(Debug)]
struct Pending {
    form: NodeId,
    timer: TimerId,
    button: Option<NodeId>,
    label: String,
}

pub struct FormValidator {
    forms_sel: Selector,
    fields_sel: Selector,
    submit_sel: Selector,
    feedback_sel: Selector,
    invalid_sel: Selector,
    redirect_to: String,
    redirect_delay_ms: u64,
    messages: FormMessages,
    rules: Rules,
    forms: Vec<NodeId>,
    pending: Vec<Pending>,
}

impl FormValidator {
    /// # Errors
    ///
    /// Returns [`ConfigError::Selector`] for an unparseable selector.
    pub fn from_config(config: &FormConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            forms_sel: selector("forms.forms", &config.forms)?,
            fields_sel: selector("forms.fields", &config.fields)?,
            submit_sel: selector("forms.submit", &config.submit)?,
            feedback_sel: selector("forms.feedback", &format!(".{FEEDBACK_CLASS}"))?,
            invalid_sel: selector("forms.invalid", &format!(".{ERROR_CLASS}"))?,
            redirect_to: config.redirect_to.clone(),
            redirect_delay_ms: config.redirect_delay_ms,
            messages: config.messages.clone(),
            rules: Rules::new()?,
            forms: Vec::new(),
            pending: Vec::new(),
        })
    }

    fn clear_errors(&self, page: &mut dyn Page, form: NodeId) {
        for feedback in page.query_within(form, &self.feedback_sel) {
            page.remove(feedback);
        }
        for field in page.query_within(form, &self.invalid_sel) {
            page.remove_class(field, ERROR_CLASS);
            page.set_style(field, "border-color", "");
        }
    }

    fn show_error(page: &mut dyn Page, field: NodeId, message: &str) {
        page.add_class(field, ERROR_CLASS);
        page.set_style(field, "border-color", ERROR_COLOR);

        let feedback = page.create_element("div");
        page.add_class(feedback, FEEDBACK_CLASS);
        page.set_text(feedback, message);
        page.set_style(feedback, "display", "block");
        page.set_style(feedback, "color", ERROR_COLOR);
        page.set_style(feedback, "font-size", "var(--font-size-sm)");
        page.set_style(feedback, "margin-top", "var(--space-xs)");
        page.insert_after(field, feedback);
    }

    /// Check every field, marking each failure. Returns whether all passed.
    fn validate(&self, page: &mut dyn Page, form: NodeId) -> bool {
        let mut valid = true;
        for field in page.query_within(form, &self.fields_sel) {
            let state = FieldState::read(page, field);
            if let Some(failure) = self.rules.check(&state) {
                Self::show_error(page, field, failure.message(&self.messages));
                valid = false;
            }
        }
        valid
    }

    fn submit(&mut self, page: &mut dyn Page, ctx: &mut Ctx<'_>, form: NodeId) {
        let button = page.query_within(form, &self.submit_sel).into_iter().next();
        let label = button.map(|b| page.text(b)).unwrap_or_default();
        if let Some(button) = button {
            page.set_disabled(button, true);
            page.set_text(button, "");
            let spinner = page.create_element("span");
            page.add_class(spinner, "spinner");
            for (property, value) in SPINNER_STYLE {
                page.set_style(spinner, property, value);
            }
            page.append_child(button, spinner);
            page.append_text(button, &self.messages.sending);
        }
        super::ensure_keyframes(page, SPIN_MARKER, SPIN_KEYFRAMES);

        let timer = ctx.set_timeout(self.redirect_delay_ms);
        self.pending.push(Pending { form, timer, button, label });
    }
}

impl Behavior for FormValidator {
    fn name(&self) -> &'static str {
        "forms"
    }

    fn attach(&mut self, page: &mut dyn Page, ctx: &mut Ctx<'_>) -> Attach {
        self.forms = page.query_all(&self.forms_sel);
        ctx.listen_all(&self.forms, EventKind::Submit);
        Attach::when(!self.forms.is_empty())
    }

    fn on_event(&mut self, current: Target, event: &PageEvent, page: &mut dyn Page, ctx: &mut Ctx<'_>) {
        let (Target::Node(form), PageEvent::Submit { .. }) = (current, event) else {
            return;
        };
        ctx.prevent_default();
        if self.pending.iter().any(|p| p.form == form) {
            log::debug!("forms: submit ignored, redirect already pending");
            return;
        }
        self.clear_errors(page, form);
        if self.validate(page, form) {
            self.submit(page, ctx, form);
        }
    }

    fn on_timer(&mut self, id: TimerId, page: &mut dyn Page, _ctx: &mut Ctx<'_>) {
        let Some(index) = self.pending.iter().position(|p| p.timer == id) else {
            return;
        };
        let done = self.pending.swap_remove(index);
        if let Some(button) = done.button {
            page.set_disabled(button, false);
            page.set_text(button, &done.label);
        }
        page.navigate(&self.redirect_to);
    }
}
