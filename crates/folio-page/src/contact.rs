//! Contact form
//!
//! Client-side validation and a simulated submission: the submit button
//! shows a sending state for a fixed delay, then the form resets.

use std::sync::LazyLock;

use folio_dom::{DomTree, NodeId};
use folio_runtime::{EventLoop, TaskHandle};
use regex::Regex;

use crate::bindings::PageBindings;
use crate::config::ContactConfig;
use crate::error::SetupError;

static EMAIL_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

/// Named controls read on submit
pub const FIELD_NAMES: [&str; 4] = ["name", "email", "subject", "message"];

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_ok_and(|re| re.is_match(email))
}

/// Field values of one submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Validation verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Valid,
    MissingFields,
    InvalidEmail,
}

impl ContactSubmission {
    /// Empty fields are reported before a malformed email
    pub fn validate(&self) -> Validation {
        let fields = [&self.name, &self.email, &self.subject, &self.message];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Validation::MissingFields;
        }
        if !is_valid_email(self.email.trim()) {
            return Validation::InvalidEmail;
        }
        Validation::Valid
    }
}

/// What a submit did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission is already in flight
    Ignored,
    /// Validation failed; the message explains why
    Rejected(String),
    /// Sending state entered; completion is scheduled
    Sending,
}

#[derive(Debug)]
pub struct ContactForm {
    form: NodeId,
    fields: Vec<(&'static str, NodeId)>,
    button: Option<NodeId>,
    saved_label: Vec<NodeId>,
    submitting: bool,
    handle: Option<TaskHandle>,
    config: ContactConfig,
}

impl ContactForm {
    pub fn setup(tree: &DomTree, bindings: &PageBindings, config: &ContactConfig) -> Result<Self, SetupError> {
        let form = bindings.contact_form.ok_or(SetupError::MissingElement("contact form"))?;

        let controls = tree.descendants(form);
        let fields = FIELD_NAMES
            .iter()
            .filter_map(|&name| {
                let found = controls.iter().copied().find(|&c| tree.attr(c, "name") == Some(name));
                if found.is_none() {
                    tracing::debug!("Contact form has no `{}` control", name);
                }
                found.map(|c| (name, c))
            })
            .collect();

        Ok(Self {
            form,
            fields,
            button: bindings.submit_button,
            saved_label: Vec::new(),
            submitting: false,
            handle: None,
            config: config.clone(),
        })
    }

    pub fn form(&self) -> NodeId {
        self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Current field values; a missing control reads as empty
    pub fn read(&self, tree: &DomTree) -> ContactSubmission {
        let value = |name: &str| {
            self.fields
                .iter()
                .find(|(n, _)| *n == name)
                .map(|&(_, node)| tree.control_value(node))
                .unwrap_or_default()
        };
        ContactSubmission {
            name: value("name"),
            email: value("email"),
            subject: value("subject"),
            message: value("message"),
        }
    }

    /// Validate and, if valid, enter the sending state
    pub fn submit<J: Clone>(&mut self, tree: &mut DomTree, event_loop: &mut EventLoop<J>, job: J) -> SubmitOutcome {
        if self.submitting {
            tracing::debug!("Submit ignored while sending");
            return SubmitOutcome::Ignored;
        }

        match self.read(tree).validate() {
            Validation::MissingFields => return SubmitOutcome::Rejected(self.config.missing_fields_message.clone()),
            Validation::InvalidEmail => return SubmitOutcome::Rejected(self.config.invalid_email_message.clone()),
            Validation::Valid => {}
        }

        self.submitting = true;
        if let Some(button) = self.button {
            self.show_sending(tree, button);
        }
        self.handle = Some(event_loop.set_timeout(job, self.config.submit_delay_ms));
        tracing::debug!("Contact form sending");
        SubmitOutcome::Sending
    }

    fn show_sending(&mut self, tree: &mut DomTree, button: NodeId) {
        self.saved_label = tree.children(button).map(|(c, _)| c).collect();
        tree.clear_children(button);

        let label = tree.create_element("span");
        tree.add_class(label, "btn-text");
        tree.set_text_content(label, &self.config.sending_label);
        let spinner = tree.create_element("i");
        tree.set_attr(spinner, "class", "fas fa-spinner fa-spin");
        tree.append_child(button, label);
        tree.append_child(button, spinner);

        if let Some(el) = tree.element_mut(button) {
            el.set_disabled(true);
        }
    }

    /// Finish the simulated send: reset the form and restore the button
    ///
    /// Returns the success message, or `None` if nothing was in flight.
    pub fn complete(&mut self, tree: &mut DomTree) -> Option<String> {
        if !self.submitting {
            return None;
        }
        self.handle = None;

        for &(_, control) in &self.fields {
            tree.reset_control(control);
        }
        if let Some(button) = self.button {
            tree.clear_children(button);
            for child in std::mem::take(&mut self.saved_label) {
                tree.append_child(button, child);
            }
            if let Some(el) = tree.element_mut(button) {
                el.set_disabled(false);
            }
        }
        self.submitting = false;
        Some(self.config.success_message.clone())
    }

    /// Abandon an in-flight send
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_dom::Document;

    fn submission(name: &str, email: &str, subject: &str, message: &str) -> ContactSubmission {
        ContactSubmission {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("a.b@c.d.e"));
        assert!(!is_valid_email("bad@"));
        assert!(!is_valid_email("no-at.example.com"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@b"));
    }

    #[test]
    fn test_validation_order() {
        assert_eq!(submission("Ana", "bad@", "Hi", "Hello").validate(), Validation::InvalidEmail);
        assert_eq!(submission("Ana", "bad@", "", "Hello").validate(), Validation::MissingFields);
        assert_eq!(submission("  ", "a@b.co", "Hi", "Hello").validate(), Validation::MissingFields);
        assert_eq!(submission("Ana", " a@b.co ", "Hi", "Hello").validate(), Validation::Valid);
    }

    struct Fixture {
        doc: Document,
        form: ContactForm,
        button: NodeId,
        label: NodeId,
        email: NodeId,
    }

    fn fixture() -> Fixture {
        let mut doc = Document::new("about:blank");
        let body = doc.body();
        let tree = doc.tree_mut();
        let form = tree.create_element("form");
        tree.append_child(body, form);

        let mut email = NodeId::NONE;
        for name in FIELD_NAMES {
            let control = tree.create_element(if name == "message" { "textarea" } else { "input" });
            tree.set_attr(control, "name", name);
            tree.append_child(form, control);
            if name == "email" {
                email = control;
            }
        }
        let button = tree.create_element("button");
        tree.set_attr(button, "type", "submit");
        let label = tree.create_text("Enviar");
        tree.append_child(button, label);
        tree.append_child(form, button);

        let bindings = PageBindings {
            contact_form: Some(form),
            submit_button: Some(button),
            ..PageBindings::default()
        };
        let form = ContactForm::setup(doc.tree(), &bindings, &ContactConfig::default()).unwrap();
        Fixture { doc, form, button, label, email }
    }

    fn fill(f: &mut Fixture, email: &str) {
        let values = [("name", "Ana"), ("email", email), ("subject", "Hola"), ("message", "Qué tal")];
        for (name, value) in values {
            let (_, node) = *f.form.fields.iter().find(|(n, _)| *n == name).unwrap();
            f.doc.tree_mut().set_control_value(node, value);
        }
    }

    #[test]
    fn test_rejects_leave_fields_untouched() {
        let mut f = fixture();
        let mut loop_ = EventLoop::new();
        fill(&mut f, "bad@");

        let outcome = f.form.submit(f.doc.tree_mut(), &mut loop_, ());
        assert_eq!(outcome, SubmitOutcome::Rejected(ContactConfig::default().invalid_email_message));
        assert_eq!(f.doc.tree().control_value(f.email), "bad@");
        assert!(!f.form.is_submitting());
        assert!(!loop_.has_pending_work());
    }

    #[test]
    fn test_send_and_restore() {
        let mut f = fixture();
        let mut loop_ = EventLoop::new();
        fill(&mut f, "ana@example.com");

        assert_eq!(f.form.submit(f.doc.tree_mut(), &mut loop_, ()), SubmitOutcome::Sending);
        let tree = f.doc.tree();
        assert!(tree.element(f.button).unwrap().is_disabled());
        assert_eq!(tree.text_content(f.button), "Enviando...");

        // Second submit while sending is ignored
        assert_eq!(f.form.submit(f.doc.tree_mut(), &mut loop_, ()), SubmitOutcome::Ignored);
        assert_eq!(loop_.pending(), 1);

        assert!(loop_.tick(1999).is_empty());
        assert_eq!(loop_.tick(1).len(), 1);
        let message = f.form.complete(f.doc.tree_mut()).unwrap();
        assert_eq!(message, ContactConfig::default().success_message);

        let tree = f.doc.tree();
        assert!(!tree.element(f.button).unwrap().is_disabled());
        assert_eq!(tree.children(f.button).map(|(c, _)| c).collect::<Vec<_>>(), vec![f.label]);
        assert_eq!(tree.control_value(f.email), "");
        assert!(!f.form.is_submitting());
        assert_eq!(f.form.complete(f.doc.tree_mut()), None);
    }

    #[test]
    fn test_missing_form() {
        let doc = Document::new("about:blank");
        let err = ContactForm::setup(doc.tree(), &PageBindings::default(), &ContactConfig::default()).unwrap_err();
        assert_eq!(err, SetupError::MissingElement("contact form"));
    }
}
