//! Contact page and form submission.
//!
//! Messages are not delivered anywhere; the submission waits for the
//! simulated latency, logs the enquiry and shows a confirmation.

use aitoy_core::Email;
use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;

use crate::error::add_breadcrumb;
use crate::filters;
use crate::middleware::PageContext;
use crate::state::AppState;

/// Address shown on the contact page.
pub const CONTACT_EMAIL: &str = "hello@aitoy.com";

/// Contact form data.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// Check the form, returning the first problem found.
    fn validate(&self) -> Result<(), &'static str> {
        if [&self.name, &self.email, &self.subject, &self.message]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err("Please fill in all fields");
        }
        if Email::parse(self.email.trim()).is_err() {
            return Err("Please enter a valid email address");
        }
        Ok(())
    }
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub page: PageContext,
    pub form: ContactForm,
    pub error: Option<String>,
    pub sent: bool,
    pub contact_email: &'static str,
}

impl ContactTemplate {
    fn new(page: PageContext, form: ContactForm) -> Self {
        Self {
            page,
            form,
            error: None,
            sent: false,
            contact_email: CONTACT_EMAIL,
        }
    }
}

/// Display contact page.
#[instrument(skip(page))]
pub async fn show(page: PageContext) -> impl IntoResponse {
    ContactTemplate::new(page, ContactForm::default())
}

/// Handle contact form submission.
#[instrument(skip(state, page, form))]
pub async fn submit(
    State(state): State<AppState>,
    page: PageContext,
    Form(form): Form<ContactForm>,
) -> impl IntoResponse {
    if let Err(message) = form.validate() {
        tracing::debug!(reason = message, "contact form rejected");
        return ContactTemplate {
            error: Some(message.to_string()),
            ..ContactTemplate::new(page, form)
        };
    }

    let latency = state.config().simulated_latency;
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }

    tracing::info!(
        name = %form.name.trim(),
        subject = %form.subject.trim(),
        "contact message received"
    );
    add_breadcrumb("contact", "Contact form sent", None);

    ContactTemplate {
        sent: true,
        ..ContactTemplate::new(page, ContactForm::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Hello".to_string(),
            message: "Do the toys speak French?".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_form() {
        assert_eq!(filled().validate(), Ok(()));
    }

    #[test]
    fn test_validate_requires_every_field() {
        let form = ContactForm {
            subject: "  ".to_string(),
            ..filled()
        };
        assert_eq!(form.validate(), Err("Please fill in all fields"));
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let form = ContactForm {
            email: "not-an-email".to_string(),
            ..filled()
        };
        assert_eq!(form.validate(), Err("Please enter a valid email address"));
    }
}
