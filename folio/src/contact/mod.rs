// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Visitor contact messages: the public form and its submission pipeline.

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::catalog::deserialize_record_id;
use crate::feedback::Notice;
use crate::security::{ValidationError, require_field, validate_email_field};
use crate::store::{Access, RecordStore, StoreError};

/// A submitted message as stored in the `contact_messages` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(deserialize_with = "deserialize_record_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn validate(&self) -> Result<NewContactMessage, ValidationError> {
        Ok(NewContactMessage {
            name: require_field("name", &self.name)?,
            email: validate_email_field(&self.email)?,
            message: require_field("message", &self.message)?,
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Sent,
    Invalid(ValidationError),
    Failed(StoreError),
}

/// Form state plus the notices produced by submitting it.
#[derive(Debug, Default)]
pub struct ContactPipeline {
    form: ContactForm,
    notices: Vec<Notice>,
}

impl ContactPipeline {
    pub fn new(form: ContactForm) -> Self {
        Self {
            form,
            notices: Vec::new(),
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Adds an error notice without attempting a submission.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.notices.push(Notice::error(message));
    }

    /// Validates the form and performs exactly one insert.
    ///
    /// The form is cleared only when the store accepts the message.
    pub async fn submit(&mut self, store: &dyn RecordStore) -> SubmitOutcome {
        let message = match self.form.validate() {
            Ok(message) => message,
            Err(err) => {
                self.notices.push(Notice::error(err.to_string()));
                return SubmitOutcome::Invalid(err);
            }
        };

        match store
            .insert_contact_message(&Access::Anonymous, &message)
            .await
        {
            Ok(()) => {
                info!("Contact message stored for {}", message.email);
                self.notices.push(Notice::success("Message sent successfully!"));
                self.form.clear();
                SubmitOutcome::Sent
            }
            Err(err) => {
                warn!("Contact message rejected by store: {}", err);
                self.notices.push(Notice::error(format!(
                    "Failed to send message: {}",
                    err.message()
                )));
                SubmitOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::NoticeLevel;
    use crate::store::{MemoryStore, StoreErrorKind};

    fn valid_form() -> ContactForm {
        ContactForm::new("Ada", "ada@example.com", "Let's build something")
    }

    #[actix_web::test]
    async fn valid_submission_inserts_once_and_resets_fields() {
        let store = MemoryStore::new();
        let mut pipeline = ContactPipeline::new(valid_form());

        let outcome = pipeline.submit(&store).await;

        assert!(matches!(outcome, SubmitOutcome::Sent));
        assert_eq!(store.calls().insert_contact_message, 1);
        assert!(pipeline.form().is_empty());
        assert_eq!(
            pipeline.notices(),
            [Notice::success("Message sent successfully!")]
        );
        let stored = store
            .list_contact_messages(&Access::bearer("admin-token"))
            .await
            .expect("list");
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].email, "ada@example.com");
    }

    #[actix_web::test]
    async fn empty_field_is_rejected_without_store_call() {
        let store = MemoryStore::new();
        for form in [
            ContactForm::new("", "ada@example.com", "hi"),
            ContactForm::new("Ada", "", "hi"),
            ContactForm::new("Ada", "ada@example.com", "  "),
        ] {
            let mut pipeline = ContactPipeline::new(form.clone());
            let outcome = pipeline.submit(&store).await;
            assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
            assert_eq!(pipeline.form(), &form);
        }
        assert_eq!(store.calls().insert_contact_message, 0);
    }

    #[actix_web::test]
    async fn store_failure_keeps_fields_and_reports_reason() {
        let store = MemoryStore::new();
        store.fail_with(StoreErrorKind::Rejected, "permission denied for table contacts");
        let mut pipeline = ContactPipeline::new(valid_form());

        let outcome = pipeline.submit(&store).await;

        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(store.calls().insert_contact_message, 1);
        assert_eq!(pipeline.form(), &valid_form());
        let notices = pipeline.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(
            notices[0].message,
            "Failed to send message: permission denied for table contacts"
        );
        assert!(pipeline.notices().is_empty());
    }

    #[actix_web::test]
    async fn long_message_is_accepted() {
        let store = MemoryStore::new();
        let mut pipeline =
            ContactPipeline::new(ContactForm::new("Ada", "ada@example.com", "x".repeat(5_001)));

        let outcome = pipeline.submit(&store).await;

        assert!(matches!(outcome, SubmitOutcome::Sent));
        assert_eq!(store.calls().insert_contact_message, 1);
    }

    #[test]
    fn malformed_email_is_invalid() {
        let form = ContactForm::new("Ada", "ada-at-example", "hi");
        assert_eq!(form.validate().unwrap_err().field(), "email");
    }
}
