// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Admin view state: the catalog list, the message list and the add-project draft.
//!
//! Every store call is made with the caller's access. A failed load leaves
//! the previous list in place and reports an error notice. A created item is
//! never added locally; the list is reloaded from the store instead.

use log::{info, warn};

use crate::catalog::{ContentDraft, ContentItem};
use crate::contact::ContactMessage;
use crate::feedback::Notice;
use crate::security::ValidationError;
use crate::store::{Access, RecordStore, StoreError};

pub const PROJECT_ADDED: &str = "Project added successfully!";

#[derive(Debug)]
pub enum CreateOutcome {
    /// `refreshed` is false when the follow-up list reload failed.
    Created { refreshed: bool },
    Invalid(ValidationError),
    Failed(StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub items_loaded: bool,
    pub messages_loaded: bool,
}

#[derive(Debug, Default)]
pub struct ContentManager {
    items: Vec<ContentItem>,
    messages: Vec<ContactMessage>,
    draft: ContentDraft,
    notices: Vec<Notice>,
}

impl ContentManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_draft(draft: ContentDraft) -> Self {
        Self {
            draft,
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn messages(&self) -> &[ContactMessage] {
        &self.messages
    }

    pub fn draft(&self) -> &ContentDraft {
        &self.draft
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Loads both collections. A failure of one does not prevent the other.
    pub async fn initialize(&mut self, store: &dyn RecordStore, access: &Access) -> LoadReport {
        let items_loaded = self.refresh_items(store, access).await.is_ok();
        let messages_loaded = self.refresh_messages(store, access).await.is_ok();
        LoadReport {
            items_loaded,
            messages_loaded,
        }
    }

    pub async fn refresh_items(
        &mut self,
        store: &dyn RecordStore,
        access: &Access,
    ) -> Result<(), StoreError> {
        match store.list_content_items(access).await {
            Ok(items) => {
                self.items = items;
                Ok(())
            }
            Err(err) => {
                warn!("Loading projects failed: {}", err);
                self.notices.push(Notice::error(format!(
                    "Error fetching projects: {}",
                    err.message()
                )));
                Err(err)
            }
        }
    }

    pub async fn refresh_messages(
        &mut self,
        store: &dyn RecordStore,
        access: &Access,
    ) -> Result<(), StoreError> {
        match store.list_contact_messages(access).await {
            Ok(messages) => {
                self.messages = messages;
                Ok(())
            }
            Err(err) => {
                warn!("Loading messages failed: {}", err);
                self.notices.push(Notice::error(format!(
                    "Error fetching messages: {}",
                    err.message()
                )));
                Err(err)
            }
        }
    }

    /// Validates the draft, inserts it and reloads the catalog list.
    pub async fn create_item(&mut self, store: &dyn RecordStore, access: &Access) -> CreateOutcome {
        let new_item = match self.draft.validate() {
            Ok(item) => item,
            Err(err) => {
                self.notices.push(Notice::error(err.to_string()));
                return CreateOutcome::Invalid(err);
            }
        };

        if let Err(err) = store.insert_content_item(access, &new_item).await {
            warn!("Adding project '{}' failed: {}", new_item.title, err);
            self.notices.push(Notice::error(err.message()));
            return CreateOutcome::Failed(err);
        }

        info!("Project added: {}", new_item.title);
        self.notices.push(Notice::success(PROJECT_ADDED));
        self.draft.clear();
        let refreshed = self.refresh_items(store, access).await.is_ok();
        CreateOutcome::Created { refreshed }
    }
}
