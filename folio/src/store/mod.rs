// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Record store collaborator.
//!
//! Two collections live behind this trait: catalog items and contact
//! messages. Both support list (newest first) and insert only. Admin calls
//! carry the caller's session token; public calls go out anonymously.

use async_trait::async_trait;

use crate::catalog::{ContentItem, NewContentItem};
use crate::contact::{ContactMessage, NewContactMessage};

mod memory;
mod rest;

pub use memory::{MemoryStore, StoreCalls};
pub use rest::RestStore;

/// Credentials attached to a store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Anonymous,
    Bearer(String),
}

impl Access {
    pub fn bearer(token: impl Into<String>) -> Self {
        Access::Bearer(token.into())
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Access::Anonymous => None,
            Access::Bearer(token) => Some(token.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The caller's credentials were refused (expired or missing session).
    Unauthorized,
    /// The store understood the request and refused it.
    Rejected,
    /// Transport failure, timeout or a 5xx answer.
    Unavailable,
    /// The answer could not be decoded into records.
    Decode,
}

impl StoreErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreErrorKind::Unauthorized => "unauthorized",
            StoreErrorKind::Rejected => "rejected",
            StoreErrorKind::Unavailable => "unavailable",
            StoreErrorKind::Decode => "decode",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    kind: StoreErrorKind,
    message: String,
}

impl StoreError {
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Unauthorized, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Rejected, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Unavailable, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Decode, message)
    }

    pub fn kind(&self) -> StoreErrorKind {
        self.kind
    }

    /// Reason text as reported by the store, shown to the user verbatim.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.kind.as_str())
    }
}

impl std::error::Error for StoreError {}

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_content_items(&self, access: &Access) -> Result<Vec<ContentItem>, StoreError>;

    async fn insert_content_item(
        &self,
        access: &Access,
        item: &NewContentItem,
    ) -> Result<(), StoreError>;

    async fn list_contact_messages(
        &self,
        access: &Access,
    ) -> Result<Vec<ContactMessage>, StoreError>;

    async fn insert_contact_message(
        &self,
        access: &Access,
        message: &NewContactMessage,
    ) -> Result<(), StoreError>;
}
