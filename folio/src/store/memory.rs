// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

use super::{Access, RecordStore, StoreError, StoreErrorKind};
use crate::catalog::{ContentItem, NewContentItem};
use crate::contact::{ContactMessage, NewContactMessage};

/// Number of calls made per operation, failed ones included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCalls {
    pub list_content_items: usize,
    pub insert_content_item: usize,
    pub list_contact_messages: usize,
    pub insert_contact_message: usize,
}

impl StoreCalls {
    pub fn total(&self) -> usize {
        self.list_content_items
            + self.insert_content_item
            + self.list_contact_messages
            + self.insert_contact_message
    }
}

#[derive(Default)]
struct CallCounters {
    list_content_items: AtomicUsize,
    insert_content_item: AtomicUsize,
    list_contact_messages: AtomicUsize,
    insert_contact_message: AtomicUsize,
}

impl CallCounters {
    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> StoreCalls {
        StoreCalls {
            list_content_items: self.list_content_items.load(Ordering::Relaxed),
            insert_content_item: self.insert_content_item.load(Ordering::Relaxed),
            list_contact_messages: self.list_contact_messages.load(Ordering::Relaxed),
            insert_contact_message: self.insert_contact_message.load(Ordering::Relaxed),
        }
    }
}

#[derive(Default)]
struct Tables {
    // (insert sequence, record)
    items: Vec<(u64, ContentItem)>,
    messages: Vec<(u64, ContactMessage)>,
    next_seq: u64,
    failure: Option<StoreError>,
    revoked: HashSet<String>,
}

impl Tables {
    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

/// In-process record store.
///
/// Behaves like the hosted store with row level security enabled: anyone
/// may read catalog items and send contact messages, while creating items
/// and reading messages needs a bearer token that has not been revoked.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    calls: CallCounters,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<ContentItem>) -> Self {
        let store = Self::new();
        for item in items {
            store.seed_item(item);
        }
        store
    }

    pub fn seed_item(&self, item: ContentItem) {
        if let Ok(mut tables) = self.tables.write() {
            let seq = tables.next_seq();
            tables.items.push((seq, item));
        }
    }

    pub fn seed_message(&self, message: ContactMessage) {
        if let Ok(mut tables) = self.tables.write() {
            let seq = tables.next_seq();
            tables.messages.push((seq, message));
        }
    }

    /// Every following call fails with this error until [`MemoryStore::recover`].
    pub fn fail_with(&self, kind: StoreErrorKind, message: &str) {
        if let Ok(mut tables) = self.tables.write() {
            tables.failure = Some(StoreError::new(kind, message));
        }
    }

    pub fn recover(&self) {
        if let Ok(mut tables) = self.tables.write() {
            tables.failure = None;
        }
    }

    /// Treats the token as expired from now on.
    pub fn revoke_token(&self, token: &str) {
        if let Ok(mut tables) = self.tables.write() {
            tables.revoked.insert(token.to_string());
        }
    }

    pub fn calls(&self) -> StoreCalls {
        self.calls.snapshot()
    }

    fn read_tables(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|_| StoreError::unavailable("memory store lock poisoned"))
    }

    fn write_tables(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|_| StoreError::unavailable("memory store lock poisoned"))
    }

    fn check_failure(tables: &Tables) -> Result<(), StoreError> {
        match &tables.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn require_session(tables: &Tables, access: &Access) -> Result<(), StoreError> {
        match access {
            Access::Anonymous => Err(StoreError::unauthorized(
                "new row violates row-level security policy",
            )),
            Access::Bearer(token) if tables.revoked.contains(token) => {
                Err(StoreError::unauthorized("JWT expired"))
            }
            Access::Bearer(_) => Ok(()),
        }
    }
}

fn newest_first<T: Clone>(rows: &[(u64, T)], created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut sorted: Vec<&(u64, T)> = rows.iter().collect();
    sorted.sort_by(|(seq_a, a), (seq_b, b)| {
        created_at(b)
            .cmp(&created_at(a))
            .then_with(|| seq_b.cmp(seq_a))
    });
    sorted.into_iter().map(|(_, row)| row.clone()).collect()
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_content_items(&self, access: &Access) -> Result<Vec<ContentItem>, StoreError> {
        CallCounters::bump(&self.calls.list_content_items);
        let tables = self.read_tables()?;
        Self::check_failure(&tables)?;
        if let Access::Bearer(token) = access
            && tables.revoked.contains(token)
        {
            return Err(StoreError::unauthorized("JWT expired"));
        }
        Ok(newest_first(&tables.items, |item| item.created_at))
    }

    async fn insert_content_item(
        &self,
        access: &Access,
        item: &NewContentItem,
    ) -> Result<(), StoreError> {
        CallCounters::bump(&self.calls.insert_content_item);
        let mut tables = self.write_tables()?;
        Self::check_failure(&tables)?;
        Self::require_session(&tables, access)?;
        let seq = tables.next_seq();
        tables.items.push((
            seq,
            ContentItem {
                id: Uuid::new_v4().to_string(),
                title: item.title.clone(),
                description: item.description.clone(),
                tags: item.tags.clone(),
                live_url: item.live_url.clone(),
                github_url: item.github_url.clone(),
                image_url: item.image_url.clone(),
                created_at: Utc::now(),
            },
        ));
        Ok(())
    }

    async fn list_contact_messages(
        &self,
        access: &Access,
    ) -> Result<Vec<ContactMessage>, StoreError> {
        CallCounters::bump(&self.calls.list_contact_messages);
        let tables = self.read_tables()?;
        Self::check_failure(&tables)?;
        Self::require_session(&tables, access)?;
        Ok(newest_first(&tables.messages, |message| message.created_at))
    }

    async fn insert_contact_message(
        &self,
        _access: &Access,
        message: &NewContactMessage,
    ) -> Result<(), StoreError> {
        CallCounters::bump(&self.calls.insert_contact_message);
        let mut tables = self.write_tables()?;
        Self::check_failure(&tables)?;
        let seq = tables.next_seq();
        tables.messages.push((
            seq,
            ContactMessage {
                id: Uuid::new_v4().to_string(),
                name: message.name.clone(),
                email: message.email.clone(),
                message: message.message.clone(),
                created_at: Utc::now(),
            },
        ));
        Ok(())
    }
}
