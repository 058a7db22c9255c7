// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Project catalog records and the pure derivations over them.
//!
//! Items are created by the admin flow and read back from the record store;
//! nothing in this module mutates a stored item. The tag index and the
//! filtered view are recomputed from the full collection whenever it changes.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::security::{ValidationError, require_field};

pub mod filter;
pub mod tags;

pub use filter::{CatalogPage, CatalogSnapshot, FilterState, filter_items};
pub use tags::{parse_tag_list, tag_index};

/// A showcased project as stored in the `content_items` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(deserialize_with = "deserialize_record_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_nullable_tags")]
    pub tags: Vec<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub live_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub github_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a catalog item. Id and timestamp are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContentItem {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Contents of the admin "add project" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentDraft {
    pub title: String,
    pub description: String,
    /// Comma separated tag labels.
    pub tags: String,
    pub live_url: String,
    pub github_url: String,
    pub image_url: String,
}

impl ContentDraft {
    /// Checks the required fields and builds the insert payload.
    ///
    /// Title and description must be non-blank. Blank references become
    /// absent, and the tag text is split into distinct labels.
    pub fn validate(&self) -> Result<NewContentItem, ValidationError> {
        let title = require_field("title", &self.title)?;
        let description = require_field("description", &self.description)?;

        Ok(NewContentItem {
            title,
            description,
            tags: parse_tag_list(&self.tags),
            live_url: optional_reference(&self.live_url),
            github_url: optional_reference(&self.github_url),
            image_url: optional_reference(&self.image_url),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn optional_reference(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Record ids arrive as uuid strings or as integers depending on the table schema.
pub(crate) fn deserialize_record_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct RecordIdVisitor;

    impl<'de> Visitor<'de> for RecordIdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a string or integer record id")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(RecordIdVisitor)
}

fn deserialize_nullable_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn deserialize_blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.trim().is_empty()))
}
