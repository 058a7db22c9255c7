// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{ContentItem, tag_index};

/// Free-text query plus the set of selected tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub query: String,
    pub selected_tags: BTreeSet<String>,
}

impl FilterState {
    pub fn new<I, T>(query: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            query: query.into(),
            selected_tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Adds the tag if absent, removes it otherwise. Returns whether it is now selected.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if self.selected_tags.remove(tag) {
            false
        } else {
            self.selected_tags.insert(tag.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.selected_tags.clear();
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || !self.selected_tags.is_empty()
    }
}

struct Matcher<'a> {
    needle: Option<String>,
    tags: &'a BTreeSet<String>,
}

impl<'a> Matcher<'a> {
    fn new(state: &'a FilterState) -> Self {
        let needle = if state.query.is_empty() {
            None
        } else {
            Some(state.query.to_lowercase())
        };
        Self {
            needle,
            tags: &state.selected_tags,
        }
    }

    fn matches(&self, item: &ContentItem) -> bool {
        self.text_matches(item) && self.tag_matches(item)
    }

    fn text_matches(&self, item: &ContentItem) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => {
                item.title.to_lowercase().contains(needle.as_str())
                    || item.description.to_lowercase().contains(needle.as_str())
            }
        }
    }

    // Any selected tag is enough: more tags widen the match.
    fn tag_matches(&self, item: &ContentItem) -> bool {
        self.tags.is_empty() || item.tags.iter().any(|tag| self.tags.contains(tag))
    }
}

/// Items matching both the text query and the tag selection, in source order.
pub fn filter_items<'a>(items: &'a [ContentItem], state: &FilterState) -> Vec<&'a ContentItem> {
    let matcher = Matcher::new(state);
    items.iter().filter(|item| matcher.matches(item)).collect()
}

/// A catalog collection together with its tag index.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    items: Vec<ContentItem>,
    tags: Vec<String>,
}

/// What the public catalog view renders for one filter state.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage {
    pub items: Vec<ContentItem>,
    pub tags: Vec<String>,
    pub found: usize,
    pub total: usize,
    pub filters_active: bool,
}

impl CatalogSnapshot {
    pub fn new(items: Vec<ContentItem>) -> Self {
        let tags = tag_index(&items);
        Self { items, tags }
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn replace(&mut self, items: Vec<ContentItem>) {
        *self = Self::new(items);
    }

    pub fn query(&self, state: &FilterState) -> CatalogPage {
        let visible: Vec<ContentItem> = filter_items(&self.items, state)
            .into_iter()
            .cloned()
            .collect();
        CatalogPage {
            found: visible.len(),
            total: self.items.len(),
            items: visible,
            tags: self.tags.clone(),
            filters_active: state.is_active(),
        }
    }
}
