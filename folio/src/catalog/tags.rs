// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::collections::BTreeSet;

use super::ContentItem;

/// Every distinct tag label in the collection, in ascending order.
pub fn tag_index(items: &[ContentItem]) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| item.tags.iter())
        .cloned()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// Splits a comma separated tag list, keeping the first occurrence of each label.
pub fn parse_tag_list(value: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for raw in value.split(',') {
        let trimmed = raw.trim();
        if trimmed.is_empty() || tags.iter().any(|tag| tag == trimmed) {
            continue;
        }
        tags.push(trimmed.to_string());
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(id: &str, tags: &[&str]) -> ContentItem {
        ContentItem {
            id: id.to_string(),
            title: format!("Project {}", id),
            description: String::new(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            live_url: None,
            github_url: None,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn index_is_sorted_and_distinct() {
        let items = vec![
            item("1", &["React", "Vite"]),
            item("2", &["React", "Docker"]),
            item("3", &["FastAPI"]),
        ];
        assert_eq!(
            tag_index(&items),
            vec!["Docker", "FastAPI", "React", "Vite"]
        );
    }

    #[test]
    fn index_ignores_item_order() {
        let forward = vec![item("1", &["Zod", "React"]), item("2", &["Go"])];
        let reversed = vec![item("2", &["Go"]), item("1", &["Zod", "React"])];
        assert_eq!(tag_index(&forward), tag_index(&reversed));
    }

    #[test]
    fn index_of_empty_catalog_is_empty() {
        assert!(tag_index(&[]).is_empty());
        assert!(tag_index(&[item("1", &[])]).is_empty());
    }

    #[test]
    fn parse_tag_list_trims_and_dedupes() {
        assert_eq!(
            parse_tag_list(" React ,Tailwind CSS,, React,Zod "),
            vec!["React", "Tailwind CSS", "Zod"]
        );
        assert!(parse_tag_list(" , ,").is_empty());
    }
}
