// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

/// Accepts only local absolute paths, so a login link cannot bounce the
/// browser to another origin.
pub fn sanitize_return_path(raw_path: &str) -> Option<String> {
    let cleaned = raw_path.trim().replace(['\r', '\n'], "");
    if cleaned.is_empty() {
        return None;
    }
    if !cleaned.starts_with('/') || cleaned.starts_with("//") || cleaned.starts_with("/\\") {
        return None;
    }
    Some(cleaned)
}
