// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct PasswordLoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub return_path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginSuccessResponse {
    pub return_path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginErrorResponse {
    pub code: String,
    pub message: String,
}
