// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod admin;
pub mod api;
pub mod app_state;
pub mod auth;
pub mod bootstrap;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod feedback;
pub mod login;
pub mod remote;
pub mod security;
pub mod store;
pub mod util;
