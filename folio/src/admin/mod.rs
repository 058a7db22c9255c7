// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod flow;
pub mod gate;
mod handlers;
pub mod middleware;

pub use flow::{ContentManager, CreateOutcome, LoadReport};
pub use gate::{GateDecision, check_entry, login_redirect};
pub use handlers::configure;
