// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod client_ip;
mod return_path;
mod throttle;
mod validation;

pub use client_ip::extract_client_ip;
pub use return_path::sanitize_return_path;
pub use throttle::{SubmitThrottle, ThrottleError};
pub use validation::{ValidationError, require_field, validate_email_field};
