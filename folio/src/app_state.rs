// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::sync::Arc;

use crate::auth::{AuthProvider, RestAuth};
use crate::config::ValidatedConfig;
use crate::remote::RemoteEndpoint;
use crate::security::SubmitThrottle;
use crate::store::{RecordStore, RestStore};

pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub auth: Arc<dyn AuthProvider>,
    pub contact_throttle: SubmitThrottle,
}

impl AppState {
    /// Must be called from within the runtime; the throttle spawns its task here.
    pub fn new(store: Arc<dyn RecordStore>, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            store,
            auth,
            contact_throttle: SubmitThrottle::new(),
        }
    }

    /// Store and auth provider talking to the configured backend.
    pub fn from_config(config: &ValidatedConfig) -> Result<Self, reqwest::Error> {
        let endpoint = RemoteEndpoint::new(
            &config.store.url,
            &config.store.api_key,
            config.store.timeout(),
        )?;
        let store = RestStore::new(
            endpoint.clone(),
            &config.store.items_table,
            &config.store.messages_table,
        );
        let auth = RestAuth::new(endpoint);
        Ok(Self::new(Arc::new(store), Arc::new(auth)))
    }
}
