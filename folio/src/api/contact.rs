// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result, web};
use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr};

use crate::app_state::AppState;
use crate::config::ValidatedConfig;
use crate::contact::{ContactForm, ContactPipeline, SubmitOutcome};
use crate::feedback::Notice;
use crate::security::{self, ThrottleError};

#[derive(Serialize)]
struct ContactResponse<'a> {
    form: &'a ContactForm,
    notices: Vec<Notice>,
}

fn contact_response(status: StatusCode, pipeline: &mut ContactPipeline) -> HttpResponse {
    let notices = pipeline.take_notices();
    HttpResponse::build(status).json(ContactResponse {
        form: pipeline.form(),
        notices,
    })
}

pub async fn submit_contact(
    req: HttpRequest,
    payload: web::Json<ContactForm>,
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut pipeline = ContactPipeline::new(payload.into_inner());

    if let Err(err) = pipeline.form().validate() {
        pipeline.reject(err.to_string());
        return Ok(contact_response(StatusCode::UNPROCESSABLE_ENTITY, &mut pipeline));
    }

    let ip = security::extract_client_ip(&req, &config)
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    if let Err(err) = app_state
        .contact_throttle
        .check(ip, config.contact.min_interval())
        .await
    {
        let status = match err {
            ThrottleError::TooSoon => {
                log::info!("Contact submission throttled for {} ({})", ip, err.code());
                StatusCode::TOO_MANY_REQUESTS
            }
            ThrottleError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        };
        pipeline.reject(err.message());
        return Ok(contact_response(status, &mut pipeline));
    }

    // Only a stored message starts the client's interval.
    let status = match pipeline.submit(app_state.store.as_ref()).await {
        SubmitOutcome::Sent => {
            app_state.contact_throttle.record(ip).await;
            StatusCode::CREATED
        }
        SubmitOutcome::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmitOutcome::Failed(_) => StatusCode::BAD_GATEWAY,
    };
    Ok(contact_response(status, &mut pipeline))
}
