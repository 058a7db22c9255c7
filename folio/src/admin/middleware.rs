// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::admin::gate::{GateDecision, check_entry, login_redirect};
use crate::app_state::AppState;
use crate::config::ValidatedConfig;
use crate::login::read_session_token;
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::LOCATION,
    web,
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::rc::Rc;
use std::sync::Arc;

/// Middleware that requires an active session - redirects to the login page otherwise
pub struct RequireSessionMiddleware {
    config: Arc<ValidatedConfig>,
}

impl RequireSessionMiddleware {
    pub fn new(config: Arc<ValidatedConfig>) -> Self {
        Self { config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireSessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddlewareService {
            service: Rc::new(service),
            config: self.config.clone(),
        }))
    }
}

pub struct RequireSessionMiddlewareService<S> {
    service: Rc<S>,
    config: Arc<ValidatedConfig>,
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let config = self.config.clone();

        Box::pin(async move {
            let token = read_session_token(req.request(), &config);
            let decision = match req.app_data::<web::Data<AppState>>().cloned() {
                Some(app_state) => {
                    check_entry(app_state.auth.as_ref(), token.as_deref(), &config).await
                }
                None => {
                    log::error!("Application state missing; admin view unavailable");
                    GateDecision::Redirect(login_redirect(&config.login.path, &config.admin.path))
                }
            };

            match decision {
                GateDecision::Admit(session) => {
                    req.extensions_mut().insert(session);
                    // Map normal responses to left body
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                GateDecision::Redirect(location) => {
                    let (req, _) = req.into_parts();
                    let response = HttpResponse::Found()
                        .insert_header((LOCATION, location))
                        .finish()
                        .map_into_right_body();
                    Ok(ServiceResponse::new(req, response))
                }
            }
        })
    }
}
