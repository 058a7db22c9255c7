// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::cookie::time::{Duration, OffsetDateTime};
use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use serde_json::json;
use std::future::{Ready, ready};

use crate::config::ValidatedConfig;
use crate::feedback::Notice;

pub const SESSION_REQUIRED_MESSAGE: &str = "You are not signed in. Please log in again.";

pub fn session_cookie(config: &ValidatedConfig, token: &str) -> Cookie<'static> {
    Cookie::build(config.auth.cookie_name.clone(), token.to_string())
        .path("/")
        .secure(config.auth.cookie_secure)
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

pub fn removal_cookie(config: &ValidatedConfig) -> Cookie<'static> {
    Cookie::build(config.auth.cookie_name.clone(), "")
        .path("/")
        .secure(config.auth.cookie_secure)
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(0))
        .expires(OffsetDateTime::UNIX_EPOCH)
        .finish()
}

/// Session token carried by the request cookie, if any.
pub fn read_session_token(req: &HttpRequest, config: &ValidatedConfig) -> Option<String> {
    req.cookie(&config.auth.cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// Extractor for handlers that act on behalf of a signed-in operator.
///
/// It only reads the cookie. Whether the token is still valid is decided by
/// the record store when the token is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(pub String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for SessionToken {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req
            .app_data::<web::Data<ValidatedConfig>>()
            .and_then(|config| read_session_token(req, config));

        ready(match token {
            Some(token) => Ok(SessionToken(token)),
            None => {
                log::debug!("Admin action without session cookie: {}", req.path());
                let response = HttpResponse::Unauthorized().json(json!({
                    "notices": [Notice::error(SESSION_REQUIRED_MESSAGE)],
                }));
                Err(InternalError::from_response("session required", response).into())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::TestConfigBuilder;
    use actix_web::test::TestRequest;

    #[test]
    fn session_cookie_flags_follow_config() {
        let config = TestConfigBuilder::new().with_secure_cookie(true).build();
        let cookie = session_cookie(&config, "abc");
        assert_eq!(cookie.name(), "folio_session");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn removal_cookie_expires_immediately() {
        let config = TestConfigBuilder::new().build();
        let cookie = removal_cookie(&config);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::seconds(0)));
    }

    #[test]
    fn empty_cookie_counts_as_missing() {
        let config = TestConfigBuilder::new().build();
        let req = TestRequest::default()
            .cookie(Cookie::new("folio_session", ""))
            .to_http_request();
        assert_eq!(read_session_token(&req, &config), None);

        let req = TestRequest::default()
            .cookie(Cookie::new("folio_session", "tok"))
            .to_http_request();
        assert_eq!(read_session_token(&req, &config), Some("tok".to_string()));
    }

    #[actix_web::test]
    async fn extractor_rejects_missing_cookie_with_401() {
        let config = TestConfigBuilder::new().build();
        let (req, mut payload) = TestRequest::default()
            .app_data(web::Data::new(config))
            .to_http_parts();
        let err = SessionToken::from_request(&req, &mut payload)
            .await
            .expect_err("no cookie");
        assert_eq!(
            err.error_response().status(),
            actix_web::http::StatusCode::UNAUTHORIZED
        );
    }
}
