// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::HttpRequest;
use log::debug;
use std::net::{IpAddr, SocketAddr};

use crate::config::ValidatedConfig;

/// Extracts the real client IP address from the request, considering X-Forwarded-For headers if configured
pub fn extract_client_ip(req: &HttpRequest, config: &ValidatedConfig) -> Option<IpAddr> {
    if config.security.use_forwarded_for {
        // Leftmost entry is the original client
        if let Some(forwarded_for) = req.headers().get("x-forwarded-for")
            && let Ok(header_value) = forwarded_for.to_str()
            && let Some(first_ip) = header_value.split(',').next()
            && let Ok(ip) = first_ip.trim().parse::<IpAddr>()
        {
            return Some(ip);
        }

        if let Some(real_ip) = req.headers().get("x-real-ip")
            && let Ok(header_value) = real_ip.to_str()
            && let Ok(ip) = header_value.trim().parse::<IpAddr>()
        {
            return Some(ip);
        }
    }

    let connection_info = req.connection_info();
    let peer_addr = connection_info.peer_addr()?;
    if let Ok(socket) = peer_addr.parse::<SocketAddr>() {
        return Some(socket.ip());
    }
    if let Ok(ip) = peer_addr.parse::<IpAddr>() {
        return Some(ip);
    }

    debug!("Could not extract client IP from peer address {}", peer_addr);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::TestConfigBuilder;
    use actix_web::test::TestRequest;

    #[test]
    fn uses_peer_address_by_default() {
        let config = TestConfigBuilder::new().build();
        let req = TestRequest::default()
            .peer_addr("10.1.2.3:5555".parse().unwrap())
            .insert_header(("x-forwarded-for", "203.0.113.9"))
            .to_http_request();
        assert_eq!(
            extract_client_ip(&req, &config),
            Some("10.1.2.3".parse().unwrap())
        );
    }

    #[test]
    fn honors_forwarded_for_when_enabled() {
        let config = TestConfigBuilder::new().with_forwarded_for(true).build();
        let req = TestRequest::default()
            .peer_addr("10.1.2.3:5555".parse().unwrap())
            .insert_header(("x-forwarded-for", "203.0.113.9, 10.0.0.1"))
            .to_http_request();
        assert_eq!(
            extract_client_ip(&req, &config),
            Some("203.0.113.9".parse().unwrap())
        );
    }

    #[test]
    fn handles_ipv6_peers() {
        let config = TestConfigBuilder::new().build();
        let req = TestRequest::default()
            .peer_addr("[2001:db8::1]:443".parse().unwrap())
            .to_http_request();
        assert_eq!(
            extract_client_ip(&req, &config),
            Some("2001:db8::1".parse().unwrap())
        );
    }
}
