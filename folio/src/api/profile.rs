// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::config::{SkillCategory, ValidatedConfig};

#[derive(Serialize)]
struct SocialLink<'a> {
    network: &'a str,
    url: &'a str,
}

#[derive(Serialize)]
struct ProfileResponse<'a> {
    name: &'a str,
    title: &'a str,
    email: &'a str,
    location: &'a str,
    bio: &'a str,
    social: Vec<SocialLink<'a>>,
    skills: &'a [SkillCategory],
}

pub async fn get_profile(config: web::Data<ValidatedConfig>) -> HttpResponse {
    let profile = &config.profile;
    let social = profile
        .social
        .iter()
        .filter(|(_, url)| !url.trim().is_empty())
        .map(|(network, url)| SocialLink {
            network: network.as_str(),
            url: url.as_str(),
        })
        .collect();

    HttpResponse::Ok().json(ProfileResponse {
        name: &profile.name,
        title: &profile.title,
        email: &profile.email,
        location: &profile.location,
        bio: &profile.bio,
        social,
        skills: &config.skills,
    })
}
