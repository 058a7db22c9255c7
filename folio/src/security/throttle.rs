// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::collections::{HashMap, VecDeque};
use std::net::IpAddr;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, oneshot};

const THROTTLE_CHANNEL_DEPTH: usize = 64;
const MAX_TRACKED_CLIENTS: usize = 10000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleError {
    TooSoon,
    /// The throttle task is gone; no decision can be made.
    Unavailable,
}

impl ThrottleError {
    pub fn code(&self) -> &'static str {
        match self {
            ThrottleError::TooSoon => "submit_throttled",
            ThrottleError::Unavailable => "throttle_unavailable",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ThrottleError::TooSoon => "Please wait a moment before sending another message.",
            ThrottleError::Unavailable => {
                "The contact form is temporarily unavailable. Please try again later."
            }
        }
    }
}

/// Enforces a minimum interval between accepted submissions from one client.
///
/// [`SubmitThrottle::check`] only reads. A submission counts once
/// [`SubmitThrottle::record`] is called for it, after the store accepted it.
#[derive(Clone)]
pub struct SubmitThrottle {
    sender: mpsc::Sender<ThrottleCommand>,
}

impl SubmitThrottle {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel(THROTTLE_CHANNEL_DEPTH);
        tokio::spawn(async move {
            let mut state = ThrottleState::new();
            state.run(receiver).await;
        });
        Self { sender }
    }

    pub async fn check(&self, ip: IpAddr, min_interval: Duration) -> Result<(), ThrottleError> {
        let (reply, receive) = oneshot::channel();
        let command = ThrottleCommand::Check {
            ip,
            min_interval,
            reply,
        };
        if self.sender.send(command).await.is_err() {
            log::error!("Contact throttle task is not running");
            return Err(ThrottleError::Unavailable);
        }
        receive.await.unwrap_or_else(|_| {
            log::error!("Contact throttle task dropped a check");
            Err(ThrottleError::Unavailable)
        })
    }

    pub async fn record(&self, ip: IpAddr) {
        if self
            .sender
            .send(ThrottleCommand::Record { ip })
            .await
            .is_err()
        {
            log::error!("Contact throttle task is not running; submission from {} not recorded", ip);
        }
    }
}

impl Default for SubmitThrottle {
    fn default() -> Self {
        Self::new()
    }
}

enum ThrottleCommand {
    Check {
        ip: IpAddr,
        min_interval: Duration,
        reply: oneshot::Sender<Result<(), ThrottleError>>,
    },
    Record {
        ip: IpAddr,
    },
}

struct ThrottleState {
    last_accepted: HashMap<IpAddr, Instant>,
    order: VecDeque<IpAddr>,
}

impl ThrottleState {
    fn new() -> Self {
        Self {
            last_accepted: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    async fn run(&mut self, mut receiver: mpsc::Receiver<ThrottleCommand>) {
        while let Some(command) = receiver.recv().await {
            match command {
                ThrottleCommand::Check {
                    ip,
                    min_interval,
                    reply,
                } => {
                    let _ = reply.send(self.check_at(ip, min_interval, Instant::now()));
                }
                ThrottleCommand::Record { ip } => self.record_at(ip, Instant::now()),
            }
        }
    }

    fn check_at(&self, ip: IpAddr, min_interval: Duration, now: Instant) -> Result<(), ThrottleError> {
        match self.last_accepted.get(&ip) {
            Some(last) if now.duration_since(*last) < min_interval => Err(ThrottleError::TooSoon),
            _ => Ok(()),
        }
    }

    fn record_at(&mut self, ip: IpAddr, now: Instant) {
        if self.last_accepted.insert(ip, now).is_none() {
            self.order.push_back(ip);
        }
        self.prune_overflow();
    }

    fn prune_overflow(&mut self) {
        while self.last_accepted.len() > MAX_TRACKED_CLIENTS {
            if let Some(oldest) = self.order.pop_front() {
                self.last_accepted.remove(&oldest);
            } else {
                break;
            }
        }
    }
}
