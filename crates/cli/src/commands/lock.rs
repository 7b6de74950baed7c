// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tix lock` - Edit lease commands

use super::Coord;
use crate::output::{self, timestamp, OutputFormat};
use clap::{Args, Subcommand};
use tix_core::{
    AcquireOutcome, ExtendOutcome, HolderId, LeaseStatus, OutcomeStatus, ReleaseOutcome,
};

#[derive(Args)]
pub struct LockArgs {
    #[command(subcommand)]
    pub command: LockCommand,
}

#[derive(Subcommand)]
pub enum LockCommand {
    /// Take the edit lease on an event
    Acquire {
        /// Event ID
        event: String,
        /// Caller identity
        #[arg(long = "as", value_name = "CALLER")]
        caller: String,
    },
    /// Give up a lease you hold
    Release {
        /// Event ID
        event: String,
        /// Caller identity
        #[arg(long = "as", value_name = "CALLER")]
        caller: String,
    },
    /// Push your live lease out by one lease window
    Extend {
        /// Event ID
        event: String,
        /// Caller identity
        #[arg(long = "as", value_name = "CALLER")]
        caller: String,
    },
    /// Show who holds the lease
    Status {
        /// Event ID
        event: String,
    },
}

pub fn handle(
    command: LockCommand,
    coord: &Coord,
    format: OutputFormat,
) -> anyhow::Result<OutcomeStatus> {
    match command {
        LockCommand::Acquire { event, caller } => {
            let caller = HolderId::new(caller);
            let result = coord.leases.acquire(&event, &caller)?;
            let text = match &result {
                AcquireOutcome::Acquired { expires_at } => {
                    format!("Acquired lease on {} until {}", event, timestamp(*expires_at))
                }
                AcquireOutcome::AlreadyHeldBySelf { expires_at } => format!(
                    "Already holding lease on {} until {}",
                    event,
                    timestamp(*expires_at)
                ),
                AcquireOutcome::HeldByOther { holder, expires_at } => format!(
                    "Lease on {} is held by {} until {}",
                    event,
                    holder,
                    timestamp(*expires_at)
                ),
                AcquireOutcome::NotFound => format!("Event not found: {}", event),
            };
            output::outcome(&result, text, format)
        }

        LockCommand::Release { event, caller } => {
            let caller = HolderId::new(caller);
            let result = coord.leases.release(&event, &caller)?;
            let text = match &result {
                ReleaseOutcome::Released => format!("Released lease on {}", event),
                ReleaseOutcome::NotHolder { .. } => {
                    format!("{} does not hold the lease on {}", caller, event)
                }
                ReleaseOutcome::NotFound => format!("Event not found: {}", event),
            };
            output::outcome(&result, text, format)
        }

        LockCommand::Extend { event, caller } => {
            let caller = HolderId::new(caller);
            let result = coord.leases.extend(&event, &caller)?;
            let text = match &result {
                ExtendOutcome::Extended { expires_at } => {
                    format!("Extended lease on {} until {}", event, timestamp(*expires_at))
                }
                ExtendOutcome::NotHolder => {
                    format!("{} does not hold the lease on {}", caller, event)
                }
                ExtendOutcome::Expired => {
                    format!("Lease on {} has expired; acquire it again", event)
                }
                ExtendOutcome::NotFound => format!("Event not found: {}", event),
            };
            output::outcome(&result, text, format)
        }

        LockCommand::Status { event } => {
            let result = coord.leases.status(&event)?;
            let text = match &result {
                LeaseStatus::Unlocked => format!("{} is unlocked", event),
                LeaseStatus::Held { holder, expires_at } => format!(
                    "{} is held by {} until {}",
                    event,
                    holder,
                    timestamp(*expires_at)
                ),
                LeaseStatus::Lapsed { holder, expires_at } => format!(
                    "{} lease by {} lapsed at {}",
                    event,
                    holder,
                    timestamp(*expires_at)
                ),
                LeaseStatus::NotFound => format!("Event not found: {}", event),
            };
            output::outcome(&result, text, format)
        }
    }
}
