// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tix voucher` - Voucher issuance and redemption

use super::Coord;
use crate::output::{self, OutputFormat, VoucherRow};
use clap::{Args, Subcommand};
use tix_core::{IssueOutcome, MarkUsedOutcome, OutcomeStatus};

#[derive(Args)]
pub struct VoucherArgs {
    #[command(subcommand)]
    pub command: VoucherCommand,
}

#[derive(Subcommand)]
pub enum VoucherCommand {
    /// Issue a voucher against an event's capacity
    Issue {
        /// Event ID
        event: String,
        /// Recipient identity
        recipient: String,
    },
    /// Mark a voucher used
    Use {
        /// Voucher ID
        #[arg(required_unless_present = "code", conflicts_with = "code")]
        id: Option<String>,
        /// Look the voucher up by redemption code instead
        #[arg(long)]
        code: Option<String>,
    },
    /// Show a voucher
    Show {
        /// Voucher ID
        #[arg(required_unless_present = "code", conflicts_with = "code")]
        id: Option<String>,
        /// Look the voucher up by redemption code instead
        #[arg(long)]
        code: Option<String>,
    },
}

pub fn handle(
    command: VoucherCommand,
    coord: &Coord,
    format: OutputFormat,
) -> anyhow::Result<OutcomeStatus> {
    match command {
        VoucherCommand::Issue { event, recipient } => {
            let result = coord.vouchers.issue(&event, &recipient)?;
            let text = match &result {
                IssueOutcome::Issued { voucher } => {
                    format!("Issued voucher {} (code {})", voucher.id, voucher.code)
                }
                IssueOutcome::CapacityExhausted => {
                    format!("No vouchers left for {} (full or inactive)", event)
                }
                IssueOutcome::NotFound => format!("Event not found: {}", event),
            };
            output::outcome(&result, text, format)
        }

        VoucherCommand::Use { id, code } => {
            let (result, key) = match (id, code) {
                (_, Some(code)) => (coord.vouchers.mark_used_by_code(&code)?, code),
                (Some(id), None) => (coord.vouchers.mark_used(&id)?, id),
                (None, None) => anyhow::bail!("a voucher id or --code is required"),
            };
            let text = match &result {
                MarkUsedOutcome::Used { voucher } => format!("Used voucher {}", voucher.code),
                MarkUsedOutcome::AlreadyUsed => format!("Voucher {} was already used", key),
                MarkUsedOutcome::NotFound => format!("Voucher not found: {}", key),
            };
            output::outcome(&result, text, format)
        }

        VoucherCommand::Show { id, code } => {
            let (voucher, key) = match (id, code) {
                (_, Some(code)) => (coord.events.voucher_by_code(&code)?, code),
                (Some(id), None) => (coord.events.voucher(&id)?, id),
                (None, None) => anyhow::bail!("a voucher id or --code is required"),
            };
            match voucher {
                Some(voucher) => {
                    output::print(&VoucherRow::from(&voucher), format)?;
                    Ok(OutcomeStatus::Success)
                }
                None => {
                    eprintln!("Voucher not found: {}", key);
                    Ok(OutcomeStatus::NotFound)
                }
            }
        }
    }
}
