// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tix event` - Event administration

use super::Coord;
use crate::output::{self, EventDetail, EventRow, OutputFormat, VoucherRow};
use clap::{Args, Subcommand};
use tix_core::{DeleteOutcome, OutcomeStatus, UpdateOutcome};

#[derive(Args)]
pub struct EventArgs {
    #[command(subcommand)]
    pub command: EventCommand,
}

#[derive(Subcommand)]
pub enum EventCommand {
    /// Create an event
    Create {
        /// Display name
        name: String,
        /// Maximum number of vouchers
        #[arg(long)]
        capacity: u32,
    },
    /// List all events
    List,
    /// Show details of an event
    Show {
        /// Event ID
        id: String,
    },
    /// Change an event's capacity
    Capacity {
        /// Event ID
        id: String,
        /// New capacity; may not drop below the number issued
        capacity: u32,
    },
    /// Allow issuance
    Activate {
        /// Event ID
        id: String,
    },
    /// Stop issuance
    Deactivate {
        /// Event ID
        id: String,
    },
    /// Delete an event and all its vouchers
    Delete {
        /// Event ID
        id: String,
    },
    /// List vouchers issued for an event
    Vouchers {
        /// Event ID
        id: String,
    },
}

pub fn handle(
    command: EventCommand,
    coord: &Coord,
    format: OutputFormat,
) -> anyhow::Result<OutcomeStatus> {
    match command {
        EventCommand::Create { name, capacity } => {
            let event = coord.events.create(&name, capacity)?;
            match format {
                OutputFormat::Text => println!("{}", event.id),
                OutputFormat::Json => output::print(&EventDetail::from(&event), format)?,
            }
            Ok(OutcomeStatus::Success)
        }

        EventCommand::List => {
            let events = coord.events.events()?;
            let rows: Vec<_> = events.iter().map(EventRow::from).collect();
            output::print_list(&rows, "No events", format)?;
            Ok(OutcomeStatus::Success)
        }

        EventCommand::Show { id } => match coord.events.event(&id)? {
            Some(event) => {
                output::print(&EventDetail::from(&event), format)?;
                Ok(OutcomeStatus::Success)
            }
            None => not_found(&id),
        },

        EventCommand::Capacity { id, capacity } => {
            let result = coord.events.set_capacity(&id, capacity)?;
            report_update(&id, &result, format)
        }

        EventCommand::Activate { id } => {
            let result = coord.events.set_active(&id, true)?;
            report_update(&id, &result, format)
        }

        EventCommand::Deactivate { id } => {
            let result = coord.events.set_active(&id, false)?;
            report_update(&id, &result, format)
        }

        EventCommand::Delete { id } => {
            let result = coord.events.delete(&id)?;
            let text = match &result {
                DeleteOutcome::Deleted { vouchers_removed } => {
                    format!("Deleted {} and {} voucher(s)", id, vouchers_removed)
                }
                DeleteOutcome::NotFound => format!("Event not found: {}", id),
            };
            output::outcome(&result, text, format)
        }

        EventCommand::Vouchers { id } => {
            if coord.events.event(&id)?.is_none() {
                return not_found(&id);
            }
            let vouchers = coord.events.vouchers(&id)?;
            let rows: Vec<_> = vouchers.iter().map(VoucherRow::from).collect();
            output::print_list(&rows, "No vouchers", format)?;
            Ok(OutcomeStatus::Success)
        }
    }
}

fn report_update(
    id: &str,
    result: &UpdateOutcome,
    format: OutputFormat,
) -> anyhow::Result<OutcomeStatus> {
    let text = match result {
        UpdateOutcome::Updated { event } => format!(
            "Updated {}: {}/{} issued, {}",
            id,
            event.issued_count,
            event.capacity,
            if event.active { "active" } else { "inactive" }
        ),
        UpdateOutcome::BelowIssued { issued } => {
            format!("Capacity cannot drop below the {} already issued", issued)
        }
        UpdateOutcome::NotFound => format!("Event not found: {}", id),
    };
    output::outcome(result, text, format)
}

fn not_found(id: &str) -> anyhow::Result<OutcomeStatus> {
    eprintln!("Event not found: {}", id);
    Ok(OutcomeStatus::NotFound)
}
