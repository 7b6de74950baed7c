// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use clap::CommandFactory;

#[test]
fn cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn global_flags_parse_after_subcommand() {
    let cli = Cli::try_parse_from([
        "tix", "lock", "acquire", "ev-1", "--as", "alice", "--json", "--store", "/tmp/s",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.store, PathBuf::from("/tmp/s"));
    assert!(matches!(
        cli.command,
        Commands::Lock(lock::LockArgs {
            command: lock::LockCommand::Acquire { ref event, ref caller },
        }) if event == "ev-1" && caller == "alice"
    ));
}

#[test]
fn lock_commands_require_caller() {
    assert!(Cli::try_parse_from(["tix", "lock", "release", "ev-1"]).is_err());
}

#[test]
fn voucher_use_takes_id_or_code_but_not_both() {
    assert!(Cli::try_parse_from(["tix", "voucher", "use", "v-1"]).is_ok());
    assert!(Cli::try_parse_from(["tix", "voucher", "use", "--code", "ABC"]).is_ok());
    assert!(Cli::try_parse_from(["tix", "voucher", "use"]).is_err());
    assert!(Cli::try_parse_from(["tix", "voucher", "use", "v-1", "--code", "ABC"]).is_err());
}
