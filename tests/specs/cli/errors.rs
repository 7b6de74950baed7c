//! Error handling specs

use crate::prelude::*;

#[test]
fn unknown_command_is_a_usage_error() {
    let temp = Project::empty();
    temp.tix().args(["frobnicate"]).exits(2);
}

#[test]
fn missing_config_file_fails() {
    let temp = Project::empty();
    temp.tix()
        .args(["--config", "missing.toml", "event", "list"])
        .exits(1)
        .stderr_has("failed to read config");
}

#[test]
fn invalid_config_is_rejected() {
    let temp = Project::empty();
    temp.file("tix.toml", "lease_duration = \"0s\"\n");
    temp.tix()
        .args(["event", "list"])
        .env("TIX_CONFIG", "tix.toml")
        .exits(1)
        .stderr_has("lease_duration must be greater than zero");
}

#[test]
fn corrupt_store_fails_with_context() {
    let temp = Project::empty();
    temp.file("store/tix.wal", "not json\n");
    temp.tix()
        .args(["event", "list"])
        .exits(1)
        .stderr_has("failed to open store");
}
