//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_command_groups() {
    let temp = Project::empty();
    temp.tix()
        .args(["--help"])
        .passes()
        .stdout_has("event")
        .stdout_has("lock")
        .stdout_has("voucher");
}

#[test]
fn lock_help_shows_caller_flag() {
    let temp = Project::empty();
    temp.tix()
        .args(["lock", "acquire", "--help"])
        .passes()
        .stdout_has("--as <CALLER>");
}
