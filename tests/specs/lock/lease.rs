//! Edit lease specs

use crate::prelude::*;

#[test]
fn acquire_then_conflict_then_release() {
    let temp = Project::empty();
    let id = temp.event("Launch", 3);

    temp.tix()
        .args(["lock", "acquire", &id, "--as", "alice"])
        .passes()
        .stdout_has("Acquired lease");

    temp.tix()
        .args(["lock", "acquire", &id, "--as", "bob"])
        .exits(3)
        .stdout_has("held by alice");

    temp.tix()
        .args(["lock", "release", &id, "--as", "bob"])
        .exits(3)
        .stdout_has("bob does not hold the lease");

    temp.tix()
        .args(["lock", "release", &id, "--as", "alice"])
        .passes()
        .stdout_has("Released lease");

    temp.tix()
        .args(["lock", "acquire", &id, "--as", "bob"])
        .passes();
}

#[test]
fn reacquire_reports_already_held() {
    let temp = Project::empty();
    let id = temp.event("Launch", 3);
    temp.tix().args(["lock", "acquire", &id, "--as", "alice"]).passes();

    let json = temp
        .tix()
        .args(["lock", "acquire", &id, "--as", "alice", "--json"])
        .passes()
        .json();
    assert_eq!(json["outcome"], "already_held_by_self");
}

#[test]
fn extend_by_holder() {
    let temp = Project::empty();
    let id = temp.event("Launch", 3);
    temp.tix().args(["lock", "acquire", &id, "--as", "alice"]).passes();

    let json = temp
        .tix()
        .args(["lock", "extend", &id, "--as", "alice", "--json"])
        .passes()
        .json();
    assert_eq!(json["outcome"], "extended");

    temp.tix()
        .args(["lock", "extend", &id, "--as", "bob"])
        .exits(3);
}

#[test]
fn status_shows_holder() {
    let temp = Project::empty();
    let id = temp.event("Launch", 3);

    temp.tix()
        .args(["lock", "status", &id])
        .passes()
        .stdout_has("unlocked");

    temp.tix().args(["lock", "acquire", &id, "--as", "alice"]).passes();
    temp.tix()
        .args(["lock", "status", &id])
        .passes()
        .stdout_has("held by alice");
}

#[test]
fn short_lease_from_config_lapses() {
    let temp = Project::empty();
    temp.file("tix.toml", "lease_duration = \"1s\"\n");
    let id = temp.event("Launch", 3);

    temp.tix()
        .args(["--config", "tix.toml", "lock", "acquire", &id, "--as", "alice"])
        .passes();
    std::thread::sleep(std::time::Duration::from_millis(1500));

    temp.tix()
        .args(["--config", "tix.toml", "lock", "extend", &id, "--as", "alice"])
        .exits(5)
        .stdout_has("expired");
    temp.tix()
        .args(["--config", "tix.toml", "lock", "acquire", &id, "--as", "bob"])
        .passes();
}

#[test]
fn missing_event() {
    let temp = Project::empty();
    temp.tix()
        .args(["lock", "acquire", "nope", "--as", "alice"])
        .exits(4)
        .stdout_has("Event not found: nope");
}
