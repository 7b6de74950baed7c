//! Event administration specs

use crate::prelude::*;

#[test]
fn list_empty() {
    let temp = Project::empty();
    temp.tix().args(["event", "list"]).passes().stdout_eq("No events\n");
}

#[test]
fn create_then_show() {
    let temp = Project::empty();
    let id = temp.event("Launch party", 25);

    temp.tix()
        .args(["event", "show", &id])
        .passes()
        .stdout_has(&format!("Event: {id}"))
        .stdout_has("Name: Launch party")
        .stdout_has("Issued: 0/25")
        .stdout_has("Lease: none");
}

#[test]
fn show_json() {
    let temp = Project::empty();
    let id = temp.event("Launch", 3);

    let json = temp.tix().args(["event", "show", &id, "--json"]).passes().json();
    assert_eq!(json["id"], id.as_str());
    assert_eq!(json["capacity"], 3);
    assert_eq!(json["active"], true);
}

#[test]
fn show_not_found() {
    let temp = Project::empty();
    temp.tix()
        .args(["event", "show", "nope"])
        .exits(4)
        .stderr_has("Event not found: nope");
}

#[test]
fn capacity_cannot_drop_below_issued() {
    let temp = Project::empty();
    let id = temp.event("Launch", 3);
    temp.tix().args(["voucher", "issue", &id, "ana"]).passes();
    temp.tix().args(["voucher", "issue", &id, "ben"]).passes();

    temp.tix()
        .args(["event", "capacity", &id, "1"])
        .exits(5)
        .stdout_has("cannot drop below the 2 already issued");

    temp.tix()
        .args(["event", "capacity", &id, "2"])
        .passes()
        .stdout_has("2/2 issued");
}

#[test]
fn deactivate_stops_issuance() {
    let temp = Project::empty();
    let id = temp.event("Launch", 3);

    temp.tix().args(["event", "deactivate", &id]).passes();
    temp.tix().args(["voucher", "issue", &id, "ana"]).exits(5);

    temp.tix().args(["event", "activate", &id]).passes();
    temp.tix().args(["voucher", "issue", &id, "ana"]).passes();
}

#[test]
fn delete_removes_vouchers() {
    let temp = Project::empty();
    let id = temp.event("Launch", 3);
    temp.tix().args(["voucher", "issue", &id, "ana"]).passes();

    temp.tix()
        .args(["event", "delete", &id])
        .passes()
        .stdout_has("1 voucher(s)");
    temp.tix().args(["event", "vouchers", &id]).exits(4);
    temp.tix().args(["event", "list"]).passes().stdout_eq("No events\n");
}
