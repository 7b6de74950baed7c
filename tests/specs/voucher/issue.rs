//! Voucher issuance and redemption specs

use crate::prelude::*;

#[test]
fn issue_until_exhausted() {
    let temp = Project::empty();
    let id = temp.event("Launch", 2);

    temp.tix()
        .args(["voucher", "issue", &id, "ana"])
        .passes()
        .stdout_has("Issued voucher");
    temp.tix().args(["voucher", "issue", &id, "ben"]).passes();
    temp.tix()
        .args(["voucher", "issue", &id, "cid"])
        .exits(5)
        .stdout_has("No vouchers left");

    temp.tix()
        .args(["event", "show", &id])
        .passes()
        .stdout_has("Issued: 2/2");
}

#[test]
fn use_once_by_code() {
    let temp = Project::empty();
    let id = temp.event("Launch", 2);

    let json = temp
        .tix()
        .args(["voucher", "issue", &id, "ana", "--json"])
        .passes()
        .json();
    assert_eq!(json["outcome"], "issued");
    let code = json["voucher"]["code"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 10);

    temp.tix()
        .args(["voucher", "use", "--code", &code])
        .passes()
        .stdout_has("Used voucher");
    temp.tix()
        .args(["voucher", "use", "--code", &code])
        .exits(5)
        .stdout_has("already used");

    temp.tix()
        .args(["voucher", "show", "--code", &code])
        .passes()
        .stdout_has("used ");
}

#[test]
fn use_unknown_voucher() {
    let temp = Project::empty();
    temp.tix()
        .args(["voucher", "use", "v-404"])
        .exits(4)
        .stdout_has("Voucher not found: v-404");
}

#[test]
fn issue_for_missing_event() {
    let temp = Project::empty();
    temp.tix().args(["voucher", "issue", "nope", "ana"]).exits(4);
}

#[test]
fn code_length_from_config() {
    let temp = Project::empty();
    temp.file("tix.toml", "code_length = 6\n");
    let id = temp.event("Launch", 1);

    let json = temp
        .tix()
        .args(["--config", "tix.toml", "voucher", "issue", &id, "ana", "--json"])
        .passes()
        .json();
    assert_eq!(json["voucher"]["code"].as_str().unwrap().len(), 6);
}

#[test]
fn vouchers_are_listed_per_event() {
    let temp = Project::empty();
    let id = temp.event("Launch", 3);
    temp.tix().args(["voucher", "issue", &id, "ana"]).passes();
    temp.tix().args(["voucher", "issue", &id, "ben"]).passes();

    temp.tix()
        .args(["event", "vouchers", &id])
        .passes()
        .stdout_has("ana")
        .stdout_has("ben")
        .stdout_has("unused");
}
