//! Log compaction specs

use crate::prelude::*;

#[test]
fn compacted_store_keeps_every_commit() {
    let temp = Project::empty();
    temp.file("tix.toml", "[store]\ncompact_after = 2\n");
    let id = temp.event("Launch", 5);

    for recipient in ["ana", "ben", "cid"] {
        temp.tix()
            .args(["--config", "tix.toml", "voucher", "issue", &id, recipient])
            .passes();
    }

    assert!(temp.store().join("tix.snapshot").exists());
    let log = std::fs::read_to_string(temp.store().join("tix.wal")).unwrap();
    assert!(log.starts_with("{\"base\":4}\n"));

    temp.tix()
        .args(["event", "show", &id])
        .passes()
        .stdout_has("Issued: 3/5");
    temp.tix()
        .args(["voucher", "issue", &id, "dee"])
        .passes();
    temp.tix()
        .args(["--config", "tix.toml", "event", "show", &id])
        .passes()
        .stdout_has("Issued: 4/5");
}

#[test]
fn zero_compaction_interval_is_rejected() {
    let temp = Project::empty();
    temp.file("tix.toml", "[store]\ncompact_after = 0\n");

    temp.tix()
        .args(["--config", "tix.toml", "event", "list"])
        .fails()
        .stderr_has("compact_after");
}
