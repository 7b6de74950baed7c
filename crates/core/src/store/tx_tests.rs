// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::{DateTime, Utc};

fn now() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

fn base_with_event() -> MaterializedState {
    let mut state = MaterializedState::default();
    state.apply(&Operation::EventPut {
        event: EventRecord::new("ev-1", "launch", 2, now()),
    });
    state.apply(&Operation::VoucherPut {
        voucher: Voucher::new("v-1", "ev-1", "TAKEN", "alice", now()),
    });
    state
}

#[test]
fn reads_see_staged_writes() {
    let base = base_with_event();
    let mut tx = Tx::new(&base);

    let updated = tx.update_event_if("ev-1", |_| true, |e| e.issued_count = 1);
    assert_eq!(updated.map(|e| e.issued_count), Some(1));
    assert_eq!(tx.event("ev-1").map(|e| e.issued_count), Some(1));

    // Base is untouched until the store applies the ops
    assert_eq!(base.event("ev-1").map(|e| e.issued_count), Some(0));
}

#[test]
fn rejected_predicate_stages_nothing() {
    let base = base_with_event();
    let mut tx = Tx::new(&base);

    let updated = tx.update_event_if("ev-1", |e| e.issued_count > 0, |e| e.issued_count += 1);
    assert!(updated.is_none());
    assert!(tx.is_read_only());
}

#[test]
fn update_missing_event_is_none() {
    let base = base_with_event();
    let mut tx = Tx::new(&base);
    assert!(tx.update_event_if("nope", |_| true, |_| {}).is_none());
}

#[test]
fn insert_voucher_rejects_committed_code() {
    let base = base_with_event();
    let mut tx = Tx::new(&base);

    let err = tx
        .insert_voucher(Voucher::new("v-2", "ev-1", "TAKEN", "bob", now()))
        .unwrap_err();
    assert_eq!(err, Conflict::DuplicateCode("TAKEN".to_string()));
}

#[test]
fn insert_voucher_rejects_staged_code() {
    let base = base_with_event();
    let mut tx = Tx::new(&base);

    tx.insert_voucher(Voucher::new("v-2", "ev-1", "FRESH", "bob", now()))
        .unwrap();
    let err = tx
        .insert_voucher(Voucher::new("v-3", "ev-1", "FRESH", "carol", now()))
        .unwrap_err();
    assert_eq!(err, Conflict::DuplicateCode("FRESH".to_string()));
}

#[test]
fn deleted_voucher_frees_code_within_tx() {
    let base = base_with_event();
    let mut tx = Tx::new(&base);

    assert!(tx.delete_voucher("v-1"));
    assert!(tx.voucher_by_code("TAKEN").is_none());
    tx.insert_voucher(Voucher::new("v-2", "ev-1", "TAKEN", "bob", now()))
        .unwrap();
}

#[test]
fn insert_event_rejects_duplicate_id() {
    let base = base_with_event();
    let mut tx = Tx::new(&base);
    let err = tx
        .insert_event(EventRecord::new("ev-1", "again", 1, now()))
        .unwrap_err();
    assert_eq!(err, Conflict::DuplicateId("ev-1".to_string()));
}

#[test]
fn vouchers_for_merges_overlay() {
    let base = base_with_event();
    let mut tx = Tx::new(&base);

    tx.insert_voucher(Voucher::new("v-2", "ev-1", "NEW", "bob", now()))
        .unwrap();
    assert_eq!(tx.vouchers_for("ev-1").len(), 2);

    tx.delete_voucher("v-1");
    let ids: Vec<_> = tx.vouchers_for("ev-1").into_iter().map(|v| v.id).collect();
    assert_eq!(ids, ["v-2"]);
}

#[test]
fn ops_are_recorded_in_order() {
    let base = base_with_event();
    let mut tx = Tx::new(&base);

    tx.update_event_if("ev-1", |_| true, |e| e.issued_count += 1);
    tx.insert_voucher(Voucher::new("v-2", "ev-1", "NEW", "bob", now()))
        .unwrap();
    tx.delete_event("ev-1");

    let names: Vec<_> = tx.into_ops().iter().map(Operation::name).collect();
    assert_eq!(names, ["event:put", "voucher:put", "event:delete"]);
}
