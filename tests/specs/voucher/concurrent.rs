//! Cross-process capacity specs

use crate::prelude::*;
use std::thread;

#[test]
fn concurrent_processes_never_overissue() {
    let temp = Project::empty();
    let id = temp.event("Launch", 3);

    let codes: Vec<i32> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let builder = temp
                    .tix()
                    .args(["voucher", "issue", id.as_str(), &format!("r{i}")]);
                s.spawn(move || builder.exit_code())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(codes.iter().filter(|&&c| c == 0).count(), 3);
    assert_eq!(codes.iter().filter(|&&c| c == 5).count(), 5);

    temp.tix()
        .args(["event", "show", &id])
        .passes()
        .stdout_has("Issued: 3/3");
}

#[test]
fn concurrent_acquires_grant_one_lease() {
    let temp = Project::empty();
    let id = temp.event("Launch", 1);

    let codes: Vec<i32> = thread::scope(|s| {
        let handles: Vec<_> = ["alice", "bob", "carol", "dave"]
            .into_iter()
            .map(|who| {
                let builder = temp.tix().args(["lock", "acquire", id.as_str(), "--as", who]);
                s.spawn(move || builder.exit_code())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(codes.iter().filter(|&&c| c == 0).count(), 1);
    assert_eq!(codes.iter().filter(|&&c| c == 3).count(), 3);
}
