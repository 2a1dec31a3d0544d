use super::*;

#[test]
fn tickets_increase_monotonically() {
    let cell = DisplayCell::new();
    let first = cell.issue_ticket();
    let second = cell.issue_ticket();
    assert!(first >= 1);
    assert!(second > first);
}

#[test]
fn older_ticket_cannot_overwrite_newer_body() {
    let cell = DisplayCell::new();
    let older = cell.issue_ticket();
    let newer = cell.issue_ticket();

    assert!(cell.apply(DisplaySlot::FetchedMessages, newer, "new".into()));
    assert!(!cell.apply(DisplaySlot::FetchedMessages, older, "old".into()));
    assert_eq!(cell.snapshot().fetched_messages, "new");
}

#[test]
fn slots_track_tickets_independently() {
    let cell = DisplayCell::new();
    let messages_ticket = cell.issue_ticket();
    let stats_ticket = cell.issue_ticket();

    assert!(cell.apply(DisplaySlot::ProducerStats, stats_ticket, "sent=1".into()));
    assert!(cell.apply(DisplaySlot::FetchedMessages, messages_ticket, "a,b".into()));

    let state = cell.snapshot();
    assert_eq!(state.fetched_messages, "a,b");
    assert_eq!(state.producer_stats, "sent=1");
    assert_eq!(state.producer_input, "");
    assert_eq!(state.messages_ticket, messages_ticket);
    assert_eq!(state.stats_ticket, stats_ticket);
}

#[test]
fn subscribers_see_applied_bodies() {
    let cell = DisplayCell::new();
    let mut rx = cell.subscribe();
    let ticket = cell.issue_ticket();
    cell.apply(DisplaySlot::FetchedMessages, ticket, "msg1".into());

    assert!(rx.has_changed().expect("sender alive"));
    assert_eq!(rx.borrow_and_update().fetched_messages, "msg1");
}

#[test]
fn unchanged_input_does_not_notify() {
    let cell = DisplayCell::new();
    let mut rx = cell.subscribe();

    cell.set_producer_input("draft");
    assert!(rx.has_changed().expect("sender alive"));
    let _ = rx.borrow_and_update();

    cell.set_producer_input("draft");
    assert!(!rx.has_changed().expect("sender alive"));
    assert_eq!(cell.producer_input(), "draft");
}

#[test]
fn identical_body_from_newer_fetch_still_notifies() {
    let cell = DisplayCell::new();
    let mut rx = cell.subscribe();

    let first = cell.issue_ticket();
    assert!(cell.apply(DisplaySlot::FetchedMessages, first, "msg1".into()));
    let seen = rx.borrow_and_update().clone();

    let second = cell.issue_ticket();
    assert!(cell.apply(DisplaySlot::FetchedMessages, second, "msg1".into()));
    assert!(rx.has_changed().expect("sender alive"));
    let current = rx.borrow_and_update().clone();
    assert_eq!(current.fetched_messages, seen.fetched_messages);
    assert_eq!(current.messages_ticket, second);
    assert_ne!(current.messages_ticket, seen.messages_ticket);
}
