use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use testwatch::watch::{reduce_batch, ChangeKind, ChangeRecord, EventSpooler};

fn rec(kind: ChangeKind, src: &str) -> ChangeRecord {
    ChangeRecord {
        kind,
        source_path: src.to_string(),
        dest_path: None,
    }
}

fn mv(src: &str, dest: &str) -> ChangeRecord {
    ChangeRecord {
        kind: ChangeKind::Moved,
        source_path: src.to_string(),
        dest_path: Some(dest.to_string()),
    }
}

#[test]
fn created_suppresses_modified_for_the_same_path() {
    let batch = vec![
        rec(ChangeKind::Created, "a.py"),
        rec(ChangeKind::Modified, "a.py"),
        rec(ChangeKind::Modified, "a.py"),
    ];

    let reduced = reduce_batch(batch);
    assert_eq!(reduced.len(), 1);
    assert_eq!(reduced[0].kind, ChangeKind::Created);
    assert_eq!(reduced[0].source_path, "a.py");
}

#[test]
fn move_destination_suppresses_followup_events() {
    let batch = vec![mv("a.py", "b.py"), rec(ChangeKind::Modified, "b.py")];

    let reduced = reduce_batch(batch);
    assert_eq!(reduced.len(), 1);
    assert_eq!(reduced[0].kind, ChangeKind::Moved);
    assert_eq!(reduced[0].dest_path.as_deref(), Some("b.py"));
}

#[test]
fn exact_duplicates_keep_the_first_occurrence() {
    let batch = vec![
        rec(ChangeKind::Modified, "a.py"),
        rec(ChangeKind::Modified, "a.py"),
        rec(ChangeKind::Deleted, "a.py"),
    ];

    let reduced = reduce_batch(batch);
    assert_eq!(reduced.len(), 2);
    assert_eq!(reduced[0].kind, ChangeKind::Modified);
    assert_eq!(reduced[1].kind, ChangeKind::Deleted);
}

#[test]
fn insertion_order_is_preserved() {
    let batch = vec![
        rec(ChangeKind::Modified, "b.py"),
        rec(ChangeKind::Created, "a.py"),
        rec(ChangeKind::Deleted, "c.py"),
    ];

    let reduced = reduce_batch(batch);
    let paths: Vec<&str> = reduced.iter().map(|r| r.source_path.as_str()).collect();
    assert_eq!(paths, vec!["b.py", "a.py", "c.py"]);
}

#[tokio::test]
async fn drain_returns_immediately_when_cooldown_is_zero() {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut spooler = EventSpooler::new(rx);

    tx.send(rec(ChangeKind::Modified, "a.py")).unwrap();
    tx.send(rec(ChangeKind::Modified, "b.py")).unwrap();

    let batch = spooler.drain(Duration::ZERO).await;
    assert_eq!(batch.len(), 2);
}

#[tokio::test]
async fn drain_blocks_until_the_first_record() {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut spooler = EventSpooler::new(rx);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(60)).await;
        tx.send(rec(ChangeKind::Modified, "late.py")).unwrap();
    });

    let start = Instant::now();
    let batch = spooler.drain(Duration::ZERO).await;
    assert_eq!(batch.len(), 1);
    assert!(start.elapsed() >= Duration::from_millis(40));
}

#[tokio::test]
async fn drain_collects_a_burst_within_the_cooldown_window() {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut spooler = EventSpooler::new(rx);

    tokio::spawn(async move {
        tx.send(rec(ChangeKind::Modified, "a.py")).unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        tx.send(rec(ChangeKind::Modified, "b.py")).unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        tx.send(rec(ChangeKind::Modified, "c.py")).unwrap();
    });

    let batch = spooler.drain(Duration::from_millis(100)).await;
    let paths: Vec<&str> = batch.iter().map(|r| r.source_path.as_str()).collect();
    assert_eq!(paths, vec!["a.py", "b.py", "c.py"]);
}

#[tokio::test]
async fn drain_returns_empty_when_the_producer_is_gone() {
    let (tx, rx) = mpsc::unbounded_channel::<ChangeRecord>();
    let mut spooler = EventSpooler::new(rx);
    drop(tx);

    let batch = spooler.drain(Duration::ZERO).await;
    assert!(batch.is_empty());
}

#[tokio::test]
async fn records_seen_by_has_pending_are_retained_for_the_next_drain() {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut spooler = EventSpooler::new(rx);

    tx.send(rec(ChangeKind::Modified, "a.py")).unwrap();
    assert!(spooler.has_pending());

    let batch = spooler.drain(Duration::ZERO).await;
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].source_path, "a.py");
}
