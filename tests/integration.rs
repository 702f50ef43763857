use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use rax_fat_store::clock::{Clock, ManualClock};
use rax_fat_store::error::{CreateError, PermError, ReadError, TrashError, UpdateError};
use rax_fat_store::permissions::{PermissionAction, PermissionKind};
use rax_fat_store::storage::{JsonDirBackend, VolatileBackend};
use rax_fat_store::{FatSystem, StoreConfig};

// Helper to open an in-memory store with a controllable clock
fn volatile_system(block_size: usize) -> (FatSystem, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap()));
    let fat = FatSystem::with_backend(
        &StoreConfig::volatile(block_size),
        Arc::new(VolatileBackend),
        clock.clone(),
    )
    .unwrap();
    (fat, clock)
}

// Helper to open a persistent store under `root`
fn persistent_system(root: &std::path::Path, block_size: usize) -> FatSystem {
    let config = StoreConfig {
        data_root: root.to_string_lossy().to_string(),
        block_size,
        persist: true,
        ..StoreConfig::default()
    };
    FatSystem::open(&config).unwrap()
}

#[test]
fn test_hello_world_scenario() {
    let (mut fat, _) = volatile_system(5);
    fat.register_user("alice").unwrap();
    fat.register_user("bob").unwrap();

    fat.create_file("a.txt", "Hello World", "alice").unwrap();
    let entry = fat.table().get("a.txt").unwrap();
    assert_eq!(entry.size_chars, 11);

    let chain = fat.table().blocks().read_chain(entry.head_block_ref);
    let payloads: Vec<String> = chain
        .visited
        .iter()
        .map(|r| fat.table().blocks().get(r).unwrap().payload.clone())
        .collect();
    assert_eq!(payloads, vec!["Hello", " Worl", "d"]);

    fat.trash_file("a.txt", "alice").unwrap();
    assert!(fat.list_files(false).is_empty());
    let all = fat.list_files(true);
    assert_eq!(all.len(), 1);
    assert!(all[0].trashed);

    fat.restore_file("a.txt", "alice").unwrap();
    fat.set_permission("a.txt", "bob", PermissionKind::Read, PermissionAction::Grant, "alice")
        .unwrap();
    assert_eq!(fat.open_file("a.txt", "bob").unwrap().content, "Hello World");
    assert!(matches!(
        fat.set_permission("a.txt", "bob", PermissionKind::Read, PermissionAction::Grant, "alice"),
        Err(PermError::AlreadyGranted { .. })
    ));
}

#[test]
fn test_round_trip_various_contents() {
    let (mut fat, _) = volatile_system(4);
    let samples = [
        "a",
        "abcd",
        "abcde",
        "line one\nline two\n",
        "ünïcödé — ✓ 漢字",
        "   leading and trailing   ",
    ];

    for (i, content) in samples.iter().enumerate() {
        let name = format!("f{}.txt", i);
        fat.create_file(&name, content, "alice").unwrap();

        let opened = fat.open_file(&name, "alice").unwrap();
        assert_eq!(&opened.content, content);
        assert!(opened.complete);
        assert_eq!(opened.metadata.size_chars, content.chars().count());

        let head = fat.table().get(&name).unwrap().head_block_ref;
        let blocks = fat.table().blocks().read_chain(head).visited;
        assert_eq!(blocks.len(), content.chars().count().div_ceil(4));
    }
}

#[test]
fn test_permission_default_and_admin_bypass() {
    let (mut fat, _) = volatile_system(8);
    fat.create_file("notes", "private", "alice").unwrap();

    assert!(matches!(
        fat.open_file("notes", "bob"),
        Err(ReadError::PermissionDenied(_))
    ));
    assert!(matches!(
        fat.modify_file("notes", "mine now", "bob"),
        Err(UpdateError::PermissionDenied(_))
    ));

    assert_eq!(fat.open_file("notes", "admin").unwrap().content, "private");
    fat.modify_file("notes", "edited by admin", "admin").unwrap();
    assert_eq!(fat.open_file("notes", "alice").unwrap().content, "edited by admin");

    // Trash and restore stay owner-only
    assert!(matches!(
        fat.trash_file("notes", "admin"),
        Err(TrashError::Forbidden(_))
    ));
}

#[test]
fn test_metadata_reports_sorted_permissions() {
    let (mut fat, clock) = volatile_system(8);
    for user in ["alice", "zed", "bob"] {
        fat.register_user(user).unwrap();
    }
    fat.create_file("doc", "content", "alice").unwrap();
    fat.set_permission("doc", "zed", PermissionKind::Read, PermissionAction::Grant, "alice")
        .unwrap();
    fat.set_permission("doc", "bob", PermissionKind::Read, PermissionAction::Grant, "admin")
        .unwrap();

    clock.advance(Duration::minutes(1));
    fat.modify_file("doc", "content v2", "alice").unwrap();

    let meta = fat.open_file("doc", "zed").unwrap().metadata;
    assert_eq!(meta.owner, "alice");
    assert_eq!(meta.read, vec!["alice", "bob", "zed"]);
    assert_eq!(meta.write, vec!["alice"]);
    assert_eq!(meta.size_chars, 10);
    assert_eq!(meta.modified_at, clock.now());
    assert!(meta.created_at < meta.modified_at);

    let rendered = meta.to_string();
    assert!(rendered.contains("Read: alice, bob, zed"));
    assert!(rendered.contains("Created: 2023-11-14 22:13:20"));
}

#[test]
fn test_revoke_then_denied() {
    let (mut fat, _) = volatile_system(8);
    fat.register_user("bob").unwrap();
    fat.create_file("doc", "content", "alice").unwrap();

    fat.set_permission("doc", "bob", PermissionKind::Write, PermissionAction::Grant, "alice")
        .unwrap();
    fat.modify_file("doc", "bob was here", "bob").unwrap();
    fat.set_permission("doc", "bob", PermissionKind::Write, PermissionAction::Revoke, "alice")
        .unwrap();
    assert!(matches!(
        fat.modify_file("doc", "again", "bob"),
        Err(UpdateError::PermissionDenied(_))
    ));
    assert!(matches!(
        fat.set_permission("doc", "bob", PermissionKind::Write, PermissionAction::Revoke, "alice"),
        Err(PermError::NotGranted { .. })
    ));
}

#[test]
fn test_create_errors() {
    let (mut fat, _) = volatile_system(8);
    assert!(matches!(
        fat.create_file("empty", "", "alice"),
        Err(CreateError::InvalidContent)
    ));
    fat.create_file("dup", "x", "alice").unwrap();
    fat.trash_file("dup", "alice").unwrap();
    assert!(matches!(
        fat.create_file("dup", "y", "bob"),
        Err(CreateError::AlreadyExists(_))
    ));
}

#[test]
fn test_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut fat = persistent_system(dir.path(), 3);
        fat.register_user("alice").unwrap();
        fat.register_user("bob").unwrap();
        fat.create_file("a.txt", "persisted content", "alice").unwrap();
        fat.set_permission("a.txt", "bob", PermissionKind::Read, PermissionAction::Grant, "alice")
            .unwrap();
        fat.create_file("b.txt", "to be trashed", "bob").unwrap();
        fat.trash_file("b.txt", "bob").unwrap();
    }

    assert!(dir.path().join("fat/a.txt.json").exists());
    assert!(dir.path().join("users.json").exists());

    let mut fat = persistent_system(dir.path(), 3);
    assert!(fat.users().contains("alice"));
    assert!(fat.users().contains("bob"));
    assert_eq!(fat.open_file("a.txt", "bob").unwrap().content, "persisted content");
    assert_eq!(fat.list_files(false).len(), 1);
    assert_eq!(fat.list_files(true).len(), 2);

    let blocks_before = fat.table().blocks().len();
    fat.create_file("c.txt", "fresh", "alice").unwrap();
    assert_eq!(fat.table().blocks().len(), blocks_before + 2);
    assert_eq!(fat.open_file("a.txt", "alice").unwrap().content, "persisted content");
}

#[test]
fn test_update_frees_old_block_records() {
    let dir = tempfile::tempdir().unwrap();
    let mut fat = persistent_system(dir.path(), 2);
    fat.create_file("a.txt", "abcdef", "alice").unwrap();

    let count_blocks = || std::fs::read_dir(dir.path().join("blocks")).unwrap().count();
    assert_eq!(count_blocks(), 3);

    fat.modify_file("a.txt", "xy", "alice").unwrap();
    assert_eq!(count_blocks(), 1);

    assert!(fat.modify_file("a.txt", "", "alice").is_err());
    assert_eq!(count_blocks(), 1);
    assert_eq!(fat.open_file("a.txt", "alice").unwrap().content, "xy");
}

#[test]
fn test_torn_chain_returns_partial_content() {
    let dir = tempfile::tempdir().unwrap();

    let middle = {
        let mut fat = persistent_system(dir.path(), 2);
        fat.create_file("a.txt", "abcdef", "alice").unwrap();
        let head = fat.table().get("a.txt").unwrap().head_block_ref;
        fat.table().blocks().read_chain(head).visited[1]
    };

    std::fs::remove_file(dir.path().join(format!("blocks/{}.json", middle))).unwrap();

    let fat = persistent_system(dir.path(), 2);
    let opened = fat.open_file("a.txt", "alice").unwrap();
    assert_eq!(opened.content, "ab");
    assert!(!opened.complete);
}

#[test]
fn test_json_backend_direct_use() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(JsonDirBackend::open(dir.path()).unwrap());
    let clock = Arc::new(ManualClock::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap()));

    let mut fat =
        FatSystem::with_backend(&StoreConfig::volatile(4), backend.clone(), clock.clone()).unwrap();
    fat.create_file("one", "first", "alice").unwrap();
    fat.create_file("two", "second", "alice").unwrap();

    // Same clock instant: batches must still differ
    let one = fat.table().get("one").unwrap().head_block_ref;
    let two = fat.table().get("two").unwrap().head_block_ref;
    assert_ne!(one.batch, two.batch);

    let reopened = FatSystem::with_backend(&StoreConfig::volatile(4), backend, clock).unwrap();
    assert_eq!(reopened.open_file("two", "alice").unwrap().content, "second");
}

#[test]
fn test_long_names_fit_record_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut fat = persistent_system(dir.path(), 4);

    let longest = "n".repeat(246);
    fat.create_file(&longest, "hello", "alice").unwrap();
    assert!(dir.path().join(format!("fat/{}.json", longest)).exists());

    let wide = "é".repeat(123);
    fat.create_file(&wide, "hello", "alice").unwrap();
    assert_eq!(fat.open_file(&wide, "alice").unwrap().content, "hello");

    let blocks_before = fat.table().blocks().len();
    for name in ["n".repeat(247), "n".repeat(250), "é".repeat(200)] {
        assert!(matches!(
            fat.create_file(&name, "hello", "alice"),
            Err(CreateError::InvalidName(_))
        ));
    }
    assert_eq!(fat.table().blocks().len(), blocks_before);
}
