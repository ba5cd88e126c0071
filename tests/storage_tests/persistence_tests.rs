//! Databases on image files

use tinydb::storage::{FileDevice, StorageDevice};
use tinydb::{ColumnDef, Config, Database, SyncStrategy, Value};

use crate::setup_temp_image;

fn config(path: &std::path::Path, strategy: SyncStrategy) -> Config {
    Config::builder()
        .device_len(256)
        .image_path(path)
        .sync_strategy(strategy)
        .build()
}

#[test]
fn test_database_survives_restart() {
    let (_temp, path) = setup_temp_image();

    {
        let mut db = Database::open_image(config(&path, SyncStrategy::EveryCommit)).unwrap();
        db.create_table("T", 3, &[ColumnDef::new("a", "INT"), ColumnDef::new("b", "CHAR5")])
            .unwrap();

        let mut table = db.open_table("T").unwrap();
        for (a, b) in [(1i16, "x"), (2, "y"), (3, "z"), (4, "w")] {
            table.begin_row().set("a", a).set("b", b).commit().unwrap();
        }
    }

    let mut db = Database::open_image(config(&path, SyncStrategy::EveryCommit)).unwrap();
    assert_eq!(db.table_count(), 1);

    let table = db.open_table("T").unwrap();
    assert_eq!(table.count(), 3);
    assert_eq!(table.select("a", 0).unwrap(), Value::Int(2));
    assert_eq!(table.select("b", 2).unwrap(), Value::Text("w".to_string()));
}

#[test]
fn test_every_commit_writes_through() {
    let (_temp, path) = setup_temp_image();
    let mut db = Database::open_image(config(&path, SyncStrategy::EveryCommit)).unwrap();
    db.create_table("T", 2, &[ColumnDef::new("a", "BYTE")]).unwrap();

    assert!(!db.device().is_dirty());
    let on_disk = FileDevice::load(&path).unwrap();
    // table count at N-6
    assert_eq!(on_disk.read_byte(256 - 6), 1);
}

#[test]
fn test_manual_sync_defers_writes() {
    let (_temp, path) = setup_temp_image();
    let mut db = Database::open_image(config(&path, SyncStrategy::Manual)).unwrap();
    db.create_table("T", 2, &[ColumnDef::new("a", "BYTE")]).unwrap();

    assert!(db.device().is_dirty());
    assert_eq!(FileDevice::load(&path).unwrap().read_byte(256 - 6), 0);

    db.sync().unwrap();
    assert!(!db.device().is_dirty());
    assert_eq!(FileDevice::load(&path).unwrap().read_byte(256 - 6), 1);
}

#[test]
fn test_every_n_commits() {
    let (_temp, path) = setup_temp_image();
    let strategy = SyncStrategy::EveryNCommits { count: 2 };
    // init is the first commit point
    let mut db = Database::open_image(config(&path, strategy)).unwrap();
    assert!(db.device().is_dirty());

    db.create_table("T", 2, &[ColumnDef::new("a", "BYTE")]).unwrap();
    assert!(!db.device().is_dirty());

    db.create_table("U", 2, &[ColumnDef::new("a", "BYTE")]).unwrap();
    assert!(db.device().is_dirty());
    assert_eq!(FileDevice::load(&path).unwrap().read_byte(256 - 6), 1);
}
