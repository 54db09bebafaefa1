mod common;

use catalog_api::db::run_migrations;

#[test]
fn test_creates_and_removes_db_files() {
    let dir;

    {
        let test_db = common::TestDb::new("test_connection.db");
        dir = test_db.path();
        let conn = test_db.pool().get();
        assert!(conn.is_ok());
        assert!(dir.join("test_connection.db").exists());
    }

    assert!(!dir.exists());
}

#[test]
fn test_migrations_are_idempotent() {
    let test_db = common::TestDb::new("test_migrations.db");

    let applied = run_migrations(&test_db.pool()).expect("second migration run");

    assert_eq!(applied, 0);
}
