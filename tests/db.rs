use diesel::RunQueryDsl;
use member_query::db::{ConnectionOptions, establish_connection_pool_with, get_connection};

mod common;

#[test]
fn test_creates_and_removes_db_files() {
    let test_db = common::TestDb::new("test_creates_and_removes_db_files.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
}

#[test]
fn test_pool_applies_connection_pragmas() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("test_pool_applies_connection_pragmas.db");
    let url = path.to_str().expect("utf-8 temp path");

    let pool = establish_connection_pool_with(url, ConnectionOptions::default())
        .expect("create pool");
    let mut conn = get_connection(&pool).expect("get connection");

    diesel::sql_query("CREATE TABLE parent (id INTEGER PRIMARY KEY)")
        .execute(&mut *conn)
        .expect("create parent");
    diesel::sql_query(
        "CREATE TABLE child (id INTEGER PRIMARY KEY, parent_id INTEGER REFERENCES parent(id))",
    )
    .execute(&mut *conn)
    .expect("create child");

    let orphan = diesel::sql_query("INSERT INTO child (id, parent_id) VALUES (1, 99)")
        .execute(&mut *conn);
    assert!(orphan.is_err(), "foreign keys should be enforced");
}
