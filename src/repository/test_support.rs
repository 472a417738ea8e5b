// ==========================================
// 仓储单元测试公共夹具 (内存库)
// ==========================================

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

pub const SCHEMA_SQL: &str = r#"
CREATE TABLE users (
    id INTEGER PRIMARY KEY,
    fname TEXT NOT NULL,
    lname TEXT NOT NULL
);

CREATE TABLE questions (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    body TEXT NOT NULL,
    user_id INTEGER NOT NULL REFERENCES users(id)
);

CREATE TABLE replies (
    id INTEGER PRIMARY KEY,
    parent_id INTEGER REFERENCES replies(id),
    body TEXT NOT NULL,
    question_id INTEGER NOT NULL REFERENCES questions(id),
    user_id INTEGER NOT NULL REFERENCES users(id)
);

CREATE TABLE question_follows (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL REFERENCES users(id),
    question_id INTEGER NOT NULL REFERENCES questions(id)
);

CREATE TABLE question_likes (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL REFERENCES users(id),
    question_id INTEGER NOT NULL REFERENCES questions(id)
);
"#;

// 数据概况:
// - 问题 10 与 12 正文相同 ("body-A")
// - 关注数: 10 → 3, 12 → 2, 11 → 1, 13 → 0
// - 点赞数: 10 → 2, 12 → 1, 11/13 → 0
// - 用户 4 没有任何问题/回复/关注/点赞
pub const SEED_SQL: &str = r#"
INSERT INTO users (id, fname, lname) VALUES
    (1, 'Ada', 'L'),
    (2, 'Grace', 'H'),
    (3, 'Alan', 'T'),
    (4, 'Edsger', 'D');

INSERT INTO questions (id, title, body, user_id) VALUES
    (10, 'Q1', 'body-A', 1),
    (11, 'Q2', 'body-B', 1),
    (12, 'Q3', 'body-A', 2),
    (13, 'Q4', 'body-C', 3);

INSERT INTO replies (id, parent_id, body, question_id, user_id) VALUES
    (100, NULL, 'top', 10, 2),
    (101, 100, 'child', 10, 1),
    (102, 101, 'grandchild', 10, 3),
    (103, 100, 'sibling', 10, 3),
    (104, NULL, 'other', 11, 3);

INSERT INTO question_follows (id, user_id, question_id) VALUES
    (1, 1, 10),
    (2, 2, 10),
    (3, 3, 10),
    (4, 1, 12),
    (5, 2, 12),
    (6, 3, 11);

INSERT INTO question_likes (id, user_id, question_id) VALUES
    (1, 1, 10),
    (2, 2, 10),
    (3, 3, 12);
"#;

/// 建表 + 种子数据的内存库
pub fn setup_test_db() -> Arc<Mutex<Connection>> {
    let conn = Connection::open_in_memory().unwrap();
    crate::db::configure_sqlite_connection(&conn, crate::db::DEFAULT_BUSY_TIMEOUT_MS).unwrap();
    conn.execute_batch(SCHEMA_SQL).unwrap();
    conn.execute_batch(SEED_SQL).unwrap();
    Arc::new(Mutex::new(conn))
}

/// 只建表、无数据的内存库
pub fn setup_empty_db() -> Arc<Mutex<Connection>> {
    let conn = Connection::open_in_memory().unwrap();
    crate::db::configure_sqlite_connection(&conn, crate::db::DEFAULT_BUSY_TIMEOUT_MS).unwrap();
    conn.execute_batch(SCHEMA_SQL).unwrap();
    Arc::new(Mutex::new(conn))
}
