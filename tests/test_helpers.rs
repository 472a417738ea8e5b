// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、测试数据写入等功能
// ==========================================

#![allow(dead_code)]

use rusqlite::{params, Connection};
use std::error::Error;
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("临时文件路径不是合法 UTF-8")?
        .to_string();

    let conn = Connection::open(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开可写测试连接 (仅测试写入数据用，被测代码只读打开)
pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(conn)
}

/// 初始化数据库 schema
fn init_schema(conn: &Connection) -> Result<(), Box<dyn Error>> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            fname TEXT NOT NULL,
            lname TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS questions (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            body TEXT NOT NULL,
            user_id INTEGER NOT NULL REFERENCES users(id)
        );

        CREATE TABLE IF NOT EXISTS replies (
            id INTEGER PRIMARY KEY,
            parent_id INTEGER REFERENCES replies(id),
            body TEXT NOT NULL,
            question_id INTEGER NOT NULL REFERENCES questions(id),
            user_id INTEGER NOT NULL REFERENCES users(id)
        );

        CREATE TABLE IF NOT EXISTS question_follows (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id),
            question_id INTEGER NOT NULL REFERENCES questions(id)
        );

        CREATE TABLE IF NOT EXISTS question_likes (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id),
            question_id INTEGER NOT NULL REFERENCES questions(id)
        );
        "#,
    )?;
    Ok(())
}

// ==========================================
// 测试数据写入
// ==========================================

pub fn insert_user(conn: &Connection, id: i64, fname: &str, lname: &str) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT INTO users (id, fname, lname) VALUES (?1, ?2, ?3)",
        params![id, fname, lname],
    )?;
    Ok(())
}

pub fn insert_question(
    conn: &Connection,
    id: i64,
    title: &str,
    body: &str,
    user_id: i64,
) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT INTO questions (id, title, body, user_id) VALUES (?1, ?2, ?3, ?4)",
        params![id, title, body, user_id],
    )?;
    Ok(())
}

pub fn insert_reply(
    conn: &Connection,
    id: i64,
    parent_id: Option<i64>,
    body: &str,
    question_id: i64,
    user_id: i64,
) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT INTO replies (id, parent_id, body, question_id, user_id) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![id, parent_id, body, question_id, user_id],
    )?;
    Ok(())
}

pub fn insert_follow(conn: &Connection, id: i64, user_id: i64, question_id: i64) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT INTO question_follows (id, user_id, question_id) VALUES (?1, ?2, ?3)",
        params![id, user_id, question_id],
    )?;
    Ok(())
}

pub fn insert_like(conn: &Connection, id: i64, user_id: i64, question_id: i64) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT INTO question_likes (id, user_id, question_id) VALUES (?1, ?2, ?3)",
        params![id, user_id, question_id],
    )?;
    Ok(())
}

/// 写入一组完整场景数据
///
/// - 用户: Ada(1) / Grace(2) / Alan(3)
/// - 问题: 10 "body-A" (Ada), 11 "body-A" (Grace, 与 10 正文相同), 12 "body-B" (Alan)
/// - 点赞: 问题 10 ← Ada, Grace
/// - 关注: 问题 11 ← 全部 3 人, 问题 10 ← Ada, Grace, 问题 12 ← Alan
/// - 回复: 100 (顶层) → 101 → 102，103 为问题 12 的顶层回复
pub fn insert_scenario(conn: &Connection) -> Result<(), Box<dyn Error>> {
    insert_user(conn, 1, "Ada", "L")?;
    insert_user(conn, 2, "Grace", "H")?;
    insert_user(conn, 3, "Alan", "T")?;

    insert_question(conn, 10, "Q1", "body-A", 1)?;
    insert_question(conn, 11, "Q2", "body-A", 2)?;
    insert_question(conn, 12, "Q3", "body-B", 3)?;

    insert_like(conn, 1, 1, 10)?;
    insert_like(conn, 2, 2, 10)?;

    insert_follow(conn, 1, 1, 11)?;
    insert_follow(conn, 2, 2, 11)?;
    insert_follow(conn, 3, 3, 11)?;
    insert_follow(conn, 4, 1, 10)?;
    insert_follow(conn, 5, 2, 10)?;
    insert_follow(conn, 6, 3, 12)?;

    insert_reply(conn, 100, None, "hi", 10, 2)?;
    insert_reply(conn, 101, Some(100), "re: hi", 10, 1)?;
    insert_reply(conn, 102, Some(101), "re: re: hi", 10, 3)?;
    insert_reply(conn, 103, None, "first", 12, 1)?;

    Ok(())
}
