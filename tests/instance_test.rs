// ==========================================
// 进程级共享实例: 打开失败后不重试
// ==========================================
// 独立测试二进制 (独立进程)，避免与其他测试共享全局实例
// ==========================================

mod test_helpers;

use questions_db::config::db_config::DB_PATH_ENV;
use questions_db::{QuestionsDbConnection, RepositoryError};

#[test]
fn test_instance_failure_is_sticky() {
    questions_db::logging::init_test();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("later.db");
    std::env::set_var(DB_PATH_ENV, path.to_str().unwrap());

    let first = QuestionsDbConnection::instance();
    assert!(matches!(first, Err(RepositoryError::StorageUnavailable(_))));

    // 文件随后出现，共享实例仍然保持首次的失败
    {
        let conn = test_helpers::open_test_connection(path.to_str().unwrap()).unwrap();
        conn.execute_batch("CREATE TABLE users (id INTEGER PRIMARY KEY, fname TEXT, lname TEXT);")
            .unwrap();
    }

    let second = QuestionsDbConnection::instance();
    match (first, second) {
        (Err(RepositoryError::StorageUnavailable(a)), Err(RepositoryError::StorageUnavailable(b))) => {
            assert_eq!(a, b)
        }
        _ => panic!("第二次调用应返回同一个 StorageUnavailable"),
    }
}
