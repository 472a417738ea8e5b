// ==========================================
// 问答系统数据访问层 - 行映射
// ==========================================
// 每个实体显式声明所需列，按列名取值
// 列缺失或类型不符一律报 MalformedRow，不构造残缺实体
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{Connection, Params, Result as SqliteResult, Row, Statement};

/// 由一行结果构造实体
pub trait FromRow: Sized {
    /// 实体名 (用于错误信息)
    const ENTITY: &'static str;

    /// 构造所需的全部列
    const COLUMNS: &'static [&'static str];

    fn from_row(row: &Row<'_>) -> SqliteResult<Self>;
}

/// 在读取任何行之前校验语句的结果列
///
/// 空结果集同样能发现表结构漂移。WHERE/JOIN 中引用的列缺失时，
/// 准备语句阶段即失败，同样转换为 MalformedRow。
pub fn ensure_columns<T: FromRow>(stmt: &Statement<'_>) -> RepositoryResult<()> {
    let names = stmt.column_names();
    for column in T::COLUMNS {
        if !names.iter().any(|name| name == column) {
            return Err(RepositoryError::MalformedRow {
                entity: T::ENTITY.to_string(),
                column: column.to_string(),
                reason: "列不存在".to_string(),
            });
        }
    }
    Ok(())
}

/// 执行查询并映射全部结果行 (保持数据库返回顺序)
pub fn query_all<T, P>(conn: &Connection, sql: &str, params: P) -> RepositoryResult<Vec<T>>
where
    T: FromRow,
    P: Params,
{
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| RepositoryError::from_row_error(T::ENTITY, e))?;
    ensure_columns::<T>(&stmt)?;

    let rows = stmt
        .query_map(params, |row| T::from_row(row))
        .map_err(|e| RepositoryError::from_row_error(T::ENTITY, e))?
        .collect::<SqliteResult<Vec<_>>>()
        .map_err(|e| RepositoryError::from_row_error(T::ENTITY, e))?;

    Ok(rows)
}

/// 执行查询并映射首行；无结果时返回 None
pub fn query_optional<T, P>(conn: &Connection, sql: &str, params: P) -> RepositoryResult<Option<T>>
where
    T: FromRow,
    P: Params,
{
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| RepositoryError::from_row_error(T::ENTITY, e))?;
    ensure_columns::<T>(&stmt)?;

    let mut rows = stmt
        .query(params)
        .map_err(|e| RepositoryError::from_row_error(T::ENTITY, e))?;
    let first = match rows.next()? {
        Some(row) => {
            Some(T::from_row(row).map_err(|e| RepositoryError::from_row_error(T::ENTITY, e))?)
        }
        None => None,
    };

    Ok(first)
}
