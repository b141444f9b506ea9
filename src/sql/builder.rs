//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for the `todos` table.

use super::params::BindValue;

/// Column list returned by every statement that yields rows.
const COLUMNS: &str = "id, title, completed";

/// Sortable columns for the list endpoint. `Title` compares
/// case-insensitively.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Title,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    fn keyword(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: impl Into<BindValue>) {
        self.params.push(v.into());
    }
}

/// Escape `%`, `_` and `\` so user-supplied search text matches literally
/// inside a LIKE pattern (paired with `ESCAPE '\'`).
pub fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Shared WHERE assembly for the list and count statements: exact match on
/// `completed`, case-insensitive substring match on `title`.
fn where_clause(q: &mut QueryBuf, completed: Option<bool>, search: Option<&str>) -> String {
    let mut parts = Vec::new();
    if let Some(flag) = completed {
        q.push_param(flag);
        parts.push("completed = ?");
    }
    if let Some(needle) = search {
        q.push_param(format!("%{}%", escape_like(needle)));
        parts.push("title LIKE ? ESCAPE '\\'");
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", parts.join(" AND "))
    }
}

/// SELECT one row by primary key.
pub fn select_by_id(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(id);
    q.sql = format!("SELECT {} FROM todos WHERE id = ?", COLUMNS);
    q
}

/// SELECT every row in default order (newest first).
pub fn select_all() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} FROM todos ORDER BY id DESC", COLUMNS);
    q
}

/// SELECT one page of filtered, sorted rows.
pub fn select_page(
    completed: Option<bool>,
    search: Option<&str>,
    sort: SortKey,
    order: Order,
    limit: i64,
    offset: i64,
) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_sql = where_clause(&mut q, completed, search);
    let order_sql = match sort {
        SortKey::Id => format!(" ORDER BY id {}", order.keyword()),
        SortKey::Title => format!(" ORDER BY title COLLATE NOCASE {}", order.keyword()),
    };
    q.sql = format!(
        "SELECT {} FROM todos{}{} LIMIT ? OFFSET ?",
        COLUMNS, where_sql, order_sql
    );
    q.push_param(limit);
    q.push_param(offset);
    q
}

/// COUNT of rows matching the same filter as [`select_page`], taken before
/// pagination.
pub fn count(completed: Option<bool>, search: Option<&str>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_sql = where_clause(&mut q, completed, search);
    q.sql = format!("SELECT COUNT(*) FROM todos{}", where_sql);
    q
}

/// SELECT the id of a live row whose title collides case-insensitively,
/// optionally excluding the row being updated.
pub fn select_conflicting(title: &str, exclude_id: Option<i64>) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(title);
    let mut sql = "SELECT id FROM todos WHERE title = ? COLLATE NOCASE".to_string();
    if let Some(id) = exclude_id {
        q.push_param(id);
        sql.push_str(" AND id <> ?");
    }
    q.sql = sql;
    q
}

/// INSERT a new row. New todos always start incomplete.
pub fn insert(title: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(title);
    q.sql = format!(
        "INSERT INTO todos (title, completed) VALUES (?, 0) RETURNING {}",
        COLUMNS
    );
    q
}

/// UPDATE by id: SET only the supplied fields. With nothing to set, falls
/// back to a plain SELECT so the caller still observes the current row.
pub fn update(id: i64, title: Option<&str>, completed: Option<bool>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    if let Some(t) = title {
        q.push_param(t);
        sets.push("title = ?");
    }
    if let Some(c) = completed {
        q.push_param(c);
        sets.push("completed = ?");
    }
    if sets.is_empty() {
        return select_by_id(id);
    }
    q.push_param(id);
    q.sql = format!(
        "UPDATE todos SET {} WHERE id = ? RETURNING {}",
        sets.join(", "),
        COLUMNS
    );
    q
}

/// DELETE by id. The caller checks rows-affected to detect a missing row.
pub fn delete(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(id);
    q.sql = "DELETE FROM todos WHERE id = ?".to_string();
    q
}
