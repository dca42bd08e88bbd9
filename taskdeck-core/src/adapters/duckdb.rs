//! DuckDB store implementation

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use duckdb::{params, Connection};
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{Page, SortPagination, SortOrder, Tag, Task, TaskList, TaskStatus, UserId};
use crate::ports::{ListFilter, ListStore, TaskFilter, TaskStore};
use crate::services::MigrationService;

/// DuckDB-backed store for lists, tasks, and tags
pub struct DuckDbStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl DuckDbStore {
    /// Open (or create) the database at the given path.
    ///
    /// Extension autoloading is disabled to avoid macOS code signing
    /// issues with cached extensions in ~/.duckdb/extensions.
    pub fn new(db_path: &Path) -> Result<Self> {
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        let conn = Connection::open_with_flags(db_path, config)?;

        Ok(Self {
            conn: Mutex::new(conn),
            db_path: db_path.to_path_buf(),
        })
    }

    /// In-memory store, used by tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
            db_path: PathBuf::from(":memory:"),
        })
    }

    /// Run pending migrations
    pub fn run_migrations(&self) -> anyhow::Result<crate::services::MigrationResult> {
        let conn = self.conn.lock().unwrap();
        MigrationService::new(&conn).run_pending()
    }

    /// Ensure database schema exists (runs pending migrations)
    pub fn ensure_schema(&self) -> Result<()> {
        self.run_migrations()
            .map_err(|e| Error::database(e.to_string()))?;
        Ok(())
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn row_to_list(row: &duckdb::Row) -> TaskList {
        // 0: list_id, 1: name, 2: created_by, 3: is_public
        let id_str: String = row.get(0).unwrap_or_default();
        let owner_str: String = row.get(2).unwrap_or_default();

        TaskList {
            id: Uuid::parse_str(&id_str).unwrap_or_default(),
            name: row.get(1).unwrap_or_default(),
            created_by: UserId(Uuid::parse_str(&owner_str).unwrap_or_default()),
            is_public: row.get(3).unwrap_or(false),
        }
    }

    fn row_to_task(row: &duckdb::Row) -> Task {
        // 0: task_id, 1: title, 2: description, 3: due_date, 4: status,
        // 5: list_id, 6: created_by, 7: assigned_to, 8: ord
        let id_str: String = row.get(0).unwrap_or_default();
        let due_str: Option<String> = row.get(3).ok();
        let status_id: i32 = row.get(4).unwrap_or(1);
        let list_str: String = row.get(5).unwrap_or_default();
        let creator_str: String = row.get(6).unwrap_or_default();
        let assignee_str: String = row.get(7).unwrap_or_default();

        Task {
            id: Uuid::parse_str(&id_str).unwrap_or_default(),
            title: row.get(1).unwrap_or_default(),
            description: row.get(2).ok(),
            due_date: due_str.as_deref().and_then(parse_timestamp),
            status: TaskStatus::from_id(status_id).unwrap_or_default(),
            list_id: Uuid::parse_str(&list_str).unwrap_or_default(),
            created_by: UserId(Uuid::parse_str(&creator_str).unwrap_or_default()),
            assigned_to: UserId(Uuid::parse_str(&assignee_str).unwrap_or_default()),
            order: row.get(8).unwrap_or(0),
            tags: Vec::new(),
        }
    }

    fn row_to_tag(row: &duckdb::Row) -> Tag {
        // 0: tag_id, 1: name, 2: color, 3: created_by
        let id_str: String = row.get(0).unwrap_or_default();
        let owner_str: String = row.get(3).unwrap_or_default();

        Tag {
            id: Uuid::parse_str(&id_str).unwrap_or_default(),
            name: row.get(1).unwrap_or_default(),
            color: row.get(2).unwrap_or_default(),
            created_by: UserId(Uuid::parse_str(&owner_str).unwrap_or_default()),
        }
    }

    /// Build a WHERE clause and parameter list from a task filter.
    /// The clause starts with " WHERE" or is empty.
    fn task_filter_sql(filter: &TaskFilter) -> (String, Vec<Box<dyn duckdb::ToSql>>) {
        let mut clauses: Vec<String> = Vec::new();
        let mut params: Vec<Box<dyn duckdb::ToSql>> = Vec::new();

        if let Some(list_id) = filter.list_id {
            clauses.push("list_id = ?".to_string());
            params.push(Box::new(list_id.to_string()));
        }
        if let Some(list_ids) = &filter.list_ids {
            if list_ids.is_empty() {
                // Empty set matches nothing
                clauses.push("1 = 0".to_string());
            } else {
                let placeholders = vec!["?"; list_ids.len()].join(", ");
                clauses.push(format!("list_id IN ({placeholders})"));
                for id in list_ids {
                    params.push(Box::new(id.to_string()));
                }
            }
        }
        if let Some(status_id) = filter.status_id {
            clauses.push("status = ?".to_string());
            params.push(Box::new(status_id));
        }
        if filter.exclude_completed {
            clauses.push(format!("status <> {}", TaskStatus::Completed.id()));
        }
        if let Some(created_by) = filter.created_by {
            clauses.push("created_by = ?".to_string());
            params.push(Box::new(created_by.to_string()));
        }
        if let Some(tag_id) = filter.tag_id {
            clauses.push("task_id IN (SELECT task_id FROM task_tags WHERE tag_id = ?)".to_string());
            params.push(Box::new(tag_id.to_string()));
        }
        // Dates stored as RFC 3339 strings; the first 10 characters
        // are the UTC date, and ISO dates compare lexicographically.
        if let Some(due_on) = filter.due_on {
            clauses.push("due_date IS NOT NULL AND substr(due_date, 1, 10) = ?".to_string());
            params.push(Box::new(due_on.to_string()));
        }
        if let Some(due_after) = filter.due_after {
            clauses.push("due_date IS NOT NULL AND substr(due_date, 1, 10) > ?".to_string());
            params.push(Box::new(due_after.to_string()));
        }
        if let Some(search) = &filter.search {
            // contains() is case-sensitive in DuckDB
            clauses.push("(contains(title, ?) OR contains(coalesce(description, ''), ?))".to_string());
            params.push(Box::new(search.clone()));
            params.push(Box::new(search.clone()));
        }

        if clauses.is_empty() {
            (String::new(), params)
        } else {
            (format!(" WHERE {}", clauses.join(" AND ")), params)
        }
    }

    /// Translate an external sort column to the stored column name.
    /// Unknown columns fall back to manual ordering.
    fn sort_column(sort_by: Option<&str>) -> &'static str {
        match sort_by {
            Some("title") => "title",
            Some("dueDate") | Some("due_date") => "due_date",
            Some("status") => "status",
            _ => "ord",
        }
    }

    /// Attach tags to the given tasks in one pass
    fn load_tags(conn: &Connection, tasks: &mut [Task]) -> Result<()> {
        if tasks.is_empty() {
            return Ok(());
        }

        let mut stmt = conn.prepare(
            "SELECT tt.task_id, t.tag_id, t.name, t.color, t.created_by
             FROM task_tags tt
             JOIN tags t ON t.tag_id = tt.tag_id",
        )?;

        let links: Vec<(String, Tag)> = stmt
            .query_map([], |row| {
                let task_id: String = row.get(0)?;
                let tag_id: String = row.get(1)?;
                let owner: String = row.get(4)?;
                Ok((
                    task_id,
                    Tag {
                        id: Uuid::parse_str(&tag_id).unwrap_or_default(),
                        name: row.get(2)?,
                        color: row.get(3)?,
                        created_by: UserId(Uuid::parse_str(&owner).unwrap_or_default()),
                    },
                ))
            })?
            .filter_map(|r| r.ok())
            .collect();

        for task in tasks.iter_mut() {
            let id_str = task.id.to_string();
            task.tags = links
                .iter()
                .filter(|(tid, _)| *tid == id_str)
                .map(|(_, tag)| tag.clone())
                .collect();
        }

        Ok(())
    }
}

const TASK_COLUMNS: &str =
    "task_id, title, description, due_date, status, list_id, created_by, assigned_to, ord";

#[async_trait]
impl ListStore for DuckDbStore {
    async fn get_list_by_id(&self, id: Uuid) -> Result<Option<TaskList>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT list_id, name, created_by, is_public FROM lists WHERE list_id = ?",
        )?;

        let list = stmt
            .query_row([id.to_string()], |row| Ok(Self::row_to_list(row)))
            .ok();

        Ok(list)
    }

    async fn get_all_lists(&self) -> Result<Vec<TaskList>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT list_id, name, created_by, is_public FROM lists ORDER BY name")?;

        let lists = stmt
            .query_map([], |row| Ok(Self::row_to_list(row)))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(lists)
    }

    async fn find_lists(&self, filter: &ListFilter) -> Result<Vec<TaskList>> {
        let mut clauses: Vec<String> = Vec::new();
        let mut sql_params: Vec<Box<dyn duckdb::ToSql>> = Vec::new();

        if let Some(is_public) = filter.is_public {
            clauses.push("is_public = ?".to_string());
            sql_params.push(Box::new(is_public));
        }
        if let Some(created_by) = filter.created_by {
            clauses.push("created_by = ?".to_string());
            sql_params.push(Box::new(created_by.to_string()));
        }

        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT list_id, name, created_by, is_public FROM lists{where_clause} ORDER BY name"
        ))?;

        let param_refs: Vec<&dyn duckdb::ToSql> = sql_params.iter().map(|b| b.as_ref()).collect();
        let lists = stmt
            .query_map(param_refs.as_slice(), |row| Ok(Self::row_to_list(row)))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(lists)
    }

    async fn insert_list(&self, list: &TaskList) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO lists (list_id, name, created_by, is_public) VALUES (?, ?, ?, ?)",
            params![
                list.id.to_string(),
                &list.name,
                list.created_by.to_string(),
                list.is_public,
            ],
        )?;
        Ok(())
    }

    async fn update_list(&self, list: &TaskList) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE lists SET name = ?, created_by = ?, is_public = ? WHERE list_id = ?",
            params![
                &list.name,
                list.created_by.to_string(),
                list.is_public,
                list.id.to_string(),
            ],
        )?;
        Ok(())
    }

    async fn delete_list(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let id_str = id.to_string();

        // Tasks live and die with their list
        conn.execute(
            "DELETE FROM task_tags WHERE task_id IN (SELECT task_id FROM tasks WHERE list_id = ?)",
            [&id_str],
        )?;
        conn.execute("DELETE FROM tasks WHERE list_id = ?", [&id_str])?;
        let deleted = conn.execute("DELETE FROM lists WHERE list_id = ?", [&id_str])?;

        Ok(deleted > 0)
    }
}

#[async_trait]
impl TaskStore for DuckDbStore {
    async fn get_task_by_id(&self, id: Uuid) -> Result<Option<Task>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE task_id = ?"
        ))?;

        let task = stmt
            .query_row([id.to_string()], |row| Ok(Self::row_to_task(row)))
            .ok();

        match task {
            Some(task) => {
                let mut tasks = vec![task];
                Self::load_tags(&conn, &mut tasks)?;
                Ok(tasks.pop())
            }
            None => Ok(None),
        }
    }

    async fn get_all_tasks(&self) -> Result<Vec<Task>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY ord, task_id"
        ))?;

        let mut tasks: Vec<Task> = stmt
            .query_map([], |row| Ok(Self::row_to_task(row)))?
            .filter_map(|r| r.ok())
            .collect();

        Self::load_tags(&conn, &mut tasks)?;
        Ok(tasks)
    }

    async fn find_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let (where_clause, sql_params) = Self::task_filter_sql(filter);

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks{where_clause} ORDER BY ord, task_id"
        ))?;

        let param_refs: Vec<&dyn duckdb::ToSql> = sql_params.iter().map(|b| b.as_ref()).collect();
        let mut tasks: Vec<Task> = stmt
            .query_map(param_refs.as_slice(), |row| Ok(Self::row_to_task(row)))?
            .filter_map(|r| r.ok())
            .collect();

        Self::load_tags(&conn, &mut tasks)?;
        Ok(tasks)
    }

    async fn find_tasks_paged(
        &self,
        filter: &TaskFilter,
        sort_pagination: &SortPagination,
    ) -> Result<Page<Task>> {
        let (where_clause, sql_params) = Self::task_filter_sql(filter);
        let param_refs: Vec<&dyn duckdb::ToSql> = sql_params.iter().map(|b| b.as_ref()).collect();

        let conn = self.conn.lock().unwrap();

        let total_count: usize = conn.query_row(
            &format!("SELECT COUNT(*) FROM tasks{where_clause}"),
            param_refs.as_slice(),
            |row| row.get::<_, i64>(0),
        )? as usize;

        let column = Self::sort_column(sort_pagination.sort_by.as_deref());
        let direction = match sort_pagination.sort_order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };

        // Offset is snapped to a page boundary
        let page = sort_pagination.page();
        let limit = sort_pagination.limit;
        let offset = (page - 1) * limit;

        let mut stmt = conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks{where_clause}
             ORDER BY {column} {direction}, ord, task_id
             LIMIT {limit} OFFSET {offset}"
        ))?;

        let mut tasks: Vec<Task> = stmt
            .query_map(param_refs.as_slice(), |row| Ok(Self::row_to_task(row)))?
            .filter_map(|r| r.ok())
            .collect();

        Self::load_tags(&conn, &mut tasks)?;

        Ok(Page::new(tasks, total_count, page, limit))
    }

    async fn insert_task(&self, task: &Task) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        let list_exists: i64 = conn.query_row(
            "SELECT COUNT(*) FROM lists WHERE list_id = ?",
            [task.list_id.to_string()],
            |row| row.get(0),
        )?;
        if list_exists == 0 {
            return Err(Error::database(format!(
                "foreign key violation: list {} does not exist",
                task.list_id
            )));
        }

        conn.execute(
            &format!("INSERT INTO tasks ({TASK_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"),
            params![
                task.id.to_string(),
                &task.title,
                &task.description,
                task.due_date.map(|d| d.to_rfc3339()),
                task.status.id(),
                task.list_id.to_string(),
                task.created_by.to_string(),
                task.assigned_to.to_string(),
                task.order,
            ],
        )?;
        Ok(())
    }

    async fn update_task(&self, task: &Task) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE tasks SET title = ?, description = ?, due_date = ?, status = ?,
                    list_id = ?, created_by = ?, assigned_to = ?, ord = ?
             WHERE task_id = ?",
            params![
                &task.title,
                &task.description,
                task.due_date.map(|d| d.to_rfc3339()),
                task.status.id(),
                task.list_id.to_string(),
                task.created_by.to_string(),
                task.assigned_to.to_string(),
                task.order,
                task.id.to_string(),
            ],
        )?;
        Ok(())
    }

    async fn delete_task(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let id_str = id.to_string();
        conn.execute("DELETE FROM task_tags WHERE task_id = ?", [&id_str])?;
        let deleted = conn.execute("DELETE FROM tasks WHERE task_id = ?", [&id_str])?;
        Ok(deleted > 0)
    }

    async fn insert_tag(&self, tag: &Tag) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO tags (tag_id, name, color, created_by) VALUES (?, ?, ?, ?)",
            params![
                tag.id.to_string(),
                &tag.name,
                &tag.color,
                tag.created_by.to_string(),
            ],
        )?;
        Ok(())
    }

    async fn get_tags(&self) -> Result<Vec<Tag>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT tag_id, name, color, created_by FROM tags ORDER BY name")?;

        let tags = stmt
            .query_map([], |row| Ok(Self::row_to_tag(row)))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(tags)
    }

    async fn tag_task(&self, task_id: Uuid, tag_id: Uuid) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        let tag_exists: i64 = conn.query_row(
            "SELECT COUNT(*) FROM tags WHERE tag_id = ?",
            [tag_id.to_string()],
            |row| row.get(0),
        )?;
        if tag_exists == 0 {
            return Err(Error::database(format!("tag {tag_id} does not exist")));
        }

        let task_exists: i64 = conn.query_row(
            "SELECT COUNT(*) FROM tasks WHERE task_id = ?",
            [task_id.to_string()],
            |row| row.get(0),
        )?;
        if task_exists == 0 {
            return Err(Error::database(format!("task {task_id} does not exist")));
        }

        conn.execute(
            "INSERT INTO task_tags (task_id, tag_id) VALUES (?, ?)
             ON CONFLICT DO NOTHING",
            params![task_id.to_string(), tag_id.to_string()],
        )?;

        Ok(())
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn store() -> DuckDbStore {
        let store = DuckDbStore::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store
    }

    #[tokio::test]
    async fn test_list_round_trip() {
        let store = store();
        let owner = UserId::new();
        let list = TaskList::new(Uuid::new_v4(), "Groceries", owner, false);

        store.insert_list(&list).await.unwrap();

        let loaded = store.get_list_by_id(list.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Groceries");
        assert_eq!(loaded.created_by, owner);
        assert!(!loaded.is_public);
    }

    #[tokio::test]
    async fn test_insert_task_requires_existing_list() {
        let store = store();
        let task = Task::new(Uuid::new_v4(), "Orphan", Uuid::new_v4(), UserId::new());

        let err = store.insert_task(&task).await.unwrap_err();
        assert!(err.to_string().contains("foreign key violation"));
    }

    #[tokio::test]
    async fn test_delete_list_cascades_tasks() {
        let store = store();
        let owner = UserId::new();
        let list = TaskList::new(Uuid::new_v4(), "Work", owner, false);
        store.insert_list(&list).await.unwrap();

        let task = Task::new(Uuid::new_v4(), "Report", list.id, owner);
        store.insert_task(&task).await.unwrap();

        assert!(store.delete_list(list.id).await.unwrap());
        assert!(store.get_task_by_id(task.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_tasks_by_due_date() {
        let store = store();
        let owner = UserId::new();
        let list = TaskList::new(Uuid::new_v4(), "Chores", owner, false);
        store.insert_list(&list).await.unwrap();

        let mut today_task = Task::new(Uuid::new_v4(), "Today", list.id, owner);
        today_task.due_date = Some(Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap());
        store.insert_task(&today_task).await.unwrap();

        let mut later_task = Task::new(Uuid::new_v4(), "Later", list.id, owner);
        later_task.due_date = Some(Utc.with_ymd_and_hms(2026, 3, 20, 9, 0, 0).unwrap());
        store.insert_task(&later_task).await.unwrap();

        let filter = TaskFilter {
            due_on: Some(chrono::NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()),
            ..Default::default()
        };
        let due_today = store.find_tasks(&filter).await.unwrap();
        assert_eq!(due_today.len(), 1);
        assert_eq!(due_today[0].title, "Today");

        let filter = TaskFilter {
            due_after: Some(chrono::NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()),
            ..Default::default()
        };
        let upcoming = store.find_tasks(&filter).await.unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].title, "Later");
    }

    #[tokio::test]
    async fn test_search_is_case_sensitive() {
        let store = store();
        let owner = UserId::new();
        let list = TaskList::new(Uuid::new_v4(), "Inbox", owner, false);
        store.insert_list(&list).await.unwrap();

        let task = Task::new(Uuid::new_v4(), "Review Budget", list.id, owner);
        store.insert_task(&task).await.unwrap();

        let hits = store
            .find_tasks(&TaskFilter {
                search: Some("Budget".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);

        let misses = store
            .find_tasks(&TaskFilter {
                search: Some("budget".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(misses.is_empty());
    }

    #[tokio::test]
    async fn test_paged_query_reports_totals() {
        let store = store();
        let owner = UserId::new();
        let list = TaskList::new(Uuid::new_v4(), "Backlog", owner, false);
        store.insert_list(&list).await.unwrap();

        for i in 0..25 {
            let mut task = Task::new(Uuid::new_v4(), format!("Task {i:02}"), list.id, owner);
            task.order = i;
            store.insert_task(&task).await.unwrap();
        }

        let page = store
            .find_tasks_paged(
                &TaskFilter::default(),
                &SortPagination::new(10, 10, Some("title"), "asc"),
            )
            .await
            .unwrap();

        assert_eq!(page.total_count, 25);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.items[0].title, "Task 10");
        assert_eq!(page.total_pages(), 3);
    }

    #[tokio::test]
    async fn test_tags_attach_to_tasks() {
        let store = store();
        let owner = UserId::new();
        let list = TaskList::new(Uuid::new_v4(), "Home", owner, false);
        store.insert_list(&list).await.unwrap();

        let task = Task::new(Uuid::new_v4(), "Paint fence", list.id, owner);
        store.insert_task(&task).await.unwrap();

        let tag = Tag::new(Uuid::new_v4(), "outdoor", "#00ff00", owner);
        store.insert_tag(&tag).await.unwrap();
        store.tag_task(task.id, tag.id).await.unwrap();

        let loaded = store.get_task_by_id(task.id).await.unwrap().unwrap();
        assert_eq!(loaded.tags.len(), 1);
        assert_eq!(loaded.tags[0].name, "outdoor");

        // Tagging again is a no-op
        store.tag_task(task.id, tag.id).await.unwrap();
        let loaded = store.get_task_by_id(task.id).await.unwrap().unwrap();
        assert_eq!(loaded.tags.len(), 1);
    }
}
