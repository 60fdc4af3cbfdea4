use rusqlite::Connection;
use scheduler_core::db::migrations::latest_version;
use scheduler_core::db::open_db_in_memory;
use scheduler_core::{
    CalendarDate, NewTask, RepoError, SqliteTaskRepository, TaskFilter, TaskListQuery,
    TaskRepository, TaskValidationError,
};

fn date(value: &str) -> CalendarDate {
    value.parse().unwrap()
}

#[test]
fn insert_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let task = NewTask::new(date("20250301"), "pay rent")
        .with_comment("transfer before noon")
        .with_repeat("d 30");
    let id = repo.insert_task(&task).unwrap();

    let loaded = repo.get_task(id).unwrap().unwrap();
    assert_eq!(loaded, task.into_task(id));
}

#[test]
fn get_missing_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    assert!(repo.get_task(42).unwrap().is_none());
}

#[test]
fn update_existing_task() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let id = repo
        .insert_task(&NewTask::new(date("20250301"), "draft"))
        .unwrap();
    let mut task = repo.get_task(id).unwrap().unwrap();
    task.title = "final".to_string();
    task.date = date("20250315");
    task.repeat = "y".to_string();
    repo.update_task(&task).unwrap();

    let loaded = repo.get_task(id).unwrap().unwrap();
    assert_eq!(loaded.title, "final");
    assert_eq!(loaded.date, date("20250315"));
    assert_eq!(loaded.repeat, "y");
}

#[test]
fn update_and_delete_missing_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let ghost = NewTask::new(date("20250301"), "ghost").into_task(99);
    assert!(matches!(
        repo.update_task(&ghost).unwrap_err(),
        RepoError::NotFound(99)
    ));
    assert!(matches!(
        repo.delete_task(99).unwrap_err(),
        RepoError::NotFound(99)
    ));
}

#[test]
fn delete_removes_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let id = repo
        .insert_task(&NewTask::new(date("20250301"), "one-off"))
        .unwrap();
    repo.delete_task(id).unwrap();
    assert!(repo.get_task(id).unwrap().is_none());
}

#[test]
fn validation_failure_blocks_insert_and_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let invalid = NewTask::new(date("20250301"), "bad rule").with_repeat("d 0");
    assert!(matches!(
        repo.insert_task(&invalid).unwrap_err(),
        RepoError::Validation(TaskValidationError::InvalidRepeat(_))
    ));

    let id = repo
        .insert_task(&NewTask::new(date("20250301"), "good"))
        .unwrap();
    let mut task = repo.get_task(id).unwrap().unwrap();
    task.title = " ".to_string();
    assert!(matches!(
        repo.update_task(&task).unwrap_err(),
        RepoError::Validation(TaskValidationError::EmptyTitle)
    ));
}

#[test]
fn list_orders_by_date_then_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let late = repo
        .insert_task(&NewTask::new(date("20250310"), "late"))
        .unwrap();
    let early_a = repo
        .insert_task(&NewTask::new(date("20250301"), "early a"))
        .unwrap();
    let early_b = repo
        .insert_task(&NewTask::new(date("20250301"), "early b"))
        .unwrap();

    let ids: Vec<_> = repo
        .list_tasks(&TaskListQuery::default())
        .unwrap()
        .into_iter()
        .map(|task| task.id)
        .collect();
    assert_eq!(ids, vec![early_a, early_b, late]);
}

#[test]
fn list_is_capped_at_fifty_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    for index in 0..60 {
        repo.insert_task(&NewTask::new(date("20250301"), format!("task {index}")))
            .unwrap();
    }

    let all = repo.list_tasks(&TaskListQuery::default()).unwrap();
    assert_eq!(all.len(), 50);

    let oversized = TaskListQuery {
        limit: 500,
        ..TaskListQuery::default()
    };
    assert_eq!(repo.list_tasks(&oversized).unwrap().len(), 50);

    let small = TaskListQuery {
        limit: 3,
        ..TaskListQuery::default()
    };
    assert_eq!(repo.list_tasks(&small).unwrap().len(), 3);
}

#[test]
fn list_filters_by_date_and_text() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let gym = repo
        .insert_task(&NewTask::new(date("20250301"), "Gym").with_comment("leg day"))
        .unwrap();
    let dentist = repo
        .insert_task(&NewTask::new(date("20250302"), "Dentist").with_comment("100% covered"))
        .unwrap();
    repo.insert_task(&NewTask::new(date("20250302"), "Groceries"))
        .unwrap();

    let on_date = TaskListQuery {
        filter: TaskFilter::OnDate(date("20250301")),
        ..TaskListQuery::default()
    };
    let found = repo.list_tasks(&on_date).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, gym);

    let by_comment = TaskListQuery {
        filter: TaskFilter::Text("leg".to_string()),
        ..TaskListQuery::default()
    };
    assert_eq!(repo.list_tasks(&by_comment).unwrap()[0].id, gym);

    let literal_percent = TaskListQuery {
        filter: TaskFilter::Text("0%".to_string()),
        ..TaskListQuery::default()
    };
    let found = repo.list_tasks(&literal_percent).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, dentist);
}

#[test]
fn corrupted_row_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO scheduler (date, title) VALUES ('2025-03-01', 'legacy');",
        [],
    )
    .unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let err = repo.list_tasks(&TaskListQuery::default()).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("2025-03-01")));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteTaskRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_scheduler_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteTaskRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("scheduler"))
    ));
}

#[test]
fn repository_rejects_connection_missing_repeat_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE scheduler (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date CHAR(8) NOT NULL DEFAULT '',
            title VARCHAR(256) NOT NULL DEFAULT '',
            comment TEXT NOT NULL DEFAULT ''
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteTaskRepository::try_new(&conn),
        Err(RepoError::MissingRequiredColumn {
            table: "scheduler",
            column: "repeat"
        })
    ));
}
