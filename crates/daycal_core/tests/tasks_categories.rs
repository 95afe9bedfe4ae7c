use chrono::NaiveDate;
use daycal_core::db::open_db_in_memory;
use daycal_core::model::category::CATEGORY_PALETTE;
use daycal_core::service::calendar_service::NewTask;
use daycal_core::{
    CalendarService, CalendarServiceError, Category, CategoryRepository, LabelLocale, OwnerId,
    RepoError, SqliteCategoryRepository, SqliteTaskRepository, Task, TaskRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn owner(id: &str) -> OwnerId {
    OwnerId::new(id).unwrap()
}

fn service(
    conn: &Connection,
) -> CalendarService<SqliteCategoryRepository<'_>, SqliteTaskRepository<'_>> {
    CalendarService::new(
        SqliteCategoryRepository::new(conn),
        SqliteTaskRepository::new(conn),
        LabelLocale::Es,
    )
}

fn new_task(title: &str, date: NaiveDate, category: &Category) -> NewTask {
    NewTask {
        title: title.to_string(),
        date,
        category_id: category.id,
        description: None,
        custom_color: None,
    }
}

#[test]
fn categories_are_listed_by_name_per_owner() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::new(&conn);
    let ana = owner("ana");
    let bea = owner("bea");

    repo.create_category(&Category::new(ana.clone(), "trabajo", "#2563eb"))
        .unwrap();
    repo.create_category(&Category::new(ana.clone(), "Casa", "#16a34a"))
        .unwrap();
    repo.create_category(&Category::new(bea.clone(), "Gimnasio", "#dc2626"))
        .unwrap();

    let names: Vec<_> = repo
        .list_categories(&ana)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Casa", "trabajo"]);
    assert_eq!(repo.list_categories(&bea).unwrap().len(), 1);
}

#[test]
fn task_crud_roundtrip_is_owner_scoped() {
    let conn = open_db_in_memory().unwrap();
    let ana = owner("ana");
    let category = Category::new(ana.clone(), "Salud", "#059669");
    SqliteCategoryRepository::new(&conn)
        .create_category(&category)
        .unwrap();

    let repo = SqliteTaskRepository::new(&conn);
    let mut task = Task::new(ana.clone(), "Dentista", ymd(2024, 2, 29), category.id);
    task.set_description(Some("llevar tarjeta"));
    repo.create_task(&task).unwrap();

    let loaded = repo.get_task(&ana, task.id).unwrap().unwrap();
    assert_eq!(loaded, task);
    assert_eq!(repo.get_task(&owner("bea"), task.id).unwrap(), None);

    task.title = "Dentista (revisión)".to_string();
    task.custom_color = Some("#dc2626".to_string());
    task.set_description(None);
    repo.update_task(&task).unwrap();
    let loaded = repo.get_task(&ana, task.id).unwrap().unwrap();
    assert_eq!(loaded.title, "Dentista (revisión)");
    assert_eq!(loaded.description, None);
    assert_eq!(loaded.custom_color.as_deref(), Some("#dc2626"));

    let err = repo.delete_task(&owner("bea"), task.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == task.id));
    repo.delete_task(&ana, task.id).unwrap();
    assert!(repo.list_tasks(&ana).unwrap().is_empty());
}

#[test]
fn tasks_in_range_are_inclusive_and_date_ordered() {
    let conn = open_db_in_memory().unwrap();
    let ana = owner("ana");
    let category = Category::new(ana.clone(), "Casa", "#16a34a");
    SqliteCategoryRepository::new(&conn)
        .create_category(&category)
        .unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    for (title, date) in [
        ("c", ymd(2024, 3, 10)),
        ("a", ymd(2024, 3, 1)),
        ("b", ymd(2024, 3, 1)),
        ("out", ymd(2024, 3, 11)),
    ] {
        repo.create_task(&Task::new(ana.clone(), title, date, category.id))
            .unwrap();
    }

    let titles: Vec<_> = repo
        .list_tasks_in_range(&ana, ymd(2024, 3, 1), ymd(2024, 3, 10))
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, vec!["a", "b", "c"]);
}

#[test]
fn update_missing_task_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let task = Task::new(owner("ana"), "ghost", ymd(2024, 1, 1), Uuid::new_v4());
    let err = repo.update_task(&task).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == task.id));
}

#[test]
fn service_picks_first_free_palette_color_and_rejects_duplicates() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let ana = owner("ana");

    let first = service.create_category(&ana, "Rojo", None).unwrap();
    assert_eq!(first.color, "#dc2626");
    let second = service.create_category(&ana, "Naranja", None).unwrap();
    assert_eq!(second.color, "#ea580c");

    let err = service
        .create_category(&ana, "Otro", Some("#DC2626"))
        .unwrap_err();
    assert!(matches!(err, CalendarServiceError::ColorInUse(_)));

    // Colors are only unique per owner.
    let other = service
        .create_category(&owner("bea"), "Rojo", Some("#dc2626"))
        .unwrap();
    assert_eq!(other.color, "#dc2626");
}

#[test]
fn service_rejects_tasks_for_unknown_or_foreign_categories() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let foreign = service
        .create_category(&owner("bea"), "Ajena", None)
        .unwrap();

    let err = service
        .create_task(&owner("ana"), new_task("x", ymd(2024, 1, 1), &foreign))
        .unwrap_err();
    assert!(matches!(err, CalendarServiceError::CategoryNotFound(id) if id == foreign.id));
}

#[test]
fn category_with_tasks_cannot_be_deleted() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let ana = owner("ana");
    let category = service.create_category(&ana, "Trabajo", None).unwrap();
    let task = service
        .create_task(&ana, new_task("Informe", ymd(2024, 4, 2), &category))
        .unwrap();

    let err = service.delete_category(&ana, category.id).unwrap_err();
    assert!(matches!(err, CalendarServiceError::CategoryInUse(id) if id == category.id));

    service.delete_task(&ana, task.id).unwrap();
    service.delete_category(&ana, category.id).unwrap();
    assert!(service.list_categories(&ana).unwrap().is_empty());
}

#[test]
fn category_summaries_count_pending_tasks() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let ana = owner("ana");
    let work = service.create_category(&ana, "Trabajo", None).unwrap();
    let home = service.create_category(&ana, "Casa", None).unwrap();

    let done = service
        .create_task(&ana, new_task("Informe", ymd(2024, 4, 2), &work))
        .unwrap();
    service
        .create_task(&ana, new_task("Reunión", ymd(2024, 4, 3), &work))
        .unwrap();
    assert!(service.toggle_task_completed(&ana, done.id).unwrap());

    let summaries = service.category_summaries(&ana).unwrap();
    let casa = summaries.iter().find(|s| s.category.id == home.id).unwrap();
    let trabajo = summaries.iter().find(|s| s.category.id == work.id).unwrap();
    assert_eq!((casa.total, casa.pending), (0, 0));
    assert!(casa.can_delete());
    assert_eq!((trabajo.total, trabajo.pending), (2, 1));
    assert!(!trabajo.can_delete());
}

#[test]
fn toggling_missing_task_reports_task_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let id = Uuid::new_v4();
    let err = service
        .toggle_task_completed(&owner("ana"), id)
        .unwrap_err();
    assert!(matches!(err, CalendarServiceError::TaskNotFound(missing) if missing == id));
}

#[test]
fn exhausted_palette_requires_an_explicit_color() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let ana = owner("ana");
    for index in 0..CATEGORY_PALETTE.len() {
        service
            .create_category(&ana, &format!("c{index}"), None)
            .unwrap();
    }

    let err = service.create_category(&ana, "extra", None).unwrap_err();
    assert!(matches!(err, CalendarServiceError::PaletteExhausted));

    let custom = service
        .create_category(&ana, "extra", Some("#123456"))
        .unwrap();
    assert_eq!(custom.color, "#123456");
    assert_eq!(
        service.list_categories(&ana).unwrap().len(),
        CATEGORY_PALETTE.len() + 1
    );
}
