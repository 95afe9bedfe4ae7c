use chrono::NaiveDate;
use daycal_core::service::calendar_service::NewTask;
use daycal_core::db::open_db_in_memory;
use daycal_core::{
    CalendarService, CalendarServiceError, Category, DayKind, LabelLocale, OwnerId,
    SqliteCategoryRepository, SqliteTaskRepository,
};
use rusqlite::Connection;

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn service(
    conn: &Connection,
    locale: LabelLocale,
) -> CalendarService<SqliteCategoryRepository<'_>, SqliteTaskRepository<'_>> {
    CalendarService::new(
        SqliteCategoryRepository::new(conn),
        SqliteTaskRepository::new(conn),
        locale,
    )
}

fn seed(
    service: &CalendarService<SqliteCategoryRepository<'_>, SqliteTaskRepository<'_>>,
    owner: &OwnerId,
) -> Category {
    let category = service
        .create_category(owner, "Trabajo", Some("#2563eb"))
        .unwrap();
    for (title, date, color) in [
        ("Zeta", ymd(2024, 2, 1), None),
        ("Alfa", ymd(2024, 2, 1), Some("#dc2626")),
        ("Padding", ymd(2024, 1, 29), None),
        ("Fuera", ymd(2024, 3, 11), None),
    ] {
        service
            .create_task(
                owner,
                NewTask {
                    title: title.to_string(),
                    date,
                    category_id: category.id,
                    description: None,
                    custom_color: color.map(str::to_string),
                },
            )
            .unwrap();
    }
    category
}

#[test]
fn month_view_places_tasks_in_cells_including_padding_days() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, LabelLocale::Es);
    let owner = OwnerId::new("ana").unwrap();
    seed(&service, &owner);

    let view = service
        .month_view(&owner, ymd(2024, 2, 14), ymd(2024, 2, 1))
        .unwrap();
    assert_eq!(view.title, "febrero de 2024");
    assert_eq!(view.weeks.len(), 6);
    assert!(view.weeks.iter().all(|week| week.len() == 7));

    let first = &view.weeks[0][0];
    assert_eq!(first.iso, "2024-01-29");
    assert!(!first.in_month);
    assert_eq!(first.tasks.len(), 1);

    let feb1 = &view.weeks[0][3];
    assert_eq!(feb1.iso, "2024-02-01");
    assert!(feb1.in_month);
    assert!(feb1.is_today);
    let titles: Vec<_> = feb1.tasks.iter().map(|t| t.task.title.as_str()).collect();
    assert_eq!(titles, vec!["Alfa", "Zeta"]);
    assert_eq!(feb1.tasks[0].color, "#dc2626");
    assert_eq!(feb1.tasks[1].color, "#2563eb");
    assert_eq!(feb1.tasks[1].category_name, "Trabajo");

    let total: usize = view
        .weeks
        .iter()
        .flatten()
        .map(|cell| cell.tasks.len())
        .sum();
    assert_eq!(total, 3, "2024-03-11 lies outside the grid");
}

#[test]
fn week_and_day_views_cover_expected_dates() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, LabelLocale::Es);
    let owner = OwnerId::new("ana").unwrap();
    seed(&service, &owner);

    let week = service
        .week_view(&owner, ymd(2024, 2, 4), ymd(2024, 2, 4))
        .unwrap();
    assert_eq!(week.len(), 7);
    assert_eq!(week[0].iso, "2024-01-29");
    assert!(week[6].is_today);
    assert_eq!(week[3].tasks.len(), 2);

    let day = service
        .day_view(&owner, ymd(2024, 3, 11), ymd(2024, 2, 4))
        .unwrap();
    assert_eq!(day.tasks.len(), 1);
    assert!(!day.is_today);
}

#[test]
fn agenda_view_labels_today_and_tomorrow() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, LabelLocale::En);
    let owner = OwnerId::new("ana").unwrap();
    seed(&service, &owner);

    let agenda = service
        .agenda_view(&owner, ymd(2024, 1, 31), 3, ymd(2024, 1, 31))
        .unwrap();
    assert_eq!(agenda.sections.len(), 3);
    assert_eq!(agenda.sections[0].label.kind, DayKind::Today);
    assert_eq!(agenda.sections[0].label.text, "Today, January 31");
    assert_eq!(agenda.sections[1].label.kind, DayKind::Tomorrow);
    assert_eq!(agenda.sections[1].day.tasks.len(), 2);
    assert_eq!(agenda.sections[2].label.kind, DayKind::Other);
    assert_eq!(agenda.sections[2].label.text, "Friday, February 2");
}

#[test]
fn agenda_view_rejects_zero_days() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, LabelLocale::Es);
    let owner = OwnerId::new("ana").unwrap();

    let err = service
        .agenda_view(&owner, ymd(2024, 1, 1), 0, ymd(2024, 1, 1))
        .unwrap_err();
    assert!(matches!(err, CalendarServiceError::InvalidDayCount(_)));
}

#[test]
fn calendar_tasks_join_category_names() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, LabelLocale::Es);
    let owner = OwnerId::new("ana").unwrap();
    seed(&service, &owner);

    let tasks = service.calendar_tasks(&owner).unwrap();
    assert_eq!(tasks.len(), 4);
    assert!(tasks.iter().all(|t| t.category_name == "Trabajo"));
}

#[test]
fn views_past_the_date_range_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, LabelLocale::Es);
    let owner = OwnerId::new("ana").unwrap();
    let today = ymd(2024, 1, 1);

    assert!(matches!(
        service.month_view(&owner, NaiveDate::MAX, today).unwrap_err(),
        CalendarServiceError::DateOutOfRange(_)
    ));
    assert!(matches!(
        service.agenda_view(&owner, NaiveDate::MAX, 2, today).unwrap_err(),
        CalendarServiceError::DateOutOfRange(_)
    ));

    let last_day = service.day_view(&owner, NaiveDate::MAX, today).unwrap();
    assert!(last_day.tasks.is_empty());
}
