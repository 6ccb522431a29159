use chrono::NaiveDate;
use mission_core::db::open_db_in_memory;
use mission_core::{
    ActivityEvent, AttendanceRecord, Client, DateRange, EventValidationError, RecordRepository,
    RepoError, Service, ServiceVisit, SqliteRecordRepository,
};
use pretty_assertions::assert_eq;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn week_of_march_10() -> DateRange {
    DateRange::new(date(2025, 3, 10), date(2025, 3, 16))
}

#[test]
fn events_round_trip_and_filter_by_civil_date() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn);

    let mut timed = ActivityEvent::new(2, "Art", "2025-03-16").with_times(
        Some("2025-03-16T10:00:00"),
        Some("2025-03-16T11:30:00"),
    );
    timed.color = Some("teal".to_string());
    timed.attendance = 12;
    repo.upsert_event(&ActivityEvent::new(1, "Yoga", "2025-03-10")).unwrap();
    repo.upsert_event(&timed).unwrap();
    repo.upsert_event(&ActivityEvent::new(3, "Music", "2025-03-17")).unwrap();
    repo.upsert_event(&ActivityEvent::new(4, "Lunch", "2025-03-09T12:00:00")).unwrap();

    let events = repo.list_events(week_of_march_10()).unwrap();
    let ids: Vec<i64> = events.iter().map(|event| event.activity_id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(events[1], timed);
}

#[test]
fn upsert_replaces_existing_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn);

    repo.upsert_event(&ActivityEvent::new(1, "Yoga", "2025-03-10")).unwrap();
    repo.upsert_event(&ActivityEvent::new(1, "Chair yoga", "2025-03-11")).unwrap();

    let events = repo.list_events(week_of_march_10()).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].activity_name, "Chair yoga");
    assert_eq!(events[0].date, "2025-03-11");
}

#[test]
fn invalid_events_are_rejected_before_write() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn);

    let reversed = ActivityEvent::new(1, "Art", "2025-03-10")
        .with_times(Some("2025-03-10T11:00"), Some("2025-03-10T10:00"));
    assert!(matches!(
        repo.upsert_event(&reversed),
        Err(RepoError::Validation(EventValidationError::EndBeforeStart { .. }))
    ));
    assert!(matches!(
        repo.upsert_event(&ActivityEvent::new(2, "Art", "next tuesday")),
        Err(RepoError::Validation(EventValidationError::InvalidDate(_)))
    ));
    assert!(repo.list_events(week_of_march_10()).unwrap().is_empty());
}

#[test]
fn attendance_range_excludes_undated_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn);

    repo.upsert_attendance(&AttendanceRecord::new(1, 1, 1).on("2025-03-12").scored(7.0))
        .unwrap();
    repo.upsert_attendance(&AttendanceRecord::new(2, 1, 2)).unwrap();
    repo.upsert_attendance(&AttendanceRecord::new(3, 1, 3).on("2025-03-20")).unwrap();

    let records = repo.list_attendance(week_of_march_10()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].score, Some(7.0));
}

#[test]
fn padded_dates_are_stored_trimmed_and_read_back() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn);

    let padded = ActivityEvent::new(1, "Yoga", " 2025-03-10")
        .with_times(Some(" 2025-03-10T10:00 "), Some("2025-03-10T11:00 "));
    assert!(padded.validate().is_ok());
    repo.upsert_event(&padded).unwrap();
    repo.upsert_attendance(&AttendanceRecord::new(1, 1, 1).on(" 2025-03-10T10:00"))
        .unwrap();
    repo.upsert_visit(&ServiceVisit::new(1, 1, Service::Clinic).checked_in(" 2025-03-11T09:00"))
        .unwrap();

    let events = repo.list_events(week_of_march_10()).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].date, "2025-03-10");
    assert_eq!(events[0].start_time.as_deref(), Some("2025-03-10T10:00"));
    assert_eq!(events[0].end_time.as_deref(), Some("2025-03-10T11:00"));

    let records = repo.list_attendance(week_of_march_10()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].date.as_deref(), Some("2025-03-10T10:00"));

    assert_eq!(repo.list_visits(None, week_of_march_10()).unwrap().len(), 1);
}

#[test]
fn visits_filter_by_service_and_prefer_time_in() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn);

    let visits = [
        ServiceVisit::new(1, 10, Service::Washroom).checked_in("2025-03-11T09:30:00"),
        ServiceVisit::new(2, 11, Service::Clinic).on("2025-03-12"),
        // time_in outside the week wins over an in-week date
        ServiceVisit::new(3, 12, Service::Washroom)
            .on("2025-03-12")
            .checked_in("2025-03-18T09:30:00"),
        // malformed time_in falls back to date
        ServiceVisit::new(4, 13, Service::Washroom)
            .on("2025-03-13")
            .checked_in("09:30"),
        ServiceVisit::new(5, 14, Service::SafeSleep).on("2025-03-13").in_bed(4),
    ];
    for visit in &visits {
        repo.upsert_visit(visit).unwrap();
    }

    let washroom = repo
        .list_visits(Some(Service::Washroom), week_of_march_10())
        .unwrap();
    let ids: Vec<i64> = washroom.iter().map(|visit| visit.visit_id).collect();
    assert_eq!(ids, vec![1, 4]);

    let all = repo.list_visits(None, week_of_march_10()).unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[3], visits[4]);
}

#[test]
fn clients_are_listed_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn);

    for (id, name) in [(2, "Bea"), (1, "Ada")] {
        repo.upsert_client(&Client {
            client_id: id,
            full_name: name.to_string(),
            dob: None,
            gender: Some("f".to_string()),
        })
        .unwrap();
    }

    let names: Vec<String> = repo
        .list_clients()
        .unwrap()
        .into_iter()
        .map(|client| client.full_name)
        .collect();
    assert_eq!(names, vec!["Ada", "Bea"]);
}
