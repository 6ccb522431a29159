//! Shelter record repository contract and SQLite implementation.

use crate::db::DbError;
use crate::model::{
    ActivityEvent, AttendanceRecord, Client, EventValidationError, Service, ServiceVisit,
};
use crate::time::DateRange;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Validation(EventValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "rejected activity: {err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid stored record: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<EventValidationError> for RepoError {
    fn from(value: EventValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Reads and writes the records behind every dashboard panel.
///
/// Upserts replace the stored row with the same id and store date text
/// trimmed. Range reads return rows in id order.
pub trait RecordRepository {
    fn upsert_client(&self, client: &Client) -> RepoResult<()>;
    fn upsert_event(&self, event: &ActivityEvent) -> RepoResult<()>;
    fn upsert_attendance(&self, record: &AttendanceRecord) -> RepoResult<()>;
    fn upsert_visit(&self, visit: &ServiceVisit) -> RepoResult<()>;

    fn list_clients(&self) -> RepoResult<Vec<Client>>;
    /// Activities whose date falls inside `range`.
    fn list_events(&self, range: DateRange) -> RepoResult<Vec<ActivityEvent>>;
    /// Attendance rows whose date falls inside `range`; undated rows are excluded.
    fn list_attendance(&self, range: DateRange) -> RepoResult<Vec<AttendanceRecord>>;
    /// Visits inside `range`, optionally restricted to one station.
    ///
    /// A visit's date is taken from `time_in` when it parses, else `date`.
    fn list_visits(&self, service: Option<Service>, range: DateRange)
        -> RepoResult<Vec<ServiceVisit>>;
}

impl<T: RecordRepository + ?Sized> RecordRepository for &T {
    fn upsert_client(&self, client: &Client) -> RepoResult<()> {
        (**self).upsert_client(client)
    }
    fn upsert_event(&self, event: &ActivityEvent) -> RepoResult<()> {
        (**self).upsert_event(event)
    }
    fn upsert_attendance(&self, record: &AttendanceRecord) -> RepoResult<()> {
        (**self).upsert_attendance(record)
    }
    fn upsert_visit(&self, visit: &ServiceVisit) -> RepoResult<()> {
        (**self).upsert_visit(visit)
    }
    fn list_clients(&self) -> RepoResult<Vec<Client>> {
        (**self).list_clients()
    }
    fn list_events(&self, range: DateRange) -> RepoResult<Vec<ActivityEvent>> {
        (**self).list_events(range)
    }
    fn list_attendance(&self, range: DateRange) -> RepoResult<Vec<AttendanceRecord>> {
        (**self).list_attendance(range)
    }
    fn list_visits(
        &self,
        service: Option<Service>,
        range: DateRange,
    ) -> RepoResult<Vec<ServiceVisit>> {
        (**self).list_visits(service, range)
    }
}

pub struct SqliteRecordRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RecordRepository for SqliteRecordRepository<'_> {
    fn upsert_client(&self, client: &Client) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO clients (client_id, full_name, dob, gender)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (client_id) DO UPDATE SET
                full_name = excluded.full_name,
                dob = excluded.dob,
                gender = excluded.gender;",
            params![
                client.client_id,
                client.full_name.as_str(),
                client.dob.as_deref(),
                client.gender.as_deref(),
            ],
        )?;
        Ok(())
    }

    fn upsert_event(&self, event: &ActivityEvent) -> RepoResult<()> {
        event.validate()?;

        self.conn.execute(
            "INSERT INTO activities (
                activity_id,
                client_id,
                activity_name,
                date,
                start_time,
                end_time,
                color,
                attendance
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT (activity_id) DO UPDATE SET
                client_id = excluded.client_id,
                activity_name = excluded.activity_name,
                date = excluded.date,
                start_time = excluded.start_time,
                end_time = excluded.end_time,
                color = excluded.color,
                attendance = excluded.attendance;",
            params![
                event.activity_id,
                event.client_id,
                event.activity_name.as_str(),
                event.date.trim(),
                event.start_time.as_deref().map(str::trim),
                event.end_time.as_deref().map(str::trim),
                event.color.as_deref(),
                event.attendance,
            ],
        )?;
        Ok(())
    }

    fn upsert_attendance(&self, record: &AttendanceRecord) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO client_activity (client_activity_id, activity_id, client_id, date, score)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT (client_activity_id) DO UPDATE SET
                activity_id = excluded.activity_id,
                client_id = excluded.client_id,
                date = excluded.date,
                score = excluded.score;",
            params![
                record.client_activity_id,
                record.activity_id,
                record.client_id,
                record.date.as_deref().map(str::trim),
                record.score,
            ],
        )?;
        Ok(())
    }

    fn upsert_visit(&self, visit: &ServiceVisit) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO service_visits (
                visit_id,
                client_id,
                service,
                date,
                time_in,
                bed_no,
                is_occupied
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT (visit_id) DO UPDATE SET
                client_id = excluded.client_id,
                service = excluded.service,
                date = excluded.date,
                time_in = excluded.time_in,
                bed_no = excluded.bed_no,
                is_occupied = excluded.is_occupied;",
            params![
                visit.visit_id,
                visit.client_id,
                visit.service.as_str(),
                visit.date.as_deref().map(str::trim),
                visit.time_in.as_deref().map(str::trim),
                visit.bed_no,
                visit.is_occupied,
            ],
        )?;
        Ok(())
    }

    fn list_clients(&self) -> RepoResult<Vec<Client>> {
        let mut stmt = self.conn.prepare(
            "SELECT client_id, full_name, dob, gender
             FROM clients
             ORDER BY client_id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut clients = Vec::new();
        while let Some(row) = rows.next()? {
            clients.push(Client {
                client_id: row.get("client_id")?,
                full_name: row.get("full_name")?,
                dob: row.get("dob")?,
                gender: row.get("gender")?,
            });
        }
        Ok(clients)
    }

    fn list_events(&self, range: DateRange) -> RepoResult<Vec<ActivityEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                activity_id,
                client_id,
                activity_name,
                date,
                start_time,
                end_time,
                color,
                attendance
             FROM activities
             WHERE substr(date, 1, 10) BETWEEN ?1 AND ?2
             ORDER BY activity_id ASC;",
        )?;
        let (start, end) = range_bounds(range);
        let mut rows = stmt.query(params![start, end])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(ActivityEvent {
                activity_id: row.get("activity_id")?,
                client_id: row.get("client_id")?,
                activity_name: row.get("activity_name")?,
                date: row.get("date")?,
                start_time: row.get("start_time")?,
                end_time: row.get("end_time")?,
                color: row.get("color")?,
                attendance: row.get("attendance")?,
            });
        }
        Ok(events)
    }

    fn list_attendance(&self, range: DateRange) -> RepoResult<Vec<AttendanceRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT client_activity_id, activity_id, client_id, date, score
             FROM client_activity
             WHERE substr(date, 1, 10) BETWEEN ?1 AND ?2
             ORDER BY client_activity_id ASC;",
        )?;
        let (start, end) = range_bounds(range);
        let mut rows = stmt.query(params![start, end])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(AttendanceRecord {
                client_activity_id: row.get("client_activity_id")?,
                activity_id: row.get("activity_id")?,
                client_id: row.get("client_id")?,
                date: row.get("date")?,
                score: row.get("score")?,
            });
        }
        Ok(records)
    }

    fn list_visits(
        &self,
        service: Option<Service>,
        range: DateRange,
    ) -> RepoResult<Vec<ServiceVisit>> {
        let (start, end) = range_bounds(range);
        // Prefilter on either column; the exact time_in-then-date rule runs below.
        let mut sql = String::from(
            "SELECT visit_id, client_id, service, date, time_in, bed_no, is_occupied
             FROM service_visits
             WHERE (substr(time_in, 1, 10) BETWEEN ?1 AND ?2
                OR substr(date, 1, 10) BETWEEN ?1 AND ?2)",
        );
        let mut bind_values = vec![Value::Text(start), Value::Text(end)];
        if let Some(service) = service {
            sql.push_str(" AND service = ?3");
            bind_values.push(Value::Text(service.as_str().to_string()));
        }
        sql.push_str(" ORDER BY visit_id ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut visits = Vec::new();
        while let Some(row) = rows.next()? {
            let visit = parse_visit_row(row)?;
            if visit.visit_date().is_some_and(|date| range.contains(date)) {
                visits.push(visit);
            }
        }
        Ok(visits)
    }
}

fn parse_visit_row(row: &Row<'_>) -> RepoResult<ServiceVisit> {
    let service_text: String = row.get("service")?;
    let service = service_text.parse::<Service>().map_err(|_| {
        RepoError::InvalidData(format!(
            "unknown service `{service_text}` in service_visits.service"
        ))
    })?;

    Ok(ServiceVisit {
        visit_id: row.get("visit_id")?,
        client_id: row.get("client_id")?,
        service,
        date: row.get("date")?,
        time_in: row.get("time_in")?,
        bed_no: row.get("bed_no")?,
        is_occupied: row.get("is_occupied")?,
    })
}

fn range_bounds(range: DateRange) -> (String, String) {
    (
        range.start.format("%Y-%m-%d").to_string(),
        range.end.format("%Y-%m-%d").to_string(),
    )
}
