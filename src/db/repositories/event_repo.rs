//! Event repository

use chrono::{NaiveDate, NaiveTime};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Event, EventListing},
};

/// Listing columns shared by the list and detail queries. `$1` is the viewer id.
const LISTING_SELECT: &str = r#"
    SELECT
        e.*,
        c.name AS category_name,
        u.name AS organizer_name,
        (SELECT COUNT(*) FROM registrations r WHERE r.event_id = e.id) AS registered_count,
        ($1::uuid IS NOT NULL AND EXISTS (
            SELECT 1 FROM registrations r WHERE r.event_id = e.id AND r.user_id = $1
        )) AS is_registered
    FROM events e
    LEFT JOIN categories c ON c.id = e.category_id
    JOIN users u ON u.id = e.organizer_id
"#;

/// Filters for the public event listing
#[derive(Debug, Default)]
pub struct EventFilter<'a> {
    pub search: Option<&'a str>,
    pub status: Option<&'a str>,
    pub category_id: Option<Uuid>,
    /// Only events on or after this day
    pub from_date: Option<NaiveDate>,
}

/// Fields for a new event
#[derive(Debug)]
pub struct NewEvent<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: &'a str,
    pub category_id: Option<Uuid>,
    pub organizer_id: Uuid,
    pub max_attendees: i32,
    pub image_url: Option<&'a str>,
}

/// Partial event update; `None` keeps the stored value
#[derive(Debug, Default)]
pub struct EventChanges<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub location: Option<&'a str>,
    pub category_id: Option<Uuid>,
    pub max_attendees: Option<i32>,
    pub image_url: Option<&'a str>,
}

/// Repository for event database operations
pub struct EventRepository;

impl EventRepository {
    /// Create a new event
    pub async fn create(pool: &PgPool, new: &NewEvent<'_>) -> AppResult<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (
                title, description, date, time, location,
                category_id, organizer_id, max_attendees, image_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(new.title)
        .bind(new.description)
        .bind(new.date)
        .bind(new.time)
        .bind(new.location)
        .bind(new.category_id)
        .bind(new.organizer_id)
        .bind(new.max_attendees)
        .bind(new.image_url)
        .fetch_one(pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(r#"SELECT * FROM events WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(event)
    }

    /// Lock an event row for the rest of the transaction.
    ///
    /// Every registration and capacity edit for the event goes through this
    /// lock, so they are serialized per event.
    pub async fn lock_by_id(conn: &mut PgConnection, id: &Uuid) -> AppResult<Option<Event>> {
        let event =
            sqlx::query_as::<_, Event>(r#"SELECT * FROM events WHERE id = $1 FOR UPDATE"#)
                .bind(id)
                .fetch_optional(conn)
                .await?;

        Ok(event)
    }

    /// Read the calendar day of an event inside a transaction
    pub async fn fetch_date(conn: &mut PgConnection, id: &Uuid) -> AppResult<Option<NaiveDate>> {
        let date: Option<NaiveDate> = sqlx::query_scalar(r#"SELECT date FROM events WHERE id = $1"#)
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(date)
    }

    /// Find a single event with listing metadata
    pub async fn find_listing(
        pool: &PgPool,
        id: &Uuid,
        viewer_id: Option<Uuid>,
    ) -> AppResult<Option<EventListing>> {
        let sql = format!("{LISTING_SELECT} WHERE e.id = $2");

        let listing = sqlx::query_as::<_, EventListing>(&sql)
            .bind(viewer_id)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(listing)
    }

    /// List events with filtering and pagination
    pub async fn list(
        pool: &PgPool,
        filter: &EventFilter<'_>,
        viewer_id: Option<Uuid>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<EventListing>, i64)> {
        let search_pattern = filter.search.map(|s| format!("%{}%", s));

        let sql = format!(
            r#"{LISTING_SELECT}
            WHERE
                ($2::text IS NULL OR e.title ILIKE $2 OR e.description ILIKE $2 OR e.location ILIKE $2)
                AND ($3::text IS NULL OR e.status = $3)
                AND ($4::uuid IS NULL OR e.category_id = $4)
                AND ($5::date IS NULL OR e.date >= $5)
            ORDER BY e.date ASC, e.time ASC
            OFFSET $6 LIMIT $7
            "#
        );

        let events = sqlx::query_as::<_, EventListing>(&sql)
            .bind(viewer_id)
            .bind(&search_pattern)
            .bind(filter.status)
            .bind(filter.category_id)
            .bind(filter.from_date)
            .bind(offset)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM events e
            WHERE
                ($1::text IS NULL OR e.title ILIKE $1 OR e.description ILIKE $1 OR e.location ILIKE $1)
                AND ($2::text IS NULL OR e.status = $2)
                AND ($3::uuid IS NULL OR e.category_id = $3)
                AND ($4::date IS NULL OR e.date >= $4)
            "#,
        )
        .bind(&search_pattern)
        .bind(filter.status)
        .bind(filter.category_id)
        .bind(filter.from_date)
        .fetch_one(pool)
        .await?;

        Ok((events, total))
    }

    /// Apply a partial update to a locked event
    pub async fn update(
        conn: &mut PgConnection,
        id: &Uuid,
        changes: &EventChanges<'_>,
    ) -> AppResult<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                date = COALESCE($4, date),
                time = COALESCE($5, time),
                location = COALESCE($6, location),
                category_id = COALESCE($7, category_id),
                max_attendees = COALESCE($8, max_attendees),
                image_url = COALESCE($9, image_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.date)
        .bind(changes.time)
        .bind(changes.location)
        .bind(changes.category_id)
        .bind(changes.max_attendees)
        .bind(changes.image_url)
        .fetch_one(conn)
        .await?;

        Ok(event)
    }

    /// Set the lifecycle status and its cancellation reason
    pub async fn update_status(
        conn: &mut PgConnection,
        id: &Uuid,
        status: &str,
        cancellation_reason: Option<&str>,
    ) -> AppResult<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET status = $2, cancellation_reason = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(cancellation_reason)
        .fetch_one(conn)
        .await?;

        Ok(event)
    }

    /// Count registrations held for an event
    pub async fn count_registrations(conn: &mut PgConnection, id: &Uuid) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM registrations WHERE event_id = $1"#)
                .bind(id)
                .fetch_one(conn)
                .await?;

        Ok(count)
    }

    /// Delete a locked event together with its ledger rows.
    ///
    /// Returns the number of registrations and feedback entries removed.
    pub async fn delete_cascade(conn: &mut PgConnection, id: &Uuid) -> AppResult<(u64, u64)> {
        let feedback = sqlx::query(r#"DELETE FROM feedback WHERE event_id = $1"#)
            .bind(id)
            .execute(&mut *conn)
            .await?
            .rows_affected();

        let registrations = sqlx::query(r#"DELETE FROM registrations WHERE event_id = $1"#)
            .bind(id)
            .execute(&mut *conn)
            .await?
            .rows_affected();

        sqlx::query(r#"DELETE FROM events WHERE id = $1"#)
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok((registrations, feedback))
    }
}
