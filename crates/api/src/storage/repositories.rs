// Repository layer for PostgreSQL
// Decision: Runtime-checked queries (query_as) so the crate builds without a live database
// Decision: Ownership is part of the WHERE clause for event writes

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::error::{Result, StorageError};
use super::models::*;

const USER_COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";
const EVENT_COLUMNS: &str = "id, title, description, date, location, organizer_id, max_attendees, category, status, created_at, updated_at";

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create database connection from URL
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Apply pending migrations from `migrations/`
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StorageError::Other(e.into()))?;
        Ok(())
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: CreateUserRow) -> Result<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, name, email, password_hash)
            VALUES ($1, $2, LOWER($3), $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::now_v7())
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(StorageError::from_insert)?;

        Ok(row)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE LOWER(email) = LOWER($1)
            "#
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_user(&self, id: Uuid) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn count_users(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // ============================================
    // Events
    // ============================================

    pub async fn create_event(&self, input: CreateEventRow) -> Result<EventRow> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            INSERT INTO events (id, title, description, date, location, organizer_id, max_attendees, category, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'draft')
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(Uuid::now_v7())
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.date)
        .bind(&input.location)
        .bind(input.organizer_id)
        .bind(input.max_attendees)
        .bind(&input.category)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_event(&self, id: Uuid) -> Result<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM events
            WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_published_events(&self) -> Result<Vec<EventRow>> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM events
            WHERE status = 'published'
            ORDER BY date ASC, id ASC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn update_event_owned(
        &self,
        id: Uuid,
        organizer_id: Uuid,
        input: UpdateEvent,
    ) -> Result<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            UPDATE events
            SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                date = COALESCE($5, date),
                location = COALESCE($6, location),
                max_attendees = COALESCE($7, max_attendees),
                category = COALESCE($8, category),
                status = COALESCE($9, status),
                updated_at = NOW()
            WHERE id = $1 AND organizer_id = $2
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(organizer_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.date)
        .bind(&input.location)
        .bind(input.max_attendees)
        .bind(&input.category)
        .bind(&input.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete_event_owned(&self, id: Uuid, organizer_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1 AND organizer_id = $2")
            .bind(id)
            .bind(organizer_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
