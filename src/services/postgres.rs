use crate::core::Catalog;
use crate::models::Booking;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// PostgreSQL client for the catalog mirror and the booking ledger
///
/// The JSON files stay the source of truth for goals and tutors; the mirror
/// is refreshed from the loaded catalog on startup. Completed bookings are
/// appended to `bookings`, one row per booking keyed by its UUID.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_secs: u64,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(5),
            min_connections.unwrap_or(1),
            acquire_timeout_secs.unwrap_or(5),
        )
        .await
    }

    /// Replace the mirrored goals and tutors with the loaded catalog
    ///
    /// Runs in one transaction so readers never see a half-written mirror.
    pub async fn mirror_catalog(&self, catalog: &Catalog) -> Result<(), PostgresError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM tutor_goals").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM tutors").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM goals").execute(&mut *tx).await?;

        for goal in catalog.goals() {
            sqlx::query("INSERT INTO goals (id, name_en, name_ru) VALUES ($1, $2, $3)")
                .bind(i64::from(goal.id))
                .bind(&goal.name_en)
                .bind(&goal.name_ru)
                .execute(&mut *tx)
                .await?;
        }

        for tutor in catalog.tutors() {
            let record = tutor.to_record();

            sqlx::query(
                r#"
                INSERT INTO tutors (id, name, about, rating, price, free)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(i64::from(tutor.id))
            .bind(&tutor.name)
            .bind(&tutor.about)
            .bind(tutor.rating)
            .bind(tutor.price)
            .bind(Json(&record.free))
            .execute(&mut *tx)
            .await?;

            for goal in &tutor.goals {
                sqlx::query("INSERT INTO tutor_goals (tutor_id, goal_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
                    .bind(i64::from(tutor.id))
                    .bind(i64::from(goal.id))
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;

        tracing::info!(
            "Mirrored catalog to PostgreSQL: {} goals, {} tutors",
            catalog.goals().len(),
            catalog.tutors().len()
        );

        Ok(())
    }

    /// Append a completed booking to the ledger
    pub async fn record_booking(&self, booking: &Booking) -> Result<(), PostgresError> {
        let query = r#"
            INSERT INTO bookings (id, day, time, name, phone, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
        "#;

        sqlx::query(query)
            .bind(booking.id)
            .bind(booking.day.code())
            .bind(booking.time.code())
            .bind(&booking.name)
            .bind(&booking.phone)
            .bind(booking.created_at)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Recorded booking {} ({} at {})", booking.id, booking.day, booking.time);

        Ok(())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
