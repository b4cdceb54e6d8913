//! Document store for submitted applications.
//!
//! `AppState` holds an `Option<Arc<dyn ApplicationRepository>>`; the
//! PostgreSQL implementation is used whenever a database is reachable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;

/// A submission as written to the store.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub user_id: String,
    pub job_id: String,
    pub answers: Map<String, Value>,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
}

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Persists the submission and returns its server-assigned id.
    async fn insert(&self, application: NewApplication) -> Result<Uuid, AppError>;
}

pub struct PgApplicationRepository {
    pool: PgPool,
}

impl PgApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    async fn insert(&self, application: NewApplication) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO applications (id, user_id, job_id, answers, status, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id)
        .bind(&application.user_id)
        .bind(&application.job_id)
        .bind(Value::Object(application.answers))
        .bind(&application.status)
        .bind(application.submitted_at)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }
}
