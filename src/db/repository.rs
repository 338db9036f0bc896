//! Database repository for CRUD operations.
//!
//! Uses prepared statements and transactions for data integrity. Every
//! ambassador mutation bumps the revision counter and publishes a fresh
//! snapshot to the change feed; interaction logs do neither.

use std::sync::Arc;

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tokio::sync::{broadcast, Mutex};

use crate::errors::AppError;
use crate::events::ChangeFeed;
use crate::models::{
    Ambassador, AmbassadorsSnapshot, CreateAmbassadorRequest, DashboardStats, DeviceType,
    InteractionLog, Platform, Specialization, TrackRequest, UpdateAmbassadorRequest, Year,
};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
    feed: ChangeFeed,
    publish_lock: Arc<Mutex<()>>,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            feed: ChangeFeed::default(),
            publish_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Get the current revision ID.
    pub async fn get_revision_id(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT revision_id FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("revision_id"))
    }

    /// Bump the revision and publish the resulting snapshot to the feed.
    ///
    /// The lock serializes concurrent mutations through this section, so
    /// snapshots reach the feed in strictly increasing revision order.
    async fn bump_and_publish(&self) -> Result<(), AppError> {
        let _guard = self.publish_lock.lock().await;

        let now = Utc::now().to_rfc3339();
        sqlx::query("UPDATE meta SET revision_id = revision_id + 1, generated_at = ? WHERE id = 1")
            .bind(&now)
            .execute(&self.pool)
            .await?;

        let snapshot = self.snapshot().await?;
        self.feed.publish(snapshot);
        Ok(())
    }

    /// Subscribe to snapshot broadcasts from this repository.
    pub fn subscribe(&self) -> broadcast::Receiver<AmbassadorsSnapshot> {
        self.feed.subscribe()
    }

    /// Build a full snapshot of the current ambassador collection.
    ///
    /// Meta and rows are read in one transaction, so every snapshot is a
    /// consistent point-in-time view of the collection.
    pub async fn snapshot(&self) -> Result<AmbassadorsSnapshot, AppError> {
        let mut tx = self.pool.begin().await?;

        let meta = sqlx::query("SELECT revision_id, generated_at FROM meta WHERE id = 1")
            .fetch_one(&mut *tx)
            .await?;
        let rows = sqlx::query(
            "SELECT id, name, specialization, year, tagline, photo_url, instagram_url, linkedin_url, email_id, is_active, created_at, updated_at FROM ambassadors ORDER BY name"
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(AmbassadorsSnapshot {
            revision_id: meta.get("revision_id"),
            generated_at: meta.get("generated_at"),
            ambassadors: rows.iter().map(ambassador_from_row).collect(),
        })
    }

    // ==================== AMBASSADOR OPERATIONS ====================

    /// List all ambassadors, ordered by name.
    pub async fn list_ambassadors(&self) -> Result<Vec<Ambassador>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, specialization, year, tagline, photo_url, instagram_url, linkedin_url, email_id, is_active, created_at, updated_at FROM ambassadors ORDER BY name"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ambassador_from_row(&row))
            .collect())
    }

    /// Get an ambassador by ID.
    pub async fn get_ambassador(&self, id: &str) -> Result<Option<Ambassador>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, specialization, year, tagline, photo_url, instagram_url, linkedin_url, email_id, is_active, created_at, updated_at FROM ambassadors WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(ambassador_from_row))
    }

    /// Create a new ambassador.
    pub async fn create_ambassador(
        &self,
        request: &CreateAmbassadorRequest,
    ) -> Result<Ambassador, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO ambassadors (id, name, specialization, year, tagline, photo_url, instagram_url, linkedin_url, email_id, is_active, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&request.name)
        .bind(request.specialization.as_str())
        .bind(request.year.as_str())
        .bind(&request.tagline)
        .bind(&request.photo_url)
        .bind(&request.instagram_url)
        .bind(&request.linkedin_url)
        .bind(&request.email_id)
        .bind(request.is_active as i32)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.bump_and_publish().await?;

        Ok(Ambassador {
            id,
            name: request.name.clone(),
            specialization: request.specialization.clone(),
            year: request.year.clone(),
            tagline: request.tagline.clone(),
            photo_url: request.photo_url.clone(),
            instagram_url: request.instagram_url.clone(),
            linkedin_url: request.linkedin_url.clone(),
            email_id: request.email_id.clone(),
            is_active: request.is_active,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Update an ambassador. Last write wins; there is no version check.
    pub async fn update_ambassador(
        &self,
        id: &str,
        request: &UpdateAmbassadorRequest,
    ) -> Result<Ambassador, AppError> {
        let existing = self
            .get_ambassador(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ambassador {} not found", id)))?;

        let now = Utc::now().to_rfc3339();

        let name = request.name.as_ref().unwrap_or(&existing.name);
        let specialization = request
            .specialization
            .clone()
            .unwrap_or(existing.specialization.clone());
        let year = request.year.clone().unwrap_or(existing.year.clone());
        let tagline = request.tagline.as_ref().unwrap_or(&existing.tagline);
        let photo_url = request.photo_url.clone().or(existing.photo_url.clone());
        let instagram_url = request
            .instagram_url
            .clone()
            .or(existing.instagram_url.clone());
        let linkedin_url = request
            .linkedin_url
            .clone()
            .or(existing.linkedin_url.clone());
        let email_id = request.email_id.clone().or(existing.email_id.clone());
        let is_active = request.is_active.unwrap_or(existing.is_active);

        let result = sqlx::query(
            "UPDATE ambassadors SET name = ?, specialization = ?, year = ?, tagline = ?, photo_url = ?, instagram_url = ?, linkedin_url = ?, email_id = ?, is_active = ?, updated_at = ? WHERE id = ?"
        )
        .bind(name)
        .bind(specialization.as_str())
        .bind(year.as_str())
        .bind(tagline)
        .bind(&photo_url)
        .bind(&instagram_url)
        .bind(&linkedin_url)
        .bind(&email_id)
        .bind(is_active as i32)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // Deleted between the read and the write
            return Err(AppError::NotFound(format!("Ambassador {} not found", id)));
        }

        self.bump_and_publish().await?;

        Ok(Ambassador {
            id: id.to_string(),
            name: name.clone(),
            specialization,
            year,
            tagline: tagline.clone(),
            photo_url,
            instagram_url,
            linkedin_url,
            email_id,
            is_active,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Flip an ambassador's active flag.
    pub async fn toggle_ambassador(&self, id: &str) -> Result<Ambassador, AppError> {
        let mut ambassador = self
            .get_ambassador(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ambassador {} not found", id)))?;

        let now = Utc::now().to_rfc3339();
        ambassador.is_active = !ambassador.is_active;
        ambassador.updated_at = now.clone();

        sqlx::query("UPDATE ambassadors SET is_active = ?, updated_at = ? WHERE id = ?")
            .bind(ambassador.is_active as i32)
            .bind(&now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.bump_and_publish().await?;

        Ok(ambassador)
    }

    /// Delete an ambassador.
    pub async fn delete_ambassador(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM ambassadors WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Ambassador {} not found", id)));
        }

        self.bump_and_publish().await?;
        Ok(())
    }

    /// Import a batch of ambassadors.
    ///
    /// Appends every entry; the revision counter is bumped once for the whole
    /// batch, so watchers see a single new snapshot regardless of batch size.
    pub async fn import_ambassadors(
        &self,
        requests: &[CreateAmbassadorRequest],
    ) -> Result<Vec<Ambassador>, AppError> {
        let mut results = Vec::new();

        // Use a transaction for atomicity
        let mut tx = self.pool.begin().await?;

        for request in requests {
            let id = uuid::Uuid::new_v4().to_string();
            let now = Utc::now().to_rfc3339();

            sqlx::query(
                "INSERT INTO ambassadors (id, name, specialization, year, tagline, photo_url, instagram_url, linkedin_url, email_id, is_active, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
            )
            .bind(&id)
            .bind(&request.name)
            .bind(request.specialization.as_str())
            .bind(request.year.as_str())
            .bind(&request.tagline)
            .bind(&request.photo_url)
            .bind(&request.instagram_url)
            .bind(&request.linkedin_url)
            .bind(&request.email_id)
            .bind(request.is_active as i32)
            .bind(&now)
            .bind(&now)
            .execute(&mut *tx)
            .await?;

            results.push(Ambassador {
                id,
                name: request.name.clone(),
                specialization: request.specialization.clone(),
                year: request.year.clone(),
                tagline: request.tagline.clone(),
                photo_url: request.photo_url.clone(),
                instagram_url: request.instagram_url.clone(),
                linkedin_url: request.linkedin_url.clone(),
                email_id: request.email_id.clone(),
                is_active: request.is_active,
                created_at: now.clone(),
                updated_at: now,
            });
        }

        tx.commit().await?;

        // One bump for the entire batch
        self.bump_and_publish().await?;

        Ok(results)
    }

    // ==================== INTERACTION LOG OPERATIONS ====================

    /// Record one outbound click. Does not touch the revision counter.
    pub async fn record_interaction(
        &self,
        request: &TrackRequest,
        device_type: DeviceType,
    ) -> Result<InteractionLog, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let referrer = request
            .referrer
            .clone()
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| "direct".to_string());

        sqlx::query(
            "INSERT INTO interaction_logs (id, ambassador_id, platform, device_type, referrer, created_at) VALUES (?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&request.ambassador_id)
        .bind(request.platform.as_str())
        .bind(device_type.as_str())
        .bind(&referrer)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(InteractionLog {
            id,
            ambassador_id: request.ambassador_id.clone(),
            platform: request.platform.clone(),
            device_type,
            referrer,
            created_at: now,
        })
    }

    /// List all interaction logs, newest first.
    pub async fn list_logs(&self) -> Result<Vec<InteractionLog>, AppError> {
        let rows = sqlx::query(
            "SELECT id, ambassador_id, platform, device_type, referrer, created_at FROM interaction_logs ORDER BY created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| log_from_row(&row)).collect())
    }

    /// The most recent interaction logs, newest first.
    pub async fn recent_logs(&self, limit: i64) -> Result<Vec<InteractionLog>, AppError> {
        let rows = sqlx::query(
            "SELECT id, ambassador_id, platform, device_type, referrer, created_at FROM interaction_logs ORDER BY created_at DESC LIMIT ?"
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| log_from_row(&row)).collect())
    }

    // ==================== DASHBOARD STATS ====================

    /// Aggregate counters for the admin dashboard.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, AppError> {
        let total_hits: i64 = sqlx::query("SELECT COUNT(*) AS count FROM interaction_logs")
            .fetch_one(&self.pool)
            .await?
            .get("count");

        let active_ambassadors: i64 =
            sqlx::query("SELECT COUNT(*) AS count FROM ambassadors WHERE is_active = 1")
                .fetch_one(&self.pool)
                .await?
                .get("count");

        let instagram_hits: i64 =
            sqlx::query("SELECT COUNT(*) AS count FROM interaction_logs WHERE platform = ?")
                .bind(Platform::Instagram.as_str())
                .fetch_one(&self.pool)
                .await?
                .get("count");

        let linkedin_hits: i64 =
            sqlx::query("SELECT COUNT(*) AS count FROM interaction_logs WHERE platform = ?")
                .bind(Platform::Linkedin.as_str())
                .fetch_one(&self.pool)
                .await?
                .get("count");

        let recent_logs = self.recent_logs(5).await?;

        Ok(DashboardStats {
            total_hits,
            active_ambassadors,
            instagram_hits,
            linkedin_hits,
            recent_logs,
        })
    }
}

// Helper functions for row conversion

fn ambassador_from_row(row: &sqlx::sqlite::SqliteRow) -> Ambassador {
    let is_active: i32 = row.get("is_active");
    let specialization: String = row.get("specialization");
    let year: String = row.get("year");
    Ambassador {
        id: row.get("id"),
        name: row.get("name"),
        // Written via as_str, so these parses only miss on hand-edited rows
        specialization: Specialization::from_str(&specialization)
            .unwrap_or(Specialization::Marketing),
        year: Year::from_str(&year).unwrap_or(Year::First),
        tagline: row.get("tagline"),
        photo_url: row.get("photo_url"),
        instagram_url: row.get("instagram_url"),
        linkedin_url: row.get("linkedin_url"),
        email_id: row.get("email_id"),
        is_active: is_active != 0,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn log_from_row(row: &sqlx::sqlite::SqliteRow) -> InteractionLog {
    let platform: String = row.get("platform");
    let device_type: String = row.get("device_type");
    InteractionLog {
        id: row.get("id"),
        ambassador_id: row.get("ambassador_id"),
        platform: Platform::from_str(&platform).unwrap_or(Platform::Instagram),
        device_type: DeviceType::from_str(&device_type).unwrap_or(DeviceType::Desktop),
        referrer: row.get("referrer"),
        created_at: row.get("created_at"),
    }
}
