//! # Provider Repository
//!
//! Database operations for suppliers.
//!
//! Providers follow the same soft-delete convention as items: rows flip to
//! `active = 0` and drop out of listings, but items keep their
//! `provider_id` reference so historical reorder data stays resolvable.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use easyinv_core::{validation, Provider};

/// Repository for provider database operations.
#[derive(Debug, Clone)]
pub struct ProviderRepository {
    pool: SqlitePool,
}

impl ProviderRepository {
    /// Creates a new ProviderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProviderRepository { pool }
    }

    /// Creates a provider.
    ///
    /// ## Returns
    /// * `Ok(id)` - the new rowid
    pub async fn add(&self, name: &str, phone: Option<&str>) -> DbResult<i64> {
        validation::validate_provider_name(name)?;
        debug!(name = %name, "Adding provider");

        let result =
            sqlx::query("INSERT INTO providers (name, phone, active, created_at) VALUES (?1, ?2, 1, ?3)")
                .bind(name)
                .bind(phone)
                .bind(Utc::now())
                .execute(&self.pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    /// Lists active providers, alphabetically.
    pub async fn list(&self) -> DbResult<Vec<Provider>> {
        let providers = sqlx::query_as::<_, Provider>(
            "SELECT id, name, phone, active, created_at FROM providers \
             WHERE active = 1 ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(providers)
    }

    /// Gets a provider by id, active or not.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Provider>> {
        let provider = sqlx::query_as::<_, Provider>(
            "SELECT id, name, phone, active, created_at FROM providers WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(provider)
    }

    /// Gets an active provider by exact name.
    ///
    /// The bulk importer uses this to resolve a CSV `provider` column to an
    /// id, auto-creating the provider on a miss.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Provider>> {
        let provider = sqlx::query_as::<_, Provider>(
            "SELECT id, name, phone, active, created_at FROM providers \
             WHERE name = ?1 AND active = 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(provider)
    }

    /// Updates a provider's name and phone.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - no row with this id
    pub async fn update(&self, id: i64, name: &str, phone: Option<&str>) -> DbResult<()> {
        validation::validate_provider_name(name)?;
        debug!(id = id, "Updating provider");

        let result = sqlx::query("UPDATE providers SET name = ?2, phone = ?3 WHERE id = ?1")
            .bind(id)
            .bind(name)
            .bind(phone)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Provider", id));
        }

        Ok(())
    }

    /// Soft-deletes a provider.
    ///
    /// ## Returns
    /// Whether a row was affected. Items referencing the provider keep their
    /// `provider_id`; listings simply stop resolving the name.
    pub async fn delete(&self, id: i64) -> DbResult<bool> {
        debug!(id = id, "Soft-deleting provider");

        // active filter: a matched-but-unchanged row still counts as
        // affected, so deleting twice would otherwise report true
        let result = sqlx::query("UPDATE providers SET active = 0 WHERE id = ?1 AND active = 1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_add_and_get_provider() {
        let db = test_db().await;
        let repo = db.providers();

        let id = repo.add("Acme Parts", Some("555-0100")).await.unwrap();
        let provider = repo.get_by_id(id).await.unwrap().unwrap();

        assert_eq!(provider.name, "Acme Parts");
        assert_eq!(provider.phone.as_deref(), Some("555-0100"));
        assert!(provider.active);
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let db = test_db().await;
        let repo = db.providers();

        let err = repo.add("   ", None).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_sorted_and_filters_inactive() {
        let db = test_db().await;
        let repo = db.providers();

        repo.add("Zeta Supply", None).await.unwrap();
        repo.add("Acme Parts", None).await.unwrap();
        let gone = repo.add("Midway Goods", None).await.unwrap();
        repo.delete(gone).await.unwrap();

        let listed = repo.list().await.unwrap();
        let names: Vec<&str> = listed.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Acme Parts", "Zeta Supply"]);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let db = test_db().await;
        let repo = db.providers();

        let id = repo.add("Acme Parts", None).await.unwrap();

        assert!(repo.delete(id).await.unwrap());
        // Second delete: the row is already inactive, nothing affected
        assert!(!repo.delete(id).await.unwrap());
        // Unknown id behaves the same
        assert!(!repo.delete(9999).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_by_name_ignores_inactive() {
        let db = test_db().await;
        let repo = db.providers();

        let id = repo.add("Acme Parts", None).await.unwrap();
        assert!(repo.get_by_name("Acme Parts").await.unwrap().is_some());

        repo.delete(id).await.unwrap();
        assert!(repo.get_by_name("Acme Parts").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_provider_is_not_found() {
        let db = test_db().await;
        let repo = db.providers();

        let err = repo.update(999, "Nobody", None).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
