use async_trait::async_trait;

use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::{NewShipmentRecord, ShipmentRecord},
};

const COLUMNS: &str = "id, source, destination, product_name, date, quantity, weight, \
    driver_name, truck, toll_fees, food_costs, amount_charged, driver_due, owner_due, \
    created_by, created_at";

/// Append-only storage of shipment records
#[async_trait]
pub trait ShipmentRepository: Send + Sync {
    /// Insert a fully populated record and return it with its assigned id
    async fn append(&self, record: NewShipmentRecord) -> Result<ShipmentRecord>;

    /// Every stored record, oldest first
    async fn list_all(&self) -> Result<Vec<ShipmentRecord>>;
}

/// Shipment store for database operations
pub struct SqliteShipmentStore {
    pool: DbPool,
}

impl SqliteShipmentStore {
    /// Create a new SqliteShipmentStore with the provided database pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShipmentRepository for SqliteShipmentStore {
    async fn append(&self, record: NewShipmentRecord) -> Result<ShipmentRecord> {
        let query = format!(
            r#"
            INSERT INTO field (
                source, destination, product_name, date, quantity, weight,
                driver_name, truck, toll_fees, food_costs, amount_charged,
                driver_due, owner_due, created_by, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {COLUMNS}
            "#
        );

        let stored = sqlx::query_as::<_, ShipmentRecord>(&query)
            .bind(&record.source)
            .bind(&record.destination)
            .bind(&record.product_name)
            .bind(record.date)
            .bind(record.quantity)
            .bind(record.weight)
            .bind(&record.driver_name)
            .bind(&record.truck)
            .bind(record.toll_fees)
            .bind(record.food_costs)
            .bind(record.amount_charged)
            .bind(record.driver_due)
            .bind(record.owner_due)
            .bind(&record.created_by)
            .bind(record.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        tracing::info!(
            id = stored.id,
            driver = %stored.driver_name,
            created_by = %stored.created_by,
            "Stored shipment record"
        );

        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<ShipmentRecord>> {
        let records =
            sqlx::query_as::<_, ShipmentRecord>(&format!("SELECT {COLUMNS} FROM field ORDER BY id"))
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database)?;

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_db_pool, migrate};
    use chrono::{NaiveDate, Utc};

    async fn setup_store() -> (DbPool, SqliteShipmentStore) {
        let pool = init_db_pool("sqlite::memory:", 1)
            .await
            .expect("Failed to open in-memory database");
        migrate(&pool).await.expect("Failed to migrate");
        (pool.clone(), SqliteShipmentStore::new(pool))
    }

    fn new_record(driver: &str) -> NewShipmentRecord {
        NewShipmentRecord {
            source: "Nairobi".to_string(),
            destination: "Mombasa".to_string(),
            product_name: "Cement".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            quantity: 20,
            weight: 1500.0,
            driver_name: driver.to_string(),
            truck: "Benz".to_string(),
            toll_fees: 50.0,
            food_costs: 30.0,
            amount_charged: 1000.0,
            driver_due: 92.0,
            owner_due: 828.0,
            created_by: "driver".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_list_all_on_empty_store() {
        let (_pool, store) = setup_store().await;
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_assigns_increasing_ids() {
        let (_pool, store) = setup_store().await;

        let first = store.append(new_record("Driver One")).await.unwrap();
        let second = store.append(new_record("Driver Two")).await.unwrap();
        assert!(second.id > first.id);

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], first);
        assert_eq!(all[1], second);
    }

    #[tokio::test]
    async fn test_append_round_trips_every_field() {
        let (_pool, store) = setup_store().await;
        let input = new_record("Driver One");

        let stored = store.append(input.clone()).await.unwrap();
        assert_eq!(stored.source, input.source);
        assert_eq!(stored.product_name, input.product_name);
        assert_eq!(stored.date, input.date);
        assert_eq!(stored.quantity, input.quantity);
        assert_eq!(stored.driver_due, input.driver_due);
        assert_eq!(stored.owner_due, input.owner_due);
        assert_eq!(stored.created_by, input.created_by);
    }

    #[tokio::test]
    async fn test_blank_required_text_is_rejected_by_storage() {
        let (_pool, store) = setup_store().await;
        let mut record = new_record("Driver One");
        record.destination = "   ".to_string();

        let err = store.append(record).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_storage_is_a_persistence_error() {
        let (pool, store) = setup_store().await;
        pool.close().await;

        assert!(matches!(
            store.append(new_record("Driver One")).await,
            Err(AppError::Database(_))
        ));
        assert!(matches!(store.list_all().await, Err(AppError::Database(_))));
    }
}
