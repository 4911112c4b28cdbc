use crate::config::{DatabaseConfig, Driver};
use crate::db::models::{Facility, FacilityPhoto, Marker, QUICK_FACILITIES};
use crate::db::schema::SQLITE_INIT;
use crate::error::StoreError;
use chrono::Utc;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Executor as _, Pool, Sqlite};

pub type SqlitePool = Pool<Sqlite>;

const FACILITY_COLUMNS: &str = "id, name, category, department, description, floor_number, \
     hours, marker_id, status, created_at, updated_at";

#[derive(Clone)]
pub struct FacilityStore {
    pool: SqlitePool,
}

impl FacilityStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for the configured SQLite file, creating it if needed.
    pub async fn connect(cfg: &DatabaseConfig) -> Result<Self, StoreError> {
        if cfg.connection != Driver::Sqlite {
            return Err(StoreError::UnsupportedDriver(cfg.connection));
        }
        let opts = SqliteConnectOptions::new()
            .filename(&cfg.database)
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePool::connect_with(opts).await?;
        Ok(Self::new(pool))
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        self.pool.execute(sqlx::raw_sql(SQLITE_INIT)).await?;
        Ok(())
    }

    /// Insert the fixture facilities in one transaction. Names already
    /// present are left untouched. Returns how many rows were inserted.
    pub async fn seed_quick_data(&self) -> Result<u64, StoreError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for facility in QUICK_FACILITIES.iter() {
            let res = sqlx::query(
                r#"
                INSERT INTO facilities (
                    name, category, department, description, floor_number,
                    hours, status, created_at, updated_at
                ) VALUES (?, ?, ?, ?, NULL, ?, 'active', ?, ?)
                ON CONFLICT(name) DO NOTHING
                "#,
            )
            .bind(facility.name)
            .bind(facility.category)
            .bind(facility.department)
            .bind(facility.description)
            .bind(facility.hours)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;
            inserted += res.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM facilities")
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }

    pub async fn list(&self) -> Result<Vec<Facility>, StoreError> {
        let sql = format!("SELECT {FACILITY_COLUMNS} FROM facilities ORDER BY id");
        let rows = sqlx::query_as::<_, Facility>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Facility>, StoreError> {
        let sql = format!("SELECT {FACILITY_COLUMNS} FROM facilities WHERE name = ?");
        let row = sqlx::query_as::<_, Facility>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// The marker a facility belongs to, if it has one.
    pub async fn marker_of(&self, facility: &Facility) -> Result<Option<Marker>, StoreError> {
        let Some(marker_id) = facility.marker_id else {
            return Ok(None);
        };
        let row = sqlx::query_as::<_, Marker>(
            "SELECT id, name, latitude, longitude FROM markers WHERE id = ?",
        )
        .bind(marker_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn photos_of(&self, facility_id: i64) -> Result<Vec<FacilityPhoto>, StoreError> {
        let rows = sqlx::query_as::<_, FacilityPhoto>(
            "SELECT id, facility_id, path, caption FROM facility_photos WHERE facility_id = ? ORDER BY id",
        )
        .bind(facility_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
