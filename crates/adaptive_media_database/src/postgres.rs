//! PostgreSQL implementation of ImageRecordStore.

use crate::models::AdaptiveMediaImageRow;
use crate::schema::adaptive_media_images;
use adaptive_media_core::AdaptiveMediaImage;
use adaptive_media_error::{
    AdaptiveMediaResult, DatabaseError, DatabaseErrorKind, ImageError, ImageErrorKind,
};
use adaptive_media_interface::{IdGenerator, ImageRecordStore};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind as DieselErrorKind, Error as DieselError};

/// Connection pool used by the store.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Name of the unique index enforcing one variant per configuration and file version.
const VARIANT_UNIQUE_INDEX: &str = "ix_adaptive_media_images_c_f";

/// Record store backed by the `adaptive_media_images` table.
///
/// Diesel is synchronous, so every query runs on the blocking thread pool.
#[derive(Clone)]
pub struct PostgresImageRecordStore {
    pool: PgPool,
}

impl std::fmt::Debug for PostgresImageRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresImageRecordStore")
            .field("pool_state", &self.pool.state())
            .finish()
    }
}

impl PostgresImageRecordStore {
    /// Create a store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool for the given database URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be established.
    #[tracing::instrument(skip(database_url))]
    pub fn connect(database_url: &str) -> AdaptiveMediaResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .build(manager)
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))?;
        tracing::info!("Connected adaptive media record store");
        Ok(Self::new(pool))
    }

    /// Open a pool using the `DATABASE_URL` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `DATABASE_URL` environment variable is not set
    /// - The pool cannot be established
    pub fn from_env() -> AdaptiveMediaResult<Self> {
        let database_url = std::env::var("DATABASE_URL").map_err(|_| {
            DatabaseError::new(DatabaseErrorKind::Connection(
                "DATABASE_URL environment variable not set".to_string(),
            ))
        })?;
        Self::connect(&database_url)
    }

    /// Run pending migrations.
    pub fn run_migrations(&self) -> AdaptiveMediaResult<()> {
        use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

        const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

        let mut conn = self
            .pool
            .get()
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|_| ())
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))?;
        Ok(())
    }

    /// Run a blocking query with a pooled connection.
    async fn with_connection<T, F>(&self, query: F) -> AdaptiveMediaResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> AdaptiveMediaResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))?;
            query(&mut conn)
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Task(e.to_string())))?
    }
}

fn into_images(rows: Vec<AdaptiveMediaImageRow>) -> AdaptiveMediaResult<Vec<AdaptiveMediaImage>> {
    rows.into_iter().map(AdaptiveMediaImage::try_from).collect()
}

#[async_trait]
impl ImageRecordStore for PostgresImageRecordStore {
    async fn fetch_by_configuration_and_file_version(
        &self,
        configuration_uuid: &str,
        file_version_id: i64,
    ) -> AdaptiveMediaResult<Option<AdaptiveMediaImage>> {
        let configuration_uuid = configuration_uuid.to_string();
        self.with_connection(move |conn| {
            adaptive_media_images::table
                .filter(adaptive_media_images::configuration_uuid.eq(&configuration_uuid))
                .filter(adaptive_media_images::file_version_id.eq(file_version_id))
                .select(AdaptiveMediaImageRow::as_select())
                .first(conn)
                .optional()
                .map_err(DatabaseError::from)?
                .map(AdaptiveMediaImage::try_from)
                .transpose()
        })
        .await
    }

    async fn find_by_file_version(
        &self,
        file_version_id: i64,
    ) -> AdaptiveMediaResult<Vec<AdaptiveMediaImage>> {
        self.with_connection(move |conn| {
            let rows = adaptive_media_images::table
                .filter(adaptive_media_images::file_version_id.eq(file_version_id))
                .order(adaptive_media_images::image_id.asc())
                .select(AdaptiveMediaImageRow::as_select())
                .load(conn)
                .map_err(DatabaseError::from)?;
            into_images(rows)
        })
        .await
    }

    async fn count_by_company_and_configuration(
        &self,
        company_id: i64,
        configuration_uuid: &str,
    ) -> AdaptiveMediaResult<u64> {
        let configuration_uuid = configuration_uuid.to_string();
        self.with_connection(move |conn| {
            let count: i64 = adaptive_media_images::table
                .filter(adaptive_media_images::company_id.eq(company_id))
                .filter(adaptive_media_images::configuration_uuid.eq(&configuration_uuid))
                .count()
                .get_result(conn)
                .map_err(DatabaseError::from)?;
            Ok(u64::try_from(count).unwrap_or(0))
        })
        .await
    }

    #[tracing::instrument(
        skip(self, image),
        fields(
            image_id = *image.image_id(),
            configuration_uuid = %image.configuration_uuid(),
            file_version_id = *image.file_version_id()
        )
    )]
    async fn create(&self, image: AdaptiveMediaImage) -> AdaptiveMediaResult<AdaptiveMediaImage> {
        let row = AdaptiveMediaImageRow::try_from(&image)?;
        self.with_connection(move |conn| {
            let inserted = diesel::insert_into(adaptive_media_images::table)
                .values(&row)
                .returning(AdaptiveMediaImageRow::as_returning())
                .get_result(conn);

            match inserted {
                Ok(row) => AdaptiveMediaImage::try_from(row),
                Err(DieselError::DatabaseError(DieselErrorKind::UniqueViolation, info))
                    if info.constraint_name() == Some(VARIANT_UNIQUE_INDEX) =>
                {
                    tracing::warn!("Rejected record violating variant uniqueness");
                    Err(ImageError::new(ImageErrorKind::DuplicateVariant {
                        configuration_uuid: row.configuration_uuid,
                        file_version_id: row.file_version_id,
                    })
                    .into())
                }
                Err(e) => Err(DatabaseError::from(e).into()),
            }
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn remove(&self, image_id: i64) -> AdaptiveMediaResult<Option<AdaptiveMediaImage>> {
        self.with_connection(move |conn| {
            diesel::delete(adaptive_media_images::table.find(image_id))
                .returning(AdaptiveMediaImageRow::as_returning())
                .get_result(conn)
                .optional()
                .map_err(DatabaseError::from)?
                .map(AdaptiveMediaImage::try_from)
                .transpose()
        })
        .await
    }
}

#[async_trait]
impl IdGenerator for PostgresImageRecordStore {
    async fn next_id(&self) -> AdaptiveMediaResult<i64> {
        self.with_connection(|conn| {
            let id = diesel::select(diesel::dsl::sql::<diesel::sql_types::BigInt>(
                "nextval('adaptive_media_image_ids')",
            ))
            .get_result::<i64>(conn)
            .map_err(DatabaseError::from)?;
            Ok(id)
        })
        .await
    }
}
