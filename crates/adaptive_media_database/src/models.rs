//! Database row types and domain conversions.

use adaptive_media_core::{AdaptiveMediaImage, AdaptiveMediaImageBuilder};
use adaptive_media_error::{AdaptiveMediaError, DatabaseError, DatabaseErrorKind};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row of the `adaptive_media_images` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::adaptive_media_images)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AdaptiveMediaImageRow {
    /// Primary key
    pub image_id: i64,
    /// Company (tenant)
    pub company_id: i64,
    /// Group within the company
    pub group_id: i64,
    /// Creation timestamp
    pub create_date: DateTime<Utc>,
    /// Source file version
    pub file_version_id: i64,
    /// Variant MIME type
    pub mime_type: String,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
    /// Size in bytes
    pub size: i64,
    /// Producing configuration
    pub configuration_uuid: String,
}

fn conversion_error(field: &str, value: impl std::fmt::Display) -> DatabaseError {
    DatabaseError::new(DatabaseErrorKind::Conversion(format!(
        "{} value {} out of range",
        field, value
    )))
}

impl TryFrom<&AdaptiveMediaImage> for AdaptiveMediaImageRow {
    type Error = DatabaseError;

    fn try_from(image: &AdaptiveMediaImage) -> Result<Self, Self::Error> {
        Ok(Self {
            image_id: *image.image_id(),
            company_id: *image.company_id(),
            group_id: *image.group_id(),
            create_date: *image.create_date(),
            file_version_id: *image.file_version_id(),
            mime_type: image.mime_type().clone(),
            width: i32::try_from(*image.width())
                .map_err(|_| conversion_error("width", image.width()))?,
            height: i32::try_from(*image.height())
                .map_err(|_| conversion_error("height", image.height()))?,
            size: i64::try_from(*image.size())
                .map_err(|_| conversion_error("size", image.size()))?,
            configuration_uuid: image.configuration_uuid().clone(),
        })
    }
}

impl TryFrom<AdaptiveMediaImageRow> for AdaptiveMediaImage {
    type Error = AdaptiveMediaError;

    fn try_from(row: AdaptiveMediaImageRow) -> Result<Self, Self::Error> {
        let width = u32::try_from(row.width).map_err(|_| conversion_error("width", row.width))?;
        let height =
            u32::try_from(row.height).map_err(|_| conversion_error("height", row.height))?;
        let size = u64::try_from(row.size).map_err(|_| conversion_error("size", row.size))?;

        AdaptiveMediaImageBuilder::default()
            .image_id(row.image_id)
            .company_id(row.company_id)
            .group_id(row.group_id)
            .create_date(row.create_date)
            .file_version_id(row.file_version_id)
            .mime_type(row.mime_type)
            .width(width)
            .height(height)
            .size(size)
            .configuration_uuid(row.configuration_uuid)
            .build()
    }
}
