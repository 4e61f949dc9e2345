//! Diesel table definitions.

diesel::table! {
    adaptive_media_images (image_id) {
        image_id -> Int8,
        company_id -> Int8,
        group_id -> Int8,
        create_date -> Timestamptz,
        file_version_id -> Int8,
        mime_type -> Text,
        width -> Int4,
        height -> Int4,
        size -> Int8,
        configuration_uuid -> Text,
    }
}
