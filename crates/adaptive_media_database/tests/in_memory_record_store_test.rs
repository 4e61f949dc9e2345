//! Tests for the in-memory record store.

use adaptive_media_core::{AdaptiveMediaImage, AdaptiveMediaImageBuilder};
use adaptive_media_database::InMemoryImageRecordStore;
use adaptive_media_error::{AdaptiveMediaErrorKind, ImageErrorKind};
use adaptive_media_interface::ImageRecordStore;
use chrono::Utc;

fn image(image_id: i64, company_id: i64, configuration_uuid: &str, file_version_id: i64) -> AdaptiveMediaImage {
    AdaptiveMediaImageBuilder::default()
        .image_id(image_id)
        .company_id(company_id)
        .group_id(20)
        .create_date(Utc::now())
        .file_version_id(file_version_id)
        .mime_type("image/jpeg")
        .width(100u32)
        .height(80u32)
        .size(2048u64)
        .configuration_uuid(configuration_uuid)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_create_and_fetch() {
    let store = InMemoryImageRecordStore::new();
    let created = store.create(image(1, 10, "thumbnail", 5)).await.unwrap();

    let fetched = store
        .fetch_by_configuration_and_file_version("thumbnail", 5)
        .await
        .unwrap();
    assert_eq!(fetched, Some(created));

    assert!(
        store
            .fetch_by_configuration_and_file_version("thumbnail", 6)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        store
            .fetch_by_configuration_and_file_version("preview", 5)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_duplicate_key_rejected() {
    let store = InMemoryImageRecordStore::new();
    store.create(image(1, 10, "thumbnail", 5)).await.unwrap();

    let err = store.create(image(2, 10, "thumbnail", 5)).await.unwrap_err();
    assert_eq!(
        err.image_kind(),
        Some(&ImageErrorKind::DuplicateVariant {
            configuration_uuid: "thumbnail".to_string(),
            file_version_id: 5,
        })
    );
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_reused_image_id_rejected() {
    let store = InMemoryImageRecordStore::new();
    store.create(image(1, 10, "thumbnail", 5)).await.unwrap();

    let err = store.create(image(1, 10, "preview", 5)).await.unwrap_err();
    assert!(matches!(err.kind(), AdaptiveMediaErrorKind::Database(_)));
    assert!(
        store
            .fetch_by_configuration_and_file_version("preview", 5)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_find_by_file_version_ordered_by_id() {
    let store = InMemoryImageRecordStore::new();
    store.create(image(7, 10, "hd", 5)).await.unwrap();
    store.create(image(3, 10, "thumbnail", 5)).await.unwrap();
    store.create(image(5, 10, "preview", 5)).await.unwrap();
    store.create(image(4, 10, "thumbnail", 6)).await.unwrap();

    let ids: Vec<i64> = store
        .find_by_file_version(5)
        .await
        .unwrap()
        .iter()
        .map(|image| *image.image_id())
        .collect();
    assert_eq!(ids, vec![3, 5, 7]);
    assert!(store.find_by_file_version(99).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_count_by_company_and_configuration() {
    let store = InMemoryImageRecordStore::new();
    store.create(image(1, 10, "thumbnail", 1)).await.unwrap();
    store.create(image(2, 10, "thumbnail", 2)).await.unwrap();
    store.create(image(3, 10, "preview", 1)).await.unwrap();
    store.create(image(4, 11, "thumbnail", 3)).await.unwrap();

    assert_eq!(store.count_by_company_and_configuration(10, "thumbnail").await.unwrap(), 2);
    assert_eq!(store.count_by_company_and_configuration(10, "preview").await.unwrap(), 1);
    assert_eq!(store.count_by_company_and_configuration(11, "thumbnail").await.unwrap(), 1);
    assert_eq!(store.count_by_company_and_configuration(12, "thumbnail").await.unwrap(), 0);
}

#[tokio::test]
async fn test_remove_frees_the_key() {
    let store = InMemoryImageRecordStore::new();
    store.create(image(1, 10, "thumbnail", 5)).await.unwrap();

    let removed = store.remove(1).await.unwrap();
    assert_eq!(removed.map(|image| *image.image_id()), Some(1));
    assert!(store.remove(1).await.unwrap().is_none());
    assert!(store.is_empty().await);

    store.create(image(2, 10, "thumbnail", 5)).await.unwrap();
    assert_eq!(store.all().await.len(), 1);
}

#[tokio::test]
async fn test_clones_share_records() {
    let store = InMemoryImageRecordStore::new();
    let other = store.clone();
    store.create(image(1, 10, "thumbnail", 5)).await.unwrap();

    assert_eq!(other.len().await, 1);
}
