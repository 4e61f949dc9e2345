//! Tests for registering variants.

mod test_utils;

use adaptive_media_error::ImageErrorKind;
use adaptive_media_interface::ImageRecordStore;
use test_utils::{
    COMPANY_ID, GROUP_ID, Harness, MockImageStorage, StorageBehavior, content, descriptor,
};

#[tokio::test]
async fn add_variant_copies_tenant_from_file_version() {
    let harness = Harness::started().await;

    let image = harness
        .service
        .add_variant("thumbnail", 1, descriptor(300, 200, 4096), content(b"jpeg bytes"))
        .await
        .expect("variant should be added");

    assert_eq!(*image.company_id(), COMPANY_ID);
    assert_eq!(*image.group_id(), GROUP_ID);
    assert_eq!(*image.file_version_id(), 1);
    assert_eq!(image.configuration_uuid(), "thumbnail");

    let fetched = harness
        .service
        .fetch_variant("thumbnail", 1)
        .await
        .unwrap()
        .expect("variant should be fetchable");
    assert_eq!(fetched, image);
    assert_eq!(fetched.mime_type(), "image/jpeg");
    assert_eq!(*fetched.width(), 300);
    assert_eq!(*fetched.height(), 200);
    assert_eq!(*fetched.size(), 4096);

    assert_eq!(
        harness.storage.content(1, "thumbnail").as_deref(),
        Some(&b"jpeg bytes"[..])
    );
}

#[tokio::test]
async fn second_add_for_same_pair_is_rejected() {
    let harness = Harness::started().await;

    let original = harness
        .service
        .add_variant("thumbnail", 1, descriptor(300, 200, 4096), content(b"first"))
        .await
        .unwrap();

    let err = harness
        .service
        .add_variant("thumbnail", 1, descriptor(10, 10, 1), content(b"second"))
        .await
        .unwrap_err();

    assert_eq!(
        err.image_kind(),
        Some(&ImageErrorKind::DuplicateVariant {
            configuration_uuid: "thumbnail".to_string(),
            file_version_id: 1,
        })
    );
    assert!(!err.is_retryable());

    let stored = harness.service.fetch_variant("thumbnail", 1).await.unwrap();
    assert_eq!(stored, Some(original));
    assert_eq!(harness.storage.content(1, "thumbnail").as_deref(), Some(&b"first"[..]));
    assert_eq!(harness.storage.saves().len(), 1);
}

#[tokio::test]
async fn same_file_version_accepts_other_configurations() {
    let harness = Harness::started().await;

    for uuid in ["thumbnail", "preview", "hd"] {
        harness
            .service
            .add_variant(uuid, 1, descriptor(100, 100, 10), content(b"bytes"))
            .await
            .unwrap();
    }

    let variants = harness.service.variants_for_file_version(1).await.unwrap();
    assert_eq!(variants.len(), 3);
    assert!(variants.windows(2).all(|pair| pair[0].image_id() < pair[1].image_id()));
}

#[tokio::test]
async fn empty_configuration_uuid_is_invalid() {
    let harness = Harness::started().await;

    let err = harness
        .service
        .add_variant("", 1, descriptor(1, 1, 1), content(b"bytes"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.image_kind(),
        Some(ImageErrorKind::InvalidArgument(_))
    ));
    assert!(harness.storage.saves().is_empty());
}

#[tokio::test]
async fn missing_source_writes_nothing() {
    let harness = Harness::started().await;

    let err = harness
        .service
        .add_variant("thumbnail", 404, descriptor(1, 1, 1), content(b"bytes"))
        .await
        .unwrap_err();

    assert_eq!(err.image_kind(), Some(&ImageErrorKind::SourceNotFound(404)));
    assert!(harness.storage.saves().is_empty());
    assert!(harness.records.is_empty().await);
}

#[tokio::test]
async fn unknown_configuration_is_not_found() {
    let harness = Harness::started().await;

    let err = harness
        .service
        .add_variant("poster", 1, descriptor(1, 1, 1), content(b"bytes"))
        .await
        .unwrap_err();

    assert_eq!(
        err.image_kind(),
        Some(&ImageErrorKind::ConfigurationNotFound {
            company_id: COMPANY_ID,
            configuration_uuid: "poster".to_string(),
        })
    );
    assert!(harness.storage.saves().is_empty());
    assert!(harness.records.is_empty().await);
}

#[tokio::test]
async fn storage_failure_leaves_no_record() {
    let harness = Harness::with_storage(MockImageStorage::with_behavior(StorageBehavior::FailSave)).await;
    harness.service.start();

    let err = harness
        .service
        .add_variant("thumbnail", 1, descriptor(1, 1, 1), content(b"bytes"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.image_kind(),
        Some(ImageErrorKind::StorageFailure(_))
    ));
    assert!(err.is_retryable());
    assert!(harness.service.fetch_variant("thumbnail", 1).await.unwrap().is_none());
    assert!(harness.records.is_empty().await);
}

#[tokio::test]
async fn empty_content_is_a_storage_failure() {
    let harness = Harness::started().await;

    let err = harness
        .service
        .add_variant("thumbnail", 1, descriptor(1, 1, 0), content(b""))
        .await
        .unwrap_err();

    assert!(matches!(
        err.image_kind(),
        Some(ImageErrorKind::StorageFailure(_))
    ));
    assert!(harness.records.is_empty().await);
}

#[tokio::test]
async fn record_store_rejects_duplicate_created_behind_the_check() {
    let harness = Harness::started().await;

    let image = harness
        .service
        .add_variant("thumbnail", 1, descriptor(1, 1, 1), content(b"bytes"))
        .await
        .unwrap();

    // A concurrent writer that passed the registry's check would hit the store constraint
    let err = harness.records.create(image.clone()).await.unwrap_err();
    assert!(matches!(
        err.image_kind(),
        Some(ImageErrorKind::DuplicateVariant { .. })
    ));
    assert_eq!(harness.records.len().await, 1);
}

#[tokio::test]
async fn concurrent_adds_store_one_record() {
    let harness = std::sync::Arc::new(Harness::started().await);

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let harness = harness.clone();
            tokio::spawn(async move {
                harness
                    .service
                    .add_variant("preview", 2, descriptor(64, 64, 5), content(b"bytes"))
                    .await
            })
        })
        .collect();

    let mut successes = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => successes += 1,
            Err(err) => assert!(matches!(
                err.image_kind(),
                Some(ImageErrorKind::DuplicateVariant { .. })
            )),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(harness.service.variants_for_file_version(2).await.unwrap().len(), 1);
}
