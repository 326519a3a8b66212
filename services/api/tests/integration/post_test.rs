use docvault_api::domain::types::AuditAction;
use docvault_api::error::ApiError;
use docvault_api::usecase::post::{
    CreatePostInput, CreatePostUseCase, DeletePostUseCase, GetPostUseCase,
};

use crate::helpers::{
    MockAuditLog, MockOtpRepo, MockPostRepo, MockShareLinkRepo, live_link, live_otp, other_user,
    test_post, test_user,
};

#[tokio::test]
async fn should_create_post_and_audit_the_upload() {
    let user = test_user();

    let audit = MockAuditLog::empty();
    let entries_handle = audit.entries_handle();

    let uc = CreatePostUseCase {
        posts: MockPostRepo::empty(),
        audit,
    };
    let post = uc
        .execute(
            &user,
            CreatePostInput {
                captions: None,
                document: Some("https://cdn.example.com/a.pdf".to_owned()),
                document_name: Some("a.pdf".to_owned()),
                image: None,
                image_name: None,
                video: None,
                video_name: None,
            },
        )
        .await
        .unwrap();

    assert!(!post.otp_protected, "new posts start unprotected");

    let entries = entries_handle.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, AuditAction::Upload);
    assert_eq!(entries[0].file_name, "a.pdf");
}

#[tokio::test]
async fn should_succeed_even_when_the_audit_sink_is_down() {
    let user = test_user();

    let uc = CreatePostUseCase {
        posts: MockPostRepo::empty(),
        audit: MockAuditLog::failing(),
    };
    let result = uc
        .execute(
            &user,
            CreatePostInput {
                captions: None,
                document: Some("https://cdn.example.com/a.pdf".to_owned()),
                document_name: Some("a.pdf".to_owned()),
                image: None,
                image_name: None,
                video: None,
                video_name: None,
            },
        )
        .await;
    assert!(result.is_ok(), "audit is best-effort, got {result:?}");
}

#[tokio::test]
async fn should_forbid_reading_a_foreign_post() {
    let owner = test_user();
    let post = test_post(owner.id);

    let uc = GetPostUseCase {
        posts: MockPostRepo::new(vec![post.clone()]),
    };

    let mine = uc.execute(&owner, post.id).await.unwrap();
    assert_eq!(mine.id, post.id);

    // A registered stranger must not be able to read the payload URLs
    // directly; for them the share-link gates are the only way in.
    let theirs = uc.execute(&other_user(), post.id).await;
    assert!(
        matches!(theirs, Err(ApiError::Forbidden)),
        "expected Forbidden, got {theirs:?}"
    );
}

#[tokio::test]
async fn should_cascade_delete_to_links_and_otps() {
    let user = test_user();
    let post = test_post(user.id);
    let link = live_link(post.id, None);

    let posts = MockPostRepo::new(vec![post.clone()]);
    let posts_handle = posts.posts.clone();
    let otps = MockOtpRepo::new(vec![live_otp(post.id, user.id, "123456")]);
    let otps_handle = otps.otps_handle();
    let links = MockShareLinkRepo::new(vec![link]);
    let links_handle = links.links_handle();

    let uc = DeletePostUseCase {
        posts,
        otps,
        links,
        audit: MockAuditLog::empty(),
    };
    uc.execute(&user, post.id).await.unwrap();

    assert!(posts_handle.lock().unwrap().is_empty());
    assert!(otps_handle.lock().unwrap().is_empty(), "otps are purged");
    assert!(
        !links_handle.lock().unwrap()[0].active,
        "links are deactivated"
    );
}

#[tokio::test]
async fn should_forbid_delete_by_non_owner() {
    let owner = test_user();
    let post = test_post(owner.id);

    let posts = MockPostRepo::new(vec![post.clone()]);
    let posts_handle = posts.posts.clone();

    let uc = DeletePostUseCase {
        posts,
        otps: MockOtpRepo::empty(),
        links: MockShareLinkRepo::empty(),
        audit: MockAuditLog::empty(),
    };
    let result = uc.execute(&other_user(), post.id).await;

    assert!(matches!(result, Err(ApiError::Forbidden)));
    assert_eq!(posts_handle.lock().unwrap().len(), 1);
}
