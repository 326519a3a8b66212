use chrono::{Duration, Utc};
use uuid::Uuid;

use docvault_api::error::ApiError;
use docvault_api::usecase::share_link::{
    CreateShareLinkInput, CreateShareLinkUseCase, DeactivateShareLinkUseCase,
};

use crate::helpers::{MockPostRepo, MockShareLinkRepo, live_link, other_user, test_post, test_user};

#[tokio::test]
async fn should_create_link_with_unguessable_token() {
    let user = test_user();
    let post = test_post(user.id);

    let links = MockShareLinkRepo::empty();
    let links_handle = links.links_handle();

    let uc = CreateShareLinkUseCase {
        posts: MockPostRepo::new(vec![post.clone()]),
        links,
    };
    let link = uc
        .execute(
            &user,
            CreateShareLinkInput {
                post_id: post.id,
                expires_at: Utc::now() + Duration::hours(1),
                max_uses: Some(3),
            },
        )
        .await
        .unwrap();

    // Token is a v4 UUID, never derived from the link id or a sequence.
    assert!(Uuid::parse_str(&link.token).is_ok());
    assert_ne!(link.token, link.id.to_string());
    assert_eq!(link.use_count, 0);
    assert!(link.active);
    assert_eq!(links_handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_forbid_link_creation_for_foreign_post() {
    let owner = test_user();
    let post = test_post(owner.id);

    let uc = CreateShareLinkUseCase {
        posts: MockPostRepo::new(vec![post.clone()]),
        links: MockShareLinkRepo::empty(),
    };
    let result = uc
        .execute(
            &other_user(),
            CreateShareLinkInput {
                post_id: post.id,
                expires_at: Utc::now() + Duration::hours(1),
                max_uses: None,
            },
        )
        .await;
    assert!(matches!(result, Err(ApiError::Forbidden)));
}

#[tokio::test]
async fn should_reject_expiry_not_in_the_future() {
    let user = test_user();
    let post = test_post(user.id);

    let uc = CreateShareLinkUseCase {
        posts: MockPostRepo::new(vec![post.clone()]),
        links: MockShareLinkRepo::empty(),
    };
    let result = uc
        .execute(
            &user,
            CreateShareLinkInput {
                post_id: post.id,
                expires_at: Utc::now() - Duration::seconds(1),
                max_uses: None,
            },
        )
        .await;
    assert!(matches!(result, Err(ApiError::InvalidExpiry)));
}

#[tokio::test]
async fn should_reject_nonpositive_use_quota() {
    let user = test_user();
    let post = test_post(user.id);

    let uc = CreateShareLinkUseCase {
        posts: MockPostRepo::new(vec![post.clone()]),
        links: MockShareLinkRepo::empty(),
    };
    let result = uc
        .execute(
            &user,
            CreateShareLinkInput {
                post_id: post.id,
                expires_at: Utc::now() + Duration::hours(1),
                max_uses: Some(0),
            },
        )
        .await;
    assert!(matches!(result, Err(ApiError::InvalidExpiry)));
}

#[tokio::test]
async fn should_deactivate_idempotently() {
    let user = test_user();
    let post = test_post(user.id);
    let link = live_link(post.id, None);

    let links = MockShareLinkRepo::new(vec![link.clone()]);
    let links_handle = links.links_handle();

    let uc = DeactivateShareLinkUseCase {
        posts: MockPostRepo::new(vec![post]),
        links,
    };
    uc.execute(&user, link.id).await.unwrap();
    uc.execute(&user, link.id).await.unwrap();

    assert!(!links_handle.lock().unwrap()[0].active);
}

#[tokio::test]
async fn should_forbid_deactivating_a_foreign_link() {
    let owner = test_user();
    let post = test_post(owner.id);
    let link = live_link(post.id, None);

    let uc = DeactivateShareLinkUseCase {
        posts: MockPostRepo::new(vec![post]),
        links: MockShareLinkRepo::new(vec![link.clone()]),
    };
    let result = uc.execute(&other_user(), link.id).await;
    assert!(matches!(result, Err(ApiError::Forbidden)));
}

#[tokio::test]
async fn should_report_unknown_link_on_deactivate() {
    let user = test_user();

    let uc = DeactivateShareLinkUseCase {
        posts: MockPostRepo::empty(),
        links: MockShareLinkRepo::empty(),
    };
    let result = uc.execute(&user, Uuid::new_v4()).await;
    assert!(matches!(result, Err(ApiError::LinkNotFound)));
}
