use docvault_api::domain::types::AuditAction;
use docvault_api::error::ApiError;
use docvault_api::usecase::post::ToggleProtectionUseCase;

use crate::helpers::{
    MockAuditLog, MockOtpRepo, MockPostRepo, live_otp, other_user, test_post, test_user,
};

#[tokio::test]
async fn should_enable_protection_with_valid_otp_and_audit_it() {
    let user = test_user();
    let post = test_post(user.id);

    let posts = MockPostRepo::new(vec![post.clone()]);
    let otps = MockOtpRepo::new(vec![live_otp(post.id, user.id, "123456")]);
    let otps_handle = otps.otps_handle();
    let audit = MockAuditLog::empty();
    let entries_handle = audit.entries_handle();

    let uc = ToggleProtectionUseCase { posts, otps, audit };
    let updated = uc.execute(&user, post.id, true, "123456").await.unwrap();

    assert!(updated.otp_protected);
    assert!(otps_handle.lock().unwrap()[0].used, "step-up code is consumed");

    let entries = entries_handle.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, AuditAction::EnableOtp);
    assert_eq!(entries[0].file_name, "q3.pdf");
}

#[tokio::test]
async fn should_leave_flag_and_audit_untouched_on_bad_otp() {
    let user = test_user();
    let post = test_post(user.id);

    let posts = MockPostRepo::new(vec![post.clone()]);
    let posts_handle = posts.posts.clone();
    let audit = MockAuditLog::empty();
    let entries_handle = audit.entries_handle();

    let uc = ToggleProtectionUseCase {
        posts,
        otps: MockOtpRepo::new(vec![live_otp(post.id, user.id, "123456")]),
        audit,
    };
    let result = uc.execute(&user, post.id, true, "999999").await;

    assert!(matches!(result, Err(ApiError::InvalidOrExpiredOtp)));
    assert!(
        !posts_handle.lock().unwrap()[0].otp_protected,
        "failed step-up must not flip the flag"
    );
    assert!(entries_handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_audit_disable_separately_from_enable() {
    let user = test_user();
    let mut post = test_post(user.id);
    post.otp_protected = true;

    let audit = MockAuditLog::empty();
    let entries_handle = audit.entries_handle();

    let uc = ToggleProtectionUseCase {
        posts: MockPostRepo::new(vec![post.clone()]),
        otps: MockOtpRepo::new(vec![live_otp(post.id, user.id, "123456")]),
        audit,
    };
    let updated = uc.execute(&user, post.id, false, "123456").await.unwrap();

    assert!(!updated.otp_protected);
    assert_eq!(
        entries_handle.lock().unwrap()[0].action,
        AuditAction::DisableOtp
    );
}

#[tokio::test]
async fn should_forbid_toggle_by_non_owner() {
    let owner = test_user();
    let intruder = other_user();
    let post = test_post(owner.id);

    let uc = ToggleProtectionUseCase {
        posts: MockPostRepo::new(vec![post.clone()]),
        otps: MockOtpRepo::new(vec![live_otp(post.id, intruder.id, "123456")]),
        audit: MockAuditLog::empty(),
    };
    let result = uc.execute(&intruder, post.id, true, "123456").await;
    assert!(matches!(result, Err(ApiError::Forbidden)));
}
