use marathon_auth::error::AuthServiceError;
use marathon_auth::usecase::login::{
    AdminLoginInput, AdminLoginUseCase, ProvisionAdminInput, ProvisionAdminUseCase,
};
use marathon_auth_types::token::{Principal, validate_token};
use marathon_testing::auth::TEST_JWT_SECRET;

use crate::helpers::{MockAdminRepo, test_admin};

fn login(admins: MockAdminRepo) -> AdminLoginUseCase<MockAdminRepo> {
    AdminLoginUseCase {
        admins,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        admin_ttl_secs: 3600,
    }
}

fn input(username: &str, password: &str) -> AdminLoginInput {
    AdminLoginInput {
        username: username.to_owned(),
        password: password.to_owned(),
    }
}

#[tokio::test]
async fn should_issue_admin_token_for_valid_credentials() {
    let admin = test_admin("desk1", "correct horse");
    let uc = login(MockAdminRepo::new(vec![admin.clone()]));

    let out = uc.execute(input("desk1", "correct horse")).await.unwrap();

    let info = validate_token(&out.token, TEST_JWT_SECRET).unwrap();
    match info.principal {
        Principal::Admin { id, username } => {
            assert_eq!(id.0, admin.id);
            assert_eq!(username, "desk1");
        }
        other => panic!("expected admin principal, got {other:?}"),
    }
    assert_eq!(info.exp, out.token_exp);
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let uc = login(MockAdminRepo::new(vec![test_admin("desk1", "correct horse")]));
    let result = uc.execute(input("desk1", "battery staple")).await;
    assert!(matches!(result, Err(AuthServiceError::InvalidCredentials)));
}

#[tokio::test]
async fn should_reject_unknown_username_like_wrong_password() {
    let uc = login(MockAdminRepo::empty());
    let result = uc.execute(input("ghost", "anything")).await;
    assert!(matches!(result, Err(AuthServiceError::InvalidCredentials)));
}

#[tokio::test]
async fn should_require_username_and_password() {
    let uc = login(MockAdminRepo::empty());
    let result = uc.execute(input("  ", "pw")).await;
    assert!(matches!(result, Err(AuthServiceError::MissingField(_))));
    let result = uc.execute(input("desk1", "")).await;
    assert!(matches!(result, Err(AuthServiceError::MissingField(_))));
}

#[tokio::test]
async fn should_provision_admin_with_bcrypt_hash() {
    let repo = MockAdminRepo::empty();
    let admins = repo.admins_handle();
    let uc = ProvisionAdminUseCase { admins: repo };

    uc.execute(ProvisionAdminInput {
        username: " desk2 ".to_owned(),
        password: "s3cret-pass".to_owned(),
    })
    .await
    .unwrap();

    let admins = admins.lock().unwrap();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].username, "desk2");
    assert_ne!(admins[0].password_hash, "s3cret-pass");
    assert!(bcrypt::verify("s3cret-pass", &admins[0].password_hash).unwrap());
}

#[tokio::test]
async fn should_reset_password_when_reprovisioning() {
    let repo = MockAdminRepo::new(vec![test_admin("desk1", "old-pass")]);
    let admins = repo.admins_handle();
    let uc = ProvisionAdminUseCase { admins: repo };

    uc.execute(ProvisionAdminInput {
        username: "desk1".to_owned(),
        password: "new-pass".to_owned(),
    })
    .await
    .unwrap();

    let login_uc = login(MockAdminRepo::new(admins.lock().unwrap().clone()));
    assert_eq!(admins.lock().unwrap().len(), 1);
    assert!(login_uc.execute(input("desk1", "new-pass")).await.is_ok());
    assert!(login_uc.execute(input("desk1", "old-pass")).await.is_err());
}
