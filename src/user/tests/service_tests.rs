//! Service tests for registration, sign-in and account administration.

use std::sync::Arc;

use crate::auth::{AuthConfig, TokenIssuer};
use crate::user::{
    adapters::memory::InMemoryUserRepository,
    domain::{Area, DocumentType, MAX_TEXT_LEN, UserDomainError, UserRole, UserStatus},
    ports::{UserRepositoryError, repository::MockUserRepository},
    services::{RegisterUserRequest, UpdateUserRequest, UserAccountError, UserAccountService},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = UserAccountService<InMemoryUserRepository, DefaultClock>;

fn issuer() -> TokenIssuer {
    TokenIssuer::new(AuthConfig::with_secret("user-service-secret"))
}

#[fixture]
fn service() -> TestService {
    UserAccountService::new(
        Arc::new(InMemoryUserRepository::new()),
        issuer(),
        Arc::new(DefaultClock),
    )
}

fn request(name: &str, email: &str, organization: &str) -> RegisterUserRequest {
    RegisterUserRequest::new(name, email, "s3cret-pass", organization)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_applies_defaults_and_issues_token(service: TestService) {
    let session = service
        .register(request("Ana", "Ana@Example.com", "Acme").with_role("gerente"))
        .await
        .expect("registration should succeed");

    assert_eq!(session.user.email().as_str(), "ana@example.com");
    assert_eq!(session.user.role(), UserRole::Collaborator);
    assert_eq!(session.user.area(), Some(Area::Administrative));
    assert_eq!(session.user.status(), UserStatus::Active);
    assert_ne!(session.user.password_hash(), "s3cret-pass");

    let claims = service
        .tokens()
        .validate(&session.token)
        .expect("issued token should validate");
    assert_eq!(claims.user_id(), Ok(session.user.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_keeps_recognised_optional_fields(service: TestService) {
    let session = service
        .register(
            request("Leo", "leo@example.com", "Acme")
                .with_role("TeamLeader")
                .with_document_type("cedula")
                .with_document_number("998877")
                .with_area("tecnologia"),
        )
        .await
        .expect("registration should succeed");

    assert_eq!(session.user.role(), UserRole::TeamLeader);
    assert_eq!(
        session.user.document_type(),
        Some(DocumentType::CitizenshipCard)
    );
    assert_eq!(session.user.document_number(), Some("998877"));
    assert_eq!(session.user.area(), Some(Area::Technology));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_rejects_taken_email(service: TestService) {
    service
        .register(request("Ana", "ana@example.com", "Acme"))
        .await
        .expect("first registration should succeed");

    let result = service
        .register(request("Other Ana", "ANA@example.com", "Acme"))
        .await;

    assert!(matches!(result, Err(UserAccountError::EmailTaken(_))));
}

#[rstest]
#[case(RegisterUserRequest::from_parts(None, Some("a@b.co".to_owned()), Some("s3cret-pass".to_owned()), Some("Acme".to_owned())))]
#[case(RegisterUserRequest::from_parts(Some("Ana".to_owned()), None, Some("s3cret-pass".to_owned()), Some("Acme".to_owned())))]
#[case(RegisterUserRequest::from_parts(Some("Ana".to_owned()), Some("a@b.co".to_owned()), None, Some("Acme".to_owned())))]
#[case(RegisterUserRequest::from_parts(Some("Ana".to_owned()), Some("a@b.co".to_owned()), Some("s3cret-pass".to_owned()), Some("  ".to_owned())))]
#[case(RegisterUserRequest::new("Ana", "a@b.co", "short", "Acme"))]
#[case(RegisterUserRequest::new("Ana", "not-an-email", "s3cret-pass", "Acme"))]
#[tokio::test(flavor = "multi_thread")]
async fn register_rejects_incomplete_requests(
    service: TestService,
    #[case] incomplete: RegisterUserRequest,
) {
    let result = service.register(incomplete).await;
    assert!(matches!(result, Err(UserAccountError::InvalidInput(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_accepts_valid_credentials(service: TestService) {
    let registered = service
        .register(request("Ana", "ana@example.com", "Acme"))
        .await
        .expect("registration should succeed");

    let session = service
        .login(
            Some(" ANA@example.com ".to_owned()),
            Some("s3cret-pass".to_owned()),
        )
        .await
        .expect("login should succeed");

    assert_eq!(session.user.id(), registered.user.id());
    assert!(!session.token.is_empty());
}

#[rstest]
#[case(Some("ana@example.com"), Some("wrong-pass"))]
#[case(Some("nobody@example.com"), Some("s3cret-pass"))]
#[tokio::test(flavor = "multi_thread")]
async fn login_rejects_bad_credentials(
    service: TestService,
    #[case] email: Option<&str>,
    #[case] password: Option<&str>,
) {
    service
        .register(request("Ana", "ana@example.com", "Acme"))
        .await
        .expect("registration should succeed");

    let result = service
        .login(email.map(str::to_owned), password.map(str::to_owned))
        .await;

    assert!(matches!(result, Err(UserAccountError::InvalidCredentials)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_requires_both_fields(service: TestService) {
    let result = service.login(Some("ana@example.com".to_owned()), None).await;
    assert!(matches!(result, Err(UserAccountError::InvalidInput(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inactive_account_cannot_sign_in(service: TestService) {
    let registered = service
        .register(request("Ana", "ana@example.com", "Acme"))
        .await
        .expect("registration should succeed");
    service
        .update(
            registered.user.id(),
            UpdateUserRequest {
                status: Some("inactivo".to_owned()),
                ..UpdateUserRequest::default()
            },
        )
        .await
        .expect("update should succeed");

    let result = service
        .login(
            Some("ana@example.com".to_owned()),
            Some("s3cret-pass".to_owned()),
        )
        .await;

    assert!(matches!(result, Err(UserAccountError::AccountInactive)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn collaborators_are_scoped_to_organization_and_sorted(service: TestService) {
    for (name, email, organization, role) in [
        ("Zoe", "zoe@example.com", "Acme", "colaborador"),
        ("Bruno", "bruno@example.com", "Acme", "colaborador"),
        ("Lia", "lia@example.com", "Acme", "TeamLeader"),
        ("Ana", "ana@example.com", "Globex", "colaborador"),
    ] {
        service
            .register(request(name, email, organization).with_role(role))
            .await
            .expect("registration should succeed");
    }

    let collaborators = service
        .collaborators(Some("Acme".to_owned()))
        .await
        .expect("lookup should succeed");
    let names: Vec<&str> = collaborators.iter().map(|user| user.name()).collect();

    assert_eq!(names, vec!["Bruno", "Zoe"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn collaborators_require_organization(service: TestService) {
    let result = service.collaborators(Some(" ".to_owned())).await;
    assert!(matches!(result, Err(UserAccountError::InvalidInput(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_rejects_email_of_another_account(service: TestService) {
    service
        .register(request("Ana", "ana@example.com", "Acme"))
        .await
        .expect("registration should succeed");
    let bruno = service
        .register(request("Bruno", "bruno@example.com", "Acme"))
        .await
        .expect("registration should succeed");

    let result = service
        .update(
            bruno.user.id(),
            UpdateUserRequest {
                email: Some("ana@example.com".to_owned()),
                ..UpdateUserRequest::default()
            },
        )
        .await;

    assert!(matches!(result, Err(UserAccountError::EmailTaken(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_rejects_overlong_name_and_keeps_stored_account(service: TestService) {
    let ana = service
        .register(request("Ana", "ana@example.com", "Acme"))
        .await
        .expect("registration should succeed");

    let result = service
        .update(
            ana.user.id(),
            UpdateUserRequest {
                name: Some("x".repeat(MAX_TEXT_LEN + 1)),
                ..UpdateUserRequest::default()
            },
        )
        .await;
    let stored = service.get(ana.user.id()).await.expect("account still exists");

    assert!(matches!(
        result,
        Err(UserAccountError::Domain(UserDomainError::TooLong { field: "name", .. }))
    ));
    assert_eq!(stored.name(), "Ana");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_rejects_unknown_role(service: TestService) {
    let ana = service
        .register(request("Ana", "ana@example.com", "Acme"))
        .await
        .expect("registration should succeed");

    let result = service
        .update(
            ana.user.id(),
            UpdateUserRequest {
                role: Some("gerente".to_owned()),
                ..UpdateUserRequest::default()
            },
        )
        .await;

    assert!(matches!(result, Err(UserAccountError::InvalidInput(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_account(service: TestService) {
    let ana = service
        .register(request("Ana", "ana@example.com", "Acme"))
        .await
        .expect("registration should succeed");

    service
        .delete(ana.user.id())
        .await
        .expect("delete should succeed");

    assert!(matches!(
        service.get(ana.user.id()).await,
        Err(UserAccountError::NotFound(_))
    ));
    assert!(matches!(
        service.delete(ana.user.id()).await,
        Err(UserAccountError::NotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_reports_accounts_still_in_use() {
    let mut repository = MockUserRepository::new();
    repository
        .expect_delete()
        .returning(|id| Err(UserRepositoryError::InUse(id)));
    let service = UserAccountService::new(Arc::new(repository), issuer(), Arc::new(DefaultClock));

    let result = service.delete(crate::user::domain::UserId::new()).await;

    assert!(matches!(result, Err(UserAccountError::InUse(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repository_failure_surfaces_as_repository_error() {
    let mut repository = MockUserRepository::new();
    repository.expect_find_by_email().returning(|_| {
        Err(UserRepositoryError::persistence(std::io::Error::other(
            "connection reset",
        )))
    });
    let service = UserAccountService::new(Arc::new(repository), issuer(), Arc::new(DefaultClock));

    let result = service
        .login(
            Some("ana@example.com".to_owned()),
            Some("s3cret-pass".to_owned()),
        )
        .await;

    assert!(matches!(
        result,
        Err(UserAccountError::Repository(UserRepositoryError::Persistence(_)))
    ));
}
