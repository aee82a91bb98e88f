//! In-memory integration tests for account management.

use super::helpers::{Backend, backend};
use flowment::user::{
    domain::{Area, UserRole, UserStatus},
    services::{UpdateUserRequest, UserAccountError},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_accounts_can_sign_in(backend: Backend) -> Result<(), eyre::Report> {
    let carlos = backend.register("Carlos", "colaborador").await?;

    let session = backend
        .accounts
        .login(
            Some("  CARLOS@acme.test ".to_owned()),
            Some("s3cret-pass".to_owned()),
        )
        .await?;
    let claims = backend.accounts.tokens().validate(&session.token)?;

    assert_eq!(session.user.id(), carlos.id());
    assert_eq!(claims.user_id()?, carlos.id());
    assert_eq!(claims.rol, UserRole::Collaborator);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inactive_accounts_are_refused(backend: Backend) -> Result<(), eyre::Report> {
    let carlos = backend.register("Carlos", "colaborador").await?;
    backend
        .accounts
        .update(
            carlos.id(),
            UpdateUserRequest {
                status: Some("inactivo".to_owned()),
                ..UpdateUserRequest::default()
            },
        )
        .await?;

    let result = backend
        .accounts
        .login(
            Some("carlos@acme.test".to_owned()),
            Some("s3cret-pass".to_owned()),
        )
        .await;

    assert!(matches!(result, Err(UserAccountError::AccountInactive)));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn updates_change_only_supplied_fields(backend: Backend) -> Result<(), eyre::Report> {
    let carlos = backend.register("Carlos", "colaborador").await?;

    let updated = backend
        .accounts
        .update(
            carlos.id(),
            UpdateUserRequest {
                role: Some("TeamLeader".to_owned()),
                area: Some("gestion humana".to_owned()),
                ..UpdateUserRequest::default()
            },
        )
        .await?;

    assert_eq!(updated.role(), UserRole::TeamLeader);
    assert_eq!(updated.area(), Some(Area::PeopleManagement));
    assert_eq!(updated.status(), UserStatus::Active);
    assert_eq!(updated.name(), "Carlos");
    assert_eq!(updated.organization(), "Acme");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_accounts_are_gone(backend: Backend) -> Result<(), eyre::Report> {
    let carlos = backend.register("Carlos", "colaborador").await?;

    backend.accounts.delete(carlos.id()).await?;
    let lookup = backend.accounts.get(carlos.id()).await;
    let again = backend.accounts.delete(carlos.id()).await;

    assert!(matches!(lookup, Err(UserAccountError::NotFound(id)) if id == carlos.id()));
    assert!(matches!(again, Err(UserAccountError::NotFound(_))));
    Ok(())
}
