//! `PostgreSQL` repository implementation for user accounts.

use super::{
    models::{NewUserRow, UserChangesetRow, UserRow},
    schema::users,
};
use crate::user::{
    domain::{
        Area, DocumentType, Email, PersistedUserData, User, UserId, UserRole, UserStatus,
    },
    ports::{UserFilter, UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by user adapters.
pub type UserPgPool = Pool<ConnectionManager<PgConnection>>;

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: UserPgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: UserPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let email = user.email().clone();
        let new_row = to_new_row(user);

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| insert_error(err, user_id, &email))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let email = user.email().clone();
        let changeset = to_changeset(user);

        self.run_blocking(move |connection| {
            let affected = diesel::update(users::table.filter(users::id.eq(user_id.into_inner())))
                .set(&changeset)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateEmail(email.clone())
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            if affected == 0 {
                return Err(UserRepositoryError::NotFound(user_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: UserId) -> UserRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(users::table.filter(users::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(|err| delete_error(err, id))?;
            if affected == 0 {
                return Err(UserRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &Email) -> UserRepositoryResult<Option<User>> {
        let lookup_email = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::email.eq(lookup_email))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find(&self, filter: &UserFilter) -> UserRepositoryResult<Vec<User>> {
        let lookup = filter.clone();
        self.run_blocking(move |connection| {
            let mut query = users::table.select(UserRow::as_select()).into_boxed();
            if let Some(role) = lookup.role {
                query = query.filter(users::role.eq(role.as_str()));
            }
            if let Some(organization) = lookup.organization {
                query = query.filter(users::organization.eq(organization));
            }
            if let Some(ids) = lookup.ids {
                let uuids: Vec<uuid::Uuid> = ids.into_iter().map(UserId::into_inner).collect();
                query = query.filter(users::id.eq_any(uuids));
            }

            let rows = query
                .order(users::created_at.desc())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }
}

fn to_new_row(user: &User) -> NewUserRow {
    NewUserRow {
        id: user.id().into_inner(),
        name: user.name().to_owned(),
        email: user.email().as_str().to_owned(),
        password_hash: user.password_hash().to_owned(),
        role: user.role().as_str().to_owned(),
        document_type: user.document_type().map(|kind| kind.as_str().to_owned()),
        document_number: user.document_number().map(str::to_owned),
        organization: user.organization().to_owned(),
        area: user.area().map(|area| area.as_str().to_owned()),
        status: user.status().as_str().to_owned(),
        created_at: user.created_at(),
    }
}

fn to_changeset(user: &User) -> UserChangesetRow {
    UserChangesetRow {
        name: user.name().to_owned(),
        email: user.email().as_str().to_owned(),
        role: user.role().as_str().to_owned(),
        document_type: user.document_type().map(|kind| kind.as_str().to_owned()),
        document_number: user.document_number().map(str::to_owned),
        organization: user.organization().to_owned(),
        area: user.area().map(|area| area.as_str().to_owned()),
        status: user.status().as_str().to_owned(),
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let UserRow {
        id,
        name,
        email,
        password_hash,
        role,
        document_type,
        document_number,
        organization,
        area,
        status,
        created_at,
    } = row;

    let data = PersistedUserData {
        id: UserId::from_uuid(id),
        name,
        email: Email::new(email).map_err(UserRepositoryError::persistence)?,
        password_hash,
        role: UserRole::try_from(role.as_str()).map_err(UserRepositoryError::persistence)?,
        document_type: document_type
            .as_deref()
            .map(DocumentType::try_from)
            .transpose()
            .map_err(UserRepositoryError::persistence)?,
        document_number,
        organization,
        area: area
            .as_deref()
            .map(Area::try_from)
            .transpose()
            .map_err(UserRepositoryError::persistence)?,
        status: UserStatus::try_from(status.as_str()).map_err(UserRepositoryError::persistence)?,
        created_at,
    };
    Ok(User::from_persisted(data))
}

fn insert_error(err: DieselError, user_id: UserId, email: &Email) -> UserRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if is_email_unique_violation(info.as_ref()) =>
        {
            UserRepositoryError::DuplicateEmail(email.clone())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserRepositoryError::DuplicateUser(user_id)
        }
        _ => UserRepositoryError::persistence(err),
    }
}

fn delete_error(err: DieselError, id: UserId) -> UserRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            UserRepositoryError::InUse(id)
        }
        _ => UserRepositoryError::persistence(err),
    }
}

fn is_email_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == EMAIL_UNIQUE_CONSTRAINT)
}
