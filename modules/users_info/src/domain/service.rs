use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::contract::model::{NewUser, User, UserPatch};
use crate::domain::error::DomainError;
use crate::domain::repo::{UniqueField, UniqueViolation, UnitOfWork, UsersStore};

/// Domain service with business rules for user management.
/// Depends only on the storage ports, not on infra types.
///
/// Every operation runs in its own unit of work; an early return drops it
/// uncommitted, which rolls the transaction back.
#[derive(Clone)]
pub struct Service {
    store: Arc<dyn UsersStore>,
}

impl Service {
    pub fn new(store: Arc<dyn UsersStore>) -> Self {
        Self { store }
    }

    #[instrument(name = "users_info.service.list_users", skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        debug!("Listing users");

        let uow = self.begin().await?;
        let users = uow.find_all().await?;
        commit(uow).await?;

        debug!("Listed {} users", users.len());
        Ok(users)
    }

    #[instrument(
        name = "users_info.service.create_user",
        skip(self),
        fields(email = %new_user.email, requested_id = ?new_user.id)
    )]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");

        let uow = self.begin().await?;

        if let Some(id) = new_user.id {
            if uow.exists_by_id(id).await? {
                return Err(DomainError::id_already_exists(id));
            }
        }
        if uow.exists_by_email(&new_user.email).await? {
            return Err(DomainError::email_already_exists(new_user.email));
        }

        // The requested id only gates the conflict check; the row gets a fresh id.
        let new_user = NewUser {
            id: None,
            ..new_user
        };
        let email = new_user.email.clone();
        let user = uow
            .save(new_user)
            .await
            .map_err(|e| map_write_error(e, None, &email))?;
        commit(uow).await?;

        info!("Successfully created user with id={}", user.id);
        Ok(user)
    }

    #[instrument(name = "users_info.service.patch_user", skip(self), fields(user_id = id))]
    pub async fn patch_user(&self, id: i32, patch: UserPatch) -> Result<User, DomainError> {
        info!("Patching user");

        let uow = self.begin().await?;
        let current = uow
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))?;

        let mut next = NewUser::from(current.clone());

        if let Some(name) = patch.name {
            if name != current.name {
                next.name = name;
            }
        }

        if let Some(email) = patch.email {
            // Keeping the own email is not a conflict.
            if email != current.email {
                if uow.exists_by_email(&email).await? {
                    return Err(DomainError::email_already_exists(email));
                }
                next.email = email;
            }
        }

        let email = next.email.clone();
        let user = uow
            .save(next)
            .await
            .map_err(|e| map_write_error(e, Some(id), &email))?;
        commit(uow).await?;

        info!("Successfully patched user");
        Ok(user)
    }

    #[instrument(name = "users_info.service.delete_user", skip(self), fields(user_id = id))]
    pub async fn delete_user(&self, id: i32) -> Result<(), DomainError> {
        info!("Deleting user");

        let uow = self.begin().await?;
        if !uow.exists_by_id(id).await? {
            return Err(DomainError::user_not_found(id));
        }
        if !uow.delete_by_id(id).await? {
            return Err(DomainError::user_not_found(id));
        }
        commit(uow).await?;

        info!("Successfully deleted user");
        Ok(())
    }

    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, DomainError> {
        self.store.begin().await.map_err(DomainError::from)
    }
}

async fn commit(uow: Box<dyn UnitOfWork>) -> Result<(), DomainError> {
    uow.commit().await.map_err(DomainError::from)
}

/// Constraint violations lost a race with a concurrent writer; report them
/// exactly like the pre-checks do.
fn map_write_error(e: anyhow::Error, id: Option<i32>, email: &str) -> DomainError {
    match (e.downcast_ref::<UniqueViolation>(), id) {
        (
            Some(UniqueViolation {
                field: UniqueField::Email,
            }),
            _,
        ) => DomainError::email_already_exists(email),
        (
            Some(UniqueViolation {
                field: UniqueField::Id,
            }),
            Some(id),
        ) => DomainError::id_already_exists(id),
        _ => DomainError::from(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repo::UsersRepository;
    use async_trait::async_trait;

    /// Pre-checks pass but every write loses to a concurrent writer.
    struct RacingStore(UniqueField);

    struct RacingUow(UniqueField);

    #[async_trait]
    impl UsersStore for RacingStore {
        async fn begin(&self) -> anyhow::Result<Box<dyn UnitOfWork>> {
            Ok(Box::new(RacingUow(self.0)))
        }
    }

    #[async_trait]
    impl UsersRepository for RacingUow {
        async fn find_all(&self) -> anyhow::Result<Vec<User>> {
            Ok(vec![])
        }
        async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<User>> {
            Ok(Some(User {
                id,
                name: "Ana".into(),
                email: "ana@x.io".into(),
            }))
        }
        async fn exists_by_id(&self, _id: i32) -> anyhow::Result<bool> {
            Ok(false)
        }
        async fn exists_by_email(&self, _email: &str) -> anyhow::Result<bool> {
            Ok(false)
        }
        async fn save(&self, _user: NewUser) -> anyhow::Result<User> {
            Err(UniqueViolation { field: self.0 }.into())
        }
        async fn delete_by_id(&self, _id: i32) -> anyhow::Result<bool> {
            Ok(false)
        }
    }

    #[async_trait]
    impl UnitOfWork for RacingUow {
        async fn commit(self: Box<Self>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn new_user(id: Option<i32>) -> NewUser {
        NewUser {
            id,
            name: "Bea".into(),
            email: "bea@x.io".into(),
        }
    }

    #[tokio::test]
    async fn email_race_on_create_is_a_conflict() {
        let svc = Service::new(Arc::new(RacingStore(UniqueField::Email)));
        let err = svc.create_user(new_user(None)).await.unwrap_err();
        assert_eq!(err, DomainError::email_already_exists("bea@x.io"));
    }

    #[tokio::test]
    async fn key_violation_on_generated_id_is_not_blamed_on_caller() {
        // The caller's id never reaches the insert, so a key clash is a storage fault.
        let svc = Service::new(Arc::new(RacingStore(UniqueField::Id)));
        let err = svc.create_user(new_user(Some(4))).await.unwrap_err();
        assert!(matches!(err, DomainError::Database { .. }));
    }

    #[test]
    fn id_violation_on_update_is_a_conflict() {
        let violation = UniqueViolation {
            field: UniqueField::Id,
        };
        let err = map_write_error(violation.into(), Some(3), "a@x.io");
        assert_eq!(err, DomainError::id_already_exists(3));
    }

    #[tokio::test]
    async fn email_race_on_patch_is_a_conflict() {
        let svc = Service::new(Arc::new(RacingStore(UniqueField::Email)));
        let patch = UserPatch {
            email: Some("bea@x.io".into()),
            ..Default::default()
        };
        let err = svc.patch_user(1, patch).await.unwrap_err();
        assert!(matches!(err, DomainError::EmailAlreadyExists { .. }));
    }

    #[tokio::test]
    async fn delete_of_missing_user_is_not_found() {
        let svc = Service::new(Arc::new(RacingStore(UniqueField::Id)));
        assert_eq!(
            svc.delete_user(9).await.unwrap_err(),
            DomainError::user_not_found(9)
        );
    }

    #[test]
    fn other_write_errors_are_database_errors() {
        let err = map_write_error(anyhow::anyhow!("disk full"), Some(1), "a@x.io");
        assert!(matches!(err, DomainError::Database { .. }));
    }
}
