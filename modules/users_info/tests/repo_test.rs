mod common;

use users_info::domain::repo::{
    UniqueField, UniqueViolation, UnitOfWork, UsersRepository, UsersStore,
};
use users_info::infra::storage::{SeaOrmUsersRepository, SeaOrmUsersStore};
use users_info::NewUser;

fn user(id: Option<i32>, name: &str, email: &str) -> NewUser {
    NewUser {
        id,
        name: name.into(),
        email: email.into(),
    }
}

#[tokio::test]
async fn save_inserts_then_updates() {
    let repo = SeaOrmUsersRepository::new(common::fresh_db().await);

    let ana = repo.save(user(None, "Ana", "ana@x.io")).await.unwrap();
    assert!(repo.exists_by_id(ana.id).await.unwrap());
    assert!(repo.exists_by_email("ana@x.io").await.unwrap());

    let updated = repo
        .save(user(Some(ana.id), "Ana Maria", "ana@x.io"))
        .await
        .unwrap();
    assert_eq!(updated.id, ana.id);
    assert_eq!(repo.find_all().await.unwrap().len(), 1);
    assert_eq!(
        repo.find_by_id(ana.id).await.unwrap().unwrap().name,
        "Ana Maria"
    );
}

#[tokio::test]
async fn save_with_unknown_id_inserts_under_generated_id() {
    let repo = SeaOrmUsersRepository::new(common::fresh_db().await);

    let ana = repo
        .save(user(Some(i32::MAX), "Ana", "ana@x.io"))
        .await
        .unwrap();
    assert_ne!(ana.id, i32::MAX);
    assert!(!repo.exists_by_id(i32::MAX).await.unwrap());

    let bea = repo.save(user(None, "Bea", "bea@x.io")).await.unwrap();
    assert!(bea.id > ana.id);
}

#[tokio::test]
async fn duplicate_email_is_a_typed_violation() {
    let repo = SeaOrmUsersRepository::new(common::fresh_db().await);
    repo.save(user(None, "Ana", "ana@x.io")).await.unwrap();

    let err = repo.save(user(None, "Bea", "ana@x.io")).await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<UniqueViolation>(),
        Some(&UniqueViolation {
            field: UniqueField::Email
        })
    );
}

#[tokio::test]
async fn delete_reports_whether_a_row_went_away() {
    let repo = SeaOrmUsersRepository::new(common::fresh_db().await);
    let ana = repo.save(user(None, "Ana", "ana@x.io")).await.unwrap();

    assert!(repo.delete_by_id(ana.id).await.unwrap());
    assert!(!repo.delete_by_id(ana.id).await.unwrap());
    assert!(repo.find_by_id(ana.id).await.unwrap().is_none());
}

#[tokio::test]
async fn uncommitted_unit_of_work_rolls_back() {
    let db = common::fresh_db().await;
    let store = SeaOrmUsersStore::new(db.clone());

    {
        let uow = store.begin().await.unwrap();
        uow.save(user(None, "Ana", "ana@x.io")).await.unwrap();
        // dropped without commit
    }

    let uow = store.begin().await.unwrap();
    uow.save(user(None, "Bea", "bea@x.io")).await.unwrap();
    uow.commit().await.unwrap();

    let repo = SeaOrmUsersRepository::new(db);
    let users = repo.find_all().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "bea@x.io");
}
