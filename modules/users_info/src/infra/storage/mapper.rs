use crate::contract::User;
use crate::infra::storage::entity::Model as UserEntity;

impl From<UserEntity> for User {
    fn from(e: UserEntity) -> Self {
        Self {
            id: e.id,
            name: e.name,
            email: e.email,
        }
    }
}
