use uuid::Uuid;

use crate::calendar::{validate_user, NewUser, User, UserUpdate, ValidationError};
use crate::storage::Store;

use super::{Result, ServiceError};

/// Registers a new user. The email must not already be taken.
pub async fn register_user<S>(store: &S, new_user: NewUser) -> Result<User>
where
    S: Store + ?Sized,
{
    let user = new_user.into_user();
    validate_user(&user)?;

    if store.find_user_by_email(&user.email).await?.is_some() {
        return Err(ValidationError::DuplicateEmail.into());
    }

    store.create_user(&user).await?;
    tracing::info!(user_id = %user.id, "Registered user");
    Ok(user)
}

/// Gets a user, failing with `NotFound` if absent.
pub async fn get_user<S>(store: &S, id: Uuid) -> Result<User>
where
    S: Store + ?Sized,
{
    store
        .get_user(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("User", id))
}

/// Looks up the account behind a login email.
pub async fn find_user_by_email<S>(store: &S, email: &str) -> Result<Option<User>>
where
    S: Store + ?Sized,
{
    Ok(store.find_user_by_email(email).await?)
}

/// Applies a partial update to a user and returns the updated record.
///
/// A new email must not belong to another user.
pub async fn update_user<S>(store: &S, id: Uuid, update: UserUpdate) -> Result<User>
where
    S: Store + ?Sized,
{
    let mut user = get_user(store, id).await?;

    if let Some(email) = &update.email {
        if let Some(existing) = store.find_user_by_email(email).await? {
            if existing.id != id {
                return Err(ValidationError::DuplicateEmail.into());
            }
        }
    }

    update.apply_to(&mut user);
    validate_user(&user)?;

    if !update.is_empty() {
        store.update_user(id, &update).await?;
        tracing::info!(user_id = %id, "Updated user");
    }
    Ok(user)
}
