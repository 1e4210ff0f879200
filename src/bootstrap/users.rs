//! Static user ensurer.
//!
//! Users are created with their email as username and user ID. Existing users
//! only get their profile names updated; passwords are set once at creation
//! and never rotated. The first failing user aborts the batch.
//!
//! A user that already exists may have been created elsewhere with a
//! generated ID, so updates go to the ID found by an exact username lookup.

use super::BootstrapError;
use crate::config::StaticUserSpec;
use crate::identity::{
    ConflictSignals, CreateHumanUser, IdentityService, ResourceKind, SecretString,
    UpdateHumanUser,
};
use tracing::info;

#[derive(Debug, Clone, Copy)]
pub struct UsersInput<'a> {
    pub organization_id: &'a str,
    pub users: &'a [StaticUserSpec],
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnsuredUsers {
    pub created: Vec<String>,
    pub updated: Vec<String>,
}

pub async fn ensure_users(
    identity: &dyn IdentityService,
    signals: &ConflictSignals,
    input: UsersInput<'_>,
) -> Result<EnsuredUsers, BootstrapError> {
    let mut ensured = EnsuredUsers::default();

    for user in input.users {
        let fail = |source| BootstrapError::User {
            email: user.email.clone(),
            source,
        };

        let request = CreateHumanUser {
            organization_id: input.organization_id.to_string(),
            user_id: user.email.clone(),
            username: user.email.clone(),
            email: user.email.clone(),
            given_name: user.first_name.clone(),
            family_name: user.last_name.clone(),
            password: SecretString::new(user.password.as_str()),
            password_change_required: false,
        };

        match identity.create_human_user(&request).await {
            Ok(user_id) => {
                info!(user_id = %user_id, email = %user.email, "Created user");
                ensured.created.push(user.email.clone());
            }
            Err(err) if signals.is_conflict(ResourceKind::User, &err) => {
                let user_id = resolve_user_id(identity, &user.email).await?;
                let update = UpdateHumanUser {
                    user_id: user_id.clone(),
                    username: user.email.clone(),
                    given_name: user.first_name.clone(),
                    family_name: user.last_name.clone(),
                };
                identity.update_human_user(&update).await.map_err(fail)?;
                info!(user_id = %user_id, email = %user.email, "Updated existing user");
                ensured.updated.push(user.email.clone());
            }
            Err(err) => return Err(fail(err)),
        }
    }

    Ok(ensured)
}

async fn resolve_user_id(
    identity: &dyn IdentityService,
    username: &str,
) -> Result<String, BootstrapError> {
    let mut ids = identity
        .find_user_ids(username)
        .await
        .map_err(|source| BootstrapError::User {
            email: username.to_string(),
            source,
        })?;

    match ids.len() {
        0 => Err(BootstrapError::UserNotFound {
            email: username.to_string(),
        }),
        1 => Ok(ids.remove(0)),
        count => Err(BootstrapError::Ambiguous {
            kind: ResourceKind::User,
            name: username.to_string(),
            count,
        }),
    }
}
