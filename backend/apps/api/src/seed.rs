//! Startup seeding of the bootstrap administrator

use std::sync::Arc;

use auth::AuthConfig;
use auth::AuthError;
use auth::application::{RegisterInput, RegisterUseCase};
use auth::domain::repository::UserRepository;

use crate::config::AdminSeed;

/// Create the bootstrap administrator unless the username exists
///
/// Without `ADMIN_NAME` the username doubles as display name.
pub async fn seed_admin<U>(
    users: Arc<U>,
    config: Arc<AuthConfig>,
    seed: &AdminSeed,
) -> anyhow::Result<()>
where
    U: UserRepository + Send + Sync + 'static,
{
    let result = RegisterUseCase::new(users, config)
        .execute(RegisterInput {
            name: seed.name.clone().unwrap_or_else(|| seed.username.clone()),
            username: seed.username.clone(),
            password: seed.password.clone(),
        })
        .await;

    match result {
        Ok(user) => {
            tracing::info!(user_id = %user.user_id, "Bootstrap administrator created");
            Ok(())
        }
        Err(AuthError::UsernameTaken) => {
            tracing::info!(username = %seed.username, "Bootstrap administrator already exists");
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Failed to seed administrator: {e}")),
    }
}
