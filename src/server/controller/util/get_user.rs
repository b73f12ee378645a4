use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, Error},
    model::{app::AppState, session::user::SessionUserId},
};

/// Retrieves the logged-in user from session and then from database
///
/// # Arguments
/// - `state`: Application state with database connection
/// - `session`: The user's session
///
/// # Returns
/// - `Ok(Model)`: User found
/// - `Err(AuthError::UserNotInSession)`: User ID not present in session
/// - `Err(AuthError::UserNotInDatabase)`: User ID exists in session but not found in database
///   or the account is deactivated (session is cleared)
/// - `Err(Error)`: Internal errors (database query failures, session errors, etc.)
pub async fn get_user_from_session(
    state: &AppState,
    session: &Session,
) -> Result<entity::user::Model, Error> {
    let Some(user_id) = SessionUserId::get(session).await? else {
        return Err(AuthError::UserNotInSession.into());
    };

    match UserRepository::new(&state.db).get(user_id).await? {
        Some(user) if user.is_active => Ok(user),
        _ => {
            session.clear().await;

            tracing::debug!(
                user_id = %user_id,
                "Session cleared for user with an active session but no active account"
            );

            Err(AuthError::UserNotInDatabase(user_id).into())
        }
    }
}
