use cutbar_store::{NewUser, Storage, StoreError, User};

pub const DEMO_USERNAME: &str = "cutbar";
const DEMO_PASSWORD: &str = "cutbar";
const DEMO_AVATAR: &str = "C";

/// Make sure the demo account the front end posts as exists.
pub fn ensure_demo_user(storage: &dyn Storage) -> Result<User, StoreError> {
    match storage.get_user_by_username(DEMO_USERNAME) {
        Ok(user) => Ok(user),
        Err(StoreError::NotFound) => {
            let user = storage.create_user(
                &NewUser::new(DEMO_USERNAME, DEMO_PASSWORD).with_avatar(DEMO_AVATAR),
            )?;
            tracing::info!(id = user.id, username = DEMO_USERNAME, "Seeded demo user");
            Ok(user)
        }
        Err(e) => Err(e),
    }
}
