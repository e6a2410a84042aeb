use tracing::{debug, info};

use shared_database::bson::doc;
use shared_database::{AppState, Repository};
use shared_models::auth::User;
use shared_utils::coerce::{to_bson_date, value_to_date, value_to_number};
use shared_utils::password::hash_password;

use crate::models::{
    Availability, Pricing, ProfileError, ProfileUpdate, UpdateProfileRequest, UserProfile,
};

pub struct ProfileService {
    users: Repository<User>,
    profiles: Repository<UserProfile>,
    availabilities: Repository<Availability>,
    pricings: Repository<Pricing>,
}

impl ProfileService {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: Repository::new(state.store.clone()),
            profiles: Repository::new(state.store.clone()),
            availabilities: Repository::new(state.store.clone()),
            pricings: Repository::new(state.store.clone()),
        }
    }

    /// Updates a user's account fields and upserts their profile,
    /// availability and pricing, in that order.
    ///
    /// Each save commits on its own. A failure part-way through leaves the
    /// earlier saves in place; nothing is rolled back.
    pub async fn update_profile(&self, request: UpdateProfileRequest) -> Result<ProfileUpdate, ProfileError> {
        let email = request.email.clone().unwrap_or_default();

        let mut user = self
            .users
            .find_one(doc! { "email": email.as_str() })
            .await?
            .ok_or(ProfileError::UserNotFound)?;
        let user_id = user.id.ok_or(ProfileError::UserNotFound)?;
        debug!("Updating profile for user {}", user_id);

        user.name = request.name.clone().unwrap_or_default();
        if let Some(password) = request.password.as_deref().filter(|p| !p.is_empty()) {
            user.password = hash_password(password).map_err(|e| ProfileError::Hashing(e.to_string()))?;
        }
        self.users.save(&mut user).await?;

        let mut user_profile = self
            .profiles
            .find_one(doc! { "userId": user_id })
            .await?
            .unwrap_or_else(|| UserProfile::new(user_id));
        user_profile.bio = request.bio.clone();
        user_profile.phone = request.phone.clone();
        user_profile.blood_type = request.blood_type.clone();
        user_profile.gender = request.gender.clone();

        let from_date = value_to_date(&request.from_date).map(to_bson_date);
        let to_date = value_to_date(&request.to_date).map(to_bson_date);
        let mut availability = match self.availabilities.find_one(doc! { "userId": user_id }).await? {
            Some(existing) => Availability {
                start_time: request.start_time.clone().unwrap_or_default(),
                end_time: request.end_time.clone().unwrap_or_default(),
                from_date,
                to_date,
                ..existing
            },
            None => Availability {
                id: None,
                user_id,
                start_time: request.start_time.clone().unwrap_or_default(),
                end_time: request.end_time.clone().unwrap_or_default(),
                from_date,
                to_date,
            },
        };
        self.availabilities.save(&mut availability).await?;

        let price = value_to_number(&request.price);
        let mut pricing = match self.pricings.find_one(doc! { "userId": user_id }).await? {
            Some(existing) => Pricing { price, ..existing },
            None => Pricing {
                id: None,
                user_id,
                price,
            },
        };
        self.pricings.save(&mut pricing).await?;

        user_profile.availability_id = availability.id;
        user_profile.pricing_id = pricing.id;
        self.profiles.save(&mut user_profile).await?;

        info!("Profile updated for {}", email);

        Ok(ProfileUpdate {
            user,
            user_profile,
            availability,
            pricing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use shared_database::StoreError;
    use shared_utils::password::verify_password;
    use shared_utils::test_utils::{profile_update_body, test_state, TestUser};

    fn request_for(email: &str) -> UpdateProfileRequest {
        serde_json::from_value(profile_update_body(email)).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_email_is_not_found() {
        let (state, store) = test_state().await;

        let result = ProfileService::new(&state)
            .update_profile(request_for("ghost@example.com"))
            .await;

        assert_matches!(result, Err(ProfileError::UserNotFound));
        assert_eq!(store.count("userprofiles").await, 0);
        assert_eq!(store.count("availabilities").await, 0);
        assert_eq!(store.count("pricings").await, 0);
    }

    #[tokio::test]
    async fn test_update_links_profile_to_availability_and_pricing() {
        let (state, _) = test_state().await;
        TestUser::doctor("Dr. Grey", "grey@example.com").insert(&state).await;

        let update = ProfileService::new(&state)
            .update_profile(request_for("grey@example.com"))
            .await
            .unwrap();

        assert_eq!(update.user.name, "Dr. Meredith Grey");
        assert_eq!(update.user_profile.availability_id, update.availability.id);
        assert_eq!(update.user_profile.pricing_id, update.pricing.id);
        assert_eq!(update.user_profile.user_id, update.user.id.unwrap());
        assert_eq!(update.pricing.price, Some(150.0));
        assert_eq!(update.availability.start_time, "09:00");
    }

    #[tokio::test]
    async fn test_password_kept_unless_provided() {
        let (state, _) = test_state().await;
        TestUser::doctor("Dr. Grey", "grey@example.com").insert(&state).await;
        let service = ProfileService::new(&state);

        let kept = service.update_profile(request_for("grey@example.com")).await.unwrap();
        assert!(verify_password("correct-horse", &kept.user.password).unwrap());

        let mut request = request_for("grey@example.com");
        request.password = Some("new-secret".to_string());
        let changed = service.update_profile(request).await.unwrap();
        assert!(verify_password("new-secret", &changed.user.password).unwrap());
    }

    #[tokio::test]
    async fn test_unparseable_date_fails_after_user_save() {
        let (state, store) = test_state().await;
        TestUser::doctor("Dr. Grey", "grey@example.com").insert(&state).await;

        let mut request = request_for("grey@example.com");
        request.from_date = serde_json::json!("sometime soon");

        let result = ProfileService::new(&state).update_profile(request).await;

        assert_matches!(result, Err(ProfileError::Store(StoreError::Validation(_))));
        assert_eq!(store.count("availabilities").await, 0);

        let users = Repository::<User>::new(state.store.clone()).find_all().await.unwrap();
        assert_eq!(users[0].name, "Dr. Meredith Grey");
    }
}
