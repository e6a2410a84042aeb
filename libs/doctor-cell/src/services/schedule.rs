use tracing::{debug, info};

use shared_database::bson::doc;
use shared_database::{AppState, Repository, StoreError};

use crate::models::{Profile, ProfileRequest};

pub struct ScheduleService {
    profiles: Repository<Profile>,
}

impl ScheduleService {
    pub fn new(state: &AppState) -> Self {
        Self {
            profiles: Repository::new(state.store.clone()),
        }
    }

    /// Creates the profile for `email` or overwrites the one already stored.
    /// Email is a lookup key only; duplicates are not prevented.
    pub async fn upsert_profile(&self, request: ProfileRequest) -> Result<Profile, StoreError> {
        let email = request.email.unwrap_or_default();
        let phone = request.phone.unwrap_or_default();
        let start_time = request.start_time.unwrap_or_default();
        let end_time = request.end_time.unwrap_or_default();
        let start_date = request.start_date.unwrap_or_default();
        let end_date = request.end_date.unwrap_or_default();

        let mut profile = match self.profiles.find_one(doc! { "email": email.as_str() }).await? {
            Some(existing) => {
                debug!("Updating schedule profile for {}", email);
                Profile {
                    phone,
                    start_time,
                    end_time,
                    start_date,
                    end_date,
                    ..existing
                }
            }
            None => Profile {
                id: None,
                email,
                phone,
                start_time,
                end_time,
                start_date,
                end_date,
            },
        };

        self.profiles.save(&mut profile).await?;
        info!("Schedule profile saved for {}", profile.email);

        Ok(profile)
    }
}
