//! Profile operations

use std::sync::Arc;

use super::models::*;
use crate::storage::{Result, StoreCore, StoreError, StudentId};

pub struct ProfileStorage {
    core: Arc<StoreCore>,
}

impl ProfileStorage {
    pub(crate) fn new(core: Arc<StoreCore>) -> Self {
        Self { core }
    }

    /// Create the student's profile. Fails if one already exists.
    pub fn create_profile(
        &self,
        student: &StudentId,
        display_name: String,
        personality_mode: PersonalityMode,
        preferred_language: String,
    ) -> Result<Profile> {
        let now = self.core.now();
        self.core.with_student(student, |data| {
            if data.profile.is_some() {
                return Err(StoreError::ProfileAlreadyExists);
            }
            let profile = Profile::new(display_name, personality_mode, preferred_language, now);
            data.profile = Some(profile.clone());
            Ok(profile)
        })
    }

    /// Replace all profile fields except `created_at`. Fails if no profile
    /// exists yet.
    pub fn update_profile(
        &self,
        student: &StudentId,
        display_name: String,
        personality_mode: PersonalityMode,
        preferred_language: String,
    ) -> Result<Profile> {
        self.core
            .mutate_student(student, |data| {
                let existing = data.profile.as_mut().ok_or(StoreError::ProfileNotFound)?;
                existing.display_name = display_name;
                existing.personality_mode = personality_mode;
                existing.preferred_language = preferred_language;
                Ok(existing.clone())
            })
            .unwrap_or(Err(StoreError::ProfileNotFound))
    }

    pub fn get_profile(&self, student: &StudentId) -> Result<Profile> {
        self.core
            .read_student(student, |data| data.profile.clone())
            .flatten()
            .ok_or(StoreError::ProfileNotFound)
    }
}
