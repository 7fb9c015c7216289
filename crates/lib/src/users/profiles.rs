//! Profile service: the heaviest consumer of the merge engine.
//!
//! Profile updates carry nested objects (mobile, location, profile and
//! cover pictures) and an identity-keyed socials array, all reconciled by
//! the document merge orchestrator.

use std::sync::Arc;

use crate::clock::Clock;
use crate::data::{PageQuery, Paginated};
use crate::merge::{MergeOptions, merge_typed};
use crate::store::{Collection, Stored};
use crate::users::errors::UserError;
use crate::users::types::{UpdateUserProfile, UserProfile};
use crate::Result;

/// Profile service.
#[derive(Clone)]
pub struct ProfileService {
    profiles: Collection<UserProfile>,
    clock: Arc<dyn Clock>,
}

impl ProfileService {
    pub fn new(profiles: Collection<UserProfile>, clock: Arc<dyn Clock>) -> Self {
        Self { profiles, clock }
    }

    /// Fetches the profile belonging to an account.
    pub fn find_by_user(&self, user_id: &str) -> Result<Stored<UserProfile>> {
        self.profiles
            .find_first(|p| p.user == user_id && !p.audit.is_deleted)?
            .ok_or_else(|| UserError::ProfileNotFound.into())
    }

    /// Merge-updates the profile belonging to an account.
    ///
    /// The patch's nested objects honor `isDeleted` (clearing e.g. a
    /// profile picture), and `socials` reconciles by `_id`. The profile
    /// completeness percentage is recomputed after the merge.
    pub fn update(
        &self,
        user_id: &str,
        patch: &UpdateUserProfile,
        actor: &str,
    ) -> Result<Stored<UserProfile>> {
        let stored = self.find_by_user(user_id)?;
        self.profiles.update_with(&stored.id, |current| {
            let mut profile: UserProfile = merge_typed(
                &current.doc,
                patch,
                actor,
                self.clock.as_ref(),
                MergeOptions::default(),
            )?;
            profile.profile_percentage = Self::completeness(&profile);
            Ok(profile)
        })
    }

    /// Pages through profiles, excluding soft-deleted records by default.
    pub fn search(&self, query: &PageQuery) -> Result<Paginated<Stored<UserProfile>>> {
        let matches = self
            .profiles
            .search(|p| query.no_condition || !p.audit.is_deleted)?;
        Ok(Paginated::from_query(matches, query))
    }

    /// Percentage of the headline profile fields that are filled in.
    fn completeness(profile: &UserProfile) -> u8 {
        let filled = [
            profile.first_name.is_some(),
            profile.last_name.is_some(),
            profile.bio.is_some(),
            profile.dob.is_some(),
            profile.gender.is_some(),
            profile.mobile.is_some(),
            profile.location.is_some(),
            profile.profile_pic.is_some(),
        ];
        let count = filled.iter().filter(|&&f| f).count();
        (count * 100 / filled.len()) as u8
    }
}
