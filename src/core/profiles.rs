use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;
use crate::models::RawMeasurements;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Unknown profile: {0}")]
    UnknownProfile(Uuid),

    #[error("No active profile")]
    NoActiveProfile,
}

/// A named set of saved measurements (e.g. "me", "partner")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementProfile {
    pub id: Uuid,
    pub name: String,
    pub measurements: RawMeasurements,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl MeasurementProfile {
    /// Owner key for recommendations stored against this profile
    pub fn owner_id(&self) -> String {
        self.id.to_string()
    }
}

/// Merge the fields present in `patch` over `base`
fn merge(base: &mut RawMeasurements, patch: RawMeasurements) {
    let RawMeasurements { bust, waist, hip, height, weight, age } = patch;
    if bust.is_some() {
        base.bust = bust;
    }
    if waist.is_some() {
        base.waist = waist;
    }
    if hip.is_some() {
        base.hip = hip;
    }
    if height.is_some() {
        base.height = height;
    }
    if weight.is_some() {
        base.weight = weight;
    }
    if age.is_some() {
        base.age = age;
    }
}

/// Saved measurement profiles with an explicit active profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileBook {
    profiles: HashMap<Uuid, MeasurementProfile>,
    order: Vec<Uuid>,
    active: Option<Uuid>,
}

impl ProfileBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a profile and make it the active one
    pub fn add_profile(&mut self, name: impl Into<String>, measurements: RawMeasurements) -> Uuid {
        let id = Uuid::new_v4();
        self.profiles.insert(
            id,
            MeasurementProfile {
                id,
                name: name.into(),
                measurements,
                created_at: chrono::Utc::now(),
            },
        );
        self.order.push(id);
        self.active = Some(id);
        id
    }

    pub fn get(&self, id: Uuid) -> Option<&MeasurementProfile> {
        self.profiles.get(&id)
    }

    /// Profiles in creation order
    pub fn list(&self) -> impl Iterator<Item = &MeasurementProfile> {
        self.order.iter().filter_map(|id| self.profiles.get(id))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn update_profile(
        &mut self,
        id: Uuid,
        name: Option<String>,
        measurements: Option<RawMeasurements>,
    ) -> Result<&MeasurementProfile, ProfileError> {
        let profile = self
            .profiles
            .get_mut(&id)
            .ok_or(ProfileError::UnknownProfile(id))?;

        if let Some(name) = name {
            profile.name = name;
        }
        if let Some(patch) = measurements {
            merge(&mut profile.measurements, patch);
        }

        Ok(&*profile)
    }

    pub fn set_active(&mut self, id: Uuid) -> Result<(), ProfileError> {
        if !self.profiles.contains_key(&id) {
            return Err(ProfileError::UnknownProfile(id));
        }
        self.active = Some(id);
        Ok(())
    }

    pub fn active_id(&self) -> Option<Uuid> {
        self.active
    }

    pub fn active(&self) -> Option<&MeasurementProfile> {
        self.active.and_then(|id| self.profiles.get(&id))
    }

    /// Merge new answers into the active profile's measurements
    pub fn update_active_measurements(
        &mut self,
        patch: RawMeasurements,
    ) -> Result<&MeasurementProfile, ProfileError> {
        let id = self.active.ok_or(ProfileError::NoActiveProfile)?;
        self.update_profile(id, None, Some(patch))
    }

    pub fn remove_profile(&mut self, id: Uuid) -> Result<MeasurementProfile, ProfileError> {
        let removed = self
            .profiles
            .remove(&id)
            .ok_or(ProfileError::UnknownProfile(id))?;
        self.order.retain(|other| *other != id);
        if self.active == Some(id) {
            self.active = None;
        }
        Ok(removed)
    }
}
