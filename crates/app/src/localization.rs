//! Locale-aware, memoizing view over a [`ProfileTypeProvider`].

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use hublink_domain::profile_type::ProfileType;
use hublink_domain::uid::ProfileTypeUid;

use crate::ports::{ProfileTypeLocalizer, ProfileTypeProvider};

type CacheKey = (ProfileTypeUid, Option<String>);

/// Localizes each profile type at most once per `(uid, locale)`.
pub struct LocalizedProfileTypes<P, L> {
    provider: P,
    localizer: L,
    cache: RwLock<HashMap<CacheKey, ProfileType>>,
}

impl<P: ProfileTypeProvider, L: ProfileTypeLocalizer> LocalizedProfileTypes<P, L> {
    pub fn new(provider: P, localizer: L) -> Self {
        Self {
            provider,
            localizer,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Every profile type of the provider, localized for `locale`.
    pub fn profile_types(&self, locale: Option<&str>) -> Vec<ProfileType> {
        self.provider
            .profile_types()
            .iter()
            .map(|pt| self.localized(pt, locale))
            .collect()
    }

    /// One profile type localized for `locale`, if the provider knows it.
    pub fn profile_type(&self, uid: &ProfileTypeUid, locale: Option<&str>) -> Option<ProfileType> {
        self.provider
            .profile_type(uid)
            .map(|pt| self.localized(&pt, locale))
    }

    fn localized(&self, profile_type: &ProfileType, locale: Option<&str>) -> ProfileType {
        let key = (profile_type.uid.clone(), locale.map(str::to_string));
        if let Some(hit) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return hit.clone();
        }
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        cache
            .entry(key)
            .or_insert_with(|| self.localizer.localize(profile_type, locale))
            .clone()
    }
}
