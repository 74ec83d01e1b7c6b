//! Localization port — translates profile type labels.

use hublink_domain::profile_type::ProfileType;

pub trait ProfileTypeLocalizer: Send + Sync {
    /// Return `profile_type` with label and description for `locale`
    /// (`None` means the default locale).
    fn localize(&self, profile_type: &ProfileType, locale: Option<&str>) -> ProfileType;
}

/// Returns profile types unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLocalizer;

impl ProfileTypeLocalizer for IdentityLocalizer {
    fn localize(&self, profile_type: &ProfileType, _locale: Option<&str>) -> ProfileType {
        profile_type.clone()
    }
}
