//! Link — the configured association between one channel and one item.

use serde::{Deserialize, Serialize};

use crate::configuration::{ConfigValue, Configuration};
use crate::error::{HubLinkError, ValidationError};
use crate::id::LinkId;
use crate::uid::{ChannelUid, ProfileTypeUid};

/// Associates a channel with an item, optionally naming the profile policy
/// that transforms events between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    pub channel_uid: ChannelUid,
    pub item_name: String,
    /// When `None`, the profile advisor picks one at activation.
    #[serde(default)]
    pub profile: Option<ProfileTypeUid>,
    #[serde(default)]
    pub configuration: Configuration,
}

impl Link {
    /// Create a builder for constructing a [`Link`].
    #[must_use]
    pub fn builder() -> LinkBuilder {
        LinkBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] when `item_name` is empty.
    pub fn validate(&self) -> Result<(), HubLinkError> {
        if self.item_name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Link`].
#[derive(Debug, Default)]
pub struct LinkBuilder {
    id: Option<LinkId>,
    channel_uid: Option<ChannelUid>,
    item_name: Option<String>,
    profile: Option<ProfileTypeUid>,
    configuration: Configuration,
}

impl LinkBuilder {
    #[must_use]
    pub fn id(mut self, id: LinkId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn channel_uid(mut self, uid: ChannelUid) -> Self {
        self.channel_uid = Some(uid);
        self
    }

    #[must_use]
    pub fn item_name(mut self, name: impl Into<String>) -> Self {
        self.item_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn profile(mut self, uid: ProfileTypeUid) -> Self {
        self.profile = Some(uid);
        self
    }

    #[must_use]
    pub fn option(mut self, name: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.configuration.insert(name, value);
        self
    }

    #[must_use]
    pub fn configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Consume the builder, validate, and return a [`Link`].
    ///
    /// # Errors
    ///
    /// Returns [`HubLinkError::Validation`] if the channel uid is missing or
    /// the item name is empty.
    pub fn build(self) -> Result<Link, HubLinkError> {
        let channel_uid = self.channel_uid.ok_or(ValidationError::InvalidUid {
            kind: "channel",
            value: String::new(),
        })?;
        let link = Link {
            id: self.id.unwrap_or_default(),
            channel_uid,
            item_name: self.item_name.unwrap_or_default(),
            profile: self.profile,
            configuration: self.configuration,
        };
        link.validate()?;
        Ok(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel() -> ChannelUid {
        "virtual:sensor:temperature".parse().unwrap()
    }

    #[test]
    fn should_build_link_without_profile() {
        let link = Link::builder()
            .channel_uid(channel())
            .item_name("LivingRoom_Temperature")
            .build()
            .unwrap();
        assert!(link.profile.is_none());
        assert!(link.configuration.is_empty());
    }

    #[test]
    fn should_collect_options_into_configuration() {
        let link = Link::builder()
            .channel_uid(channel())
            .item_name("Heater")
            .profile(ProfileTypeUid::system("hysteresis"))
            .option("lower", 10_i64)
            .option("upper", 20_i64)
            .build()
            .unwrap();
        assert_eq!(link.configuration.get_f64("upper").unwrap(), Some(20.0));
    }

    #[test]
    fn should_return_validation_error_when_item_name_is_empty() {
        let result = Link::builder().channel_uid(channel()).item_name("  ").build();
        assert!(matches!(
            result,
            Err(HubLinkError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_return_validation_error_when_channel_is_missing() {
        let result = Link::builder().item_name("Heater").build();
        assert!(matches!(
            result,
            Err(HubLinkError::Validation(ValidationError::InvalidUid { .. }))
        ));
    }

    #[test]
    fn should_keep_custom_id() {
        let id = LinkId::new();
        let link = Link::builder()
            .id(id)
            .channel_uid(channel())
            .item_name("Heater")
            .build()
            .unwrap();
        assert_eq!(link.id, id);
    }
}
