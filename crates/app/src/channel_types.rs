//! In-memory [`ChannelTypeRegistry`].

use std::collections::HashMap;

use hublink_domain::channel::{ChannelKind, ChannelType, system_channel_types};
use hublink_domain::uid::ChannelTypeUid;

use crate::ports::ChannelTypeRegistry;

/// Channel types registered up front; pre-filled with the system trigger types.
#[derive(Debug, Clone)]
pub struct InMemoryChannelTypes {
    types: HashMap<ChannelTypeUid, ChannelType>,
}

impl Default for InMemoryChannelTypes {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryChannelTypes {
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            types: HashMap::new(),
        };
        registry.register(ChannelType::new(
            system_channel_types::BUTTON,
            ChannelKind::Trigger,
            "Button",
        ));
        registry.register(ChannelType::new(
            system_channel_types::RAWBUTTON,
            ChannelKind::Trigger,
            "Raw Button",
        ));
        registry.register(ChannelType::new(
            system_channel_types::RAWROCKER,
            ChannelKind::Trigger,
            "Raw Rocker",
        ));
        registry
    }

    /// Add or replace a channel type.
    pub fn register(&mut self, channel_type: ChannelType) {
        self.types.insert(channel_type.uid.clone(), channel_type);
    }

    #[must_use]
    pub fn with(mut self, channel_type: ChannelType) -> Self {
        self.register(channel_type);
        self
    }
}

impl ChannelTypeRegistry for InMemoryChannelTypes {
    fn channel_type(&self, uid: &ChannelTypeUid) -> Option<ChannelType> {
        self.types.get(uid).cloned()
    }
}

#[cfg(test)]
mod tests {
    use hublink_domain::channel::ChannelCategory;

    use super::*;

    #[test]
    fn should_know_system_trigger_types() {
        let registry = InMemoryChannelTypes::new();
        let rocker = registry
            .channel_type(&system_channel_types::RAWROCKER)
            .unwrap();
        assert_eq!(rocker.kind, ChannelKind::Trigger);
        assert_eq!(rocker.category(), Some(ChannelCategory::RawRocker));
    }

    #[test]
    fn should_return_registered_custom_type() {
        let uid: ChannelTypeUid = "virtual:temperature".parse().unwrap();
        let registry = InMemoryChannelTypes::new().with(ChannelType::new(
            uid.clone(),
            ChannelKind::State,
            "Temperature",
        ));
        assert_eq!(registry.channel_type(&uid).unwrap().label, "Temperature");
        assert!(registry
            .channel_type(&"acme:unknown".parse().unwrap())
            .is_none());
    }
}
