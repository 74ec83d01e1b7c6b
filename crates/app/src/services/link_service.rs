//! Link service — owns the live profile of every active link.

use std::collections::HashMap;
use std::sync::Arc;

use hublink_domain::channel::Channel;
use hublink_domain::error::ValidationError;
use hublink_domain::id::LinkId;
use hublink_domain::item::ItemType;
use hublink_domain::link::Link;
use hublink_domain::uid::{ChannelUid, ProfileTypeUid};
use hublink_domain::value::{Command, State};

use crate::error::LinkError;
use crate::ports::{
    ChannelEvent, ProfileAdvisor, ProfileCallback, ProfileFactory, Scheduler, ValueConverter,
};
use crate::profiles::{LinkContext, ProfileInstance};

struct ActiveLink {
    link: Link,
    instance: ProfileInstance,
}

/// Activates links, routes their events, and disposes their profiles.
///
/// Each active link owns exactly one [`ProfileInstance`]; every event for
/// that link goes through it until the link is deactivated or replaced.
pub struct LinkService<F, A> {
    factory: F,
    advisor: A,
    converter: Arc<dyn ValueConverter>,
    scheduler: Option<Arc<dyn Scheduler>>,
    links: HashMap<LinkId, ActiveLink>,
}

impl<F: ProfileFactory, A: ProfileAdvisor> LinkService<F, A> {
    /// Create a service without a scheduler; time-driven profiles then fail
    /// to activate.
    pub fn new(factory: F, advisor: A, converter: Arc<dyn ValueConverter>) -> Self {
        Self {
            factory,
            advisor,
            converter,
            scheduler: None,
            links: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Activate `link` on `channel`, emitting through `callback`.
    ///
    /// The link's configured profile is used, or the advisor's suggestion
    /// when none is configured. Re-activating an active link replaces its
    /// profile; the previous one is disposed only once the new one is built.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Invalid`] if the link fails validation or does not
    /// belong to `channel`, [`LinkError::NoProfileSuggested`] when no profile
    /// applies, [`LinkError::UnsupportedProfileType`] when the factory does
    /// not know the profile, or [`LinkError::Configuration`] when the
    /// profile rejects the link's options.
    pub fn activate(
        &mut self,
        link: Link,
        channel: &Channel,
        item_type: Option<ItemType>,
        callback: Arc<dyn ProfileCallback>,
    ) -> Result<ProfileTypeUid, LinkError> {
        link.validate().map_err(LinkError::Invalid)?;
        if link.channel_uid != channel.uid {
            return Err(LinkError::Invalid(
                ValidationError::InvalidUid {
                    kind: "channel",
                    value: channel.uid.to_string(),
                }
                .into(),
            ));
        }
        let profile_type = match &link.profile {
            Some(uid) => uid.clone(),
            None => self
                .advisor
                .suggest_for_channel(channel, item_type.as_ref())
                .ok_or(LinkError::NoProfileSuggested(link.id))?,
        };
        let context = LinkContext::new(
            link.configuration.clone(),
            self.scheduler.clone(),
            Arc::clone(&self.converter),
        );
        let instance = self
            .factory
            .create_profile(&profile_type, callback, &context)
            .inspect_err(|error| {
                tracing::warn!(
                    link_id = %link.id,
                    profile_type = %profile_type,
                    error = %error,
                    "profile configuration rejected"
                );
            })?
            .ok_or_else(|| LinkError::UnsupportedProfileType(profile_type.clone()))?;

        let link_id = link.id;
        tracing::info!(
            link_id = %link_id,
            channel = %link.channel_uid,
            item = %link.item_name,
            profile_type = %profile_type,
            "link activated"
        );
        if let Some(mut previous) = self.links.insert(link_id, ActiveLink { link, instance }) {
            previous.instance.dispose();
            tracing::info!(link_id = %link_id, "previous profile replaced");
        }
        Ok(profile_type)
    }

    /// Deactivate a link, disposing its profile.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotActive`] if the link is not active.
    pub fn deactivate(&mut self, id: LinkId) -> Result<Link, LinkError> {
        let mut active = self.links.remove(&id).ok_or(LinkError::NotActive(id))?;
        active.instance.dispose();
        tracing::info!(link_id = %id, "link deactivated");
        Ok(active.link)
    }

    /// Deactivate every link. Returns how many were active.
    pub fn deactivate_all(&mut self) -> usize {
        let count = self.links.len();
        for (id, mut active) in self.links.drain() {
            active.instance.dispose();
            tracing::info!(link_id = %id, "link deactivated");
        }
        count
    }

    /// Route a channel-side event to the link's profile.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotActive`] if the link is not active.
    pub fn on_channel_event(&mut self, id: LinkId, event: ChannelEvent) -> Result<(), LinkError> {
        self.instance_mut(id)?.on_channel_event(event);
        Ok(())
    }

    /// Route the linked item's new state to the link's profile.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotActive`] if the link is not active.
    pub fn on_item_state_change(&mut self, id: LinkId, state: State) -> Result<(), LinkError> {
        self.instance_mut(id)?.on_item_state_change(state);
        Ok(())
    }

    /// Route a command issued on the linked item to the link's profile.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotActive`] if the link is not active.
    pub fn on_item_command(&mut self, id: LinkId, command: Command) -> Result<(), LinkError> {
        self.instance_mut(id)?.on_item_command(command);
        Ok(())
    }

    #[must_use]
    pub fn is_active(&self, id: LinkId) -> bool {
        self.links.contains_key(&id)
    }

    #[must_use]
    pub fn active_profile_type(&self, id: LinkId) -> Option<&ProfileTypeUid> {
        self.links.get(&id).map(|active| active.instance.profile_type())
    }

    /// Active links on `channel`.
    #[must_use]
    pub fn links_for_channel(&self, channel: &ChannelUid) -> Vec<LinkId> {
        self.links
            .values()
            .filter(|active| &active.link.channel_uid == channel)
            .map(|active| active.link.id)
            .collect()
    }

    /// Active links to the item named `item_name`.
    #[must_use]
    pub fn links_for_item(&self, item_name: &str) -> Vec<LinkId> {
        self.links
            .values()
            .filter(|active| active.link.item_name == item_name)
            .map(|active| active.link.id)
            .collect()
    }

    fn instance_mut(&mut self, id: LinkId) -> Result<&mut ProfileInstance, LinkError> {
        self.links
            .get_mut(&id)
            .map(|active| &mut active.instance)
            .ok_or(LinkError::NotActive(id))
    }
}
