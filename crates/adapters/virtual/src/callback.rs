//! Per-link [`ProfileCallback`] delivering profile output to the virtual
//! item and channel of that link.

use std::sync::Arc;

use hublink_app::ports::ProfileCallback;
use hublink_domain::value::{Command, State};

use crate::channels::VirtualChannel;
use crate::items::VirtualItem;

#[derive(Debug, Clone)]
pub struct VirtualLinkCallback {
    item: Arc<VirtualItem>,
    channel: Arc<VirtualChannel>,
}

impl VirtualLinkCallback {
    #[must_use]
    pub fn new(item: Arc<VirtualItem>, channel: Arc<VirtualChannel>) -> Self {
        Self { item, channel }
    }
}

impl ProfileCallback for VirtualLinkCallback {
    fn send_command_to_item(&self, command: Command) {
        tracing::debug!(item = %self.item.name(), command = %command, "command to item");
        self.item.apply_command(command);
    }

    fn send_update_to_item(&self, state: State) {
        self.item.update(state);
    }

    fn send_attribute_update_to_item(&self, attribute: &str, state: State) {
        self.item.set_attribute(attribute, state);
    }

    fn send_command_to_channel(&self, command: Command) {
        self.channel.receive_command(command);
    }

    fn send_update_to_channel(&self, state: State) {
        self.channel.receive_update(state);
    }
}
