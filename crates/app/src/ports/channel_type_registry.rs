//! Channel type registry port — metadata lookup for channel types.

use hublink_domain::channel::ChannelType;
use hublink_domain::uid::ChannelTypeUid;

pub trait ChannelTypeRegistry: Send + Sync {
    fn channel_type(&self, uid: &ChannelTypeUid) -> Option<ChannelType>;
}
