//! Factory for the built-in profiles.

use std::collections::HashMap;
use std::sync::Arc;

use hublink_domain::channel::trigger_events::{PRESSED, SHORT_PRESSED};
use hublink_domain::error::ConfigurationError;
use hublink_domain::profile_type::system_profiles as sp;
use hublink_domain::uid::ProfileTypeUid;
use hublink_domain::value::{NextPrevious, OnOff, PlayPause, StopMove, UpDown};

use crate::ports::{Profile, ProfileCallback, ProfileContext, ProfileFactory};
use crate::profiles::{
    DefaultProfile, FollowProfile, HysteresisProfile, OffsetProfile, ProfileInstance,
    RangeProfile, RockerDimmerProfile, TimestampChangeProfile, TimestampOffsetProfile,
    TimestampTriggerProfile, TimestampUpdateProfile, ToggleProfile, TriggerCommandProfile,
    TriggerEventStringProfile,
};

type Built = Result<Box<dyn Profile>, ConfigurationError>;

type Constructor =
    Box<dyn Fn(Arc<dyn ProfileCallback>, &dyn ProfileContext) -> Built + Send + Sync>;

fn boxed<P: Profile + 'static>(profile: P) -> Box<dyn Profile> {
    Box::new(profile)
}

/// Builds `system:*` profiles through a uid → constructor table filled once.
pub struct SystemProfileFactory {
    constructors: HashMap<ProfileTypeUid, Constructor>,
}

impl Default for SystemProfileFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemProfileFactory {
    #[must_use]
    pub fn new() -> Self {
        let mut factory = Self {
            constructors: HashMap::new(),
        };
        factory.register(sp::DEFAULT, |cb, _| Ok(boxed(DefaultProfile::new(cb))));
        factory.register(sp::FOLLOW, |cb, _| Ok(boxed(FollowProfile::new(cb))));
        factory.register(sp::HYSTERESIS, |cb, ctx| {
            HysteresisProfile::new(cb, ctx).map(boxed)
        });
        factory.register(sp::OFFSET, |cb, ctx| OffsetProfile::new(cb, ctx).map(boxed));
        factory.register(sp::RANGE, |cb, ctx| RangeProfile::new(cb, ctx).map(boxed));

        factory.register(sp::BUTTON_TOGGLE_SWITCH, |cb, ctx| {
            ToggleProfile::<OnOff>::new(cb, ctx, SHORT_PRESSED).map(boxed)
        });
        factory.register(sp::BUTTON_TOGGLE_PLAYER, |cb, ctx| {
            ToggleProfile::<PlayPause>::new(cb, ctx, SHORT_PRESSED).map(boxed)
        });
        factory.register(sp::BUTTON_TOGGLE_ROLLERSHUTTER, |cb, ctx| {
            ToggleProfile::<UpDown>::new(cb, ctx, SHORT_PRESSED).map(boxed)
        });
        factory.register(sp::RAWBUTTON_TOGGLE_SWITCH, |cb, ctx| {
            ToggleProfile::<OnOff>::new(cb, ctx, PRESSED).map(boxed)
        });
        factory.register(sp::RAWBUTTON_TOGGLE_PLAYER, |cb, ctx| {
            ToggleProfile::<PlayPause>::new(cb, ctx, PRESSED).map(boxed)
        });
        factory.register(sp::RAWBUTTON_TOGGLE_ROLLERSHUTTER, |cb, ctx| {
            ToggleProfile::<UpDown>::new(cb, ctx, PRESSED).map(boxed)
        });
        factory.register(sp::RAWBUTTON_ON_OFF_SWITCH, |cb, _| {
            Ok(boxed(TriggerCommandProfile::raw_button_on_off(cb)))
        });

        factory.register(sp::RAWROCKER_DIMMER, |cb, ctx| {
            RockerDimmerProfile::new(cb, ctx).map(boxed)
        });
        factory.register(sp::RAWROCKER_ON_OFF, |cb, _| {
            Ok(boxed(TriggerCommandProfile::rocker(cb, OnOff::On, OnOff::Off)))
        });
        factory.register(sp::RAWROCKER_PLAY_PAUSE, |cb, _| {
            Ok(boxed(TriggerCommandProfile::rocker(cb, PlayPause::Play, PlayPause::Pause)))
        });
        factory.register(sp::RAWROCKER_NEXT_PREVIOUS, |cb, _| {
            Ok(boxed(TriggerCommandProfile::rocker(
                cb,
                NextPrevious::Next,
                NextPrevious::Previous,
            )))
        });
        factory.register(sp::RAWROCKER_STOP_MOVE, |cb, _| {
            Ok(boxed(TriggerCommandProfile::rocker(cb, StopMove::Move, StopMove::Stop)))
        });
        factory.register(sp::RAWROCKER_UP_DOWN, |cb, _| {
            Ok(boxed(TriggerCommandProfile::rocker(cb, UpDown::Up, UpDown::Down)))
        });
        factory.register(sp::RAWROCKER_REWIND_FASTFORWARD, |cb, _| {
            Ok(boxed(TriggerCommandProfile::rocker_rewind_fastforward(cb)))
        });

        factory.register(sp::TRIGGER_EVENT_STRING, |cb, _| {
            Ok(boxed(TriggerEventStringProfile::new(cb)))
        });
        factory.register(sp::TIMESTAMP_CHANGE, |cb, ctx| {
            TimestampChangeProfile::new(cb, ctx).map(boxed)
        });
        factory.register(sp::TIMESTAMP_UPDATE, |cb, ctx| {
            TimestampUpdateProfile::new(cb, ctx).map(boxed)
        });
        factory.register(sp::TIMESTAMP_OFFSET, |cb, ctx| {
            TimestampOffsetProfile::new(cb, ctx).map(boxed)
        });
        factory.register(sp::TIMESTAMP_TRIGGER, |cb, ctx| {
            TimestampTriggerProfile::new(cb, ctx).map(boxed)
        });
        factory
    }

    fn register<F>(&mut self, uid: ProfileTypeUid, constructor: F)
    where
        F: Fn(Arc<dyn ProfileCallback>, &dyn ProfileContext) -> Built
            + Send
            + Sync
            + 'static,
    {
        self.constructors.insert(uid, Box::new(constructor));
    }
}

impl ProfileFactory for SystemProfileFactory {
    fn create_profile(
        &self,
        uid: &ProfileTypeUid,
        callback: Arc<dyn ProfileCallback>,
        context: &dyn ProfileContext,
    ) -> Result<Option<ProfileInstance>, ConfigurationError> {
        let Some(constructor) = self.constructors.get(uid) else {
            return Ok(None);
        };
        let profile = constructor(callback, context)?;
        Ok(Some(ProfileInstance::new(uid.clone(), profile)))
    }

    fn supported_profile_type_uids(&self) -> Vec<ProfileTypeUid> {
        self.constructors.keys().cloned().collect()
    }
}
