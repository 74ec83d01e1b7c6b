//! Errors raised by the profile engine.
//!
//! Both types convert into [`HubLinkError`] so callers at the edge can
//! deal with one error type.

use hublink_domain::error::{ConfigurationError, HubLinkError, NotFoundError, ValueError};
use hublink_domain::id::LinkId;
use hublink_domain::uid::ProfileTypeUid;

use crate::ports::SchedulerError;

/// One event could not be processed by a profile.
///
/// These are per-event faults: the event is dropped and the link stays active.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    #[error("scheduling failed")]
    Scheduling(#[from] SchedulerError),
}

/// Activating or driving a link failed.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("no profile configured or suggested for link {0}")]
    NoProfileSuggested(LinkId),

    #[error("profile type {0} is not supported by the factory")]
    UnsupportedProfileType(ProfileTypeUid),

    #[error("profile configuration error")]
    Configuration(#[from] ConfigurationError),

    #[error("link {0} is not active")]
    NotActive(LinkId),

    #[error("invalid link")]
    Invalid(#[source] HubLinkError),
}

impl From<LinkError> for HubLinkError {
    fn from(err: LinkError) -> Self {
        match err {
            LinkError::NoProfileSuggested(id) => NotFoundError {
                entity: "Profile for link",
                id: id.to_string(),
            }
            .into(),
            LinkError::UnsupportedProfileType(uid) => NotFoundError {
                entity: "ProfileType",
                id: uid.to_string(),
            }
            .into(),
            LinkError::Configuration(err) => err.into(),
            LinkError::NotActive(id) => NotFoundError {
                entity: "Link",
                id: id.to_string(),
            }
            .into(),
            LinkError::Invalid(err) => err,
        }
    }
}
