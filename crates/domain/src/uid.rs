//! Segmented string identifiers (`namespace:name`, `binding:thing:channel`).
//!
//! Unlike the UUID-backed ids in [`crate::id`], these are stable, human
//! readable keys chosen by whoever defines the type. Built-in ones are
//! `const` so they can be used as lookup keys without allocation.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Namespace of every built-in profile and channel type.
pub const SYSTEM_NAMESPACE: &str = "system";

macro_rules! define_type_uid {
    ($(#[doc = $doc:expr])* $name:ident, $kind:literal) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name {
            namespace: Cow<'static, str>,
            id: Cow<'static, str>,
        }

        impl $name {
            /// Build a uid from its two segments.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::InvalidUid`] when a segment is empty
            /// or contains a `:`.
            pub fn new(
                namespace: impl Into<String>,
                id: impl Into<String>,
            ) -> Result<Self, ValidationError> {
                let namespace = namespace.into();
                let id = id.into();
                if !valid_segment(&namespace) || !valid_segment(&id) {
                    return Err(ValidationError::InvalidUid {
                        kind: $kind,
                        value: format!("{namespace}:{id}"),
                    });
                }
                Ok(Self {
                    namespace: Cow::Owned(namespace),
                    id: Cow::Owned(id),
                })
            }

            /// A uid from two literal segments, for `const` definitions.
            /// Segments are not validated.
            #[must_use]
            pub const fn from_static(namespace: &'static str, id: &'static str) -> Self {
                Self {
                    namespace: Cow::Borrowed(namespace),
                    id: Cow::Borrowed(id),
                }
            }

            /// A uid in the [`SYSTEM_NAMESPACE`].
            #[must_use]
            pub const fn system(id: &'static str) -> Self {
                Self::from_static(SYSTEM_NAMESPACE, id)
            }

            #[must_use]
            pub fn namespace(&self) -> &str {
                &self.namespace
            }

            #[must_use]
            pub fn id(&self) -> &str {
                &self.id
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}:{}", self.namespace, self.id)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.split_once(':') {
                    Some((namespace, id)) => Self::new(namespace, id),
                    None => Err(ValidationError::InvalidUid {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(uid: $name) -> Self {
                uid.to_string()
            }
        }
    };
}

define_type_uid!(
    /// Identifier of a profile policy, e.g. `system:offset`.
    ProfileTypeUid,
    "profile type"
);

define_type_uid!(
    /// Identifier of a channel type, e.g. `system:rawrocker`.
    ChannelTypeUid,
    "channel type"
);

/// Identifier of one concrete channel: `binding:thing[:group…]:channel`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChannelUid(String);

impl ChannelUid {
    /// The last segment (the channel id within its thing).
    #[must_use]
    pub fn id(&self) -> &str {
        self.0.rsplit(':').next().unwrap_or_default()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ChannelUid {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = s.split(':').count();
        if segments < 3 || !s.split(':').all(valid_segment) {
            return Err(ValidationError::InvalidUid {
                kind: "channel",
                value: s.to_string(),
            });
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for ChannelUid {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChannelUid> for String {
    fn from(uid: ChannelUid) -> Self {
        uid.0
    }
}

fn valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_profile_type_uid_from_two_segments() {
        let uid: ProfileTypeUid = "system:offset".parse().unwrap();
        assert_eq!(uid.namespace(), "system");
        assert_eq!(uid.id(), "offset");
        assert_eq!(uid.to_string(), "system:offset");
    }

    #[test]
    fn should_compare_const_and_parsed_uids_by_value() {
        let parsed: ProfileTypeUid = "system:default".parse().unwrap();
        assert_eq!(parsed, ProfileTypeUid::system("default"));
    }

    #[test]
    fn should_reject_uid_without_separator() {
        let err = "offset".parse::<ProfileTypeUid>().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidUid { .. }));
    }

    #[test]
    fn should_reject_uid_with_extra_segment() {
        assert!("a:b:c".parse::<ChannelTypeUid>().is_err());
    }

    #[test]
    fn should_reject_uid_with_empty_segment() {
        assert!(":offset".parse::<ProfileTypeUid>().is_err());
        assert!(ProfileTypeUid::new("system", "").is_err());
    }

    #[test]
    fn should_serialize_uid_as_plain_string() {
        let json = serde_json::to_string(&ProfileTypeUid::system("range")).unwrap();
        assert_eq!(json, "\"system:range\"");
        let parsed: ProfileTypeUid = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ProfileTypeUid::system("range"));
    }

    #[test]
    fn should_parse_channel_uid_with_group_segment() {
        let uid: ChannelUid = "hue:bridge1:lamp:brightness".parse().unwrap();
        assert_eq!(uid.id(), "brightness");
    }

    #[test]
    fn should_reject_channel_uid_with_two_segments() {
        assert!("hue:lamp".parse::<ChannelUid>().is_err());
    }
}
