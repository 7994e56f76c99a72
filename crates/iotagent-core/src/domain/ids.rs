use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

string_id!(
    /// Resource path a config group listens on, e.g. `/iot/d`.
    Resource
);

string_id!(
    /// API key shared by the devices of a config group.
    ApiKey
);

string_id!(
    /// Device identifier as known to the agent.
    DeviceId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_string() {
        let id = DeviceId::from("sensor-01");
        assert_eq!(serde_json::to_string(&id).expect("json"), r#""sensor-01""#);

        let parsed: Resource = serde_json::from_str(r#""/iot/d""#).expect("json");
        assert_eq!(parsed.as_str(), "/iot/d");
    }

    #[test]
    fn default_is_empty() {
        assert!(ApiKey::default().is_empty());
        assert!(!ApiKey::new("key").is_empty());
    }
}
