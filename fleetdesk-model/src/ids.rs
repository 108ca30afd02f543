//! Opaque identifiers assigned by the data service.
//!
//! The service issues these; the admin screen never mints or parses them, it
//! only echoes them back when scoping an update or linking a profile to its
//! identity.

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize)
        )]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(
    /// Primary key of a profile row. Equal to the linked identity's id.
    ProfileId
);

opaque_id!(
    /// Primary key of a vehicle row.
    VehicleId
);

opaque_id!(
    /// Authentication identity issued by the sign-up endpoint.
    IdentityId
);

impl From<IdentityId> for ProfileId {
    fn from(identity: IdentityId) -> Self {
        ProfileId(identity.0)
    }
}
