use std::ops::{Deref, DerefMut};

#[cfg(any(feature = "json", feature = "toml"))]
use serde::{Serialize, de::DeserializeOwned};

/// A configuration payload a [`ConfigManager`](crate::ConfigManager) can
/// persist.
///
/// Implementations must round-trip: `deserialize(serialize(x))` has to yield
/// a value equal to `x` for anything reachable from `set_defaults` followed
/// by ordinary mutation.
pub trait ConfigData {
    type Error: std::error::Error + Send + Sync + 'static;

    fn serialize(&self) -> Result<Vec<u8>, Self::Error>;

    /// Replace the current state with the decoded `bytes`.
    ///
    /// On failure the receiver's state is unspecified; managers follow a
    /// failed decode with [`ConfigData::set_defaults`].
    fn deserialize(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    fn set_defaults(&mut self);
}

/// Persists any serde type as pretty-printed JSON. `T::default()` is the
/// default state.
#[cfg(feature = "json")]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Json<T>(pub T);

#[cfg(feature = "json")]
impl<T> ConfigData for Json<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    type Error = serde_json::Error;

    fn serialize(&self) -> Result<Vec<u8>, Self::Error> {
        serde_json::to_vec_pretty(&self.0)
    }

    fn deserialize(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.0 = serde_json::from_slice(bytes)?;
        Ok(())
    }

    fn set_defaults(&mut self) {
        self.0 = T::default();
    }
}

#[cfg(feature = "toml")]
#[derive(Debug, thiserror::Error)]
pub enum TomlError {
    #[error(transparent)]
    Encode(#[from] toml::ser::Error),

    #[error(transparent)]
    Decode(#[from] toml::de::Error),

    #[error("config is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Persists any serde type as a TOML document. `T` must serialize to a
/// table, i.e. be a struct or map.
#[cfg(feature = "toml")]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toml<T>(pub T);

#[cfg(feature = "toml")]
impl<T> ConfigData for Toml<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    type Error = TomlError;

    fn serialize(&self) -> Result<Vec<u8>, Self::Error> {
        Ok(toml::to_string(&self.0)?.into_bytes())
    }

    fn deserialize(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.0 = toml::from_str(std::str::from_utf8(bytes)?)?;
        Ok(())
    }

    fn set_defaults(&mut self) {
        self.0 = T::default();
    }
}

macro_rules! impl_deref {
    ($($wrapper:ident: $feature:literal),*) => {$(
        #[cfg(feature = $feature)]
        impl<T> Deref for $wrapper<T> {
            type Target = T;

            fn deref(&self) -> &T {
                &self.0
            }
        }

        #[cfg(feature = $feature)]
        impl<T> DerefMut for $wrapper<T> {
            fn deref_mut(&mut self) -> &mut T {
                &mut self.0
            }
        }
    )*};
}

impl_deref!(Json: "json", Toml: "toml");

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Settings {
        name:    String,
        retries: u32,
        tags:    Vec<String>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                name:    "kutti".into(),
                retries: 3,
                tags:    vec![],
            }
        }
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_round_trip() {
        let mut data = Json(Settings::default());
        data.retries = 9;
        data.tags.push("edge".into());

        let bytes = data.serialize().unwrap();
        let mut decoded = Json(Settings::default());
        decoded.deserialize(&bytes).unwrap();
        assert_eq!(decoded, data);
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_rejects_garbage_and_resets() {
        let mut data = Json(Settings::default());
        data.name = "changed".into();
        assert!(data.deserialize(b"{not json").is_err());
        data.set_defaults();
        assert_eq!(data.0, Settings::default());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_round_trip() {
        let mut data = Toml(Settings::default());
        data.name = "cluster".into();

        let bytes = data.serialize().unwrap();
        assert!(std::str::from_utf8(&bytes).unwrap().contains("name = \"cluster\""));

        let mut decoded = Toml(Settings::default());
        decoded.deserialize(&bytes).unwrap();
        assert_eq!(decoded, data);
        assert!(matches!(decoded.deserialize(&[0xff, 0xfe]), Err(TomlError::Utf8(_))));
    }
}
