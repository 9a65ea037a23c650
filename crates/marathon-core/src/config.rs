/// Loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize`; field names map to upper-case
/// env vars (`jwt_secret` reads `JWT_SECRET`). Defaults go through
/// `#[serde(default = "...")]`.
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Same as [`Config::from_env`] but reads from an explicit iterator of
    /// pairs. Used by tests to avoid touching the process environment.
    fn from_pairs<I>(pairs: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(pairs)
    }
}
