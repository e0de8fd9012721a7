//! Peck definitions: what to hit, how often, and the hooks around a run.
use std::fmt;

use async_trait::async_trait;
use http::Method;
use serde::{Deserialize, Serialize};

use crate::error::PeckError;

/// Highest accepted firing chance.
pub const MAX_CHANCE: u8 = 100;

/// The request a peck fires.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Target {
    /// HTTP method. Only `GET` and `POST` are executed, see [`Verb`].
    #[serde(with = "method_serde")]
    pub method: Method,

    /// Path appended to the base URL, starting with `/`.
    pub path: String,

    /// Payload sent as JSON with `POST` requests.
    #[serde(default)]
    pub body: Option<serde_json::Value>,
}

impl Target {
    /// Creates a `GET` target.
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::GET, path: path.into(), body: None }
    }

    /// Creates a `POST` target with an optional JSON payload.
    pub fn post(path: impl Into<String>, body: Option<serde_json::Value>) -> Self {
        Self { method: Method::POST, path: path.into(), body }
    }

    /// Returns the executable verb, or `None` when the method is unsupported.
    pub fn verb(&self) -> Option<Verb> {
        Verb::try_from(&self.method).ok()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Methods the executor knows how to issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Verb {
    /// `GET`, sent without a body.
    Get,
    /// `POST`, sent with the target's JSON body if any.
    Post,
}

impl TryFrom<&Method> for Verb {
    type Error = Method;

    fn try_from(method: &Method) -> Result<Self, Self::Error> {
        if *method == Method::GET {
            Ok(Verb::Get)
        } else if *method == Method::POST {
            Ok(Verb::Post)
        } else {
            Err(method.clone())
        }
    }
}

/// Firing policy of a peck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeckConfig {
    /// Chance, out of 100, that the peck fires in a given round.
    #[serde(alias = "chances")]
    pub chance: u8,

    /// Force a fire while the peck has no recorded hit.
    #[serde(default, alias = "atLeastOnce")]
    pub at_least_once: bool,
}

impl PeckConfig {
    /// Creates a firing policy.
    pub fn new(chance: u8, at_least_once: bool) -> Self {
        Self { chance, at_least_once }
    }
}

/// Lifecycle hooks of a peck.
///
/// `prepare` runs once for every peck before the first round, `cleanup` once after the
/// last round, whether or not the peck ever fired. A failing hook aborts the run.
#[async_trait]
pub trait PeckEnvironment: Send + Sync {
    /// Called once before any request is sent.
    async fn prepare(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called once after the last round.
    async fn cleanup(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Hooks that do nothing. Used for pecks loaded from files.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopEnvironment;

#[async_trait]
impl PeckEnvironment for NoopEnvironment {}

/// Identity of a peck's statistics bucket.
///
/// Derived from the serialized target and config, so pecks with identical content
/// accumulate into the same bucket.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatsToken(String);

impl StatsToken {
    /// Derives the token of a target and config pair.
    pub fn derive(target: &Target, config: &PeckConfig) -> Result<Self, PeckError> {
        let target = serde_json::to_string(target).map_err(|source| PeckError::Token { source })?;
        let config = serde_json::to_string(config).map_err(|source| PeckError::Token { source })?;
        Ok(Self(format!("{target}.{config}")))
    }
}

impl fmt::Display for StatsToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated test case.
pub struct PeckDefinition {
    target: Target,
    config: PeckConfig,
    environment: Box<dyn PeckEnvironment>,
    token: StatsToken,
}

impl PeckDefinition {
    /// Validates and builds a peck definition.
    ///
    /// Rejects a chance above [`MAX_CHANCE`] and a path without a leading `/`. A method
    /// other than `GET` or `POST` is accepted, but every attempt to fire it is skipped.
    pub fn new(
        target: Target,
        config: PeckConfig,
        environment: Box<dyn PeckEnvironment>,
    ) -> Result<Self, PeckError> {
        if config.chance > MAX_CHANCE {
            return Err(PeckError::ChanceOutOfRange { chance: config.chance });
        }
        if !target.path.starts_with('/') {
            return Err(PeckError::InvalidPath { path: target.path });
        }

        match target.verb() {
            None => tracing::warn!(%target, "unsupported method, this peck will never fire"),
            Some(Verb::Get) if target.body.is_some() => {
                tracing::warn!(%target, "body is ignored for GET targets")
            }
            _ => (),
        }

        let token = StatsToken::derive(&target, &config)?;
        Ok(Self { target, config, environment, token })
    }

    /// Builds a definition with no-op hooks.
    pub fn without_hooks(target: Target, config: PeckConfig) -> Result<Self, PeckError> {
        Self::new(target, config, Box::new(NoopEnvironment))
    }

    /// The request this peck fires.
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// The firing policy.
    pub fn config(&self) -> &PeckConfig {
        &self.config
    }

    /// The statistics bucket this peck records into.
    pub fn token(&self) -> &StatsToken {
        &self.token
    }

    pub(crate) fn environment_mut(&mut self) -> &mut dyn PeckEnvironment {
        self.environment.as_mut()
    }
}

impl fmt::Debug for PeckDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeckDefinition")
            .field("target", &self.target)
            .field("config", &self.config)
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

mod method_serde {
    use http::Method;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(method: &Method, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(method.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Method, D::Error> {
        let raw = String::deserialize(d)?;
        Method::from_bytes(raw.as_bytes())
            .map_err(|_| de::Error::custom(format!("invalid HTTP method '{raw}'")))
    }
}
