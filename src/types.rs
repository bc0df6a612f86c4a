use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Presentation style of the toast box, mirroring the frame variants the
/// host supports for its own definitions.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameStyle {
    #[default]
    Task,
    Goal,
    Challenge,
}

impl FrameStyle {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Goal => "goal",
            Self::Challenge => "challenge",
        }
    }
}

impl Display for FrameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "task" => Ok(Self::Task),
            "goal" => Ok(Self::Goal),
            "challenge" => Ok(Self::Challenge),
            other => Err(format!("unknown frame style: {other}")),
        }
    }
}

/// Symbolic reference to a host-defined icon asset, e.g. `stone`.
///
/// The host resolves the symbol when the definition is registered; an
/// unknown symbol surfaces there as a registration failure.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IconId(String);

impl IconId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for IconId {
    fn default() -> Self {
        Self("stone".to_string())
    }
}

impl Display for IconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a connected user, as assigned by the host.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct UserId(Uuid);

impl UserId {
    #[must_use]
    pub const fn new(raw: Uuid) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Scheduler delay in host ticks.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Ticks(u64);

impl Ticks {
    /// Run as soon as the target's context is available.
    pub const IMMEDIATE: Self = Self(0);
    /// The shortest strictly positive delay the scheduler can express.
    pub const ONE: Self = Self(1);

    #[must_use]
    pub const fn new(ticks: u64) -> Self {
        Self(ticks)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}
