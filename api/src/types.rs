use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fmt::{Display, Formatter},
    str::FromStr,
};
use uuid::Uuid;

/// Host-assigned identity of the player sitting in a seat.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PlayerId(Uuid);

impl PlayerId {
    pub fn null() -> PlayerId {
        PlayerId(Uuid::nil())
    }

    pub fn new() -> PlayerId {
        PlayerId(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        PlayerId::null()
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for PlayerId {
    type Err = <Uuid as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PlayerId(s.parse()?))
    }
}

/// Milliseconds on the host's clock. The rules engine never reads a clock
/// itself; every time-sensitive operation is handed `now`.
pub type Timestamp = u64;
