use crate::{Rank, RulesError};
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

/// Window lengths and the value the first hand is played at.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// How long a call may still be made once dealing completes.
    pub call_window_ms: u64,
    /// How long a call stays open to counters, restarted by each counter.
    pub counter_window_ms: u64,
    pub stick_window_ms: u64,
    pub first_common_main: Rank,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            call_window_ms: 10_000,
            counter_window_ms: 10_000,
            stick_window_ms: 10_000,
            first_common_main: Rank::Two,
        }
    }
}

impl RulesConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RulesError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: RulesConfig = serde_json::from_reader(reader)?;
        config.verify()?;
        Ok(config)
    }

    pub fn verify(&self) -> Result<(), RulesError> {
        if self.first_common_main.is_joker() {
            return Err(RulesError::InvalidConfig(
                "the common main must be a suited value",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_partial() -> Result<(), RulesError> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, r#"{{"counter_window_ms": 2500, "first_common_main": "seven"}}"#)?;
        let config = RulesConfig::load(file.path())?;
        assert_eq!(
            config,
            RulesConfig {
                counter_window_ms: 2500,
                first_common_main: Rank::Seven,
                ..RulesConfig::default()
            }
        );
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = RulesConfig::load(dir.path().join("rules.json")).unwrap_err();
        assert!(matches!(err, RulesError::Io { .. }));
    }

    #[test]
    fn test_load_rejects_joker_common_main() {
        for rank in ["small", "big"] {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            write!(file, r#"{{"first_common_main": "{}"}}"#, rank).unwrap();
            let err = RulesConfig::load(file.path()).unwrap_err();
            assert!(matches!(err, RulesError::InvalidConfig(_)));
        }
        assert!(RulesConfig::default().verify().is_ok());
    }

    #[test]
    fn test_load_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"stick_window_ms\": \"soon\"}}").unwrap();
        let err = RulesConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, RulesError::Serde { .. }));
    }
}
