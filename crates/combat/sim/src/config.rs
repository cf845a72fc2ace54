//! Harness configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Which scenario to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Scenario {
    /// Aria vs Belor on starter content, one JSON line per event.
    #[default]
    Duel,
    /// Advance, snapshot, restore into a differently seeded copy and compare.
    Snapshot,
}

#[derive(Clone, Debug)]
pub struct SimConfig {
    pub seed: u64,
    pub max_rounds: u32,
    pub scenario: Scenario,
    /// Directory for an additional log file sink.
    pub log_dir: Option<PathBuf>,
}

impl SimConfig {
    pub const DEFAULT_SEED: u64 = 1337;
    pub const DEFAULT_MAX_ROUNDS: u32 = 5;

    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_SEED` - Encounter seed (default: 1337)
    /// - `COMBAT_MAX_ROUNDS` - Round limit for `run_until` (default: 5)
    /// - `COMBAT_SCENARIO` - `duel` or `snapshot` (default: duel)
    /// - `COMBAT_LOG_DIR` - Also write logs to `combat-sim.log` in this directory
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("COMBAT_SEED") {
            config.seed = seed;
        }
        if let Some(rounds) = read_env::<u32>("COMBAT_MAX_ROUNDS") {
            config.max_rounds = rounds.max(1);
        }
        if let Some(scenario) = read_env::<Scenario>("COMBAT_SCENARIO") {
            config.scenario = scenario;
        }
        config.log_dir = env::var_os("COMBAT_LOG_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        config
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            scenario: Scenario::default(),
            log_dir: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let raw = env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable environment variable");
            None
        }
    }
}
