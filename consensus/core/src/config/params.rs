use super::constants::*;
use crate::errors::ProfileError;
use crate::network::NetworkType;
use once_cell::sync::OnceCell;
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// How a network treats difficulty between retarget boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RetargetVariant {
    /// Retarget at window boundaries, unchanged difficulty elsewhere.
    #[default]
    Standard,
    /// Retargeting disabled: no height is a boundary.
    AlwaysMax,
    /// Standard rules, plus easy blocks after a gap in block production
    /// for blocks timestamped after `activation_time`.
    MinDifficultyException { activation_time: u64 },
}

/// Immutable retarget parameters of one network.
///
/// Built-in profiles are process-wide singletons, see [`NetworkProfile::get`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkProfile {
    network: NetworkType,
    target_timespan: u64,
    target_spacing: u64,
    interval: u64,
    max_target: U256,
    variant: RetargetVariant,
}

static MAINNET: OnceCell<NetworkProfile> = OnceCell::new();
static TESTNET: OnceCell<NetworkProfile> = OnceCell::new();
static REGTEST: OnceCell<NetworkProfile> = OnceCell::new();

impl NetworkProfile {
    /// Creates a profile, deriving the interval from timespan and spacing.
    pub fn new(
        network: NetworkType,
        target_timespan: u64,
        target_spacing: u64,
        max_target: U256,
        variant: RetargetVariant,
    ) -> Result<Self, ProfileError> {
        if target_spacing == 0 {
            return Err(ProfileError::ZeroSpacing);
        }
        if target_timespan > MAX_TARGET_TIMESPAN {
            return Err(ProfileError::TimespanTooLarge { timespan: target_timespan, max: MAX_TARGET_TIMESPAN });
        }
        if target_timespan < target_spacing {
            return Err(ProfileError::TimespanShorterThanSpacing { timespan: target_timespan, spacing: target_spacing });
        }
        Ok(Self::from_parts(network, target_timespan, target_spacing, max_target, variant))
    }

    fn from_parts(
        network: NetworkType,
        target_timespan: u64,
        target_spacing: u64,
        max_target: U256,
        variant: RetargetVariant,
    ) -> Self {
        let interval = match variant {
            RetargetVariant::AlwaysMax => NO_RETARGET_INTERVAL,
            _ => target_timespan / target_spacing,
        };
        Self { network, target_timespan, target_spacing, interval, max_target, variant }
    }

    /// Builds the built-in parameters of `network`.
    pub fn for_network(network: NetworkType) -> Self {
        match network {
            NetworkType::Mainnet => Self::from_parts(
                network,
                TARGET_TIMESPAN,
                TARGET_SPACING,
                U256::from_big_endian(&MAINNET_MAX_TARGET),
                RetargetVariant::Standard,
            ),
            NetworkType::Testnet => Self::from_parts(
                network,
                TARGET_TIMESPAN,
                TARGET_SPACING,
                U256::from_big_endian(&TESTNET_MAX_TARGET),
                RetargetVariant::MinDifficultyException { activation_time: TESTNET_MIN_DIFFICULTY_ACTIVATION },
            ),
            NetworkType::Regtest => Self::from_parts(
                network,
                TARGET_TIMESPAN,
                TARGET_SPACING,
                U256::from_big_endian(&REGTEST_MAX_TARGET),
                RetargetVariant::AlwaysMax,
            ),
        }
    }

    /// Returns the process-wide profile of `network`, constructing it on
    /// first use. Concurrent first calls construct it once.
    pub fn get(network: NetworkType) -> &'static NetworkProfile {
        let cell = match network {
            NetworkType::Mainnet => &MAINNET,
            NetworkType::Testnet => &TESTNET,
            NetworkType::Regtest => &REGTEST,
        };
        cell.get_or_init(|| {
            let profile = Self::for_network(network);
            log::debug!("Initialized {} retarget profile, interval {}", network, profile.interval);
            profile
        })
    }

    /// Parses a custom profile from TOML.
    pub fn from_toml_str(s: &str) -> Result<Self, ProfileError> {
        ProfileConfig::from_toml_str(s)?.into_profile()
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    /// Seconds one retarget window is expected to take
    pub fn target_timespan(&self) -> u64 {
        self.target_timespan
    }

    /// Seconds expected between two blocks
    pub fn target_spacing(&self) -> u64 {
        self.target_spacing
    }

    /// Blocks per retarget window
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Easiest allowed target
    pub fn max_target(&self) -> U256 {
        self.max_target
    }

    pub fn variant(&self) -> RetargetVariant {
        self.variant
    }

    /// Whether the block following `height` is due a retarget.
    pub fn is_boundary(&self, height: u64) -> bool {
        match self.variant {
            RetargetVariant::AlwaysMax => false,
            _ => height.checked_add(1).map_or(false, |next| next % self.interval == 0),
        }
    }

    /// Whether the header at `height` carries a freshly retargeted difficulty.
    pub fn is_retarget_height(&self, height: u64) -> bool {
        match self.variant {
            RetargetVariant::AlwaysMax => height == 0,
            _ => height % self.interval == 0,
        }
    }

    /// Steps back from the predecessor at `prev_height` to the start of
    /// its window. The first window after genesis is one block shorter.
    pub fn blocks_to_go_back(&self, prev_height: u64) -> u64 {
        if prev_height == self.interval - 1 {
            self.interval - 1
        } else {
            self.interval
        }
    }

    /// Largest gap since the predecessor that still counts as continuous
    /// block production for the minimum-difficulty rule.
    pub fn min_difficulty_gap(&self) -> u64 {
        self.target_spacing * 2
    }
}

/// Serialized form of a custom network profile.
///
/// ```toml
/// network = "testnet"
/// target_timespan = 302400
/// target_spacing = 150
/// max_target = "00000fffff000000000000000000000000000000000000000000000000000000"
///
/// [variant]
/// kind = "min_difficulty_exception"
/// activation_time = 1329264000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub network: NetworkType,
    pub target_timespan: u64,
    pub target_spacing: u64,
    /// Big-endian hex, optional `0x` prefix
    pub max_target: String,
    #[serde(default)]
    pub variant: RetargetVariant,
}

impl ProfileConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ProfileError> {
        Ok(toml::from_str(s)?)
    }

    pub fn into_profile(self) -> Result<NetworkProfile, ProfileError> {
        let max_target = parse_max_target(&self.max_target)?;
        NetworkProfile::new(self.network, self.target_timespan, self.target_spacing, max_target, self.variant)
    }
}

impl From<&NetworkProfile> for ProfileConfig {
    fn from(profile: &NetworkProfile) -> Self {
        let mut bytes = [0u8; 32];
        profile.max_target.to_big_endian(&mut bytes);
        Self {
            network: profile.network,
            target_timespan: profile.target_timespan,
            target_spacing: profile.target_spacing,
            max_target: hex::encode(bytes),
            variant: profile.variant,
        }
    }
}

fn parse_max_target(s: &str) -> Result<U256, ProfileError> {
    let digits = s.trim().trim_start_matches("0x");
    if digits.is_empty() || digits.len() > 64 {
        return Err(ProfileError::InvalidMaxTarget(s.to_string()));
    }
    U256::from_str_radix(digits, 16).map_err(|_| ProfileError::InvalidMaxTarget(s.to_string()))
}
