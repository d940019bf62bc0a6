//! Retarget parameters of the built-in networks.

/// Target timespan of one retarget window in seconds (3.5 days)
pub const TARGET_TIMESPAN: u64 = 302_400;

/// Target time between blocks in seconds (2.5 minutes)
pub const TARGET_SPACING: u64 = 150;

/// Interval used when retargeting is disabled. Any height below it can
/// never satisfy the boundary test.
pub const NO_RETARGET_INTERVAL: u64 = i32::MAX as u64;

/// Longest target timespan a profile may declare. Four times it must still
/// fit a signed 64-bit timespan.
pub const MAX_TARGET_TIMESPAN: u64 = i64::MAX as u64 / 4;

/// Easiest target on main and test networks, compact form `0x1e0fffff`.
pub const MAINNET_MAX_TARGET: [u8; 32] = [
    0x00, 0x00, 0x0f, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Same limit as main network.
pub const TESTNET_MAX_TARGET: [u8; 32] = MAINNET_MAX_TARGET;

/// Loosest possible non-negative target, used by regtest.
pub const REGTEST_MAX_TARGET: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
];

/// Testnet minimum-difficulty rule activation, 2012-02-15 00:00:00 UTC
pub const TESTNET_MIN_DIFFICULTY_ACTIVATION: u64 = 1_329_264_000;
