//! Retarget calculation
//!
//! This module scales the previous target by the observed window timespan,
//! clamped to a factor of four either way and capped at the network limit.

use super::window::RetargetWindow;
use log::{debug, info};
use primitive_types::{U256, U512};
use retarget_core::{DifficultyResult, NetworkProfile};
use retarget_pow::Target;

/// Computes new targets for one network profile.
pub struct RetargetCalculator<'a> {
    profile: &'a NetworkProfile,
}

impl<'a> RetargetCalculator<'a> {
    pub fn new(profile: &'a NetworkProfile) -> Self {
        Self { profile }
    }

    /// Limits the adjustment step to `[T/4, 4T]`.
    pub fn clamp_timespan(&self, timespan: i64) -> i64 {
        let target_timespan = self.profile.target_timespan() as i64;
        timespan.clamp(target_timespan / 4, target_timespan * 4)
    }

    /// Full precision target for the block after `window.last`, capped at
    /// the profile's max target.
    pub fn next_target(&self, window: &RetargetWindow) -> DifficultyResult<Target> {
        let timespan = self.clamp_timespan(window.timespan());
        let prev_target = Target::from_compact(window.last.bits)?;

        let scaled: U512 = prev_target.as_u256().full_mul(U256::from(timespan as u64))
            / U512::from(self.profile.target_timespan());

        let max_target = self.profile.max_target();
        let new_target = match U256::try_from(scaled) {
            Ok(target) if target <= max_target => target,
            _ => {
                info!("Difficulty hit proof of work limit: {:x}", scaled);
                max_target
            }
        };

        debug!(
            "Retarget after height {}: timespan {}s (observed {}s), {:x} -> {:x}",
            window.last.height,
            timespan,
            window.timespan(),
            prev_target,
            new_target
        );
        Ok(Target::new(new_target))
    }

    /// Compact form of [`Self::next_target`], as a block producer would
    /// declare it.
    pub fn next_bits(&self, window: &RetargetWindow) -> DifficultyResult<u32> {
        Ok(self.next_target(window)?.to_compact())
    }

    /// The compact target a block declaring `declared_bits` must carry.
    /// The computed target is cut to the precision of the declared
    /// exponent before encoding.
    pub fn compute(&self, window: &RetargetWindow, declared_bits: u32) -> DifficultyResult<u32> {
        Ok(self.next_target(window)?.reduce_precision(declared_bits).to_compact())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retarget_core::{Hash, HeaderRef, NetworkType, RetargetVariant, ZERO_HASH};

    fn bitcoin_like_profile() -> NetworkProfile {
        let pow_limit = retarget_pow::decode_compact(0x1d00ffff).unwrap();
        NetworkProfile::new(NetworkType::Mainnet, 1_209_600, 600, pow_limit, RetargetVariant::Standard).unwrap()
    }

    fn window(first_time: u64, last_time: u64, last_height: u64, bits: u32) -> RetargetWindow {
        let first = HeaderRef::new(last_height - 2016, first_time, bits, Hash::from_u64_word(1), ZERO_HASH);
        let last = HeaderRef::new(last_height, last_time, bits, Hash::from_u64_word(2), Hash::from_u64_word(3));
        RetargetWindow::new(first, last)
    }

    #[test]
    fn test_exact_timespan_keeps_target() {
        let profile = bitcoin_like_profile();
        let calc = RetargetCalculator::new(&profile);
        let w = window(1_000_000, 1_000_000 + 1_209_600, 4031, 0x1b0404cb);
        assert_eq!(calc.next_bits(&w).unwrap(), 0x1b0404cb);
        assert_eq!(calc.compute(&w, 0x1b0404cb).unwrap(), 0x1b0404cb);
    }

    #[test]
    fn test_get_next_work() {
        let profile = bitcoin_like_profile();
        let calc = RetargetCalculator::new(&profile);
        let w = window(1261130161, 1262152739, 32255, 0x1d00ffff);
        assert_eq!(calc.next_bits(&w).unwrap(), 0x1d00d86a);
        assert_eq!(calc.compute(&w, 0x1d00d86a).unwrap(), 0x1d00d86a);
    }

    #[test]
    fn test_get_next_work_pow_limit() {
        let profile = bitcoin_like_profile();
        let calc = RetargetCalculator::new(&profile);
        let w = window(1231006505, 1233061996, 2016, 0x1d00ffff);
        assert_eq!(calc.next_bits(&w).unwrap(), 0x1d00ffff);
    }

    #[test]
    fn test_get_next_work_lower_limit_actual() {
        let profile = bitcoin_like_profile();
        let calc = RetargetCalculator::new(&profile);
        let w = window(1279008237, 1279297671, 68543, 0x1c05a3f4);
        assert_eq!(calc.next_bits(&w).unwrap(), 0x1c0168fd);
    }

    #[test]
    fn test_get_next_work_upper_limit_actual() {
        let profile = bitcoin_like_profile();
        let calc = RetargetCalculator::new(&profile);
        let w = window(1263163443, 1269211443, 46367, 0x1c387f6f);
        assert_eq!(calc.next_bits(&w).unwrap(), 0x1d00e1fd);
        assert_eq!(calc.compute(&w, 0x1d00e1fd).unwrap(), 0x1d00e1fd);
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let profile = bitcoin_like_profile();
        let calc = RetargetCalculator::new(&profile);
        for timespan in [-5_000i64, 0, 100, 302_399, 302_400, 1_209_600, 4_838_400, 4_838_401, 9_676_800] {
            let once = calc.clamp_timespan(timespan);
            assert!((302_400..=4_838_400).contains(&once));
            assert_eq!(calc.clamp_timespan(once), once);
        }
    }

    #[test]
    fn test_largest_profile_timespan_clamps() {
        use retarget_core::config::constants::MAX_TARGET_TIMESPAN;
        let profile = NetworkProfile::new(NetworkType::Mainnet, MAX_TARGET_TIMESPAN, 600, U256::MAX >> 1, RetargetVariant::Standard)
            .unwrap();
        let calc = RetargetCalculator::new(&profile);
        let target_timespan = MAX_TARGET_TIMESPAN as i64;
        assert_eq!(calc.clamp_timespan(i64::MAX), target_timespan * 4);
        assert_eq!(calc.clamp_timespan(i64::MIN), target_timespan / 4);

        let w = window(0, MAX_TARGET_TIMESPAN, 4031, 0x1b0404cb);
        assert_eq!(calc.next_bits(&w).unwrap(), 0x1b0404cb);
    }

    #[test]
    fn test_eightfold_timespan_quadruples_target() {
        let profile = NetworkProfile::new(NetworkType::Mainnet, 1_209_600, 600, U256::MAX >> 1, RetargetVariant::Standard).unwrap();
        let calc = RetargetCalculator::new(&profile);
        let w = window(0, 1_209_600 * 8, 4031, 0x1b0404cb);
        let prev = retarget_pow::decode_compact(0x1b0404cb).unwrap();
        assert_eq!(calc.next_target(&w).unwrap().as_u256(), prev * U256::from(4u64));
    }

    #[test]
    fn test_eightfold_timespan_hits_max_target() {
        let profile = bitcoin_like_profile();
        let calc = RetargetCalculator::new(&profile);
        let w = window(0, 1_209_600 * 8, 4031, 0x1d00ffff);
        assert_eq!(calc.next_target(&w).unwrap().as_u256(), profile.max_target());
    }

    #[test]
    fn test_negative_timespan_clamps_to_quarter() {
        let profile = bitcoin_like_profile();
        let calc = RetargetCalculator::new(&profile);
        let w = window(2_000_000, 1_000_000, 4031, 0x1c05a3f4);
        assert_eq!(calc.next_bits(&w).unwrap(), 0x1c0168fd);
    }

    #[test]
    fn test_compute_masks_to_declared_precision() {
        let profile = bitcoin_like_profile();
        let calc = RetargetCalculator::new(&profile);
        let w = window(1261130161, 1262152739, 32255, 0x1d00ffff);
        let exact = calc.next_target(&w).unwrap();
        // A declared value one exponent step wider keeps fewer mantissa bits.
        let coarse = calc.compute(&w, 0x1e000000).unwrap();
        assert_eq!(coarse, exact.reduce_precision(0x1e000000).to_compact());
        assert_ne!(coarse, 0x1d00d86a);
    }

    #[test]
    fn test_malformed_previous_target() {
        let profile = bitcoin_like_profile();
        let calc = RetargetCalculator::new(&profile);
        let w = window(0, 1_209_600, 4031, 0x04923456);
        assert!(calc.next_target(&w).is_err());
    }
}
