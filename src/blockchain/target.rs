use num_bigint::BigUint;
use num_traits::{One, Zero};

use super::BlockLedger;
use crate::error::ConfigError;

/// Widest accepted target, in hex digits (512 bits).
pub const MAX_TARGET_HEX_DIGITS: usize = 128;

/// Inputs of the EMA retarget rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetargetParams {
    /// Easiest allowed target. Retargeted values never exceed it.
    pub max_target: BigUint,
    /// Smoothing window, in blocks.
    pub ema_window_size: u64,
    /// Desired number of PoW blocks per hive block.
    pub ema_spacing_target: u64,
}

/// Compute the bee hash target for the block at `height`.
///
/// Walks back from `height - 1` counting PoW blocks since the last hive block.
/// With no hive block in the history the easiest target is returned; right
/// after a hive block the previous target is reused untouched. Otherwise the
/// previous target is scaled by
/// `((interval - 1) * spacing + 2 * pow_blocks) / ((interval + 1) * spacing)`
/// with `interval = window / spacing`, multiplied first and divided second,
/// then clamped to `max_target`. A window shorter than the spacing can make the
/// multiplier zero or negative; the target then drops to 1.
pub fn next_bee_hash_target(ledger: &BlockLedger, height: u64, params: &RetargetParams) -> BigUint {
    assert!(
        height <= ledger.height(),
        "retarget requested for height {} beyond ledger tip {}",
        height,
        ledger.height()
    );

    if height == 0 {
        return params.max_target.clone();
    }

    // Block 0 is never inspected: reaching it counts as "start of chain".
    let mut num_pow_blocks: u64 = 0;
    let mut j = height - 1;
    while j > 0 && !ledger.block(j).is_hive_mined {
        num_pow_blocks += 1;
        j -= 1;
    }

    if j == 0 {
        return params.max_target.clone();
    }

    let prev_target = &ledger.block(height - 1).bee_hash_target;
    if num_pow_blocks == 0 {
        return prev_target.clone();
    }

    // (interval - 1) * spacing == window - spacing and
    // (interval + 1) * spacing == window + spacing, kept exact in integers.
    let multiplier = i128::from(params.ema_window_size) + 2 * i128::from(num_pow_blocks)
        - i128::from(params.ema_spacing_target);
    if multiplier <= 0 {
        return BigUint::one();
    }
    let numerator = BigUint::from(multiplier.unsigned_abs());
    let denominator =
        BigUint::from(params.ema_window_size) + BigUint::from(params.ema_spacing_target);

    let mut target = prev_target * numerator;
    target /= denominator;

    if target > params.max_target {
        target = params.max_target.clone();
    }
    // A zero target can never be beaten and has no defined difficulty.
    if target.is_zero() {
        target = BigUint::one();
    }
    target
}

/// `max_target / target`.
///
/// Targets produced by [`next_bee_hash_target`] and [`parse_target_hex`] are
/// never zero. A zero passed in directly yields `max_target`, the value for a
/// target of 1, instead of a division panic.
pub fn difficulty(max_target: &BigUint, target: &BigUint) -> BigUint {
    if target.is_zero() {
        return max_target.clone();
    }
    max_target / target
}

/// Lowercase hex, left-padded with zeros to `hex_width` digits.
pub fn format_target(target: &BigUint, hex_width: usize) -> String {
    format!("{:0>width$}", target.to_str_radix(16), width = hex_width)
}

/// Parse a hex target string. Returns the value and its hex width, which sets
/// the bit-width of the simulated hash draws.
pub fn parse_target_hex(raw: &str) -> Result<(BigUint, usize), ConfigError> {
    let digits = raw.trim();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits);

    if digits.is_empty() {
        return Err(ConfigError::EmptyTarget);
    }
    if digits.len() > MAX_TARGET_HEX_DIGITS {
        return Err(ConfigError::TargetTooWide {
            digits: digits.len(),
            max: MAX_TARGET_HEX_DIGITS,
        });
    }

    // hex::decode wants whole bytes
    let padded = if digits.len() % 2 == 1 {
        format!("0{digits}")
    } else {
        digits.to_string()
    };
    let bytes = hex::decode(&padded).map_err(|e| ConfigError::InvalidTargetHex {
        value: raw.to_string(),
        source: e,
    })?;

    let target = BigUint::from_bytes_be(&bytes);
    if target.is_zero() {
        return Err(ConfigError::ZeroTarget);
    }
    Ok((target, digits.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::DEFAULT_MAX_TARGET_HEX;
    use proptest::prelude::*;

    fn params() -> RetargetParams {
        let (max_target, _) = parse_target_hex(DEFAULT_MAX_TARGET_HEX).unwrap();
        RetargetParams {
            max_target,
            ema_window_size: 30,
            ema_spacing_target: 2,
        }
    }

    fn ledger_from(pattern: &[(u64, bool)]) -> BlockLedger {
        let mut ledger = BlockLedger::new();
        for (target, hive) in pattern {
            ledger.append(BigUint::from(*target), *hive);
        }
        ledger
    }

    #[test]
    fn genesis_returns_max_target() {
        let p = params();
        let ledger = BlockLedger::new();
        assert_eq!(next_bee_hash_target(&ledger, 0, &p), p.max_target);
    }

    #[test]
    fn no_hive_history_returns_max_target() {
        let p = params();
        let ledger = ledger_from(&[(5, false); 20]);
        for h in 0..=20 {
            assert_eq!(next_bee_hash_target(&ledger, h, &p), p.max_target);
        }
    }

    #[test]
    fn hive_at_block_zero_is_not_seen() {
        let p = params();
        let ledger = ledger_from(&[(7, true), (7, false)]);
        assert_eq!(next_bee_hash_target(&ledger, 1, &p), p.max_target);
        assert_eq!(next_bee_hash_target(&ledger, 2, &p), p.max_target);
    }

    #[test]
    fn right_after_hive_reuses_previous_target() {
        let p = params();
        let ledger = ledger_from(&[(100, false), (100, false), (1234, true)]);
        assert_eq!(next_bee_hash_target(&ledger, 3, &p), BigUint::from(1234u32));
    }

    #[test]
    fn ema_scales_with_pow_blocks() {
        let p = params();
        // one PoW block since the hive block: 3200 * (28 + 2) / 32 = 3000
        let ledger = ledger_from(&[(0, false), (3200, true), (3200, false)]);
        assert_eq!(next_bee_hash_target(&ledger, 3, &p), BigUint::from(3000u32));

        // two PoW blocks: 3200 * (28 + 4) / 32 = 3200, no change at the spacing target
        let ledger = ledger_from(&[(0, false), (3200, true), (3200, false), (3200, false)]);
        assert_eq!(next_bee_hash_target(&ledger, 4, &p), BigUint::from(3200u32));

        // five PoW blocks: 3200 * (28 + 10) / 32 = 3800
        let ledger = ledger_from(&[
            (0, false),
            (3200, true),
            (3200, false),
            (3200, false),
            (3200, false),
            (3200, false),
            (3200, false),
        ]);
        assert_eq!(next_bee_hash_target(&ledger, 7, &p), BigUint::from(3800u32));
    }

    #[test]
    fn ema_multiplies_before_dividing() {
        let p = params();
        // 33 * 30 / 32 = 30 (dividing first would give 33 * 0 = 0)
        let ledger = ledger_from(&[(0, false), (33, true), (33, false)]);
        assert_eq!(next_bee_hash_target(&ledger, 3, &p), BigUint::from(30u32));
    }

    #[test]
    fn window_shorter_than_spacing() {
        let p = RetargetParams {
            ema_window_size: 1,
            ema_spacing_target: 2,
            ..params()
        };
        // 3000 * (1 - 2 + 2) / 3 = 1000
        let ledger = ledger_from(&[(0, false), (3000, true), (3000, false)]);
        assert_eq!(next_bee_hash_target(&ledger, 3, &p), BigUint::from(1000u32));
        // 3000 * (1 - 2 + 4) / 3 = 3000
        let ledger = ledger_from(&[(0, false), (3000, true), (3000, false), (3000, false)]);
        assert_eq!(next_bee_hash_target(&ledger, 4, &p), BigUint::from(3000u32));

        // 1 - 5 + 2 is negative: floored to the smallest target
        let p = RetargetParams {
            ema_window_size: 1,
            ema_spacing_target: 5,
            ..params()
        };
        let ledger = ledger_from(&[(0, false), (3000, true), (3000, false)]);
        assert_eq!(next_bee_hash_target(&ledger, 3, &p), BigUint::one());
    }

    #[test]
    fn retarget_clamps_to_max() {
        let p = params();
        let near_max = &p.max_target - 1u32;
        let mut ledger = BlockLedger::new();
        ledger.append(p.max_target.clone(), false);
        ledger.append(near_max.clone(), true);
        for _ in 0..40 {
            ledger.append(near_max.clone(), false);
        }
        let h = ledger.height();
        assert_eq!(next_bee_hash_target(&ledger, h, &p), p.max_target);
    }

    #[test]
    fn tiny_target_never_reaches_zero() {
        let p = params();
        let ledger = ledger_from(&[(0, false), (1, true), (1, false)]);
        assert_eq!(next_bee_hash_target(&ledger, 3, &p), BigUint::one());
    }

    #[test]
    #[should_panic(expected = "beyond ledger tip")]
    fn height_past_tip_panics() {
        let p = params();
        let ledger = ledger_from(&[(1, false)]);
        let _ = next_bee_hash_target(&ledger, 5, &p);
    }

    #[test]
    fn parse_accepts_prefix_and_odd_length() {
        let (t, width) = parse_target_hex("0xfff").unwrap();
        assert_eq!(t, BigUint::from(0xfffu32));
        assert_eq!(width, 3);

        let (t, width) = parse_target_hex(DEFAULT_MAX_TARGET_HEX).unwrap();
        assert_eq!(width, 32);
        assert_eq!(t.bits(), 124);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(parse_target_hex(""), Err(ConfigError::EmptyTarget)));
        assert!(matches!(parse_target_hex("00"), Err(ConfigError::ZeroTarget)));
        assert!(matches!(
            parse_target_hex("xyz"),
            Err(ConfigError::InvalidTargetHex { .. })
        ));
        let too_wide = "f".repeat(MAX_TARGET_HEX_DIGITS + 1);
        assert!(matches!(
            parse_target_hex(&too_wide),
            Err(ConfigError::TargetTooWide { .. })
        ));
    }

    #[test]
    fn format_pads_to_width() {
        assert_eq!(format_target(&BigUint::from(1u32), 32).len(), 32);
        assert_eq!(
            format_target(&BigUint::from(0xbeefu32), 8),
            "0000beef"
        );
    }

    #[test]
    fn difficulty_is_ratio_to_max() {
        let max = BigUint::from(1000u32);
        assert_eq!(difficulty(&max, &BigUint::from(10u32)), BigUint::from(100u32));
        assert_eq!(difficulty(&max, &max), BigUint::one());
    }

    #[test]
    fn difficulty_of_zero_matches_target_one() {
        let max = BigUint::from(1000u32);
        assert_eq!(difficulty(&max, &BigUint::zero()), max);
        assert_eq!(difficulty(&max, &BigUint::zero()), difficulty(&max, &BigUint::one()));
    }

    proptest! {
        #[test]
        fn retarget_never_exceeds_max(
            history in proptest::collection::vec(any::<bool>(), 1..120),
            window in 1u64..200,
            spacing in 1u64..10,
        ) {
            let (max_target, _) = parse_target_hex("ffffffff").unwrap();
            let p = RetargetParams {
                max_target: max_target.clone(),
                ema_window_size: window,
                ema_spacing_target: spacing,
            };
            let mut ledger = BlockLedger::new();
            for hive in history {
                let h = ledger.height();
                let t = next_bee_hash_target(&ledger, h, &p);
                prop_assert!(t <= max_target);
                prop_assert!(!t.is_zero());
                ledger.append(t, hive && h > 0);
            }
        }
    }
}
