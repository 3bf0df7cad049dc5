#![allow(dead_code)]
//! Player progression: XP level curve and rank lookup tables
//!
//! The level curve is a fixed ascending threshold table; level and
//! intra-level progress are pure functions of cumulative XP, shared by
//! the award path and every progress display. Rank names come from two
//! independent lookup schemes: one keyed on raw Elo, one keyed on
//! leaderboard percentile.

/// XP required to clear each level, levels 1-50.
pub const XP_TABLE: [u32; 49] = [
    300, 400, 500, 600, 700, 800, 900, 1000, 1100, 1200, 1300, 1400, 1500, 1600, 1700, 1800,
    1900, 2000, 2100, 2200, 2300, 2400, 2500, 2600, 2700, 2800, 2900, 3000, 3100, 3200, 3300,
    3400, 3500, 3600, 3700, 3800, 3900, 4000, 4100, 4200, 4300, 4400, 4500, 4600, 4700, 4800,
    4900, 5000, 5100,
];

/// Level plus progress toward the next one, derived from cumulative XP.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelInfo {
    /// Current level, starting at 1.
    pub level: u32,
    /// XP earned within the current level.
    pub xp_this_level: u32,
    /// XP needed to clear the current level; None at the table's end.
    pub xp_for_next: Option<u32>,
    /// Fraction of the current level cleared, in [0, 1]. 1.0 at max level.
    pub progress: f64,
}

/// Compute level info from cumulative XP. Pure and deterministic.
pub fn level_info(total_xp: u32) -> LevelInfo {
    let mut level = 1u32;
    let mut xp_sum = 0u32;
    let mut xp_for_next = None;
    for (i, &threshold) in XP_TABLE.iter().enumerate() {
        if total_xp < xp_sum + threshold {
            xp_for_next = Some(threshold);
            break;
        }
        xp_sum += threshold;
        level = i as u32 + 2;
    }
    let xp_this_level = total_xp - xp_sum;
    let progress = match xp_for_next {
        Some(threshold) => f64::from(xp_this_level) / f64::from(threshold),
        None => 1.0,
    };
    LevelInfo {
        level,
        xp_this_level,
        xp_for_next,
        progress,
    }
}

/// Level alone, for the persisted profile column.
pub fn level_for_xp(total_xp: u32) -> u32 {
    level_info(total_xp).level
}

struct EloRank {
    tier: &'static str,
    sub: &'static str,
    min: i64,
}

// Ascending minimum-Elo thresholds; the highest qualifying entry wins.
const ELO_RANKS: [EloRank; 30] = [
    EloRank { tier: "Iron", sub: "III", min: 0 },
    EloRank { tier: "Iron", sub: "II", min: 80 },
    EloRank { tier: "Iron", sub: "I", min: 160 },
    EloRank { tier: "Bronze", sub: "III", min: 240 },
    EloRank { tier: "Bronze", sub: "II", min: 320 },
    EloRank { tier: "Bronze", sub: "I", min: 400 },
    EloRank { tier: "Silver", sub: "III", min: 480 },
    EloRank { tier: "Silver", sub: "II", min: 560 },
    EloRank { tier: "Silver", sub: "I", min: 640 },
    EloRank { tier: "Gold", sub: "III", min: 720 },
    EloRank { tier: "Gold", sub: "II", min: 800 },
    EloRank { tier: "Gold", sub: "I", min: 880 },
    EloRank { tier: "Platinum", sub: "III", min: 960 },
    EloRank { tier: "Platinum", sub: "II", min: 1040 },
    EloRank { tier: "Platinum", sub: "I", min: 1120 },
    EloRank { tier: "Sapphire", sub: "III", min: 1200 },
    EloRank { tier: "Sapphire", sub: "II", min: 1280 },
    EloRank { tier: "Sapphire", sub: "I", min: 1360 },
    EloRank { tier: "Emerald", sub: "III", min: 1440 },
    EloRank { tier: "Emerald", sub: "II", min: 1520 },
    EloRank { tier: "Emerald", sub: "I", min: 1600 },
    EloRank { tier: "Ruby", sub: "III", min: 1680 },
    EloRank { tier: "Ruby", sub: "II", min: 1760 },
    EloRank { tier: "Ruby", sub: "I", min: 1840 },
    EloRank { tier: "Onyx", sub: "III", min: 1920 },
    EloRank { tier: "Onyx", sub: "II", min: 2000 },
    EloRank { tier: "Onyx", sub: "I", min: 2080 },
    EloRank { tier: "Diamond", sub: "III", min: 2160 },
    EloRank { tier: "Diamond", sub: "II", min: 2240 },
    EloRank { tier: "Diamond", sub: "I", min: 2320 },
];

/// Map a raw Elo rating to its display rank.
pub fn elo_rank(elo: i64) -> String {
    for rank in ELO_RANKS.iter().rev() {
        if elo >= rank.min {
            return format!("{} {}", rank.tier, rank.sub);
        }
    }
    "Iron III".to_string()
}

struct PercentileRank {
    tier: &'static str,
    sub: &'static str,
    min: f64,
}

// Descending minimum-percentile thresholds; the first qualifying entry
// wins (highest threshold first).
const PERCENTILE_RANKS: [PercentileRank; 28] = [
    PercentileRank { tier: "Diamond", sub: "I", min: 99.95 },
    PercentileRank { tier: "Diamond", sub: "II", min: 99.85 },
    PercentileRank { tier: "Diamond", sub: "III", min: 99.7 },
    PercentileRank { tier: "Onyx", sub: "", min: 99.3 },
    PercentileRank { tier: "Ruby", sub: "I", min: 99.0 },
    PercentileRank { tier: "Ruby", sub: "II", min: 98.5 },
    PercentileRank { tier: "Ruby", sub: "III", min: 98.0 },
    PercentileRank { tier: "Emerald", sub: "I", min: 97.0 },
    PercentileRank { tier: "Emerald", sub: "II", min: 95.5 },
    PercentileRank { tier: "Emerald", sub: "III", min: 94.0 },
    PercentileRank { tier: "Sapphire", sub: "I", min: 92.0 },
    PercentileRank { tier: "Sapphire", sub: "II", min: 88.0 },
    PercentileRank { tier: "Sapphire", sub: "III", min: 84.0 },
    PercentileRank { tier: "Platinum", sub: "I", min: 76.0 },
    PercentileRank { tier: "Platinum", sub: "II", min: 68.0 },
    PercentileRank { tier: "Platinum", sub: "III", min: 60.0 },
    PercentileRank { tier: "Gold", sub: "I", min: 52.0 },
    PercentileRank { tier: "Gold", sub: "II", min: 44.0 },
    PercentileRank { tier: "Gold", sub: "III", min: 36.0 },
    PercentileRank { tier: "Silver", sub: "I", min: 36.0 },
    PercentileRank { tier: "Silver", sub: "II", min: 30.0 },
    PercentileRank { tier: "Silver", sub: "III", min: 24.0 },
    PercentileRank { tier: "Bronze", sub: "I", min: 18.0 },
    PercentileRank { tier: "Bronze", sub: "II", min: 14.0 },
    PercentileRank { tier: "Bronze", sub: "III", min: 10.0 },
    PercentileRank { tier: "Iron", sub: "I", min: 6.0 },
    PercentileRank { tier: "Iron", sub: "II", min: 2.0 },
    PercentileRank { tier: "Iron", sub: "III", min: 0.0 },
];

/// Map a leaderboard percentile (100 = top) to its display rank.
pub fn percentile_rank(percentile: f64) -> String {
    for rank in PERCENTILE_RANKS.iter() {
        if percentile >= rank.min {
            return format!("{} {}", rank.tier, rank.sub).trim_end().to_string();
        }
    }
    "Iron III".to_string()
}

/// Percentile of a leaderboard position (0 = top). A single-entry board
/// puts its only player at the top.
pub fn percentile_of(position: usize, total: usize) -> f64 {
    if total <= 1 {
        return 100.0;
    }
    100.0 * (1.0 - position as f64 / (total - 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_xp_is_level_one() {
        let info = level_info(0);
        assert_eq!(info.level, 1);
        assert_eq!(info.xp_this_level, 0);
        assert_eq!(info.xp_for_next, Some(300));
        assert_eq!(info.progress, 0.0);
    }

    #[test]
    fn test_first_threshold_exactly_reaches_level_two() {
        let info = level_info(300);
        assert_eq!(info.level, 2);
        assert_eq!(info.xp_this_level, 0);
        assert_eq!(info.xp_for_next, Some(400));
    }

    #[test]
    fn test_one_below_first_threshold_stays_level_one() {
        let info = level_info(299);
        assert_eq!(info.level, 1);
        assert_eq!(info.xp_this_level, 299);
    }

    #[test]
    fn test_progress_is_a_clean_fraction() {
        let info = level_info(150);
        assert!((info.progress - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_max_level_reports_full_progress_and_no_next_threshold() {
        let total: u32 = XP_TABLE.iter().sum();
        let info = level_info(total + 1000);
        assert_eq!(info.level, 50);
        assert_eq!(info.xp_for_next, None);
        assert_eq!(info.progress, 1.0);
    }

    #[test]
    fn test_level_is_monotonic_in_xp() {
        let mut last = 0;
        for xp in (0..150_000).step_by(97) {
            let level = level_for_xp(xp);
            assert!(level >= last);
            last = level;
        }
    }

    #[test]
    fn test_elo_rank_boundaries() {
        assert_eq!(elo_rank(0), "Iron III");
        assert_eq!(elo_rank(79), "Iron III");
        assert_eq!(elo_rank(80), "Iron II");
        assert_eq!(elo_rank(1000), "Platinum III");
        assert_eq!(elo_rank(2320), "Diamond I");
        assert_eq!(elo_rank(9999), "Diamond I");
    }

    #[test]
    fn test_elo_rank_below_every_threshold_defaults_to_lowest() {
        assert_eq!(elo_rank(-50), "Iron III");
    }

    #[test]
    fn test_percentile_rank_boundaries() {
        assert_eq!(percentile_rank(100.0), "Diamond I");
        assert_eq!(percentile_rank(99.5), "Onyx");
        assert_eq!(percentile_rank(50.0), "Gold II");
        assert_eq!(percentile_rank(0.0), "Iron III");
    }

    #[test]
    fn test_percentile_of_positions() {
        assert_eq!(percentile_of(0, 5), 100.0);
        assert_eq!(percentile_of(4, 5), 0.0);
        assert_eq!(percentile_of(0, 1), 100.0);
        assert!((percentile_of(1, 5) - 75.0).abs() < 1e-9);
    }
}
