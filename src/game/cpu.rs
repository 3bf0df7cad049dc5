#![allow(dead_code)]
//! Scripted CPU opponent
//!
//! The CPU "finds" a pre-selected subset of the match words on a fixed
//! reveal schedule derived from its difficulty tier. The schedule is built
//! once at match start; during play it is polled once per second against
//! wall-clock elapsed time, revealing at most one word per poll so a
//! stalled clock catches up tick by tick instead of in a burst.

use super::Difficulty;
use rand::prelude::*;

/// A named CPU persona for a difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuProfile {
    pub name: &'static str,
    pub skill: &'static str,
    pub flavor: &'static str,
    /// How many words this CPU goes after in a match.
    pub word_target: usize,
    /// Seconds between successive reveals.
    pub reveal_interval_secs: u64,
}

const EASY: CpuProfile = CpuProfile {
    name: "WordBot",
    skill: "Beginner",
    flavor: "Just learning!",
    word_target: 5,
    reveal_interval_secs: 36,
};

const MEDIUM: CpuProfile = CpuProfile {
    name: "Lexi",
    skill: "Intermediate",
    flavor: "A worthy challenger.",
    word_target: 8,
    reveal_interval_secs: 22,
};

const HARD: CpuProfile = CpuProfile {
    name: "AlphaCPU",
    skill: "Expert",
    flavor: "Blitzes through words!",
    word_target: 11,
    reveal_interval_secs: 16,
};

/// The CPU persona for a difficulty tier.
pub fn profile(difficulty: Difficulty) -> &'static CpuProfile {
    match difficulty {
        Difficulty::Easy => &EASY,
        Difficulty::Medium => &MEDIUM,
        Difficulty::Hard => &HARD,
    }
}

/// A fixed reveal schedule over the match duration.
#[derive(Debug, Clone)]
pub struct CpuSchedule {
    words: Vec<String>,
    interval_secs: u64,
    next: usize,
}

impl CpuSchedule {
    /// Build the schedule for a match word list and difficulty.
    pub fn new(word_list: &[String], difficulty: Difficulty) -> Self {
        Self::with_rng(word_list, difficulty, &mut rand::rng())
    }

    /// Build the schedule using a specific RNG (for testing/seeding).
    ///
    /// Words are drawn uniformly without replacement until the tier's
    /// target count is reached or the list runs out.
    pub fn with_rng<R: Rng>(word_list: &[String], difficulty: Difficulty, rng: &mut R) -> Self {
        let prof = profile(difficulty);
        let mut pool: Vec<String> = word_list.to_vec();
        let mut words = Vec::with_capacity(prof.word_target.min(pool.len()));
        while words.len() < prof.word_target && !pool.is_empty() {
            let idx = rng.random_range(0..pool.len());
            words.push(pool.swap_remove(idx));
        }
        Self {
            words,
            interval_secs: prof.reveal_interval_secs,
            next: 0,
        }
    }

    /// When the k-th scheduled word (0-indexed) becomes visible.
    pub fn reveal_time_secs(&self, k: usize) -> u64 {
        self.interval_secs * (k as u64 + 1)
    }

    /// Poll the schedule against elapsed wall-clock seconds.
    ///
    /// Reveals at most one word per call; if several thresholds were
    /// crossed during a stall, the rest surface on subsequent polls.
    pub fn poll(&mut self, elapsed_secs: u64) -> Option<&str> {
        if self.next < self.words.len() && elapsed_secs >= self.reveal_time_secs(self.next) {
            let idx = self.next;
            self.next += 1;
            Some(self.words[idx].as_str())
        } else {
            None
        }
    }

    /// Every word this CPU will eventually reveal.
    pub fn planned_words(&self) -> &[String] {
        &self.words
    }

    /// Words revealed so far.
    pub fn revealed_count(&self) -> usize {
        self.next
    }

    /// True once every scheduled word has been revealed.
    pub fn is_done(&self) -> bool {
        self.next >= self.words.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn word_list(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("WORD{i:02}")).collect()
    }

    #[test]
    fn test_schedule_size_matches_tier_target() {
        let words = word_list(12);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(CpuSchedule::with_rng(&words, Difficulty::Easy, &mut rng).planned_words().len(), 5);
        assert_eq!(CpuSchedule::with_rng(&words, Difficulty::Medium, &mut rng).planned_words().len(), 8);
        assert_eq!(CpuSchedule::with_rng(&words, Difficulty::Hard, &mut rng).planned_words().len(), 11);
    }

    #[test]
    fn test_target_clamped_to_short_word_lists() {
        let words = word_list(4);
        let mut rng = StdRng::seed_from_u64(0);
        let schedule = CpuSchedule::with_rng(&words, Difficulty::Hard, &mut rng);
        assert_eq!(schedule.planned_words().len(), 4);
    }

    #[test]
    fn test_words_drawn_without_replacement() {
        let words = word_list(12);
        let mut rng = StdRng::seed_from_u64(5);
        let schedule = CpuSchedule::with_rng(&words, Difficulty::Hard, &mut rng);
        let mut planned = schedule.planned_words().to_vec();
        planned.sort();
        planned.dedup();
        assert_eq!(planned.len(), 11);
        for word in schedule.planned_words() {
            assert!(words.contains(word));
        }
    }

    #[test]
    fn test_reveal_thresholds_are_strictly_increasing() {
        let words = word_list(12);
        let schedule = CpuSchedule::new(&words, Difficulty::Medium);
        for k in 1..schedule.planned_words().len() {
            assert!(schedule.reveal_time_secs(k) > schedule.reveal_time_secs(k - 1));
        }
        assert_eq!(schedule.reveal_time_secs(0), 22);
    }

    #[test]
    fn test_nothing_revealed_before_first_threshold() {
        let words = word_list(12);
        let mut schedule = CpuSchedule::new(&words, Difficulty::Easy);
        for elapsed in 0..36 {
            assert_eq!(schedule.poll(elapsed), None);
        }
        assert!(schedule.poll(36).is_some());
    }

    #[test]
    fn test_at_most_one_reveal_per_poll() {
        let words = word_list(12);
        let mut schedule = CpuSchedule::new(&words, Difficulty::Hard);
        // A long stall crossed several thresholds; each poll still
        // surfaces exactly one word.
        assert!(schedule.poll(100).is_some());
        assert_eq!(schedule.revealed_count(), 1);
        assert!(schedule.poll(100).is_some());
        assert_eq!(schedule.revealed_count(), 2);
    }

    #[test]
    fn test_full_match_reveals_every_scheduled_word() {
        let words = word_list(12);
        let mut schedule = CpuSchedule::new(&words, Difficulty::Medium);
        let mut revealed = Vec::new();
        for elapsed in 0..=180 {
            if let Some(word) = schedule.poll(elapsed) {
                revealed.push(word.to_string());
            }
        }
        assert_eq!(revealed.len(), 8);
        assert!(schedule.is_done());
        assert_eq!(revealed, schedule.planned_words());
    }

    #[test]
    fn test_seeded_schedule_is_deterministic() {
        let words = word_list(12);
        let mut rng1 = StdRng::seed_from_u64(11);
        let mut rng2 = StdRng::seed_from_u64(11);
        let a = CpuSchedule::with_rng(&words, Difficulty::Medium, &mut rng1);
        let b = CpuSchedule::with_rng(&words, Difficulty::Medium, &mut rng2);
        assert_eq!(a.planned_words(), b.planned_words());
    }
}
