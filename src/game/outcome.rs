//! Match outcomes and XP awards

use super::Difficulty;

/// Result of a match from one player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    /// Compare final scores. An exact tie is a draw; there is no
    /// secondary tie-break.
    pub fn from_scores(mine: u32, theirs: u32) -> Self {
        match mine.cmp(&theirs) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Equal => Outcome::Draw,
            std::cmp::Ordering::Less => Outcome::Loss,
        }
    }

    /// Summary-screen heading.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Win => "Victory!",
            Outcome::Draw => "Draw",
            Outcome::Loss => "Defeat",
        }
    }
}

/// XP awarded for a CPU match, by outcome and difficulty.
pub fn cpu_match_xp(outcome: Outcome, difficulty: Difficulty) -> u32 {
    match (outcome, difficulty) {
        (Outcome::Win, Difficulty::Easy) => 50,
        (Outcome::Win, Difficulty::Medium) => 100,
        (Outcome::Win, Difficulty::Hard) => 200,
        (Outcome::Draw, Difficulty::Easy) => 15,
        (Outcome::Draw, Difficulty::Medium) => 20,
        (Outcome::Draw, Difficulty::Hard) => 30,
        (Outcome::Loss, Difficulty::Easy) => 2,
        (Outcome::Loss, Difficulty::Medium) => 5,
        (Outcome::Loss, Difficulty::Hard) => 10,
    }
}

/// XP awarded for an online match, difficulty-independent.
pub fn online_match_xp(outcome: Outcome) -> u32 {
    match outcome {
        Outcome::Win => 100,
        Outcome::Draw => 20,
        Outcome::Loss => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_scores_draw() {
        assert_eq!(Outcome::from_scores(10, 10), Outcome::Draw);
        assert_eq!(Outcome::from_scores(0, 0), Outcome::Draw);
    }

    #[test]
    fn test_higher_score_wins() {
        assert_eq!(Outcome::from_scores(15, 10), Outcome::Win);
        assert_eq!(Outcome::from_scores(10, 15), Outcome::Loss);
    }

    #[test]
    fn test_cpu_xp_table() {
        assert_eq!(cpu_match_xp(Outcome::Win, Difficulty::Hard), 200);
        assert_eq!(cpu_match_xp(Outcome::Win, Difficulty::Easy), 50);
        assert_eq!(cpu_match_xp(Outcome::Draw, Difficulty::Medium), 20);
        assert_eq!(cpu_match_xp(Outcome::Loss, Difficulty::Easy), 2);
        assert_eq!(cpu_match_xp(Outcome::Loss, Difficulty::Hard), 10);
    }

    #[test]
    fn test_online_xp_table() {
        assert_eq!(online_match_xp(Outcome::Win), 100);
        assert_eq!(online_match_xp(Outcome::Draw), 20);
        assert_eq!(online_match_xp(Outcome::Loss), 5);
    }
}
