//! Score evaluation.
//!
//! Pure functions from a set of dice to the score each category would earn, together with the
//! positions of the dice that earn it.

use itertools::Itertools;

use super::{Category, DiceSet, ScoreCard, ScoreEntry, NUM_DICE};

/// Evaluates `category` against `dice` using the normal pattern rules.
pub fn evaluate(category: Category, dice: &DiceSet, rolls_used: u8) -> ScoreEntry {
    let all = || (0..NUM_DICE).collect::<Vec<_>>();
    let fixed = category.fixed_score().unwrap_or_default();
    let hit = match category {
        Category::Ones
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => {
            let face = category.face().unwrap_or_default();
            let positions = dice.positions(face);
            Some((count_score(face, positions.len()), positions))
        }
        Category::ThreeOfKind => of_a_kind(dice, 3),
        Category::FourOfKind => of_a_kind(dice, 4),
        Category::FullHouse => is_full_house(dice).then(|| (fixed, grouped_by_face(dice))),
        Category::SmallStraight => small_straight(dice).map(|run| (fixed, run)),
        Category::LargeStraight => large_straight(dice).map(|run| (fixed, run)),
        Category::Yahtzee => dice.is_five_of_a_kind().then(|| (fixed, all())),
        Category::Chance => Some((dice.sum(), all())),
    };
    match hit {
        Some((score, contributing)) => ScoreEntry::new(score, contributing, dice, rolls_used),
        None => ScoreEntry::missed(rolls_used),
    }
}

/// Returns true if `dice` may be played as a Joker against `committed`.
///
/// That is the case when Yahtzee has already been scored for 50, the dice are five of a kind,
/// and the upper category for that face is already filled.
pub fn is_joker(dice: &DiceSet, committed: &ScoreCard) -> bool {
    committed.has_yahtzee()
        && dice.is_five_of_a_kind()
        && Category::for_face(dice.sorted()[0]).is_some_and(|c| committed.is_scored(c))
}

/// Evaluates a lower-section category for a Joker roll, at its full value.
fn evaluate_joker(category: Category, dice: &DiceSet, rolls_used: u8) -> ScoreEntry {
    match category {
        Category::ThreeOfKind | Category::FourOfKind | Category::Chance => {
            ScoreEntry::new(dice.sum(), (0..NUM_DICE).collect(), dice, rolls_used)
        }
        Category::FullHouse => {
            ScoreEntry::new(25, (0..NUM_DICE).collect(), dice, rolls_used)
        }
        Category::SmallStraight => {
            ScoreEntry::new(30, (0..NUM_DICE - 1).collect(), dice, rolls_used)
        }
        Category::LargeStraight => {
            ScoreEntry::new(40, (0..NUM_DICE).collect(), dice, rolls_used)
        }
        _ => evaluate(category, dice, rolls_used),
    }
}

/// Computes the theoretical scorecard: every category still open on `committed`, evaluated
/// against `dice`. Categories already scored are left unevaluated.
pub fn theoretical_scorecard(dice: &DiceSet, committed: &ScoreCard, rolls_used: u8) -> ScoreCard {
    let joker = is_joker(dice, committed);
    let mut card = ScoreCard::default();
    for category in committed.open_categories() {
        let entry = if joker {
            evaluate_joker(category, dice, rolls_used)
        } else {
            evaluate(category, dice, rolls_used)
        };
        card.set(category, entry);
    }
    card
}

fn count_score(face: u8, count: usize) -> u16 {
    u16::from(face) * count as u16
}

/// At most one face can reach three of a kind among five dice.
fn of_a_kind(dice: &DiceSet, n: usize) -> Option<(u16, Vec<usize>)> {
    (1..=6)
        .map(|face| (face, dice.positions(face)))
        .find(|(_, positions)| positions.len() >= n)
        .map(|(face, positions)| (count_score(face, positions.len()), positions))
}

fn is_full_house(dice: &DiceSet) -> bool {
    let s = dice.sorted();
    ((s[0] == s[1] && s[2] == s[4]) || (s[0] == s[2] && s[3] == s[4])) && s[0] != s[4]
}

/// All positions, grouped by increasing face.
fn grouped_by_face(dice: &DiceSet) -> Vec<usize> {
    (1..=6).flat_map(|face| dice.positions(face)).collect()
}

fn is_consecutive(values: &[u8]) -> bool {
    values.iter().tuple_windows().all(|(a, b)| *b == a + 1)
}

/// Maps each value back to the first die showing it.
fn first_positions(dice: &DiceSet, values: &[u8]) -> Vec<usize> {
    values
        .iter()
        .filter_map(|&v| dice.first_position(v))
        .collect()
}

/// Finds four consecutive distinct values. When two runs exist, the higher one is reported.
fn small_straight(dice: &DiceSet) -> Option<Vec<usize>> {
    let distinct: Vec<u8> = dice.sorted().iter().copied().dedup().collect();
    let offsets: &[usize] = match distinct.len() {
        5 => &[1, 0],
        4 => &[0],
        _ => return None,
    };
    offsets
        .iter()
        .map(|&o| &distinct[o..o + 4])
        .find(|run| is_consecutive(run))
        .map(|run| first_positions(dice, run))
}

fn large_straight(dice: &DiceSet) -> Option<Vec<usize>> {
    let sorted = dice.sorted();
    is_consecutive(sorted).then(|| first_positions(dice, sorted))
}
