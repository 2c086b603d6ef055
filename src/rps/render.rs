//! Text rendering of a participant's view

use super::RpsView;
use crate::Outcome;

/// Describe a turn from the receiving participant's perspective.
///
/// Validity is checked before anything else is read.
pub fn render_view(view: &RpsView) -> Vec<String> {
    let validity = view.validity();
    if !validity.overall() {
        let line = if validity.personal() {
            "You made an invalid move"
        } else {
            "An opponent made an invalid move"
        };
        return vec![line.to_string()];
    }

    let mut lines = Vec::with_capacity(3);
    if let Some(action) = view.action() {
        lines.push(format!("You played {}", action.repr.personal));
        let label = if action.repr.opponents.len() == 1 {
            "Opponent"
        } else {
            "Opponents"
        };
        lines.push(format!(
            "{label} played {}",
            action.repr.opponents.join(", ")
        ));
    }

    if let Some(utilities) = view.utilities() {
        let verdict = if utilities.personal > 0.0 {
            "You win!"
        } else if utilities.personal == 0.0 {
            "It's a tie!"
        } else {
            "You lose!"
        };
        lines.push(verdict.to_string());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        outcome::{EngineOutcome, PerPlayer},
        ports::RulesEngine,
        rps::{Move, RpsEngine, RpsOutcome},
        types::PlayerId,
    };

    fn resolve(moves: &[Move]) -> RpsOutcome {
        let engine = RpsEngine::new(moves.len()).unwrap();
        let state = engine.initial_state();
        let action = engine.action(&PerPlayer::new(moves.to_vec()));
        let processed = engine.process_action(&state, &action).unwrap();
        EngineOutcome::valid(engine.participants(), action, processed).unwrap()
    }

    #[test]
    fn test_two_player_lines() {
        let outcome = resolve(&[Move::Rock, Move::Scissors]);

        let winner = render_view(&outcome.personalize(PlayerId::new(0)).unwrap());
        assert_eq!(
            winner,
            vec!["You played Rock", "Opponent played Scissors", "You win!"]
        );

        let loser = render_view(&outcome.personalize(PlayerId::new(1)).unwrap());
        assert_eq!(
            loser,
            vec!["You played Scissors", "Opponent played Rock", "You lose!"]
        );
    }

    #[test]
    fn test_multi_player_tie() {
        let outcome = resolve(&[Move::Rock, Move::Paper, Move::Scissors]);
        let lines = render_view(&outcome.personalize(PlayerId::new(1)).unwrap());
        assert_eq!(
            lines,
            vec![
                "You played Paper",
                "Opponents played Rock, Scissors",
                "It's a tie!"
            ]
        );
    }

    #[test]
    fn test_invalid_turn_lines() {
        let engine = RpsEngine::new(3).unwrap();
        let outcome: RpsOutcome =
            EngineOutcome::invalid(engine.participants(), [PlayerId::new(2)]).unwrap();

        let own = render_view(&outcome.personalize(PlayerId::new(2)).unwrap());
        assert_eq!(own, vec!["You made an invalid move"]);

        let other = render_view(&outcome.personalize(PlayerId::new(0)).unwrap());
        assert_eq!(other, vec!["An opponent made an invalid move"]);
    }
}
