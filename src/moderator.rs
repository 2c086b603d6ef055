//! Reference turn orchestrator
//!
//! The moderator collects one move from every participant, lets the rules
//! engine resolve them, builds the turn's [`EngineOutcome`], and only then
//! fans out one personalized view per participant.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    outcome::{EngineOutcome, Outcome, PerPlayer, Personalize},
    ports::{EngineOutcomeOf, Participant, RulesEngine, TurnObserver},
};

/// Summary of a finished (or interrupted) match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary<S> {
    /// Turns played
    pub turns: usize,
    /// Turns that resolved as invalid
    pub invalid_turns: usize,
    /// State after the last valid turn
    pub final_state: S,
}

/// Drives a match between participants under one rules engine.
///
/// The moderator is the only owner of the objective outcome. It keeps the
/// last one for inspection and never lends it to participants.
pub struct Moderator<E: RulesEngine> {
    engine: E,
    participants: Vec<Box<dyn Participant<E>>>,
    observers: Vec<Box<dyn TurnObserver<E>>>,
    state: E::State,
    turn: usize,
    invalid_turns: usize,
    started: bool,
    last_outcome: Option<EngineOutcomeOf<E>>,
}

impl<E: RulesEngine> Moderator<E> {
    /// Create a moderator; `participants[i]` plays as participant `i`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the number of participants differs
    /// from what the engine expects.
    pub fn new(engine: E, participants: Vec<Box<dyn Participant<E>>>) -> Result<Self> {
        let expected = engine.participants().get();
        if participants.len() != expected {
            return Err(Error::ShapeMismatch {
                field: "participants".to_string(),
                expected,
                got: participants.len(),
            });
        }

        let state = engine.initial_state();
        Ok(Self {
            engine,
            participants,
            observers: Vec::new(),
            state,
            turn: 0,
            invalid_turns: 0,
            started: false,
            last_outcome: None,
        })
    }

    /// Attach an observer.
    pub fn with_observer(mut self, observer: impl TurnObserver<E> + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Attach an already boxed observer.
    pub fn add_observer(&mut self, observer: Box<dyn TurnObserver<E>>) {
        self.observers.push(observer);
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Current shared state.
    pub fn state(&self) -> &E::State {
        &self.state
    }

    /// Number of turns resolved so far.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Objective outcome of the most recent turn.
    pub fn last_outcome(&self) -> Option<&EngineOutcomeOf<E>> {
        self.last_outcome.as_ref()
    }

    /// Participant names in participant order.
    pub fn participant_names(&self) -> Vec<String> {
        self.participants
            .iter()
            .map(|participant| participant.name().to_string())
            .collect()
    }

    /// Number of turns that resolved as invalid.
    pub fn invalid_turns(&self) -> usize {
        self.invalid_turns
    }

    /// Notify participants and observers that the match begins.
    ///
    /// Called implicitly by the first [`Moderator::run_turn`].
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;

        let count = self.engine.participants();
        for observer in &mut self.observers {
            observer.on_match_start(count)?;
        }
        for (player, participant) in count.players().zip(self.participants.iter_mut()) {
            let view = self.state.personalize(player)?;
            participant.on_game_start(player, &view);
        }
        Ok(())
    }

    /// Play one turn and return its objective outcome.
    ///
    /// Every move is collected before anything is resolved, and no view is
    /// built before the objective outcome is complete. The turn is committed
    /// (state adopted, counters advanced, outcome retained) before observers
    /// run, and every observer has seen every view before any participant
    /// receives one. An observer error therefore leaves a recorded turn whose
    /// views were delivered to nobody.
    pub fn run_turn(&mut self) -> Result<&EngineOutcomeOf<E>> {
        self.start()?;

        let count = self.engine.participants();
        let turn = self.turn;

        let mut moves = Vec::with_capacity(count.get());
        for (player, participant) in count.players().zip(self.participants.iter_mut()) {
            let view = self.state.personalize(player)?;
            moves.push(participant.choose_move(player, &view));
        }
        let moves = PerPlayer::with_participants(moves, count)?;

        let at_fault = self.engine.validate(&self.state, &moves);
        let outcome = if at_fault.is_empty() {
            let action = self.engine.action(&moves);
            let processed = self.engine.process_action(&self.state, &action)?;
            EngineOutcome::valid(count, action, processed)?
        } else {
            EngineOutcome::invalid(count, at_fault)?
        };
        let views = outcome.personalize_all()?;

        match outcome.state() {
            Some(state) => self.state = state.clone(),
            None => self.invalid_turns += 1,
        }
        self.turn += 1;
        let outcome = &*self.last_outcome.insert(outcome);

        for observer in &mut self.observers {
            observer.on_turn_resolved(turn, outcome)?;
        }
        for (player, view) in count.players().zip(&views) {
            for observer in &mut self.observers {
                observer.on_view_delivered(turn, player, view)?;
            }
        }
        for (participant, view) in self.participants.iter_mut().zip(views) {
            participant.on_outcome(view);
        }

        Ok(outcome)
    }

    /// Play until the engine reports a terminal state or `max_turns` more
    /// turns have been played, then close the match.
    ///
    /// The match is closed even when a turn fails; the first error is returned.
    pub fn run(&mut self, max_turns: usize) -> Result<MatchSummary<E::State>> {
        let played = self.play(max_turns);
        let closed = self.finish();
        played?;
        closed?;

        Ok(MatchSummary {
            turns: self.turn,
            invalid_turns: self.invalid_turns,
            final_state: self.state.clone(),
        })
    }

    fn play(&mut self, max_turns: usize) -> Result<()> {
        self.start()?;
        for _ in 0..max_turns {
            if self.engine.is_terminal(&self.state) {
                break;
            }
            self.run_turn()?;
        }
        Ok(())
    }

    /// Notify everyone the match is over, reaching every observer even if one fails.
    fn finish(&mut self) -> Result<()> {
        let count = self.engine.participants();
        for (player, participant) in count.players().zip(self.participants.iter_mut()) {
            if let Ok(view) = self.state.personalize(player) {
                participant.on_game_end(&view);
            }
        }

        let mut first_error = None;
        for observer in &mut self.observers {
            if let Err(error) = observer.on_match_end(self.turn) {
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::BTreeSet, rc::Rc};

    use super::*;
    use crate::{
        outcome::{Fault, ProcessedActionOutcome},
        ports::PlayerOutcomeOf,
        types::{PlayerCount, PlayerId},
    };

    /// Highest bid wins; bids above the cap are illegal. State counts valid turns.
    struct HighBid {
        players: PlayerCount,
        cap: u32,
        turns: u32,
        /// Blamed for illegal bids instead of the bidder, when set
        blame: Option<PlayerId>,
    }

    impl RulesEngine for HighBid {
        type Move = u32;
        type Action = PerPlayer<u32>;
        type State = u32;
        type Delta = ();

        fn participants(&self) -> PlayerCount {
            self.players
        }

        fn initial_state(&self) -> u32 {
            0
        }

        fn validate(&self, _state: &u32, moves: &PerPlayer<u32>) -> BTreeSet<PlayerId> {
            moves
                .enumerate()
                .filter(|(_, bid)| **bid > self.cap)
                .map(|(player, _)| self.blame.unwrap_or(player))
                .collect()
        }

        fn action(&self, moves: &PerPlayer<u32>) -> PerPlayer<u32> {
            moves.clone()
        }

        fn process_action(
            &self,
            state: &u32,
            action: &PerPlayer<u32>,
        ) -> Result<ProcessedActionOutcome<u32>> {
            let best = action.iter().copied().max().unwrap_or(0);
            let utilities = action
                .iter()
                .map(|bid| if *bid == best { 1.0 } else { 0.0 })
                .collect();
            Ok(ProcessedActionOutcome::new(utilities, state + 1))
        }

        fn is_terminal(&self, state: &u32) -> bool {
            *state >= self.turns
        }
    }

    type Inbox = Rc<RefCell<Vec<PlayerOutcomeOf<HighBid>>>>;

    struct Bidder {
        bids: Vec<u32>,
        inbox: Inbox,
    }

    impl Participant<HighBid> for Bidder {
        fn name(&self) -> &str {
            "bidder"
        }

        fn choose_move(&mut self, _player: PlayerId, state: &u32) -> u32 {
            self.bids[*state as usize % self.bids.len()]
        }

        fn on_outcome(&mut self, outcome: PlayerOutcomeOf<HighBid>) {
            self.inbox.borrow_mut().push(outcome);
        }
    }

    fn setup(bids: [Vec<u32>; 2]) -> (Moderator<HighBid>, [Inbox; 2]) {
        setup_blaming(bids, None)
    }

    fn setup_blaming(
        bids: [Vec<u32>; 2],
        blame: Option<PlayerId>,
    ) -> (Moderator<HighBid>, [Inbox; 2]) {
        let engine = HighBid {
            players: PlayerCount::new(2).unwrap(),
            cap: 10,
            turns: 3,
            blame,
        };
        let inboxes: [Inbox; 2] = Default::default();
        let participants: Vec<Box<dyn Participant<HighBid>>> = bids
            .into_iter()
            .zip(inboxes.iter())
            .map(|(bids, inbox)| {
                Box::new(Bidder {
                    bids,
                    inbox: Rc::clone(inbox),
                }) as Box<dyn Participant<HighBid>>
            })
            .collect();
        (Moderator::new(engine, participants).unwrap(), inboxes)
    }

    #[test]
    fn test_each_participant_gets_own_view() {
        let (mut moderator, inboxes) = setup([vec![5], vec![3]]);
        moderator.run_turn().unwrap();

        let first = &inboxes[0].borrow()[0];
        assert_eq!(first.player(), PlayerId::new(0));
        assert_eq!(first.utilities().unwrap().personal, 1.0);
        assert_eq!(first.action().unwrap().opponents, vec![3]);

        let second = &inboxes[1].borrow()[0];
        assert_eq!(second.utilities().unwrap().personal, 0.0);
        assert_eq!(second.action().unwrap().personal, 3);
        assert_eq!(moderator.state(), &1);
    }

    #[test]
    fn test_invalid_turn_keeps_state_and_assigns_fault() {
        let (mut moderator, inboxes) = setup([vec![50], vec![3]]);
        let outcome = moderator.run_turn().unwrap();
        assert!(!outcome.is_valid());
        assert!(outcome.validity().is_at_fault(PlayerId::new(0)));

        assert_eq!(moderator.state(), &0);
        assert_eq!(inboxes[0].borrow()[0].validity().fault(), Fault::Own);
        assert_eq!(inboxes[1].borrow()[0].validity().fault(), Fault::Others);
    }

    #[test]
    fn test_run_stops_at_terminal_state() {
        let (mut moderator, inboxes) = setup([vec![1, 2], vec![2, 1]]);
        let summary = moderator.run(10).unwrap();
        assert_eq!(summary.turns, 3);
        assert_eq!(summary.invalid_turns, 0);
        assert_eq!(summary.final_state, 3);
        assert_eq!(inboxes[1].borrow().len(), 3);
    }

    #[test]
    fn test_participant_count_must_match_engine() {
        let engine = HighBid {
            players: PlayerCount::new(3).unwrap(),
            cap: 10,
            turns: 1,
            blame: None,
        };
        let result = Moderator::new(engine, Vec::new());
        assert!(matches!(
            result,
            Err(Error::ShapeMismatch {
                expected: 3,
                got: 0,
                ..
            })
        ));
    }

    /// Fails on one participant's view; records whether the match was closed.
    struct FailOnView {
        fail_for: PlayerId,
        closed: Rc<RefCell<bool>>,
    }

    impl TurnObserver<HighBid> for FailOnView {
        fn on_view_delivered(
            &mut self,
            _turn: usize,
            player: PlayerId,
            _view: &PlayerOutcomeOf<HighBid>,
        ) -> Result<()> {
            if player == self.fail_for {
                return Err(Error::InvalidConfiguration {
                    message: "transcript sink closed".to_string(),
                });
            }
            Ok(())
        }

        fn on_match_end(&mut self, _turns: usize) -> Result<()> {
            *self.closed.borrow_mut() = true;
            Ok(())
        }
    }

    #[test]
    fn test_observer_failure_commits_turn_and_withholds_views() {
        let (moderator, inboxes) = setup([vec![5], vec![3]]);
        let closed = Rc::new(RefCell::new(false));
        let mut moderator = moderator.with_observer(FailOnView {
            fail_for: PlayerId::new(1),
            closed: Rc::clone(&closed),
        });

        assert!(moderator.run_turn().is_err());
        assert_eq!(moderator.turn(), 1);
        assert_eq!(moderator.state(), &1);
        assert!(moderator.last_outcome().is_some());
        assert!(inboxes[0].borrow().is_empty());
        assert!(inboxes[1].borrow().is_empty());

        assert!(moderator.run(5).is_err());
        assert!(*closed.borrow());
    }

    #[test]
    fn test_unknown_culprit_is_not_counted_as_invalid_turn() {
        let (mut moderator, inboxes) = setup_blaming([vec![50], vec![3]], Some(PlayerId::new(7)));
        assert!(matches!(
            moderator.run_turn(),
            Err(Error::PlayerOutOfRange { player: 7, .. })
        ));
        assert_eq!(moderator.invalid_turns(), 0);
        assert_eq!(moderator.turn(), 0);
        assert!(moderator.last_outcome().is_none());
        assert!(inboxes[0].borrow().is_empty());
    }
}
