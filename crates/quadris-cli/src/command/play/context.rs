use std::{cell::RefCell, rc::Rc, time::Duration};

use quadris_engine::{GameSession, PieceSeed};

use crate::result::SessionResult;

pub(crate) type SharedContext = Rc<RefCell<PlayContext>>;

/// State shared by every screen of a run.
#[derive(Debug)]
pub(crate) struct PlayContext {
    frame_rate: f64,
    seed: Option<PieceSeed>,
    results: Vec<SessionResult>,
}

impl PlayContext {
    pub(crate) fn shared(frame_rate: f64, seed: Option<PieceSeed>) -> SharedContext {
        Rc::new(RefCell::new(Self {
            frame_rate,
            seed,
            results: vec![],
        }))
    }

    pub(crate) fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    /// Starts a game with the fixed seed, or a random one if none was given.
    pub(crate) fn new_session(&self) -> GameSession {
        self.seed.map_or_else(GameSession::new, GameSession::with_seed)
    }

    /// Records a finished or abandoned game. Games without any locked piece are
    /// not recorded.
    pub(crate) fn record(&mut self, session: &GameSession, play_time: Duration) {
        if session.stats().completed_pieces() == 0 {
            return;
        }
        self.results
            .push(SessionResult::from_session(session, play_time));
    }

    pub(crate) fn best_score(&self) -> Option<usize> {
        self.results.iter().map(|r| r.final_stats.score()).max()
    }

    pub(crate) fn games_played(&self) -> usize {
        self.results.len()
    }

    pub(crate) fn take_results(&mut self) -> Vec<SessionResult> {
        std::mem::take(&mut self.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([5; 16]);

    #[test]
    fn test_fixed_seed_repeats_games() {
        let context = PlayContext::shared(60.0, Some(SEED));
        let a = context.borrow().new_session();
        let b = context.borrow().new_session();
        assert_eq!(a.seed(), SEED);
        assert_eq!(a.current_piece(), b.current_piece());
    }

    #[test]
    fn test_record_skips_empty_games() {
        let context = PlayContext::shared(60.0, Some(SEED));
        let mut session = context.borrow().new_session();
        context.borrow_mut().record(&session, Duration::ZERO);
        assert_eq!(context.borrow().games_played(), 0);
        assert_eq!(context.borrow().best_score(), None);

        session.hard_drop().unwrap();
        context.borrow_mut().record(&session, Duration::from_secs(1));
        assert_eq!(context.borrow().games_played(), 1);
        assert_eq!(context.borrow().best_score(), Some(0));

        let results = context.borrow_mut().take_results();
        assert_eq!(results.len(), 1);
        assert!(!results[0].topped_out);
        assert_eq!(context.borrow().games_played(), 0);
    }
}
