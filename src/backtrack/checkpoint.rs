//! Checkpoints recorded before each fired transition.

use std::collections::VecDeque;

/// Everything needed to return to the moment before a transition fired.
#[derive(Clone, Debug, PartialEq)]
pub struct Checkpoint<M, K> {
    /// Index of the source state.
    pub state: usize,

    /// Context mark taken after the source state's action ran.
    pub mark: M,

    /// Index of the transition that was taken.
    pub taken: usize,

    /// Symbol the transition popped, if any.
    pub popped: Option<K>,

    /// Whether the transition pushed a symbol.
    pub pushed: bool,

    /// History length before the transition was recorded.
    pub depth: usize,
}

/// Stack of checkpoints, most recent last.
///
/// With a limit set, pushing beyond it discards the oldest checkpoint, which
/// bounds how far back the search can return.
#[derive(Clone, Debug)]
pub struct Trail<M, K> {
    checkpoints: VecDeque<Checkpoint<M, K>>,
    limit: Option<usize>,
    discarded: usize,
}

impl<M, K> Trail<M, K> {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            checkpoints: VecDeque::new(),
            limit,
            discarded: 0,
        }
    }

    pub fn push(&mut self, checkpoint: Checkpoint<M, K>) {
        if self.limit == Some(0) {
            self.discarded += 1;
            return;
        }
        self.checkpoints.push_back(checkpoint);
        if let Some(limit) = self.limit {
            while self.checkpoints.len() > limit {
                self.checkpoints.pop_front();
                self.discarded += 1;
            }
        }
    }

    pub fn pop(&mut self) -> Option<Checkpoint<M, K>> {
        self.checkpoints.pop_back()
    }

    pub fn last(&self) -> Option<&Checkpoint<M, K>> {
        self.checkpoints.back()
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Checkpoints dropped because of the limit.
    pub fn discarded(&self) -> usize {
        self.discarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkpoint(state: usize) -> Checkpoint<usize, char> {
        Checkpoint {
            state,
            mark: state * 10,
            taken: 0,
            popped: None,
            pushed: false,
            depth: state,
        }
    }

    #[test]
    fn pops_most_recent_first() {
        let mut trail = Trail::new(None);
        trail.push(checkpoint(1));
        trail.push(checkpoint(2));

        assert_eq!(trail.last().map(|c| c.state), Some(2));
        assert_eq!(trail.pop().map(|c| c.state), Some(2));
        assert_eq!(trail.pop().map(|c| c.state), Some(1));
        assert!(trail.pop().is_none());
    }

    #[test]
    fn limit_discards_oldest() {
        let mut trail = Trail::new(Some(2));
        for state in 1..=4 {
            trail.push(checkpoint(state));
        }

        assert_eq!(trail.len(), 2);
        assert_eq!(trail.discarded(), 2);
        assert_eq!(trail.pop().map(|c| c.state), Some(4));
        assert_eq!(trail.pop().map(|c| c.state), Some(3));
        assert!(trail.is_empty());
    }

    #[test]
    fn zero_limit_keeps_nothing() {
        let mut trail = Trail::new(Some(0));
        trail.push(checkpoint(1));

        assert!(trail.is_empty());
        assert_eq!(trail.discarded(), 1);
    }
}
