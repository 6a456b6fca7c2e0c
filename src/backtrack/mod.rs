//! Backtracking extension: depth-first search over transition choices.
//!
//! A [`Backtracker`] runs a blueprint like a plain [`Machine`], but records a
//! [`Checkpoint`] before every fired transition. When the run would reject, it
//! returns to the most recent checkpoint that still has an untried eligible
//! transition and fires that one instead. Alternatives are explored
//! leftmost-first in declaration order.
//!
//! The context must implement [`Rewind`] so that input position and any
//! counters it owns can be restored along with the state, stack and history.
//! Each checkpoint stores only the undo record of its transition's stack
//! effects, so rewinding one step costs the same at any stack depth.

mod checkpoint;

pub use checkpoint::{Checkpoint, Trail};

use crate::core::{Context, Seekable, Tape};
use crate::engine::{Blueprint, Machine, Observer, Outcome, RunConfig, RunReport};
use crate::pushdown::{NoStack, Symbol};
use tracing::{debug, trace};

/// Context that can save and restore its own progress.
pub trait Rewind {
    type Mark: Clone;

    fn mark(&self) -> Self::Mark;

    /// Return to a mark produced by [`Rewind::mark`] on this context.
    fn rewind(&mut self, mark: &Self::Mark);
}

impl<T> Rewind for Tape<T> {
    type Mark = usize;

    fn mark(&self) -> usize {
        self.position()
    }

    fn rewind(&mut self, mark: &usize) {
        // Marks come from position(), which is always seekable.
        let _ = self.seek(*mark);
    }
}

/// A machine run that backtracks on rejection.
///
/// # Example
///
/// ```rust
/// use statecraft::backtrack::Backtracker;
/// use statecraft::builder::{on_symbol, BlueprintBuilder, StateBuilder};
/// use statecraft::core::{Stream, Tape};
///
/// // "ab" or "ac": the first branch fails on "ac" and is undone.
/// let eat = |t: &mut Tape<char>| {
///     let _ = t.advance();
/// };
/// let blueprint = BlueprintBuilder::<Tape<char>>::new()
///     .initial("start")
///     .state(
///         StateBuilder::new("start")
///             .transition(on_symbol("ab", 'a'))
///             .transition(on_symbol("ac", 'a')),
///     )
///     .state(StateBuilder::new("ab").effect(eat).transition(on_symbol("b", 'b')))
///     .state(StateBuilder::new("ac").effect(eat).transition(on_symbol("c", 'c')))
///     .state(StateBuilder::new("b").accepting().effect(eat))
///     .state(StateBuilder::new("c").accepting().effect(eat))
///     .build()
///     .unwrap();
///
/// let report = Backtracker::new(&blueprint, Tape::from("ac")).run();
/// assert!(report.is_accepted());
/// assert_eq!(report.history().get_path(), vec!["start", "ac", "c"]);
/// assert_eq!(report.backtracks(), 1);
/// ```
pub struct Backtracker<'b, C: Rewind, K = NoStack> {
    machine: Machine<'b, C, K>,
    trail: Trail<C::Mark, K>,
    backtracks: usize,
}

impl<'b, C: Rewind, K> Backtracker<'b, C, K> {
    pub fn new(blueprint: &'b Blueprint<C, K>, context: C) -> Self {
        Self {
            machine: Machine::new(blueprint, context),
            trail: Trail::new(None),
            backtracks: 0,
        }
    }

    /// Apply run limits. `trail_limit` bounds the retained checkpoints.
    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.trail = Trail::new(config.trail_limit);
        self.machine = self.machine.with_config(config);
        self
    }

    /// Attach an observer. Besides the plain run hooks it hears
    /// [`Observer::on_backtrack`] and [`Observer::on_exhausted`].
    pub fn with_observer(mut self, observer: impl Observer<C> + 'b) -> Self {
        self.machine = self.machine.with_observer(observer);
        self
    }

    /// The wrapped machine instance.
    pub fn machine(&self) -> &Machine<'b, C, K> {
        &self.machine
    }

    pub fn trail(&self) -> &Trail<C::Mark, K> {
        &self.trail
    }
}

impl<'b, C: Context + Rewind, K: Symbol> Backtracker<'b, C, K> {
    /// Drive the machine, backtracking on every rejection until it accepts
    /// or no untried alternative remains.
    ///
    /// The step limit counts every fired transition, including ones later
    /// undone, and is never backtracked over.
    pub fn run(mut self) -> RunReport<C> {
        let span = self.machine.span();
        let _entered = span.enter();

        let outcome = loop {
            let reason = match self.machine.enter() {
                Some(Outcome::Accepted) => break Outcome::Accepted,
                Some(Outcome::Rejected(reason)) => reason,
                None => match self.machine.select(0) {
                    Some(index) => {
                        if let Some(outcome) = self.machine.step_limit_exceeded() {
                            break outcome;
                        }
                        self.fire(index);
                        continue;
                    }
                    None => match self.machine.impasse() {
                        Outcome::Accepted => break Outcome::Accepted,
                        Outcome::Rejected(reason) => reason,
                    },
                },
            };

            if let Some(outcome) = self.backtrack(reason) {
                break outcome;
            }
        };

        let backtracks = self.backtracks;
        self.machine.finish(outcome, backtracks)
    }

    fn fire(&mut self, index: usize) {
        let machine = &self.machine;
        let transition = &machine.blueprint.state_at(machine.current).transitions[index];
        self.trail.push(Checkpoint {
            state: machine.current,
            mark: machine.context.mark(),
            taken: index,
            popped: transition.pop.clone(),
            pushed: transition.push.is_some(),
            depth: machine.history.len(),
        });
        self.machine.fire(index);
    }

    /// Return to the latest checkpoint with an untried eligible transition
    /// and fire it. Yields the final outcome when nothing is left to try.
    ///
    /// History is only cut back once an alternative is found, so an
    /// exhausted run keeps the last path it explored.
    fn backtrack(&mut self, reason: String) -> Option<Outcome> {
        debug!(%reason, depth = self.trail.len(), "rejected, backtracking");

        while let Some(checkpoint) = self.trail.pop() {
            self.machine.context.rewind(&checkpoint.mark);
            self.machine.stack.undo(checkpoint.popped, checkpoint.pushed);
            self.machine.current = checkpoint.state;

            let Some(index) = self.machine.select(checkpoint.taken + 1) else {
                trace!(state = %self.machine.current_state(), "no alternative left");
                continue;
            };

            self.machine.history.truncate(checkpoint.depth);
            self.backtracks += 1;
            let blueprint = self.machine.blueprint;
            let state = blueprint.state_at(checkpoint.state);
            self.machine
                .notify(|observer, context| observer.on_backtrack(&state.name, context));
            debug!(
                state = %self.machine.current_state(),
                from = checkpoint.taken,
                to = index,
                "retrying with alternative"
            );
            if let Some(outcome) = self.machine.step_limit_exceeded() {
                return Some(outcome);
            }
            self.fire(index);
            return None;
        }

        let reason = format!("backtracking exhausted: {reason}");
        self.machine
            .notify(|observer, context| observer.on_exhausted(&reason, context));
        Some(Outcome::Rejected(reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{on_symbol, BlueprintBuilder, StateBuilder, TransitionBuilder};
    use crate::core::Stream;
    use crate::engine::Flow;

    type Text = Tape<char>;

    fn eat(tape: &mut Text) {
        let _ = tape.advance();
    }

    /// Even-length palindromes over {a, b}; the middle is guessed.
    fn palindromes() -> Blueprint<Text, char> {
        BlueprintBuilder::new()
            .name("palindrome")
            .initial("push")
            .state(
                StateBuilder::new("push")
                    .transition(on_symbol("shift", 'a').pushes('a'))
                    .transition(on_symbol("shift", 'b').pushes('b'))
                    .transition(TransitionBuilder::to("match")),
            )
            .state(
                StateBuilder::new("shift")
                    .effect(eat)
                    .transition(TransitionBuilder::to("push")),
            )
            .state(
                StateBuilder::new("match")
                    .accepting()
                    .transition(on_symbol("reduce", 'a').pops('a'))
                    .transition(on_symbol("reduce", 'b').pops('b')),
            )
            .state(
                StateBuilder::new("reduce")
                    .effect(eat)
                    .transition(TransitionBuilder::to("match")),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn tape_rewinds_to_mark() {
        let mut tape = Tape::from("abc");
        let mark = tape.mark();
        tape.advance().unwrap();
        tape.advance().unwrap();

        tape.rewind(&mark);
        assert_eq!(tape.current(), Some(&'a'));
    }

    #[test]
    fn nondeterministic_pushdown_guesses_the_middle() {
        let bp = palindromes();
        for input in ["", "aa", "abba", "babbab"] {
            let report = Backtracker::new(&bp, Tape::from(input)).run();
            assert!(report.is_accepted(), "{input} should be accepted");
        }
        for input in ["a", "ab", "aba", "abab"] {
            let report = Backtracker::new(&bp, Tape::from(input)).run();
            assert!(!report.is_accepted(), "{input} should be rejected");
        }
    }

    #[test]
    fn accepted_history_excludes_abandoned_branches() {
        let bp = palindromes();
        let report = Backtracker::new(&bp, Tape::from("aa")).run();

        assert!(report.is_accepted());
        assert!(report.backtracks() > 0);
        assert_eq!(
            report.history().get_path(),
            vec!["push", "shift", "push", "match", "reduce", "match"]
        );
    }

    #[test]
    fn exhaustion_reports_last_reason() {
        let bp = palindromes();
        let report = Backtracker::new(&bp, Tape::from("a")).run();

        let reason = report.outcome().reason().unwrap();
        assert!(reason.starts_with("backtracking exhausted: "), "{reason}");
    }

    #[test]
    fn rejecting_action_triggers_backtrack() {
        let bp: Blueprint<Text> = BlueprintBuilder::new()
            .initial("fork")
            .state(
                StateBuilder::new("fork")
                    .transition(TransitionBuilder::to("trap"))
                    .transition(TransitionBuilder::to("safe")),
            )
            .state(
                StateBuilder::new("trap").action(|t: &mut Text| {
                    eat(t);
                    Flow::Reject("trap sprung".to_string())
                }),
            )
            .state(StateBuilder::new("safe").accepting().effect(eat))
            .build()
            .unwrap();

        let report = Backtracker::new(&bp, Tape::from("x")).run();

        assert!(report.is_accepted());
        assert_eq!(report.history().get_path(), vec!["fork", "safe"]);
        assert_eq!(report.backtracks(), 1);
        assert_eq!(report.context().position(), 1);
    }

    #[test]
    fn deep_stacks_unwind_symbol_by_symbol() {
        let bp = palindromes();
        let half = "ab".repeat(150) + "b";
        let input: String = half.chars().chain(half.chars().rev()).collect();

        let report = Backtracker::new(&bp, Tape::from(input.as_str())).run();
        assert!(report.is_accepted());
        assert!(report.backtracks() > 0);

        let skewed = format!("{input}a");
        assert!(!Backtracker::new(&bp, Tape::from(skewed.as_str())).run().is_accepted());
    }

    #[test]
    fn deep_nesting_keeps_checkpoints_small() {
        let bp: Blueprint<Text, char> = BlueprintBuilder::new()
            .initial("scan")
            .state(
                StateBuilder::new("scan")
                    .accepting()
                    .transition(on_symbol("shift", '(').pushes('('))
                    .transition(on_symbol("shift", ')').pops('(')),
            )
            .state(
                StateBuilder::new("shift")
                    .effect(eat)
                    .transition(TransitionBuilder::to("scan")),
            )
            .build()
            .unwrap();
        let depth = 20_000;
        let input = "(".repeat(depth) + &")".repeat(depth);

        let report = Backtracker::new(&bp, Tape::from(input.as_str())).run();
        assert!(report.is_accepted());
        assert_eq!(report.steps(), 4 * depth);

        let mut backtracker = Backtracker::new(&bp, Tape::from("(("));
        backtracker.fire(0);
        let checkpoint = backtracker.trail().last().unwrap();
        assert_eq!(checkpoint.popped, None);
        assert!(checkpoint.pushed);
    }

    #[test]
    fn exhausted_run_keeps_last_explored_path() {
        let bp = palindromes();
        let report = Backtracker::new(&bp, Tape::from("a")).run();

        assert!(!report.is_accepted());
        assert_eq!(report.history().get_path(), vec!["push", "match"]);
    }

    #[derive(Default)]
    struct Events(Vec<String>);

    impl<C> Observer<C> for Events {
        fn on_accept(&mut self, state: &str, _context: &C) {
            self.0.push(format!("accept {state}"));
        }

        fn on_reject(&mut self, state: &str, reason: &str, _context: &C) {
            self.0.push(format!("reject {state}: {reason}"));
        }

        fn on_backtrack(&mut self, state: &str, _context: &C) {
            self.0.push(format!("backtrack {state}"));
        }

        fn on_exhausted(&mut self, reason: &str, _context: &C) {
            self.0.push(format!("exhausted: {reason}"));
        }
    }

    #[test]
    fn observer_hears_backtracks_and_exhaustion() {
        let bp: Blueprint<Text> = BlueprintBuilder::new()
            .initial("fork")
            .state(
                StateBuilder::new("fork")
                    .transition(TransitionBuilder::to("left"))
                    .transition(TransitionBuilder::to("right")),
            )
            .state(StateBuilder::new("left").action(|_t: &mut Text| Flow::Reject("left blocked".to_string())))
            .state(StateBuilder::new("right").action(|_t: &mut Text| Flow::Reject("right blocked".to_string())))
            .build()
            .unwrap();

        let mut events = Events::default();
        let report = Backtracker::new(&bp, Tape::from(""))
            .with_observer(&mut events)
            .run();

        assert_eq!(report.history().get_path(), vec!["fork", "right"]);
        assert_eq!(
            events.0,
            vec![
                "backtrack fork".to_string(),
                "exhausted: backtracking exhausted: right blocked".to_string(),
                "reject right: backtracking exhausted: right blocked".to_string(),
            ]
        );
    }

    #[test]
    fn observer_hears_accept_after_backtrack() {
        let bp: Blueprint<Text> = BlueprintBuilder::new()
            .initial("fork")
            .state(
                StateBuilder::new("fork")
                    .transition(TransitionBuilder::to("trap"))
                    .transition(TransitionBuilder::to("safe")),
            )
            .state(StateBuilder::new("trap").action(|_t: &mut Text| Flow::Reject("trap sprung".to_string())))
            .state(StateBuilder::new("safe").accepting())
            .build()
            .unwrap();

        let mut events = Events::default();
        let report = Backtracker::new(&bp, Tape::from(""))
            .with_observer(&mut events)
            .run();

        assert!(report.is_accepted());
        assert_eq!(events.0, vec!["backtrack fork".to_string(), "accept safe".to_string()]);
    }

    #[test]
    fn plain_machine_would_reject_same_input() {
        let bp = palindromes();
        let report = Machine::new(&bp, Tape::from("aa")).run();
        assert!(!report.is_accepted());
    }

    #[test]
    fn trail_limit_bounds_search_depth() {
        let bp = palindromes();

        let bounded = Backtracker::new(&bp, Tape::from("abba"))
            .with_config(RunConfig::new().trail_limit(1))
            .run();
        assert!(!bounded.is_accepted());

        let unbounded = Backtracker::new(&bp, Tape::from("abba")).run();
        assert!(unbounded.is_accepted());
    }

    #[test]
    fn step_limit_is_not_undone() {
        let bp = palindromes();
        let report = Backtracker::new(&bp, Tape::from("abbaabba"))
            .with_config(RunConfig::new().step_limit(5))
            .run();

        assert_eq!(
            report.outcome(),
            &Outcome::Rejected("step limit of 5 transitions exceeded".to_string())
        );
    }
}
