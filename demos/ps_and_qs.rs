//! Ps and Qs
//!
//! This example recognizes the language p*q* twice: once with a
//! deterministic blueprint and once with a nondeterministic one that only a
//! backtracking run can drive.
//!
//! Key concepts:
//! - Guarded transitions tried in declaration order
//! - Epsilon moves resolved by backtracking
//! - Observing a run as it happens
//!
//! Run with: cargo run --example ps_and_qs

use statecraft::backtrack::Backtracker;
use statecraft::builder::{on_symbol, BlueprintBuilder, StateBuilder, TransitionBuilder};
use statecraft::core::{Seekable, Stream, Tape};
use statecraft::engine::{Blueprint, Machine, Observer};

type Text = Tape<char>;

fn eat(tape: &mut Text) {
    let _ = tape.advance();
}

fn deterministic() -> Blueprint<Text> {
    BlueprintBuilder::new()
        .name("ps-and-qs")
        .initial("start")
        .state(
            StateBuilder::new("start")
                .accepting()
                .transition(on_symbol("p", 'p'))
                .transition(on_symbol("q", 'q')),
        )
        .state(
            StateBuilder::new("p")
                .accepting()
                .effect(eat)
                .transition(on_symbol("p", 'p'))
                .transition(on_symbol("q", 'q')),
        )
        .state(
            StateBuilder::new("q")
                .accepting()
                .effect(eat)
                .transition(on_symbol("q", 'q')),
        )
        .build()
        .unwrap()
}

fn nondeterministic() -> Blueprint<Text> {
    BlueprintBuilder::new()
        .name("ps-and-qs-guessing")
        .initial("p")
        .state(
            StateBuilder::new("p")
                .accepting()
                .transition(TransitionBuilder::to("q"))
                .transition(on_symbol("eat_p", 'p')),
        )
        .state(
            StateBuilder::new("eat_p")
                .effect(eat)
                .transition(TransitionBuilder::to("p")),
        )
        .state(
            StateBuilder::new("q")
                .accepting()
                .transition(on_symbol("eat_q", 'q')),
        )
        .state(
            StateBuilder::new("eat_q")
                .effect(eat)
                .transition(TransitionBuilder::to("q")),
        )
        .build()
        .unwrap()
}

/// Prints every retry and the final verdict.
struct Narrator;

impl Observer<Text> for Narrator {
    fn on_backtrack(&mut self, state: &str, context: &Text) {
        println!("    back to '{state}' at position {}", context.position());
    }

    fn on_accept(&mut self, state: &str, _context: &Text) {
        println!("    accepted in '{state}'");
    }

    fn on_reject(&mut self, state: &str, reason: &str, _context: &Text) {
        println!("    rejected in '{state}': {reason}");
    }
}

fn main() {
    println!("=== Ps and Qs ===\n");

    let inputs = ["pppqqqqq", "qqqqpppp", "rppppqqqq", "qqqqqqq", ""];

    println!("Deterministic machine:");
    let blueprint = deterministic();
    for input in inputs {
        let report = Machine::new(&blueprint, Tape::from(input)).run();
        println!("  {input:>10?} -> {:?}", report.outcome());
    }

    println!("\nPlain run of the guessing machine (no backtracking):");
    let blueprint = nondeterministic();
    for input in inputs {
        let report = Machine::new(&blueprint, Tape::from(input)).run();
        println!("  {input:>10?} -> {:?}", report.outcome());
    }

    println!("\nBacktracking run of the guessing machine:");
    for input in inputs {
        println!("  {input:?}");
        let report = Backtracker::new(&blueprint, Tape::from(input))
            .with_observer(Narrator)
            .run();
        println!(
            "    path {:?} after {} backtrack(s)",
            report.history().get_path(),
            report.backtracks()
        );
    }

    println!("\n=== Example Complete ===");
}
