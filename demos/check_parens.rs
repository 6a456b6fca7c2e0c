//! Check Parens
//!
//! This example checks bracket balance with a pushdown machine. Opening
//! brackets push onto the stack and closing brackets pop their partner.
//!
//! Key concepts:
//! - Stack effects on transitions
//! - Actions that read the stack
//! - Rendering a blueprint description
//!
//! Run with: cargo run --example check_parens -- "(([] {}) ())"

use statecraft::builder::{on_symbol, BlueprintBuilder, StateBuilder, TransitionBuilder};
use statecraft::core::{Seekable, Stream, Tape};
use statecraft::engine::{Blueprint, Flow};
use statecraft::pushdown::PushdownMachine;

type Text = Tape<char>;

const MAX_DEPTH: usize = 32;

fn brackets() -> Blueprint<Text, char> {
    let mut scan: StateBuilder<Text, char> = StateBuilder::new("scan")
        .accepting()
        .action_stack(|_t: &mut Text, stack: &[char]| {
            if stack.len() > MAX_DEPTH {
                Flow::Reject(format!("nesting deeper than {MAX_DEPTH}"))
            } else {
                Flow::Continue
            }
        })
        .transition(on_symbol("shift", ' ').label("blank"));
    for (open, close) in [('(', ')'), ('[', ']'), ('{', '}')] {
        scan = scan
            .transition(on_symbol("shift", open).pushes(open).label(open.to_string()))
            .transition(on_symbol("shift", close).pops(open).label(close.to_string()));
    }

    BlueprintBuilder::new()
        .name("brackets")
        .initial("scan")
        .state(scan)
        .state(
            StateBuilder::new("shift")
                .effect(|t: &mut Text| {
                    let _ = t.advance();
                })
                .transition(TransitionBuilder::to("scan")),
        )
        .build()
        .unwrap()
}

fn main() {
    println!("=== Check Parens ===\n");

    let blueprint = brackets();
    match blueprint.describe().to_json() {
        Ok(json) => println!("{json}\n"),
        Err(e) => eprintln!("could not render description: {e}"),
    }

    let mut inputs: Vec<String> = std::env::args().skip(1).collect();
    if inputs.is_empty() {
        inputs = ["( )", "(([] {}) ())", "([)]", "(()", "())"]
            .into_iter()
            .map(str::to_string)
            .collect();
    }

    for input in &inputs {
        let report = PushdownMachine::new(&blueprint, Tape::from(input.as_str())).run();
        match report.outcome().reason() {
            None => println!("{input:>16?} balanced"),
            Some(reason) => println!(
                "{input:>16?} unbalanced at position {}: {reason}",
                report.context().position()
            ),
        }
    }

    println!("\n=== Example Complete ===");
}
