//! Coin-operated turnstile
//!
//! Demonstrates loading a configuration from JSON, following event edges,
//! and stepping back and forth through history.
//!
//! Run with: RUST_LOG=debug cargo run --example turnstile

use rewind::{MachineError, StateMachine};

const TURNSTILE: &str = r#"{
    "initial": "locked",
    "states": {
        "locked": { "transitions": { "coin": "unlocked" } },
        "unlocked": { "transitions": { "push": "locked", "coin": "unlocked" } },
        "broken": { "transitions": { "repair": "locked" } }
    }
}"#;

fn main() -> Result<(), MachineError> {
    env_logger::init();

    println!("=== Turnstile Example ===\n");

    let mut machine = StateMachine::from_json(TURNSTILE)?;
    println!("Initial state: {}", machine.state());
    println!("States accepting a coin: {:?}", machine.states(Some("coin")));

    for event in ["coin", "coin", "push", "push"] {
        match machine.trigger(event) {
            Ok(()) => println!("{:>6} -> {}", event, machine.state()),
            Err(error) => println!("{:>6} rejected: {}", event, error),
        }
    }

    machine.change_state("broken")?;
    println!("\nVandalised: {}", machine.state());

    while machine.undo() {
        println!("undo   -> {}", machine.state());
    }
    while machine.redo() {
        println!("redo   -> {}", machine.state());
    }

    println!("\nHistory: {:?}", machine.history().entries());
    println!("Journal path: {:?}", machine.journal().get_path());

    machine.reset();
    println!("After reset: {}", machine.state());

    println!("\n=== Example Complete ===");
    Ok(())
}
