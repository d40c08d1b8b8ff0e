use std::io::{self, BufRead, Write};

use colored::Colorize;

use dt_core::{AudioBackend, DieSource, TodoSession};

pub fn run<D: DieSource, B: AudioBackend>(session: &mut TodoSession<D, B>) -> Result<(), String> {
    let controller = session.controller();
    println!("  {} Dice Todo", "Starting".bold());
    println!(
        "  Theme: {} | Sound: {}{}",
        controller.theme(),
        if controller.sound_enabled() { "on" } else { "off" },
        if controller.audio().backend().is_audible() {
            ""
        } else {
            " (audio output simulated)"
        }
    );
    println!("  {}", controller.message());
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match session.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
                if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                    break;
                }
            }
            Err(e) => {
                println!("{}\n", e.to_string().yellow());
            }
        }
    }

    Ok(())
}
