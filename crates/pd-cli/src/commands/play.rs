use std::io::{self, BufRead, Write};

use colored::Colorize;

use pd_engine::{Session, SessionConfig};

pub fn run(seed: u64) -> Result<(), String> {
    let mut session = Session::new(SessionConfig::default().with_seed(seed));

    println!("  {} Pipdream", "Starting".bold());
    println!("  Seed: {seed}");
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    // Opening position.
    match session.process("status") {
        Ok(status) => println!("{status}\n"),
        Err(e) => return Err(e.to_string()),
    }

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
