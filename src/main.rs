#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use battleship::{
    coord_label, init_logging, legend, render_grid, render_state, AiTurn, Command, GameConfig, Phase, Session,
    Side, BOARD_SIZE, FLEET, HELP,
};
#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use std::io::{self, BufRead, Write};
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about = "Play Battleship against the computer", long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, default_value_t = BOARD_SIZE, help = "Board width and height (1-26)")]
    size: usize,
    #[arg(long, default_value_t = 0, help = "Pause before each AI move, in milliseconds")]
    ai_delay_ms: u64,
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = GameConfig::new(cli.size, &FLEET)?;
    let seed = match cli.seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            s
        }
        None => rand::random(),
    };
    let mut session = Session::with_builtin_ai(config, seed);
    let delay = Duration::from_millis(cli.ai_delay_ms);

    println!("{}\n", HELP);
    println!("{}\n", legend());
    print!("{}", render_state(session.state()));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command: Command = match line.parse() {
            Ok(c) => c,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        let outcome = match command {
            Command::Quit => break,
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Show => Ok(()),
            Command::Select(kind) => session.select_ship(kind),
            Command::Rotate => session.toggle_orientation().map(|o| println!("Orientation: {}", o)),
            Command::Place(anchor) => session.place_ship(anchor).map(|kind| {
                println!("{} placed at {}", kind.definition().name(), coord_label(anchor))
            }),
            Command::Random => session.randomize_fleet(),
            Command::Start => session.start_game().await,
            Command::Reset => {
                session.reset();
                Ok(())
            }
            Command::Fire(coord) => session
                .player_attack(coord)
                .map(|report| println!("{}: {}", coord_label(coord), report.message)),
        };
        if let Err(e) = outcome {
            println!("{}", e);
            continue;
        }

        while session.awaiting_ai() {
            if !delay.is_zero() {
                println!("AI is thinking...");
                tokio::time::sleep(delay).await;
            }
            match session.run_ai_turn().await? {
                AiTurn::Attacked(report) => {
                    println!("AI fires at {}: {}", coord_label(report.coordinate), report.message)
                }
                AiTurn::Forfeited { reason } => println!("AI skipped its turn: {}", reason),
            }
        }

        print!("\n{}", render_state(session.state()));
        if session.state().phase() == Phase::GameOver {
            if session.state().winner() == Some(Side::Ai) {
                println!("\nThe enemy fleet:");
                print!("{}", render_grid(session.state().board(Side::Ai).grid()));
            }
            println!("Type 'reset' to play again or 'quit' to leave.");
        }
    }
    Ok(())
}
