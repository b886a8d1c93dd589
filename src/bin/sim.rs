use battleship::{
    init_logging, AiTurn, GameConfig, Phase, ProbabilityTargeter, Session, Side, BOARD_SIZE,
    FLEET,
};
use clap::Parser;
use serde_json::json;

/// Play a full game headless, the player's seat driven by the same
/// probability targeter as the AI, and print a JSON summary.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = BOARD_SIZE)]
    size: usize,
    #[arg(long, help = "Stop after this many attacks (both sides counted)")]
    max_turns: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let config = GameConfig::new(args.size, &FLEET)?;
    let lengths = config.ship_lengths();
    let max_turns = args
        .max_turns
        .unwrap_or(2 * config.board_size() * config.board_size());
    let mut session = Session::with_builtin_ai(config, args.seed);
    let mut player = ProbabilityTargeter::seeded(args.seed.wrapping_add(1), lengths);

    session.randomize_fleet()?;
    session.start_game().await?;

    let mut turns = 0usize;
    let mut forfeits = 0usize;
    while session.state().phase() == Phase::Playing && turns < max_turns {
        if session.state().current_turn() == Side::Player {
            let request = session.state().attack_request(Side::Player);
            let decision = player.decide(&request)?;
            session.player_attack(decision.coordinate)?;
        } else if let AiTurn::Forfeited { .. } = session.run_ai_turn().await? {
            forfeits += 1;
        }
        turns += 1;
    }

    let state = session.state();
    let side_summary = |side: Side| {
        let record = state.attacks(side);
        json!({"hits": record.hits(), "misses": record.misses()})
    };
    let result = json!({
        "seed": args.seed,
        "winner": state.winner().map(Side::id),
        "turns": turns,
        "forfeits": forfeits,
        "player": side_summary(Side::Player),
        "ai": side_summary(Side::Ai),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
