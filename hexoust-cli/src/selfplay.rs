//! Selfplay command - random-move games between the two colours
//!
//! ## Architecture
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_single_game(), compute_statistics(), report_results()
//! - Level 3: formatting utilities

use anyhow::Result;
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hexoust_core::{Game, Hex, Outcome, Player, TurnEvent};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct SelfplayArgs {
    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Maximum placements per game before calling it unfinished
    #[arg(long, default_value = "1000")]
    pub max_turns: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    winner: Option<Player>,
    turns: usize,
    captured_stones: usize,
    passes: usize,
}

/// Aggregated selfplay results
#[derive(Clone, Debug)]
struct SelfplayResults {
    games: Vec<GameRecord>,
    red_wins: usize,
    blue_wins: usize,
    unfinished: usize,
    avg_turns: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run selfplay command
pub fn run(args: SelfplayArgs, seed: Option<u64>) -> Result<()> {
    let mut rng = create_rng(seed);

    tracing::info!(
        "Starting selfplay: {} games, turn cap {}",
        args.games,
        args.max_turns
    );

    let mut games = Vec::with_capacity(args.games);
    for game_num in 0..args.games {
        let record = play_single_game(game_num + 1, args.max_turns, &mut rng)?;

        tracing::info!(
            "Game {}: {} in {} turns ({} captured, {} passes)",
            record.game_number,
            describe_winner(record.winner),
            record.turns,
            record.captured_stones,
            record.passes
        );

        games.push(record);
    }

    let results = compute_statistics(games);
    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play one game with both sides choosing uniformly among legal moves
fn play_single_game(
    game_number: usize,
    max_turns: usize,
    rng: &mut ChaCha8Rng,
) -> Result<GameRecord> {
    let mut game = Game::new().with_observer(Box::new(|event| match event {
        TurnEvent::Switched(p) => tracing::debug!("turn: {}", p),
        TurnEvent::Passed(p) => tracing::debug!("turn passed to {}", p),
        TurnEvent::Won(p) => tracing::debug!("game won by {}", p),
    }));

    let mut turns = 0;
    let mut captured_stones = 0;
    let mut passes = 0;
    let mut consecutive_passes = 0;

    while !game.is_game_over() && turns < max_turns {
        let moves = game.legal_moves();

        if moves.is_empty() {
            // Any coordinate triggers the forced pass
            match game.attempt_move(Hex::new(0, 0, 0))? {
                Outcome::Passed => {
                    passes += 1;
                    consecutive_passes += 1;
                    // Both players blocked: the game cannot progress
                    if consecutive_passes >= 2 {
                        break;
                    }
                }
                other => unreachable!("blocked mover produced {:?}", other),
            }
            continue;
        }

        consecutive_passes = 0;
        let coord = moves[rng.gen_range(0..moves.len())];

        match game.attempt_move(coord)? {
            Outcome::Placed { captured } | Outcome::Won { captured } => {
                turns += 1;
                captured_stones += captured.len();
            }
            Outcome::Passed => passes += 1,
        }
    }

    let winner = if game.is_game_over() {
        Some(game.current_player())
    } else {
        None
    };

    Ok(GameRecord {
        game_number,
        winner,
        turns,
        captured_stones,
        passes,
    })
}

/// Compute aggregate statistics from game records
fn compute_statistics(games: Vec<GameRecord>) -> SelfplayResults {
    let red_wins = games
        .iter()
        .filter(|g| g.winner == Some(Player::Red))
        .count();
    let blue_wins = games
        .iter()
        .filter(|g| g.winner == Some(Player::Blue))
        .count();
    let unfinished = games.iter().filter(|g| g.winner.is_none()).count();

    let total_turns: usize = games.iter().map(|g| g.turns).sum();
    let avg_turns = if games.is_empty() {
        0.0
    } else {
        total_turns as f32 / games.len() as f32
    };

    SelfplayResults {
        games,
        red_wins,
        blue_wins,
        unfinished,
        avg_turns,
    }
}

/// Report results as text or JSON
fn report_results(results: &SelfplayResults, args: &SelfplayArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - UTILITIES
// ============================================================================

/// Create RNG from seed or entropy
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn describe_winner(winner: Option<Player>) -> String {
    match winner {
        Some(p) => format!("{} wins", p),
        None => "unfinished".to_string(),
    }
}

/// Print results as JSON
fn print_json_results(results: &SelfplayResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        winner: Option<String>,
        turns: usize,
        captured_stones: usize,
        passes: usize,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        red_wins: usize,
        blue_wins: usize,
        unfinished: usize,
        avg_turns: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        red_wins: results.red_wins,
        blue_wins: results.blue_wins,
        unfinished: results.unfinished,
        avg_turns: results.avg_turns,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                winner: g.winner.map(|p| p.to_string()),
                turns: g.turns,
                captured_stones: g.captured_stones,
                passes: g.passes,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(results: &SelfplayResults) {
    let total = results.games.len();

    println!("\n=== Selfplay Results ===");
    println!("Total games: {}", total);
    println!("RED wins:    {}", results.red_wins);
    println!("BLUE wins:   {}", results.blue_wins);
    println!("Unfinished:  {}", results.unfinished);
    println!("Avg turns:   {:.1}", results.avg_turns);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {} in {} turns",
            game.game_number,
            describe_winner(game.winner),
            game.turns
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
