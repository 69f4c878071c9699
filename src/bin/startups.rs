//! startups CLI - play a game against robots, or watch robots play.

use anyhow::Result;
use clap::Parser;
use startups_engine::{
    Company, Game, GameConfig, GameEvent, GameObserver, PlayerId, TableView, TracingObserver,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "startups")]
#[command(about = "Collect shares, win majorities, squeeze the minority holders")]
struct Cli {
    /// Number of players at the table (2-8)
    #[arg(short, long, default_value_t = 4)]
    players: usize,

    /// Seat played from the terminal; all seats are robots if omitted
    #[arg(long, value_name = "SEAT")]
    human: Option<u8>,

    /// Number of rounds
    #[arg(short, long, default_value_t = 1)]
    rounds: u32,

    /// Seed for shuffles and robot decisions
    #[arg(short, long, default_value_t = 1977)]
    seed: u64,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Prints the table before each of the human's turns, narrates the rest
/// through tracing.
struct ConsoleObserver {
    human: Option<PlayerId>,
    narrator: TracingObserver,
}

impl ConsoleObserver {
    fn print_table(view: &TableView<'_>) {
        let snapshot = view.snapshot();
        println!();
        println!(
            "Round {} / turn {} / {} shares left in the deck",
            snapshot.round, snapshot.turn, snapshot.deck_len
        );

        let header: Vec<String> = Company::ALL.iter().map(|c| format!("{:>6}", abbreviate(*c))).collect();
        println!("{:<12}{:>6}{:>6}{}", "", "cash", "hand", header.join(""));
        for player in &snapshot.players {
            let counts: Vec<String> = Company::ALL
                .iter()
                .map(|&c| {
                    let mark = if player.majorities.contains(c) { "*" } else { " " };
                    format!("{:>5}{mark}", player.portfolio[c])
                })
                .collect();
            println!(
                "{:<12}{:>6}{:>6}{}",
                player.name,
                player.cash,
                player.hand_size,
                counts.join("")
            );
        }

        if snapshot.market.is_empty() {
            println!("Market: empty");
        } else {
            let slots: Vec<String> = snapshot
                .market
                .iter()
                .map(|e| format!("{} ({})", e.company, e.value))
                .collect();
            println!("Market: {}", slots.join(", "));
        }
    }
}

impl GameObserver for ConsoleObserver {
    fn on_event(&mut self, event: &GameEvent, view: &TableView<'_>) {
        if let GameEvent::TurnStarted { player, .. } = event {
            // The policy prints the hand itself; the view only knows its size.
            if Some(*player) == self.human {
                Self::print_table(view);
            }
        }
        if let GameEvent::HandsFolded { .. } = event {
            if self.human.is_some() {
                Self::print_table(view);
            }
        }
        self.narrator.on_event(event, view);
    }
}

fn abbreviate(company: Company) -> &'static str {
    match company {
        Company::GiraffeBeer => "Giraf",
        Company::BowwowGames => "Bowow",
        Company::FlamingoSoft => "Flamg",
        Company::OctoCoffee => "Octo",
        Company::HippoPowertech => "Hippo",
        Company::ElephantMarsTravel => "Eleph",
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&cli.log_level))?,
        )
        .with_target(false)
        .init();

    let mut config = GameConfig::default()
        .with_players(cli.players)
        .with_rounds(cli.rounds)
        .with_seed(cli.seed);
    if let Some(seat) = cli.human {
        config = config.with_interactive_seat(PlayerId::new(seat));
    }

    let game = Game::from_config(config.clone())?;
    info!(
        players = config.player_count,
        rounds = config.round_count,
        seed = config.seed,
        "starting game"
    );

    let mut observer = ConsoleObserver {
        human: config.interactive_seat,
        narrator: TracingObserver,
    };
    let summary = game.play(&mut observer)?;

    println!();
    println!("Final standings (seed {}):", summary.seed);
    for (place, standing) in summary.standings.iter().enumerate() {
        println!(
            "{:>3}. {:<12} {:>3} points",
            place + 1,
            standing.name,
            standing.victory_points
        );
    }
    Ok(())
}
