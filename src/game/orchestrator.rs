//! Multi-round games over a fixed roster.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::company::CompanyRegistry;
use crate::core::config::GameConfig;
use crate::core::error::EngineError;
use crate::core::player::{Player, PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::events::{GameEvent, GameObserver};
use crate::policy::{AutomatedPolicy, DecisionPolicy, InteractivePolicy};
use crate::rules::{Round, RoundResult, Roster};

/// A player's place in the final standings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub name: String,
    pub victory_points: i32,
}

/// Everything a finished game produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub seed: u64,
    pub rounds: Vec<RoundResult>,
    /// Most victory points first.
    pub standings: Vec<Standing>,
}

impl GameSummary {
    #[must_use]
    pub fn winner(&self) -> Option<&Standing> {
        self.standings.first()
    }
}

/// A configured game, ready to play.
pub struct Game {
    config: GameConfig,
    registry: CompanyRegistry,
    roster: Roster,
    rng: GameRng,
}

impl Game {
    /// Assemble a game from its parts. The roster must seat
    /// `config.player_count` players.
    pub fn new(
        config: GameConfig,
        registry: CompanyRegistry,
        roster: Roster,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        if roster.len() != config.player_count {
            return Err(EngineError::InvalidConfig(format!(
                "configured for {} players, roster seats {}",
                config.player_count,
                roster.len()
            )));
        }
        let rng = GameRng::new(config.seed);
        Ok(Self {
            config,
            registry,
            roster,
            rng,
        })
    }

    /// Standard companies; robots everywhere except the interactive seat,
    /// which reads stdin.
    pub fn from_config(config: GameConfig) -> Result<Self, EngineError> {
        GameBuilder::new().config(config).build()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &CompanyRegistry {
        &self.registry
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Play every round and rank the players.
    pub fn play<O: GameObserver + ?Sized>(
        mut self,
        observer: &mut O,
    ) -> Result<GameSummary, EngineError> {
        let mut order: Vec<PlayerId> = self.roster.ids().collect();
        let mut rounds = Vec::with_capacity(self.config.round_count as usize);
        let mut last_round = None;

        for index in 1..=self.config.round_count {
            let mut round = Round::begin_round(
                &self.registry,
                self.roster.players_mut(),
                order.clone(),
                index,
                &mut self.rng,
            )?;
            let result = round.play_out(&self.registry, &mut self.roster, &mut self.rng, observer)?;
            info!(
                round = index,
                turns = result.turns,
                last_actor = %result.last_actor,
                "round settled"
            );

            order = rotate_turn_order(&order, result.last_actor);
            rounds.push(result);
            last_round = Some(round);
        }

        let standings = final_standings(self.roster.players());
        if let Some(round) = &last_round {
            let event = GameEvent::GameEnded {
                standings: standings.iter().map(|s| (s.player, s.victory_points)).collect(),
            };
            observer.on_event(&event, &round.view(self.roster.players()));
        }

        Ok(GameSummary {
            seed: self.config.seed,
            rounds,
            standings,
        })
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("roster", &self.roster)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Game`].
///
/// Without explicit seats, the table is filled from the config: robots,
/// plus a stdin player at `interactive_seat`.
pub struct GameBuilder {
    config: GameConfig,
    registry: CompanyRegistry,
    seats: Vec<(String, Box<dyn DecisionPolicy>)>,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            registry: CompanyRegistry::standard(),
            seats: Vec::new(),
        }
    }
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(mut self, registry: CompanyRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn rounds(mut self, rounds: u32) -> Self {
        self.config.round_count = rounds;
        self
    }

    /// Add a seat. Once any seat is added the player count follows the
    /// seats, and the config's interactive seat is ignored.
    pub fn seat(mut self, name: impl Into<String>, policy: impl DecisionPolicy + 'static) -> Self {
        self.seats.push((name.into(), Box::new(policy)));
        self
    }

    pub fn build(self) -> Result<Game, EngineError> {
        let Self {
            mut config,
            registry,
            mut seats,
        } = self;

        if seats.is_empty() {
            config.validate()?;
            seats = default_seats(&config);
        } else {
            config.player_count = seats.len();
            config.interactive_seat = None;
        }

        let roster = Roster::new(seats)?;
        Game::new(config, registry, roster)
    }
}

fn default_seats(config: &GameConfig) -> Vec<(String, Box<dyn DecisionPolicy>)> {
    PlayerId::all(config.player_count)
        .map(|id| {
            if config.interactive_seat == Some(id) {
                let policy: Box<dyn DecisionPolicy> = Box::new(InteractivePolicy::stdio());
                ("Human".to_string(), policy)
            } else {
                let policy: Box<dyn DecisionPolicy> = Box::new(AutomatedPolicy);
                (format!("Robot {}", id.0), policy)
            }
        })
        .collect()
}

/// Rotate `order` left so that `last` comes first.
///
/// Unchanged if `last` is not seated.
#[must_use]
pub fn rotate_turn_order(order: &[PlayerId], last: PlayerId) -> Vec<PlayerId> {
    let mut rotated = order.to_vec();
    if let Some(pos) = order.iter().position(|&id| id == last) {
        rotated.rotate_left(pos);
    }
    rotated
}

/// Players by victory points, most first; equal points go to the lower id.
#[must_use]
pub fn final_standings(players: &PlayerMap<Player>) -> Vec<Standing> {
    let mut standings: Vec<Standing> = players
        .values()
        .map(|p| Standing {
            player: p.id(),
            name: p.name().to_string(),
            victory_points: p.victory_points(),
        })
        .collect();
    standings.sort_by(|a, b| {
        b.victory_points
            .cmp(&a.victory_points)
            .then(a.player.cmp(&b.player))
    });
    standings
}
