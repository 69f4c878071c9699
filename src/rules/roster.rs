//! The seats of a game: each player's state and the policy that drives it.

use crate::core::config::{MAX_PLAYERS, MIN_PLAYERS};
use crate::core::error::EngineError;
use crate::core::player::{Player, PlayerId, PlayerMap};
use crate::policy::{AutomatedPolicy, DecisionPolicy};

/// Players and their policies, indexed by seat.
pub struct Roster {
    players: PlayerMap<Player>,
    policies: Vec<Box<dyn DecisionPolicy>>,
}

impl Roster {
    /// Seat one player per (name, policy) pair, in id order.
    pub fn new(seats: Vec<(String, Box<dyn DecisionPolicy>)>) -> Result<Self, EngineError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&seats.len()) {
            return Err(EngineError::InvalidConfig(format!(
                "a table seats {MIN_PLAYERS}-{MAX_PLAYERS} players, got {}",
                seats.len()
            )));
        }

        let (names, policies): (Vec<String>, Vec<_>) = seats.into_iter().unzip();
        let players = PlayerMap::new(names.len(), |id| Player::new(id, names[id.index()].clone()));
        Ok(Self { players, policies })
    }

    /// A table of robots named "Robot 0", "Robot 1", ...
    pub fn automated(player_count: usize) -> Result<Self, EngineError> {
        Self::new(
            PlayerId::all(player_count)
                .map(|id| {
                    let policy: Box<dyn DecisionPolicy> = Box::new(AutomatedPolicy);
                    (format!("Robot {}", id.0), policy)
                })
                .collect(),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut PlayerMap<Player> {
        &mut self.players
    }

    /// Seats in id order.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> {
        self.players.player_ids()
    }

    /// Policy label of a seat.
    #[must_use]
    pub fn kind(&self, id: PlayerId) -> &'static str {
        self.policies[id.index()].kind()
    }

    pub(crate) fn seat_mut(
        &mut self,
        id: PlayerId,
    ) -> (&mut PlayerMap<Player>, &mut Box<dyn DecisionPolicy>) {
        (&mut self.players, &mut self.policies[id.index()])
    }
}

impl std::fmt::Debug for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Roster")
            .field("players", &self.players)
            .field(
                "policies",
                &self.policies.iter().map(|p| p.kind()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
