//! Human player on a line-based terminal.
//!
//! Both steps of the turn are numbered menus. Options that cannot be picked
//! are still listed, marked with the reason. Anything other than the number
//! of an available option is rejected and asked again; there is no timeout.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use super::turn::{Acquired, Origin, Turn};
use super::DecisionPolicy;
use crate::core::error::EngineError;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;

/// One line of a menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuOption {
    pub label: String,
    /// Why the option cannot be picked, if it cannot.
    pub disabled: Option<&'static str>,
}

impl MenuOption {
    fn enabled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: None,
        }
    }

    fn when(label: impl Into<String>, available: bool, reason: &'static str) -> Self {
        Self {
            label: label.into(),
            disabled: (!available).then_some(reason),
        }
    }
}

/// Menus over any reader and writer.
pub struct InteractivePolicy<R, W> {
    input: R,
    output: W,
}

impl InteractivePolicy<StdinLock<'static>, Stdout> {
    /// Menus on the process's standard input and output.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> InteractivePolicy<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Step 1 menu: draw first, then every market slot.
    #[must_use]
    pub fn acquisition_menu(turn: &Turn<'_>) -> Vec<MenuOption> {
        let mut options = vec![MenuOption::when(
            format!("Draw from the deck (cost {})", turn.draw_cost()),
            turn.can_draw(),
            "not enough cash",
        )];
        options.extend(turn.market().iter().enumerate().map(|(i, share)| {
            MenuOption::when(
                format!("Take {share} from the market"),
                turn.can_claim(i),
                "you hold this majority",
            )
        }));
        options
    }

    /// Step 2 menu: retain first, then every returnable share.
    #[must_use]
    pub fn disposal_menu(turn: &Turn<'_>, acquired: &Acquired) -> Vec<MenuOption> {
        let mut options = vec![MenuOption::enabled(format!(
            "Add {} to your portfolio",
            acquired.share()
        ))];
        options.extend(
            turn.hand()
                .iter()
                .map(|share| MenuOption::enabled(format!("Return {share} to the market"))),
        );
        options.push(MenuOption::when(
            format!("Return {} to the market", acquired.share()),
            acquired.origin() == Origin::Deck,
            "just taken from the market",
        ));
        options
    }

    /// Show a menu and read until an available option is picked.
    pub fn ask(
        &mut self,
        player: PlayerId,
        title: &str,
        options: &[MenuOption],
    ) -> Result<usize, EngineError> {
        if options.iter().all(|o| o.disabled.is_some()) {
            return Err(EngineError::NoLegalOption { player });
        }

        writeln!(self.output, "{title}")?;
        for (i, option) in options.iter().enumerate() {
            match option.disabled {
                None => writeln!(self.output, "  [{i}] {}", option.label)?,
                Some(reason) => writeln!(self.output, "  ( {i}) {} -- {reason}", option.label)?,
            }
        }

        let mut line = String::new();
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(EngineError::InputClosed { player });
            }

            let Ok(choice) = line.trim().parse::<usize>() else {
                writeln!(self.output, "Please type the number of an option.")?;
                continue;
            };
            match options.get(choice) {
                None => {
                    writeln!(self.output, "There is no option {choice}.")?;
                }
                Some(MenuOption {
                    disabled: Some(reason),
                    ..
                }) => {
                    writeln!(self.output, "Option {choice} is unavailable: {reason}.")?;
                }
                Some(option) => {
                    writeln!(self.output, "-> {}", option.label)?;
                    return Ok(choice);
                }
            }
        }
    }

    fn show_status(&mut self, turn: &Turn<'_>) -> Result<(), EngineError> {
        let hand: Vec<String> = turn.hand().iter().map(ToString::to_string).collect();
        writeln!(
            self.output,
            "{}: cash {}, hand [{}], deck {}",
            turn.player_name(),
            turn.cash(),
            hand.join(", "),
            turn.deck_len()
        )?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> DecisionPolicy for InteractivePolicy<R, W> {
    fn take_turn(&mut self, turn: &mut Turn<'_>, _rng: &mut GameRng) -> Result<(), EngineError> {
        let player = turn.player_id();
        self.show_status(turn)?;

        let options = Self::acquisition_menu(turn);
        let acquired = match self.ask(player, "Draw or take a share?", &options)? {
            0 => turn.draw()?,
            slot => turn.claim(slot - 1)?,
        };

        let options = Self::disposal_menu(turn, &acquired);
        match self.ask(player, "Keep it public or return a share?", &options)? {
            0 => turn.retain(acquired),
            slot => turn.return_share(acquired, slot - 1),
        }
    }

    fn kind(&self) -> &'static str {
        "human"
    }
}
