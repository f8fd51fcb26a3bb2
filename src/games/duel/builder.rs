//! Match construction.

use serde::{Deserialize, Serialize};

use super::session::{Match, MatchHandle};
use crate::cards::{CardInstance, CardRegistry, TemplateId};
use crate::core::{MatchConfig, MatchState, SetupError, SideId, SideMap};
use crate::terrain::Terrain;

/// Everything needed to recreate a match from scratch.
///
/// Decks list template ids top first: with `shuffle_decks` off, side A's
/// opening hand is the first cards of its list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSetup {
    pub seed: u64,
    pub decks: SideMap<Vec<TemplateId>>,
    pub terrains: SideMap<Terrain>,
    pub config: MatchConfig,
}

impl MatchSetup {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            decks: SideMap::new(|_| Vec::new()),
            terrains: SideMap::with_value(Terrain::Plain),
            config: MatchConfig::default(),
        }
    }

    /// Build the opening state: allocate instances (side A first), shuffle
    /// with the match seed and deal opening hands.
    pub fn initial_state(&self, registry: &CardRegistry) -> Result<MatchState, SetupError> {
        for (_, deck) in self.decks.iter() {
            if let Some(&unknown) = deck.iter().find(|&&id| !registry.contains(id)) {
                return Err(SetupError::UnknownTemplate(unknown));
            }
        }

        let mut state = MatchState::new(self.seed, self.terrains.clone(), self.config.starting_life);

        for side in SideId::BOTH {
            let mut cards: Vec<CardInstance> = self.decks[side]
                .iter()
                .map(|&template| CardInstance::new(state.ids.alloc(), template, side))
                .collect();
            if self.config.shuffle_decks {
                state.rng.shuffle(&mut cards);
            }
            // The zone keeps the top of the deck at the back.
            cards.reverse();
            state.initial_counts[side] = cards.len();
            state.sides[side].zones.set_deck(cards);
        }

        for side in SideId::BOTH {
            let zones = &mut state.sides[side].zones;
            for _ in 0..self.config.opening_hand {
                match zones.draw_top() {
                    Some(card) => zones.add_to_hand(card),
                    None => break,
                }
            }
        }

        Ok(state)
    }
}

/// Builder for creating a [`Match`].
///
/// ```
/// use duel_kernel::cards::catalog::{ids, standard_registry};
/// use duel_kernel::core::{MatchConfig, SideId};
/// use duel_kernel::games::duel::MatchBuilder;
/// use duel_kernel::terrain::Terrain;
///
/// let game = MatchBuilder::new(standard_registry().unwrap())
///     .seed(7)
///     .deck(SideId::A, vec![ids::EMBER_DRAKE; 20])
///     .deck(SideId::B, vec![ids::TIDE_SERPENT; 20])
///     .terrain(SideId::A, Terrain::Volcano)
///     .config(MatchConfig::default().unshuffled())
///     .build()
///     .unwrap();
///
/// assert_eq!(game.state().sides[SideId::A].zones.hand().len(), 5);
/// assert_eq!(game.state().sides[SideId::B].zones.deck_len(), 15);
/// ```
pub struct MatchBuilder {
    registry: CardRegistry,
    setup: MatchSetup,
}

impl MatchBuilder {
    #[must_use]
    pub fn new(registry: CardRegistry) -> Self {
        Self {
            registry,
            setup: MatchSetup::new(0),
        }
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.setup.seed = seed;
        self
    }

    #[must_use]
    pub fn deck(mut self, side: SideId, deck: impl IntoIterator<Item = TemplateId>) -> Self {
        self.setup.decks[side] = deck.into_iter().collect();
        self
    }

    #[must_use]
    pub fn terrain(mut self, side: SideId, terrain: Terrain) -> Self {
        self.setup.terrains[side] = terrain;
        self
    }

    #[must_use]
    pub fn config(mut self, config: MatchConfig) -> Self {
        self.setup.config = config;
        self
    }

    /// Build the match.
    pub fn build(self) -> Result<Match, SetupError> {
        Match::new(self.registry, self.setup)
    }

    /// Build the match behind a shared handle.
    pub fn build_handle(self) -> Result<MatchHandle, SetupError> {
        self.build().map(MatchHandle::new)
    }
}

/// Start a match with the default configuration.
pub fn new_match(
    registry: CardRegistry,
    seed: u64,
    deck_a: Vec<TemplateId>,
    deck_b: Vec<TemplateId>,
    terrain_a: Terrain,
    terrain_b: Terrain,
) -> Result<MatchHandle, SetupError> {
    MatchBuilder::new(registry)
        .seed(seed)
        .deck(SideId::A, deck_a)
        .deck(SideId::B, deck_b)
        .terrain(SideId::A, terrain_a)
        .terrain(SideId::B, terrain_b)
        .build_handle()
}
