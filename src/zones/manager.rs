//! Per-side zone storage and card movement.
//!
//! Each side owns one `ZoneManager` holding its five zones:
//! - Deck and graveyard are ordered; the top is the back of the vector
//! - Hand is a plain list in draw order
//! - Monster and spell/trap zones are fixed arrays of `SLOT_COUNT` slots
//!
//! Piles use `im::Vector` so cloning a whole match state for staging is
//! cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{CardInstance, MonsterCard, SetCard};
use crate::core::entity::InstanceId;

/// Slots in the monster zone and in the spell/trap zone.
pub const SLOT_COUNT: usize = 5;

/// The five zone kinds a side owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    Deck,
    Hand,
    Monster,
    SpellTrap,
    Graveyard,
}

/// Where a card sits within one side's zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZonePosition {
    pub zone: ZoneKind,
    /// Pile index (0 = bottom) or slot index.
    pub index: usize,
}

/// One side's zones.
///
/// ## Usage
///
/// ```
/// use duel_kernel::cards::{CardInstance, TemplateId};
/// use duel_kernel::core::{InstanceId, SideId};
/// use duel_kernel::zones::{ZoneKind, ZoneManager};
///
/// let mut zones = ZoneManager::new();
/// zones.push_deck(CardInstance::new(InstanceId(1), TemplateId(101), SideId::A));
/// zones.push_deck(CardInstance::new(InstanceId(2), TemplateId(102), SideId::A));
///
/// let drawn = zones.draw_top().unwrap();
/// assert_eq!(drawn.id, InstanceId(2));
/// zones.add_to_hand(drawn);
///
/// assert_eq!(zones.locate(InstanceId(2)).map(|p| p.zone), Some(ZoneKind::Hand));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneManager {
    deck: Vector<CardInstance>,
    hand: Vector<CardInstance>,
    monsters: [Option<MonsterCard>; SLOT_COUNT],
    spell_traps: [Option<SetCard>; SLOT_COUNT],
    graveyard: Vector<CardInstance>,
}

impl ZoneManager {
    /// Create empty zones.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Deck ===

    /// Put a card on top of the deck.
    pub fn push_deck(&mut self, card: CardInstance) {
        self.deck.push_back(card);
    }

    /// Remove and return the top card of the deck.
    pub fn draw_top(&mut self) -> Option<CardInstance> {
        self.deck.pop_back()
    }

    #[must_use]
    pub fn deck(&self) -> &Vector<CardInstance> {
        &self.deck
    }

    #[must_use]
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    /// Replace the deck order (bottom first).
    pub fn set_deck(&mut self, cards: Vec<CardInstance>) {
        self.deck = cards.into_iter().collect();
    }

    // === Hand ===

    pub fn add_to_hand(&mut self, card: CardInstance) {
        self.hand.push_back(card);
    }

    #[must_use]
    pub fn hand(&self) -> &Vector<CardInstance> {
        &self.hand
    }

    #[must_use]
    pub fn hand_card(&self, index: usize) -> Option<&CardInstance> {
        self.hand.get(index)
    }

    /// Remove the card at `index`, keeping the order of the rest.
    pub fn take_from_hand(&mut self, index: usize) -> Option<CardInstance> {
        if index < self.hand.len() {
            Some(self.hand.remove(index))
        } else {
            None
        }
    }

    // === Monster zone ===

    #[must_use]
    pub fn monsters(&self) -> &[Option<MonsterCard>; SLOT_COUNT] {
        &self.monsters
    }

    #[must_use]
    pub fn monster(&self, slot: usize) -> Option<&MonsterCard> {
        self.monsters.get(slot).and_then(Option::as_ref)
    }

    pub fn monster_mut(&mut self, slot: usize) -> Option<&mut MonsterCard> {
        self.monsters.get_mut(slot).and_then(Option::as_mut)
    }

    /// Occupied monster slots with their monsters, in slot order.
    pub fn occupied_monsters(&self) -> impl Iterator<Item = (usize, &MonsterCard)> {
        self.monsters
            .iter()
            .enumerate()
            .filter_map(|(slot, m)| m.as_ref().map(|m| (slot, m)))
    }

    /// Mutable counterpart of [`Self::occupied_monsters`].
    pub fn occupied_monsters_mut(&mut self) -> impl Iterator<Item = (usize, &mut MonsterCard)> {
        self.monsters
            .iter_mut()
            .enumerate()
            .filter_map(|(slot, m)| m.as_mut().map(|m| (slot, m)))
    }

    #[must_use]
    pub fn first_occupied_monster(&self) -> Option<usize> {
        self.occupied_monsters().next().map(|(slot, _)| slot)
    }

    #[must_use]
    pub fn first_empty_monster_slot(&self) -> Option<usize> {
        self.monsters.iter().position(Option::is_none)
    }

    #[must_use]
    pub fn has_monsters(&self) -> bool {
        self.monsters.iter().any(Option::is_some)
    }

    /// Put a monster into an empty slot. Returns the monster back if the
    /// slot is out of range or occupied.
    pub fn place_monster(&mut self, slot: usize, monster: MonsterCard) -> Result<(), MonsterCard> {
        match self.monsters.get_mut(slot) {
            Some(entry @ None) => {
                *entry = Some(monster);
                Ok(())
            }
            _ => Err(monster),
        }
    }

    pub fn take_monster(&mut self, slot: usize) -> Option<MonsterCard> {
        self.monsters.get_mut(slot).and_then(Option::take)
    }

    // === Spell/trap zone ===

    #[must_use]
    pub fn spell_traps(&self) -> &[Option<SetCard>; SLOT_COUNT] {
        &self.spell_traps
    }

    #[must_use]
    pub fn spell_trap(&self, slot: usize) -> Option<&SetCard> {
        self.spell_traps.get(slot).and_then(Option::as_ref)
    }

    pub fn spell_trap_mut(&mut self, slot: usize) -> Option<&mut SetCard> {
        self.spell_traps.get_mut(slot).and_then(Option::as_mut)
    }

    pub fn place_spell_trap(&mut self, slot: usize, card: SetCard) -> Result<(), SetCard> {
        match self.spell_traps.get_mut(slot) {
            Some(entry @ None) => {
                *entry = Some(card);
                Ok(())
            }
            _ => Err(card),
        }
    }

    pub fn take_spell_trap(&mut self, slot: usize) -> Option<SetCard> {
        self.spell_traps.get_mut(slot).and_then(Option::take)
    }

    // === Graveyard ===

    /// Push a card onto the graveyard.
    pub fn bury(&mut self, card: CardInstance) {
        self.graveyard.push_back(card);
    }

    #[must_use]
    pub fn graveyard(&self) -> &Vector<CardInstance> {
        &self.graveyard
    }

    /// Remove the graveyard card at `index`, keeping the order of the rest.
    pub fn take_from_graveyard(&mut self, index: usize) -> Option<CardInstance> {
        if index < self.graveyard.len() {
            Some(self.graveyard.remove(index))
        } else {
            None
        }
    }

    // === Lookup ===

    /// Every card in these zones, zone by zone.
    pub fn all_cards(&self) -> impl Iterator<Item = &CardInstance> {
        self.deck
            .iter()
            .chain(self.hand.iter())
            .chain(self.monsters.iter().flatten().map(|m| &m.card))
            .chain(self.spell_traps.iter().flatten().map(|s| &s.card))
            .chain(self.graveyard.iter())
    }

    /// Number of cards across all zones.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.all_cards().count()
    }

    /// Find a card by instance id.
    #[must_use]
    pub fn locate(&self, id: InstanceId) -> Option<ZonePosition> {
        let at = |zone, index| Some(ZonePosition { zone, index });

        if let Some(i) = self.deck.iter().position(|c| c.id == id) {
            return at(ZoneKind::Deck, i);
        }
        if let Some(i) = self.hand.iter().position(|c| c.id == id) {
            return at(ZoneKind::Hand, i);
        }
        if let Some(i) = self
            .monsters
            .iter()
            .position(|m| m.as_ref().map_or(false, |m| m.id() == id))
        {
            return at(ZoneKind::Monster, i);
        }
        if let Some(i) = self
            .spell_traps
            .iter()
            .position(|s| s.as_ref().map_or(false, |s| s.id() == id))
        {
            return at(ZoneKind::SpellTrap, i);
        }
        self.graveyard
            .iter()
            .position(|c| c.id == id)
            .and_then(|i| at(ZoneKind::Graveyard, i))
    }
}
