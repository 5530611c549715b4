//! Card catalog: minting, stat and value tables, ownership lists.
//!
//! Cards are stored one per ledger entry keyed by id. Each owner also has an
//! ordered list of the ids they hold, which is what `get_user_cards` returns
//! and what the card cap is checked against.

use soroban_sdk::{log, Address, Env, String, Vec};

use crate::events;
use crate::registry;
use crate::storage;
use crate::timing;
use crate::types::{Card, CardType, Error, LedgerConfig, Rarity};

/// Extra points a Dragon is worth on top of its rarity value.
pub const DRAGON_BONUS: u32 = 200;

/// (attack, defense) before the rarity multiplier.
pub fn base_stats(card_type: CardType) -> (u32, u32) {
    match card_type {
        CardType::Knight => (50, 50),
        CardType::Mage => (80, 20),
        CardType::Archer => (65, 35),
        CardType::Castle => (20, 100),
        CardType::Dragon => (100, 100),
        CardType::Spell => (90, 10),
    }
}

/// Rarity multiplier in percent: 1.0, 1.25, 1.5, 2.0.
pub fn rarity_multiplier_pct(rarity: Rarity) -> u32 {
    match rarity {
        Rarity::Common => 100,
        Rarity::Uncommon => 125,
        Rarity::Rare => 150,
        Rarity::Epic => 200,
    }
}

pub fn rarity_value(rarity: Rarity) -> u32 {
    match rarity {
        Rarity::Common => 100,
        Rarity::Uncommon => 250,
        Rarity::Rare => 500,
        Rarity::Epic => 1000,
    }
}

/// Final (attack, defense), truncated toward zero.
pub fn compute_stats(card_type: CardType, rarity: Rarity) -> (u32, u32) {
    let (attack, defense) = base_stats(card_type);
    let pct = rarity_multiplier_pct(rarity);
    (attack * pct / 100, defense * pct / 100)
}

/// Trade value in points. Depends only on type and rarity.
pub fn point_value(card_type: CardType, rarity: Rarity) -> u32 {
    let bonus = if card_type == CardType::Dragon { DRAGON_BONUS } else { 0 };
    rarity_value(rarity) + bonus
}

pub(crate) fn mint(
    env: &Env,
    to: &Address,
    name: String,
    card_type: CardType,
    rarity: Rarity,
    content_ref: Option<String>,
    now: u64,
    config: &LedgerConfig,
) -> Result<u64, Error> {
    let mut profile = registry::require_registered(env, to)?;

    if card_type == CardType::Dragon && rarity != Rarity::Epic {
        return Err(Error::InvalidDragonRarity);
    }

    let mut owned = storage::read_owned_cards(env, to);
    if owned.len() >= config.max_cards_per_user {
        log!(env, "card cap reached: {} of {}", owned.len(), config.max_cards_per_user);
        return Err(Error::MaxCardsExceeded);
    }

    let (attack, defense) = compute_stats(card_type, rarity);
    let card_id = storage::next_card_id(env);
    let card = Card {
        id: card_id,
        card_type,
        rarity,
        attack,
        defense,
        created_at: now,
        last_transfer_at: now,
        locked_until: 0,
        owner: to.clone(),
        name,
        content_ref,
    };
    storage::write_card(env, &card);

    owned.push_back(card_id);
    storage::write_owned_cards(env, to, &owned);

    if config.mint_resets_cooldown {
        timing::touch(&mut profile, now);
        storage::write_profile(env, to, &profile);
    }

    events::card_minted(env, card_id, to);
    Ok(card_id)
}

pub(crate) fn get(env: &Env, card_id: u64) -> Result<Card, Error> {
    storage::read_card(env, card_id).ok_or(Error::CardNotFound)
}

pub(crate) fn value(env: &Env, card_id: u64) -> Result<u32, Error> {
    let card = get(env, card_id)?;
    Ok(point_value(card.card_type, card.rarity))
}

pub(crate) fn cards_of(env: &Env, user: &Address) -> Vec<u64> {
    storage::read_owned_cards(env, user)
}

/// Whether `user` currently holds every card in `ids`. Unknown ids count as
/// not held.
pub(crate) fn owns_all(env: &Env, user: &Address, ids: &Vec<u64>) -> bool {
    ids.iter().all(|id| match storage::read_card(env, id) {
        Some(card) => card.owner == *user,
        None => false,
    })
}

/// Fails `Locked` if any card in `ids` moved in a trade less than the lock
/// duration ago.
pub(crate) fn require_unlocked(env: &Env, ids: &Vec<u64>, now: u64) -> Result<(), Error> {
    for id in ids.iter() {
        let card = get(env, id)?;
        if now < card.locked_until {
            log!(env, "card {} locked until {}", id, card.locked_until);
            return Err(Error::Locked);
        }
    }
    Ok(())
}

/// Sum of the point values of `ids`. Every id must exist.
pub(crate) fn total_value(env: &Env, ids: &Vec<u64>) -> Result<u64, Error> {
    let mut total: u64 = 0;
    for id in ids.iter() {
        total = total.saturating_add(value(env, id)? as u64);
    }
    Ok(total)
}

/// Moves `ids` from `from` to `to`, stamping each card with the transfer time
/// and the card lock. Ownership must already have been validated.
pub(crate) fn transfer_all(
    env: &Env,
    ids: &Vec<u64>,
    from: &Address,
    to: &Address,
    now: u64,
    config: &LedgerConfig,
) -> Result<(), Error> {
    if ids.is_empty() {
        return Ok(());
    }

    let mut from_cards = storage::read_owned_cards(env, from);
    let mut to_cards = storage::read_owned_cards(env, to);

    for id in ids.iter() {
        let mut card = get(env, id)?;
        card.owner = to.clone();
        card.last_transfer_at = now;
        card.locked_until = now.saturating_add(config.lock_duration);
        storage::write_card(env, &card);

        if let Some(pos) = from_cards.first_index_of(id) {
            from_cards.remove(pos);
        }
        to_cards.push_back(id);
    }

    storage::write_owned_cards(env, from, &from_cards);
    storage::write_owned_cards(env, to, &to_cards);
    Ok(())
}
