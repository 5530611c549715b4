//! Trade engine.
//!
//! A trade is proposed by one registered player to another and then moves
//! exactly once from `Pending` to `Accepted`, `Rejected` or `Cancelled`.
//! Each operation runs every check before writing anything, so a refused
//! action leaves profiles, cards and trades as they were.

use soroban_sdk::{log, Address, Env, Map, Vec};

use crate::catalog;
use crate::events;
use crate::registry;
use crate::storage;
use crate::timing;
use crate::types::{Error, LedgerConfig, Trade, TradeStatus};

/// `true` when the lower side is worth at least half of the higher side.
/// Two empty sides are trivially fair.
pub fn is_fair(offered_value: u64, requested_value: u64) -> bool {
    let (low, high) = if offered_value <= requested_value {
        (offered_value, requested_value)
    } else {
        (requested_value, offered_value)
    };
    if high == 0 {
        return true;
    }
    low.saturating_mul(2) >= high
}

/// Rejects a card id that appears twice across the two lists.
fn require_distinct(env: &Env, offered: &Vec<u64>, requested: &Vec<u64>) -> Result<(), Error> {
    let mut seen: Map<u64, bool> = Map::new(env);
    for id in offered.iter().chain(requested.iter()) {
        if seen.contains_key(id) {
            return Err(Error::DuplicateCard);
        }
        seen.set(id, true);
    }
    Ok(())
}

fn load(env: &Env, trade_id: u64) -> Result<Trade, Error> {
    storage::read_trade(env, trade_id).ok_or(Error::TradeNotFound)
}

/// Stores the terminal status and drops the trade from both players'
/// pending indexes.
fn finalize(env: &Env, trade: &mut Trade, status: TradeStatus) {
    trade.status = status;
    storage::write_trade(env, trade);
    storage::remove_user_trade(env, &trade.proposer, trade.id);
    storage::remove_user_trade(env, &trade.receiver, trade.id);
    events::trade_finalized(env, trade.id, status);
}

pub(crate) fn propose(
    env: &Env,
    proposer: &Address,
    receiver: &Address,
    offered: Vec<u64>,
    requested: Vec<u64>,
    now: u64,
    config: &LedgerConfig,
) -> Result<u64, Error> {
    let mut proposer_profile = registry::require_registered(env, proposer)?;
    registry::require_registered(env, receiver)?;

    if proposer == receiver {
        return Err(Error::SelfTrade);
    }
    if offered.is_empty() && requested.is_empty() {
        return Err(Error::NoCardsSelected);
    }
    require_distinct(env, &offered, &requested)?;

    if !catalog::owns_all(env, proposer, &offered) || !catalog::owns_all(env, receiver, &requested) {
        return Err(Error::NotOwner);
    }
    catalog::require_unlocked(env, &offered, now)?;
    catalog::require_unlocked(env, &requested, now)?;

    timing::require_transactable(env, &proposer_profile, now, config)?;

    let trade_id = storage::next_trade_id(env);
    let trade = Trade {
        id: trade_id,
        proposer: proposer.clone(),
        receiver: receiver.clone(),
        offered_cards: offered,
        requested_cards: requested,
        status: TradeStatus::Pending,
        created_at: now,
        expires_at: now.saturating_add(config.trade_expiration),
    };
    storage::write_trade(env, &trade);
    storage::append_user_trade(env, proposer, trade_id);
    storage::append_user_trade(env, receiver, trade_id);

    timing::touch(&mut proposer_profile, now);
    storage::write_profile(env, proposer, &proposer_profile);

    events::trade_proposed(env, trade_id, proposer, receiver);
    Ok(trade_id)
}

pub(crate) fn accept(
    env: &Env,
    receiver: &Address,
    trade_id: u64,
    now: u64,
    config: &LedgerConfig,
) -> Result<(), Error> {
    let mut trade = load(env, trade_id)?;
    if trade.receiver != *receiver {
        return Err(Error::NotReceiver);
    }
    if trade.status != TradeStatus::Pending {
        return Err(Error::NotPending);
    }
    if now >= trade.expires_at {
        return Err(Error::TradeExpired);
    }

    // The cards may have changed hands since the proposal.
    if !catalog::owns_all(env, &trade.proposer, &trade.offered_cards)
        || !catalog::owns_all(env, receiver, &trade.requested_cards)
    {
        return Err(Error::NotOwner);
    }
    catalog::require_unlocked(env, &trade.offered_cards, now)?;
    catalog::require_unlocked(env, &trade.requested_cards, now)?;

    let mut receiver_profile = registry::require_registered(env, receiver)?;
    let mut proposer_profile = registry::require_registered(env, &trade.proposer)?;
    timing::require_transactable(env, &receiver_profile, now, config)?;

    let offered_value = catalog::total_value(env, &trade.offered_cards)?;
    let requested_value = catalog::total_value(env, &trade.requested_cards)?;
    if !is_fair(offered_value, requested_value) {
        log!(env, "unfair trade {}: offered {} vs requested {}", trade_id, offered_value, requested_value);
        return Err(Error::Unfair);
    }

    let offered_count = trade.offered_cards.len();
    let requested_count = trade.requested_cards.len();
    let proposer_after = catalog::cards_of(env, &trade.proposer)
        .len()
        .saturating_sub(offered_count)
        + requested_count;
    let receiver_after = catalog::cards_of(env, receiver)
        .len()
        .saturating_sub(requested_count)
        + offered_count;
    if proposer_after > config.max_cards_per_user || receiver_after > config.max_cards_per_user {
        log!(env, "trade {} would exceed card cap: {} / {}", trade_id, proposer_after, receiver_after);
        return Err(Error::MaxCardsExceeded);
    }

    // Every check passed: apply the full effect set.
    catalog::transfer_all(env, &trade.offered_cards, &trade.proposer, receiver, now, config)?;
    catalog::transfer_all(env, &trade.requested_cards, receiver, &trade.proposer, now, config)?;

    for profile in [&mut proposer_profile, &mut receiver_profile] {
        profile.trades_completed = profile.trades_completed.saturating_add(1);
        timing::touch(profile, now);
        timing::lock(profile, now, config);
    }
    storage::write_profile(env, &trade.proposer, &proposer_profile);
    storage::write_profile(env, receiver, &receiver_profile);

    finalize(env, &mut trade, TradeStatus::Accepted);
    Ok(())
}

pub(crate) fn reject(env: &Env, receiver: &Address, trade_id: u64, now: u64) -> Result<(), Error> {
    let mut trade = load(env, trade_id)?;
    if trade.receiver != *receiver {
        return Err(Error::NotReceiver);
    }
    if trade.status != TradeStatus::Pending {
        return Err(Error::NotPending);
    }
    let mut profile = registry::require_registered(env, receiver)?;

    timing::touch(&mut profile, now);
    storage::write_profile(env, receiver, &profile);

    finalize(env, &mut trade, TradeStatus::Rejected);
    Ok(())
}

pub(crate) fn cancel(env: &Env, proposer: &Address, trade_id: u64, now: u64) -> Result<(), Error> {
    let mut trade = load(env, trade_id)?;
    if trade.proposer != *proposer {
        return Err(Error::NotProposer);
    }
    if trade.status != TradeStatus::Pending {
        return Err(Error::NotPending);
    }
    let mut profile = registry::require_registered(env, proposer)?;

    timing::touch(&mut profile, now);
    storage::write_profile(env, proposer, &profile);

    finalize(env, &mut trade, TradeStatus::Cancelled);
    Ok(())
}

pub(crate) fn get(env: &Env, trade_id: u64) -> Result<Trade, Error> {
    load(env, trade_id)
}

/// Pending trades in which `user` is proposer or receiver, oldest first.
/// Expired trades stay listed until someone rejects or cancels them.
pub(crate) fn pending_for(env: &Env, user: &Address) -> Vec<u64> {
    let mut pending = Vec::new(env);
    for id in storage::read_user_trades(env, user).iter() {
        if let Some(trade) = storage::read_trade(env, id) {
            if trade.status == TradeStatus::Pending {
                pending.push_back(id);
            }
        }
    }
    pending
}
