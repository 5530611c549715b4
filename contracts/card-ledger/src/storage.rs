//! Ledger storage layout.
//!
//! Per-record data (profiles, cards, trades, ownership lists) lives in
//! persistent storage, one entry per key, so no action has to load a whole
//! table. Admin, configuration and id counters live in instance storage.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::{Card, LedgerConfig, Trade, UserProfile};

/// Entries are extended to ~150 days whenever they are written with less
/// than ~30 days left (5 second ledgers).
pub(crate) const RECORD_TTL_THRESHOLD: u32 = 518_400;
pub(crate) const RECORD_TTL_EXTEND: u32 = 2_592_000;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Config,
    NextCardId,
    NextTradeId,
    Profile(Address),
    Card(u64),
    /// Card ids held by a player, in acquisition order
    OwnedCards(Address),
    Trade(u64),
    /// Ids of the still-pending trades a player proposed or received
    UserTrades(Address),
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(RECORD_TTL_THRESHOLD, RECORD_TTL_EXTEND);
}

fn bump(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, RECORD_TTL_THRESHOLD, RECORD_TTL_EXTEND);
}

// ---------- instance ----------

pub(crate) fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub(crate) fn read_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Admin)
}

pub(crate) fn write_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    bump_instance(env);
}

pub(crate) fn read_config(env: &Env) -> Option<LedgerConfig> {
    env.storage().instance().get(&DataKey::Config)
}

pub(crate) fn write_config(env: &Env, config: &LedgerConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

/// Returns the next id for `key` and advances the counter. Ids start at 1.
fn next_id(env: &Env, key: &DataKey) -> u64 {
    let id: u64 = env.storage().instance().get(key).unwrap_or(1);
    env.storage().instance().set(key, &id.saturating_add(1));
    bump_instance(env);
    id
}

pub(crate) fn next_card_id(env: &Env) -> u64 {
    next_id(env, &DataKey::NextCardId)
}

pub(crate) fn next_trade_id(env: &Env) -> u64 {
    next_id(env, &DataKey::NextTradeId)
}

pub(crate) fn peek_next_card_id(env: &Env) -> u64 {
    env.storage().instance().get(&DataKey::NextCardId).unwrap_or(1)
}

pub(crate) fn peek_next_trade_id(env: &Env) -> u64 {
    env.storage().instance().get(&DataKey::NextTradeId).unwrap_or(1)
}

// ---------- profiles ----------

pub(crate) fn read_profile(env: &Env, user: &Address) -> Option<UserProfile> {
    env.storage()
        .persistent()
        .get(&DataKey::Profile(user.clone()))
}

pub(crate) fn write_profile(env: &Env, user: &Address, profile: &UserProfile) {
    let key = DataKey::Profile(user.clone());
    env.storage().persistent().set(&key, profile);
    bump(env, &key);
}

// ---------- cards ----------

pub(crate) fn read_card(env: &Env, card_id: u64) -> Option<Card> {
    env.storage().persistent().get(&DataKey::Card(card_id))
}

pub(crate) fn write_card(env: &Env, card: &Card) {
    let key = DataKey::Card(card.id);
    env.storage().persistent().set(&key, card);
    bump(env, &key);
}

pub(crate) fn read_owned_cards(env: &Env, user: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::OwnedCards(user.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

pub(crate) fn write_owned_cards(env: &Env, user: &Address, cards: &Vec<u64>) {
    let key = DataKey::OwnedCards(user.clone());
    env.storage().persistent().set(&key, cards);
    bump(env, &key);
}

// ---------- trades ----------

pub(crate) fn read_trade(env: &Env, trade_id: u64) -> Option<Trade> {
    env.storage().persistent().get(&DataKey::Trade(trade_id))
}

pub(crate) fn write_trade(env: &Env, trade: &Trade) {
    let key = DataKey::Trade(trade.id);
    env.storage().persistent().set(&key, trade);
    bump(env, &key);
}

pub(crate) fn read_user_trades(env: &Env, user: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::UserTrades(user.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

pub(crate) fn append_user_trade(env: &Env, user: &Address, trade_id: u64) {
    let mut ids = read_user_trades(env, user);
    ids.push_back(trade_id);
    let key = DataKey::UserTrades(user.clone());
    env.storage().persistent().set(&key, &ids);
    bump(env, &key);
}

/// Drops a finalized trade from the player's index. The entry is removed
/// once it is empty.
pub(crate) fn remove_user_trade(env: &Env, user: &Address, trade_id: u64) {
    let mut ids = read_user_trades(env, user);
    let Some(pos) = ids.first_index_of(trade_id) else {
        return;
    };
    ids.remove(pos);

    let key = DataKey::UserTrades(user.clone());
    if ids.is_empty() {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &ids);
        bump(env, &key);
    }
}
