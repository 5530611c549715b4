// ================================================================================================
// EVENTS
// ================================================================================================
// Published once per successful state transition so that frontends and
// indexers can follow the ledger without polling. Nothing is published on a
// rejected action.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::types::TradeStatus;

/// Topics: (USER_REGISTERED, user). Data: ()
pub const USER_REGISTERED: Symbol = symbol_short!("usr_reg");

/// Topics: (CARD_MINTED, owner). Data: card_id
pub const CARD_MINTED: Symbol = symbol_short!("card_mint");

/// Topics: (TRADE_PROPOSED, proposer, receiver). Data: trade_id
pub const TRADE_PROPOSED: Symbol = symbol_short!("trd_prop");

/// Topics: (TRADE_FINALIZED, trade_id). Data: final status
pub const TRADE_FINALIZED: Symbol = symbol_short!("trd_fin");

pub(crate) fn user_registered(env: &Env, user: &Address) {
    env.events().publish((USER_REGISTERED, user.clone()), ());
}

pub(crate) fn card_minted(env: &Env, card_id: u64, owner: &Address) {
    env.events().publish((CARD_MINTED, owner.clone()), card_id);
}

pub(crate) fn trade_proposed(env: &Env, trade_id: u64, proposer: &Address, receiver: &Address) {
    env.events()
        .publish((TRADE_PROPOSED, proposer.clone(), receiver.clone()), trade_id);
}

pub(crate) fn trade_finalized(env: &Env, trade_id: u64, status: TradeStatus) {
    env.events().publish((TRADE_FINALIZED, trade_id), status);
}
