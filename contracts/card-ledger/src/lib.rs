/*!
 * Card Ledger Smart Contract
 *
 * A trading-card economy on Soroban: players register, receive cards minted
 * by the admin, and swap cards with each other through a propose/accept
 * protocol.
 *
 * Key features:
 * - Card stats and point values derived from type and rarity at mint time
 * - Per-player card cap
 * - Fairness check on every accepted trade (lower side worth at least half)
 * - Cooldown after every mutating action and a lock after every completed trade
 * - Events for registration, minting, proposals and trade outcomes
 *
 * Business Logic:
 * 1. Players register once with a username
 * 2. The admin mints cards to registered players
 * 3. A player proposes a trade: some of their cards for some of the receiver's
 * 4. The receiver accepts (cards swap, both players are locked), or rejects
 * 5. The proposer may cancel while the trade is still pending
 *
 * Every entry point reads the ledger timestamp once and hands it to the core
 * modules as `now`. A refused action writes nothing.
 */

#![no_std]

mod catalog;
mod config;
mod events;
mod registry;
mod storage;
mod timing;
mod trade;
mod types;


use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};

pub use catalog::{base_stats, compute_stats, point_value, rarity_multiplier_pct, rarity_value, DRAGON_BONUS};
pub use config::{
    DEFAULT_COOLDOWN_DURATION, DEFAULT_LOCK_DURATION, DEFAULT_MAX_CARDS_PER_USER,
    DEFAULT_TRADE_EXPIRATION,
};
pub use events::{CARD_MINTED, TRADE_FINALIZED, TRADE_PROPOSED, USER_REGISTERED};
pub use registry::MAX_USERNAME_LEN;
pub use trade::is_fair;
pub use types::{Card, CardType, Error, LedgerConfig, Rarity, Trade, TradeStatus, UserProfile};

#[contract]
pub struct CardLedgerContract;

#[contractimpl]
impl CardLedgerContract {
    /// Sets the admin and the deployment configuration. Can only be called once.
    ///
    /// # Arguments
    /// * `admin` - The only address allowed to mint cards (must sign)
    /// * `config` - Cooldown, lock, card cap and expiration settings; `None`
    ///   selects the defaults (300s, 600s, 4 cards, 7 days)
    ///
    /// # Errors
    /// - AlreadyInitialized: If an admin is already set
    /// - InvalidConfig: If a duration or the card cap is zero
    pub fn initialize(env: Env, admin: Address, config: Option<LedgerConfig>) -> Result<(), Error> {
        config::initialize(&env, &admin, config)
    }

    // ================================================================================================
    // IDENTITY REGISTRY
    // ================================================================================================

    /// Registers the calling address as a player.
    ///
    /// # Arguments
    /// * `user` - The address registering (must sign transaction)
    /// * `username` - Display name, 1 to 20 characters, immutable afterwards
    ///
    /// # Errors
    /// - AlreadyRegistered: If the address already has a profile. Nothing is changed.
    /// - InvalidUsername: If the name is empty, longer than 20 characters or not UTF-8
    pub fn register_user(env: Env, user: Address, username: String) -> Result<(), Error> {
        user.require_auth();
        registry::register(&env, &user, username, env.ledger().timestamp())
    }

    pub fn is_registered(env: Env, user: Address) -> bool {
        registry::is_registered(&env, &user)
    }

    /// Returns the player's profile, or `None` for an unregistered address.
    pub fn get_profile(env: Env, user: Address) -> Option<UserProfile> {
        registry::profile(&env, &user)
    }

    // ================================================================================================
    // CARD CATALOG
    // ================================================================================================

    /// Mints a new card to a registered player. Admin only.
    ///
    /// Attack and defense are the type's base stats scaled by the rarity
    /// multiplier and truncated. The card gets the next sequential id.
    ///
    /// # Arguments
    /// * `to` - Recipient, must be registered
    /// * `name` - Card name
    /// * `card_type` - Knight, Mage, Archer, Castle, Dragon or Spell
    /// * `rarity` - Common, Uncommon, Rare or Epic
    /// * `content_ref` - Optional opaque pointer to the artwork
    ///
    /// # Returns
    /// The id of the new card
    ///
    /// # Errors
    /// - NotInitialized: If no admin has been set
    /// - NotRegistered: If `to` has no profile
    /// - InvalidDragonRarity: If a Dragon is requested below Epic
    /// - MaxCardsExceeded: If `to` already holds the maximum number of cards
    pub fn mint_card(
        env: Env,
        to: Address,
        name: String,
        card_type: CardType,
        rarity: Rarity,
        content_ref: Option<String>,
    ) -> Result<u64, Error> {
        config::require_admin(&env)?;
        let config = config::load(&env);
        catalog::mint(
            &env,
            &to,
            name,
            card_type,
            rarity,
            content_ref,
            env.ledger().timestamp(),
            &config,
        )
    }

    pub fn get_card(env: Env, card_id: u64) -> Result<Card, Error> {
        catalog::get(&env, card_id)
    }

    /// Point value used by the fairness check: 100, 250, 500 or 1000 by
    /// rarity, plus 200 for a Dragon.
    pub fn get_card_value(env: Env, card_id: u64) -> Result<u32, Error> {
        catalog::value(&env, card_id)
    }

    pub fn owner_of(env: Env, card_id: u64) -> Result<Address, Error> {
        Ok(catalog::get(&env, card_id)?.owner)
    }

    /// Card ids held by `user`, in the order they were acquired.
    pub fn get_user_cards(env: Env, user: Address) -> Vec<u64> {
        catalog::cards_of(&env, &user)
    }

    // ================================================================================================
    // TIMING GATE
    // ================================================================================================

    /// Whether `user` may propose or accept a trade right now.
    ///
    /// # Returns
    /// `(true, "")`, or `(false, reason)` with reason `Cooldown`, `Locked`
    /// or `NotRegistered`
    pub fn can_transact_now(env: Env, user: Address) -> (bool, String) {
        let verdict = registry::require_registered(&env, &user).and_then(|profile| {
            timing::can_transact(&profile, env.ledger().timestamp(), &config::load(&env))
        });
        match verdict {
            Ok(()) => (true, String::from_str(&env, "")),
            Err(err) => (false, String::from_str(&env, timing::reason(err))),
        }
    }

    // ================================================================================================
    // TRADE ENGINE
    // ================================================================================================

    /// Proposes a card swap to another player.
    ///
    /// # Business Flow
    /// 1. Both players must be registered and distinct
    /// 2. At least one card must be listed, each id at most once
    /// 3. The proposer must hold every offered card, the receiver every requested card,
    ///    and none of them may still be locked from a previous trade
    /// 4. The proposer must be outside their cooldown and lock windows
    /// 5. A pending trade is stored and the proposer's cooldown restarts
    ///
    /// # Arguments
    /// * `proposer` - The address proposing (must sign transaction)
    /// * `receiver` - The counterparty
    /// * `offered_cards` - Proposer's cards to give
    /// * `requested_cards` - Receiver's cards to get
    ///
    /// # Returns
    /// The id of the new trade
    ///
    /// # Errors
    /// - NotRegistered, SelfTrade, NoCardsSelected, DuplicateCard, NotOwner
    /// - Cooldown / Locked: From the proposer's timing gate, or Locked for a locked card
    pub fn propose_trade(
        env: Env,
        proposer: Address,
        receiver: Address,
        offered_cards: Vec<u64>,
        requested_cards: Vec<u64>,
    ) -> Result<u64, Error> {
        proposer.require_auth();
        let config = config::load(&env);
        trade::propose(
            &env,
            &proposer,
            &receiver,
            offered_cards,
            requested_cards,
            env.ledger().timestamp(),
            &config,
        )
    }

    /// Accepts a pending trade and swaps the cards.
    ///
    /// # Security Checks
    /// - Only the receiver can accept, and only while the trade is pending and unexpired
    /// - Ownership of every listed card is checked again, and no card may be locked
    /// - The receiver must be outside their cooldown and lock windows
    /// - The lower-valued side must be worth at least half the higher-valued side
    /// - Neither player may end up above the card cap
    ///
    /// On success both players' `trades_completed` is incremented and both
    /// are locked for the lock duration.
    ///
    /// # Errors
    /// - TradeNotFound, NotReceiver, NotPending, TradeExpired
    /// - NotOwner: If a listed card changed hands since the proposal
    /// - Cooldown / Locked: From the receiver's timing gate, or Locked for a locked card
    /// - Unfair, MaxCardsExceeded
    pub fn accept_trade(env: Env, receiver: Address, trade_id: u64) -> Result<(), Error> {
        receiver.require_auth();
        let config = config::load(&env);
        trade::accept(&env, &receiver, trade_id, env.ledger().timestamp(), &config)
    }

    /// Declines a pending trade. No ownership or fairness checks.
    ///
    /// # Errors
    /// - TradeNotFound, NotReceiver, NotPending
    pub fn reject_trade(env: Env, receiver: Address, trade_id: u64) -> Result<(), Error> {
        receiver.require_auth();
        trade::reject(&env, &receiver, trade_id, env.ledger().timestamp())
    }

    /// Withdraws a pending trade.
    ///
    /// # Errors
    /// - TradeNotFound, NotProposer, NotPending
    pub fn cancel_trade(env: Env, proposer: Address, trade_id: u64) -> Result<(), Error> {
        proposer.require_auth();
        trade::cancel(&env, &proposer, trade_id, env.ledger().timestamp())
    }

    pub fn get_trade(env: Env, trade_id: u64) -> Result<Trade, Error> {
        trade::get(&env, trade_id)
    }

    /// Pending trades involving `user` as proposer or receiver, oldest first.
    pub fn get_pending_trades(env: Env, user: Address) -> Vec<u64> {
        trade::pending_for(&env, &user)
    }

    // ================================================================================================
    // QUERY FUNCTIONS (CONFIGURATION)
    // ================================================================================================

    pub fn get_admin(env: Env) -> Result<Address, Error> {
        config::admin(&env)
    }

    pub fn get_config(env: Env) -> LedgerConfig {
        config::load(&env)
    }

    pub fn cooldown_duration(env: Env) -> u64 {
        config::load(&env).cooldown_duration
    }

    pub fn lock_duration(env: Env) -> u64 {
        config::load(&env).lock_duration
    }

    pub fn max_cards_per_user(env: Env) -> u32 {
        config::load(&env).max_cards_per_user
    }

    pub fn trade_expiration(env: Env) -> u64 {
        config::load(&env).trade_expiration
    }

    /// The id the next minted card will receive.
    pub fn get_next_card_id(env: Env) -> u64 {
        storage::peek_next_card_id(&env)
    }

    /// The id the next proposed trade will receive.
    pub fn get_next_trade_id(env: Env) -> u64 {
        storage::peek_next_trade_id(&env)
    }
}
