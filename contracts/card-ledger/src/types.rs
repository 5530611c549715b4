/*!
 * Type Definitions for the Card Ledger Smart Contract
 *
 * Data structures, enums and the error taxonomy shared by the registry,
 * catalog, timing and trade modules. Every record is a `#[contracttype]` so it
 * can be written to ledger storage as-is.
 */

use soroban_sdk::{contracterror, contracttype, Address, String, Vec};

// ================================================================================================
// PLAYER PROFILES
// ================================================================================================

/// A registered player.
///
/// Created once by `register_user` and never deleted. The username is
/// immutable after registration; the counters and timestamps are updated by
/// the timing gate and by completed trades.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserProfile {
    pub registered: bool,

    /// Display name, 1 to 20 bytes
    pub username: String,

    /// Incremented once for each accepted trade the player took part in
    pub trades_completed: u32,

    /// Ledger timestamp of the last mutating action attributed to the player.
    /// The cooldown is measured from here.
    pub last_activity_at: u64,

    /// The player cannot propose or accept trades before this timestamp.
    /// Set on both participants when a trade is accepted.
    pub locked_until: u64,

    pub registered_at: u64,
}

// ================================================================================================
// CARDS
// ================================================================================================

/// Card archetype. Discriminants are part of the public ABI.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum CardType {
    Knight = 0,
    Mage = 1,
    Archer = 2,
    Castle = 3,
    /// Only legal at `Rarity::Epic`
    Dragon = 4,
    Spell = 5,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
}

/// A minted card.
///
/// Stats are computed once at mint time and never change. Ownership moves
/// only through an accepted trade.
///
/// # Timestamps
/// - `created_at` is fixed at mint
/// - `last_transfer_at` starts at `created_at` and follows every ownership change
/// - `locked_until` is pushed forward by the lock duration when the card
///   changes hands. Until then the card cannot be listed in a new proposal
///   and a pending trade listing it cannot be accepted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Card {
    pub id: u64,
    pub card_type: CardType,
    pub rarity: Rarity,
    pub attack: u32,
    pub defense: u32,
    pub created_at: u64,
    pub last_transfer_at: u64,
    pub locked_until: u64,
    pub owner: Address,
    pub name: String,

    /// Opaque pointer to off-chain artwork (e.g. `ipfs://...`). Never
    /// interpreted by the contract.
    pub content_ref: Option<String>,
}

// ================================================================================================
// TRADES
// ================================================================================================

/// Lifecycle of a trade proposal.
///
/// # State Transition Rules
/// - Pending → Accepted (receiver accepts, cards are swapped)
/// - Pending → Rejected (receiver declines)
/// - Pending → Cancelled (proposer withdraws)
///
/// Every state other than `Pending` is final.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TradeStatus {
    Pending = 0,
    Accepted = 1,
    Rejected = 2,
    Cancelled = 3,
}

/// A card-for-card swap proposed by `proposer` to `receiver`.
///
/// Card ids in a pending trade are not reserved: the same card may appear in
/// several pending proposals. Ownership is checked again when the trade is
/// accepted, so a proposal made stale by an earlier trade fails then.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Trade {
    pub id: u64,
    pub proposer: Address,
    pub receiver: Address,

    /// Cards owned by the proposer at proposal time, moving to the receiver
    pub offered_cards: Vec<u64>,

    /// Cards owned by the receiver at proposal time, moving to the proposer
    pub requested_cards: Vec<u64>,

    pub status: TradeStatus,
    pub created_at: u64,

    /// The trade can no longer be accepted at or after this timestamp
    pub expires_at: u64,
}

// ================================================================================================
// CONFIGURATION
// ================================================================================================

/// Deployment-time parameters. Written once by `initialize`, read-only after.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerConfig {
    /// Seconds a player must wait after any mutating action before proposing
    /// or accepting a trade
    pub cooldown_duration: u64,

    /// Seconds both participants are locked out after an accepted trade
    pub lock_duration: u64,

    pub max_cards_per_user: u32,

    /// Seconds a proposal stays acceptable
    pub trade_expiration: u64,

    /// When set, receiving a freshly minted card restarts the recipient's
    /// cooldown
    pub mint_resets_cooldown: bool,
}

// ================================================================================================
// ERROR DEFINITIONS
// ================================================================================================

/// Every way a ledger action can be refused.
///
/// All variants are recoverable validation failures: the action is rejected
/// before any state is written and may be retried once the condition changes.
///
/// # Error Code Ranges
/// - 1-3: Contract setup
/// - 4-6: Registration
/// - 7-9: Cards
/// - 10-17: Trade validation
/// - 18-21: Timing, fairness and expiry
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ========== Contract Setup (1-3) ==========
    AlreadyInitialized = 1,

    /// Admin-only action attempted before `initialize`
    NotInitialized = 2,

    /// A configured duration or the card cap is zero
    InvalidConfig = 3,

    // ========== Registration (4-6) ==========
    AlreadyRegistered = 4,
    NotRegistered = 5,

    /// Username is empty or longer than 20 bytes
    InvalidUsername = 6,

    // ========== Cards (7-9) ==========
    /// Dragons can only be minted at Epic rarity
    InvalidDragonRarity = 7,

    /// The player already holds (or would hold) more than the card cap
    MaxCardsExceeded = 8,

    CardNotFound = 9,

    // ========== Trade Validation (10-17) ==========
    TradeNotFound = 10,

    /// Both the offered and the requested lists are empty
    NoCardsSelected = 11,

    /// A listed card is not held by the party expected to give it up
    NotOwner = 12,

    NotReceiver = 13,
    NotProposer = 14,

    /// The trade has already been accepted, rejected or cancelled
    NotPending = 15,

    /// Proposer and receiver are the same player
    SelfTrade = 16,

    /// A card id is listed more than once
    DuplicateCard = 17,

    // ========== Timing and Fairness (18-21) ==========
    /// The player acted less than the cooldown duration ago
    Cooldown = 18,

    /// The player is inside the post-trade lock window
    Locked = 19,

    /// The lower-valued side is worth less than half of the higher-valued side
    Unfair = 20,

    TradeExpired = 21,
}
