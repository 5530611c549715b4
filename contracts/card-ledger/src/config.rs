//! Deployment configuration and the contract admin.
//!
//! The configuration is written once by `initialize` and has no setters.
//! Reads before initialization fall back to the defaults below so that the
//! registry and trade engine work on a fresh deployment.

use soroban_sdk::{Address, Env};

use crate::storage;
use crate::types::{Error, LedgerConfig};

pub const DEFAULT_COOLDOWN_DURATION: u64 = 300; // 5 minutes
pub const DEFAULT_LOCK_DURATION: u64 = 600; // 10 minutes
pub const DEFAULT_MAX_CARDS_PER_USER: u32 = 4;
pub const DEFAULT_TRADE_EXPIRATION: u64 = 7 * 24 * 60 * 60; // 7 days

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            cooldown_duration: DEFAULT_COOLDOWN_DURATION,
            lock_duration: DEFAULT_LOCK_DURATION,
            max_cards_per_user: DEFAULT_MAX_CARDS_PER_USER,
            trade_expiration: DEFAULT_TRADE_EXPIRATION,
            mint_resets_cooldown: false,
        }
    }
}

impl LedgerConfig {
    fn validate(&self) -> Result<(), Error> {
        if self.cooldown_duration == 0
            || self.lock_duration == 0
            || self.max_cards_per_user == 0
            || self.trade_expiration == 0
        {
            return Err(Error::InvalidConfig);
        }
        Ok(())
    }
}

/// One-shot setup. Stores the admin (the only address allowed to mint) and
/// the configuration, or the defaults when `config` is `None`.
pub(crate) fn initialize(
    env: &Env,
    admin: &Address,
    config: Option<LedgerConfig>,
) -> Result<(), Error> {
    if storage::has_admin(env) {
        return Err(Error::AlreadyInitialized);
    }
    admin.require_auth();

    let config = config.unwrap_or_default();
    config.validate()?;

    storage::write_admin(env, admin);
    storage::write_config(env, &config);
    Ok(())
}

pub(crate) fn load(env: &Env) -> LedgerConfig {
    storage::read_config(env).unwrap_or_default()
}

pub(crate) fn admin(env: &Env) -> Result<Address, Error> {
    storage::read_admin(env).ok_or(Error::NotInitialized)
}

/// Fails unless the contract is initialized and the admin signed the
/// invocation.
pub(crate) fn require_admin(env: &Env) -> Result<Address, Error> {
    let admin = admin(env)?;
    admin.require_auth();
    Ok(admin)
}
