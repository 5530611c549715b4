//! Timing gate: per-player cooldown and post-trade lock.
//!
//! Both windows are stored on the profile. Callers pass the ledger timestamp
//! in as `now`; nothing here reads a clock.

use soroban_sdk::{log, Env};

use crate::types::{Error, LedgerConfig, UserProfile};

/// `Cooldown` while `now` is inside the cooldown window, then `Locked` while
/// inside the lock window, otherwise Ok. Cooldown wins when both apply.
pub(crate) fn can_transact(profile: &UserProfile, now: u64, config: &LedgerConfig) -> Result<(), Error> {
    if now < profile.last_activity_at.saturating_add(config.cooldown_duration) {
        return Err(Error::Cooldown);
    }
    if now < profile.locked_until {
        return Err(Error::Locked);
    }
    Ok(())
}

/// Same check as [`can_transact`], with a log line on refusal.
pub(crate) fn require_transactable(
    env: &Env,
    profile: &UserProfile,
    now: u64,
    config: &LedgerConfig,
) -> Result<(), Error> {
    can_transact(profile, now, config).map_err(|err| {
        log!(
            env,
            "timing gate refused: now {}, last activity {}, locked until {}",
            now,
            profile.last_activity_at,
            profile.locked_until
        );
        err
    })
}

pub(crate) fn touch(profile: &mut UserProfile, now: u64) {
    profile.last_activity_at = now;
}

pub(crate) fn lock(profile: &mut UserProfile, now: u64, config: &LedgerConfig) {
    profile.locked_until = now.saturating_add(config.lock_duration);
}

/// Reason string exposed to clients by `can_transact_now`.
pub(crate) fn reason(err: Error) -> &'static str {
    match err {
        Error::Cooldown => "Cooldown",
        Error::Locked => "Locked",
        Error::NotRegistered => "NotRegistered",
        _ => "Unavailable",
    }
}
