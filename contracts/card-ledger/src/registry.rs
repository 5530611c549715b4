//! Identity registry: maps an address to its player profile.
//!
//! Registration gates every other action. A profile is created exactly once
//! per address and is never removed.

use soroban_sdk::{Address, Env, String};

use crate::events;
use crate::storage;
use crate::types::{Error, UserProfile};

/// Maximum username length in characters.
pub const MAX_USERNAME_LEN: u32 = 20;

/// A UTF-8 character takes at most four bytes.
const MAX_USERNAME_BYTES: u32 = MAX_USERNAME_LEN * 4;

/// 1 to `MAX_USERNAME_LEN` characters of valid UTF-8.
fn is_valid_username(username: &String) -> bool {
    let len = username.len();
    if len == 0 || len > MAX_USERNAME_BYTES {
        return false;
    }
    let mut buf = [0u8; MAX_USERNAME_BYTES as usize];
    let bytes = &mut buf[..len as usize];
    username.copy_into_slice(bytes);
    match core::str::from_utf8(bytes) {
        Ok(name) => name.chars().count() <= MAX_USERNAME_LEN as usize,
        Err(_) => false,
    }
}

pub(crate) fn register(env: &Env, user: &Address, username: String, now: u64) -> Result<(), Error> {
    if is_registered(env, user) {
        return Err(Error::AlreadyRegistered);
    }
    if !is_valid_username(&username) {
        return Err(Error::InvalidUsername);
    }

    let profile = UserProfile {
        registered: true,
        username,
        trades_completed: 0,
        last_activity_at: 0,
        locked_until: 0,
        registered_at: now,
    };
    storage::write_profile(env, user, &profile);

    events::user_registered(env, user);
    Ok(())
}

pub(crate) fn is_registered(env: &Env, user: &Address) -> bool {
    storage::read_profile(env, user).map_or(false, |p| p.registered)
}

pub(crate) fn profile(env: &Env, user: &Address) -> Option<UserProfile> {
    storage::read_profile(env, user)
}

/// Loads a profile that the caller requires to exist.
pub(crate) fn require_registered(env: &Env, user: &Address) -> Result<UserProfile, Error> {
    storage::read_profile(env, user)
        .filter(|p| p.registered)
        .ok_or(Error::NotRegistered)
}
