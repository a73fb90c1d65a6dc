#![no_std]

//! LuckyDraw logic module. It persists nothing itself: the proxy hands
//! every call its slot state and stores whatever state comes back, so this
//! code can be replaced without moving data.

use soroban_sdk::{
    contract, contractimpl, contractmeta, symbol_short, Address, Env, IntoVal, Map, Symbol, Val,
    Vec,
};
use upgradeability::layout::{SlotKind, StorageLayout, ADMINS_SLOT};
use upgradeability::{slots, Error};


pub const VERSION: u32 = 1;

pub const PAUSED_SLOT: u32 = 2;
const PAUSED: Symbol = symbol_short!("paused");

contractmeta!(
    key = "Description",
    val = "LuckyDraw logic module served through an upgradeable proxy"
);

#[contract]
pub struct LuckyDrawLogic;

#[contractimpl]
impl LuckyDrawLogic {
    pub fn layout(env: Env) -> StorageLayout {
        StorageLayout::reserved(&env).with(PAUSED, SlotKind::Bool)
    }

    pub fn version(_env: Env) -> u32 {
        VERSION
    }

    // Admin management

    pub fn add_admin(
        env: Env,
        state: Map<u32, Val>,
        caller: Address,
        admin: Address,
    ) -> Result<(Map<u32, Val>, Val), Error> {
        let mut state = state;
        slots::require_initialized(&env, &state)?;
        let mut admins = slots::require_admin(&env, &state, &caller)?;
        if admins.contains(&admin) {
            return Err(Error::InvalidAdminList);
        }
        admins.push_back(admin);
        let count = admins.len();
        slots::write(&env, &mut state, ADMINS_SLOT, admins);
        Ok((state, count.into_val(&env)))
    }

    /// The last admin cannot be removed.
    pub fn remove_admin(
        env: Env,
        state: Map<u32, Val>,
        caller: Address,
        admin: Address,
    ) -> Result<(Map<u32, Val>, Val), Error> {
        let mut state = state;
        slots::require_initialized(&env, &state)?;
        let mut admins = slots::require_admin(&env, &state, &caller)?;
        let index = admins
            .first_index_of(&admin)
            .ok_or(Error::InvalidAdminList)?;
        if admins.len() == 1 {
            return Err(Error::InvalidAdminList);
        }
        admins.remove(index);
        let count = admins.len();
        slots::write(&env, &mut state, ADMINS_SLOT, admins);
        Ok((state, count.into_val(&env)))
    }

    pub fn set_paused(
        env: Env,
        state: Map<u32, Val>,
        caller: Address,
        paused: bool,
    ) -> Result<(Map<u32, Val>, Val), Error> {
        let mut state = state;
        slots::require_initialized(&env, &state)?;
        slots::require_admin(&env, &state, &caller)?;
        slots::write(&env, &mut state, PAUSED_SLOT, paused);
        Ok((state, paused.into_val(&env)))
    }

    // Views

    pub fn admins(
        env: Env,
        state: Map<u32, Val>,
        _caller: Address,
    ) -> Result<(Map<u32, Val>, Val), Error> {
        let admins: Vec<Address> = slots::admins(&env, &state)?;
        Ok((state, admins.into_val(&env)))
    }

    pub fn is_admin(
        env: Env,
        state: Map<u32, Val>,
        _caller: Address,
        who: Address,
    ) -> Result<(Map<u32, Val>, Val), Error> {
        let is_admin = slots::admins(&env, &state)?.contains(&who);
        Ok((state, is_admin.into_val(&env)))
    }

    pub fn is_paused(
        env: Env,
        state: Map<u32, Val>,
        _caller: Address,
    ) -> Result<(Map<u32, Val>, Val), Error> {
        let paused = slots::read::<bool>(&env, &state, PAUSED_SLOT)?.unwrap_or(false);
        Ok((state, paused.into_val(&env)))
    }
}
