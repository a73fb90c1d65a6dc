use soroban_sdk::{Address, Env, IntoVal, Map, TryFromVal, Val, Vec};

use crate::layout::{ADMINS_SLOT, INIT_SLOT};
use crate::Error;

pub fn read<T>(env: &Env, state: &Map<u32, Val>, index: u32) -> Result<Option<T>, Error>
where
    T: TryFromVal<Env, Val>,
{
    match state.get(index) {
        Some(raw) => T::try_from_val(env, &raw)
            .map(Some)
            .map_err(|_| Error::CorruptSlot),
        None => Ok(None),
    }
}

pub fn write<T>(env: &Env, state: &mut Map<u32, Val>, index: u32, value: T)
where
    T: IntoVal<Env, Val>,
{
    state.set(index, value.into_val(env));
}

pub fn is_initialized(env: &Env, state: &Map<u32, Val>) -> Result<bool, Error> {
    Ok(read::<bool>(env, state, INIT_SLOT)?.unwrap_or(false))
}

pub fn admins(env: &Env, state: &Map<u32, Val>) -> Result<Vec<Address>, Error> {
    Ok(read::<Vec<Address>>(env, state, ADMINS_SLOT)?.unwrap_or_else(|| Vec::new(env)))
}

pub fn require_initialized(env: &Env, state: &Map<u32, Val>) -> Result<(), Error> {
    if !is_initialized(env, state)? {
        return Err(Error::NotInitialized);
    }
    Ok(())
}

/// Returns the current admin set when `who` belongs to it.
pub fn require_admin(env: &Env, state: &Map<u32, Val>, who: &Address) -> Result<Vec<Address>, Error> {
    let admins = admins(env, state)?;
    if !admins.contains(who) {
        return Err(Error::Unauthorized);
    }
    Ok(admins)
}

pub fn validate_admins(admins: &Vec<Address>) -> Result<(), Error> {
    if admins.is_empty() {
        return Err(Error::InvalidAdminList);
    }
    // Pairwise scan; admin sets stay small.
    for i in 0..admins.len() {
        for j in (i + 1)..admins.len() {
            if admins.get_unchecked(i) == admins.get_unchecked(j) {
                return Err(Error::InvalidAdminList);
            }
        }
    }
    Ok(())
}
