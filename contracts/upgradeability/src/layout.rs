use soroban_sdk::{contracttype, symbol_short, Env, Symbol, Vec};

use crate::Error;

pub const INIT_SLOT: u32 = 0;
pub const ADMINS_SLOT: u32 = 1;

pub const INIT_SLOT_NAME: Symbol = symbol_short!("init");
pub const ADMINS_SLOT_NAME: Symbol = symbol_short!("admins");

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum SlotKind {
    Bool,
    U32,
    U64,
    I128,
    Identity,
    IdentityList,
    Bytes,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SlotSpec {
    pub name: Symbol,
    pub kind: SlotKind,
}

/// Ordered slot schema a logic module declares for the proxy's storage.
/// Slot `i` of the layout is stored under proxy key `Slot(i)`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct StorageLayout {
    pub slots: Vec<SlotSpec>,
}

impl StorageLayout {
    pub fn new(env: &Env) -> Self {
        Self {
            slots: Vec::new(env),
        }
    }

    /// The two slots every logic module must begin with.
    pub fn reserved(env: &Env) -> Self {
        Self::new(env)
            .with(INIT_SLOT_NAME, SlotKind::Bool)
            .with(ADMINS_SLOT_NAME, SlotKind::IdentityList)
    }

    pub fn with(mut self, name: Symbol, kind: SlotKind) -> Self {
        self.slots.push_back(SlotSpec { name, kind });
        self
    }

    pub fn len(&self) -> u32 {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// `next` may only append slots to `current`; every existing slot keeps
/// its position, name and kind.
pub fn check_compatible(current: &StorageLayout, next: &StorageLayout) -> Result<(), Error> {
    if next.len() < current.len() {
        return Err(Error::IncompatibleSchema);
    }
    for (index, slot) in current.slots.iter().enumerate() {
        if next.slots.get(index as u32) != Some(slot) {
            return Err(Error::IncompatibleSchema);
        }
    }
    Ok(())
}

pub fn require_reserved_prefix(env: &Env, layout: &StorageLayout) -> Result<(), Error> {
    check_compatible(&StorageLayout::reserved(env), layout)
}
