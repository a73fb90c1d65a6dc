use soroban_sdk::{contracttype, Address, Env, Map, Val, Vec};
use upgradeability::layout::StorageLayout;
use upgradeability::{Error, UpgradeRecord};

use crate::proposals::UpgradeProposal;

const DAY_IN_LEDGERS: u32 = 17280;
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    Slot(u32),
    History,
    ProposalCount,
    Proposal(u64),
    OpenProposals,
}

/// Everything the proxy itself owns: the logic reference, the schema it
/// was installed with, and upgrade authorization metadata.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProxyConfig {
    pub deployer: Address,
    pub implementation: Address,
    pub layout: StorageLayout,
    pub version: u32,
    pub quorum: u32,
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn config(env: &Env) -> Result<ProxyConfig, Error> {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NoLogicInstalled)?;
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    Ok(config)
}

pub fn set_config(env: &Env, config: &ProxyConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

// Slots

pub fn load_slots(env: &Env, layout: &StorageLayout) -> Map<u32, Val> {
    let mut state = Map::new(env);
    for index in 0..layout.len() {
        if let Some(value) = env
            .storage()
            .persistent()
            .get::<DataKey, Val>(&DataKey::Slot(index))
        {
            state.set(index, value);
        }
    }
    state
}

/// Writes back every slot the layout declares. A slot missing from
/// `state` is cleared; indices beyond the layout are ignored.
pub fn store_slots(env: &Env, layout: &StorageLayout, state: &Map<u32, Val>) {
    let storage = env.storage().persistent();
    for index in 0..layout.len() {
        let key = DataKey::Slot(index);
        match state.get(index) {
            Some(value) => {
                storage.set(&key, &value);
                storage.extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
            }
            None => storage.remove(&key),
        }
    }
}

// History

pub fn history(env: &Env) -> Vec<UpgradeRecord> {
    env.storage()
        .persistent()
        .get(&DataKey::History)
        .unwrap_or(Vec::new(env))
}

pub fn push_history(env: &Env, record: UpgradeRecord) {
    let mut list = history(env);
    list.push_back(record);
    env.storage().persistent().set(&DataKey::History, &list);
    env.storage().persistent().extend_ttl(
        &DataKey::History,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

// Proposals

pub fn next_proposal_id(env: &Env) -> u64 {
    let id: u64 = env
        .storage()
        .instance()
        .get(&DataKey::ProposalCount)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::ProposalCount, &(id + 1));
    id
}

pub fn proposal(env: &Env, id: u64) -> Option<UpgradeProposal> {
    env.storage().persistent().get(&DataKey::Proposal(id))
}

fn open_proposals(env: &Env) -> Vec<u64> {
    env.storage()
        .instance()
        .get(&DataKey::OpenProposals)
        .unwrap_or(Vec::new(env))
}

pub fn set_proposal(env: &Env, proposal: &UpgradeProposal) {
    let key = DataKey::Proposal(proposal.id);
    env.storage().persistent().set(&key, proposal);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);

    let mut open = open_proposals(env);
    if !open.contains(proposal.id) {
        open.push_back(proposal.id);
        env.storage().instance().set(&DataKey::OpenProposals, &open);
    }
}

pub fn remove_proposal(env: &Env, id: u64) {
    env.storage().persistent().remove(&DataKey::Proposal(id));
    let mut open = open_proposals(env);
    if let Some(index) = open.first_index_of(id) {
        open.remove(index);
        env.storage().instance().set(&DataKey::OpenProposals, &open);
    }
}

/// Drops every open proposal. Runs on each install.
pub fn clear_proposals(env: &Env) {
    for id in open_proposals(env).iter() {
        env.storage().persistent().remove(&DataKey::Proposal(id));
    }
    env.storage().instance().remove(&DataKey::OpenProposals);
}
