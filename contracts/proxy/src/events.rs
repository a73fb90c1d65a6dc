use soroban_sdk::{symbol_short, Address, Env, Vec};

/// Carries the proxy address operators point their tooling at.
pub fn deployed(env: &Env, proxy: &Address, logic: &Address) {
    env.events()
        .publish((symbol_short!("deployed"),), (proxy.clone(), logic.clone()));
}

pub fn initialized(env: &Env, admins: &Vec<Address>) {
    env.events()
        .publish((symbol_short!("init"),), admins.clone());
}

pub fn upgraded(env: &Env, logic: &Address, version: u32, actor: &Address) {
    env.events().publish(
        (symbol_short!("upgraded"), actor.clone()),
        (logic.clone(), version),
    );
}

pub fn proposed(env: &Env, id: u64, proposer: &Address, logic: &Address) {
    env.events().publish(
        (symbol_short!("proposed"), id),
        (proposer.clone(), logic.clone()),
    );
}

pub fn approved(env: &Env, id: u64, approver: &Address, approvals: u32) {
    env.events().publish(
        (symbol_short!("approved"), id),
        (approver.clone(), approvals),
    );
}

pub fn canceled(env: &Env, id: u64, actor: &Address) {
    env.events()
        .publish((symbol_short!("canceled"), id), actor.clone());
}

pub fn quorum_set(env: &Env, quorum: u32, actor: &Address) {
    env.events()
        .publish((symbol_short!("quorum"), actor.clone()), quorum);
}
