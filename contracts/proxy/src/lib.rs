#![no_std]

//! Stable-address proxy for the LuckyDraw logic module.
//!
//! The proxy owns every storage slot. Logic modules are separate contracts
//! that receive the slot state on each forwarded call and return the state
//! to persist, so replacing the installed module never moves data. Business
//! state is seeded once through [`LuckyDrawProxy::initialize`], which only the
//! identity pinned at [`LuckyDrawProxy::deploy`] may call. That identity must
//! be the one the proxy's own address was derived from, so nobody else can
//! claim a freshly created proxy.

use soroban_sdk::{
    contract, contractimpl, log, symbol_short, vec, Address, BytesN, Env, IntoVal, Map, Symbol,
    Val, Vec,
};
use upgradeability::layout::{self, StorageLayout};
use upgradeability::{slots, Error, UpgradeRecord};

mod events;
mod proposals;
mod storage;

#[cfg(test)]
mod test;

pub use proposals::UpgradeProposal;
pub use storage::ProxyConfig;

#[contract]
pub struct LuckyDrawProxy;

#[contractimpl]
impl LuckyDrawProxy {
    /// Points the proxy at its first logic module and pins `deployer` as
    /// the only identity allowed to run [`Self::initialize`]. The proxy must
    /// have been created by `deployer` with `salt`.
    pub fn deploy(
        env: Env,
        deployer: Address,
        salt: BytesN<32>,
        logic: Address,
    ) -> Result<Address, Error> {
        deployer.require_auth();
        if storage::has_config(&env) {
            return Err(Error::AlreadyDeployed);
        }
        let proxy = env.current_contract_address();
        if env
            .deployer()
            .with_address(deployer.clone(), salt)
            .deployed_address()
            != proxy
        {
            return Err(Error::Unauthorized);
        }

        let (layout, version) = probe_logic(&env, &logic)?;
        layout::require_reserved_prefix(&env, &layout)?;

        storage::set_config(
            &env,
            &ProxyConfig {
                deployer: deployer.clone(),
                implementation: logic.clone(),
                layout,
                version,
                quorum: 1,
            },
        );
        storage::push_history(
            &env,
            UpgradeRecord {
                logic: logic.clone(),
                version,
                actor: deployer,
                at_ledger: env.ledger().sequence(),
            },
        );

        log!(&env, "lucky draw proxy deployed", proxy, logic, version);
        events::deployed(&env, &proxy, &logic);
        Ok(proxy)
    }

    pub fn initialize(env: Env, admins: Vec<Address>) -> Result<(), Error> {
        let config = storage::config(&env)?;
        let mut state = storage::load_slots(&env, &config.layout);
        if slots::is_initialized(&env, &state)? {
            return Err(Error::AlreadyInitialized);
        }
        config.deployer.require_auth();
        slots::validate_admins(&admins)?;

        slots::write(&env, &mut state, layout::INIT_SLOT, true);
        slots::write(&env, &mut state, layout::ADMINS_SLOT, admins.clone());
        storage::store_slots(&env, &config.layout, &state);

        events::initialized(&env, &admins);
        Ok(())
    }

    /// Single-admin upgrade path, open only while the upgrade quorum is 1.
    pub fn upgrade(env: Env, requester: Address, new_logic: Address) -> Result<(), Error> {
        requester.require_auth();
        let mut config = storage::config(&env)?;
        require_admin(&env, &config, &requester)?;
        if config.quorum > 1 {
            return Err(Error::QuorumRequired);
        }
        install(&env, &mut config, new_logic, requester)
    }

    /// Forwards `function` to the installed logic module with the slot
    /// state and the authenticated caller prepended to `args`.
    pub fn call(
        env: Env,
        caller: Address,
        function: Symbol,
        args: Vec<Val>,
    ) -> Result<Val, Error> {
        caller.require_auth();
        let config = storage::config(&env)?;
        let state = storage::load_slots(&env, &config.layout);

        let mut forwarded: Vec<Val> = vec![&env, state.into_val(&env), caller.into_val(&env)];
        forwarded.append(&args);

        match env.try_invoke_contract::<(Map<u32, Val>, Val), Error>(
            &config.implementation,
            &function,
            forwarded,
        ) {
            Ok(Ok((returned, value))) => {
                check_reserved_slots(&env, &state, &returned)?;
                storage::store_slots(&env, &config.layout, &returned);
                Ok(value)
            }
            Err(Ok(err)) => Err(err),
            Ok(Err(_)) | Err(Err(_)) => Err(Error::LogicFailed),
        }
    }

    // Views

    pub fn implementation(env: Env) -> Result<Address, Error> {
        Ok(storage::config(&env)?.implementation)
    }

    pub fn logic_version(env: Env) -> Result<u32, Error> {
        Ok(storage::config(&env)?.version)
    }

    pub fn layout(env: Env) -> Result<StorageLayout, Error> {
        Ok(storage::config(&env)?.layout)
    }

    pub fn deployer(env: Env) -> Result<Address, Error> {
        Ok(storage::config(&env)?.deployer)
    }

    pub fn upgrade_quorum(env: Env) -> Result<u32, Error> {
        Ok(storage::config(&env)?.quorum)
    }

    pub fn is_initialized(env: Env) -> Result<bool, Error> {
        let config = storage::config(&env)?;
        slots::is_initialized(&env, &storage::load_slots(&env, &config.layout))
    }

    pub fn admins(env: Env) -> Result<Vec<Address>, Error> {
        let config = storage::config(&env)?;
        slots::admins(&env, &storage::load_slots(&env, &config.layout))
    }

    pub fn upgrade_history(env: Env) -> Vec<UpgradeRecord> {
        storage::history(&env)
    }
}

/// Reads the schema and code version a logic module declares.
fn probe_logic(env: &Env, logic: &Address) -> Result<(StorageLayout, u32), Error> {
    let layout = env.try_invoke_contract::<StorageLayout, Error>(
        logic,
        &symbol_short!("layout"),
        Vec::new(env),
    );
    let version =
        env.try_invoke_contract::<u32, Error>(logic, &symbol_short!("version"), Vec::new(env));
    match (layout, version) {
        (Ok(Ok(layout)), Ok(Ok(version))) => Ok((layout, version)),
        _ => Err(Error::InvalidLogic),
    }
}

/// Checks `candidate` can replace the installed logic module.
pub(crate) fn validate_candidate(
    env: &Env,
    config: &ProxyConfig,
    candidate: &Address,
) -> Result<(StorageLayout, u32), Error> {
    let (layout, version) = probe_logic(env, candidate)?;
    layout::check_compatible(&config.layout, &layout)?;
    if version <= config.version {
        return Err(Error::StaleVersion);
    }
    Ok((layout, version))
}

/// Slot 0 belongs to [`LuckyDrawProxy::initialize`]: a forwarded call may
/// not change it. Once initialized, the admin set must stay a valid list.
fn check_reserved_slots(
    env: &Env,
    before: &Map<u32, Val>,
    after: &Map<u32, Val>,
) -> Result<(), Error> {
    let initialized = slots::is_initialized(env, before)?;
    if slots::is_initialized(env, after)? != initialized {
        return Err(Error::ReservedSlot);
    }
    if initialized {
        slots::validate_admins(&slots::admins(env, after)?)?;
    }
    Ok(())
}

/// Returns the admin set after checking initialization and membership.
pub(crate) fn require_admin(
    env: &Env,
    config: &ProxyConfig,
    who: &Address,
) -> Result<Vec<Address>, Error> {
    let state = storage::load_slots(env, &config.layout);
    slots::require_initialized(env, &state)?;
    slots::require_admin(env, &state, who)
}

pub(crate) fn install(
    env: &Env,
    config: &mut ProxyConfig,
    new_logic: Address,
    actor: Address,
) -> Result<(), Error> {
    let (layout, version) = validate_candidate(env, config, &new_logic)?;

    config.implementation = new_logic.clone();
    config.layout = layout;
    config.version = version;
    storage::set_config(env, config);
    storage::clear_proposals(env);
    storage::push_history(
        env,
        UpgradeRecord {
            logic: new_logic.clone(),
            version,
            actor: actor.clone(),
            at_ledger: env.ledger().sequence(),
        },
    );

    log!(env, "lucky draw logic upgraded", new_logic, version);
    events::upgraded(env, &new_logic, version, &actor);
    Ok(())
}
