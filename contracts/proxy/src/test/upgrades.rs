use super::logic::reordered::ReorderedLogic;
use super::logic::same_version::SameVersionLogic;
use super::logic::v2::LuckyDrawLogicV2;
use super::{deploy_draw, deploy_initialized, published};
use soroban_sdk::{
    symbol_short, testutils::Address as _, vec, Address, Env, Symbol, TryFromVal,
};
use upgradeability::Error;

#[test]
fn test_admin_upgrade_keeps_storage() {
    let env = Env::default();
    let admin = Address::generate(&env);
    let test = deploy_initialized(&env, &[admin.clone()]);
    test.set_paused(&admin, true);

    let v2 = env.register_contract(None, LuckyDrawLogicV2);
    test.proxy.upgrade(&admin, &v2);

    assert_eq!(test.proxy.implementation(), v2);
    assert_eq!(test.proxy.logic_version(), 2);
    assert_eq!(test.proxy.layout().len(), 4);
    assert_eq!(test.proxy.admins(), vec![&env, admin.clone()]);
    assert!(test.is_paused(&admin));

    let bump = Symbol::new(&env, "bump_epoch");
    let first = test.proxy.call(&admin, &bump, &vec![&env]);
    let second = test.proxy.call(&admin, &bump, &vec![&env]);
    assert_eq!(u32::try_from_val(&env, &first).unwrap(), 1);
    assert_eq!(u32::try_from_val(&env, &second).unwrap(), 2);

    let history = test.proxy.upgrade_history();
    assert_eq!(history.len(), 2);
    let last = history.get(1).unwrap();
    assert_eq!(last.logic, v2);
    assert_eq!(last.version, 2);
    assert_eq!(last.actor, admin);
}

#[test]
fn test_upgrade_publishes_event() {
    let env = Env::default();
    let admin = Address::generate(&env);
    let test = deploy_initialized(&env, &[admin.clone()]);
    let v2 = env.register_contract(None, LuckyDrawLogicV2);

    test.proxy.upgrade(&admin, &v2);

    let data = published(&env, symbol_short!("upgraded")).expect("upgraded event");
    let (logic, version) = <(Address, u32)>::try_from_val(&env, &data).unwrap();
    assert_eq!(logic, v2);
    assert_eq!(version, 2);
}

#[test]
fn test_non_admin_cannot_upgrade() {
    let env = Env::default();
    let admin = Address::generate(&env);
    let outsider = Address::generate(&env);
    let test = deploy_initialized(&env, &[admin]);
    let v2 = env.register_contract(None, LuckyDrawLogicV2);

    assert_eq!(
        test.proxy.try_upgrade(&outsider, &v2),
        Err(Ok(Error::Unauthorized))
    );
    assert_eq!(test.proxy.implementation(), test.logic);
    assert_eq!(test.proxy.upgrade_history().len(), 1);
}

#[test]
fn test_upgrade_requires_initialization() {
    let env = Env::default();
    let test = deploy_draw(&env);
    let v2 = env.register_contract(None, LuckyDrawLogicV2);

    assert_eq!(
        test.proxy.try_upgrade(&test.deployer, &v2),
        Err(Ok(Error::NotInitialized))
    );
    assert_eq!(test.proxy.implementation(), test.logic);
}

#[test]
fn test_reordered_schema_is_rejected() {
    let env = Env::default();
    let admin = Address::generate(&env);
    let test = deploy_initialized(&env, &[admin.clone()]);
    let reordered = env.register_contract(None, ReorderedLogic);

    assert_eq!(
        test.proxy.try_upgrade(&admin, &reordered),
        Err(Ok(Error::IncompatibleSchema))
    );
    assert_eq!(test.proxy.implementation(), test.logic);
    assert_eq!(test.proxy.layout().len(), 3);
}

#[test]
fn test_same_version_is_rejected() {
    let env = Env::default();
    let admin = Address::generate(&env);
    let test = deploy_initialized(&env, &[admin.clone()]);
    let same = env.register_contract(None, SameVersionLogic);

    assert_eq!(
        test.proxy.try_upgrade(&admin, &same),
        Err(Ok(Error::StaleVersion))
    );
    assert_eq!(test.proxy.logic_version(), lucky_draw::VERSION);
}

#[test]
fn test_downgrade_after_upgrade_is_rejected() {
    let env = Env::default();
    let admin = Address::generate(&env);
    let test = deploy_initialized(&env, &[admin.clone()]);
    let v2 = env.register_contract(None, LuckyDrawLogicV2);
    test.proxy.upgrade(&admin, &v2);

    // v1's layout lacks the slot v2 appended.
    assert_eq!(
        test.proxy.try_upgrade(&admin, &test.logic),
        Err(Ok(Error::IncompatibleSchema))
    );
    assert_eq!(test.proxy.implementation(), v2);
}

#[test]
fn test_upgrade_requires_logic_module() {
    let env = Env::default();
    let admin = Address::generate(&env);
    let test = deploy_initialized(&env, &[admin.clone()]);
    let not_logic = Address::generate(&env);

    assert_eq!(
        test.proxy.try_upgrade(&admin, &not_logic),
        Err(Ok(Error::InvalidLogic))
    );
    assert_eq!(test.proxy.implementation(), test.logic);
}
