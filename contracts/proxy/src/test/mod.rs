#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)]
extern crate std;

mod upgrades;

use crate::{LuckyDrawProxy, LuckyDrawProxyClient};
use lucky_draw::LuckyDrawLogic;
use soroban_sdk::{
    testutils::{Address as _, Events},
    vec, Address, BytesN, Env, IntoVal, Symbol, TryFromVal, Val, Vec,
};

pub struct DrawTest<'a> {
    pub env: &'a Env,
    pub proxy: LuckyDrawProxyClient<'a>,
    pub logic: Address,
    pub deployer: Address,
}

pub fn salt(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &[7; 32])
}

/// Registers a proxy at the address `deployer` derives with [`salt`].
pub fn register_proxy(env: &Env, deployer: &Address) -> Address {
    let proxy_id = env
        .deployer()
        .with_address(deployer.clone(), salt(env))
        .deployed_address();
    env.register_contract(&proxy_id, LuckyDrawProxy)
}

/// Registers the v1 logic module and a proxy pointing at it, without
/// initializing business state.
pub fn deploy_draw(env: &Env) -> DrawTest<'_> {
    let logic = env.register_contract(None, LuckyDrawLogic);
    deploy_with(env, logic)
}

pub fn deploy_with(env: &Env, logic: Address) -> DrawTest<'_> {
    env.mock_all_auths();

    let deployer = Address::generate(env);
    let proxy_id = register_proxy(env, &deployer);
    let proxy = LuckyDrawProxyClient::new(env, &proxy_id);
    proxy.deploy(&deployer, &salt(env), &logic);

    DrawTest {
        env,
        proxy,
        logic,
        deployer,
    }
}

pub fn deploy_initialized<'a>(env: &'a Env, admins: &[Address]) -> DrawTest<'a> {
    let test = deploy_draw(env);
    test.proxy.initialize(&Vec::from_slice(env, admins));
    test
}

impl<'a> DrawTest<'a> {
    pub fn set_paused(&self, caller: &Address, paused: bool) -> Val {
        self.proxy.call(
            caller,
            &Symbol::new(self.env, "set_paused"),
            &vec![self.env, paused.into_val(self.env)],
        )
    }

    pub fn is_paused(&self, caller: &Address) -> bool {
        let value = self
            .proxy
            .call(caller, &Symbol::new(self.env, "is_paused"), &vec![self.env]);
        bool::try_from_val(self.env, &value).unwrap()
    }
}

/// Data of the first event published under `topic`.
pub fn published(env: &Env, topic: Symbol) -> Option<Val> {
    env.events().all().iter().find_map(|(_, topics, data)| {
        let first = topics.get(0)?;
        let symbol = Symbol::try_from_val(env, &first).ok()?;
        (symbol == topic).then_some(data)
    })
}
