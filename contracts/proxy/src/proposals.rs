//! Quorum-gated upgrades. Once the quorum is raised above 1, the logic
//! reference only moves through a proposal approved by that many admins.

use soroban_sdk::{contractimpl, contracttype, vec, Address, Env, Vec};
use upgradeability::Error;

use crate::{
    events, install, require_admin, storage, validate_candidate, LuckyDrawProxy,
    LuckyDrawProxyClient,
};

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct UpgradeProposal {
    pub id: u64,
    pub new_logic: Address,
    pub proposer: Address,
    pub approvals: Vec<Address>,
    pub created_at: u32,
}

#[contractimpl]
impl LuckyDrawProxy {
    /// The quorum can only be raised, and never above the admin count.
    pub fn set_upgrade_quorum(env: Env, requester: Address, quorum: u32) -> Result<(), Error> {
        requester.require_auth();
        let mut config = storage::config(&env)?;
        let admins = require_admin(&env, &config, &requester)?;
        if quorum == 0 || quorum < config.quorum || quorum > admins.len() {
            return Err(Error::InvalidQuorum);
        }
        config.quorum = quorum;
        storage::set_config(&env, &config);
        events::quorum_set(&env, quorum, &requester);
        Ok(())
    }

    /// The proposer's own approval is recorded with the proposal.
    pub fn propose_upgrade(env: Env, proposer: Address, new_logic: Address) -> Result<u64, Error> {
        proposer.require_auth();
        let config = storage::config(&env)?;
        require_admin(&env, &config, &proposer)?;
        validate_candidate(&env, &config, &new_logic)?;

        let id = storage::next_proposal_id(&env);
        storage::set_proposal(
            &env,
            &UpgradeProposal {
                id,
                new_logic: new_logic.clone(),
                proposer: proposer.clone(),
                approvals: vec![&env, proposer.clone()],
                created_at: env.ledger().sequence(),
            },
        );
        events::proposed(&env, id, &proposer, &new_logic);
        Ok(id)
    }

    pub fn approve_upgrade(env: Env, approver: Address, id: u64) -> Result<u32, Error> {
        approver.require_auth();
        let config = storage::config(&env)?;
        require_admin(&env, &config, &approver)?;
        let mut proposal = storage::proposal(&env, id).ok_or(Error::ProposalNotFound)?;
        if proposal.approvals.contains(&approver) {
            return Err(Error::AlreadyApproved);
        }
        proposal.approvals.push_back(approver.clone());
        let approvals = proposal.approvals.len();
        storage::set_proposal(&env, &proposal);
        events::approved(&env, id, &approver, approvals);
        Ok(approvals)
    }

    pub fn cancel_upgrade(env: Env, requester: Address, id: u64) -> Result<(), Error> {
        requester.require_auth();
        let config = storage::config(&env)?;
        require_admin(&env, &config, &requester)?;
        if storage::proposal(&env, id).is_none() {
            return Err(Error::ProposalNotFound);
        }
        storage::remove_proposal(&env, id);
        events::canceled(&env, id, &requester);
        Ok(())
    }

    /// Approvals from identities no longer in the admin set do not count,
    /// and the threshold shrinks with the admin set. Installing drops every
    /// open proposal, this one included.
    pub fn execute_upgrade(env: Env, requester: Address, id: u64) -> Result<(), Error> {
        requester.require_auth();
        let mut config = storage::config(&env)?;
        let admins = require_admin(&env, &config, &requester)?;
        let proposal = storage::proposal(&env, id).ok_or(Error::ProposalNotFound)?;

        let approvals = proposal
            .approvals
            .iter()
            .filter(|approver| admins.contains(approver))
            .count() as u32;
        if approvals < config.quorum.min(admins.len()) {
            return Err(Error::QuorumNotReached);
        }

        install(&env, &mut config, proposal.new_logic, requester)
    }

    pub fn proposal(env: Env, id: u64) -> Option<UpgradeProposal> {
        storage::proposal(&env, id)
    }
}
