#![no_std]

//! Shared pieces of the LuckyDraw proxy lifecycle: the error codes every
//! contract in the workspace reports, the storage layout contract a logic
//! module declares, and the reserved-slot helpers both sides use.

use soroban_sdk::{contracterror, contracttype, Address};

pub mod layout;
pub mod slots;


/// Error codes shared by the proxy and every logic module, so a failure
/// raised inside a logic module reaches the proxy's caller unchanged.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    IncompatibleSchema = 4,
    NoLogicInstalled = 5,
    InvalidAdminList = 6,
    StaleVersion = 7,
    ProposalNotFound = 8,
    AlreadyApproved = 9,
    QuorumNotReached = 10,
    QuorumRequired = 11,
    InvalidQuorum = 12,
    LogicFailed = 13,
    AlreadyDeployed = 14,
    InvalidLogic = 15,
    CorruptSlot = 16,
    ReservedSlot = 17,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct UpgradeRecord {
    pub logic: Address,
    pub version: u32,
    pub actor: Address,
    pub at_ledger: u32,
}
