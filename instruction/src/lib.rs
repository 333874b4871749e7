//! Types for directing the execution of on-chain programs.
//!
//! An [`Instruction`] names the program to run, the accounts it touches and
//! an opaque data buffer. Native programs such as the Keccak-secp256k1
//! verifier read everything they need from the data buffer and take no
//! accounts at all.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use {alloc::vec::Vec, ethsig_address::Address};

/// A directive for a single invocation of a program.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Instruction {
    /// Address of the program that executes this instruction.
    pub program_id: Address,
    /// Metadata describing accounts that should be passed to the program.
    pub accounts: Vec<AccountMeta>,
    /// Opaque data passed to the program for its own interpretation.
    pub data: Vec<u8>,
}

impl Instruction {
    /// Create a new instruction from a byte slice.
    pub fn new_with_bytes(program_id: Address, data: &[u8], accounts: Vec<AccountMeta>) -> Self {
        Self {
            program_id,
            accounts,
            data: data.to_vec(),
        }
    }

    /// Create a new instruction from a value, encoded with [`bincode`].
    ///
    /// Fails if `data` cannot be serialized.
    ///
    /// [`bincode`]: https://docs.rs/bincode
    #[cfg(feature = "bincode")]
    pub fn new_with_bincode<T: serde::Serialize>(
        program_id: Address,
        data: &T,
        accounts: Vec<AccountMeta>,
    ) -> Result<Self, bincode::Error> {
        let data = bincode::serialize(data)?;
        Ok(Self {
            program_id,
            accounts,
            data,
        })
    }

    /// Returns true if the instruction references no accounts.
    pub fn is_account_free(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// Describes a single account read or written by a program during
/// instruction execution.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct AccountMeta {
    /// An account's address.
    pub pubkey: Address,
    /// True if an `Instruction` requires a transaction signature matching `pubkey`.
    pub is_signer: bool,
    /// True if the account data or metadata may be mutated during program execution.
    pub is_writable: bool,
}

impl AccountMeta {
    /// Construct metadata for a writable account.
    pub fn new(pubkey: Address, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: true,
        }
    }

    /// Construct metadata for a read-only account.
    pub fn new_readonly(pubkey: Address, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: false,
        }
    }
}
