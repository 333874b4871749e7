use serde_derive::{Deserialize, Serialize};

/// How far along consensus a block must be before the node uses it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CommitmentLevel {
    /// The node's most recent block, which may still be skipped.
    Processed,
    /// Voted on by a supermajority of the cluster.
    Confirmed,
    /// Confirmed, with at least 31 confirmed blocks built on top of it.
    #[default]
    Finalized,
}

/// Text encoding of the serialized transaction on the wire.
///
/// Transactions sent from this crate are always [`Base64`]. [`Base58`] is
/// the node's default when `encoding` is absent and is only here so that
/// such configs deserialize.
///
/// [`Base58`]: TransactionBinaryEncoding::Base58
/// [`Base64`]: TransactionBinaryEncoding::Base64
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionBinaryEncoding {
    Base58,
    Base64,
}

/// Options for submitting a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SendTransactionConfig {
    /// Skip the node's simulation of the transaction before it is forwarded.
    pub skip_preflight: bool,

    /// Commitment used for the preflight simulation. `None` leaves the
    /// choice to the node, which uses [`CommitmentLevel::Finalized`].
    pub preflight_commitment: Option<CommitmentLevel>,

    /// Number of times the node retries forwarding the transaction to the
    /// leader. `None` retries until the transaction is finalized or its
    /// blockhash expires.
    pub max_retries: Option<usize>,

    /// Minimum slot at which the node may run preflight checks.
    pub min_context_slot: Option<u64>,
}

impl SendTransactionConfig {
    pub const fn new() -> Self {
        Self {
            skip_preflight: false,
            preflight_commitment: None,
            max_retries: None,
            min_context_slot: None,
        }
    }

    #[must_use]
    pub const fn with_skip_preflight(mut self, skip_preflight: bool) -> Self {
        self.skip_preflight = skip_preflight;
        self
    }

    #[must_use]
    pub const fn with_preflight_commitment(mut self, commitment: CommitmentLevel) -> Self {
        self.preflight_commitment = Some(commitment);
        self
    }

    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    #[must_use]
    pub const fn with_min_context_slot(mut self, slot: u64) -> Self {
        self.min_context_slot = Some(slot);
        self
    }
}

/// The `sendTransaction` configuration object as sent over JSON-RPC.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RpcSendTransactionConfig {
    #[serde(default)]
    pub skip_preflight: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preflight_commitment: Option<CommitmentLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<TransactionBinaryEncoding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_context_slot: Option<u64>,
}

impl From<SendTransactionConfig> for RpcSendTransactionConfig {
    fn from(config: SendTransactionConfig) -> Self {
        Self {
            skip_preflight: config.skip_preflight,
            preflight_commitment: config.preflight_commitment,
            encoding: Some(TransactionBinaryEncoding::Base64),
            max_retries: config.max_retries,
            min_context_slot: config.min_context_slot,
        }
    }
}

impl From<&SendTransactionConfig> for RpcSendTransactionConfig {
    fn from(config: &SendTransactionConfig) -> Self {
        RpcSendTransactionConfig::from(*config)
    }
}
