//! Submitting serialized transactions to a cluster.
//!
//! The JSON-RPC client itself is supplied by the caller as a
//! [`TransactionSender`]. This crate encodes the transaction, turns a
//! [`SendTransactionConfig`] into the `sendTransaction` options object and
//! reports the result.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod error;

pub use {
    config::{
        CommitmentLevel, RpcSendTransactionConfig, SendTransactionConfig,
        TransactionBinaryEncoding,
    },
    error::SendTransactionError,
};
use base64::{prelude::BASE64_STANDARD, Engine};

/// A channel that submits encoded transactions, typically a JSON-RPC
/// `sendTransaction` call.
pub trait TransactionSender {
    /// Submit a transaction encoded as `config.encoding` says and return its
    /// signature.
    fn send_encoded_transaction(
        &self,
        encoded_transaction: &str,
        config: &RpcSendTransactionConfig,
    ) -> Result<String, SendTransactionError>;
}

impl<T: TransactionSender + ?Sized> TransactionSender for &T {
    fn send_encoded_transaction(
        &self,
        encoded_transaction: &str,
        config: &RpcSendTransactionConfig,
    ) -> Result<String, SendTransactionError> {
        (**self).send_encoded_transaction(encoded_transaction, config)
    }
}

/// Submit a serialized transaction with the default configuration.
pub fn send_transaction<S: TransactionSender + ?Sized>(
    sender: &S,
    serialized_transaction: &[u8],
) -> Result<String, SendTransactionError> {
    send_transaction_with_config(
        sender,
        serialized_transaction,
        &SendTransactionConfig::default(),
    )
}

/// Submit a serialized transaction.
///
/// The bytes are sent base64 encoded. Returns the transaction signature
/// reported by the node.
pub fn send_transaction_with_config<S: TransactionSender + ?Sized>(
    sender: &S,
    serialized_transaction: &[u8],
    config: &SendTransactionConfig,
) -> Result<String, SendTransactionError> {
    if serialized_transaction.is_empty() {
        return Err(SendTransactionError::EmptyTransaction);
    }
    let encoded = BASE64_STANDARD.encode(serialized_transaction);
    let rpc_config = RpcSendTransactionConfig::from(config);
    log::debug!(
        "sending {} byte transaction, skip_preflight: {}",
        serialized_transaction.len(),
        rpc_config.skip_preflight
    );
    sender
        .send_encoded_transaction(&encoded, &rpc_config)
        .inspect_err(|err| log::warn!("sendTransaction failed: {err}"))
}

#[cfg(test)]
mod tests {
    use {super::*, assert_matches::assert_matches, std::cell::RefCell};

    const SIGNATURE: &str =
        "5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnbJLgp8uirBgmQpjKhoR4tjF3ZpRzrFmBV6UjKdiSZkQUW";

    #[derive(Default)]
    struct MockSender {
        sent: RefCell<Vec<(String, RpcSendTransactionConfig)>>,
        reject: bool,
    }

    impl TransactionSender for MockSender {
        fn send_encoded_transaction(
            &self,
            encoded_transaction: &str,
            config: &RpcSendTransactionConfig,
        ) -> Result<String, SendTransactionError> {
            self.sent
                .borrow_mut()
                .push((encoded_transaction.to_string(), *config));
            if self.reject {
                Err(SendTransactionError::Rejected {
                    code: -32002,
                    message: "Transaction simulation failed".to_string(),
                })
            } else {
                Ok(SIGNATURE.to_string())
            }
        }
    }

    #[test]
    fn test_send_transaction_uses_defaults() {
        let sender = MockSender::default();
        assert_eq!(send_transaction(&sender, &[1, 2, 3]).unwrap(), SIGNATURE);

        let sent = sender.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "AQID");
        assert_eq!(
            sent[0].1,
            RpcSendTransactionConfig {
                skip_preflight: false,
                preflight_commitment: None,
                encoding: Some(TransactionBinaryEncoding::Base64),
                max_retries: None,
                min_context_slot: None,
            }
        );
    }

    #[test]
    fn test_send_transaction_with_config() {
        let sender = MockSender::default();
        let config = SendTransactionConfig::new()
            .with_skip_preflight(true)
            .with_preflight_commitment(CommitmentLevel::Confirmed)
            .with_max_retries(3);
        send_transaction_with_config(&sender, b"transaction", &config).unwrap();

        let sent = sender.sent.borrow();
        assert_eq!(sent[0].0, BASE64_STANDARD.encode(b"transaction"));
        assert!(sent[0].1.skip_preflight);
        assert_eq!(
            sent[0].1.preflight_commitment,
            Some(CommitmentLevel::Confirmed)
        );
        assert_eq!(sent[0].1.max_retries, Some(3));
        assert_eq!(sent[0].1.min_context_slot, None);
    }

    #[test]
    fn test_empty_transaction_is_not_sent() {
        let sender = MockSender::default();
        assert_eq!(
            send_transaction(&sender, &[]),
            Err(SendTransactionError::EmptyTransaction)
        );
        assert!(sender.sent.borrow().is_empty());
    }

    #[test]
    fn test_rejection_is_propagated() {
        let sender = MockSender {
            reject: true,
            ..MockSender::default()
        };
        assert_matches!(
            send_transaction(&sender, &[1]),
            Err(SendTransactionError::Rejected { code: -32002, .. })
        );
    }

    #[test]
    fn test_sender_as_trait_object() {
        let sender = MockSender::default();
        let dyn_sender: &dyn TransactionSender = &sender;
        assert!(send_transaction(dyn_sender, &[9]).is_ok());
        assert_eq!(sender.sent.borrow()[0].0, "CQ==");
    }
}
