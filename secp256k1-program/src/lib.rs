//! Instructions for the [secp256k1 native program][np].
//!
//! [np]: https://docs.anza.xyz/runtime/programs#secp256k1-program
//!
//! The secp256k1 native program performs flexible verification of
//! [secp256k1] ECDSA signatures, as used by Ethereum. It can verify up to 255
//! signatures on up to 255 messages, with each signature checked against the
//! 20-byte Ethereum address of its signer rather than a full public key.
//!
//! [secp256k1]: https://en.bitcoin.it/wiki/Secp256k1
//!
//! The program reads nothing but instruction data. That data is a signature
//! count, followed by one [`SecpSignatureOffsets`] record per signature, followed
//! by the bytes those records point at. [`encode_multi`] lays the records out
//! so that each signer's material sits in one contiguous block:
//!
//! ```text
//! u8                      count
//! SecpSignatureOffsets    offsets[count]        (11 bytes each)
//! for each signer:
//!   [u8; 20]              eth address
//!   [u8; 64]              signature (r ‖ s)
//!   u8                    recovery id
//!   [u8]                  message
//! ```
//!
//! Each message is hashed with Keccak-256 before signing, and each address is
//! the last 20 bytes of the Keccak-256 hash of the signer's uncompressed
//! public key. [`verify`] replays the native program's checks off-chain, so a
//! transaction can be validated before it is submitted.
//!
//! # Examples
//!
//! ```
//! use ethsig_secp256k1_program::{encode_single, verify};
//! use ethsig_signer::Secp256k1Keypair;
//!
//! let keypair = Secp256k1Keypair::try_from_bytes(&[7; 32]).unwrap();
//! let instruction = encode_single(&keypair, b"hello", None).unwrap();
//!
//! assert_eq!(instruction.program_id, ethsig_secp256k1_program::id());
//! assert!(instruction.accounts.is_empty());
//! assert_eq!(verify(&instruction.data, &[&instruction.data]), Ok(()));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod encoder;
mod error;
mod layout;
mod offsets;
mod parse;
mod verify;

pub use {
    encoder::{
        construct_eth_address, encode_multi, encode_single, hash_message,
        new_secp256k1_instruction_with_signature, sign_message, SignerInput,
    },
    error::Secp256k1EncodeError,
    offsets::SecpSignatureOffsets,
    parse::{parse_instruction_data, parse_signatures, ParsedSignature},
    verify::verify,
};
use ethsig_address::Address;

/// Size of the Keccak-hashed Ethereum address embedded for each signer.
pub const HASHED_PUBKEY_SERIALIZED_SIZE: usize = 20;

/// Size of a serialized `r ‖ s` signature.
pub const SIGNATURE_SERIALIZED_SIZE: usize = 64;

/// Size of a serialized signature followed by its one-byte recovery id.
pub const RECOVERABLE_SIGNATURE_SERIALIZED_SIZE: usize = SIGNATURE_SERIALIZED_SIZE + 1;

/// Size of one serialized [`SecpSignatureOffsets`] record.
pub const SIGNATURE_OFFSETS_SERIALIZED_SIZE: usize = 11;

/// Offset of the first payload byte for a single-signature instruction.
pub const DATA_START: usize = SIGNATURE_OFFSETS_SERIALIZED_SIZE + 1;

/// Largest number of signatures one instruction can carry.
pub const MAX_SIGNATURES: usize = u8::MAX as usize;

/// Largest instruction data buffer the encoder will produce.
pub const MAX_INSTRUCTION_DATA_LEN: usize = u16::MAX as usize;

/// Instruction index written into every offsets record. The encoder always
/// places signatures, addresses and messages in the instruction it builds.
pub const CURRENT_INSTRUCTION_INDEX: u8 = 0;

/// `KeccakSecp256k11111111111111111111111111111`
pub const ID: Address = Address::new_from_array([
    4, 198, 252, 32, 240, 80, 204, 240, 85, 132, 215, 33, 28, 159, 140, 245, 158, 193, 71, 133,
    187, 22, 106, 30, 40, 48, 232, 18, 32, 0, 0, 0,
]);

/// Returns the id of the secp256k1 native program.
pub const fn id() -> Address {
    ID
}

/// Returns `true` if the given address is the secp256k1 native program id.
pub fn check_id(id: &Address) -> bool {
    id == &ID
}
