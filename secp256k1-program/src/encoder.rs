//! Building secp256k1 instructions from signers and messages.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use {
    crate::{
        layout::{InstructionLayout, SignaturePayload},
        Secp256k1EncodeError, HASHED_PUBKEY_SERIALIZED_SIZE, ID, SIGNATURE_SERIALIZED_SIZE,
    },
    ethsig_instruction::Instruction,
    ethsig_signer::{
        Secp256k1Signer, SignerError, DIGEST_SIZE, MAX_RECOVERY_ID, PUBLIC_KEY_SIZE,
    },
    libsecp256k1::SecretKey,
    sha3::{Digest, Keccak256},
};

/// One signer and the message it signs.
#[derive(Debug)]
pub struct SignerInput<'a, S: ?Sized> {
    pub signer: &'a S,
    pub message: &'a [u8],
}

impl<'a, S: ?Sized> SignerInput<'a, S> {
    pub fn new(signer: &'a S, message: &'a [u8]) -> Self {
        Self { signer, message }
    }
}

// Derived impls would require `S: Clone`.
impl<S: ?Sized> Clone for SignerInput<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for SignerInput<'_, S> {}

/// Keccak-256 digest of `message`; this is what gets signed.
pub fn hash_message(message: &[u8]) -> [u8; DIGEST_SIZE] {
    Keccak256::digest(message).into()
}

/// Creates an Ethereum address from a secp256k1 public key.
///
/// `public_key` is the uncompressed `X ‖ Y` form without its `0x04` tag.
/// The address is the last 20 bytes of its Keccak-256 hash.
pub fn construct_eth_address(
    public_key: &[u8; PUBLIC_KEY_SIZE],
) -> [u8; HASHED_PUBKEY_SERIALIZED_SIZE] {
    let hash = Keccak256::digest(public_key);
    let mut addr = [0u8; HASHED_PUBKEY_SERIALIZED_SIZE];
    addr.copy_from_slice(&hash[hash.len().saturating_sub(HASHED_PUBKEY_SERIALIZED_SIZE)..]);
    addr
}

/// Sign a message with a raw 32-byte secret key.
///
/// The message is hashed with [`hash_message`] first. Returns the `r ‖ s`
/// signature and its recovery id.
pub fn sign_message(
    secret_key_bytes: &[u8],
    message: &[u8],
) -> Result<([u8; SIGNATURE_SERIALIZED_SIZE], u8), SignerError> {
    let secret_key =
        SecretKey::parse_slice(secret_key_bytes).map_err(|_| SignerError::InvalidSecretKey)?;
    let signed = secret_key.try_sign_digest(&hash_message(message))?;
    Ok((signed.signature, signed.recovery_id))
}

/// Create a single-signature instruction from precomputed signature material.
///
/// Useful when the secret key is held elsewhere, e.g. in a hardware wallet.
/// `eth_address` is usually the output of [`construct_eth_address`] and
/// `signature` must be over `hash_message(message)`. Neither is checked.
pub fn new_secp256k1_instruction_with_signature(
    message: &[u8],
    signature: &[u8; SIGNATURE_SERIALIZED_SIZE],
    recovery_id: u8,
    eth_address: &[u8; HASHED_PUBKEY_SERIALIZED_SIZE],
) -> Result<Instruction, Secp256k1EncodeError> {
    let layout = InstructionLayout::compute([message.len()].into_iter())?;
    let payload = SignaturePayload {
        eth_address: *eth_address,
        signature: *signature,
        recovery_id,
        message,
    };
    Ok(build_instruction(layout.serialize(&[payload])))
}

/// Create a secp256k1 instruction verifying one signature.
///
/// Equivalent to calling [`encode_multi`] with a single [`SignerInput`].
pub fn encode_single<S>(
    signer: &S,
    message: &[u8],
    recovery_id_override: Option<u8>,
) -> Result<Instruction, Secp256k1EncodeError>
where
    S: Secp256k1Signer + Sync + ?Sized,
{
    encode_multi(&[SignerInput::new(signer, message)], recovery_id_override)
}

/// Create a secp256k1 instruction verifying one signature per signer.
///
/// Every message is hashed and signed by its signer, and the signature is
/// stored next to the signer's Ethereum address. Output order follows
/// `signers`, so reordering the inputs changes the bytes.
///
/// `recovery_id_override`, when set, is written verbatim in place of every
/// recovery id returned by the signers. It exists to reproduce fixed test
/// vectors; leave it `None` otherwise.
///
/// Fails without signing anything if there are no signers, more than 255
/// signers, or the data would not fit in an instruction.
pub fn encode_multi<S>(
    signers: &[SignerInput<'_, S>],
    recovery_id_override: Option<u8>,
) -> Result<Instruction, Secp256k1EncodeError>
where
    S: Secp256k1Signer + Sync + ?Sized,
{
    let layout = InstructionLayout::compute(signers.iter().map(|input| input.message.len()))?;

    #[cfg(feature = "parallel")]
    let signed = signers.par_iter().map(sign_input).collect::<Result<Vec<_>, _>>();
    #[cfg(not(feature = "parallel"))]
    let signed = signers.iter().map(sign_input).collect::<Result<Vec<_>, _>>();

    let mut payloads = signed.map_err(|err| {
        log::debug!("failed to sign secp256k1 instruction payload: {err}");
        err
    })?;
    if let Some(recovery_id) = recovery_id_override {
        for payload in payloads.iter_mut() {
            payload.recovery_id = recovery_id;
        }
    }

    let instruction = build_instruction(layout.serialize(&payloads));
    log::debug!(
        "built secp256k1 instruction with {} signatures, {} bytes of data",
        payloads.len(),
        instruction.data.len()
    );
    Ok(instruction)
}

fn sign_input<'a, S>(input: &SignerInput<'a, S>) -> Result<SignaturePayload<'a>, SignerError>
where
    S: Secp256k1Signer + ?Sized,
{
    let public_key = input.signer.try_public_key()?;
    let signed = input.signer.try_sign_digest(&hash_message(input.message))?;
    if signed.recovery_id > MAX_RECOVERY_ID {
        return Err(SignerError::InvalidRecoveryId(signed.recovery_id));
    }
    Ok(SignaturePayload {
        eth_address: construct_eth_address(&public_key),
        signature: signed.signature,
        recovery_id: signed.recovery_id,
        message: input.message,
    })
}

fn build_instruction(data: Vec<u8>) -> Instruction {
    Instruction {
        program_id: ID,
        accounts: vec![],
        data,
    }
}
