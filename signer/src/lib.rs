//! Abstractions for secp256k1 signers.
//!
//! A [`Secp256k1Signer`] exposes the uncompressed public key of a secret key
//! and signs 32-byte digests, returning the 64-byte `r ‖ s` signature together
//! with its recovery id. Hashing the message is the caller's job: signers
//! never see anything but the digest.
#![cfg_attr(docsrs, feature(doc_cfg))]

use {
    core::fmt,
    libsecp256k1::{Message, PublicKey, SecretKey},
};

/// Size of a serialized secret key.
pub const SECRET_KEY_SIZE: usize = 32;

/// Size of an uncompressed public key without its leading `0x04` tag byte.
pub const PUBLIC_KEY_SIZE: usize = 64;

/// Size of a serialized `r ‖ s` signature.
pub const SIGNATURE_SIZE: usize = 64;

/// Size of the digest that signers accept.
pub const DIGEST_SIZE: usize = 32;

/// Largest valid recovery id.
pub const MAX_RECOVERY_ID: u8 = 3;

/// A 64-byte `r ‖ s` signature and the id needed to recover its public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoverableSignature {
    /// Big-endian `r` followed by big-endian `s`.
    pub signature: [u8; SIGNATURE_SIZE],
    /// One of `0..=3`.
    pub recovery_id: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignerError {
    /// The secret key bytes are zero, out of range, or the wrong length.
    InvalidSecretKey,
    /// The backend produced a recovery id outside `0..=3`.
    InvalidRecoveryId(u8),
    /// Any other backend failure, such as an unavailable hardware key store.
    Custom(String),
}

impl fmt::Display for SignerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSecretKey => f.write_str("invalid secp256k1 secret key"),
            Self::InvalidRecoveryId(id) => write!(f, "invalid recovery id {id}"),
            Self::Custom(reason) => write!(f, "signing failed: {reason}"),
        }
    }
}

impl core::error::Error for SignerError {}

/// The signing primitive consumed by instruction builders.
pub trait Secp256k1Signer {
    /// Uncompressed public key `X ‖ Y`, without the leading tag byte.
    fn try_public_key(&self) -> Result<[u8; PUBLIC_KEY_SIZE], SignerError>;

    /// Sign a 32-byte digest.
    fn try_sign_digest(&self, digest: &[u8; DIGEST_SIZE])
        -> Result<RecoverableSignature, SignerError>;
}

impl<T: Secp256k1Signer + ?Sized> Secp256k1Signer for &T {
    fn try_public_key(&self) -> Result<[u8; PUBLIC_KEY_SIZE], SignerError> {
        (**self).try_public_key()
    }

    fn try_sign_digest(
        &self,
        digest: &[u8; DIGEST_SIZE],
    ) -> Result<RecoverableSignature, SignerError> {
        (**self).try_sign_digest(digest)
    }
}

fn untagged_public_key(public_key: &PublicKey) -> [u8; PUBLIC_KEY_SIZE] {
    let serialized = public_key.serialize();
    let mut untagged = [0u8; PUBLIC_KEY_SIZE];
    untagged.copy_from_slice(&serialized[1..]);
    untagged
}

fn sign_with(secret_key: &SecretKey, digest: &[u8; DIGEST_SIZE]) -> RecoverableSignature {
    let message = Message::parse(digest);
    // RFC 6979 nonces: the same key and digest always give the same signature.
    let (signature, recovery_id) = libsecp256k1::sign(&message, secret_key);
    RecoverableSignature {
        signature: signature.serialize(),
        recovery_id: recovery_id.serialize(),
    }
}

impl Secp256k1Signer for SecretKey {
    fn try_public_key(&self) -> Result<[u8; PUBLIC_KEY_SIZE], SignerError> {
        Ok(untagged_public_key(&PublicKey::from_secret_key(self)))
    }

    fn try_sign_digest(
        &self,
        digest: &[u8; DIGEST_SIZE],
    ) -> Result<RecoverableSignature, SignerError> {
        Ok(sign_with(self, digest))
    }
}

/// A secp256k1 secret key with its public key cached.
#[derive(Clone)]
pub struct Secp256k1Keypair {
    secret: SecretKey,
    public: PublicKey,
}

impl Secp256k1Keypair {
    /// Parse a keypair from 32 raw secret key bytes.
    pub fn try_from_bytes(secret_key_bytes: &[u8]) -> Result<Self, SignerError> {
        let secret = SecretKey::parse_slice(secret_key_bytes).map_err(|err| {
            log::debug!("rejected secret key bytes: {err:?}");
            SignerError::InvalidSecretKey
        })?;
        Ok(Self::from_secret_key(secret))
    }

    pub fn from_secret_key(secret: SecretKey) -> Self {
        let public = PublicKey::from_secret_key(&secret);
        Self { secret, public }
    }

    pub fn secret_bytes(&self) -> [u8; SECRET_KEY_SIZE] {
        self.secret.serialize()
    }

    pub fn public_key(&self) -> [u8; PUBLIC_KEY_SIZE] {
        untagged_public_key(&self.public)
    }
}

impl fmt::Debug for Secp256k1Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secp256k1Keypair")
            .field("public", &self.public_key())
            .finish_non_exhaustive()
    }
}

impl Secp256k1Signer for Secp256k1Keypair {
    fn try_public_key(&self) -> Result<[u8; PUBLIC_KEY_SIZE], SignerError> {
        Ok(self.public_key())
    }

    fn try_sign_digest(
        &self,
        digest: &[u8; DIGEST_SIZE],
    ) -> Result<RecoverableSignature, SignerError> {
        Ok(sign_with(&self.secret, digest))
    }
}
