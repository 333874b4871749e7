use {
    crate::{MAX_INSTRUCTION_DATA_LEN, MAX_SIGNATURES},
    ethsig_signer::SignerError,
};

/// Errors that can occur while building a secp256k1 instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Secp256k1EncodeError {
    /// No signers were supplied.
    NoSigners,
    /// More than 255 signers were supplied. Split the work across several
    /// instructions.
    TooManySigners(usize),
    /// The signing primitive failed, e.g. because the secret key is invalid.
    SigningError(SignerError),
    /// An offset or message size does not fit in a `u16`, or the instruction
    /// data would exceed 65535 bytes.
    SerializationOverflow,
}

impl core::fmt::Display for Secp256k1EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoSigners => write!(f, "at least one signer is required"),
            Self::TooManySigners(count) => {
                write!(f, "too many signers: {count} (max {MAX_SIGNATURES})")
            }
            Self::SigningError(err) => write!(f, "signing failed: {err}"),
            Self::SerializationOverflow => write!(
                f,
                "instruction data exceeds max size ({MAX_INSTRUCTION_DATA_LEN} bytes)"
            ),
        }
    }
}

impl core::error::Error for Secp256k1EncodeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::SigningError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SignerError> for Secp256k1EncodeError {
    fn from(err: SignerError) -> Self {
        Self::SigningError(err)
    }
}
