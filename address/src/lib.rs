//! Fixed-size addresses identifying programs and accounts.
//!
//! An [`Address`] is 32 opaque bytes. Its human-readable form is base58,
//! which is how program ids are written in configuration and logs.
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use core::{fmt, str::FromStr};

/// Number of bytes in an address.
pub const ADDRESS_BYTES: usize = 32;

/// Maximum string length of a base58 encoded address.
pub const MAX_BASE58_LEN: usize = 44;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseAddressError {
    /// The string is longer than any 32-byte base58 value.
    WrongSize,
    /// The string is not valid base58 or does not decode to 32 bytes.
    Invalid,
}

impl fmt::Display for ParseAddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongSize => f.write_str("String is the wrong size"),
            Self::Invalid => f.write_str("Invalid Base58 string"),
        }
    }
}

impl core::error::Error for ParseAddressError {}

/// The address of a program or account.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Address(pub(crate) [u8; ADDRESS_BYTES]);

impl Address {
    pub const fn new_from_array(address_array: [u8; ADDRESS_BYTES]) -> Self {
        Self(address_array)
    }

    pub const fn to_bytes(self) -> [u8; ADDRESS_BYTES] {
        self.0
    }

    pub const fn as_array(&self) -> &[u8; ADDRESS_BYTES] {
        &self.0
    }

    fn write_as_base58(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let encoded: String = bs58::encode(self.0).into_string();
        f.write_str(&encoded)
    }
}

impl From<[u8; ADDRESS_BYTES]> for Address {
    #[inline]
    fn from(from: [u8; ADDRESS_BYTES]) -> Self {
        Self(from)
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = core::array::TryFromSliceError;

    #[inline]
    fn try_from(address: &[u8]) -> Result<Self, Self::Error> {
        <[u8; ADDRESS_BYTES]>::try_from(address).map(Self::from)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() > MAX_BASE58_LEN {
            return Err(ParseAddressError::WrongSize);
        }
        let mut bytes = [0u8; ADDRESS_BYTES];
        let decoded_len = bs58::decode(s)
            .onto(&mut bytes)
            .map_err(|_| ParseAddressError::Invalid)?;
        if decoded_len != ADDRESS_BYTES {
            Err(ParseAddressError::Invalid)
        } else {
            Ok(Self(bytes))
        }
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_as_base58(f)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_as_base58(f)
    }
}
