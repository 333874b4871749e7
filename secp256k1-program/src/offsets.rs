use crate::SIGNATURE_OFFSETS_SERIALIZED_SIZE;
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

/// Offsets of the signature data within a secp256k1 instruction.
///
/// Offsets are byte positions inside the data of the instruction selected by
/// the matching `*_instruction_index` field. All multi-byte fields are
/// little-endian on the wire.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq)]
pub struct SecpSignatureOffsets {
    /// Offset to the 64-byte signature plus 1-byte recovery id.
    pub signature_offset: u16,
    /// Within the transaction, the index of the instruction whose data contains the signature.
    pub signature_instruction_index: u8,
    /// Offset to the 20-byte Ethereum address.
    pub eth_address_offset: u16,
    /// Within the transaction, the index of the instruction whose data contains the address.
    pub eth_address_instruction_index: u8,
    /// Offset to the start of the message data.
    pub message_data_offset: u16,
    /// Size of the message data in bytes.
    pub message_data_size: u16,
    /// Within the transaction, the index of the instruction whose data contains the message.
    pub message_instruction_index: u8,
}

impl SecpSignatureOffsets {
    pub fn to_bytes(&self) -> [u8; SIGNATURE_OFFSETS_SERIALIZED_SIZE] {
        let [s0, s1] = self.signature_offset.to_le_bytes();
        let [e0, e1] = self.eth_address_offset.to_le_bytes();
        let [m0, m1] = self.message_data_offset.to_le_bytes();
        let [z0, z1] = self.message_data_size.to_le_bytes();
        [
            s0,
            s1,
            self.signature_instruction_index,
            e0,
            e1,
            self.eth_address_instruction_index,
            m0,
            m1,
            z0,
            z1,
            self.message_instruction_index,
        ]
    }

    /// Reads a record from the first [`SIGNATURE_OFFSETS_SERIALIZED_SIZE`]
    /// bytes of `bytes`. Returns `None` if `bytes` is shorter than that.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let record: &[u8; SIGNATURE_OFFSETS_SERIALIZED_SIZE] = bytes
            .get(..SIGNATURE_OFFSETS_SERIALIZED_SIZE)?
            .try_into()
            .ok()?;
        let [
            s0,
            s1,
            signature_instruction_index,
            e0,
            e1,
            eth_address_instruction_index,
            m0,
            m1,
            z0,
            z1,
            message_instruction_index,
        ] = *record;
        Some(Self {
            signature_offset: u16::from_le_bytes([s0, s1]),
            signature_instruction_index,
            eth_address_offset: u16::from_le_bytes([e0, e1]),
            eth_address_instruction_index,
            message_data_offset: u16::from_le_bytes([m0, m1]),
            message_data_size: u16::from_le_bytes([z0, z1]),
            message_instruction_index,
        })
    }
}
