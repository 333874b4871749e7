//! Offset layout and serialization of secp256k1 instruction data.
//!
//! Layout only depends on the number of signers and the length of each
//! message, so it is computed (and checked for overflow) before any signing
//! happens.

use crate::{
    Secp256k1EncodeError, SecpSignatureOffsets, CURRENT_INSTRUCTION_INDEX,
    HASHED_PUBKEY_SERIALIZED_SIZE, MAX_INSTRUCTION_DATA_LEN, MAX_SIGNATURES,
    RECOVERABLE_SIGNATURE_SERIALIZED_SIZE, SIGNATURE_OFFSETS_SERIALIZED_SIZE,
    SIGNATURE_SERIALIZED_SIZE,
};

/// Signature material for one signer, ready to be written.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SignaturePayload<'a> {
    pub eth_address: [u8; HASHED_PUBKEY_SERIALIZED_SIZE],
    pub signature: [u8; SIGNATURE_SERIALIZED_SIZE],
    pub recovery_id: u8,
    pub message: &'a [u8],
}

/// Offsets of every signer's block plus the total data length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InstructionLayout {
    pub offsets: Vec<SecpSignatureOffsets>,
    pub data_len: usize,
}

fn to_u16(value: usize) -> Result<u16, Secp256k1EncodeError> {
    u16::try_from(value).map_err(|_| Secp256k1EncodeError::SerializationOverflow)
}

fn checked_add(lhs: usize, rhs: usize) -> Result<usize, Secp256k1EncodeError> {
    lhs.checked_add(rhs)
        .ok_or(Secp256k1EncodeError::SerializationOverflow)
}

impl InstructionLayout {
    /// Lays out one contiguous `address ‖ signature ‖ recovery id ‖ message`
    /// block per message, in order, after the offsets table.
    pub(crate) fn compute<I>(message_lens: I) -> Result<Self, Secp256k1EncodeError>
    where
        I: ExactSizeIterator<Item = usize>,
    {
        let count = message_lens.len();
        if count == 0 {
            return Err(Secp256k1EncodeError::NoSigners);
        }
        if count > MAX_SIGNATURES {
            return Err(Secp256k1EncodeError::TooManySigners(count));
        }

        // count <= 255, so the table size cannot overflow
        let table_len = count
            .saturating_mul(SIGNATURE_OFFSETS_SERIALIZED_SIZE)
            .saturating_add(1);

        let mut offsets = Vec::with_capacity(count);
        let mut block_start = table_len;
        for message_len in message_lens {
            let signature_start = checked_add(block_start, HASHED_PUBKEY_SERIALIZED_SIZE)?;
            let message_start =
                checked_add(signature_start, RECOVERABLE_SIGNATURE_SERIALIZED_SIZE)?;

            offsets.push(SecpSignatureOffsets {
                signature_offset: to_u16(signature_start)?,
                signature_instruction_index: CURRENT_INSTRUCTION_INDEX,
                eth_address_offset: to_u16(block_start)?,
                eth_address_instruction_index: CURRENT_INSTRUCTION_INDEX,
                message_data_offset: to_u16(message_start)?,
                message_data_size: to_u16(message_len)?,
                message_instruction_index: CURRENT_INSTRUCTION_INDEX,
            });

            block_start = checked_add(message_start, message_len)?;
        }

        if block_start > MAX_INSTRUCTION_DATA_LEN {
            return Err(Secp256k1EncodeError::SerializationOverflow);
        }

        Ok(Self {
            offsets,
            data_len: block_start,
        })
    }

    /// Writes the signer count, the offsets table and every payload block.
    ///
    /// `payloads` must be in the same order, and carry messages of the same
    /// lengths, as the iterator given to [`InstructionLayout::compute`].
    pub(crate) fn serialize(&self, payloads: &[SignaturePayload<'_>]) -> Vec<u8> {
        debug_assert_eq!(self.offsets.len(), payloads.len());

        let mut instruction_data = Vec::with_capacity(self.data_len);
        // compute() caps the count at 255
        instruction_data.push(self.offsets.len() as u8);
        for offsets in &self.offsets {
            instruction_data.extend_from_slice(&offsets.to_bytes());
        }

        for (offsets, payload) in self.offsets.iter().zip(payloads) {
            debug_assert_eq!(instruction_data.len(), offsets.eth_address_offset as usize);
            instruction_data.extend_from_slice(&payload.eth_address);

            debug_assert_eq!(instruction_data.len(), offsets.signature_offset as usize);
            instruction_data.extend_from_slice(&payload.signature);
            instruction_data.push(payload.recovery_id);

            debug_assert_eq!(instruction_data.len(), offsets.message_data_offset as usize);
            debug_assert_eq!(payload.message.len(), offsets.message_data_size as usize);
            instruction_data.extend_from_slice(payload.message);
        }

        debug_assert_eq!(instruction_data.len(), self.data_len);
        log::trace!(
            "serialized {} secp256k1 signatures into {} bytes",
            self.offsets.len(),
            instruction_data.len()
        );
        instruction_data
    }
}
