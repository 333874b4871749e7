//! Reading secp256k1 instruction data back into its parts.

use {
    crate::{
        SecpSignatureOffsets, HASHED_PUBKEY_SERIALIZED_SIZE, SIGNATURE_OFFSETS_SERIALIZED_SIZE,
        SIGNATURE_SERIALIZED_SIZE,
    },
    ethsig_precompile_error::PrecompileError,
};

/// One signature record of a secp256k1 instruction, with the bytes its
/// offsets point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedSignature<'a> {
    pub offsets: SecpSignatureOffsets,
    pub eth_address: [u8; HASHED_PUBKEY_SERIALIZED_SIZE],
    pub signature: [u8; SIGNATURE_SERIALIZED_SIZE],
    /// Raw recovery id byte. Not range checked.
    pub recovery_id: u8,
    pub message: &'a [u8],
}

/// Parse instruction data whose offsets only refer to itself.
///
/// This is the inverse of [`encode_multi`](crate::encode_multi).
pub fn parse_instruction_data(data: &[u8]) -> Result<Vec<ParsedSignature<'_>>, PrecompileError> {
    parse_signatures(data, &[data])
}

/// Parse instruction data, resolving each offsets record against the
/// instruction its `*_instruction_index` selects in `instruction_datas`.
///
/// Only the structure is checked: signatures are not parsed and recovery ids
/// are returned as-is. See [`verify`](crate::verify) for the full check.
pub fn parse_signatures<'a>(
    data: &[u8],
    instruction_datas: &[&'a [u8]],
) -> Result<Vec<ParsedSignature<'a>>, PrecompileError> {
    let Some((&count, records)) = data.split_first() else {
        return Err(PrecompileError::InvalidInstructionDataSize);
    };
    if count == 0 && !records.is_empty() {
        return Err(PrecompileError::InvalidInstructionDataSize);
    }
    let table_len = usize::from(count).saturating_mul(SIGNATURE_OFFSETS_SERIALIZED_SIZE);
    if records.len() < table_len {
        return Err(PrecompileError::InvalidInstructionDataSize);
    }

    records[..table_len]
        .chunks_exact(SIGNATURE_OFFSETS_SERIALIZED_SIZE)
        .map(|record| {
            let offsets =
                SecpSignatureOffsets::from_bytes(record).ok_or(PrecompileError::InvalidSignature)?;
            parse_record(offsets, instruction_datas)
        })
        .collect()
}

fn parse_record<'a>(
    offsets: SecpSignatureOffsets,
    instruction_datas: &[&'a [u8]],
) -> Result<ParsedSignature<'a>, PrecompileError> {
    // Check that the signature and its trailing recovery id are in range.
    let signature_instruction = instruction_datas
        .get(usize::from(offsets.signature_instruction_index))
        .ok_or(PrecompileError::InvalidInstructionDataSize)?;
    let sig_start = usize::from(offsets.signature_offset);
    let sig_end = sig_start.saturating_add(SIGNATURE_SERIALIZED_SIZE);
    if sig_end >= signature_instruction.len() {
        return Err(PrecompileError::InvalidSignature);
    }
    let signature = signature_instruction
        .get(sig_start..sig_end)
        .and_then(|bytes| <[u8; SIGNATURE_SERIALIZED_SIZE]>::try_from(bytes).ok())
        .ok_or(PrecompileError::InvalidSignature)?;
    let recovery_id = *signature_instruction
        .get(sig_end)
        .ok_or(PrecompileError::InvalidSignature)?;

    let eth_address = get_data_slice(
        instruction_datas,
        offsets.eth_address_instruction_index,
        offsets.eth_address_offset,
        HASHED_PUBKEY_SERIALIZED_SIZE,
    )?;
    let eth_address = <[u8; HASHED_PUBKEY_SERIALIZED_SIZE]>::try_from(eth_address)
        .map_err(|_| PrecompileError::InvalidSignature)?;

    let message = get_data_slice(
        instruction_datas,
        offsets.message_instruction_index,
        offsets.message_data_offset,
        usize::from(offsets.message_data_size),
    )?;

    Ok(ParsedSignature {
        offsets,
        eth_address,
        signature,
        recovery_id,
        message,
    })
}

fn get_data_slice<'a>(
    instruction_datas: &[&'a [u8]],
    instruction_index: u8,
    offset_start: u16,
    size: usize,
) -> Result<&'a [u8], PrecompileError> {
    let instruction = instruction_datas
        .get(usize::from(instruction_index))
        .ok_or(PrecompileError::InvalidDataOffsets)?;
    let start = usize::from(offset_start);
    let end = start.saturating_add(size);
    instruction
        .get(start..end)
        .ok_or(PrecompileError::InvalidSignature)
}

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod tests {
    use {
        super::*,
        crate::{encode_single, new_secp256k1_instruction_with_signature, DATA_START},
        ethsig_signer::Secp256k1Keypair,
        test_case::test_case,
    };

    fn sample_data(message: &[u8]) -> Vec<u8> {
        let keypair = Secp256k1Keypair::try_from_bytes(&[11; 32]).unwrap();
        encode_single(&keypair, message, None).unwrap().data
    }

    fn with_offsets(mut data: Vec<u8>, offsets: SecpSignatureOffsets) -> Vec<u8> {
        data[1..DATA_START].copy_from_slice(&offsets.to_bytes());
        data
    }

    fn first_offsets(data: &[u8]) -> SecpSignatureOffsets {
        SecpSignatureOffsets::from_bytes(&data[1..]).unwrap()
    }

    #[test]
    fn test_parse_single_signature() {
        let data = new_secp256k1_instruction_with_signature(b"hello", &[2; 64], 3, &[1; 20])
            .unwrap()
            .data;
        let parsed = parse_instruction_data(&data).unwrap();
        assert_eq!(
            parsed,
            vec![ParsedSignature {
                offsets: first_offsets(&data),
                eth_address: [1; 20],
                signature: [2; 64],
                recovery_id: 3,
                message: b"hello",
            }]
        );
    }

    #[test_case(&[] ; "empty")]
    #[test_case(&[0, 0] ; "zero count with trailing bytes")]
    #[test_case(&[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0] ; "truncated offsets table")]
    #[test_case(&[2; 12] ; "second record missing")]
    fn test_invalid_header(data: &[u8]) {
        assert_eq!(
            parse_instruction_data(data),
            Err(PrecompileError::InvalidInstructionDataSize)
        );
    }

    #[test]
    fn test_zero_signatures() {
        assert_eq!(parse_instruction_data(&[0]), Ok(vec![]));
    }

    #[test]
    fn test_signature_instruction_index_out_of_range() {
        let data = sample_data(b"hello");
        let offsets = SecpSignatureOffsets {
            signature_instruction_index: 1,
            ..first_offsets(&data)
        };
        assert_eq!(
            parse_instruction_data(&with_offsets(data, offsets)),
            Err(PrecompileError::InvalidInstructionDataSize)
        );
    }

    #[test]
    fn test_signature_must_leave_room_for_recovery_id() {
        let data = sample_data(b"");
        // with an empty message the recovery id is the last byte
        let offsets = first_offsets(&data);
        assert_eq!(offsets.signature_offset as usize + 65, data.len());
        assert!(parse_instruction_data(&data).is_ok());

        let offsets = SecpSignatureOffsets {
            signature_offset: offsets.signature_offset + 1,
            ..offsets
        };
        assert_eq!(
            parse_instruction_data(&with_offsets(data, offsets)),
            Err(PrecompileError::InvalidSignature)
        );
    }

    #[test]
    fn test_eth_address_instruction_index_out_of_range() {
        let data = sample_data(b"hello");
        let offsets = SecpSignatureOffsets {
            eth_address_instruction_index: 2,
            ..first_offsets(&data)
        };
        assert_eq!(
            parse_instruction_data(&with_offsets(data, offsets)),
            Err(PrecompileError::InvalidDataOffsets)
        );
    }

    #[test]
    fn test_message_out_of_range() {
        let data = sample_data(b"hello");
        let offsets = SecpSignatureOffsets {
            message_data_size: 6,
            ..first_offsets(&data)
        };
        assert_eq!(
            parse_instruction_data(&with_offsets(data.clone(), offsets)),
            Err(PrecompileError::InvalidSignature)
        );

        let offsets = SecpSignatureOffsets {
            message_instruction_index: 1,
            ..first_offsets(&data)
        };
        assert_eq!(
            parse_instruction_data(&with_offsets(data, offsets)),
            Err(PrecompileError::InvalidDataOffsets)
        );
    }

    #[test]
    fn test_message_in_another_instruction() {
        let data = sample_data(b"hello");
        let other = b"xxgoodbye".to_vec();
        let offsets = SecpSignatureOffsets {
            message_instruction_index: 1,
            message_data_offset: 2,
            message_data_size: 7,
            ..first_offsets(&data)
        };
        let data = with_offsets(data, offsets);
        let parsed = parse_signatures(&data, &[&data, &other]).unwrap();
        assert_eq!(parsed[0].message, b"goodbye");
    }
}
