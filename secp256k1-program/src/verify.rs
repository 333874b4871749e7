use {
    crate::{construct_eth_address, hash_message, parse_signatures},
    ethsig_precompile_error::PrecompileError,
    ethsig_signer::PUBLIC_KEY_SIZE,
    libsecp256k1::{Message, RecoveryId, Signature},
};

/// Check secp256k1 instruction data the way the native program does.
///
/// `instruction_datas` holds the data of every instruction in the
/// transaction, indexed by the `*_instruction_index` fields of the offsets.
/// For data built by this crate, pass `&[data]`.
///
/// Every signature must parse, and the public key recovered from it must
/// hash to the embedded Ethereum address.
pub fn verify(data: &[u8], instruction_datas: &[&[u8]]) -> Result<(), PrecompileError> {
    let signatures = parse_signatures(data, instruction_datas)?;
    for (index, parsed) in signatures.iter().enumerate() {
        let signature = Signature::parse_standard(&parsed.signature)
            .map_err(|_| PrecompileError::InvalidSignature)?;
        let recovery_id = RecoveryId::parse(parsed.recovery_id)
            .map_err(|_| PrecompileError::InvalidRecoveryId)?;

        let message = Message::parse(&hash_message(parsed.message));
        let public_key = libsecp256k1::recover(&message, &signature, &recovery_id)
            .map_err(|_| PrecompileError::InvalidSignature)?;
        let serialized = public_key.serialize();
        let mut untagged = [0u8; PUBLIC_KEY_SIZE];
        untagged.copy_from_slice(&serialized[1..]);

        if construct_eth_address(&untagged) != parsed.eth_address {
            log::trace!("secp256k1 signature {index} does not match its eth address");
            return Err(PrecompileError::InvalidSignature);
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod tests {
    use {
        super::*,
        crate::{encode_multi, encode_single, SignerInput, DATA_START},
        ethsig_signer::Secp256k1Keypair,
    };

    const ETH_ADDRESS_OFFSET: usize = DATA_START;
    const SIGNATURE_OFFSET: usize = DATA_START + 20;
    const RECOVERY_ID_OFFSET: usize = SIGNATURE_OFFSET + 64;
    const MESSAGE_OFFSET: usize = RECOVERY_ID_OFFSET + 1;

    fn keypair(seed: u8) -> Secp256k1Keypair {
        Secp256k1Keypair::try_from_bytes(&[seed; 32]).unwrap()
    }

    fn signed_data() -> Vec<u8> {
        encode_single(&keypair(1), b"hello world", None).unwrap().data
    }

    fn verify_self(data: &[u8]) -> Result<(), PrecompileError> {
        verify(data, &[data])
    }

    #[test]
    fn test_accepts_encoded_instruction() {
        assert_eq!(verify_self(&signed_data()), Ok(()));

        let keypairs: Vec<_> = (1..=3).map(keypair).collect();
        let messages: [&[u8]; 3] = [b"", b"two", &[9; 300]];
        let inputs: Vec<_> = keypairs
            .iter()
            .zip(messages)
            .map(|(keypair, message)| SignerInput::new(keypair, message))
            .collect();
        let data = encode_multi(&inputs, None).unwrap().data;
        assert_eq!(verify_self(&data), Ok(()));
    }

    #[test]
    fn test_accepts_zero_signatures() {
        assert_eq!(verify_self(&[0]), Ok(()));
    }

    #[test]
    fn test_rejects_tampered_message() {
        let mut data = signed_data();
        data[MESSAGE_OFFSET] ^= 1;
        assert_eq!(verify_self(&data), Err(PrecompileError::InvalidSignature));
    }

    #[test]
    fn test_rejects_tampered_eth_address() {
        let mut data = signed_data();
        data[ETH_ADDRESS_OFFSET] ^= 1;
        assert_eq!(verify_self(&data), Err(PrecompileError::InvalidSignature));
    }

    #[test]
    fn test_rejects_tampered_signature() {
        let mut data = signed_data();
        data[SIGNATURE_OFFSET + 40] ^= 1;
        assert_eq!(verify_self(&data), Err(PrecompileError::InvalidSignature));

        // zero r
        let mut data = signed_data();
        data[SIGNATURE_OFFSET..SIGNATURE_OFFSET + 32].fill(0);
        assert_eq!(verify_self(&data), Err(PrecompileError::InvalidSignature));
    }

    #[test]
    fn test_rejects_wrong_recovery_id() {
        let data = signed_data();
        let mut flipped = data.clone();
        flipped[RECOVERY_ID_OFFSET] ^= 1;
        assert_eq!(verify_self(&flipped), Err(PrecompileError::InvalidSignature));

        let data = encode_single(&keypair(1), b"hello world", Some(4)).unwrap().data;
        assert_eq!(verify_self(&data), Err(PrecompileError::InvalidRecoveryId));
    }

    #[test]
    fn test_rejects_signature_by_other_key() {
        let data = signed_data();
        let other = encode_single(&keypair(2), b"hello world", None).unwrap().data;
        let mut mixed = data.clone();
        mixed[SIGNATURE_OFFSET..MESSAGE_OFFSET]
            .copy_from_slice(&other[SIGNATURE_OFFSET..MESSAGE_OFFSET]);
        assert_eq!(verify_self(&mixed), Err(PrecompileError::InvalidSignature));
    }

    #[test]
    fn test_rejects_truncated_data() {
        let data = signed_data();
        assert_eq!(
            verify_self(&data[..DATA_START - 1]),
            Err(PrecompileError::InvalidInstructionDataSize)
        );
        assert_eq!(
            verify_self(&data[..MESSAGE_OFFSET]),
            Err(PrecompileError::InvalidSignature)
        );
        assert_eq!(verify_self(&[]), Err(PrecompileError::InvalidInstructionDataSize));
    }
}
