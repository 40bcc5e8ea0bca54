use rkyv::api::high::{HighDeserializer, HighSerializer, HighValidator};
use rkyv::bytecheck::CheckBytes;
use rkyv::rancor;
use rkyv::ser::allocator::ArenaHandle;
use rkyv::util::AlignedVec;
use rkyv::{Archive, Deserialize, Serialize};

pub type CodecError = rancor::Error;

const ARCHIVE_ALIGN: usize = 16;

pub fn encode<T>(value: &T) -> Result<Vec<u8>, CodecError>
where
    T: for<'a> Serialize<HighSerializer<AlignedVec, ArenaHandle<'a>, CodecError>>,
{
    Ok(rkyv::to_bytes::<CodecError>(value)?.into_vec())
}

/// Checks the archive before deserializing. Bytes handed over by a host
/// (JS `Uint8Array`, file reads) carry no alignment promise, so unaligned
/// input is copied into an aligned buffer first.
pub fn decode<T>(bytes: &[u8]) -> Result<T, CodecError>
where
    T: Archive,
    T::Archived: for<'a> CheckBytes<HighValidator<'a, CodecError>>
        + Deserialize<T, HighDeserializer<CodecError>>,
{
    if (bytes.as_ptr() as usize) % ARCHIVE_ALIGN == 0 {
        return rkyv::from_bytes::<T, CodecError>(bytes);
    }
    let mut aligned = AlignedVec::<ARCHIVE_ALIGN>::with_capacity(bytes.len());
    aligned.extend_from_slice(bytes);
    rkyv::from_bytes::<T, CodecError>(&aligned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{Piece, Side};

    #[test]
    fn unaligned_input_still_decodes() {
        let piece = Piece::new(5, Side::Back);
        let bytes = encode(&piece).expect("encode");
        let mut shifted = vec![0u8; bytes.len() + 1];
        shifted[1..].copy_from_slice(&bytes);
        let decoded: Piece = decode(&shifted[1..]).expect("decode");
        assert_eq!(decoded, piece);
    }

    #[test]
    fn truncated_archive_is_rejected() {
        let bytes = encode(&Piece::new(1, Side::Front)).expect("encode");
        assert!(decode::<Piece>(&bytes[..bytes.len() / 2]).is_err());
    }
}
