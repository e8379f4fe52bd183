//! Fountain-coded UR transport.
//!
//! The fountain encoder itself (Luby-transform mixing, CRC, bytewords) is an
//! injected dependency behind [`FountainEncoder`]. [`FountainAdapter`] only
//! picks the UR type and budget, and canonicalizes parts to upper case so the
//! QR can use alphanumeric mode.
//!
//! Looping and redundancy are the wrapped encoder's business: after
//! `sequence_length` pure parts it keeps producing mixed parts forever.

use qrx_ur::{UrPayload, UrType};

use crate::error::{EncodeError, EncodeResult};
use crate::part::{Fragment, PartEncoder};

/// Narrow contract the adapter drives.
pub trait FountainEncoder: Send {
    /// Pure fragments before redundancy begins.
    fn sequence_length(&self) -> usize;

    /// Next UR part string.
    ///
    /// # Errors
    /// Returns `EncodeError::Fountain` if the part cannot be produced.
    fn next_part(&mut self) -> EncodeResult<String>;

    /// Whether every pure fragment has been emitted.
    fn is_complete(&self) -> bool;
}

/// Constructs a configured fountain encoder.
pub trait FountainBuilder {
    /// Build an encoder for a UR of `ur_type` over `cbor`, with fragments of
    /// at most `max_fragment_len` bytes.
    ///
    /// # Errors
    /// Returns `EncodeError::Fountain` if the encoder rejects its input.
    fn build(
        &self,
        ur_type: UrType,
        cbor: &[u8],
        max_fragment_len: usize,
    ) -> EncodeResult<Box<dyn FountainEncoder>>;
}

/// BC-UR fountain encoder from the `ur` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrFountain;

impl FountainBuilder for UrFountain {
    fn build(
        &self,
        ur_type: UrType,
        cbor: &[u8],
        max_fragment_len: usize,
    ) -> EncodeResult<Box<dyn FountainEncoder>> {
        let inner = ur::Encoder::new(cbor, max_fragment_len, ur_type.as_str())
            .map_err(|e| EncodeError::Fountain(format!("{e:?}")))?;
        let single_part = (inner.fragment_count() == 1)
            .then(|| ur::encode(cbor, &ur::Type::Custom(ur_type.as_str())));
        Ok(Box::new(UrFountainEncoder { inner, single_part }))
    }
}

struct UrFountainEncoder {
    inner: ur::Encoder<'static>,
    /// `ur:<type>/<bytewords>` when the message fits one fragment.
    single_part: Option<String>,
}

impl FountainEncoder for UrFountainEncoder {
    fn sequence_length(&self) -> usize {
        self.inner.fragment_count()
    }

    fn next_part(&mut self) -> EncodeResult<String> {
        // Advance the fountain even for single parts so completion tracks pulls.
        let multipart = self
            .inner
            .next_part()
            .map_err(|e| EncodeError::Fountain(format!("{e:?}")))?;
        Ok(self.single_part.clone().unwrap_or(multipart))
    }

    fn is_complete(&self) -> bool {
        self.inner.current_index() >= self.inner.fragment_count()
    }
}

/// Part encoder over a wrapped fountain encoder.
pub struct FountainAdapter {
    inner: Box<dyn FountainEncoder>,
    ur_type: UrType,
}

impl FountainAdapter {
    /// Serialize `payload` and hand it to a fountain encoder from `builder`.
    ///
    /// # Errors
    /// Returns `EncodeError::Ur` if the payload cannot be serialized and
    /// `EncodeError::Fountain` if the encoder rejects it.
    pub fn new(
        payload: &dyn UrPayload,
        max_fragment_len: usize,
        builder: &dyn FountainBuilder,
    ) -> EncodeResult<Self> {
        if max_fragment_len == 0 {
            return Err(EncodeError::InvalidFragmentBudget);
        }
        let ur_type = payload.ur_type();
        let cbor = payload.to_cbor()?;
        let inner = builder.build(ur_type, &cbor, max_fragment_len)?;

        tracing::debug!(
            %ur_type,
            cbor_len = cbor.len(),
            max_fragment_len,
            sequence_length = inner.sequence_length(),
            "fountain encoder built"
        );

        Ok(Self { inner, ur_type })
    }

    /// UR type carried by every part.
    #[must_use]
    pub const fn ur_type(&self) -> UrType {
        self.ur_type
    }
}

impl std::fmt::Debug for FountainAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FountainAdapter")
            .field("ur_type", &self.ur_type)
            .field("sequence_length", &self.inner.sequence_length())
            .finish_non_exhaustive()
    }
}

impl PartEncoder for FountainAdapter {
    fn sequence_length(&self) -> usize {
        self.inner.sequence_length()
    }

    fn next_fragment(&mut self) -> EncodeResult<Fragment> {
        let part = self.inner.next_part()?;
        Ok(Fragment::Text(part.to_ascii_uppercase()))
    }

    fn is_complete(&self) -> bool {
        self.inner.is_complete()
    }
}

#[cfg(test)]
pub(crate) mod stub {
    //! Deterministic stand-in for the fountain encoder.

    use std::sync::{Arc, Mutex};

    use super::*;

    /// What the stub builder was asked to build.
    #[derive(Debug, Clone, Default)]
    pub struct BuildLog {
        pub ur_type: Option<UrType>,
        pub cbor: Vec<u8>,
        pub max_fragment_len: usize,
    }

    /// Splits the CBOR into `max_fragment_len` pieces and emits
    /// `ur:<type>/<seq>-<len>/<hex>`, then keeps counting past the end.
    #[derive(Debug, Clone, Default)]
    pub struct StubFountain {
        pub log: Arc<Mutex<BuildLog>>,
    }

    struct StubEncoder {
        ur_type: UrType,
        pieces: Vec<Vec<u8>>,
        seq: usize,
    }

    impl FountainBuilder for StubFountain {
        fn build(
            &self,
            ur_type: UrType,
            cbor: &[u8],
            max_fragment_len: usize,
        ) -> EncodeResult<Box<dyn FountainEncoder>> {
            if cbor.is_empty() {
                return Err(EncodeError::Fountain("empty message".into()));
            }
            *self.log.lock().unwrap() = BuildLog {
                ur_type: Some(ur_type),
                cbor: cbor.to_vec(),
                max_fragment_len,
            };
            Ok(Box::new(StubEncoder {
                ur_type,
                pieces: cbor.chunks(max_fragment_len).map(<[u8]>::to_vec).collect(),
                seq: 0,
            }))
        }
    }

    impl FountainEncoder for StubEncoder {
        fn sequence_length(&self) -> usize {
            self.pieces.len()
        }

        fn next_part(&mut self) -> EncodeResult<String> {
            let piece = &self.pieces[self.seq % self.pieces.len()];
            self.seq += 1;
            Ok(format!(
                "ur:{}/{}-{}/{}",
                self.ur_type,
                self.seq,
                self.pieces.len(),
                hex::encode(piece)
            ))
        }

        fn is_complete(&self) -> bool {
            self.seq >= self.pieces.len()
        }
    }
}

#[cfg(test)]
mod tests {
    use qrx_ur::CryptoPsbt;

    use super::stub::StubFountain;
    use super::*;

    #[test]
    fn adapter_uppercases_and_delegates() {
        let builder = StubFountain::default();
        let psbt = CryptoPsbt::new(vec![0xab; 25]);
        let mut adapter = FountainAdapter::new(&psbt, 10, &builder).unwrap();

        // 25 bytes + 2 byte CBOR header = 27 bytes -> 3 pieces of 10
        assert_eq!(adapter.sequence_length(), 3);
        assert_eq!(adapter.ur_type(), UrType::CryptoPsbt);

        let first = adapter.next_fragment().unwrap();
        let text = first.as_text().unwrap();
        assert!(text.starts_with("UR:CRYPTO-PSBT/1-3/"));
        assert_eq!(text, text.to_ascii_uppercase());
        assert!(!adapter.is_complete());

        adapter.next_fragment().unwrap();
        adapter.next_fragment().unwrap();
        assert!(adapter.is_complete());
    }

    #[test]
    fn adapter_passes_cbor_and_budget_to_builder() {
        let builder = StubFountain::default();
        let psbt = CryptoPsbt::new(b"psbt".to_vec());
        FountainAdapter::new(&psbt, 120, &builder).unwrap();

        let log = builder.log.lock().unwrap().clone();
        assert_eq!(log.ur_type, Some(UrType::CryptoPsbt));
        assert_eq!(log.cbor, psbt.to_cbor().unwrap());
        assert_eq!(log.max_fragment_len, 120);
    }

    #[test]
    fn adapter_keeps_going_after_completion() {
        let builder = StubFountain::default();
        let psbt = CryptoPsbt::new(vec![1u8; 5]);
        let mut adapter = FountainAdapter::new(&psbt, 30, &builder).unwrap();

        assert_eq!(adapter.sequence_length(), 1);
        adapter.next_fragment().unwrap();
        assert!(adapter.is_complete());
        let later = adapter.next_fragment().unwrap();
        assert!(later.as_text().unwrap().starts_with("UR:CRYPTO-PSBT/2-1/"));
        assert!(adapter.is_complete());
    }

    #[test]
    fn zero_budget_rejected() {
        let psbt = CryptoPsbt::new(vec![1u8; 5]);
        let err = FountainAdapter::new(&psbt, 0, &StubFountain::default()).unwrap_err();
        assert_eq!(err, EncodeError::InvalidFragmentBudget);
    }

    #[test]
    fn ur_crate_encoder_produces_multipart_ur() {
        let psbt = CryptoPsbt::new(vec![0x5a; 200]);
        let mut adapter = FountainAdapter::new(&psbt, 30, &UrFountain).unwrap();

        let n = adapter.sequence_length();
        assert!(n > 1);
        for _ in 0..n {
            let part = adapter.next_fragment().unwrap();
            let text = part.as_text().unwrap();
            assert!(text.starts_with("UR:CRYPTO-PSBT/"), "{text}");
            assert!(text
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || "/:-".contains(c)));
        }
        assert!(adapter.is_complete());
    }

    #[test]
    fn ur_crate_single_fragment_uses_single_part_form() {
        let psbt = CryptoPsbt::new(b"psbt\xff\x01\x00".to_vec());
        let mut adapter = FountainAdapter::new(&psbt, 120, &UrFountain).unwrap();
        assert_eq!(adapter.sequence_length(), 1);
        assert!(!adapter.is_complete());

        let part = adapter.next_fragment().unwrap();
        let text = part.as_text().unwrap();
        assert!(text.starts_with("UR:CRYPTO-PSBT/"), "{text}");
        assert_eq!(text.matches('/').count(), 1, "{text}");
        assert!(adapter.is_complete());

        let (kind, payload) = ur::decode(&text.to_ascii_lowercase()).unwrap();
        assert_eq!(kind, ur::ur::Kind::SinglePart);
        assert_eq!(payload, psbt.to_cbor().unwrap());

        // Later pulls repeat the same single part.
        assert_eq!(adapter.next_fragment().unwrap(), part);
    }
}
