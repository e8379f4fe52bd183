//! Request dispatch: one request in, one part encoder out.
//!
//! | kind             | encoder              | budget     |
//! |------------------|----------------------|------------|
//! | `psbt`           | [`LegacyChunker`]    | chunk      |
//! | `ur-psbt`        | [`FountainAdapter`]  | fountain   |
//! | `xpub`           | [`SingleShotEncoder`]| -          |
//! | `xpub-chunked`   | [`LegacyChunker`]    | chunk      |
//! | `ur-account`     | [`FountainAdapter`]  | fountain   |
//! | `seedqr`         | [`SeedNumericEncoder`]| -         |
//! | `compact-seedqr` | [`SeedCompactEncoder`]| -         |
//! | `address`        | [`SingleShotEncoder`]| -          |

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use qrx_ur::CryptoPsbt;

use crate::chunker::LegacyChunker;
use crate::error::{EncodeError, EncodeResult};
use crate::fountain::{FountainAdapter, FountainBuilder, UrFountain};
use crate::part::{Fragment, PartEncoder};
use crate::policy::{Density, FragmentPolicy};
use crate::render::{FragmentRenderer, RenderOptions};
use crate::request::{EncodingRequest, Payload, PayloadKind};
use crate::seed::{Bip39Wordlists, Wordlist, WordlistSource};
use crate::seedqr::{SeedCompactEncoder, SeedNumericEncoder};
use crate::settings::Network;
use crate::single::SingleShotEncoder;

/// The encoder chosen for a request, behind the uniform pull contract.
pub struct QrEncoder {
    inner: Box<dyn PartEncoder>,
    kind: PayloadKind,
    density: Density,
    network: Network,
}

impl QrEncoder {
    /// Build the encoder for `request` with the bundled BIP39 wordlists and
    /// the `ur` crate fountain encoder.
    ///
    /// # Errors
    /// See [`QrEncoder::with_collaborators`].
    pub fn new(request: &EncodingRequest) -> EncodeResult<Self> {
        Self::with_collaborators(request, &Bip39Wordlists, &UrFountain)
    }

    /// Build the encoder for `request`.
    ///
    /// Either a fully usable encoder comes back or nothing does.
    ///
    /// # Errors
    /// - `MissingWordlist` if a seed kind's language code does not resolve
    /// - `PayloadMismatch` if the payload variant does not fit the kind
    /// - `EmptyPayload` if there is nothing to encode
    /// - `WordNotInWordlist`, `InvalidDerivation`, `Ur`, `Fountain` from the
    ///   chosen encoder's construction
    pub fn with_collaborators(
        request: &EncodingRequest,
        wordlists: &dyn WordlistSource,
        fountain: &dyn FountainBuilder,
    ) -> EncodeResult<Self> {
        let kind = request.kind();
        let policy = FragmentPolicy::for_density(request.density());
        let inner = build(request, policy, wordlists, fountain)?;

        tracing::debug!(
            %kind,
            density = %request.density(),
            network = %request.network(),
            sequence_length = inner.sequence_length(),
            "qr encoder selected"
        );

        Ok(Self {
            inner,
            kind,
            density: request.density(),
            network: request.network(),
        })
    }

    /// Parts in one full traversal.
    #[must_use]
    pub fn sequence_length(&self) -> usize {
        self.inner.sequence_length()
    }

    /// Pull the next fragment.
    ///
    /// # Errors
    /// Propagates the encoder's pull error.
    pub fn next_fragment(&mut self) -> EncodeResult<Fragment> {
        self.inner.next_fragment()
    }

    /// Whether every part has been shown at least once.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.inner.is_complete()
    }

    /// Density the request asked for.
    #[must_use]
    pub const fn density(&self) -> Density {
        self.density
    }

    /// Kind the request asked for.
    #[must_use]
    pub const fn payload_kind(&self) -> PayloadKind {
        self.kind
    }

    /// Network the request was made for.
    #[must_use]
    pub const fn network(&self) -> Network {
        self.network
    }

    /// Pull the next fragment and render it.
    ///
    /// Numeric SeedQR frames ignore the background override.
    ///
    /// # Errors
    /// Propagates pull errors; renderer failures become `EncodeError::Render`.
    pub fn next_fragment_image<R: FragmentRenderer>(
        &mut self,
        renderer: &R,
        options: &RenderOptions,
    ) -> EncodeResult<R::Image> {
        let fragment = self.next_fragment()?;
        let result = if self.kind == PayloadKind::SeedQr {
            renderer.render(&fragment, &options.without_background())
        } else {
            renderer.render(&fragment, options)
        };
        result.map_err(|e| EncodeError::Render(e.to_string()))
    }
}

impl std::fmt::Debug for QrEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QrEncoder")
            .field("kind", &self.kind)
            .field("density", &self.density)
            .field("network", &self.network)
            .field("sequence_length", &self.inner.sequence_length())
            .finish_non_exhaustive()
    }
}

impl PartEncoder for QrEncoder {
    fn sequence_length(&self) -> usize {
        self.inner.sequence_length()
    }

    fn next_fragment(&mut self) -> EncodeResult<Fragment> {
        self.inner.next_fragment()
    }

    fn is_complete(&self) -> bool {
        self.inner.is_complete()
    }
}

fn resolve_wordlist(wordlists: &dyn WordlistSource, code: &str) -> EncodeResult<Wordlist> {
    wordlists
        .get_wordlist(code)
        .ok_or_else(|| EncodeError::MissingWordlist {
            code: code.to_string(),
        })
}

fn build(
    request: &EncodingRequest,
    policy: FragmentPolicy,
    wordlists: &dyn WordlistSource,
    fountain: &dyn FountainBuilder,
) -> EncodeResult<Box<dyn PartEncoder>> {
    let kind = request.kind();

    let wordlist = if kind.is_seed_phrase() {
        Some(resolve_wordlist(wordlists, request.wordlist_language())?)
    } else {
        None
    };

    let encoder: Box<dyn PartEncoder> = match (kind, request.payload(), wordlist) {
        (_, Payload::Psbt(bytes), _) if bytes.is_empty() => return Err(EncodeError::EmptyPayload),
        (PayloadKind::Psbt, Payload::Psbt(bytes), _) => Box::new(LegacyChunker::new(
            &BASE64.encode(bytes),
            policy.chunk_budget,
        )?),
        (PayloadKind::UrPsbt, Payload::Psbt(bytes), _) => Box::new(FountainAdapter::new(
            &CryptoPsbt::new(bytes.clone()),
            policy.fountain_budget,
            fountain,
        )?),

        (_, Payload::Account(account), _) if account.xpub.is_empty() => {
            return Err(EncodeError::EmptyPayload)
        }
        (PayloadKind::Xpub, Payload::Account(account), _) => {
            Box::new(SingleShotEncoder::text(account.xpub_descriptor_string()))
        }
        (PayloadKind::XpubChunked, Payload::Account(account), _) => Box::new(LegacyChunker::new(
            &account.xpub_descriptor_string(),
            policy.chunk_budget,
        )?),
        (PayloadKind::UrAccount, Payload::Account(account), _) => Box::new(FountainAdapter::new(
            &account.to_crypto_account()?,
            policy.fountain_budget,
            fountain,
        )?),

        (PayloadKind::SeedQr, Payload::SeedPhrase(words), Some(wordlist)) => {
            Box::new(SeedNumericEncoder::new(words.as_slice(), &wordlist)?)
        }
        (PayloadKind::CompactSeedQr, Payload::SeedPhrase(words), Some(wordlist)) => {
            Box::new(SeedCompactEncoder::new(words.as_slice(), &wordlist)?)
        }

        (PayloadKind::Address, Payload::Address(address), _) => {
            let address = address.trim();
            if address.is_empty() {
                return Err(EncodeError::EmptyPayload);
            }
            Box::new(SingleShotEncoder::complete(Fragment::Text(address.to_string())))
        }

        _ => return Err(EncodeError::PayloadMismatch { kind }),
    };

    Ok(encoder)
}
