//! Multi-part QR encoding for an airgapped signing device.
//!
//! Turns one logical payload (a PSBT, an account xpub, a seed phrase, or an
//! address) into an ordered, cycling sequence of fragments. A display loop
//! outside this crate pulls fragments and renders each as a QR frame for a
//! companion wallet's camera.
//!
//! # Overview
//!
//! - [`QrEncoder`] picks exactly one [`PartEncoder`] per [`EncodingRequest`]
//! - [`LegacyChunker`] splits text into `p{i}of{n} ` parts
//! - [`FountainAdapter`] drives a BC-UR fountain encoder (`crypto-psbt`,
//!   `crypto-account`) and upper-cases its parts
//! - [`SeedNumericEncoder`] and [`SeedCompactEncoder`] produce SeedQR payloads
//! - [`SingleShotEncoder`] covers addresses and plain xpub strings
//!
//! # Pull contract
//!
//! Chunked and fountain encoders never run out: after the last part they
//! cycle, since the camera may miss frames. [`PartEncoder::is_complete`]
//! turns true once every part has been shown. Encoders are single-consumer.
//!
//! # Budgets
//!
//! | density | fountain bytes | legacy chars |
//! |---------|----------------|--------------|
//! | low     | 10             | 40           |
//! | medium  | 30             | 65           |
//! | high    | 120            | 90           |

#![forbid(unsafe_code)]

mod account;
mod chunker;
mod derivation;
mod error;
mod factory;
mod fountain;
mod part;
mod policy;
mod render;
mod request;
mod seed;
mod seedqr;
mod settings;
mod single;
mod storage;

pub use account::AccountExport;
pub use chunker::{split_header, LegacyChunker};
pub use derivation::{DerivationKeypath, PathComponent, ScriptType};
pub use error::{EncodeError, EncodeResult};
pub use factory::QrEncoder;
pub use fountain::{FountainAdapter, FountainBuilder, FountainEncoder, UrFountain};
pub use part::{Fragment, PartEncoder};
pub use policy::{Density, FragmentPolicy};
pub use render::{FragmentRenderer, RenderOptions, DEFAULT_BACKGROUND};
pub use request::{EncodingRequest, Payload, PayloadKind};
pub use seed::{language_from_code, Bip39Wordlists, Seed, SeedError, Wordlist, WordlistSource, WORDLIST_LEN};
pub use seedqr::{checksum_bits, compact_len, SeedCompactEncoder, SeedNumericEncoder, BITS_PER_WORD};
pub use settings::{EncoderSettings, Network, SettingsError, DEFAULT_WORDLIST_LANGUAGE};
pub use single::SingleShotEncoder;
pub use storage::{SeedStorage, DEFAULT_MNEMONIC_LEN};

/// Re-export of the UR registry types.
pub use qrx_ur as ur_registry;
