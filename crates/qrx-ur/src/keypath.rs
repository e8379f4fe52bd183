//! `crypto-keypath` (tag 304).

use ciborium::value::Value;

use crate::error::UrError;
use crate::{fingerprint_value, tagged, tags, uint};

/// One step of a BIP32 path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PathComponent {
    /// Child index without the hardened bit.
    pub index: u32,
    /// Whether the step is hardened.
    pub hardened: bool,
}

impl PathComponent {
    /// Create a path component.
    #[must_use]
    pub const fn new(index: u32, hardened: bool) -> Self {
        Self { index, hardened }
    }
}

/// Key origin: ordered components, source fingerprint, and depth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CryptoKeypath {
    /// Path components, root first.
    pub components: Vec<PathComponent>,
    /// Fingerprint of the key the path starts from.
    pub source_fingerprint: Option<[u8; 4]>,
    /// Number of derivation steps from the master key.
    pub depth: Option<u8>,
}

impl CryptoKeypath {
    /// Create a keypath.
    #[must_use]
    pub const fn new(
        components: Vec<PathComponent>,
        source_fingerprint: Option<[u8; 4]>,
        depth: Option<u8>,
    ) -> Self {
        Self {
            components,
            source_fingerprint,
            depth,
        }
    }

    /// Untagged map `{1: components, 2?: fingerprint, 3?: depth}`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let flat = self
            .components
            .iter()
            .flat_map(|c| [uint(c.index), Value::Bool(c.hardened)])
            .collect();

        let mut map = vec![(uint(1u8), Value::Array(flat))];
        if let Some(fp) = self.source_fingerprint {
            map.push((uint(2u8), fingerprint_value(fp)));
        }
        if let Some(depth) = self.depth {
            map.push((uint(3u8), uint(depth)));
        }
        Value::Map(map)
    }

    /// Tagged data item (`#6.304`).
    #[must_use]
    pub fn to_tagged_value(&self) -> Value {
        tagged(tags::CRYPTO_KEYPATH, self.to_value())
    }

    /// Depth from the component count, as carried in `crypto-keypath`.
    ///
    /// # Errors
    /// Returns `UrError::DepthOverflow` for paths longer than 255 steps.
    pub fn depth_of(components: &[PathComponent]) -> Result<u8, UrError> {
        u8::try_from(components.len()).map_err(|_| UrError::DepthOverflow(components.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::write_value;

    #[test]
    fn registry_example_vector() {
        // 44'/1'/1'/0/1 from fingerprint e9181cf3, depth omitted
        let path = CryptoKeypath::new(
            vec![
                PathComponent::new(44, true),
                PathComponent::new(1, true),
                PathComponent::new(1, true),
                PathComponent::new(0, false),
                PathComponent::new(1, false),
            ],
            Some([0xe9, 0x18, 0x1c, 0xf3]),
            None,
        );
        let bytes = write_value(&path.to_tagged_value()).unwrap();
        assert_eq!(
            hex::encode(bytes),
            "d90130a2018a182cf501f501f500f401f4021ae9181cf3"
        );
    }

    #[test]
    fn depth_is_emitted_when_present() {
        let path = CryptoKeypath::new(vec![PathComponent::new(84, true)], None, Some(1));
        let bytes = write_value(&path.to_value()).unwrap();
        assert_eq!(hex::encode(bytes), "a201821854f50301");
    }

    #[test]
    fn empty_path_has_empty_component_array() {
        let path = CryptoKeypath::new(vec![], Some([0, 0, 0, 1]), None);
        let bytes = write_value(&path.to_value()).unwrap();
        assert_eq!(hex::encode(bytes), "a201800201");
    }

    #[test]
    fn depth_overflow() {
        let long = vec![PathComponent::new(0, false); 256];
        assert!(matches!(
            CryptoKeypath::depth_of(&long),
            Err(UrError::DepthOverflow(256))
        ));
        assert_eq!(CryptoKeypath::depth_of(&long[..3]).unwrap(), 3);
    }
}
