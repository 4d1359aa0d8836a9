use std::{fmt, str::FromStr};

use sha2::{Digest, Sha256};


/// Length of a signing key in bytes (a secp256k1 private key).
pub const SIGNING_KEY_LENGTH: usize = 32;


/// Returned when a string is not a well-formed signing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedSigningKey;


/// A validated signing credential: 32 bytes, written as 64 hexadecimal
/// characters with an optional `0x` prefix.
///
/// `Debug` and `Display` only show a short fingerprint,
/// use [`SigningKey::expose_hex`] to get the full key.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SigningKey {
    bytes: [u8; SIGNING_KEY_LENGTH],
}

impl SigningKey {
    pub fn as_bytes(&self) -> &[u8; SIGNING_KEY_LENGTH] {
        &self.bytes
    }

    /// The full key as `0x`-prefixed lowercase hex.
    pub fn expose_hex(&self) -> String {
        format!("0x{}", hex::encode(self.bytes))
    }

    /// First four bytes of the key's SHA-256 digest. Tells keys apart in logs
    /// without revealing any of the key itself.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.bytes);
        format!("sha256:{}", hex::encode(&digest[..4]))
    }
}

impl FromStr for SigningKey {
    type Err = MalformedSigningKey;

    fn from_str(credential: &str) -> Result<Self, Self::Err> {
        let digits = credential
            .strip_prefix("0x")
            .or_else(|| credential.strip_prefix("0X"))
            .unwrap_or(credential);

        if digits.len() != SIGNING_KEY_LENGTH * 2 {
            return Err(MalformedSigningKey);
        }

        let mut bytes = [0u8; SIGNING_KEY_LENGTH];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| MalformedSigningKey)?;

        Ok(SigningKey { bytes })
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningKey")
            .field(&self.fingerprint())
            .finish()
    }
}

impl fmt::Display for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fingerprint())
    }
}



#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "b6a567187c05c73c66ebf0540d2757761618f931f0f4f721285ebdf10fa17c98";

    #[test]
    fn accepts_prefixed_and_bare_keys() {
        let prefixed: SigningKey = format!("0x{KEY}").parse().unwrap();
        let bare: SigningKey = KEY.parse().unwrap();
        let upper: SigningKey = KEY.to_uppercase().parse().unwrap();

        assert_eq!(prefixed, bare);
        assert_eq!(prefixed, upper);
        assert_eq!(prefixed.expose_hex(), format!("0x{KEY}"));
    }

    #[test]
    fn rejects_wrong_length_or_non_hex() {
        assert_eq!("0xb6a567187c".parse::<SigningKey>(), Err(MalformedSigningKey));
        assert_eq!(
            format!("0x{KEY}00").parse::<SigningKey>(),
            Err(MalformedSigningKey)
        );
        assert_eq!(
            format!("0x{}zz", &KEY[..62]).parse::<SigningKey>(),
            Err(MalformedSigningKey)
        );
        assert_eq!("".parse::<SigningKey>(), Err(MalformedSigningKey));
    }

    #[test]
    fn debug_output_is_redacted() {
        let key: SigningKey = KEY.parse().unwrap();
        let debug = format!("{key:?}");

        assert!(!debug.contains(KEY));
        assert_eq!(debug, format!("SigningKey({:?})", key.fingerprint()));
        assert_eq!(key.to_string(), key.fingerprint());
    }

    #[test]
    fn fingerprint_is_digest_derived() {
        let key: SigningKey = KEY.parse().unwrap();
        let other: SigningKey = format!("{}00", &KEY[..62]).parse().unwrap();

        let fingerprint = key.fingerprint();
        let digest_hex = fingerprint.strip_prefix("sha256:").unwrap();
        assert_eq!(digest_hex.len(), 8);
        assert!(!KEY.contains(digest_hex));

        assert_ne!(fingerprint, other.fingerprint());
        assert_eq!(fingerprint, KEY.parse::<SigningKey>().unwrap().fingerprint());
    }
}
