//! Envelope - Signed containers for payloads and filters
//!
//! An envelope pairs serialized bytes with the signer's public key and a
//! signature over `sha256(bytes)`. The scheme tag pins the signature format:
//!
//! | Scheme | Format |
//! |--------|--------|
//! | `1` | secp256k1 ECDSA, RFC 6979 nonce, 64-byte compact `r‖s`, recovery id dropped |
//!
//! Any other scheme value is rejected on verification. Both S forms of a
//! signature verify; signing always emits low-S.
//!
//! # Example
//!
//! ```ignore
//! let signer = EnvelopeSigner::new();
//! let message = signer.sign_payload(&Payload::now().with_entry(Entry::text("gm")), &key);
//! assert!(signer.is_valid(&message));
//! ```

use bitcoin::secp256k1::{self, ecdsa, All, Secp256k1};
use bitcoin::PrivateKey;
use sha2::{Digest, Sha256};

use crate::error::EnvelopeError;
use crate::wire::{self, Entry, Filter, FilterApplication, Message, Payload};

/// Signature schemes an envelope can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum SignatureScheme {
    /// ECDSA over secp256k1, compact 64-byte signature without recovery id.
    EcdsaCompact = 1,
}

impl TryFrom<i32> for SignatureScheme {
    type Error = EnvelopeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SignatureScheme::EcdsaCompact),
            other => Err(EnvelopeError::UnsupportedScheme(other)),
        }
    }
}

impl From<SignatureScheme> for i32 {
    fn from(scheme: SignatureScheme) -> Self {
        scheme as i32
    }
}

/// Common shape of [`Message`] and [`FilterApplication`].
pub trait Envelope: prost::Message + Default {
    fn pub_key(&self) -> &[u8];
    fn signature(&self) -> &[u8];
    fn scheme(&self) -> i32;
    fn serialized_payload(&self) -> &[u8];
    fn from_parts(pub_key: Vec<u8>, signature: Vec<u8>, scheme: i32, serialized_payload: Vec<u8>) -> Self;
}

macro_rules! impl_envelope {
    ($($ty:ty),+) => {$(
        impl Envelope for $ty {
            fn pub_key(&self) -> &[u8] { &self.pub_key }
            fn signature(&self) -> &[u8] { &self.signature }
            fn scheme(&self) -> i32 { self.scheme }
            fn serialized_payload(&self) -> &[u8] { &self.serialized_payload }
            fn from_parts(pub_key: Vec<u8>, signature: Vec<u8>, scheme: i32, serialized_payload: Vec<u8>) -> Self {
                Self { pub_key, signature, scheme, serialized_payload }
            }
        }
    )+};
}

impl_envelope!(Message, FilterApplication);

fn digest(bytes: &[u8]) -> secp256k1::Message {
    let hash: [u8; 32] = Sha256::digest(bytes).into();
    secp256k1::Message::from_digest(hash)
}

/// Signs and verifies envelopes. Holds the secp256k1 context, so build one and reuse it.
pub struct EnvelopeSigner {
    secp: Secp256k1<All>,
}

impl Default for EnvelopeSigner {
    fn default() -> Self { Self::new() }
}

impl EnvelopeSigner {
    pub fn new() -> Self {
        Self { secp: Secp256k1::new() }
    }

    /// Serialize `payload` and wrap it in a signed [`Message`].
    pub fn sign_payload(&self, payload: &Payload, key: &PrivateKey) -> Message {
        self.seal(wire::encode(payload), key)
    }

    /// Serialize `filter` and wrap it in a signed [`FilterApplication`].
    pub fn sign_filter(&self, filter: &Filter, key: &PrivateKey) -> FilterApplication {
        self.seal(wire::encode(filter), key)
    }

    pub fn sign_price_filter(
        &self,
        is_public: bool,
        acceptance_price: u64,
        notification_price: u64,
        key: &PrivateKey,
    ) -> FilterApplication {
        self.sign_filter(&Filter::price(is_public, acceptance_price, notification_price), key)
    }

    /// Single `text-utf8` entry stamped with the current time.
    pub fn text_message(&self, text: &str, key: &PrivateKey) -> Message {
        self.sign_payload(&Payload::now().with_entry(Entry::text(text)), key)
    }

    fn seal<E: Envelope>(&self, serialized: Vec<u8>, key: &PrivateKey) -> E {
        let (_recovery_id, signature) = self
            .secp
            .sign_ecdsa_recoverable(&digest(&serialized), &key.inner)
            .serialize_compact();
        let pub_key = key.public_key(&self.secp).to_bytes();
        E::from_parts(pub_key, signature.to_vec(), SignatureScheme::EcdsaCompact.into(), serialized)
    }

    /// Check the envelope's signature under its declared scheme.
    pub fn verify<E: Envelope>(&self, envelope: &E) -> Result<(), EnvelopeError> {
        match SignatureScheme::try_from(envelope.scheme())? {
            SignatureScheme::EcdsaCompact => {
                let pub_key = secp256k1::PublicKey::from_slice(envelope.pub_key())
                    .map_err(|_| EnvelopeError::InvalidPublicKey)?;
                let mut signature = ecdsa::Signature::from_compact(envelope.signature())
                    .map_err(|_| EnvelopeError::InvalidSignature)?;
                // libsecp256k1 only verifies low-S; other signers may emit either form.
                signature.normalize_s();
                self.secp
                    .verify_ecdsa(&digest(envelope.serialized_payload()), &signature, &pub_key)
                    .map_err(|_| EnvelopeError::InvalidSignature)
            }
        }
    }

    pub fn is_valid<E: Envelope>(&self, envelope: &E) -> bool {
        self.verify(envelope).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::secp256k1::SecretKey;
    use bitcoin::Network;

    fn test_key() -> PrivateKey {
        let sk = SecretKey::from_slice(&[0x11; 32]).expect("valid key");
        PrivateKey::new(sk, Network::Bitcoin)
    }

    fn hello() -> Payload {
        Payload::new(1_700_000_000).with_entry(Entry::text("hello"))
    }

    #[test]
    fn test_sign_payload_verifies() {
        let signer = EnvelopeSigner::new();
        let message = signer.sign_payload(&hello(), &test_key());
        assert_eq!(message.scheme, 1);
        assert_eq!(message.pub_key.len(), 33);
        assert_eq!(message.signature.len(), 64);
        assert_eq!(message.serialized_payload, wire::encode(&hello()));
        signer.verify(&message).expect("valid signature");
    }

    #[test]
    fn test_signing_is_deterministic() {
        let signer = EnvelopeSigner::new();
        let a = signer.sign_payload(&hello(), &test_key());
        let b = EnvelopeSigner::new().sign_payload(&hello(), &test_key());
        assert_eq!(a, b);
        assert_eq!(wire::encode(&a), wire::encode(&b));
    }

    #[test]
    fn test_uncompressed_key_verifies() {
        let sk = SecretKey::from_slice(&[0x22; 32]).expect("valid key");
        let key = PrivateKey::new_uncompressed(sk, Network::Bitcoin);
        let signer = EnvelopeSigner::new();
        let message = signer.sign_payload(&hello(), &key);
        assert_eq!(message.pub_key.len(), 65);
        assert!(signer.is_valid(&message));
    }

    #[test]
    fn test_sign_price_filter_verifies() {
        let signer = EnvelopeSigner::new();
        let app = signer.sign_price_filter(true, 1000, 250, &test_key());
        assert!(signer.is_valid(&app));
        let filter = app.filter().expect("decode filter");
        assert_eq!(filter, Filter::price(true, 1000, 250));
    }

    #[test]
    fn test_unknown_scheme_rejected() {
        let signer = EnvelopeSigner::new();
        for scheme in [0, 2, -1] {
            let mut message = signer.sign_payload(&hello(), &test_key());
            message.scheme = scheme;
            assert!(matches!(signer.verify(&message), Err(EnvelopeError::UnsupportedScheme(s)) if s == scheme));
        }
    }

    #[test]
    fn test_wrong_key_rejected() {
        let signer = EnvelopeSigner::new();
        let mut message = signer.sign_payload(&hello(), &test_key());
        let other = PrivateKey::new(SecretKey::from_slice(&[0x33; 32]).expect("valid key"), Network::Bitcoin);
        message.pub_key = other.public_key(&Secp256k1::new()).to_bytes();
        assert!(matches!(signer.verify(&message), Err(EnvelopeError::InvalidSignature)));
    }

    #[test]
    fn test_short_signature_rejected() {
        let signer = EnvelopeSigner::new();
        let mut message = signer.sign_payload(&hello(), &test_key());
        message.signature.truncate(63);
        assert!(matches!(signer.verify(&message), Err(EnvelopeError::InvalidSignature)));
    }

    #[test]
    fn test_garbage_pubkey_rejected() {
        let signer = EnvelopeSigner::new();
        let mut message = signer.sign_payload(&hello(), &test_key());
        message.pub_key = vec![0x05; 33];
        assert!(matches!(signer.verify(&message), Err(EnvelopeError::InvalidPublicKey)));
    }

    #[test]
    fn test_text_message() {
        let signer = EnvelopeSigner::new();
        let message = signer.text_message("gm", &test_key());
        assert!(signer.is_valid(&message));
        let payload = message.payload().expect("payload");
        assert_eq!(payload.entries.len(), 1);
        assert_eq!(payload.entries[0].as_text(), Some("gm"));
    }

    #[test]
    fn test_scheme_conversion() {
        assert_eq!(i32::from(SignatureScheme::EcdsaCompact), 1);
        assert_eq!(SignatureScheme::try_from(1).expect("scheme"), SignatureScheme::EcdsaCompact);
    }
}
