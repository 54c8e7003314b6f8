//! MIX header decryption using Blowfish.
//!
//! Encrypted archives carry 80 bytes of key material in their preamble. The
//! 56-byte Blowfish key is that material repeated cyclically, and the header
//! block and index table are decrypted block by block (8 bytes, no chaining).

use blowfish::Blowfish;
use cipher::generic_array::GenericArray;
use cipher::{BlockDecrypt, BlockEncrypt, KeyInit};

use crate::{Error, Result};

/// Length of the key material stored in the archive.
pub const KEY_SOURCE_LEN: usize = 80;

/// Length of the derived Blowfish key.
pub const KEY_LEN: usize = 56;

/// Blowfish block size.
pub const BLOCK_LEN: usize = 8;

/// Derive the Blowfish key from the archive's key material.
pub fn derive_key(source: &[u8; KEY_SOURCE_LEN]) -> [u8; KEY_LEN] {
    std::array::from_fn(|i| source[i % KEY_SOURCE_LEN])
}

/// Block cipher keyed for one archive.
pub struct MixCipher {
    inner: Blowfish,
}

impl MixCipher {
    /// Key a cipher from the archive's 80 bytes of key material.
    pub fn new(key_source: &[u8; KEY_SOURCE_LEN]) -> Result<Self> {
        let key = derive_key(key_source);
        let inner =
            Blowfish::new_from_slice(&key).map_err(|e| Error::Decryption(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Decrypt `data` in place, one 8-byte block at a time.
    ///
    /// A trailing partial block is left untouched.
    pub fn decrypt_in_place(&self, data: &mut [u8]) {
        for block in data.chunks_exact_mut(BLOCK_LEN) {
            self.inner.decrypt_block(GenericArray::from_mut_slice(block));
        }
    }

    /// Encrypt `data` in place, the inverse of [`decrypt_in_place`](Self::decrypt_in_place).
    pub fn encrypt_in_place(&self, data: &mut [u8]) {
        for block in data.chunks_exact_mut(BLOCK_LEN) {
            self.inner.encrypt_block(GenericArray::from_mut_slice(block));
        }
    }
}

impl std::fmt::Debug for MixCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MixCipher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_source() -> [u8; KEY_SOURCE_LEN] {
        std::array::from_fn(|i| (i as u8).wrapping_mul(37).wrapping_add(11))
    }

    #[test]
    fn test_derive_key_takes_prefix() {
        let source = key_source();
        let key = derive_key(&source);
        assert_eq!(&key[..], &source[..KEY_LEN]);
    }

    #[test]
    fn test_round_trip() {
        let cipher = MixCipher::new(&key_source()).unwrap();
        let plain: Vec<u8> = (0u8..24).collect();

        let mut data = plain.clone();
        cipher.encrypt_in_place(&mut data);
        assert_ne!(data, plain);

        cipher.decrypt_in_place(&mut data);
        assert_eq!(data, plain);
    }

    #[test]
    fn test_decryption_is_deterministic() {
        let mut a = [0x5Au8; 16];
        let mut b = [0x5Au8; 16];
        MixCipher::new(&key_source()).unwrap().decrypt_in_place(&mut a);
        MixCipher::new(&key_source()).unwrap().decrypt_in_place(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_trailing_partial_block_untouched() {
        let cipher = MixCipher::new(&key_source()).unwrap();
        let mut data = [7u8; 11];
        cipher.decrypt_in_place(&mut data);
        assert_eq!(&data[8..], &[7, 7, 7]);
    }

    #[test]
    fn test_known_vector() {
        // Blowfish reference vector (Eric Young): all-zero key and block.
        // A zeroed key source derives the all-zero 56-byte key, which Blowfish
        // treats the same as the 8-byte zero key because the key schedule cycles.
        let cipher = MixCipher::new(&[0u8; KEY_SOURCE_LEN]).unwrap();
        let mut block = [0u8; 8];
        cipher.encrypt_in_place(&mut block);
        assert_eq!(block, [0x4E, 0xF9, 0x97, 0x45, 0x61, 0x98, 0xDD, 0x78]);
    }
}
