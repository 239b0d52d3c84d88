//! Account addresses
//!
//! An account is a 64-bit numeric id. Its human-readable form is the
//! Reed-Solomon ("RS") encoding used by Burst: 13 base-32 data symbols plus
//! 4 parity symbols over GF(32), written as `BURST-XXXX-XXXX-XXXX-XXXXX`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const ALPHABET: &[u8; 32] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZ";
const PREFIX: &str = "BURST";
const ACCEPTED_PREFIXES: [&str; 2] = ["BURST-", "S-"];

const DATA_LENGTH: usize = 13;
const CODEWORD_LENGTH: usize = 17;

const GEXP: [u8; 32] = [
    1, 2, 4, 8, 16, 5, 10, 20, 13, 26, 17, 7, 14, 28, 29, 31, 27, 19, 3, 6, 12, 24, 21, 15, 30,
    25, 23, 11, 22, 9, 18, 1,
];
const GLOG: [u8; 32] = [
    0, 0, 1, 18, 2, 5, 19, 11, 3, 29, 6, 27, 20, 8, 12, 23, 4, 10, 30, 17, 7, 22, 28, 26, 21, 25,
    9, 16, 13, 14, 24, 15,
];
/// Position of each written symbol inside the codeword
const CODEWORD_MAP: [usize; CODEWORD_LENGTH] = [3, 2, 1, 0, 7, 6, 5, 4, 13, 14, 15, 16, 12, 8, 9, 10, 11];

/// Address parsing failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("address is empty")]
    Empty,

    #[error("too many symbols in RS address")]
    TooLong,

    #[error("RS address has invalid length or parity")]
    InvalidCodeword,

    #[error("RS address value exceeds 64 bits")]
    Overflow,
}

/// A pool or miner account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(u64);

impl Address {
    pub const fn from_id(id: u64) -> Self {
        Self(id)
    }

    /// Unsigned decimal form
    pub fn id_string(&self) -> String {
        self.0.to_string()
    }

    /// RS form without prefix, e.g. `K37B-9V85-FB95-793HN`
    pub fn rs(&self) -> String {
        let mut codeword = [0u8; CODEWORD_LENGTH];
        for (i, symbol) in codeword.iter_mut().take(DATA_LENGTH).enumerate() {
            *symbol = ((self.0 >> (5 * i)) & 31) as u8;
        }

        let mut parity = [0u8; 4];
        for i in (0..DATA_LENGTH).rev() {
            let feedback = codeword[i] ^ parity[3];
            parity[3] = parity[2] ^ gmult(30, feedback);
            parity[2] = parity[1] ^ gmult(6, feedback);
            parity[1] = parity[0] ^ gmult(9, feedback);
            parity[0] = gmult(17, feedback);
        }
        codeword[DATA_LENGTH..].copy_from_slice(&parity);

        let mut out = String::with_capacity(CODEWORD_LENGTH + 3);
        for (i, &position) in CODEWORD_MAP.iter().enumerate() {
            out.push(ALPHABET[codeword[position] as usize] as char);
            if i & 3 == 3 && i < DATA_LENGTH {
                out.push('-');
            }
        }
        out
    }

    /// RS form with the chain prefix, e.g. `BURST-K37B-9V85-FB95-793HN`
    pub fn full_address(&self) -> String {
        format!("{}-{}", PREFIX, self.rs())
    }

    /// Parse an RS address, with or without prefix
    pub fn from_rs(input: &str) -> Result<Self, AddressError> {
        let upper = input.trim().to_ascii_uppercase();
        let body = ACCEPTED_PREFIXES
            .iter()
            .find_map(|prefix| upper.strip_prefix(prefix))
            .unwrap_or(&upper);

        let mut codeword = [0u8; CODEWORD_LENGTH];
        let mut length = 0;
        for c in body.bytes() {
            let Some(symbol) = ALPHABET.iter().position(|&a| a == c) else {
                continue;
            };
            if length >= CODEWORD_LENGTH {
                return Err(AddressError::TooLong);
            }
            codeword[CODEWORD_MAP[length]] = symbol as u8;
            length += 1;
        }

        if length != CODEWORD_LENGTH || !is_codeword_valid(&codeword) {
            return Err(AddressError::InvalidCodeword);
        }

        let value = codeword[..DATA_LENGTH]
            .iter()
            .rev()
            .fold(0u128, |acc, &symbol| (acc << 5) | symbol as u128);
        u64::try_from(value)
            .map(Self)
            .map_err(|_| AddressError::Overflow)
    }

    /// Accept either the numeric id or the RS form
    pub fn from_either(input: &str) -> Result<Self, AddressError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AddressError::Empty);
        }
        match trimmed.parse::<u64>() {
            Ok(id) => Ok(Self(id)),
            Err(_) => Self::from_rs(trimmed),
        }
    }

    /// Account controlled by a passphrase: the first eight bytes of
    /// SHA-256 over the Curve25519 public key of SHA-256(passphrase).
    pub fn from_passphrase(passphrase: &str) -> Self {
        let private_key: [u8; 32] = Sha256::digest(passphrase.as_bytes()).into();
        let secret = x25519_dalek::StaticSecret::from(private_key);
        let public_key = x25519_dalek::PublicKey::from(&secret);

        let digest = Sha256::digest(public_key.as_bytes());
        let mut id = [0u8; 8];
        id.copy_from_slice(&digest[..8]);
        Self(u64::from_le_bytes(id))
    }
}

fn gmult(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let index = (GLOG[a as usize] as usize + GLOG[b as usize] as usize) % 31;
    GEXP[index]
}

fn is_codeword_valid(codeword: &[u8; CODEWORD_LENGTH]) -> bool {
    let mut sum = 0u8;
    for i in 1..5 {
        let mut t = 0u8;
        for j in 0..31usize {
            if j > 12 && j < 27 {
                continue;
            }
            let position = if j > 26 { j - 14 } else { j };
            t ^= gmult(codeword[position], GEXP[(i * j) % 31]);
        }
        sum |= t;
    }
    sum == 0
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_address())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_either(s)
    }
}

/// Serialized as the unsigned decimal id, which is what the pool core speaks
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.id_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(id) => Ok(Self(id)),
            Raw::Text(text) => Self::from_either(&text).map_err(serde::de::Error::custom),
        }
    }
}
