// src/decode.rs

use encoding_rs::{mem, UTF_8, WINDOWS_1252};
use std::fmt;
use thiserror::Error;

/// Source encodings the published CSVs have been seen in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Utf8,
    Windows1252,
    Latin1,
}

impl Codec {
    pub fn name(&self) -> &'static str {
        match self {
            Codec::Utf8 => "utf-8",
            Codec::Windows1252 => "cp1252",
            Codec::Latin1 => "latin-1",
        }
    }

    fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            Codec::Utf8 => UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|s| s.into_owned()),
            Codec::Windows1252 => {
                // encoding_rs maps these to C1 controls; cp1252 leaves them undefined.
                if bytes.iter().any(|b| CP1252_UNDEFINED.contains(b)) {
                    return None;
                }
                WINDOWS_1252
                    .decode_without_bom_handling_and_without_replacement(bytes)
                    .map(|s| s.into_owned())
            }
            Codec::Latin1 => Some(mem::decode_latin1(bytes).into_owned()),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const CP1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// Tried in order; the `bool` marks entries that are allowed to fail.
/// The last entry must decode any input.
const CHAIN: &[(Codec, bool)] = &[
    (Codec::Utf8, true),
    (Codec::Windows1252, true),
    (Codec::Latin1, false),
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{codec} failed to decode {len} bytes; the fallback chain is broken")]
pub struct DecodeExhausted {
    pub codec: Codec,
    pub len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub codec: Codec,
}

/// Decode `bytes` with the first codec in the chain that accepts them.
pub fn decode(bytes: &[u8]) -> Result<Decoded, DecodeExhausted> {
    decode_with(CHAIN, bytes)
}

fn decode_with(chain: &[(Codec, bool)], bytes: &[u8]) -> Result<Decoded, DecodeExhausted> {
    for &(codec, may_fail) in chain {
        match codec.decode(bytes) {
            Some(text) => return Ok(Decoded { text, codec }),
            None if may_fail => continue,
            None => {
                return Err(DecodeExhausted {
                    codec,
                    len: bytes.len(),
                })
            }
        }
    }
    Err(DecodeExhausted {
        codec: Codec::Latin1,
        len: bytes.len(),
    })
}
