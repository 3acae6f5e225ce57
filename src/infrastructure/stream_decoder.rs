//! Stream payload deobfuscation
//!
//! The player endpoint returns stream URLs as a base64 listing with decoy
//! tokens spliced in. Decoding strips the marker and separators, removes the
//! decoys, decodes, then reads `[quality]url or url,[quality]url` entries.

use crate::domain::{StreamDescriptor, SubtitleDescriptor};
use crate::infrastructure::parsing_error::StreamDecodeError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lazy_static::lazy_static;
use regex::Regex;

const PAYLOAD_MARKER: &str = "#h";
const SEPARATOR: &str = "//_//";
const TRASH_ALPHABET: [char; 5] = ['@', '#', '!', '^', '$'];
const URL_ALTERNATIVE_DELIMITER: &str = " or ";

lazy_static! {
    static ref TRASH_CODES: Vec<String> = generate_trash_codes();
    static ref STREAM_ENTRY: Regex =
        Regex::new(r"\[([^\]]+)\]([^,]+)").expect("stream entry pattern is valid");
    static ref SUBTITLE_ENTRY: Regex =
        Regex::new(r"\[([^\]]+)\](https?://[^\s,]+)").expect("subtitle entry pattern is valid");
}

/// Base64 encodings of every 2- and 3-symbol word over the decoy alphabet
pub fn generate_trash_codes() -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    let mut current: Vec<String> = vec![String::new()];

    for length in 1..=3 {
        current = current
            .iter()
            .flat_map(|prefix| {
                TRASH_ALPHABET.iter().map(move |symbol| {
                    let mut word = prefix.clone();
                    word.push(*symbol);
                    word
                })
            })
            .collect();
        if length >= 2 {
            words.extend(current.iter().cloned());
        }
    }

    words.iter().map(|word| STANDARD.encode(word)).collect()
}

/// Remove the marker, separators and decoy tokens, leaving clean base64
pub fn strip_obfuscation(payload: &str) -> String {
    let mut cleaned = payload.replacen(PAYLOAD_MARKER, "", 1).replace(SEPARATOR, "");
    for code in TRASH_CODES.iter() {
        if cleaned.contains(code.as_str()) {
            cleaned = cleaned.replace(code.as_str(), "");
        }
    }
    cleaned
}

/// Recover the plain stream listing from an obfuscated payload
pub fn decode_listing(payload: &str) -> Result<String, StreamDecodeError> {
    let cleaned = strip_obfuscation(payload);
    let bytes = STANDARD.decode(cleaned.as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}

/// Split an already deobfuscated listing into stream descriptors
///
/// Each `[quality]` entry may carry several alternatives separated by
/// `" or "`; only candidates containing `//` are kept.
pub fn parse_stream_listing(listing: &str) -> Vec<StreamDescriptor> {
    STREAM_ENTRY
        .captures_iter(listing)
        .flat_map(|captures| {
            let quality = captures[1].to_string();
            let urls = captures[2].to_string();
            urls.split(URL_ALTERNATIVE_DELIMITER)
                .filter(|candidate| candidate.contains("//"))
                .map(|candidate| StreamDescriptor {
                    quality: quality.clone(),
                    url: candidate.trim().to_string(),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Deobfuscate a player payload into ordered stream descriptors
pub fn decode_streams(payload: &str) -> Result<Vec<StreamDescriptor>, StreamDecodeError> {
    let listing = decode_listing(payload)?;
    Ok(parse_stream_listing(&listing))
}

/// Subtitle descriptors from the plain `[language]url,...` payload
pub fn parse_subtitles(payload: &str) -> Vec<SubtitleDescriptor> {
    SUBTITLE_ENTRY
        .captures_iter(payload)
        .map(|captures| SubtitleDescriptor {
            language: captures[1].to_string(),
            url: captures[2].to_string(),
        })
        .collect()
}
