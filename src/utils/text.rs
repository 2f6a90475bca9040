//! Text helpers for message fields

/// Decode a text field
///
/// Counterparty stores descriptions, memos and broadcast text as UTF-8.
/// Invalid sequences are replaced rather than failing the whole message.
pub fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Render bytes as printable ASCII, replacing anything else with `?`
///
/// # Examples
/// ```
/// use counterparty_decoder::utils::text::printable_ascii;
/// assert_eq!(printable_ascii(b"CNTRPRTY\x00\x1e"), "CNTRPRTY??");
/// ```
pub fn printable_ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if (32..=126).contains(&b) { b as char } else { '?' })
        .collect()
}
