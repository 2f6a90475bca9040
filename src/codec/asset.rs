//! Asset id to name resolution
//!
//! Source: counterpartycore/lib/util.py (`asset_name`)
//! Named assets are base-26 numbers over `A..Z` with `A = 0`. Ids from 26^12 + 1
//! upwards are numeric assets (`A12345…`) or subassets and have no alphabetic
//! form.

/// Marker returned for ids in the numeric/subasset range
pub const NUMERIC_OR_SUBASSET: &str = "numerical-or-subasset";

/// 26^12 + 1, the first id that is not an alphabetic asset name
pub const FIRST_NUMERIC_ASSET_ID: u64 = 95_428_956_661_682_177;

const B26_DIGITS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Resolve an asset id to its canonical name
///
/// # Examples
/// ```
/// use counterparty_decoder::codec::asset_name;
///
/// assert_eq!(asset_name(0), "BTC");
/// assert_eq!(asset_name(1), "XCP");
/// assert_eq!(asset_name(26), "BA");
/// ```
pub fn asset_name(id: u64) -> String {
    match id {
        0 => "BTC".to_string(),
        1 => "XCP".to_string(),
        id if id >= FIRST_NUMERIC_ASSET_ID => NUMERIC_OR_SUBASSET.to_string(),
        mut n => {
            let mut name = Vec::new();
            loop {
                name.push(B26_DIGITS[(n % 26) as usize]);
                n /= 26;
                if n == 0 {
                    break;
                }
            }
            name.reverse();
            // All bytes come from B26_DIGITS
            String::from_utf8_lossy(&name).into_owned()
        }
    }
}
