use crate::crypto::arc4::{self, CipherKey};
use crate::errors::{AppError, AppResult};
use crate::utils::text::printable_ascii;
use clap::Args;

/// Apply the RC4 keystream to a hex chunk
///
/// The operation is symmetric: it de-obfuscates data pulled from a
/// transaction, or obfuscates a payload for testing.
#[derive(Args)]
pub struct Arc4Command {
    /// Data to process, hex
    pub data_hex: String,

    /// Transaction id spent by the first input (the cipher key)
    #[arg(long)]
    pub key: String,

    /// Output format: text, hex
    #[arg(long, default_value = "text")]
    pub format: String,
}

impl Arc4Command {
    pub fn run(&self) -> AppResult<()> {
        let key = CipherKey::from_txid(self.key.trim())?;
        let data = hex::decode(self.data_hex.trim())
            .map_err(|e| AppError::InvalidData(format!("Invalid data hex: {}", e)))?;
        let output = arc4::apply(&key, &data);

        match self.format.as_str() {
            "hex" => println!("{}", hex::encode(&output)),
            _ => {
                println!("Input:  {}", hex::encode(&data));
                println!("Output: {}", hex::encode(&output));
                println!("ASCII:  {}", printable_ascii(&output));
            }
        }

        Ok(())
    }
}
