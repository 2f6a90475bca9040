use crate::decoder::decode_data;
use crate::errors::AppResult;
use crate::types::ISSUANCE_FORMAT_CHANGE_HEIGHT;
use clap::Args;
use serde_json::json;

#[derive(Args)]
pub struct DecodeDataCommand {
    /// Message body hex, without the CNTRPRTY prefix
    pub data_hex: String,

    /// Block height the message was confirmed at (selects issuance layout);
    /// current formats when omitted
    #[arg(long)]
    pub height: Option<u64>,
}

impl DecodeDataCommand {
    pub fn run(&self) -> AppResult<()> {
        let height = self.height.unwrap_or(u64::MAX);
        let decoded = decode_data(self.data_hex.trim(), height)?;
        let msg_type = decoded.message_type().name();

        let output = json!({
            "data_hex": self.data_hex.trim(),
            "id_hex": decoded.header.id_hex,
            "id": decoded.header.id,
            "msg_type": msg_type,
            "legacy_issuance_format": height < ISSUANCE_FORMAT_CHANGE_HEIGHT,
            "msg_decoded": decoded.message,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}
