use serde::Serialize;

// Core protocol constants (Source: counterpartycore/lib/config.py)
pub const COUNTERPARTY_PREFIX: &[u8] = b"CNTRPRTY"; // 8-byte protocol identifier

/// Block at which issuances switched from the callable layout to lock/reset
/// and subasset issuance (type 21) became available
pub const ISSUANCE_FORMAT_CHANGE_HEIGHT: u64 = 753_500;

/// Message types understood by the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MessageType {
    ClassicSend = 0,       // versions/send1.py - Basic asset transfer
    EnhancedSend = 2,      // versions/enhancedsend.py - Send with memo field
    Sweep = 4,             // sweep.py - Sweep all assets to a destination
    DexOrder = 10,         // order.py - DEX order
    Btcpay = 11,           // btcpay.py - BTC payment for a DEX order match
    Dispenser = 12,        // dispenser.py - Asset dispenser
    Issuance = 20,         // issuance.py - Asset creation/issuance
    IssuanceSubasset = 21, // issuance.py - Subasset issuance
    Broadcast = 30,        // broadcast.py - Oracle broadcast
    Dividend = 50,         // dividend.py - Dividend payment
}

impl MessageType {
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(Self::ClassicSend),
            2 => Some(Self::EnhancedSend),
            4 => Some(Self::Sweep),
            10 => Some(Self::DexOrder),
            11 => Some(Self::Btcpay),
            12 => Some(Self::Dispenser),
            20 => Some(Self::Issuance),
            21 => Some(Self::IssuanceSubasset),
            30 => Some(Self::Broadcast),
            50 => Some(Self::Dividend),
            _ => None,
        }
    }

    pub fn id(self) -> u32 {
        self as u32
    }

    /// Display name, as shown by Counterparty block explorers
    pub fn name(self) -> &'static str {
        match self {
            Self::ClassicSend => "Classic Send",
            Self::EnhancedSend => "Enhanced Send",
            Self::Sweep => "Sweep",
            Self::DexOrder => "DEX Order",
            Self::Btcpay => "Btcpay",
            Self::Dispenser => "Dispenser",
            Self::Issuance => "Issuance",
            Self::IssuanceSubasset => "Issuance (Subasset)",
            Self::Broadcast => "Broadcast",
            Self::Dividend => "Dividend",
        }
    }
}

/// Output encoding that carried the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Encoding {
    /// RC4-obfuscated null-data output
    #[serde(rename = "op_return")]
    OpReturn,
    /// Plaintext 1-of-2 multisig (71-byte script)
    #[serde(rename = "multisig (old type, not rc4 encoded)")]
    LegacyMultisig,
    /// RC4-obfuscated 1-of-3 multisig (105-byte script)
    #[serde(rename = "multisig")]
    Multisig,
}

impl Encoding {
    pub fn is_obfuscated(self) -> bool {
        !matches!(self, Self::LegacyMultisig)
    }
}

/// A decoded Counterparty message
///
/// Field names follow the JSON shape served by the decoder API (`q` for
/// quantities, `*_hex` for raw blobs).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CounterpartyMessage {
    ClassicSend {
        /// Destination implied by a pay-to-pubkey-hash output 0
        recipient: Option<String>,
        asset: u64,
        asset_name: String,
        #[serde(rename = "q")]
        quantity: u64,
    },

    EnhancedSend {
        recipient: String,
        recipient_hex: String,
        asset: u64,
        asset_name: String,
        #[serde(rename = "q")]
        quantity: u64,
        memo: String,
        memo_hex: String,
    },

    Sweep {
        recipient: String,
        recipient_hex: String,
        flag: u8,
        memo: String,
        memo_hex: String,
    },

    DexOrder {
        give_asset: u64,
        give_asset_name: String,
        #[serde(rename = "give_q")]
        give_quantity: u64,
        get_asset: u64,
        get_asset_name: String,
        #[serde(rename = "get_q")]
        get_quantity: u64,
        #[serde(rename = "exp")]
        expiration: u16,
    },

    Btcpay {
        order_0: String,
        order_1: String,
        /// Payee implied by a pay-to-pubkey-hash output 0
        recipient: Option<String>,
    },

    Dispenser {
        asset: u64,
        asset_name: String,
        #[serde(rename = "give_q")]
        give_quantity: u64,
        #[serde(rename = "esc_q")]
        escrow_quantity: u64,
        #[serde(rename = "btc_q_sat")]
        mainchain_rate: u64,
        #[serde(rename = "btc_q_btc")]
        mainchain_rate_btc: String,
        status: u8,
        #[serde(rename = "disp_addr_hex")]
        dispense_address_hex: String,
        #[serde(rename = "disp_addr")]
        dispense_address: Option<String>,
    },

    /// Issuance before `ISSUANCE_FORMAT_CHANGE_HEIGHT`
    LegacyIssuance {
        transfer_to: Option<String>,
        asset: u64,
        asset_name: String,
        #[serde(rename = "q")]
        quantity: u64,
        divisible: bool,
        callable: bool,
        call_date: u32,
        /// Raw big-endian bits of the on-chain f32 call price
        call_price: u32,
        #[serde(rename = "len")]
        description_length: u8,
        #[serde(rename = "descr")]
        description: String,
    },

    Issuance {
        transfer_to: Option<String>,
        asset: u64,
        asset_name: String,
        #[serde(rename = "q")]
        quantity: u64,
        divisible: bool,
        lock: bool,
        reset: bool,
        #[serde(rename = "descr")]
        description: String,
    },

    IssuanceSubasset {
        transfer_to: Option<String>,
        asset: u64,
        asset_name: String,
        #[serde(rename = "q")]
        quantity: u64,
        divisible: bool,
        lock: bool,
        reset: bool,
        #[serde(rename = "len_subasset")]
        subasset_length: u8,
        #[serde(rename = "subasset")]
        subasset_longname: String,
        #[serde(rename = "descr")]
        description: String,
    },

    Broadcast {
        #[serde(rename = "ts")]
        timestamp: u32,
        #[serde(rename = "ts_print")]
        timestamp_iso: String,
        /// Raw big-endian bits of the on-chain f64 value
        value: u64,
        #[serde(rename = "fee")]
        fee_fraction: u32,
        /// Leading length byte, when the text carries one
        #[serde(rename = "len")]
        text_length: Option<u8>,
        text: String,
    },

    Dividend {
        #[serde(rename = "div_q")]
        quantity_per_unit: u64,
        asset: u64,
        asset_name: String,
        #[serde(rename = "asset2")]
        dividend_asset: u64,
        #[serde(rename = "asset2_name")]
        dividend_asset_name: String,
    },
}

impl CounterpartyMessage {
    pub fn message_type(&self) -> MessageType {
        match self {
            Self::ClassicSend { .. } => MessageType::ClassicSend,
            Self::EnhancedSend { .. } => MessageType::EnhancedSend,
            Self::Sweep { .. } => MessageType::Sweep,
            Self::DexOrder { .. } => MessageType::DexOrder,
            Self::Btcpay { .. } => MessageType::Btcpay,
            Self::Dispenser { .. } => MessageType::Dispenser,
            Self::LegacyIssuance { .. } | Self::Issuance { .. } => MessageType::Issuance,
            Self::IssuanceSubasset { .. } => MessageType::IssuanceSubasset,
            Self::Broadcast { .. } => MessageType::Broadcast,
            Self::Dividend { .. } => MessageType::Dividend,
        }
    }

    /// Order match id (`tx0hash_tx1hash`) paid by a Btcpay
    pub fn order_match_id(&self) -> Option<String> {
        match self {
            Self::Btcpay {
                order_0, order_1, ..
            } => Some(format!("{}_{}", order_0, order_1)),
            _ => None,
        }
    }

    /// Broadcast value interpreted as the IEEE-754 double it encodes
    pub fn broadcast_value(&self) -> Option<f64> {
        match self {
            Self::Broadcast { value, .. } => Some(f64::from_bits(*value)),
            _ => None,
        }
    }

    /// Legacy call price interpreted as the IEEE-754 float it encodes
    pub fn call_price(&self) -> Option<f32> {
        match self {
            Self::LegacyIssuance { call_price, .. } => Some(f32::from_bits(*call_price)),
            _ => None,
        }
    }
}
