//! LayerZero v2 message options, type-3 encoding.
//!
//! ```text
//! 0x0003 | worker_id (u8) | size (u16) | option_type (u8) | params ...
//! ```
//!
//! `size` counts the option type byte plus its params.

use alloy::primitives::Bytes;

const TYPE_3: u16 = 3;
const EXECUTOR_WORKER_ID: u8 = 1;
const OPTION_TYPE_LZ_RECEIVE: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
struct WorkerOption {
    worker_id: u8,
    option_type: u8,
    params: Vec<u8>,
}

/// Builder for a type-3 options blob.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    options: Vec<WorkerOption>,
}

impl Options {
    /// Empty options (header only).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the executor to deliver with `gas` for `lzReceive` and airdrop
    /// `value` wei of native gas on the destination chain.
    #[must_use]
    pub fn add_executor_lz_receive_option(mut self, gas: u128, value: u128) -> Self {
        let mut params = gas.to_be_bytes().to_vec();
        if value != 0 {
            params.extend_from_slice(&value.to_be_bytes());
        }
        self.options.push(WorkerOption {
            worker_id: EXECUTOR_WORKER_ID,
            option_type: OPTION_TYPE_LZ_RECEIVE,
            params,
        });
        self
    }

    /// Encode as bytes.
    #[must_use]
    pub fn to_bytes(&self) -> Bytes {
        let mut out = TYPE_3.to_be_bytes().to_vec();
        for option in &self.options {
            let size = u16::try_from(option.params.len() + 1).unwrap_or(u16::MAX);
            out.push(option.worker_id);
            out.extend_from_slice(&size.to_be_bytes());
            out.push(option.option_type);
            out.extend_from_slice(&option.params);
        }
        Bytes::from(out)
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::bytes;

    use super::*;

    #[test]
    fn test_empty_options_are_header_only() {
        assert_eq!(Options::new().to_bytes(), bytes!("0003"));
    }

    #[test]
    fn test_lz_receive_gas_only() {
        let encoded = Options::new()
            .add_executor_lz_receive_option(1_000_000, 0)
            .to_bytes();
        assert_eq!(
            encoded,
            bytes!("0003" "01" "0011" "01" "000000000000000000000000000f4240")
        );
    }

    #[test]
    fn test_lz_receive_gas_and_value() {
        let encoded = Options::new()
            .add_executor_lz_receive_option(1_000_000, 10_000_000_000_000_000)
            .to_bytes();
        assert_eq!(
            encoded,
            bytes!(
                "0003" "01" "0021" "01"
                "000000000000000000000000000f4240"
                "0000000000000000002386f26fc10000"
            )
        );
    }
}
