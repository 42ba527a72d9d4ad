//! Signing capability handed out by an authenticated session.

use ballot_types::{Address, TxHash};
use ballot_utils::parse_quantity;
use serde::Deserialize;

use crate::error::ProviderError;
use crate::rpc::RpcClient;

/// Capability to call contracts and send transactions as the connected account.
///
/// The wallet behind the endpoint owns the keys; this handle only names the
/// sending account and forwards requests for the wallet to sign.
#[derive(Clone)]
pub struct Signer {
    client: RpcClient,
    from: Address,
}

/// Outcome of a mined transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub tx_hash: TxHash,
    pub block_number: u64,
    /// False when the transaction was included but reverted.
    pub success: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    transaction_hash: TxHash,
    block_number: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl Signer {
    pub fn new(client: RpcClient, from: Address) -> Self {
        Self { client, from }
    }

    /// The account transactions are sent from.
    pub fn address(&self) -> &Address {
        &self.from
    }

    /// Execute a read-only call against `to` at the latest block, returning the raw return data.
    pub async fn call(&self, to: &Address, data: &[u8]) -> Result<Vec<u8>, ProviderError> {
        let params = serde_json::json!([
            {
                "from": self.from.as_str(),
                "to": to.as_str(),
                "data": format!("0x{}", hex::encode(data)),
            },
            "latest",
        ]);
        let result: String = self.client.request("eth_call", params).await?;
        decode_data(&result)
    }

    /// Ask the wallet to sign and broadcast a transaction to `to` with `data`.
    pub async fn send_transaction(&self, to: &Address, data: &[u8]) -> Result<TxHash, ProviderError> {
        let params = serde_json::json!([{
            "from": self.from.as_str(),
            "to": to.as_str(),
            "data": format!("0x{}", hex::encode(data)),
        }]);
        let hash: TxHash = self.client.request("eth_sendTransaction", params).await?;
        tracing::info!(tx = %hash, to = %to, "transaction submitted");
        Ok(hash)
    }

    /// Fetch the receipt of a transaction; `None` until it is mined.
    pub async fn transaction_receipt(
        &self,
        hash: &TxHash,
    ) -> Result<Option<TransactionReceipt>, ProviderError> {
        let raw: Option<RawReceipt> = self
            .client
            .request("eth_getTransactionReceipt", serde_json::json!([hash.to_string()]))
            .await?;

        let Some(raw) = raw else {
            return Ok(None);
        };
        // Some nodes return a receipt stub for pending transactions.
        let Some(block_number) = raw.block_number else {
            return Ok(None);
        };

        let block_number = parse_quantity(&block_number)
            .map_err(|e| ProviderError::InvalidResponse(format!("receipt block number: {e}")))?;
        let success = match raw.status.as_deref() {
            Some(status) => {
                parse_quantity(status)
                    .map_err(|e| ProviderError::InvalidResponse(format!("receipt status: {e}")))?
                    == 1
            }
            // Pre-Byzantium receipts carry no status.
            None => true,
        };

        Ok(Some(TransactionReceipt {
            tx_hash: raw.transaction_hash,
            block_number,
            success,
        }))
    }
}

fn decode_data(s: &str) -> Result<Vec<u8>, ProviderError> {
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| ProviderError::InvalidResponse(format!("call data missing 0x prefix: {s}")))?;
    hex::decode(digits).map_err(|e| ProviderError::InvalidResponse(format!("call data: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_call_data() {
        assert_eq!(decode_data("0x").unwrap(), Vec::<u8>::new());
        assert_eq!(decode_data("0x00ff").unwrap(), vec![0x00, 0xff]);
        assert!(decode_data("00ff").is_err());
        assert!(decode_data("0x0").is_err());
    }
}
