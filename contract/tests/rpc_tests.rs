//! The RPC contract binding against a fake JSON-RPC chain.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ballot_contract::abi;
use ballot_contract::{cast_vote, ContractReader, ReadError, SignerConnector, VoteError};
use ballot_contract::ContractConnector;
use ballot_nullables::{FakeProvider, RpcReply};
use ballot_types::{Candidate, TxHash};
use ballot_wallet_core::{SessionProvider, WalletProvider};
use serde_json::{json, Value};

const ACCOUNT: &str = "0x1234567890abcdef1234567890abcdef12345678";
const CONTRACT: &str = "0x1111111111111111111111111111111111111111";

fn candidates() -> Vec<Candidate> {
    vec![
        Candidate { id: 0, name: "Rust".into(), count: 3 },
        Candidate { id: 1, name: "Go".into(), count: 5 },
    ]
}

fn tx_hash() -> String {
    format!("0x{}", "cd".repeat(32))
}

fn hex_reply(data: &[u8]) -> RpcReply {
    Ok(json!(format!("0x{}", hex::encode(data))))
}

/// Answers the voting ABI the way a node with the contract deployed would.
fn chain(method: &str, params: &Value) -> RpcReply {
    match method {
        "eth_requestAccounts" => Ok(json!([ACCOUNT])),
        "eth_chainId" => Ok(json!("0x1")),
        "eth_call" => {
            if params[0]["to"] != CONTRACT {
                return hex_reply(&[]);
            }
            let data = params[0]["data"].as_str().unwrap_or_default();
            let data = hex::decode(data.trim_start_matches("0x")).unwrap();
            let (selector, args) = data.split_at(4);
            if selector == abi::selector(abi::VOTE_TOPIC).as_slice() {
                hex_reply(&abi::encode_string("Best Language"))
            } else if selector == abi::selector(abi::CANDIDATES_COUNT).as_slice() {
                hex_reply(&abi::encode_uint(2))
            } else if selector == abi::selector(abi::CANDIDATES).as_slice() {
                let index = abi::decode_uint(args, 0).unwrap() as usize;
                match candidates().get(index) {
                    Some(candidate) => hex_reply(&abi::encode_candidate(candidate)),
                    None => Err((-32000, "execution reverted".into())),
                }
            } else {
                Err((-32000, "execution reverted".into()))
            }
        }
        "eth_sendTransaction" => Ok(json!(tx_hash())),
        "eth_getTransactionReceipt" => Ok(json!({
            "transactionHash": tx_hash(),
            "blockNumber": "0x7",
            "status": "0x1",
        })),
        other => Err((-32601, format!("method {other} not found"))),
    }
}

async fn connect(fake: &FakeProvider) -> SignerConnector {
    let mut provider = WalletProvider::new(fake.url()).unwrap();
    let session = provider.connect().await.unwrap();
    SignerConnector::new(session.signer().unwrap().clone())
        .with_poll_interval(Duration::from_millis(5))
}

#[tokio::test]
async fn loads_voting_over_rpc() {
    let fake = FakeProvider::spawn(chain).await;
    let connector = connect(&fake).await;

    let session = ContractReader::new(&connector)
        .load_voting(&CONTRACT.parse().unwrap())
        .await
        .unwrap();
    assert_eq!(session.topic, "Best Language");
    assert_eq!(session.candidates, candidates());

    let calls: Vec<String> = fake
        .requests()
        .iter()
        .filter(|(method, _)| method == "eth_call")
        .map(|(_, params)| params[0]["data"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[2], format!("0x{}", hex::encode(abi::encode_call(abi::CANDIDATES, &[0]))));
    assert_eq!(calls[3], format!("0x{}", hex::encode(abi::encode_call(abi::CANDIDATES, &[1]))));
}

#[tokio::test]
async fn address_without_code_is_a_read_error() {
    let fake = FakeProvider::spawn(chain).await;
    let connector = connect(&fake).await;
    let err = ContractReader::new(&connector)
        .load_voting(&"0x2222222222222222222222222222222222222222".parse().unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, ReadError::Topic(_)), "{err:?}");
}

#[tokio::test]
async fn vote_polls_until_receipt_is_available() {
    let polls = Arc::new(AtomicUsize::new(0));
    let counter = polls.clone();
    let fake = FakeProvider::spawn(move |method, params| match method {
        "eth_getTransactionReceipt" if counter.fetch_add(1, Ordering::SeqCst) < 2 => {
            Ok(Value::Null)
        }
        _ => chain(method, params),
    })
    .await;
    let connector = connect(&fake).await;
    let contract = connector.at(&CONTRACT.parse().unwrap());

    let receipt = cast_vote(&contract, 1).await.unwrap();
    assert_eq!(receipt.tx_hash, TxHash::new([0xcd; 32]));
    assert_eq!(receipt.block_number, 7);
    assert_eq!(polls.load(Ordering::SeqCst), 3);

    let requests = fake.requests();
    let (_, params) = requests
        .iter()
        .find(|(method, _)| method == "eth_sendTransaction")
        .unwrap();
    assert_eq!(params[0]["from"], ACCOUNT);
    assert_eq!(params[0]["to"], CONTRACT);
    assert_eq!(
        params[0]["data"],
        format!("0x{}", hex::encode(abi::encode_call(abi::VOTE, &[1])))
    );
}

#[tokio::test]
async fn vote_rejected_in_wallet() {
    let fake = FakeProvider::spawn(|method, params| match method {
        "eth_sendTransaction" => Err((4001, "User rejected the request.".into())),
        _ => chain(method, params),
    })
    .await;
    let connector = connect(&fake).await;
    let err = cast_vote(&connector.at(&CONTRACT.parse().unwrap()), 0)
        .await
        .unwrap_err();
    assert!(matches!(err, VoteError::Rejected), "{err:?}");
}
