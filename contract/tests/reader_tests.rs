//! ContractReader and vote submission against nullable contracts.

use ballot_contract::{
    candidate_stream, cast_vote, ContractConnector, ContractError, ContractReader, ReadError,
    VoteError,
};
use ballot_nullables::{FailAt, NullConnector, RemoteCall};
use ballot_types::{Address, Candidate};
use futures_util::StreamExt;

const CONTRACT: &str = "0x1111111111111111111111111111111111111111";

fn candidates() -> Vec<Candidate> {
    vec![
        Candidate { id: 0, name: "Rust".into(), count: 3 },
        Candidate { id: 1, name: "Go".into(), count: 5 },
    ]
}

fn setup() -> (NullConnector, Address) {
    let connector = NullConnector::new().with_contract(CONTRACT, "Best Language", candidates());
    (connector, CONTRACT.parse().unwrap())
}

#[tokio::test]
async fn load_voting_reads_topic_and_candidates_in_order() {
    let (connector, address) = setup();
    let session = ContractReader::new(&connector).load_voting(&address).await.unwrap();

    assert_eq!(session.contract_address, Some(address));
    assert_eq!(session.topic, "Best Language");
    assert_eq!(session.candidates, candidates());

    let key = CONTRACT.to_string();
    assert_eq!(
        connector.calls(),
        vec![
            RemoteCall::VoteTopic(key.clone()),
            RemoteCall::CandidatesCount(key.clone()),
            RemoteCall::Candidate(key.clone(), 0),
            RemoteCall::Candidate(key, 1),
        ]
    );
}

#[tokio::test]
async fn empty_candidate_list_makes_no_candidate_calls() {
    let connector = NullConnector::new().with_contract(CONTRACT, "Nothing yet", vec![]);
    let address: Address = CONTRACT.parse().unwrap();
    let session = ContractReader::new(&connector).load_voting(&address).await.unwrap();
    assert!(session.candidates.is_empty());
    assert_eq!(connector.call_count(), 2);
}

#[tokio::test]
async fn count_failure_aborts_before_candidates() {
    let (connector, address) = setup();
    connector.fail_at(CONTRACT, Some(FailAt::Count));

    let err = ContractReader::new(&connector).load_voting(&address).await.unwrap_err();
    assert!(matches!(err, ReadError::Count(_)), "{err:?}");
    assert!(matches!(err.cause(), ContractError::Provider(_)));
    assert_eq!(connector.call_count(), 2);
}

#[tokio::test]
async fn topic_failure_is_reported_as_topic() {
    let (connector, address) = setup();
    connector.fail_at(CONTRACT, Some(FailAt::Topic));
    let err = ContractReader::new(&connector).load_voting(&address).await.unwrap_err();
    assert!(matches!(err, ReadError::Topic(_)), "{err:?}");
    assert_eq!(connector.call_count(), 1);
}

#[tokio::test]
async fn candidate_failure_names_the_index() {
    let (connector, address) = setup();
    connector.fail_at(CONTRACT, Some(FailAt::Candidate(1)));
    let err = ContractReader::new(&connector).load_voting(&address).await.unwrap_err();
    assert!(matches!(err, ReadError::Candidate { index: 1, .. }), "{err:?}");
}

#[tokio::test]
async fn address_without_contract_fails_to_decode() {
    let connector = NullConnector::new();
    let address: Address = CONTRACT.parse().unwrap();
    let err = ContractReader::new(&connector).load_voting(&address).await.unwrap_err();
    assert!(matches!(err.cause(), ContractError::Abi(_)), "{err:?}");
}

#[tokio::test]
async fn candidate_stream_is_lazy_and_stops_after_error() {
    let (connector, address) = setup();
    connector.fail_at(CONTRACT, Some(FailAt::Candidate(0)));
    let contract = connector.at(&address);

    let stream = candidate_stream(&contract, 2);
    assert_eq!(connector.call_count(), 0);

    let items: Vec<_> = stream.collect().await;
    assert_eq!(items.len(), 1);
    assert!(matches!(items[0], Err(ReadError::Candidate { index: 0, .. })));
    assert_eq!(connector.call_count(), 1);
}

#[tokio::test]
async fn candidate_stream_restarts_per_load() {
    let (connector, address) = setup();
    let contract = connector.at(&address);
    let first: Vec<_> = candidate_stream(&contract, 2).collect().await;
    let second: Vec<_> = candidate_stream(&contract, 2).collect().await;
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert_eq!(connector.call_count(), 4);
}

#[tokio::test]
async fn cast_vote_confirms_and_counts() {
    let (connector, address) = setup();
    let contract = connector.at(&address);

    let receipt = cast_vote(&contract, 1).await.unwrap();
    assert!(receipt.success);
    assert_eq!(receipt.block_number, 100);
    assert_eq!(connector.script(CONTRACT).unwrap().candidates[1].count, 6);
}

#[tokio::test]
async fn cast_vote_maps_wallet_rejection() {
    let (connector, address) = setup();
    connector.fail_at(CONTRACT, Some(FailAt::VoteRejected));
    let err = cast_vote(&connector.at(&address), 0).await.unwrap_err();
    assert!(matches!(err, VoteError::Rejected), "{err:?}");
}

#[tokio::test]
async fn cast_vote_reports_submission_failure() {
    let (connector, address) = setup();
    connector.fail_at(CONTRACT, Some(FailAt::Vote));
    let err = cast_vote(&connector.at(&address), 0).await.unwrap_err();
    assert!(matches!(err, VoteError::Submit(_)), "{err:?}");
    assert!(!connector
        .calls()
        .iter()
        .any(|c| matches!(c, RemoteCall::Confirm(_))));
}

#[tokio::test]
async fn cast_vote_reports_confirmation_failure() {
    let (connector, address) = setup();
    connector.fail_at(CONTRACT, Some(FailAt::Confirmation));
    let err = cast_vote(&connector.at(&address), 0).await.unwrap_err();
    assert!(matches!(err, VoteError::Confirmation { .. }), "{err:?}");
}

#[tokio::test]
async fn cast_vote_reports_revert() {
    let (connector, address) = setup();
    connector.revert_votes(CONTRACT);
    let err = cast_vote(&connector.at(&address), 0).await.unwrap_err();
    assert!(matches!(err, VoteError::Reverted { block_number: 100, .. }), "{err:?}");
    assert_eq!(connector.script(CONTRACT).unwrap().candidates[0].count, 3);
}
