//! Reading a voting contract's topic and candidate list.

use futures_util::stream::{self, Stream, TryStreamExt};

use ballot_types::{Address, Candidate, VotingSession};

use crate::contract::{ContractConnector, VotingContract};
use crate::error::ReadError;

/// Loads [`VotingSession`]s through a signing capability.
pub struct ContractReader<'c, C> {
    connector: &'c C,
}

impl<'c, C: ContractConnector> ContractReader<'c, C> {
    pub fn new(connector: &'c C) -> Self {
        Self { connector }
    }

    /// Read the topic, the candidate count, then each candidate in index order.
    ///
    /// Any failed call aborts the remaining reads; nothing read so far is returned.
    pub async fn load_voting(&self, address: &Address) -> Result<VotingSession, ReadError> {
        let contract = self.connector.at(address);

        let topic = contract.vote_topic().await.map_err(ReadError::Topic)?;
        let count = contract.candidates_count().await.map_err(ReadError::Count)?;
        tracing::debug!(contract = %address, %topic, count, "reading candidates");

        let candidates: Vec<Candidate> = candidate_stream(&contract, count).try_collect().await?;

        Ok(VotingSession {
            contract_address: Some(address.clone()),
            topic,
            candidates,
        })
    }
}

/// Candidates `0..count`, read one at a time in ascending index order.
///
/// Nothing is fetched until the stream is polled. The stream ends after
/// yielding the first error.
pub fn candidate_stream<C: VotingContract>(
    contract: &C,
    count: u64,
) -> impl Stream<Item = Result<Candidate, ReadError>> + '_ {
    stream::try_unfold(0u64, move |index| async move {
        if index >= count {
            return Ok(None);
        }
        match contract.candidate(index).await {
            Ok(candidate) => Ok(Some((candidate, index + 1))),
            Err(source) => Err(ReadError::Candidate { index, source }),
        }
    })
}
