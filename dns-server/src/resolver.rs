use std::sync::Arc;

use dns_lib::{
    interface::cache::main_cache::AsyncMainCache,
    query::message::Message,
    resource_record::resource_record::ResourceRecord,
};
use log::{debug, trace};

use crate::{errors::ProxyError, upstream::Upstream};

/// How a query was answered, along with the bytes to send back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Every question was answered from the cache.
    Cached(Vec<u8>),
    /// The upstream answered and its records were cached.
    Forwarded(Vec<u8>),
    /// The upstream could not answer. Its reply is passed on unchanged and nothing was cached.
    Failed(Vec<u8>),
}

impl Resolution {
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Cached(bytes) => bytes,
            Self::Forwarded(bytes) => bytes,
            Self::Failed(bytes) => bytes,
        }
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Cached(bytes) => bytes,
            Self::Forwarded(bytes) => bytes,
            Self::Failed(bytes) => bytes,
        }
    }
}

/// An upstream reply can be cached only when it succeeded and actually carries an answer for at
/// least one question. Only NoError replies are cached; every other RCODE, including name error,
/// is relayed as a failure.
pub fn validate_upstream(reply: &Message) -> Result<(), ProxyError> {
    if reply.rcode_flag().is_no_error() && !reply.question().is_empty() && !reply.answer().is_empty() {
        return Ok(());
    }

    Err(ProxyError::NameResolutionFailed {
        rcode: *reply.rcode_flag(),
        questions: reply.question().len(),
        answers: reply.answer().len(),
    })
}

/// Answers queries from the cache, forwarding to the upstream on a miss.
pub struct ForwardingResolver<C, U> {
    cache: Arc<C>,
    upstream: U,
}

impl<C, U> ForwardingResolver<C, U>
where
    C: AsyncMainCache + Send + Sync,
    U: Upstream,
{
    #[inline]
    pub fn new(cache: Arc<C>, upstream: U) -> Self {
        Self { cache, upstream }
    }

    #[inline]
    pub fn cache(&self) -> &Arc<C> {
        &self.cache
    }

    /// Resolves one raw client query.
    pub async fn resolve(&self, query: &[u8]) -> Result<Resolution, ProxyError> {
        let request = Message::from_bytes(query)?;

        if let Some(answer) = self.lookup_all(&request).await {
            debug!(id = request.id; "Answered {} question(s) from the cache", answer.len());
            let response = Message::response_to(&request, answer);
            return Ok(Resolution::Cached(response.to_bytes()?));
        }

        debug!(id = request.id; "Cache miss, forwarding {} byte query upstream", query.len());
        let reply_bytes = self.upstream.exchange(query, request.id).await?;
        trace!(id = request.id; "Upstream replied with {} bytes", reply_bytes.len());
        let reply = Message::from_bytes(&reply_bytes)?;

        match validate_upstream(&reply) {
            Ok(()) => {
                self.cache_reply(&reply).await;
                Ok(Resolution::Forwarded(reply_bytes))
            },
            Err(error) => {
                debug!(id = request.id; "Relaying failed upstream reply: {error}");
                Ok(Resolution::Failed(reply_bytes))
            },
        }
    }

    /// The cached answer for each question, in question order. A message with no questions, or
    /// any question without a fresh record, is a miss.
    async fn lookup_all(&self, request: &Message) -> Option<Vec<ResourceRecord>> {
        if request.question().is_empty() {
            return None;
        }

        let mut answer = Vec::with_capacity(request.question().len());
        for question in request.question() {
            answer.push(self.cache.get(question).await?);
        }
        Some(answer)
    }

    /// Caches the i-th answer under the i-th question. Answers past the last question are not
    /// cached.
    async fn cache_reply(&self, reply: &Message) {
        for (question, record) in reply.question().iter().zip(reply.answer()) {
            trace!(question:% = question; "Caching {record}");
            self.cache.insert_record(question.clone(), record.clone()).await;
        }
    }
}
