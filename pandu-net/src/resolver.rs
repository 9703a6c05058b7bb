//! The seam between touch dispatch and whatever decides the reaction.

use std::future::Future;
use std::sync::Arc;

use pandu_core::ReactionOutcome;
use tracing::debug;

use crate::client::ReactionClient;
use crate::error::NetError;
use crate::types::InteractionRecord;

/// Resolves a recognised touch into a reaction.
///
/// Any error sends the caller down the local fallback path.
pub trait ReactionResolver: Send + Sync + 'static {
    /// Resolve one interaction.
    fn resolve(&self, record: InteractionRecord) -> impl Future<Output = Result<ReactionOutcome, NetError>> + Send;
}

impl ReactionResolver for ReactionClient {
    async fn resolve(&self, record: InteractionRecord) -> Result<ReactionOutcome, NetError> {
        let response = self.record_interaction(&record).await?;
        debug!(
            reaction_id = %response.reaction_id,
            outcome = %response.outcome,
            bonding_score = response.bonding_score,
            "reaction resolved"
        );
        Ok(response.to_outcome())
    }
}

impl<R: ReactionResolver> ReactionResolver for Arc<R> {
    fn resolve(&self, record: InteractionRecord) -> impl Future<Output = Result<ReactionOutcome, NetError>> + Send {
        (**self).resolve(record)
    }
}

/// A resolver with no server behind it. Every call fails, so every touch
/// plays the local fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineResolver;

impl ReactionResolver for OfflineResolver {
    async fn resolve(&self, _record: InteractionRecord) -> Result<ReactionOutcome, NetError> {
        Err(NetError::Unavailable("no resolver configured".into()))
    }
}
