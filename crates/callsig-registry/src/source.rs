//! The `SignatureSource` trait.

use async_trait::async_trait;
use callsig_core::{RegistryError, Selector, SignatureCandidate};

/// A lookup from 4-byte selector to candidate signatures.
///
/// The trait is object-safe and can be stored as `Arc<dyn SignatureSource>`.
/// Order of the returned candidates is the source's own; ranking happens in
/// the resolver.
#[async_trait]
pub trait SignatureSource: Send + Sync {
    /// All known signatures whose selector is `selector`. An unknown selector
    /// yields an empty list, not an error.
    async fn candidates_for(
        &self,
        selector: Selector,
    ) -> Result<Vec<SignatureCandidate>, RegistryError>;

    /// Short identifier for logs.
    fn name(&self) -> &str;

    /// Convenience: parse the selector from the head of `0x` call data first.
    async fn candidates_for_call(
        &self,
        call_data: &str,
    ) -> Result<Vec<SignatureCandidate>, RegistryError> {
        match Selector::from_call_data(call_data) {
            Some(sel) => self.candidates_for(sel).await,
            None => Ok(Vec::new()),
        }
    }
}
