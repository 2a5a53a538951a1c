//! In-memory `SignatureSource` implementation.
//!
//! Suitable for testing, CLI use, and offline deployments.
//! Thread-safe via `Arc<RwLock<Inner>>`.
//!
//! Signatures are indexed by the selector computed from their text, so they
//! must be in canonical form (`name(type1,type2)`, no spaces or parameter
//! names), the way signature databases store them.

use async_trait::async_trait;
use callsig_core::{RegistryError, Selector, SignatureCandidate};
use serde::Deserialize;
use std::{
    collections::{HashMap, HashSet},
    path::Path,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use tracing::debug;

use crate::source::SignatureSource;

/// One entry of a JSON signature list: either a full candidate or bare text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListEntry {
    Full(SignatureCandidate),
    Bare(String),
}

#[derive(Default)]
struct Inner {
    /// Selector → candidates, in insertion order
    by_selector: HashMap<Selector, Vec<SignatureCandidate>>,
    /// `(id, signature)` pairs already indexed
    seen: HashSet<(u64, String)>,
    /// Next id handed to a bare signature
    next_id: u64,
}

impl Inner {
    fn insert(&mut self, candidate: SignatureCandidate) -> bool {
        if !self.seen.insert((candidate.id, candidate.signature.clone())) {
            return false;
        }
        self.next_id = self.next_id.max(candidate.id.saturating_add(1));
        let sel = Selector::of_signature(&candidate.signature);
        self.by_selector.entry(sel).or_default().push(candidate);
        true
    }
}

/// Thread-safe in-memory selector index.
#[derive(Clone, Default)]
pub struct MemorySignatureSource {
    inner: Arc<RwLock<Inner>>,
}

impl MemorySignatureSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, RegistryError> {
        self.inner.read().map_err(|_| RegistryError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, RegistryError> {
        self.inner.write().map_err(|_| RegistryError::Poisoned)
    }

    /// Add a candidate with a database-assigned id.
    /// Returns `false` if the same `(id, signature)` pair is already indexed;
    /// the same text under another id is kept as a separate candidate.
    pub fn add(&self, candidate: SignatureCandidate) -> Result<bool, RegistryError> {
        check_shape(&candidate.signature)?;
        Ok(self.write()?.insert(candidate))
    }

    /// Add bare signature text, assigning the next sequential id.
    /// Returns the candidate as indexed (the first existing one if the text
    /// is already known under any id).
    pub fn add_signature(&self, signature: &str) -> Result<SignatureCandidate, RegistryError> {
        let signature = signature.trim();
        check_shape(signature)?;
        let mut inner = self.write()?;
        let sel = Selector::of_signature(signature);
        if let Some(existing) = inner
            .by_selector
            .get(&sel)
            .and_then(|v| v.iter().find(|c| c.signature == signature))
        {
            return Ok(existing.clone());
        }
        let candidate = SignatureCandidate::new(inner.next_id, signature);
        inner.insert(candidate.clone());
        Ok(candidate)
    }

    /// Load a JSON array whose entries are `{ "id", "signature" }` objects or
    /// bare signature strings. Returns the number of new signatures indexed.
    pub fn load_json(&self, json: &str) -> Result<usize, RegistryError> {
        let entries: Vec<ListEntry> = serde_json::from_str(json)?;
        let mut count = 0;
        for entry in entries {
            let added = match entry {
                ListEntry::Full(candidate) => self.add(candidate)?,
                ListEntry::Bare(text) => {
                    let before = self.len()?;
                    self.add_signature(&text)?;
                    self.len()? > before
                }
            };
            if added {
                count += 1;
            }
        }
        debug!(count, "loaded signature list");
        Ok(count)
    }

    /// Load a JSON signature list from a file.
    pub fn load_file(&self, path: &Path) -> Result<usize, RegistryError> {
        let content = std::fs::read_to_string(path)?;
        self.load_json(&content)
    }

    /// Returns the total number of signatures stored.
    pub fn len(&self) -> Result<usize, RegistryError> {
        Ok(self.read()?.seen.len())
    }

    pub fn is_empty(&self) -> Result<bool, RegistryError> {
        Ok(self.len()? == 0)
    }

    /// All indexed selectors, sorted.
    pub fn selectors(&self) -> Result<Vec<Selector>, RegistryError> {
        let mut sels: Vec<Selector> = self.read()?.by_selector.keys().copied().collect();
        sels.sort();
        Ok(sels)
    }

    /// Synchronous lookup.
    pub fn get(&self, selector: Selector) -> Result<Vec<SignatureCandidate>, RegistryError> {
        Ok(self
            .read()?
            .by_selector
            .get(&selector)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl SignatureSource for MemorySignatureSource {
    async fn candidates_for(
        &self,
        selector: Selector,
    ) -> Result<Vec<SignatureCandidate>, RegistryError> {
        self.get(selector)
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// `name(...)` with a non-empty name and a closing parenthesis.
fn check_shape(signature: &str) -> Result<(), RegistryError> {
    let open = signature.find('(');
    if matches!(open, Some(i) if i > 0) && signature.ends_with(')') {
        Ok(())
    } else {
        Err(RegistryError::Malformed {
            reason: format!("'{signature}' is not of the form name(types)"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSFER: Selector = Selector([0xa9, 0x05, 0x9c, 0xbb]);

    #[test]
    fn indexes_by_computed_selector() {
        let src = MemorySignatureSource::new();
        src.add(SignatureCandidate::new(145, "transfer(address,uint256)")).unwrap();
        src.add(SignatureCandidate::new(31780, "many_msg_babbage(bytes1)")).unwrap();
        src.add(SignatureCandidate::new(149, "approve(address,uint256)")).unwrap();

        let hits = src.get(TRANSFER).unwrap();
        let ids: Vec<u64> = hits.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![145, 31780]);
        assert_eq!(src.selectors().unwrap().len(), 2);
    }

    #[test]
    fn bare_signatures_get_sequential_ids() {
        let src = MemorySignatureSource::new();
        let a = src.add_signature("transfer(address,uint256)").unwrap();
        let b = src.add_signature("approve(address,uint256)").unwrap();
        assert_eq!((a.id, b.id), (0, 1));

        let again = src.add_signature("transfer(address,uint256)").unwrap();
        assert_eq!(again.id, 0);
        assert_eq!(src.len().unwrap(), 2);
    }

    #[test]
    fn loads_mixed_json_list() {
        let src = MemorySignatureSource::new();
        let n = src
            .load_json(
                r#"[
                    {"id": 145, "signature": "transfer(address,uint256)"},
                    "approve(address,uint256)",
                    "transfer(address,uint256)"
                ]"#,
            )
            .unwrap();
        assert_eq!(n, 2);
        // bare entries continue after the highest explicit id
        let approve = Selector::of_signature("approve(address,uint256)");
        assert_eq!(src.get(approve).unwrap()[0].id, 146);
    }

    #[test]
    fn same_text_under_two_ids_keeps_both() {
        let src = MemorySignatureSource::new();
        let n = src
            .load_json(
                r#"[
                    {"id": 7, "signature": "transfer(address,uint256)"},
                    {"id": 9, "signature": "transfer(address,uint256)"},
                    {"id": 7, "signature": "transfer(address,uint256)"}
                ]"#,
            )
            .unwrap();
        assert_eq!(n, 2);
        let ids: Vec<u64> = src.get(TRANSFER).unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![7, 9]);
    }

    #[test]
    fn rejects_malformed_entries() {
        let src = MemorySignatureSource::new();
        assert!(matches!(
            src.add_signature("transfer"),
            Err(RegistryError::Malformed { .. })
        ));
        assert!(src.load_json("{\"not\": \"a list\"}").is_err());
        assert!(src.is_empty().unwrap());
    }

    #[tokio::test]
    async fn async_lookup_from_call_data() {
        let src = MemorySignatureSource::new();
        src.add_signature("transfer(address,uint256)").unwrap();

        let hits = src.candidates_for_call("0xa9059cbb0000").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(src.candidates_for_call("0x12").await.unwrap().is_empty());
        assert!(src.candidates_for(Selector([0; 4])).await.unwrap().is_empty());
    }
}
