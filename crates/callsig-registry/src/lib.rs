//! # callsig-registry
//!
//! Where candidate signatures come from.
//!
//! ## Sources
//! 1. **In-Memory Index** — signatures keyed by their computed selector;
//!    loaded from JSON lists or added one by one
//! 2. **4byte.directory** (feature `remote`) — public selector database
//!
//! Both implement the async [`SignatureSource`] trait. The interpreter never
//! talks to a source directly: callers look candidates up and pass them in.

pub mod memory;
pub mod source;

#[cfg(feature = "remote")]
pub mod fourbyte;

pub use memory::MemorySignatureSource;
pub use source::SignatureSource;

#[cfg(feature = "remote")]
pub use fourbyte::{FourByteClient, RemoteError};
