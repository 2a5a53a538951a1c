//! # callsig-core
//!
//! Call-data interpretation primitives shared across all CallSig crates.
//!
//! Three stateless stages turn raw call data plus a list of candidate
//! signatures into the root object a rule engine binds:
//!
//! 1. [`resolver`] keeps the candidates whose decode → re-encode round trip
//!    reproduces the call data, shortest signature first;
//! 2. [`normalizer`] converts decoded value trees into plain JSON-shaped
//!    [`NormalizedValue`]s;
//! 3. [`context`] assembles the `{to, value, method_name, args}` root object.
//!
//! The ABI primitive itself sits behind the [`AbiCodec`] trait.

pub mod candidate;
pub mod codec;
pub mod context;
pub mod error;
pub mod guard;
pub mod normalizer;
pub mod resolver;
pub mod selector;
pub mod types;
pub mod value;

pub use candidate::{DecodedCandidate, SignatureCandidate};
pub use codec::AbiCodec;
pub use context::{build_root, RootObject, TransactionFields};
pub use error::{AbiError, RegistryError, ResolveError};
pub use guard::{RequestGuard, Ticket};
pub use normalizer::{format_decoded, normalize};
pub use resolver::{parse_call_data, SignatureResolver};
pub use selector::Selector;
pub use types::{NormalizedValue, MAX_SAFE_INTEGER};
pub use value::{MemberKey, StructValue, ValueTree};
