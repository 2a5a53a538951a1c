//! # callsig-evm
//!
//! EVM ABI codec implementing the `AbiCodec` trait, plus a facade that runs
//! the full interpretation pipeline.
//!
//! ## Implementation notes
//! - Uses `alloy-core` for ABI decode/encode
//! - Calldata[0..4] → function selector, checked against the signature
//! - Calldata[4..] → arguments, decoded as function parameters
//! - Addresses come out EIP-55 checksummed, bytes as `0x` hex text

pub mod batch;
pub mod call_decoder;
pub mod codec;
pub mod convert;
pub mod encoder;
pub mod interpreter;
pub mod signature;

pub use batch::{interpret_batch, InterpretJob};
pub use codec::EvmAbiCodec;
pub use interpreter::{CallInterpreter, Interpretation, RankedCandidate};
pub use signature::{ParsedSignature, Shape};
