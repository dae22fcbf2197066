/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/6/26
******************************************************************************/

//! # Wirefix Tag-Value
//!
//! Zero-copy FIX 4.4 tag=value decoding and encoding for the wirefix codec.
//!
//! This crate provides the wire layer of the codec:
//!
//! - **Checksum**: sum-mod-256 arithmetic over every byte before the trailer
//! - **Decoder**: multi-message streaming decode with strict cursor semantics
//! - **Encoder**: framed, checksummed serialization with measured BodyLength
//!
//! ## Features
//!
//! - **Zero-copy parsing**: field values reference the original buffer
//! - **SIMD-accelerated**: uses `memchr` for delimiter and trailer search
//! - **Injected clock**: SendingTime is test-freezable, never a hidden global

pub mod checksum;
pub mod decoder;
pub mod encoder;

pub use checksum::calculate_checksum;
pub use decoder::{DecodeAll, Decoder};
pub use encoder::Encoder;
