/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/6/26
******************************************************************************/

//! # Wirefix Core
//!
//! Core types, traits, and error definitions for the wirefix FIX 4.4 wire codec.
//!
//! This crate provides the fundamental building blocks used across all wirefix crates:
//! - **Error types**: Unified error handling with `thiserror`
//! - **Field types**: `FieldView` and the lazy typed accessors
//! - **Message types**: the zero-copy `Message` view over a backing byte region
//! - **Core types**: `SeqNum`, `Timestamp`, `CompId`, and the injectable `Clock`
//! - **Tag constants**: named tag numbers for the FIX 4.4 header and common body fields
//!
//! ## Zero-Copy Design
//!
//! A decoded `Message` and its `FieldView`s never copy payload bytes; they borrow
//! from the caller-provided backing region and are valid for its lifetime.

pub mod error;
pub mod field;
pub mod message;
pub mod tags;
pub mod types;

pub use error::{DecodeError, EncodeError, FixError, Result, ValueError};
pub use field::FieldView;
pub use message::{FieldVec, Message};
pub use types::{Clock, CompId, FixedClock, SeqNum, SystemClock, Timestamp};
