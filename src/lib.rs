//! Motorola S-Record encoding for binary images.
//!
//! Supports the 16-bit S19 family (S0/S1/S5/S9) and the 32-bit S37 family
//! (S0/S3/S7), either into a single buffer ([`dump`]) or incrementally from
//! a reader into a writer ([`copy`]).

mod name;
pub mod record;

pub use name::sr_path;

pub use record::{AddrWidth, Family, RecordKind, DEFAULT_CHUNK_SIZE};
pub use record::codec::{dump, dump16, dump32, DumpError};
pub use record::write::{copy, copy16, copy32, CopyError, SrecWrite, WriteError};
