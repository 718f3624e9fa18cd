use core::fmt;
use std::error::Error;
use std::num::NonZeroUsize;

pub mod build;
pub mod chunk;
pub mod codec;
pub mod encode;
pub mod write;


/// Largest value the one-byte count field can hold.
pub const MAX_BYTE_COUNT: usize = 0xFF;
pub const DEFAULT_CHUNK_SIZE: usize = 32;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AddrWidth
{
	Bits16,
	Bits24,
	Bits32,
}

impl AddrWidth
{
	pub fn len(self) -> usize
	{
		match self
		{
			Self::Bits16 => 2,
			Self::Bits24 => 3,
			Self::Bits32 => 4,
		}
	}

	pub fn mask(self) -> u32
	{
		match self
		{
			Self::Bits16 => 0xFFFF,
			Self::Bits24 => 0xFF_FFFF,
			Self::Bits32 => 0xFFFF_FFFF,
		}
	}

	/// Longest payload whose record still fits the byte count field.
	pub fn max_data_len(self) -> usize
	{
		// one byte for the checksum
		MAX_BYTE_COUNT - self.len() - 1
	}
}

impl fmt::Display for AddrWidth
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		write!(f, "{}-bit", self.len() * 8)
	}
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum RecordKind
{
	Header = 0,
	Data16 = 1,
	Data24 = 2,
	Data32 = 3,
	Count16 = 5,
	Count24 = 6,
	Terminator32 = 7,
	Terminator24 = 8,
	Terminator16 = 9,
}

impl RecordKind
{
	pub fn digit(self) -> u8
	{
		self as u8
	}

	pub fn width(self) -> AddrWidth
	{
		match self
		{
			Self::Header | Self::Data16 | Self::Count16 | Self::Terminator16 => AddrWidth::Bits16,
			Self::Data24 | Self::Count24 | Self::Terminator24 => AddrWidth::Bits24,
			Self::Data32 | Self::Terminator32 => AddrWidth::Bits32,
		}
	}

	pub fn is_supported(self) -> bool
	{
		self.width() != AddrWidth::Bits24
	}
}

impl From<RecordKind> for u8
{
	fn from(value: RecordKind) -> u8
	{
		value.digit()
	}
}

impl TryFrom<u8> for RecordKind
{
	type Error = KindDigit;

	fn try_from(value: u8) -> Result<Self, KindDigit>
	{
		match value
		{
			0 => Ok(Self::Header),
			1 => Ok(Self::Data16),
			2 => Ok(Self::Data24),
			3 => Ok(Self::Data32),
			5 => Ok(Self::Count16),
			6 => Ok(Self::Count24),
			7 => Ok(Self::Terminator32),
			8 => Ok(Self::Terminator24),
			9 => Ok(Self::Terminator16),
			_ => Err(KindDigit(value)),
		}
	}
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct KindDigit(pub u8);

impl fmt::Display for KindDigit
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		write!(f, "no record kind for digit {}", self.0)
	}
}

impl Error for KindDigit {}

/// Document layout: which records frame the data and how wide their addresses are.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Family
{
	/// 16-bit addresses, terminated by a record count and S9.
	S19,
	/// 32-bit addresses, terminated by S7 without a record count.
	S37,
}

impl Family
{
	pub fn width(self) -> AddrWidth
	{
		match self
		{
			Self::S19 => AddrWidth::Bits16,
			Self::S37 => AddrWidth::Bits32,
		}
	}

	pub fn data_kind(self) -> RecordKind
	{
		match self
		{
			Self::S19 => RecordKind::Data16,
			Self::S37 => RecordKind::Data32,
		}
	}

	pub fn count_kind(self) -> Option<RecordKind>
	{
		match self
		{
			Self::S19 => Some(RecordKind::Count16),
			Self::S37 => None,
		}
	}

	pub fn terminator_kind(self) -> RecordKind
	{
		match self
		{
			Self::S19 => RecordKind::Terminator16,
			Self::S37 => RecordKind::Terminator32,
		}
	}

	pub fn max_chunk_size(self) -> usize
	{
		self.width().max_data_len()
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NewError
{
	ChunkSize{size: usize, max: usize},
}

impl NewError
{
	pub(crate) fn check(family: Family, size: usize) -> Result<NonZeroUsize, Self>
	{
		let max = family.max_chunk_size();
		NonZeroUsize::new(size).filter(|s| s.get() <= max).ok_or(Self::ChunkSize{size, max})
	}
}

impl fmt::Display for NewError
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		match self
		{
			Self::ChunkSize{size, max} => write!(f, "invalid chunk size ({size}, must be 1 to {max})"),
		}
	}
}

impl Error for NewError {}
