use core::fmt;
use std::error::Error;

use crate::record::{AddrWidth, RecordKind, MAX_BYTE_COUNT};

/// A single well-formed record, ready for encoding.
///
/// The byte count and checksum are derived once at construction; the
/// payload is borrowed from the caller since records only live until
/// they have been encoded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Record<'l>
{
	kind: RecordKind,
	addr: u32,
	data: &'l [u8],
	byte_count: u8,
	checksum: u8,
}

impl<'l> Record<'l>
{
	pub fn new(kind: RecordKind, addr: u32, data: &'l [u8]) -> Result<Self, BuildError>
	{
		if !kind.is_supported()
		{
			return Err(BuildError::UnsupportedKind(kind));
		}
		let width = kind.width();
		if addr & !width.mask() != 0
		{
			return Err(BuildError::AddressOverflow{addr, width});
		}
		let need = width.len() + data.len() + 1;
		if need > MAX_BYTE_COUNT
		{
			return Err(BuildError::PayloadTooLarge{need, max: MAX_BYTE_COUNT});
		}
		let byte_count = need as u8;
		let mut sum = u32::from(byte_count);
		sum += Self::addr_bytes(addr, width).iter().map(|&b| u32::from(b)).sum::<u32>();
		sum += data.iter().map(|&b| u32::from(b)).sum::<u32>();
		let checksum = !(sum as u8);
		Ok(Self{kind, addr, data, byte_count, checksum})
	}

	fn addr_bytes(addr: u32, width: AddrWidth) -> [u8; 4]
	{
		let mut out = [0u8; 4];
		let len = width.len();
		out[..len].copy_from_slice(&u32::to_be_bytes(addr)[4 - len..]);
		out
	}

	pub fn kind(&self) -> RecordKind
	{
		self.kind
	}

	pub fn address(&self) -> u32
	{
		self.addr
	}

	pub fn data(&self) -> &'l [u8]
	{
		self.data
	}

	pub fn byte_count(&self) -> u8
	{
		self.byte_count
	}

	pub fn checksum(&self) -> u8
	{
		self.checksum
	}

	/// Appends byte count, big-endian address, payload and checksum to `dst`.
	pub fn write_raw(&self, dst: &mut Vec<u8>)
	{
		let width = self.kind.width();
		dst.reserve(usize::from(self.byte_count) + 1);
		dst.push(self.byte_count);
		dst.extend_from_slice(&Self::addr_bytes(self.addr, width)[..width.len()]);
		dst.extend_from_slice(self.data);
		dst.push(self.checksum);
	}

	pub fn raw(&self) -> Vec<u8>
	{
		let mut out = Vec::new();
		self.write_raw(&mut out);
		out
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BuildError
{
	PayloadTooLarge{need: usize, max: usize},
	UnsupportedKind(RecordKind),
	AddressOverflow{addr: u32, width: AddrWidth},
}

impl fmt::Display for BuildError
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		match self
		{
			Self::PayloadTooLarge{need, max} => write!(f, "record payload too large (byte count {need}, max {max})"),
			Self::UnsupportedKind(kind) => write!(f, "unsupported record kind S{} ({kind:?})", kind.digit()),
			Self::AddressOverflow{addr, width} => write!(f, "address {addr:#X} does not fit {width} record"),
		}
	}
}

impl Error for BuildError {}
