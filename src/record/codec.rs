use core::fmt;
use std::error::Error;

use crate::record::{DEFAULT_CHUNK_SIZE, Family, NewError, RecordKind};
use crate::record::build::{BuildError, Record};
use crate::record::chunk::chunks;
use crate::record::encode::encode;

/// Per-dump state: running data address and number of data records.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Framer
{
	family: Family,
	addr: u32,
	count: u32,
}

impl Framer
{
	pub(crate) fn new(family: Family) -> Self
	{
		Self{family, addr: 0, count: 0}
	}

	pub(crate) fn address(&self) -> u32
	{
		self.addr
	}

	pub(crate) fn count(&self) -> u32
	{
		self.count
	}

	pub(crate) fn header(&self, header: &[u8], dst: &mut String) -> Result<(), BuildError>
	{
		encode(&Record::new(RecordKind::Header, 0, header)?, dst);
		Ok(())
	}

	pub(crate) fn data(&mut self, chunk: &[u8], dst: &mut String) -> Result<(), BuildError>
	{
		let kind = self.family.data_kind();
		encode(&Record::new(kind, self.addr, chunk)?, dst);
		// wraps within the address space, payloads larger than it are not supported
		self.addr = self.addr.wrapping_add(chunk.len() as u32) & kind.width().mask();
		self.count = self.count.wrapping_add(1);
		Ok(())
	}

	pub(crate) fn trailer(&self, exec: u32, dst: &mut String) -> Result<(), BuildError>
	{
		let term = Record::new(self.family.terminator_kind(), exec, &[])?;
		if let Some(kind) = self.family.count_kind()
		{
			encode(&Record::new(kind, self.count & kind.width().mask(), &[])?, dst);
		}
		encode(&term, dst);
		Ok(())
	}
}

/// Renders a complete document for `data` in one buffer.
pub fn dump(family: Family, header: &[u8], data: &[u8], exec: u32, chunk_size: usize) -> Result<String, DumpError>
{
	let size = NewError::check(family, chunk_size)?;
	let mut framer = Framer::new(family);
	let mut out = String::new();
	framer.header(header, &mut out)?;
	for chunk in chunks(data, size)
	{
		framer.data(chunk, &mut out)?;
	}
	framer.trailer(exec, &mut out)?;
	Ok(out)
}

/// S19 dump with 32-byte data records. Memory devices (EEPROMs and the like) use an exec address of 0.
pub fn dump16(header: &[u8], data: &[u8], exec: u16) -> Result<String, DumpError>
{
	dump(Family::S19, header, data, u32::from(exec), DEFAULT_CHUNK_SIZE)
}

/// S37 dump with 32-byte data records.
pub fn dump32(header: &[u8], data: &[u8], exec: u32) -> Result<String, DumpError>
{
	dump(Family::S37, header, data, exec, DEFAULT_CHUNK_SIZE)
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DumpError
{
	New(NewError),
	Build(BuildError),
}

impl From<NewError> for DumpError
{
	fn from(value: NewError) -> Self
	{
		Self::New(value)
	}
}

impl From<BuildError> for DumpError
{
	fn from(value: BuildError) -> Self
	{
		Self::Build(value)
	}
}

impl fmt::Display for DumpError
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		match self
		{
			Self::New(..) => f.write_str("invalid dump configuration"),
			Self::Build(..) => f.write_str("could not build record"),
		}
	}
}

impl Error for DumpError
{
	fn source(&self) -> Option<&(dyn Error + 'static)>
	{
		match self
		{
			Self::New(e) => Some(e),
			Self::Build(e) => Some(e),
		}
	}
}
