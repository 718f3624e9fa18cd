use core::fmt;
use std::error::Error;
use std::io::{self, Read, Write};
use std::num::NonZeroUsize;

use crate::record::{DEFAULT_CHUNK_SIZE, Family, NewError};
use crate::record::build::{BuildError, Record};
use crate::record::chunk::chunks;
use crate::record::codec::Framer;

/// Incremental document writer.
///
/// The header record is written by [`SrecWrite::new`], each data record as
/// soon as it is passed in, and the count/terminator records by
/// [`SrecWrite::finish`]. Records written before an error stay written.
pub struct SrecWrite<W: Write>
{
	framer: Framer,
	size: NonZeroUsize,
	dst: W,
	line: String,
}

impl<W: Write> SrecWrite<W>
{
	pub fn new(family: Family, header: &[u8], chunk_size: usize, dst: W) -> Result<Self, WriteError>
	{
		let size = NewError::check(family, chunk_size)?;
		let mut out = Self{framer: Framer::new(family), size, dst, line: String::new()};
		out.framer.header(header, &mut out.line)?;
		out.emit()?;
		Ok(out)
	}

	fn emit(&mut self) -> Result<(), WriteError>
	{
		let result = self.dst.write_all(self.line.as_bytes());
		self.line.clear();
		result.map_err(WriteError::Sink)
	}

	pub fn chunk_size(&self) -> usize
	{
		self.size.get()
	}

	/// Address of the next data record.
	pub fn address(&self) -> u32
	{
		self.framer.address()
	}

	/// Number of data records written so far.
	pub fn records(&self) -> u32
	{
		self.framer.count()
	}

	/// Writes `block` as a single data record; empty blocks write nothing.
	///
	/// The address and record count only advance once the sink took the line.
	pub fn write(&mut self, block: &[u8]) -> Result<(), WriteError>
	{
		if !block.is_empty()
		{
			if block.len() > self.size.get()
			{
				return Err(WriteError::BlockSize{len: block.len(), max: self.size.get()});
			}
			let mut next = self.framer;
			next.data(block, &mut self.line)?;
			self.emit()?;
			self.framer = next;
		}
		Ok(())
	}

	/// Writes `data` as consecutive records of at most `chunk_size` bytes, returning the record count.
	pub fn write_all(&mut self, data: &[u8]) -> Result<usize, WriteError>
	{
		let mut cnt = 0;
		for block in chunks(data, self.size)
		{
			self.write(block)?;
			cnt += 1;
		}
		Ok(cnt)
	}

	pub fn finish(mut self, exec: u32) -> Result<W, WriteError>
	{
		self.framer.trailer(exec, &mut self.line)?;
		self.emit()?;
		self.dst.flush().map_err(WriteError::Sink)?;
		Ok(self.dst)
	}
}

#[derive(Debug)]
pub enum WriteError
{
	New(NewError),
	BlockSize{len: usize, max: usize},
	Build(BuildError),
	Sink(io::Error),
}

impl From<NewError> for WriteError
{
	fn from(value: NewError) -> Self
	{
		Self::New(value)
	}
}

impl From<BuildError> for WriteError
{
	fn from(value: BuildError) -> Self
	{
		Self::Build(value)
	}
}

impl fmt::Display for WriteError
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		match self
		{
			Self::New(..) => f.write_str("invalid dump configuration"),
			Self::BlockSize{len, max} => write!(f, "block larger than chunk size ({len}, max {max})"),
			Self::Build(..) => f.write_str("could not build record"),
			Self::Sink(..) => f.write_str("could not write record"),
		}
	}
}

impl Error for WriteError
{
	fn source(&self) -> Option<&(dyn Error + 'static)>
	{
		match self
		{
			Self::New(e) => Some(e),
			Self::BlockSize{..} => None,
			Self::Build(e) => Some(e),
			Self::Sink(e) => Some(e),
		}
	}
}

/// Reads `buff.len()` bytes unless the source ends first.
fn fill<R: Read>(src: &mut R, buff: &mut [u8]) -> io::Result<usize>
{
	let mut pos = 0;
	while pos < buff.len()
	{
		match src.read(&mut buff[pos..])
		{
			Ok(0) => break,
			Ok(n) => pos += n,
			Err(e) if e.kind() == io::ErrorKind::Interrupted => (),
			Err(e) => return Err(e),
		}
	}
	Ok(pos)
}

/// Streams `src` into `dst` as a complete document and hands back the sink.
///
/// Chunks are always filled completely before they're encoded so the output
/// matches [`dump`](crate::record::codec::dump) no matter how the source
/// splits its reads.
pub fn copy<R: Read, W: Write>(family: Family, header: &[u8], exec: u32, chunk_size: usize, mut src: R, dst: W) -> Result<W, CopyError>
{
	// reject a bad exec address before anything is written
	Record::new(family.terminator_kind(), exec, &[]).map_err(WriteError::Build)?;
	let mut out = SrecWrite::new(family, header, chunk_size, dst)?;
	let mut buff = vec![0u8; out.chunk_size()];
	loop
	{
		let len = fill(&mut src, &mut buff).map_err(CopyError::Source)?;
		if len == 0 {break;}
		out.write(&buff[..len])?;
		if len < buff.len() {break;}
	}
	Ok(out.finish(exec)?)
}

/// Streaming counterpart of [`dump16`](crate::record::codec::dump16).
pub fn copy16<R: Read, W: Write>(header: &[u8], exec: u16, src: R, dst: W) -> Result<W, CopyError>
{
	copy(Family::S19, header, u32::from(exec), DEFAULT_CHUNK_SIZE, src, dst)
}

/// Streaming counterpart of [`dump32`](crate::record::codec::dump32).
pub fn copy32<R: Read, W: Write>(header: &[u8], exec: u32, src: R, dst: W) -> Result<W, CopyError>
{
	copy(Family::S37, header, exec, DEFAULT_CHUNK_SIZE, src, dst)
}

#[derive(Debug)]
pub enum CopyError
{
	Write(WriteError),
	Source(io::Error),
}

impl From<WriteError> for CopyError
{
	fn from(value: WriteError) -> Self
	{
		Self::Write(value)
	}
}

impl fmt::Display for CopyError
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		match self
		{
			Self::Write(e) => fmt::Display::fmt(e, f),
			Self::Source(..) => f.write_str("could not read input"),
		}
	}
}

impl Error for CopyError
{
	fn source(&self) -> Option<&(dyn Error + 'static)>
	{
		match self
		{
			Self::Write(e) => e.source(),
			Self::Source(e) => Some(e),
		}
	}
}
