use std::fs::{self, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use srec::{copy, sr_path, Family, DEFAULT_CHUNK_SIZE};

macro_rules!print_err
{
	($err:ident, $($print:expr),+) =>
	{
		{
			use std::error::Error;
			use std::io::Write;
			let mut stderr = std::io::stderr().lock();
			let _ = write!(stderr, $($print),+);
			let _ = write!(stderr, ": {}\n", $err);
			let mut source = $err.source();
			while let Some(src) = source
			{
				let _ = write!(stderr, "\tsource: {src}\n");
				source = src.source();
			}
		}
	};
}

struct Options
{
	family: Family,
	header: Vec<u8>,
	exec: u32,
	chunk_size: usize,
	paths: Vec<PathBuf>,
}

fn parse_number(arg: &str) -> Option<u32>
{
	match arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X"))
	{
		Some(hex) => u32::from_str_radix(hex, 16).ok(),
		None => arg.parse().ok(),
	}
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String>
{
	let mut opts = Options
	{
		family: Family::S19,
		header: b"HDR".to_vec(),
		exec: 0,
		chunk_size: DEFAULT_CHUNK_SIZE,
		paths: Vec::new(),
	};
	while let Some(arg) = args.next()
	{
		match arg.as_str()
		{
			"-32" => opts.family = Family::S37,
			"-header" =>
			{
				let Some(val) = args.next() else {return Err("missing value for -header".to_owned())};
				opts.header = val.into_bytes();
			},
			"-exec" =>
			{
				let Some(val) = args.next() else {return Err("missing value for -exec".to_owned())};
				opts.exec = parse_number(&val).ok_or_else(|| format!("invalid exec address {val:?}"))?;
			},
			"-chunk" =>
			{
				let Some(val) = args.next() else {return Err("missing value for -chunk".to_owned())};
				opts.chunk_size = val.parse().map_err(|_| format!("invalid chunk size {val:?}"))?;
			},
			"--" =>
			{
				opts.paths.extend(args.by_ref().map(PathBuf::from));
			},
			flag if flag.starts_with('-') && flag.len() > 1 => return Err(format!("unsupported flag {flag:?}")),
			_ => opts.paths.push(PathBuf::from(&arg)),
		}
	}
	if opts.paths.is_empty()
	{
		return Err("missing input file argument".to_owned());
	}
	Ok(opts)
}

fn dump_file(path: &Path, opts: &Options) -> Result<PathBuf, Box<dyn std::error::Error>>
{
	let out = sr_path(path);
	let temp = out.with_extension("sr.tmp");
	let fi = OpenOptions::new().read(true).open(path)?;
	let fo = OpenOptions::new().write(true).create(true).truncate(true).open(&temp)?;
	let result = copy(opts.family, &opts.header, opts.exec, opts.chunk_size, BufReader::new(fi), BufWriter::new(fo));
	match result
	{
		Ok(dst) =>
		{
			drop(dst.into_inner().map_err(|e| e.into_error())?);
			fs::rename(&temp, &out)?;
			Ok(out)
		},
		Err(e) =>
		{
			let _ = fs::remove_file(&temp);
			Err(e.into())
		},
	}
}

pub fn main() -> ExitCode
{
	let mut args = std::env::args();
	assert!(args.next().is_some());
	let opts = match parse_args(args)
	{
		Ok(opts) => opts,
		Err(msg) =>
		{
			eprintln!("{msg}");
			eprintln!("usage: bin2sr [-32] [-header TEXT] [-exec ADDR] [-chunk SIZE] FILE...");
			return ExitCode::FAILURE;
		},
	};
	for path in opts.paths.iter()
	{
		if let Err(e) = dump_file(path, &opts)
		{
			print_err!(e, "Could not convert {}", path.display());
			return ExitCode::FAILURE;
		}
	}
	ExitCode::SUCCESS
}
