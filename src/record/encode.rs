use crate::record::RecordKind;
use crate::record::build::Record;

/// Appends the text line `S<digit><HEX>\n` for `raw` to `dst`.
pub fn encode_raw(kind: RecordKind, raw: &[u8], dst: &mut String)
{
	dst.reserve(raw.len() * 2 + 3);
	dst.push('S');
	dst.push(char::from(b'0' + kind.digit()));
	dst.push_str(&hex::encode_upper(raw));
	dst.push('\n');
}

pub fn encode(record: &Record<'_>, dst: &mut String)
{
	encode_raw(record.kind(), &record.raw(), dst);
}

pub fn encode_line(record: &Record<'_>) -> String
{
	let mut out = String::new();
	encode(record, &mut out);
	out
}
