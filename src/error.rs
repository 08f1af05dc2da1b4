//! Conversion errors.

/// Everything that can abort a conversion. None of these are recovered from; the first one ends
/// the run and whatever was written to the sink so far stays there.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
	#[error("Unhandled byte after escape: {0:#04x}")]
	MalformedEscape(u8),

	#[error("Malformed parameter: {0}")]
	MalformedParameter(String),

	#[error("Invalid code: {0}")]
	UnknownAttributeCode(u32),

	#[error("Invalid UTF-8 sequence starting with byte {0:#04x}")]
	InvalidEncoding(u8),

	#[error("Input ended inside an escape sequence")]
	UnexpectedEof,

	#[error("I/O failure: {0}")]
	Io(#[from] std::io::Error),
}
