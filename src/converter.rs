use std::io::{Read, Write};

use tracing::debug;

use crate::{
	emitter::SpanEmitter,
	error::ConvertError,
	parser::{self, Csi},
	scanner::Scanner,
	styles::StyleState,
};

const ESC: u8 = 0x1b;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConverterOptions {
	/// Close spans still open when the input ends. Off by default, in which case trailing
	/// attributes stay open unless the input resets them.
	pub close_at_end: bool,
}

/// Turns a byte stream with SGR escape sequences into HTML written to `out`.
pub struct Converter<W> {
	out: W,
	options: ConverterOptions,
	style: StyleState,
	emitter: SpanEmitter,
}

impl<W: Write> Converter<W> {
	pub fn new(out: W) -> Self {
		Self::with_options(out, ConverterOptions::default())
	}

	pub fn with_options(out: W, options: ConverterOptions) -> Self {
		Self {
			out,
			options,
			style: StyleState::default(),
			emitter: SpanEmitter::default(),
		}
	}

	/// Spans currently open in the output
	pub fn open_tags(&self) -> usize {
		self.emitter.open_tags()
	}

	pub fn into_inner(self) -> W {
		self.out
	}

	/// Converts `input` until it ends. Style and span count start from scratch on every call.
	pub fn convert<R: Read>(&mut self, input: R) -> Result<(), ConvertError> {
		let mut scanner = Scanner::new(input);

		self.style.reset();
		self.emitter = SpanEmitter::default();

		while let Some(byte) = scanner.next_byte()? {
			match byte {
				ESC => self.escape(&mut scanner)?,
				b'<' => self.out.write_all(b"&lt;")?,
				b'>' => self.out.write_all(b"&gt;")?,
				0..0x80 => self.out.write_all(&[byte])?,
				lead => {
					let (rune, width) = scanner.read_rune(lead)?;
					self.out.write_all(&rune[..width])?;
				},
			}
		}

		if self.options.close_at_end {
			self.emitter.close_all(&mut self.out)?;
		}

		Ok(())
	}

	fn escape<R: Read>(&mut self, scanner: &mut Scanner<R>) -> Result<(), ConvertError> {
		match scanner.expect_byte()? {
			b'[' => self.control_sequence(scanner),
			b'=' => {
				debug!("skipped application keypad");
				Ok(())
			},
			b'(' => {
				let charset = scanner.expect_byte()?;
				debug!(charset = %char::from(charset), "skipped charset designation");
				Ok(())
			},
			byte => Err(ConvertError::MalformedEscape(byte)),
		}
	}

	fn control_sequence<R: Read>(&mut self, scanner: &mut Scanner<R>) -> Result<(), ConvertError> {
		let previous = self.style;

		match parser::parse_csi(scanner)? {
			Csi::Sgr(params) => parser::apply_sgr(&mut self.style, &params)?,
			Csi::Ignored => return Ok(()),
		}

		self.emitter.transition(&mut self.out, &previous, &self.style)?;

		Ok(())
	}
}

/// Converts everything from `input` into `output`.
pub fn convert<R: Read, W: Write>(input: R, output: W) -> Result<(), ConvertError> {
	Converter::new(output).convert(input)
}

/// Converts a string into an HTML fragment.
pub fn convert_str(input: &str) -> Result<String, ConvertError> {
	let mut converter = Converter::new(Vec::with_capacity(input.len()));
	converter.convert(input.as_bytes())?;

	// input was valid UTF-8 and only ASCII markup is added to it
	Ok(String::from_utf8_lossy(&converter.into_inner()).into_owned())
}
