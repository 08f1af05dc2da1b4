use std::io::{BufRead, BufReader, ErrorKind, Read};

use crate::error::ConvertError;

/// Pulls the input one byte at a time on top of a buffered reader.
pub struct Scanner<R> {
	reader: BufReader<R>,
}

impl<R: Read> Scanner<R> {
	pub fn new(input: R) -> Self {
		Self {
			reader: BufReader::new(input),
		}
	}

	/// Next byte, `None` at a clean end of input.
	pub fn next_byte(&mut self) -> Result<Option<u8>, ConvertError> {
		loop {
			let byte = match self.reader.fill_buf() {
				Ok(buffer) => buffer.first().copied(),
				Err(error) if error.kind() == ErrorKind::Interrupted => continue,
				Err(error) => return Err(error.into()),
			};

			if byte.is_some() {
				self.reader.consume(1);
			}
			return Ok(byte);
		}
	}

	/// Next byte of a sequence that must not end here.
	pub fn expect_byte(&mut self) -> Result<u8, ConvertError> {
		self.next_byte()?.ok_or(ConvertError::UnexpectedEof)
	}

	/// Reads the continuation bytes of a multi-byte UTF-8 character whose `lead` byte was already
	/// taken and returns the complete, validated encoding.
	pub fn read_rune(&mut self, lead: u8) -> Result<([u8; 4], usize), ConvertError> {
		let width = match lead {
			0xc2..=0xdf => 2,
			0xe0..=0xef => 3,
			0xf0..=0xf4 => 4,
			_ => return Err(ConvertError::InvalidEncoding(lead)),
		};

		let mut rune = [lead, 0, 0, 0];
		for slot in rune.iter_mut().take(width).skip(1) {
			*slot = self.next_byte()?.ok_or(ConvertError::InvalidEncoding(lead))?;
		}

		std::str::from_utf8(&rune[..width]).map_err(|_| ConvertError::InvalidEncoding(lead))?;

		Ok((rune, width))
	}
}
