use std::io::Read;

use tracing::debug;

use crate::{
	error::ConvertError,
	scanner::Scanner,
	styles::{Color, StyleState},
};

/// CSI terminators for sequences that move the cursor, erase or switch modes. They are read and
/// dropped without touching the output.
const IGNORED_TERMINATORS: &[u8] = b"ABCDEFGHJKXdfhlrsu";

/// What a CSI sequence turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Csi {
	/// `ESC [ ... m` with its parameters, never empty
	Sgr(Vec<u32>),
	/// A recognized sequence that has no effect on the markup
	Ignored,
}

/// Reads a CSI sequence from right after `ESC [` up to and including its terminator.
pub fn parse_csi<R: Read>(scanner: &mut Scanner<R>) -> Result<Csi, ConvertError> {
	let mut params = Vec::new();
	let mut current: Option<u32> = None;

	loop {
		match scanner.expect_byte()? {
			digit @ b'0'..=b'9' => {
				let value = current.unwrap_or(0);
				current = Some(value.saturating_mul(10).saturating_add(u32::from(digit - b'0')));
			},
			b';' => params.extend(current.take()),
			b'm' => {
				params.extend(current.take());
				if params.is_empty() {
					params.push(0);
				}
				return Ok(Csi::Sgr(params));
			},
			b'?' => {
				let terminator = skip_private_mode(scanner)?;
				debug!(terminator = %char::from(terminator), "skipped private mode sequence");
				return Ok(Csi::Ignored);
			},
			byte if IGNORED_TERMINATORS.contains(&byte) => {
				params.extend(current.take());
				debug!(?params, terminator = %char::from(byte), "skipped control sequence");
				return Ok(Csi::Ignored);
			},
			byte => {
				params.extend(current.take());
				return Err(ConvertError::MalformedParameter(format!(
					"invalid terminator {:?} after {params:?}",
					char::from(byte)
				)));
			},
		}
	}
}

/// Private mode parameters (`ESC [ ? 25 h`) are dropped together with their final byte.
fn skip_private_mode<R: Read>(scanner: &mut Scanner<R>) -> Result<u8, ConvertError> {
	loop {
		match scanner.expect_byte()? {
			b'0'..=b'9' | b';' => continue,
			terminator => return Ok(terminator),
		}
	}
}

/// Applies SGR parameters to `style`, left to right.
pub fn apply_sgr(style: &mut StyleState, params: &[u32]) -> Result<(), ConvertError> {
	let mut rest = params;

	while let [code, tail @ ..] = rest {
		rest = tail;

		match *code {
			// Reset all
			0 => style.reset(),

			// Styles
			1 => style.bold = true,
			3 => style.italic = true,
			4 => style.underline = true,
			5 | 6 => style.blink = true,

			// Standard colors
			n @ 30..=37 => style.foreground = Color::Indexed((n - 30) as u8),
			39 => style.foreground = Color::None,
			n @ 40..=47 => style.background = Color::Indexed((n - 40) as u8),
			49 => style.background = Color::None,

			// Bright colors
			n @ 90..=97 => style.foreground = Color::Indexed((n - 90 + 8) as u8),
			n @ 100..=107 => style.background = Color::Indexed((n - 100 + 8) as u8),

			// Extended colors
			code @ (38 | 48) => {
				let (color, tail) = extended_color(rest)?;
				rest = tail;

				if let Some(color) = color {
					if code == 38 {
						style.foreground = color;
					} else {
						style.background = color;
					}
				}
			},

			n => return Err(ConvertError::UnknownAttributeCode(n)),
		}
	}

	Ok(())
}

/// `5;n` or `2;r;g;b` after a 38/48. Values are cut to their low byte. Any other mode is consumed
/// and yields no color.
fn extended_color(params: &[u32]) -> Result<(Option<Color>, &[u32]), ConvertError> {
	let expect_color = || ConvertError::MalformedParameter(String::from("expect color"));

	match params {
		[5, index, tail @ ..] => Ok((Some(Color::Indexed(*index as u8)), tail)),
		[2, r, g, b, tail @ ..] => Ok((Some(Color::Rgb(*r as u8, *g as u8, *b as u8)), tail)),
		[] | [5, ..] | [2, ..] => Err(expect_color()),
		[mode, tail @ ..] => {
			debug!(mode, "ignored extended color mode");
			Ok((None, tail))
		},
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn parse(input: &str) -> Result<Csi, ConvertError> {
		parse_csi(&mut Scanner::new(input.as_bytes()))
	}

	fn apply(params: &[u32]) -> Result<StyleState, ConvertError> {
		let mut style = StyleState::default();
		apply_sgr(&mut style, params)?;
		Ok(style)
	}

	#[test]
	fn parse_params_test() {
		assert_eq!(parse("m").unwrap(), Csi::Sgr(vec![0]));
		assert_eq!(parse("0m").unwrap(), Csi::Sgr(vec![0]));
		assert_eq!(parse("34m").unwrap(), Csi::Sgr(vec![34]));
		assert_eq!(parse("39;49m").unwrap(), Csi::Sgr(vec![39, 49]));
		assert_eq!(parse("38;2;255;50;0m").unwrap(), Csi::Sgr(vec![38, 2, 255, 50, 0]));
	}

	#[test]
	fn parse_empty_params_test() {
		// a `;` without digits inserts nothing
		assert_eq!(parse("1;;3m").unwrap(), Csi::Sgr(vec![1, 3]));
		assert_eq!(parse(";m").unwrap(), Csi::Sgr(vec![0]));
		assert_eq!(parse(";;1;m").unwrap(), Csi::Sgr(vec![1]));
	}

	#[test]
	fn parse_large_value_test() {
		assert_eq!(parse("99999999999999999999m").unwrap(), Csi::Sgr(vec![u32::MAX]));
	}

	#[test]
	fn parse_leaves_rest_test() {
		let mut scanner = Scanner::new(&b"1mtext"[..]);
		assert_eq!(parse_csi(&mut scanner).unwrap(), Csi::Sgr(vec![1]));
		assert_eq!(scanner.next_byte().unwrap(), Some(b't'));
	}

	#[test]
	fn parse_ignored_test() {
		assert_eq!(parse("?25h").unwrap(), Csi::Ignored);
		assert_eq!(parse("?1049;1l").unwrap(), Csi::Ignored);
		assert_eq!(parse("2J").unwrap(), Csi::Ignored);
		assert_eq!(parse("10;20H").unwrap(), Csi::Ignored);
		assert_eq!(parse("K").unwrap(), Csi::Ignored);
		assert_eq!(parse("5X").unwrap(), Csi::Ignored);
		assert_eq!(parse("3d").unwrap(), Csi::Ignored);
		assert_eq!(parse("1;24r").unwrap(), Csi::Ignored);
		assert_eq!(parse("4l").unwrap(), Csi::Ignored);
	}

	#[test]
	fn parse_private_mode_consumes_terminator_test() {
		let mut scanner = Scanner::new(&b"?25lok"[..]);
		assert_eq!(parse_csi(&mut scanner).unwrap(), Csi::Ignored);
		assert_eq!(scanner.next_byte().unwrap(), Some(b'o'));
	}

	#[test]
	fn parse_errors_test() {
		assert!(matches!(parse("1z"), Err(ConvertError::MalformedParameter(_))));
		assert!(matches!(parse("1:2m"), Err(ConvertError::MalformedParameter(_))));
		assert!(matches!(parse("31"), Err(ConvertError::UnexpectedEof)));
		assert!(matches!(parse("?25"), Err(ConvertError::UnexpectedEof)));
	}

	#[test]
	fn apply_styles_test() {
		assert_eq!(apply(&[0]).unwrap(), StyleState::default());
		assert_eq!(
			apply(&[1, 3, 4]).unwrap(),
			StyleState {
				bold: true,
				italic: true,
				underline: true,
				..StyleState::default()
			}
		);
		assert_eq!(
			apply(&[5]).unwrap(),
			StyleState {
				blink: true,
				..StyleState::default()
			}
		);
		assert_eq!(apply(&[6]).unwrap(), apply(&[5]).unwrap());
		assert_eq!(apply(&[1, 31, 0]).unwrap(), StyleState::default());
		assert_eq!(apply(&[0, 0]).unwrap(), StyleState::default());
	}

	#[test]
	fn apply_standard_colors_test() {
		for n in 30..=37 {
			assert_eq!(apply(&[n]).unwrap().foreground, Color::Indexed((n - 30) as u8));
		}
		for n in 40..=47 {
			assert_eq!(apply(&[n]).unwrap().background, Color::Indexed((n - 40) as u8));
		}
		for n in 90..=97 {
			assert_eq!(apply(&[n]).unwrap().foreground, Color::Indexed((n - 82) as u8));
		}
		for n in 100..=107 {
			assert_eq!(apply(&[n]).unwrap().background, Color::Indexed((n - 92) as u8));
		}

		assert_eq!(apply(&[34, 43, 39]).unwrap().foreground, Color::None);
		assert_eq!(apply(&[34, 43, 39]).unwrap().background, Color::Indexed(3));
		assert_eq!(apply(&[34, 43, 39, 49]).unwrap(), StyleState::default());
	}

	#[test]
	fn apply_extended_colors_test() {
		assert_eq!(apply(&[38, 5, 200]).unwrap().foreground, Color::Indexed(200));
		assert_eq!(apply(&[48, 5, 16]).unwrap().background, Color::Indexed(16));
		assert_eq!(apply(&[38, 2, 10, 20, 30]).unwrap().foreground, Color::Rgb(10, 20, 30));
		assert_eq!(apply(&[48, 2, 255, 0, 128]).unwrap().background, Color::Rgb(255, 0, 128));

		// parameters after the color keep applying
		assert_eq!(
			apply(&[38, 2, 1, 2, 3, 1, 48, 5, 9]).unwrap(),
			StyleState {
				bold: true,
				foreground: Color::Rgb(1, 2, 3),
				background: Color::Indexed(9),
				..StyleState::default()
			}
		);

		// out of range values keep their low byte
		assert_eq!(apply(&[38, 5, 300]).unwrap().foreground, Color::Indexed(44));
		assert_eq!(apply(&[38, 2, 256, 257, 511]).unwrap().foreground, Color::Rgb(0, 1, 255));

		// unknown mode is consumed and does nothing
		assert_eq!(apply(&[38, 3, 1]).unwrap(), apply(&[1]).unwrap());
	}

	#[test]
	fn apply_errors_test() {
		assert!(matches!(apply(&[38]), Err(ConvertError::MalformedParameter(_))));
		assert!(matches!(apply(&[48, 5]), Err(ConvertError::MalformedParameter(_))));
		assert!(matches!(apply(&[38, 2, 1, 2]), Err(ConvertError::MalformedParameter(_))));
		assert!(matches!(apply(&[2]), Err(ConvertError::UnknownAttributeCode(2))));
		assert!(matches!(apply(&[1, 22]), Err(ConvertError::UnknownAttributeCode(22))));
		assert!(matches!(apply(&[108]), Err(ConvertError::UnknownAttributeCode(108))));
	}
}
