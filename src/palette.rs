//! The 256 color lookup table behind indexed colors.
//!
//! See https://en.wikipedia.org/wiki/ANSI_escape_code#8-bit

use std::sync::LazyLock;

/// 0-7 standard and 8-15 high-intensity colors (ubuntu version)
const FIXED: [&str; 16] = [
	"rgb(1,1,1)",
	"rgb(222,56,43)",
	"rgb(57,181,74)",
	"rgb(255,199,6)",
	"rgb(0,111,184)",
	"rgb(118,38,113)",
	"rgb(44,181,233)",
	"rgb(204,204,204)",
	"rgb(128,128,128)",
	"rgb(255,0,0)",
	"rgb(0,255,0)",
	"rgb(255,255,0)",
	"rgb(0,0,255)",
	"rgb(255,0,255)",
	"rgb(0,255,255)",
	"rgb(255,255,255)",
];

/// Channel intensity for each of the six cube steps
const CUBE_STEPS: [u8; 6] = [0x00, 0x57, 0x87, 0xaf, 0xd7, 0xff];

const CUBE_START: usize = 16;
const GRAY_START: usize = 232;

static PALETTE: LazyLock<[String; 256]> = LazyLock::new(|| std::array::from_fn(entry));

fn entry(index: usize) -> String {
	match index {
		0..CUBE_START => FIXED[index].to_string(),
		CUBE_START..GRAY_START => {
			let n = index - CUBE_START;
			hex(CUBE_STEPS[n / 36], CUBE_STEPS[(n / 6) % 6], CUBE_STEPS[n % 6])
		},
		_ => {
			let gray = (8 + 10 * (index - GRAY_START)) as u8;
			hex(gray, gray, gray)
		},
	}
}

/// `#rrggbb`, lowercase and zero padded
pub fn hex(r: u8, g: u8, b: u8) -> String {
	format!("#{r:02x}{g:02x}{b:02x}")
}

/// The whole table, built on first use.
pub fn palette() -> &'static [String; 256] {
	&PALETTE
}

/// CSS color for a palette index.
pub fn css(index: u8) -> &'static str {
	&PALETTE[index as usize]
}
