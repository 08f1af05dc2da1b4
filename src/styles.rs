use crate::palette;

/// CSS class carried by spans with blink on. The rule itself lives in the companion stylesheet.
pub const BLINK_CLASS: &str = "aes2htm-blink";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
	#[default]
	None,
	/// 256-color palette, also used for the 16 standard colors
	Indexed(u8),
	/// True color RGB
	Rgb(u8, u8, u8),
}

impl Color {
	pub fn is_set(&self) -> bool {
		!matches!(self, Color::None)
	}

	/// The CSS value for this color, `None` when no color is set.
	pub fn css(&self) -> Option<String> {
		match self {
			Color::None => None,
			Color::Indexed(index) => Some(palette::css(*index).to_string()),
			Color::Rgb(r, g, b) => Some(palette::hex(*r, *g, *b)),
		}
	}
}

/// The attributes in effect at a point of the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleState {
	pub bold: bool,
	pub italic: bool,
	pub underline: bool,
	pub blink: bool,
	pub foreground: Color,
	pub background: Color,
}

impl StyleState {
	pub fn reset(&mut self) {
		*self = Self::default();
	}

	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}

	/// True when an attribute that was on in `previous` is now off or carries another value, which
	/// means the spans opened so far no longer describe this state.
	pub fn closes(&self, previous: &StyleState) -> bool {
		let color_dropped = |now: Color, before: Color| before.is_set() && now != before;

		previous.bold && !self.bold
			|| previous.italic && !self.italic
			|| previous.underline && !self.underline
			|| previous.blink && !self.blink
			|| color_dropped(self.foreground, previous.foreground)
			|| color_dropped(self.background, previous.background)
	}

	/// Opening tag for this state nested inside `enclosing`. Flags are always written, colors only
	/// when the enclosing span doesn't already carry them.
	pub fn to_html(&self, enclosing: &StyleState) -> String {
		let mut html = String::with_capacity(96);

		html.push_str("<span style=\"");

		if self.bold {
			html.push_str("font-weight:bold;");
		}

		if self.italic {
			html.push_str("font-style:italic;");
		}

		if self.underline {
			html.push_str("text-decoration:underline;");
		}

		if let Some(color) = Self::changed_css(self.foreground, enclosing.foreground) {
			html.push_str("color:");
			html.push_str(&color);
			html.push(';');
		}

		if let Some(color) = Self::changed_css(self.background, enclosing.background) {
			html.push_str("background-color:");
			html.push_str(&color);
			html.push(';');
		}

		html.push('"');

		if self.blink {
			html.push_str(" class=\"");
			html.push_str(BLINK_CLASS);
			html.push('"');
		}

		html.push('>');
		html
	}

	fn changed_css(color: Color, enclosing: Color) -> Option<String> {
		if color == enclosing { None } else { color.css() }
	}
}
