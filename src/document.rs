//! Standalone document shell around a converted fragment, plus the stylesheet it links to.

use crate::styles::BLINK_CLASS;

pub const DEFAULT_TITLE: &str = "aes2htm";
pub const DEFAULT_STYLESHEET: &str = "aes2htm.css";

pub fn header(title: &str, stylesheet: &str) -> String {
	format!(
		"<!DOCTYPE html>\n\
		<html>\n\
		<head>\n\
		<meta charset=\"utf-8\">\n\
		<title>{}</title>\n\
		<link rel=\"stylesheet\" href=\"{}\">\n\
		</head>\n\
		<body>\n\
		<pre>",
		escape_attribute(title),
		escape_attribute(stylesheet)
	)
}

pub fn footer() -> &'static str {
	"</pre>\n</body>\n</html>\n"
}

/// Rules the converted markup relies on
pub fn stylesheet() -> String {
	format!(
		".{BLINK_CLASS} {{\n\
		\tanimation: {BLINK_CLASS} 1s steps(1, end) infinite;\n\
		}}\n\
		\n\
		@keyframes {BLINK_CLASS} {{\n\
		\t50% {{\n\
		\t\tvisibility: hidden;\n\
		\t}}\n\
		}}\n"
	)
}

fn escape_attribute(value: &str) -> String {
	let mut escaped = String::with_capacity(value.len());

	for c in value.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			_ => escaped.push(c),
		}
	}

	escaped
}
