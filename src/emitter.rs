use std::io::Write;

use tracing::trace;

use crate::styles::StyleState;

const CLOSE_TAG: &str = "</span>";

/// Keeps the span markup well nested while attributes come and go.
///
/// Every open span carries the attributes added since its parent opened, so the markup is a
/// stack that only grows while attributes are added. Once an attribute is removed or replaced
/// the whole stack is closed and a single span with the complete state takes its place. Since
/// spans are always closed all together from the innermost outward, a count is all that has to
/// be tracked.
#[derive(Debug, Default)]
pub struct SpanEmitter {
	open_tags: usize,
}

impl SpanEmitter {
	pub fn open_tags(&self) -> usize {
		self.open_tags
	}

	/// Writes whatever markup moves the output from `previous` to `current`.
	pub fn transition<W: Write>(&mut self, out: &mut W, previous: &StyleState, current: &StyleState) -> std::io::Result<()> {
		if current == previous {
			return Ok(());
		}

		let mut enclosing = *previous;
		if current.closes(previous) {
			self.close_all(out)?;
			enclosing = StyleState::default();
		}

		if !current.is_empty() {
			out.write_all(current.to_html(&enclosing).as_bytes())?;
			self.open_tags += 1;
			trace!(open_tags = self.open_tags, "opened span");
		}

		Ok(())
	}

	/// Closes every open span.
	pub fn close_all<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
		if self.open_tags > 0 {
			out.write_all(CLOSE_TAG.repeat(self.open_tags).as_bytes())?;
			trace!(closed = self.open_tags, "unwound spans");
		}
		self.open_tags = 0;

		Ok(())
	}
}
