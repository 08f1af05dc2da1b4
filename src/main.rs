use std::{
	fs::{self, File},
	io::{self, BufWriter, Read, Write},
	path::PathBuf,
};

use aes2htm::{Converter, ConverterOptions, document};
use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

/// Convert terminal output with ANSI colors into HTML
#[derive(Debug, Parser)]
#[command(name = "aes2htm", version, about)]
struct Cli {
	/// File to convert, standard input when omitted
	file: Option<PathBuf>,

	/// Wrap the output in a complete HTML document
	#[arg(short, long, default_value_t = false)]
	full: bool,

	/// Document title used with --full
	#[arg(long, default_value = document::DEFAULT_TITLE)]
	title: String,

	/// Stylesheet the document links to when used with --full
	#[arg(long, value_name = "HREF", default_value = document::DEFAULT_STYLESHEET)]
	stylesheet: String,

	/// Write the companion stylesheet to this path
	#[arg(long, value_name = "PATH")]
	write_stylesheet: Option<PathBuf>,

	/// Close spans still open at the end of the input
	#[arg(long, default_value_t = false)]
	close_spans: bool,

	/// Enable debug logging
	#[arg(short, long, default_value_t = false)]
	debug: bool,
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	tracing_subscriber::fmt()
		.with_writer(io::stderr)
		.with_max_level(if cli.debug {
			tracing::Level::DEBUG
		} else {
			tracing::Level::WARN
		})
		.init();

	if let Some(path) = &cli.write_stylesheet {
		fs::write(path, document::stylesheet())
			.with_context(|| format!("Failed to write stylesheet to {}", path.display()))?;
		info!(path = %path.display(), "wrote stylesheet");
	}

	let input: Box<dyn Read> = match &cli.file {
		Some(path) => {
			debug!(path = %path.display(), "reading file");
			Box::new(File::open(path).with_context(|| format!("Failed to open {}", path.display()))?)
		},
		None => {
			debug!("reading standard input");
			Box::new(io::stdin().lock())
		},
	};

	let mut out = BufWriter::new(io::stdout().lock());

	if cli.full {
		out.write_all(document::header(&cli.title, &cli.stylesheet).as_bytes())?;
	}

	let options = ConverterOptions {
		close_at_end: cli.close_spans,
	};
	let mut converter = Converter::with_options(&mut out, options);
	let result = converter.convert(input);
	let open_tags = converter.open_tags();

	// keep what was converted before a failure
	out.flush()?;
	result.context("Conversion failed")?;

	if open_tags > 0 {
		debug!(open_tags, "input ended with open spans");
	}

	if cli.full {
		out.write_all(document::footer().as_bytes())?;
	}
	out.flush()?;

	Ok(())
}
