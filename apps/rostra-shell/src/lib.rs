//! Interactive stand-in for the presentation layer.
//!
//! The orchestration core is a library; this shell gives it a consumer.
//! Plain input narrows the live filter, `:rec <text>` asks the matcher for
//! a recommendation, `:reset` and `:clear` undo either side.

pub mod shell;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, rename_all = "kebab")]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = rostra_config::load(&args.config)?;
	let filter = EnvFilter::new(config.service.log_level.clone());

	tracing_subscriber::fmt().with_env_filter(filter).init();

	shell::run_shell(&config).await
}
