use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	rostra_shell::run(rostra_shell::Args::parse()).await
}
