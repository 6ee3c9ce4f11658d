use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = ruby_api::Args::parse();

	ruby_api::run(args).await
}
