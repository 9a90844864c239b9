use anyhow::Result;
use clap::Parser;
use tinymarquee::{app, cli::Cli, config};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    if cli.print_default_config {
        println!("{}", config::default_config_string()?);
        return Ok(());
    }
    let config = config::get_config(cli.config_path.as_deref()).with_cli(&cli);
    app::run(config)
}
