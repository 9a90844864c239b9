use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// config file, defaults to <config dir>/tinymarquee/tinymarquee.ron
    #[arg(long, short)]
    pub config_path: Option<PathBuf>,

    /// text to scroll, overrides the config
    #[arg(long, short)]
    pub text: Option<String>,

    /// scroll speed in pixels per second, overrides the config
    #[arg(long, short)]
    pub speed: Option<f64>,

    /// print the default config and exit
    #[arg(long, default_value_t = false)]
    pub print_default_config: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn overrides() {
        let cli = Cli::parse_from([
            "tinymarquee",
            "-t",
            "hello",
            "--speed",
            "120",
            "-c",
            "/tmp/m.ron",
        ]);
        assert_eq!(cli.text.as_deref(), Some("hello"));
        assert_eq!(cli.speed, Some(120.0));
        assert_eq!(cli.config_path, Some(PathBuf::from("/tmp/m.ron")));
        assert!(!cli.print_default_config);

        let cli = Cli::parse_from(["tinymarquee", "--print-default-config"]);
        assert!(cli.print_default_config);
        assert_eq!(cli.text, None);
    }
}
