//! SurfsUp CLI - serve and build the Hawaii weather observation API.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "surfsup",
    version,
    about = "Read-only JSON API over historical Hawaii weather observations"
)]
struct Cli {
    #[command(subcommand)]
    command: surfsup_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    surfsup_cmd::run(cli.command).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use surfsup_cmd::Command;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "surfsup",
            "serve",
            "--database",
            "/data/hawaii.sqlite",
            "--bind",
            "0.0.0.0:8080",
            "--pool-size",
            "8",
        ])
        .unwrap();
        match cli.command {
            Command::Serve {
                database,
                bind,
                pool_size,
            } => {
                assert_eq!(database.to_str(), Some("/data/hawaii.sqlite"));
                assert_eq!(bind.port(), 8080);
                assert_eq!(pool_size, 8);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn import_requires_both_csvs() {
        let missing = Cli::try_parse_from(["surfsup", "import", "--stations", "s.csv"]);
        assert!(missing.is_err());
    }
}
