use clap::Parser;

use filebox::config::Config;
use filebox::server;

/// Single-connection HTTP/1.1 file server.
#[derive(Parser, Debug)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// TCP port to listen on
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    port: u16,
}

// SIGPIPE is already ignored by the Rust runtime, so a client hanging up
// mid-write shows up as an EPIPE error instead of killing the process.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load(cli.port);

    tokio::select! {
        res = server::listener::run(&cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_single_port() {
        let cli = Cli::try_parse_from(["filebox", "8080"]).unwrap();
        assert_eq!(cli.port, 8080);
        assert!(Cli::try_parse_from(["filebox", "65535"]).is_ok());
        assert!(Cli::try_parse_from(["filebox", "1"]).is_ok());
    }

    #[test]
    fn rejects_everything_else() {
        let cases: [&[&str]; 8] = [
            &["filebox"],
            &["filebox", "0"],
            &["filebox", "65536"],
            &["filebox", "abc"],
            &["filebox", "80", "81"],
            &["filebox", "--help"],
            &["filebox", "-h"],
            &["filebox", "--version"],
        ];

        for args in cases {
            assert!(Cli::try_parse_from(args).is_err(), "{:?}", args);
        }
    }
}
