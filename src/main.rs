//! Connects to a MySQL server and prints what its initial handshake reveals.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use futures::{FutureExt, TryFutureExt};
use log::{debug, error};
use tokio::net::TcpStream;
use tokio_util::compat::TokioAsyncReadCompatExt;

use mysql_handshake::{Fingerprint, ProbeBuilder, Prober};

/// Fingerprint a MySQL server from its initial handshake packet.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Host name or address of the server.
    #[arg(env = "MYSQL_HOST")]
    host: String,

    /// Port the server listens on.
    #[arg(env = "MYSQL_PORT", default_value_t = 3306)]
    port: u16,

    /// Seconds to wait for the connection and the handshake.
    #[arg(long, default_value_t = 5)]
    timeout: u64,

    /// Also list every capability flag the server advertises.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let target = format!("{}:{}", args.host, args.port);
    println!("{}", "-".repeat(70));

    match scan(&target, Duration::from_secs(args.timeout)).await {
        Ok(fingerprint) => {
            println!("{target}");
            println!("{fingerprint}");

            if args.verbose {
                println!("{}", fingerprint.handshake.capability_flags.describe());
            }

            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn scan(target: &str, deadline: Duration) -> anyhow::Result<Fingerprint> {
    let address = target.to_owned();
    let prober = Prober::new(
        Box::new(move || {
            debug!("connecting to {address}");

            TcpStream::connect(address.clone())
                // the prober reads through futures::AsyncRead
                .map_ok(TokioAsyncReadCompatExt::compat)
                .boxed()
        }),
        ProbeBuilder::new().build(),
    );

    tokio::time::timeout(deadline, prober.fingerprint())
        .await
        .with_context(|| format!("no handshake from {target} within {deadline:?}"))?
        .with_context(|| format!("failed to fingerprint {target}"))
}
