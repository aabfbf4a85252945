use std::path::PathBuf;

use clap::{Arg, Command};

#[tokio::main]
async fn main() {
    let matches = Command::new("Fin4 Client")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file (.toml format)"),
        )
        .get_matches();

    let custom_config_path = matches.get_one::<String>("config").map(PathBuf::from);

    if let Err(error) = fin4_client::run(custom_config_path.as_deref()).await {
        eprintln!("fin4-client failed: {error}");
        std::process::exit(1);
    }
}
