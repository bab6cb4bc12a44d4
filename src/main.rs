use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = gmctl::cli::Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = gmctl::run(cli).await {
        let envelope = gmctl::output::error_envelope(&err);
        eprintln!("{envelope}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
