use clap::Parser;
use seqrep::cli::{Args, Commands};
use seqrep::pipelines::aggregate::run_aggregate;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match args.command {
        Commands::Aggregate {
            input,
            output,
            ignore_samples,
        } => {
            if let Err(err) = run_aggregate(&input, &output, &ignore_samples) {
                log::error!("{err}");
                std::process::exit(1);
            }
        }
    }
}
