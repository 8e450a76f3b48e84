use clap::Parser;
use release_checker::{release_checker_main, ReleaseCheckerCli};
use std::process::exit;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let args = ReleaseCheckerCli::parse();
    env_logger::builder()
        .filter_level(args.log_level())
        .format_target(false)
        .format_timestamp(None)
        .init();
    match release_checker_main(args).await {
        Ok(_) => {
            exit(0);
        }
        Err(e) => {
            eprintln!("{e}");
            exit(1);
        }
    };
}
