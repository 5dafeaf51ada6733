use clap::Parser;
use imrec::Opts;
use imrec::cli::SubCommandExtend;
use imrec::config::SubCommand;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let opts = Opts::parse();

    match &opts.subcmd {
        SubCommand::Import(config) => config.run(&opts).await,
        SubCommand::Like(config) => config.run(&opts).await,
        SubCommand::Recommend(config) => config.run(&opts).await,
        SubCommand::Show(config) => config.run(&opts).await,
        SubCommand::Export(config) => config.run(&opts).await,
    }
}
