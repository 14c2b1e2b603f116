use crate::demo::{
    run_demo, run_market_report, run_negotiate, run_recommend, DemoArgs, MarketArgs,
    NegotiateArgs, RecommendArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use gig_scout::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Gig Scout",
    about = "Score, rank, and price freelance gigs from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank gigs for a freelancer profile and print the top recommendations
    Recommend(RecommendArgs),
    /// Summarize demand, rates, and competition for a set of skills
    Market(MarketArgs),
    /// Plan a rate negotiation from the offered rate to a target rate
    Negotiate(NegotiateArgs),
    /// Walk through ranking, pricing, market, and bidding against the sample catalogue
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Recommend(args) => run_recommend(args),
        Command::Market(args) => run_market_report(args),
        Command::Negotiate(args) => run_negotiate(args),
        Command::Demo(args) => run_demo(args),
    }
}
