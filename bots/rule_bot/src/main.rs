use clap::Parser;
use hanabi_bot_utils::Bot;
use rule_bot::{RuleBot, RulePolicy, ALMOST_SAFE_THRESHOLD};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Player name announced to the server
    name: String,

    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(short, long, default_value_t = 1024)]
    port: u16,

    /// Minimum chance of being playable for a card to be played without a full hint
    #[arg(short, long, default_value_t = ALMOST_SAFE_THRESHOLD)]
    threshold: f64,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let mut bot = RuleBot::new(RulePolicy::with_threshold(args.threshold));
    let outcome = bot.run(&args.name, (args.host.as_str(), args.port))?;
    info!("Game over with score {}: {}", outcome.score, outcome.message);
    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
