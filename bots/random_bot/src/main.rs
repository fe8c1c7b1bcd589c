use clap::Parser;
use hanabi::{Action, HintValue};
use hanabi_bot_utils::{Bot, GameState};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::{debug, info};
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

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, "Seeded random bot");
    let rng = StdRng::seed_from_u64(seed);

    let outcome = RandomBot { rng }.run(&args.name, (args.host.as_str(), args.port))?;
    info!("Game over with score {}: {}", outcome.score, outcome.message);
    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(Targets::new().with_default(level))
        .init();
}

struct RandomBot {
    rng: StdRng,
}

/// Legal actions, grouped by kind, without the ones already rejected.
fn possible_actions(state: &GameState, rejected: &[Action]) -> Vec<Vec<Action>> {
    let hand_size = state.inference().hand_size();
    let plays = (0..hand_size).map(|card_index| Action::Play { card_index });
    let discards = (0..hand_size).map(|card_index| Action::Discard { card_index });
    let mut hints = vec![];
    if state.can_hint() {
        for player in state.relative_player_order() {
            for &card in &player.hand {
                for value in [HintValue::Color(card.color), HintValue::Rank(card.rank)] {
                    let hint = Action::Hint {
                        target: player.name.clone(),
                        value,
                    };
                    if !hints.contains(&hint) {
                        hints.push(hint);
                    }
                }
            }
        }
    }

    [plays.collect(), discards.collect(), hints]
        .into_iter()
        .map(|kind: Vec<Action>| {
            kind.into_iter()
                .filter(|action| !rejected.contains(action))
                .collect::<Vec<_>>()
        })
        .filter(|kind| !kind.is_empty())
        .collect()
}

impl Bot for RandomBot {
    fn play_turn(&mut self, state: &GameState, rejected: &[Action]) -> Action {
        let kinds = possible_actions(state, rejected);
        let action = kinds
            .choose(&mut self.rng)
            .and_then(|kind| kind.choose(&mut self.rng))
            .cloned()
            .unwrap_or(Action::Discard { card_index: 0 });
        debug!(%action, "Picked random action");
        action
    }
}
