//! Olympia entry point
//!
//! Plays a few episodes with random policies and prints the final frame of
//! each. Usage: `olympia [scheme] [episodes] [seed]`.

use olympia::episode::{EpisodeStats, Policy, RandomPolicy, run_episode};
use olympia::render::render_frame;
use olympia::{EnvConfig, ObservationKind};

/// Timestep limit per episode
const MAX_TIMESTEPS: u64 = 1000;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let scheme = args.next().unwrap_or_else(|| "one_v_one".to_string());
    let episodes: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(0);

    let config = EnvConfig {
        scheme,
        seed,
        observation: ObservationKind::Compact,
        ..Default::default()
    };

    let mut env = match config.build() {
        Ok(env) => env,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };
    log::info!("Olympia starting: {} episodes, seed {}", episodes, seed);

    let mut policies: Vec<Box<dyn Policy>> = (0..env.n_agents() as u64)
        .map(|i| Box::new(RandomPolicy::new(seed.wrapping_add(i))) as Box<dyn Policy>)
        .collect();
    let mut stats = EpisodeStats::new();

    for e in 0..episodes {
        let result = match run_episode(&mut env, &mut policies, MAX_TIMESTEPS) {
            Ok(result) => result,
            Err(err) => {
                log::error!("Episode {} failed: {}", e + 1, err);
                std::process::exit(1);
            }
        };
        print!("{}", render_frame(env.snapshot(), env.is_done()));
        println!(
            "Episode {}/{} complete. Ticks: {}, winner: {}",
            e + 1,
            episodes,
            result.ticks,
            result
                .winner
                .map_or_else(|| "none".to_string(), |t| format!("team {}", t + 1))
        );
        stats.record(result);
    }

    println!(
        "Mean episode length: {:.1} ticks; team 1 goals: {}, team 2 goals: {}, cut off: {}",
        stats.mean_ticks(),
        stats.wins(0),
        stats.wins(1),
        stats.cut_offs()
    );
}
