pub mod check;
pub mod resources;
pub mod roll;

use std::io;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rk_engine::{ActorData, RollPipeline, RollRequest, RollStatus};

use crate::host::{LinePrompt, TerminalPresenter, load_config};

/// Run one roll through the pipeline with the terminal collaborators.
fn run_roll(
    request: RollRequest,
    actor: Option<&mut dyn ActorData>,
    seed: Option<u64>,
    config: Option<&Path>,
) -> Result<(), String> {
    let config = load_config(config)?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let stdin = io::stdin();
    let mut prompt = LinePrompt::new(stdin.lock());
    let mut presenter = TerminalPresenter::new(io::stdout());

    let status =
        RollPipeline::new(&config, &mut prompt, &mut presenter, &mut rng).run(request, actor);

    match status {
        RollStatus::Completed(_) | RollStatus::Cancelled => Ok(()),
        RollStatus::Aborted(_) => Err("roll aborted".into()),
        RollStatus::PresentationFailed { .. } => Err("roll was made but not shown".into()),
    }
}
