use std::path::PathBuf;

use clap::Args;
use rk_engine::RollRequest;

#[derive(Args)]
pub struct RollArgs {
    /// Dice notation
    pub notation: String,

    /// Heading shown with the result
    #[arg(short, long, default_value = "roll")]
    pub label: String,

    /// Target number
    #[arg(long, default_value = "0")]
    pub tn: u32,

    /// Declared raises (+5 TN each)
    #[arg(long, default_value = "0")]
    pub raises: u32,

    /// Treat the roll as an attack (a failure reads as a miss)
    #[arg(long)]
    pub attack: bool,

    /// Invert the configured modifier-prompt default
    #[arg(long)]
    pub prompt: bool,

    /// RNG seed for a reproducible roll
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &RollArgs) -> Result<(), String> {
    let mut request = RollRequest::from_notation(&args.label, &args.notation)
        .map_err(|e| e.to_string())?
        .with_target(args.tn, args.raises);
    if args.attack {
        request = request.as_attack();
    }
    if args.prompt {
        request = request.toggling_prompt();
    }

    super::run_roll(request, None, args.seed, args.config.as_deref())
}
