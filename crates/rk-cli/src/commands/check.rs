use std::path::PathBuf;

use clap::{Args, ValueEnum};
use rk_engine::{Element, RollRequest};

use crate::host::ActorFile;

/// Kinds of roll made for an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CheckKind {
    /// (trait + rank) keep trait
    Skill,
    /// ring keep ring
    Ring,
    /// trait keep trait
    Trait,
    /// weapon damage, --roll keep --keep
    Weapon,
    /// generic action, --roll keep --keep
    Generic,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Kind of roll
    pub kind: CheckKind,

    /// Actor JSON file (spent resources are written back)
    #[arg(short, long)]
    pub actor: PathBuf,

    /// Skill, element, trait, weapon or action name
    #[arg(short, long)]
    pub key: String,

    /// Trait paired with a skill roll
    #[arg(long = "trait")]
    pub trait_key: Option<String>,

    /// Trait or ring value
    #[arg(long, default_value = "0")]
    pub value: u32,

    /// Skill rank (0 is unskilled)
    #[arg(long, default_value = "0")]
    pub rank: u32,

    /// Dice rolled for weapon and generic rolls
    #[arg(long, default_value = "0")]
    pub roll: u32,

    /// Dice kept for weapon and generic rolls
    #[arg(long, default_value = "0")]
    pub keep: u32,

    /// Target number
    #[arg(long, default_value = "0")]
    pub tn: u32,

    /// Declared raises (+5 TN each)
    #[arg(long, default_value = "0")]
    pub raises: u32,

    /// Spend a void point for +1k1
    #[arg(long)]
    pub void: bool,

    /// Spend a spell slot of the ring's element
    #[arg(long)]
    pub spell_slot: bool,

    /// Add the actor's wound penalty to the TN
    #[arg(long)]
    pub penalty: bool,

    /// The actor has an emphasis in this skill (reroll 1s once)
    #[arg(long)]
    pub emphasis: bool,

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

pub fn run(args: &CheckArgs) -> Result<(), String> {
    let request = build_request(args)?;
    let mut actor = ActorFile::open(&args.actor)?;

    let result = super::run_roll(request, Some(&mut actor), args.seed, args.config.as_deref());
    actor.finish()?;
    result
}

fn build_request(args: &CheckArgs) -> Result<RollRequest, String> {
    let mut request = match args.kind {
        CheckKind::Skill => {
            let trait_key = args
                .trait_key
                .as_deref()
                .ok_or("skill rolls need --trait")?;
            RollRequest::skill(&args.key, trait_key, args.value, args.rank)
        }
        CheckKind::Ring => {
            let element = Element::from_name(&args.key)
                .ok_or_else(|| format!("unknown element: \"{}\"", args.key))?;
            RollRequest::ring(element, args.value)
        }
        CheckKind::Trait => RollRequest::trait_roll(&args.key, args.value),
        CheckKind::Weapon => RollRequest::weapon(&args.key, args.roll, args.keep),
        CheckKind::Generic => RollRequest::generic(&args.key, args.roll, args.keep),
    }
    .with_target(args.tn, args.raises);

    if args.void {
        request = request.spending_primary();
    }
    if args.spell_slot {
        request = request.spending_elemental();
    }
    if args.penalty {
        request = request.with_penalty(None);
    }
    if args.emphasis {
        request = request.with_emphasis();
    }
    if args.attack {
        request = request.as_attack();
    }
    if args.prompt {
        request = request.toggling_prompt();
    }
    Ok(request)
}
