//! Terminal implementations of the engine's collaborators.
//!
//! [`ActorFile`] writes resource spends straight back to the actor's JSON
//! file, [`LinePrompt`] reads modifiers from one input line, and
//! [`TerminalPresenter`] prints finished rolls.

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use rk_engine::bonus::BonusSet;
use rk_engine::pipeline::PromptFields;
use rk_engine::sheet::BonusTable;
use rk_engine::{
    Actor, ActorData, EngineConfig, ModifierPrompt, OutcomeLabel, Presentation, Presenter,
    PromptAnswers, PromptResponse, ResourceKind, Stance,
};

/// Load an actor from a JSON file.
pub fn load_actor(path: &Path) -> Result<Actor, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read actor {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("invalid actor {}: {e}", path.display()))
}

/// Load the engine configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, String> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("invalid config {}: {e}", path.display()))
}

/// An actor backed by a JSON file. Resource writes are saved immediately.
pub struct ActorFile {
    path: PathBuf,
    actor: Actor,
    write_error: Option<String>,
}

impl ActorFile {
    /// Open an actor file.
    pub fn open(path: &Path) -> Result<Self, String> {
        Ok(Self {
            path: path.to_path_buf(),
            actor: load_actor(path)?,
            write_error: None,
        })
    }

    /// Report the first failed write, if any.
    pub fn finish(self) -> Result<Actor, String> {
        match self.write_error {
            Some(e) => Err(e),
            None => Ok(self.actor),
        }
    }

    fn save(&self) -> Result<(), String> {
        let json = serde_json::to_string_pretty(&self.actor).map_err(|e| e.to_string())?;
        fs::write(&self.path, json)
            .map_err(|e| format!("cannot write actor {}: {e}", self.path.display()))
    }
}

impl ActorData for ActorFile {
    fn name(&self) -> &str {
        self.actor.name()
    }

    fn bonus(&self, table: BonusTable, key: &str) -> Option<BonusSet> {
        self.actor.bonus(table, key)
    }

    fn stances(&self) -> &[Stance] {
        self.actor.stances()
    }

    fn wound_penalty(&self) -> u32 {
        self.actor.wound_penalty()
    }

    fn resource(&self, kind: ResourceKind) -> u32 {
        self.actor.resource(kind)
    }

    fn set_resource(&mut self, kind: ResourceKind, value: u32) {
        self.actor.set_resource(kind, value);
        if let Err(e) = self.save() {
            tracing::error!(error = %e, "spend not saved");
            self.write_error.get_or_insert(e);
        }
    }
}

/// Reads roll/keep/total modifiers from a single line of input.
///
/// A blank line (or end of input) accepts the defaults, `q` cancels.
/// Words such as `tn=20` or `void=y` change the other fields the roll
/// kind surfaces.
pub struct LinePrompt<R> {
    input: R,
}

impl<R: BufRead> LinePrompt<R> {
    /// Read answers from `input`.
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> ModifierPrompt for LinePrompt<R> {
    fn ask(
        &mut self,
        label: &str,
        fields: &PromptFields,
        defaults: &PromptAnswers,
    ) -> PromptResponse {
        eprintln!("  {} {}", label.bold(), describe_defaults(fields, defaults).dimmed());
        let settings = available_settings(fields);
        loop {
            if settings.is_empty() {
                eprint!("  modifiers [roll keep total], blank to accept, q to cancel: ");
            } else {
                eprint!(
                    "  modifiers [roll keep total] [{}], blank to accept, q to cancel: ",
                    settings.join(" ")
                );
            }

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => return PromptResponse::Submitted(*defaults),
                Err(e) => {
                    tracing::warn!(error = %e, "cannot read modifiers");
                    return PromptResponse::Cancelled;
                }
                Ok(_) => {}
            }

            match parse_answer(line.trim(), fields, defaults) {
                Ok(response) => return response,
                Err(e) => eprintln!("  {}", e.yellow()),
            }
        }
    }
}

fn describe_defaults(fields: &PromptFields, defaults: &PromptAnswers) -> String {
    let mut parts = vec![format!("mods {}", defaults.modifiers)];
    if fields.target && defaults.target_number > 0 {
        parts.push(format!(
            "TN {} ({} raises)",
            defaults.target_number, defaults.raises
        ));
    }
    if fields.penalty && defaults.apply_penalty {
        parts.push("penalty".to_string());
    }
    if fields.reroll_low && defaults.reroll_low {
        parts.push("emphasis".to_string());
    }
    if fields.primary_resource && defaults.spend_primary {
        parts.push("void point".to_string());
    }
    if fields.elemental_resource && defaults.spend_elemental {
        parts.push("spell slot".to_string());
    }
    format!("[{}]", parts.join(", "))
}

/// `key=value` settings the prompt accepts for these fields.
fn available_settings(fields: &PromptFields) -> Vec<&'static str> {
    let mut settings = Vec::new();
    if fields.target {
        settings.extend(["tn=N", "raises=N"]);
    }
    if fields.penalty {
        settings.push("penalty=y/n");
    }
    if fields.reroll_low {
        settings.push("emphasis=y/n");
    }
    if fields.primary_resource {
        settings.push("void=y/n");
    }
    if fields.elemental_resource {
        settings.push("slot=y/n");
    }
    settings
}

fn parse_answer(
    line: &str,
    fields: &PromptFields,
    defaults: &PromptAnswers,
) -> Result<PromptResponse, String> {
    if line.is_empty() {
        return Ok(PromptResponse::Submitted(*defaults));
    }
    if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
        return Ok(PromptResponse::Cancelled);
    }

    let mut answers = *defaults;
    let mut values = Vec::new();
    for word in line.split_whitespace() {
        match word.split_once('=') {
            Some((key, value)) => apply_setting(&mut answers, fields, key, value)?,
            None => values.push(
                word.parse::<i32>()
                    .map_err(|_| format!("not a number: {word}"))?,
            ),
        }
    }

    if !values.is_empty() && !fields.modifiers {
        return Err("modifiers are not available for this roll".to_string());
    }
    match values.as_slice() {
        [] => {}
        [roll] => answers.modifiers = BonusSet::new(*roll, 0, 0),
        [roll, keep] => answers.modifiers = BonusSet::new(*roll, *keep, 0),
        [roll, keep, total] => answers.modifiers = BonusSet::new(*roll, *keep, *total),
        _ => return Err("expected up to three numbers: roll keep total".to_string()),
    }

    Ok(PromptResponse::Submitted(answers))
}

fn apply_setting(
    answers: &mut PromptAnswers,
    fields: &PromptFields,
    key: &str,
    value: &str,
) -> Result<(), String> {
    let key = key.to_ascii_lowercase();
    let shown = match key.as_str() {
        "tn" | "raises" => fields.target,
        "penalty" => fields.penalty,
        "emphasis" => fields.reroll_low,
        "void" => fields.primary_resource,
        "slot" => fields.elemental_resource,
        _ => return Err(format!("unknown setting: {key}")),
    };
    if !shown {
        return Err(format!("{key} is not available for this roll"));
    }

    match key.as_str() {
        "tn" => answers.target_number = parse_count(value)?,
        "raises" => answers.raises = parse_count(value)?,
        "penalty" => answers.apply_penalty = parse_toggle(value)?,
        "emphasis" => answers.reroll_low = parse_toggle(value)?,
        "void" => answers.spend_primary = parse_toggle(value)?,
        _ => answers.spend_elemental = parse_toggle(value)?,
    }
    Ok(())
}

fn parse_count(value: &str) -> Result<u32, String> {
    value
        .parse::<u32>()
        .map_err(|_| format!("not a count: {value}"))
}

fn parse_toggle(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "y" | "yes" | "on" | "true" | "1" => Ok(true),
        "n" | "no" | "off" | "false" | "0" => Ok(false),
        _ => Err(format!("expected y or n, got {value}")),
    }
}

/// Prints finished rolls to a writer and warnings to stderr.
pub struct TerminalPresenter<W> {
    out: W,
}

impl<W: Write> TerminalPresenter<W> {
    /// Print rolls to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn present(&mut self, presentation: &Presentation) -> Result<(), String> {
        let outcome = &presentation.outcome;
        let verdict = match presentation.outcome_label {
            OutcomeLabel::Rolled => format!("{}", outcome.total).bold(),
            OutcomeLabel::Success => format!(
                "{} vs TN {} ({} raises)",
                presentation.outcome_label, outcome.effective_tn, outcome.raises_achieved
            )
            .green()
            .bold(),
            OutcomeLabel::Failure | OutcomeLabel::Missed => format!(
                "{} vs TN {}",
                presentation.outcome_label, outcome.effective_tn
            )
            .red()
            .bold(),
        };

        let mut text = format!(
            "  {}  {}\n  {}\n  {}\n",
            presentation.label.bold(),
            outcome.formula.dimmed(),
            presentation.rendered_dice,
            verdict
        );
        for tag in &presentation.tags {
            text.push_str(&format!("  {}\n", tag.cyan()));
        }

        self.out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|e| e.to_string())
    }

    fn warn(&mut self, message: &str) {
        eprintln!("{} {message}", "warning:".yellow().bold());
    }
}
