//! The roll pipeline shared by every roll kind.
//!
//! A roll moves through a fixed sequence of states:
//!
//! ```text
//! Idle -> AwaitingModifiers -> ResourceCheck -> Normalize -> Compile
//!      -> Execute -> Resolve -> Present
//! ```
//!
//! `AwaitingModifiers` is the only step that waits on the user and is skipped
//! when the caller's intent matches the configured preference. Cancelling
//! there leaves no trace. Once `ResourceCheck` has committed a spend the roll
//! always runs to the end, and the spend stays committed even if presenting
//! the result fails.
//!
//! The five roll kinds differ only in their [`RollKindSpec`], see [`preset`].

pub mod collab;
pub mod kind;
pub mod preset;
pub mod request;

pub use collab::{
    AcceptDefaults, ModifierPrompt, Presentation, Presenter, PromptAnswers, PromptResponse,
};
pub use kind::{PromptFields, RollKind, RollKindSpec, SubjectKey};
pub use request::RollRequest;

use crate::bonus::{self, BonusLedger, BonusSet, BonusSource};
use crate::config::ConfigProvider;
use crate::dice::{self, DicePool, RollFlags, RolledDice, Roller};
use crate::error::{EngineError, EngineResult};
use crate::resolution::{self, OutcomeLabel, RollOutcome};
use crate::sheet::{ActorData, ResourceKind, SpendOutcome};

/// Steps of the pipeline, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Nothing has happened yet.
    Idle,
    /// Waiting for the modifier prompt.
    AwaitingModifiers,
    /// Looking up penalties and spending resources.
    ResourceCheck,
    /// Applying the Ten Dice Rule.
    Normalize,
    /// Building the formula.
    Compile,
    /// Rolling the dice.
    Execute,
    /// Comparing against the target number.
    Resolve,
    /// Handing the result to the presenter.
    Present,
}

/// Everything produced by a roll that reached the dice.
#[derive(Debug, Clone)]
pub struct RollReport {
    /// Heading for the roll.
    pub label: String,
    /// The normalized pool.
    pub pool: DicePool,
    /// Every bonus that went into the pool, in order.
    pub bonuses: BonusLedger,
    /// The executed dice.
    pub rolled: RolledDice,
    /// Numeric outcome.
    pub outcome: RollOutcome,
    /// Display label for the outcome.
    pub outcome_label: OutcomeLabel,
    /// Resources spent for this roll.
    pub spent: Vec<ResourceKind>,
    /// Informational notes.
    pub tags: Vec<String>,
}

impl RollReport {
    /// What the presenter is given.
    pub fn presentation(&self) -> Presentation {
        Presentation {
            label: self.label.clone(),
            rendered_dice: self.rolled.to_string(),
            outcome: self.outcome.clone(),
            outcome_label: self.outcome_label,
            tags: self.tags.clone(),
        }
    }
}

/// How a pipeline run ended.
#[derive(Debug)]
pub enum RollStatus {
    /// Rolled and presented.
    Completed(RollReport),
    /// Dismissed at the modifier prompt. Nothing was spent or rolled.
    Cancelled,
    /// Stopped before any die was rolled.
    Aborted(EngineError),
    /// Rolled, but presenting failed. Spent resources stay spent.
    PresentationFailed {
        /// The roll that happened.
        report: RollReport,
        /// Why presenting failed.
        error: EngineError,
    },
}

impl RollStatus {
    /// The roll report, if the dice were rolled.
    pub fn report(&self) -> Option<&RollReport> {
        match self {
            Self::Completed(report) | Self::PresentationFailed { report, .. } => Some(report),
            Self::Cancelled | Self::Aborted(_) => None,
        }
    }

    /// Returns true if the roll was rolled and presented.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Runs rolls against injected collaborators.
pub struct RollPipeline<'a> {
    config: &'a dyn ConfigProvider,
    prompt: &'a mut dyn ModifierPrompt,
    presenter: &'a mut dyn Presenter,
    roller: &'a mut dyn Roller,
}

impl<'a> RollPipeline<'a> {
    /// Create a pipeline.
    pub fn new(
        config: &'a dyn ConfigProvider,
        prompt: &'a mut dyn ModifierPrompt,
        presenter: &'a mut dyn Presenter,
        roller: &'a mut dyn Roller,
    ) -> Self {
        Self {
            config,
            prompt,
            presenter,
            roller,
        }
    }

    /// Run a roll from start to finish.
    ///
    /// Every failure is turned into a [`RollStatus`]; aborted rolls and
    /// presentation failures are also reported to the presenter as warnings.
    pub fn run(
        &mut self,
        request: RollRequest,
        actor: Option<&mut dyn ActorData>,
    ) -> RollStatus {
        let spec = request.kind.spec();
        enter(PipelineState::Idle, &request.label);

        let report = match self.roll(&spec, request, actor) {
            Ok(report) => report,
            Err(EngineError::UserCancelled) => {
                tracing::debug!("roll cancelled at the modifier prompt");
                return RollStatus::Cancelled;
            }
            Err(error) => {
                tracing::warn!(%error, "roll aborted");
                self.presenter.warn(&error.to_string());
                return RollStatus::Aborted(error);
            }
        };

        enter(PipelineState::Present, &report.label);
        match self.presenter.present(&report.presentation()) {
            Ok(()) => {
                tracing::info!(
                    label = %report.label,
                    formula = %report.outcome.formula,
                    total = report.outcome.total,
                    outcome = %report.outcome_label,
                    "roll completed"
                );
                RollStatus::Completed(report)
            }
            Err(message) => {
                let error = EngineError::PresentationFailure(message);
                tracing::warn!(%error, "roll not presented");
                self.presenter.warn(&error.to_string());
                RollStatus::PresentationFailed { report, error }
            }
        }
    }

    fn roll(
        &mut self,
        spec: &RollKindSpec,
        request: RollRequest,
        mut actor: Option<&mut dyn ActorData>,
    ) -> EngineResult<RollReport> {
        let mut request = mask_fields(spec, request);

        enter(PipelineState::AwaitingModifiers, &request.label);
        let answers = self.await_modifiers(spec, &request)?;
        apply_answers(spec, &mut request, answers);

        let mut bonuses = bonus::gather(actor.as_deref(), spec, &request, request.modifiers);

        enter(PipelineState::ResourceCheck, &request.label);
        let penalty = lookup_penalty(&request, actor.as_deref())?;
        let planned = planned_spends(&request);
        let mut spent = Vec::new();
        let mut tags = Vec::new();
        if !planned.is_empty() {
            let actor = actor.as_deref_mut().ok_or(EngineError::NoActorResolved)?;
            if let Some(&empty) = planned.iter().find(|&&kind| actor.resource(kind) == 0) {
                return Err(EngineError::InsufficientResource(empty));
            }
            for kind in planned {
                match crate::sheet::spend(actor, kind) {
                    SpendOutcome::Committed { bonus, tag, .. } => {
                        bonuses.push(BonusSource::Resource(kind), bonus);
                        tags.extend(tag);
                        spent.push(kind);
                    }
                    SpendOutcome::Refused(kind) => {
                        return Err(EngineError::InsufficientResource(kind));
                    }
                }
            }
        }

        enter(PipelineState::Normalize, &request.label);
        let total = bonuses.total();
        let pool = DicePool::from_totals(
            i64::from(request.base_roll) + i64::from(total.roll),
            i64::from(request.base_keep) + i64::from(total.keep),
            i64::from(request.base_bonus) + i64::from(total.total),
        )
        .normalize(self.config);

        enter(PipelineState::Compile, &request.label);
        let flags = effective_flags(spec, &request, answers);
        if request.unskilled {
            tags.push("Unskilled".to_string());
        }
        let formula = dice::compile(pool, flags);

        enter(PipelineState::Execute, &request.label);
        let rolled = dice::execute(&formula, &mut *self.roller);

        enter(PipelineState::Resolve, &request.label);
        let resolution = resolution::resolve(
            rolled.total,
            request.target_number,
            request.raises,
            penalty,
            request.apply_penalty,
        );
        let outcome = RollOutcome::new(formula.to_string(), rolled.total, resolution);
        let outcome_label = outcome.label(request.attack && spec.attack_label);

        Ok(RollReport {
            label: request.label,
            pool,
            bonuses,
            rolled,
            outcome,
            outcome_label,
            spent,
            tags,
        })
    }

    fn await_modifiers(
        &mut self,
        spec: &RollKindSpec,
        request: &RollRequest,
    ) -> EngineResult<PromptAnswers> {
        let defaults = PromptAnswers {
            modifiers: request.modifiers,
            apply_penalty: request.apply_penalty,
            reroll_low: request.flags.reroll_low_once || (request.emphasis && !request.unskilled),
            spend_primary: request.spend_primary,
            spend_elemental: request.spend_elemental,
            target_number: request.target_number,
            raises: request.raises,
        };

        let show = self.config.show_prompt_by_default(spec.kind) != request.toggle_prompt;
        if !show {
            return Ok(defaults);
        }

        match self.prompt.ask(&request.label, &spec.fields, &defaults) {
            PromptResponse::Submitted(answers) => Ok(answers),
            PromptResponse::Cancelled => Err(EngineError::UserCancelled),
        }
    }
}

fn enter(state: PipelineState, label: &str) {
    tracing::debug!(?state, label, "roll pipeline");
}

/// Drop request options the roll kind does not support.
fn mask_fields(spec: &RollKindSpec, mut request: RollRequest) -> RollRequest {
    let fields = &spec.fields;
    if !fields.penalty {
        request.apply_penalty = false;
    }
    if !fields.modifiers {
        request.modifiers = BonusSet::ZERO;
    }
    if !fields.primary_resource {
        request.spend_primary = false;
    }
    if !fields.elemental_resource {
        request.spend_elemental = false;
    }
    if !fields.target {
        request.target_number = 0;
        request.raises = 0;
    }
    request
}

/// Copy the prompt's answers back, ignoring fields that were not shown.
fn apply_answers(spec: &RollKindSpec, request: &mut RollRequest, answers: PromptAnswers) {
    let fields = &spec.fields;
    if fields.penalty {
        request.apply_penalty = answers.apply_penalty;
    }
    if fields.modifiers {
        request.modifiers = answers.modifiers;
    }
    if fields.primary_resource {
        request.spend_primary = answers.spend_primary;
    }
    if fields.elemental_resource {
        request.spend_elemental = answers.spend_elemental;
    }
    if fields.target {
        request.target_number = answers.target_number;
        request.raises = answers.raises;
    }
}

fn effective_flags(
    spec: &RollKindSpec,
    request: &RollRequest,
    answers: PromptAnswers,
) -> RollFlags {
    let mut flags = request.flags;
    if spec.fields.reroll_low {
        flags.reroll_low_once = answers.reroll_low;
    }
    if request.unskilled {
        flags.reroll_low_once = false;
        flags.no_explode = true;
    }
    flags
}

/// Penalty added to the TN. Wound penalties need an actor.
///
/// Penalties always raise the target number; they never lower the roll.
fn lookup_penalty(request: &RollRequest, actor: Option<&dyn ActorData>) -> EngineResult<u32> {
    if !request.apply_penalty {
        return Ok(0);
    }
    match (request.penalty, actor) {
        (Some(penalty), _) => Ok(penalty),
        (None, Some(actor)) => Ok(actor.wound_penalty()),
        (None, None) => Err(EngineError::NoActorResolved),
    }
}

fn planned_spends(request: &RollRequest) -> Vec<ResourceKind> {
    let mut planned = Vec::new();
    if request.spend_primary {
        planned.push(ResourceKind::Primary);
    }
    if let Some(element) = request.element.filter(|_| request.spend_elemental) {
        planned.push(ResourceKind::Elemental(element));
    }
    planned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::dice::roll::tests::ScriptedRoller;
    use crate::sheet::{Actor, Element, ResourcePool, Stance};

    #[derive(Default)]
    struct ScriptedPrompt {
        response: Option<PromptAnswers>,
        cancel: bool,
        calls: usize,
        last_fields: Option<PromptFields>,
    }

    impl ScriptedPrompt {
        fn accept() -> Self {
            Self::default()
        }

        fn answer(answers: PromptAnswers) -> Self {
            Self {
                response: Some(answers),
                ..Self::default()
            }
        }

        fn cancel() -> Self {
            Self {
                cancel: true,
                ..Self::default()
            }
        }
    }

    impl ModifierPrompt for ScriptedPrompt {
        fn ask(
            &mut self,
            _label: &str,
            fields: &PromptFields,
            defaults: &PromptAnswers,
        ) -> PromptResponse {
            self.calls += 1;
            self.last_fields = Some(*fields);
            if self.cancel {
                return PromptResponse::Cancelled;
            }
            PromptResponse::Submitted(self.response.unwrap_or(*defaults))
        }
    }

    #[derive(Default)]
    struct RecordingPresenter {
        presented: Vec<Presentation>,
        warnings: Vec<String>,
        fail: bool,
    }

    impl Presenter for RecordingPresenter {
        fn present(&mut self, presentation: &Presentation) -> Result<(), String> {
            if self.fail {
                return Err("chat log unavailable".to_string());
            }
            self.presented.push(presentation.clone());
            Ok(())
        }

        fn warn(&mut self, message: &str) {
            self.warnings.push(message.to_string());
        }
    }

    fn run_with(
        config: &EngineConfig,
        prompt: &mut ScriptedPrompt,
        presenter: &mut RecordingPresenter,
        faces: &[u32],
        request: RollRequest,
        actor: Option<&mut dyn ActorData>,
    ) -> RollStatus {
        let mut roller = ScriptedRoller::new(faces);
        RollPipeline::new(config, prompt, presenter, &mut roller).run(request, actor)
    }

    fn run(request: RollRequest, actor: Option<&mut dyn ActorData>, faces: &[u32]) -> RollStatus {
        run_with(
            &EngineConfig::default(),
            &mut ScriptedPrompt::accept(),
            &mut RecordingPresenter::default(),
            faces,
            request,
            actor,
        )
    }

    #[test]
    fn skill_roll_end_to_end() {
        let mut actor = Actor::new("Kakita Toshimoko");
        let request = RollRequest::skill("kenjutsu", "agility", 3, 2);
        let status = run(request, Some(&mut actor), &[9, 5, 3, 2, 1]);

        let report = status.report().unwrap();
        assert!(status.is_completed());
        assert_eq!(report.outcome.formula, "5d10k3x10+0");
        assert_eq!(report.outcome.total, 17);
        assert_eq!(report.outcome.success, None);
        assert_eq!(report.outcome_label, OutcomeLabel::Rolled);
    }

    #[test]
    fn emphasis_changes_only_reroll_clause() {
        let mut actor = Actor::new("Kakita Toshimoko");
        let request = RollRequest::skill("kenjutsu", "agility", 3, 2).with_emphasis();
        let status = run(request, Some(&mut actor), &[9, 5, 3, 2, 4]);
        let report = status.report().unwrap();
        assert_eq!(report.outcome.formula, "5d10r1k3x10+0");
        assert_eq!(report.pool, DicePool::new(5, 3, 0));
    }

    #[test]
    fn cancelling_leaves_everything_untouched() {
        let pool = ResourcePool::new(2).with_slots(Element::Fire, 1);
        let mut actor = Actor::new("Isawa Tsuke").with_resources(pool.clone());
        let mut presenter = RecordingPresenter::default();
        let request = RollRequest::ring(Element::Fire, 3)
            .spending_primary()
            .spending_elemental();

        let status = run_with(
            &EngineConfig::default(),
            &mut ScriptedPrompt::cancel(),
            &mut presenter,
            &[5, 5, 5],
            request,
            Some(&mut actor),
        );

        assert!(matches!(status, RollStatus::Cancelled));
        assert!(status.report().is_none());
        assert_eq!(actor.resources, pool);
        assert!(presenter.presented.is_empty());
        assert!(presenter.warnings.is_empty());
    }

    #[test]
    fn empty_resource_aborts_before_rolling() {
        let mut actor = Actor::new("Ronin");
        let mut presenter = RecordingPresenter::default();
        let mut prompt = ScriptedPrompt::accept();
        let mut roller = ScriptedRoller::new(&[7, 7, 7]);
        let request = RollRequest::trait_roll("strength", 3).spending_primary();

        let status = RollPipeline::new(
            &EngineConfig::default(),
            &mut prompt,
            &mut presenter,
            &mut roller,
        )
        .run(request, Some(&mut actor));

        assert!(matches!(
            status,
            RollStatus::Aborted(EngineError::InsufficientResource(ResourceKind::Primary))
        ));
        assert_eq!(roller.0.len(), 3);
        assert_eq!(actor.resources.primary, 0);
        assert!(presenter.presented.is_empty());
        assert_eq!(presenter.warnings, vec!["no void points remaining".to_string()]);
    }

    #[test]
    fn void_point_adds_one_roll_one_keep() {
        let mut actor = Actor::new("Hida Yakamo").with_resources(ResourcePool::new(3));
        let request = RollRequest::skill("kenjutsu", "agility", 3, 2).spending_primary();
        let status = run(request, Some(&mut actor), &[]);

        let report = status.report().unwrap();
        assert_eq!(report.outcome.formula, "6d10k4x10+0");
        assert_eq!(report.spent, vec![ResourceKind::Primary]);
        assert_eq!(actor.resources.primary, 2);
        assert!(matches!(
            report.bonuses.contributions().last().map(|c| &c.source),
            Some(BonusSource::Resource(ResourceKind::Primary))
        ));
    }

    #[test]
    fn spend_survives_presentation_failure() {
        let mut actor = Actor::new("Shosuro Hametsu").with_resources(ResourcePool::new(1));
        let mut presenter = RecordingPresenter {
            fail: true,
            ..RecordingPresenter::default()
        };
        let request = RollRequest::trait_roll("awareness", 2).spending_primary();

        let status = run_with(
            &EngineConfig::default(),
            &mut ScriptedPrompt::accept(),
            &mut presenter,
            &[6, 4, 3],
            request,
            Some(&mut actor),
        );

        let RollStatus::PresentationFailed { report, error } = status else {
            panic!("expected presentation failure");
        };
        assert_eq!(report.outcome.total, 13);
        assert!(matches!(error, EngineError::PresentationFailure(_)));
        assert_eq!(actor.resources.primary, 0);
        assert_eq!(presenter.warnings.len(), 1);
    }

    #[test]
    fn spend_without_actor_aborts() {
        let request = RollRequest::generic("bandit", 4, 2).spending_primary();
        let status = run(request, None, &[]);
        assert!(matches!(
            status,
            RollStatus::Aborted(EngineError::NoActorResolved)
        ));
    }

    #[test]
    fn wound_penalty_without_actor_aborts() {
        let request = RollRequest::trait_roll("stamina", 3).with_penalty(None);
        let status = run(request, None, &[]);
        assert!(matches!(
            status,
            RollStatus::Aborted(EngineError::NoActorResolved)
        ));
    }

    #[test]
    fn wound_penalty_raises_target() {
        let mut actor = Actor::new("Matsu Tsuko");
        actor.wound_penalty = 5;
        let request = RollRequest::trait_roll("stamina", 2)
            .with_target(10, 0)
            .with_penalty(None);
        let status = run(request, Some(&mut actor), &[7, 5]);
        let report = status.report().unwrap();
        assert_eq!(report.outcome.effective_tn, 15);
        assert_eq!(report.outcome.success, Some(false));
        assert_eq!(report.outcome_label, OutcomeLabel::Failure);
    }

    #[test]
    fn failed_attack_reads_missed() {
        let request = RollRequest::generic("yari thrust", 3, 2)
            .with_target(10, 1)
            .as_attack();
        let status = run(request, None, &[8, 6, 2]);
        let report = status.report().unwrap();
        assert_eq!(report.outcome.total, 14);
        assert_eq!(report.outcome.effective_tn, 15);
        assert_eq!(report.outcome_label, OutcomeLabel::Missed);
        assert_eq!(report.presentation().outcome_label.to_string(), "Missed");
    }

    #[test]
    fn successful_check_with_raise() {
        let request = RollRequest::generic("climb", 3, 2).with_target(10, 1);
        let status = run(request, None, &[9, 6, 2]);
        let report = status.report().unwrap();
        assert_eq!(report.outcome.success, Some(true));
        assert_eq!(report.outcome.raises_achieved, 1);
        assert_eq!(report.outcome_label, OutcomeLabel::Success);
    }

    #[test]
    fn ring_spell_slot_only_tags() {
        let pool = ResourcePool::new(0).with_slots(Element::Air, 2);
        let mut actor = Actor::new("Isawa Kaede").with_resources(pool);
        let request = RollRequest::ring(Element::Air, 4).spending_elemental();
        let status = run(request, Some(&mut actor), &[]);

        let report = status.report().unwrap();
        assert_eq!(report.pool, DicePool::new(4, 4, 0));
        assert_eq!(report.tags, vec!["Air spell slot spent".to_string()]);
        assert_eq!(actor.resources.get(ResourceKind::Elemental(Element::Air)), 1);
    }

    #[test]
    fn failed_second_spend_commits_nothing() {
        let mut actor = Actor::new("Isawa Tsuke").with_resources(ResourcePool::new(2));
        let request = RollRequest::ring(Element::Fire, 3)
            .spending_primary()
            .spending_elemental();
        let status = run(request, Some(&mut actor), &[]);
        assert!(matches!(
            status,
            RollStatus::Aborted(EngineError::InsufficientResource(ResourceKind::Elemental(
                Element::Fire
            )))
        ));
        assert_eq!(actor.resources.primary, 2);
    }

    #[test]
    fn unskilled_never_explodes() {
        let mut actor = Actor::new("Peasant");
        let request = RollRequest::skill("horsemanship", "agility", 2, 0).with_emphasis();
        let status = run(request, Some(&mut actor), &[10, 10, 3]);
        let report = status.report().unwrap();
        assert_eq!(report.outcome.formula, "2d10k2+0");
        assert_eq!(report.outcome.total, 20);
        assert!(report.tags.contains(&"Unskilled".to_string()));
    }

    #[test]
    fn prompt_skipped_when_preference_matches_intent() {
        let config = EngineConfig::default().with_prompt_default(RollKind::Generic, false);
        let mut prompt = ScriptedPrompt::accept();
        let mut presenter = RecordingPresenter::default();
        let request = RollRequest::generic("duel", 3, 2);
        run_with(&config, &mut prompt, &mut presenter, &[], request, None);
        assert_eq!(prompt.calls, 0);

        let request = RollRequest::generic("duel", 3, 2).toggling_prompt();
        run_with(&config, &mut prompt, &mut presenter, &[], request, None);
        assert_eq!(prompt.calls, 1);
        assert_eq!(prompt.last_fields, Some(preset::generic().fields));
    }

    #[test]
    fn toggle_skips_default_prompt() {
        let mut prompt = ScriptedPrompt::cancel();
        let request = RollRequest::generic("duel", 3, 2).toggling_prompt();
        let status = run_with(
            &EngineConfig::default(),
            &mut prompt,
            &mut RecordingPresenter::default(),
            &[],
            request,
            None,
        );
        assert!(status.is_completed());
    }

    #[test]
    fn prompt_answers_apply() {
        let mut actor = Actor::new("Mirumoto Hitomi").with_resources(ResourcePool::new(1));
        let mut prompt = ScriptedPrompt::answer(PromptAnswers {
            modifiers: BonusSet::new(1, 0, 3),
            spend_primary: true,
            target_number: 20,
            raises: 2,
            ..PromptAnswers::default()
        });
        let request = RollRequest::skill("kenjutsu", "agility", 3, 2);
        let status = run_with(
            &EngineConfig::default(),
            &mut prompt,
            &mut RecordingPresenter::default(),
            &[],
            request,
            Some(&mut actor),
        );
        let report = status.report().unwrap();
        assert_eq!(report.outcome.formula, "7d10k4x10+3");
        assert_eq!(report.outcome.effective_tn, 30);
        assert_eq!(actor.resources.primary, 0);
    }

    #[test]
    fn weapon_ignores_unsurfaced_answers() {
        let mut actor = Actor::new("Hida Kisada").with_resources(ResourcePool::new(3));
        actor.stances = vec![Stance::Center];
        let mut prompt = ScriptedPrompt::answer(PromptAnswers {
            spend_primary: true,
            target_number: 25,
            raises: 3,
            apply_penalty: true,
            ..PromptAnswers::default()
        });
        let request = RollRequest::weapon("tetsubo", 7, 2);
        let status = run_with(
            &EngineConfig::default(),
            &mut prompt,
            &mut RecordingPresenter::default(),
            &[],
            request,
            Some(&mut actor),
        );
        let report = status.report().unwrap();
        assert_eq!(report.outcome.formula, "7d10k2x10+0");
        assert_eq!(report.outcome.success, None);
        assert_eq!(actor.resources.primary, 3);
    }

    #[test]
    fn house_rule_read_per_roll() {
        let off = EngineConfig::default();
        let on = EngineConfig::default().with_house_rule(true);
        let mut prompt = ScriptedPrompt::accept();
        let mut presenter = RecordingPresenter::default();

        let request = RollRequest::generic("x", 13, 9);
        let status = run_with(&off, &mut prompt, &mut presenter, &[], request.clone(), None);
        assert_eq!(status.report().unwrap().pool, DicePool::new(10, 9, 0));

        let status = run_with(&on, &mut prompt, &mut presenter, &[], request, None);
        assert_eq!(status.report().unwrap().pool, DicePool::new(10, 9, 2));
    }

    #[test]
    fn notation_and_structured_paths_agree() {
        let structured = run(RollRequest::generic("x", 6, 3), None, &[4, 8, 2, 9, 1, 6]);
        let notation = run(
            RollRequest::from_notation("x", "6k3").unwrap(),
            None,
            &[4, 8, 2, 9, 1, 6],
        );
        let (a, b) = (structured.report().unwrap(), notation.report().unwrap());
        assert_eq!(a.pool, b.pool);
        assert_eq!(a.outcome, b.outcome);
    }

    #[test]
    fn oversized_pool_is_normalized() {
        let request = RollRequest::generic("oni", 12, 8);
        let status = run(request, None, &[]);
        assert_eq!(status.report().unwrap().pool, DicePool::new(10, 8, 0));
        assert_eq!(status.report().unwrap().outcome.formula, "10d10k8x10+0");
    }

    #[test]
    fn huge_notation_pool_matches_direct_normalization() {
        let config = EngineConfig::default();
        let parsed = dice::parse("2147483648k1").unwrap();
        let request = RollRequest::from_notation("x", "2147483648k1").unwrap();
        let status = run(request, None, &[]);
        let report = status.report().unwrap();
        assert_eq!(report.pool, parsed.pool.normalize(&config));
        assert_eq!(report.pool, DicePool::new(10, 9, 0));
    }

    #[test]
    fn extreme_bonus_and_raises_do_not_panic() {
        let mut prompt = ScriptedPrompt::answer(PromptAnswers {
            modifiers: BonusSet::new(0, 0, 1),
            target_number: u32::MAX,
            raises: 900_000_000,
            ..PromptAnswers::default()
        });
        let request = RollRequest::from_notation("x", "5k3+2147483647").unwrap();
        let status = run_with(
            &EngineConfig::default(),
            &mut prompt,
            &mut RecordingPresenter::default(),
            &[10, 10, 10, 10, 10],
            request,
            None,
        );
        let report = status.report().unwrap();
        assert_eq!(report.pool.bonus, i32::MAX);
        assert_eq!(report.outcome.total, i32::MAX);
        assert_eq!(report.outcome.effective_tn, u32::MAX);
        assert_eq!(report.outcome_label, OutcomeLabel::Failure);
    }

    #[test]
    fn negative_modifiers_floor_at_zero_dice() {
        let request =
            RollRequest::generic("weakling", 1, 1).with_modifiers(BonusSet::new(-3, -3, -1));
        let status = run(request, None, &[]);
        let report = status.report().unwrap();
        assert_eq!(report.pool, DicePool::new(0, 0, -1));
        assert_eq!(report.outcome.total, -1);
    }
}
