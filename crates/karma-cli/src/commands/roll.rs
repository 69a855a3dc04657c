use std::path::Path;

use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;

use karma_core::RollKind;
use karma_dice::{AdvantageMode, D20Evaluator, EvaluateOptions, RollContext, RollRequest};
use karma_engine::{
    EngineContext, FudgeEngine, InterceptionLayer, KarmaAdjuster, NullIndicator,
    OversightChannel, RollSource,
};

use crate::store_file;

/// Prints oversight notices inline as the roll resolves.
struct EchoOversight;

impl OversightChannel for EchoOversight {
    fn notify(&mut self, message: &str) {
        println!("  {} {}", "gm".magenta().bold(), message);
    }
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    store_path: &Path,
    kind: &str,
    modifier: i32,
    user: &str,
    gm: bool,
    actor: Option<&str>,
    advantage: bool,
    disadvantage: bool,
    target: Option<i32>,
    seed: u64,
) -> Result<(), String> {
    if advantage && disadvantage {
        return Err("cannot roll with both advantage and disadvantage".into());
    }

    let kind = RollKind::parse(kind);
    let mut context = RollContext::default();
    if advantage {
        context = context.with_advantage(AdvantageMode::Advantage);
    }
    if disadvantage {
        context = context.with_advantage(AdvantageMode::Disadvantage);
    }
    if let Some(target) = target {
        context = context.with_target_value(target);
    }
    let request = RollRequest::new(modifier).with_context(context);

    let mut source = RollSource::new(user, kind.clone());
    if gm {
        source = source.as_gm();
    }
    if let Some(actor) = actor {
        source = source.with_actor(actor);
    }

    println!(
        "  {} {}",
        "Roll".bold(),
        format!("{kind} ({}, seed={seed})", request.formula()).dimmed()
    );
    println!();

    let mut store = store_file::load(store_path)?;
    let mut layer = InterceptionLayer::new();
    layer.register(Box::new(KarmaAdjuster::new()), [kind.clone()]);
    layer.register(Box::new(FudgeEngine::new()), [kind]);

    let mut evaluator = D20Evaluator;
    let mut oversight = EchoOversight;
    let mut indicator = NullIndicator;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ctx = EngineContext {
        store: &mut store,
        evaluator: &mut evaluator,
        oversight: &mut oversight,
        indicator: &mut indicator,
        rng: &mut rng,
    };

    let outcome = layer
        .roll(&mut ctx, &source, request, EvaluateOptions::default())
        .map_err(|e| format!("roll failed: {e}"))?;

    println!("  rolled {:?} kept {}", outcome.rolls, outcome.kept);

    let mut total_line = format!("  total {}", outcome.total.to_string().bold());
    if outcome.is_critical {
        total_line.push_str(&format!("  {}", "CRIT".green().bold()));
    }
    if outcome.is_fumble {
        total_line.push_str(&format!("  {}", "FUMBLE".red().bold()));
    }
    println!("{total_line}");

    if let (Some(target), Some(success)) =
        (outcome.request.context.target_value, outcome.success)
    {
        let verdict = if success {
            "success".green().bold()
        } else {
            "failure".red().bold()
        };
        println!("  vs target {target}: {verdict}");
    }

    store_file::save(store_path, &store)?;
    Ok(())
}
