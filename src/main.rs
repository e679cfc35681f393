use clap::Parser;
use smartcab::cli::Options;
use smartcab::envs::{FailureReason, TrialOutcome};
use smartcab::logging::CLILogger;
use smartcab::simulation::{run_trials, ActionCounter, RewardStatistics, StepLogger};
use smartcab::SmartcabError;
use yansi::Paint;

fn main() -> Result<(), SmartcabError> {
    let opts = Options::parse();
    let config = opts.experiment_config()?;
    println!("{:#?}", config);

    let mut env = config.build_env()?;
    let mut agent = config.build_agent()?;
    println!("Agent: {}", agent);

    let mut hooks = (StepLogger::new(), ActionCounter::new(), RewardStatistics::new());
    let summary = {
        let mut logger = CLILogger::new(opts.display_period());
        run_trials(
            &mut env,
            &mut agent,
            config.trial_count,
            &mut hooks,
            &mut logger,
        )
    };

    let count = |target: TrialOutcome| summary.outcomes.iter().filter(|&&o| o == target).count();
    println!("{}", Paint::cyan("==== Summary ====").bold());
    println!("{:<16} {}", Paint::fixed(35, "trials"), summary.trial_count);
    println!("{:<16} {}", Paint::fixed(35, "ticks"), summary.total_ticks);
    println!(
        "{:<16} {}",
        Paint::fixed(35, "succeeded"),
        count(TrialOutcome::Succeeded)
    );
    println!(
        "{:<16} {}",
        Paint::fixed(35, "deadline"),
        count(TrialOutcome::Failed(FailureReason::DeadlineExceeded))
    );
    println!(
        "{:<16} {}",
        Paint::fixed(35, "time limit"),
        count(TrialOutcome::Failed(FailureReason::HardTimeLimit))
    );
    println!(
        "{:<16} {:.3}",
        Paint::fixed(35, "mean reward"),
        hooks.2.mean_step_reward()
    );
    for (action, count) in &hooks.1.counts {
        println!("{:<16} {}", Paint::fixed(35, format!("action {}", action)), count);
    }
    println!(
        "{} {}",
        Paint::green("Success rate:").bold(),
        summary.success_rate()?
    );
    Ok(())
}
