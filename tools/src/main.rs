//! phonetree: print escalation phone trees for every configured department.
//!
//! Usage:
//!   phonetree [CONFIG] [--dept NAME] [--json] [--skip-failed] [--fixture FILE]
//!
//! CONFIG defaults to /etc/phonetree.json. With --fixture, the directory is
//! read from a JSON file instead of the live staffing API.

use anyhow::Result;
use phonetree_core::{
    config::DEFAULT_CONFIG_PATH, Clock, EscalationPlan, EscalationResolver, InMemoryDirectory,
    PhonetreeConfig, RemoteDirectory, SystemClock,
};
use std::env;

/// Flags that consume the following argument.
const VALUE_FLAGS: &[&str] = &["--dept", "--fixture"];

struct Options {
    dept: Option<String>,
    json: bool,
    skip_failed: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let config_path = positional(&args).unwrap_or(DEFAULT_CONFIG_PATH);
    let options = Options {
        dept: flag_value(&args, "--dept").map(str::to_string),
        json: args.iter().any(|a| a == "--json"),
        skip_failed: args.iter().any(|a| a == "--skip-failed"),
    };

    let config = PhonetreeConfig::load(config_path)?;
    log::info!("loaded {} department(s) from {config_path}", config.depts.len());

    match flag_value(&args, "--fixture") {
        Some(fixture) => {
            let directory = InMemoryDirectory::load(fixture)?;
            run(EscalationResolver::new(directory, config.depts, SystemClock), &options)
        }
        None => run(EscalationResolver::from_config(config)?, &options),
    }
}

fn run<D: RemoteDirectory, C: Clock>(
    mut resolver: EscalationResolver<D, C>,
    options: &Options,
) -> Result<()> {
    let plan = match &options.dept {
        Some(dept) => {
            let mut plan = EscalationPlan::new();
            plan.insert(dept.clone(), resolver.resolve(dept)?);
            plan
        }
        None if options.skip_failed => resolver.full_escalation_skipping_failures(),
        None => resolver.full_escalation()?,
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan);
    }

    let warnings = resolver.take_warnings();
    if !warnings.is_empty() {
        log::info!("{} warning(s) while resolving", warnings.len());
    }
    Ok(())
}

fn print_plan(plan: &EscalationPlan) {
    for (dept, groups) in plan {
        println!("Escalation for department '{dept}'");
        for group in groups {
            println!("* {}", group.join(", "));
            println!();
        }
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// First argument that is neither a flag nor a flag's value.
fn positional(args: &[String]) -> Option<&str> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with("--") {
            return Some(arg.as_str());
        }
    }
    None
}
