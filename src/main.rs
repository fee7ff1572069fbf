//! payoff-engine CLI
//!
//! Run debt payoff simulations from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Simulate an avalanche plan at $800/month
//! payoff-engine simulate --input debts.json --payment 800
//!
//! # Snowball vs avalanche, as JSON
//! payoff-engine compare --input debts.json --payment 800 --format json
//!
//! # Payment needed to be debt-free in 36 months
//! payoff-engine optimize --input debts.json --target-months 36
//!
//! # Generate a random portfolio for testing
//! payoff-engine generate --debts 8 --output debts.json
//! ```

use chrono::NaiveDate;
use payoff_engine::core::debt::{total_minimums, Debt, DebtId};
use payoff_engine::core::profile::{PrimaryGoal, UserProfile, MAX_STRESS, MIN_STRESS};
use payoff_engine::core::strategy::Strategy;
use payoff_engine::optimization::comparison::{compare_scenarios, ScenarioComparison};
use payoff_engine::optimization::optimizer::{PaymentOptimizer, PlanGoal};
use payoff_engine::optimization::recommender::{
    ConfidenceReport, StrategyRecommendation, StrategyRecommender,
};
use payoff_engine::simulation::generator::{generate_random_portfolio, PortfolioConfig};
use payoff_engine::simulation::scenario::PayoffScenario;
use payoff_engine::simulation::simulator::{
    DateConvention, PayoffSimulator, SimulationConfig, SimulationRequest,
};
use payoff_engine::simulation::what_if::{what_if_with, WhatIfChange, WhatIfRequest};
use rust_decimal::Decimal;
use std::fmt::Display;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"payoff-engine: debt payoff simulation and strategy recommendation

USAGE:
    payoff-engine <COMMAND> [OPTIONS]

COMMANDS:
    simulate    Simulate a payoff plan for one strategy
    compare     Compare snowball and avalanche at the same payment
    optimize    Find a payment plan for a target horizon or budget
    recommend   Recommend a strategy for a user profile
    what-if     Evaluate a hypothetical change against the base plan
    generate    Generate a random debt portfolio (for testing)
    help        Show this message

COMMON OPTIONS:
    --input <FILE>        Path to JSON debts file
    --strategy <NAME>     snowball, avalanche (default) or custom
    --order <IDS>         Comma-separated debt ids for the custom strategy
    --payment <AMOUNT>    Monthly payment (default: sum of minimums)
    --start <DATE>        Start date, YYYY-MM-DD (default: today)
    --calendar            Advance payment dates by calendar month, not 30 days
    --format <FORMAT>     Output format: text (default) or json

OPTIONS (optimize):
    --target-months <N>   Be debt-free in N months
    --max-payment <AMT>   Pay this much every month
                          (neither: 20% above the sum of minimums)

OPTIONS (recommend):
    --goal <GOAL>         pay-faster, reduce-interest, lower-payment, avoid-default
    --stress <1-5>        Self-reported stress level
    --available <AMT>     Money available for debt each month
    --completeness <F>    Profile completeness, 0.0 to 1.0

OPTIONS (what-if):
    --change <JSON>       The change, e.g. '{{"type":"increased-monthly","amount":"900"}}'

OPTIONS (generate):
    --debts <N>           Number of debts (default: 5)
    --max-balance <AMT>   Largest opening balance (default: 25000)
    --max-apr <PCT>       Highest APR (default: 30)
    --output <FILE>       Write to file instead of stdout

EXAMPLES:
    payoff-engine simulate --input debts.json --payment 800
    payoff-engine compare --input debts.json --payment 800 --format json
    payoff-engine optimize --input debts.json --target-months 36
    payoff-engine recommend --input debts.json --payment 800 --goal pay-faster --stress 4
    payoff-engine what-if --input debts.json --payment 800 \
        --change '{{"type":"rate-change","debt_id":"visa","new_apr":"9.9"}}'
    payoff-engine generate --debts 8 --output debts.json"#
    );
}

/// JSON schema for input debts.
#[derive(serde::Deserialize, serde::Serialize)]
struct DebtsFile {
    debts: Vec<Debt>,
}

/// Options shared by every command that reads a debts file.
struct Options {
    input: Option<String>,
    strategy: Strategy,
    order: Option<Vec<DebtId>>,
    payment: Option<Decimal>,
    start: Option<NaiveDate>,
    calendar: bool,
    json: bool,
    target_months: Option<u32>,
    max_payment: Option<Decimal>,
    goal: Option<PrimaryGoal>,
    stress: Option<u8>,
    available: Option<Decimal>,
    completeness: Option<f64>,
    change: Option<WhatIfChange>,
}

fn exit_with(message: impl Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn value<'a>(args: &'a [String], i: usize, flag: &str, what: &str) -> &'a str {
    args.get(i).map(String::as_str).unwrap_or_else(|| {
        eprintln!("{} requires {}", flag, what);
        process::exit(1);
    })
}

fn parsed<T: std::str::FromStr>(args: &[String], i: usize, flag: &str, what: &str) -> T {
    value(args, i, flag, what).parse().unwrap_or_else(|_| {
        eprintln!("{} requires {}", flag, what);
        process::exit(1);
    })
}

fn parse_options(args: &[String]) -> Options {
    let mut opts = Options {
        input: None,
        strategy: Strategy::Avalanche,
        order: None,
        payment: None,
        start: None,
        calendar: false,
        json: false,
        target_months: None,
        max_payment: None,
        goal: None,
        stress: None,
        available: None,
        completeness: None,
        change: None,
    };
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--input" => {
                i += 1;
                opts.input = Some(value(args, i, flag, "a file path").to_string());
            }
            "--strategy" => {
                i += 1;
                opts.strategy = value(args, i, flag, "a strategy name")
                    .parse()
                    .unwrap_or_else(|e| exit_with(e));
            }
            "--order" => {
                i += 1;
                opts.order = Some(
                    value(args, i, flag, "a comma-separated list of debt ids")
                        .split(',')
                        .map(|s| DebtId::new(s.trim()))
                        .collect(),
                );
            }
            "--payment" => {
                i += 1;
                opts.payment = Some(parsed(args, i, flag, "an amount"));
            }
            "--start" => {
                i += 1;
                opts.start = Some(parsed(args, i, flag, "a date in YYYY-MM-DD form"));
            }
            "--calendar" => opts.calendar = true,
            "--format" => {
                i += 1;
                opts.json = match value(args, i, flag, "'text' or 'json'") {
                    "json" => true,
                    "text" => false,
                    other => exit_with(format!("unknown format '{}'", other)),
                };
            }
            "--target-months" => {
                i += 1;
                opts.target_months = Some(parsed(args, i, flag, "a number of months"));
            }
            "--max-payment" => {
                i += 1;
                opts.max_payment = Some(parsed(args, i, flag, "an amount"));
            }
            "--goal" => {
                i += 1;
                opts.goal = Some(
                    value(args, i, flag, "a goal")
                        .parse()
                        .unwrap_or_else(|e| exit_with(e)),
                );
            }
            "--stress" => {
                i += 1;
                let level: u8 = parsed(args, i, flag, "a level from 1 to 5");
                if !(MIN_STRESS..=MAX_STRESS).contains(&level) {
                    exit_with(format!("--stress must be between 1 and 5, got {}", level));
                }
                opts.stress = Some(level);
            }
            "--available" => {
                i += 1;
                opts.available = Some(parsed(args, i, flag, "an amount"));
            }
            "--completeness" => {
                i += 1;
                opts.completeness = Some(parsed(args, i, flag, "a fraction from 0 to 1"));
            }
            "--change" => {
                i += 1;
                let json = value(args, i, flag, "a JSON change description");
                opts.change = Some(serde_json::from_str(json).unwrap_or_else(|e| {
                    exit_with(format!("invalid change '{}': {}", json, e))
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }
    opts
}

impl Options {
    fn load_debts(&self) -> Vec<Debt> {
        let path = self
            .input
            .as_deref()
            .unwrap_or_else(|| exit_with("--input <FILE> is required"));
        let content = fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading file '{}': {}", path, e);
            process::exit(1);
        });
        let file: DebtsFile = serde_json::from_str(&content).unwrap_or_else(|e| {
            eprintln!("Error parsing JSON: {}", e);
            eprintln!("Expected format:");
            eprintln!(
                r#"{{
  "debts": [
    {{ "id": "visa", "name": "Visa", "balance": "4200", "apr": "22.9", "minimum_payment": "120" }}
  ]
}}"#
            );
            process::exit(1);
        });
        for debt in &file.debts {
            if let Err(reason) = debt.check() {
                exit_with(format!("invalid debt '{}': {}", debt.id(), reason));
            }
        }
        file.debts
    }

    fn simulator(&self) -> PayoffSimulator {
        PayoffSimulator::new(SimulationConfig {
            date_convention: if self.calendar {
                DateConvention::CalendarMonth
            } else {
                DateConvention::ThirtyDay
            },
            ..Default::default()
        })
    }

    fn start_date(&self) -> NaiveDate {
        self.start
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    fn payment(&self, debts: &[Debt]) -> Decimal {
        self.payment.unwrap_or_else(|| total_minimums(debts))
    }

    fn run(&self, debts: &[Debt], strategy: Strategy) -> PayoffScenario {
        let mut request =
            SimulationRequest::new(debts, strategy, self.payment(debts), self.start_date());
        request.custom_order = self.order.as_deref();
        self.simulator()
            .simulate(&request)
            .unwrap_or_else(|e| exit_with(e))
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => exit_with(e),
    }
}

fn cmd_simulate(args: &[String]) {
    let opts = parse_options(args);
    let debts = opts.load_debts();
    let scenario = opts.run(&debts, opts.strategy);

    if opts.json {
        print_json(&scenario);
    } else {
        println!("{}", scenario);
    }
}

fn cmd_compare(args: &[String]) {
    let opts = parse_options(args);
    let debts = opts.load_debts();
    let avalanche = opts.run(&debts, Strategy::Avalanche);
    let snowball = opts.run(&debts, Strategy::Snowball);
    let comparison = compare_scenarios(&avalanche, &snowball);

    if opts.json {
        #[derive(serde::Serialize)]
        struct CompareOutput<'a> {
            avalanche: &'a PayoffScenario,
            snowball: &'a PayoffScenario,
            comparison: &'a ScenarioComparison,
        }
        print_json(&CompareOutput {
            avalanche: &avalanche,
            snowball: &snowball,
            comparison: &comparison,
        });
    } else {
        println!("{}", avalanche);
        println!("{}", snowball);
        println!("Scenario A = avalanche, Scenario B = snowball");
        println!("{}", comparison);
    }
}

fn cmd_optimize(args: &[String]) {
    let opts = parse_options(args);
    let debts = opts.load_debts();
    let goal = match (opts.target_months, opts.max_payment) {
        (Some(_), Some(_)) => exit_with("use either --target-months or --max-payment, not both"),
        (Some(months), None) => PlanGoal::TargetMonths(months),
        (None, Some(amount)) => PlanGoal::MaxPayment(amount),
        (None, None) => PlanGoal::Default,
    };
    let optimizer = PaymentOptimizer::new(opts.simulator(), Default::default());
    let plan = optimizer
        .optimize_plan(&debts, opts.strategy, goal, opts.start_date())
        .unwrap_or_else(|e| exit_with(e));

    if opts.json {
        print_json(&plan);
    } else {
        println!("{}", plan.scenario);
        println!("{}", plan.rationale);
        if !plan.converged {
            println!("(best estimate: the search did not land on the target)");
        }
        match plan.savings_vs_minimum {
            Some(savings) => println!("Interest saved vs. minimums only: {}", savings.round_dp(2)),
            None => println!("Paying only the minimums never clears these debts."),
        }
    }
}

fn cmd_recommend(args: &[String]) {
    let opts = parse_options(args);
    let debts = opts.load_debts();
    let profile = UserProfile {
        primary_goal: opts.goal,
        stress_level: opts.stress,
        available_monthly_payment: opts.available.or(opts.payment),
        profile_completeness: opts.completeness,
    };
    let recommender = StrategyRecommender::default();
    let recommendation = recommender
        .recommend_for(
            &opts.simulator(),
            &profile,
            &debts,
            opts.payment(&debts),
            opts.start_date(),
        )
        .unwrap_or_else(|e| exit_with(e));
    let report = recommender.confidence_report(&profile, &debts);

    if opts.json {
        #[derive(serde::Serialize)]
        struct RecommendOutput<'a> {
            recommendation: &'a StrategyRecommendation,
            profile_confidence: &'a ConfidenceReport,
        }
        print_json(&RecommendOutput {
            recommendation: &recommendation,
            profile_confidence: &report,
        });
    } else {
        println!("=== Strategy Recommendation ===");
        println!("Strategy:   {}", recommendation.strategy);
        println!("Confidence: {:.1}", recommendation.confidence_score);
        println!("{}", recommendation.rationale);
        for factor in &recommendation.factors {
            println!("  - {}", factor);
        }
        println!(
            "Snowball vs. avalanche: {} more interest, {} more months",
            recommendation.interest_difference.round_dp(2),
            recommendation.time_difference_months
        );
        println!("\n--- Profile ---");
        for factor in &report.factors {
            println!("  - {}", factor);
        }
    }
}

fn cmd_what_if(args: &[String]) {
    let opts = parse_options(args);
    let debts = opts.load_debts();
    let change = opts
        .change
        .clone()
        .unwrap_or_else(|| exit_with("--change <JSON> is required"));
    let request = WhatIfRequest {
        strategy: opts.strategy,
        monthly_payment: opts.payment(&debts),
        start_date: opts.start_date(),
        change,
    };
    let base = opts.run(&debts, opts.strategy);
    let scenario =
        what_if_with(&opts.simulator(), &debts, &request).unwrap_or_else(|e| exit_with(e));
    let comparison = compare_scenarios(&scenario, &base);

    if opts.json {
        #[derive(serde::Serialize)]
        struct WhatIfOutput<'a> {
            base: &'a PayoffScenario,
            what_if: &'a PayoffScenario,
            comparison: &'a ScenarioComparison,
        }
        print_json(&WhatIfOutput {
            base: &base,
            what_if: &scenario,
            comparison: &comparison,
        });
    } else {
        println!("{}", scenario);
        println!("Scenario A = what-if, Scenario B = base plan");
        println!("{}", comparison);
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = PortfolioConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--debts" => {
                i += 1;
                config.debt_count = parsed(args, i, flag, "a number");
            }
            "--max-balance" => {
                i += 1;
                config.max_balance = parsed(args, i, flag, "an amount");
            }
            "--max-apr" => {
                i += 1;
                config.max_apr = parsed(args, i, flag, "a percentage");
            }
            "--output" => {
                i += 1;
                output_path = Some(value(args, i, flag, "a file path").to_string());
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let file = DebtsFile {
        debts: generate_random_portfolio(&config),
    };
    let json = serde_json::to_string_pretty(&file).unwrap_or_else(|e| exit_with(e));

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} debts (minimums total {}) → {}",
            file.debts.len(),
            total_minimums(&file.debts),
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "simulate" => cmd_simulate(rest),
        "compare" => cmd_compare(rest),
        "optimize" => cmd_optimize(rest),
        "recommend" => cmd_recommend(rest),
        "what-if" => cmd_what_if(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
