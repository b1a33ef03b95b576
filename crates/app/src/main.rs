use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use examtrack_core::milestones::ClaimOutcome;
use examtrack_core::model::{GoalId, MilestoneId, RewardSpec};
use services::{AppService, Clock, DashboardView};
use storage::{JsonFileStore, Stores};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    MissingOperand { what: &'static str },
    InvalidOperand { what: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::MissingOperand { what } => write!(f, "missing {what}"),
            ArgsError::InvalidOperand { what, raw } => write!(f, "invalid {what}: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- <command> [--data-dir <path>]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  dashboard           mark today's visit and show the dashboard (default)");
    eprintln!("  login <email>       sign in");
    eprintln!("  logout              sign out and drop the stored session");
    eprintln!("  goals               list weekly goals");
    eprintln!("  add <text>          add a weekly goal");
    eprintln!("  toggle <goal-id>    flip a goal's checkbox");
    eprintln!("  rewards             show the reward ladder");
    eprintln!("  claim <id>          claim an unlocked reward");
    eprintln!("  reset               wipe stored progress and rewards");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --data-dir examtrack-data");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  EXAMTRACK_DATA_DIR, EXAMTRACK_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Dashboard,
    Login,
    Logout,
    Goals,
    Add,
    Toggle,
    Rewards,
    Claim,
    Reset,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "dashboard" => Some(Self::Dashboard),
            "login" => Some(Self::Login),
            "logout" => Some(Self::Logout),
            "goals" => Some(Self::Goals),
            "add" => Some(Self::Add),
            "toggle" => Some(Self::Toggle),
            "rewards" => Some(Self::Rewards),
            "claim" => Some(Self::Claim),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

struct Args {
    data_dir: PathBuf,
    operands: Vec<String>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut data_dir = std::env::var("EXAMTRACK_DATA_DIR")
            .ok()
            .map_or_else(|| PathBuf::from("examtrack-data"), PathBuf::from);
        let mut operands = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data-dir" => {
                    let value = require_value(args, "--data-dir")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidOperand {
                            what: "--data-dir value",
                            raw: value,
                        });
                    }
                    data_dir = PathBuf::from(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ if arg.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => operands.push(arg),
            }
        }

        Ok(Self { data_dir, operands })
    }

    fn operand(&self, index: usize, what: &'static str) -> Result<&str, ArgsError> {
        self.operands
            .get(index)
            .map(String::as_str)
            .ok_or(ArgsError::MissingOperand { what })
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("EXAMTRACK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .init();
}

fn print_dashboard(view: &DashboardView) {
    println!("{}", view.greeting.title);
    if let Some(subtitle) = &view.greeting.subtitle {
        println!("{subtitle}");
    }
    println!();
    println!(
        "Chapter progress: {:.0}%  ({})",
        view.progress_percent, view.motivation
    );

    print!("This week: ");
    for (index, day) in view.week.days.iter().enumerate() {
        let mark = if day.visited { 'x' } else { '.' };
        if index == view.week.today_index {
            print!(" [{:>2} {mark}]", day.date.day());
        } else {
            print!("  {:>2} {mark} ", day.date.day());
        }
    }
    println!();

    println!(
        "Saved items: {}  Liked items: {}  Rewards ready: {}",
        view.saved_items, view.liked_items, view.available_rewards
    );
    if view.celebration {
        println!("All goals complete. Great work!");
    }
}

fn print_goals(service: &AppService) {
    if service.goals().is_empty() {
        println!("No goals yet. Add one with: add <text>");
        return;
    }
    for goal in service.goals() {
        let mark = if goal.is_completed() { 'x' } else { ' ' };
        println!("[{mark}] {}  {}", goal.id(), goal.text());
    }
    println!("Progress: {:.0}%", service.progress().percent());
}

fn print_rewards(service: &AppService) {
    for milestone in service.milestones() {
        let status = if milestone.is_claimed() {
            "claimed"
        } else if milestone.is_unlocked() {
            "ready"
        } else {
            "locked"
        };
        println!(
            "{:<4} {:>3.0}%  {:<8} {}",
            milestone.id().as_str(),
            milestone.required_progress(),
            status,
            milestone.title()
        );
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: show the dashboard when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Dashboard,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Dashboard,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let args = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    tracing::debug!(data_dir = %args.data_dir.display(), "opening store");
    let store = Arc::new(JsonFileStore::new(&args.data_dir));
    let mut service = AppService::new(Stores::new(store), Clock::default_clock());

    match cmd {
        Command::Dashboard => {
            let view = service.open_dashboard()?;
            print_dashboard(&view);
        }
        Command::Login => {
            let email = args.operand(0, "email")?;
            service.login(email)?;
            println!("Signed in as {email}");
        }
        Command::Logout => {
            service.logout();
            println!("Signed out");
        }
        Command::Goals => print_goals(&service),
        Command::Add => {
            let text = args.operands.join(" ");
            if text.trim().is_empty() {
                return Err(ArgsError::MissingOperand { what: "goal text" }.into());
            }
            let added = service.add_goal(&text)?;
            println!(
                "Added goal {} ({:.0}% complete)",
                added.id,
                service.progress().percent()
            );
        }
        Command::Toggle => {
            let raw = args.operand(0, "goal id")?;
            let id: GoalId = raw.parse().map_err(|_| ArgsError::InvalidOperand {
                what: "goal id",
                raw: raw.to_owned(),
            })?;
            let update = service.toggle_goal(id)?;
            let state = if update.toggle.completed {
                "checked"
            } else {
                "unchecked"
            };
            println!(
                "Goal {} {state} ({:.0}% complete)",
                update.toggle.id, update.toggle.progress.to
            );
            for milestone in &update.newly_unlocked {
                println!("Unlocked reward {milestone}");
            }
            if update.celebration {
                println!("All goals complete. Great work!");
            }
        }
        Command::Rewards => print_rewards(&service),
        Command::Claim => {
            let raw = args.operand(0, "milestone id")?;
            let id: MilestoneId = raw.parse().map_err(|_| ArgsError::InvalidOperand {
                what: "milestone id",
                raw: raw.to_owned(),
            })?;
            match service.claim_milestone(&id)? {
                ClaimOutcome::Granted(reward) => {
                    println!("Claimed: {}", reward.title());
                    if let RewardSpec::Planner { href, .. } = &reward {
                        println!("Planner unlocked at {href}");
                    }
                }
                ClaimOutcome::AlreadyClaimed => println!("Already claimed"),
            }
        }
        Command::Reset => {
            service.reset();
            println!("Stored progress cleared");
        }
    }

    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
