use clap::{Args, Parser, Subcommand};

use settleup_client::{ApiClient, Repository, Resource, ResourceStream, User};

mod config;

#[derive(Parser, Debug)]
#[command(name = "settleup")]
#[command(about = "Operator CLI for the SettleUp expense-splitting backend")]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:8000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override log filter (e.g. debug, settleup_client=debug).
    #[arg(long)]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Probe backend connectivity.
    Ping,
    /// List expense categories with examples.
    Categories,
    Group(Group),
    Expense(Expense),
    /// Compute the settlement plan for a group.
    Settle {
        group_id: String,
    },
    Scan(ScanArgs),
}

#[derive(Args, Debug)]
struct Group {
    #[command(subcommand)]
    command: GroupCommand,
}

#[derive(Subcommand, Debug)]
enum GroupCommand {
    Create(GroupCreateArgs),
    /// Fetch one group's details.
    Show { group_id: String },
    /// Fetch one group's expense listing.
    Expenses { group_id: String },
    /// Print group ids known to this process, or the configured seeds.
    Known,
}

#[derive(Args, Debug)]
struct GroupCreateArgs {
    #[arg(long)]
    name: String,
    /// Repeatable: `--member "Ann <ann@example.com>"`. Member ids are
    /// generated locally and echoed back by the server.
    #[arg(long = "member", value_parser = parse_member, required = true)]
    members: Vec<User>,
}

#[derive(Args, Debug)]
struct Expense {
    #[command(subcommand)]
    command: ExpenseCommand,
}

#[derive(Subcommand, Debug)]
enum ExpenseCommand {
    Add(ExpenseAddArgs),
}

#[derive(Args, Debug)]
struct ExpenseAddArgs {
    #[arg(long)]
    group_id: String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    amount: f64,
    #[arg(long)]
    paid_by: String,
    /// Repeatable: user ids sharing the expense.
    #[arg(long = "split", required = true)]
    split: Vec<String>,
    /// Optional; the server categorizes when omitted.
    #[arg(long)]
    category: Option<String>,
}

#[derive(Args, Debug)]
struct ScanArgs {
    /// Path to the receipt image.
    #[arg(long)]
    image: String,
    #[arg(long)]
    group_id: String,
    #[arg(long)]
    paid_by: String,
    #[arg(long = "split", required = true)]
    split: Vec<String>,
}

fn parse_member(raw: &str) -> Result<User, String> {
    let (name, email) = match raw.split_once('<') {
        Some((name, rest)) => (name.trim(), rest.trim_end_matches('>').trim()),
        None => (raw.trim(), ""),
    };
    if name.is_empty() {
        return Err(format!("invalid member: {raw}"));
    }
    Ok(User {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.to_string(),
        email: email.to_string(),
    })
}

type CliResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> CliResult {
    let cli = Cli::parse();
    let mut settings = config::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
    }
    if let Some(log) = cli.log {
        settings.log = log;
    }

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "settleup={level},settleup_client={level}",
            level = settings.log
        ))
        .init();

    let repository = Repository::new(ApiClient::new(&settings.base_url));

    match cli.command {
        Command::Ping => drive(repository.test_connection()).await,
        Command::Categories => drive(repository.get_categories()).await,
        Command::Group(group) => match group.command {
            GroupCommand::Create(args) => {
                drive(repository.create_group(&args.name, &args.members)).await
            }
            GroupCommand::Show { group_id } => {
                drive(repository.get_group_details(&group_id)).await
            }
            GroupCommand::Expenses { group_id } => {
                drive(repository.get_group_expenses(&group_id)).await
            }
            GroupCommand::Known => {
                let index = repository.group_index();
                let ids = if index.has_groups() {
                    index.list()
                } else {
                    tracing::info!("index empty, using configured seeds");
                    settings.seed_groups.clone()
                };
                for id in ids {
                    println!("{id}");
                }
                Ok(())
            }
        },
        Command::Expense(expense) => match expense.command {
            ExpenseCommand::Add(args) => {
                drive(repository.create_expense(
                    &args.description,
                    args.amount,
                    &args.paid_by,
                    &args.split,
                    &args.group_id,
                    args.category.as_deref(),
                ))
                .await
            }
        },
        Command::Settle { group_id } => drive(repository.calculate_settlement(&group_id)).await,
        Command::Scan(args) => {
            let image = tokio::fs::read(&args.image).await?;
            drive(repository.scan_receipt(image, &args.group_id, &args.paid_by, &args.split))
                .await
        }
    }
}

/// Renders one resource sequence: a note while loading, pretty JSON on
/// success, the message as the process error on failure.
async fn drive<T: serde::Serialize>(mut stream: ResourceStream<T>) -> CliResult {
    while let Some(state) = stream.recv().await {
        match state {
            Resource::Loading => tracing::info!("request in flight"),
            Resource::Success(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            Resource::Error(message) => return Err(message.into()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_with_email() {
        let member = parse_member("Ann <ann@example.com>").unwrap();
        assert_eq!(member.name, "Ann");
        assert_eq!(member.email, "ann@example.com");
        assert!(!member.id.is_empty());
    }

    #[test]
    fn member_without_email() {
        let member = parse_member("Bob").unwrap();
        assert_eq!(member.name, "Bob");
        assert_eq!(member.email, "");
    }

    #[test]
    fn member_needs_a_name() {
        assert!(parse_member("<x@example.com>").is_err());
    }

    #[test]
    fn distinct_members_get_distinct_ids() {
        let first = parse_member("Ann").unwrap();
        let second = parse_member("Ann").unwrap();
        assert_ne!(first.id, second.id);
    }
}
