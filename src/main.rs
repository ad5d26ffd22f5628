use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{debug, LevelFilter};
use payoff::summary::{
    debt_free_date_from_today, format_currency, format_duration, format_month_year,
};
use payoff::{LoanComparison, LoanInput, LoanSummary, PayoffError, Schedule};
use simple_logger::SimpleLogger;
use tabled::{builder::Builder, Table};

#[derive(Parser)]
#[command(author, version, about = "Loan payoff schedules and comparisons", long_about = None)]
struct Cli {
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Amortize a single loan
    Schedule(ScheduleArgs),
    /// Compare two loans side by side
    Compare(CompareArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

// amounts are taken as text; anything unparseable is read as 0
#[derive(Args)]
struct ScheduleArgs {
    /// Loan amount
    #[arg(long, default_value = "30000")]
    balance: String,

    /// Annual interest rate in percent
    #[arg(long, default_value = "10")]
    rate: String,

    /// Fixed monthly payment
    #[arg(long, default_value = "1000")]
    payment: String,

    /// Print the month-by-month schedule
    #[arg(long)]
    table: bool,
}

#[derive(Args)]
struct CompareArgs {
    #[arg(long)]
    balance_a: String,
    #[arg(long)]
    rate_a: String,
    #[arg(long)]
    payment_a: String,

    #[arg(long)]
    balance_b: String,
    #[arg(long)]
    rate_b: String,
    #[arg(long)]
    payment_b: String,
}

fn main() -> Result<(), PayoffError> {
    let cli = Cli::parse();

    SimpleLogger::new()
        .with_level(cli.log_level.into())
        .init()?;

    match cli.command {
        Command::Schedule(args) => {
            let input = LoanInput::from_text(&args.balance, &args.rate, &args.payment);
            debug!("{:?}", input);
            let schedule = input.schedule();
            let summary = LoanSummary::from_schedule(&schedule);

            println!("{}", payoff_sentence(&summary)?);
            print_totals(&summary);
            if args.table {
                println!("{}", schedule_table(&schedule));
            }
        }
        Command::Compare(args) => {
            let loans = [
                LoanInput::from_text(&args.balance_a, &args.rate_a, &args.payment_a),
                LoanInput::from_text(&args.balance_b, &args.rate_b, &args.payment_b),
            ];
            let summaries = loans.map(|input| LoanSummary::from_schedule(&input.schedule()));

            for (label, summary) in ["Loan A", "Loan B"].iter().zip(&summaries) {
                println!("{}", label);
                println!("{}", payoff_sentence(summary)?);
                print_totals(summary);
                println!();
            }

            let comparison = LoanComparison::between(&summaries[0], &summaries[1]);
            println!(
                "Interest difference: {}",
                format_currency(comparison.interest_difference)
            );
            println!(
                "Payoff difference: {}",
                format_duration(comparison.months_difference)
                    .unwrap_or_else(|| "none".to_string())
            );
        }
    }

    Ok(())
}

fn payoff_sentence(summary: &LoanSummary) -> Result<String, PayoffError> {
    if summary.total_months == 0 {
        return Ok("There is no balance to pay off.".to_string());
    }
    if !summary.pays_off {
        return Ok("This loan will never be paid off with the current payment.".to_string());
    }

    let date = debt_free_date_from_today(summary.total_months).ok_or(
        PayoffError::DateOutOfRange {
            months: summary.total_months,
        },
    )?;
    Ok(format!(
        "You will be debt free in {} ({} from now)",
        format_month_year(date),
        format_duration(summary.total_months).unwrap_or_default()
    ))
}

fn print_totals(summary: &LoanSummary) {
    println!(
        "Interest Paid:  {}",
        format_currency(summary.total_interest_paid)
    );
    println!(
        "Principal Paid: {}",
        format_currency(summary.total_principal_paid)
    );
    println!("Total Paid:     {}", format_currency(summary.total_paid));
}

fn schedule_table(schedule: &Schedule) -> Table {
    let mut builder = Builder::default();
    builder.push_record([
        "Month",
        "Date",
        "Interest",
        "Principal",
        "Interest Paid",
        "Principal Paid",
        "Remaining Balance",
    ]);
    for record in schedule {
        builder.push_record([
            record.month.to_string(),
            debt_free_date_from_today(record.month)
                .map(format_month_year)
                .unwrap_or_default(),
            format_currency(record.interest),
            format_currency(record.principal),
            format_currency(record.total_interest),
            format_currency(record.total_principal),
            format_currency(record.remaining_balance),
        ]);
    }
    Table::from(builder)
}

// the library's public value types can cross threads and be moved freely
#[cfg(test)]
fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn normal_types() {
    is_normal::<payoff::PaymentRecord>();
    is_normal::<Schedule>();
    is_normal::<LoanSummary>();
}
