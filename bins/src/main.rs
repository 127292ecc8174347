use clap::{Parser, Subcommand};
use dotenv::dotenv;
use eyre::Context;
use log::info;
use qiwi::{lifetime_by_days, Amount, BillFields, FormOptions, QiwiPull};
use serde_json::Value;

#[derive(Parser)]
#[command(author, version, about = "Qiwi pull API client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a fresh bill id
    NewId,
    /// Create a bill; a new id is generated when --bill-id is omitted
    CreateBill {
        #[arg(long)]
        bill_id: Option<String>,
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "RUB")]
        ccy: String,
        #[arg(long)]
        comment: Option<String>,
        /// Payer reference, e.g. tel:+79000000000
        #[arg(long)]
        user: String,
        /// Bill lifetime in days
        #[arg(long, default_value_t = 1)]
        days: i64,
    },
    /// Get bill status
    Status { bill_id: String },
    /// Reject an unpaid bill
    Cancel { bill_id: String },
    /// Refund a paid bill
    Refund {
        bill_id: String,
        refund_id: String,
        #[arg(long)]
        amount: Option<String>,
    },
    /// Get refund status
    RefundStatus { bill_id: String, refund_id: String },
    /// Print the payment page url
    Form {
        transaction: String,
        #[arg(long)]
        shop: Option<String>,
        #[arg(long)]
        iframe: bool,
        #[arg(long)]
        success_url: Option<String>,
        #[arg(long)]
        fail_url: Option<String>,
        #[arg(long)]
        pay_source: Option<String>,
        /// Create the bill on the form instead of paying an existing one
        #[arg(long)]
        create: bool,
    },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let dotenv = dotenv();
    pretty_env_logger::init();
    color_eyre::install()?;
    if let Err(err) = dotenv {
        info!("Failed to load .env file: {}", err);
    }
    let env = env::Env::from_process().context("Failed to load config")?;

    let cli = Cli::parse();
    let qiwi = QiwiPull::new(env.credentials());

    let response = match cli.command {
        Command::NewId => {
            println!("{}", qiwi.generate_id());
            return Ok(());
        }
        Command::CreateBill {
            bill_id,
            amount,
            ccy,
            comment,
            user,
            days,
        } => {
            let bill_id = bill_id.unwrap_or_else(|| qiwi.generate_id());
            let mut fields = BillFields::new(amount, ccy)
                .user(user)
                .lifetime(lifetime_by_days(days)?);
            fields.comment = comment;
            info!("Creating bill {}", bill_id);
            qiwi.create_bill(&bill_id, &fields).await?
        }
        Command::Status { bill_id } => qiwi.get_status(&bill_id).await?,
        Command::Cancel { bill_id } => qiwi.cancel(&bill_id).await?,
        Command::Refund {
            bill_id,
            refund_id,
            amount,
        } => {
            qiwi.refund(&bill_id, &refund_id, amount.map(Amount::from))
                .await?
        }
        Command::RefundStatus { bill_id, refund_id } => {
            qiwi.get_refund_status(&bill_id, &refund_id).await?
        }
        Command::Form {
            transaction,
            shop,
            iframe,
            success_url,
            fail_url,
            pay_source,
            create,
        } => {
            let options = FormOptions {
                shop,
                transaction: Some(transaction),
                iframe,
                success_url,
                fail_url,
                pay_source,
            };
            let url = if create {
                qiwi.create_bill_and_payment_form(&options)?
            } else {
                qiwi.create_payment_form(&options)?
            };
            println!("{}", url);
            return Ok(());
        }
    };

    print_response(&response)
}

fn print_response(response: &Value) -> eyre::Result<()> {
    let pretty = serde_json::to_string_pretty(response).context("Failed to format response")?;
    println!("{}", pretty);
    Ok(())
}
