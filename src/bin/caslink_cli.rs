//! # Caslink 终端界面
//!
//! 与桌面端共用同一套业务逻辑和数据目录，适合在没有图形环境的机器上管理订单：
//!
//! ```text
//! caslink-cli list -q csl-dx -s ALL
//! caslink-cli add --customer "Acme Ltd." --style CSL-DX-105 --status shipped
//! caslink-cli edit ORD-2024-005 --status delivered --location "Customer Premise"
//! caslink-cli chat
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use app_lib::models::chat::{ChatSnapshot, ChatVisibility};
use app_lib::models::order::{Order, OrderStatus, StatusFilter};
use app_lib::models::settings::Language;
use app_lib::services::editor::{EditTarget, OrderDraft};
use app_lib::services::i18n::{self, Text};
use app_lib::services::state::AppState;
use app_lib::utils::path;

#[derive(Parser)]
#[command(name = "caslink-cli")]
#[command(about = "Caslink logistics order tracker")]
struct Cli {
    /// Data directory (defaults to $CASLINK_DATA_DIR or ~/.caslink)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List orders, optionally filtered by search text and status
    List {
        /// Matches order ID, customer, style code and product name
        #[arg(short, long, default_value = "")]
        query: String,

        /// ALL, PROCESSING, READY_TO_PICK_UP, SHIPPED or DELIVERED
        #[arg(short, long, default_value = "ALL")]
        status: StatusFilter,
    },

    /// Show a single order
    Show { id: String },

    /// Create a new order
    Add {
        /// Order ID (a provisional ORD-xxxxx ID is generated when omitted)
        #[arg(long)]
        id: Option<String>,

        #[command(flatten)]
        fields: OrderFields,
    },

    /// Edit an existing order; only the given fields change
    Edit {
        id: String,

        #[command(flatten)]
        fields: OrderFields,
    },

    /// Delete an order
    Delete { id: String },

    /// Show or set the interface language (zh, en, ms)
    Lang { code: Option<Language> },

    /// Ask the logistics assistant a single question
    Ask {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Interactive chat with the logistics assistant
    Chat,
}

#[derive(Args)]
struct OrderFields {
    #[arg(long)]
    customer: Option<String>,
    #[arg(long)]
    product: Option<String>,
    #[arg(long)]
    style: Option<String>,
    /// Business date, YYYY-MM-DD
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    dimensions: Option<String>,
    #[arg(long)]
    status: Option<OrderStatus>,
    #[arg(long)]
    location: Option<String>,
}

impl OrderFields {
    fn apply(self, draft: &mut OrderDraft) {
        let text_fields = [
            (self.customer, &mut draft.customer_name),
            (self.product, &mut draft.product_name),
            (self.style, &mut draft.style_code),
            (self.date, &mut draft.date),
            (self.dimensions, &mut draft.dimensions),
            (self.location, &mut draft.location),
        ];
        for (value, slot) in text_fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(status) = self.status {
            draft.status = status;
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_order_line(order: &Order, lang: Language) {
    println!(
        "{:<14} {:<18} {:<12} {} · {} · {}",
        order.id,
        order.status.label(lang),
        order.style_code,
        order.product_name,
        order.customer_name,
        order.date
    );
}

fn print_order_detail(order: &Order, lang: Language) {
    println!("ID:         {}", order.id);
    println!("Customer:   {}", order.customer_name);
    println!("Product:    {}", order.product_name);
    println!("Style:      {}", order.style_code);
    println!("Date:       {}", order.date);
    println!("Dimensions: {}", order.dimensions);
    println!("Status:     {}", order.status.label(lang));
    println!("Location:   {}", order.location.as_deref().unwrap_or("-"));
}

fn print_last_reply(snapshot: &ChatSnapshot) {
    if let Some(message) = snapshot.messages.last() {
        println!("{}", message.text);
    }
}

/// 保存表单；被拒绝时返回本地化提示
fn save(state: &AppState, target: &EditTarget, draft: &OrderDraft) -> Result<Order, &'static str> {
    let lang = state.language();
    state.save_order(target, draft).map_err(|e| e.localized(lang))
}

/// 输出保存结果：成功时打印订单详情，被拒绝时在 stderr 输出提示并以非零退出
fn report_save(result: Result<Order, &'static str>, lang: Language) -> ExitCode {
    match result {
        Ok(order) => {
            print_order_detail(&order, lang);
            ExitCode::SUCCESS
        }
        Err(alert) => {
            eprintln!("{}", alert);
            ExitCode::FAILURE
        }
    }
}

async fn chat_loop(state: &AppState) -> Result<(), String> {
    let snapshot = state.open_chat();
    for message in &snapshot.messages {
        println!("{}", message.text);
    }
    println!("(/min toggles the window, /quit exits)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout()
            .flush()
            .map_err(|e| format!("输出失败: {}", e))?;

        let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| format!("读取输入失败: {}", e))?
        else {
            break;
        };

        match line.trim() {
            "/quit" => break,
            "/min" => match state.toggle_chat_minimized().visibility {
                ChatVisibility::Minimized => println!("(minimized)"),
                _ => println!("(restored)"),
            },
            "" => {}
            _ => match state.send_chat_message(&line).await {
                Ok(snapshot) => print_last_reply(&snapshot),
                Err(e) => eprintln!("{}", e),
            },
        }
    }

    state.close_chat();
    Ok(())
}

async fn run(cli: Cli) -> Result<ExitCode, String> {
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => path::get_data_path()?,
    };
    let state = AppState::initialize(data_dir)?;
    let lang = state.language();

    match cli.command {
        Command::List { query, status } => {
            let orders = state.list_orders(&query, status);
            if orders.is_empty() {
                println!("{}", i18n::text(Text::NoOrders, lang));
            }
            for order in &orders {
                print_order_line(order, lang);
            }
        }
        Command::Show { id } => match state.get_order(&id) {
            Some(order) => print_order_detail(&order, lang),
            None => {
                eprintln!("{}", i18n::text(Text::NoOrders, lang));
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::Add { id, fields } => {
            let mut draft = state.new_order_draft();
            if let Some(id) = id {
                draft.id = id;
            }
            fields.apply(&mut draft);
            return Ok(report_save(save(&state, &EditTarget::New, &draft), lang));
        }
        Command::Edit { id, fields } => {
            let Some(order) = state.get_order(&id) else {
                eprintln!("{}", i18n::text(Text::NoOrders, lang));
                return Ok(ExitCode::FAILURE);
            };
            let mut draft = OrderDraft::from_order(&order);
            fields.apply(&mut draft);
            let result = save(&state, &EditTarget::Existing(id), &draft);
            return Ok(report_save(result, lang));
        }
        Command::Delete { id } => {
            if !state.delete_order(&id) {
                log::info!("订单 {} 不存在，无需删除", id);
            }
        }
        Command::Lang { code } => match code {
            Some(code) => state.set_language(code),
            None => println!("{}", lang),
        },
        Command::Ask { text } => {
            state.open_chat();
            let snapshot = state
                .send_chat_message(&text.join(" "))
                .await
                .map_err(|e| e.to_string())?;
            print_last_reply(&snapshot);
        }
        Command::Chat => chat_loop(&state).await?,
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("错误: {}", e);
            ExitCode::FAILURE
        }
    }
}
