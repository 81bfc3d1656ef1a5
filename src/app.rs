use std::io::Write as _;
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressDrawTarget};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::form::Mode;
use crate::session::{Options, Session};
use crate::view;

fn print_banner(no_color: bool) {
    const BANNER: &str = r#"
    _                 __          __
   (_)___ _   ______/ /__  _____/ /__
  / / __ \ | / / __  / _ \/ ___/ //_/
 / / / / / |/ / /_/ /  __(__  ) ,<
/_/_/ /_/|___/\__,_/\___/____/_/|_|

       v0.1.0 - inventory backend console
    "#;
    if no_color {
        print!("{}", BANNER);
    } else {
        let _ = write!(&mut rainbowcoat::stdout(), "{}", BANNER);
    }
    println!();
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

#[derive(Clone, Debug)]
struct RunConfig {
    base_url: String,
    timeout: usize,
    currency: String,
    no_color: bool,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let base_url = args
        .base_url
        .or(cfg.base_url)
        .unwrap_or_else(|| crate::api::DEFAULT_BASE_URL.to_string())
        .trim()
        .to_string();
    if reqwest::Url::parse(&base_url).is_err() {
        return Err(format!("invalid base URL '{base_url}'"));
    }

    let timeout = args.timeout.or(cfg.timeout).unwrap_or(10);
    if timeout == 0 {
        return Err("invalid timeout, expected positive integer".to_string());
    }

    let currency = args
        .currency
        .or(cfg.currency)
        .unwrap_or_else(|| "₱".to_string());

    Ok(RunConfig {
        base_url,
        timeout,
        currency,
        no_color,
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    Products,
    Suppliers,
    Orders,
}

impl Entity {
    fn parse(word: &str) -> Option<Self> {
        match word.trim().to_ascii_lowercase().as_str() {
            "product" | "products" | "p" => Some(Self::Products),
            "supplier" | "suppliers" | "s" => Some(Self::Suppliers),
            "order" | "orders" | "o" => Some(Self::Orders),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Empty,
    Help,
    Quit,
    ReloadAll,
    Reload(Entity),
    Add(Entity),
    Edit(String),
    Delete(Entity, String),
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Command::Empty;
    };
    match head.to_ascii_lowercase().as_str() {
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "all" => Command::ReloadAll,
        "add" | "new" => match words.next().and_then(Entity::parse) {
            Some(entity) => Command::Add(entity),
            None => Command::Unknown(line.trim().to_string()),
        },
        "edit" => match words.next() {
            Some(id) => Command::Edit(id.to_string()),
            None => Command::Unknown(line.trim().to_string()),
        },
        "delete" | "del" | "rm" => {
            let entity = words.next().and_then(Entity::parse);
            let id = words.next();
            match (entity, id) {
                (Some(entity), Some(id)) => Command::Delete(entity, id.to_string()),
                _ => Command::Unknown(line.trim().to_string()),
            }
        }
        other => match Entity::parse(other) {
            Some(entity) => Command::Reload(entity),
            None => Command::Unknown(line.trim().to_string()),
        },
    }
}

fn print_help() {
    println!("commands:");
    println!("  products | suppliers | orders   reload and render one table");
    println!("  all                             reload all three tables");
    println!("  add product|supplier|order      fill the form and create");
    println!("  edit <product-id>               load a product into the form, then update");
    println!("  delete product|supplier|order <id>");
    println!("  help, quit");
}

fn loading_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message(message.to_string());
    pb
}

type InputLines = Lines<BufReader<Stdin>>;

/// Read one answer for a named field. Empty input keeps the shown current
/// value, which is what makes the edit flow's pre-populated fields work.
async fn prompt(lines: &mut InputLines, label: &str, current: &str) -> String {
    if current.is_empty() {
        print!("{label}: ");
    } else {
        print!("{label} [{current}]: ");
    }
    let _ = std::io::stdout().flush();
    match lines.next_line().await {
        Ok(Some(line)) => {
            let answer = line.trim().to_string();
            if answer.is_empty() {
                current.to_string()
            } else {
                answer
            }
        }
        _ => current.to_string(),
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Blocking confirmation. Anything but an explicit yes declines.
async fn confirm(lines: &mut InputLines, question: &str) -> bool {
    print!("{question} [y/N]: ");
    let _ = std::io::stdout().flush();
    match lines.next_line().await {
        Ok(Some(answer)) => is_yes(&answer),
        _ => false,
    }
}

async fn fill_product_form(lines: &mut InputLines, session: &mut Session) {
    let form = &mut session.product_form;
    form.sku = prompt(lines, "sku", &form.sku.clone()).await;
    form.name = prompt(lines, "name", &form.name.clone()).await;
    form.price = prompt(lines, "price", &form.price.clone()).await;
    form.stock = prompt(lines, "stock", &form.stock.clone()).await;
    form.category = prompt(lines, "category", &form.category.clone()).await;
    form.description = prompt(lines, "description", &form.description.clone()).await;
}

async fn fill_supplier_form(lines: &mut InputLines, session: &mut Session) {
    let form = &mut session.supplier_form;
    form.name = prompt(lines, "name", &form.name.clone()).await;
    form.contact = prompt(lines, "contact", &form.contact.clone()).await;
    form.email = prompt(lines, "email", &form.email.clone()).await;
    form.phone = prompt(lines, "phone", &form.phone.clone()).await;
    form.address = prompt(lines, "address", &form.address.clone()).await;
}

async fn fill_order_form(lines: &mut InputLines, session: &mut Session) {
    let supplier_id = prompt(lines, "supplier id", &session.order_form.supplier_id.clone()).await;
    session.order_form.supplier_id = supplier_id;
    session.order_form.items.clear();
    loop {
        let product_id = prompt(lines, "item product id (empty to finish)", "").await;
        if product_id.is_empty() {
            break;
        }
        let quantity = prompt(lines, "quantity", "1").await;
        session
            .order_form
            .items
            .push(crate::form::OrderItemField {
                product_id,
                quantity,
            });
    }
    let notes = prompt(lines, "notes", &session.order_form.notes.clone()).await;
    session.order_form.notes = notes;
}

async fn reload(session: &mut Session, entity: Entity) {
    let (label, result) = match entity {
        Entity::Products => {
            let pb = loading_spinner("loading products");
            let result = session.load_products().await;
            pb.finish_and_clear();
            ("products", result)
        }
        Entity::Suppliers => {
            let pb = loading_spinner("loading suppliers");
            let result = session.load_suppliers().await;
            pb.finish_and_clear();
            ("suppliers", result)
        }
        Entity::Orders => {
            let pb = loading_spinner("loading orders");
            let result = session.load_orders().await;
            pb.finish_and_clear();
            ("orders", result)
        }
    };
    match result {
        Ok(()) => {
            let rendered = match entity {
                Entity::Products => session.products.render(),
                Entity::Suppliers => session.suppliers.render(),
                Entity::Orders => session.orders.render(),
            };
            print!("{rendered}");
        }
        Err(e) => view::notify_error(&format!("failed to load {label}: {e}")),
    }
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    print_banner(run.no_color);
    format_kv_line(
        "Backend",
        &format!("url={} timeout={}s", run.base_url, run.timeout),
    );
    format_kv_line(
        "Output",
        &format!(
            "currency={} color={}",
            run.currency,
            if run.no_color { "off" } else { "on" }
        ),
    );
    println!();

    let mut session = Session::new(Options {
        base_url: run.base_url.clone(),
        timeout_seconds: run.timeout,
        currency: run.currency.clone(),
    })
    .map_err(|e| e.to_string())?;

    // Initial page load: three independent fetches, then the three tables.
    let pb = loading_spinner("loading products, suppliers, orders");
    let failures = session.bootstrap().await;
    pb.finish_and_clear();
    for failure in failures.iter() {
        view::notify_error(&failure.to_string());
    }
    print!("{}", session.products.render());
    print!("{}", session.suppliers.render());
    print!("{}", session.orders.render());
    println!();
    println!("type 'help' for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("invdesk> ");
        let _ = std::io::stdout().flush();
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(format!("failed to read input: {e}")),
        };
        match parse_command(&line) {
            Command::Empty => {}
            Command::Help => print_help(),
            Command::Quit => break,
            Command::ReloadAll => {
                reload(&mut session, Entity::Products).await;
                reload(&mut session, Entity::Suppliers).await;
                reload(&mut session, Entity::Orders).await;
            }
            Command::Reload(entity) => reload(&mut session, entity).await,
            Command::Add(Entity::Products) => {
                if session.product_form.mode != Mode::Create {
                    // `add` always creates; drop any pending edit first.
                    session.product_form.reset();
                }
                fill_product_form(&mut lines, &mut session).await;
                let pb = loading_spinner("creating product");
                let result = session.submit_product_form().await;
                pb.finish_and_clear();
                match result {
                    Ok(()) => {
                        view::notify_ok("product created");
                        print!("{}", session.products.render());
                    }
                    Err(e) => view::notify_error(&e.to_string()),
                }
            }
            Command::Add(Entity::Suppliers) => {
                fill_supplier_form(&mut lines, &mut session).await;
                let pb = loading_spinner("creating supplier");
                let result = session.submit_supplier_form().await;
                pb.finish_and_clear();
                match result {
                    Ok(()) => {
                        view::notify_ok("supplier created");
                        print!("{}", session.suppliers.render());
                    }
                    Err(e) => view::notify_error(&e.to_string()),
                }
            }
            Command::Add(Entity::Orders) => {
                fill_order_form(&mut lines, &mut session).await;
                let pb = loading_spinner("creating order");
                let result = session.submit_order_form().await;
                pb.finish_and_clear();
                match result {
                    Ok(()) => {
                        view::notify_ok("order created");
                        print!("{}", session.orders.render());
                    }
                    Err(e) => view::notify_error(&e.to_string()),
                }
            }
            Command::Edit(id) => {
                let pb = loading_spinner("loading product");
                let result = session.start_edit(&id).await;
                pb.finish_and_clear();
                if let Err(e) = result {
                    view::notify_error(&e.to_string());
                    continue;
                }
                fill_product_form(&mut lines, &mut session).await;
                let pb = loading_spinner("updating product");
                let result = session.submit_product_form().await;
                pb.finish_and_clear();
                match result {
                    Ok(()) => {
                        view::notify_ok("product updated");
                        print!("{}", session.products.render());
                    }
                    Err(e) => view::notify_error(&e.to_string()),
                }
            }
            Command::Delete(entity, id) => {
                let question = match entity {
                    Entity::Products => "Delete this product?",
                    Entity::Suppliers => "Delete supplier?",
                    Entity::Orders => "Delete order?",
                };
                if !confirm(&mut lines, question).await {
                    continue;
                }
                let pb = loading_spinner("deleting");
                let result = match entity {
                    Entity::Products => session.delete_product(&id).await,
                    Entity::Suppliers => session.delete_supplier(&id).await,
                    Entity::Orders => session.delete_order(&id).await,
                };
                pb.finish_and_clear();
                match result {
                    Ok(()) => {
                        view::notify_ok("deleted");
                        let rendered = match entity {
                            Entity::Products => session.products.render(),
                            Entity::Suppliers => session.suppliers.render(),
                            Entity::Orders => session.orders.render(),
                        };
                        print!("{rendered}");
                    }
                    Err(e) => view::notify_error(&e.to_string()),
                }
            }
            Command::Unknown(input) => {
                view::notify_error(&format!("unknown command '{input}', try 'help'"));
            }
        }
    }

    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = CliArgs::parse();

    if args.init_config {
        let path = args
            .config
            .as_deref()
            .map(config::expand_tilde)
            .or_else(config::default_config_path)
            .ok_or_else(|| "could not resolve a config path".to_string())?;
        config::ensure_default_config_file(&path)?;
        println!("config file at {}", path.display());
        return Ok(());
    }

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));
    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))?;
    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_fall_back_to_fixed_backend() {
        let args = CliArgs::parse_from(["invdesk"]);
        let cfg = ConfigFile::default();
        let run = build_run_config(args, cfg).unwrap();
        assert_eq!(run.base_url, "http://localhost:5000/api");
        assert_eq!(run.timeout, 10);
        assert_eq!(run.currency, "₱");
    }

    #[test]
    fn args_override_config() {
        let args = CliArgs::parse_from(["invdesk", "-u", "http://10.0.0.2:9000/api"]);
        let cfg = ConfigFile {
            base_url: Some("http://ignored:1/api".to_string()),
            timeout: Some(3),
            ..Default::default()
        };
        let run = build_run_config(args, cfg).unwrap();
        assert_eq!(run.base_url, "http://10.0.0.2:9000/api");
        assert_eq!(run.timeout, 3);
    }

    #[test]
    fn color_flag_overrides_no_color() {
        let args = CliArgs::parse_from(["invdesk", "--nc", "-c"]);
        let run = build_run_config(args, ConfigFile::default()).unwrap();
        assert!(!run.no_color);
    }

    #[test]
    fn parse_command_covers_flows() {
        assert_eq!(parse_command("products"), Command::Reload(Entity::Products));
        assert_eq!(parse_command("  "), Command::Empty);
        assert_eq!(parse_command("add supplier"), Command::Add(Entity::Suppliers));
        assert_eq!(parse_command("edit 64f1"), Command::Edit("64f1".to_string()));
        assert_eq!(
            parse_command("delete order abc123"),
            Command::Delete(Entity::Orders, "abc123".to_string())
        );
        assert_eq!(
            parse_command("delete order"),
            Command::Unknown("delete order".to_string())
        );
    }

    #[test]
    fn confirmation_requires_explicit_yes() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yeah"));
    }
}
