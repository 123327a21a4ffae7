use std::io::Write;
use std::time::Duration;

use clap::{error::ErrorKind, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::catalog::{Catalog, Product};
use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::fetch::{self, ClientOptions, FetchError};
use crate::output::{self, console, table, OutputFormat};
use crate::pagination::{Paginator, DEFAULT_MAX_BUTTONS, DEFAULT_PAGE_SIZE};

fn print_banner() {
    const BANNER: &str = r#"
             __        __
  _________ _/ /_____ _/ /___  ____ _   ____  ____ _____ ____  _____
 / ___/ __ `/ __/ __ `/ / __ \/ __ `/  / __ \/ __ `/ __ `/ _ \/ ___/
/ /__/ /_/ / /_/ /_/ / / /_/ / /_/ /  / /_/ / /_/ / /_/ /  __/ /
\___/\__,_/\__/\__,_/_/\____/\__, /  / .___/\__,_/\__, /\___/_/
                            /____/  /_/          /____/
"#;
    print!("{}", BANNER);
    println!(
        "       v{} - products ordered by descending popularity\n",
        env!("CARGO_PKG_VERSION")
    );
}

fn print_actions() {
    println!(
        ":: {} fetch products  {} next  {} prev  {} go to page  {} help  {} quit",
        "f".bold().green(),
        "n".bold().green(),
        "p".bold().green(),
        "<N>".bold().green(),
        "h".bold().green(),
        "q".bold().green(),
    );
}

#[derive(Clone, Debug)]
struct RunConfig {
    url: String,
    timeout: u64,
    proxy: Option<String>,
    page_size: usize,
    max_buttons: usize,
    batch: bool,
    page: usize,
    format: OutputFormat,
    no_color: bool,
    verbose: u8,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let url = args
        .url
        .or(cfg.url)
        .map(|u| u.trim().to_string())
        .unwrap_or_else(|| fetch::DEFAULT_CATALOG_URL.to_string());
    reqwest::Url::parse(&url).map_err(|e| format!("invalid URL '{url}': {e}"))?;

    let timeout = args
        .timeout
        .or(cfg.timeout)
        .unwrap_or(fetch::DEFAULT_TIMEOUT_SECONDS);
    if timeout == 0 {
        return Err("invalid timeout, expected positive integer".to_string());
    }

    let page_size = args.page_size.or(cfg.page_size).unwrap_or(DEFAULT_PAGE_SIZE);
    if page_size == 0 {
        return Err("invalid page-size, expected positive integer".to_string());
    }

    let max_buttons = args
        .max_buttons
        .or(cfg.max_buttons)
        .unwrap_or(DEFAULT_MAX_BUTTONS);
    if max_buttons == 0 {
        return Err("invalid max-buttons, expected positive integer".to_string());
    }

    let format = match args.format.or(cfg.format) {
        Some(raw) => OutputFormat::parse(&raw)
            .ok_or_else(|| format!("invalid format '{raw}', expected text or json"))?,
        None => OutputFormat::Text,
    };

    let proxy = args
        .proxy
        .or(cfg.proxy)
        .filter(|p| !p.trim().is_empty());

    Ok(RunConfig {
        url,
        timeout,
        proxy,
        page_size,
        max_buttons,
        batch: args.batch,
        page: args.page.unwrap_or(1),
        format,
        no_color,
        verbose: args.verbose,
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Action {
    Fetch,
    Next,
    Prev,
    Goto(usize),
    Help,
    Quit,
    Unknown(String),
}

fn parse_action(line: &str) -> Option<Action> {
    let input = line.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(page) = input.parse::<usize>() {
        return Some(Action::Goto(page));
    }
    let action = match input.to_lowercase().as_str() {
        "f" | "fetch" => Action::Fetch,
        "n" | "next" => Action::Next,
        "p" | "prev" | "previous" => Action::Prev,
        "h" | "help" | "?" => Action::Help,
        "q" | "quit" | "exit" => Action::Quit,
        _ => Action::Unknown(input.to_string()),
    };
    Some(action)
}

fn spinner(url: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template(":: {spinner} {msg} :: [{elapsed_precise}]") {
        pb.set_style(style);
    }
    pb.set_message(format!("fetching {url}"));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

struct Session {
    client: reqwest::Client,
    url: String,
    pager: Paginator<Product>,
    loaded: bool,
    max_buttons: usize,
    verbose: u8,
}

impl Session {
    fn new(client: reqwest::Client, run: &RunConfig) -> Self {
        Self {
            client,
            url: run.url.clone(),
            pager: Paginator::new(run.page_size),
            loaded: false,
            max_buttons: run.max_buttons,
            verbose: run.verbose,
        }
    }

    fn is_shown(&self) -> bool {
        self.loaded && !self.pager.is_empty()
    }

    fn load(&mut self, catalog: Catalog) {
        if let Some(count) = catalog.count.as_ref() {
            console::debug(self.verbose, format!("catalog reports count {count}"));
        }
        self.pager.set_records(catalog.products);
        self.loaded = true;
    }

    /// On failure the previous records and page stay as they were.
    async fn fetch(&mut self) {
        console::debug(self.verbose, format!("GET {}", self.url));
        let pb = spinner(&self.url);
        let result = fetch::fetch_catalog(&self.client, &self.url).await;
        pb.finish_and_clear();
        match result {
            Ok(catalog) => {
                self.load(catalog);
                console::info(format!(
                    "loaded {} products",
                    self.pager.len().to_string().bold().green()
                ));
            }
            Err(e) => console::error(format!("error fetching products: {e}")),
        }
    }

    /// Returns whether the current page changed.
    fn navigate(&mut self, action: &Action) -> bool {
        match action {
            Action::Next => self.pager.next_page(),
            Action::Prev => self.pager.prev_page(),
            Action::Goto(page) => self.pager.go_to_page(*page),
            _ => false,
        }
    }

    fn show(&self) {
        if !self.loaded {
            return;
        }
        if self.pager.is_empty() {
            console::warn("the catalog has no products");
            return;
        }
        print!("{}", table::render_view(&self.pager, self.max_buttons));
    }
}

fn prompt() {
    print!("{} ", "catalog>".bold().cyan());
    let _ = std::io::stdout().flush();
}

async fn run_session(run: &RunConfig, client: reqwest::Client) -> Result<(), String> {
    print_banner();
    console::kv("URL", &run.url);
    console::kv("Page size", run.page_size);
    console::kv("Buttons", run.max_buttons);
    console::kv("Timeout", format!("{}s", run.timeout));
    if let Some(proxy) = run.proxy.as_deref() {
        console::kv("Proxy", proxy);
    }
    println!();
    print_actions();

    let mut session = Session::new(client, run);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt();
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(format!("failed to read input: {e}")),
        };
        let action = match parse_action(&line) {
            Some(action) => action,
            None => continue,
        };
        match action {
            Action::Quit => break,
            Action::Help => print_actions(),
            Action::Fetch => {
                session.fetch().await;
                session.show();
            }
            Action::Unknown(input) => {
                console::warn(format!("unknown action '{input}', type h for help"))
            }
            nav => {
                if !session.is_shown() {
                    console::warn("nothing to page through yet, fetch products first");
                    continue;
                }
                if !session.navigate(&nav) {
                    console::debug(session.verbose, format!("{nav:?} left the page unchanged"));
                }
                session.show();
            }
        }
    }

    println!();
    Ok(())
}

async fn run_batch(run: &RunConfig, client: reqwest::Client) -> Result<(), String> {
    console::debug(run.verbose, format!("GET {}", run.url));
    let pb = spinner(&run.url);
    let result = fetch::fetch_catalog(&client, &run.url).await;
    pb.finish_and_clear();
    let catalog = result.map_err(|e: FetchError| e.to_string())?;

    let mut pager = Paginator::new(run.page_size);
    pager.set_records(catalog.products);
    if run.page != 1 && !pager.go_to_page(run.page) {
        console::debug(
            run.verbose,
            format!(
                "page {} is outside 1..={}, printing page 1",
                run.page,
                pager.total_pages()
            ),
        );
    }

    let report = output::build_report(&pager);
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(&output::render(run.format, &report))
        .await
        .map_err(|e| format!("failed to write output: {e}"))?;
    stdout
        .flush()
        .await
        .map_err(|e| format!("failed to write output: {e}"))?;
    Ok(())
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }

    let client = fetch::build_client(&ClientOptions {
        proxy: run.proxy.clone(),
        timeout_seconds: run.timeout,
    })
    .map_err(|e| e.to_string())?;

    if run.batch {
        run_batch(&run, client).await
    } else {
        run_session(&run, client).await
    }
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{e}");
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    let cfg = match args.config.as_deref() {
        Some(path) => config::load_config(&config::expand_tilde(path), false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}

#[cfg(test)]
mod cli_tests {
    use super::*;
    use clap::Parser;

    fn run_config(argv: &[&str], cfg: ConfigFile) -> Result<RunConfig, String> {
        let mut full = vec!["catalog-pager"];
        full.extend_from_slice(argv);
        build_run_config(CliArgs::parse_from(full), cfg)
    }

    #[test]
    fn defaults_match_catalog_page() {
        let run = run_config(&[], ConfigFile::default()).unwrap();
        assert_eq!(run.url, fetch::DEFAULT_CATALOG_URL);
        assert_eq!(run.page_size, 10);
        assert_eq!(run.max_buttons, 3);
        assert_eq!(run.page, 1);
        assert_eq!(run.format, OutputFormat::Text);
        assert!(!run.batch);
        assert!(!run.no_color);
    }

    #[test]
    fn cli_overrides_config() {
        let cfg = ConfigFile {
            url: Some("https://config.example/catalog.json".to_string()),
            page_size: Some(25),
            max_buttons: Some(5),
            ..ConfigFile::default()
        };
        let run = run_config(&["--page-size", "7", "--url", "https://cli.example/c.json"], cfg)
            .unwrap();
        assert_eq!(run.url, "https://cli.example/c.json");
        assert_eq!(run.page_size, 7);
        assert_eq!(run.max_buttons, 5);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(run_config(&["--page-size", "0"], ConfigFile::default()).is_err());
        let cfg = ConfigFile {
            page_size: Some(0),
            ..ConfigFile::default()
        };
        assert!(run_config(&[], cfg).is_err());
    }

    #[test]
    fn invalid_url_and_format_are_rejected() {
        assert!(run_config(&["--url", "not a url"], ConfigFile::default()).is_err());
        assert!(run_config(&["--batch", "--format", "xml"], ConfigFile::default()).is_err());
        let cfg = ConfigFile {
            url: Some("::nope::".to_string()),
            ..ConfigFile::default()
        };
        assert!(run_config(&[], cfg).is_err());
    }

    #[test]
    fn zero_max_buttons_is_rejected() {
        assert!(run_config(&["--max-buttons", "0"], ConfigFile::default()).is_err());
        let cfg = ConfigFile {
            max_buttons: Some(0),
            ..ConfigFile::default()
        };
        assert!(run_config(&[], cfg).is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(run_config(&["--timeout", "0"], ConfigFile::default()).is_err());
    }

    #[test]
    fn page_and_format_need_batch() {
        assert!(run_config(&["--page", "2"], ConfigFile::default()).is_err());
        assert!(run_config(&["--format", "json"], ConfigFile::default()).is_err());
        let cfg = ConfigFile {
            format: Some("json".to_string()),
            ..ConfigFile::default()
        };
        assert_eq!(run_config(&[], cfg).unwrap().format, OutputFormat::Json);
    }

    #[test]
    fn color_flag_beats_config_no_color() {
        let cfg = ConfigFile {
            no_color: Some(true),
            ..ConfigFile::default()
        };
        assert!(run_config(&[], cfg.clone()).unwrap().no_color);
        assert!(!run_config(&["--color"], cfg).unwrap().no_color);
    }

    #[test]
    fn batch_flags() {
        let run = run_config(
            &["--batch", "--page", "4", "--format", "json"],
            ConfigFile::default(),
        )
        .unwrap();
        assert!(run.batch);
        assert_eq!(run.page, 4);
        assert_eq!(run.format, OutputFormat::Json);
    }

    #[test]
    fn parses_actions() {
        assert_eq!(parse_action("  "), None);
        assert_eq!(parse_action("f"), Some(Action::Fetch));
        assert_eq!(parse_action("Fetch"), Some(Action::Fetch));
        assert_eq!(parse_action("n"), Some(Action::Next));
        assert_eq!(parse_action("prev"), Some(Action::Prev));
        assert_eq!(parse_action(" 12 "), Some(Action::Goto(12)));
        assert_eq!(parse_action("q"), Some(Action::Quit));
        assert_eq!(
            parse_action("jump"),
            Some(Action::Unknown("jump".to_string()))
        );
    }

    fn session() -> Session {
        let run = run_config(&[], ConfigFile::default()).unwrap();
        Session::new(reqwest::Client::new(), &run)
    }

    fn catalog(count: usize) -> Catalog {
        let entries: Vec<String> = (0..count)
            .map(|i| format!(r#""{i}": {{"title": "p{i}", "price": "{i}", "popularity": "{i}"}}"#))
            .collect();
        Catalog::from_json(&format!(r#"{{"products": {{{}}}}}"#, entries.join(","))).unwrap()
    }

    #[test]
    fn session_hides_table_until_loaded() {
        let mut s = session();
        assert!(!s.is_shown());
        s.load(catalog(0));
        assert!(!s.is_shown());
        s.load(catalog(25));
        assert!(s.is_shown());
        assert_eq!(s.pager.records()[0].title, "p24");
    }

    #[test]
    fn session_navigation_and_reload() {
        let mut s = session();
        s.load(catalog(25));
        assert!(s.navigate(&Action::Next));
        assert!(s.navigate(&Action::Goto(3)));
        assert!(!s.navigate(&Action::Next));
        assert!(!s.navigate(&Action::Goto(9)));
        assert_eq!(s.pager.current_page(), 3);
        s.load(catalog(25));
        assert_eq!(s.pager.current_page(), 1);
        assert!(!s.navigate(&Action::Prev));
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_records() {
        let mut s = session();
        s.load(catalog(15));
        assert!(s.navigate(&Action::Next));
        s.client = reqwest::Client::builder().no_proxy().build().unwrap();
        s.url = "http://127.0.0.1:9/catalog.json".to_string();
        s.fetch().await;
        assert!(s.is_shown());
        assert_eq!(s.pager.len(), 15);
        assert_eq!(s.pager.current_page(), 2);
    }
}
