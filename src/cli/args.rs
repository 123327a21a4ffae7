use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "catalog-pager",
    version,
    about = "fetch a product catalog and page through it by popularity",
    long_about = "catalog-pager fetches a JSON product catalog, orders it by descending popularity and shows it as a paginated table.\n\nExamples:\n  catalog-pager\n  catalog-pager -u https://host.tld/catalog.json --page-size 20\n  catalog-pager --batch --page 3 --format json\n\nTip: Use --config to persist settings and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'u',
        long = "u",
        visible_alias = "url",
        value_name = "URL",
        help_heading = "Input",
        help = "Catalog URL (defaults to the public assignment catalog)."
    )]
    pub url: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.catalog-pager/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        short = 'p',
        long = "px",
        visible_alias = "proxy",
        value_name = "URL",
        help_heading = "HTTP",
        help = "HTTP proxy URL (e.g. http://127.0.0.1:8080)."
    )]
    pub proxy: Option<String>,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Request timeout in seconds."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 's',
        long = "ps",
        visible_alias = "page-size",
        value_name = "N",
        help_heading = "Paging",
        help = "Products per page."
    )]
    pub page_size: Option<usize>,

    #[arg(
        short = 'm',
        long = "mb",
        visible_alias = "max-buttons",
        value_name = "N",
        help_heading = "Paging",
        help = "Maximum number of page buttons in the control row."
    )]
    pub max_buttons: Option<usize>,

    #[arg(
        short = 'b',
        long = "bt",
        visible_alias = "batch",
        help_heading = "Batch",
        help = "Fetch once, print a single page and exit."
    )]
    pub batch: bool,

    #[arg(
        short = 'n',
        long = "pg",
        visible_alias = "page",
        value_name = "N",
        help_heading = "Batch",
        help = "Page to print in batch mode (ignored when out of range)."
    )]
    pub page: Option<usize>,

    #[arg(
        short = 'f',
        long = "fmt",
        visible_alias = "format",
        value_name = "FORMAT",
        help_heading = "Batch",
        help = "Batch output format: text or json."
    )]
    pub format: Option<String>,
}
