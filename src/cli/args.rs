use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "invdesk",
    version,
    about = "interactive terminal client for an inventory backend",
    long_about = "Invdesk is an interactive console for an inventory REST backend: it renders the product, supplier and order collections as tables and drives create/edit/delete flows against them.\n\nExamples:\n  invdesk\n  invdesk -u http://localhost:5000/api\n  invdesk --config ~/.invdesk/config.yml\n\nTip: Use --init-config to write a commented config file and keep invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'u',
        long = "bu",
        visible_alias = "base-url",
        value_name = "URL",
        help_heading = "Backend",
        help = "Base URL of the inventory API (default http://localhost:5000/api)."
    )]
    pub base_url: Option<String>,

    #[arg(
        short = 't',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "Backend",
        help = "HTTP request timeout in seconds."
    )]
    pub timeout: Option<usize>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.invdesk/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "init-config",
        help_heading = "Input",
        help = "Write a commented default config file if none exists, then exit."
    )]
    pub init_config: bool,

    #[arg(
        long = "cur",
        visible_alias = "currency",
        value_name = "GLYPH",
        help_heading = "Output",
        help = "Currency glyph shown on price and total columns."
    )]
    pub currency: Option<String>,

    #[arg(
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,
}
