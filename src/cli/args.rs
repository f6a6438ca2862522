use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tileboard",
    version,
    about = "click-ranked tile grid over a remote record feed",
    long_about = "Tileboard fetches a record feed once, shows the first page as a grid of colored tiles, and re-ranks tiles by click count.\n\nExamples:\n  tileboard\n  tileboard -u https://jsonplaceholder.typicode.com/posts --reveal\n  tileboard --select 3 --select 3 --format json -o grid.json\n\nScripted interactions run in order: every --reveal first, then each --select, then --deselect if given."
)]
pub struct CliArgs {
    #[arg(
        short = 'u',
        long = "u",
        visible_alias = "endpoint",
        value_name = "URL",
        help_heading = "Feed",
        help = "Record feed endpoint (JSON array of records)."
    )]
    pub endpoint: Option<String>,

    #[arg(
        long = "offline",
        value_name = "FILE",
        help_heading = "Feed",
        help = "Read the record feed from a local JSON file instead of the endpoint."
    )]
    pub offline: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Feed",
        help = "Path to config file (defaults to ~/.tileboard/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "Feed",
        help = "HTTP request timeout in seconds."
    )]
    pub timeout: Option<usize>,

    #[arg(
        short = 'p',
        long = "px",
        visible_alias = "proxy",
        value_name = "URL",
        help_heading = "Feed",
        help = "Route the fetch through an HTTP proxy."
    )]
    pub proxy: Option<String>,

    #[arg(
        long = "initial",
        value_name = "N",
        help_heading = "Grid",
        help = "How many records are visible after the initial fetch."
    )]
    pub initial: Option<usize>,

    #[arg(
        long = "increment",
        value_name = "N",
        help_heading = "Grid",
        help = "How many records each reveal moves onto the grid."
    )]
    pub increment: Option<usize>,

    #[arg(
        short = 'r',
        long = "reveal",
        action = ArgAction::Count,
        help_heading = "Session",
        help = "Reveal one more page (repeatable)."
    )]
    pub reveal: u8,

    #[arg(
        short = 's',
        long = "select",
        value_name = "ID",
        action = ArgAction::Append,
        help_heading = "Session",
        help = "Click the tile with this record id (repeatable)."
    )]
    pub select: Vec<u64>,

    #[arg(
        long = "deselect",
        help_heading = "Session",
        help = "Close the detail panel at the end of the session."
    )]
    pub deselect: bool,

    #[arg(
        short = 'o',
        long = "o",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the final grid state to a file."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'f',
        long = "fmt",
        visible_alias = "format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format: text or json (inferred from the output path when omitted)."
    )]
    pub format: Option<String>,

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
