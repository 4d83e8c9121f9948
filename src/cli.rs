use clap::Parser;
use sedline::{InvocationConfig, ParsePolicy, RegexSyntax, Result, Settings};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sedline")]
#[command(about = "Minimal stream editor: apply one substitute, delete or print command to every line")]
#[command(long_about = "sedline reads text line by line and applies a single command to each line.

SCRIPTS:
  s/PATTERN/REPLACEMENT/[FLAGS]   Substitute (delimiter may be /, | or ,)
                                  FLAGS: g = every match, i = ignore case
  d                               Delete every line
  p                               Print every line twice, plus auto-print

When no files are given, input is read from stdin.

EXAMPLES:
  sedline 's/foo/bar/g' file.txt         Replace all occurrences
  cat file.txt | sedline 's|/usr|/opt|'  Read from stdin
  sedline -E 's/(\\w+) (\\w+)/\\2 \\1/' f   sed-style backreferences
  sedline -n p file.txt                  Each line exactly twice
  sedline -i 's/old/new/' a.txt b.txt    Edit files in place")]
#[command(version)]
pub struct Cli {
    /// Script (when -e/-f is not given) followed by input files
    #[arg(value_name = "SCRIPT_AND_FILES")]
    pub args: Vec<String>,

    /// Script to execute; all positional arguments become files
    #[arg(short = 'e', long, value_name = "SCRIPT")]
    pub expression: Option<String>,

    /// Read the script from a file
    #[arg(short = 'f', long = "file", value_name = "SCRIPT_FILE")]
    pub script_file: Option<PathBuf>,

    /// Suppress automatic printing of each line
    #[arg(short = 'n', long, visible_alias = "silent")]
    pub quiet: bool,

    /// Edit files in place
    #[arg(short = 'i', long)]
    pub in_place: bool,

    /// Use extended regular expressions with sed-style \1 and & replacements
    #[arg(short = 'E', long = "regexp-extended", short_alias = 'r')]
    pub extended: bool,

    /// Pass lines through for unrecognized scripts instead of failing
    #[arg(long)]
    pub lenient: bool,

    /// Write a debug log to ~/.sedline/sedline.log
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Build the invocation config; flags override settings
    pub fn to_config(&self, settings: &Settings) -> Result<InvocationConfig> {
        let mut builder = InvocationConfig::builder()
            .settings(settings)
            .positional(self.args.iter().cloned())
            .quiet(self.quiet)
            .in_place(self.in_place);

        if let Some(expression) = &self.expression {
            builder = builder.expression(expression.clone());
        }
        if let Some(path) = &self.script_file {
            builder = builder.script_file(path.clone());
        }
        if self.extended {
            builder = builder.regex_syntax(RegexSyntax::Extended);
        }
        if self.lenient {
            builder = builder.parse_policy(ParsePolicy::Lenient);
        }

        builder.build()
    }

    pub fn debug_enabled(&self, settings: &Settings) -> bool {
        self.debug || settings.logging.debug == Some(true)
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
