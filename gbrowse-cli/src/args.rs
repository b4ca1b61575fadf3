//! Command line parsing.

use std::path::PathBuf;

use gbrowse_lib::BrowserRequest;
use gbrowse_lib::filter::QuickJump;
use gbrowse_lib::page::PageAction;

use crate::error::CliError;

pub const USAGE: &str = "\
usage: gbrowse <dataset.json> [options]

options:
  --instance NAME     browser instance (default: dataset file stem)
  --session NAME      keep state under this session
  --sort LABEL        toggle ordering on a column
  --reset-order       restore the default ordering
  --first | --prev | --next | --last
  --page N            go to page N
  --per-page N        rows per page
  --search TEXT       keyword search, empty to clear
  --jump X            quick-jump: a letter, 0 for digits, empty for all
  --json              print the payload as JSON
  --verbose           debug logging";

#[derive(Debug, Default)]
pub struct Args {
    pub dataset: PathBuf,
    pub instance: Option<String>,
    pub session: Option<String>,
    pub request: BrowserRequest,
    pub json: bool,
    pub verbose: bool,
}

impl Args {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, CliError> {
        let mut parsed = Args::default();
        let mut dataset = None;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let mut value = |flag: &str| {
                args.next()
                    .ok_or_else(|| CliError::usage(format!("{} needs a value", flag)))
            };
            match arg.as_str() {
                "--instance" => parsed.instance = Some(value(&arg)?),
                "--session" => parsed.session = Some(value(&arg)?),
                "--sort" => parsed.request.change_order = Some(value(&arg)?),
                "--reset-order" => parsed.request.reset_order = true,
                "--first" => parsed.request.page = Some(PageAction::First),
                "--prev" => parsed.request.page = Some(PageAction::Prev),
                "--next" => parsed.request.page = Some(PageAction::Next),
                "--last" => parsed.request.page = Some(PageAction::Last),
                "--page" => {
                    let page = number(&arg, value(&arg)?)?;
                    parsed.request.page = Some(PageAction::Goto(page));
                }
                "--per-page" => parsed.request.per_page = Some(number(&arg, value(&arg)?)?),
                "--search" => parsed.request.keyword = Some(value(&arg)?.trim().to_string()),
                "--jump" => {
                    let target = value(&arg)?;
                    let jump = QuickJump::from_param(&target)
                        .ok_or_else(|| CliError::usage(format!("invalid quick-jump target '{}'", target)))?;
                    parsed.request.quickjump = Some(jump);
                }
                "--json" => parsed.json = true,
                "--verbose" => parsed.verbose = true,
                flag if flag.starts_with("--") => {
                    return Err(CliError::usage(format!("unknown option {}", flag)));
                }
                _ if dataset.is_none() => dataset = Some(PathBuf::from(&arg)),
                _ => return Err(CliError::usage(format!("unexpected argument {}", arg))),
            }
        }

        parsed.dataset = dataset.ok_or_else(|| CliError::usage("missing dataset file"))?;
        Ok(parsed)
    }

    /// The instance name, defaulting to the dataset's file stem.
    pub fn instance(&self) -> String {
        self.instance.clone().unwrap_or_else(|| {
            self.dataset
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "default".to_string())
        })
    }
}

fn number(flag: &str, value: String) -> Result<usize, CliError> {
    value
        .parse()
        .map_err(|_| CliError::usage(format!("{} expects a number, got '{}'", flag, value)))
}
