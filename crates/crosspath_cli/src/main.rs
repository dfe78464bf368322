/* 📖 # Why is the CLI a thin wrapper with hand-rolled arguments?

Every command maps onto exactly one Provider operation, so there is nothing for an argument
parsing framework to do. The invocation is:

    crosspath [--windows | --posix] [--config <file>] <command> <path>...

Without `--config`, a `crosspath.toml` in the current directory is used when present. The
platform flags override whatever the configuration says.

Exit codes:
- 0: Success, one result per line on stdout
- 1: Error (unknown command, wrong argument count, invalid path or configuration)
*/

use std::env;
use std::fs;
use std::path::Path;
use std::process;

use tracing::debug;

use crosspath_base::tracing::init_tracing;
use crosspath_base::{CrosspathError, CrosspathResult, PalHandle, Platform, RealPal, bail};
use crosspath_path::{Provider, ProviderConfig};

const DEFAULT_CONFIG: &str = "crosspath.toml";

const USAGE: &str = "Usage: crosspath [--windows | --posix] [--config <file>] <command> <path>...

Commands:
  clean <path>...          lexically clean each path
  join <path>...           join all paths and clean the result
  rel <source> <target>    relative path from source to target
  abs <path>...            absolute path against the working directory
  dir | base | ext <path>...
  root | volume <path>...
  normalize <path>...      case-folded comparison key
  split <path>...          directory and file, tab separated
  is-abs <path>...
  equals <first> <second>
  list <path-list>         split a path list into entries";

#[derive(Debug, Default, PartialEq, Eq)]
struct Invocation {
    platform: Option<Platform>,
    config: Option<String>,
    command: String,
    args: Vec<String>,
}

impl Invocation {
    fn parse(args: &[String]) -> CrosspathResult<Self> {
        let mut invocation = Invocation::default();
        let mut rest = args.iter();
        while let Some(arg) = rest.next() {
            match arg.as_str() {
                "--windows" => invocation.platform = Some(Platform::Windows),
                "--posix" => invocation.platform = Some(Platform::Linux),
                "--config" => match rest.next() {
                    Some(path) => invocation.config = Some(path.clone()),
                    None => bail!("--config requires a file argument"),
                },
                flag if flag.starts_with("--") => bail!("Unknown option '{}'", flag),
                command => {
                    invocation.command = command.to_string();
                    invocation.args = rest.cloned().collect();
                    return Ok(invocation);
                }
            }
        }
        bail!("No command given")
    }
}

fn load_config(invocation: &Invocation) -> CrosspathResult<ProviderConfig> {
    let path = match &invocation.config {
        Some(path) => path.as_str(),
        None if Path::new(DEFAULT_CONFIG).exists() => DEFAULT_CONFIG,
        None => return Ok(ProviderConfig::default()),
    };
    debug!(path, "Loading provider configuration");
    let content = fs::read_to_string(path)
        .map_err(|e| Box::new(CrosspathError::file_error(path, e)))?;
    ProviderConfig::from_toml_str(&content)
}

fn build_provider(pal: PalHandle, invocation: &Invocation) -> CrosspathResult<Provider> {
    let mut config = load_config(invocation)?;
    if invocation.platform.is_some() {
        config.platform = invocation.platform;
    }
    Provider::from_config(pal, &config)
}

fn expect_args<'a>(command: &str, args: &'a [String], count: usize) -> CrosspathResult<&'a [String]> {
    if args.len() != count {
        bail!(
            "'{}' expects {} argument(s), got {}",
            command,
            count,
            args.len()
        );
    }
    Ok(args)
}

fn each<F>(args: &[String], op: F) -> CrosspathResult<Vec<String>>
where
    F: Fn(&str) -> CrosspathResult<String>,
{
    args.iter().map(|arg| op(arg)).collect()
}

/// Runs one command, returning the lines to print.
fn execute(provider: &Provider, command: &str, args: &[String]) -> CrosspathResult<Vec<String>> {
    debug!(command, ?args, "Executing command");
    match command {
        "clean" => each(args, |path| provider.clean(path)),
        "join" => Ok(vec![provider.join(args)?]),
        "rel" => {
            let args = expect_args(command, args, 2)?;
            Ok(vec![provider.rel(&args[0], &args[1])?])
        }
        "abs" => each(args, |path| provider.abs(path)),
        "dir" => each(args, |path| provider.dir(path)),
        "base" => each(args, |path| provider.base(path)),
        "ext" => each(args, |path| provider.ext(path)),
        "root" => each(args, |path| provider.root(path)),
        "volume" => each(args, |path| provider.volume_name(path)),
        "normalize" => each(args, |path| provider.normalize(path)),
        "split" => each(args, |path| {
            let (dir, file) = provider.split(path)?;
            Ok(format!("{}\t{}", dir, file))
        }),
        "is-abs" => each(args, |path| Ok(provider.is_abs(path)?.to_string())),
        "equals" => {
            let args = expect_args(command, args, 2)?;
            Ok(vec![provider.equals(&args[0], &args[1])?.to_string()])
        }
        "list" => {
            let args = expect_args(command, args, 1)?;
            Ok(provider
                .parse_list(&args[0])?
                .iter()
                .map(|entry| provider.render(entry))
                .collect())
        }
        other => bail!("Unknown command '{}'", other),
    }
}

fn main() {
    if let Err(e) = init_tracing() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let args: Vec<String> = env::args().skip(1).collect();
    let invocation = match Invocation::parse(&args) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            process::exit(1);
        }
    };

    let provider = match build_provider(PalHandle::new(RealPal::new()), &invocation) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("Error: Failed to configure path provider: {}", e);
            process::exit(1);
        }
    };

    match execute(&provider, &invocation.command, &invocation.args) {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
