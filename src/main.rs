//! Prints historical URLs of a domain recorded by the
//! [Wayback Machine](https://web.archive.org).

#![warn(
    clippy::all,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]

use std::{
    io::{self, IsTerminal, Write},
    process,
};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use env_logger::Env;
use wbk::{
    build_cdx_url_with_endpoint, cdx::CDX_ENDPOINT, CdxClient, CdxFilter, CdxQueryOptions,
    DateRange, DomainSource,
};

static CDX_ENDPOINT_ENV_VAR: &str = "WBK_CDX_ENDPOINT";

#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Lists archived URLs of a domain from the Wayback Machine.",
    after_help = "TARGET may be a domain, a file with one domain per line, or `-` for stdin.\n\
        Reads stdin when TARGET is omitted."
)]
struct CliArgs {
    /// Domain, file of domains, or `-`.
    #[clap()]
    target: Option<String>,
    /// Timestamp range passed as `from` and `to`, e.g. "2012-2015".
    #[clap(long, value_name = "FROM-TO")]
    fromto: Option<String>,
    /// Comma-separated filters on statuscode or mimetype, optionally negated
    /// with `!`, e.g. "statuscode:200,!mimetype:text/html".
    #[clap(long, value_name = "FILTERS")]
    filter: Option<String>,
    /// URL match scope: exact, prefix, host or domain.
    #[clap(long = "match", value_name = "SCOPE")]
    match_scope: Option<String>,
    #[clap(long, env = CDX_ENDPOINT_ENV_VAR, default_value = CDX_ENDPOINT, hide = true)]
    cdx_endpoint: String,
    /// Shows trace messages, including HTTP connection details.
    #[clap(long)]
    trace: bool,
    /// Prints shell completions and exits.
    #[clap(long, arg_enum, value_name = "SHELL")]
    completions: Option<CompletionShell>,
}

#[derive(Clone, Copy, Debug, clap::ArgEnum)]
enum CompletionShell {
    Bash,
    Zsh,
}

impl CliArgs {
    fn query_options(&self) -> CdxQueryOptions {
        let date_range = self.fromto.as_deref().and_then(|s| {
            let range = DateRange::parse(s);
            if range.is_none() {
                log::warn!("ignoring date range without '-': {}", s);
            }
            range
        });
        CdxQueryOptions {
            date_range,
            filters: self
                .filter
                .as_deref()
                .map(CdxFilter::parse_list)
                .unwrap_or_default(),
            match_scope: self.match_scope.clone(),
        }
    }
}

fn run_completions(shell: CompletionShell, buf: &mut impl Write) {
    let shell = match shell {
        CompletionShell::Bash => Shell::Bash,
        CompletionShell::Zsh => Shell::Zsh,
    };
    clap_complete::generate(shell, &mut CliArgs::command(), "wbk", buf);
}

/// Prints the archived URLs of every domain, returning how many domains
/// failed. A failure is reported and the remaining domains are still queried.
fn run_lookups(
    domains: &[String],
    options: &CdxQueryOptions,
    endpoint: &str,
    cdx_client: &CdxClient,
    out: &mut impl Write,
) -> Result<usize> {
    let mut num_failed = 0;
    for domain in domains {
        let url = build_cdx_url_with_endpoint(endpoint, domain, options);
        match cdx_client.fetch_urls(&url) {
            Ok(urls) => {
                for url in urls {
                    writeln!(out, "{}", url)?;
                }
            }
            Err(e) => {
                out.flush()?;
                eprintln!("failed to fetch URLs for domain {}: {}", domain, e);
                num_failed += 1;
            }
        }
    }
    out.flush()?;
    Ok(num_failed)
}

fn main() -> Result<()> {
    let args = CliArgs::parse();

    let default_log_level = if args.trace { "trace" } else { "warn" };
    let mut log_builder =
        env_logger::Builder::from_env(Env::default().default_filter_or(default_log_level));
    if args.trace {
        log_builder.filter_module("reqwest", log::LevelFilter::Trace);
    }
    log_builder.init();

    if let Some(shell) = args.completions {
        run_completions(shell, &mut io::stdout());
        return Ok(());
    }

    let source = DomainSource::from_arg(args.target.as_deref());
    if source == DomainSource::Stdin && io::stdin().is_terminal() {
        CliArgs::command().print_help()?;
        return Ok(());
    }
    let domains = source.read_domains().context("failed to read domains")?;
    log::debug!("looking up {} domains", domains.len());

    let http_client = reqwest::blocking::ClientBuilder::new()
        .connection_verbose(args.trace)
        .build()?;
    let cdx_client = CdxClient::new(&http_client);

    let num_failed = run_lookups(
        &domains,
        &args.query_options(),
        &args.cdx_endpoint,
        &cdx_client,
        &mut io::stdout().lock(),
    )?;
    if num_failed > 0 {
        process::exit(1);
    }

    Ok(())
}
