//! Where the domains to look up come from.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainSource {
    /// A single domain given on the command line.
    Domain(String),
    /// A file with one domain per line.
    File(PathBuf),
    /// Standard input, one domain per line.
    Stdin,
}

impl DomainSource {
    /// Interprets the positional argument: missing or `-` means stdin, an
    /// existing file is read line by line, anything else is a domain.
    #[must_use]
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("-") => Self::Stdin,
            Some(arg) if Path::new(arg).is_file() => Self::File(arg.into()),
            Some(domain) => Self::Domain(domain.into()),
        }
    }

    /// # Errors
    ///
    /// Fails if the file cannot be opened or either input cannot be read.
    pub fn read_domains(&self) -> Result<Vec<String>> {
        match self {
            Self::Domain(domain) => Ok(vec![domain.clone()]),
            Self::File(path) => read_domains_from(BufReader::new(File::open(path)?)),
            Self::Stdin => read_domains_from(io::stdin().lock()),
        }
    }
}

/// Reads one domain per line, trimming whitespace and skipping blank lines.
///
/// # Errors
///
/// Fails on the first read error.
pub fn read_domains_from(reader: impl BufRead) -> Result<Vec<String>> {
    let mut domains = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let domain = line.trim();
        if !domain.is_empty() {
            domains.push(domain.to_owned());
        }
    }
    Ok(domains)
}
