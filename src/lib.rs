//! Lists historical URLs for a domain from the Wayback Machine CDX index.

pub mod archive;
pub mod cdx;
pub mod error;
pub mod input;

pub use crate::{
    archive::CdxClient,
    cdx::{build_cdx_url, build_cdx_url_with_endpoint, CdxFilter, CdxQueryOptions, DateRange},
    error::{Result, WbkError},
    input::DomainSource,
};
