//! Static site generation for Dokkie.
//!
//! This crate provides:
//! - [`StaticSiteBuilder`]: scans the input directory, converts pages,
//!   builds navigation once and writes one HTML file per page
//! - Front matter, markdown and route helpers used while loading pages
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use dokkie_site::StaticSiteBuilder;
//!
//! let builder = StaticSiteBuilder::from_config(None, None)?;
//! let report = builder.build()?;
//! println!("{} pages written", report.pages_written);
//! # Ok(())
//! # }
//! ```

mod builder;
mod frontmatter;
mod loader;
mod markdown;
mod partials;
mod route;
mod scanner;
mod template;

pub use builder::{BuildError, BuildReport, StaticSiteBuilder};
pub use frontmatter::{FrontMatter, FrontmatterError, parse_date, parse_frontmatter, split_frontmatter};
pub use markdown::{RenderedMarkdown, render_markdown};
pub use route::{Route, make_route, output_path};
pub use template::{PageData, current_id, render_page};
