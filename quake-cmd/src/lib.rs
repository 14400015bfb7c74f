//! Command implementations for the quake CLI.
//!
//! Each subcommand fetches the feed once, moves the stores to the requested
//! page, applies filters and prints one view of the result.

use clap::{Args, Subcommand};
use quake_core::config::{EARTHQUAKE_CSV_URL, FETCH_TIMEOUT_SECS};
use quake_core::filter::FilterPatch;
use std::path::PathBuf;

pub mod session;
pub mod view;

/// Where to read the feed from.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct SourceArgs {
    /// Feed URL (CSV with a header row)
    #[arg(long, default_value = EARTHQUAKE_CSV_URL)]
    pub url: String,

    /// Read the feed from a local CSV file instead of the URL
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = FETCH_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

/// Filter spec overrides; unset flags keep the defaults.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct FilterArgs {
    /// Minimum magnitude (inclusive)
    #[arg(long)]
    pub min_mag: Option<f64>,

    /// Maximum magnitude (inclusive)
    #[arg(long)]
    pub max_mag: Option<f64>,

    /// Minimum depth in km (inclusive)
    #[arg(long)]
    pub min_depth: Option<f64>,

    /// Maximum depth in km (inclusive)
    #[arg(long)]
    pub max_depth: Option<f64>,

    /// Place substring, case-insensitive; repeat to allow several
    #[arg(long = "place")]
    pub places: Vec<String>,
}

impl FilterArgs {
    pub fn to_patch(&self) -> FilterPatch {
        FilterPatch {
            min_magnitude: self.min_mag,
            max_magnitude: self.max_mag,
            min_depth: self.min_depth,
            max_depth: self.max_depth,
            selected_places: if self.places.is_empty() {
                None
            } else {
                Some(self.places.clone())
            },
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Print one page of the table
    Page {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filters: FilterArgs,

        /// Zero-based page number
        #[arg(short, long, default_value_t = 0)]
        page: usize,

        /// Sort column key (e.g. mag, depth, time); prefix with '-' for descending
        #[arg(long, allow_hyphen_values = true)]
        sort: Option<String>,

        /// Case-insensitive search across all displayed columns
        #[arg(long)]
        search: Option<String>,
    },

    /// Print the scatter projection of one page as JSON
    Chart {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filters: FilterArgs,

        /// Zero-based page number
        #[arg(short, long, default_value_t = 0)]
        page: usize,

        /// X axis field: mag, depth, latitude, longitude, gap, rms, nst
        #[arg(short = 'x', long, default_value = "mag")]
        x_axis: String,

        /// Y axis field: mag, depth, latitude, longitude, gap, rms, nst
        #[arg(short = 'y', long, default_value = "depth")]
        y_axis: String,

        /// Record id to emphasize
        #[arg(long)]
        highlight: Option<String>,
    },

    /// Select a record on a page and print its details
    Show {
        /// Record id
        id: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Zero-based page number
        #[arg(short, long, default_value_t = 0)]
        page: usize,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Page {
            source,
            filters,
            page,
            sort,
            search,
        } => {
            let ctx = session::open(&source, page, &filters).await?;
            let table = view::table_state(sort.as_deref(), search.as_deref())?;
            print!("{}", view::render_page(&ctx, &table));
            Ok(())
        }
        Command::Chart {
            source,
            filters,
            page,
            x_axis,
            y_axis,
            highlight,
        } => {
            let ctx = session::open(&source, page, &filters).await?;
            if let Some(id) = highlight {
                session::hover_by_id(&ctx, &id)?;
            }
            let json = view::render_chart(&ctx, &x_axis, &y_axis)?;
            println!("{}", json);
            Ok(())
        }
        Command::Show { id, source, page } => {
            let ctx = session::open(&source, page, &FilterArgs::default()).await?;
            session::click_by_id(&ctx, &id)?;
            match ctx.detail() {
                Some(detail) => print!("{}", detail),
                None => println!("No record selected"),
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_args_to_patch() {
        let args = FilterArgs {
            min_mag: Some(4.5),
            max_depth: Some(70.0),
            ..FilterArgs::default()
        };
        let patch = args.to_patch();
        assert_eq!(patch.min_magnitude, Some(4.5));
        assert_eq!(patch.max_depth, Some(70.0));
        assert_eq!(patch.max_magnitude, None);
        assert_eq!(patch.selected_places, None);

        let args = FilterArgs {
            places: vec!["alaska".to_string()],
            ..FilterArgs::default()
        };
        assert_eq!(
            args.to_patch().selected_places,
            Some(vec!["alaska".to_string()])
        );
        assert!(FilterArgs::default().to_patch().is_empty());
    }
}
