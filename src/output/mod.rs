pub mod formatter;

pub use formatter::{
    format_bar_listing, format_day_listing, format_pivot, format_route, format_route_header,
    format_route_tsv, format_score, format_summary, format_tips, should_use_colors, truncate_text,
};
