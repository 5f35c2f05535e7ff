mod export;
mod formatter;

pub use export::export_scores;
pub use formatter::{format_group_detail, format_score, format_score_table, should_use_colors};
