mod parser;
mod types;

pub use parser::{load_matrix, read_matrix, SurveyRow};
pub use types::{Pair, RatingMatrix};
