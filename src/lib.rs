pub use gsa::{GeneralizedSuffixArray, StringMatches, SEPARATOR};
pub use sais::suffix_array;
pub use table::SuffixArray;

mod gsa;
mod sais;
mod table;
