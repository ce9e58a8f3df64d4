pub mod functionality;
pub mod gene;
pub mod record;
pub mod species;

// re-export for cleaner imports
pub use self::functionality::Functionality;
pub use self::gene::{GeneName, Locus, Segment};
pub use self::record::{GermlineRecord, Origin};
pub use self::species::Species;
