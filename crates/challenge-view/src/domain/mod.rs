mod challenges;

pub use challenges::*;
