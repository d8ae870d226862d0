pub(crate) mod config;
pub(crate) mod merge;
pub(crate) mod run;
