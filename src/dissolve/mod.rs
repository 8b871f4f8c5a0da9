pub(crate) mod calculator;
pub(crate) mod policy;
