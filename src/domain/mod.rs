pub(crate) mod heliogram;
pub(crate) mod response;
pub(crate) mod samples;
